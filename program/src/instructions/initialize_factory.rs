use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
};

use crate::{
    common::{check_signer, check_system_program, create_pda_account, log_accounts, log_params},
    error::UmayError,
    state::Factory,
    validate,
};

pub fn initialize_factory(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    admin: Pubkey,
    usdt_mint: Pubkey,
) -> ProgramResult {
    msg!("Initializing factory...");
    msg!("admin: {}", admin);
    msg!("usdt_mint: {}", usdt_mint);

    let account_info_iter = &mut accounts.iter();

    let factory_account = next_account_info(account_info_iter)?;
    let payer = next_account_info(account_info_iter)?;
    let system_program = next_account_info(account_info_iter)?;

    log_accounts(&[
        (factory_account, "Factory"),
        (payer, "Payer"),
        (system_program, "System Program"),
    ]);

    check_signer(payer)?;
    check_system_program(system_program)?;

    let (factory_pda, factory_bump) = Factory::get_pda(program_id);
    validate!(
        factory_pda == *factory_account.key,
        UmayError::InvalidPda,
        "Invalid seeds for Factory PDA"
    )?;

    let seeds = Factory::get_factory_signer_seeds(&factory_bump);
    create_pda_account(
        payer,
        factory_account,
        system_program,
        Factory::SIZE,
        program_id,
        &seeds,
    )?;

    let factory = Factory::new(admin, usdt_mint, factory_bump);
    factory.save(factory_account)?;

    msg!("Factory created: {}", factory_pda);
    log_params(&factory);

    Ok(())
}
