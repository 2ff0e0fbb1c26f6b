use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke,
    program_pack::Pack,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};
use spl_token::state::{Account as TokenAccount, Mint};

use crate::{
    common::{
        check_address, check_system_program, check_token_program, create_pda_account,
        log_accounts, log_data, log_params,
    },
    constants::{SHARE_MINT_DECIMALS, SHARE_MINT_SEED, USDT_VAULT_SEED},
    error::UmayError,
    state::{CreatePoolParams, Factory, Pool, PoolAction, PoolRecord},
    validate,
};

pub fn create_pool(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    params: &CreatePoolParams,
) -> ProgramResult {
    msg!("Creating pool...");
    log_params(params);

    let clock = &Clock::get()?;

    let account_info_iter = &mut accounts.iter();

    let factory_account = next_account_info(account_info_iter)?;
    let pool_account = next_account_info(account_info_iter)?;
    let share_mint = next_account_info(account_info_iter)?;
    let usdt_mint = next_account_info(account_info_iter)?;
    let usdt_vault = next_account_info(account_info_iter)?;
    let admin = next_account_info(account_info_iter)?;
    let system_program = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;

    log_accounts(&[
        (factory_account, "Factory"),
        (pool_account, "Pool"),
        (share_mint, "Share Mint"),
        (usdt_mint, "Usdt Mint"),
        (usdt_vault, "Usdt Vault"),
        (admin, "Admin"),
        (system_program, "System Program"),
        (token_program, "Token Program"),
    ]);

    check_system_program(system_program)?;
    check_token_program(token_program)?;

    let mut factory = Factory::load(factory_account, program_id)?;
    factory.check_admin(admin)?;
    check_address(usdt_mint, &factory.usdt_mint, "Usdt Mint")?;
    validate!(
        spl_token::check_id(usdt_mint.owner),
        UmayError::InvalidAccountData,
        "Usdt Mint is not a token mint"
    )?;

    params.validate(clock.unix_timestamp)?;

    let pool_index = factory.next_pool_index()?;
    let (pool_pda, pool_bump) = Pool::get_pda(factory_account.key, pool_index, program_id);
    check_address(pool_account, &pool_pda, "Pool PDA")?;

    let (share_mint_pda, share_mint_bump) = Pool::get_share_mint_pda(&pool_pda, program_id);
    check_address(share_mint, &share_mint_pda, "Share Mint PDA")?;

    let (usdt_vault_pda, usdt_vault_bump) = Pool::get_usdt_vault_pda(&pool_pda, program_id);
    check_address(usdt_vault, &usdt_vault_pda, "Usdt Vault PDA")?;

    let index_bytes = pool_index.to_le_bytes();
    let pool_seeds = Pool::get_pool_signer_seeds(factory_account.key, &index_bytes, &pool_bump);
    create_pda_account(
        admin,
        pool_account,
        system_program,
        Pool::SIZE,
        program_id,
        &pool_seeds,
    )?;
    msg!("Pool created: {}", pool_pda);

    create_pda_account(
        admin,
        share_mint,
        system_program,
        Mint::LEN,
        token_program.key,
        &[SHARE_MINT_SEED, pool_pda.as_ref(), &[share_mint_bump]],
    )?;
    invoke(
        &spl_token::instruction::initialize_mint2(
            token_program.key,
            share_mint.key,
            &pool_pda,
            Some(&pool_pda),
            SHARE_MINT_DECIMALS,
        )?,
        &[share_mint.clone(), token_program.clone()],
    )?;
    msg!("Share mint created: {}", share_mint_pda);

    create_pda_account(
        admin,
        usdt_vault,
        system_program,
        TokenAccount::LEN,
        token_program.key,
        &[USDT_VAULT_SEED, pool_pda.as_ref(), &[usdt_vault_bump]],
    )?;
    invoke(
        &spl_token::instruction::initialize_account3(
            token_program.key,
            usdt_vault.key,
            usdt_mint.key,
            &pool_pda,
        )?,
        &[usdt_vault.clone(), usdt_mint.clone(), token_program.clone()],
    )?;
    msg!("Usdt vault created: {}", usdt_vault_pda);

    let pool = Pool::new(
        *factory_account.key,
        share_mint_pda,
        usdt_vault_pda,
        params,
        pool_index,
        pool_bump,
    );
    pool.save(pool_account)?;
    factory.save(factory_account)?;

    log_data(&PoolRecord::new(
        clock.unix_timestamp,
        pool_account.key,
        &pool,
        admin.key,
        PoolAction::CreatePool,
        0,
        0,
    ))?;

    Ok(())
}
