use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};

use crate::{
    common::{
        check_address, check_token_program, load_token_account_of, log_accounts, log_data,
        transfer_tokens,
    },
    error::UmayError,
    state::{Factory, Pool, PoolAction, PoolRecord},
    validate,
};

/// Tops up a pool vault from the admin, e.g. to cover scenario payouts.
pub fn deposit_usdt(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    msg!("Starting admin deposit...");
    msg!("amount: {}", amount);

    let clock = &Clock::get()?;

    let account_info_iter = &mut accounts.iter();

    let factory_account = next_account_info(account_info_iter)?;
    let pool_account = next_account_info(account_info_iter)?;
    let usdt_vault = next_account_info(account_info_iter)?;
    let admin = next_account_info(account_info_iter)?;
    let admin_usdt = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;

    log_accounts(&[
        (factory_account, "Factory"),
        (pool_account, "Pool"),
        (usdt_vault, "Usdt Vault"),
        (admin, "Admin"),
        (admin_usdt, "Admin Usdt"),
        (token_program, "Token Program"),
    ]);

    check_token_program(token_program)?;

    let factory = Factory::load(factory_account, program_id)?;
    factory.check_admin(admin)?;
    let pool = Pool::load(pool_account, factory_account.key, program_id)?;
    check_address(usdt_vault, &pool.usdt_vault, "Usdt Vault")?;

    validate!(amount > 0, UmayError::InsufficientFunds, "amount must be > 0")?;
    load_token_account_of(admin_usdt, &factory.usdt_mint, admin.key, "Admin Usdt")?;

    transfer_tokens(token_program, admin_usdt, usdt_vault, admin, amount)?;

    log_data(&PoolRecord::new(
        clock.unix_timestamp,
        pool_account.key,
        &pool,
        admin.key,
        PoolAction::Deposit,
        amount,
        0,
    ))?;

    Ok(())
}
