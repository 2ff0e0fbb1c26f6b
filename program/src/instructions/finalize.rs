use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};

use crate::{
    common::{log_accounts, log_data, log_params},
    state::{Factory, Pool, PoolAction, PoolRecord},
};

pub fn finalize(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    msg!("Finalizing pool...");

    let clock = &Clock::get()?;

    let account_info_iter = &mut accounts.iter();

    let factory_account = next_account_info(account_info_iter)?;
    let pool_account = next_account_info(account_info_iter)?;

    log_accounts(&[(factory_account, "Factory"), (pool_account, "Pool")]);

    Factory::load(factory_account, program_id)?;
    let mut pool = Pool::load(pool_account, factory_account.key, program_id)?;

    msg!("Before finalizing pool...");
    log_params(&pool);

    pool.finalize(clock.unix_timestamp)?;
    pool.save(pool_account)?;

    log_data(&PoolRecord::new(
        clock.unix_timestamp,
        pool_account.key,
        &pool,
        &Pubkey::default(),
        PoolAction::Finalize,
        0,
        0,
    ))?;

    Ok(())
}
