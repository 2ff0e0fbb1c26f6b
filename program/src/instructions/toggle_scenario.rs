use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};

use crate::{
    common::{log_accounts, log_data},
    state::{Factory, Pool, PoolAction, PoolRecord, Scenario},
};

pub fn set_success_payout_active(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    active: bool,
) -> ProgramResult {
    toggle_scenario(program_id, accounts, Scenario::Success, active)
}

pub fn set_fail_payout_active(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    active: bool,
) -> ProgramResult {
    toggle_scenario(program_id, accounts, Scenario::Fail, active)
}

fn toggle_scenario(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    scenario: Scenario,
    active: bool,
) -> ProgramResult {
    msg!("Setting {:?} payout active: {}", scenario, active);

    let clock = &Clock::get()?;

    let account_info_iter = &mut accounts.iter();

    let factory_account = next_account_info(account_info_iter)?;
    let pool_account = next_account_info(account_info_iter)?;
    let admin = next_account_info(account_info_iter)?;

    log_accounts(&[
        (factory_account, "Factory"),
        (pool_account, "Pool"),
        (admin, "Admin"),
    ]);

    let factory = Factory::load(factory_account, program_id)?;
    factory.check_admin(admin)?;
    let mut pool = Pool::load(pool_account, factory_account.key, program_id)?;

    pool.set_payout_active(scenario, active);
    pool.save(pool_account)?;

    log_data(&PoolRecord::new(
        clock.unix_timestamp,
        pool_account.key,
        &pool,
        admin.key,
        PoolAction::ToggleScenario,
        0,
        0,
    ))?;

    Ok(())
}
