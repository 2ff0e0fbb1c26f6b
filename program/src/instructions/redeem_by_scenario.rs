use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};

use crate::{
    common::{
        burn_shares, check_address, check_signer, check_token_program, load_token_account,
        load_token_account_of, log_accounts, log_data, log_params, transfer_tokens_signed,
    },
    error::UmayError,
    state::{Factory, Pool, PoolAction, PoolRecord, Scenario},
    validate,
};

pub fn redeem_by_scenario(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    scenario: u8,
    token_amount: Option<u64>,
) -> ProgramResult {
    msg!("Starting redeem by scenario...");
    msg!("scenario: {}", scenario);
    msg!("token_amount: {:?}", token_amount);

    let clock = &Clock::get()?;

    let mut iter = accounts.iter();

    let factory_account = next_account_info(&mut iter)?;
    let pool_account = next_account_info(&mut iter)?;
    let usdt_vault = next_account_info(&mut iter)?;
    let investor = next_account_info(&mut iter)?;
    let investor_usdt = next_account_info(&mut iter)?;
    let share_mint = next_account_info(&mut iter)?;
    let investor_share = next_account_info(&mut iter)?;
    let token_program = next_account_info(&mut iter)?;

    log_accounts(&[
        (factory_account, "Factory"),
        (pool_account, "Pool"),
        (usdt_vault, "Usdt Vault"),
        (investor, "Investor"),
        (investor_usdt, "Investor Usdt"),
        (share_mint, "Share Mint"),
        (investor_share, "Investor Share"),
        (token_program, "Token Program"),
    ]);

    check_signer(investor)?;
    check_token_program(token_program)?;

    let scenario = Scenario::try_from(scenario)?;

    let factory = Factory::load(factory_account, program_id)?;
    let pool = Pool::load(pool_account, factory_account.key, program_id)?;
    check_address(share_mint, &pool.share_mint, "Share Mint")?;
    check_address(usdt_vault, &pool.usdt_vault, "Usdt Vault")?;

    load_token_account_of(investor_usdt, &factory.usdt_mint, investor.key, "Investor Usdt")?;
    let share_balance =
        load_token_account_of(investor_share, &pool.share_mint, investor.key, "Investor Share")?
            .amount;

    let burn_amount = token_amount.unwrap_or(share_balance);
    validate!(
        burn_amount > 0,
        UmayError::InsufficientFunds,
        "no shares to redeem"
    )?;
    validate!(
        burn_amount <= share_balance,
        UmayError::InsufficientFunds,
        "redeeming {} shares, holding {}",
        burn_amount,
        share_balance
    )?;

    let payout = pool.scenario_payout(burn_amount, scenario)?;
    let vault_balance = load_token_account(usdt_vault)?.amount;
    validate!(
        vault_balance >= payout,
        UmayError::InsufficientFunds,
        "Usdt Vault holds {}, payout needs {}",
        vault_balance,
        payout
    )?;
    msg!("Paying {} for {} shares", payout, burn_amount);

    burn_shares(token_program, investor_share, share_mint, investor, burn_amount)?;

    let index_bytes = pool.index.to_le_bytes();
    let pool_seeds = Pool::get_pool_signer_seeds(factory_account.key, &index_bytes, &pool.bump);
    transfer_tokens_signed(
        token_program,
        usdt_vault,
        investor_usdt,
        pool_account,
        payout,
        &pool_seeds,
    )?;

    let record = PoolRecord::new(
        clock.unix_timestamp,
        pool_account.key,
        &pool,
        investor.key,
        PoolAction::Redeem,
        payout,
        burn_amount,
    );
    log_data(&record)?;
    log_params(&record);

    Ok(())
}
