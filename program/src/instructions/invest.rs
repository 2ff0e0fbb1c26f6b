use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};

use crate::{
    common::{
        check_address, check_signer, check_token_program, load_token_account_of, log_accounts,
        log_data, log_params, mint_shares, transfer_tokens,
    },
    error::UmayError,
    state::{Factory, Pool, PoolAction, PoolRecord},
    validate,
};

pub fn invest(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    msg!("Starting invest...");
    msg!("amount: {}", amount);

    let clock = &Clock::get()?;

    let mut iter = accounts.iter();

    let factory_account = next_account_info(&mut iter)?;
    let pool_account = next_account_info(&mut iter)?;
    let share_mint = next_account_info(&mut iter)?;
    let usdt_vault = next_account_info(&mut iter)?;
    let investor = next_account_info(&mut iter)?;
    let investor_usdt = next_account_info(&mut iter)?;
    let investor_share = next_account_info(&mut iter)?;
    let token_program = next_account_info(&mut iter)?;

    log_accounts(&[
        (factory_account, "Factory"),
        (pool_account, "Pool"),
        (share_mint, "Share Mint"),
        (usdt_vault, "Usdt Vault"),
        (investor, "Investor"),
        (investor_usdt, "Investor Usdt"),
        (investor_share, "Investor Share"),
        (token_program, "Token Program"),
    ]);

    check_signer(investor)?;
    check_token_program(token_program)?;

    let factory = Factory::load(factory_account, program_id)?;
    let mut pool = Pool::load(pool_account, factory_account.key, program_id)?;
    check_address(share_mint, &pool.share_mint, "Share Mint")?;
    check_address(usdt_vault, &pool.usdt_vault, "Usdt Vault")?;

    pool.check_can_invest(amount, clock.unix_timestamp)?;

    load_token_account_of(investor_usdt, &factory.usdt_mint, investor.key, "Investor Usdt")?;
    load_token_account_of(investor_share, &pool.share_mint, investor.key, "Investor Share")?;

    let shares = pool.shares_for_deposit(amount)?;
    validate!(
        shares > 0,
        UmayError::InsufficientFunds,
        "amount {} buys no shares at price {}",
        amount,
        pool.token_price
    )?;
    msg!("Issuing investor shares: {}", shares);

    msg!("Transfering to Usdt Vault...");
    transfer_tokens(token_program, investor_usdt, usdt_vault, investor, amount)?;

    msg!("Minting shares...");
    let index_bytes = pool.index.to_le_bytes();
    let pool_seeds = Pool::get_pool_signer_seeds(factory_account.key, &index_bytes, &pool.bump);
    mint_shares(
        token_program,
        share_mint,
        investor_share,
        pool_account,
        shares,
        &pool_seeds,
    )?;

    pool.record_investment(amount)?;
    pool.save(pool_account)?;

    let record = PoolRecord::new(
        clock.unix_timestamp,
        pool_account.key,
        &pool,
        investor.key,
        PoolAction::Invest,
        amount,
        shares,
    );
    log_data(&record)?;
    log_params(&record);

    Ok(())
}
