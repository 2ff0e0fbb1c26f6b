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
        load_token_account_of, log_accounts, log_data, transfer_tokens_signed,
    },
    error::UmayError,
    state::{Factory, Pool, PoolAction, PoolRecord},
    validate,
};

pub fn refund(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    msg!("Starting refund...");

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

    let factory = Factory::load(factory_account, program_id)?;
    let pool = Pool::load(pool_account, factory_account.key, program_id)?;
    check_address(share_mint, &pool.share_mint, "Share Mint")?;
    check_address(usdt_vault, &pool.usdt_vault, "Usdt Vault")?;

    pool.check_refundable()?;

    load_token_account_of(investor_usdt, &factory.usdt_mint, investor.key, "Investor Usdt")?;
    let shares =
        load_token_account_of(investor_share, &pool.share_mint, investor.key, "Investor Share")?
            .amount;
    validate!(shares > 0, UmayError::InsufficientFunds, "no shares to refund")?;

    let refund_amount = pool.principal_for_shares(shares)?;
    let vault_balance = load_token_account(usdt_vault)?.amount;
    validate!(
        vault_balance >= refund_amount,
        UmayError::InsufficientFunds,
        "Usdt Vault holds {}, refund needs {}",
        vault_balance,
        refund_amount
    )?;
    msg!("Refunding {} for {} shares", refund_amount, shares);

    burn_shares(token_program, investor_share, share_mint, investor, shares)?;

    let index_bytes = pool.index.to_le_bytes();
    let pool_seeds = Pool::get_pool_signer_seeds(factory_account.key, &index_bytes, &pool.bump);
    transfer_tokens_signed(
        token_program,
        usdt_vault,
        investor_usdt,
        pool_account,
        refund_amount,
        &pool_seeds,
    )?;

    log_data(&PoolRecord::new(
        clock.unix_timestamp,
        pool_account.key,
        &pool,
        investor.key,
        PoolAction::Refund,
        refund_amount,
        shares,
    ))?;

    Ok(())
}
