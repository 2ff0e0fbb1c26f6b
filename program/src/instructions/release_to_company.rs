use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};

use crate::{
    common::{
        check_address, check_token_program, load_token_account, load_token_account_of,
        log_accounts, log_data, transfer_tokens_signed,
    },
    error::UmayError,
    state::{Factory, Pool, PoolAction, PoolRecord},
    validate,
};

pub fn release_to_company(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    msg!("Releasing funds to company...");

    let clock = &Clock::get()?;

    let account_info_iter = &mut accounts.iter();

    let factory_account = next_account_info(account_info_iter)?;
    let pool_account = next_account_info(account_info_iter)?;
    let usdt_vault = next_account_info(account_info_iter)?;
    let company_usdt = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;

    log_accounts(&[
        (factory_account, "Factory"),
        (pool_account, "Pool"),
        (usdt_vault, "Usdt Vault"),
        (company_usdt, "Company Usdt"),
        (token_program, "Token Program"),
    ]);

    check_token_program(token_program)?;

    let factory = Factory::load(factory_account, program_id)?;
    let mut pool = Pool::load(pool_account, factory_account.key, program_id)?;
    check_address(usdt_vault, &pool.usdt_vault, "Usdt Vault")?;

    pool.check_releasable()?;

    load_token_account_of(
        company_usdt,
        &factory.usdt_mint,
        &pool.company_wallet,
        "Company Usdt",
    )?;

    let amount = load_token_account(usdt_vault)?.amount;
    validate!(
        amount > 0,
        UmayError::InsufficientFunds,
        "Usdt Vault is empty"
    )?;

    msg!("Transfering {} from Usdt Vault to {}", amount, company_usdt.key);
    let index_bytes = pool.index.to_le_bytes();
    let pool_seeds = Pool::get_pool_signer_seeds(factory_account.key, &index_bytes, &pool.bump);
    transfer_tokens_signed(
        token_program,
        usdt_vault,
        company_usdt,
        pool_account,
        amount,
        &pool_seeds,
    )?;

    pool.mark_released()?;
    pool.save(pool_account)?;

    log_data(&PoolRecord::new(
        clock.unix_timestamp,
        pool_account.key,
        &pool,
        &pool.company_wallet,
        PoolAction::Release,
        amount,
        0,
    ))?;

    Ok(())
}
