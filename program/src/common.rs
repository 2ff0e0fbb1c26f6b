use borsh::BorshSerialize;
use serde::Serialize;
use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    log::sol_log_data,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction, system_program,
    sysvar::Sysvar,
};
use spl_token::state::Account as TokenAccount;

use crate::{error::UmayError, validate};

pub fn log_accounts(accounts: &[(&AccountInfo, &str)]) {
    for (account, name) in accounts {
        msg!("{}: {}", name, account.key);
    }
}

/// Logs any serializable value as a single json line.
pub fn log_params<T: Serialize>(params: &T) {
    match serde_json::to_string(params) {
        Ok(json) => msg!("{}", json),
        Err(e) => msg!("Failed to serialize params: {}", e),
    }
}

/// Emits a borsh encoded event through the program data log.
pub fn log_data<T: BorshSerialize>(event: &T) -> ProgramResult {
    let data = event.try_to_vec()?;
    sol_log_data(&[&data]);
    Ok(())
}

pub fn check_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        msg!("Missing required signature");
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

pub fn check_token_program(account: &AccountInfo) -> ProgramResult {
    validate!(
        spl_token::check_id(account.key),
        ProgramError::IncorrectProgramId,
        "Invalid Token Program"
    )
}

pub fn check_system_program(account: &AccountInfo) -> ProgramResult {
    validate!(
        system_program::check_id(account.key),
        ProgramError::IncorrectProgramId,
        "Invalid System Program"
    )
}

pub fn check_address(account: &AccountInfo, expected: &Pubkey, name: &str) -> ProgramResult {
    validate!(
        *account.key == *expected,
        UmayError::InvalidPda,
        "Invalid {}: expected {}, got {}",
        name,
        expected,
        account.key
    )
}

/// Unpacks a token account after checking it is owned by the token program.
pub fn load_token_account(account: &AccountInfo) -> Result<TokenAccount, ProgramError> {
    validate!(
        spl_token::check_id(account.owner),
        UmayError::InvalidAccountData,
        "{} is not a token account",
        account.key
    )?;
    TokenAccount::unpack(&account.data.borrow())
}

/// Unpacks a token account and checks its mint and owner.
pub fn load_token_account_of(
    account: &AccountInfo,
    mint: &Pubkey,
    owner: &Pubkey,
    name: &str,
) -> Result<TokenAccount, ProgramError> {
    let token_account = load_token_account(account)?;
    validate!(
        token_account.mint == *mint,
        UmayError::InvalidAccountData,
        "{} has mint {}, expected {}",
        name,
        token_account.mint,
        mint
    )?;
    validate!(
        token_account.owner == *owner,
        UmayError::Unauthorized,
        "{} is owned by {}, expected {}",
        name,
        token_account.owner,
        owner
    )?;
    Ok(token_account)
}

/// Creates an account at a program address, paid by `payer`.
///
/// An address that already holds lamports but no data is still a system account,
/// so it is topped up to rent exemption, allocated and assigned instead.
pub fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    new_account: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    space: usize,
    owner: &Pubkey,
    signer_seeds: &[&[u8]],
) -> ProgramResult {
    validate!(
        new_account.data_is_empty() && system_program::check_id(new_account.owner),
        UmayError::AlreadyInitialized,
        "{} already exists",
        new_account.key
    )?;

    let rent = Rent::get()?;
    let rent_lamports = rent.minimum_balance(space);
    let current_lamports = new_account.lamports();

    if current_lamports == 0 {
        return invoke_signed(
            &system_instruction::create_account(
                payer.key,
                new_account.key,
                rent_lamports,
                space as u64,
                owner,
            ),
            &[payer.clone(), new_account.clone(), system_program.clone()],
            &[signer_seeds],
        );
    }

    msg!(
        "{} is prefunded with {} lamports",
        new_account.key,
        current_lamports
    );
    let top_up = rent_lamports.saturating_sub(current_lamports);
    if top_up > 0 {
        invoke(
            &system_instruction::transfer(payer.key, new_account.key, top_up),
            &[payer.clone(), new_account.clone(), system_program.clone()],
        )?;
    }
    invoke_signed(
        &system_instruction::allocate(new_account.key, space as u64),
        &[new_account.clone(), system_program.clone()],
        &[signer_seeds],
    )?;
    invoke_signed(
        &system_instruction::assign(new_account.key, owner),
        &[new_account.clone(), system_program.clone()],
        &[signer_seeds],
    )
}

/// Moves funding tokens out of an account the signer controls.
pub fn transfer_tokens<'a>(
    token_program: &AccountInfo<'a>,
    from: &AccountInfo<'a>,
    to: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    amount: u64,
) -> ProgramResult {
    invoke(
        &spl_token::instruction::transfer(
            token_program.key,
            from.key,
            to.key,
            authority.key,
            &[],
            amount,
        )?,
        &[
            from.clone(),
            to.clone(),
            authority.clone(),
            token_program.clone(),
        ],
    )
}

/// Moves funding tokens out of the pool vault, signed by the pool.
pub fn transfer_tokens_signed<'a>(
    token_program: &AccountInfo<'a>,
    from: &AccountInfo<'a>,
    to: &AccountInfo<'a>,
    pool: &AccountInfo<'a>,
    amount: u64,
    pool_seeds: &[&[u8]],
) -> ProgramResult {
    invoke_signed(
        &spl_token::instruction::transfer(
            token_program.key,
            from.key,
            to.key,
            pool.key,
            &[],
            amount,
        )?,
        &[
            from.clone(),
            to.clone(),
            pool.clone(),
            token_program.clone(),
        ],
        &[pool_seeds],
    )
}

pub fn mint_shares<'a>(
    token_program: &AccountInfo<'a>,
    share_mint: &AccountInfo<'a>,
    to: &AccountInfo<'a>,
    pool: &AccountInfo<'a>,
    amount: u64,
    pool_seeds: &[&[u8]],
) -> ProgramResult {
    invoke_signed(
        &spl_token::instruction::mint_to(
            token_program.key,
            share_mint.key,
            to.key,
            pool.key,
            &[],
            amount,
        )?,
        &[
            share_mint.clone(),
            to.clone(),
            pool.clone(),
            token_program.clone(),
        ],
        &[pool_seeds],
    )
}

pub fn burn_shares<'a>(
    token_program: &AccountInfo<'a>,
    from: &AccountInfo<'a>,
    share_mint: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    amount: u64,
) -> ProgramResult {
    invoke(
        &spl_token::instruction::burn(
            token_program.key,
            from.key,
            share_mint.key,
            authority.key,
            &[],
            amount,
        )?,
        &[
            from.clone(),
            share_mint.clone(),
            authority.clone(),
            token_program.clone(),
        ],
    )
}
