use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;
use solana_program::{
    account_info::AccountInfo, borsh0_10::try_from_slice_unchecked, entrypoint::ProgramResult,
    msg, program_error::ProgramError, pubkey::Pubkey,
};

use super::AccountType;
use crate::{constants::FACTORY_SEED, error::UmayError, validate};

#[derive(BorshSerialize, BorshDeserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    pub account_type: AccountType,
    /// Signs pool creation and the admin-only pool operations
    pub admin: Pubkey,
    /// The funding token every pool raises in
    pub usdt_mint: Pubkey,
    /// Number of pools created so far, also the index of the next pool
    pub pool_count: u64,
    /// The bump for the factory pda
    pub bump: u8,
}

impl Factory {
    pub const SIZE: usize = 1 + 32 + 32 + 8 + 1;

    pub fn new(admin: Pubkey, usdt_mint: Pubkey, bump: u8) -> Self {
        Self {
            account_type: AccountType::Factory,
            admin,
            usdt_mint,
            pool_count: 0,
            bump,
        }
    }

    pub fn get_factory_signer_seeds(bump: &u8) -> [&[u8]; 2] {
        [FACTORY_SEED, bytemuck::bytes_of(bump)]
    }

    pub fn get_pda(program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[FACTORY_SEED], program_id)
    }

    /// Loads the factory after checking its address and owner.
    pub fn load(account: &AccountInfo, program_id: &Pubkey) -> Result<Self, ProgramError> {
        let (factory_pda, _) = Self::get_pda(program_id);
        validate!(
            factory_pda == *account.key,
            UmayError::InvalidPda,
            "Invalid seeds for Factory PDA"
        )?;
        validate!(
            account.owner == program_id,
            UmayError::InvalidAccountData,
            "Factory is not owned by the program"
        )?;

        let factory = try_from_slice_unchecked::<Factory>(&account.data.borrow())
            .map_err(|_| UmayError::InvalidAccountData)?;
        validate!(
            factory.account_type == AccountType::Factory,
            UmayError::InvalidAccountData,
            "Account is not a factory"
        )?;

        Ok(factory)
    }

    pub fn save(&self, account: &AccountInfo) -> ProgramResult {
        BorshSerialize::serialize(self, &mut &mut account.data.borrow_mut()[..])?;
        Ok(())
    }

    pub fn check_admin(&self, signer: &AccountInfo) -> ProgramResult {
        if !signer.is_signer {
            msg!("Missing required signature");
            return Err(ProgramError::MissingRequiredSignature);
        }
        validate!(
            self.admin == *signer.key,
            UmayError::Unauthorized,
            "{} is not the factory admin",
            signer.key
        )
    }

    /// Hands out the next pool index.
    pub fn next_pool_index(&mut self) -> Result<u64, ProgramError> {
        let index = self.pool_count;
        self.pool_count = self
            .pool_count
            .checked_add(1)
            .ok_or(UmayError::MathOverflow)?;
        Ok(index)
    }
}
