use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::{
    error::UmayError,
    state::{CreatePoolParams, Factory, Pool},
};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum UmayInstruction {
    /// Creates the factory
    /// Accounts:
    /// - [writable] Factory (PDA)
    /// - [signer, writable] Payer
    /// - [] System Program
    InitializeFactory { admin: Pubkey, usdt_mint: Pubkey },

    /// Creates the next pool of the factory with its share mint and funding vault
    /// Accounts:
    /// - [writable] Factory (PDA)
    /// - [writable] Pool (PDA)
    /// - [writable] Share Mint (PDA)
    /// - [] Usdt Mint
    /// - [writable] Usdt Vault (PDA)
    /// - [signer, writable] Admin, pays for the new accounts
    /// - [] System Program
    /// - [] Token Program
    CreatePool(CreatePoolParams),

    /// Accounts:
    /// - [] Factory (PDA)
    /// - [writable] Pool (PDA)
    /// - [writable] Share Mint (PDA)
    /// - [writable] Usdt Vault (PDA)
    /// - [signer, writable] Investor
    /// - [writable] Investor Usdt Account
    /// - [writable] Investor Share Account
    /// - [] Token Program
    Invest { amount: u64 },

    /// Accounts:
    /// - [] Factory (PDA)
    /// - [writable] Pool (PDA)
    Finalize,

    /// Accounts:
    /// - [] Factory (PDA)
    /// - [writable] Pool (PDA)
    /// - [writable] Usdt Vault (PDA)
    /// - [writable] Company Usdt Account
    /// - [] Token Program
    ReleaseToCompany,

    /// Accounts:
    /// - [] Factory (PDA)
    /// - [] Pool (PDA)
    /// - [writable] Usdt Vault (PDA)
    /// - [signer, writable] Investor
    /// - [writable] Investor Usdt Account
    /// - [writable] Share Mint (PDA)
    /// - [writable] Investor Share Account
    /// - [] Token Program
    Refund,

    /// Accounts:
    /// - [] Factory (PDA)
    /// - [] Pool (PDA)
    /// - [writable] Usdt Vault (PDA)
    /// - [signer] Admin
    /// - [writable] Admin Usdt Account
    /// - [] Token Program
    DepositUsdt { amount: u64 },

    /// Accounts:
    /// - [] Factory (PDA)
    /// - [writable] Pool (PDA)
    /// - [signer] Admin
    SetSuccessPayoutActive { active: bool },

    /// Same accounts as `SetSuccessPayoutActive`
    SetFailPayoutActive { active: bool },

    /// Same accounts as `Refund`
    RedeemByScenario {
        scenario: u8,
        token_amount: Option<u64>,
    },
}

impl UmayInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| UmayError::InvalidInstruction.into())
    }

    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        Ok(self.try_to_vec()?)
    }
}

/// Addresses of a pool and the accounts it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAddresses {
    pub factory: Pubkey,
    pub pool: Pubkey,
    pub share_mint: Pubkey,
    pub usdt_vault: Pubkey,
}

impl PoolAddresses {
    pub fn derive(program_id: &Pubkey, pool_index: u64) -> Self {
        let (factory, _) = Factory::get_pda(program_id);
        let (pool, _) = Pool::get_pda(&factory, pool_index, program_id);
        let (share_mint, _) = Pool::get_share_mint_pda(&pool, program_id);
        let (usdt_vault, _) = Pool::get_usdt_vault_pda(&pool, program_id);
        Self {
            factory,
            pool,
            share_mint,
            usdt_vault,
        }
    }
}

pub fn initialize_factory(
    program_id: &Pubkey,
    payer: &Pubkey,
    admin: &Pubkey,
    usdt_mint: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let (factory, _) = Factory::get_pda(program_id);
    let data = UmayInstruction::InitializeFactory {
        admin: *admin,
        usdt_mint: *usdt_mint,
    }
    .pack()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(factory, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    })
}

pub fn create_pool(
    program_id: &Pubkey,
    admin: &Pubkey,
    usdt_mint: &Pubkey,
    pool_index: u64,
    params: CreatePoolParams,
) -> Result<Instruction, ProgramError> {
    let addresses = PoolAddresses::derive(program_id, pool_index);
    let data = UmayInstruction::CreatePool(params).pack()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(addresses.factory, false),
            AccountMeta::new(addresses.pool, false),
            AccountMeta::new(addresses.share_mint, false),
            AccountMeta::new_readonly(*usdt_mint, false),
            AccountMeta::new(addresses.usdt_vault, false),
            AccountMeta::new(*admin, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        data,
    })
}

pub fn invest(
    program_id: &Pubkey,
    pool_index: u64,
    investor: &Pubkey,
    investor_usdt: &Pubkey,
    investor_share: &Pubkey,
    amount: u64,
) -> Result<Instruction, ProgramError> {
    let addresses = PoolAddresses::derive(program_id, pool_index);
    let data = UmayInstruction::Invest { amount }.pack()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(addresses.factory, false),
            AccountMeta::new(addresses.pool, false),
            AccountMeta::new(addresses.share_mint, false),
            AccountMeta::new(addresses.usdt_vault, false),
            AccountMeta::new(*investor, true),
            AccountMeta::new(*investor_usdt, false),
            AccountMeta::new(*investor_share, false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        data,
    })
}

pub fn finalize(program_id: &Pubkey, pool_index: u64) -> Result<Instruction, ProgramError> {
    let addresses = PoolAddresses::derive(program_id, pool_index);

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(addresses.factory, false),
            AccountMeta::new(addresses.pool, false),
        ],
        data: UmayInstruction::Finalize.pack()?,
    })
}

pub fn release_to_company(
    program_id: &Pubkey,
    pool_index: u64,
    company_usdt: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let addresses = PoolAddresses::derive(program_id, pool_index);

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(addresses.factory, false),
            AccountMeta::new(addresses.pool, false),
            AccountMeta::new(addresses.usdt_vault, false),
            AccountMeta::new(*company_usdt, false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        data: UmayInstruction::ReleaseToCompany.pack()?,
    })
}

fn investor_exit_accounts(
    addresses: &PoolAddresses,
    investor: &Pubkey,
    investor_usdt: &Pubkey,
    investor_share: &Pubkey,
) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(addresses.factory, false),
        AccountMeta::new_readonly(addresses.pool, false),
        AccountMeta::new(addresses.usdt_vault, false),
        AccountMeta::new(*investor, true),
        AccountMeta::new(*investor_usdt, false),
        AccountMeta::new(addresses.share_mint, false),
        AccountMeta::new(*investor_share, false),
        AccountMeta::new_readonly(spl_token::id(), false),
    ]
}

pub fn refund(
    program_id: &Pubkey,
    pool_index: u64,
    investor: &Pubkey,
    investor_usdt: &Pubkey,
    investor_share: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let addresses = PoolAddresses::derive(program_id, pool_index);

    Ok(Instruction {
        program_id: *program_id,
        accounts: investor_exit_accounts(&addresses, investor, investor_usdt, investor_share),
        data: UmayInstruction::Refund.pack()?,
    })
}

pub fn deposit_usdt(
    program_id: &Pubkey,
    pool_index: u64,
    admin: &Pubkey,
    admin_usdt: &Pubkey,
    amount: u64,
) -> Result<Instruction, ProgramError> {
    let addresses = PoolAddresses::derive(program_id, pool_index);

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(addresses.factory, false),
            AccountMeta::new_readonly(addresses.pool, false),
            AccountMeta::new(addresses.usdt_vault, false),
            AccountMeta::new_readonly(*admin, true),
            AccountMeta::new(*admin_usdt, false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        data: UmayInstruction::DepositUsdt { amount }.pack()?,
    })
}

fn toggle_scenario(
    program_id: &Pubkey,
    pool_index: u64,
    admin: &Pubkey,
    instruction: UmayInstruction,
) -> Result<Instruction, ProgramError> {
    let addresses = PoolAddresses::derive(program_id, pool_index);

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(addresses.factory, false),
            AccountMeta::new(addresses.pool, false),
            AccountMeta::new_readonly(*admin, true),
        ],
        data: instruction.pack()?,
    })
}

pub fn set_success_payout_active(
    program_id: &Pubkey,
    pool_index: u64,
    admin: &Pubkey,
    active: bool,
) -> Result<Instruction, ProgramError> {
    toggle_scenario(
        program_id,
        pool_index,
        admin,
        UmayInstruction::SetSuccessPayoutActive { active },
    )
}

pub fn set_fail_payout_active(
    program_id: &Pubkey,
    pool_index: u64,
    admin: &Pubkey,
    active: bool,
) -> Result<Instruction, ProgramError> {
    toggle_scenario(
        program_id,
        pool_index,
        admin,
        UmayInstruction::SetFailPayoutActive { active },
    )
}

pub fn redeem_by_scenario(
    program_id: &Pubkey,
    pool_index: u64,
    investor: &Pubkey,
    investor_usdt: &Pubkey,
    investor_share: &Pubkey,
    scenario: u8,
    token_amount: Option<u64>,
) -> Result<Instruction, ProgramError> {
    let addresses = PoolAddresses::derive(program_id, pool_index);

    Ok(Instruction {
        program_id: *program_id,
        accounts: investor_exit_accounts(&addresses, investor, investor_usdt, investor_share),
        data: UmayInstruction::RedeemByScenario {
            scenario,
            token_amount,
        }
        .pack()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_tag_is_first_byte() {
        assert_eq!(UmayInstruction::Finalize.pack().unwrap(), vec![3]);

        let data = UmayInstruction::Invest { amount: 5 }.pack().unwrap();
        assert_eq!(data[0], 2);
        assert_eq!(&data[1..], &5u64.to_le_bytes());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(
            UmayInstruction::unpack(&[42]),
            Err(ProgramError::from(UmayError::InvalidInstruction))
        );
        assert_eq!(
            UmayInstruction::unpack(&[]),
            Err(ProgramError::from(UmayError::InvalidInstruction))
        );
    }

    #[test]
    fn redeem_without_amount_unpacks() {
        let data = UmayInstruction::RedeemByScenario {
            scenario: 1,
            token_amount: None,
        }
        .pack()
        .unwrap();
        assert_eq!(data, vec![9, 1, 0]);
        assert_eq!(
            UmayInstruction::unpack(&data).unwrap(),
            UmayInstruction::RedeemByScenario {
                scenario: 1,
                token_amount: None
            }
        );
    }

    #[test]
    fn create_pool_accounts_follow_processor_order() {
        let program_id = crate::id();
        let admin = Pubkey::new_unique();
        let usdt_mint = Pubkey::new_unique();
        let params = CreatePoolParams {
            company_wallet: Pubkey::new_unique(),
            target_amount: 1_000_000,
            deadline: 1_700_003_600,
            success_return_bps: 11_000,
            fail_return_bps: 8_000,
            token_price: 1_000_000,
        };

        let ix = create_pool(&program_id, &admin, &usdt_mint, 7, params).unwrap();
        let addresses = PoolAddresses::derive(&program_id, 7);

        let keys: Vec<Pubkey> = ix.accounts.iter().map(|meta| meta.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                addresses.factory,
                addresses.pool,
                addresses.share_mint,
                usdt_mint,
                addresses.usdt_vault,
                admin,
                system_program::id(),
                spl_token::id(),
            ]
        );
        let signers: Vec<Pubkey> = ix
            .accounts
            .iter()
            .filter(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .collect();
        assert_eq!(signers, vec![admin]);
        assert_eq!(
            UmayInstruction::unpack(&ix.data).unwrap(),
            UmayInstruction::CreatePool(params)
        );
    }

    #[test]
    fn pool_addresses_match_state_seeds() {
        let program_id = crate::id();
        let addresses = PoolAddresses::derive(&program_id, 0);

        let (factory, _) = Factory::get_pda(&program_id);
        let (pool, _) = Pool::get_pda(&factory, 0, &program_id);
        assert_eq!(addresses.factory, factory);
        assert_eq!(addresses.pool, pool);
        assert_eq!(
            addresses.usdt_vault,
            Pool::get_usdt_vault_pda(&pool, &program_id).0
        );
        assert_ne!(PoolAddresses::derive(&program_id, 1).pool, pool);
    }

    #[test]
    fn refund_and_redeem_share_account_layout() {
        let program_id = crate::id();
        let investor = Pubkey::new_unique();
        let usdt = Pubkey::new_unique();
        let share = Pubkey::new_unique();

        let refund_ix = refund(&program_id, 0, &investor, &usdt, &share).unwrap();
        let redeem_ix =
            redeem_by_scenario(&program_id, 0, &investor, &usdt, &share, 0, Some(10)).unwrap();
        assert_eq!(refund_ix.accounts, redeem_ix.accounts);
        assert!(refund_ix.accounts[3].is_signer);
        assert!(!refund_ix.accounts[1].is_writable);
    }
}
