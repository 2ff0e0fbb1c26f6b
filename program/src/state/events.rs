use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use super::Pool;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolRecord {
    pub ts: i64,
    pub pool: Pubkey,
    pub pool_index: u64,
    /// The signer of the instruction. Finalize takes no signer and records the default key
    pub authority: Pubkey,
    pub action: PoolAction,
    /// Funding tokens moved by the action
    pub amount: u64,
    /// Share tokens minted or burned by the action
    pub shares: u64,

    pub total_invested_after: u64,
    pub state_after: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PoolAction {
    CreatePool,
    Invest,
    Finalize,
    Release,
    Refund,
    Deposit,
    Redeem,
    ToggleScenario,
}

impl PoolRecord {
    pub fn new(
        ts: i64,
        pool_key: &Pubkey,
        pool: &Pool,
        authority: &Pubkey,
        action: PoolAction,
        amount: u64,
        shares: u64,
    ) -> Self {
        Self {
            ts,
            pool: *pool_key,
            pool_index: pool.index,
            authority: *authority,
            action,
            amount,
            shares,
            total_invested_after: pool.total_invested,
            state_after: pool.state,
        }
    }
}
