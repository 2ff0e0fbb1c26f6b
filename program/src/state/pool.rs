use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;
use solana_program::{
    account_info::AccountInfo, borsh0_10::try_from_slice_unchecked, entrypoint::ProgramResult,
    msg, program_error::ProgramError, pubkey::Pubkey,
};

use super::AccountType;
use crate::{
    constants::{
        BPS_DENOMINATOR, POOL_SEED, SCENARIO_FAIL, SCENARIO_SUCCESS, SHARE_MINT_DECIMALS,
        SHARE_MINT_SEED, USDT_VAULT_SEED,
    },
    error::UmayError,
    validate,
};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStateKind {
    Funding = 0,
    Succeeded = 1,
    Failed = 2,
    Released = 3,
}

impl From<u8> for PoolStateKind {
    fn from(v: u8) -> Self {
        match v {
            1 => Self::Succeeded,
            2 => Self::Failed,
            3 => Self::Released,
            _ => Self::Funding,
        }
    }
}

/// Redemption scenario selected by the investor.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Success,
    Fail,
}

impl TryFrom<u8> for Scenario {
    type Error = UmayError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            SCENARIO_SUCCESS => Ok(Self::Success),
            SCENARIO_FAIL => Ok(Self::Fail),
            _ => Err(UmayError::InvalidScenario),
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub account_type: AccountType,
    /// The factory this pool was created by
    pub factory: Pubkey,
    /// Receives the raised funds once the pool succeeds
    pub company_wallet: Pubkey,
    /// Share token mint, a pda of the pool. The pool is mint and freeze authority
    pub share_mint: Pubkey,
    /// Token account holding the funding tokens, a pda of the pool
    pub usdt_vault: Pubkey,
    /// Funding target in funding token base units
    pub target_amount: u64,
    /// Unix timestamp, investing is only accepted strictly before it
    pub deadline: i64,
    /// Payout on redemption in the success scenario: BPS_DENOMINATOR
    pub success_return_bps: u16,
    /// Payout on redemption in the fail scenario: BPS_DENOMINATOR
    pub fail_return_bps: u16,
    /// Funding token base units per whole share token
    pub token_price: u64,
    pub mint_decimals: u8,
    /// A PoolStateKind
    pub state: u8,
    pub finalized: bool,
    pub success_payout_active: bool,
    pub fail_payout_active: bool,
    /// Sum of all investments
    pub total_invested: u64,
    /// Index of the pool within the factory. Part of the pool seeds
    pub index: u64,
    /// The bump for the pool pda
    pub bump: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatePoolParams {
    pub company_wallet: Pubkey,
    pub target_amount: u64,
    pub deadline: i64,
    pub success_return_bps: u16,
    pub fail_return_bps: u16,
    pub token_price: u64,
}

impl CreatePoolParams {
    pub fn validate(&self, now: i64) -> ProgramResult {
        validate!(
            self.target_amount > 0,
            UmayError::InvalidPoolParams,
            "target amount must be > 0"
        )?;
        validate!(
            self.token_price > 0,
            UmayError::InvalidPoolParams,
            "token price must be > 0"
        )?;
        validate!(
            self.deadline > now,
            UmayError::InvalidPoolParams,
            "deadline {} is not after now {}",
            self.deadline,
            now
        )
    }
}

impl Pool {
    pub const SIZE: usize = 1 + 32 * 4 + 8 + 8 + 2 + 2 + 8 + 1 + 1 + 1 + 1 + 1 + 8 + 8 + 1;

    pub fn new(
        factory: Pubkey,
        share_mint: Pubkey,
        usdt_vault: Pubkey,
        params: &CreatePoolParams,
        index: u64,
        bump: u8,
    ) -> Self {
        Self {
            account_type: AccountType::Pool,
            factory,
            company_wallet: params.company_wallet,
            share_mint,
            usdt_vault,
            target_amount: params.target_amount,
            deadline: params.deadline,
            success_return_bps: params.success_return_bps,
            fail_return_bps: params.fail_return_bps,
            token_price: params.token_price,
            mint_decimals: SHARE_MINT_DECIMALS,
            state: PoolStateKind::Funding as u8,
            finalized: false,
            success_payout_active: false,
            fail_payout_active: false,
            total_invested: 0,
            index,
            bump,
        }
    }

    pub fn get_pool_signer_seeds<'a>(
        factory: &'a Pubkey,
        index: &'a [u8; 8],
        bump: &'a u8,
    ) -> [&'a [u8]; 4] {
        [POOL_SEED, factory.as_ref(), index, bytemuck::bytes_of(bump)]
    }

    pub fn get_pda(factory: &Pubkey, index: u64, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[POOL_SEED, factory.as_ref(), &index.to_le_bytes()],
            program_id,
        )
    }

    pub fn get_share_mint_pda(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[SHARE_MINT_SEED, pool.as_ref()], program_id)
    }

    pub fn get_usdt_vault_pda(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[USDT_VAULT_SEED, pool.as_ref()], program_id)
    }

    /// Loads a pool of `factory` after checking its owner and seeds.
    pub fn load(
        account: &AccountInfo,
        factory: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<Self, ProgramError> {
        validate!(
            account.owner == program_id,
            UmayError::InvalidAccountData,
            "Pool is not owned by the program"
        )?;

        let pool = try_from_slice_unchecked::<Pool>(&account.data.borrow())
            .map_err(|_| UmayError::InvalidAccountData)?;
        validate!(
            pool.account_type == AccountType::Pool,
            UmayError::InvalidAccountData,
            "Account is not a pool"
        )?;
        validate!(
            pool.factory == *factory,
            UmayError::InvalidAccountData,
            "Pool belongs to factory {}",
            pool.factory
        )?;

        let index = pool.index.to_le_bytes();
        let seeds = Self::get_pool_signer_seeds(factory, &index, &pool.bump);
        let pool_pda = Pubkey::create_program_address(&seeds, program_id)
            .map_err(|_| UmayError::InvalidPda)?;
        validate!(
            pool_pda == *account.key,
            UmayError::InvalidPda,
            "Invalid seeds for Pool PDA"
        )?;

        Ok(pool)
    }

    pub fn save(&self, account: &AccountInfo) -> ProgramResult {
        BorshSerialize::serialize(self, &mut &mut account.data.borrow_mut()[..])?;
        Ok(())
    }

    pub fn kind(&self) -> PoolStateKind {
        PoolStateKind::from(self.state)
    }

    fn decimals_factor(&self) -> Result<u128, ProgramError> {
        10u128
            .checked_pow(self.mint_decimals as u32)
            .ok_or_else(|| UmayError::MathOverflow.into())
    }

    /// Share tokens minted for a deposit of `amount` funding tokens.
    pub fn shares_for_deposit(&self, amount: u64) -> Result<u64, ProgramError> {
        let shares = (amount as u128)
            .checked_mul(self.decimals_factor()?)
            .and_then(|v| v.checked_div(self.token_price as u128))
            .ok_or(UmayError::MathOverflow)?;
        u64::try_from(shares).map_err(|_| UmayError::MathOverflow.into())
    }

    /// Funding tokens originally paid for `shares` share tokens.
    pub fn principal_for_shares(&self, shares: u64) -> Result<u64, ProgramError> {
        let principal = self.principal_for_shares_u128(shares)?;
        u64::try_from(principal).map_err(|_| UmayError::MathOverflow.into())
    }

    fn principal_for_shares_u128(&self, shares: u64) -> Result<u128, ProgramError> {
        (shares as u128)
            .checked_mul(self.token_price as u128)
            .and_then(|v| v.checked_div(self.decimals_factor().ok()?))
            .ok_or_else(|| UmayError::MathOverflow.into())
    }

    /// Payout for burning `shares` under `scenario`. The scenario has to be switched on.
    pub fn scenario_payout(&self, shares: u64, scenario: Scenario) -> Result<u64, ProgramError> {
        let return_bps = match scenario {
            Scenario::Success => {
                validate!(
                    self.success_payout_active,
                    UmayError::InvalidScenario,
                    "success payout is not active"
                )?;
                self.success_return_bps
            }
            Scenario::Fail => {
                validate!(
                    self.fail_payout_active,
                    UmayError::InvalidScenario,
                    "fail payout is not active"
                )?;
                self.fail_return_bps
            }
        };

        let payout = self
            .principal_for_shares_u128(shares)?
            .checked_mul(return_bps as u128)
            .ok_or(UmayError::MathOverflow)?
            / BPS_DENOMINATOR;
        u64::try_from(payout).map_err(|_| UmayError::MathOverflow.into())
    }

    pub fn check_can_invest(&self, amount: u64, now: i64) -> ProgramResult {
        validate!(amount > 0, UmayError::InsufficientFunds, "amount must be > 0")?;
        validate!(
            self.kind() == PoolStateKind::Funding,
            UmayError::NotFunding,
            "pool state is {:?}",
            self.kind()
        )?;
        validate!(
            now < self.deadline,
            UmayError::DeadlinePassed,
            "deadline {} reached at {}",
            self.deadline,
            now
        )
    }

    pub fn record_investment(&mut self, amount: u64) -> ProgramResult {
        self.total_invested = self
            .total_invested
            .checked_add(amount)
            .ok_or(UmayError::MathOverflow)?;
        Ok(())
    }

    /// Closes funding. A pool can be finalized once the deadline passed or the target is met.
    pub fn finalize(&mut self, now: i64) -> Result<PoolStateKind, ProgramError> {
        validate!(!self.finalized, UmayError::AlreadyFinalized)?;
        validate!(
            self.kind() == PoolStateKind::Funding,
            UmayError::InvalidState,
            "pool state is {:?}",
            self.kind()
        )?;

        let target_met = self.total_invested >= self.target_amount;
        validate!(
            target_met || now >= self.deadline,
            UmayError::FundingOngoing,
            "raised {} of {} before deadline {}",
            self.total_invested,
            self.target_amount,
            self.deadline
        )?;

        let outcome = if target_met {
            PoolStateKind::Succeeded
        } else {
            PoolStateKind::Failed
        };
        self.state = outcome as u8;
        self.finalized = true;

        msg!("Pool {} finalized as {:?}", self.index, outcome);

        Ok(outcome)
    }

    pub fn check_releasable(&self) -> ProgramResult {
        validate!(
            self.finalized && self.kind() == PoolStateKind::Succeeded,
            UmayError::InvalidState,
            "only succeeded pools release funds, state is {:?}",
            self.kind()
        )
    }

    pub fn mark_released(&mut self) -> ProgramResult {
        self.check_releasable()?;
        self.state = PoolStateKind::Released as u8;
        Ok(())
    }

    pub fn check_refundable(&self) -> ProgramResult {
        validate!(
            self.finalized && self.kind() == PoolStateKind::Failed,
            UmayError::InvalidState,
            "only failed pools refund, state is {:?}",
            self.kind()
        )
    }

    pub fn set_payout_active(&mut self, scenario: Scenario, active: bool) {
        match scenario {
            Scenario::Success => self.success_payout_active = active,
            Scenario::Fail => self.fail_payout_active = active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE: u64 = 1_000_000;
    const NOW: i64 = 1_700_000_000;

    fn params() -> CreatePoolParams {
        CreatePoolParams {
            company_wallet: Pubkey::new_unique(),
            target_amount: 1_000_000,
            deadline: NOW + 3600,
            success_return_bps: 11_000,
            fail_return_bps: 8_000,
            token_price: PRICE,
        }
    }

    fn pool() -> Pool {
        Pool::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            &params(),
            0,
            255,
        )
    }

    #[test]
    fn size_matches_serialized_len() {
        assert_eq!(pool().try_to_vec().unwrap().len(), Pool::SIZE);
    }

    #[test]
    fn unknown_state_byte_reads_as_funding() {
        assert_eq!(PoolStateKind::from(2), PoolStateKind::Failed);
        assert_eq!(PoolStateKind::from(42), PoolStateKind::Funding);
    }

    #[test]
    fn scenario_codes() {
        assert_eq!(Scenario::try_from(0u8), Ok(Scenario::Success));
        assert_eq!(Scenario::try_from(1u8), Ok(Scenario::Fail));
        assert_eq!(Scenario::try_from(2u8), Err(UmayError::InvalidScenario));
    }

    #[test]
    fn create_params_are_validated() {
        assert!(params().validate(NOW).is_ok());

        let mut p = params();
        p.target_amount = 0;
        assert_eq!(p.validate(NOW), Err(ProgramError::from(UmayError::InvalidPoolParams)));

        let mut p = params();
        p.token_price = 0;
        assert_eq!(p.validate(NOW), Err(ProgramError::from(UmayError::InvalidPoolParams)));

        let mut p = params();
        p.deadline = NOW;
        assert_eq!(p.validate(NOW), Err(ProgramError::from(UmayError::InvalidPoolParams)));
    }

    #[test]
    fn one_price_unit_buys_one_whole_share() {
        let pool = pool();
        assert_eq!(pool.shares_for_deposit(PRICE).unwrap(), 1_000_000_000_000_000_000);
        assert_eq!(pool.shares_for_deposit(1).unwrap(), 1_000_000_000_000);
        assert_eq!(pool.principal_for_shares(1_000_000_000_000_000_000).unwrap(), PRICE);
    }

    #[test]
    fn principal_rounds_down() {
        let pool = pool();
        assert_eq!(pool.principal_for_shares(999_999_999_999).unwrap(), 0);
        assert_eq!(pool.principal_for_shares(1_999_999_999_999).unwrap(), 1);
    }

    #[test]
    fn oversized_deposit_overflows_share_supply() {
        let pool = pool();
        // 19 whole shares do not fit a u64 at 18 decimals
        assert_eq!(
            pool.shares_for_deposit(19 * PRICE),
            Err(ProgramError::from(UmayError::MathOverflow))
        );
    }

    #[test]
    fn scenario_payout_requires_active_toggle() {
        let mut pool = pool();
        let shares = pool.shares_for_deposit(PRICE).unwrap();

        assert_eq!(
            pool.scenario_payout(shares, Scenario::Success),
            Err(ProgramError::from(UmayError::InvalidScenario))
        );

        pool.set_payout_active(Scenario::Success, true);
        assert_eq!(pool.scenario_payout(shares, Scenario::Success).unwrap(), 1_100_000);
        assert_eq!(
            pool.scenario_payout(shares, Scenario::Fail),
            Err(ProgramError::from(UmayError::InvalidScenario))
        );

        pool.set_payout_active(Scenario::Fail, true);
        assert_eq!(pool.scenario_payout(shares, Scenario::Fail).unwrap(), 800_000);

        pool.set_payout_active(Scenario::Success, false);
        assert!(pool.scenario_payout(shares, Scenario::Success).is_err());
    }

    #[test]
    fn invest_guards() {
        let mut pool = pool();
        assert!(pool.check_can_invest(1, NOW).is_ok());
        assert_eq!(
            pool.check_can_invest(0, NOW),
            Err(ProgramError::from(UmayError::InsufficientFunds))
        );
        assert_eq!(
            pool.check_can_invest(1, pool.deadline),
            Err(ProgramError::from(UmayError::DeadlinePassed))
        );

        pool.state = PoolStateKind::Failed as u8;
        assert_eq!(
            pool.check_can_invest(1, NOW),
            Err(ProgramError::from(UmayError::NotFunding))
        );
    }

    #[test]
    fn record_investment_is_checked() {
        let mut pool = pool();
        pool.record_investment(400_000).unwrap();
        pool.record_investment(600_000).unwrap();
        assert_eq!(pool.total_invested, 1_000_000);

        assert_eq!(
            pool.record_investment(u64::MAX),
            Err(ProgramError::from(UmayError::MathOverflow))
        );
        assert_eq!(pool.total_invested, 1_000_000);
    }

    #[test]
    fn finalize_early_once_target_met() {
        let mut pool = pool();
        pool.record_investment(pool.target_amount).unwrap();

        assert_eq!(pool.finalize(NOW).unwrap(), PoolStateKind::Succeeded);
        assert!(pool.finalized);
        assert_eq!(pool.kind(), PoolStateKind::Succeeded);
    }

    #[test]
    fn finalize_before_deadline_without_target_is_rejected() {
        let mut pool = pool();
        pool.record_investment(pool.target_amount - 1).unwrap();

        assert_eq!(
            pool.finalize(NOW),
            Err(ProgramError::from(UmayError::FundingOngoing))
        );
        assert!(!pool.finalized);
        assert_eq!(pool.kind(), PoolStateKind::Funding);
    }

    #[test]
    fn finalize_after_deadline_without_target_fails_pool() {
        let mut pool = pool();
        pool.record_investment(10).unwrap();

        assert_eq!(pool.finalize(pool.deadline).unwrap(), PoolStateKind::Failed);
        assert_eq!(
            pool.finalize(pool.deadline + 1),
            Err(ProgramError::from(UmayError::AlreadyFinalized))
        );
    }

    #[test]
    fn release_only_from_succeeded() {
        let mut pool = pool();
        assert_eq!(pool.mark_released(), Err(ProgramError::from(UmayError::InvalidState)));

        pool.record_investment(pool.target_amount).unwrap();
        pool.finalize(NOW).unwrap();
        assert_eq!(pool.check_refundable(), Err(ProgramError::from(UmayError::InvalidState)));

        pool.mark_released().unwrap();
        assert_eq!(pool.kind(), PoolStateKind::Released);
        assert_eq!(pool.mark_released(), Err(ProgramError::from(UmayError::InvalidState)));
    }

    #[test]
    fn refund_only_from_failed() {
        let mut pool = pool();
        assert_eq!(pool.check_refundable(), Err(ProgramError::from(UmayError::InvalidState)));

        pool.finalize(pool.deadline + 1).unwrap();
        assert!(pool.check_refundable().is_ok());
        assert_eq!(pool.check_releasable(), Err(ProgramError::from(UmayError::InvalidState)));
    }

    #[test]
    fn pda_seeds_follow_pool_index() {
        let program_id = crate::id();
        let factory = Pubkey::new_unique();
        let (first, bump) = Pool::get_pda(&factory, 0, &program_id);
        let (second, _) = Pool::get_pda(&factory, 1, &program_id);
        assert_ne!(first, second);

        let index = 0u64.to_le_bytes();
        let seeds = Pool::get_pool_signer_seeds(&factory, &index, &bump);
        assert_eq!(Pubkey::create_program_address(&seeds, &program_id).unwrap(), first);

        let (share_mint, _) = Pool::get_share_mint_pda(&first, &program_id);
        let (usdt_vault, _) = Pool::get_usdt_vault_pda(&first, &program_id);
        assert_ne!(share_mint, usdt_vault);
    }
}
