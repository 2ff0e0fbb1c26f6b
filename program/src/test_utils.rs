use solana_program::{
    account_info::AccountInfo,
    clock::Clock,
    entrypoint::ProgramResult,
    instruction::Instruction,
    program_option::COption,
    program_pack::Pack,
    program_stubs::{set_syscall_stubs, SyscallStubs},
    pubkey::Pubkey,
    rent::Rent,
};
use spl_token::state::{Account as TokenAccount, AccountState};
use std::{cell::RefCell, sync::Once};

pub const NOW: i64 = 1_700_000_000;

thread_local! {
    static INVOKED: RefCell<Vec<Instruction>> = RefCell::new(Vec::new());
    static LOGGED: RefCell<Vec<Vec<u8>>> = RefCell::new(Vec::new());
}

/// Fixed clock and default rent. Invocations and data logs are recorded per thread.
struct TestStubs;

impl SyscallStubs for TestStubs {
    fn sol_get_clock_sysvar(&self, var_addr: *mut u8) -> u64 {
        let clock = Clock {
            unix_timestamp: NOW,
            ..Clock::default()
        };
        unsafe {
            *(var_addr as *mut Clock) = clock;
        }
        solana_program::entrypoint::SUCCESS
    }

    fn sol_get_rent_sysvar(&self, var_addr: *mut u8) -> u64 {
        unsafe {
            *(var_addr as *mut Rent) = Rent::default();
        }
        solana_program::entrypoint::SUCCESS
    }

    fn sol_invoke_signed(
        &self,
        instruction: &Instruction,
        _account_infos: &[AccountInfo],
        _signers_seeds: &[&[&[u8]]],
    ) -> ProgramResult {
        INVOKED.with(|invoked| invoked.borrow_mut().push(instruction.clone()));
        Ok(())
    }

    fn sol_log_data(&self, fields: &[&[u8]]) {
        LOGGED.with(|logged| logged.borrow_mut().extend(fields.iter().map(|f| f.to_vec())));
    }
}

pub fn install_stubs() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        set_syscall_stubs(Box::new(TestStubs));
    });
}

/// Drains the instructions invoked on this thread.
pub fn take_invoked() -> Vec<Instruction> {
    INVOKED.with(|invoked| invoked.take())
}

/// Drains the program data logged on this thread.
pub fn take_logged_data() -> Vec<Vec<u8>> {
    LOGGED.with(|logged| logged.take())
}

pub struct TestAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl TestAccount {
    pub fn new(key: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
        Self {
            key,
            owner,
            lamports: 1_000_000,
            data,
            is_signer: false,
            is_writable: true,
        }
    }

    pub fn signer(key: Pubkey) -> Self {
        Self {
            is_signer: true,
            ..Self::new(key, Pubkey::default(), vec![])
        }
    }

    pub fn program(key: Pubkey) -> Self {
        Self {
            is_writable: false,
            ..Self::new(key, Pubkey::default(), vec![])
        }
    }

    pub fn token_account(key: Pubkey, mint: Pubkey, owner: Pubkey, amount: u64) -> Self {
        let mut data = vec![0u8; TokenAccount::LEN];
        TokenAccount::pack(
            TokenAccount {
                mint,
                owner,
                amount,
                delegate: COption::None,
                state: AccountState::Initialized,
                is_native: COption::None,
                delegated_amount: 0,
                close_authority: COption::None,
            },
            &mut data,
        )
        .unwrap();
        Self::new(key, spl_token::id(), data)
    }

    pub fn info(&mut self) -> AccountInfo {
        AccountInfo::new(
            &self.key,
            self.is_signer,
            self.is_writable,
            &mut self.lamports,
            &mut self.data,
            &self.owner,
            false,
            0,
        )
    }
}

pub fn account_infos(accounts: &mut [TestAccount]) -> Vec<AccountInfo> {
    accounts.iter_mut().map(TestAccount::info).collect()
}
