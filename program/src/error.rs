use solana_program::program_error::ProgramError;
use thiserror::Error;

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum UmayError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Deadline passed")]
    DeadlinePassed,

    #[error("Not funding")]
    NotFunding,

    #[error("Invalid state")]
    InvalidState,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Invalid scenario")]
    InvalidScenario,

    #[error("PDA derived does not equal PDA passed in")]
    InvalidPda,

    #[error("Account data is invalid")]
    InvalidAccountData,

    #[error("Instruction data is invalid")]
    InvalidInstruction,

    #[error("Account is already initialized")]
    AlreadyInitialized,

    #[error("Input data for pool creation is invalid")]
    InvalidPoolParams,

    #[error("Math overflow")]
    MathOverflow,

    #[error("Funding is still ongoing")]
    FundingOngoing,

    #[error("Pool already finalized")]
    AlreadyFinalized,
}

impl From<UmayError> for ProgramError {
    fn from(e: UmayError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ProgramError::from(UmayError::Unauthorized), ProgramError::Custom(0));
        assert_eq!(ProgramError::from(UmayError::InvalidScenario), ProgramError::Custom(5));
        assert_eq!(ProgramError::from(UmayError::AlreadyFinalized), ProgramError::Custom(13));
    }
}
