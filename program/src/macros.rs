#[macro_export]
macro_rules! validate {
    ($assert:expr, $err:expr) => {{
        if ($assert) {
            Ok::<(), solana_program::program_error::ProgramError>(())
        } else {
            let error = $err;
            solana_program::msg!("Error {} thrown at {}:{}", error, file!(), line!());
            Err(solana_program::program_error::ProgramError::from(error))
        }
    }};

    ($assert:expr, $err:expr, $($arg:tt)+) => {{
        if ($assert) {
            Ok::<(), solana_program::program_error::ProgramError>(())
        } else {
            let error = $err;
            solana_program::msg!("Error {} thrown at {}:{}", error, file!(), line!());
            solana_program::msg!($($arg)*);
            Err(solana_program::program_error::ProgramError::from(error))
        }
    }};
}
