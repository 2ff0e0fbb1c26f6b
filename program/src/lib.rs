use solana_program::declare_id;

pub mod common;
pub mod constants;
pub mod error;
pub mod instruction;
pub mod instructions;
pub mod macros;
pub mod processor;
pub mod state;

#[cfg(test)]
mod test_utils;

pub use processor::process_instruction;

declare_id!("Umay111111111111111111111111111111111111111");

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);
