pub mod events;
pub mod factory;
pub mod pool;

pub use events::*;
pub use factory::*;
pub use pool::*;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;

/// Leading tag of every account owned by the program.
#[derive(BorshSerialize, BorshDeserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Uninitialized,
    Factory,
    Pool,
}
