pub mod create_pool;
pub mod deposit_usdt;
pub mod finalize;
pub mod initialize_factory;
pub mod invest;
pub mod redeem_by_scenario;
pub mod refund;
pub mod release_to_company;
pub mod toggle_scenario;

pub use create_pool::*;
pub use deposit_usdt::*;
pub use finalize::*;
pub use initialize_factory::*;
pub use invest::*;
pub use redeem_by_scenario::*;
pub use refund::*;
pub use release_to_company::*;
pub use toggle_scenario::*;
