// SEEDS
pub const FACTORY_SEED: &[u8] = b"factory";
pub const POOL_SEED: &[u8] = b"pool";
pub const SHARE_MINT_SEED: &[u8] = b"share_mint";
pub const USDT_VAULT_SEED: &[u8] = b"usdt_vault";

pub const SHARE_MINT_DECIMALS: u8 = 18;

pub const BPS_DENOMINATOR: u128 = 10_000;

pub const SCENARIO_SUCCESS: u8 = 0;
pub const SCENARIO_FAIL: u8 = 1;
