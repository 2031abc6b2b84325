//! Ecosystem Constants for the Liquidity Pool
//!
//! Centralizes the pallet identifier used to derive pool accounts and the economic
//! parameters shared by the runtime configuration and the test mocks.

/// Balance type alias for consistency across ecosystem
pub type Balance = u128;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// Every pool account is a sub-account of this id, keyed by the pooled token's asset id.
pub mod pallet_ids {
  /// Liquidity pool pallet ID
  pub const LIQUIDITY_POOL_PALLET_ID: &[u8; 8] = b"py/lqpol";
}

/// Economic parameters of the pool: curve fees, anti-bot throttle, timelock and vesting.
pub mod params {
  use super::Balance;

  /// Basis-point denominator (100%).
  pub const BPS_DENOMINATOR: u32 = 10_000;

  /// Fixed-point scale of quoted spot prices (18 decimal digits).
  pub const PRICE_SCALE: Balance = 1_000_000_000_000_000_000;

  /// Trade fee charged on the output side of every trade (0.5%).
  pub const DEFAULT_TRADE_FEE_BPS: u32 = 50;

  /// Upper bound governance may set the trade fee to (10%).
  pub const MAX_TRADE_FEE_BPS: u32 = 1_000;

  /// Maximum trades a single account may place in one block.
  pub const MAX_TX_PER_BLOCK: u32 = 3;

  /// Delay between pool creation and selling being enabled (2 hours).
  pub const SELLING_DELAY_SECS: u64 = 2 * 60 * 60;

  /// Length of one vesting unit (1 day).
  pub const VESTING_UNIT_SECS: u64 = 24 * 60 * 60;

  /// Number of vesting units until an early allotment is fully released.
  pub const VESTING_UNITS: u32 = 7;

  /// Share of the early allotment unlocked per vesting unit (14.29%).
  pub const DAILY_UNLOCK_BPS: u32 = 1_429;
}
