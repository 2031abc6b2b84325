//! Storage records and value types shared by the pool components.

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

use crate::{ledger::Reserves, timelock::TimelockGate};

/// Balance type
pub type Balance = u128;

/// Identifier of the pooled token in `pallet-assets`
pub type TokenId = u32;

/// Unix time in whole seconds
pub type Moment = u64;

/// Lifecycle of a pool once created.
///
/// A pool that has never been created has no storage entry at all.
#[derive(Clone, Copy, Debug, Decode, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo)]
pub enum PoolStatus {
  /// Buys and sells are accepted.
  Active,
  /// Trading is suspended by the pool authority.
  Paused,
  /// Reserves were drained by an emergency withdrawal. Terminal.
  Withdrawn,
}

/// Cumulative fees retained by a pool, per side.
#[derive(Clone, Copy, Debug, Default, Decode, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo)]
pub struct FeeTotals {
  pub currency: Balance,
  pub token: Balance,
}

/// Per-token pool record.
#[derive(Clone, Debug, Decode, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo)]
pub struct PoolInfo<AccountId> {
  /// Identity allowed to pause, resume, open selling and withdraw.
  pub authority: AccountId,
  pub reserves: Reserves,
  pub status: PoolStatus,
  pub timelock: TimelockGate,
  pub fees_collected: FeeTotals,
  /// Creation time in seconds.
  pub created_at: Moment,
}

/// Result of booking a trade: what the trader receives and what the pool keeps.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TradeOutcome {
  pub amount_out: Balance,
  pub fee: Balance,
}
