use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_arithmetic::Permill;

use crate::ecosystem::Balance;

/// How many tokens a pool creator must seed the pool with.
///
/// Deployments have used both a share of the token's supply and a fixed token count,
/// so the choice is explicit runtime configuration rather than a hard-coded rule.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum SeedPolicy {
  /// Seed with a fraction of the token's total supply.
  FractionOfSupply(Permill),
  /// Seed with a fixed number of token units.
  Fixed(Balance),
}

impl SeedPolicy {
  /// Token seed required for a token with `total_supply` units.
  ///
  /// Returns `None` when the policy cannot be satisfied: the seed would be zero or would
  /// exceed the supply.
  pub fn seed_amount(&self, total_supply: Balance) -> Option<Balance> {
    let amount = match self {
      SeedPolicy::FractionOfSupply(fraction) => fraction.mul_floor(total_supply),
      SeedPolicy::Fixed(amount) => *amount,
    };
    if amount == 0 || amount > total_supply {
      return None;
    }
    Some(amount)
  }
}
