//! Linear vesting of tokens bought before selling opens.
//!
//! The sellable amount is a pure function of `(initial_allotment, start, total_sold, now)`
//! and the pool's [`VestingRules`].

use codec::{Decode, Encode, MaxEncodedLen};
use frame::deps::sp_core::U256;
use primitives::ecosystem::params::BPS_DENOMINATOR;
use scale_info::TypeInfo;

use crate::types::{Balance, Moment};

/// Unlock parameters shared by every schedule of a pool.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VestingRules {
  /// Seconds per vesting unit.
  pub unit: Moment,
  /// Units until the allotment is fully released.
  pub units: u32,
  /// Basis points of the allotment unlocked per unit.
  pub unlock_bps_per_unit: u32,
}

impl VestingRules {
  pub fn period(&self) -> Moment {
    self.unit.saturating_mul(self.units.into())
  }
}

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo)]
pub struct VestingSchedule {
  pub start: Moment,
  pub initial_allotment: Balance,
  pub total_sold: Balance,
}

/// What a schedule currently allows its holder to sell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VestingStatus {
  /// The account bought nothing while selling was locked; no vesting limit applies.
  NoSchedule,
  /// Inside the vesting window; at most `sellable` tokens may be sold.
  Active { sellable: Balance },
  /// The window has elapsed; no vesting limit applies any more.
  Complete { remaining: Balance },
}

impl VestingStatus {
  /// The sellable amount as a plain number: 0 without a schedule.
  pub fn max_sellable(&self) -> Balance {
    match self {
      VestingStatus::NoSchedule => 0,
      VestingStatus::Active { sellable } => *sellable,
      VestingStatus::Complete { remaining } => *remaining,
    }
  }
}

impl VestingSchedule {
  pub fn new(start: Moment, initial_allotment: Balance) -> Self {
    Self {
      start,
      initial_allotment,
      total_sold: 0,
    }
  }

  /// Adds a later purchase to the allotment. The start time is kept.
  pub fn extend(&mut self, amount: Balance) {
    self.initial_allotment = self.initial_allotment.saturating_add(amount);
  }

  pub fn record_sale(&mut self, amount: Balance) {
    self.total_sold = self.total_sold.saturating_add(amount);
  }

  pub fn status(&self, now: Moment, rules: &VestingRules) -> VestingStatus {
    if self.initial_allotment == 0 {
      return VestingStatus::NoSchedule;
    }
    let elapsed = now.saturating_sub(self.start);
    if elapsed >= rules.period() {
      return VestingStatus::Complete {
        remaining: self.initial_allotment.saturating_sub(self.total_sold),
      };
    }
    // Unit zero already unlocks one share.
    let units_elapsed = (elapsed / rules.unit.max(1))
      .saturating_add(1)
      .min(rules.units.into());
    let allowed = self.unlocked(units_elapsed, rules.unlock_bps_per_unit);
    VestingStatus::Active {
      sellable: allowed.saturating_sub(self.total_sold),
    }
  }

  /// `initial_allotment * bps * units / 10_000`, capped at the allotment itself.
  fn unlocked(&self, units: Moment, unlock_bps_per_unit: u32) -> Balance {
    let allowed = U256::from(self.initial_allotment)
      .saturating_mul(U256::from(unlock_bps_per_unit))
      .saturating_mul(U256::from(units))
      / U256::from(BPS_DENOMINATOR);
    if allowed >= U256::from(self.initial_allotment) {
      return self.initial_allotment;
    }
    allowed.as_u128()
  }
}
