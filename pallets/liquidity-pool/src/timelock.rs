//! Selling timelock: a one-way latch that opens a fixed delay after pool creation.

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

use crate::types::Moment;

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo)]
pub struct TimelockGate {
  /// Latched once selling has been enabled; never reset.
  pub selling_enabled: bool,
  /// Time at which the gate opens on its own.
  pub enable_at: Moment,
}

/// Observation made by [`TimelockGate::poll`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GateTransition {
  /// Selling is still locked.
  Closed,
  /// This poll latched the gate open. Reported at most once per gate.
  JustOpened,
  /// The gate was already latched.
  Open,
}

impl TimelockGate {
  pub fn arm_at(now: Moment, delay: Moment) -> Self {
    Self {
      selling_enabled: false,
      enable_at: now.saturating_add(delay),
    }
  }

  /// Whether selling would be allowed at `now`, without latching.
  pub fn is_open_at(&self, now: Moment) -> bool {
    self.selling_enabled || now >= self.enable_at
  }

  /// Advances the gate to `now`, latching it open once the delay has passed.
  pub fn poll(&mut self, now: Moment) -> GateTransition {
    if self.selling_enabled {
      return GateTransition::Open;
    }
    if now >= self.enable_at {
      self.selling_enabled = true;
      return GateTransition::JustOpened;
    }
    GateTransition::Closed
  }

  /// Latches the gate open ahead of schedule. Returns `false` if it was already latched.
  pub fn force_open(&mut self) -> bool {
    if self.selling_enabled {
      return false;
    }
    self.selling_enabled = true;
    true
  }
}
