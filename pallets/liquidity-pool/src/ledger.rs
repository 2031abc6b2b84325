//! Reserve ledger: constant-product pricing and fee extraction.
//!
//! All arithmetic multiplies before it divides and runs through `U256` intermediates,
//! so a product of two reserves can never wrap. A result that does not fit back into a
//! `Balance` is reported as [`CurveError::Overflow`].

use codec::{Decode, Encode, MaxEncodedLen};
use frame::deps::sp_core::U256;
use primitives::ecosystem::params::{BPS_DENOMINATOR, PRICE_SCALE};
use scale_info::TypeInfo;

use crate::types::{Balance, TradeOutcome};

/// Failure modes of the pure pool math.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CurveError {
  /// A trade amount of zero was supplied.
  ZeroAmount,
  /// One of the reserves is empty.
  NoLiquidity,
  /// The curve output truncates to zero or would drain the opposite reserve.
  Degenerate,
  /// An intermediate or final value does not fit the balance type.
  Overflow,
}

/// `a * b / c` with a 256-bit intermediate product.
pub fn mul_div(a: Balance, b: Balance, c: Balance) -> Result<Balance, CurveError> {
  if c == 0 {
    return Err(CurveError::NoLiquidity);
  }
  let result = U256::from(a)
    .saturating_mul(U256::from(b))
    .checked_div(U256::from(c))
    .ok_or(CurveError::NoLiquidity)?;
  if result > U256::from(u128::MAX) {
    return Err(CurveError::Overflow);
  }
  Ok(result.as_u128())
}

/// Both sides of a pool's liquidity.
#[derive(Clone, Copy, Debug, Default, Decode, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo)]
pub struct Reserves {
  /// Native currency held by the pool.
  pub currency: Balance,
  /// Token units held by the pool.
  pub token: Balance,
}

impl Reserves {
  pub fn new(currency: Balance, token: Balance) -> Self {
    Self { currency, token }
  }

  pub fn has_liquidity(&self) -> bool {
    self.currency > 0 && self.token > 0
  }

  #[cfg(test)]
  pub fn is_empty(&self) -> bool {
    self.currency == 0 && self.token == 0
  }

  /// Gross tokens the curve releases for `currency_in`.
  ///
  /// Yields 0 on an empty pool so the caller can report missing liquidity itself.
  pub fn quote_buy(&self, currency_in: Balance) -> Result<Balance, CurveError> {
    if currency_in == 0 {
      return Err(CurveError::ZeroAmount);
    }
    if !self.has_liquidity() {
      return Ok(0);
    }
    let denominator = self
      .currency
      .checked_add(currency_in)
      .ok_or(CurveError::Overflow)?;
    mul_div(self.token, currency_in, denominator)
  }

  /// Gross currency the curve releases for `token_in`.
  pub fn quote_sell(&self, token_in: Balance) -> Result<Balance, CurveError> {
    if token_in == 0 {
      return Err(CurveError::ZeroAmount);
    }
    if !self.has_liquidity() {
      return Ok(0);
    }
    let denominator = self
      .token
      .checked_add(token_in)
      .ok_or(CurveError::Overflow)?;
    mul_div(self.currency, token_in, denominator)
  }

  /// Books a purchase of tokens for `currency_in`.
  ///
  /// The fee is withheld from the buyer's tokens and stays in the token reserve.
  pub fn apply_buy(
    &mut self,
    currency_in: Balance,
    fee_bps: u32,
  ) -> Result<TradeOutcome, CurveError> {
    if !self.has_liquidity() {
      return Err(CurveError::NoLiquidity);
    }
    let gross = self.quote_buy(currency_in)?;
    if gross == 0 || gross >= self.token {
      return Err(CurveError::Degenerate);
    }
    let outcome = split_fee(gross, fee_bps)?;
    self.currency = self
      .currency
      .checked_add(currency_in)
      .ok_or(CurveError::Overflow)?;
    self.token = self.token.saturating_sub(outcome.amount_out);
    Ok(outcome)
  }

  /// Books a sale of `token_in` for currency.
  ///
  /// The fee is withheld from the seller's currency and stays in the currency reserve.
  pub fn apply_sell(&mut self, token_in: Balance, fee_bps: u32) -> Result<TradeOutcome, CurveError> {
    if !self.has_liquidity() {
      return Err(CurveError::NoLiquidity);
    }
    let gross = self.quote_sell(token_in)?;
    if gross == 0 || gross >= self.currency {
      return Err(CurveError::Degenerate);
    }
    let outcome = split_fee(gross, fee_bps)?;
    self.token = self
      .token
      .checked_add(token_in)
      .ok_or(CurveError::Overflow)?;
    self.currency = self.currency.saturating_sub(outcome.amount_out);
    Ok(outcome)
  }

  /// Currency per token, scaled by [`PRICE_SCALE`].
  pub fn spot_price(&self) -> Result<Balance, CurveError> {
    if self.token == 0 {
      return Err(CurveError::NoLiquidity);
    }
    mul_div(self.currency, PRICE_SCALE, self.token)
  }

  /// Like [`Self::spot_price`], but an unrepresentable price is clamped to `Balance::MAX`.
  pub fn saturating_spot_price(&self) -> Result<Balance, CurveError> {
    match self.spot_price() {
      Err(CurveError::Overflow) => Ok(Balance::MAX),
      other => other,
    }
  }

  /// Empties both reserves, returning what they held.
  pub fn drain(&mut self) -> Reserves {
    core::mem::take(self)
  }
}

fn split_fee(gross: Balance, fee_bps: u32) -> Result<TradeOutcome, CurveError> {
  let fee = mul_div(gross, fee_bps.into(), BPS_DENOMINATOR.into())?;
  Ok(TradeOutcome {
    amount_out: gross.saturating_sub(fee),
    fee,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn seeded() -> Reserves {
    Reserves::new(1_000, 1_000_000)
  }

  #[test]
  fn quote_buy_follows_constant_product() {
    // 1_000_000 * 100 / (1_000 + 100)
    assert_eq!(seeded().quote_buy(100), Ok(90_909));
  }

  #[test]
  fn quote_sell_is_symmetric() {
    // 1_000 * 100_000 / (1_000_000 + 100_000)
    assert_eq!(seeded().quote_sell(100_000), Ok(90));
  }

  #[test]
  fn quotes_on_empty_pool_are_zero() {
    let empty = Reserves::default();
    assert_eq!(empty.quote_buy(100), Ok(0));
    assert_eq!(empty.quote_sell(100), Ok(0));
    assert_eq!(seeded().quote_buy(0), Err(CurveError::ZeroAmount));
  }

  #[test]
  fn buy_output_diminishes_as_currency_reserve_grows() {
    let mut previous = Balance::MAX;
    for currency in [1_000u128, 2_000, 4_000, 8_000, 16_000] {
      let out = Reserves::new(currency, 1_000_000).quote_buy(100).unwrap();
      assert!(out < previous, "{out} should be below {previous}");
      previous = out;
    }
  }

  #[test]
  fn apply_buy_keeps_fee_in_token_reserve() {
    let mut reserves = seeded();
    let outcome = reserves.apply_buy(100, 50).unwrap();
    // gross 90_909, fee 90_909 * 50 / 10_000 = 454
    assert_eq!(outcome.fee, 454);
    assert_eq!(outcome.amount_out, 90_455);
    assert_eq!(reserves, Reserves::new(1_100, 1_000_000 - 90_455));
  }

  #[test]
  fn apply_sell_keeps_fee_in_currency_reserve() {
    let mut reserves = Reserves::new(100_000, 1_000_000);
    let outcome = reserves.apply_sell(100_000, 50).unwrap();
    // gross 100_000 * 100_000 / 1_100_000 = 9_090, fee 45
    assert_eq!(outcome.fee, 45);
    assert_eq!(outcome.amount_out, 9_045);
    assert_eq!(reserves, Reserves::new(100_000 - 9_045, 1_100_000));
  }

  #[test]
  fn trades_never_shrink_the_product() {
    let mut reserves = seeded();
    let mut k = reserves.currency * reserves.token;
    for currency_in in [1u128, 7, 100, 999, 5_000] {
      reserves.apply_buy(currency_in, 50).unwrap();
      let next = reserves.currency * reserves.token;
      assert!(next >= k);
      k = next;
    }
    for token_in in [10_000u128, 123_456, 1_000] {
      reserves.apply_sell(token_in, 50).unwrap();
      let next = reserves.currency * reserves.token;
      assert!(next >= k);
      k = next;
    }
  }

  #[test]
  fn round_trip_loses_value() {
    let mut reserves = seeded();
    let bought = reserves.apply_buy(100, 50).unwrap();
    let sold = reserves.apply_sell(bought.amount_out, 50).unwrap();
    assert!(sold.amount_out < 100);

    let mut fee_free = seeded();
    let bought = fee_free.apply_buy(100, 0).unwrap();
    let sold = fee_free.apply_sell(bought.amount_out, 0).unwrap();
    assert!(sold.amount_out < 100);
  }

  #[test]
  fn dust_trades_are_degenerate() {
    // 1 * 1_000 / 1_000_001 truncates to zero
    let mut reserves = seeded();
    assert_eq!(reserves.apply_sell(1, 50), Err(CurveError::Degenerate));
    assert_eq!(reserves, seeded());
  }

  #[test]
  fn huge_buy_cannot_drain_pool() {
    let mut reserves = Reserves::new(1, 1_000);
    let outcome = reserves.apply_buy(u128::MAX - 1, 0).unwrap();
    assert_eq!(outcome.amount_out, 999);
    assert_eq!(reserves.token, 1);

    let mut tiny = Reserves::new(1, 1);
    assert_eq!(tiny.apply_buy(u128::MAX - 1, 0), Err(CurveError::Degenerate));
  }

  #[test]
  fn trades_on_empty_pool_fail() {
    let mut reserves = Reserves::new(0, 1_000);
    assert_eq!(reserves.apply_buy(10, 50), Err(CurveError::NoLiquidity));
    assert_eq!(reserves.apply_sell(10, 50), Err(CurveError::NoLiquidity));
  }

  #[test]
  fn reserve_overflow_is_rejected() {
    let mut reserves = Reserves::new(u128::MAX - 10, 1_000_000);
    assert_eq!(reserves.apply_buy(100, 50), Err(CurveError::Overflow));
  }

  #[test]
  fn spot_price_uses_eighteen_decimals() {
    assert_eq!(seeded().spot_price(), Ok(1_000_000_000_000_000));
    assert_eq!(
      Reserves::new(5, 0).spot_price(),
      Err(CurveError::NoLiquidity)
    );
  }

  #[test]
  fn saturating_spot_price_clamps_overflow() {
    let lopsided = Reserves::new(u128::MAX, 1);
    assert_eq!(lopsided.spot_price(), Err(CurveError::Overflow));
    assert_eq!(lopsided.saturating_spot_price(), Ok(Balance::MAX));
    assert_eq!(
      seeded().saturating_spot_price(),
      Ok(1_000_000_000_000_000)
    );
    assert_eq!(
      Reserves::new(5, 0).saturating_spot_price(),
      Err(CurveError::NoLiquidity)
    );
  }

  #[test]
  fn drain_empties_reserves() {
    let mut reserves = seeded();
    assert_eq!(reserves.drain(), seeded());
    assert!(reserves.is_empty());
  }
}
