//! Liquidity Pool Pallet
//!
//! Single-asset constant-product pool pricing a `pallet-assets` token against the native
//! currency. Trading is guarded by a per-block anti-bot throttle, a selling timelock that
//! opens a fixed delay after the pool is created, and linear vesting of tokens bought
//! while selling was still locked. Each pool has an authority that can pause trading or
//! drain the pool in an emergency.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod ledger;
pub mod throttle;
pub mod timelock;
pub mod types;
pub mod vesting;

pub use ledger::{CurveError, Reserves};
pub use throttle::TradeCounter;
pub use timelock::{GateTransition, TimelockGate};
pub use types::{Balance, FeeTotals, Moment, PoolInfo, PoolStatus, TokenId, TradeOutcome};
pub use vesting::{VestingRules, VestingSchedule, VestingStatus};

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

/// Log target of this pallet
pub const LOG_TARGET: &str = "runtime::liquidity-pool";

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  /// Make sure `token` exists and mint `supply` units of it to `owner`.
  fn create_token(
    token: TokenId,
    owner: &AccountId,
    supply: Balance,
  ) -> frame::deps::sp_runtime::DispatchResult;
}

#[frame::pallet]
pub mod pallet {
  use super::*;
  use frame::deps::{
    frame_support::{
      PalletId,
      traits::{
        UnixTime,
        fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
        fungibles::{Inspect, Mutate},
        tokens::{Fortitude, Preservation},
      },
    },
    sp_runtime::traits::AccountIdConversion,
  };
  use frame::prelude::*;
  use primitives::{SeedPolicy, ecosystem::params::BPS_DENOMINATOR};

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Assets pallet holding the pooled tokens
    type Assets: Inspect<Self::AccountId, AssetId = TokenId, Balance = Balance>
      + Mutate<Self::AccountId, AssetId = TokenId, Balance = Balance>;

    /// Native currency the tokens are priced in
    type Currency: NativeInspect<Self::AccountId, Balance = Balance>
      + NativeMutate<Self::AccountId, Balance = Balance>;

    /// Wall-clock source for the timelock and vesting schedules
    type TimeProvider: UnixTime;

    /// Origin that can change the global trade fee
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Pallet ID the pool accounts are derived from
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Maximum trades per account, pool and block
    #[pallet::constant]
    type MaxTxPerBlock: Get<u32>;

    /// Seconds between pool creation and selling being enabled
    #[pallet::constant]
    type SellingDelay: Get<Moment>;

    /// Seconds per vesting unit
    #[pallet::constant]
    type VestingUnit: Get<Moment>;

    /// Vesting units until an early allotment is fully released
    #[pallet::constant]
    type VestingUnits: Get<u32>;

    /// Basis points of an early allotment unlocked per vesting unit
    #[pallet::constant]
    type DailyUnlockBps: Get<u32>;

    /// Trade fee in basis points until governance sets another one
    #[pallet::constant]
    type DefaultTradeFeeBps: Get<u32>;

    /// Highest trade fee governance may set
    #[pallet::constant]
    type MaxTradeFeeBps: Get<u32>;

    /// How many tokens a creator must seed a new pool with
    #[pallet::constant]
    type PoolSeedPolicy: Get<SeedPolicy>;

    /// Weight information
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  /// Pools by token id. Doubles as the registry of which tokens have a pool.
  #[pallet::storage]
  pub type Pools<T: Config> =
    StorageMap<_, Blake2_128Concat, TokenId, PoolInfo<T::AccountId>, OptionQuery>;

  /// Vesting schedules of accounts that bought while selling was locked
  #[pallet::storage]
  pub type VestingSchedules<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    TokenId,
    Blake2_128Concat,
    T::AccountId,
    VestingSchedule,
    OptionQuery,
  >;

  /// Trades placed by an account in the most recent block it traded in
  #[pallet::storage]
  pub type TradeCounters<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    TokenId,
    Blake2_128Concat,
    T::AccountId,
    TradeCounter<BlockNumberFor<T>>,
    OptionQuery,
  >;

  /// Current trade fee in basis points (can be updated by governance)
  #[pallet::storage]
  pub type TradeFeeBps<T: Config> = StorageValue<_, u32, ValueQuery, T::DefaultTradeFeeBps>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A pool was created and seeded
    PoolInitialized {
      token: TokenId,
      authority: T::AccountId,
      seed_tokens: Balance,
      seed_currency: Balance,
      initial_price: Balance,
      selling_enable_at: Moment,
    },
    /// Tokens were bought from a pool
    Bought {
      token: TokenId,
      who: T::AccountId,
      currency_in: Balance,
      token_out: Balance,
      fee: Balance,
    },
    /// Tokens were sold to a pool
    Sold {
      token: TokenId,
      who: T::AccountId,
      token_in: Balance,
      currency_out: Balance,
      fee: Balance,
    },
    /// Selling was enabled for a pool
    SellingEnabled { token: TokenId },
    /// Trading was paused or resumed
    TradingPaused { token: TokenId, paused: bool },
    /// The authority drained a pool
    EmergencyWithdrawn {
      token: TokenId,
      to: T::AccountId,
      currency: Balance,
      tokens: Balance,
    },
    /// An early buyer received a vesting schedule
    VestingInitialized {
      token: TokenId,
      who: T::AccountId,
      allotment: Balance,
      start: Moment,
    },
    /// An early buyer added to an existing vesting schedule
    VestingExtended {
      token: TokenId,
      who: T::AccountId,
      added: Balance,
      allotment: Balance,
    },
    /// Pool authority handed over
    AuthorityTransferred {
      token: TokenId,
      old: T::AccountId,
      new: T::AccountId,
    },
    /// Trade fee updated
    TradeFeeUpdated { old_fee_bps: u32, new_fee_bps: u32 },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// A pool already exists for this token
    AlreadyInitialized,
    /// No pool exists for this token
    NotInitialized,
    /// Zero amount or unusable token supply
    InvalidInput,
    /// The pool has no liquidity on one side
    InsufficientLiquidity,
    /// Output truncates to zero or would exhaust a reserve
    DegenerateTrade,
    /// Too many trades by this account in the current block
    RateLimited,
    /// Selling is still timelocked
    SellingLocked,
    /// Sale exceeds the currently vested amount
    VestingExceeded,
    /// Moving tokens or currency failed
    TransferFailed,
    /// Caller is not the pool authority
    Unauthorized,
    /// The pool has been drained and no longer trades
    AlreadyWithdrawn,
    /// Trading is paused
    PoolPaused,
    /// Trading is not paused
    PoolNotPaused,
    /// Selling is already enabled
    SellingAlreadyEnabled,
    /// Output is below the caller's minimum
    SlippageExceeded,
    /// Arithmetic overflow occurred
    ArithmeticOverflow,
    /// Fee is above the configured maximum
    FeeTooHigh,
  }

  #[pallet::hooks]
  impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
    fn integrity_test() {
      assert!(
        T::MaxTradeFeeBps::get() < BPS_DENOMINATOR,
        "MaxTradeFeeBps must be below 100%"
      );
      assert!(
        T::DefaultTradeFeeBps::get() <= T::MaxTradeFeeBps::get(),
        "DefaultTradeFeeBps must not exceed MaxTradeFeeBps"
      );
      assert!(T::VestingUnit::get() > 0, "VestingUnit must be non-zero");
      assert!(T::VestingUnits::get() > 0, "VestingUnits must be non-zero");
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Create the pool for `token`, seeded by the caller.
    ///
    /// The caller pays `seed_currency` and the token seed required by `PoolSeedPolicy`,
    /// and becomes the pool authority. Selling opens `SellingDelay` seconds from now.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::create_pool())]
    pub fn create_pool(
      origin: OriginFor<T>,
      token: TokenId,
      seed_currency: Balance,
    ) -> DispatchResult {
      let creator = ensure_signed(origin)?;
      Self::do_create_pool(creator, token, seed_currency)
    }

    /// Buy tokens with `currency_in`, receiving at least `min_tokens_out`.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::buy())]
    pub fn buy(
      origin: OriginFor<T>,
      token: TokenId,
      currency_in: Balance,
      min_tokens_out: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_buy(who, token, currency_in, min_tokens_out)
    }

    /// Sell `token_in` tokens, receiving at least `min_currency_out`.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::sell())]
    pub fn sell(
      origin: OriginFor<T>,
      token: TokenId,
      token_in: Balance,
      min_currency_out: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_sell(who, token, token_in, min_currency_out)
    }

    /// Suspend trading (pool authority only)
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::pause())]
    pub fn pause(origin: OriginFor<T>, token: TokenId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::set_paused(&who, token, true)
    }

    /// Resume trading (pool authority only)
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::resume())]
    pub fn resume(origin: OriginFor<T>, token: TokenId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::set_paused(&who, token, false)
    }

    /// Drain both sides of the pool to the authority and stop trading for good.
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::emergency_withdraw())]
    pub fn emergency_withdraw(origin: OriginFor<T>, token: TokenId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let mut pool = Pools::<T>::get(token).ok_or(Error::<T>::NotInitialized)?;
      Self::ensure_authority(&pool, &who)?;
      ensure!(
        pool.status != PoolStatus::Withdrawn,
        Error::<T>::AlreadyWithdrawn
      );

      // Everything the pool account holds goes, including anything sent to it directly.
      let pool_account = Self::pool_account(token);
      let currency =
        T::Currency::reducible_balance(&pool_account, Preservation::Expendable, Fortitude::Polite);
      let tokens = T::Assets::reducible_balance(
        token,
        &pool_account,
        Preservation::Expendable,
        Fortitude::Polite,
      );
      if currency > 0 {
        Self::transfer_currency(&pool_account, &who, currency)?;
      }
      if tokens > 0 {
        Self::transfer_token(token, &pool_account, &who, tokens)?;
      }

      pool.reserves.drain();
      pool.status = PoolStatus::Withdrawn;
      Pools::<T>::insert(token, pool);

      log::info!(
        target: LOG_TARGET,
        "pool {token} drained by authority: {currency} currency, {tokens} tokens"
      );
      Self::deposit_event(Event::EmergencyWithdrawn {
        token,
        to: who,
        currency,
        tokens,
      });
      Ok(())
    }

    /// Open selling before the timelock expires (pool authority only)
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::enable_selling())]
    pub fn enable_selling(origin: OriginFor<T>, token: TokenId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Pools::<T>::try_mutate(token, |maybe_pool| -> DispatchResult {
        let pool = maybe_pool.as_mut().ok_or(Error::<T>::NotInitialized)?;
        Self::ensure_authority(pool, &who)?;
        ensure!(
          pool.status != PoolStatus::Withdrawn,
          Error::<T>::AlreadyWithdrawn
        );
        ensure!(
          pool.timelock.force_open(),
          Error::<T>::SellingAlreadyEnabled
        );
        Ok(())
      })?;
      log::info!(target: LOG_TARGET, "selling enabled early for pool {token}");
      Self::deposit_event(Event::SellingEnabled { token });
      Ok(())
    }

    /// Hand the pool authority to another account (pool authority only)
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::transfer_authority())]
    pub fn transfer_authority(
      origin: OriginFor<T>,
      token: TokenId,
      new_authority: T::AccountId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Pools::<T>::try_mutate(token, |maybe_pool| -> DispatchResult {
        let pool = maybe_pool.as_mut().ok_or(Error::<T>::NotInitialized)?;
        Self::ensure_authority(pool, &who)?;
        pool.authority = new_authority.clone();
        Ok(())
      })?;
      Self::deposit_event(Event::AuthorityTransferred {
        token,
        old: who,
        new: new_authority,
      });
      Ok(())
    }

    /// Update the trade fee (governance only)
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::set_trade_fee())]
    pub fn set_trade_fee(origin: OriginFor<T>, fee_bps: u32) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(fee_bps <= T::MaxTradeFeeBps::get(), Error::<T>::FeeTooHigh);
      let old_fee_bps = TradeFeeBps::<T>::get();
      TradeFeeBps::<T>::put(fee_bps);
      Self::deposit_event(Event::TradeFeeUpdated {
        old_fee_bps,
        new_fee_bps: fee_bps,
      });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Account holding the reserves of the pool for `token`
    pub fn pool_account(token: TokenId) -> T::AccountId {
      T::PalletId::get().into_sub_account_truncating(token)
    }

    /// Pool registered for `token`, if any
    pub fn pool_for(token: TokenId) -> Option<PoolInfo<T::AccountId>> {
      Pools::<T>::get(token)
    }

    pub fn trade_fee_bps() -> u32 {
      TradeFeeBps::<T>::get()
    }

    pub fn vesting_rules() -> VestingRules {
      VestingRules {
        unit: T::VestingUnit::get(),
        units: T::VestingUnits::get(),
        unlock_bps_per_unit: T::DailyUnlockBps::get(),
      }
    }

    /// Current time in whole seconds
    pub fn now() -> Moment {
      T::TimeProvider::now().as_secs()
    }

    /// Spot price in currency per token, scaled by `PRICE_SCALE`
    pub fn spot_price(token: TokenId) -> Result<Balance, DispatchError> {
      let pool = Pools::<T>::get(token).ok_or(Error::<T>::NotInitialized)?;
      pool
        .reserves
        .spot_price()
        .map_err(|e| Error::<T>::from(e).into())
    }

    /// Whether a sale would pass the timelock right now. Does not latch the gate.
    pub fn selling_open(token: TokenId) -> bool {
      Pools::<T>::get(token).is_some_and(|pool| pool.timelock.is_open_at(Self::now()))
    }

    /// What a buy of `currency_in` would pay out at the current fee
    pub fn quote_buy(token: TokenId, currency_in: Balance) -> Result<TradeOutcome, DispatchError> {
      let mut reserves = Self::liquid_reserves(token)?;
      reserves
        .apply_buy(currency_in, TradeFeeBps::<T>::get())
        .map_err(|e| Error::<T>::from(e).into())
    }

    /// What a sale of `token_in` would pay out at the current fee
    pub fn quote_sell(token: TokenId, token_in: Balance) -> Result<TradeOutcome, DispatchError> {
      let mut reserves = Self::liquid_reserves(token)?;
      reserves
        .apply_sell(token_in, TradeFeeBps::<T>::get())
        .map_err(|e| Error::<T>::from(e).into())
    }

    pub fn vesting_status(token: TokenId, who: &T::AccountId) -> VestingStatus {
      Self::schedule_status(VestingSchedules::<T>::get(token, who).as_ref(), Self::now())
    }

    /// Tokens `who` may sell under its vesting schedule right now; 0 without a schedule.
    pub fn max_sellable(token: TokenId, who: &T::AccountId) -> Balance {
      Self::vesting_status(token, who).max_sellable()
    }

    fn schedule_status(schedule: Option<&VestingSchedule>, now: Moment) -> VestingStatus {
      schedule
        .map(|schedule| schedule.status(now, &Self::vesting_rules()))
        .unwrap_or(VestingStatus::NoSchedule)
    }

    fn liquid_reserves(token: TokenId) -> Result<Reserves, DispatchError> {
      let pool = Pools::<T>::get(token).ok_or(Error::<T>::NotInitialized)?;
      ensure!(
        pool.reserves.has_liquidity(),
        Error::<T>::InsufficientLiquidity
      );
      Ok(pool.reserves)
    }

    fn do_create_pool(
      creator: T::AccountId,
      token: TokenId,
      seed_currency: Balance,
    ) -> DispatchResult {
      ensure!(seed_currency > 0, Error::<T>::InvalidInput);
      ensure!(
        !Pools::<T>::contains_key(token),
        Error::<T>::AlreadyInitialized
      );
      let supply = T::Assets::total_issuance(token);
      let seed_tokens = T::PoolSeedPolicy::get()
        .seed_amount(supply)
        .ok_or(Error::<T>::InvalidInput)?;

      let pool_account = Self::pool_account(token);
      // Pool account survives zero native balance via provider reference
      frame_system::Pallet::<T>::inc_providers(&pool_account);
      Self::transfer_token(token, &creator, &pool_account, seed_tokens)?;
      Self::transfer_currency(&creator, &pool_account, seed_currency)?;

      let now = Self::now();
      let reserves = Reserves::new(seed_currency, seed_tokens);
      let initial_price = reserves
        .saturating_spot_price()
        .map_err(Error::<T>::from)?;
      let timelock = TimelockGate::arm_at(now, T::SellingDelay::get());
      Pools::<T>::insert(
        token,
        PoolInfo {
          authority: creator.clone(),
          reserves,
          status: PoolStatus::Active,
          timelock,
          fees_collected: FeeTotals::default(),
          created_at: now,
        },
      );

      log::info!(
        target: LOG_TARGET,
        "pool {token} created with {seed_tokens} tokens and {seed_currency} currency"
      );
      Self::deposit_event(Event::PoolInitialized {
        token,
        authority: creator,
        seed_tokens,
        seed_currency,
        initial_price,
        selling_enable_at: timelock.enable_at,
      });
      Ok(())
    }

    fn do_buy(
      who: T::AccountId,
      token: TokenId,
      currency_in: Balance,
      min_tokens_out: Balance,
    ) -> DispatchResult {
      ensure!(currency_in > 0, Error::<T>::InvalidInput);
      let mut pool = Self::tradable_pool(token)?;
      let now = Self::now();
      let vesting_eligible = Self::poll_timelock(token, &mut pool, now) == GateTransition::Closed;
      Self::admit_trade(token, &who)?;

      let outcome = pool
        .reserves
        .apply_buy(currency_in, TradeFeeBps::<T>::get())
        .map_err(Error::<T>::from)?;
      Self::ensure_reserves_above_minimum(token, &pool.reserves)?;
      ensure!(
        outcome.amount_out >= min_tokens_out,
        Error::<T>::SlippageExceeded
      );
      pool.fees_collected.token = pool.fees_collected.token.saturating_add(outcome.fee);

      let pool_account = Self::pool_account(token);
      Self::transfer_currency(&who, &pool_account, currency_in)?;
      Self::transfer_token(token, &pool_account, &who, outcome.amount_out)?;

      if vesting_eligible {
        Self::record_vested_buy(token, &who, outcome.amount_out, now);
      }
      Pools::<T>::insert(token, pool);

      log::debug!(
        target: LOG_TARGET,
        "buy on pool {token}: {currency_in} currency -> {} tokens (fee {})",
        outcome.amount_out,
        outcome.fee
      );
      Self::deposit_event(Event::Bought {
        token,
        who,
        currency_in,
        token_out: outcome.amount_out,
        fee: outcome.fee,
      });
      Ok(())
    }

    fn do_sell(
      who: T::AccountId,
      token: TokenId,
      token_in: Balance,
      min_currency_out: Balance,
    ) -> DispatchResult {
      ensure!(token_in > 0, Error::<T>::InvalidInput);
      let mut pool = Self::tradable_pool(token)?;
      let now = Self::now();
      ensure!(
        Self::poll_timelock(token, &mut pool, now) != GateTransition::Closed,
        Error::<T>::SellingLocked
      );
      Self::admit_trade(token, &who)?;

      // Only sales inside the vesting window count against the allotment
      let vesting = match VestingSchedules::<T>::get(token, &who) {
        Some(schedule) => match schedule.status(now, &Self::vesting_rules()) {
          VestingStatus::Active { sellable } => {
            ensure!(token_in <= sellable, Error::<T>::VestingExceeded);
            Some(schedule)
          }
          VestingStatus::NoSchedule | VestingStatus::Complete { .. } => None,
        },
        None => None,
      };

      let outcome = pool
        .reserves
        .apply_sell(token_in, TradeFeeBps::<T>::get())
        .map_err(Error::<T>::from)?;
      Self::ensure_reserves_above_minimum(token, &pool.reserves)?;
      ensure!(
        outcome.amount_out >= min_currency_out,
        Error::<T>::SlippageExceeded
      );
      pool.fees_collected.currency = pool.fees_collected.currency.saturating_add(outcome.fee);

      let pool_account = Self::pool_account(token);
      Self::transfer_token(token, &who, &pool_account, token_in)?;
      Self::transfer_currency(&pool_account, &who, outcome.amount_out)?;

      if let Some(mut schedule) = vesting {
        schedule.record_sale(token_in);
        VestingSchedules::<T>::insert(token, &who, schedule);
      }
      Pools::<T>::insert(token, pool);

      log::debug!(
        target: LOG_TARGET,
        "sell on pool {token}: {token_in} tokens -> {} currency (fee {})",
        outcome.amount_out,
        outcome.fee
      );
      Self::deposit_event(Event::Sold {
        token,
        who,
        token_in,
        currency_out: outcome.amount_out,
        fee: outcome.fee,
      });
      Ok(())
    }

    /// Loads a pool that accepts trades and still holds liquidity on both sides.
    fn tradable_pool(token: TokenId) -> Result<PoolInfo<T::AccountId>, DispatchError> {
      let pool = Pools::<T>::get(token).ok_or(Error::<T>::NotInitialized)?;
      match pool.status {
        PoolStatus::Active => {}
        PoolStatus::Paused => return Err(Error::<T>::PoolPaused.into()),
        PoolStatus::Withdrawn => return Err(Error::<T>::AlreadyWithdrawn.into()),
      }
      ensure!(
        pool.reserves.has_liquidity(),
        Error::<T>::InsufficientLiquidity
      );
      Ok(pool)
    }

    /// Rejects a trade whose remaining reserve the pool account could not keep.
    ///
    /// Below the existential minimum the payout would sweep or burn the leftover and the
    /// recorded reserve would no longer match the account.
    fn ensure_reserves_above_minimum(token: TokenId, reserves: &Reserves) -> DispatchResult {
      ensure!(
        reserves.token >= T::Assets::minimum_balance(token)
          && reserves.currency >= T::Currency::minimum_balance(),
        Error::<T>::DegenerateTrade
      );
      Ok(())
    }

    /// Advances the pool's timelock, announcing the moment it latches open.
    fn poll_timelock(
      token: TokenId,
      pool: &mut PoolInfo<T::AccountId>,
      now: Moment,
    ) -> GateTransition {
      let transition = pool.timelock.poll(now);
      if transition == GateTransition::JustOpened {
        log::info!(target: LOG_TARGET, "selling timelock of pool {token} opened");
        Self::deposit_event(Event::SellingEnabled { token });
      }
      transition
    }

    fn admit_trade(token: TokenId, who: &T::AccountId) -> DispatchResult {
      let block = frame_system::Pallet::<T>::block_number();
      TradeCounters::<T>::try_mutate(token, who, |counter| -> DispatchResult {
        let admitted = TradeCounter::admit(counter.as_ref(), block, T::MaxTxPerBlock::get())
          .ok_or(Error::<T>::RateLimited)?;
        *counter = Some(admitted);
        Ok(())
      })
    }

    fn record_vested_buy(token: TokenId, who: &T::AccountId, amount: Balance, now: Moment) {
      match VestingSchedules::<T>::get(token, who) {
        Some(mut schedule) => {
          schedule.extend(amount);
          VestingSchedules::<T>::insert(token, who, schedule);
          Self::deposit_event(Event::VestingExtended {
            token,
            who: who.clone(),
            added: amount,
            allotment: schedule.initial_allotment,
          });
        }
        None => {
          VestingSchedules::<T>::insert(token, who, VestingSchedule::new(now, amount));
          Self::deposit_event(Event::VestingInitialized {
            token,
            who: who.clone(),
            allotment: amount,
            start: now,
          });
        }
      }
    }

    fn set_paused(who: &T::AccountId, token: TokenId, paused: bool) -> DispatchResult {
      Pools::<T>::try_mutate(token, |maybe_pool| -> DispatchResult {
        let pool = maybe_pool.as_mut().ok_or(Error::<T>::NotInitialized)?;
        Self::ensure_authority(pool, who)?;
        pool.status = match (pool.status, paused) {
          (PoolStatus::Withdrawn, _) => return Err(Error::<T>::AlreadyWithdrawn.into()),
          (PoolStatus::Active, true) => PoolStatus::Paused,
          (PoolStatus::Paused, false) => PoolStatus::Active,
          (PoolStatus::Paused, true) => return Err(Error::<T>::PoolPaused.into()),
          (PoolStatus::Active, false) => return Err(Error::<T>::PoolNotPaused.into()),
        };
        Ok(())
      })?;
      log::info!(target: LOG_TARGET, "pool {token} paused: {paused}");
      Self::deposit_event(Event::TradingPaused { token, paused });
      Ok(())
    }

    fn ensure_authority(pool: &PoolInfo<T::AccountId>, who: &T::AccountId) -> DispatchResult {
      ensure!(pool.authority == *who, Error::<T>::Unauthorized);
      Ok(())
    }

    fn transfer_token(
      token: TokenId,
      from: &T::AccountId,
      to: &T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      T::Assets::transfer(token, from, to, amount, Preservation::Expendable)
        .map(|_| ())
        .map_err(|e| {
          log::debug!(target: LOG_TARGET, "transfer of {amount} of token {token} failed: {e:?}");
          Error::<T>::TransferFailed.into()
        })
    }

    fn transfer_currency(from: &T::AccountId, to: &T::AccountId, amount: Balance) -> DispatchResult {
      T::Currency::transfer(from, to, amount, Preservation::Expendable)
        .map(|_| ())
        .map_err(|e| {
          log::debug!(target: LOG_TARGET, "transfer of {amount} currency failed: {e:?}");
          Error::<T>::TransferFailed.into()
        })
    }
  }
}

impl<T> From<CurveError> for Error<T> {
  fn from(error: CurveError) -> Self {
    match error {
      CurveError::ZeroAmount => Error::<T>::InvalidInput,
      CurveError::NoLiquidity => Error::<T>::InsufficientLiquidity,
      CurveError::Degenerate => Error::<T>::DegenerateTrade,
      CurveError::Overflow => Error::<T>::ArithmeticOverflow,
    }
  }
}
