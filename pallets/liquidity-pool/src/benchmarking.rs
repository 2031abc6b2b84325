#![cfg(feature = "runtime-benchmarks")]

use super::*;
use frame::deps::frame_support::traits::{fungible::Mutate as NativeMutate, fungibles::Inspect};
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::{self, RawOrigin};

const TOKEN: TokenId = 1;
const SUPPLY: Balance = 1_000_000_000_000_000_000_000_000;
const SEED_CURRENCY: Balance = 1_000_000_000_000;
const TRADE_AMOUNT: Balance = 1_000_000_000;

fn funded_account<T: Config>(name: &'static str, index: u32) -> T::AccountId {
  let who: T::AccountId = account(name, index, 0);
  T::Currency::set_balance(&who, SEED_CURRENCY * 100);
  who
}

/// Creates the benchmark pool and returns its authority.
fn create_seeded_pool<T: Config>() -> T::AccountId {
  let creator = funded_account::<T>("creator", 0);
  T::BenchmarkHelper::create_token(TOKEN, &creator, SUPPLY).unwrap();
  Pallet::<T>::create_pool(
    RawOrigin::Signed(creator.clone()).into(),
    TOKEN,
    SEED_CURRENCY,
  )
  .unwrap();
  creator
}

fn next_block<T: Config>() {
  let now = frame_system::Pallet::<T>::block_number();
  frame_system::Pallet::<T>::set_block_number(now + 1u32.into());
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn create_pool() {
    let creator = funded_account::<T>("creator", 0);
    T::BenchmarkHelper::create_token(TOKEN, &creator, SUPPLY).unwrap();

    #[extrinsic_call]
    create_pool(RawOrigin::Signed(creator), TOKEN, SEED_CURRENCY);

    assert!(Pools::<T>::contains_key(TOKEN));
  }

  #[benchmark]
  fn buy() {
    create_seeded_pool::<T>();
    let buyer = funded_account::<T>("buyer", 0);
    // Worst case: a schedule already exists and gets extended
    Pallet::<T>::buy(
      RawOrigin::Signed(buyer.clone()).into(),
      TOKEN,
      TRADE_AMOUNT,
      0,
    )
    .unwrap();

    #[extrinsic_call]
    buy(RawOrigin::Signed(buyer.clone()), TOKEN, TRADE_AMOUNT, 0);

    assert!(T::Assets::balance(TOKEN, &buyer) > 0);
  }

  #[benchmark]
  fn sell() {
    let creator = create_seeded_pool::<T>();
    let seller = funded_account::<T>("seller", 0);
    Pallet::<T>::buy(
      RawOrigin::Signed(seller.clone()).into(),
      TOKEN,
      TRADE_AMOUNT,
      0,
    )
    .unwrap();
    Pallet::<T>::enable_selling(RawOrigin::Signed(creator).into(), TOKEN).unwrap();
    next_block::<T>();
    let amount = match Pallet::<T>::vesting_status(TOKEN, &seller) {
      VestingStatus::Active { sellable } => sellable,
      _ => T::Assets::balance(TOKEN, &seller) / 2,
    };

    #[extrinsic_call]
    sell(RawOrigin::Signed(seller), TOKEN, amount, 0);
  }

  #[benchmark]
  fn pause() {
    let creator = create_seeded_pool::<T>();

    #[extrinsic_call]
    pause(RawOrigin::Signed(creator), TOKEN);

    assert_eq!(
      Pools::<T>::get(TOKEN).map(|pool| pool.status),
      Some(PoolStatus::Paused)
    );
  }

  #[benchmark]
  fn resume() {
    let creator = create_seeded_pool::<T>();
    Pallet::<T>::pause(RawOrigin::Signed(creator.clone()).into(), TOKEN).unwrap();

    #[extrinsic_call]
    resume(RawOrigin::Signed(creator), TOKEN);

    assert_eq!(
      Pools::<T>::get(TOKEN).map(|pool| pool.status),
      Some(PoolStatus::Active)
    );
  }

  #[benchmark]
  fn emergency_withdraw() {
    let creator = create_seeded_pool::<T>();

    #[extrinsic_call]
    emergency_withdraw(RawOrigin::Signed(creator), TOKEN);

    assert_eq!(
      Pools::<T>::get(TOKEN).map(|pool| pool.status),
      Some(PoolStatus::Withdrawn)
    );
  }

  #[benchmark]
  fn enable_selling() {
    let creator = create_seeded_pool::<T>();

    #[extrinsic_call]
    enable_selling(RawOrigin::Signed(creator), TOKEN);
  }

  #[benchmark]
  fn transfer_authority() {
    let creator = create_seeded_pool::<T>();
    let successor: T::AccountId = account("successor", 0, 0);

    #[extrinsic_call]
    transfer_authority(RawOrigin::Signed(creator), TOKEN, successor.clone());

    assert_eq!(
      Pools::<T>::get(TOKEN).map(|pool| pool.authority),
      Some(successor)
    );
  }

  #[benchmark]
  fn set_trade_fee() {
    #[extrinsic_call]
    set_trade_fee(RawOrigin::Root, 100);

    assert_eq!(TradeFeeBps::<T>::get(), 100);
  }

  impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
