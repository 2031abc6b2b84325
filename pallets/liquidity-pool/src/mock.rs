use crate as pallet_liquidity_pool;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl, parameter_types,
  traits::{ConstU32, ConstU64, ConstU128, Get},
};
use polkadot_sdk::frame_system::{self, EnsureRoot};
use polkadot_sdk::sp_runtime::{
  BuildStorage,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{
  SeedPolicy,
  ecosystem::{pallet_ids::LIQUIDITY_POOL_PALLET_ID, params},
};

use crate::types::{Balance, Moment, TokenId};

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    Timestamp: polkadot_sdk::pallet_timestamp,
    LiquidityPool: pallet_liquidity_pool,
  }
);

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const CHARLIE: u64 = 3;

/// Token with a pool in most tests
pub const TOKEN: TokenId = 1;
/// Token nobody created a pool for
pub const OTHER_TOKEN: TokenId = 2;
/// Token whose accounts must hold at least `DUSTY_MIN_BALANCE`
pub const DUSTY_TOKEN: TokenId = 3;
pub const DUSTY_MIN_BALANCE: Balance = 1_000;

pub const INITIAL_CURRENCY: Balance = 1_000_000_000;
pub const INITIAL_TOKENS: Balance = 10_000_000;
pub const SEED_TOKENS: Balance = 1_000_000;
pub const SEED_CURRENCY: Balance = 1_000;

/// Genesis wall-clock time in seconds
pub const START: Moment = 1_700_000_000;
pub const DAY: Moment = params::VESTING_UNIT_SECS;
pub const SELLING_DELAY: Moment = params::SELLING_DELAY_SECS;

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = u128;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = AssetBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct AssetBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl polkadot_sdk::pallet_assets::BenchmarkHelper<u32, ()> for AssetBenchmarkHelper {
  fn create_asset_id_parameter(id: u32) -> u32 {
    id
  }
  fn create_reserve_id_parameter(_id: u32) -> () {
    ()
  }
}

impl polkadot_sdk::pallet_timestamp::Config for Test {
  type Moment = u64;
  type OnTimestampSet = ();
  type MinimumPeriod = ConstU64<1>;
  type WeightInfo = ();
}

pub struct LiquidityPoolPalletId;
impl Get<PalletId> for LiquidityPoolPalletId {
  fn get() -> PalletId {
    PalletId(*LIQUIDITY_POOL_PALLET_ID)
  }
}

parameter_types! {
  pub const PoolSeedPolicy: SeedPolicy = SeedPolicy::Fixed(SEED_TOKENS);
}

#[cfg(feature = "runtime-benchmarks")]
pub struct PoolBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl pallet_liquidity_pool::BenchmarkHelper<u64> for PoolBenchmarkHelper {
  fn create_token(
    token: TokenId,
    owner: &u64,
    supply: Balance,
  ) -> polkadot_sdk::sp_runtime::DispatchResult {
    use polkadot_sdk::frame_support::traits::fungibles::{Create, Inspect, Mutate};
    if !<Assets as Inspect<u64>>::asset_exists(token) {
      <Assets as Create<u64>>::create(token, *owner, true, 1)?;
    }
    <Assets as Mutate<u64>>::mint_into(token, owner, supply)?;
    Ok(())
  }
}

impl pallet_liquidity_pool::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type TimeProvider = Timestamp;
  type AdminOrigin = EnsureRoot<u64>;
  type PalletId = LiquidityPoolPalletId;
  type MaxTxPerBlock = ConstU32<{ params::MAX_TX_PER_BLOCK }>;
  type SellingDelay = ConstU64<{ params::SELLING_DELAY_SECS }>;
  type VestingUnit = ConstU64<{ params::VESTING_UNIT_SECS }>;
  type VestingUnits = ConstU32<{ params::VESTING_UNITS }>;
  type DailyUnlockBps = ConstU32<{ params::DAILY_UNLOCK_BPS }>;
  type DefaultTradeFeeBps = ConstU32<{ params::DEFAULT_TRADE_FEE_BPS }>;
  type MaxTradeFeeBps = ConstU32<{ params::MAX_TRADE_FEE_BPS }>;
  type PoolSeedPolicy = PoolSeedPolicy;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = PoolBenchmarkHelper;
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: alloc::vec![
      (ALICE, INITIAL_CURRENCY),
      (BOB, INITIAL_CURRENCY),
      (CHARLIE, INITIAL_CURRENCY),
    ],
    dev_accounts: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: alloc::vec![
      (TOKEN, ALICE, true, 1),
      (OTHER_TOKEN, ALICE, true, 1),
      (DUSTY_TOKEN, ALICE, true, DUSTY_MIN_BALANCE),
    ],
    metadata: alloc::vec![],
    accounts: alloc::vec![
      (TOKEN, ALICE, INITIAL_TOKENS),
      (DUSTY_TOKEN, ALICE, INITIAL_TOKENS),
    ],
    reserves: alloc::vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| {
    System::set_block_number(1);
    set_now(START);
  });
  ext
}

/// Sets the wall clock to `secs` seconds since the Unix epoch.
pub fn set_now(secs: Moment) {
  Timestamp::set_timestamp(secs * 1_000);
}

pub fn next_block() {
  System::set_block_number(System::block_number() + 1);
}

/// ALICE creates the `TOKEN` pool with the default seed at the current time.
pub fn create_pool() {
  polkadot_sdk::frame_support::assert_ok!(LiquidityPool::create_pool(
    RuntimeOrigin::signed(ALICE),
    TOKEN,
    SEED_CURRENCY,
  ));
}

/// Sets the trade fee to `fee_bps` through governance.
pub fn set_fee(fee_bps: u32) {
  polkadot_sdk::frame_support::assert_ok!(LiquidityPool::set_trade_fee(
    RuntimeOrigin::root(),
    fee_bps,
  ));
}
