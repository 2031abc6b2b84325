#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn create_pool() -> Weight;
	fn buy() -> Weight;
	fn sell() -> Weight;
	fn pause() -> Weight;
	fn resume() -> Weight;
	fn emergency_withdraw() -> Weight;
	fn enable_selling() -> Weight;
	fn transfer_authority() -> Weight;
	fn set_trade_fee() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn create_pool() -> Weight {
		Weight::from_parts(60_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(5))
			.saturating_add(T::DbWeight::get().writes(6))
	}
	fn buy() -> Weight {
		Weight::from_parts(75_000_000, 7000)
			.saturating_add(T::DbWeight::get().reads(8))
			.saturating_add(T::DbWeight::get().writes(7))
	}
	fn sell() -> Weight {
		Weight::from_parts(75_000_000, 7000)
			.saturating_add(T::DbWeight::get().reads(8))
			.saturating_add(T::DbWeight::get().writes(7))
	}
	fn pause() -> Weight {
		Weight::from_parts(15_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn resume() -> Weight {
		Weight::from_parts(15_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn emergency_withdraw() -> Weight {
		Weight::from_parts(50_000_000, 5000)
			.saturating_add(T::DbWeight::get().reads(5))
			.saturating_add(T::DbWeight::get().writes(5))
	}
	fn enable_selling() -> Weight {
		Weight::from_parts(15_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn transfer_authority() -> Weight {
		Weight::from_parts(15_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_trade_fee() -> Weight {
		Weight::from_parts(10_000_000, 1000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
}

impl WeightInfo for () {
	fn create_pool() -> Weight {
		Weight::from_parts(60_000_000, 6000)
	}
	fn buy() -> Weight {
		Weight::from_parts(75_000_000, 7000)
	}
	fn sell() -> Weight {
		Weight::from_parts(75_000_000, 7000)
	}
	fn pause() -> Weight {
		Weight::from_parts(15_000_000, 2000)
	}
	fn resume() -> Weight {
		Weight::from_parts(15_000_000, 2000)
	}
	fn emergency_withdraw() -> Weight {
		Weight::from_parts(50_000_000, 5000)
	}
	fn enable_selling() -> Weight {
		Weight::from_parts(15_000_000, 2000)
	}
	fn transfer_authority() -> Weight {
		Weight::from_parts(15_000_000, 2000)
	}
	fn set_trade_fee() -> Weight {
		Weight::from_parts(10_000_000, 1000)
	}
}
