//! Anti-bot throttle: caps how many trades one account may place per bucket (block).
//!
//! Only the most recent bucket is remembered per account. A trade in a newer bucket
//! replaces the stored counter, which keeps storage bounded by the number of traders.

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo)]
pub struct TradeCounter<Bucket> {
  pub bucket: Bucket,
  pub count: u32,
}

impl<Bucket: Copy + PartialEq> TradeCounter<Bucket> {
  /// Trades already admitted in `bucket`.
  pub fn count_in(previous: Option<&Self>, bucket: Bucket) -> u32 {
    match previous {
      Some(counter) if counter.bucket == bucket => counter.count,
      _ => 0,
    }
  }

  /// Counter to store if one more trade is admitted in `bucket`.
  ///
  /// `None` means the cap is reached and the trade must be rejected. The previous
  /// counter is left as it was.
  pub fn admit(previous: Option<&Self>, bucket: Bucket, max_per_bucket: u32) -> Option<Self> {
    let count = Self::count_in(previous, bucket);
    if count >= max_per_bucket {
      return None;
    }
    Some(Self {
      bucket,
      count: count.saturating_add(1),
    })
  }
}
