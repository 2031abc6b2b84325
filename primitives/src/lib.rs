#![cfg_attr(not(feature = "std"), no_std)]

pub mod ecosystem;
pub mod seeding;

pub use ecosystem::*;
pub use seeding::*;
