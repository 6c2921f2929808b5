//! Инфраструктура вокруг движка: реализации RNG и seed'ы для реплея.

pub mod rng;
pub mod rng_seed;

pub use rng::*;
pub use rng_seed::{RngSeed, SeededTableRng};
