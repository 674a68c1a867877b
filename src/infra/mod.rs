//! Инфраструктура вокруг игр: реализации `RandomSource`.

pub mod rng;

pub use rng::*;
