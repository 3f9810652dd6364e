//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, deterministic random numbers,
//! extended with the two samplers the clinic needs: Poisson-distributed
//! arrival gaps and uniform service durations.
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod xorshift;

pub use xorshift::RngManager;
