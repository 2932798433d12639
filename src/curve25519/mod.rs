//! Curve25519 arithmetic.
//!
//! This module contains the arithmetic the key and signature layers are
//! built from:
//!
//! - `field`: the prime field 𝔽ₚ, `p = 2²⁵⁵ − 19`, on 16 × 16-bit limbs,
//! - `bignum`: byte-wise integer arithmetic modulo the group order `q`,
//! - `ladder`: x-only Montgomery ladder and point formulas,
//! - `constants`: curve and group constants.
//!
//! ## Design goals
//!
//! - No heap allocation; all scratch space lives on the stack.
//! - Fixed operation sequences: the ladder and the field routines never
//!   branch on or index by secret data.
//! - Plain functions over explicit values, no global state.
//!
//! These are low-level building blocks. Most users want [`crate::keys`] and
//! [`crate::signatures`] instead.

pub mod bignum;
pub mod constants;
pub mod field;
pub mod ladder;

pub(crate) mod ct;

pub use ct::ConstantTime;
