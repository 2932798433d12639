//! Curve25519 key agreement and EC-KCDSA signature primitives.
//!
//! This crate provides the arithmetic and the primitives of a Curve25519
//! signature scheme in which public keys are bare x-coordinates:
//!
//! - key generation producing a public key, a signing scalar and a
//!   clamped private scalar,
//! - the EC-KCDSA signing primitive `v = (x − h)·s mod q`,
//! - the verification primitive `Y = v·|P| + h·G`,
//! - Diffie–Hellman key agreement on the same keys.
//!
//! The focus is on **clarity, predictability, and auditability**. All
//! components are explicit in their semantics and work on fixed-size
//! 32-byte buffers.
//!
//! # Module overview
//!
//! - `curve25519`
//!   Field arithmetic modulo `2²⁵⁵ − 19`, byte-wise arithmetic modulo the
//!   group order, the Montgomery ladder and the curve constants.
//!
//! - `keys`
//!   Key types, clamping, key pair generation and key agreement.
//!
//! - `signatures`
//!   The signing and verification primitives and the signature type.
//!   Message hashing is left to the caller.
//!
//! - `legacy` (feature `legacy`)
//!   The same operations over 16-limb arrays instead of byte arrays.
//!
//! # Design goals
//!
//! - No heap allocations
//! - No secret-dependent branches or memory indexing in the ladder and the
//!   field arithmetic
//! - Minimal and explicit APIs
//!
//! Key generation inverts a scalar with a variable-time Euclidean
//! algorithm; see [`keys::keygen`].

pub mod curve25519;
pub mod keys;
pub mod signatures;

#[cfg(feature = "legacy")]
pub mod legacy;
