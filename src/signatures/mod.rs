//! Digital signature schemes.
//!
//! This module groups the signature algorithms built on top of the
//! Curve25519 primitives of the crate.
//!
//! Each submodule corresponds to a specific signature scheme and is
//! responsible for its own signature type, signing logic and verification
//! rules. Key material is shared and lives in [`crate::keys`].
//!
//! Currently provided:
//! - `kcdsa`: deterministic EC-KCDSA on Curve25519, verified from the
//!   x-coordinate of the public key alone.

pub mod kcdsa;

pub use kcdsa::{Signature, SignatureError, sign, verify};
