//! Key material for Curve25519.
//!
//! This module defines the key types used by the signature scheme and by
//! Diffie–Hellman key agreement, together with key generation.
//!
//! It includes:
//! - scalar clamping,
//! - private, public and signing key types,
//! - key pair generation (`keygen`),
//! - key agreement (`agree`).
//!
//! Signing and verification live in [`crate::signatures`]; this module only
//! produces and checks key material.
//!
//! ## Encoding
//!
//! Every key is a raw 32-byte little-endian value. Public keys carry the
//! x-coordinate only. There is no other key format.

mod core;

pub use core::*;
