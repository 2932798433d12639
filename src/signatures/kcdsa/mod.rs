//! Deterministic EC-KCDSA over Curve25519.
//!
//! This module provides the two signature primitives, [`sign`] and
//! [`verify`]. Hashing is left to the caller; the primitives only see
//! 32-byte values.
//!
//! ## Protocol
//!
//! With `s` the signer's [`SigningKey`](crate::keys::SigningKey), `P` the
//! matching public key and `Z` some context data (signer public key,
//! certificate, ...):
//!
//! ```text
//! signing:
//!     m = hash(Z, message)
//!     x = PrivateKey::from_bytes(hash(m, s))
//!     Y = x.public_key()
//!     r = hash(Y)
//!     h = m XOR r
//!     v = sign(h, x, s)          (pick another x if this fails)
//!     output (v, r)
//!
//! verification:
//!     m = hash(Z, message)
//!     h = m XOR r
//!     Y = verify(v, h, P)
//!     accept iff r == hash(Y)
//! ```
//!
//! Correctness follows from `v = (x − h)·s`, so that
//! `v·|P| + h·G = (x − h)·G + h·G = x·G = Y`.
//!
//! ## Security
//!
//! - `sign` uses fixed-length bignum loops.
//! - `verify` runs its ladder with masked operand selection. Its inputs are
//!   public.
//! - `verify` rejects public keys that are not on the curve or equal to the
//!   base point.

mod sign;
mod verify;

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::keys::KeyError;

pub use sign::sign;
pub use verify::verify;

/// Errors that can occur while signing or verifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature value is zero: `x ≡ h (mod q)`. Pick another nonce.
    Degenerate,
    /// A signature value or key is not exactly 32 bytes long.
    InvalidLength,
    /// The public key cannot be used for verification.
    InvalidPublicKey,
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SignatureError::Degenerate => f.write_str("degenerate signature value"),
            SignatureError::InvalidLength => f.write_str("input must be 32 bytes"),
            SignatureError::InvalidPublicKey => f.write_str("invalid public key"),
        }
    }
}

impl std::error::Error for SignatureError {}

impl From<KeyError> for SignatureError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::InvalidLength => SignatureError::InvalidLength,
            KeyError::InvalidPublicKey => SignatureError::InvalidPublicKey,
        }
    }
}

/// A signature value `v`, never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature([u8; 32]);

impl Signature {
    /// Wraps a signature value. No validation is performed.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the signature value bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        bytes
            .try_into()
            .map(Signature)
            .map_err(|_| SignatureError::InvalidLength)
    }
}
