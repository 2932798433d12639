//! Curve25519 key material.
//!
//! A key pair for the signature scheme is made of three 32-byte values:
//!
//! - the **private key** `k`, a clamped scalar, also usable for key
//!   agreement,
//! - the **public key** `P = k·G`, packed x-coordinate only,
//! - the **signing key** `s`, the scalar with `s·|P| = G`, where `|P|` is
//!   whichever of `±P` has the non-negative y-coordinate.
//!
//! The signing key is what lets the verifier work from the x-coordinate of
//! `P` alone, without knowing the sign of its y-coordinate.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::curve25519::bignum::{BignumError, inverse_mod_order, mula_small};
use crate::curve25519::constants::{BASE_POINT, ORDER_TIMES_8};
use crate::curve25519::ct::ConstantTime;
use crate::curve25519::field::FieldElement;
use crate::curve25519::ladder::{LadderOutput, base_point, negated_y, scalar_mult, x_to_y2};

/// Errors that can occur when handling key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// The input is not exactly 32 bytes long.
    InvalidLength,
    /// The public key is not the x-coordinate of a usable curve point.
    InvalidPublicKey,
}

impl Display for KeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            KeyError::InvalidLength => f.write_str("key material must be 32 bytes"),
            KeyError::InvalidPublicKey => f.write_str("invalid public key"),
        }
    }
}

impl std::error::Error for KeyError {}

/// Clamps a raw scalar in place.
///
/// Clears the three low bits (cofactor), clears bit 255 and sets bit 254,
/// so every private key has the same bit length.
pub fn clamp(k: &mut [u8; 32]) {
    k[31] &= 0x7f;
    k[31] |= 0x40;
    k[0] &= 0xf8;
}

fn array_from_slice(bytes: &[u8]) -> Result<[u8; 32], KeyError> {
    bytes.try_into().map_err(|_| KeyError::InvalidLength)
}

/// A clamped private scalar.
///
/// Used both as the key-agreement secret and as the nonce `x` of a signature.
#[derive(Clone, Copy)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Builds a private key from 32 random bytes, clamping them.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut k = *bytes;
        clamp(&mut k);
        PrivateKey(k)
    }

    /// Returns the clamped scalar.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Computes the public key `k·G`.
    ///
    /// Unlike [`keygen`] this skips the signing scalar and runs in constant
    /// time.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(scalar_mult(&self.0, &base_point()).x.to_bytes())
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = KeyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(PrivateKey::from_bytes(&array_from_slice(bytes)?))
    }
}

/// A public key: the packed x-coordinate of `k·G`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Wraps a packed x-coordinate. No validation is performed.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        PublicKey(bytes)
    }

    /// Returns the packed x-coordinate.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` if this key can be used for verification.
    ///
    /// The x-coordinate must belong to a point of the curve (not its twist),
    /// must not be 0 (the point of order 2), and must differ from the base
    /// point's, since verification divides by `Px − Gx`.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks [`is_valid`](Self::is_valid) and returns the unpacked
    /// x-coordinate, `y²` and a square root of `y²`.
    pub(crate) fn validate(&self) -> Result<ValidatedPoint, KeyError> {
        let x = FieldElement::from_bytes(&self.0);
        let y2 = x_to_y2(&x);
        let y = y2.sqrt();

        let on_curve = y.square().ct_eq(&y2);
        let is_base = (x - base_point()).is_zero();
        let is_order_two = x.is_zero();

        if !on_curve || is_base || is_order_two {
            log::debug!(
                "rejected public key (on_curve: {on_curve}, base point: {is_base}, order two: {is_order_two})"
            );
            return Err(KeyError::InvalidPublicKey);
        }

        Ok(ValidatedPoint { x, y2, y })
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = KeyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(PublicKey(array_from_slice(bytes)?))
    }
}

/// An unpacked public key that passed validation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ValidatedPoint {
    pub(crate) x: FieldElement,
    pub(crate) y2: FieldElement,
    pub(crate) y: FieldElement,
}

/// The signing scalar `s`, in `[0, q)`.
#[derive(Clone, Copy)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// Wraps a signing scalar.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        SigningKey(bytes)
    }

    /// Returns the scalar bytes.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl TryFrom<&[u8]> for SigningKey {
    type Error = KeyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(SigningKey(array_from_slice(bytes)?))
    }
}

/// Output of [`keygen`].
#[derive(Clone, Copy)]
pub struct KeyPair {
    /// Packed x-coordinate of `k·G`.
    pub public: PublicKey,
    /// Signing scalar `s`.
    pub signing: SigningKey,
    /// Clamped private scalar `k`.
    pub private: PrivateKey,
}

/// Generates a key pair from 32 caller-provided random bytes.
///
/// ## Algorithm
///
/// 1. Clamp `k`.
/// 2. Run the ladder on the base point, giving `Px` and the companion
///    point `P + G`.
/// 3. Recover `−Py` from `Px`, `X(P + G)` and the curve constants.
/// 4. Pick `k` if `−Py` is negative (so `P = |P|`), `8q − k` otherwise
///    (so `−P = |P|`). The choice is a masked select.
/// 5. Invert the choice modulo `q`.
///
/// ## Security
///
/// The modular inverse in step 5 is a Euclidean algorithm whose running
/// time depends on `k`. Use [`PrivateKey::public_key`] when only the public
/// key is needed.
pub fn keygen(k: &[u8; 32]) -> KeyPair {
    let private = PrivateKey::from_bytes(k);

    let ladder = scalar_mult(&private.0, &base_point());

    // k has bit 254 set, and 8q > 2^255 > k, so neither candidate is zero
    let signing = match signing_scalar(&private.0, &ladder) {
        Ok(s) => s,
        Err(BignumError::DivisionByZero) => unreachable!("clamped scalar is never zero"),
    };

    KeyPair {
        public: PublicKey(ladder.x.to_bytes()),
        signing: SigningKey(signing),
        private,
    }
}

/// Derives `s = ±k⁻¹ mod q` from the base-point ladder output for `k`.
pub(crate) fn signing_scalar(k: &[u8; 32], ladder: &LadderOutput) -> Result<[u8; 32], BignumError> {
    let minus_py = negated_y(&ladder.x, &ladder.companion);

    let mut negated = ORDER_TIMES_8;
    mula_small(&mut negated, 0, k, -1);

    let chosen = negated.ct_select(k, minus_py.is_negative());

    inverse_mod_order(&chosen)
}

/// Diffie–Hellman key agreement.
///
/// Returns the packed x-coordinate of `private · peer`. Bit 255 of the
/// peer key is ignored, as in RFC 7748. The result is all zeros for
/// low-order peer points and is returned as-is.
pub fn agree(private: &PrivateKey, peer: &PublicKey) -> [u8; 32] {
    let mut u = peer.0;
    u[31] &= 0x7f;

    scalar_mult(&private.0, &FieldElement::from_bytes(&u))
        .x
        .to_bytes()
}

/// The base point as a public key, `1·G`.
pub const BASE: PublicKey = PublicKey(BASE_POINT);
