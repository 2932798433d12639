//! Limb-array calling convention.
//!
//! Older callers pass scalars and coordinates as 16 little-endian 16-bit
//! limbs instead of 32 bytes. This module converts at the boundary and runs
//! the same ladder and key-derivation code as [`crate::keys`].
//!
//! Enabled by the `legacy` Cargo feature.

use crate::curve25519::field::FieldElement;
use crate::curve25519::ladder::scalar_mult;
use crate::keys::signing_scalar;

fn limbs_to_bytes(limbs: &[u16; 16]) -> [u8; 32] {
    let mut out = [0u8; 32];

    for (chunk, limb) in out.chunks_exact_mut(2).zip(limbs.iter()) {
        chunk.copy_from_slice(&limb.to_le_bytes());
    }

    out
}

fn bytes_to_limbs(bytes: &[u8; 32]) -> [u16; 16] {
    FieldElement::from_bytes(bytes).limbs()
}

/// Clamps a limb-encoded scalar in place and returns it.
pub fn clamp(curve: &mut [u16; 16]) -> &mut [u16; 16] {
    curve[0] &= 0xfff8;
    curve[15] &= 0x7fff;
    curve[15] |= 0x4000;
    curve
}

/// Computes the x-coordinate of `f·c`, in reduced limb form.
///
/// `f` is used as given (clamp it first with [`clamp`] if needed). If `s`
/// is provided and `c` is the base point, it receives the signing scalar
/// for `f` as limbs. `s` is left untouched if that scalar has no inverse.
pub fn curve25519(f: &[u16; 16], c: &[u16; 16], s: Option<&mut [u16; 16]>) -> [u16; 16] {
    let k = limbs_to_bytes(f);
    let ladder = scalar_mult(&k, &FieldElement::from_limbs(*c));

    if let Some(s) = s {
        match signing_scalar(&k, &ladder) {
            Ok(scalar) => *s = bytes_to_limbs(&scalar),
            Err(err) => log::warn!("legacy curve25519: no signing scalar ({err})"),
        }
    }

    ladder.x.reduce().limbs()
}
