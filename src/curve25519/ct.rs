/// Constant-time comparison and selection utilities.
///
/// This trait provides the primitives used by the ladder, key generation
/// and verification to avoid timing side-channels. Implementations must
/// ensure that execution time does not depend on secret data.
///
/// The primary operation is equality testing (`ct_eq`). Selection
/// (`ct_select`) picks one of two values from a `0`/`1` condition without
/// branching.
pub trait ConstantTime: Sized {
    /// Returns `true` if `self == other`, in constant time.
    ///
    /// This method must not introduce data-dependent branches or early exits.
    fn ct_eq(&self, other: &Self) -> bool;

    /// Returns `other` if `condition == 1` and `self` if `condition == 0`.
    fn ct_select(&self, other: &Self, condition: u8) -> Self;
}

/// Expands a `0`/`1` condition into an all-zeros / all-ones byte mask.
#[inline(always)]
pub(crate) fn mask_u8(condition: u8) -> u8 {
    (condition & 1).wrapping_neg()
}

/// Expands a `0`/`1` condition into an all-zeros / all-ones limb mask.
#[inline(always)]
pub(crate) fn mask_u16(condition: u8) -> u16 {
    ((condition & 1) as u16).wrapping_neg()
}

/// Returns `1` if `a == b`, `0` otherwise, without branching.
///
/// Used to turn small public-shape indices (`0..=2`) into selection
/// conditions.
#[inline(always)]
pub(crate) fn eq_u32(a: u32, b: u32) -> u8 {
    let x = (a ^ b) as u64;
    ((x.wrapping_sub(1) >> 63) & 1) as u8
}

impl ConstantTime for [u8; 32] {
    /// Constant-time equality test for 32-byte arrays.
    ///
    /// All bytes are XORed and accumulated before comparison, ensuring that
    /// the execution time does not depend on where the first difference occurs.
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        self.iter()
            .zip(other)
            .map(|(a, b)| a ^ b)
            .fold(0, |acc, v| acc | v)
            == 0
    }

    #[inline(always)]
    fn ct_select(&self, other: &Self, condition: u8) -> Self {
        let mask = mask_u8(condition);
        let mut out = *self;

        for (o, r) in out.iter_mut().zip(other.iter()) {
            *o ^= (*o ^ r) & mask;
        }

        out
    }
}
