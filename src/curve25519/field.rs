//! Finite field arithmetic for Curve25519.
//!
//! This module implements arithmetic in the prime field
//!
//! ```text
//! 𝔽ₚ where p = 2²⁵⁵ − 19
//! ```
//!
//! used by the Montgomery ladder and the EC-KCDSA signature primitive.
//!
//! ## Representation
//!
//! Field elements are represented using 16 unsigned 16-bit limbs in
//! little-limb-endian order:
//!
//! ```text
//! value = Σ limb[i] · 2^(16·i)   (mod p)
//! ```
//!
//! The top limb carries bit 255. Because `2²⁵⁵ ≡ 19 (mod p)`, every
//! operation folds that bit back into limb 0 multiplied by 19.
//!
//! ## Reduction model
//!
//! Elements are **lazily normalized**:
//!
//! - `add` and `sub` ripple carries and fold the top limb, but do not
//!   canonicalize. Their outputs are valid inputs to every operation.
//! - `mul`, `square`, `mul_small`, `recip` and `sqrt` end with [`reduce`],
//!   which folds the top limb, ripples carries and conditionally subtracts
//!   `p`. Their outputs are canonical, in `[0, p)`.
//!
//! All intermediate arithmetic is promoted to `i64`. Every bias used to keep
//! intermediate limbs non-negative is a multiple of `p`.
//!
//! ## Constant-time behavior
//!
//! No operation branches on, or indexes memory with, the value of an
//! element. Conditional logic is expressed with limb masks.
//!
//! [`reduce`]: FieldElement::reduce

use std::ops::{Add, Mul, Sub};

use super::ct::{ConstantTime, mask_u16};

/// Field element modulo `2^255 - 19`, represented in radix `2^16`.
///
/// Internally stored as 16 unsigned 16-bit limbs, least significant first.
/// The representation is not unique: values in `[p, 2^255 + 2^240]` may
/// appear as outputs of `add`/`sub` and are normalized by the next reducing
/// operation.
#[derive(Clone, Copy, Debug)]
pub struct FieldElement(pub(crate) [u16; 16]);

/// Splits the limbs into the Karatsuba operands: low half, high half, and
/// their limb-wise sum.
#[inline(always)]
fn halves(a: &[u16; 16]) -> ([i64; 8], [i64; 8], [i64; 8]) {
    let lo: [i64; 8] = std::array::from_fn(|i| a[i] as i64);
    let hi: [i64; 8] = std::array::from_fn(|i| a[i + 8] as i64);
    let sum: [i64; 8] = std::array::from_fn(|i| lo[i] + hi[i]);

    (lo, hi, sum)
}

/// Schoolbook 8×8 limb product.
///
/// Produces 15 normalized 16-bit limbs and the final carry in limb 15.
#[inline(always)]
fn mul8h(a: &[i64; 8], b: &[i64; 8]) -> [i64; 16] {
    let mut r = [0i64; 16];
    let mut v = 0i64;

    for (k, out) in r.iter_mut().enumerate().take(15) {
        let lo = k.saturating_sub(7);
        let hi = k.min(7);

        for i in lo..=hi {
            v += a[i] * b[k - i];
        }

        *out = v & 0xffff;
        v >>= 16;
    }

    r[15] = v;
    r
}

/// Schoolbook 8-limb square.
///
/// Same output layout as [`mul8h`]; cross products are computed once and
/// doubled.
#[inline(always)]
fn sqr8h(a: &[i64; 8]) -> [i64; 16] {
    let mut r = [0i64; 16];
    let mut v = 0i64;

    for (k, out) in r.iter_mut().enumerate().take(15) {
        let lo = k.saturating_sub(7);

        let mut i = lo;
        while 2 * i < k {
            v += 2 * a[i] * a[k - i];
            i += 1;
        }

        if k % 2 == 0 {
            v += a[k / 2] * a[k / 2];
        }

        *out = v & 0xffff;
        v >>= 16;
    }

    r[15] = v;
    r
}

/// Recombines the three half products of a Karatsuba multiplication.
///
/// With `H = 2^128`, `a·b = z + H·(y − x − z) + H²·x`, and `H² ≡ 38 (mod p)`.
/// Every limb receives the bias `0x7fff80`; the total bias is `256·p`.
#[inline(always)]
fn karatsuba_fold(x: &[i64; 16], y: &[i64; 16], z: &[i64; 16]) -> FieldElement {
    let mut r = [0i64; 16];

    let mut v = 0x80_0000 + z[0] + (y[8] - x[8] - z[8] + x[0] - 0x80) * 38;
    r[0] = v & 0xffff;

    for i in 1..8 {
        v = 0x7f_ff80 + (v >> 16) + z[i] + (y[i + 8] - x[i + 8] - z[i + 8] + x[i]) * 38;
        r[i] = v & 0xffff;
    }

    for i in 8..15 {
        v = 0x7f_ff80 + (v >> 16) + z[i] + y[i - 8] - x[i - 8] - z[i - 8] + x[i] * 38;
        r[i] = v & 0xffff;
    }

    r[15] = 0x7f_ff80 + (v >> 16) + z[15] + y[7] - x[7] - z[7] + x[15] * 38;

    carry_reduce(r)
}

/// Folds the raw top limb back into the low limbs and canonicalizes.
///
/// `limbs[0..15]` must be non-negative 16-bit values; `limbs[15]` is the
/// unbounded (non-negative) top accumulator.
#[inline(always)]
fn carry_reduce(mut limbs: [i64; 16]) -> FieldElement {
    let mut v = limbs[15];
    limbs[15] = v & 0x7fff;
    v = (v >> 15) * 19;

    for limb in limbs.iter_mut().take(15) {
        v += *limb;
        *limb = v & 0xffff;
        v >>= 16;
    }

    limbs[15] += v;

    canonicalize(&limbs)
}

/// Folds bit 255 and above of the top limb back into limb 0 without
/// canonicalizing.
///
/// The top limb may be slightly negative (a borrow out of subtraction) or
/// carry a 17th bit (addition). Afterwards every limb fits in 16 bits and the
/// top limb is at most `0x8000`.
#[inline(always)]
fn fold_top(mut limbs: [i64; 16]) -> FieldElement {
    let mut v = (limbs[15] >> 15) * 19;
    limbs[15] &= 0x7fff;

    for limb in limbs.iter_mut().take(15) {
        v += *limb;
        *limb = v & 0xffff;
        v >>= 16;
    }

    limbs[15] += v;

    FieldElement(limbs.map(|l| l as u16))
}

/// Computes `value + 19` limb-wise and reports whether it reaches `2^255`.
///
/// Returns the low 255 bits of `value + 19` together with the overflow flag
/// (`1` if `value ≥ p`).
#[inline(always)]
fn plus_19(limbs: &[i64; 16]) -> ([i64; 16], u8) {
    let mut sum = [0i64; 16];
    let mut c = 19i64;

    for (s, limb) in sum.iter_mut().zip(limbs.iter()) {
        c += *limb;
        *s = c & 0xffff;
        c >>= 16;
    }

    let overflow = (((sum[15] >> 15) | c) != 0) as u8;
    sum[15] &= 0x7fff;

    (sum, overflow)
}

/// Conditionally subtracts `p` from a value in `[0, 2p)`.
///
/// `value − p = value + 19 − 2^255`, so the candidate is the low 255 bits of
/// `value + 19`, selected by mask.
#[inline(always)]
fn canonicalize(limbs: &[i64; 16]) -> FieldElement {
    let (sum, overflow) = plus_19(limbs);
    let mask = mask_u16(overflow);

    FieldElement(std::array::from_fn(|i| {
        let a = limbs[i] as u16;
        let b = sum[i] as u16;
        a ^ ((a ^ b) & mask)
    }))
}

impl FieldElement {
    /// The additive identity (0).
    pub const ZERO: Self = FieldElement([0u16; 16]);

    /// The multiplicative identity (1).
    pub const ONE: Self = FieldElement::from_u32(1);

    /// Builds an element from raw limbs, least significant first.
    ///
    /// No reduction is performed.
    pub const fn from_limbs(limbs: [u16; 16]) -> Self {
        FieldElement(limbs)
    }

    /// Builds the element equal to a small integer.
    pub const fn from_u32(value: u32) -> Self {
        let mut limbs = [0u16; 16];
        limbs[0] = (value & 0xffff) as u16;
        limbs[1] = (value >> 16) as u16;
        FieldElement(limbs)
    }

    /// Returns the raw limbs, least significant first.
    pub const fn limbs(&self) -> [u16; 16] {
        self.0
    }

    /// Decodes a field element from a 32-byte little-endian encoding.
    ///
    /// All 256 bits are kept; bit 255 is interpreted as `19` by the next
    /// arithmetic operation.
    pub fn from_bytes(input: &[u8; 32]) -> FieldElement {
        FieldElement(std::array::from_fn(|i| {
            (input[2 * i] as u16) | ((input[2 * i + 1] as u16) << 8)
        }))
    }

    /// Encodes this element into its canonical 32-byte little-endian form.
    ///
    /// The element is reduced first, so any representation of the same
    /// residue yields the same bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let reduced = self.reduce();
        let mut output = [0u8; 32];

        for (chunk, limb) in output.chunks_exact_mut(2).zip(reduced.0.iter()) {
            chunk[0] = (limb & 0x00ff) as u8;
            chunk[1] = (limb >> 8) as u8;
        }

        output
    }

    /// Returns the canonical representative of this element.
    ///
    /// Propagates the excess of the top limb (everything above bit 255,
    /// divided by `2^15`) back into limb 0 scaled by 19, ripples the carries
    /// through limbs 0..14, folds the final carry into limb 15 and finally
    /// subtracts `p` once if the value is still `≥ p`.
    ///
    /// Reducing an already reduced element returns it unchanged.
    pub fn reduce(&self) -> FieldElement {
        carry_reduce(self.0.map(|x| x as i64))
    }

    /// Returns `true` if the integer value of the limbs is `≥ p`.
    ///
    /// Works on any limb content, reduced or not. Constant-time.
    pub fn is_overflow(&self) -> bool {
        plus_19(&self.0.map(|x| x as i64)).1 == 1
    }

    /// Returns `1` if this element is "negative", `0` otherwise.
    ///
    /// The sign convention is the parity of the canonical value: the least
    /// significant bit, flipped when the limbs hold a value `≥ p` (since `p`
    /// is odd). Expects a reduced input (output of a multiplication).
    pub fn is_negative(&self) -> u8 {
        (self.is_overflow() as u8) ^ (self.0[0] & 1) as u8
    }

    /// Returns `true` if this element is congruent to zero.
    pub fn is_zero(&self) -> bool {
        self.reduce().0.iter().fold(0u16, |acc, &l| acc | l) == 0
    }

    /// Constant-time conditional swap of two field elements.
    ///
    /// If `condition == 1`, swaps `self` and `rhs`.
    /// If `condition == 0`, does nothing.
    pub fn swap(&mut self, rhs: &mut Self, condition: u8) {
        let mask = mask_u16(condition);

        for (s, r) in self.0.iter_mut().zip(rhs.0.iter_mut()) {
            let tmp = (*s ^ *r) & mask;
            *s ^= tmp;
            *r ^= tmp;
        }
    }

    /// Overwrites `self` with `rhs` if `condition == 1`, in constant time.
    pub fn conditional_assign(&mut self, rhs: &Self, condition: u8) {
        *self = self.ct_select(rhs, condition);
    }

    /// Multiplies by a small non-negative integer and reduces.
    ///
    /// `m` must stay below `2^28`; the curve uses 1, 121665 and 486662.
    /// The input need not be reduced.
    pub fn mul_small(&self, m: u32) -> FieldElement {
        debug_assert!(m < (1 << 28));

        let m = m as i64;
        let mut r = [0i64; 16];
        let mut v = 0i64;

        for i in 0..15 {
            v = (v >> 16) + self.0[i] as i64 * m;
            r[i] = v & 0xffff;
        }

        r[15] = (v >> 16) + self.0[15] as i64 * m;

        carry_reduce(r)
    }

    /// Computes the square of this field element.
    ///
    /// Uses the same three-way split as multiplication, with squaring
    /// schoolbook kernels for the half products.
    pub fn square(&self) -> FieldElement {
        let (lo, hi, sum) = halves(&self.0);

        let x = sqr8h(&hi);
        let z = sqr8h(&lo);
        let y = sqr8h(&sum);

        karatsuba_fold(&x, &y, &z)
    }

    /// Squares this element `n` times.
    pub fn n_square(&self, n: usize) -> FieldElement {
        let mut out = *self;

        for _ in 0..n {
            out = out.square();
        }

        out
    }

    /// Computes the reciprocal `x^(p−2)`, or `x^((p−5)/8)` with `sqrt_assist`.
    ///
    /// The addition chain for `x^(2^255 − 21)` goes through the partial
    /// powers `2^5 − 1`, `2^10 − 1`, `2^20 − 1`, `2^50 − 1`, `2^100 − 1` and
    /// `2^250 − 1`. It has a fixed shape regardless of the input.
    ///
    /// The reciprocal of zero is zero.
    pub fn recip(&self, sqrt_assist: bool) -> FieldElement {
        let x = *self;

        let t1 = x.square(); //                2
        let t2 = t1.square(); //               4
        let t0 = t2.square(); //               8
        let t2 = t0 * x; //                    9
        let t0 = t2 * t1; //                  11
        let t1 = t0.square(); //              22
        let t3 = t1 * t2; //                  31 = 2^5 - 2^0

        let t1 = t3.n_square(5); //           2^10 - 2^5
        let t2 = t1 * t3; //                  2^10 - 2^0

        let t3 = t2.n_square(10); //          2^20 - 2^10
        let t1 = t3 * t2; //                  2^20 - 2^0

        let t3 = t1.n_square(20); //          2^40 - 2^20
        let t3 = t3 * t1; //                  2^40 - 2^0

        let t3 = t3.n_square(10); //          2^50 - 2^10
        let t1 = t3 * t2; //                  2^50 - 2^0

        let t3 = t1.n_square(50); //          2^100 - 2^50
        let t2 = t3 * t1; //                  2^100 - 2^0

        let t4 = t2.n_square(100); //         2^200 - 2^100
        let t3 = t4 * t2; //                  2^200 - 2^0

        let t3 = t3.n_square(50); //          2^250 - 2^50
        let t2 = t3 * t1; //                  2^250 - 2^0

        let t2 = t2.n_square(2); //           2^252 - 2^2

        if sqrt_assist {
            x * t2 //                         2^252 - 3
        } else {
            t2.n_square(3) * t0 //            2^255 - 21
        }
    }

    /// Computes the multiplicative inverse of this element.
    #[inline]
    pub fn invert(&self) -> FieldElement {
        self.recip(false)
    }

    /// Computes a square root of this element.
    ///
    /// Since `p ≡ 5 (mod 8)`:
    ///
    /// ```text
    /// v = (2u)^((p−5)/8)
    /// x = u·v·(2u·v² − 1)
    /// ```
    ///
    /// The result is only meaningful when `self` is a quadratic residue.
    /// Callers that cannot guarantee this must check `x.square()` against
    /// the input.
    pub fn sqrt(&self) -> FieldElement {
        let u = *self;

        let t1 = u + u; //                    2u
        let v = t1.recip(true); //            (2u)^((p-5)/8)
        let x = v.square(); //                v^2
        let t2 = t1 * x; //                   2uv^2
        let t2 = t2 - FieldElement::ONE; //   2uv^2 - 1
        let t1 = v * t2; //                   v(2uv^2 - 1)

        u * t1
    }
}

impl ConstantTime for FieldElement {
    /// Compares the canonical values of two elements.
    fn ct_eq(&self, other: &Self) -> bool {
        let a = self.reduce();
        let b = other.reduce();

        a.0.iter()
            .zip(b.0.iter())
            .fold(0u16, |acc, (x, y)| acc | (x ^ y))
            == 0
    }

    fn ct_select(&self, other: &Self, condition: u8) -> Self {
        let mask = mask_u16(condition);

        FieldElement(std::array::from_fn(|i| {
            self.0[i] ^ ((self.0[i] ^ other.0[i]) & mask)
        }))
    }
}

/// Field element addition.
///
/// Limb-wise addition with carry propagation. Bit 255 of both operands is
/// folded into limb 0 as `·19`. The output is **not** reduced.
impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let a = &self.0;
        let b = &rhs.0;
        let mut r = [0i64; 16];

        let mut v = ((a[15] >> 15) as i64 + (b[15] >> 15) as i64) * 19 + a[0] as i64 + b[0] as i64;
        r[0] = v & 0xffff;

        for i in 1..15 {
            v = (v >> 16) + a[i] as i64 + b[i] as i64;
            r[i] = v & 0xffff;
        }

        r[15] = (v >> 16) + (a[15] & 0x7fff) as i64 + (b[15] & 0x7fff) as i64;

        fold_top(r)
    }
}

/// Field element subtraction.
///
/// Every limb is biased before the difference is taken so that no
/// intermediate value is negative. The biases sum to exactly `p`. The output
/// is **not** reduced.
impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let a = &self.0;
        let b = &rhs.0;
        let mut r = [0i64; 16];

        let mut v = 0x8_0000 + ((a[15] >> 15) as i64 - (b[15] >> 15) as i64 - 1) * 19
            + a[0] as i64
            - b[0] as i64;
        r[0] = v & 0xffff;

        for i in 1..15 {
            v = (v >> 16) + 0x7_fff8 + a[i] as i64 - b[i] as i64;
            r[i] = v & 0xffff;
        }

        r[15] = (v >> 16) + 0x7ff8 + (a[15] & 0x7fff) as i64 - (b[15] & 0x7fff) as i64;

        fold_top(r)
    }
}

/// Field element multiplication.
///
/// Karatsuba-style: three 8×8 schoolbook products over the low half, the
/// high half and the sum of halves, recombined with the folding factor 38
/// and reduced. Inputs need not be reduced; the output is.
impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let (a_lo, a_hi, a_sum) = halves(&self.0);
        let (b_lo, b_hi, b_sum) = halves(&rhs.0);

        let x = mul8h(&a_hi, &b_hi);
        let z = mul8h(&a_lo, &b_lo);
        let y = mul8h(&a_sum, &b_sum);

        karatsuba_fold(&x, &y, &z)
    }
}
