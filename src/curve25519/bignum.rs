//! Radix-2⁸ big-integer arithmetic modulo the group order.
//!
//! Integers are little-endian byte buffers: `[u8; 32]` for scalars and
//! `[u8; 64]` for products and scratch space. These routines back the
//! scalar side of the signature scheme:
//!
//! - reduction modulo `q` (`divmod`),
//! - the product `(x − h)·s` (`mula32`),
//! - the signing-scalar inverse `k⁻¹ mod q` (`egcd32`).
//!
//! ## Timing
//!
//! `mula_small`, `mula32` and `divmod` run a number of iterations fixed by
//! their length arguments. `egcd32` is a Euclidean algorithm and its running
//! time depends on the values of its inputs. It is only used during key
//! generation.

use std::fmt::{Display, Formatter, Result as FmtResult};

use super::constants::ORDER;

/// Errors raised by the bignum engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BignumError {
    /// The value to invert has no significant bytes.
    DivisionByZero,
}

impl Display for BignumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BignumError::DivisionByZero => f.write_str("division by zero"),
        }
    }
}

impl std::error::Error for BignumError {}

/// Multiply-accumulate by a small signed integer.
///
/// Computes `p[offset..offset + x.len()] += z · x` byte by byte and returns
/// the final carry (or borrow, when negative).
///
/// `z · 255` plus the running carry must fit in an `i32`.
pub fn mula_small(p: &mut [u8], offset: usize, x: &[u8], z: i32) -> i32 {
    let mut v = 0i32;

    for (i, &xi) in x.iter().enumerate() {
        v += p[offset + i] as i32 + z * xi as i32;
        p[offset + i] = v as u8;
        v >>= 8;
    }

    v
}

/// Accumulates `z · x · y` into `p`.
///
/// `x` is 32 bytes, `y` is `y.len()` bytes, and `p` must hold at least
/// `32 + y.len()` bytes. `z` is a small signed integer (±1 in practice).
/// Returns the carry out of byte `y.len() + 31`.
pub fn mula32(p: &mut [u8], x: &[u8], y: &[u8], z: i32) -> i32 {
    const N: usize = 31;

    debug_assert!(x.len() >= 32);
    debug_assert!(p.len() >= 32 + y.len());

    let mut w = 0i32;

    for (i, &yi) in y.iter().enumerate() {
        let zy = z * yi as i32;
        w += mula_small(p, i, &x[..N], zy) + p[i + N] as i32 + zy * x[N] as i32;
        p[i + N] = w as u8;
        w >>= 8;
    }

    let t = y.len();
    p[t + N] = (w + p[t + N] as i32) as u8;

    w >> 8
}

/// Schoolbook long division.
///
/// Divides `r[0..n)` by `d[0..t)`. The quotient (`n − t + 1` bytes) is
/// written to `q`; the remainder is left in `r[0..t)` and the bytes of `r`
/// above it are cleared.
///
/// Requires `t > 0` and `d[t − 1] != 0`.
///
/// Each step estimates the next quotient byte from the top two bytes of the
/// divisor, subtracts, and adds the divisor back once if the estimate was
/// one too large.
pub fn divmod(q: &mut [u8], r: &mut [u8], n: usize, d: &[u8], t: usize) {
    debug_assert!(t > 0 && d[t - 1] != 0);

    let d = &d[..t];

    let mut rn = 0i32;
    let mut dt = (d[t - 1] as i32) << 8;
    if t > 1 {
        dt |= d[t - 2] as i32;
    }

    let mut n = n;
    while n >= t {
        n -= 1;

        let mut z = (rn << 16) | ((r[n] as i32) << 8);
        if n > 0 {
            z |= r[n - 1] as i32;
        }

        let i = n + 1 - t;
        z /= dt;

        rn += mula_small(r, i, d, -z);
        q[i] = (z + rn) as u8;

        // rn is 0, or -1 after an underflow
        mula_small(r, i, d, -rn);

        rn = r[n] as i32;
        r[n] = 0;
    }

    r[t - 1] = rn as u8;
}

/// Returns the number of significant bytes among the first `n` of `x`.
pub fn numsize(x: &[u8], n: usize) -> usize {
    x[..n].iter().rposition(|&b| b != 0).map_or(0, |i| i + 1)
}

/// Extended Euclidean algorithm on 32-byte integers.
///
/// Returns the inverse of `a` modulo `b` as a 32-byte **signed**
/// (two's-complement) value: callers add `b` when bit 255 is set.
///
/// Both inputs are used as scratch space and hold the final remainders on
/// return. Variable-time.
///
/// # Errors
///
/// [`BignumError::DivisionByZero`] if `a` is zero.
pub fn egcd32(a: &mut [u8; 32], b: &mut [u8; 32]) -> Result<[u8; 32], BignumError> {
    let mut x = [0u8; 64];
    let mut y = [0u8; 64];
    let mut temp = [0u8; 32];

    x[0] = 1;

    let mut an = numsize(&a[..], 32);
    if an == 0 {
        log::warn!("egcd32: attempted to invert zero");
        return Err(BignumError::DivisionByZero);
    }

    let mut bn: usize = 32;

    loop {
        let qn = (bn + 1).saturating_sub(an);
        divmod(&mut temp, &mut b[..], bn, &a[..], an);
        bn = numsize(&b[..], bn);
        if bn == 0 {
            return Ok(first_32(&x));
        }
        mula32(&mut y, &x, &temp[..qn], -1);

        let qn = (an + 1).saturating_sub(bn);
        divmod(&mut temp, &mut a[..], an, &b[..], bn);
        an = numsize(&a[..], an);
        if an == 0 {
            return Ok(first_32(&y));
        }
        mula32(&mut x, &y, &temp[..qn], -1);
    }
}

fn first_32(buf: &[u8; 64]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&buf[..32]);
    out
}

/// Reduces a 32-byte integer modulo the group order `q`.
pub fn reduce_mod_order(x: &[u8; 32]) -> [u8; 32] {
    let mut r = *x;
    let mut quotient = [0u8; 32];

    divmod(&mut quotient, &mut r, 32, &ORDER, 32);

    r
}

/// Computes `a⁻¹ mod q`, as a value in `[0, q)`.
///
/// # Errors
///
/// [`BignumError::DivisionByZero`] if `a` is zero.
pub fn inverse_mod_order(a: &[u8; 32]) -> Result<[u8; 32], BignumError> {
    let mut a = *a;
    let mut order = ORDER;

    let mut inverse = egcd32(&mut a, &mut order)?;

    if inverse[31] & 0x80 != 0 {
        mula_small(&mut inverse, 0, &ORDER, 1);
    }

    Ok(inverse)
}
