use super::{Signature, SignatureError};
use crate::curve25519::constants::{BASE_2Y, C486671, C39420360};
use crate::curve25519::ct::{ConstantTime, eq_u32};
use crate::curve25519::field::FieldElement;
use crate::curve25519::ladder::{ProjectivePoint, base_point, mont_add, mont_dbl, mont_prep};
use crate::keys::PublicKey;

type Prepared = (FieldElement, FieldElement);

/// Picks `t[k]` for `k ∈ {0, 1, 2}` without indexing on `k`.
#[inline(always)]
fn select3(t: &[Prepared; 3], k: u32) -> Prepared {
    let (mut a, mut b) = t[0];

    for (n, (x, z)) in t.iter().enumerate().skip(1) {
        let hit = eq_u32(k, n as u32);
        a.conditional_assign(x, hit);
        b.conditional_assign(z, hit);
    }

    (a, b)
}

/// Picks `t[k & 1]` without indexing.
#[inline(always)]
fn select2(t: &[FieldElement; 2], k: u32) -> FieldElement {
    t[0].ct_select(&t[1], (k & 1) as u8)
}

/// Gray-codes `v` and `h` and derives the selector bytes of the mixed track.
///
/// Returns the per-byte selectors and the initial selector bit.
fn prepare_chain(v: &[u8; 32], h: &[u8; 32]) -> ([u8; 32], u32) {
    let mut d = [0u8; 32];
    let mut vi = 0u32;
    let mut hi = 0u32;
    let mut di = 0u32;
    let mut nvh = 0u32;

    for i in 0..32 {
        let vb = v[i] as u32;
        let hb = h[i] as u32;

        vi = (vi >> 8) ^ vb ^ (vb << 1);
        hi = (hi >> 8) ^ hb ^ (hb << 1);
        nvh = !(vi ^ hi);

        di = (nvh & ((di & 0x80) >> 7)) ^ vi;
        for bit in [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40] {
            di ^= nvh & ((di & bit) << 1);
        }

        d[i] = di as u8;
    }

    let first = ((nvh & ((di & 0x80) << 1)) ^ vi) >> 8;

    (d, first)
}

/// Computes `Y = v·|P| + h·G` and returns its packed x-coordinate.
///
/// The signature is valid if the caller's hash of `Y` matches the `r` sent
/// along with `v`.
///
/// ## Algorithm
///
/// `X(|P| + G)` and `X(|P| − G)` are rebuilt from `Px` with the curve
/// equation and the precomputed `Gy²`, `2·Gy`. Then three ladders run in
/// lockstep over the bits of `v` and `h`, most significant first:
///
/// - track 0 holds `(even)·P + (even)·G`,
/// - track 1 holds `(even)·P + (odd)·G` or `(odd)·P + (even)·G`, depending
///   on the current selector bit,
/// - track 2 holds `(odd)·P + (odd)·G`.
///
/// Each step doubles one track into track 0 and derives the other two by
/// differential addition, using `G`, `P` or `|P| ± G` as the difference.
/// Every operand is picked with a masked select.
///
/// # Errors
///
/// [`SignatureError::InvalidPublicKey`] if `P` is not on the curve or is
/// the base point.
pub fn verify(v: &Signature, h: &[u8; 32], public: &PublicKey) -> Result<PublicKey, SignatureError> {
    let point = public.validate()?;
    let v = v.to_bytes();

    let p = [base_point(), point.x];

    // (Py ∓ Gy)^2 = Py^2 + Gy^2 ∓ 2 Py Gy, ordered by the sign of the root
    let sum = point.y2 + C39420360;
    let cross = BASE_2Y * point.y;
    let mut n0 = sum - cross;
    let mut n1 = sum + cross;
    n0.swap(&mut n1, point.y.is_negative());

    let inv = (point.x - base_point()).square().invert();
    let s = [
        (n0 * inv - point.x - C486671).mul_small(1), // X(|P| + G)
        (n1 * inv - point.x - C486671).mul_small(1), //  X(|P| - G)
    ];

    let (d, first) = prepare_chain(&v, h);

    let mut tracks = [
        ProjectivePoint::IDENTITY,
        ProjectivePoint::from_affine(select2(&p, first)),
        ProjectivePoint::from_affine(s[0]),
    ];

    let mut vi = 0u32;
    let mut hi = 0u32;
    let mut di = first;

    for i in (0..32).rev() {
        vi = (vi << 8) | v[i] as u32;
        hi = (hi << 8) | h[i] as u32;
        di = (di << 8) | d[i] as u32;

        for j in (0..8).rev() {
            let prepared = [
                mont_prep(&tracks[0]),
                mont_prep(&tracks[1]),
                mont_prep(&tracks[2]),
            ];

            let k = (((vi ^ (vi >> 1)) >> j) & 1) + (((hi ^ (hi >> 1)) >> j) & 1);
            let (t3, t4) = select3(&prepared, k);
            let even = mont_dbl(t3, t4);

            let k = ((di >> j) & 2) ^ (((di >> j) & 1) << 1);
            let (t3, t4) = select3(&prepared, k);
            let (t1, t2) = prepared[1];
            let mixed = mont_add(t1, t2, t3, t4, &select2(&p, di >> j));

            let (t1, t2) = prepared[2];
            let (t3, t4) = prepared[0];
            let odd = mont_add(t1, t2, t3, t4, &select2(&s, ((vi ^ hi) >> j) >> 1));

            tracks = [even, mixed, odd];
        }
    }

    let k = (vi & 1) + (hi & 1);
    let coords = tracks.map(|t| (t.x, t.z));
    let (x, z) = select3(&coords, k);

    Ok(PublicKey::from_bytes(
        ProjectivePoint { x, z }.to_affine().to_bytes(),
    ))
}
