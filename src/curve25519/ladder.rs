//! Montgomery ladder on Curve25519.
//!
//! The curve is
//!
//! ```text
//! y² = x³ + 486662·x² + x   over 𝔽ₚ, p = 2²⁵⁵ − 19
//! ```
//!
//! Points are handled in projective `(X : Z)` form, x-coordinate only. The
//! point at infinity is `(1 : 0)`.
//!
//! The building blocks follow the usual differential formulas:
//!
//! - [`mont_prep`] turns `(X : Z)` into the pair `(X + Z, X − Z)`,
//! - [`mont_add`] computes `X(P + Q)` from the prepared forms of `P` and `Q`
//!   and the affine `X(P − Q)`,
//! - [`mont_dbl`] computes `X(2Q)` from the prepared form of `Q`.
//!
//! [`scalar_mult`] chains them over all 256 bits of a scalar with a fixed
//! sequence of field operations per bit. The signature verifier reuses the
//! same blocks for its three-track ladder.

use super::constants::{A, A24, BASE_R2Y, C1, C9, C486671, C39420360};
use super::field::FieldElement;

/// A curve point in projective x-only coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    /// Projective X.
    pub x: FieldElement,
    /// Projective Z.
    pub z: FieldElement,
}

impl ProjectivePoint {
    /// The point at infinity, `(1 : 0)`.
    pub const IDENTITY: Self = ProjectivePoint {
        x: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Lifts an affine x-coordinate to `(x : 1)`.
    pub const fn from_affine(x: FieldElement) -> Self {
        ProjectivePoint {
            x,
            z: FieldElement::ONE,
        }
    }

    /// Returns the affine x-coordinate `X · Z⁻¹`.
    ///
    /// The point at infinity maps to 0.
    pub fn to_affine(&self) -> FieldElement {
        self.x * self.z.invert()
    }

    /// Constant-time conditional swap of two points.
    pub fn swap(&mut self, rhs: &mut Self, condition: u8) {
        self.x.swap(&mut rhs.x, condition);
        self.z.swap(&mut rhs.z, condition);
    }
}

/// Output of [`scalar_mult`].
#[derive(Clone, Copy, Debug)]
pub struct LadderOutput {
    /// Affine x-coordinate of `k·B`.
    pub x: FieldElement,
    /// `(k + 1)·B` in projective form.
    pub companion: ProjectivePoint,
}

/// The base point x-coordinate, 9.
pub const fn base_point() -> FieldElement {
    C9
}

/// Returns `(X + Z, X − Z)`.
#[inline]
pub fn mont_prep(p: &ProjectivePoint) -> (FieldElement, FieldElement) {
    (p.x + p.z, p.x - p.z)
}

/// Differential addition.
///
/// With `X(P) = (t1 + t2)/(t1 − t2)`, `X(Q) = (t3 + t4)/(t3 − t4)` and
/// `X(P − Q) = dx`, returns `P + Q`.
#[inline]
pub fn mont_add(
    t1: FieldElement,
    t2: FieldElement,
    t3: FieldElement,
    t4: FieldElement,
    dx: &FieldElement,
) -> ProjectivePoint {
    let ax = t2 * t3;
    let az = t1 * t4;

    let sum = ax + az;
    let diff = ax - az;

    ProjectivePoint {
        x: sum.square(),
        z: diff.square() * *dx,
    }
}

/// Doubling.
///
/// With `X(Q) = (t3 + t4)/(t3 − t4)`, returns `2Q`.
#[inline]
pub fn mont_dbl(t3: FieldElement, t4: FieldElement) -> ProjectivePoint {
    let t1 = t3.square();
    let t2 = t4.square();

    let x = t1 * t2;
    let t2 = t1 - t2;
    let z = (t1 + t2.mul_small(A24)) * t2;

    ProjectivePoint { x, z }
}

/// Computes the curve right-hand side `x³ + A·x² + x`.
pub fn x_to_y2(x: &FieldElement) -> FieldElement {
    let t = x.square() + x.mul_small(A) + C1;
    t * *x
}

/// Scalar multiplication by Montgomery ladder.
///
/// Walks the 256 bits of `k` (little-endian) from the most significant
/// down. The scalar is used as-is: clamping is the caller's business.
///
/// The pair `(R0, R1)` starts as `(∞, B)` and keeps `R1 − R0 = B`. For each
/// bit the operands are swapped into place by mask, the step
/// `R_{1−b} ← R0 + R1`, `R_b ← 2·R_b` is executed, and the swap is undone
/// (the undo is merged with the next bit's swap).
pub fn scalar_mult(k: &[u8; 32], base_x: &FieldElement) -> LadderOutput {
    let dx = *base_x;

    let mut r0 = ProjectivePoint::IDENTITY;
    let mut r1 = ProjectivePoint::from_affine(dx);

    let mut swap = 0u8;

    for pos in (0..256).rev() {
        let bit = (k[pos >> 3] >> (pos & 7)) & 1;
        let choice = bit ^ 1;

        // after the swap, r0 is the slot receiving the sum and r1 the one
        // being doubled
        swap ^= choice;
        r0.swap(&mut r1, swap);
        swap = choice;

        let (t1, t2) = mont_prep(&r0);
        let (t3, t4) = mont_prep(&r1);

        r0 = mont_add(t1, t2, t3, t4, &dx);
        r1 = mont_dbl(t3, t4);
    }

    r0.swap(&mut r1, swap);

    LadderOutput {
        x: r0.to_affine(),
        companion: r1,
    }
}

/// Recovers `−Py` for `P = k·G` from the ladder output.
///
/// `companion` must be `P + G` as returned by [`scalar_mult`] on the base
/// point. Uses the addition law
///
/// ```text
/// X(P + G) = ((Py − Gy) / (Px − Gx))² − A − Px − Gx
/// ```
///
/// solved for the cross term `2·Py·Gy`.
pub fn negated_y(px: &FieldElement, companion: &ProjectivePoint) -> FieldElement {
    let py2 = x_to_y2(px);
    let qx = companion.to_affine();

    let t2 = qx + *px + C486671; //         Qx + Px + Gx + A
    let dx = *px - C9; //                   Px - Gx
    let t3 = dx.square(); //                (Px - Gx)^2

    let dx = t2 * t3 - py2 - C39420360; //  -2 Py Gy

    dx * BASE_R2Y
}
