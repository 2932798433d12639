//! Curve and group constants.
//!
//! Field constants are stored as limb arrays (least significant limb first),
//! group constants as 32-byte little-endian integers.

use super::field::FieldElement;

/// Montgomery coefficient `A` of `y² = x³ + A·x² + x`.
pub const A: u32 = 486662;

/// `(A − 2) / 4`, the doubling constant of the ladder.
pub const A24: u32 = 121665;

/// The field element 1.
pub const C1: FieldElement = FieldElement::ONE;

/// The base point x-coordinate, 9.
pub const C9: FieldElement = FieldElement::from_u32(9);

/// `A + 9`, i.e. `A + Gx`.
pub const C486671: FieldElement = FieldElement::from_u32(486671);

/// `Gy²`.
pub const C39420360: FieldElement = FieldElement::from_u32(39420360);

/// `2·Gy`, where `Gy` is the even square root of `Gy²`.
pub const BASE_2Y: FieldElement = FieldElement::from_limbs([
    22587, 610, 29883, 44076, 15515, 9479, 25859, 56197, 23910, 4462, 17831, 16322, 62102, 36542,
    52412, 16035,
]);

/// `(2·Gy)⁻¹`.
pub const BASE_R2Y: FieldElement = FieldElement::from_limbs([
    5744, 16384, 61977, 54121, 8776, 18501, 26522, 34893, 23833, 5823, 55924, 58749, 24147, 14085,
    13606, 6080,
]);

/// Base point x-coordinate as packed bytes.
pub const BASE_POINT: [u8; 32] = {
    let mut bytes = [0u8; 32];
    bytes[0] = 9;
    bytes
};

/// The group order `q = 2^252 + 27742317777372353535851937790883648493`.
pub const ORDER: [u8; 32] = [
    237, 211, 245, 92, 26, 99, 18, 88, 214, 156, 247, 162, 222, 249, 222, 20, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 16,
];

/// `8·q`, the full curve order.
pub const ORDER_TIMES_8: [u8; 32] = [
    104, 159, 174, 231, 210, 24, 147, 192, 178, 230, 188, 23, 245, 206, 247, 166, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 128,
];
