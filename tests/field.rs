use kcdsa25519::curve25519::ConstantTime;
use kcdsa25519::curve25519::constants::{BASE_2Y, BASE_R2Y, C9, C39420360};
use kcdsa25519::curve25519::field::FieldElement;

fn hex32(s: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16).unwrap();
    }
    out
}

fn small(value: u32) -> FieldElement {
    FieldElement::from_u32(value)
}

fn p_bytes() -> [u8; 32] {
    hex32("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f")
}

#[test]
fn field_small_product() {
    let r = small(123) * small(456);

    let mut expected = [0u8; 32];
    expected[0] = 0x18;
    expected[1] = 0xdb;

    assert_eq!(r.to_bytes(), expected);
}

#[test]
fn field_bytes_roundtrip_of_canonical_value() {
    let bytes = hex32("0b309fc04ed9b3c1719eab3e84fa0887aaf2b964865011e6fadd2f51a946a209");
    assert_eq!(FieldElement::from_bytes(&bytes).to_bytes(), bytes);
}

#[test]
fn field_reduce_p_is_zero() {
    let p = FieldElement::from_bytes(&p_bytes());

    assert!(p.is_overflow());
    assert!(p.is_zero());
    assert_eq!(p.to_bytes(), [0u8; 32]);
}

#[test]
fn field_reduce_wraps_values_above_p() {
    let mut bytes = p_bytes();
    bytes[0] += 5;

    let mut expected = [0u8; 32];
    expected[0] = 5;

    assert_eq!(FieldElement::from_bytes(&bytes).to_bytes(), expected);

    // 2^256 - 1 = 2p + 37
    let all_ones = FieldElement::from_limbs([0xffff; 16]);
    let mut expected = [0u8; 32];
    expected[0] = 37;

    assert!(all_ones.is_overflow());
    assert_eq!(all_ones.to_bytes(), expected);
}

#[test]
fn field_reduce_is_idempotent() {
    let samples = [
        FieldElement::from_limbs([0xffff; 16]),
        FieldElement::from_bytes(&p_bytes()),
        small(123) * small(456),
        BASE_2Y - BASE_R2Y,
        FieldElement::ZERO - FieldElement::ONE,
    ];

    for a in samples {
        let once = a.reduce();
        let twice = once.reduce();

        assert_eq!(once.limbs(), twice.limbs());
        assert!(!once.is_overflow());
    }
}

#[test]
fn field_is_overflow_boundary() {
    let mut p_minus_1 = p_bytes();
    p_minus_1[0] -= 1;

    assert!(!FieldElement::from_bytes(&p_minus_1).is_overflow());
    assert!(FieldElement::from_bytes(&p_bytes()).is_overflow());
    assert!(!FieldElement::ZERO.is_overflow());
}

#[test]
fn field_is_negative_is_parity() {
    assert_eq!(FieldElement::ONE.is_negative(), 1);
    assert_eq!(small(2).is_negative(), 0);

    // p - 1 is even
    let minus_one = (FieldElement::ZERO - FieldElement::ONE).reduce();
    assert_eq!(minus_one.is_negative(), 0);

    // non-reduced limbs holding p + 1 represent 1
    let mut bytes = p_bytes();
    bytes[0] += 1;
    assert_eq!(FieldElement::from_bytes(&bytes).is_negative(), 1);
}

#[test]
fn field_subtraction_underflow_wraps() {
    let minus_one = FieldElement::ZERO - FieldElement::ONE;

    let mut expected = p_bytes();
    expected[0] -= 1;

    assert_eq!(minus_one.to_bytes(), expected);
}

#[test]
fn field_add_sub_inverse() {
    let a = BASE_2Y;
    let b = BASE_R2Y;

    assert!(((a + b) - b).ct_eq(&a));
    assert!(((a - b) + b).ct_eq(&a));
    assert!((a - a).is_zero());

    // chained additions on non-reduced outputs
    let all_ones = FieldElement::from_limbs([0xffff; 16]);
    let sum = all_ones + all_ones + all_ones;
    assert!(sum.ct_eq(&small(111)));
}

#[test]
fn field_square_matches_mul() {
    let a = BASE_2Y + small(77);
    assert_eq!(a.square().limbs(), (a * a).limbs());

    let b = FieldElement::from_limbs([0xffff; 16]);
    assert_eq!(b.square().limbs(), (b * b).limbs());
}

#[test]
fn field_mul_small_matches_mul() {
    let a = BASE_2Y;

    for m in [1u32, 2, 121665, 486662] {
        assert!(a.mul_small(m).ct_eq(&(a * small(m))));
    }
}

#[test]
fn field_mul_small_one_reduces() {
    let p = FieldElement::from_bytes(&p_bytes());
    assert_eq!(p.mul_small(1).limbs(), [0u16; 16]);
}

#[test]
fn field_inverse() {
    let samples = [
        small(2),
        small(9),
        BASE_2Y,
        FieldElement::from_limbs([0xffff; 16]),
        FieldElement::ZERO - small(3),
    ];

    for a in samples {
        let inv = a.recip(false);
        assert!((a * inv).ct_eq(&FieldElement::ONE));
        assert!(inv.ct_eq(&a.invert()));
    }
}

#[test]
fn field_inverse_of_zero_is_zero() {
    assert!(FieldElement::ZERO.invert().is_zero());
}

#[test]
fn field_base_constants_are_inverses() {
    assert!((BASE_2Y * BASE_R2Y).ct_eq(&FieldElement::ONE));
}

#[test]
fn field_sqrt_of_squares() {
    let samples = [small(4), small(9), C39420360, BASE_2Y.square()];

    for u in samples {
        let r = u.sqrt();
        assert!(r.square().ct_eq(&u));
    }
}

#[test]
fn field_sqrt_of_base_point_y2() {
    // Gy^2 = 9^3 + 486662 * 9^2 + 9
    let gy2 = C9.square() * C9 + (C9.square()).mul_small(486662) + C9;
    assert!(gy2.ct_eq(&C39420360));

    let gy = gy2.sqrt();
    assert!((gy + gy).ct_eq(&BASE_2Y) || (gy + gy + BASE_2Y).is_zero());
}

#[test]
fn field_sqrt_of_non_residue_does_not_square_back() {
    let u = small(2);
    assert!(!u.sqrt().square().ct_eq(&u));
}

#[test]
fn field_conditional_swap() {
    let mut a = small(1);
    let mut b = small(2);

    a.swap(&mut b, 0);
    assert!(a.ct_eq(&small(1)));
    assert!(b.ct_eq(&small(2)));

    a.swap(&mut b, 1);
    assert!(a.ct_eq(&small(2)));
    assert!(b.ct_eq(&small(1)));
}

#[test]
fn field_select() {
    let a = small(10);
    let b = small(20);

    assert!(a.ct_select(&b, 0).ct_eq(&a));
    assert!(a.ct_select(&b, 1).ct_eq(&b));

    let mut c = a;
    c.conditional_assign(&b, 1);
    assert!(c.ct_eq(&b));
}
