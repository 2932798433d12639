use kcdsa25519::keys::{
    BASE, KeyError, PrivateKey, PublicKey, SigningKey, agree, clamp, keygen,
};

fn hex32(s: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16).unwrap();
    }
    out
}

const ALICE_PRIVATE: &str = "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a";
const ALICE_PUBLIC: &str = "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a";
const BOB_PRIVATE: &str = "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb";
const BOB_PUBLIC: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";
const SHARED: &str = "4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742";

#[test]
fn clamp_invariants() {
    for seed in [[0u8; 32], [0xff; 32], hex32(ALICE_PRIVATE)] {
        let mut k = seed;
        clamp(&mut k);

        assert_eq!(k[0] & 7, 0);
        assert_eq!(k[31] & 0x80, 0);
        assert_eq!(k[31] & 0x40, 0x40);
        assert_eq!(k[1..31], seed[1..31]);
    }
}

#[test]
fn private_key_is_clamped() {
    let private = PrivateKey::from_bytes(&[0xff; 32]);
    let bytes = private.to_bytes();

    assert_eq!(bytes[0], 0xf8);
    assert_eq!(bytes[31], 0x7f);
}

#[test]
fn keygen_rfc7748_public_keys() {
    let alice = keygen(&hex32(ALICE_PRIVATE));
    let bob = keygen(&hex32(BOB_PRIVATE));

    assert_eq!(alice.public.to_bytes(), hex32(ALICE_PUBLIC));
    assert_eq!(bob.public.to_bytes(), hex32(BOB_PUBLIC));
}

#[test]
fn keygen_known_signing_key() {
    let alice = keygen(&hex32(ALICE_PRIVATE));

    assert_eq!(
        alice.private.to_bytes(),
        hex32("70076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c6a")
    );
    assert_eq!(
        alice.signing.to_bytes(),
        hex32("6b6e66c8d3d4235a149fb47be7fdab616049d7d29763f826c41c064def3db709")
    );
}

#[test]
fn keygen_signing_key_is_reduced() {
    for seed in [[1u8; 32], [0x80; 32], hex32(BOB_PRIVATE)] {
        let pair = keygen(&seed);
        let s = pair.signing.to_bytes();

        // q = 2^252 + ..., so anything in [0, q) has a top byte of at most 0x10
        assert!(s[31] <= 0x10);
        assert_ne!(s, [0u8; 32]);
    }
}

#[test]
fn public_key_matches_keygen() {
    for seed in [[3u8; 32], [0xa5; 32], hex32(ALICE_PRIVATE)] {
        let pair = keygen(&seed);
        assert_eq!(pair.private.public_key(), pair.public);
    }
}

#[test]
fn keygen_is_deterministic() {
    let a = keygen(&[42u8; 32]);
    let b = keygen(&[42u8; 32]);

    assert_eq!(a.public, b.public);
    assert_eq!(a.signing.to_bytes(), b.signing.to_bytes());
}

#[test]
fn agree_rfc7748_shared_secret() {
    let alice = PrivateKey::from_bytes(&hex32(ALICE_PRIVATE));
    let bob = PrivateKey::from_bytes(&hex32(BOB_PRIVATE));

    let alice_shared = agree(&alice, &PublicKey::from_bytes(hex32(BOB_PUBLIC)));
    let bob_shared = agree(&bob, &PublicKey::from_bytes(hex32(ALICE_PUBLIC)));

    assert_eq!(alice_shared, hex32(SHARED));
    assert_eq!(bob_shared, hex32(SHARED));
}

#[test]
fn agree_with_generated_keys() {
    let alice = keygen(&[7u8; 32]);
    let bob = keygen(&[9u8; 32]);

    assert_eq!(
        agree(&alice.private, &bob.public),
        agree(&bob.private, &alice.public)
    );
}

#[test]
fn agree_ignores_top_bit_of_peer() {
    let alice = PrivateKey::from_bytes(&hex32(ALICE_PRIVATE));

    let mut peer = hex32(BOB_PUBLIC);
    peer[31] |= 0x80;

    assert_eq!(agree(&alice, &PublicKey::from_bytes(peer)), hex32(SHARED));
}

#[test]
fn generated_public_keys_are_valid() {
    for seed in [[1u8; 32], [2u8; 32], hex32(ALICE_PRIVATE), hex32(BOB_PRIVATE)] {
        assert!(keygen(&seed).public.is_valid());
    }
}

#[test]
fn base_point_is_not_a_valid_public_key() {
    assert!(!BASE.is_valid());
}

#[test]
fn twist_point_is_not_a_valid_public_key() {
    // 2^3 + 486662 * 2^2 + 2 is not a square
    let mut x = [0u8; 32];
    x[0] = 2;

    assert!(!PublicKey::from_bytes(x).is_valid());
}

#[test]
fn order_two_point_is_not_a_valid_public_key() {
    // x = 0 and its unreduced encoding x = p
    let p = hex32("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");

    assert!(!PublicKey::from_bytes([0u8; 32]).is_valid());
    assert!(!PublicKey::from_bytes(p).is_valid());
}

#[test]
fn key_types_from_slices() {
    let bytes = hex32(ALICE_PUBLIC);

    let public = PublicKey::try_from(&bytes[..]).unwrap();
    assert_eq!(public.to_bytes(), bytes);

    let signing = SigningKey::try_from(&bytes[..]).unwrap();
    assert_eq!(signing.to_bytes(), bytes);

    let private = PrivateKey::try_from(&hex32(ALICE_PRIVATE)[..]).unwrap();
    assert_eq!(private.to_bytes(), keygen(&hex32(ALICE_PRIVATE)).private.to_bytes());

    assert_eq!(
        PublicKey::try_from(&bytes[..31]).unwrap_err(),
        KeyError::InvalidLength
    );
    assert!(PrivateKey::try_from(&[0u8; 33][..]).is_err());
    assert!(SigningKey::try_from(&[0u8; 0][..]).is_err());
}
