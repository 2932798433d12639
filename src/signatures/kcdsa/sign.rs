use super::{Signature, SignatureError};
use crate::curve25519::bignum::{divmod, mula_small, mula32, reduce_mod_order};
use crate::curve25519::constants::ORDER;
use crate::keys::{PrivateKey, SigningKey};

/// Computes the signature value `v = (x − h)·s mod q`.
///
/// # Parameters
///
/// - `h`: signature hash (message, signature public key and context data)
/// - `x`: per-signature private key (the nonce)
/// - `s`: signing key of the signer
///
/// # Errors
///
/// [`SignatureError::Degenerate`] when `v` is zero, i.e. `x ≡ h (mod q)`.
/// The caller must retry with another `x` or `h`.
pub fn sign(h: &[u8; 32], x: &PrivateKey, s: &SigningKey) -> Result<Signature, SignatureError> {
    let h = reduce_mod_order(h);
    let x = reduce_mod_order(&x.to_bytes());

    // v = x - h, plus q on underflow
    let mut v = x;
    let borrow = mula_small(&mut v, 0, &h, -1);
    mula_small(&mut v, 0, &ORDER, -borrow);

    let mut product = [0u8; 64];
    mula32(&mut product, &v, &s.to_bytes(), 1);

    let mut quotient = [0u8; 64];
    divmod(&mut quotient, &mut product, 64, &ORDER, 32);

    let mut out = [0u8; 32];
    out.copy_from_slice(&product[..32]);

    if out.iter().fold(0u8, |acc, b| acc | b) == 0 {
        log::debug!("sign: degenerate signature value, nonce must be resampled");
        return Err(SignatureError::Degenerate);
    }

    Ok(Signature(out))
}
