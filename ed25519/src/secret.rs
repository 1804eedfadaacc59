// -*- mode: rust; -*-
//
// This file is part of ed25519.

//! Secret key material: the seed, and the signing state expanded from
//! it.

use core::fmt::Debug;

use rand_core::{CryptoRng, RngCore};

use sha2::{Digest, Sha512};

use zeroize::Zeroize;

use edwards25519::EdwardsPoint;
use edwards25519::Scalar;

use crate::constants::SECRET_KEY_LENGTH;
use crate::errors::*;
use crate::public::PublicKey;
use crate::signature::Signature;

/// An EdDSA secret key: 32 uniformly random seed bytes.  Everything
/// else — the signing scalar and the nonce prefix — is re-derived from
/// the seed on demand.
///
/// The seed is wiped from memory when the key is dropped.
pub struct SecretKey(pub(crate) [u8; SECRET_KEY_LENGTH]);

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize()
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "SecretKey: {:?}", &self.0[..])
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl SecretKey {
    /// Copy out the seed bytes.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0
    }

    /// Borrow the seed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Build a `SecretKey` from a seed slice, which must be exactly
    /// [`SECRET_KEY_LENGTH`] bytes.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, SignatureError> {
        let seed: [u8; SECRET_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            SignatureError(ErrorKind::WrongLength {
                of: "SecretKey",
                expected: SECRET_KEY_LENGTH,
            })
        })?;
        Ok(SecretKey(seed))
    }

    /// Draw a fresh seed from `csprng`.
    ///
    /// Key generation is the one place this crate consumes randomness,
    /// and an RNG that cannot deliver is reported as an error instead
    /// of silently producing a predictable key.
    pub fn generate<R>(csprng: &mut R) -> Result<SecretKey, SignatureError>
    where
        R: CryptoRng + RngCore,
    {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        csprng
            .try_fill_bytes(&mut seed)
            .map_err(|_| SignatureError(ErrorKind::Rng))?;
        Ok(SecretKey(seed))
    }
}

/// The signing state derived from a seed: SHA-512 of the seed, split in
/// half.  The lower half becomes the signing scalar after clamping; the
/// upper half is the `prefix` mixed into every per-message nonce.
///
/// Both halves are wiped on drop.
pub(crate) struct ExpandedSecretKey {
    pub(crate) scalar: Scalar,
    pub(crate) prefix: [u8; 32],
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
        self.prefix.zeroize()
    }
}

impl<'a> From<&'a SecretKey> for ExpandedSecretKey {
    fn from(secret_key: &'a SecretKey) -> ExpandedSecretKey {
        let digest = Sha512::digest(secret_key.as_bytes());
        let (scalar_half, prefix_half) = digest.split_at(32);

        let mut scalar_bytes = [0u8; 32];
        scalar_bytes.copy_from_slice(scalar_half);
        let mut prefix = [0u8; 32];
        prefix.copy_from_slice(prefix_half);

        ExpandedSecretKey {
            scalar: Scalar::from_bits_clamped(scalar_bytes),
            prefix,
        }
    }
}

impl ExpandedSecretKey {
    /// Produce an EdDSA signature over `message`.
    ///
    /// The nonce is deterministic — SHA-512 of the secret prefix and
    /// the message, reduced mod \\( \ell \\) — so signing never touches
    /// an RNG.  Every step involving the scalar, the nonce, or the
    /// response runs in constant time.
    pub(crate) fn sign(&self, message: &[u8], public: &PublicKey) -> Signature {
        let nonce = reduce_hash(Sha512::new().chain_update(self.prefix).chain_update(message));
        let commitment = EdwardsPoint::mul_base(&nonce).compress();

        let challenge = reduce_hash(
            Sha512::new()
                .chain_update(commitment.as_bytes())
                .chain_update(public.as_bytes())
                .chain_update(message),
        );

        let response = &(&challenge * &self.scalar) + &nonce;

        Signature {
            R: commitment,
            s: response,
        }
    }
}

/// Finish a SHA-512 computation and reduce the 64-byte digest into a
/// scalar.
pub(crate) fn reduce_hash(hash: Sha512) -> Scalar {
    let mut wide = [0u8; 64];
    wide.copy_from_slice(hash.finalize().as_slice());
    Scalar::from_bytes_mod_order_wide(&wide)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expansion_applies_the_clamp() {
        let secret = SecretKey::from_bytes(&[0x42u8; 32][..]).unwrap();
        let expanded = ExpandedSecretKey::from(&secret);
        let bytes = expanded.scalar.to_bytes();

        // Multiple of eight, fixed bit length.
        assert_eq!(bytes[0] & 0b0000_0111, 0);
        assert_eq!(bytes[31] >> 6, 0b01);
    }

    #[test]
    fn public_key_agrees_across_derivation_paths() {
        let secret = SecretKey::from_bytes(&[0x1fu8; 32][..]).unwrap();

        let direct = PublicKey::from(&secret);
        let via_expansion = PublicKey::from(&ExpandedSecretKey::from(&secret));
        assert_eq!(direct, via_expansion);
    }

    #[test]
    fn seed_length_is_enforced() {
        assert!(SecretKey::from_bytes(&[0u8; 31]).is_err());
        assert!(SecretKey::from_bytes(&[0u8; 33]).is_err());
        assert!(SecretKey::from_bytes(&[0u8; 32]).is_ok());
    }
}
