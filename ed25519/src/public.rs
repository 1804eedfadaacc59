// -*- mode: rust; -*-
//
// This file is part of ed25519.

//! Public keys and signature verification.

use core::fmt::Debug;
use core::hash::{Hash, Hasher};

use sha2::{Digest, Sha512};

use edwards25519::CompressedEdwardsY;
use edwards25519::EdwardsPoint;

use crate::constants::PUBLIC_KEY_LENGTH;
use crate::errors::*;
use crate::secret::{reduce_hash, ExpandedSecretKey, SecretKey};
use crate::signature::Signature;

/// An ed25519 public key.
///
/// Both representations are carried: the 32-byte encoding (the wire
/// identity of the key, used for hashing and comparison) and its
/// decoded curve point (used for arithmetic).  The two are kept
/// consistent by construction — the point is always the decoding of the
/// bytes.
#[derive(Copy, Clone)]
pub struct PublicKey {
    pub(crate) encoded: CompressedEdwardsY,
    pub(crate) point: EdwardsPoint,
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "PublicKey({:?})", self.encoded)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl PartialEq<PublicKey> for PublicKey {
    /// Keys compare by their encodings, which is how the protocol
    /// identifies them on the wire.
    fn eq(&self, other: &PublicKey) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for PublicKey {}

impl<'a> From<&'a SecretKey> for PublicKey {
    /// The public key belonging to a seed.
    fn from(secret_key: &'a SecretKey) -> PublicKey {
        PublicKey::from(&ExpandedSecretKey::from(secret_key))
    }
}

impl<'a> From<&'a ExpandedSecretKey> for PublicKey {
    /// The public key belonging to an expanded signing key: the fixed-
    /// base multiple of the clamped scalar.
    fn from(expanded: &'a ExpandedSecretKey) -> PublicKey {
        let point = EdwardsPoint::mul_base(&expanded.scalar);
        PublicKey {
            encoded: point.compress(),
            point,
        }
    }
}

impl PublicKey {
    /// Copy out the 32-byte encoding.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.encoded.to_bytes()
    }

    /// Borrow the 32-byte encoding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.encoded.as_bytes()
    }

    /// Parse a public key from its encoding.
    ///
    /// Fails on a wrong-length slice and on bytes that do not decode to
    /// a curve point (an unreduced y-coordinate, or a y with no
    /// matching x).
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, SignatureError> {
        let encoded_bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            SignatureError(ErrorKind::WrongLength {
                of: "PublicKey",
                expected: PUBLIC_KEY_LENGTH,
            })
        })?;

        let encoded = CompressedEdwardsY(encoded_bytes);
        let point = encoded
            .decompress()
            .ok_or(SignatureError(ErrorKind::PointDecoding))?;

        Ok(PublicKey { encoded, point })
    }

    /// Check a signature over `message` against this key.
    ///
    /// The signature equation \\( sB = R + kA \\) is checked in the
    /// rearranged form \\( R = sB + k(-A) \\): the right-hand side is
    /// evaluated with the variable-time double-base multiplication
    /// (everything here is public) and its encoding compared against
    /// the `R` the signer committed to.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        let challenge = reduce_hash(
            Sha512::new()
                .chain_update(signature.R.as_bytes())
                .chain_update(self.as_bytes())
                .chain_update(message),
        );

        let recomputed = EdwardsPoint::vartime_double_scalar_mul_basepoint(
            &challenge,
            &-self.point,
            &signature.s,
        );

        if recomputed.compress() == signature.R {
            Ok(())
        } else {
            Err(SignatureError(ErrorKind::Verification))
        }
    }
}
