// -*- mode: rust; -*-
//
// This file is part of ed25519.

//! The 64-byte detached signature format.

#![allow(non_snake_case)]

use core::fmt::Debug;

use edwards25519::CompressedEdwardsY;
use edwards25519::Scalar;

use crate::constants::SIGNATURE_LENGTH;
use crate::errors::*;

/// An ed25519 signature: the encoded nonce commitment \\(R\\) followed
/// by the response scalar \\(s\\), each 32 bytes.
///
/// Signatures are detached — the message is not embedded.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// The compressed nonce commitment \\( R = rB \\).
    pub(crate) R: CompressedEdwardsY,
    /// The response \\( s = k a + r \bmod \ell \\), always canonical.
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Signature {{ R: {:?}, s: {:?} }}", &self.R, &self.s)
    }
}

impl Signature {
    /// Serialize as `R || s`.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(self.R.as_bytes());
        bytes[32..].copy_from_slice(self.s.as_bytes());
        bytes
    }

    /// Parse a signature from `R || s`.
    ///
    /// The scalar half must be a canonical encoding — an integer
    /// strictly below \\( \ell \\).  Accepting anything wider would let
    /// a third party republish a valid \\((R, s)\\) as the distinct but
    /// equally-valid \\((R, s + \ell)\\), a malleability the protocol
    /// rules out.  The `R` half is only validated later, during
    /// verification.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError(ErrorKind::WrongLength {
                of: "Signature",
                expected: SIGNATURE_LENGTH,
            }));
        }
        let (R_half, s_half) = bytes.split_at(32);

        let mut R_bytes = [0u8; 32];
        R_bytes.copy_from_slice(R_half);
        let mut s_bytes = [0u8; 32];
        s_bytes.copy_from_slice(s_half);

        let s = Scalar::from_canonical_bytes(s_bytes)
            .ok_or(SignatureError(ErrorKind::ScalarOutOfRange))?;

        Ok(Signature {
            R: CompressedEdwardsY(R_bytes),
            s,
        })
    }
}
