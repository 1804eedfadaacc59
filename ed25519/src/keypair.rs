// -*- mode: rust; -*-
//
// This file is part of ed25519.

//! A secret/public key pair.

use core::fmt::Debug;

use rand_core::{CryptoRng, RngCore};

use crate::constants::{KEYPAIR_LENGTH, SECRET_KEY_LENGTH};
use crate::errors::*;
use crate::public::PublicKey;
use crate::secret::{ExpandedSecretKey, SecretKey};
use crate::signature::Signature;

/// An ed25519 keypair.
///
/// Serialized as 64 bytes — seed then public key.  Carrying the public
/// half next to the seed is redundant but deliberate: signing needs the
/// public key bytes in its challenge hash, and storing them beats
/// recomputing a fixed-base multiplication on every signature.
pub struct Keypair {
    /// The seed half.
    pub secret: SecretKey,
    /// The public half.
    pub public: PublicKey,
}

impl Debug for Keypair {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Keypair({:?})", self.public)
    }
}

impl Keypair {
    /// Serialize as seed followed by public key bytes.
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes = [0u8; KEYPAIR_LENGTH];
        bytes[..SECRET_KEY_LENGTH].copy_from_slice(self.secret.as_bytes());
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(self.public.as_bytes());
        bytes
    }

    /// Parse a keypair from its 64-byte serialization.
    ///
    /// The public half must be a well-formed point encoding; the two
    /// halves are otherwise taken at face value.
    pub fn from_bytes(bytes: &[u8]) -> Result<Keypair, SignatureError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(SignatureError(ErrorKind::WrongLength {
                of: "Keypair",
                expected: KEYPAIR_LENGTH,
            }));
        }
        let (seed_half, public_half) = bytes.split_at(SECRET_KEY_LENGTH);

        Ok(Keypair {
            secret: SecretKey::from_bytes(seed_half)?,
            public: PublicKey::from_bytes(public_half)?,
        })
    }

    /// Generate a fresh keypair from `csprng`, surfacing RNG failure as
    /// an error.
    pub fn generate<R>(csprng: &mut R) -> Result<Keypair, SignatureError>
    where
        R: CryptoRng + RngCore,
    {
        let secret = SecretKey::generate(csprng)?;
        let public = PublicKey::from(&secret);
        Ok(Keypair { secret, public })
    }

    /// Sign `message` with this keypair's secret half.
    pub fn sign(&self, message: &[u8]) -> Signature {
        ExpandedSecretKey::from(&self.secret).sign(message, &self.public)
    }

    /// Check `signature` over `message` with this keypair's public
    /// half.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        self.public.verify(message, signature)
    }
}
