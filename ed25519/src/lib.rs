// -*- mode: rust; -*-
//
// This file is part of ed25519.

#![warn(missing_docs)]

//! # ed25519
//!
//! EdDSA key generation, signing, and verification over the Ed25519
//! curve, built on the [`edwards25519`] arithmetic crate and SHA-512.
//!
//! # Example
//!
//! ```
//! use rand::rngs::OsRng;
//! use ed25519::{Keypair, Signature};
//!
//! let mut csprng = OsRng;
//! let keypair: Keypair = Keypair::generate(&mut csprng).unwrap();
//!
//! let message: &[u8] = b"This is a test of the tsunami alert system.";
//! let signature: Signature = keypair.sign(message);
//! assert!(keypair.verify(message, &signature).is_ok());
//!
//! // Verification only needs the public half:
//! assert!(keypair.public.verify(message, &signature).is_ok());
//! ```
//!
//! The signing path — deriving the signing scalar from the seed,
//! computing the nonce commitment, and assembling \\( s = ka + r \\) —
//! runs in constant time with respect to all secret material.
//! Verification is variable-time, since all of its inputs are public.

pub mod constants;
mod errors;
mod keypair;
mod public;
mod secret;
mod signature;

pub use crate::constants::*;
pub use crate::errors::SignatureError;
pub use crate::keypair::Keypair;
pub use crate::public::PublicKey;
pub use crate::secret::SecretKey;
pub use crate::signature::Signature;
