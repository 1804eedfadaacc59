// -*- mode: rust; -*-
//
// This file is part of ed25519.

//! Error types for key and signature processing.

use core::fmt;
use core::fmt::Display;

/// What went wrong, precisely.  Crate-internal; the public API exposes
/// only the opaque [`SignatureError`] wrapper.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum ErrorKind {
    /// Bytes that should have encoded a curve point did not: the
    /// y-coordinate was out of range, or no matching x exists.
    PointDecoding,
    /// A scalar encoding was at or above the group order.
    ScalarOutOfRange,
    /// A byte string had the wrong length for the type it was meant to
    /// become.
    WrongLength {
        of: &'static str,
        expected: usize,
    },
    /// The signature equation did not hold.
    Verification,
    /// The caller's random number generator reported failure during key
    /// generation.
    Rng,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ErrorKind::PointDecoding => write!(f, "invalid curve point encoding"),
            ErrorKind::ScalarOutOfRange => write!(f, "scalar not below the group order"),
            ErrorKind::WrongLength { of, expected } => {
                write!(f, "{} must be exactly {} bytes", of, expected)
            }
            ErrorKind::Verification => write!(f, "signature verification failed"),
            ErrorKind::Rng => write!(f, "random number generator failure"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// The error type for everything that can go wrong with keys and
/// signatures: malformed encodings, out-of-range scalars, failed
/// verification, or a failing RNG at key generation time.
///
/// All failures are terminal for the operation that hit them; nothing
/// is left half-built.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SignatureError(pub(crate) ErrorKind);

impl Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for SignatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<ErrorKind> for SignatureError {
    fn from(kind: ErrorKind) -> SignatureError {
        SignatureError(kind)
    }
}
