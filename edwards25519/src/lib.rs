// -*- mode: rust; -*-
//
// This file is part of edwards25519.

#![warn(missing_docs)]
#![allow(clippy::needless_range_loop)]

//! # edwards25519
//!
//! **Field and group operations on the twisted Edwards curve
//! \\( -x\^2 + y\^2 = 1 + d x\^2 y\^2 \\) over
//! \\( \mathbb F\_{2\^{255} - 19} \\).**
//!
//! This crate is the arithmetic engine underneath the `ed25519`
//! signature crate: field elements in a 5×51-bit limb representation,
//! curve points in extended twisted Edwards coordinates backed by the
//! full lattice of internal models, scalars mod the basepoint order
//! \\( \ell \\), and the scalar multiplication strategies the EdDSA
//! protocol needs:
//!
//! * constant-time variable-base multiplication (a full 256-step
//!   double-and-add ladder),
//! * constant-time fixed-base multiplication against a process-wide
//!   precomputed basepoint table,
//! * constant-time double-base multiplication for use with secret
//!   inputs, and
//! * variable-time double-base multiplication against the basepoint,
//!   for verification.
//!
//! Every operation that can see secret data runs in constant time:
//! selection is done with `subtle`'s masked conditional moves, table
//! lookups scan the whole table, and there are no data-dependent
//! branches.  The variable-time paths are explicitly named `vartime`.

#[macro_use]
pub(crate) mod macros;

pub mod field;
pub mod scalar;

pub(crate) mod models;
pub(crate) mod scalar_mul;
pub(crate) mod window;

pub mod constants;
pub mod edwards;
pub mod traits;

pub use crate::edwards::BasepointTable;
pub use crate::edwards::CompressedEdwardsY;
pub use crate::edwards::EdwardsPoint;
pub use crate::scalar::Scalar;
