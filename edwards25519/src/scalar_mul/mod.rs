// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! Implementations of the scalar multiplication strategies: constant-time
//! variable-base, constant-time double-base, and variable-time double-base
//! against the basepoint.

pub mod double_base;
pub mod variable_base;
pub mod vartime_double_base;
