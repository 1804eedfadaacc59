// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! Constant-time multiplication of an arbitrary point by a scalar.

use subtle::Choice;
use subtle::ConditionallySelectable;

use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;

/// Compute \\( k P \\) in constant time.
///
/// The ladder walks all 256 scalar bits from the least significant end.
/// Each step forms the candidate sum unconditionally and keeps it only
/// under the mask of the current bit, then advances the running power
/// of two by a doubling.  The work is therefore fixed at 256 additions,
/// 256 doublings, and 256 masked moves for every scalar — including
/// \\(k = 0\\), which walks the whole ladder and lands on the identity.
pub(crate) fn mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
    let mut acc = EdwardsPoint::identity();
    let mut power = *point; // P·2^i at step i

    for bit in scalar.bits().iter() {
        let bumped = (&acc + &power.to_cached()).to_extended();
        acc.conditional_assign(&bumped, Choice::from(*bit));
        power = power.double();
    }

    acc
}
