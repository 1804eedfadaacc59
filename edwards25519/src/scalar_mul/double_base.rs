// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! Constant-time evaluation of \\( aA + bB \\).

use subtle::Choice;
use subtle::ConditionallySelectable;

use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;

/// Compute \\( aA + bB \\) without leaking either scalar.
///
/// Two independent bit ladders share one 256-iteration loop — same
/// fixed schedule as the single-base ladder, run twice per step — and
/// the two accumulators are merged with one final addition.  Total
/// cost: 513 additions, 512 doublings, 512 masked moves, independent of
/// the inputs.
#[allow(non_snake_case)]
pub(crate) fn mul(a: &Scalar, A: &EdwardsPoint, b: &Scalar, B: &EdwardsPoint) -> EdwardsPoint {
    let a_bits = a.bits();
    let b_bits = b.bits();

    let mut acc_a = EdwardsPoint::identity();
    let mut acc_b = EdwardsPoint::identity();
    let mut power_a = *A;
    let mut power_b = *B;

    for i in 0..256 {
        let bumped_a = (&acc_a + &power_a.to_cached()).to_extended();
        acc_a.conditional_assign(&bumped_a, Choice::from(a_bits[i]));

        let bumped_b = (&acc_b + &power_b.to_cached()).to_extended();
        acc_b.conditional_assign(&bumped_b, Choice::from(b_bits[i]));

        power_a = power_a.double();
        power_b = power_b.double();
    }

    (&acc_a + &acc_b.to_cached()).to_extended()
}
