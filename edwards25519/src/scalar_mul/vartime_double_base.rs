// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! Variable-time evaluation of \\( aA + bB \\) with \\(B\\) the
//! basepoint — the verification inner loop.

use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::models::CachedPoint;
use crate::models::ProjectivePoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::OddMultiplesTable;

/// Compute \\( aA + bB \\), branching freely on the scalar digits.
///
/// Both scalars are public here, so they are recoded into sliding-window
/// non-adjacent form — width 5 for \\(a\\) (its odd-multiples table is
/// built per call), width 8 for \\(b\\) (the wide basepoint table is
/// precomputed once per process) — and the loop runs from the highest
/// nonzero digit down, doing nothing at all on zero digits.
#[allow(non_snake_case)]
pub(crate) fn mul(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> EdwardsPoint {
    let a_digits = a.non_adjacent_form(5);
    let b_digits = b.non_adjacent_form(8);

    let multiples_of_A = OddMultiplesTable::<CachedPoint, 8>::from(A);
    let multiples_of_B = constants::basepoint_odd_multiples();

    // Nothing happens above the highest nonzero digit; skip there
    // directly.
    let mut i = 255;
    while i > 0 && a_digits[i] == 0 && b_digits[i] == 0 {
        i -= 1;
    }

    let mut acc = ProjectivePoint::identity();
    loop {
        let mut partial = acc.double();

        let da = a_digits[i];
        if da > 0 {
            partial = &partial.to_extended() + &multiples_of_A.select(da as usize);
        } else if da < 0 {
            partial = &partial.to_extended() - &multiples_of_A.select(-da as usize);
        }

        let db = b_digits[i];
        if db > 0 {
            partial = &partial.to_extended() + &multiples_of_B.select(db as usize);
        } else if db < 0 {
            partial = &partial.to_extended() - &multiples_of_B.select(-db as usize);
        }

        acc = partial.to_projective();

        if i == 0 {
            break;
        }
        i -= 1;
    }

    acc.to_extended()
}
