// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! The internal coordinate systems of the curve.
//!
//! Four models are in play, traded off against each other during scalar
//! multiplication the way the ref10 lineage of Ed25519 implementations
//! arranges them:
//!
//! * [`crate::edwards::EdwardsPoint`] — extended coordinates
//!   \\((X:Y:Z:T)\\) with \\(T = XY/Z\\); the canonical working form,
//!   defined in the `edwards` module.
//! * [`ProjectivePoint`] — \\((X:Y:Z)\\); cheapest to double.
//! * [`CompletedPoint`] — \\(((X:Z),(Y:T))\\); what additions and
//!   doublings produce.  The caller decides whether to pay for the
//!   conversion back to extended (4M) or projective (3M) form.
//! * [`CachedPoint`] and [`PrecomputedPoint`] — one addend of the
//!   addition law, stored pre-massaged as \\((Y+X, Y-X, Z, 2dT)\\)
//!   (projective) or \\((y+x, y-x, 2dxy)\\) (affine) so that readditions
//!   start from the products the formula actually consumes.
//!
//! Nothing here branches on data; the only conditional operations are
//! `subtle` selections on the cached forms, used by the lookup tables.

#![allow(non_snake_case)]

use core::ops::{Add, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallySelectable;

use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::traits::Identity;
use crate::traits::ValidityCheck;

/// A point in \\( \mathbb P\^2 \\) coordinates: \\(x = X/Z\\),
/// \\(y = Y/Z\\).
#[derive(Copy, Clone, Debug)]
pub struct ProjectivePoint {
    pub X: FieldElement,
    pub Y: FieldElement,
    pub Z: FieldElement,
}

/// The output form of the addition and doubling formulas:
/// \\(x = X/Z\\), \\(y = Y/T\\).
#[derive(Copy, Clone, Debug)]
pub struct CompletedPoint {
    pub X: FieldElement,
    pub Y: FieldElement,
    pub Z: FieldElement,
    pub T: FieldElement,
}

/// One side of the addition formula, precomputed from an extended point:
/// \\((Y+X, Y-X, Z, 2dT)\\).
#[derive(Copy, Clone, Debug)]
pub struct CachedPoint {
    pub y_plus_x: FieldElement,
    pub y_minus_x: FieldElement,
    pub z: FieldElement,
    pub t2d: FieldElement,
}

/// The affine counterpart of [`CachedPoint`]: \\((y+x, y-x, 2dxy)\\)
/// with the \\(Z\\) coordinate normalized away.  This is the entry type
/// of the fixed-base tables.
// Affine coordinates, so deriving equality is sound.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PrecomputedPoint {
    pub y_plus_x: FieldElement,
    pub y_minus_x: FieldElement,
    pub xy2d: FieldElement,
}

// ------------------------------------------------------------------------
// Identity elements
// ------------------------------------------------------------------------

impl Identity for ProjectivePoint {
    fn identity() -> ProjectivePoint {
        ProjectivePoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
        }
    }
}

impl Identity for CachedPoint {
    fn identity() -> CachedPoint {
        CachedPoint {
            y_plus_x: FieldElement::ONE,
            y_minus_x: FieldElement::ONE,
            z: FieldElement::ONE,
            t2d: FieldElement::ZERO,
        }
    }
}

impl Identity for PrecomputedPoint {
    fn identity() -> PrecomputedPoint {
        PrecomputedPoint {
            y_plus_x: FieldElement::ONE,
            y_minus_x: FieldElement::ONE,
            xy2d: FieldElement::ZERO,
        }
    }
}

impl Default for CachedPoint {
    fn default() -> CachedPoint {
        CachedPoint::identity()
    }
}

impl Default for PrecomputedPoint {
    fn default() -> PrecomputedPoint {
        PrecomputedPoint::identity()
    }
}

// ------------------------------------------------------------------------
// Curve membership (debug aid, variable time)
// ------------------------------------------------------------------------

impl ValidityCheck for ProjectivePoint {
    fn is_valid(&self) -> bool {
        // The affine equation -x² + y² = 1 + d·x²·y², homogenized by
        // x = X/Z, y = Y/Z:  (Y² − X²)·Z² = Z⁴ + d·X²·Y².
        let x_sq = self.X.square();
        let y_sq = self.Y.square();
        let z_sq = self.Z.square();
        let lhs = &(&y_sq - &x_sq) * &z_sq;
        let rhs = &z_sq.square() + &(&constants::EDWARDS_D * &(&x_sq * &y_sq));

        lhs == rhs
    }
}

// ------------------------------------------------------------------------
// Constant-time selection (for the lookup tables)
// ------------------------------------------------------------------------

impl ConditionallySelectable for CachedPoint {
    fn conditional_select(a: &CachedPoint, b: &CachedPoint, choice: Choice) -> CachedPoint {
        CachedPoint {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t2d: FieldElement::conditional_select(&a.t2d, &b.t2d, choice),
        }
    }

    fn conditional_assign(&mut self, other: &CachedPoint, choice: Choice) {
        self.y_plus_x.conditional_assign(&other.y_plus_x, choice);
        self.y_minus_x.conditional_assign(&other.y_minus_x, choice);
        self.z.conditional_assign(&other.z, choice);
        self.t2d.conditional_assign(&other.t2d, choice);
    }
}

impl ConditionallySelectable for PrecomputedPoint {
    fn conditional_select(
        a: &PrecomputedPoint,
        b: &PrecomputedPoint,
        choice: Choice,
    ) -> PrecomputedPoint {
        PrecomputedPoint {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            xy2d: FieldElement::conditional_select(&a.xy2d, &b.xy2d, choice),
        }
    }

    fn conditional_assign(&mut self, other: &PrecomputedPoint, choice: Choice) {
        self.y_plus_x.conditional_assign(&other.y_plus_x, choice);
        self.y_minus_x.conditional_assign(&other.y_minus_x, choice);
        self.xy2d.conditional_assign(&other.xy2d, choice);
    }
}

// ------------------------------------------------------------------------
// Conversions out of the completed form
// ------------------------------------------------------------------------

impl CompletedPoint {
    /// Land in \\( \mathbb P\^2 \\): three multiplications.
    pub fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.T * &self.Z,
        }
    }

    /// Land in \\( \mathbb P\^3 \\): four multiplications.
    pub fn to_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.T * &self.Z,
            T: &self.X * &self.Y,
        }
    }
}

impl ProjectivePoint {
    /// Recover extended coordinates by taking \\(T = XY/Z\\)
    /// projectively: \\((XZ, YZ, Z\^2, XY)\\).
    pub fn to_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: &self.X * &self.Z,
            Y: &self.Y * &self.Z,
            Z: self.Z.square(),
            T: &self.X * &self.Y,
        }
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl ProjectivePoint {
    /// Double this point using the dbl-2008-hwcd formula, which never
    /// touches a \\(T\\) coordinate — hence the projective receiver.
    pub fn double(&self) -> CompletedPoint {
        let x_sq = self.X.square();
        let y_sq = self.Y.square();
        let z_sq = self.Z.square();
        let xy_sq = (&self.X + &self.Y).square();
        let sum = &y_sq + &x_sq; //  Y² + X²
        let diff = &y_sq - &x_sq; // Y² − X²

        CompletedPoint {
            X: &xy_sq - &sum, // 2XY
            Y: sum,
            Z: diff,
            T: &(&z_sq + &z_sq) - &diff,
        }
    }
}

// ------------------------------------------------------------------------
// Addition and subtraction
// ------------------------------------------------------------------------
//
// The twisted Edwards addition law in the add-2008-hwcd-3 arrangement.
// With the second operand cached, each variant is eight field
// multiplications:
//
//   A = (Y₁−X₁)·(Y₂−X₂)     B = (Y₁+X₁)·(Y₂+X₂)
//   C = T₁·(2dT₂)           D = 2·Z₁·Z₂
//
//   sum = (B−A : D+C : D−C : B+A)   as (X : Z : T : Y) completed.
//
// Subtraction is the same formula applied to the negated addend, which
// for a cached point just means swapping its sum/difference slots and
// flipping the sign of C.

impl<'a, 'b> Add<&'b CachedPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn add(self, cached: &'b CachedPoint) -> CompletedPoint {
        let A = &(&self.Y - &self.X) * &cached.y_minus_x;
        let B = &(&self.Y + &self.X) * &cached.y_plus_x;
        let C = &self.T * &cached.t2d;
        let ZZ = &self.Z * &cached.z;
        let D = &ZZ + &ZZ;

        CompletedPoint {
            X: &B - &A,
            Y: &B + &A,
            Z: &D + &C,
            T: &D - &C,
        }
    }
}

impl<'a, 'b> Sub<&'b CachedPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn sub(self, cached: &'b CachedPoint) -> CompletedPoint {
        let A = &(&self.Y - &self.X) * &cached.y_plus_x;
        let B = &(&self.Y + &self.X) * &cached.y_minus_x;
        let C = &self.T * &cached.t2d;
        let ZZ = &self.Z * &cached.z;
        let D = &ZZ + &ZZ;

        CompletedPoint {
            X: &B - &A,
            Y: &B + &A,
            Z: &D - &C,
            T: &D + &C,
        }
    }
}

impl<'a, 'b> Add<&'b PrecomputedPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn add(self, precomputed: &'b PrecomputedPoint) -> CompletedPoint {
        // The addend is affine (Z₂ = 1), so D = 2·Z₁.
        let A = &(&self.Y - &self.X) * &precomputed.y_minus_x;
        let B = &(&self.Y + &self.X) * &precomputed.y_plus_x;
        let C = &self.T * &precomputed.xy2d;
        let D = &self.Z + &self.Z;

        CompletedPoint {
            X: &B - &A,
            Y: &B + &A,
            Z: &D + &C,
            T: &D - &C,
        }
    }
}

impl<'a, 'b> Sub<&'b PrecomputedPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn sub(self, precomputed: &'b PrecomputedPoint) -> CompletedPoint {
        let A = &(&self.Y - &self.X) * &precomputed.y_plus_x;
        let B = &(&self.Y + &self.X) * &precomputed.y_minus_x;
        let C = &self.T * &precomputed.xy2d;
        let D = &self.Z + &self.Z;

        CompletedPoint {
            X: &B - &A,
            Y: &B + &A,
            Z: &D - &C,
            T: &D + &C,
        }
    }
}

// ------------------------------------------------------------------------
// Negation of the cached forms
// ------------------------------------------------------------------------

impl<'a> Neg for &'a CachedPoint {
    type Output = CachedPoint;

    /// Negating a point swaps the roles of \\(y+x\\) and \\(y-x\\) and
    /// flips \\(2dT\\).  Verification leans on this to subtract cached
    /// points without leaving the cached form.
    fn neg(self) -> CachedPoint {
        CachedPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            z: self.z,
            t2d: -(&self.t2d),
        }
    }
}

impl<'a> Neg for &'a PrecomputedPoint {
    type Output = PrecomputedPoint;

    fn neg(self) -> PrecomputedPoint {
        PrecomputedPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            xy2d: -(&self.xy2d),
        }
    }
}
