// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! The public group: points on the twisted Edwards form of Curve25519.
//!
//! [`EdwardsPoint`] is the working representation (extended
//! coordinates) and [`CompressedEdwardsY`] the 32-byte wire form: the
//! \\(y\\)-coordinate with the parity of \\(x\\) folded into the top
//! bit.  Decoding recovers \\(x\\) by a square root and refuses
//! non-canonical or off-curve inputs.
//!
//! Scalar multiplication comes in the four flavors the protocol needs:
//!
//! * `&point * &scalar` — constant-time, variable-base: a full
//!   256-step double-and-add ladder whatever the scalar;
//! * [`EdwardsPoint::mul_base`] — constant-time, fixed-base, through
//!   the process-wide radix-16 [`BasepointTable`];
//! * [`EdwardsPoint::double_scalar_mul`] — constant-time
//!   \\( aA + bB \\) for secret inputs;
//! * [`EdwardsPoint::vartime_double_scalar_mul_basepoint`] —
//!   variable-time \\( aA + bB \\) against the basepoint, for
//!   verification, where everything is public.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Neg, Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::field::FieldElement;
use crate::models::CachedPoint;
use crate::models::PrecomputedPoint;
use crate::models::ProjectivePoint;
use crate::scalar::Scalar;
use crate::scalar_mul;
use crate::traits::Identity;
use crate::traits::ValidityCheck;
use crate::window::LookupTable;

// ------------------------------------------------------------------------
// The wire form
// ------------------------------------------------------------------------

/// A point in "Edwards y" form: bits 0..255 hold the little-endian
/// \\(y\\)-coordinate, bit 255 the parity of \\(x\\).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &CompressedEdwardsY) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl CompressedEdwardsY {
    /// Borrow the underlying 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy out the underlying 32 bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Decode this encoding to a curve point.
    ///
    /// Fails (returns `None`) when:
    ///
    /// * the \\(y\\)-coordinate is not reduced, i.e. the encoding reads
    ///   back an integer at or above \\(p\\); or
    /// * \\( (y\^2 - 1)/(d y\^2 + 1) \\) has no square root, so no
    ///   \\(x\\) pairs with this \\(y\\) on the curve.
    pub fn decompress(&self) -> Option<EdwardsPoint> {
        let y = FieldElement::from_bytes(self.as_bytes());

        // The field parser quietly reduces out-of-range values, so
        // canonicity is checked by re-encoding and comparing against
        // the input with its sign bit stripped.
        let mut unsigned = self.to_bytes();
        unsigned[31] &= 0b0111_1111;
        if unsigned != y.to_bytes() {
            return None;
        }

        // Solve the curve equation for x:  x² = (y² − 1)/(d·y² + 1).
        let y_sq = y.square();
        let numerator = &y_sq - &FieldElement::ONE;
        let denominator = &(&y_sq * &constants::EDWARDS_D) + &FieldElement::ONE;
        let (found, mut x) = FieldElement::sqrt_ratio(&numerator, &denominator);
        if !bool::from(found) {
            return None;
        }

        // Two roots exist; take the one whose parity matches the sign
        // bit.
        let wants_odd = Choice::from(self.as_bytes()[31] >> 7);
        x.conditional_negate(x.is_odd() ^ wants_odd);

        Some(EdwardsPoint {
            X: x,
            Y: y,
            Z: FieldElement::ONE,
            T: &x * &y,
        })
    }
}

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        // The identity has (x, y) = (0, 1): a one byte, then zeroes.
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        CompressedEdwardsY(bytes)
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> CompressedEdwardsY {
        CompressedEdwardsY::identity()
    }
}

// ------------------------------------------------------------------------
// The group element
// ------------------------------------------------------------------------

/// A point on the curve in extended coordinates \\((X:Y:Z:T)\\) with
/// \\(x = X/Z\\), \\(y = Y/Z\\), \\(xy = T/Z\\).
#[derive(Copy, Clone, Debug)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        // x = X/Z is shared exactly when X₁Z₂ = X₂Z₁ (and likewise for
        // y), which dodges the inversions an affine comparison would
        // need.
        let same_x = (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z));
        let same_y = (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z));
        same_x & same_y
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &EdwardsPoint, b: &EdwardsPoint, choice: Choice) -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T: FieldElement::conditional_select(&a.T, &b.T, choice),
        }
    }

    fn conditional_assign(&mut self, other: &EdwardsPoint, choice: Choice) {
        self.X.conditional_assign(&other.X, choice);
        self.Y.conditional_assign(&other.Y, choice);
        self.Z.conditional_assign(&other.Z, choice);
        self.T.conditional_assign(&other.T, choice);
    }
}

impl ValidityCheck for EdwardsPoint {
    fn is_valid(&self) -> bool {
        // On the curve, and T actually equals XY/Z.
        let on_curve = self.to_projective().is_valid();
        let t_consistent = (&self.X * &self.Y) == (&self.Z * &self.T);

        on_curve && t_consistent
    }
}

// ------------------------------------------------------------------------
// Conversions into the internal models
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Forget \\(T\\).
    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Pre-massage this point into the second-operand form of the
    /// addition law.
    pub(crate) fn to_cached(&self) -> CachedPoint {
        CachedPoint {
            y_plus_x: &self.Y + &self.X,
            y_minus_x: &self.Y - &self.X,
            z: self.Z,
            t2d: &self.T * &constants::EDWARDS_2D,
        }
    }

    /// Normalize to affine and pre-massage, for table entries.  Costs an
    /// inversion.
    pub(crate) fn to_precomputed(&self) -> PrecomputedPoint {
        let z_inv = self.Z.invert();
        let x = &self.X * &z_inv;
        let y = &self.Y * &z_inv;
        PrecomputedPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d: &(&x * &y) * &constants::EDWARDS_2D,
        }
    }

    /// Encode to the 32-byte wire form.
    pub fn compress(&self) -> CompressedEdwardsY {
        let z_inv = self.Z.invert();
        let x = &self.X * &z_inv;
        let y = &self.Y * &z_inv;

        let mut bytes = y.to_bytes();
        // to_bytes is canonical, so bit 255 is clear and the parity of
        // x can be OR'd straight in.
        bytes[31] |= x.is_odd().unwrap_u8() << 7;
        CompressedEdwardsY(bytes)
    }
}

// ------------------------------------------------------------------------
// Group operations
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// The double of this point.
    pub fn double(&self) -> EdwardsPoint {
        self.to_projective().double().to_extended()
    }

    /// `2^count` times this point, by `count` successive doublings.
    /// Requires `count > 0`.
    pub(crate) fn repeated_double(&self, count: u32) -> EdwardsPoint {
        debug_assert!(count > 0);
        let mut running = self.to_projective();
        for _ in 1..count {
            running = running.double().to_projective();
        }
        running.double().to_extended()
    }
}

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.to_cached()).to_extended()
    }
}

define_add_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> AddAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) + rhs;
    }
}

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.to_cached()).to_extended()
    }
}

define_sub_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> SubAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) - rhs;
    }
}

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        // (x, y) ↦ (−x, y): negate the coordinates carrying x.
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    /// Constant-time variable-base multiplication.  For basepoint
    /// multiples, [`EdwardsPoint::mul_base`] is much faster.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        scalar_mul::variable_base::mul(self, scalar)
    }
}

define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;
    /// Constant-time variable-base multiplication.  For basepoint
    /// multiples, [`EdwardsPoint::mul_base`] is much faster.
    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> MulAssign<&'b Scalar> for EdwardsPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        *self = (self as &EdwardsPoint) * scalar;
    }
}

impl EdwardsPoint {
    /// Multiply the Ed25519 basepoint by a scalar, in constant time,
    /// through the process-wide precomputed table.
    pub fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        constants::basepoint_table() * scalar
    }

    /// \\( aA + bB \\) with both scalars treated as secret: two
    /// interleaved constant-time ladders plus a combining addition.
    pub fn double_scalar_mul(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
        B: &EdwardsPoint,
    ) -> EdwardsPoint {
        scalar_mul::double_base::mul(a, A, b, B)
    }

    /// \\( aA + bB \\) where \\(B\\) is the basepoint, in variable
    /// time.  Only for public inputs — this is the verification path.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        scalar_mul::vartime_double_base::mul(a, A, b)
    }
}

// ------------------------------------------------------------------------
// The fixed-base table
// ------------------------------------------------------------------------

/// Thirty-two blocks of precomputed multiples of a fixed point, one
/// block per pair of radix-16 digits; block \\(i\\) holds
/// \\( [1 \ldots 8] \cdot 256\^i \cdot B \\) in affine form.
#[derive(Clone)]
pub struct BasepointTable(pub(crate) [LookupTable<PrecomputedPoint>; 32]);

impl BasepointTable {
    /// Precompute the table for a given basepoint.
    pub fn new(basepoint: &EdwardsPoint) -> BasepointTable {
        let mut blocks = [LookupTable::default(); 32];
        let mut block_base = *basepoint;
        for block in blocks.iter_mut() {
            *block = LookupTable::from(&block_base);
            // Step to the next digit pair: multiply by 16² = 256.
            block_base = block_base.repeated_double(8);
        }
        BasepointTable(blocks)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a BasepointTable {
    type Output = EdwardsPoint;

    /// Fixed-base multiplication over the signed radix-16 digits of the
    /// scalar.
    ///
    /// Digit \\(2i\\) weights \\( 256\^i \\) — exactly block \\(i\\) —
    /// and digit \\(2i+1\\) weights \\( 16 \cdot 256\^i \\).  Summing
    /// all odd-position digits first and shifting the partial sum by
    /// one nibble lets both halves share the same 32 blocks, with every
    /// digit handled by one constant-time table select.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        let digits = scalar.radix_16_digits();

        let mut acc = EdwardsPoint::identity();
        for i in (1..64).step_by(2) {
            acc = (&acc + &self.0[i / 2].select(digits[i])).to_extended();
        }
        acc = acc.repeated_double(4);
        for i in (0..64).step_by(2) {
            acc = (&acc + &self.0[i / 2].select(digits[i])).to_extended();
        }
        acc
    }
}

impl Debug for BasepointTable {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        writeln!(f, "BasepointTable([")?;
        for block in self.0.iter() {
            writeln!(f, "\t{:?},", block)?;
        }
        write!(f, "])")
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::IsIdentity;

    // The reference-suite values below come from the original Ed25519
    // distribution (ed25519.py and the published test programs).

    /// The x-coordinate of the basepoint,
    /// 15112221349535400772501151409588531511454012693041857206046113283949847762202.
    static BASEPOINT_X_BYTES: [u8; 32] = [
        0x1a, 0xd5, 0x25, 0x8f, 0x60, 0x2d, 0x56, 0xc9, 0xb2, 0xa7, 0x25, 0x95, 0x60, 0xc7, 0x2c,
        0x69, 0x5c, 0xdc, 0xd6, 0xfd, 0x31, 0xe2, 0xa4, 0xc0, 0xfe, 0x53, 0x6e, 0xcd, 0xd3, 0x36,
        0x69, 0x21,
    ];

    /// Encodings of 2B, 10B and 16B.
    static TWO_B: CompressedEdwardsY = CompressedEdwardsY([
        0xc9, 0xa3, 0xf8, 0x6a, 0xae, 0x46, 0x5f, 0x0e, 0x56, 0x51, 0x38, 0x64, 0x51, 0x0f, 0x39,
        0x97, 0x56, 0x1f, 0xa2, 0xc9, 0xe8, 0x5e, 0xa2, 0x1d, 0xc2, 0x29, 0x23, 0x09, 0xf3, 0xcd,
        0x60, 0x22,
    ]);
    static TEN_B: CompressedEdwardsY = CompressedEdwardsY([
        0x2c, 0x7b, 0xe8, 0x6a, 0xb0, 0x74, 0x88, 0xba, 0x43, 0xe8, 0xe0, 0x3d, 0x85, 0xa6, 0x76,
        0x25, 0xcf, 0xbf, 0x98, 0xc8, 0x54, 0x4d, 0xe4, 0xc8, 0x77, 0x24, 0x1b, 0x7a, 0xaa, 0xfc,
        0x7f, 0xe3,
    ]);
    static SIXTEEN_B: CompressedEdwardsY = CompressedEdwardsY([
        0xeb, 0x27, 0x67, 0xc1, 0x37, 0xab, 0x7a, 0xd8, 0x27, 0x9c, 0x07, 0x8e, 0xff, 0x11, 0x6a,
        0xb0, 0x78, 0x6e, 0xad, 0x3a, 0x2e, 0x0f, 0x98, 0x9f, 0x72, 0xc3, 0x7f, 0x82, 0xf2, 0x96,
        0x96, 0x70,
    ]);

    /// A pair of reference scalars and the published products
    /// a·B and a·(aB) + b·B.
    static A_SCALAR: Scalar = Scalar {
        bytes: [
            0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a, 0xd8,
            0x26, 0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e, 0x7b, 0x7f,
            0x23, 0x76, 0xef, 0x09,
        ],
    };
    static B_SCALAR: Scalar = Scalar {
        bytes: [
            0x91, 0x26, 0x7a, 0xcf, 0x25, 0xc2, 0x09, 0x1b, 0xa2, 0x17, 0x74, 0x7b, 0x66, 0xf0,
            0xb3, 0x2e, 0x9d, 0xf2, 0xa5, 0x67, 0x41, 0xcf, 0xda, 0xc4, 0x56, 0xa7, 0xd4, 0xaa,
            0xb8, 0x60, 0x8a, 0x05,
        ],
    };
    static A_TIMES_B_POINT: CompressedEdwardsY = CompressedEdwardsY([
        0xea, 0x27, 0xe2, 0x60, 0x53, 0xdf, 0x1b, 0x59, 0x56, 0xf1, 0x4d, 0x5d, 0xec, 0x3c, 0x34,
        0xc3, 0x84, 0xa2, 0x69, 0xb7, 0x4c, 0xc3, 0x80, 0x3e, 0xa8, 0xe2, 0xe7, 0xc9, 0x42, 0x5e,
        0x40, 0xa5,
    ]);
    static A_AB_PLUS_B_B: CompressedEdwardsY = CompressedEdwardsY([
        0x7d, 0xfd, 0x6c, 0x45, 0xaf, 0x6d, 0x6e, 0x0e, 0xba, 0x20, 0x37, 0x1a, 0x23, 0x64, 0x59,
        0xc4, 0xc0, 0x46, 0x83, 0x43, 0xde, 0x70, 0x4b, 0x85, 0x09, 0x6f, 0xfe, 0x35, 0x4f, 0x13,
        0x2b, 0x42,
    ]);

    #[test]
    fn basepoint_decodes_to_published_x() {
        let decoded = constants::ED25519_BASEPOINT_COMPRESSED.decompress().unwrap();
        assert!(decoded.is_valid());
        assert_eq!(decoded.X, FieldElement::from_bytes(&BASEPOINT_X_BYTES));
        assert_eq!(decoded.compress(), constants::ED25519_BASEPOINT_COMPRESSED);
    }

    #[test]
    fn sign_bit_selects_the_negated_point() {
        let mut negated_bytes = constants::ED25519_BASEPOINT_COMPRESSED.to_bytes();
        negated_bytes[31] ^= 1 << 7;
        let negated = CompressedEdwardsY(negated_bytes).decompress().unwrap();

        // Same y, opposite x: coordinate-for-coordinate the negation of
        // the basepoint constant, whose Z is one.
        let B = constants::ED25519_BASEPOINT_POINT;
        assert_eq!(negated.X, -(&B.X));
        assert_eq!(negated.Y, B.Y);
        assert_eq!(negated.Z, B.Z);
        assert_eq!(negated.T, -(&B.T));

        // And as a group element it is the inverse.
        assert!((&negated + &B).is_identity());
    }

    #[test]
    fn decoding_rejects_unreduced_y() {
        // p + 1 reduces to 1, a perfectly good y-coordinate, but the
        // encoding is not canonical and must be refused.
        let p_plus_one: [u8; 32] = [
            0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0x7f,
        ];
        assert!(CompressedEdwardsY(p_plus_one).decompress().is_none());

        // The canonical encoding of y = 1 (the identity) is fine.
        assert!(CompressedEdwardsY::identity().decompress().is_some());
    }

    #[test]
    fn addition_matches_doubling() {
        let B = constants::ED25519_BASEPOINT_POINT;

        // B + B through every addition path, against double() and the
        // published 2B.
        assert_eq!((&B + &B).compress(), TWO_B);
        assert_eq!(B.double().compress(), TWO_B);
        assert_eq!((&B + &B.to_cached()).to_extended().compress(), TWO_B);
        assert_eq!((&B + &B.to_precomputed()).to_extended().compress(), TWO_B);
    }

    #[test]
    fn subtraction_inverts_addition() {
        let B = constants::ED25519_BASEPOINT_POINT;
        let two_b = B.double();
        assert_eq!((&two_b - &B).compress(), B.compress());
        assert!((&B - &B).is_identity());
    }

    #[test]
    fn repeated_doubling_hits_sixteen_b() {
        let sixteen_b = constants::ED25519_BASEPOINT_POINT.repeated_double(4);
        assert_eq!(sixteen_b.compress(), SIXTEEN_B);
    }

    #[test]
    fn equality_ignores_projective_scaling() {
        // The identity with every coordinate scaled by 2 is still the
        // identity.
        let two = &FieldElement::ONE + &FieldElement::ONE;
        let scaled = EdwardsPoint {
            X: FieldElement::ZERO,
            Y: two,
            Z: two,
            T: FieldElement::ZERO,
        };
        assert_eq!(scaled, EdwardsPoint::identity());
        assert!(scaled.is_identity());
    }

    #[test]
    fn ladder_multiplication_reference_values() {
        let B = constants::ED25519_BASEPOINT_POINT;

        assert_eq!((&B * &A_SCALAR).compress(), A_TIMES_B_POINT);
        assert_eq!((&A_SCALAR * &B).compress(), A_TIMES_B_POINT);
        assert_eq!((&B * &Scalar::from(10u64)).compress(), TEN_B);
    }

    #[test]
    fn ladder_edge_scalars() {
        let P = A_TIMES_B_POINT.decompress().unwrap();

        assert!((&P * &Scalar::ZERO).is_identity());
        assert_eq!(&P * &Scalar::ONE, P);
        assert_eq!(&P * &Scalar::from(2u64), P.double());
    }

    #[test]
    fn fixed_base_matches_ladder() {
        for s in &[
            Scalar::ZERO,
            Scalar::ONE,
            A_SCALAR,
            B_SCALAR,
            Scalar::from_bits_clamped([0xab; 32]),
        ] {
            let via_ladder = &constants::ED25519_BASEPOINT_POINT * s;
            let via_table = EdwardsPoint::mul_base(s);
            assert_eq!(via_ladder.compress(), via_table.compress());
        }
    }

    #[test]
    fn fixed_base_reference_values() {
        assert_eq!(
            EdwardsPoint::mul_base(&Scalar::ONE).compress(),
            constants::ED25519_BASEPOINT_COMPRESSED
        );
        assert_eq!(EdwardsPoint::mul_base(&Scalar::from(2u64)).compress(), TWO_B);
        assert_eq!(EdwardsPoint::mul_base(&Scalar::from(10u64)).compress(), TEN_B);
        assert_eq!(EdwardsPoint::mul_base(&A_SCALAR).compress(), A_TIMES_B_POINT);
    }

    #[test]
    fn group_order_annihilates_the_basepoint() {
        let ell = Scalar::from_bits(constants::BASEPOINT_ORDER_BYTES);
        assert!(EdwardsPoint::mul_base(&ell).is_identity());
    }

    #[test]
    fn table_for_arbitrary_point_agrees() {
        // A table built over aB evaluates b·(aB) like the generic
        // ladder does.
        let aB = EdwardsPoint::mul_base(&A_SCALAR);
        let table = BasepointTable::new(&aB);
        assert_eq!((&table * &B_SCALAR).compress(), (&aB * &B_SCALAR).compress());
    }

    #[test]
    fn precomputed_form_survives_denominators() {
        // Build a precomputed (affine) form from a point with Z ≠ 1 and
        // check it still adds correctly.
        let aB = EdwardsPoint::mul_base(&A_SCALAR);
        let via_precomputed =
            (&EdwardsPoint::identity() + &aB.to_precomputed()).to_extended();
        assert_eq!(via_precomputed.compress(), aB.compress());
    }

    #[test]
    fn vartime_double_base_reference_value() {
        let aB = A_TIMES_B_POINT.decompress().unwrap();
        let result = EdwardsPoint::vartime_double_scalar_mul_basepoint(&A_SCALAR, &aB, &B_SCALAR);
        assert_eq!(result.compress(), A_AB_PLUS_B_B);
    }

    #[test]
    fn constant_time_double_base_agrees_with_vartime() {
        let aB = A_TIMES_B_POINT.decompress().unwrap();
        let B = constants::ED25519_BASEPOINT_POINT;

        for b in &[B_SCALAR, Scalar::ZERO, Scalar::ONE] {
            let vartime = EdwardsPoint::vartime_double_scalar_mul_basepoint(&A_SCALAR, &aB, b);
            let consttime = EdwardsPoint::double_scalar_mul(&A_SCALAR, &aB, b, &B);
            assert_eq!(vartime.compress(), consttime.compress());
        }

        // Both scalars zero is the degenerate corner.
        let vartime = EdwardsPoint::vartime_double_scalar_mul_basepoint(&Scalar::ZERO, &aB, &Scalar::ZERO);
        let consttime = EdwardsPoint::double_scalar_mul(&Scalar::ZERO, &aB, &Scalar::ZERO, &B);
        assert!(vartime.is_identity());
        assert!(consttime.is_identity());
    }

    #[test]
    fn projective_round_trip() {
        let B = constants::ED25519_BASEPOINT_POINT;
        assert_eq!(
            B.to_projective().to_extended().compress(),
            constants::ED25519_BASEPOINT_COMPRESSED
        );
    }

    #[test]
    fn identity_encodes_as_identity() {
        assert_eq!(
            EdwardsPoint::identity().compress(),
            CompressedEdwardsY::identity()
        );
        assert!(!constants::ED25519_BASEPOINT_POINT.is_identity());
    }

    #[test]
    fn limb_bounds_survive_long_chains() {
        // Debug builds trap on limb overflow, so a chain of full
        // ladders exercises the redundant-representation bounds.
        let mut P = constants::ED25519_BASEPOINT_POINT;
        for _ in 0..40 {
            P *= &A_SCALAR;
        }
        assert!(P.is_valid());
    }
}
