// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! Arithmetic in the field of integers modulo \\(p = 2\^{255} - 19\\).
//!
//! A residue is held in radix \\(2\^{51}\\): five `u64` limbs, each
//! nominally 51 bits wide.  The representation is redundant — limbs may
//! drift a few bits above 51 between reductions — which lets additions
//! and subtractions skip carrying entirely and lets the multiplier absorb
//! the slack.  Values are only forced into the canonical range
//! \\([0, p)\\) when they are serialized, so equality is defined through
//! the canonical byte encoding.
//!
//! Everything here runs in constant time with respect to the limb
//! values; selection goes through `subtle` and there are no
//! data-dependent branches or lookups.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants;

/// Limbs live 51 bits apart.
const LIMB_BITS: usize = 51;
/// Mask of the low 51 bits of a limb.
const LOW_51_BITS: u64 = (1u64 << 51) - 1;

/// `16 * p` in limb form.  Adding this before a limb-wise subtraction
/// keeps every limb nonnegative for any operand whose limbs are below
/// \\(2\^{54}\\), which is the widest this representation ever gets.
const SIXTEEN_P: [u64; 5] = [
    36028797018963664,
    36028797018963952,
    36028797018963952,
    36028797018963952,
    36028797018963952,
];

/// Read the 51-bit window starting at bit `51 * i` of a little-endian
/// byte string.  Windows that run past the end of the input are padded
/// with zero bits.
#[inline(always)]
fn window51(bytes: &[u8; 32], i: usize) -> u64 {
    let bit = LIMB_BITS * i;
    let mut word = 0u64;
    for k in 0..8 {
        let idx = bit / 8 + k;
        if idx < 32 {
            word |= (bytes[idx] as u64) << (8 * k);
        }
    }
    (word >> (bit % 8)) & LOW_51_BITS
}

/// An element of \\( \mathbb Z / (2\^{255} - 19) \\) in 5×51-bit limb
/// form.
///
/// The in-memory value is not unique: arithmetic leaves limbs slightly
/// wide, and two representations of the same residue may differ limb by
/// limb.  [`FieldElement::to_bytes`] produces the canonical encoding, and
/// equality is defined through it.
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [u64; 5]);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ConstantTimeEq for FieldElement {
    /// Equality of residues, not of representations: both sides are
    /// canonicalized to wire form and the encodings are compared in
    /// constant time.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        let mut limbs = [0u64; 5];
        for i in 0..5 {
            limbs[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement(limbs)
    }

    fn conditional_assign(&mut self, other: &FieldElement, choice: Choice) {
        for i in 0..5 {
            self.0[i].conditional_assign(&other.0[i], choice);
        }
    }

    fn conditional_swap(a: &mut FieldElement, b: &mut FieldElement, choice: Choice) {
        for i in 0..5 {
            u64::conditional_swap(&mut a.0[i], &mut b.0[i], choice);
        }
    }
}

// ------------------------------------------------------------------------
// Ring operations
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        // Limb-wise addition, no carry: the redundancy budget of the
        // representation absorbs the growth until the next multiply.
        let mut limbs = self.0;
        for (limb, addend) in limbs.iter_mut().zip(rhs.0.iter()) {
            *limb += addend;
        }
        FieldElement(limbs)
    }
}

define_add_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);

impl<'b> AddAssign<&'b FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &'b FieldElement) {
        *self = (self as &FieldElement) + rhs;
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        // Offset by 16p so no limb can underflow, then carry once.
        let mut limbs = [0u64; 5];
        for i in 0..5 {
            limbs[i] = (self.0[i] + SIXTEEN_P[i]) - rhs.0[i];
        }
        FieldElement::weak_reduce(limbs)
    }
}

define_sub_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);

impl<'b> SubAssign<&'b FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &'b FieldElement) {
        *self = (self as &FieldElement) - rhs;
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        &FieldElement::ZERO - self
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        -&self
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        let a = &self.0;
        let b = &rhs.0;

        // The carry structure below is sound as long as no input limb
        // exceeds 54 bits, which the rest of the module maintains.
        for i in 0..5 {
            debug_assert!(a[i] < 1 << 54);
            debug_assert!(b[i] < 1 << 54);
        }

        // Schoolbook product over the limbs.  A term a_i * b_j lands in
        // column i+j; columns five and above wrap around through the
        // identity 2^255 = 19 (mod p), picking up a factor of 19.
        let mut cols = [0u128; 5];
        for i in 0..5 {
            for j in 0..5 {
                let term = (a[i] as u128) * (b[j] as u128);
                if i + j < 5 {
                    cols[i + j] += term;
                } else {
                    cols[i + j - 5] += term * 19;
                }
            }
        }

        FieldElement::carry_wide(cols)
    }
}

define_mul_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);

impl<'b> MulAssign<&'b FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &'b FieldElement) {
        *self = (self as &FieldElement) * rhs;
    }
}

// ------------------------------------------------------------------------
// Reduction and serialization
// ------------------------------------------------------------------------

impl FieldElement {
    /// The additive identity.
    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0]);
    /// The multiplicative identity.
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0]);
    /// The residue \\( p - 1 \\), in fully reduced limb form.
    pub const MINUS_ONE: FieldElement = FieldElement([
        2251799813685228,
        2251799813685247,
        2251799813685247,
        2251799813685247,
        2251799813685247,
    ]);

    /// One sequential carry sweep.  Brings every limb back under
    /// \\(2\^{51}\\) plus a small excess in the bottom limb from the
    /// wraparound; does not canonicalize.
    ///
    /// Sound for inputs whose limbs are below \\(2\^{58}\\) or so; the
    /// only callers are subtraction (bounded by `16p + 2^54`) and the
    /// serializer.
    fn weak_reduce(mut limbs: [u64; 5]) -> FieldElement {
        let mut carry = 0u64;
        for limb in limbs.iter_mut() {
            let v = *limb + carry;
            *limb = v & LOW_51_BITS;
            carry = v >> LIMB_BITS;
        }
        // 2^255 = 19 (mod p): fold the overflow into the bottom limb.
        limbs[0] += carry * 19;
        FieldElement(limbs)
    }

    /// Carry a widened (128-bit column) product down to limb form.
    fn carry_wide(cols: [u128; 5]) -> FieldElement {
        // First sweep: reduce each column to 51 bits, pushing the excess
        // upward.  Column sums are below 2^115, so every intermediate
        // fits in a u128 and the running carry fits in a u64 afterwards.
        let mut limbs = [0u64; 5];
        let mut carry: u128 = 0;
        for i in 0..5 {
            let v = cols[i] + carry;
            limbs[i] = (v as u64) & LOW_51_BITS;
            carry = v >> LIMB_BITS;
        }

        // Wrap the overflow past bit 255 back into the two bottom limbs.
        let v = limbs[0] as u128 + carry * 19;
        limbs[0] = (v as u64) & LOW_51_BITS;
        limbs[1] += (v >> LIMB_BITS) as u64;

        FieldElement(limbs)
    }

    /// Parse a field element from 32 little-endian bytes.
    ///
    /// Bit 255 is not part of the value (the curve encoding uses it as a
    /// sign bit) and is ignored here.  No canonicity check is made: a
    /// byte string encoding \\( p + k \\) parses to the residue of
    /// \\( k \\).  Callers that need canonical inputs must re-encode and
    /// compare.
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        let mut limbs = [0u64; 5];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = window51(bytes, i);
        }
        FieldElement(limbs)
    }

    /// Serialize to the canonical 32-byte little-endian encoding of the
    /// residue in \\([0, p)\\).
    pub fn to_bytes(&self) -> [u8; 32] {
        // Settle the limbs first so the value is below 2^255 + epsilon.
        let mut limbs = FieldElement::weak_reduce(self.0).0;

        // The value may still be p or more.  Whether it is can be read
        // off the carry of (value + 19) out of bit 255, since
        // value >= p  <=>  value + 19 >= 2^255.
        let mut q = 19u64;
        for limb in &limbs {
            q = (limb + q) >> LIMB_BITS;
        }

        // Subtract q*p = q*2^255 - q*19 by adding 19q and then dropping
        // everything at bit 255 and above during the carry sweep.
        limbs[0] += 19 * q;
        let mut carry = 0u64;
        for limb in limbs.iter_mut() {
            let v = *limb + carry;
            *limb = v & LOW_51_BITS;
            carry = v >> LIMB_BITS;
        }
        // `carry` here is exactly the q*2^255 part; discard it.

        // Stream the 5×51 bits out as bytes.
        let mut bytes = [0u8; 32];
        let mut buffer: u128 = 0;
        let mut held = 0;
        let mut pos = 0;
        for limb in &limbs {
            buffer |= (*limb as u128) << held;
            held += LIMB_BITS;
            while held >= 8 && pos < 31 {
                bytes[pos] = buffer as u8;
                buffer >>= 8;
                held -= 8;
                pos += 1;
            }
        }
        // 255 = 31*8 + 7: the last byte carries seven bits and a clear
        // top bit.
        bytes[31] = buffer as u8;
        debug_assert!(bytes[31] >> 7 == 0);

        bytes
    }

    /// The square of this element.
    ///
    /// Like the general product but with the cross terms collapsed, so
    /// only the upper triangle of limb pairs is computed.
    pub fn square(&self) -> FieldElement {
        let a = &self.0;
        for i in 0..5 {
            debug_assert!(a[i] < 1 << 54);
        }

        let mut cols = [0u128; 5];
        for i in 0..5 {
            for j in i..5 {
                let mut term = (a[i] as u128) * (a[j] as u128);
                if i != j {
                    term *= 2;
                }
                if i + j < 5 {
                    cols[i + j] += term;
                } else {
                    cols[i + j - 5] += term * 19;
                }
            }
        }

        FieldElement::carry_wide(cols)
    }

    /// Square `n` times in a row: `self^(2^n)`.  Requires `n > 0`.
    fn square_n(&self, n: u32) -> FieldElement {
        debug_assert!(n > 0);
        let mut out = self.square();
        for _ in 1..n {
            out = out.square();
        }
        out
    }

    /// The parity of the canonical representative: `Choice(1)` when the
    /// low bit is set.  This is the "sign" folded into point encodings.
    pub fn is_odd(&self) -> Choice {
        (self.to_bytes()[0] & 1).into()
    }

    /// `Choice(1)` exactly when this element is the zero residue.
    pub fn is_zero(&self) -> Choice {
        self.to_bytes().ct_eq(&[0u8; 32])
    }

    /// Raise to \\( 2\^{250} - 1 \\); also hands back `self^11`, which
    /// both exponentiation chains below need.
    ///
    /// Exponent bookkeeping: a name `z2_k_0` holds `self` raised to the
    /// all-ones exponent covering bits `k-1..0`.
    fn pow_2_250_minus_1(&self) -> (FieldElement, FieldElement) {
        let z2 = self.square();
        let z9 = &z2.square_n(2) * self;
        let z11 = &z9 * &z2;
        let z2_5_0 = &z11.square() * &z9;
        let z2_10_0 = &z2_5_0.square_n(5) * &z2_5_0;
        let z2_20_0 = &z2_10_0.square_n(10) * &z2_10_0;
        let z2_40_0 = &z2_20_0.square_n(20) * &z2_20_0;
        let z2_50_0 = &z2_40_0.square_n(10) * &z2_10_0;
        let z2_100_0 = &z2_50_0.square_n(50) * &z2_50_0;
        let z2_200_0 = &z2_100_0.square_n(100) * &z2_100_0;
        let z2_250_0 = &z2_200_0.square_n(50) * &z2_50_0;

        (z2_250_0, z11)
    }

    /// The multiplicative inverse, as \\( \mathrm{self}^{p-2} \\) by
    /// Fermat.  Constant time; maps zero to zero.
    pub fn invert(&self) -> FieldElement {
        // p - 2 = 2^255 - 21 = (2^250 - 1)·2^5 + 11.
        let (z2_250_0, z11) = self.pow_2_250_minus_1();
        &z2_250_0.square_n(5) * &z11
    }

    /// Raise to \\( (p-5)/8 = 2\^{252} - 3 \\), the exponent of the
    /// square-root candidate.
    fn pow_2_252_minus_3(&self) -> FieldElement {
        // 2^252 - 3 = (2^250 - 1)·2^2 + 1.
        let (z2_250_0, _) = self.pow_2_250_minus_1();
        &z2_250_0.square_n(2) * self
    }

    /// Try to compute a square root of the ratio \\( u/v \\).
    ///
    /// The candidate root is \\( b = (u v\^3)(u v\^7)^{(p-5)/8} \\).  If
    /// \\( v b\^2 = u \\) the candidate is a root; failing that, the
    /// candidate times \\( \sqrt{-1} \\) is retested.  If neither passes,
    /// the ratio has no square root.
    ///
    /// # Return
    ///
    /// `(Choice(1), b)` with \\( v b\^2 = u \\) when the ratio is square
    /// (including \\( u = 0 \\), which yields the zero root); otherwise
    /// `(Choice(0), _)` with a meaningless second component.  The root
    /// handed back is whichever of \\( \pm b \\) the computation lands
    /// on; callers that care about parity fix it up themselves.
    pub fn sqrt_ratio(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;

        let mut root = &(u * &v3) * &(u * &v7).pow_2_252_minus_3();
        let flipped = &root * &constants::SQRT_M1;

        let root_works = (v * &root.square()).ct_eq(u);
        let flipped_works = (v * &flipped.square()).ct_eq(u);

        root.conditional_assign(&flipped, flipped_works);

        (root_works | flipped_works, root)
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use subtle::ConditionallyNegatable;

    /// Field element holding a small integer.
    fn fe(n: u64) -> FieldElement {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        FieldElement::from_bytes(&bytes)
    }

    /// The residue 2^64, which no single limb of a small integer can
    /// reach; exercises cross-limb carries.
    fn two_to_64() -> FieldElement {
        let mut bytes = [0u8; 32];
        bytes[8] = 1;
        FieldElement::from_bytes(&bytes)
    }

    /// A fixed "random-looking" element below p for algebra tests.
    fn pattern(seed: u8) -> FieldElement {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = seed ^ (i as u8).wrapping_mul(0x37);
        }
        bytes[31] &= 0x3f;
        FieldElement::from_bytes(&bytes)
    }

    #[test]
    fn small_products() {
        assert_eq!(&fe(85) * &fe(85), fe(7225));
        assert_eq!(&fe(3) * &fe(5), fe(15));
        assert_eq!(fe(1u64 << 32).square(), two_to_64());
    }

    #[test]
    fn mul_matches_square() {
        let a = pattern(0xd1);
        assert_eq!(&a * &a, a.square());
    }

    #[test]
    fn distributivity() {
        let a = pattern(0x11);
        let b = pattern(0x5e);
        let c = pattern(0xa7);
        assert_eq!(&(&a + &b) * &c, &(&a * &c) + &(&b * &c));
    }

    #[test]
    fn multiplicative_identity() {
        let a = pattern(0x42);
        assert_eq!(&a * &FieldElement::ONE, a);
    }

    #[test]
    fn additive_wraparound() {
        // (p - 1) + 2 = 1
        assert_eq!(&FieldElement::MINUS_ONE + &fe(2), FieldElement::ONE);
        // 1 + (p - 1) = 0
        assert_eq!(&FieldElement::ONE + &FieldElement::MINUS_ONE, FieldElement::ZERO);
    }

    #[test]
    fn inversion() {
        let a = pattern(0x99);
        assert_eq!(&a * &a.invert(), FieldElement::ONE);
        assert_eq!(FieldElement::ONE.invert(), FieldElement::ONE);
        assert_eq!(&fe(2) * &fe(2).invert(), FieldElement::ONE);
    }

    #[test]
    fn encoding_is_canonical() {
        // p + 2 must encode as 2.
        let p_plus_two: [u8; 32] = [
            0xef, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0x7f,
        ];
        let two = FieldElement::from_bytes(&p_plus_two);
        assert_eq!(two.to_bytes(), fe(2).to_bytes());

        // A value already below p round-trips unchanged.
        let mut bytes = [0x57u8; 32];
        bytes[31] = 0x17;
        assert_eq!(FieldElement::from_bytes(&bytes).to_bytes(), bytes);
    }

    #[test]
    fn sign_bit_is_ignored_on_parse() {
        let mut with_high_bit = [0x39u8; 32];
        with_high_bit[31] = 0xb9; // top bit set
        let mut without_high_bit = with_high_bit;
        without_high_bit[31] = 0x39;
        assert_eq!(
            FieldElement::from_bytes(&with_high_bit),
            FieldElement::from_bytes(&without_high_bit),
        );
    }

    #[test]
    fn parity() {
        assert_eq!(FieldElement::ONE.is_odd().unwrap_u8(), 1);
        assert_eq!(fe(2).is_odd().unwrap_u8(), 0);
        // p is odd, so p - 1 is even.
        assert_eq!(FieldElement::MINUS_ONE.is_odd().unwrap_u8(), 0);
        assert_eq!(FieldElement::ZERO.is_zero().unwrap_u8(), 1);
        assert_eq!(FieldElement::ONE.is_zero().unwrap_u8(), 0);
    }

    #[test]
    fn sqrt_ratio_of_zero() {
        // u = 0 is trivially square, with the zero root.
        let (ok, root) = FieldElement::sqrt_ratio(&FieldElement::ZERO, &FieldElement::ONE);
        assert_eq!(ok.unwrap_u8(), 1);
        assert_eq!(root, FieldElement::ZERO);
        // 0/0 also lands in the "square" case.
        let (ok, root) = FieldElement::sqrt_ratio(&FieldElement::ZERO, &FieldElement::ZERO);
        assert_eq!(ok.unwrap_u8(), 1);
        assert_eq!(root, FieldElement::ZERO);
        // A nonzero numerator over zero is not square.
        let (ok, _) = FieldElement::sqrt_ratio(&FieldElement::ONE, &FieldElement::ZERO);
        assert_eq!(ok.unwrap_u8(), 0);
    }

    #[test]
    fn sqrt_ratio_squares_and_nonsquares() {
        // p = 5 (mod 8), so 2 is a quadratic nonresidue.
        let (ok, _) = FieldElement::sqrt_ratio(&fe(2), &FieldElement::ONE);
        assert_eq!(ok.unwrap_u8(), 0);

        // 4 is square; the root must satisfy root² = 4.
        let (ok, root) = FieldElement::sqrt_ratio(&fe(4), &FieldElement::ONE);
        assert_eq!(ok.unwrap_u8(), 1);
        assert_eq!(root.square(), fe(4));

        // 1/4 is square; v·root² = u must hold.
        let (ok, root) = FieldElement::sqrt_ratio(&FieldElement::ONE, &fe(4));
        assert_eq!(ok.unwrap_u8(), 1);
        assert_eq!(&fe(4) * &root.square(), FieldElement::ONE);
    }

    #[test]
    fn constant_time_selection() {
        let a = pattern(0x0b);
        let b = pattern(0xf4);

        assert_eq!(FieldElement::conditional_select(&a, &b, Choice::from(0)), a);
        assert_eq!(FieldElement::conditional_select(&a, &b, Choice::from(1)), b);

        let mut x = a;
        let mut y = b;
        FieldElement::conditional_swap(&mut x, &mut y, Choice::from(1));
        assert_eq!(x, b);
        assert_eq!(y, a);
    }

    #[test]
    fn conditional_negation() {
        let mut x = FieldElement::ONE;
        x.conditional_negate(Choice::from(1));
        assert_eq!(x, FieldElement::MINUS_ONE);
        x.conditional_negate(Choice::from(0));
        assert_eq!(x, FieldElement::MINUS_ONE);
        x.conditional_negate(Choice::from(1));
        assert_eq!(x, FieldElement::ONE);
    }
}
