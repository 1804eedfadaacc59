// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! Arithmetic modulo the basepoint order
//! \\( \ell = 2\^{252} + 27742317777372353535851937790883648493 \\).
//!
//! A [`Scalar`] is stored as its 32-byte little-endian encoding, which
//! is the form scalar multiplication consumes bit by bit.  Actual
//! arithmetic unpacks into [`UnpackedScalar`] — five 52-bit limbs — and
//! runs through Montgomery reduction with respect to the radix
//! \\( R = 2\^{260} \\).  Limbs of 52 bits leave exactly enough slack to
//! fold a 512-bit hash output (the EdDSA reduction) through the same
//! machinery.
//!
//! Reductions and multiplications here are constant-time; signing feeds
//! secret scalars through them.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};

use subtle::Choice;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants;

/// Mask of the low 52 bits.
const LOW_52_BITS: u64 = (1u64 << 52) - 1;

/// Widening product of two limbs.
#[inline(always)]
const fn prod(a: u64, b: u64) -> u128 {
    (a as u128) * (b as u128)
}

/// Read the 52-bit window starting at bit `bit` of a little-endian byte
/// string; windows running past the end are zero-padded.
#[inline(always)]
fn window52(bytes: &[u8], bit: usize) -> u64 {
    let mut word = 0u64;
    for k in 0..8 {
        let idx = bit / 8 + k;
        if idx < bytes.len() {
            word |= (bytes[idx] as u64) << (8 * k);
        }
    }
    (word >> (bit % 8)) & LOW_52_BITS
}

/// An integer modulo the basepoint order, as 32 little-endian bytes.
///
/// Everything this crate's arithmetic produces is fully reduced; the
/// `from_bits*` constructors additionally admit unreduced 255-bit
/// values, which is what EdDSA's clamped exponents are.
#[derive(Copy, Clone, Hash)]
pub struct Scalar {
    pub(crate) bytes: [u8; 32],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "Scalar({:?})", &self.bytes)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Scalar { bytes }
    }
}

// ------------------------------------------------------------------------
// Ring operations
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        // Both operands are reduced byte encodings, so the limb-level
        // add-then-correct stays below 2l throughout.
        UnpackedScalar::add(&self.unpack(), &rhs.unpack()).pack()
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> AddAssign<&'b Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &'b Scalar) {
        *self = (self as &Scalar) + rhs;
    }
}

impl AddAssign<Scalar> for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        *self += &rhs;
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::mul(&self.unpack(), &rhs.unpack()).pack()
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> MulAssign<&'b Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &'b Scalar) {
        *self = (self as &Scalar) * rhs;
    }
}

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        // Reduce first: the byte form may hold an unreduced 255-bit
        // value, and the limb subtraction needs its input below l.
        UnpackedScalar::sub(&UnpackedScalar::ZERO, &self.reduce().unpack()).pack()
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -&self
    }
}

// ------------------------------------------------------------------------
// Construction and encoding
// ------------------------------------------------------------------------

impl Scalar {
    /// The scalar \\( 0 \\).
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };

    /// The scalar \\( 1 \\).
    pub const ONE: Scalar = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// Interpret 32 little-endian bytes as an integer and reduce it
    /// modulo \\( \ell \\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        Scalar { bytes }.reduce()
    }

    /// Interpret 64 little-endian bytes as an integer and reduce it
    /// modulo \\( \ell \\) — the reduction EdDSA applies to its SHA-512
    /// digests.
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 64]) -> Scalar {
        UnpackedScalar::from_wide_bytes(bytes).pack()
    }

    /// Accept 32 bytes only if they are the canonical encoding of a
    /// scalar, i.e. an integer below \\( \ell \\).
    ///
    /// Verification uses this to reject out-of-range `s` components.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Option<Scalar> {
        let high_bit_clear = bytes[31] >> 7 == 0;
        let candidate = Scalar { bytes };
        if high_bit_clear && candidate == candidate.reduce() {
            Some(candidate)
        } else {
            None
        }
    }

    /// Keep the low 255 bits of the input without reducing modulo
    /// \\( \ell \\).  For bit-pattern scalars (clamped exponents, test
    /// harnesses) rather than field arithmetic.
    pub fn from_bits(mut bytes: [u8; 32]) -> Scalar {
        bytes[31] &= 0b0111_1111;
        Scalar { bytes }
    }

    /// Apply the EdDSA exponent clamp and keep the result unreduced:
    /// the low three bits are cleared (cofactor annihilation) and bit
    /// 254 is forced on with bit 255 off (fixed bit length).
    pub fn from_bits_clamped(mut bytes: [u8; 32]) -> Scalar {
        bytes[0] &= 0b1111_1000;
        bytes[31] &= 0b0011_1111;
        bytes[31] |= 0b0100_0000;
        Scalar { bytes }
    }

    /// The 32-byte little-endian encoding of this scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Borrow the 32-byte little-endian encoding of this scalar.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Split the byte form into 52-bit limbs.
    pub(crate) fn unpack(&self) -> UnpackedScalar {
        UnpackedScalar::from_bytes(&self.bytes)
    }

    /// Fully reduce modulo \\( \ell \\): one Montgomery round applied to
    /// `self * R` divides the \\(R\\) straight back out.
    fn reduce(&self) -> Scalar {
        let wide = UnpackedScalar::widening_mul(&self.unpack(), &constants::MONTGOMERY_R);
        UnpackedScalar::montgomery_reduce(&wide).pack()
    }

    // --------------------------------------------------------------------
    // Recodings for the multiplication strategies
    // --------------------------------------------------------------------

    /// All 256 bits, least significant first, for the constant-time
    /// ladder (which consumes every one of them unconditionally).
    pub(crate) fn bits(&self) -> [u8; 256] {
        let mut out = [0u8; 256];
        for (i, byte) in self.bytes.iter().enumerate() {
            for j in 0..8 {
                out[8 * i + j] = (byte >> j) & 1;
            }
        }
        out
    }

    /// Signed radix-16 digits: 64 values in \\([-8, 8)\\) (the last may
    /// reach \\(8\\)) satisfying
    /// \\( s = \sum_i d\_i \cdot 16\^i \\).
    ///
    /// Requires bit 255 clear, which holds for every reduced or clamped
    /// scalar.
    pub(crate) fn radix_16_digits(&self) -> [i8; 64] {
        debug_assert!(self.bytes[31] <= 127);

        // Nibbles first...
        let mut digits = [0i8; 64];
        for (i, byte) in self.bytes.iter().enumerate() {
            digits[2 * i] = (byte & 0x0f) as i8;
            digits[2 * i + 1] = (byte >> 4) as i8;
        }

        // ... then borrow upward to recenter each digit from [0, 16)
        // into [-8, 8).  The final digit absorbs at most a +1 borrow.
        for i in 0..63 {
            let over = (digits[i] + 8) >> 4;
            digits[i] -= over << 4;
            digits[i + 1] += over;
        }

        digits
    }

    /// Width-`w` non-adjacent form: signed odd digits of magnitude below
    /// \\(2\^{w-1}\\), any two nonzero digits at least `w` positions
    /// apart.  Used by the variable-time multiplications, so this runs
    /// on public data only.
    pub(crate) fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        // Width bounds: the NAF needs w >= 2, and i8 digits cap w at 8.
        debug_assert!(w >= 2);
        debug_assert!(w <= 8);

        // Five words, the top one zero, so a window read near bit 255
        // can always borrow from the word above.
        let mut words = [0u64; 5];
        for (i, chunk) in self.bytes.chunks(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            words[i] = u64::from_le_bytes(word);
        }

        let window = 1u64 << w;
        let mut digits = [0i8; 256];
        let mut pos = 0;
        let mut carry = 0u64;
        while pos < 256 {
            let word = pos / 64;
            let offset = pos % 64;
            let bits = if offset + w <= 64 {
                words[word] >> offset
            } else {
                (words[word] >> offset) | (words[word + 1] << (64 - offset))
            };
            let value = carry + (bits & (window - 1));

            if value & 1 == 0 {
                // Even window: nothing to emit here.  An outstanding
                // carry stays outstanding, since the bit it would have
                // cleared is still below us.
                pos += 1;
                continue;
            }

            if value < window / 2 {
                carry = 0;
                digits[pos] = value as i8;
            } else {
                // Emit value - 2^w and push the difference upward.
                carry = 1;
                digits[pos] = (value as i8).wrapping_sub(window as i8);
            }
            pos += w;
        }

        digits
    }
}

// ------------------------------------------------------------------------
// Limb-level arithmetic
// ------------------------------------------------------------------------

/// A scalar as five 52-bit limbs, the working form for arithmetic
/// modulo \\( \ell \\).
#[derive(Copy, Clone, Debug)]
pub(crate) struct UnpackedScalar(pub(crate) [u64; 5]);

impl UnpackedScalar {
    /// The zero scalar.
    pub const ZERO: UnpackedScalar = UnpackedScalar([0, 0, 0, 0, 0]);

    /// Split 32 bytes into 52-bit limbs (no reduction).
    pub fn from_bytes(bytes: &[u8; 32]) -> UnpackedScalar {
        let mut limbs = [0u64; 5];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = window52(bytes, 52 * i);
        }
        UnpackedScalar(limbs)
    }

    /// Reduce a 512-bit little-endian integer modulo \\( \ell \\).
    ///
    /// The value is split at the Montgomery radix as
    /// \\( v = \mathrm{lo} + 2\^{260} \mathrm{hi} \\); one Montgomery
    /// multiplication by \\(R\\) leaves `lo` untouched
    /// (\\( \mathrm{lo} \cdot R / R \\)) while one by \\(R\^2\\) turns
    /// `hi` into \\( \mathrm{hi} \cdot 2\^{260} \\).
    pub fn from_wide_bytes(bytes: &[u8; 64]) -> UnpackedScalar {
        let mut lo = UnpackedScalar::ZERO;
        let mut hi = UnpackedScalar::ZERO;
        for i in 0..5 {
            lo.0[i] = window52(bytes, 52 * i);
            hi.0[i] = window52(bytes, 260 + 52 * i);
        }

        let lo = UnpackedScalar::montgomery_mul(&lo, &constants::MONTGOMERY_R);
        let hi = UnpackedScalar::montgomery_mul(&hi, &constants::MONTGOMERY_R_SQUARED);

        UnpackedScalar::add(&lo, &hi)
    }

    /// Stream the limbs back out as 32 little-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        let mut buffer: u128 = 0;
        let mut held = 0;
        let mut pos = 0;
        for limb in &self.0 {
            buffer |= (*limb as u128) << held;
            held += 52;
            while held >= 8 && pos < 32 {
                bytes[pos] = buffer as u8;
                buffer >>= 8;
                held -= 8;
                pos += 1;
            }
        }
        bytes
    }

    /// Repack into a [`Scalar`].
    pub fn pack(&self) -> Scalar {
        Scalar {
            bytes: self.to_bytes(),
        }
    }

    /// `a + b (mod l)`, assuming both inputs are below \\( \ell \\).
    pub fn add(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mut sum = [0u64; 5];
        let mut carry = 0u64;
        for i in 0..5 {
            let v = a.0[i] + b.0[i] + carry;
            sum[i] = v & LOW_52_BITS;
            carry = v >> 52;
        }

        // At most one subtraction of l brings the sum back into range.
        UnpackedScalar::sub(&UnpackedScalar(sum), &constants::GROUP_ORDER)
    }

    /// `a - b (mod l)`, assuming `b` is below \\( \ell \\).
    pub fn sub(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        // Limb-wise subtraction with borrow...
        let mut diff = [0u64; 5];
        let mut borrow = 0u64;
        for i in 0..5 {
            let v = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            diff[i] = v & LOW_52_BITS;
            borrow = v;
        }

        // ... then add l back in, masked by whether we went negative.
        let underflowed = (borrow >> 63).wrapping_neg();
        let mut carry = 0u64;
        for i in 0..5 {
            let v = diff[i] + (constants::GROUP_ORDER.0[i] & underflowed) + carry;
            diff[i] = v & LOW_52_BITS;
            carry = v >> 52;
        }

        UnpackedScalar(diff)
    }

    /// The full 104-bit-column schoolbook product of two scalars.
    #[inline(always)]
    pub(crate) fn widening_mul(a: &UnpackedScalar, b: &UnpackedScalar) -> [u128; 9] {
        let mut cols = [0u128; 9];
        for i in 0..5 {
            for j in 0..5 {
                cols[i + j] += prod(a.0[i], b.0[j]);
            }
        }
        cols
    }

    /// Montgomery reduction: divide a 9-column product by
    /// \\( R = 2\^{260} \\) modulo \\( \ell \\).
    ///
    /// Five rounds each pick a multiplier `n_i` making the lowest live
    /// column divisible by \\(2\^{52}\\) after adding `n_i * l`; once
    /// the low 260 bits are cleared, the top half shifted down is the
    /// answer (up to one final subtraction of \\( \ell \\)).
    #[inline(always)]
    #[rustfmt::skip] // column alignment
    pub(crate) fn montgomery_reduce(cols: &[u128; 9]) -> UnpackedScalar {
        // One elimination round: choose the multiplier killing the low
        // 52 bits of `col`, and push the rest up as a carry.
        #[inline(always)]
        fn eliminate(col: u128) -> (u128, u64) {
            let n = (col as u64).wrapping_mul(constants::ORDER_NEG_INVERSE) & LOW_52_BITS;
            ((col + prod(n, constants::GROUP_ORDER.0[0])) >> 52, n)
        }

        // Once the low half is gone: peel a finished output limb off.
        #[inline(always)]
        fn emit(col: u128) -> (u128, u64) {
            (col >> 52, (col as u64) & LOW_52_BITS)
        }

        // l's limb 3 is zero, so its products vanish from the columns.
        let l = &constants::GROUP_ORDER.0;

        let (c, n0) = eliminate(        cols[0]);
        let (c, n1) = eliminate(c + cols[1] + prod(n0, l[1]));
        let (c, n2) = eliminate(c + cols[2] + prod(n0, l[2]) + prod(n1, l[1]));
        let (c, n3) = eliminate(c + cols[3]                  + prod(n1, l[2]) + prod(n2, l[1]));
        let (c, n4) = eliminate(c + cols[4] + prod(n0, l[4])                  + prod(n2, l[2]) + prod(n3, l[1]));

        let (c, r0) = emit(c + cols[5] + prod(n1, l[4])                  + prod(n3, l[2]) + prod(n4, l[1]));
        let (c, r1) = emit(c + cols[6]                  + prod(n2, l[4])                  + prod(n4, l[2]));
        let (c, r2) = emit(c + cols[7]                                   + prod(n3, l[4]));
        let (c, r3) = emit(c + cols[8]                                                    + prod(n4, l[4]));
        let r4 = c as u64;

        // The quotient estimate can overshoot by one l.
        UnpackedScalar::sub(&UnpackedScalar([r0, r1, r2, r3, r4]), &constants::GROUP_ORDER)
    }

    /// `a * b (mod l)` in the plain (non-Montgomery) domain: reduce the
    /// product once (dividing by \\(R\\)), then multiply the \\(R\\)
    /// back in via \\(R\^2\\).
    pub fn mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let ab_over_r = UnpackedScalar::montgomery_reduce(&UnpackedScalar::widening_mul(a, b));
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::widening_mul(
            &ab_over_r,
            &constants::MONTGOMERY_R_SQUARED,
        ))
    }

    /// `a * b / R (mod l)` — one multiplication, one reduction.
    pub fn montgomery_mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::widening_mul(a, b))
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
