// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! Tables of point multiples for windowed scalar multiplication.
//!
//! [`LookupTable`] serves the constant-time radix-16 path: its `select`
//! touches every entry and assembles the answer with masked moves, so
//! the access pattern is independent of the (secret) digit.
//! [`OddMultiplesTable`] serves the variable-time NAF path, where the
//! digits are public and a plain array index is fine.

use core::ops::Neg;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::edwards::EdwardsPoint;
use crate::models::CachedPoint;
use crate::models::PrecomputedPoint;
use crate::traits::Identity;

/// The multiples \\([P, 2P, \ldots, 8P]\\) of some point \\(P\\),
/// supporting constant-time signed-digit lookup.
#[derive(Copy, Clone, Debug)]
pub struct LookupTable<T>(pub(crate) [T; 8]);

impl<T> LookupTable<T>
where
    T: Identity + ConditionallySelectable,
    for<'a> &'a T: Neg<Output = T>,
{
    /// Return \\(d \cdot P\\) for a signed digit \\(d \in [-8, 8]\\),
    /// in constant time.
    ///
    /// The whole table is scanned with an equality mask per entry, and
    /// the digit's sign is applied afterwards by a masked move of the
    /// negation, so neither the memory trace nor the instruction trace
    /// depends on `digit`.
    pub fn select(&self, digit: i8) -> T {
        debug_assert!(digit >= -8);
        debug_assert!(digit <= 8);

        // The sign, and |digit|, both without branching: subtracting
        // twice the masked value negates exactly the negative digits.
        let is_negative = (digit as u8) >> 7;
        let sign_mask = digit >> 7; // all-ones for negative digits
        let magnitude = (digit - ((sign_mask & digit) << 1)) as u8;

        // Accumulate the entry whose (1-based) index equals |digit|;
        // digit 0 leaves the identity in place.
        let mut entry = T::identity();
        for (j, candidate) in self.0.iter().enumerate() {
            let wanted = magnitude.ct_eq(&(j as u8 + 1));
            entry.conditional_assign(candidate, wanted);
        }

        // Fold the sign back in.
        let negated = -&entry;
        entry.conditional_assign(&negated, Choice::from(is_negative));
        entry
    }
}

impl<T: Copy + Default> Default for LookupTable<T> {
    fn default() -> LookupTable<T> {
        LookupTable([T::default(); 8])
    }
}

impl<'a> From<&'a EdwardsPoint> for LookupTable<CachedPoint> {
    fn from(point: &'a EdwardsPoint) -> Self {
        let mut multiples = [point.to_cached(); 8];
        for j in 1..8 {
            multiples[j] = (point + &multiples[j - 1]).to_extended().to_cached();
        }
        LookupTable(multiples)
    }
}

impl<'a> From<&'a EdwardsPoint> for LookupTable<PrecomputedPoint> {
    fn from(point: &'a EdwardsPoint) -> Self {
        let mut multiples = [point.to_precomputed(); 8];
        for j in 1..8 {
            multiples[j] = (point + &multiples[j - 1]).to_extended().to_precomputed();
        }
        LookupTable(multiples)
    }
}

/// The odd multiples \\([A, 3A, 5A, \ldots, (2N-1)A]\\) of a point
/// \\(A\\), for sliding-window NAF evaluation.
///
/// `N = 8` covers width-5 digits, `N = 64` width-8 digits.  Lookups are
/// plain indexing and therefore variable-time; the NAF paths only ever
/// see public scalars.
#[derive(Copy, Clone, Debug)]
pub(crate) struct OddMultiplesTable<T, const N: usize>(pub(crate) [T; N]);

impl<T: Copy, const N: usize> OddMultiplesTable<T, N> {
    /// Fetch \\(x \cdot A\\) for odd \\(x < 2N\\).
    pub fn select(&self, x: usize) -> T {
        debug_assert!(x & 1 == 1);
        debug_assert!(x < 2 * N);

        self.0[x >> 1]
    }
}

impl<'a, const N: usize> From<&'a EdwardsPoint> for OddMultiplesTable<CachedPoint, N> {
    fn from(point: &'a EdwardsPoint) -> Self {
        let mut odd = [point.to_cached(); N];
        let twice = point.double();
        for j in 1..N {
            odd[j] = (&twice + &odd[j - 1]).to_extended().to_cached();
        }
        OddMultiplesTable(odd)
    }
}

impl<'a, const N: usize> From<&'a EdwardsPoint> for OddMultiplesTable<PrecomputedPoint, N> {
    fn from(point: &'a EdwardsPoint) -> Self {
        let mut odd = [point.to_precomputed(); N];
        let twice = point.double();
        for j in 1..N {
            odd[j] = (&twice + &odd[j - 1]).to_extended().to_precomputed();
        }
        OddMultiplesTable(odd)
    }
}
