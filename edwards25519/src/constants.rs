// -*- mode: rust; -*-
//
// This file is part of edwards25519.

//! Curve parameters and distinguished group elements, plus the
//! process-wide basepoint tables.
//!
//! The numeric constants are the standard Ed25519 parameters, written in
//! the limb encodings of this crate's field and scalar types.  The two
//! tables derived from the basepoint are built lazily on first use and
//! published through [`std::sync::OnceLock`], so every thread observes a
//! fully initialized table or none at all.

#![allow(non_snake_case)]

use std::sync::OnceLock;

use crate::edwards::BasepointTable;
use crate::edwards::CompressedEdwardsY;
use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::models::PrecomputedPoint;
use crate::scalar::UnpackedScalar;
use crate::window::OddMultiplesTable;

/// The curve parameter `d = -121665/121666 (mod p)`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// `2d`, the constant the addition formula actually consumes.
pub(crate) const EDWARDS_2D: FieldElement = FieldElement([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// A fixed square root of -1 (mod p), used during point decoding.
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// The basepoint order
/// \\( \ell = 2\^{252} + 27742317777372353535851937790883648493 \\),
/// in 52-bit limbs.
pub(crate) const GROUP_ORDER: UnpackedScalar = UnpackedScalar([
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
]);

/// \\( -\ell^{-1} \pmod{2^{52}} \\), the Montgomery elimination factor.
pub(crate) const ORDER_NEG_INVERSE: u64 = 0x51da312547e1b;

/// \\( R = 2\^{260} \bmod \ell \\).
pub(crate) const MONTGOMERY_R: UnpackedScalar = UnpackedScalar([
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
]);

/// \\( R\^2 \bmod \ell \\).
pub(crate) const MONTGOMERY_R_SQUARED: UnpackedScalar = UnpackedScalar([
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
]);

/// The compressed form of the basepoint: \\( y = 4/5 \\) with even
/// \\(x\\), which encodes as `0x58` followed by thirty-one `0x66`s.
pub const ED25519_BASEPOINT_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66,
]);

/// The basepoint in extended coordinates.  Prefer
/// [`EdwardsPoint::mul_base`] over multiplying this point directly; the
/// precomputed table is far faster.
pub const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement([
        1738742601995546,
        1146398526822698,
        2070867633025821,
        562264141797630,
        587772402128613,
    ]),
    Y: FieldElement([
        1801439850948184,
        1351079888211148,
        450359962737049,
        900719925474099,
        1801439850948198,
    ]),
    Z: FieldElement([1, 0, 0, 0, 0]),
    T: FieldElement([
        1841354044333475,
        16398895984059,
        755974180946558,
        900171276175154,
        1821297809914039,
    ]),
};

/// The basepoint order \\( \ell \\) as a little-endian byte string.
pub(crate) const BASEPOINT_ORDER_BYTES: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

/// The odd multiples `[B, 3B, 5B, 7B, 9B, 11B, 13B, 15B]` of the
/// basepoint in precomputed affine form.  The runtime-built wide table
/// is cross-checked against these in the test suite.
pub(crate) const BASEPOINT_ODD_MULTIPLES: [PrecomputedPoint; 8] = [
    PrecomputedPoint {
        y_plus_x: FieldElement([
            1288382639258501,
            245678601348599,
            269427782077623,
            1462984067271730,
            137412439391563,
        ]),
        y_minus_x: FieldElement([
            62697248952638,
            204681361388450,
            631292143396476,
            338455783676468,
            1213667448819585,
        ]),
        xy2d: FieldElement([
            301289933810280,
            1259582250014073,
            1422107436869536,
            796239922652654,
            1953934009299142,
        ]),
    },
    PrecomputedPoint {
        y_plus_x: FieldElement([
            1601611775252272,
            1720807796594148,
            1132070835939856,
            1260455018889551,
            2147779492816911,
        ]),
        y_minus_x: FieldElement([
            316559037616741,
            2177824224946892,
            1459442586438991,
            1461528397712656,
            751590696113597,
        ]),
        xy2d: FieldElement([
            1850748884277385,
            1200145853858453,
            1068094770532492,
            672251375690438,
            1586055907191707,
        ]),
    },
    PrecomputedPoint {
        y_plus_x: FieldElement([
            769950342298419,
            132954430919746,
            844085933195555,
            974092374476333,
            726076285546016,
        ]),
        y_minus_x: FieldElement([
            425251763115706,
            608463272472562,
            442562545713235,
            837766094556764,
            374555092627893,
        ]),
        xy2d: FieldElement([
            1086255230780037,
            274979815921559,
            1960002765731872,
            929474102396301,
            1190409889297339,
        ]),
    },
    PrecomputedPoint {
        y_plus_x: FieldElement([
            665000864555967,
            2065379846933859,
            370231110385876,
            350988370788628,
            1233371373142985,
        ]),
        y_minus_x: FieldElement([
            2019367628972465,
            676711900706637,
            110710997811333,
            1108646842542025,
            517791959672113,
        ]),
        xy2d: FieldElement([
            965130719900578,
            247011430587952,
            526356006571389,
            91986625355052,
            2157223321444601,
        ]),
    },
    PrecomputedPoint {
        y_plus_x: FieldElement([
            1802695059465007,
            1664899123557221,
            593559490740857,
            2160434469266659,
            927570450755031,
        ]),
        y_minus_x: FieldElement([
            1725674970513508,
            1933645953859181,
            1542344539275782,
            1767788773573747,
            1297447965928905,
        ]),
        xy2d: FieldElement([
            1381809363726107,
            1430341051343062,
            2061843536018959,
            1551778050872521,
            2036394857967624,
        ]),
    },
    PrecomputedPoint {
        y_plus_x: FieldElement([
            1970894096313054,
            528066325833207,
            1619374932191227,
            2207306624415883,
            1169170329061080,
        ]),
        y_minus_x: FieldElement([
            2070390218572616,
            1458919061857835,
            624171843017421,
            1055332792707765,
            433987520732508,
        ]),
        xy2d: FieldElement([
            893653801273833,
            1168026499324677,
            1242553501121234,
            1306366254304474,
            1086752658510815,
        ]),
    },
    PrecomputedPoint {
        y_plus_x: FieldElement([
            213454002618221,
            939771523987438,
            1159882208056014,
            317388369627517,
            621213314200687,
        ]),
        y_minus_x: FieldElement([
            1971678598905747,
            338026507889165,
            762398079972271,
            655096486107477,
            42299032696322,
        ]),
        xy2d: FieldElement([
            177130678690680,
            1754759263300204,
            1864311296286618,
            1180675631479880,
            1292726903152791,
        ]),
    },
    PrecomputedPoint {
        y_plus_x: FieldElement([
            1913163449625248,
            460779200291993,
            2193883288642314,
            1008900146920800,
            1721983679009502,
        ]),
        y_minus_x: FieldElement([
            1070401523076875,
            1272492007800961,
            1910153608563310,
            2075579521696771,
            1191169788841221,
        ]),
        xy2d: FieldElement([
            692896803108118,
            500174642072499,
            2068223309439677,
            1162190621851337,
            1426986007309901,
        ]),
    },
];

/// The radix-16 table of basepoint multiples behind
/// [`EdwardsPoint::mul_base`].
///
/// Built on first use; `OnceLock` guarantees initialization happens
/// exactly once and is fully visible before any reader proceeds.
pub fn basepoint_table() -> &'static BasepointTable {
    static TABLE: OnceLock<BasepointTable> = OnceLock::new();
    TABLE.get_or_init(|| BasepointTable::new(&ED25519_BASEPOINT_POINT))
}

/// The wide table of odd basepoint multiples `[B, 3B, ..., 127B]` used
/// by variable-time verification, with the same publish-once setup as
/// [`basepoint_table`].
pub(crate) fn basepoint_odd_multiples() -> &'static OddMultiplesTable<PrecomputedPoint, 64> {
    static TABLE: OnceLock<OddMultiplesTable<PrecomputedPoint, 64>> = OnceLock::new();
    TABLE.get_or_init(|| OddMultiplesTable::from(&ED25519_BASEPOINT_POINT))
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::ValidityCheck;

    #[test]
    fn d_is_the_advertised_ratio() {
        let num = -&FieldElement([121665, 0, 0, 0, 0]);
        let den = FieldElement([121666, 0, 0, 0, 0]);
        let d = &num * &den.invert();
        assert_eq!(d, EDWARDS_D);
        assert_eq!(&d + &d, EDWARDS_2D);
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        assert_eq!(&SQRT_M1 * &SQRT_M1, FieldElement::MINUS_ONE);
    }

    #[test]
    fn basepoint_constant_is_on_curve() {
        assert!(ED25519_BASEPOINT_POINT.is_valid());
        assert_eq!(
            ED25519_BASEPOINT_POINT.compress(),
            ED25519_BASEPOINT_COMPRESSED
        );
    }

    #[test]
    fn runtime_odd_multiples_match_published_table() {
        let table = basepoint_odd_multiples();
        for (i, published) in BASEPOINT_ODD_MULTIPLES.iter().enumerate() {
            assert_eq!(table.select(2 * i + 1), *published);
        }
    }
}
