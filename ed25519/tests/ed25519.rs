//! Integration tests for ed25519 signatures and verification.

use ed25519::*;

use rand::rngs::OsRng;

/// Test vectors from the original Ed25519 reference distribution
/// (`sign.input`, also published as RFC 8032 §7.1).  Each entry is
/// (secret key seed, public key, message, signature), hex-encoded.
static RFC8032_TEST_VECTORS: &[(&str, &str, &str, &str)] = &[
    (
        "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
        "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
        "",
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
         5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
    ),
    (
        "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
        "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
        "72",
        "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
         085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
    ),
    (
        "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
        "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
        "af82",
        "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac\
         18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
    ),
];

fn keypair_from_seed_hex(seed_hex: &str) -> Keypair {
    let seed = hex::decode(seed_hex).unwrap();
    let secret = SecretKey::from_bytes(&seed).unwrap();
    let public = PublicKey::from(&secret);
    Keypair { secret, public }
}

#[test]
fn rfc8032_known_answer_tests() {
    for (i, (seed_hex, public_hex, message_hex, signature_hex)) in
        RFC8032_TEST_VECTORS.iter().enumerate()
    {
        let keypair = keypair_from_seed_hex(seed_hex);
        let message = hex::decode(message_hex).unwrap();

        let expected_public = hex::decode(public_hex).unwrap();
        assert_eq!(
            &keypair.public.to_bytes()[..],
            &expected_public[..],
            "public key derivation failed for test vector {}",
            i
        );

        let expected_signature = hex::decode(signature_hex).unwrap();
        let signature = keypair.sign(&message);
        assert_eq!(
            &signature.to_bytes()[..],
            &expected_signature[..],
            "signature mismatch for test vector {}",
            i
        );

        assert!(
            keypair.verify(&message, &signature).is_ok(),
            "verification failed for test vector {}",
            i
        );
    }
}

#[test]
fn sign_verify_round_trip() {
    let mut csprng = OsRng;
    let keypair = Keypair::generate(&mut csprng).unwrap();

    let good: &[u8] = b"test message";
    let bad: &[u8] = b"wrong message";

    let good_sig = keypair.sign(good);
    let bad_sig = keypair.sign(bad);

    assert!(keypair.verify(good, &good_sig).is_ok());
    assert!(keypair.verify(good, &bad_sig).is_err());
    assert!(keypair.verify(bad, &good_sig).is_err());
}

#[test]
fn verify_rejects_wrong_key() {
    let mut csprng = OsRng;
    let keypair_a = Keypair::generate(&mut csprng).unwrap();
    let keypair_b = Keypair::generate(&mut csprng).unwrap();

    let message: &[u8] = b"test message";
    let signature = keypair_a.sign(message);

    assert!(keypair_b.verify(message, &signature).is_err());
}

#[test]
fn verify_rejects_corrupted_signature() {
    let mut csprng = OsRng;
    let keypair = Keypair::generate(&mut csprng).unwrap();

    let message: &[u8] = b"test message";
    let mut bytes = keypair.sign(message).to_bytes();

    // flip one bit in R
    bytes[0] ^= 1;
    match Signature::from_bytes(&bytes) {
        // R is only decompressed during verification, so the parse may
        // succeed; verification must then fail.
        Ok(bad_sig) => assert!(keypair.verify(message, &bad_sig).is_err()),
        Err(_) => (),
    }
}

#[test]
fn signature_unreduced_scalar_rejected() {
    // The s half of a signature must be an integer below the group
    // order.  Setting the top bits pushes any reduced s above l, so the
    // parser must refuse the result.
    let mut csprng = OsRng;
    let keypair = Keypair::generate(&mut csprng).unwrap();
    let message: &[u8] = b"test message";
    let mut bytes = keypair.sign(message).to_bytes();

    bytes[63] |= 0b1110_0000;
    assert!(Signature::from_bytes(&bytes).is_err());
}

#[test]
fn public_key_byte_round_trip() {
    let mut csprng = OsRng;
    let keypair = Keypair::generate(&mut csprng).unwrap();

    let bytes = keypair.public.to_bytes();
    let parsed = PublicKey::from_bytes(&bytes).unwrap();

    assert_eq!(parsed, keypair.public);
}

#[test]
fn public_key_sign_bit_flip_changes_key() {
    // Flipping the x-parity bit of an encoding must never produce the
    // same point: it either decodes to a different (negated) point or is
    // rejected outright.
    let mut csprng = OsRng;
    let keypair = Keypair::generate(&mut csprng).unwrap();

    let mut flipped = keypair.public.to_bytes();
    flipped[31] ^= 0x80;

    if let Ok(parsed) = PublicKey::from_bytes(&flipped) {
        assert_ne!(parsed, keypair.public);
    }
}

#[test]
fn keypair_byte_round_trip() {
    let mut csprng = OsRng;
    let keypair = Keypair::generate(&mut csprng).unwrap();

    let bytes = keypair.to_bytes();
    assert_eq!(bytes.len(), KEYPAIR_LENGTH);

    let parsed = Keypair::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.secret.to_bytes(), keypair.secret.to_bytes());
    assert_eq!(parsed.public, keypair.public);
    assert_eq!(parsed.to_bytes()[..], bytes[..]);
}

#[test]
fn keypair_from_bytes_rejects_bad_lengths() {
    assert!(Keypair::from_bytes(&[0u8; 63]).is_err());
    assert!(Keypair::from_bytes(&[0u8; 65]).is_err());
}

#[test]
fn public_key_from_bytes_rejects_invalid_encodings() {
    // A non-canonical y-coordinate: p + 1 = 2^255 - 18, which decodes to
    // the residue 1 but is not its canonical representative.
    let noncanonical_y: [u8; 32] = [
        0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ];
    assert!(PublicKey::from_bytes(&noncanonical_y).is_err());

    // wrong length
    assert!(PublicKey::from_bytes(&[0u8; 31]).is_err());
}

#[test]
fn signatures_are_deterministic() {
    let keypair = keypair_from_seed_hex(RFC8032_TEST_VECTORS[0].0);
    let message: &[u8] = b"deterministic nonces mean deterministic signatures";

    let sig1 = keypair.sign(message);
    let sig2 = keypair.sign(message);

    assert_eq!(sig1.to_bytes()[..], sig2.to_bytes()[..]);
}
