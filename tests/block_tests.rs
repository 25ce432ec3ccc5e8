//! Integration tests for the Blockcrypt block codec.
//!
//! Uses a deliberately weak HMAC-SHA256 KDF so tests run fast and blocks
//! are reproducible; real callers supply a memory-hard KDF.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use blockcrypt::{
    decode, encode, encode_with_options, estimate_data_length, BlockcryptError, EncodeOptions,
    Secret,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const MESSAGE_1: &str = "trust vast puppy supreme public course output august glimpse reunion kite rebel virus tail pass enhance divorce whip edit skill dismiss alpha divert ketchup";
const MESSAGE_2: &str = "this is a test\nyo";
const MESSAGE_3: &[u8] = b"yo";

const PASSPHRASE_1: &str = "lip gift name net sixth";
const PASSPHRASE_2: &str = "grunt daisy chow barge pants";
const PASSPHRASE_3: &str = "decor gooey wish kept pug";

/// Salt and IV pinned by the reference vectors below.
const REFERENCE_SALT: [u8; 16] = [
    0x0a, 0x89, 0xb8, 0xfd, 0xa1, 0x6d, 0x06, 0x36, 0x86, 0x76, 0xf6, 0xe3, 0x82, 0x2e, 0x54,
    0x37,
];
const REFERENCE_IV: [u8; 16] = [
    0xbb, 0x4e, 0x6e, 0x86, 0x14, 0x1e, 0xdc, 0xd0, 0xed, 0x09, 0xfd, 0xfd, 0xae, 0xcc, 0x67,
    0x8a,
];

/// First three header entries of the reference block: the descriptors
/// "0:156", "184:17" and "229:2" CBC-encrypted under each secret's key.
const REFERENCE_HEADERS_SIGNATURE: &str = "5093bc9bdc287b40ab124c87a8eb8b37d00df71ef09133a9ad261e14731a326dbdcfa97b0a679778eec895c528aeacad";

fn secrets() -> Vec<Secret> {
    vec![
        Secret::new(MESSAGE_1, PASSPHRASE_1),
        Secret::new(MESSAGE_2, PASSPHRASE_2),
        Secret::new(MESSAGE_3, PASSPHRASE_3),
    ]
}

/// Weak but deterministic KDF: HMAC-SHA256 keyed with the base64 of the raw
/// salt bytes, over the passphrase.
fn insecure_kdf(passphrase: &str, salt: &str) -> blockcrypt::Result<[u8; 32]> {
    let salt_bytes = hex::decode(salt)
        .map_err(|e| BlockcryptError::KeyDerivationFailed(format!("bad salt hex: {e}")))?;
    let mut mac = Hmac::<Sha256>::new_from_slice(BASE64.encode(salt_bytes).as_bytes())
        .map_err(|e| BlockcryptError::KeyDerivationFailed(e.to_string()))?;
    mac.update(passphrase.as_bytes());
    Ok(mac.finalize().into_bytes().into())
}

fn reference_options() -> EncodeOptions {
    EncodeOptions {
        salt: Some(REFERENCE_SALT),
        iv: Some(REFERENCE_IV),
        ..EncodeOptions::default()
    }
}

// ---------------------------------------------------------------------------
// Sizing
// ---------------------------------------------------------------------------

#[test]
fn estimates_data_length_of_first_secret() {
    assert_eq!(estimate_data_length(MESSAGE_1.as_bytes()), 184);
}

#[test]
fn block_matches_reference() {
    let block = encode_with_options(&secrets(), &insecure_kdf, &reference_options())
        .expect("encode reference block");

    assert_eq!(block.salt, REFERENCE_SALT);
    assert_eq!(block.iv, REFERENCE_IV);
    assert_eq!(block.headers.len(), 64);
    assert_eq!(block.data.len(), 384);

    // The real header entries sit at the front of the region, in input
    // order, before the noise padding begins; their offsets are exactly the
    // cumulative frame lengths (0, 156+28, 156+28+17+28).
    assert_eq!(hex::encode(&block.headers[..48]), REFERENCE_HEADERS_SIGNATURE);
}

#[test]
fn region_sizes_do_not_depend_on_secret_count() {
    let one = encode(&secrets()[..1], &insecure_kdf).expect("encode one");
    let three = encode(&secrets(), &insecure_kdf).expect("encode three");

    assert_eq!(one.headers.len(), three.headers.len());
    assert_eq!(one.data.len(), three.data.len());
}

// ---------------------------------------------------------------------------
// Encode validation
// ---------------------------------------------------------------------------

#[test]
fn rejects_no_secrets() {
    let result = encode(&[], &insecure_kdf);
    assert!(matches!(result, Err(BlockcryptError::InvalidSecrets)));
}

#[test]
fn rejects_invalid_secrets() {
    let result = encode(&[Secret::new("", "passphrase")], &insecure_kdf);
    assert!(matches!(result, Err(BlockcryptError::InvalidSecrets)));

    let result = encode(&[Secret::new("message", "")], &insecure_kdf);
    assert!(matches!(result, Err(BlockcryptError::InvalidSecrets)));
}

#[test]
fn rejects_invalid_headers_length() {
    let options = EncodeOptions {
        headers_length: Some(127),
        ..EncodeOptions::default()
    };
    let result = encode_with_options(&secrets(), &insecure_kdf, &options);
    assert!(matches!(result, Err(BlockcryptError::InvalidHeadersLength)));
}

#[test]
fn rejects_headers_length_too_short_for_headers() {
    let options = EncodeOptions {
        headers_length: Some(32),
        ..EncodeOptions::default()
    };
    let result = encode_with_options(&secrets(), &insecure_kdf, &options);
    assert!(matches!(result, Err(BlockcryptError::HeadersTooLong)));
}

#[test]
fn rejects_default_headers_length_too_short_for_five_secrets() {
    let mut five = secrets();
    five.push(Secret::new("foo", "mousy ditch pull prize stall"));
    five.push(Secret::new("bar", "lurk entry clip tidal cinch"));

    let result = encode(&five, &insecure_kdf);
    assert!(matches!(result, Err(BlockcryptError::HeadersTooLong)));
}

#[test]
fn accepts_unusual_but_valid_headers_length() {
    let options = EncodeOptions {
        headers_length: Some(120),
        ..EncodeOptions::default()
    };
    let block = encode_with_options(&secrets(), &insecure_kdf, &options).expect("encode");
    assert_eq!(block.headers.len(), 120);
}

#[test]
fn rejects_invalid_data_length() {
    // One byte below the estimate is not a multiple of 8.
    let options = EncodeOptions {
        data_length: Some(estimate_data_length(MESSAGE_1.as_bytes()) - 1),
        ..EncodeOptions::default()
    };
    let result = encode_with_options(&secrets()[..1], &insecure_kdf, &options);
    assert!(matches!(result, Err(BlockcryptError::InvalidDataLength)));
}

#[test]
fn rejects_minimum_data_length_minus_eight() {
    let options = EncodeOptions {
        headers_length: Some(128),
        data_length: Some(estimate_data_length(MESSAGE_1.as_bytes()) - 8),
        ..EncodeOptions::default()
    };
    let result = encode_with_options(&secrets()[..1], &insecure_kdf, &options);
    assert!(matches!(result, Err(BlockcryptError::DataTooLong)));
}

#[test]
fn rejects_data_length_too_short_for_data() {
    let options = EncodeOptions {
        data_length: Some(256),
        ..EncodeOptions::default()
    };
    let result = encode_with_options(&secrets(), &insecure_kdf, &options);
    assert!(matches!(result, Err(BlockcryptError::DataTooLong)));
}

#[test]
fn rejects_inferred_data_length_too_short_for_five_secrets() {
    let mut five = secrets();
    five.push(Secret::new(
        "apple detail zoo peanut plastic reject payment renew box coconut ivory media gold antique scorpion settle trip gaze rain slender sunny hidden mule old",
        "tart equal payer early axis",
    ));
    five.push(Secret::new(
        "leaf spawn guitar immune diagram height flag once giant tell pepper sugar sphere stomach coach erase fatigue lens tunnel love range flight embark control",
        "mate cedar brook flop snowy",
    ));

    let result = encode(&five, &insecure_kdf);
    assert!(matches!(result, Err(BlockcryptError::DataTooLong)));
}

#[test]
fn accepts_minimum_required_data_length() {
    let options = EncodeOptions {
        data_length: Some(estimate_data_length(MESSAGE_1.as_bytes())),
        ..EncodeOptions::default()
    };
    let block = encode_with_options(&secrets()[..1], &insecure_kdf, &options).expect("encode");
    assert_eq!(block.data.len(), 184);
}

#[test]
fn accepts_unusual_but_valid_data_length() {
    let options = EncodeOptions {
        data_length: Some(1016),
        ..EncodeOptions::default()
    };
    let block = encode_with_options(&secrets(), &insecure_kdf, &options).expect("encode");
    assert_eq!(block.data.len(), 1016);
}

// ---------------------------------------------------------------------------
// Decode round-trips
// ---------------------------------------------------------------------------

#[test]
fn decodes_each_secret_with_its_own_passphrase() {
    let block = encode(&secrets(), &insecure_kdf).expect("encode");

    let message = decode(PASSPHRASE_1, &block, &insecure_kdf).expect("decode secret 1");
    assert_eq!(message, MESSAGE_1.as_bytes());

    let message = decode(PASSPHRASE_2, &block, &insecure_kdf).expect("decode secret 2");
    assert_eq!(message, MESSAGE_2.as_bytes());

    let message = decode(PASSPHRASE_3, &block, &insecure_kdf).expect("decode secret 3");
    assert_eq!(message, MESSAGE_3);
}

#[test]
fn fails_to_decode_with_wrong_passphrase() {
    let block = encode(&secrets(), &insecure_kdf).expect("encode");

    let result = decode("foo", &block, &insecure_kdf);
    assert!(matches!(result, Err(BlockcryptError::HeaderNotFound)));
}

#[test]
fn unrelated_passphrases_find_no_header() {
    let block = encode(&secrets(), &insecure_kdf).expect("encode");

    // Deniability: decoding under keys that never touched the block must
    // exhaust the header search.
    for n in 0..16 {
        let passphrase = format!("wrong passphrase number {n}");
        let result = decode(&passphrase, &block, &insecure_kdf);
        assert!(
            matches!(result, Err(BlockcryptError::HeaderNotFound)),
            "passphrase {n:?} unexpectedly found a header"
        );
    }
}

#[test]
fn corrupted_headers_region_reports_header_not_found() {
    let mut block = encode(&secrets(), &insecure_kdf).expect("encode");
    block.headers = vec![0u8; block.headers.len()];

    let result = decode(PASSPHRASE_1, &block, &insecure_kdf);
    assert!(matches!(result, Err(BlockcryptError::HeaderNotFound)));
}

#[test]
fn corrupted_data_region_reports_decryption_failed() {
    let mut block = encode(&secrets(), &insecure_kdf).expect("encode");
    // The header entry still decrypts, but the frame it points at no longer
    // authenticates.
    block.data[0] ^= 0xFF;

    let result = decode(PASSPHRASE_1, &block, &insecure_kdf);
    assert!(matches!(result, Err(BlockcryptError::DecryptionFailed)));
}

#[test]
fn single_secret_roundtrip_at_minimum_data_length() {
    let options = EncodeOptions {
        data_length: Some(estimate_data_length(MESSAGE_2.as_bytes())),
        ..EncodeOptions::default()
    };
    let block =
        encode_with_options(&secrets()[1..2], &insecure_kdf, &options).expect("encode");

    let message = decode(PASSPHRASE_2, &block, &insecure_kdf).expect("decode");
    assert_eq!(message, MESSAGE_2.as_bytes());
}
