use hill_crypto::alphabet::Alphabet;
use hill_crypto::cipher::{HillKey, blocks_to_symbols, symbols_to_blocks};
use hill_crypto::ring::Ring;

use quickcheck_macros::quickcheck;

fn to_uppercase_text(data: &[u8]) -> String {
    data.iter().map(|&b| (b'A' + b % 26) as char).collect()
}

#[quickcheck]
fn prop_alphabet_round_trip(data: Vec<u8>) -> bool {
    let text = to_uppercase_text(&data);
    let alphabet = Alphabet::classic();

    let symbols = alphabet.text_to_symbols(&text).unwrap();
    alphabet.symbols_to_text(&symbols).unwrap() == text
}

#[quickcheck]
fn prop_encode_decode_blocks_is_identity(data: Vec<u8>) -> bool {
    let ring = Ring::try_with(26).unwrap();
    let key = HillKey::try_with(vec![vec![1, 2], vec![3, 5]], ring).unwrap();

    let symbols: Vec<i64> = data.iter().map(|&b| (b % 26) as i64).collect();
    let blocks = symbols_to_blocks(&symbols, key.order(), 0);

    let encoded = key.encode_blocks(&blocks).unwrap();
    key.decode_blocks(&encoded).unwrap() == blocks
}

#[quickcheck]
fn prop_encode_decode_blocks_is_identity_order_three(data: Vec<u8>) -> bool {
    let ring = Ring::try_with(26).unwrap();
    let key = HillKey::try_with(
        vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]],
        ring,
    )
    .unwrap();

    let symbols: Vec<i64> = data.iter().map(|&b| (b % 26) as i64).collect();
    let blocks = symbols_to_blocks(&symbols, key.order(), 0);

    let encoded = key.encode_blocks(&blocks).unwrap();
    key.decode_blocks(&encoded).unwrap() == blocks
}

#[quickcheck]
fn prop_text_round_trip_reproduces_padded_plaintext(data: Vec<u8>) -> bool {
    let text = to_uppercase_text(&data);
    let ring = Ring::try_with(26).unwrap();
    let key = HillKey::try_with(vec![vec![3, 3], vec![2, 5]], ring).unwrap();
    let alphabet = Alphabet::classic();

    let cipher = key.encrypt(&text, &alphabet).unwrap();
    let decoded = key.decrypt(&cipher, &alphabet).unwrap();

    // The decoded text is the plaintext plus any wrap-letter padding.
    decoded.starts_with(&text)
        && decoded.len() % key.order() == 0
        && decoded[text.len()..]
            .chars()
            .all(|c| c == alphabet.wrap_letter())
}

#[quickcheck]
fn prop_flatten_inverts_chunking(data: Vec<u8>) -> bool {
    let symbols: Vec<i64> = data.iter().map(|&b| (b % 26) as i64).collect();
    let blocks = symbols_to_blocks(&symbols, 3, 0);

    let flat = blocks_to_symbols(&blocks);
    // The flat sequence is the original plus padding.
    flat.len() % 3 == 0 && flat[..symbols.len()] == symbols[..]
}
