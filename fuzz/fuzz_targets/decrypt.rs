#![no_main]
// Decryption of arbitrary envelopes with private key 1. Each input is tried
// as is, behind a valid public header so it reaches the record parser, and
// as base64 and armored text.
use ecmsg::DecryptingKey;
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static KEY: Lazy<DecryptingKey<'static>> = Lazy::new(|| {
    DecryptingKey::from_bytes(&[[0u8; 31].as_slice(), &[1]].concat()).unwrap()
});

const PUBLIC_HEADER: [u8; 7] = [0x6a, 0x6a, 0x00, 0x00, 0x02, 0x50, 0x92];

// each record costs a full scalar multiplication
const MAX_RECORDS: usize = 4;

fuzz_target!(|data: &[u8]| {
    if data.len() > PUBLIC_HEADER.len() + MAX_RECORDS * 66 {
        return;
    }

    let _ = KEY.decrypt_bytes(data);
    let _ = KEY.decrypt_bytes(&[PUBLIC_HEADER.as_slice(), data].concat());

    if let Ok(text) = core::str::from_utf8(data) {
        let _ = KEY.decrypt(text);

        if let Ok(armored) = ecmsg::armor::decode(text) {
            let _ = KEY.decrypt(&armored.ciphertext);
        }
    }
});
