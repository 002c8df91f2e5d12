//! Bitcoin-style addresses and WIF private keys.

use crate::{Error, Result};
use num_bigint::BigUint;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Version byte of pay-to-public-key-hash addresses.
pub const ADDRESS_VERSION: u8 = 0x00;

/// Version byte of wallet import format private keys.
pub const WIF_VERSION: u8 = 0x80;

/// Trailing byte marking a WIF key whose public key is used compressed.
const WIF_COMPRESSED: u8 = 0x01;

/// RIPEMD-160 of the SHA-256 of `data`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let digest = Ripemd160::digest(Sha256::digest(data));
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&digest);
    hash
}

/// Base58 encoding of `payload` followed by its 4-byte double SHA-256
/// checksum.
pub fn encode_base58check(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

/// Decode base58check text, verifying and removing the checksum.
pub fn decode_base58check(text: &str) -> Result<Vec<u8>> {
    bs58::decode(text.trim())
        .with_check(None)
        .into_vec()
        .map_err(|_| Error::Address)
}

/// Address for a public key hash under the given version byte.
pub fn hash160_to_address(hash: &[u8; 20], version: u8) -> String {
    let mut payload = Vec::with_capacity(1 + hash.len());
    payload.push(version);
    payload.extend_from_slice(hash);
    encode_base58check(&payload)
}

/// Address for a SEC1-encoded public key. The compressed and uncompressed
/// encodings of one key have different addresses.
pub fn public_key_to_address(public_key: &[u8]) -> String {
    hash160_to_address(&hash160(public_key), ADDRESS_VERSION)
}

/// Decode a private key in wallet import format into its scalar.
pub fn decode_wif(wif: &str) -> Result<BigUint> {
    let payload = decode_base58check(wif)?;

    let key = match payload.split_first() {
        Some((&WIF_VERSION, key)) => key,
        _ => return Err(Error::Address),
    };

    let key = match key {
        [key @ .., WIF_COMPRESSED] if key.len() == 32 => key,
        key if key.len() == 32 => key,
        _ => return Err(Error::Address),
    };

    Ok(BigUint::from_bytes_be(key))
}

#[cfg(test)]
mod tests {
    use super::{
        decode_base58check, decode_wif, encode_base58check, hash160, public_key_to_address,
    };
    use crate::Error;
    use hex_literal::hex;
    use num_bigint::BigUint;

    #[test]
    fn hash160_of_empty_input() {
        assert_eq!(hash160(b""), hex!("b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"));
    }

    #[test]
    fn base58check_round_trip() {
        let payload = hex!("00010966776006953d5567439e5e39f86a0d273bee");
        let text = encode_base58check(&payload);
        assert_eq!(text, "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM");
        assert_eq!(decode_base58check(&text).unwrap(), payload);
    }

    #[test]
    fn base58check_rejects_bad_checksum() {
        assert_eq!(
            decode_base58check("16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvN"),
            Err(Error::Address)
        );
        assert_eq!(decode_base58check("0OIl"), Err(Error::Address));
    }

    #[test]
    fn wif_without_compression_flag() {
        assert_eq!(
            decode_wif("5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf").unwrap(),
            BigUint::from(1u32)
        );
    }

    #[test]
    fn wif_rejects_addresses() {
        assert_eq!(
            decode_wif("1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"),
            Err(Error::Address)
        );
    }

    #[test]
    fn wif_with_compression_flag() {
        assert_eq!(
            decode_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap(),
            BigUint::from(1u32)
        );
    }

    #[test]
    fn generator_addresses() {
        let uncompressed = hex!(
            "0479BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798
             483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"
        );
        let compressed = hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");

        assert_eq!(
            public_key_to_address(&uncompressed),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
        assert_eq!(
            public_key_to_address(&compressed),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }
}
