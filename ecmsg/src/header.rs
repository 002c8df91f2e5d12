//! Envelope headers.
//!
//! Both headers carry a version byte and a 2-byte big-endian payload
//! length in front of a version-specific payload. For version 0:
//!
//! ```text
//! public header:  6a 6a || version || length || sha256(pubkey)[..2]
//! private header:          version || length || plaintext length (4) || sha256(plaintext)[..2]
//! ```
//!
//! The public header precedes the encrypted records in the clear. The
//! private header is prepended to the plaintext and encrypted with it.

use crate::{Error, Result};
use sha2::{Digest, Sha256};

/// Magic bytes opening every envelope.
pub const MAGIC: [u8; 2] = [0x6a, 0x6a];

/// Header version written by this crate, and the only one it reads.
pub const VERSION: u8 = 0;

/// Size of a truncated SHA-256 checksum.
pub const CHECKSUM_SIZE: usize = 2;

/// Truncated SHA-256 checksum.
pub type Checksum = [u8; CHECKSUM_SIZE];

/// First two bytes of the SHA-256 digest of `data`.
pub fn checksum(data: &[u8]) -> Checksum {
    let digest = Sha256::digest(data);
    [digest[0], digest[1]]
}

/// Header encrypted together with the plaintext.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrivateHeader {
    /// Header version.
    pub version: u8,

    /// Plaintext length in bytes.
    pub length: u32,

    /// Checksum of the plaintext.
    pub checksum: Checksum,
}

impl PrivateHeader {
    /// Version 0 payload: length and checksum.
    const PAYLOAD_LEN: usize = 4 + CHECKSUM_SIZE;

    /// Build the header for `msg`.
    pub fn for_message(msg: &[u8], version: u8) -> Result<Self> {
        check_version(version)?;

        Ok(Self {
            version,
            length: u32::try_from(msg.len()).map_err(|_| Error::MessageTooLong)?,
            checksum: checksum(msg),
        })
    }

    /// Serialize this header.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        check_version(self.version)?;

        let mut payload = Vec::with_capacity(Self::PAYLOAD_LEN);
        payload.extend_from_slice(&self.length.to_be_bytes());
        payload.extend_from_slice(&self.checksum);

        let mut out = Vec::with_capacity(3 + payload.len());
        write_framed(&mut out, self.version, &payload)?;
        Ok(out)
    }

    /// Parse a header, returning it along with the bytes that follow.
    pub fn parse(bytes: &[u8]) -> Result<(Self, &[u8])> {
        let (version, payload, rest) = read_framed(bytes)?;

        let (length, payload) = payload
            .split_first_chunk::<4>()
            .ok_or(Error::MalformedEnvelope)?;
        let (checksum, _) = payload
            .split_first_chunk::<CHECKSUM_SIZE>()
            .ok_or(Error::MalformedEnvelope)?;

        let header = Self {
            version,
            length: u32::from_be_bytes(*length),
            checksum: *checksum,
        };

        Ok((header, rest))
    }

    /// Does `plaintext` match the checksum in this header?
    pub fn matches(&self, plaintext: &[u8]) -> bool {
        checksum(plaintext) == self.checksum
    }
}

/// Header in front of the encrypted records.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicHeader {
    /// Header version.
    pub version: u8,

    /// Checksum of the recipient's encoded public key.
    pub key_checksum: Checksum,
}

impl PublicHeader {
    /// Build the header for a recipient key, as encoded by the sender.
    pub fn for_key(encoded_key: &[u8], version: u8) -> Result<Self> {
        check_version(version)?;

        Ok(Self {
            version,
            key_checksum: checksum(encoded_key),
        })
    }

    /// Serialize this header, magic bytes included.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        check_version(self.version)?;

        let mut out = Vec::with_capacity(MAGIC.len() + 3 + CHECKSUM_SIZE);
        out.extend_from_slice(&MAGIC);
        write_framed(&mut out, self.version, &self.key_checksum)?;
        Ok(out)
    }

    /// Parse a header, returning it along with the bytes that follow.
    pub fn parse(bytes: &[u8]) -> Result<(Self, &[u8])> {
        let bytes = bytes
            .strip_prefix(MAGIC.as_slice())
            .ok_or(Error::MalformedEnvelope)?;

        let (version, payload, rest) = read_framed(bytes)?;
        let (key_checksum, _) = payload
            .split_first_chunk::<CHECKSUM_SIZE>()
            .ok_or(Error::MalformedEnvelope)?;

        let header = Self {
            version,
            key_checksum: *key_checksum,
        };

        Ok((header, rest))
    }

    /// Was this header written for `encoded_key`?
    pub fn matches(&self, encoded_key: &[u8]) -> bool {
        checksum(encoded_key) == self.key_checksum
    }
}

fn check_version(version: u8) -> Result<()> {
    if version == VERSION {
        Ok(())
    } else {
        Err(Error::UnsupportedVersion(version))
    }
}

/// Append `version || len(payload) || payload`.
fn write_framed(out: &mut Vec<u8>, version: u8, payload: &[u8]) -> Result<()> {
    let len = u16::try_from(payload.len()).map_err(|_| Error::MalformedEnvelope)?;
    out.push(version);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    Ok(())
}

/// Split `version || len || payload || rest`. The version is checked
/// before anything else is read.
fn read_framed(bytes: &[u8]) -> Result<(u8, &[u8], &[u8])> {
    let (&version, bytes) = bytes.split_first().ok_or(Error::MalformedEnvelope)?;
    check_version(version)?;

    let (len, bytes) = bytes
        .split_first_chunk::<2>()
        .ok_or(Error::MalformedEnvelope)?;
    let (payload, rest) = bytes
        .split_at_checked(usize::from(u16::from_be_bytes(*len)))
        .ok_or(Error::MalformedEnvelope)?;

    Ok((version, payload, rest))
}

#[cfg(test)]
mod tests {
    use super::{PrivateHeader, PublicHeader, checksum};
    use crate::Error;
    use hex_literal::hex;

    const GENERATOR: [u8; 65] = hex!(
        "0479BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798
         483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"
    );

    #[test]
    fn private_header_bytes() {
        let header = PrivateHeader::for_message(b"First encrypted message", 0).unwrap();
        assert_eq!(header.length, 23);
        assert_eq!(header.to_bytes().unwrap(), hex!("000006000000177268"));
    }

    #[test]
    fn public_header_bytes() {
        let header = PublicHeader::for_key(&GENERATOR, 0).unwrap();
        assert_eq!(header.to_bytes().unwrap(), hex!("6a6a0000025092"));
        assert!(header.matches(&GENERATOR));
        assert!(!header.matches(&GENERATOR[..33]));
    }

    #[test]
    fn parse_returns_remainder() {
        let (header, rest) = PrivateHeader::parse(&hex!("000006000000177268aabb")).unwrap();
        assert_eq!(header.length, 23);
        assert!(header.matches(b"First encrypted message"));
        assert_eq!(rest, hex!("aabb"));

        let (header, rest) = PublicHeader::parse(&hex!("6a6a0000025092ff")).unwrap();
        assert_eq!(header.key_checksum, checksum(&GENERATOR));
        assert_eq!(rest, [0xff]);
    }

    #[test]
    fn unsupported_versions() {
        assert_eq!(
            PrivateHeader::for_message(b"", 1),
            Err(Error::UnsupportedVersion(1))
        );
        assert_eq!(
            PublicHeader::for_key(&GENERATOR, 1),
            Err(Error::UnsupportedVersion(1))
        );
        assert_eq!(
            PublicHeader::parse(&hex!("6a6a0100025092")),
            Err(Error::UnsupportedVersion(1))
        );
        // version is checked before the truncated payload
        assert_eq!(
            PrivateHeader::parse(&hex!("02")),
            Err(Error::UnsupportedVersion(2))
        );
    }

    #[test]
    fn malformed_headers() {
        assert_eq!(
            PublicHeader::parse(&hex!("6b6a0000025092")),
            Err(Error::MalformedEnvelope)
        );
        assert_eq!(PublicHeader::parse(&hex!("6a6a00")), Err(Error::MalformedEnvelope));
        // payload shorter than declared
        assert_eq!(
            PublicHeader::parse(&hex!("6a6a00000250")),
            Err(Error::MalformedEnvelope)
        );
        // payload too short for a checksum
        assert_eq!(
            PublicHeader::parse(&hex!("6a6a00000150")),
            Err(Error::MalformedEnvelope)
        );
        assert_eq!(
            PrivateHeader::parse(&hex!("0000040000001772")),
            Err(Error::MalformedEnvelope)
        );
        assert_eq!(PrivateHeader::parse(&[]), Err(Error::MalformedEnvelope));
    }
}
