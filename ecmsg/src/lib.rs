#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod armor;
pub mod header;

#[cfg(feature = "address")]
pub mod address;

mod decrypting;
mod encrypting;
mod error;

pub use crate::{
    decrypting::{DecryptedMessage, DecryptingKey},
    encrypting::EncryptingKey,
    error::{Error, Result},
};
pub use weierstrass;

use weierstrass::CurveParams;

/// Encrypt `msg` to a SEC1-encoded secp256k1 public key using the
/// operating system's random number generator.
#[cfg(feature = "getrandom")]
pub fn encrypt_message(public_key: &[u8], msg: &[u8]) -> Result<String> {
    EncryptingKey::from_sec1_bytes(public_key)?.encrypt(&mut rand_core::OsRng, msg)
}

/// Decrypt a base64 envelope with a 32-byte big-endian secp256k1 private key.
pub fn decrypt_message(secret_key: &[u8], envelope: &str) -> Result<DecryptedMessage> {
    DecryptingKey::from_bytes(secret_key)?.decrypt(envelope)
}

/// Length of one encrypted record: two compressed points.
pub(crate) fn record_len(curve: &CurveParams) -> usize {
    2 * (1 + curve.field_size())
}
