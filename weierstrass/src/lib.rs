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

mod curve;
mod error;
mod field;
mod point;
mod sec1;

pub use crate::{
    curve::CurveParams,
    error::{Error, Result},
    field::{inverse_mod, sqrt_mod, to_be_bytes_fixed},
    point::{AffinePoint, Point},
    sec1::{MAX_X_OFFSET, Tag, decode_tag, encode_tag},
};
pub use num_bigint::{self, BigInt, BigUint};
