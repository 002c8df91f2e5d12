//! Prime field helpers over [`BigUint`].

use crate::{Error, Result};
use core::mem;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Compute the inverse of `a` modulo `m` using the extended Euclidean
/// algorithm.
///
/// `a` is first reduced into `[0, m)`. Returns [`Error::NotInvertible`] when
/// `gcd(a, m) != 1`, which for a prime modulus means `a ≡ 0 (mod m)`.
pub fn inverse_mod(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(Error::NotInvertible);
    }

    let (mut c, mut d) = (a % m, m.clone());
    let (mut uc, mut ud) = (BigInt::one(), BigInt::zero());

    while !c.is_zero() {
        let (q, r) = d.div_rem(&c);
        d = mem::replace(&mut c, r);
        let u = &ud - BigInt::from(q) * &uc;
        ud = mem::replace(&mut uc, u);
    }

    // d = gcd(a, m)
    if !d.is_one() {
        return Err(Error::NotInvertible);
    }

    ud.mod_floor(&BigInt::from(m.clone()))
        .to_biguint()
        .ok_or(Error::NotInvertible)
}

/// Square root of `a` modulo a prime `p ≡ 3 (mod 4)`, computed as
/// `a^((p+1)/4) mod p`.
///
/// Returns `None` when `a` is not a quadratic residue. Either root may be
/// returned; the caller picks the parity it needs.
pub fn sqrt_mod(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    if p.is_zero() {
        return None;
    }

    let a = a % p;
    let root = a.modpow(&((p + 1u32) >> 2), p);
    (&root * &root % p == a).then_some(root)
}

/// Serialize `x` as a big-endian integer left-padded with zeros to exactly
/// `len` bytes.
pub fn to_be_bytes_fixed(x: &BigUint, len: usize) -> Result<Vec<u8>> {
    let bytes = if x.is_zero() {
        Vec::new()
    } else {
        x.to_bytes_be()
    };

    if bytes.len() > len {
        return Err(Error::InvalidEncoding);
    }

    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// `(a - b) mod p` for operands of any size.
pub(crate) fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a % p + p - b % p) % p
}
