//! secp256k1 point arithmetic benchmarks

use criterion::{Criterion, criterion_group, criterion_main};
use hex_literal::hex;
use num_bigint::BigUint;
use std::hint::black_box;
use weierstrass::{CurveParams, Point};

fn test_scalar() -> BigUint {
    BigUint::from_bytes_be(&hex!(
        "bb488aef416a41d7680d1cf01d70f59b60d7f5f77e30e78b8bf9d2d882f156a6"
    ))
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("point operations");
    let curve = CurveParams::secp256k1();
    let g = curve.generator();
    let h = g.double().unwrap();
    let k = test_scalar();

    group.bench_function("add", |b| {
        b.iter(|| black_box(&g).add_point(black_box(&h)))
    });

    group.bench_function("double", |b| b.iter(|| black_box(&h).double()));

    group.bench_function("mul_scalar", |b| {
        b.iter(|| black_box(&g).mul_scalar(black_box(&k)))
    });

    let compressed = h.to_sec1_bytes(true).unwrap();
    group.bench_function("from_sec1_bytes (compressed)", |b| {
        b.iter(|| Point::from_sec1_bytes(curve, black_box(&compressed)))
    });

    group.finish();
}

criterion_group!(benches, bench_point);
criterion_main!(benches);
