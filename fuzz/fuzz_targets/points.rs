#![no_main]
// Point decoding on secp256k1. Decoded points go through a few cheap group
// identities; scalar multiplication is too slow to run on every input.
use libfuzzer_sys::fuzz_target;
use weierstrass::{CurveParams, Point, decode_tag};

fuzz_target!(|data: &[u8]| {
    let curve = CurveParams::secp256k1();

    let Ok(point) = Point::from_sec1_bytes(curve, data) else {
        // offset-carrying tag bytes must not be able to smuggle a panic in
        if let Some((&tag, x)) = data.split_first() {
            let (y_is_odd, _) = decode_tag(tag);
            let mut normalized = vec![if y_is_odd { 0x03 } else { 0x02 }];
            normalized.extend_from_slice(x);
            let _ = Point::from_sec1_bytes(curve, &normalized);
        }
        return;
    };

    let compressed = point.to_sec1_bytes(true).unwrap();
    assert_eq!(Point::from_sec1_bytes(curve, &compressed).unwrap(), point);

    let uncompressed = point.to_sec1_bytes(false).unwrap();
    assert_eq!(Point::from_sec1_bytes(curve, &uncompressed).unwrap(), point);

    assert!(point.add_point(&point.negate()).unwrap().is_identity());
    assert_eq!(
        point.add_point(&point).unwrap(),
        point.double().unwrap()
    );
});
