use num_bigint::BigInt;
use pretty_assertions::assert_eq;

use super::{namify, namify_string, Const, NamifyError};

#[test]
fn integers() {
    assert_eq!(namify(&Const::Int(0)).unwrap(), "int_0");
    assert_eq!(namify(&Const::Int(42)).unwrap(), "int_pos_42");
    assert_eq!(namify(&Const::Int(-5)).unwrap(), "int_neg_5");
    // No overflow on the most negative value.
    assert_eq!(
        namify(&Const::Int(i64::MIN)).unwrap(),
        "int_neg_9223372036854775808"
    );
}

#[test]
fn long_family_never_collides_with_int() {
    assert_eq!(namify(&Const::BigInt(BigInt::from(0))).unwrap(), "long_0");
    assert_eq!(
        namify(&Const::BigInt(BigInt::from(5))).unwrap(),
        "long_pos_5"
    );
    assert_eq!(
        namify(&Const::BigInt(BigInt::from(-7))).unwrap(),
        "long_neg_7"
    );
    // Equal numeric value, distinct family.
    assert_eq!(namify(&Const::Int(5)).unwrap(), "int_pos_5");
}

#[test]
fn booleans() {
    assert_eq!(namify(&Const::Bool(true)).unwrap(), "bool_True");
    assert_eq!(namify(&Const::Bool(false)).unwrap(), "bool_False");
}

#[test]
fn plain_strings_stay_readable() {
    assert_eq!(
        namify(&Const::Bytes(b"hello_world2".to_vec())).unwrap(),
        "str_plain_hello_world2"
    );

    // 40 safe bytes is the readability cutoff.
    let a40 = vec![b'a'; 40];
    assert_eq!(
        namify(&Const::Bytes(a40)).unwrap(),
        format!("str_plain_{}", "a".repeat(40))
    );
    let a41 = vec![b'a'; 41];
    assert!(namify(&Const::Bytes(a41))
        .unwrap()
        .starts_with("str_digest_"));
}

#[test]
fn empty_and_angle_strings() {
    assert_eq!(namify_string(b""), "empty");
    assert_eq!(namify_string(b"<module>"), "angle_module");

    assert_eq!(namify(&Const::Bytes(Vec::new())).unwrap(), "str_empty");
    assert_eq!(
        namify(&Const::Bytes(b"<module>".to_vec())).unwrap(),
        "str_angle_module"
    );

    // Too short or unsafe interior: digest, never a mangled angle name.
    assert!(namify_string(b"<>").starts_with("digest_"));
    assert!(namify_string(b"<a b>").starts_with("digest_"));
}

#[test]
fn linebreaks_always_digest() {
    let name = namify(&Const::Bytes(b"line1\nline2".to_vec())).unwrap();
    assert!(name.starts_with("str_digest_"), "got {name}");
}

#[test]
fn digest_is_fixed_width_hex() {
    assert_eq!(
        namify_string(b"hello world"),
        "digest_5eb63bbbe01eeed093cb22bb8f5acdc3"
    );
}

#[test]
fn unicode_dispatch() {
    assert_eq!(
        namify(&Const::Str("hello".to_owned())).unwrap(),
        "unicode_plain_hello"
    );

    let name = namify(&Const::Str("héllo".to_owned())).unwrap();
    assert!(name.starts_with("unicode_digest_"), "got {name}");
    let hex = &name["unicode_digest_".len()..];
    assert_eq!(hex.len(), 32);
    assert!(hex.bytes().all(|b| b.is_ascii_hexdigit()));
}

#[test]
fn floats() {
    assert_eq!(namify(&Const::Float(0.5)).unwrap(), "float_0_5");
    assert_eq!(namify(&Const::Float(3.25)).unwrap(), "float_3_25");
    assert_eq!(namify(&Const::Float(-2.5)).unwrap(), "float__minus_2_5");
    assert_eq!(namify(&Const::Float(7.0)).unwrap(), "float_7");
}

#[test]
fn complex_forms() {
    assert_eq!(
        namify(&Const::Complex { re: 1.0, im: 2.0 }).unwrap(),
        "complex_1p2j"
    );
    assert_eq!(
        namify(&Const::Complex { re: 1.0, im: -2.0 }).unwrap(),
        "complex_1m2j"
    );
    assert_eq!(
        namify(&Const::Complex { re: -1.5, im: 2.5 }).unwrap(),
        "complex_m1_5p2_5j"
    );
}

#[test]
fn unsupported_kinds_are_unnameable() {
    assert!(matches!(
        namify(&Const::None),
        Err(NamifyError::Unnameable(_))
    ));
    assert!(matches!(
        namify(&Const::Ellipsis),
        Err(NamifyError::Unnameable(_))
    ));
}

#[test]
fn naming_is_deterministic() {
    let values = [
        Const::Int(-5),
        Const::BigInt(BigInt::from(123_456_789)),
        Const::Bytes(b"not an identifier!".to_vec()),
        Const::Str("h\u{e9}llo".to_owned()),
        Const::Float(3.25),
        Const::Complex { re: 0.0, im: -1.0 },
    ];
    for value in &values {
        assert_eq!(namify(value), namify(value));
    }
}

mod props {
    use proptest::prelude::*;

    use super::super::{namify, Const};

    fn is_safe(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_'
    }

    /// Mirrors the angle-name admission rule: `<` + 1..=40 safe bytes + `>`.
    fn matches_angle(bytes: &[u8]) -> bool {
        bytes.len() >= 3
            && bytes[0] == b'<'
            && bytes[bytes.len() - 1] == b'>'
            && (1..=40).contains(&(bytes.len() - 2))
            && bytes[1..bytes.len() - 1].iter().copied().all(is_safe)
    }

    proptest! {
        #[test]
        fn unsafe_content_always_digests(
            bytes in proptest::collection::vec(any::<u8>(), 1..200)
        ) {
            prop_assume!(bytes.iter().any(|b| !is_safe(*b)));
            prop_assume!(!matches_angle(&bytes));

            let name = namify(&Const::Bytes(bytes)).unwrap();
            prop_assert!(name.starts_with("str_digest_"), "got {}", name);
            // The raw disallowed bytes never leak into the name.
            prop_assert!(name.bytes().all(is_safe));
        }

        #[test]
        fn byte_strings_name_deterministically(
            bytes in proptest::collection::vec(any::<u8>(), 0..100)
        ) {
            prop_assert_eq!(
                namify(&Const::Bytes(bytes.clone())),
                namify(&Const::Bytes(bytes))
            );
        }
    }
}
