//! Rendering and PSI codec coverage, including property tests over the
//! whole 128-bit payload space.

use mkrand_core::{
    format_vector, parse_psi, PsiParseError, Vector, VectorFormat, PSI_TEXT_LEN,
};
use proptest::prelude::*;
use rstest::rstest;
use thiserror as _;

proptest! {
    #[test]
    fn psi_text_round_trips_every_payload(bytes in any::<[u8; 16]>()) {
        let text = format_vector(&Vector::from_bytes(&bytes), VectorFormat::Psi);
        prop_assert_eq!(text.len(), PSI_TEXT_LEN);
        prop_assert!(text.starts_with("[<:"));
        prop_assert!(text.ends_with(":>]"));

        let parsed = parse_psi(&text).expect("canonical text");
        prop_assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn byte_packing_round_trips_every_payload(bytes in any::<[u8; 16]>()) {
        let v = Vector::from_bytes(&bytes);
        prop_assert_eq!(v.to_bytes(), bytes);
        for n in 1..=16u8 {
            prop_assert_eq!(v.byte(n).expect("in range"), bytes[usize::from(n) - 1]);
        }
    }

    #[test]
    fn binary_text_rendering_matches_the_payload_weight(bytes in any::<[u8; 16]>()) {
        let v = Vector::from_bytes(&bytes);
        let text = format_vector(&v, VectorFormat::BinaryText);
        prop_assert_eq!(text.len(), 128);
        let ones = text.chars().filter(|&c| c == '1').count();
        prop_assert_eq!(ones, usize::try_from(v.hamming_weight()).expect("fits in usize"));
    }
}

#[rstest]
#[case(VectorFormat::Binary, 32)]
#[case(VectorFormat::Sha1, 36)]
#[case(VectorFormat::BinaryText, 128)]
#[case(VectorFormat::Guid, 37)]
#[case(VectorFormat::Ipv6, 39)]
#[case(VectorFormat::Psi, 38)]
#[case(VectorFormat::Uuid, 36)]
#[case(VectorFormat::Base64, 22)]
fn rendered_widths_are_fixed(#[case] format: VectorFormat, #[case] width: usize) {
    let v = Vector::from_bytes(&[0xC4; 16]);
    assert_eq!(format_vector(&v, format).len(), width);
}

#[rstest]
#[case("binary", VectorFormat::Binary)]
#[case("psi", VectorFormat::Psi)]
#[case("uuid", VectorFormat::Uuid)]
#[case("base64", VectorFormat::Base64)]
fn format_names_resolve(#[case] name: &str, #[case] expected: VectorFormat) {
    assert_eq!(VectorFormat::from_name(name), Some(expected));
}

#[test]
fn unknown_format_names_do_not_resolve() {
    assert_eq!(VectorFormat::from_name("hexdump"), None);
}

#[test]
fn ipv4_renders_the_low_word_most_significant_first() {
    let mut bytes = [0u8; 16];
    bytes[0] = 1;
    bytes[1] = 0;
    bytes[2] = 168;
    bytes[3] = 192;
    let v = Vector::from_bytes(&bytes);
    assert_eq!(format_vector(&v, VectorFormat::Ipv4), "192.168.0.1");
}

#[test]
fn int32_renders_the_low_word_as_decimal() {
    let mut bytes = [0u8; 16];
    bytes[..4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
    let v = Vector::from_bytes(&bytes);
    assert_eq!(format_vector(&v, VectorFormat::Int32), "3735928559");
}

#[test]
fn parser_rejects_truncated_text() {
    assert_eq!(
        parse_psi("[<:00FF:>]"),
        Err(PsiParseError::BadLength { len: 10 })
    );
}

#[test]
fn parser_rejects_foreign_delimiters() {
    let body = "00112233445566778899AABBCCDDEEFF";
    assert_eq!(
        parse_psi(&format!("(<:{body}:>)")),
        Err(PsiParseError::BadDelimiter)
    );
}

#[test]
fn parser_reports_the_offset_of_a_bad_digit() {
    assert!(matches!(
        parse_psi("[<:001122334455667G8899AABBCCDDEEFF:>]"),
        Err(PsiParseError::BadHexDigit { .. })
    ));
}

#[test]
fn parser_accepts_lowercase_hex() {
    let v = parse_psi("[<:00000000000000000000000000000aff:>]").expect("lowercase");
    assert_eq!(v.byte(1).expect("in range"), 0xFF);
    assert_eq!(v.byte(2).expect("in range"), 0x0A);
}
