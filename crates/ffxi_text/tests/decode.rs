use ffxi_text::error::Error;
use ffxi_text::{decode, decode_range, decode_to_string, AUTO_TRANSLATE_MARKER, REPLACEMENT};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

fn units(bytes: &[u8]) -> Vec<u16> {
    decode(bytes).into_vec()
}

#[test]
fn printable_ascii_is_identity() {
    for b in 0x20u8..=0x7E {
        assert_eq!(units(&[b]), vec![b as u16], "byte {b:#04x}");
    }
}

#[test]
fn control_bytes() {
    assert_eq!(decode_to_string(&[0x07]), "\n");
    assert_eq!(decode_to_string(&[0x00]), "\0");
    assert_eq!(units(&[0x01]), vec![0xE101]);
    assert_eq!(units(&[0x1B]), vec![0xE11B]);
}

#[test]
fn half_width_katakana() {
    for b in 0xA1u8..=0xDF {
        assert_eq!(units(&[b])[0], 0xFEC0 + b as u16, "byte {b:#04x}");
    }
}

#[test]
fn auto_translate_phrase() {
    assert_eq!(
        units(&[0xFD, 0x01, 0x02, 0x03, 0x04, 0xFD]),
        vec![AUTO_TRANSLATE_MARKER, 0xE001, 0xE002, 0xE003, 0xE004]
    );
}

#[test]
fn auto_translate_inside_text() {
    #[rustfmt::skip]
    let input = [
        b'<',
        0xFD, 0x02, 0x02, 0x1E, 0x05, 0xFD,
        b'>',
    ];

    assert_eq!(
        units(&input),
        vec![0x3C, AUTO_TRANSLATE_MARKER, 0xE002, 0xE002, 0xE01E, 0xE005, 0x3E]
    );
}

#[test]
fn truncated_auto_translate_consumes_only_the_opening_byte() {
    let decoded = units(&[0xFD, 0x01, 0x02, 0x03]);

    assert_eq!(decoded[0], REPLACEMENT);
    assert_eq!(decoded.iter().filter(|&&u| u == REPLACEMENT).count(), 1);
    assert_eq!(decoded, vec![REPLACEMENT, 0xE101, 0xE102, 0xE103]);
}

#[test]
fn auto_translate_without_closing_marker() {
    assert_eq!(
        units(&[0xFD, 0x01, 0x02, 0x03, 0x04, 0x05]),
        vec![REPLACEMENT, 0xE101, 0xE102, 0xE103, 0xE104, 0xE105]
    );
}

#[test]
fn double_byte_lookups() {
    assert_eq!(units(&[0x82, 0xA0]), vec![0x3042]);
    assert_eq!(units(&[0x81, 0x40]), vec![0x3000]);
    assert_eq!(decode_to_string(b"\x82\xa0\x82\xa2\x82\xa4"), "あいう");
}

#[test]
fn high_byte_outside_lead_ranges_never_pairs() {
    for high in [0x41u8, 0x80, 0xA0, 0xA5, 0xDF, 0xFE, 0xFF] {
        let decoded = units(&[high, 0x41]);
        assert_eq!(decoded.len(), 2, "high {high:#04x}");
        assert_eq!(decoded[1], 0x41, "high {high:#04x}");
    }
}

#[test]
fn lone_lead_byte_is_replaced() {
    assert_eq!(units(&[0x82]), vec![REPLACEMENT]);
    assert_eq!(units(&[b'a', 0x82]), vec![0x61, REPLACEMENT]);
}

#[test]
fn slot_data_is_wrapped() {
    // 0x1F is a slot marker control code, the following 0x82 is raw data
    assert_eq!(units(&[0x1F, 0x82, 0xA1]), vec![0xE11F, 0xE082, 0xFF61]);
}

#[traced_test]
#[test]
fn ranged_decode() -> Result<(), Error> {
    let input = b"..Fire..";
    assert_eq!(decode_range(input, 2, 4)?.to_string_lossy(), "Fire");
    assert_eq!(decode_range(input, 8, 0)?.len(), 0);
    assert!(decode_range(input, 6, 4).is_err());

    Ok(())
}
