//! Stateful decoder for the game's Shift-JIS variant
//!

use tracing::instrument;
use widestring::U16String;

use crate::error::{Error, Result};
use crate::table::DOUBLE_BYTE_TABLE;

/// Code unit emitted for anything that cannot be decoded
pub const REPLACEMENT: u16 = 0xFFFD;

/// Code unit emitted in front of the 4 payload units of an auto-translate phrase
pub const AUTO_TRANSLATE_MARKER: u16 = 0xE120;

/// Code units after which the next byte is raw slot data
pub const SLOT_DATA_MARKERS: [u16; 10] = [
    0xE10A, 0xE10C, 0xE119, 0xE11A, 0xE11C, 0xE11F, 0xE28D, 0xE28E, 0xE292, 0xE2B1,
];

const AUTO_TRANSLATE: u8 = 0xFD;

/// Decode a complete byte slice.
pub fn decode(bytes: &[u8]) -> U16String {
    Decoder::new(bytes).run()
}

/// Decode `length` bytes of `bytes` starting at `offset`.
///
/// The escape and double-byte lookahead never reach past the end of the window.
#[instrument(level = "trace", skip(bytes), err)]
pub fn decode_range(bytes: &[u8], offset: usize, length: usize) -> Result<U16String> {
    let window = offset
        .checked_add(length)
        .and_then(|end| bytes.get(offset..end))
        .ok_or(Error::OutOfRange {
            offset,
            length,
            available: bytes.len(),
        })?;

    Ok(decode(window))
}

/// Decode a byte slice straight into a [`String`].
///
/// The decoder never produces unpaired surrogates, so nothing is lost in the conversion.
pub fn decode_to_string(bytes: &[u8]) -> String {
    decode(bytes).to_string_lossy()
}

struct Decoder<'a> {
    input: &'a [u8],
    position: usize,
    last: u16,
    output: Vec<u16>,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a [u8]) -> Self {
        Decoder {
            input,
            position: 0,
            last: 0,
            output: Vec::with_capacity(input.len()),
        }
    }

    fn run(mut self) -> U16String {
        while let Some(&high) = self.input.get(self.position) {
            self.position += 1;
            self.step(high);
        }

        U16String::from_vec(self.output)
    }

    fn step(&mut self, high: u8) {
        if let Some(unit) = slot_data(self.last, high) {
            return self.emit(unit);
        }

        if high == AUTO_TRANSLATE {
            return self.auto_translate();
        }

        if let Some(unit) = self
            .input
            .get(self.position)
            .and_then(|&low| double_byte(high, low))
        {
            self.position += 1;
            return self.emit(unit);
        }

        self.emit(single_byte(high).unwrap_or(REPLACEMENT));
    }

    /// `position` points just past the opening `0xFD`.
    fn auto_translate(&mut self) {
        let input = self.input;
        match input.get(self.position..self.position + 5) {
            Some([a, b, c, d, AUTO_TRANSLATE]) => {
                self.output.push(AUTO_TRANSLATE_MARKER);
                self.output
                    .extend([a, b, c, d].map(|&byte| 0xE000 | u16::from(byte)));
                self.last = AUTO_TRANSLATE_MARKER;
                self.position += 5;
            }
            _ => self.emit(REPLACEMENT),
        }
    }

    fn emit(&mut self, unit: u16) {
        self.last = unit;
        self.output.push(unit);
    }
}

fn slot_data(last: u16, byte: u8) -> Option<u16> {
    SLOT_DATA_MARKERS
        .contains(&last)
        .then_some(0xE000 | u16::from(byte))
}

fn double_byte(high: u8, low: u8) -> Option<u16> {
    let unit = match high {
        0x1E => 0xF000 | u16::from(low),
        0xEF => 0xF100 | u16::from(low),
        0x7F => 0xE200 | u16::from(low),
        0x81..=0x9F | 0xE0..=0xFC if matches!(low, 0x40..=0xFC) && low != 0x7F => {
            let plane = if high > 0x9F { high - 0xC1 } else { high - 0x81 };
            DOUBLE_BYTE_TABLE[plane as usize][(low - 0x40) as usize]
        }
        _ => return None,
    };

    (unit != REPLACEMENT).then_some(unit)
}

fn single_byte(byte: u8) -> Option<u16> {
    match byte {
        0x00 | 0x20..=0x7E => Some(u16::from(byte)),
        0x07 => Some(u16::from(b'\n')),
        0x01..=0x1F => Some(0xE100 | u16::from(byte)),
        0xA1..=0xDF => Some(0xFEC0 + u16::from(byte)),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn units(bytes: &[u8]) -> Vec<u16> {
        decode(bytes).into_vec()
    }

    #[test]
    fn single_byte_classes() {
        assert_eq!(single_byte(0x41), Some(0x41));
        assert_eq!(single_byte(0x07), Some(0x0A));
        assert_eq!(single_byte(0x00), Some(0x00));
        assert_eq!(single_byte(0x1F), Some(0xE11F));
        assert_eq!(single_byte(0x7F), None);
        assert_eq!(single_byte(0xA1), Some(0xFF61));
        assert_eq!(single_byte(0xE0), None);
    }

    #[test]
    fn dedicated_rows_take_precedence() {
        assert_eq!(double_byte(0x1E, 0x02), Some(0xF002));
        assert_eq!(double_byte(0xEF, 0x27), Some(0xF127));
        assert_eq!(double_byte(0x7F, 0x31), Some(0xE231));
    }

    #[test]
    fn double_byte_rejects_invalid_low_bytes() {
        assert_eq!(double_byte(0x81, 0x3F), None);
        assert_eq!(double_byte(0x81, 0x7F), None);
        assert_eq!(double_byte(0x81, 0xFD), None);
        assert_eq!(double_byte(0xA0, 0x40), None);
    }

    #[test]
    fn unmapped_table_entry_falls_back() {
        // 0x81 0xAD is a hole in the first plane
        assert_eq!(double_byte(0x81, 0xAD), None);
        assert_eq!(units(&[0x81, 0xAD]), vec![REPLACEMENT, 0xFF6D]);
    }

    #[test]
    fn slot_marker_wraps_exactly_one_byte() {
        // 0x7F 0x8D produces the U+E28D marker
        assert_eq!(
            units(&[0x7F, 0x8D, 0x82, 0xA1, 0x41]),
            vec![0xE28D, 0xE082, 0xFF61, 0x41]
        );
    }

    #[test]
    fn slot_marker_from_single_byte_control() {
        assert_eq!(units(&[0x0A, 0x05, 0x05]), vec![0xE10A, 0xE005, 0xE105]);
    }

    #[test]
    fn auto_translate_sets_marker_as_last() {
        let mut decoder = Decoder::new(&[0xFD, 0x02, 0x02, 0x0A, 0x0B, 0xFD]);
        decoder.position = 1;
        decoder.auto_translate();

        assert_eq!(decoder.last, AUTO_TRANSLATE_MARKER);
        assert_eq!(decoder.position, 6);
        assert_eq!(
            decoder.output,
            vec![AUTO_TRANSLATE_MARKER, 0xE002, 0xE002, 0xE00A, 0xE00B]
        );
    }

    #[test]
    fn decode_range_checks_bounds() {
        assert_eq!(decode_range(b"abc", 1, 2).map(|s| s.into_vec()), Ok(vec![0x62, 0x63]));
        assert_eq!(
            decode_range(b"abc", 2, 2),
            Err(Error::OutOfRange {
                offset: 2,
                length: 2,
                available: 3
            })
        );
        assert!(decode_range(b"abc", usize::MAX, 2).is_err());
    }

    #[test]
    fn range_window_limits_lookahead() {
        // the trailing 0xA0 is outside the window, so 0x82 cannot pair with it
        assert_eq!(
            decode_range(&[0x41, 0x82, 0xA0], 0, 2).map(|s| s.into_vec()),
            Ok(vec![0x41, REPLACEMENT])
        );
    }
}
