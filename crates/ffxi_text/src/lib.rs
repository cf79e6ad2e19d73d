//! # FFXI Text Encoding Documentation
//!
//! This crate decodes the text encoding used by the resource files of *Final Fantasy XI*. The encoding is a
//! variant of Shift-JIS extended with private single-row tables, an auto-translate escape and "slot data" markers
//! that splice raw binary values into the middle of human readable text.
//!
//! Decoding produces a sequence of UTF-16 code units ([`widestring::U16String`]). Every input byte is accounted
//! for: bytes that have no textual meaning are wrapped into the private use area instead of being dropped, so
//! the output can be inspected or mapped back to the source bytes.
//!
//! ## Byte Classes
//!
//! | Input                          | Output                     | Description                                   |
//! |--------------------------------|----------------------------|-----------------------------------------------|
//! | `0x00`, `0x20..=0x7E`          | same value                 | ASCII                                         |
//! | `0x07`                         | `U+000A`                   | Line break                                    |
//! | other bytes `<= 0x7E`          | `U+E100 \| byte`           | Control codes                                 |
//! | `0xA1..=0xDF`                  | `U+FEC0 + byte`            | Half-width katakana                           |
//! | `0x1E xx`                      | `U+F000 \| xx`             | Private glyph row                             |
//! | `0xEF xx`                      | `U+F100 \| xx`             | Private glyph row                             |
//! | `0x7F xx`                      | `U+E200 \| xx`             | Private control row                           |
//! | `0x81..=0x9F`/`0xE0..=0xFC` xx | table lookup               | Double-byte characters, `xx` in `0x40..=0xFC` |
//! | `0xFD a b c d 0xFD`            | `U+E120`, 4 × `U+E000\|b`  | Auto-translate phrase                         |
//! | anything else                  | `U+FFFD`                   | Unmapped                                      |
//!
//! ### Slot Data
//!
//! Some control codes announce that the following byte is a raw value rather than text. When the previously
//! decoded code unit is one of [`SLOT_DATA_MARKERS`], the next byte is emitted as `U+E000 | byte` without being
//! interpreted.
//!
//! ### Auto-Translate
//!
//! An auto-translate phrase is a 6 byte sequence starting and ending with `0xFD`. The 4 bytes in between identify
//! the phrase and are emitted wrapped after a [`AUTO_TRANSLATE_MARKER`]. An opening `0xFD` without its closing
//! counterpart decodes to a single [`REPLACEMENT`] and decoding continues with the next byte.
//!
//! ## Example
//!
//! ```
//! let text = ffxi_text::decode(b"Fire\x07\x82\xa0");
//! assert_eq!(text.to_string_lossy(), "Fire\n\u{3042}");
//! ```
//!

pub mod decode;
pub mod error;
mod table;

pub use decode::{
    decode, decode_range, decode_to_string, AUTO_TRANSLATE_MARKER, REPLACEMENT, SLOT_DATA_MARKERS,
};
