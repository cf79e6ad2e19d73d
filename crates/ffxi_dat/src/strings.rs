//! Offset indexed field tables embedded in item records.
//!
//! A field table starts with a 32 bit field count followed by one 8 byte entry per field. Each entry holds a
//! data offset and a data type, both relative to the start of the entries (the table origin).
//!
//! | Type | Data                                                                   |
//! |------|------------------------------------------------------------------------|
//! | 0    | 24 byte sub-header followed by a null terminated encoded string         |
//! | 1    | 32 bit integer                                                          |
//!
//! Any other type carries no value this library understands.

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{Error, Result};

const ENTRY_SIZE: usize = 8;
const STRING_HEADER_SIZE: usize = 0x18;

/// Language of an item stream
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Language {
    /// English client data
    English,
    /// Japanese client data
    Japanese,
}

/// Index of an entry inside a field table
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldIndex(pub usize);

impl FieldIndex {
    /// Display name, shared by both languages
    pub const NAME: FieldIndex = FieldIndex(0);
    /// English indefinite article
    pub const ENGLISH_ARTICLE: FieldIndex = FieldIndex(1);
    /// English name as used in singular log messages
    pub const ENGLISH_LOG_SINGULAR: FieldIndex = FieldIndex(2);
    /// English name as used in plural log messages
    pub const ENGLISH_LOG_PLURAL: FieldIndex = FieldIndex(3);
    /// English help text
    pub const ENGLISH_DESCRIPTION: FieldIndex = FieldIndex(4);
    /// Japanese help text
    pub const JAPANESE_DESCRIPTION: FieldIndex = FieldIndex(1);
}

/// A resolved field
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(untagged))]
pub enum FieldValue {
    /// Decoded text
    Text(String),
    /// Raw integer
    Integer(i32),
}

impl FieldValue {
    /// The text of this field, if it holds any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            FieldValue::Integer(_) => None,
        }
    }
}

/// Cursor resolving field table entries out of a single record buffer.
///
/// Every resolution uses the current position as the table origin. String lookups return to the origin
/// afterwards, integer lookups leave the cursor just past the integer.
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> FieldReader<'a> {
    /// Create a reader positioned at `position` inside `buffer`
    pub fn new(buffer: &'a [u8], position: usize) -> FieldReader<'a> {
        FieldReader { buffer, position }
    }

    /// Current offset inside the record
    pub fn position(&self) -> usize {
        self.position
    }

    /// Consume the leading field count.
    pub fn read_count(&mut self) -> Result<u32> {
        let count = self.u32_at(self.position).ok_or(Error::TruncatedField {
            index: 0,
            position: self.position,
        })?;
        self.position += 4;
        Ok(count)
    }

    /// Resolve entry `index` of the table starting at the current position.
    pub fn resolve(&mut self, index: FieldIndex) -> Result<Option<FieldValue>> {
        let origin = self.position;
        let entry = origin + ENTRY_SIZE * index.0;
        let truncated = |position| Error::TruncatedField {
            index: index.0,
            position,
        };

        let offset = self.u32_at(entry).ok_or_else(|| truncated(entry))?;
        let kind = self.u32_at(entry + 4).ok_or_else(|| truncated(entry + 4))?;
        let data = self.clamp(origin.saturating_add(offset as usize));

        match kind {
            0 => {
                let buffer = self.buffer;
                let span = &buffer[self.clamp(data + STRING_HEADER_SIZE)..];
                let length = span.iter().position(|&b| b == 0).unwrap_or(span.len());
                let text = ffxi_text::decode_to_string(&span[..length]);

                self.position = origin;
                Ok(Some(FieldValue::Text(text)))
            }
            1 => {
                let value = self.u32_at(data).ok_or_else(|| truncated(data))?;

                self.position = data + 4;
                Ok(Some(FieldValue::Integer(value as i32)))
            }
            other => {
                trace!(index = index.0, kind = other, "field has no readable value");

                self.position = data;
                Ok(None)
            }
        }
    }

    fn clamp(&self, position: usize) -> usize {
        position.min(self.buffer.len())
    }

    fn u32_at(&self, position: usize) -> Option<u32> {
        self.buffer
            .get(position..position.checked_add(4)?)
            .map(LittleEndian::read_u32)
    }
}

/// Localised text attached to regular items
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ItemText {
    /// Display name
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<FieldValue>,
    /// Name as used in log messages
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub log: Option<FieldValue>,
    /// Help text
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<FieldValue>,
}

/// Read the name field of a table.
pub fn read_basic_text(reader: &mut FieldReader<'_>) -> Result<Option<FieldValue>> {
    reader.read_count()?;
    reader.resolve(FieldIndex::NAME)
}

/// Read name, log name and description of a table.
///
/// Japanese tables have no dedicated log name, the display name is used for both.
pub fn read_full_text(reader: &mut FieldReader<'_>, language: Language) -> Result<ItemText> {
    let name = read_basic_text(reader)?;

    let (log, description) = match language {
        Language::English => (
            FieldIndex::ENGLISH_LOG_SINGULAR,
            FieldIndex::ENGLISH_DESCRIPTION,
        ),
        Language::Japanese => (FieldIndex::NAME, FieldIndex::JAPANESE_DESCRIPTION),
    };

    Ok(ItemText {
        name,
        log: reader.resolve(log)?,
        description: reader.resolve(description)?,
    })
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Build a table at offset 0 from `(type, payload)` entries.
    fn table(entries: &[(u32, &[u8])]) -> Vec<u8> {
        let mut buffer = (entries.len() as u32).to_le_bytes().to_vec();
        let mut data = Vec::new();
        let table_size = entries.len() * ENTRY_SIZE;

        for (kind, payload) in entries {
            let offset = table_size + data.len();
            buffer.extend((offset as u32).to_le_bytes());
            buffer.extend(kind.to_le_bytes());

            if *kind == 0 {
                data.extend([0u8; STRING_HEADER_SIZE]);
            }
            data.extend(*payload);
        }

        buffer.extend(data);
        buffer
    }

    #[test]
    fn resolve_strings_in_any_order() -> Result<()> {
        let buffer = table(&[
            (0, b"Fire\0".as_slice()),
            (0, b"a\0".as_slice()),
            (0, b"fire crystal\0".as_slice()),
        ]);
        let mut reader = FieldReader::new(&buffer, 0);

        assert_eq!(reader.read_count()?, 3);
        assert_eq!(
            reader.resolve(FieldIndex(2))?,
            Some(FieldValue::Text("fire crystal".into()))
        );
        assert_eq!(
            reader.resolve(FieldIndex::NAME)?,
            Some(FieldValue::Text("Fire".into()))
        );
        assert_eq!(reader.position(), 4);

        Ok(())
    }

    #[test]
    fn integer_fields_move_the_cursor() -> Result<()> {
        let buffer = table(&[(1, 0x1234i32.to_le_bytes().as_slice())]);
        let mut reader = FieldReader::new(&buffer, 0);
        reader.read_count()?;

        assert_eq!(
            reader.resolve(FieldIndex::NAME)?,
            Some(FieldValue::Integer(0x1234))
        );
        assert_eq!(reader.position(), 4 + ENTRY_SIZE + 4);

        Ok(())
    }

    #[test]
    fn unknown_types_have_no_value() -> Result<()> {
        let buffer = table(&[(7, [1u8, 2, 3, 4].as_slice())]);
        let mut reader = FieldReader::new(&buffer, 0);
        reader.read_count()?;

        assert_eq!(reader.resolve(FieldIndex::NAME)?, None);

        Ok(())
    }

    #[test]
    fn unterminated_string_runs_to_the_end() -> Result<()> {
        let buffer = table(&[(0, b"Ice".as_slice())]);
        let mut reader = FieldReader::new(&buffer, 0);
        reader.read_count()?;

        assert_eq!(
            reader.resolve(FieldIndex::NAME)?,
            Some(FieldValue::Text("Ice".into()))
        );

        Ok(())
    }

    #[test]
    fn string_past_the_end_is_empty() -> Result<()> {
        let mut buffer = table(&[(0, b"".as_slice())]);
        // point the entry far outside of the buffer
        buffer[4..8].copy_from_slice(&0x1000u32.to_le_bytes());
        let mut reader = FieldReader::new(&buffer, 0);
        reader.read_count()?;

        assert_eq!(
            reader.resolve(FieldIndex::NAME)?,
            Some(FieldValue::Text(String::new()))
        );

        Ok(())
    }

    #[test]
    fn missing_entry_is_an_error() {
        let buffer = table(&[(0, b"Fire\0".as_slice())]);
        let mut reader = FieldReader::new(&buffer, 4);

        assert!(matches!(
            reader.resolve(FieldIndex(40)),
            Err(Error::TruncatedField { index: 40, .. })
        ));
    }

    #[test]
    fn japanese_log_reuses_the_name() -> Result<()> {
        let buffer = table(&[
            (0, b"\x83\x74\x83\x40\x83\x43\x83\x41\0".as_slice()),
            (0, b"Description\0".as_slice()),
        ]);
        let mut reader = FieldReader::new(&buffer, 0);

        let text = read_full_text(&mut reader, Language::Japanese)?;

        assert_eq!(text.name, Some(FieldValue::Text("ファイア".into())));
        assert_eq!(text.log, text.name);
        assert_eq!(
            text.description.as_ref().and_then(FieldValue::as_text),
            Some("Description")
        );

        Ok(())
    }

    #[test]
    fn english_uses_dedicated_slots() -> Result<()> {
        let buffer = table(&[
            (0, b"Fire Crystal\0".as_slice()),
            (0, b"a\0".as_slice()),
            (0, b"fire crystal\0".as_slice()),
            (0, b"fire crystals\0".as_slice()),
            (0, b"Used for synthesis.\0".as_slice()),
        ]);
        let mut reader = FieldReader::new(&buffer, 0);

        let text = read_full_text(&mut reader, Language::English)?;

        assert_eq!(
            text,
            ItemText {
                name: Some(FieldValue::Text("Fire Crystal".into())),
                log: Some(FieldValue::Text("fire crystal".into())),
                description: Some(FieldValue::Text("Used for synthesis.".into())),
            }
        );

        Ok(())
    }
}
