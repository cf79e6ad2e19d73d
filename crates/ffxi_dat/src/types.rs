//! Block headers of the resource stream.

use binrw::{BinRead, BinWrite};
use derive_more::Display;

/// Size of an encoded [`Header`]
pub const HEADER_SIZE: u64 = 16;

/// Largest total block length a [`Header`] can encode
pub const MAX_BLOCK_LENGTH: u32 = (u32::MAX >> 3) & !0xF;

/// Type of a block, taken from the low 7 bits of [`Header::size_and_type`]
#[derive(Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// Closes the innermost open container
    #[display("container end")]
    ContainerEnd,

    /// Opens a container
    #[display("container begin")]
    ContainerBegin,

    /// Table of 0x64 byte spell records
    #[display("spell data")]
    SpellData,

    /// Table of 0x30 byte ability records
    #[display("ability data")]
    AbilityData,

    /// Any block this library does not interpret
    #[display("unknown ({_0:#04x})")]
    Unknown(u8),
}

impl From<u8> for BlockType {
    fn from(value: u8) -> Self {
        match value {
            0x00 => BlockType::ContainerEnd,
            0x01 => BlockType::ContainerBegin,
            0x49 => BlockType::SpellData,
            0x53 => BlockType::AbilityData,
            other => BlockType::Unknown(other),
        }
    }
}

impl From<BlockType> for u8 {
    fn from(value: BlockType) -> Self {
        match value {
            BlockType::ContainerEnd => 0x00,
            BlockType::ContainerBegin => 0x01,
            BlockType::SpellData => 0x49,
            BlockType::AbilityData => 0x53,
            BlockType::Unknown(other) => other,
        }
    }
}

/// Block header
///
/// Every block in the stream starts with this 16 byte header. The second word packs both the block type and the
/// total block length (header included, in units of 16 bytes).
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct Header {
    /// Block identifier, usually four ASCII characters
    pub id: i32,

    /// Packed block length and [`BlockType`]
    pub size_and_type: u32,

    /// Unused
    pub padding: u64,
}

impl Header {
    /// Build a header for a block carrying `size` bytes of payload.
    ///
    /// `size` is rounded down to a multiple of 16, matching what the packed form can express. Returns `None` when
    /// the total length does not fit the 29 bits available for it.
    pub fn new(id: i32, block_type: BlockType, size: u32) -> Option<Header> {
        let total = (size & !0xF).checked_add(HEADER_SIZE as u32)?;
        if total > MAX_BLOCK_LENGTH {
            return None;
        }

        Some(Header {
            id,
            size_and_type: (total << 3) | u32::from(u8::from(block_type) & 0x7F),
            padding: 0,
        })
    }

    /// Length of the payload following this header.
    ///
    /// Negative when the packed length is smaller than the header itself.
    pub fn size(&self) -> i64 {
        i64::from((self.size_and_type >> 3) & !0xF) - HEADER_SIZE as i64
    }

    /// Type of this block
    pub fn block_type(&self) -> BlockType {
        BlockType::from((self.size_and_type & 0x7F) as u8)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{BlockType, Header, HEADER_SIZE, MAX_BLOCK_LENGTH};

    #[test]
    fn read_container_begin() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x6D, 0x65, 0x6E, 0x75,
            0x81, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ]);

        let header = Header::read(&mut input)?;

        assert_eq!(header.id, 0x756E656D);
        assert_eq!(header.block_type(), BlockType::ContainerBegin);
        assert_eq!(header.size(), 0);

        Ok(())
    }

    #[test]
    fn size_and_type_are_independent() {
        let header = Header {
            size_and_type: 0x0000_1A53,
            ..Default::default()
        };

        assert_eq!(header.block_type(), BlockType::AbilityData);
        assert_eq!(header.size(), 0x340 - 16);
    }

    #[test]
    fn zero_length_header_has_negative_size() {
        assert_eq!(Header::default().size(), -16);
        assert_eq!(Header::default().block_type(), BlockType::ContainerEnd);
    }

    #[test]
    fn unknown_types_keep_their_value() {
        let header = Header::new(0, BlockType::Unknown(0x20), 0x40).unwrap();

        assert_eq!(header.block_type(), BlockType::Unknown(0x20));
        assert_eq!(header.size(), 0x40);
        assert_eq!(BlockType::Unknown(0x20).to_string(), "unknown (0x20)");
    }

    #[test]
    fn oversized_blocks_have_no_header() {
        let largest = MAX_BLOCK_LENGTH - HEADER_SIZE as u32;
        let header = Header::new(0, BlockType::SpellData, largest).unwrap();

        assert_eq!(header.size(), i64::from(largest));
        assert_eq!(header.block_type(), BlockType::SpellData);
        assert_eq!(Header::new(0, BlockType::SpellData, largest + 0x10), None);
        assert_eq!(Header::new(0, BlockType::SpellData, 0xFFFF_FFF0), None);
        assert_eq!(Header::new(0, BlockType::SpellData, u32::MAX), None);
    }

    #[test]
    fn write_spell_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x73, 0x70, 0x65, 0x6C,
            0xC9, 0x03, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];

        let header = Header::new(0x6C657073, BlockType::SpellData, 0x64).unwrap();

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);
        assert_eq!(header.size(), 0x60);

        Ok(())
    }
}
