//! Byte level obfuscation removal.
//!
//! Ability and spell tables are masked with a primitive supplied by the caller through [`Deobfuscator`]. Item
//! tables use a fixed rotation, see [`ITEM_ROTATION`].

/// Offsets of table records that survive deobfuscation untouched
pub const PRESERVED_OFFSETS: [usize; 3] = [2, 11, 12];

/// Number of bits every byte of an item record is rotated right by
pub const ITEM_ROTATION: u32 = 5;

/// In-place transform removing the masking of a fixed-size table record
pub trait Deobfuscator {
    /// Unmask `buffer` in place
    fn transform(&self, buffer: &mut [u8]);
}

impl<F: Fn(&mut [u8])> Deobfuscator for F {
    fn transform(&self, buffer: &mut [u8]) {
        self(buffer)
    }
}

/// Run `deobfuscator` over a table record, keeping the bytes at [`PRESERVED_OFFSETS`] as they were read.
///
/// `buffer` must be longer than the last preserved offset.
pub fn preserve_and_transform<D: Deobfuscator + ?Sized>(deobfuscator: &D, buffer: &mut [u8]) {
    let saved = PRESERVED_OFFSETS.map(|offset| buffer[offset]);

    deobfuscator.transform(buffer);

    for (offset, value) in PRESERVED_OFFSETS.into_iter().zip(saved) {
        buffer[offset] = value;
    }
}

/// Rotate every byte of `buffer` right by `bits`.
pub fn rotate_right(buffer: &mut [u8], bits: u32) {
    for byte in buffer {
        *byte = byte.rotate_right(bits);
    }
}

/// Table record masking used by the retail client's ability and spell tables.
///
/// The rotation applied to every byte is picked from the number of set bits in bytes 2, 11 and 12, which is why
/// those bytes are restored afterwards by [`preserve_and_transform`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BitCountRotation;

impl Deobfuscator for BitCountRotation {
    fn transform(&self, buffer: &mut [u8]) {
        if buffer.len() < 13 {
            return;
        }

        let count = buffer[2].count_ones() as i32 - buffer[11].count_ones() as i32
            + buffer[12].count_ones() as i32;
        let bits = match count.unsigned_abs() % 5 {
            0 => 7,
            1 => 1,
            2 => 6,
            3 => 2,
            _ => 5,
        };

        rotate_right(buffer, bits);
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn preserved_bytes_are_restored() {
        let mut buffer = [0x11u8; 16];
        buffer[2] = 0xA2;
        buffer[11] = 0xB1;
        buffer[12] = 0xC2;

        preserve_and_transform(&|data: &mut [u8]| data.fill(0), &mut buffer);

        let mut expected = [0u8; 16];
        expected[2] = 0xA2;
        expected[11] = 0xB1;
        expected[12] = 0xC2;
        assert_eq!(buffer, expected);
    }

    #[test]
    fn item_rotation() {
        let mut buffer = [0b0010_0000, 0b0000_0001, 0xFF, 0x00];
        rotate_right(&mut buffer, ITEM_ROTATION);
        assert_eq!(buffer, [0b0000_0001, 0b0000_1000, 0xFF, 0x00]);
    }

    #[test]
    fn bit_count_selects_rotation() {
        // 1 - 0 + 0 set bits selects a rotation of 1
        let mut buffer = [0u8; 0x30];
        buffer[2] = 0x01;
        buffer[20] = 0x02;
        BitCountRotation.transform(&mut buffer);
        assert_eq!(buffer[20], 0x01);
        assert_eq!(buffer[2], 0x80);

        // 0 - 8 + 0 set bits, |-8| % 5 = 3 selects a rotation of 2
        let mut buffer = [0u8; 0x30];
        buffer[11] = 0xFF;
        buffer[20] = 0x04;
        BitCountRotation.transform(&mut buffer);
        assert_eq!(buffer[20], 0x01);
    }

    #[test]
    fn short_buffers_are_left_alone() {
        let mut buffer = [0x80u8; 12];
        BitCountRotation.transform(&mut buffer);
        assert_eq!(buffer, [0x80u8; 12]);
    }
}
