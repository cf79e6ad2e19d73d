//! Types for reading resource streams
//!

use std::io::{Read, Seek, SeekFrom};

use binrw::BinRead;
use bon::Builder;
use indexmap::IndexMap;
use tracing::{debug, instrument, trace, warn};

use crate::{
    action::{Action, ACTION_SIZE},
    cipher::{preserve_and_transform, rotate_right, Deobfuscator, ITEM_ROTATION},
    error::{Error, Result},
    item::{read_item, DecodedItem, ITEM_SIZE, ITEM_STRIDE},
    model::ResourceSink,
    spell::{Spell, SpellValidity, SPELL_SIZE},
    types::{BlockType, Header, HEADER_SIZE},
};

/// Decoder settings
#[derive(Builder, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Rule used to drop placeholder spell records
    #[builder(default)]
    pub spell_validity: SpellValidity,
}

/// Resource stream reader
///
/// Every decoded record is handed to the sink as soon as its batch is complete.
///
/// ```no_run
/// use std::fs::File;
///
/// use ffxi_dat::{BitCountRotation, ParseOptions, ResourceModel, ResourceParser};
///
/// fn count_spells(file: File) -> ffxi_dat::error::Result<usize> {
///     let mut reader = std::io::BufReader::new(file);
///     let mut model = ResourceModel::new();
///
///     ResourceParser::new(&BitCountRotation, &mut model, ParseOptions::default())
///         .parse_main_stream(&mut reader)?;
///
///     Ok(model.spells.len())
/// }
/// ```
pub struct ResourceParser<'a, D: Deobfuscator + ?Sized, S: ResourceSink + ?Sized> {
    deobfuscator: &'a D,
    sink: &'a mut S,
    options: ParseOptions,
}

impl<'a, D: Deobfuscator + ?Sized, S: ResourceSink + ?Sized> ResourceParser<'a, D, S> {
    pub fn new(deobfuscator: &'a D, sink: &'a mut S, options: ParseOptions) -> Self {
        ResourceParser {
            deobfuscator,
            sink,
            options,
        }
    }

    /// Walk a container and every block inside of it.
    ///
    /// The stream must be positioned at a container begin header. Reading stops at the matching container end,
    /// anything after it is left untouched.
    #[instrument(skip_all, err)]
    pub fn parse_main_stream<R: Read + Seek>(&mut self, reader: &mut R) -> Result<()> {
        let start = reader.stream_position()?;
        let mut header = Header::read(reader)?;
        if header.block_type() != BlockType::ContainerBegin {
            return Err(Error::MissingContainer {
                position: start,
                found: header.block_type(),
            });
        }
        skip_block(reader, &header)?;

        while header.block_type() != BlockType::ContainerEnd {
            header = Header::read(reader)?;
            let block = reader.stream_position()?;

            match header.block_type() {
                BlockType::ContainerEnd => {}
                BlockType::ContainerBegin => {
                    reader.seek(SeekFrom::Start(block - HEADER_SIZE))?;
                    self.parse_main_stream(reader)?;
                }
                BlockType::SpellData => self.parse_spells(reader, header.size())?,
                BlockType::AbilityData => self.parse_actions(reader, header.size())?,
                other => warn!(id = header.id, position = block, "skipping {other} block"),
            }

            if header.block_type() != BlockType::ContainerEnd {
                reader.seek(SeekFrom::Start(block))?;
                skip_block(reader, &header)?;
            }
        }

        Ok(())
    }

    /// Decode `length` bytes of ability records.
    #[instrument(skip(self, reader), err)]
    pub fn parse_actions<R: Read + Seek>(&mut self, reader: &mut R, length: i64) -> Result<()> {
        let count = record_count(length, ACTION_SIZE);
        let mut recasts = IndexMap::new();

        for _ in 0..count {
            let mut buffer = [0u8; ACTION_SIZE];
            reader.read_exact(&mut buffer)?;
            preserve_and_transform(self.deobfuscator, &mut buffer);

            let action = Action::read(&buffer)?;
            if let Some(recast) = action.recast() {
                recasts.insert(recast.recast_id, recast);
            }
            self.sink.add_action(action);
        }

        recasts.shift_remove(&0);
        debug!(actions = count, recasts = recasts.len(), "decoded ability table");
        self.sink.add_ability_recasts(recasts.into_values().collect());

        Ok(())
    }

    /// Decode `length` bytes of spell records.
    #[instrument(skip(self, reader), err)]
    pub fn parse_spells<R: Read + Seek>(&mut self, reader: &mut R, length: i64) -> Result<()> {
        let count = record_count(length, SPELL_SIZE);
        let mut added = 0;

        for index in 0..count {
            let mut buffer = [0u8; SPELL_SIZE];
            reader.read_exact(&mut buffer)?;
            preserve_and_transform(self.deobfuscator, &mut buffer);

            match Spell::read(&buffer, self.options.spell_validity)? {
                Some(spell) => {
                    self.sink.add_spell(spell);
                    added += 1;
                }
                None => trace!(index, "skipping unusable spell"),
            }
        }

        self.sink.remove_spell(0);
        debug!(records = count, added, "decoded spell table");

        Ok(())
    }

    /// Decode a pair of item tables.
    ///
    /// Both streams must hold the same items; the record count is taken from `english`.
    #[instrument(skip_all, err)]
    pub fn parse_items<E: Read + Seek, J: Read + Seek>(
        &mut self,
        english: &mut E,
        japanese: &mut J,
    ) -> Result<()> {
        let count = english.seek(SeekFrom::End(0))? / ITEM_STRIDE;
        let (mut items, mut monstrosity) = (0, 0);

        for index in 0..count {
            english.seek(SeekFrom::Start(index * ITEM_STRIDE))?;
            japanese.seek(SeekFrom::Start(index * ITEM_STRIDE))?;

            let mut english_buffer = [0u8; ITEM_SIZE];
            let mut japanese_buffer = [0u8; ITEM_SIZE];
            english.read_exact(&mut english_buffer)?;
            japanese.read_exact(&mut japanese_buffer)?;

            rotate_right(&mut english_buffer, ITEM_ROTATION);
            rotate_right(&mut japanese_buffer, ITEM_ROTATION);

            match read_item(&english_buffer, &japanese_buffer)? {
                Some(DecodedItem::Item(item)) => {
                    self.sink.add_item(item);
                    items += 1;
                }
                Some(DecodedItem::Monstrosity(item)) => {
                    self.sink.add_monstrosity(item);
                    monstrosity += 1;
                }
                None => {}
            }
        }

        debug!(records = count, items, monstrosity, "decoded item tables");

        Ok(())
    }
}

/// Move past the payload of `header`, the stream must be positioned right after it.
fn skip_block<R: Seek>(reader: &mut R, header: &Header) -> Result<()> {
    let block = reader.stream_position()?;
    let size = header.size();
    if size < 0 {
        return Err(Error::InvalidBlockSize {
            position: block,
            size,
        });
    }

    reader.seek(SeekFrom::Current(size))?;
    Ok(())
}

fn record_count(length: i64, stride: usize) -> usize {
    usize::try_from(length).map_or(0, |length| length / stride)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::ResourceModel;

    fn identity(_: &mut [u8]) {}

    fn block(block_type: BlockType, payload: &[u8]) -> Vec<u8> {
        let mut output = Cursor::new(Vec::new());
        Header::new(0, block_type, payload.len() as u32)
            .unwrap()
            .write(&mut output)
            .unwrap();
        let mut output = output.into_inner();
        output.extend(payload);
        output
    }

    #[test]
    fn recasts_keep_first_position() -> Result<()> {
        let mut data = Vec::new();
        for (id, recast) in [(0x0210i16, 3i16), (0x0211, 0), (0x0212, 4), (0x0213, 3)] {
            let mut record = [0u8; ACTION_SIZE];
            record[0..2].copy_from_slice(&id.to_le_bytes());
            record[8..10].copy_from_slice(&recast.to_le_bytes());
            data.extend(record);
        }

        let mut model = ResourceModel::new();
        ResourceParser::new(&identity, &mut model, ParseOptions::default())
            .parse_actions(&mut Cursor::new(data), 4 * ACTION_SIZE as i64)?;

        assert_eq!(model.actions.len(), 4);
        assert_eq!(
            model
                .ability_recasts
                .iter()
                .map(|recast| (recast.recast_id, recast.action_id))
                .collect::<Vec<_>>(),
            vec![(3, 0x13), (4, 0x12)]
        );

        Ok(())
    }

    #[test]
    fn partial_records_are_ignored() -> Result<()> {
        let data = vec![0u8; ACTION_SIZE + 8];

        let mut model = ResourceModel::new();
        ResourceParser::new(&identity, &mut model, ParseOptions::default())
            .parse_actions(&mut Cursor::new(data), ACTION_SIZE as i64 + 8)?;

        assert_eq!(model.actions.len(), 1);
        assert!(model.ability_recasts.is_empty());

        Ok(())
    }

    #[test]
    fn header_shorter_than_itself() {
        let mut stream = block(BlockType::ContainerBegin, &[]);
        // packed length of 8 with an unknown type
        stream.extend([0x00u8, 0x00, 0x00, 0x00, 0x42, 0x00, 0x00, 0x00]);
        stream.extend([0u8; 8]);

        let mut model = ResourceModel::new();
        let result = ResourceParser::new(&identity, &mut model, ParseOptions::default())
            .parse_main_stream(&mut Cursor::new(stream));

        assert!(matches!(
            result,
            Err(Error::InvalidBlockSize {
                position: 0x20,
                size: -16
            })
        ));
    }

    #[test]
    fn options_builder() {
        let options = ParseOptions::builder()
            .spell_validity(SpellValidity::FirstSlot)
            .build();
        assert_eq!(options.spell_validity, SpellValidity::FirstSlot);
        assert_eq!(
            ParseOptions::builder().build().spell_validity,
            SpellValidity::AnySlot
        );
    }
}
