//! Item table records.
//!
//! Items are stored in pairs of language specific tables that share the binary layout of every record but carry
//! their own text. The layout of a record depends on its id:
//!
//! | Ids               | Shape                                   |
//! |-------------------|-----------------------------------------|
//! | `0x0000`          | empty slot                              |
//! | see [`CATEGORY_TABLE`] | regular item of that [`ItemCategory`] |
//! | `0xF000..0xF200`  | monstrosity item                        |
//! | `0xFFFF`          | gil                                     |
//!
//! Anything else is a regular item with only the common properties.

use std::io::{Cursor, Seek, SeekFrom};
use std::ops::Range;

use byteorder::{LittleEndian, ReadBytesExt};
use indexmap::IndexMap;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::Result;
use crate::strings::{read_basic_text, read_full_text, FieldReader, FieldValue, ItemText, Language};

/// Distance between two records in an item table
pub const ITEM_STRIDE: u64 = 0xC00;

/// Part of each record holding the item, the remainder of the stride is not read
pub const ITEM_SIZE: usize = 0x200;

/// Monstrosity ids, rebased onto zero when decoded
pub const MONSTROSITY_IDS: Range<u16> = 0xF000..0xF200;

/// Id of the gil pseudo-item
pub const GIL_ID: u16 = 0xFFFF;

const TP_MOVES: usize = 16;

/// Layout of the category specific part of a regular item
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    General,
    Usable,
    Automaton,
    Armor,
    Weapon,
    Maze,
}

/// Inclusive range of item ids sharing a category
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CategoryRange {
    pub first: u16,
    pub last: u16,
    pub category: ItemCategory,
}

const fn range(first: u16, last: u16, category: ItemCategory) -> CategoryRange {
    CategoryRange {
        first,
        last,
        category,
    }
}

/// Category of every regular item id, ordered by id
pub const CATEGORY_TABLE: [CategoryRange; 8] = [
    range(0x0000, 0x0FFF, ItemCategory::General),
    range(0x1000, 0x1FFF, ItemCategory::Usable),
    range(0x2000, 0x21FF, ItemCategory::Automaton),
    range(0x2800, 0x3FFF, ItemCategory::General),
    range(0x4000, 0x63FF, ItemCategory::Armor),
    range(0x6400, 0x6FFF, ItemCategory::Weapon),
    range(0x7000, 0x73FF, ItemCategory::Armor),
    range(0x7400, 0x77FF, ItemCategory::Maze),
];

const fn is_ordered_and_disjoint(table: &[CategoryRange]) -> bool {
    let mut index = 0;
    while index < table.len() {
        if table[index].first > table[index].last {
            return false;
        }
        if index > 0 && table[index - 1].last >= table[index].first {
            return false;
        }
        index += 1;
    }
    true
}

const _: () = assert!(is_ordered_and_disjoint(&CATEGORY_TABLE));

impl ItemCategory {
    /// Category of a regular item id
    pub fn for_id(id: u16) -> Option<ItemCategory> {
        CATEGORY_TABLE
            .iter()
            .find(|range| (range.first..=range.last).contains(&id))
            .map(|range| range.category)
    }
}

/// Properties shared by every regular item
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ItemProperties {
    pub flags: u16,
    pub stack_size: u16,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: u16,
    pub targets: u16,
}

/// Who can equip an item, and where
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Equipment {
    pub level: u16,
    pub slots: u16,
    pub races: u16,
    pub jobs: u32,
}

/// Enchantment charges of equipment, absent when zero
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Charges {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub max_charges: Option<u8>,
    /// Seconds
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub cast_time: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub cast_delay: Option<u16>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub recast_delay: Option<u32>,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UsableItem {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub properties: ItemProperties,
    /// Seconds
    pub cast_time: f64,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ArmorItem {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub properties: ItemProperties,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub equipment: Equipment,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub superior_level: Option<u8>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub shield_size: Option<u16>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub charges: Charges,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub item_level: Option<u16>,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WeaponItem {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub properties: ItemProperties,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub equipment: Equipment,
    pub damage: u16,
    pub delay: i16,
    pub skill: u8,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub charges: Charges,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub item_level: Option<u16>,
}

/// Shape specific data of an [`Item`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(tag = "category", rename_all = "snake_case")
)]
pub enum ItemKind {
    Gil,
    General(ItemProperties),
    Usable(UsableItem),
    Automaton(ItemProperties),
    Armor(ArmorItem),
    Weapon(WeaponItem),
    Maze(ItemProperties),
    /// Id outside of every category range
    Unclassified(ItemProperties),
}

/// A decoded item with its text in both languages
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Item {
    pub id: u16,
    pub kind: ItemKind,
    pub english: ItemText,
    pub japanese: ItemText,
}

/// A monstrosity item, known by name only
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MonstrosityItem {
    /// Id relative to the first monstrosity item
    pub id: u16,
    /// TP move id to the level it is learned at
    pub tp_moves: IndexMap<u16, i8>,
    pub english: Option<FieldValue>,
    pub japanese: Option<FieldValue>,
}

/// Result of decoding one item slot
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedItem {
    Item(Item),
    Monstrosity(MonstrosityItem),
}

/// Decode a pair of deobfuscated records.
///
/// The binary fields are taken from `english`. Returns `None` for empty slots.
pub fn read_item(english: &[u8; ITEM_SIZE], japanese: &[u8; ITEM_SIZE]) -> Result<Option<DecodedItem>> {
    let mut reader = Cursor::new(&english[..]);

    let id = reader.read_u16::<LittleEndian>()?;
    if id == 0 {
        trace!("skipping empty item slot");
        return Ok(None);
    }
    skip(&mut reader, 2)?;

    if MONSTROSITY_IDS.contains(&id) {
        let item = read_monstrosity(id - MONSTROSITY_IDS.start, &mut reader, english, japanese)?;
        return Ok(Some(DecodedItem::Monstrosity(item)));
    }

    let kind = if id == GIL_ID {
        skip(&mut reader, 0x0C)?;
        ItemKind::Gil
    } else {
        read_kind(id, &mut reader)?
    };

    let position = reader.position() as usize;
    Ok(Some(DecodedItem::Item(Item {
        id,
        kind,
        english: read_full_text(&mut FieldReader::new(english, position), Language::English)?,
        japanese: read_full_text(&mut FieldReader::new(japanese, position), Language::Japanese)?,
    })))
}

fn read_monstrosity(
    id: u16,
    reader: &mut Cursor<&[u8]>,
    english: &[u8],
    japanese: &[u8],
) -> Result<MonstrosityItem> {
    skip(reader, 0x2C)?;

    let mut tp_moves = IndexMap::new();
    for _ in 0..TP_MOVES {
        let tp_move = reader.read_u16::<LittleEndian>()?;
        let level = reader.read_i8()?;
        let _padding = reader.read_u8()?;

        if level != 0 && level != -1 {
            tp_moves.entry(tp_move).or_insert(level);
        }
    }

    let position = reader.position() as usize;
    Ok(MonstrosityItem {
        id,
        tp_moves,
        english: read_basic_text(&mut FieldReader::new(english, position))?,
        japanese: read_basic_text(&mut FieldReader::new(japanese, position))?,
    })
}

fn read_kind(id: u16, reader: &mut Cursor<&[u8]>) -> Result<ItemKind> {
    let flags = reader.read_u16::<LittleEndian>()?;
    let stack_size = reader.read_u16::<LittleEndian>()?;
    let kind = reader.read_u16::<LittleEndian>()?;
    let _auction_sort = reader.read_u16::<LittleEndian>()?;
    let targets = reader.read_u16::<LittleEndian>()?;
    let properties = ItemProperties {
        flags,
        stack_size,
        kind,
        targets,
    };

    let Some(category) = ItemCategory::for_id(id) else {
        return Ok(ItemKind::Unclassified(properties));
    };

    let kind = match category {
        ItemCategory::General => {
            skip(reader, 10)?;
            ItemKind::General(properties)
        }
        ItemCategory::Automaton => {
            skip(reader, 10)?;
            ItemKind::Automaton(properties)
        }
        ItemCategory::Usable => {
            let cast_time = f64::from(reader.read_u16::<LittleEndian>()?) / 4.0;
            skip(reader, 8 + 4)?;
            ItemKind::Usable(UsableItem {
                properties,
                cast_time,
            })
        }
        ItemCategory::Armor => {
            let equipment = read_equipment(reader)?;
            let superior_level = nonzero(reader.read_u8()?);
            let _unknown = reader.read_u8()?;
            let shield_size = nonzero(reader.read_u16::<LittleEndian>()?);
            let charges = read_charges(reader)?;
            skip(reader, 2)?;
            let item_level = nonzero(reader.read_u16::<LittleEndian>()?);
            skip(reader, 4)?;

            ItemKind::Armor(ArmorItem {
                properties,
                equipment,
                superior_level,
                shield_size,
                charges,
                item_level,
            })
        }
        ItemCategory::Weapon => {
            let equipment = read_equipment(reader)?;
            skip(reader, 4)?;
            let damage = reader.read_u16::<LittleEndian>()?;
            let delay = reader.read_i16::<LittleEndian>()?;
            let _dps = reader.read_u16::<LittleEndian>()?;
            let skill = reader.read_u8()?;
            skip(reader, 5)?;
            let charges = read_charges(reader)?;
            skip(reader, 2)?;
            let item_level = nonzero(reader.read_u16::<LittleEndian>()?);
            skip(reader, 4)?;

            ItemKind::Weapon(WeaponItem {
                properties,
                equipment,
                damage,
                delay,
                skill,
                charges,
                item_level,
            })
        }
        ItemCategory::Maze => {
            skip(reader, 0x46)?;
            ItemKind::Maze(properties)
        }
    };

    Ok(kind)
}

fn read_equipment(reader: &mut Cursor<&[u8]>) -> Result<Equipment> {
    Ok(Equipment {
        level: reader.read_u16::<LittleEndian>()?,
        slots: reader.read_u16::<LittleEndian>()?,
        races: reader.read_u16::<LittleEndian>()?,
        jobs: reader.read_u32::<LittleEndian>()?,
    })
}

fn read_charges(reader: &mut Cursor<&[u8]>) -> Result<Charges> {
    Ok(Charges {
        max_charges: nonzero(reader.read_u8()?),
        cast_time: nonzero(reader.read_u8()?).map(|time| f64::from(time) / 4.0),
        cast_delay: nonzero(reader.read_u16::<LittleEndian>()?),
        recast_delay: nonzero(reader.read_u32::<LittleEndian>()?),
    })
}

fn nonzero<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

fn skip(reader: &mut Cursor<&[u8]>, count: i64) -> Result<()> {
    reader.seek(SeekFrom::Current(count))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Field table with one string per entry
    fn text(strings: &[&str]) -> Vec<u8> {
        let mut table = (strings.len() as u32).to_le_bytes().to_vec();
        let mut data = Vec::new();

        for string in strings {
            let offset = strings.len() * 8 + data.len();
            table.extend((offset as u32).to_le_bytes());
            table.extend(0u32.to_le_bytes());
            data.extend([0u8; 0x18]);
            data.extend(string.as_bytes());
            data.push(0);
        }

        table.extend(data);
        table
    }

    fn record(fields: &[&[u8]], strings: &[&str]) -> [u8; ITEM_SIZE] {
        let mut buffer = [0u8; ITEM_SIZE];
        let bytes = [fields.concat(), text(strings)].concat();
        buffer[..bytes.len()].copy_from_slice(&bytes);
        buffer
    }

    fn english(strings: [&str; 3]) -> ItemText {
        ItemText {
            name: Some(FieldValue::Text(strings[0].into())),
            log: Some(FieldValue::Text(strings[1].into())),
            description: Some(FieldValue::Text(strings[2].into())),
        }
    }

    fn japanese(strings: [&str; 2]) -> ItemText {
        ItemText {
            name: Some(FieldValue::Text(strings[0].into())),
            log: Some(FieldValue::Text(strings[0].into())),
            description: Some(FieldValue::Text(strings[1].into())),
        }
    }

    fn common(id: u16) -> Vec<u8> {
        [
            &id.to_le_bytes()[..],
            &[0, 0],
            &0x0800u16.to_le_bytes(),
            &12u16.to_le_bytes(),
            &4u16.to_le_bytes(),
            &0x0101u16.to_le_bytes(),
            &0x0001u16.to_le_bytes(),
        ]
        .concat()
    }

    const PROPERTIES: ItemProperties = ItemProperties {
        flags: 0x0800,
        stack_size: 12,
        kind: 4,
        targets: 1,
    };

    #[test]
    fn categories_follow_the_table() {
        assert_eq!(ItemCategory::for_id(0x0000), Some(ItemCategory::General));
        assert_eq!(ItemCategory::for_id(0x0FFF), Some(ItemCategory::General));
        assert_eq!(ItemCategory::for_id(0x1000), Some(ItemCategory::Usable));
        assert_eq!(ItemCategory::for_id(0x1FFF), Some(ItemCategory::Usable));
        assert_eq!(ItemCategory::for_id(0x2000), Some(ItemCategory::Automaton));
        assert_eq!(ItemCategory::for_id(0x21FF), Some(ItemCategory::Automaton));
        assert_eq!(ItemCategory::for_id(0x2200), None);
        assert_eq!(ItemCategory::for_id(0x27FF), None);
        assert_eq!(ItemCategory::for_id(0x2800), Some(ItemCategory::General));
        assert_eq!(ItemCategory::for_id(0x3FFF), Some(ItemCategory::General));
        assert_eq!(ItemCategory::for_id(0x4000), Some(ItemCategory::Armor));
        assert_eq!(ItemCategory::for_id(0x63FF), Some(ItemCategory::Armor));
        assert_eq!(ItemCategory::for_id(0x6400), Some(ItemCategory::Weapon));
        assert_eq!(ItemCategory::for_id(0x6FFF), Some(ItemCategory::Weapon));
        assert_eq!(ItemCategory::for_id(0x7000), Some(ItemCategory::Armor));
        assert_eq!(ItemCategory::for_id(0x73FF), Some(ItemCategory::Armor));
        assert_eq!(ItemCategory::for_id(0x7400), Some(ItemCategory::Maze));
        assert_eq!(ItemCategory::for_id(0x77FF), Some(ItemCategory::Maze));
        assert_eq!(ItemCategory::for_id(0x7800), None);
        assert_eq!(ItemCategory::for_id(0xEFFF), None);
        assert!(is_ordered_and_disjoint(&CATEGORY_TABLE));
        assert!(!is_ordered_and_disjoint(&[
            range(0x0000, 0x0FFF, ItemCategory::General),
            range(0x0FFF, 0x1FFF, ItemCategory::Usable),
        ]));
    }

    #[test]
    fn empty_slot() -> Result<()> {
        let buffer = [0u8; ITEM_SIZE];
        assert_eq!(read_item(&buffer, &buffer)?, None);

        Ok(())
    }

    #[test]
    fn general_item() -> Result<()> {
        let head = common(0x0FA0);
        let fields: &[&[u8]] = &[&head, &[0u8; 10]];
        let en = record(fields, &["Fire Crystal", "a", "fire crystal", "fire crystals", "Synthesis."]);
        let ja = record(fields, &["Hi no Kurisutaru", "Gosei."]);

        assert_eq!(
            read_item(&en, &ja)?,
            Some(DecodedItem::Item(Item {
                id: 0x0FA0,
                kind: ItemKind::General(PROPERTIES),
                english: english(["Fire Crystal", "fire crystal", "Synthesis."]),
                japanese: japanese(["Hi no Kurisutaru", "Gosei."]),
            }))
        );

        Ok(())
    }

    #[test]
    fn usable_item() -> Result<()> {
        let head = common(0x1010);
        let fields: &[&[u8]] = &[&head, &10u16.to_le_bytes(), &[0u8; 12]];
        let en = record(fields, &["Potion", "a", "potion", "potions", "Restores HP."]);
        let ja = record(fields, &["Poshon", "HP kaifuku."]);

        let Some(DecodedItem::Item(item)) = read_item(&en, &ja)? else {
            panic!("expected a regular item");
        };

        assert_eq!(
            item.kind,
            ItemKind::Usable(UsableItem {
                properties: PROPERTIES,
                cast_time: 2.5,
            })
        );
        assert_eq!(item.english, english(["Potion", "potion", "Restores HP."]));

        Ok(())
    }

    #[test]
    fn weapon_optionals() -> Result<()> {
        let head = common(0x6401);
        let fields: &[&[u8]] = &[
            &head,
            &1u16.to_le_bytes(),
            &0x0003u16.to_le_bytes(),
            &0x01FEu16.to_le_bytes(),
            &0x007F_FFFEu32.to_le_bytes(),
            &[0u8; 4],
            &5u16.to_le_bytes(),
            &240i16.to_le_bytes(),
            &[0u8; 2],
            &[3],
            &[0u8; 5],
            &[10],
            &[0],
            &0u16.to_le_bytes(),
            &30u32.to_le_bytes(),
            &[0u8; 2],
            &119u16.to_le_bytes(),
            &[0u8; 4],
        ];
        let en = record(fields, &["Onion Sword", "an", "onion sword", "onion swords", "DMG:5"]);
        let ja = record(fields, &["Onion Sodo", "D5"]);

        let Some(DecodedItem::Item(item)) = read_item(&en, &ja)? else {
            panic!("expected a regular item");
        };

        assert_eq!(item.id, 0x6401);
        assert_eq!(
            item.kind,
            ItemKind::Weapon(WeaponItem {
                properties: PROPERTIES,
                equipment: Equipment {
                    level: 1,
                    slots: 3,
                    races: 0x01FE,
                    jobs: 0x007F_FFFE,
                },
                damage: 5,
                delay: 240,
                skill: 3,
                charges: Charges {
                    max_charges: Some(10),
                    cast_time: None,
                    cast_delay: None,
                    recast_delay: Some(30),
                },
                item_level: Some(119),
            })
        );
        assert_eq!(item.japanese, japanese(["Onion Sodo", "D5"]));

        Ok(())
    }

    #[test]
    fn armor_optionals() -> Result<()> {
        let head = common(0x7001);
        let fields: &[&[u8]] = &[
            &head,
            &75u16.to_le_bytes(),
            &0x0002u16.to_le_bytes(),
            &0x01FEu16.to_le_bytes(),
            &0x0000_0002u32.to_le_bytes(),
            &[2],
            &[0],
            &3u16.to_le_bytes(),
            &[0],
            &[8],
            &5u16.to_le_bytes(),
            &0u32.to_le_bytes(),
            &[0u8; 2],
            &0u16.to_le_bytes(),
            &[0u8; 4],
        ];
        let en = record(fields, &["Shield", "a", "shield", "shields", "DEF:1"]);
        let ja = record(fields, &["Tate", "B1"]);

        let Some(DecodedItem::Item(item)) = read_item(&en, &ja)? else {
            panic!("expected a regular item");
        };

        assert_eq!(
            item.kind,
            ItemKind::Armor(ArmorItem {
                properties: PROPERTIES,
                equipment: Equipment {
                    level: 75,
                    slots: 2,
                    races: 0x01FE,
                    jobs: 2,
                },
                superior_level: Some(2),
                shield_size: Some(3),
                charges: Charges {
                    max_charges: None,
                    cast_time: Some(2.0),
                    cast_delay: Some(5),
                    recast_delay: None,
                },
                item_level: None,
            })
        );
        assert_eq!(item.english.name, Some(FieldValue::Text("Shield".into())));

        Ok(())
    }

    #[test]
    fn maze_and_unclassified() -> Result<()> {
        let head = common(0x7400);
        let fields: &[&[u8]] = &[&head, &[0u8; 0x46]];
        let en = record(fields, &["Maze Tabula", "a", "maze tabula", "maze tabulae", "Maze."]);
        let ja = record(fields, &["Meizu", "M."]);
        let Some(DecodedItem::Item(item)) = read_item(&en, &ja)? else {
            panic!("expected a regular item");
        };
        assert_eq!(item.kind, ItemKind::Maze(PROPERTIES));
        assert_eq!(item.english.description, Some(FieldValue::Text("Maze.".into())));

        let head = common(0x2300);
        let fields: &[&[u8]] = &[&head];
        let en = record(fields, &["Odd", "an", "odd", "odds", "?"]);
        let ja = record(fields, &["Hen", "?"]);
        let Some(DecodedItem::Item(item)) = read_item(&en, &ja)? else {
            panic!("expected a regular item");
        };
        assert_eq!(item.kind, ItemKind::Unclassified(PROPERTIES));
        assert_eq!(item.japanese.name, Some(FieldValue::Text("Hen".into())));

        Ok(())
    }

    #[test]
    fn gil() -> Result<()> {
        let fields: &[&[u8]] = &[&GIL_ID.to_le_bytes(), &[0u8; 2 + 0x0C]];
        let en = record(fields, &["Gil", "", "gil", "gil", "Currency."]);
        let ja = record(fields, &["Giru", "Okane."]);

        assert_eq!(
            read_item(&en, &ja)?,
            Some(DecodedItem::Item(Item {
                id: GIL_ID,
                kind: ItemKind::Gil,
                english: english(["Gil", "gil", "Currency."]),
                japanese: japanese(["Giru", "Okane."]),
            }))
        );

        Ok(())
    }

    #[test]
    fn monstrosity_moves() -> Result<()> {
        let mut moves = Vec::new();
        for (tp_move, level) in [
            (0x0101u16, 1i8),
            (0x0102, 0),
            (0x0103, -1),
            (0x0101, 50),
            (0x0104, 20),
        ] {
            moves.extend(tp_move.to_le_bytes());
            moves.extend([level as u8, 0]);
        }
        moves.resize(16 * 4, 0);

        let fields: &[&[u8]] = &[&0xF050u16.to_le_bytes(), &[0u8; 2 + 0x2C], &moves];
        let en = record(fields, &["Rabbit"]);
        let ja = record(fields, &["Usagi"]);

        assert_eq!(
            read_item(&en, &ja)?,
            Some(DecodedItem::Monstrosity(MonstrosityItem {
                id: 0x50,
                tp_moves: IndexMap::from([(0x0101, 1), (0x0104, 20)]),
                english: Some(FieldValue::Text("Rabbit".into())),
                japanese: Some(FieldValue::Text("Usagi".into())),
            }))
        );

        Ok(())
    }
}
