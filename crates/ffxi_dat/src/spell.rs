//! Spell table records.

use std::collections::BTreeMap;
use std::io::{Cursor, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::Result;

/// Stride of a spell record
pub const SPELL_SIZE: usize = 0x64;

const JOB_SLOTS: usize = 24;
const VALIDITY_OFFSET: usize = 0x0E;
const VALIDITY_LENGTH: usize = 48;
const UNUSABLE: u8 = 0xFF;

/// Rule deciding whether a spell record describes a real spell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SpellValidity {
    /// Keep records where any of the 48 job level bytes is set
    #[default]
    AnySlot,

    /// Drop records whose first job level byte is unset.
    ///
    /// Only the low byte of the first job's level is looked at, so this also drops spells that other jobs learn.
    FirstSlot,

    /// Keep every record
    KeepAll,
}

impl SpellValidity {
    /// Whether `buffer` passes this rule
    pub fn accepts(&self, buffer: &[u8; SPELL_SIZE]) -> bool {
        let levels = &buffer[VALIDITY_OFFSET..VALIDITY_OFFSET + VALIDITY_LENGTH];
        match self {
            SpellValidity::FirstSlot => levels[0] != UNUSABLE,
            SpellValidity::AnySlot => levels.iter().any(|&byte| byte != UNUSABLE),
            SpellValidity::KeepAll => true,
        }
    }
}

/// School of a spell
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum MagicType {
    None,
    WhiteMagic,
    BlackMagic,
    SummonerPact,
    Ninjutsu,
    BardSong,
    BlueMagic,
    Geomancy,
    Trust,
    Other(i16),
}

impl From<i16> for MagicType {
    fn from(value: i16) -> Self {
        match value {
            0 => MagicType::None,
            1 => MagicType::WhiteMagic,
            2 => MagicType::BlackMagic,
            3 => MagicType::SummonerPact,
            4 => MagicType::Ninjutsu,
            5 => MagicType::BardSong,
            6 => MagicType::BlueMagic,
            7 => MagicType::Geomancy,
            8 => MagicType::Trust,
            other => MagicType::Other(other),
        }
    }
}

impl MagicType {
    /// Chat command used to cast spells of this school
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            MagicType::None | MagicType::Other(_) => None,
            MagicType::Ninjutsu => Some("/ninjutsu"),
            MagicType::BardSong => Some("/song"),
            _ => Some("/magic"),
        }
    }
}

/// A decoded spell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Spell {
    pub id: i16,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: MagicType,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub prefix: Option<&'static str>,
    pub element: u8,
    pub targets: u16,
    pub skill: i16,
    pub mp_cost: i16,
    /// Seconds
    pub cast_time: f64,
    /// Seconds
    pub recast: f64,
    /// Job index to the level it learns the spell at
    pub levels: BTreeMap<u8, i16>,
    /// Always the spell id, the stored value is unreliable
    pub recast_id: i16,
    pub icon_id_nq: i16,
    pub icon_id: i16,
    pub requirements: u8,
    pub range: i8,
}

impl Spell {
    /// Decode a deobfuscated record, or `None` when `validity` rejects it.
    pub fn read(buffer: &[u8; SPELL_SIZE], validity: SpellValidity) -> Result<Option<Spell>> {
        if !validity.accepts(buffer) {
            return Ok(None);
        }

        let mut reader = Cursor::new(&buffer[..]);

        let id = reader.read_i16::<LittleEndian>()?;
        let kind = MagicType::from(reader.read_i16::<LittleEndian>()?);
        let element = reader.read_u8()?;
        let _unknown = reader.read_u8()?;
        let targets = reader.read_u16::<LittleEndian>()?;
        let skill = reader.read_i16::<LittleEndian>()?;
        let mp_cost = reader.read_i16::<LittleEndian>()?;
        let cast_time = f64::from(reader.read_u8()?) / 4.0;
        let recast = f64::from(reader.read_u8()?) / 4.0;

        let mut levels = BTreeMap::new();
        for job in 0..JOB_SLOTS as u8 {
            let level = reader.read_i16::<LittleEndian>()?;
            if level != -1 {
                levels.insert(job, level);
            }
        }
        // the last slot mirrors the first
        levels.remove(&(JOB_SLOTS as u8 - 1));

        reader.seek(SeekFrom::Current(2))?;
        let icon_id_nq = reader.read_i16::<LittleEndian>()?;
        let icon_id = reader.read_i16::<LittleEndian>()?;
        let requirements = reader.read_u8()?;
        let range = reader.read_i8()? % 15;

        Ok(Some(Spell {
            id,
            kind,
            prefix: kind.prefix(),
            element,
            targets,
            skill,
            mp_cost,
            cast_time,
            recast,
            levels,
            recast_id: id,
            icon_id_nq,
            icon_id,
            requirements,
            range,
        }))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cure() -> [u8; SPELL_SIZE] {
        let mut buffer = [0u8; SPELL_SIZE];
        buffer[0x00..0x02].copy_from_slice(&1i16.to_le_bytes());
        buffer[0x02..0x04].copy_from_slice(&1i16.to_le_bytes());
        buffer[0x04] = 6;
        buffer[0x06..0x08].copy_from_slice(&0x1Fu16.to_le_bytes());
        buffer[0x08..0x0A].copy_from_slice(&33i16.to_le_bytes());
        buffer[0x0A..0x0C].copy_from_slice(&8i16.to_le_bytes());
        buffer[0x0C] = 10;
        buffer[0x0D] = 20;
        buffer[VALIDITY_OFFSET..VALIDITY_OFFSET + VALIDITY_LENGTH].fill(UNUSABLE);
        // war, whm, rdm, pld and the mirrored last slot
        for (job, level) in [(0usize, 99i16), (3, 1), (5, 3), (7, 5), (23, 99)] {
            let offset = VALIDITY_OFFSET + job * 2;
            buffer[offset..offset + 2].copy_from_slice(&level.to_le_bytes());
        }
        buffer[0x3E..0x40].copy_from_slice(&0x7777i16.to_le_bytes());
        buffer[0x40..0x42].copy_from_slice(&0x56i16.to_le_bytes());
        buffer[0x42..0x44].copy_from_slice(&0x57i16.to_le_bytes());
        buffer[0x44] = 0x02;
        buffer[0x45] = 20;
        buffer
    }

    #[test]
    fn read_white_magic() -> Result<()> {
        let spell = Spell::read(&cure(), SpellValidity::FirstSlot)?;

        assert_eq!(
            spell,
            Some(Spell {
                id: 1,
                kind: MagicType::WhiteMagic,
                prefix: Some("/magic"),
                element: 6,
                targets: 0x1F,
                skill: 33,
                mp_cost: 8,
                cast_time: 2.5,
                recast: 5.0,
                levels: BTreeMap::from([(0, 99), (3, 1), (5, 3), (7, 5)]),
                recast_id: 1,
                icon_id_nq: 0x56,
                icon_id: 0x57,
                requirements: 0x02,
                range: 5,
            })
        );

        Ok(())
    }

    #[test]
    fn first_slot_decides_validity() -> Result<()> {
        let mut buffer = cure();
        buffer[VALIDITY_OFFSET] = UNUSABLE;

        assert!(!SpellValidity::FirstSlot.accepts(&buffer));
        assert!(SpellValidity::AnySlot.accepts(&buffer));
        assert_eq!(Spell::read(&buffer, SpellValidity::FirstSlot)?, None);

        Ok(())
    }

    #[test]
    fn spell_unknown_to_the_first_job_is_kept_by_default() -> Result<()> {
        let mut buffer = cure();
        buffer[VALIDITY_OFFSET..VALIDITY_OFFSET + 2].copy_from_slice(&(-1i16).to_le_bytes());

        let spell = Spell::read(&buffer, SpellValidity::default())?;

        assert_eq!(
            spell.map(|spell| spell.levels),
            Some(BTreeMap::from([(3, 1), (5, 3), (7, 5)]))
        );

        Ok(())
    }

    #[test]
    fn all_unset_is_rejected_unless_keeping_all() -> Result<()> {
        let mut buffer = cure();
        buffer[VALIDITY_OFFSET..VALIDITY_OFFSET + VALIDITY_LENGTH].fill(UNUSABLE);

        assert!(!SpellValidity::FirstSlot.accepts(&buffer));
        assert!(!SpellValidity::AnySlot.accepts(&buffer));

        let spell = Spell::read(&buffer, SpellValidity::KeepAll)?;
        assert_eq!(spell.map(|spell| spell.levels.len()), Some(0));

        Ok(())
    }

    #[test]
    fn first_slot_ignores_later_bytes() {
        let mut buffer = [UNUSABLE; SPELL_SIZE];
        buffer[VALIDITY_OFFSET] = 0x00;

        assert!(SpellValidity::FirstSlot.accepts(&buffer));
    }

    #[test]
    fn prefixes() {
        assert_eq!(MagicType::from(4).prefix(), Some("/ninjutsu"));
        assert_eq!(MagicType::from(5).prefix(), Some("/song"));
        assert_eq!(MagicType::from(6).prefix(), Some("/magic"));
        assert_eq!(MagicType::from(0).prefix(), None);
        assert_eq!(MagicType::from(42), MagicType::Other(42));
    }
}
