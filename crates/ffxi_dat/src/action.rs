//! Ability table records.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::Result;

/// Stride of an ability record
pub const ACTION_SIZE: usize = 0x30;

/// Ids in this range carry a recast timer of their own
pub const RECAST_ACTION_IDS: std::ops::Range<i16> = 0x200..0x600;

/// Category of an ability, taken from byte 2 of the record
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum AbilityType {
    General,
    Item,
    JobAbility,
    PetCommand,
    WeaponSkill,
    Trait,
    BloodPactRage,
    BloodPactWard,
    MonsterSkill,
    Other(u8),
}

impl From<u8> for AbilityType {
    fn from(value: u8) -> Self {
        match value {
            0x00 => AbilityType::General,
            0x01 => AbilityType::Item,
            0x02 => AbilityType::JobAbility,
            0x03 => AbilityType::PetCommand,
            0x04 => AbilityType::WeaponSkill,
            0x05 => AbilityType::Trait,
            0x06 => AbilityType::BloodPactRage,
            0x07 => AbilityType::BloodPactWard,
            0x0E => AbilityType::MonsterSkill,
            other => AbilityType::Other(other),
        }
    }
}

impl AbilityType {
    /// Chat command used to invoke abilities of this type
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            AbilityType::Item => Some("/item"),
            AbilityType::JobAbility => Some("/jobability"),
            AbilityType::PetCommand | AbilityType::BloodPactRage | AbilityType::BloodPactWard => {
                Some("/pet")
            }
            AbilityType::WeaponSkill => Some("/weaponskill"),
            AbilityType::MonsterSkill => Some("/monsterskill"),
            AbilityType::General | AbilityType::Trait | AbilityType::Other(_) => None,
        }
    }
}

/// A decoded ability
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Action {
    pub id: i16,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: AbilityType,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub prefix: Option<&'static str>,
    pub element: u8,
    pub icon_id: i16,
    pub mp_cost: i16,
    pub recast_id: i16,
    pub targets: u16,
    pub tp_cost: i16,
    pub monster_level: i8,
    pub range: i8,
}

/// Maps a recast timer back to the ability using it
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AbilityRecast {
    pub recast_id: i16,
    /// Ability id relative to the first recast capable ability
    pub action_id: i16,
}

impl Action {
    /// Decode a deobfuscated record.
    pub fn read(buffer: &[u8; ACTION_SIZE]) -> Result<Action> {
        let mut reader = Cursor::new(&buffer[..]);

        let id = reader.read_i16::<LittleEndian>()?;
        let kind = AbilityType::from(reader.read_u8()?);
        let element = reader.read_u8()? & 0x07;
        let icon_id = reader.read_i16::<LittleEndian>()?;
        let mp_cost = reader.read_i16::<LittleEndian>()?;
        let recast_id = reader.read_i16::<LittleEndian>()?;
        let targets = reader.read_u16::<LittleEndian>()?;
        let tp_cost = match reader.read_i16::<LittleEndian>()? {
            -1 => 0,
            cost => cost,
        };
        let _unknown = reader.read_u8()?;
        let monster_level = reader.read_i8()?;
        let range = reader.read_i8()? % 15;

        Ok(Action {
            id,
            kind,
            prefix: kind.prefix(),
            element,
            icon_id,
            mp_cost,
            recast_id,
            targets,
            tp_cost,
            monster_level,
            range,
        })
    }

    /// Recast mapping for abilities inside [`RECAST_ACTION_IDS`]
    pub fn recast(&self) -> Option<AbilityRecast> {
        RECAST_ACTION_IDS
            .contains(&self.id)
            .then_some(AbilityRecast {
                recast_id: self.recast_id,
                action_id: self.id - RECAST_ACTION_IDS.start,
            })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[rustfmt::skip]
    fn provoke() -> [u8; ACTION_SIZE] {
        let mut buffer = [0u8; ACTION_SIZE];
        buffer[..0x11].copy_from_slice(&[
            0x23, 0x02,
            0x02,
            0xFE,
            0x40, 0x01,
            0x00, 0x00,
            0x05, 0x00,
            0x20, 0x00,
            0xFF, 0xFF,
            0x00,
            0x00,
            0x11,
        ]);
        buffer
    }

    #[test]
    fn read_job_ability() -> Result<()> {
        let action = Action::read(&provoke())?;

        assert_eq!(
            action,
            Action {
                id: 0x223,
                kind: AbilityType::JobAbility,
                prefix: Some("/jobability"),
                element: 0x06,
                icon_id: 0x140,
                mp_cost: 0,
                recast_id: 5,
                targets: 0x20,
                tp_cost: 0,
                monster_level: 0,
                range: 2,
            }
        );

        Ok(())
    }

    #[test]
    fn recast_range() -> Result<()> {
        let action = Action::read(&provoke())?;
        assert_eq!(
            action.recast(),
            Some(AbilityRecast {
                recast_id: 5,
                action_id: 0x23
            })
        );

        let mut buffer = provoke();
        buffer[1] = 0x06;
        assert_eq!(Action::read(&buffer)?.recast(), None);

        buffer[1] = 0x01;
        assert_eq!(Action::read(&buffer)?.recast(), None);

        Ok(())
    }

    #[test]
    fn negative_range_is_truncated() -> Result<()> {
        let mut buffer = provoke();
        buffer[0x10] = 0xEC;
        assert_eq!(Action::read(&buffer)?.range, -5);

        Ok(())
    }

    #[test]
    fn unknown_types_have_no_prefix() {
        assert_eq!(AbilityType::from(0x30), AbilityType::Other(0x30));
        assert_eq!(AbilityType::from(0x30).prefix(), None);
        assert_eq!(AbilityType::from(0x07).prefix(), Some("/pet"));
        assert_eq!(AbilityType::from(0x05).prefix(), None);
    }
}
