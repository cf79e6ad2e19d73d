use std::io::Cursor;

use binrw::BinWrite;
use ffxi_dat::{
    action::ACTION_SIZE,
    error::{Error, Result},
    item::{ItemKind, ITEM_SIZE, ITEM_STRIDE},
    spell::SPELL_SIZE,
    AbilityRecast, AbilityType, BlockType, FieldValue, Header, MagicType, ParseOptions, ResourceModel,
    ResourceParser, SpellValidity,
};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

fn identity(_: &mut [u8]) {}

/// Inverts every byte, the bytes at 2, 11 and 12 are expected to be stored as is
fn invert(buffer: &mut [u8]) {
    for byte in buffer {
        *byte = !*byte;
    }
}

fn block(block_type: BlockType, payload: &[u8]) -> Vec<u8> {
    let mut payload = payload.to_vec();
    payload.resize(payload.len().next_multiple_of(16), 0);

    let mut output = Cursor::new(Vec::new());
    Header::new(0x20202020, block_type, payload.len() as u32)
        .unwrap()
        .write(&mut output)
        .unwrap();

    let mut output = output.into_inner();
    output.extend(payload);
    output
}

fn container(blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut stream = block(BlockType::ContainerBegin, &[]);
    for data in blocks {
        stream.extend(data);
    }
    stream.extend(block(BlockType::ContainerEnd, &[]));
    stream
}

fn action(id: i16, kind: u8, recast: i16) -> [u8; ACTION_SIZE] {
    let mut record = [0u8; ACTION_SIZE];
    record[0..2].copy_from_slice(&id.to_le_bytes());
    record[2] = kind;
    record[8..10].copy_from_slice(&recast.to_le_bytes());
    record[12..14].copy_from_slice(&(-1i16).to_le_bytes());
    record
}

fn spell(id: i16, first_level: Option<i16>) -> [u8; SPELL_SIZE] {
    let mut record = [0u8; SPELL_SIZE];
    record[0..2].copy_from_slice(&id.to_le_bytes());
    record[2..4].copy_from_slice(&2i16.to_le_bytes());
    record[0x0E..0x3E].fill(0xFF);
    if let Some(level) = first_level {
        record[0x0E..0x10].copy_from_slice(&level.to_le_bytes());
    }
    record
}

fn parse(stream: Vec<u8>, deobfuscator: fn(&mut [u8])) -> Result<ResourceModel> {
    let mut model = ResourceModel::new();
    ResourceParser::new(&deobfuscator, &mut model, ParseOptions::default())
        .parse_main_stream(&mut Cursor::new(stream))?;
    Ok(model)
}

#[test]
fn empty_container() -> Result<()> {
    let model = parse(container(&[]), identity)?;

    assert!(model.is_empty());

    Ok(())
}

#[test]
fn container_end_stops_reading() -> Result<()> {
    let mut stream = container(&[]);
    stream.extend([0xFFu8; 64]);

    let model = parse(stream, identity)?;

    assert!(model.is_empty());

    Ok(())
}

#[test]
fn stream_must_open_with_a_container() {
    let stream = block(BlockType::SpellData, &spell(1, Some(1)));

    let result = parse(stream, identity);

    assert!(matches!(
        result,
        Err(Error::MissingContainer {
            position: 0,
            found: BlockType::SpellData
        })
    ));
}

#[test]
fn unterminated_container() {
    let mut stream = container(&[]);
    stream.truncate(16);

    assert!(matches!(parse(stream, identity), Err(Error::BinRWError(_))));
}

#[traced_test]
#[test]
fn unknown_blocks_are_skipped() -> Result<()> {
    let stream = container(&[
        block(BlockType::Unknown(0x20), &[0x53; 0x40]),
        block(BlockType::AbilityData, &action(0x10, 0x04, 0)),
    ]);

    let model = parse(stream, identity)?;

    assert!(logs_contain("skipping unknown (0x20) block"));
    assert_eq!(model.actions.len(), 1);
    assert_eq!(model.actions[0].kind, AbilityType::WeaponSkill);
    assert_eq!(model.actions[0].tp_cost, 0);

    Ok(())
}

#[test]
fn nested_container() -> Result<()> {
    let stream = container(&[container(&[])]);

    let model = parse(stream, identity)?;

    assert!(model.is_empty());

    Ok(())
}

#[test]
fn nested_container_is_walked() -> Result<()> {
    let inner = container(&[block(BlockType::AbilityData, &action(0x0220, 0x02, 7))]);
    let mut stream = container(&[inner]);
    // never reached, the outer walk also stops at the inner container end
    stream.truncate(stream.len() - 16);
    stream.extend(block(BlockType::AbilityData, &action(0x0230, 0x02, 8)));
    stream.extend(block(BlockType::ContainerEnd, &[]));

    let model = parse(stream, identity)?;

    // the inner walk reads the ability block, then the outer walk resumes at the end of the inner begin header,
    // reads it a second time and stops at the inner container end
    assert_eq!(
        model.actions.iter().map(|action| action.id).collect::<Vec<_>>(),
        vec![0x0220, 0x0220]
    );
    assert_eq!(
        model.ability_recasts,
        vec![
            AbilityRecast {
                recast_id: 7,
                action_id: 0x20
            },
            AbilityRecast {
                recast_id: 7,
                action_id: 0x20
            },
        ]
    );

    Ok(())
}

#[test]
fn abilities_and_recasts() -> Result<()> {
    let mut actions = Vec::new();
    actions.extend(action(0x0210, 0x02, 1));
    actions.extend(action(0x0211, 0x02, 0));
    actions.extend(action(0x0100, 0x04, 2));

    let model = parse(container(&[block(BlockType::AbilityData, &actions)]), identity)?;

    assert_eq!(
        model.actions.iter().map(|action| action.id).collect::<Vec<_>>(),
        vec![0x0210, 0x0211, 0x0100]
    );
    assert_eq!(
        model.ability_recasts,
        vec![AbilityRecast {
            recast_id: 1,
            action_id: 0x10
        }]
    );

    Ok(())
}

#[test]
fn deobfuscator_keeps_preserved_bytes() -> Result<()> {
    let mut record = action(0x0210, 0x02, 0x0105);
    for (offset, byte) in record.iter_mut().enumerate() {
        if ![2, 11, 12].contains(&offset) {
            *byte = !*byte;
        }
    }

    let model = parse(container(&[block(BlockType::AbilityData, &record)]), invert)?;

    let action = &model.actions[0];
    assert_eq!(action.id, 0x0210);
    assert_eq!(action.kind, AbilityType::JobAbility);
    assert_eq!(action.recast_id, 0x0105);
    // the low byte of the tp cost sits at 12 and was stored as is
    assert_eq!(action.tp_cost, 0);

    Ok(())
}

#[test]
fn spell_filtering() -> Result<()> {
    let mut spells = Vec::new();
    spells.extend(spell(1, Some(1)));
    spells.extend(spell(2, None));
    spells.extend(spell(0, Some(1)));

    let model = parse(container(&[block(BlockType::SpellData, &spells)]), identity)?;

    assert_eq!(model.spells.len(), 1);
    assert_eq!(model.spells[0].id, 1);
    assert_eq!(model.spells[0].kind, MagicType::BlackMagic);
    assert_eq!(model.spells[0].prefix, Some("/magic"));

    Ok(())
}

#[test]
fn spell_learned_by_a_later_job() -> Result<()> {
    let mut record = spell(3, Some(-1));
    // the first job cannot learn it, the third one can
    record[0x12..0x14].copy_from_slice(&1i16.to_le_bytes());
    let stream = container(&[block(BlockType::SpellData, &record)]);

    let model = parse(stream.clone(), identity)?;
    assert_eq!(model.spells.len(), 1);
    assert_eq!(model.spells[0].id, 3);
    assert_eq!(model.spells[0].levels.get(&2), Some(&1));
    assert_eq!(model.spells[0].levels.get(&0), None);

    let mut model = ResourceModel::new();
    let options = ParseOptions::builder()
        .spell_validity(SpellValidity::FirstSlot)
        .build();
    ResourceParser::new(&identity, &mut model, options).parse_main_stream(&mut Cursor::new(stream))?;
    assert!(model.spells.is_empty());

    Ok(())
}

#[test]
fn keep_all_spells() -> Result<()> {
    let mut spells = Vec::new();
    spells.extend(spell(4, None));
    spells.extend(spell(5, Some(1)));
    let stream = container(&[block(BlockType::SpellData, &spells)]);

    let mut model = ResourceModel::new();
    let options = ParseOptions::builder()
        .spell_validity(SpellValidity::KeepAll)
        .build();
    ResourceParser::new(&identity, &mut model, options).parse_main_stream(&mut Cursor::new(stream))?;

    assert_eq!(
        model.spells.iter().map(|spell| spell.id).collect::<Vec<_>>(),
        vec![4, 5]
    );
    assert!(model.spells[0].levels.is_empty());

    Ok(())
}

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

/// Item table with one obfuscated record per entry
fn items(records: &[Vec<u8>]) -> Cursor<Vec<u8>> {
    let mut table = vec![0u8; records.len() * ITEM_STRIDE as usize];

    for (index, record) in records.iter().enumerate() {
        let start = index * ITEM_STRIDE as usize;
        for (offset, byte) in record.iter().take(ITEM_SIZE).enumerate() {
            table[start + offset] = byte.rotate_left(5);
        }
    }

    Cursor::new(table)
}

fn monstrosity(strings: &[&str]) -> Vec<u8> {
    let mut record = 0xF050u16.to_le_bytes().to_vec();
    record.resize(0x30, 0);
    record.extend(0x0301u16.to_le_bytes());
    record.extend([5u8, 0]);
    record.resize(0x70, 0);
    record.extend(text(strings));
    record
}

fn gil(strings: &[&str]) -> Vec<u8> {
    let mut record = 0xFFFFu16.to_le_bytes().to_vec();
    record.resize(0x10, 0);
    record.extend(text(strings));
    record
}

fn weapon(strings: &[&str]) -> Vec<u8> {
    let mut record = 0x6401u16.to_le_bytes().to_vec();
    record.resize(0x0E, 0);
    record.extend(1u16.to_le_bytes());
    record.resize(0x1C, 0);
    record.extend(7u16.to_le_bytes());
    record.extend(200i16.to_le_bytes());
    record.resize(0x38, 0);
    record.extend(text(strings));
    record
}

#[test]
fn bilingual_items() -> Result<()> {
    let mut english = items(&[
        vec![0u8; 4],
        monstrosity(&["Rabbit"]),
        gil(&["Gil", "", "gil", "gil", "Currency."]),
        weapon(&["Dagger", "a", "dagger", "daggers", "DMG:7"]),
    ]);
    let mut japanese = items(&[
        vec![0u8; 4],
        monstrosity(&["Usagi"]),
        gil(&["Giru", "Okane."]),
        weapon(&["Tanken", "D7"]),
    ]);

    let mut model = ResourceModel::new();
    ResourceParser::new(&identity, &mut model, ParseOptions::default())
        .parse_items(&mut english, &mut japanese)?;

    assert_eq!(model.monstrosity.len(), 1);
    let rabbit = &model.monstrosity[0];
    assert_eq!(rabbit.id, 0x50);
    assert_eq!(rabbit.tp_moves.get(&0x0301), Some(&5));
    assert_eq!(rabbit.english, Some(FieldValue::Text("Rabbit".into())));

    assert_eq!(
        model.items.iter().map(|item| item.id).collect::<Vec<_>>(),
        vec![0xFFFF, 0x6401]
    );
    assert_eq!(model.items[0].kind, ItemKind::Gil);
    assert_eq!(
        model.items[0].japanese.description,
        Some(FieldValue::Text("Okane.".into()))
    );

    let ItemKind::Weapon(dagger) = &model.items[1].kind else {
        panic!("expected a weapon, found {:?}", model.items[1].kind);
    };
    assert_eq!(dagger.equipment.level, 1);
    assert_eq!(dagger.damage, 7);
    assert_eq!(dagger.delay, 200);
    assert_eq!(dagger.item_level, None);
    assert_eq!(dagger.charges.max_charges, None);
    assert_eq!(
        model.items[1].english.log,
        Some(FieldValue::Text("dagger".into()))
    );
    assert_eq!(
        model.items[1].japanese.log,
        Some(FieldValue::Text("Tanken".into()))
    );

    Ok(())
}

#[test]
fn item_count_follows_the_english_table() -> Result<()> {
    let mut english = items(&[gil(&["Gil", "", "gil", "gil", "Currency."])]);
    english.get_mut().extend([0u8; 0x100]);
    let mut japanese = items(&[gil(&["Giru", "Okane."])]);

    let mut model = ResourceModel::new();
    ResourceParser::new(&identity, &mut model, ParseOptions::default())
        .parse_items(&mut english, &mut japanese)?;

    assert_eq!(model.items.len(), 1);

    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn model_serializes_to_json() -> Result<()> {
    let mut english = items(&[gil(&["Gil", "", "gil", "gil", "Currency."])]);
    let mut japanese = items(&[gil(&["Giru", "Okane."])]);

    let mut model = ResourceModel::new();
    ResourceParser::new(&identity, &mut model, ParseOptions::default())
        .parse_items(&mut english, &mut japanese)?;

    let json = serde_json::to_value(&model).unwrap();

    assert_eq!(json["items"][0]["id"], 0xFFFF);
    assert_eq!(json["items"][0]["kind"]["category"], "gil");
    assert_eq!(json["items"][0]["english"]["log"], "gil");
    assert_eq!(json["items"][0]["japanese"]["description"], "Okane.");
    assert!(json["spells"].as_array().is_some_and(Vec::is_empty));

    Ok(())
}
