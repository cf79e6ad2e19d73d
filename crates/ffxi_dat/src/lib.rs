//! This library decodes the ability, spell and item tables shipped with *Final Fantasy XI*.
//!
//! # Resource Stream Format Documentation
//!
//! Abilities and spells live in a stream of nested blocks, items in a pair of flat tables (one per client
//! language). All multi-byte integers are little-endian.
//!
//! ## Blocks
//!
//! Every block starts with a 16 byte header:
//!
//! | Offset (bytes) | Field          | Description                                                        |
//! |----------------|----------------|--------------------------------------------------------------------|
//! | 0x0000         | Id             | 4 bytes: Block identifier                                          |
//! | 0x0004         | Size and type  | 4 bytes: Bits 0-6 hold the type, bits 7 and up the total length / 16 |
//! | 0x0008         | Padding        | 8 bytes: Unused                                                    |
//!
//! The payload length is the total length minus the header. Known types:
//!
//! - `0x00`: **Container end**, closes the innermost container.
//! - `0x01`: **Container begin**, every stream opens with one. Containers can nest.
//! - `0x49`: **Spell data**, a table of 0x64 byte spell records.
//! - `0x53`: **Ability data**, a table of 0x30 byte ability records.
//!
//! Other types are skipped. The length declared by a header always decides where the next header starts.
//!
//! ## Records
//!
//! Ability and spell records are masked by a per-record transform that leaves bytes 2, 11 and 12 alone, see
//! [`cipher`]. The transform is supplied by the caller through [`Deobfuscator`].
//!
//! Item tables hold one record every 0xC00 bytes. Only the first 0x200 bytes of each are used, every byte of
//! them rotated left by 5 bits. Text is stored in offset indexed field tables, see [`strings`], and encoded
//! with the game's Shift-JIS variant, see [`ffxi_text`].
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//!
//! use ffxi_dat::{BitCountRotation, ParseOptions, ResourceModel, ResourceParser};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut model = ResourceModel::new();
//!     let mut english = File::open("items_en.dat")?;
//!     let mut japanese = File::open("items_ja.dat")?;
//!
//!     ResourceParser::new(&BitCountRotation, &mut model, ParseOptions::default())
//!         .parse_items(&mut english, &mut japanese)?;
//!
//!     println!("{} items", model.items.len());
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod cipher;
pub mod error;
pub mod item;
pub mod model;
pub mod read;
pub mod spell;
pub mod strings;
pub mod types;

pub use action::{AbilityRecast, AbilityType, Action};
pub use cipher::{BitCountRotation, Deobfuscator};
pub use item::{DecodedItem, Item, ItemCategory, ItemKind, MonstrosityItem};
pub use model::{ResourceModel, ResourceSink};
pub use read::{ParseOptions, ResourceParser};
pub use spell::{MagicType, Spell, SpellValidity};
pub use strings::{FieldValue, ItemText};
pub use types::{BlockType, Header};
