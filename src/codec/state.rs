//! Share-string format for a whole layout
//!
//! Three `.`-separated sections in fixed order: buildings, decorations,
//! enclosures. Items are 3-digit records `[catalog][x][y]`, enclosures are
//! 5-digit records `[occupant][x][y][w][h]`, every digit base-36. Trailing
//! separators are stripped on encode so the string survives being pasted as
//! the last thing in a sentence; decode treats missing sections as empty.

use serde::Serialize;

use crate::core::error::CodecError;
use crate::core::types::ItemKind;
use crate::placement::PlacementStore;

use super::base36::{decode_digit, encode_digit};

pub const SECTION_SEPARATOR: char = '.';
pub const ITEM_RECORD_LEN: usize = 3;
pub const ENCLOSURE_RECORD_LEN: usize = 5;

/// A building or decoration as stored in a share string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    pub catalog_index: usize,
    pub x: i32,
    pub y: i32,
}

/// An enclosure as stored in a share string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnclosureRecord {
    pub occupant_index: usize,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Id-free view of a layout: only catalog references and geometry survive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutSnapshot {
    pub buildings: Vec<ItemRecord>,
    pub decorations: Vec<ItemRecord>,
    pub enclosures: Vec<EnclosureRecord>,
}

impl LayoutSnapshot {
    /// Capture the store's contents in insertion order
    pub fn from_store(store: &PlacementStore) -> Self {
        let records = |kind: ItemKind| -> Vec<ItemRecord> {
            store
                .items(kind)
                .iter()
                .map(|i| ItemRecord { catalog_index: i.catalog_index, x: i.x, y: i.y })
                .collect()
        };
        Self {
            buildings: records(ItemKind::Building),
            decorations: records(ItemKind::Decoration),
            enclosures: store
                .enclosures()
                .iter()
                .map(|e| EnclosureRecord {
                    occupant_index: e.occupant_index,
                    x: e.x,
                    y: e.y,
                    w: e.width,
                    h: e.height,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() && self.decorations.is_empty() && self.enclosures.is_empty()
    }
}

/// Encoder/decoder for the share-string format
pub struct StateCodec;

impl StateCodec {
    /// Encode a store directly
    pub fn encode(store: &PlacementStore) -> Result<String, CodecError> {
        Self::encode_snapshot(&LayoutSnapshot::from_store(store))
    }

    pub fn encode_snapshot(snapshot: &LayoutSnapshot) -> Result<String, CodecError> {
        let mut out = String::with_capacity(
            (snapshot.buildings.len() + snapshot.decorations.len()) * ITEM_RECORD_LEN
                + snapshot.enclosures.len() * ENCLOSURE_RECORD_LEN
                + 2,
        );

        encode_items(&mut out, &snapshot.buildings)?;
        out.push(SECTION_SEPARATOR);
        encode_items(&mut out, &snapshot.decorations)?;
        out.push(SECTION_SEPARATOR);
        for e in &snapshot.enclosures {
            out.push(encode_digit("occupant index", e.occupant_index as i64)?);
            out.push(encode_digit("x", e.x as i64)?);
            out.push(encode_digit("y", e.y as i64)?);
            out.push(encode_digit("width", e.w as i64)?);
            out.push(encode_digit("height", e.h as i64)?);
        }

        let trimmed_len = out.trim_end_matches(SECTION_SEPARATOR).len();
        out.truncate(trimmed_len);
        Ok(out)
    }

    /// Decode a share string
    ///
    /// A trailing partial record in any section is dropped silently. Any bad
    /// digit fails the whole decode.
    pub fn decode(encoded: &str) -> Result<LayoutSnapshot, CodecError> {
        let mut sections = encoded.split(SECTION_SEPARATOR);
        let buildings = sections.next().unwrap_or("");
        let decorations = sections.next().unwrap_or("");
        let enclosures = sections.next().unwrap_or("");

        let snapshot = LayoutSnapshot {
            buildings: decode_items("buildings", buildings)?,
            decorations: decode_items("decorations", decorations)?,
            enclosures: decode_records("enclosures", enclosures, ENCLOSURE_RECORD_LEN)?
                .into_iter()
                .map(|d| EnclosureRecord {
                    occupant_index: d[0] as usize,
                    x: d[1] as i32,
                    y: d[2] as i32,
                    w: d[3] as i32,
                    h: d[4] as i32,
                })
                .collect(),
        };
        Ok(snapshot)
    }
}

fn encode_items(out: &mut String, items: &[ItemRecord]) -> Result<(), CodecError> {
    for item in items {
        out.push(encode_digit("catalog index", item.catalog_index as i64)?);
        out.push(encode_digit("x", item.x as i64)?);
        out.push(encode_digit("y", item.y as i64)?);
    }
    Ok(())
}

fn decode_items(section: &'static str, text: &str) -> Result<Vec<ItemRecord>, CodecError> {
    Ok(decode_records(section, text, ITEM_RECORD_LEN)?
        .into_iter()
        .map(|d| ItemRecord {
            catalog_index: d[0] as usize,
            x: d[1] as i32,
            y: d[2] as i32,
        })
        .collect())
}

/// Split a section into fixed-width records of decoded digits
fn decode_records(section: &'static str, text: &str, stride: usize) -> Result<Vec<Vec<u32>>, CodecError> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks_exact(stride)
        .map(|record| {
            record
                .iter()
                .map(|&ch| decode_digit(section, ch))
                .collect::<Result<Vec<u32>, CodecError>>()
        })
        .collect()
}
