use serde::{Deserialize, Serialize};

use super::ensure_capacity;
use crate::rom::Rom;
use crate::Result;

pub const TEXT_OFFSET: usize = 0xE_0000;
/// Bytes available for dialogue, terminator included.
pub const TEXT_CAPACITY: usize = 0x7355;
const TEXT_TERMINATOR: u8 = 0xFF;

pub const CREDITS_OFFSET: usize = 0x18_1500;
pub const CREDITS_CAPACITY: usize = 0x1000;
pub const CREDITS_POINTER_OFFSET: usize = 0x7_6CC0;
pub const CREDITS_MAX_ENTRIES: usize = 0x80;

pub trait GlyphEncoder {
    fn encode(&self, text: &str) -> Vec<u8>;
}

/// Key to encoded bytes, kept in insertion order. Re-inserting a key replaces its bytes in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedTable {
    entries: Vec<(String, Vec<u8>)>,
}

impl EncodedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = bytes,
            None => self.entries.push((key, bytes)),
        }
    }

    pub fn insert_text<E: GlyphEncoder + ?Sized>(&mut self, encoder: &E, key: impl Into<String>, text: &str) {
        self.insert(key, encoder.encode(text));
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn blob(&self) -> Vec<u8> {
        self.entries.iter().flat_map(|(_, b)| b.iter().copied()).collect()
    }
}

pub type TextTable = EncodedTable;
pub type CreditsTable = EncodedTable;

pub fn encode_text(table: &TextTable) -> Result<Vec<u8>> {
    let mut blob = table.blob();
    blob.push(TEXT_TERMINATOR);
    ensure_capacity("text bytes", TEXT_CAPACITY, blob.len())?;
    Ok(blob)
}

pub fn write_text(rom: &mut Rom, table: &TextTable) -> Result<()> {
    let blob = encode_text(table)?;
    rom.write(TEXT_OFFSET, &blob)?;
    log::debug!("wrote {} dialogue entries ({} bytes)", table.len(), blob.len());
    Ok(())
}

/// Returns the credits blob and its pointer table: each entry's offset within the blob.
pub fn encode_credits(table: &CreditsTable) -> Result<(Vec<u8>, Vec<u8>)> {
    ensure_capacity("credits entries", CREDITS_MAX_ENTRIES, table.len())?;
    let blob = table.blob();
    ensure_capacity("credits bytes", CREDITS_CAPACITY, blob.len())?;

    let mut pointers = Vec::with_capacity(table.len() * 2);
    let mut cursor = 0usize;
    for (_, bytes) in &table.entries {
        pointers.extend_from_slice(&(cursor as u16).to_le_bytes());
        cursor += bytes.len();
    }
    Ok((blob, pointers))
}

pub fn write_credits(rom: &mut Rom, table: &CreditsTable) -> Result<()> {
    let (blob, pointers) = encode_credits(table)?;
    rom.write(CREDITS_OFFSET, &blob)?;
    rom.write(CREDITS_POINTER_OFFSET, &pointers)?;
    Ok(())
}
