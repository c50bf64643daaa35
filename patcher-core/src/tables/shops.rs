use serde::{Deserialize, Serialize};

use super::ensure_capacity;
use crate::rom::Rom;
use crate::Result;

pub const SHOP_HEADER_OFFSET: usize = 0x18_4800;
pub const SHOP_ITEMS_OFFSET: usize = 0x18_4900;
/// Purchase state lives in SRAM, one byte per inventory slot across all shops.
pub const SRAM_SLOTS: usize = 36;
pub const MAX_SHOP_INVENTORY: usize = 3;

const ROW_LEN: usize = 8;
const TERMINATOR: [u8; ROW_LEN] = [0xFF; ROW_LEN];
const HEADER_REGION_LEN: usize = SHOP_ITEMS_OFFSET - SHOP_HEADER_OFFSET;
const MAX_SHOPS: usize = HEADER_REGION_LEN / ROW_LEN - 1;
const NO_REPLACEMENT: u8 = 0xFF;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopKind {
    #[default]
    Regular,
    TakeAny,
    Upgrade,
}

impl ShopKind {
    fn flag(self) -> u8 {
        match self {
            ShopKind::Regular => 0x00,
            ShopKind::TakeAny => 0x80,
            ShopKind::Upgrade => 0x40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub item: u8,
    pub price: u16,
    /// Purchase limit; 0 means unlimited.
    #[serde(default)]
    pub max: u8,
    /// Item offered once `max` is reached.
    #[serde(default)]
    pub replacement: Option<u8>,
    #[serde(default)]
    pub replacement_price: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: u8,
    pub room: u16,
    pub door: u8,
    #[serde(default)]
    pub kind: ShopKind,
    #[serde(default)]
    pub shopkeeper: u8,
    pub inventory: Vec<ShopItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopTable {
    pub headers: Vec<u8>,
    pub items: Vec<u8>,
}

pub fn encode_shops(shops: &[Shop]) -> Result<ShopTable> {
    ensure_capacity("shop headers", MAX_SHOPS, shops.len())?;
    let total: usize = shops.iter().map(|s| s.inventory.len()).sum();
    ensure_capacity("shop inventory SRAM", SRAM_SLOTS, total)?;

    let mut headers = Vec::with_capacity((shops.len() + 1) * ROW_LEN);
    let mut items = Vec::with_capacity((total + 1) * ROW_LEN);
    let mut sram_offset = 0usize;

    for shop in shops {
        ensure_capacity("shop inventory", MAX_SHOP_INVENTORY, shop.inventory.len())?;

        let [room_lo, room_hi] = shop.room.to_le_bytes();
        headers.extend_from_slice(&[
            shop.id,
            room_lo,
            room_hi,
            shop.door,
            0x00,
            shop.kind.flag() | shop.inventory.len() as u8,
            shop.shopkeeper,
            sram_offset as u8,
        ]);

        for entry in &shop.inventory {
            let [price_lo, price_hi] = entry.price.to_le_bytes();
            let [repl_lo, repl_hi] = entry.replacement_price.to_le_bytes();
            items.extend_from_slice(&[
                shop.id,
                entry.item,
                price_lo,
                price_hi,
                entry.max,
                entry.replacement.unwrap_or(NO_REPLACEMENT),
                repl_lo,
                repl_hi,
            ]);
        }

        sram_offset += shop.inventory.len();
    }

    headers.extend_from_slice(&TERMINATOR);
    items.extend_from_slice(&TERMINATOR);
    Ok(ShopTable { headers, items })
}

pub fn write_shops(rom: &mut Rom, shops: &[Shop]) -> Result<()> {
    let table = encode_shops(shops)?;
    rom.write(SHOP_HEADER_OFFSET, &table.headers)?;
    rom.write(SHOP_ITEMS_OFFSET, &table.items)?;
    log::debug!("wrote {} shops", shops.len());
    Ok(())
}
