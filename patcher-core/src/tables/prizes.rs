use serde::{Deserialize, Serialize};

use super::ensure_capacity;
use crate::rom::Rom;
use crate::Result;

/// Sprite code for "nothing drops".
pub const EMPTY_PRIZE: u8 = 0x03;

/// One byte per overworld tree or rock that drops something when bonked.
pub const BONK_PRIZE_OFFSETS: [usize; 61] = [
    0x4CF6C, 0x4CFBA, 0x4CFE0, 0x4CFFB, 0x4D018, 0x4D01B, 0x4D028, 0x4D03C,
    0x4D059, 0x4D07A, 0x4D09E, 0x4D0A8, 0x4D0AB, 0x4D0AE, 0x4D0BE, 0x4D0DD,
    0x4D16A, 0x4D1E5, 0x4D1EE, 0x4D20B, 0x4CBBF, 0x4CC17, 0x4CC1A, 0x4CC4A,
    0x4CC4D, 0x4CC53, 0x4CC69, 0x4CC6F, 0x4CC7C, 0x4CCEF, 0x4CD51, 0x4CDC0,
    0x4CDC3, 0x4CDC6, 0x4CE37, 0x4D2DE, 0x4D32F, 0x4D355, 0x4D367, 0x4D384,
    0x4D387, 0x4D397, 0x4D39E, 0x4D3AB, 0x4D3AE, 0x4D3D1, 0x4D3D7, 0x4D3F8,
    0x4D416, 0x4D420, 0x4D423, 0x4D42D, 0x4D449, 0x4D48C, 0x4D4D9, 0x4D4DC,
    0x4D4E3, 0x4D504, 0x4D507, 0x4D55E, 0x4D56A,
];

pub const DROP_PACK_OFFSET: usize = 0x37A78;
pub const TREE_PULL_OFFSET: usize = 0xEFBD4;
pub const CRAB_MAIN_OFFSET: usize = 0x329C8;
pub const CRAB_FINAL_OFFSET: usize = 0x329C4;
pub const STUN_PRIZE_OFFSET: usize = 0x37993;
pub const FISH_PRIZE_OFFSET: usize = 0xE82CC;

pub const DROP_PACKS: usize = 7;
pub const DROP_PACK_LEN: usize = 8;

/// Enemy drop tables and the one-off prize slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeTables {
    pub drop_packs: [[u8; DROP_PACK_LEN]; DROP_PACKS],
    pub tree_pulls: [u8; 3],
    pub crab_main: u8,
    pub crab_final: u8,
    pub stun: u8,
    pub fish: u8,
}

impl Default for PrizeTables {
    fn default() -> Self {
        PrizeTables {
            drop_packs: [
                [0xD8, 0xD8, 0xD8, 0xD8, 0xD9, 0xD8, 0xD8, 0xD9],
                [0xDA, 0xD9, 0xDA, 0xDB, 0xDA, 0xD9, 0xDA, 0xDA],
                [0xE0, 0xDF, 0xDF, 0xDA, 0xE0, 0xDF, 0xD8, 0xDF],
                [0xDC, 0xDC, 0xDC, 0xDD, 0xDC, 0xDC, 0xDE, 0xDC],
                [0xE1, 0xD8, 0xE1, 0xE2, 0xE1, 0xD8, 0xE1, 0xE2],
                [0xDF, 0xD9, 0xD8, 0xE1, 0xDF, 0xDC, 0xD9, 0xD8],
                [0xD8, 0xE3, 0xE0, 0xDB, 0xDE, 0xD8, 0xDB, 0xE2],
            ],
            tree_pulls: [0xD9, 0xDA, 0xDB],
            crab_main: 0xD9,
            crab_final: 0xDB,
            stun: 0xD9,
            fish: 0xE1,
        }
    }
}

/// Writes one bonk prize per location. Missing entries become `EMPTY_PRIZE`.
pub fn write_bonk_prizes(rom: &mut Rom, prizes: &[u8]) -> Result<()> {
    ensure_capacity("bonk prizes", BONK_PRIZE_OFFSETS.len(), prizes.len())?;
    for (i, &offset) in BONK_PRIZE_OFFSETS.iter().enumerate() {
        let prize = prizes.get(i).copied().unwrap_or(EMPTY_PRIZE);
        rom.write_u8(offset, prize)?;
    }
    Ok(())
}

pub fn write_prize_tables(rom: &mut Rom, tables: &PrizeTables) -> Result<()> {
    let packs: Vec<u8> = tables.drop_packs.iter().flatten().copied().collect();
    rom.write(DROP_PACK_OFFSET, &packs)?;
    rom.write(TREE_PULL_OFFSET, &tables.tree_pulls)?;
    rom.write_u8(CRAB_MAIN_OFFSET, tables.crab_main)?;
    rom.write_u8(CRAB_FINAL_OFFSET, tables.crab_final)?;
    rom.write_u8(STUN_PRIZE_OFFSET, tables.stun)?;
    rom.write_u8(FISH_PRIZE_OFFSET, tables.fish)?;
    Ok(())
}
