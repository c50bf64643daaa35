use serde::{Deserialize, Serialize};

use crate::items::{self, Effect, ItemKind};
use crate::rom::Rom;
use crate::{Result, Warning};

/// First save-RAM address covered by the equipment block.
pub const EQUIPMENT_BASE: u16 = 0x340;
pub const EQUIPMENT_LEN: usize = 0x4F;

/// Starting save-slot data.
pub const SAVE_SLOT_OFFSET: usize = 0x18_3000;
/// File-select preview; receives the first `FILE_SELECT_LEN` bytes of the block.
pub const FILE_SELECT_OFFSET: usize = 0x2_71A6;
pub const FILE_SELECT_LEN: usize = 60;
/// Sword the player has equipped when the file starts.
pub const EQUIPPED_SWORD_OFFSET: usize = 0x18_0043;

const DEFAULT_ABILITIES: u8 = 0x68;
const DEFAULT_HEALTH: u8 = 0x18;
const BOTTLE_SLOTS: u8 = 4;
/// Every counter saturates within this many grants, so larger quantities change nothing.
const MAX_GRANTS: u32 = 256;

/// A symbolic item, optionally granted more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemToken {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl ItemToken {
    pub fn new(name: impl Into<String>) -> Self {
        ItemToken {
            name: name.into(),
            quantity: None,
        }
    }

    pub fn with_quantity(name: impl Into<String>, quantity: u32) -> Self {
        ItemToken {
            name: name.into(),
            quantity: Some(quantity),
        }
    }

    fn times(&self) -> u32 {
        self.quantity.unwrap_or(1).min(MAX_GRANTS)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponMode {
    #[default]
    Randomized,
    Assured,
    Vanilla,
    Swordless,
}

/// Packed starting inventory, laid out exactly as save RAM `0x340..0x38F`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipmentState {
    bytes: [u8; EQUIPMENT_LEN],
}

impl EquipmentState {
    fn get(&self, addr: u16) -> u8 {
        self.bytes[(addr - EQUIPMENT_BASE) as usize]
    }

    fn set(&mut self, addr: u16, value: u8) {
        self.bytes[(addr - EQUIPMENT_BASE) as usize] = value;
    }

    fn add_clamped(&mut self, addr: u16, delta: u8, max: u8) {
        let current = self.get(addr);
        let next = if current >= max {
            current
        } else {
            current.saturating_add(delta).min(max)
        };
        self.set(addr, next);
    }

    pub fn as_bytes(&self) -> &[u8; EQUIPMENT_LEN] {
        &self.bytes
    }

    pub fn sword(&self) -> u8 {
        self.get(items::SWORD)
    }

    pub fn shield(&self) -> u8 {
        self.get(items::SHIELD)
    }

    /// `(max, current)` health in eighths of a heart.
    pub fn health(&self) -> (u8, u8) {
        (self.get(items::MAX_HEALTH), self.get(items::HEALTH))
    }

    pub fn heart_pieces(&self) -> u8 {
        self.get(items::HEART_PIECES)
    }

    pub fn bombs(&self) -> u8 {
        self.get(items::BOMBS)
    }

    pub fn arrows(&self) -> u8 {
        self.get(items::ARROWS)
    }

    pub fn rupees(&self) -> u16 {
        u16::from_le_bytes([self.get(items::RUPEES), self.get(items::RUPEES + 1)])
    }

    pub fn bottle_count(&self) -> u8 {
        self.get(items::BOTTLE_COUNT)
    }

    pub fn bottles(&self) -> [u8; 4] {
        let start = (items::BOTTLE_SLOTS - EQUIPMENT_BASE) as usize;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.bytes[start..start + 4]);
        out
    }

    pub fn abilities(&self) -> u8 {
        self.get(items::ABILITIES)
    }

    pub fn pendants(&self) -> u8 {
        self.get(items::PENDANTS)
    }

    pub fn crystals(&self) -> u8 {
        self.get(items::CRYSTALS)
    }

    pub fn magic_consumption(&self) -> u8 {
        self.get(items::MAGIC_CONSUMPTION)
    }

    /// Raw save-RAM byte, for fields without a named accessor.
    pub fn byte(&self, addr: u16) -> Option<u8> {
        let idx = addr.checked_sub(EQUIPMENT_BASE)? as usize;
        self.bytes.get(idx).copied()
    }
}

/// Encodes `items` in order, discarding warnings.
pub fn encode(items: &[ItemToken]) -> EquipmentState {
    encode_collecting(items, &mut Vec::new())
}

/// Encodes `items` in order. Unrecognized names are skipped and reported in `warnings`.
pub fn encode_collecting(items: &[ItemToken], warnings: &mut Vec<Warning>) -> EquipmentState {
    let mut state = EquipmentState {
        bytes: [0u8; EQUIPMENT_LEN],
    };
    state.set(items::ABILITIES, DEFAULT_ABILITIES);

    let mut kinds = Vec::with_capacity(items.len());
    for token in items {
        match ItemKind::from_name(&token.name) {
            Some(kind) => kinds.push((kind, token.times())),
            None => {
                log::warn!("ignoring unknown starting item '{}'", token.name);
                warnings.push(Warning::UnknownToken(token.name.clone()));
            }
        }
    }

    let explicit_hearts = kinds
        .iter()
        .any(|(kind, times)| *times > 0 && kind.counts_as_heart());
    if !explicit_hearts {
        state.set(items::MAX_HEALTH, DEFAULT_HEALTH);
        state.set(items::HEALTH, DEFAULT_HEALTH);
    }

    let mut rupees: u32 = 0;
    for (kind, times) in kinds {
        for _ in 0..times {
            for effect in kind.effects() {
                apply_effect(&mut state, *effect, &mut rupees);
            }
        }
    }

    let rupees = rupees.min(u16::MAX as u32) as u16;
    let [lo, hi] = rupees.to_le_bytes();
    for base in [items::RUPEE_GOAL, items::RUPEES] {
        state.set(base, lo);
        state.set(base + 1, hi);
    }

    state
}

fn apply_effect(state: &mut EquipmentState, effect: Effect, rupees: &mut u32) {
    match effect {
        Effect::Set { addr, value } => state.set(addr, value),
        Effect::Or { addr, mask } => state.set(addr, state.get(addr) | mask),
        Effect::Add { addr, delta, max } => state.add_clamped(addr, delta, max),
        Effect::Bottle { contents } => {
            let count = state.get(items::BOTTLE_COUNT);
            if count < BOTTLE_SLOTS {
                state.set(items::BOTTLE_SLOTS + count as u16, contents);
                state.set(items::BOTTLE_COUNT, count + 1);
            }
        }
        Effect::Rupees(amount) => *rupees = rupees.saturating_add(amount as u32),
        Effect::PieceOfHeart => {
            let pieces = state.get(items::HEART_PIECES) + 1;
            if pieces >= 4 {
                state.set(items::HEART_PIECES, pieces - 4);
                state.add_clamped(items::MAX_HEALTH, 8, items::HEALTH_MAX);
                state.add_clamped(items::HEALTH, 8, items::HEALTH_MAX);
            } else {
                state.set(items::HEART_PIECES, pieces);
            }
        }
    }
}

/// Writes `state` to the save slot and file-select preview, and the equipped sword unless
/// the seed is swordless.
pub fn write_starting_equipment(
    rom: &mut Rom,
    state: &EquipmentState,
    weapon_mode: WeaponMode,
) -> Result<()> {
    rom.ensure_standard_size()?;

    rom.write(SAVE_SLOT_OFFSET, state.as_bytes())?;
    rom.write(FILE_SELECT_OFFSET, &state.as_bytes()[..FILE_SELECT_LEN])?;

    let sword = state.sword();
    if sword != 0 && weapon_mode != WeaponMode::Swordless {
        rom.write_u8(EQUIPPED_SWORD_OFFSET, sword)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::SIZE;
    use crate::PatcherError;

    fn tokens(names: &[&str]) -> Vec<ItemToken> {
        names.iter().map(|n| ItemToken::new(*n)).collect()
    }

    #[test]
    fn empty_collection_has_defaults() {
        let state = encode(&[]);
        assert_eq!(state.health(), (0x18, 0x18));
        assert_eq!(state.abilities(), 0x68);
        assert_eq!(state.rupees(), 0);
        assert_eq!(state.sword(), 0);
        let nonzero: Vec<usize> = state
            .as_bytes()
            .iter()
            .enumerate()
            .filter(|(_, b)| **b != 0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(nonzero, vec![0x2C, 0x2D, 0x39]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let items = tokens(&["Bow", "Bottle", "PieceOfHeart", "FiftyRupees", "MapP1"]);
        assert_eq!(encode(&items), encode(&items));
    }

    #[test]
    fn later_scalar_overrides_earlier() {
        let state = encode(&tokens(&["L4Sword", "L1Sword"]));
        assert_eq!(state.sword(), 1);
        let state = encode(&tokens(&["MirrorShield", "BlueShield"]));
        assert_eq!(state.shield(), 1);
    }

    #[test]
    fn sword_and_shield_sets_both() {
        let state = encode(&tokens(&["L1SwordAndShield"]));
        assert_eq!((state.sword(), state.shield()), (1, 1));
    }

    #[test]
    fn consumables_saturate_at_99() {
        let state = encode(&[
            ItemToken::with_quantity("TenBombs", 9),
            ItemToken::with_quantity("ThreeBombs", 5),
            ItemToken::with_quantity("TenArrows", 12),
        ]);
        assert_eq!(state.bombs(), 99);
        assert_eq!(state.arrows(), 99);
    }

    #[test]
    fn fifth_bottle_is_dropped() {
        let state = encode(&tokens(&[
            "Bottle",
            "BottleWithBee",
            "BottleWithFairy",
            "BottleWithRedPotion",
            "BottleWithGoldBee",
        ]));
        assert_eq!(state.bottle_count(), 4);
        assert_eq!(state.bottles(), [0x02, 0x07, 0x06, 0x03]);
    }

    #[test]
    fn heart_tokens_replace_default_health() {
        let state = encode(&[ItemToken::with_quantity("HeartContainer", 3)]);
        assert_eq!(state.health(), (0x18, 0x18));

        let state = encode(&[ItemToken::with_quantity("BossHeartContainer", 25)]);
        assert_eq!(state.health(), (0xA0, 0xA0));
    }

    #[test]
    fn heart_pieces_convert_every_fourth() {
        let state = encode(&[
            ItemToken::with_quantity("HeartContainer", 3),
            ItemToken::with_quantity("PieceOfHeart", 6),
        ]);
        assert_eq!(state.health(), (0x20, 0x20));
        assert_eq!(state.heart_pieces(), 2);
    }

    #[test]
    fn zero_quantity_heart_keeps_default() {
        let state = encode(&[ItemToken::with_quantity("HeartContainer", 0)]);
        assert_eq!(state.health(), (0x18, 0x18));
    }

    #[test]
    fn huge_quantities_are_clamped() {
        let state = encode(&[
            ItemToken::with_quantity("Bomb", u32::MAX),
            ItemToken::with_quantity("PieceOfHeart", u32::MAX),
            ItemToken::with_quantity("ThreeHundredRupees", u32::MAX),
            ItemToken::with_quantity("Bottle", u32::MAX),
        ]);
        assert_eq!(state.bombs(), 99);
        assert_eq!(state.health(), (0xA0, 0xA0));
        assert_eq!(state.rupees(), u16::MAX);
        assert_eq!(state.bottle_count(), 4);
    }

    #[test]
    fn rupees_accumulate_into_both_pairs() {
        let state = encode(&tokens(&[
            "ThreeHundredRupees",
            "OneHundredRupees",
            "FiftyRupees",
            "TwentyRupees",
            "FiveRupees",
            "OneRupee",
        ]));
        assert_eq!(state.rupees(), 476);
        assert_eq!(state.byte(0x360), Some(0xDC));
        assert_eq!(state.byte(0x361), Some(0x01));
        assert_eq!(state.byte(0x362), Some(0xDC));
        assert_eq!(state.byte(0x363), Some(0x01));
    }

    #[test]
    fn flags_are_or_combined() {
        let state = encode(&tokens(&[
            "PendantOfCourage",
            "PendantOfWisdom",
            "Crystal6",
            "Crystal7",
            "PegasusBoots",
            "Flippers",
        ]));
        assert_eq!(state.pendants(), 0x05);
        assert_eq!(state.crystals(), 0x09);
        assert_eq!(state.abilities(), 0x68 | 0x04 | 0x02);
    }

    #[test]
    fn dungeon_items_set_flags_and_counters() {
        let state = encode(&[
            ItemToken::new("MapP1"),
            ItemToken::new("CompassD3"),
            ItemToken::new("BigKeyA2"),
            ItemToken::with_quantity("KeyD4", 3),
        ]);
        assert_eq!(state.byte(0x369), Some(0x20));
        assert_eq!(state.byte(0x364), Some(0x80));
        assert_eq!(state.byte(0x366), Some(0x04));
        assert_eq!(state.byte(0x387), Some(3));
    }

    #[test]
    fn magic_presets_saturate_at_quarter() {
        assert_eq!(encode(&tokens(&["HalfMagic"])).magic_consumption(), 1);
        assert_eq!(encode(&tokens(&["HalfMagic", "HalfMagic"])).magic_consumption(), 2);
        assert_eq!(encode(&tokens(&["QuarterMagic", "HalfMagic"])).magic_consumption(), 2);
    }

    #[test]
    fn progressive_items_stop_at_top_tier() {
        let state = encode(&[ItemToken::with_quantity("ProgressiveSword", 6)]);
        assert_eq!(state.sword(), 4);
    }

    #[test]
    fn unknown_tokens_are_reported_not_fatal() {
        let mut warnings = Vec::new();
        let state = encode_collecting(&tokens(&["Hookshot", "Triforce?", "Lamp"]), &mut warnings);
        assert_eq!(warnings, vec![Warning::UnknownToken("Triforce?".to_string())]);
        assert_eq!(state.byte(0x342), Some(1));
        assert_eq!(state.byte(0x34A), Some(1));
    }

    #[test]
    fn writes_both_regions_and_sword() {
        let mut rom = Rom::blank();
        let state = encode(&tokens(&["MasterSword", "Bow"]));
        write_starting_equipment(&mut rom, &state, WeaponMode::Randomized).unwrap();

        assert_eq!(rom.read(SAVE_SLOT_OFFSET, EQUIPMENT_LEN).unwrap(), state.as_bytes());
        assert_eq!(
            rom.read(FILE_SELECT_OFFSET, FILE_SELECT_LEN).unwrap(),
            &state.as_bytes()[..FILE_SELECT_LEN]
        );
        assert_eq!(rom.read_u8(EQUIPPED_SWORD_OFFSET).unwrap(), 2);
        assert_eq!(rom.write_log().len(), 3);
    }

    #[test]
    fn swordless_mode_skips_equipped_sword() {
        let mut rom = Rom::blank();
        let state = encode(&tokens(&["L1Sword"]));
        write_starting_equipment(&mut rom, &state, WeaponMode::Swordless).unwrap();
        assert_eq!(rom.read_u8(EQUIPPED_SWORD_OFFSET).unwrap(), 0);
        assert_eq!(rom.write_log().len(), 2);
    }

    #[test]
    fn wrong_size_image_is_rejected() {
        let mut rom = Rom::blank();
        rom.resize(SIZE - 1);
        let err = write_starting_equipment(&mut rom, &encode(&[]), WeaponMode::Randomized)
            .unwrap_err();
        assert!(matches!(err, PatcherError::SizeMismatch { .. }));
    }
}
