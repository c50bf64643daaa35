#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Effect {
    Set { addr: u16, value: u8 },
    Or { addr: u16, mask: u8 },
    /// Add and clamp to `max`. `max == 0xFF` means the counter is only bounded by the byte.
    Add { addr: u16, delta: u8, max: u8 },
    Bottle { contents: u8 },
    Rupees(u16),
    PieceOfHeart,
}

pub(crate) const SWORD: u16 = 0x359;
pub(crate) const SHIELD: u16 = 0x35A;
pub(crate) const ARMOR: u16 = 0x35B;
pub(crate) const GLOVES: u16 = 0x354;
pub(crate) const BOMBS: u16 = 0x343;
pub(crate) const ARROWS: u16 = 0x377;
pub(crate) const BOMB_CAPACITY: u16 = 0x370;
pub(crate) const ARROW_CAPACITY: u16 = 0x371;
pub(crate) const BOTTLE_COUNT: u16 = 0x34F;
pub(crate) const BOTTLE_SLOTS: u16 = 0x35C;
pub(crate) const RUPEE_GOAL: u16 = 0x360;
pub(crate) const RUPEES: u16 = 0x362;
pub(crate) const HEART_PIECES: u16 = 0x36B;
pub(crate) const MAX_HEALTH: u16 = 0x36C;
pub(crate) const HEALTH: u16 = 0x36D;
pub(crate) const PENDANTS: u16 = 0x374;
pub(crate) const ABILITIES: u16 = 0x379;
pub(crate) const CRYSTALS: u16 = 0x37A;
pub(crate) const MAGIC_CONSUMPTION: u16 = 0x37B;
pub(crate) const INVENTORY_FLAGS: u16 = 0x38C;
pub(crate) const BOW_FLAGS: u16 = 0x38E;

const COMPASSES: u16 = 0x364;
const BIG_KEYS: u16 = 0x366;
const MAPS: u16 = 0x368;
const SMALL_KEYS: u16 = 0x37C;

pub(crate) const CONSUMABLE_MAX: u8 = 99;
pub(crate) const HEALTH_MAX: u8 = 0xA0;
const HEART: u8 = 8;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Dungeon {
    HyruleCastle,
    EasternPalace,
    DesertPalace,
    AgahnimsTower,
    SwampPalace,
    PalaceOfDarkness,
    MiseryMire,
    SkullWoods,
    IcePalace,
    TowerOfHera,
    ThievesTown,
    TurtleRock,
    GanonsTower,
}

impl Dungeon {
    pub const ALL: [Dungeon; 13] = [
        Dungeon::HyruleCastle,
        Dungeon::EasternPalace,
        Dungeon::DesertPalace,
        Dungeon::AgahnimsTower,
        Dungeon::SwampPalace,
        Dungeon::PalaceOfDarkness,
        Dungeon::MiseryMire,
        Dungeon::SkullWoods,
        Dungeon::IcePalace,
        Dungeon::TowerOfHera,
        Dungeon::ThievesTown,
        Dungeon::TurtleRock,
        Dungeon::GanonsTower,
    ];

    /// Short code used in item names, e.g. `MapP1`, `KeyD4`.
    pub fn code(self) -> &'static str {
        match self {
            Dungeon::HyruleCastle => "H2",
            Dungeon::EasternPalace => "P1",
            Dungeon::DesertPalace => "P2",
            Dungeon::AgahnimsTower => "A1",
            Dungeon::SwampPalace => "D2",
            Dungeon::PalaceOfDarkness => "D1",
            Dungeon::MiseryMire => "D6",
            Dungeon::SkullWoods => "D3",
            Dungeon::IcePalace => "D5",
            Dungeon::TowerOfHera => "P3",
            Dungeon::ThievesTown => "D4",
            Dungeon::TurtleRock => "D7",
            Dungeon::GanonsTower => "A2",
        }
    }

    fn from_code(code: &str) -> Option<Dungeon> {
        Dungeon::ALL.iter().copied().find(|d| d.code() == code)
    }

    fn items(self) -> &'static DungeonItems {
        &DUNGEON_ITEMS[self as usize]
    }
}

// Map, compass and big key share one bit position across three flag words.
struct DungeonItems {
    map: [Effect; 1],
    compass: [Effect; 1],
    big_key: [Effect; 1],
    key: [Effect; 1],
}

const fn dungeon_items(byte: u16, mask: u8, key_index: u16) -> DungeonItems {
    DungeonItems {
        map: [Effect::Or { addr: MAPS + byte, mask }],
        compass: [Effect::Or { addr: COMPASSES + byte, mask }],
        big_key: [Effect::Or { addr: BIG_KEYS + byte, mask }],
        key: [Effect::Add {
            addr: SMALL_KEYS + key_index,
            delta: 1,
            max: 0xFF,
        }],
    }
}

// Indexed by `Dungeon as usize`.
static DUNGEON_ITEMS: [DungeonItems; 13] = [
    dungeon_items(1, 0xC0, 0),
    dungeon_items(1, 0x20, 2),
    dungeon_items(1, 0x10, 3),
    dungeon_items(1, 0x08, 4),
    dungeon_items(1, 0x04, 5),
    dungeon_items(1, 0x02, 6),
    dungeon_items(1, 0x01, 7),
    dungeon_items(0, 0x80, 8),
    dungeon_items(0, 0x40, 9),
    dungeon_items(0, 0x20, 10),
    dungeon_items(0, 0x10, 11),
    dungeon_items(0, 0x08, 12),
    dungeon_items(0, 0x04, 13),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ItemKind {
    L1Sword,
    L1SwordAndShield,
    L2Sword,
    MasterSword,
    L3Sword,
    L4Sword,
    ProgressiveSword,
    BlueShield,
    RedShield,
    MirrorShield,
    ProgressiveShield,
    BlueMail,
    RedMail,
    ProgressiveArmor,
    Bow,
    BowAndArrows,
    SilverArrowUpgrade,
    BowAndSilverArrows,
    Boomerang,
    RedBoomerang,
    Hookshot,
    Mushroom,
    Powder,
    FireRod,
    IceRod,
    Bombos,
    Ether,
    Quake,
    Lamp,
    Hammer,
    Shovel,
    OcarinaInactive,
    OcarinaActive,
    BugCatchingNet,
    BookOfMudora,
    CaneOfSomaria,
    CaneOfByrna,
    Cape,
    MagicMirror,
    PowerGlove,
    TitansMitt,
    ProgressiveGlove,
    PegasusBoots,
    Flippers,
    MoonPearl,
    Bottle,
    BottleWithRedPotion,
    BottleWithGreenPotion,
    BottleWithBluePotion,
    BottleWithFairy,
    BottleWithBee,
    BottleWithGoldBee,
    Bomb,
    ThreeBombs,
    TenBombs,
    Arrow,
    TenArrows,
    BombUpgrade5,
    BombUpgrade10,
    ArrowUpgrade5,
    ArrowUpgrade10,
    HalfMagic,
    QuarterMagic,
    OneRupee,
    FiveRupees,
    TwentyRupees,
    FiftyRupees,
    OneHundredRupees,
    ThreeHundredRupees,
    HeartContainer,
    BossHeartContainer,
    PieceOfHeart,
    PendantOfCourage,
    PendantOfPower,
    PendantOfWisdom,
    Crystal1,
    Crystal2,
    Crystal3,
    Crystal4,
    Crystal5,
    Crystal6,
    Crystal7,
    Map(Dungeon),
    Compass(Dungeon),
    BigKey(Dungeon),
    Key(Dungeon),
}

use Effect::{Add, Or, Set};

impl ItemKind {
    pub const SIMPLE: &'static [ItemKind] = &[
        ItemKind::L1Sword,
        ItemKind::L1SwordAndShield,
        ItemKind::L2Sword,
        ItemKind::MasterSword,
        ItemKind::L3Sword,
        ItemKind::L4Sword,
        ItemKind::ProgressiveSword,
        ItemKind::BlueShield,
        ItemKind::RedShield,
        ItemKind::MirrorShield,
        ItemKind::ProgressiveShield,
        ItemKind::BlueMail,
        ItemKind::RedMail,
        ItemKind::ProgressiveArmor,
        ItemKind::Bow,
        ItemKind::BowAndArrows,
        ItemKind::SilverArrowUpgrade,
        ItemKind::BowAndSilverArrows,
        ItemKind::Boomerang,
        ItemKind::RedBoomerang,
        ItemKind::Hookshot,
        ItemKind::Mushroom,
        ItemKind::Powder,
        ItemKind::FireRod,
        ItemKind::IceRod,
        ItemKind::Bombos,
        ItemKind::Ether,
        ItemKind::Quake,
        ItemKind::Lamp,
        ItemKind::Hammer,
        ItemKind::Shovel,
        ItemKind::OcarinaInactive,
        ItemKind::OcarinaActive,
        ItemKind::BugCatchingNet,
        ItemKind::BookOfMudora,
        ItemKind::CaneOfSomaria,
        ItemKind::CaneOfByrna,
        ItemKind::Cape,
        ItemKind::MagicMirror,
        ItemKind::PowerGlove,
        ItemKind::TitansMitt,
        ItemKind::ProgressiveGlove,
        ItemKind::PegasusBoots,
        ItemKind::Flippers,
        ItemKind::MoonPearl,
        ItemKind::Bottle,
        ItemKind::BottleWithRedPotion,
        ItemKind::BottleWithGreenPotion,
        ItemKind::BottleWithBluePotion,
        ItemKind::BottleWithFairy,
        ItemKind::BottleWithBee,
        ItemKind::BottleWithGoldBee,
        ItemKind::Bomb,
        ItemKind::ThreeBombs,
        ItemKind::TenBombs,
        ItemKind::Arrow,
        ItemKind::TenArrows,
        ItemKind::BombUpgrade5,
        ItemKind::BombUpgrade10,
        ItemKind::ArrowUpgrade5,
        ItemKind::ArrowUpgrade10,
        ItemKind::HalfMagic,
        ItemKind::QuarterMagic,
        ItemKind::OneRupee,
        ItemKind::FiveRupees,
        ItemKind::TwentyRupees,
        ItemKind::FiftyRupees,
        ItemKind::OneHundredRupees,
        ItemKind::ThreeHundredRupees,
        ItemKind::HeartContainer,
        ItemKind::BossHeartContainer,
        ItemKind::PieceOfHeart,
        ItemKind::PendantOfCourage,
        ItemKind::PendantOfPower,
        ItemKind::PendantOfWisdom,
        ItemKind::Crystal1,
        ItemKind::Crystal2,
        ItemKind::Crystal3,
        ItemKind::Crystal4,
        ItemKind::Crystal5,
        ItemKind::Crystal6,
        ItemKind::Crystal7,
    ];

    pub fn from_name(name: &str) -> Option<ItemKind> {
        let dungeon_item = [
            ("BigKey", ItemKind::BigKey as fn(Dungeon) -> ItemKind),
            ("Compass", ItemKind::Compass),
            ("Map", ItemKind::Map),
            ("Key", ItemKind::Key),
        ];
        for (prefix, make) in dungeon_item {
            if let Some(dungeon) = name.strip_prefix(prefix).and_then(Dungeon::from_code) {
                return Some(make(dungeon));
            }
        }

        ItemKind::SIMPLE
            .iter()
            .copied()
            .find(|kind| kind.simple_name() == Some(name))
    }

    pub fn name(self) -> String {
        match self {
            ItemKind::Map(d) => format!("Map{}", d.code()),
            ItemKind::Compass(d) => format!("Compass{}", d.code()),
            ItemKind::BigKey(d) => format!("BigKey{}", d.code()),
            ItemKind::Key(d) => format!("Key{}", d.code()),
            other => other.simple_name().unwrap_or_default().to_string(),
        }
    }

    fn simple_name(self) -> Option<&'static str> {
        let name = match self {
            ItemKind::L1Sword => "L1Sword",
            ItemKind::L1SwordAndShield => "L1SwordAndShield",
            ItemKind::L2Sword => "L2Sword",
            ItemKind::MasterSword => "MasterSword",
            ItemKind::L3Sword => "L3Sword",
            ItemKind::L4Sword => "L4Sword",
            ItemKind::ProgressiveSword => "ProgressiveSword",
            ItemKind::BlueShield => "BlueShield",
            ItemKind::RedShield => "RedShield",
            ItemKind::MirrorShield => "MirrorShield",
            ItemKind::ProgressiveShield => "ProgressiveShield",
            ItemKind::BlueMail => "BlueMail",
            ItemKind::RedMail => "RedMail",
            ItemKind::ProgressiveArmor => "ProgressiveArmor",
            ItemKind::Bow => "Bow",
            ItemKind::BowAndArrows => "BowAndArrows",
            ItemKind::SilverArrowUpgrade => "SilverArrowUpgrade",
            ItemKind::BowAndSilverArrows => "BowAndSilverArrows",
            ItemKind::Boomerang => "Boomerang",
            ItemKind::RedBoomerang => "RedBoomerang",
            ItemKind::Hookshot => "Hookshot",
            ItemKind::Mushroom => "Mushroom",
            ItemKind::Powder => "Powder",
            ItemKind::FireRod => "FireRod",
            ItemKind::IceRod => "IceRod",
            ItemKind::Bombos => "Bombos",
            ItemKind::Ether => "Ether",
            ItemKind::Quake => "Quake",
            ItemKind::Lamp => "Lamp",
            ItemKind::Hammer => "Hammer",
            ItemKind::Shovel => "Shovel",
            ItemKind::OcarinaInactive => "OcarinaInactive",
            ItemKind::OcarinaActive => "OcarinaActive",
            ItemKind::BugCatchingNet => "BugCatchingNet",
            ItemKind::BookOfMudora => "BookOfMudora",
            ItemKind::CaneOfSomaria => "CaneOfSomaria",
            ItemKind::CaneOfByrna => "CaneOfByrna",
            ItemKind::Cape => "Cape",
            ItemKind::MagicMirror => "MagicMirror",
            ItemKind::PowerGlove => "PowerGlove",
            ItemKind::TitansMitt => "TitansMitt",
            ItemKind::ProgressiveGlove => "ProgressiveGlove",
            ItemKind::PegasusBoots => "PegasusBoots",
            ItemKind::Flippers => "Flippers",
            ItemKind::MoonPearl => "MoonPearl",
            ItemKind::Bottle => "Bottle",
            ItemKind::BottleWithRedPotion => "BottleWithRedPotion",
            ItemKind::BottleWithGreenPotion => "BottleWithGreenPotion",
            ItemKind::BottleWithBluePotion => "BottleWithBluePotion",
            ItemKind::BottleWithFairy => "BottleWithFairy",
            ItemKind::BottleWithBee => "BottleWithBee",
            ItemKind::BottleWithGoldBee => "BottleWithGoldBee",
            ItemKind::Bomb => "Bomb",
            ItemKind::ThreeBombs => "ThreeBombs",
            ItemKind::TenBombs => "TenBombs",
            ItemKind::Arrow => "Arrow",
            ItemKind::TenArrows => "TenArrows",
            ItemKind::BombUpgrade5 => "BombUpgrade5",
            ItemKind::BombUpgrade10 => "BombUpgrade10",
            ItemKind::ArrowUpgrade5 => "ArrowUpgrade5",
            ItemKind::ArrowUpgrade10 => "ArrowUpgrade10",
            ItemKind::HalfMagic => "HalfMagic",
            ItemKind::QuarterMagic => "QuarterMagic",
            ItemKind::OneRupee => "OneRupee",
            ItemKind::FiveRupees => "FiveRupees",
            ItemKind::TwentyRupees => "TwentyRupees",
            ItemKind::FiftyRupees => "FiftyRupees",
            ItemKind::OneHundredRupees => "OneHundredRupees",
            ItemKind::ThreeHundredRupees => "ThreeHundredRupees",
            ItemKind::HeartContainer => "HeartContainer",
            ItemKind::BossHeartContainer => "BossHeartContainer",
            ItemKind::PieceOfHeart => "PieceOfHeart",
            ItemKind::PendantOfCourage => "PendantOfCourage",
            ItemKind::PendantOfPower => "PendantOfPower",
            ItemKind::PendantOfWisdom => "PendantOfWisdom",
            ItemKind::Crystal1 => "Crystal1",
            ItemKind::Crystal2 => "Crystal2",
            ItemKind::Crystal3 => "Crystal3",
            ItemKind::Crystal4 => "Crystal4",
            ItemKind::Crystal5 => "Crystal5",
            ItemKind::Crystal6 => "Crystal6",
            ItemKind::Crystal7 => "Crystal7",
            ItemKind::Map(_) | ItemKind::Compass(_) | ItemKind::BigKey(_) | ItemKind::Key(_) => {
                return None
            }
        };
        Some(name)
    }

    /// Items whose presence means the caller is specifying health explicitly.
    pub(crate) fn counts_as_heart(self) -> bool {
        matches!(
            self,
            ItemKind::HeartContainer | ItemKind::BossHeartContainer | ItemKind::PieceOfHeart
        )
    }

    pub(crate) fn effects(self) -> &'static [Effect] {
        match self {
            ItemKind::L1Sword => &[Set { addr: SWORD, value: 1 }],
            ItemKind::L1SwordAndShield => {
                &[Set { addr: SWORD, value: 1 }, Set { addr: SHIELD, value: 1 }]
            }
            ItemKind::L2Sword | ItemKind::MasterSword => &[Set { addr: SWORD, value: 2 }],
            ItemKind::L3Sword => &[Set { addr: SWORD, value: 3 }],
            ItemKind::L4Sword => &[Set { addr: SWORD, value: 4 }],
            ItemKind::ProgressiveSword => &[Add { addr: SWORD, delta: 1, max: 4 }],
            ItemKind::BlueShield => &[Set { addr: SHIELD, value: 1 }],
            ItemKind::RedShield => &[Set { addr: SHIELD, value: 2 }],
            ItemKind::MirrorShield => &[Set { addr: SHIELD, value: 3 }],
            ItemKind::ProgressiveShield => &[Add { addr: SHIELD, delta: 1, max: 3 }],
            ItemKind::BlueMail => &[Set { addr: ARMOR, value: 1 }],
            ItemKind::RedMail => &[Set { addr: ARMOR, value: 2 }],
            ItemKind::ProgressiveArmor => &[Add { addr: ARMOR, delta: 1, max: 2 }],
            ItemKind::Bow => &[Set { addr: 0x340, value: 1 }, Or { addr: BOW_FLAGS, mask: 0x80 }],
            ItemKind::BowAndArrows => {
                &[Set { addr: 0x340, value: 2 }, Or { addr: BOW_FLAGS, mask: 0x80 }]
            }
            ItemKind::SilverArrowUpgrade => &[Or { addr: BOW_FLAGS, mask: 0x40 }],
            ItemKind::BowAndSilverArrows => {
                &[Set { addr: 0x340, value: 4 }, Or { addr: BOW_FLAGS, mask: 0xC0 }]
            }
            ItemKind::Boomerang => {
                &[Set { addr: 0x341, value: 1 }, Or { addr: INVENTORY_FLAGS, mask: 0x80 }]
            }
            ItemKind::RedBoomerang => {
                &[Set { addr: 0x341, value: 2 }, Or { addr: INVENTORY_FLAGS, mask: 0x40 }]
            }
            ItemKind::Hookshot => &[Set { addr: 0x342, value: 1 }],
            ItemKind::Mushroom => {
                &[Set { addr: 0x344, value: 1 }, Or { addr: INVENTORY_FLAGS, mask: 0x20 }]
            }
            ItemKind::Powder => {
                &[Set { addr: 0x344, value: 2 }, Or { addr: INVENTORY_FLAGS, mask: 0x10 }]
            }
            ItemKind::FireRod => &[Set { addr: 0x345, value: 1 }],
            ItemKind::IceRod => &[Set { addr: 0x346, value: 1 }],
            ItemKind::Bombos => &[Set { addr: 0x347, value: 1 }],
            ItemKind::Ether => &[Set { addr: 0x348, value: 1 }],
            ItemKind::Quake => &[Set { addr: 0x349, value: 1 }],
            ItemKind::Lamp => &[Set { addr: 0x34A, value: 1 }],
            ItemKind::Hammer => &[Set { addr: 0x34B, value: 1 }],
            ItemKind::Shovel => {
                &[Set { addr: 0x34C, value: 1 }, Or { addr: INVENTORY_FLAGS, mask: 0x04 }]
            }
            ItemKind::OcarinaInactive => {
                &[Set { addr: 0x34C, value: 2 }, Or { addr: INVENTORY_FLAGS, mask: 0x02 }]
            }
            ItemKind::OcarinaActive => {
                &[Set { addr: 0x34C, value: 3 }, Or { addr: INVENTORY_FLAGS, mask: 0x01 }]
            }
            ItemKind::BugCatchingNet => &[Set { addr: 0x34D, value: 1 }],
            ItemKind::BookOfMudora => &[Set { addr: 0x34E, value: 1 }],
            ItemKind::CaneOfSomaria => &[Set { addr: 0x350, value: 1 }],
            ItemKind::CaneOfByrna => &[Set { addr: 0x351, value: 1 }],
            ItemKind::Cape => &[Set { addr: 0x352, value: 1 }],
            ItemKind::MagicMirror => &[Set { addr: 0x353, value: 2 }],
            ItemKind::PowerGlove => &[Set { addr: GLOVES, value: 1 }],
            ItemKind::TitansMitt => &[Set { addr: GLOVES, value: 2 }],
            ItemKind::ProgressiveGlove => &[Add { addr: GLOVES, delta: 1, max: 2 }],
            ItemKind::PegasusBoots => {
                &[Set { addr: 0x355, value: 1 }, Or { addr: ABILITIES, mask: 0x04 }]
            }
            ItemKind::Flippers => {
                &[Set { addr: 0x356, value: 1 }, Or { addr: ABILITIES, mask: 0x02 }]
            }
            ItemKind::MoonPearl => &[Set { addr: 0x357, value: 1 }],
            ItemKind::Bottle => &[Effect::Bottle { contents: 0x02 }],
            ItemKind::BottleWithRedPotion => &[Effect::Bottle { contents: 0x03 }],
            ItemKind::BottleWithGreenPotion => &[Effect::Bottle { contents: 0x04 }],
            ItemKind::BottleWithBluePotion => &[Effect::Bottle { contents: 0x05 }],
            ItemKind::BottleWithFairy => &[Effect::Bottle { contents: 0x06 }],
            ItemKind::BottleWithBee => &[Effect::Bottle { contents: 0x07 }],
            ItemKind::BottleWithGoldBee => &[Effect::Bottle { contents: 0x08 }],
            ItemKind::Bomb => &[Add { addr: BOMBS, delta: 1, max: CONSUMABLE_MAX }],
            ItemKind::ThreeBombs => &[Add { addr: BOMBS, delta: 3, max: CONSUMABLE_MAX }],
            ItemKind::TenBombs => &[Add { addr: BOMBS, delta: 10, max: CONSUMABLE_MAX }],
            ItemKind::Arrow => &[Add { addr: ARROWS, delta: 1, max: CONSUMABLE_MAX }],
            ItemKind::TenArrows => &[Add { addr: ARROWS, delta: 10, max: CONSUMABLE_MAX }],
            ItemKind::BombUpgrade5 => &[Add { addr: BOMB_CAPACITY, delta: 5, max: 0xFF }],
            ItemKind::BombUpgrade10 => &[Add { addr: BOMB_CAPACITY, delta: 10, max: 0xFF }],
            ItemKind::ArrowUpgrade5 => &[Add { addr: ARROW_CAPACITY, delta: 5, max: 0xFF }],
            ItemKind::ArrowUpgrade10 => &[Add { addr: ARROW_CAPACITY, delta: 10, max: 0xFF }],
            // 1 = half, 2 = quarter consumption; two halves make a quarter.
            ItemKind::HalfMagic => &[Add { addr: MAGIC_CONSUMPTION, delta: 1, max: 2 }],
            ItemKind::QuarterMagic => &[Add { addr: MAGIC_CONSUMPTION, delta: 2, max: 2 }],
            ItemKind::OneRupee => &[Effect::Rupees(1)],
            ItemKind::FiveRupees => &[Effect::Rupees(5)],
            ItemKind::TwentyRupees => &[Effect::Rupees(20)],
            ItemKind::FiftyRupees => &[Effect::Rupees(50)],
            ItemKind::OneHundredRupees => &[Effect::Rupees(100)],
            ItemKind::ThreeHundredRupees => &[Effect::Rupees(300)],
            ItemKind::HeartContainer | ItemKind::BossHeartContainer => &[
                Add { addr: MAX_HEALTH, delta: HEART, max: HEALTH_MAX },
                Add { addr: HEALTH, delta: HEART, max: HEALTH_MAX },
            ],
            ItemKind::PieceOfHeart => &[Effect::PieceOfHeart],
            ItemKind::PendantOfCourage => &[Or { addr: PENDANTS, mask: 0x04 }],
            ItemKind::PendantOfPower => &[Or { addr: PENDANTS, mask: 0x02 }],
            ItemKind::PendantOfWisdom => &[Or { addr: PENDANTS, mask: 0x01 }],
            ItemKind::Crystal1 => &[Or { addr: CRYSTALS, mask: 0x02 }],
            ItemKind::Crystal2 => &[Or { addr: CRYSTALS, mask: 0x10 }],
            ItemKind::Crystal3 => &[Or { addr: CRYSTALS, mask: 0x40 }],
            ItemKind::Crystal4 => &[Or { addr: CRYSTALS, mask: 0x20 }],
            ItemKind::Crystal5 => &[Or { addr: CRYSTALS, mask: 0x04 }],
            ItemKind::Crystal6 => &[Or { addr: CRYSTALS, mask: 0x01 }],
            ItemKind::Crystal7 => &[Or { addr: CRYSTALS, mask: 0x08 }],
            ItemKind::Map(d) => &d.items().map,
            ItemKind::Compass(d) => &d.items().compass,
            ItemKind::BigKey(d) => &d.items().big_key,
            ItemKind::Key(d) => &d.items().key,
        }
    }
}
