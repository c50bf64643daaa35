use serde::{Deserialize, Serialize};

use crate::equipment::WeaponMode;
use crate::rom::Rom;
use crate::{Result, Warning};

const HEART_BEEP_OFFSET: usize = 0x18_0033;
const HEART_COLOR_HUD_START: usize = 0x6_FA1E;
const HEART_COLOR_HUD_END: usize = 0x6_FA30;
const HEART_COLOR_FILE_SELECT: usize = 0x6_5561;
const MENU_SPEED_OFFSET: usize = 0x18_0048;
const MENU_OPEN_SFX: [usize; 2] = [0x6_DD9A, 0x6_DF2A];
const MENU_CLOSE_SFX: usize = 0x6_E0E9;
const LOGIC_OFFSET: usize = 0x18_0210;
const GAME_TYPE_OFFSET: usize = 0x18_0211;
const SWORDLESS_OFFSET: usize = 0x18_003F;
const GOAL_OFFSET: usize = 0x18_003E;
const TOWER_CRYSTALS_OFFSET: usize = 0x18_005E;
const GANON_CRYSTALS_OFFSET: usize = 0x18_005F;
const MAP_MODE_OFFSET: usize = 0x18_003B;
const COMPASS_MODE_OFFSET: usize = 0x18_003C;
const CLOCK_MODE_OFFSET: usize = 0x18_0190;
const RED_CLOCK_OFFSET: usize = 0x18_0200;
const BLUE_CLOCK_OFFSET: usize = 0x18_0204;
const GREEN_CLOCK_OFFSET: usize = 0x18_0208;
const STARTING_TIME_OFFSET: usize = 0x18_020C;
const FREE_ITEM_TEXT_OFFSET: usize = 0x18_016A;
const DIGGING_GAME_OFFSETS: [usize; 2] = [0x18_0020, 0xE_FD95];
const RUPEE_BOW_OFFSET: usize = 0x18_0175;
const ARROW_COST_OFFSET: usize = 0x18_0176;
const SILVER_ARROW_COST_OFFSET: usize = 0x18_0178;
const TITLE_OFFSET: usize = 0x7FC0;
const TITLE_LEN: usize = 21;

const MAX_CRYSTALS: u8 = 7;
const FRAMES_PER_SECOND: i32 = 60;
const ARROW_COST: u16 = 10;
const SILVER_ARROW_COST: u16 = 50;

/// A setting chosen from a fixed list of names. Unknown names fall back to the default.
trait Choice: Copy + Default + 'static {
    const SETTING: &'static str;
    const NAMES: &'static [(&'static str, Self)];

    fn parse(raw: &str, warnings: &mut Vec<Warning>) -> Self {
        let wanted = raw.trim();
        match Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
        {
            Some((_, value)) => *value,
            None => {
                warnings.push(Warning::InvalidConfiguration {
                    setting: Self::SETTING,
                    value: raw.to_string(),
                });
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeartBeep {
    Off,
    Double,
    #[default]
    Normal,
    Half,
    Quarter,
}

impl Choice for HeartBeep {
    const SETTING: &'static str = "heart_beep";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("off", HeartBeep::Off),
        ("double", HeartBeep::Double),
        ("normal", HeartBeep::Normal),
        ("half", HeartBeep::Half),
        ("quarter", HeartBeep::Quarter),
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeartColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
}

impl Choice for HeartColor {
    const SETTING: &'static str = "heart_color";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("red", HeartColor::Red),
        ("blue", HeartColor::Blue),
        ("green", HeartColor::Green),
        ("yellow", HeartColor::Yellow),
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
    Instant,
}

impl Choice for MenuSpeed {
    const SETTING: &'static str = "menu_speed";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("slow", MenuSpeed::Slow),
        ("normal", MenuSpeed::Normal),
        ("fast", MenuSpeed::Fast),
        ("instant", MenuSpeed::Instant),
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Logic {
    #[default]
    NoGlitches,
    OverworldGlitches,
    MajorGlitches,
    NoLogic,
}

impl Choice for Logic {
    const SETTING: &'static str = "logic";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("no-glitches", Logic::NoGlitches),
        ("overworld-glitches", Logic::OverworldGlitches),
        ("major-glitches", Logic::MajorGlitches),
        ("none", Logic::NoLogic),
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameType {
    #[default]
    Item,
    Entrance,
    Room,
    Enemizer,
}

impl Choice for GameType {
    const SETTING: &'static str = "game_type";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("item", GameType::Item),
        ("entrance", GameType::Entrance),
        ("room", GameType::Room),
        ("enemizer", GameType::Enemizer),
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Goal {
    #[default]
    Ganon,
    FastGanon,
    Dungeons,
    Pedestal,
    TriforceHunt,
}

impl Choice for Goal {
    const SETTING: &'static str = "goal";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("ganon", Goal::Ganon),
        ("fast-ganon", Goal::FastGanon),
        ("dungeons", Goal::Dungeons),
        ("pedestal", Goal::Pedestal),
        ("triforce-hunt", Goal::TriforceHunt),
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompassMode {
    #[default]
    Off,
    OnPickup,
    Everywhere,
}

impl Choice for CompassMode {
    const SETTING: &'static str = "compass_mode";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("off", CompassMode::Off),
        ("on-pickup", CompassMode::OnPickup),
        ("everywhere", CompassMode::Everywhere),
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClockMode {
    #[default]
    Off,
    Stopwatch,
    CountdownStop,
    CountdownContinue,
    CountdownOhko,
}

impl Choice for ClockMode {
    const SETTING: &'static str = "clock_mode";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("off", ClockMode::Off),
        ("stopwatch", ClockMode::Stopwatch),
        ("countdown-stop", ClockMode::CountdownStop),
        ("countdown-continue", ClockMode::CountdownContinue),
        ("countdown-ohko", ClockMode::CountdownOhko),
    ];
}

impl Choice for WeaponMode {
    const SETTING: &'static str = "weapon_mode";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("randomized", WeaponMode::Randomized),
        ("assured", WeaponMode::Assured),
        ("vanilla", WeaponMode::Vanilla),
        ("swordless", WeaponMode::Swordless),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub heart_beep: String,
    pub heart_color: String,
    pub menu_speed: String,
    pub logic: String,
    pub game_type: String,
    pub weapon_mode: String,
    pub goal: String,
    pub tower_crystals: u8,
    pub ganon_crystals: u8,
    pub map_mode: bool,
    pub compass_mode: String,
    pub clock_mode: String,
    /// Seconds.
    pub starting_time: i32,
    pub red_clock: i32,
    pub blue_clock: i32,
    pub green_clock: i32,
    pub quick_swap: bool,
    pub smithy_quick_give: bool,
    pub generic_keys: bool,
    pub lock_agahnim_door: bool,
    pub pyramid_fairy_chests: bool,
    pub mirrorless_save_and_quit: bool,
    pub swamp_drain: bool,
    pub pre_agahnim_dw_death: bool,
    pub free_item_text: u8,
    pub digging_game_rng: Option<u8>,
    pub rupee_bow: bool,
    pub title: Option<String>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        SettingsConfig {
            heart_beep: "normal".into(),
            heart_color: "red".into(),
            menu_speed: "normal".into(),
            logic: "no-glitches".into(),
            game_type: "item".into(),
            weapon_mode: "randomized".into(),
            goal: "ganon".into(),
            tower_crystals: MAX_CRYSTALS,
            ganon_crystals: MAX_CRYSTALS,
            map_mode: false,
            compass_mode: "off".into(),
            clock_mode: "off".into(),
            starting_time: 0,
            red_clock: 0,
            blue_clock: 0,
            green_clock: 0,
            quick_swap: false,
            smithy_quick_give: false,
            generic_keys: false,
            lock_agahnim_door: false,
            pyramid_fairy_chests: false,
            mirrorless_save_and_quit: false,
            swamp_drain: false,
            pre_agahnim_dw_death: false,
            free_item_text: 0,
            digging_game_rng: None,
            rupee_bow: false,
            title: None,
        }
    }
}

fn crystals(setting: &'static str, value: u8, warnings: &mut Vec<Warning>) -> u8 {
    if value > MAX_CRYSTALS {
        warnings.push(Warning::InvalidConfiguration {
            setting,
            value: value.to_string(),
        });
        return MAX_CRYSTALS;
    }
    value
}

impl SettingsConfig {
    pub fn resolve(&self, warnings: &mut Vec<Warning>) -> Settings {
        Settings {
            heart_beep: HeartBeep::parse(&self.heart_beep, warnings),
            heart_color: HeartColor::parse(&self.heart_color, warnings),
            menu_speed: MenuSpeed::parse(&self.menu_speed, warnings),
            logic: Logic::parse(&self.logic, warnings),
            game_type: GameType::parse(&self.game_type, warnings),
            weapon_mode: WeaponMode::parse(&self.weapon_mode, warnings),
            goal: Goal::parse(&self.goal, warnings),
            tower_crystals: crystals("tower_crystals", self.tower_crystals, warnings),
            ganon_crystals: crystals("ganon_crystals", self.ganon_crystals, warnings),
            map_mode: self.map_mode,
            compass_mode: CompassMode::parse(&self.compass_mode, warnings),
            clock_mode: ClockMode::parse(&self.clock_mode, warnings),
            starting_time: self.starting_time,
            red_clock: self.red_clock,
            blue_clock: self.blue_clock,
            green_clock: self.green_clock,
            quick_swap: self.quick_swap,
            smithy_quick_give: self.smithy_quick_give,
            generic_keys: self.generic_keys,
            lock_agahnim_door: self.lock_agahnim_door,
            pyramid_fairy_chests: self.pyramid_fairy_chests,
            mirrorless_save_and_quit: self.mirrorless_save_and_quit,
            swamp_drain: self.swamp_drain,
            pre_agahnim_dw_death: self.pre_agahnim_dw_death,
            free_item_text: self.free_item_text,
            digging_game_rng: self.digging_game_rng,
            rupee_bow: self.rupee_bow,
            title: self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub heart_beep: HeartBeep,
    pub heart_color: HeartColor,
    pub menu_speed: MenuSpeed,
    pub logic: Logic,
    pub game_type: GameType,
    pub weapon_mode: WeaponMode,
    pub goal: Goal,
    pub tower_crystals: u8,
    pub ganon_crystals: u8,
    pub map_mode: bool,
    pub compass_mode: CompassMode,
    pub clock_mode: ClockMode,
    pub starting_time: i32,
    pub red_clock: i32,
    pub blue_clock: i32,
    pub green_clock: i32,
    pub quick_swap: bool,
    pub smithy_quick_give: bool,
    pub generic_keys: bool,
    pub lock_agahnim_door: bool,
    pub pyramid_fairy_chests: bool,
    pub mirrorless_save_and_quit: bool,
    pub swamp_drain: bool,
    pub pre_agahnim_dw_death: bool,
    pub free_item_text: u8,
    pub digging_game_rng: Option<u8>,
    pub rupee_bow: bool,
    pub title: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        SettingsConfig::default().resolve(&mut Vec::new())
    }
}

fn write_flag(rom: &mut Rom, offset: usize, on: bool) -> Result<()> {
    rom.write_u8(offset, on as u8)
}

fn write_frames(rom: &mut Rom, offset: usize, seconds: i32) -> Result<()> {
    let frames = seconds.saturating_mul(FRAMES_PER_SECOND);
    rom.write(offset, &frames.to_le_bytes())
}

pub fn set_heart_beep(rom: &mut Rom, beep: HeartBeep) -> Result<()> {
    let value = match beep {
        HeartBeep::Off => 0x00,
        HeartBeep::Double => 0x10,
        HeartBeep::Normal => 0x20,
        HeartBeep::Half => 0x40,
        HeartBeep::Quarter => 0x80,
    };
    rom.write_u8(HEART_BEEP_OFFSET, value)
}

pub fn set_heart_color(rom: &mut Rom, color: HeartColor) -> Result<()> {
    let (hud, file_select) = match color {
        HeartColor::Red => (0x24, 0x05),
        HeartColor::Blue => (0x2C, 0x0D),
        HeartColor::Green => (0x3C, 0x19),
        HeartColor::Yellow => (0x28, 0x09),
    };
    for offset in (HEART_COLOR_HUD_START..=HEART_COLOR_HUD_END).step_by(2) {
        rom.write_u8(offset, hud)?;
    }
    rom.write_u8(HEART_COLOR_FILE_SELECT, file_select)
}

pub fn set_menu_speed(rom: &mut Rom, speed: MenuSpeed) -> Result<()> {
    let value = match speed {
        MenuSpeed::Slow => 0x04,
        MenuSpeed::Normal => 0x08,
        MenuSpeed::Fast => 0x10,
        MenuSpeed::Instant => 0xE8,
    };
    rom.write_u8(MENU_SPEED_OFFSET, value)?;

    // Instant menus also silence the open/close sound effects.
    let instant = speed == MenuSpeed::Instant;
    for offset in MENU_OPEN_SFX {
        rom.write_u8(offset, if instant { 0x20 } else { 0x11 })?;
    }
    rom.write_u8(MENU_CLOSE_SFX, if instant { 0x20 } else { 0x12 })
}

pub fn set_logic(rom: &mut Rom, logic: Logic) -> Result<()> {
    let value = match logic {
        Logic::NoGlitches => 0x00,
        Logic::OverworldGlitches => 0x02,
        Logic::MajorGlitches => 0x01,
        Logic::NoLogic => 0xFF,
    };
    rom.write_u8(LOGIC_OFFSET, value)
}

pub fn set_game_type(rom: &mut Rom, game_type: GameType) -> Result<()> {
    let value = match game_type {
        GameType::Item => 0x01,
        GameType::Entrance => 0x02,
        GameType::Room => 0x04,
        GameType::Enemizer => 0x08,
    };
    rom.write_u8(GAME_TYPE_OFFSET, value)
}

pub fn set_goal(rom: &mut Rom, goal: Goal) -> Result<()> {
    let value = match goal {
        Goal::Ganon => 0x03,
        Goal::FastGanon => 0x04,
        Goal::Dungeons => 0x02,
        Goal::Pedestal => 0x01,
        Goal::TriforceHunt => 0x05,
    };
    rom.write_u8(GOAL_OFFSET, value)
}

pub fn set_compass_mode(rom: &mut Rom, mode: CompassMode) -> Result<()> {
    let value = match mode {
        CompassMode::Off => 0x00,
        CompassMode::OnPickup => 0x01,
        CompassMode::Everywhere => 0x02,
    };
    rom.write_u8(COMPASS_MODE_OFFSET, value)
}

pub fn set_clock_mode(rom: &mut Rom, mode: ClockMode) -> Result<()> {
    let bytes: [u8; 3] = match mode {
        ClockMode::Off => [0x00, 0x00, 0x00],
        ClockMode::Stopwatch => [0x02, 0x01, 0x00],
        ClockMode::CountdownStop => [0x01, 0x00, 0x00],
        ClockMode::CountdownContinue => [0x01, 0x01, 0x00],
        ClockMode::CountdownOhko => [0x01, 0x02, 0x01],
    };
    rom.write(CLOCK_MODE_OFFSET, &bytes)
}

/// The internal title, truncated or space padded to 21 bytes. Non-ASCII becomes `?`.
pub fn set_title(rom: &mut Rom, title: &str) -> Result<()> {
    let mut bytes = [b' '; TITLE_LEN];
    for (slot, ch) in bytes.iter_mut().zip(title.chars()) {
        *slot = if ch.is_ascii() { ch as u8 } else { b'?' };
    }
    rom.write(TITLE_OFFSET, &bytes)
}

pub fn set_rupee_bow(rom: &mut Rom, enabled: bool) -> Result<()> {
    let (arrow, silver) = if enabled {
        (ARROW_COST, SILVER_ARROW_COST)
    } else {
        (0, 0)
    };
    write_flag(rom, RUPEE_BOW_OFFSET, enabled)?;
    rom.write_u16_le(ARROW_COST_OFFSET, arrow)?;
    rom.write_u16_le(SILVER_ARROW_COST_OFFSET, silver)
}

pub fn apply_settings(rom: &mut Rom, settings: &Settings) -> Result<()> {
    set_heart_beep(rom, settings.heart_beep)?;
    set_heart_color(rom, settings.heart_color)?;
    set_menu_speed(rom, settings.menu_speed)?;
    set_logic(rom, settings.logic)?;
    set_game_type(rom, settings.game_type)?;
    write_flag(rom, SWORDLESS_OFFSET, settings.weapon_mode == WeaponMode::Swordless)?;
    set_goal(rom, settings.goal)?;
    rom.write_u8(TOWER_CRYSTALS_OFFSET, settings.tower_crystals.min(MAX_CRYSTALS))?;
    rom.write_u8(GANON_CRYSTALS_OFFSET, settings.ganon_crystals.min(MAX_CRYSTALS))?;
    write_flag(rom, MAP_MODE_OFFSET, settings.map_mode)?;
    set_compass_mode(rom, settings.compass_mode)?;
    set_clock_mode(rom, settings.clock_mode)?;

    write_frames(rom, STARTING_TIME_OFFSET, settings.starting_time)?;
    write_frames(rom, RED_CLOCK_OFFSET, settings.red_clock)?;
    write_frames(rom, BLUE_CLOCK_OFFSET, settings.blue_clock)?;
    write_frames(rom, GREEN_CLOCK_OFFSET, settings.green_clock)?;

    let flags = [
        (0x18_004B, settings.quick_swap),
        (0x18_0029, settings.smithy_quick_give),
        (0x18_0172, settings.generic_keys),
        (0x18_0169, settings.lock_agahnim_door),
        (0x18_01A8, settings.pyramid_fairy_chests),
        (0x18_00A0, settings.mirrorless_save_and_quit),
        (0x18_00A1, settings.swamp_drain),
        (0x18_00A2, settings.pre_agahnim_dw_death),
    ];
    for (offset, on) in flags {
        write_flag(rom, offset, on)?;
    }

    rom.write_u8(FREE_ITEM_TEXT_OFFSET, settings.free_item_text)?;
    if let Some(digs) = settings.digging_game_rng {
        for offset in DIGGING_GAME_OFFSETS {
            rom.write_u8(offset, digs)?;
        }
    }
    set_rupee_bow(rom, settings.rupee_bow)?;
    if let Some(title) = &settings.title {
        set_title(rom, title)?;
    }

    log::debug!("applied settings: {settings:?}");
    Ok(())
}
