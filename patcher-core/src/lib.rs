use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod checksum;
pub mod equipment;
pub mod items;
pub mod patch;
pub mod registry;
pub mod rom;
pub mod settings;
pub mod tables;

pub use equipment::{ItemToken, WeaponMode};
pub use patch::{Patch, PatchPart};
pub use registry::{Build, BuildRegistry, DirRegistry, MemoryRegistry};
pub use rom::{Rom, WriteRecord, SIZE};
pub use settings::{Settings, SettingsConfig};

use tables::prizes::PrizeTables;
use tables::shops::Shop;
use tables::substitutions::Substitution;
use tables::text::{CreditsTable, TextTable};

/// Version recorded with every saved build; bump whenever an offset or encoding changes.
pub const PATCHER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
pub enum PatcherError {
    #[error("unable to read {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write of {len} bytes at {offset:#X} exceeds image size {size:#X}")]
    OutOfRange {
        offset: usize,
        len: usize,
        size: usize,
    },
    #[error("image is {actual:#X} bytes, expected {expected:#X}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("{table} holds at most {capacity} entries, got {requested}")]
    CapacityExceeded {
        table: &'static str,
        capacity: usize,
        requested: usize,
    },
    #[error("image md5 {actual} does not match expected {expected}")]
    FingerprintMismatch { expected: String, actual: String },
    #[error("malformed patch: {0}")]
    MalformedPatch(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PatcherError>;

/// Non-fatal problems. They never abort a session; callers decide whether to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnknownToken(String),
    InvalidConfiguration { setting: &'static str, value: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownToken(name) => write!(f, "unknown item '{name}' ignored"),
            Warning::InvalidConfiguration { setting, value } => {
                write!(f, "invalid value '{value}' for {setting}, using default")
            }
        }
    }
}

/// Everything one patching session needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Base image; a blank image is used when absent.
    pub input_path: Option<PathBuf>,
    /// Reject the base image unless its md5 matches.
    pub expected_md5: Option<String>,
    pub output_path: PathBuf,
    pub apply_baseline: bool,
    pub patch_files: Vec<PathBuf>,
    pub settings: SettingsConfig,
    pub starting_items: Vec<ItemToken>,
    pub substitutions: Vec<Substitution>,
    pub shops: Vec<Shop>,
    pub bonk_prizes: Option<Vec<u8>>,
    pub prizes: Option<PrizeTables>,
    /// Pre-encoded dialogue; the region is left alone when absent.
    pub text: Option<TextTable>,
    pub credits: Option<CreditsTable>,
    /// Directory registry the write log is saved to after a successful run.
    pub registry_path: Option<PathBuf>,
    pub build_version: Option<String>,
}

impl Default for PatchConfig {
    fn default() -> Self {
        PatchConfig {
            input_path: None,
            expected_md5: None,
            output_path: PathBuf::from("patched.sfc"),
            apply_baseline: true,
            patch_files: Vec::new(),
            settings: SettingsConfig::default(),
            starting_items: Vec::new(),
            substitutions: Vec::new(),
            shops: Vec::new(),
            bonk_prizes: None,
            prizes: None,
            text: None,
            credits: None,
            registry_path: None,
            build_version: None,
        }
    }
}

impl PatchConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read(path).map_err(|source| PatcherError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub fingerprint: String,
    pub checksum: u16,
    pub writes: usize,
    pub build: Option<Build>,
    pub warnings: Vec<Warning>,
}

/// Applies every configured edit to `rom`, in a fixed order. The checksum is left to the
/// caller so further writes can follow.
pub fn patch_rom(rom: &mut Rom, config: &PatchConfig) -> Result<Vec<Warning>> {
    let mut warnings = Vec::new();

    if config.apply_baseline {
        patch::apply_patch(rom, &Patch::baseline()?)?;
    }
    for path in &config.patch_files {
        patch::apply_patch_file(rom, path)?;
    }

    let settings = config.settings.resolve(&mut warnings);
    settings::apply_settings(rom, &settings)?;

    if let Some(prizes) = &config.prizes {
        tables::prizes::write_prize_tables(rom, prizes)?;
    }
    if let Some(bonks) = &config.bonk_prizes {
        tables::prizes::write_bonk_prizes(rom, bonks)?;
    }
    if !config.substitutions.is_empty() {
        tables::substitutions::write_substitutions(rom, &config.substitutions)?;
    }
    if !config.shops.is_empty() {
        tables::shops::write_shops(rom, &config.shops)?;
    }
    if let Some(text) = &config.text {
        tables::text::write_text(rom, text)?;
    }
    if let Some(credits) = &config.credits {
        tables::text::write_credits(rom, credits)?;
    }

    let state = equipment::encode_collecting(&config.starting_items, &mut warnings);
    equipment::write_starting_equipment(rom, &state, settings.weapon_mode)?;

    for warning in &warnings {
        log::warn!("{warning}");
    }
    Ok(warnings)
}

/// Runs a full session: load, patch, checksum, save, and optionally record the build.
/// Nothing is written to disk unless every step succeeds.
pub fn run(config: &PatchConfig) -> Result<RunReport> {
    let mut rom = match &config.input_path {
        Some(path) => Rom::load(path)?,
        None => Rom::blank(),
    };
    if let Some(expected) = &config.expected_md5 {
        rom.verify_fingerprint(expected)?;
    }

    let warnings = patch_rom(&mut rom, config)?;
    let (_, checksum) = checksum::update_checksum(&mut rom)?;

    // The image only replaces the output once the build is recorded.
    let staged = rom.stage(&config.output_path)?;
    let build = match &config.registry_path {
        Some(dir) => {
            let mut registry = DirRegistry::open(dir)?;
            let build = registry.save_build(
                &rom.log_as_patch(),
                config.build_version.as_deref(),
                None,
            )?;
            log::info!("saved build {} / {}", build.version, build.hash);
            Some(build)
        }
        None => None,
    };
    staged.commit()?;

    Ok(RunReport {
        output_path: config.output_path.clone(),
        fingerprint: rom.fingerprint(),
        checksum,
        writes: rom.write_log().len(),
        build,
        warnings,
    })
}
