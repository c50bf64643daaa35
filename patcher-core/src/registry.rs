use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::patch::{apply_patch, Patch};
use crate::rom::Rom;
use crate::{PatcherError, Result, PATCHER_VERSION};

const BUILD_EXTENSION: &str = ".json.gz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub version: String,
    pub hash: String,
    pub patch: Patch,
}

impl Build {
    /// `version` defaults to the crate version, `hash` to the md5 of the serialized log.
    pub fn new(patch: Patch, version: Option<&str>, hash: Option<&str>) -> Result<Self> {
        let hash = match hash {
            Some(h) => h.to_string(),
            None => format!("{:x}", md5::compute(patch.to_json()?.as_bytes())),
        };
        Ok(Build {
            version: version.unwrap_or(PATCHER_VERSION).to_string(),
            hash,
            patch,
        })
    }

    pub fn rebuild(&self, starting: &[u8]) -> Result<Rom> {
        let mut rom = Rom::open(Some(starting));
        apply_patch(&mut rom, &self.patch)?;
        Ok(rom)
    }

    fn key(&self) -> (String, String) {
        (self.version.clone(), self.hash.clone())
    }
}

pub trait BuildRegistry {
    fn store(&mut self, build: Build) -> Result<()>;

    fn find_build(&self, version: &str, hash: &str) -> Result<Option<Build>>;

    fn save_build(&mut self, patch: &Patch, version: Option<&str>, hash: Option<&str>) -> Result<Build> {
        let build = Build::new(patch.clone(), version, hash)?;
        self.store(build.clone())?;
        Ok(build)
    }
}

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    builds: HashMap<(String, String), Build>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}

impl BuildRegistry for MemoryRegistry {
    fn store(&mut self, build: Build) -> Result<()> {
        self.builds.insert(build.key(), build);
        Ok(())
    }

    fn find_build(&self, version: &str, hash: &str) -> Result<Option<Build>> {
        Ok(self
            .builds
            .get(&(version.to_string(), hash.to_string()))
            .cloned())
    }
}

/// One gzip-compressed JSON file per build in a single directory.
#[derive(Debug, Clone)]
pub struct DirRegistry {
    dir: PathBuf,
}

impl DirRegistry {
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(DirRegistry {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, version: &str, hash: &str) -> PathBuf {
        let name = md5::compute(format!("{version}\0{hash}").as_bytes());
        self.dir.join(format!("{name:x}{BUILD_EXTENSION}"))
    }

    fn read_build(path: &Path) -> Result<Build> {
        let raw = fs::read(path).map_err(|source| PatcherError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let mut json = Vec::new();
        GzDecoder::new(raw.as_slice()).read_to_end(&mut json)?;
        Ok(serde_json::from_slice(&json)?)
    }

    pub fn builds(&self) -> Result<Vec<Build>> {
        let mut builds = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| PatcherError::Io(e.into()))?;
            let is_build = entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(BUILD_EXTENSION);
            if is_build {
                builds.push(Self::read_build(entry.path())?);
            }
        }
        builds.sort_by_key(Build::key);
        Ok(builds)
    }
}

impl BuildRegistry for DirRegistry {
    fn store(&mut self, build: Build) -> Result<()> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&serde_json::to_vec(&build)?)?;
        let data = encoder.finish()?;

        let path = self.path_for(&build.version, &build.hash);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| PatcherError::Io(e.error))?;

        log::debug!("stored build {} / {} at {}", build.version, build.hash, path.display());
        Ok(())
    }

    fn find_build(&self, version: &str, hash: &str) -> Result<Option<Build>> {
        let path = self.path_for(version, hash);
        if !path.is_file() {
            return Ok(None);
        }
        let build = Self::read_build(&path)?;
        // File names are digests; confirm the key itself.
        if build.version != version || build.hash != hash {
            return Ok(None);
        }
        Ok(Some(build))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::PatchPart;

    fn sample_patch() -> Patch {
        Patch::new(vec![
            PatchPart::single(0x10, vec![1, 2, 3]),
            PatchPart::single(0x7FDC, vec![0xFE, 0x01, 0x01, 0xFE]),
        ])
    }

    #[test]
    fn defaults_fill_version_and_hash() {
        let patch = sample_patch();
        let build = Build::new(patch.clone(), None, None).unwrap();
        assert_eq!(build.version, PATCHER_VERSION);
        let expected = format!("{:x}", md5::compute(patch.to_json().unwrap()));
        assert_eq!(build.hash, expected);
    }

    #[test]
    fn memory_registry_upserts_on_exact_key() {
        let mut reg = MemoryRegistry::new();
        reg.save_build(&sample_patch(), Some("v1"), Some("seed")).unwrap();
        let replacement = Patch::new(vec![PatchPart::single(0, vec![9])]);
        reg.save_build(&replacement, Some("v1"), Some("seed")).unwrap();
        reg.save_build(&replacement, Some("v2"), Some("seed")).unwrap();

        assert_eq!(reg.len(), 2);
        let found = reg.find_build("v1", "seed").unwrap().unwrap();
        assert_eq!(found.patch, replacement);
        assert!(reg.find_build("v1", "other").unwrap().is_none());
    }

    #[test]
    fn rebuild_replays_onto_starting_image() {
        let build = Build::new(sample_patch(), Some("v1"), Some("h")).unwrap();
        let rom = build.rebuild(&[0xAA; 4]).unwrap();
        assert_eq!(rom.read(0, 4).unwrap(), &[0xAA; 4]);
        assert_eq!(rom.read(0x10, 3).unwrap(), &[1, 2, 3]);
        assert_eq!(rom.write_log().len(), 2);
    }
}
