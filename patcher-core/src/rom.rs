use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::patch::{Patch, PatchPart};
use crate::{PatcherError, Result};

/// Size of a headerless cartridge image in bytes (16 Mbit).
pub const SIZE: usize = 0x20_0000;

/// md5 of the unmodified base image every baseline patch is authored against.
pub const BASE_MD5: &str = "03a63945398191337e896e5771f77173";

/// One logged write, in the order it was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRecord {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

/// A fixed-size image plus the chronological log of every write applied to it.
#[derive(Debug, Clone)]
pub struct Rom {
    data: Vec<u8>,
    log: Vec<WriteRecord>,
}

impl Rom {
    /// Zero-filled image of `SIZE` bytes.
    pub fn blank() -> Self {
        Rom {
            data: vec![0u8; SIZE],
            log: Vec::new(),
        }
    }

    /// Copies `source` (if any) into a new image, padded with zeros or truncated to `SIZE`.
    pub fn open(source: Option<&[u8]>) -> Self {
        let mut rom = Rom::blank();
        if let Some(src) = source {
            let n = src.len().min(SIZE);
            rom.data[..n].copy_from_slice(&src[..n]);
        }
        rom
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| PatcherError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.len() != SIZE {
            log::warn!(
                "{} is {:#X} bytes, resizing to {:#X}",
                path.display(),
                bytes.len(),
                SIZE
            );
        }
        Ok(Rom::open(Some(&bytes)))
    }

    /// Writes the image to `path` through a temp file in the same directory, so a failed
    /// save never leaves a partial image behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.stage(path)?.commit()
    }

    /// Writes the image next to `path` without replacing it. Nothing appears at `path`
    /// until `commit`; dropping the staged save removes the temp file.
    pub fn stage(&self, path: &Path) -> Result<StagedSave> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&self.data)?;
        tmp.as_file().sync_all()?;
        Ok(StagedSave {
            tmp,
            path: path.to_path_buf(),
            len: self.data.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Truncates or zero-extends the image to `n` bytes. The write log is kept but the resize
    /// is not recorded in it: replaying the log reproduces this image only onto a starting
    /// image of length `n`.
    pub fn resize(&mut self, n: usize) {
        self.data.resize(n, 0);
    }

    pub fn resize_to_default(&mut self) {
        self.resize(SIZE);
    }

    /// Fails with `SizeMismatch` unless the image is exactly `SIZE` bytes.
    pub fn ensure_standard_size(&self) -> Result<()> {
        if self.data.len() != SIZE {
            return Err(PatcherError::SizeMismatch {
                expected: SIZE,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    fn check_range(&self, offset: usize, len: usize) -> Result<()> {
        let end = offset.checked_add(len);
        match end {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(PatcherError::OutOfRange {
                offset,
                len,
                size: self.data.len(),
            }),
        }
    }

    /// Overwrites `bytes` at `offset` and appends a `WriteRecord`.
    pub fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self.write_unlogged(offset, bytes)?;
        self.log.push(WriteRecord {
            offset,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    /// Overwrites `bytes` at `offset` without touching the write log.
    pub fn write_unlogged(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self.check_range(offset, bytes.len())?;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.write(offset, &[value])
    }

    pub fn write_u16_le(&mut self, offset: usize, value: u16) -> Result<()> {
        self.write(offset, &value.to_le_bytes())
    }

    pub fn write_u32_le(&mut self, offset: usize, value: u32) -> Result<()> {
        self.write(offset, &value.to_le_bytes())
    }

    pub fn read(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.check_range(offset, len)?;
        Ok(&self.data[offset..offset + len])
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.read(offset, 1)?[0])
    }

    pub fn read_u16_le(&self, offset: usize) -> Result<u16> {
        let b = self.read(offset, 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn write_log(&self) -> &[WriteRecord] {
        &self.log
    }

    /// The write log in patch-document shape: one single-entry part per record.
    pub fn log_as_patch(&self) -> Patch {
        Patch::new(
            self.log
                .iter()
                .map(|rec| PatchPart::single(rec.offset, rec.bytes.clone()))
                .collect(),
        )
    }

    /// Lowercase hex md5 of the current contents.
    pub fn fingerprint(&self) -> String {
        format!("{:x}", md5::compute(&self.data))
    }

    pub fn verify_fingerprint(&self, expected: &str) -> Result<()> {
        let actual = self.fingerprint();
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(PatcherError::FingerprintMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct StagedSave {
    tmp: NamedTempFile,
    path: PathBuf,
    len: usize,
}

impl StagedSave {
    pub fn commit(self) -> Result<()> {
        self.tmp
            .persist(&self.path)
            .map_err(|e| PatcherError::Io(e.error))?;
        log::info!("wrote {} ({} bytes)", self.path.display(), self.len);
        Ok(())
    }
}

impl Default for Rom {
    fn default() -> Self {
        Rom::blank()
    }
}
