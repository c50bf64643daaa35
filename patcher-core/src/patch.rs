use flate2::read::GzDecoder;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::rom::Rom;
use crate::{PatcherError, Result};

const BASELINE_JSON: &str = include_str!("../data/baseline.json");
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// One object of a patch document: offsets in document order, each with its bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchPart {
    edits: Vec<(usize, Vec<u8>)>,
}

impl PatchPart {
    pub fn new(edits: Vec<(usize, Vec<u8>)>) -> Self {
        PatchPart { edits }
    }

    pub fn single(offset: usize, bytes: Vec<u8>) -> Self {
        PatchPart {
            edits: vec![(offset, bytes)],
        }
    }

    pub fn edits(&self) -> &[(usize, Vec<u8>)] {
        &self.edits
    }
}

/// An ordered list of parts, replayed part by part and edit by edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch {
    parts: Vec<PatchPart>,
}

impl Patch {
    pub fn new(parts: Vec<PatchPart>) -> Self {
        Patch { parts }
    }

    pub fn parts(&self) -> &[PatchPart] {
        &self.parts
    }

    pub fn edit_count(&self) -> usize {
        self.parts.iter().map(|p| p.edits.len()).sum()
    }

    /// Every edit in replay order.
    pub fn edits(&self) -> impl Iterator<Item = (usize, &[u8])> + '_ {
        self.parts
            .iter()
            .flat_map(|p| p.edits.iter().map(|(off, bytes)| (*off, bytes.as_slice())))
    }

    /// The canonical baseline every session starts from.
    pub fn baseline() -> Result<Patch> {
        Patch::from_slice(BASELINE_JSON.as_bytes())
    }

    /// Decodes a patch document, inflating it first if it is gzip-compressed.
    pub fn from_slice(raw: &[u8]) -> Result<Patch> {
        if raw.starts_with(&GZIP_MAGIC) {
            let mut json = Vec::new();
            GzDecoder::new(raw)
                .read_to_end(&mut json)
                .map_err(|e| PatcherError::MalformedPatch(format!("bad gzip stream: {e}")))?;
            return Patch::from_json(&json);
        }
        Patch::from_json(raw)
    }

    fn from_json(json: &[u8]) -> Result<Patch> {
        serde_json::from_slice(json).map_err(|e| PatcherError::MalformedPatch(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn parse_offset(key: &str) -> Option<usize> {
    let key = key.trim();
    match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => key.parse::<usize>().ok(),
    }
}

impl Serialize for PatchPart {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.edits.len()))?;
        for (offset, bytes) in &self.edits {
            map.serialize_entry(&offset.to_string(), bytes)?;
        }
        map.end()
    }
}

struct PatchPartVisitor;

impl<'de> Visitor<'de> for PatchPartVisitor {
    type Value = PatchPart;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of offsets to byte arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<PatchPart, A::Error> {
        let mut edits = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<String>()? {
            let offset = parse_offset(&key)
                .ok_or_else(|| <A::Error as de::Error>::custom(format!("invalid offset '{key}'")))?;
            let bytes: Vec<u8> = access.next_value()?;
            edits.push((offset, bytes));
        }
        Ok(PatchPart { edits })
    }
}

impl<'de> Deserialize<'de> for PatchPart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PatchPartVisitor)
    }
}

/// Replays `patch` through the logged write path: one `WriteRecord` per edit.
pub fn apply_patch(rom: &mut Rom, patch: &Patch) -> Result<usize> {
    let mut count = 0usize;
    for (offset, bytes) in patch.edits() {
        rom.write(offset, bytes)?;
        count += 1;
    }
    log::debug!("applied {count} patch edits");
    Ok(count)
}

pub fn apply_patch_file(rom: &mut Rom, path: &Path) -> Result<usize> {
    let raw = fs::read(path).map_err(|source| PatcherError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let patch = Patch::from_slice(&raw).map_err(|e| match e {
        PatcherError::MalformedPatch(msg) => {
            PatcherError::MalformedPatch(format!("{}: {msg}", path.display()))
        }
        other => other,
    })?;
    let count = apply_patch(rom, &patch)?;
    log::info!("applied {} ({count} edits)", path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::{WriteRecord, SIZE};
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn decodes_hex_and_decimal_keys_in_order() {
        let patch = Patch::from_slice(br#"[{"0x10": [1, 2], "5": [3]}, {"0X7FFF": [255]}]"#).unwrap();
        let edits: Vec<(usize, Vec<u8>)> = patch.edits().map(|(o, b)| (o, b.to_vec())).collect();
        assert_eq!(
            edits,
            vec![(0x10, vec![1, 2]), (5, vec![3]), (0x7FFF, vec![255])]
        );
        assert_eq!(patch.edit_count(), 3);
        assert_eq!(patch.parts().len(), 2);
    }

    #[test]
    fn rejects_bad_offsets_and_bytes() {
        for doc in [
            r#"[{"zz": [1]}]"#,
            r#"[{"1": [256]}]"#,
            r#"[{"1": [-1]}]"#,
            r#"{"1": [1]}"#,
            "not json",
        ] {
            let err = Patch::from_slice(doc.as_bytes()).unwrap_err();
            assert!(matches!(err, PatcherError::MalformedPatch(_)), "{doc}");
        }
    }

    #[test]
    fn replay_logs_one_record_per_edit() {
        let patch = Patch::new(vec![
            PatchPart::new(vec![(0x20, vec![0xAA, 0xBB]), (0x10, vec![0xCC])]),
            PatchPart::single(0x20, vec![0xDD]),
        ]);
        let mut rom = Rom::blank();
        assert_eq!(apply_patch(&mut rom, &patch).unwrap(), 3);
        assert_eq!(
            rom.write_log(),
            &[
                WriteRecord { offset: 0x20, bytes: vec![0xAA, 0xBB] },
                WriteRecord { offset: 0x10, bytes: vec![0xCC] },
                WriteRecord { offset: 0x20, bytes: vec![0xDD] },
            ]
        );
        // Later parts overwrite earlier ones.
        assert_eq!(rom.read(0x20, 2).unwrap(), &[0xDD, 0xBB]);
    }

    #[test]
    fn out_of_range_edit_aborts() {
        let patch = Patch::new(vec![PatchPart::single(SIZE, vec![1])]);
        let mut rom = Rom::blank();
        assert!(matches!(
            apply_patch(&mut rom, &patch),
            Err(PatcherError::OutOfRange { .. })
        ));
    }

    #[test]
    fn serializes_in_document_shape() {
        let patch = Patch::new(vec![PatchPart::new(vec![(32704, vec![1, 2]), (16, vec![])])]);
        let json = patch.to_json().unwrap();
        assert_eq!(json, r#"[{"32704":[1,2],"16":[]}]"#);
        assert_eq!(Patch::from_slice(json.as_bytes()).unwrap(), patch);
    }

    #[test]
    fn log_replays_as_patch() {
        let mut rom = Rom::blank();
        rom.write(0x100, &[1, 2, 3]).unwrap();
        rom.write(0x101, &[9]).unwrap();
        let patch = rom.log_as_patch();

        let mut replay = Rom::blank();
        apply_patch(&mut replay, &patch).unwrap();
        assert_eq!(replay.bytes(), rom.bytes());
        assert_eq!(replay.write_log(), rom.write_log());
    }

    #[test]
    fn patch_file_plain_and_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let doc = br#"[{"0x1000": [7, 8, 9]}]"#;

        let plain = dir.path().join("seed.json");
        fs::write(&plain, doc).unwrap();

        let gz = dir.path().join("seed.json.gz");
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(doc).unwrap();
        fs::write(&gz, enc.finish().unwrap()).unwrap();

        for path in [plain, gz] {
            let mut rom = Rom::blank();
            assert_eq!(apply_patch_file(&mut rom, &path).unwrap(), 1);
            assert_eq!(rom.read(0x1000, 3).unwrap(), &[7, 8, 9]);
        }
    }

    #[test]
    fn missing_patch_file_is_source_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let mut rom = Rom::blank();
        let err = apply_patch_file(&mut rom, &dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, PatcherError::SourceUnreadable { .. }));
    }

    #[test]
    fn malformed_patch_file_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{").unwrap();
        let mut rom = Rom::blank();
        match apply_patch_file(&mut rom, &path) {
            Err(PatcherError::MalformedPatch(msg)) => assert!(msg.contains("broken.json")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(rom.write_log().is_empty());
    }

    #[test]
    fn baseline_decodes() {
        let patch = Patch::baseline().unwrap();
        assert!(patch.edit_count() > 0);
        let mut rom = Rom::blank();
        apply_patch(&mut rom, &patch).unwrap();
        assert_eq!(rom.read(0x7FC0, 19).unwrap(), b"THE LEGEND OF ZELDA");
    }
}
