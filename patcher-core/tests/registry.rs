use patcher_core::patch::PatchPart;
use patcher_core::{BuildRegistry, DirRegistry, Patch, Rom, PATCHER_VERSION};

fn session_log(seed: u8) -> Patch {
    let mut rom = Rom::blank();
    rom.write(0x1000, &[seed, seed, seed]).unwrap();
    rom.write_u16_le(0x7FDC, 0xBEEF).unwrap();
    rom.log_as_patch()
}

#[test]
fn builds_round_trip_through_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = DirRegistry::open(dir.path()).unwrap();

    let saved = registry.save_build(&session_log(1), None, None).unwrap();
    assert_eq!(saved.version, PATCHER_VERSION);

    let found = registry
        .find_build(PATCHER_VERSION, &saved.hash)
        .unwrap()
        .unwrap();
    assert_eq!(found, saved);
    assert!(registry.find_build("0.0.0", &saved.hash).unwrap().is_none());
}

#[test]
fn same_key_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = DirRegistry::open(dir.path()).unwrap();

    registry.save_build(&session_log(1), Some("v27"), Some("abc")).unwrap();
    registry.save_build(&session_log(2), Some("v27"), Some("abc")).unwrap();
    registry.save_build(&session_log(3), Some("v28"), Some("abc")).unwrap();

    let builds = registry.builds().unwrap();
    assert_eq!(builds.len(), 2);
    let v27 = registry.find_build("v27", "abc").unwrap().unwrap();
    assert_eq!(v27.patch, session_log(2));
}

#[test]
fn reopened_registry_sees_earlier_builds() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut registry = DirRegistry::open(dir.path()).unwrap();
        registry.save_build(&session_log(7), Some("v1"), Some("h")).unwrap();
    }
    let registry = DirRegistry::open(dir.path()).unwrap();
    let build = registry.find_build("v1", "h").unwrap().unwrap();

    let rom = build.rebuild(&[]).unwrap();
    assert_eq!(rom.read(0x1000, 3).unwrap(), &[7, 7, 7]);
    assert_eq!(rom.read_u16_le(0x7FDC).unwrap(), 0xBEEF);
}

#[test]
fn unrelated_files_are_ignored_when_listing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    let mut registry = DirRegistry::open(dir.path()).unwrap();
    registry
        .save_build(&Patch::new(vec![PatchPart::single(0, vec![1])]), Some("v"), Some("h"))
        .unwrap();
    assert_eq!(registry.builds().unwrap().len(), 1);
}
