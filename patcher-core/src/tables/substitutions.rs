use serde::{Deserialize, Serialize};

use super::ensure_capacity;
use crate::rom::Rom;
use crate::Result;

pub const SUBSTITUTION_OFFSET: usize = 0x18_4000;
const REGION_LEN: usize = 0x800;
const ROW_LEN: usize = 4;
const SENTINEL: [u8; ROW_LEN] = [0xFF; ROW_LEN];
/// Rows that fit ahead of the sentinel.
pub const MAX_SUBSTITUTIONS: usize = REGION_LEN / ROW_LEN - 1;

/// Once the player holds `limit` of `item`, further pickups of it become `replacement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub item: u8,
    pub limit: u8,
    pub replacement: u8,
}

pub fn encode_substitutions(subs: &[Substitution]) -> Result<Vec<u8>> {
    ensure_capacity("substitution table", MAX_SUBSTITUTIONS, subs.len())?;

    let mut out = Vec::with_capacity((subs.len() + 1) * ROW_LEN);
    for sub in subs {
        out.extend_from_slice(&[sub.item, sub.limit, sub.replacement, 0x00]);
    }
    out.extend_from_slice(&SENTINEL);
    Ok(out)
}

pub fn write_substitutions(rom: &mut Rom, subs: &[Substitution]) -> Result<()> {
    let bytes = encode_substitutions(subs)?;
    rom.write(SUBSTITUTION_OFFSET, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatcherError;

    #[test]
    fn empty_table_is_just_the_sentinel() {
        assert_eq!(encode_substitutions(&[]).unwrap(), vec![0xFF; 4]);
    }

    #[test]
    fn rows_are_followed_by_sentinel() {
        let subs = [
            Substitution { item: 0x5E, limit: 4, replacement: 0x47 },
            Substitution { item: 0x60, limit: 1, replacement: 0x36 },
        ];
        let bytes = encode_substitutions(&subs).unwrap();
        assert_eq!(
            bytes,
            vec![0x5E, 4, 0x47, 0, 0x60, 1, 0x36, 0, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert!(bytes.ends_with(&[0xFF, 0xFF, 0xFF, 0xFF]));
    }

    #[test]
    fn oversized_table_is_rejected() {
        let subs = vec![Substitution { item: 1, limit: 1, replacement: 2 }; MAX_SUBSTITUTIONS + 1];
        assert!(matches!(
            encode_substitutions(&subs),
            Err(PatcherError::CapacityExceeded { .. })
        ));
        let full = vec![Substitution { item: 1, limit: 1, replacement: 2 }; MAX_SUBSTITUTIONS];
        assert_eq!(encode_substitutions(&full).unwrap().len(), REGION_LEN);
    }

    #[test]
    fn writes_at_fixed_offset() {
        let mut rom = Rom::blank();
        write_substitutions(&mut rom, &[Substitution { item: 9, limit: 2, replacement: 3 }]).unwrap();
        assert_eq!(
            rom.read(SUBSTITUTION_OFFSET, 8).unwrap(),
            &[9, 2, 3, 0, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }
}
