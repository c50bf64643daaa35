use crate::rom::Rom;
use crate::Result;

/// Location of the inverse/checksum word pair in the internal header.
pub const CHECKSUM_OFFSET: usize = 0x7FDC;
const CHECKSUM_END: usize = CHECKSUM_OFFSET + 4;
const BLOCK_SIZE: usize = 1024;
const SUM_SEED: u32 = 0x1FE;

/// Returns `(inverse, checksum)` for `data`, skipping the checksum window itself.
///
/// The seed stands in for the skipped window holding `FF FF 00 00`, so the result is
/// independent of whatever the window currently contains.
pub fn compute_checksum(data: &[u8]) -> (u16, u16) {
    let mut sum = SUM_SEED;
    for (block_idx, block) in data.chunks(BLOCK_SIZE).enumerate() {
        let base = block_idx * BLOCK_SIZE;
        for (i, &b) in block.iter().enumerate() {
            let pos = base + i;
            if (CHECKSUM_OFFSET..CHECKSUM_END).contains(&pos) {
                continue;
            }
            sum = sum.wrapping_add(b as u32);
        }
    }
    let checksum = (sum & 0xFFFF) as u16;
    (checksum ^ 0xFFFF, checksum)
}

/// Recomputes the checksum and writes it at 0x7FDC. Must be the last write of a session.
pub fn update_checksum(rom: &mut Rom) -> Result<(u16, u16)> {
    rom.ensure_standard_size()?;
    let (inverse, checksum) = compute_checksum(rom.bytes());

    let mut words = [0u8; 4];
    words[..2].copy_from_slice(&inverse.to_le_bytes());
    words[2..].copy_from_slice(&checksum.to_le_bytes());
    rom.write(CHECKSUM_OFFSET, &words)?;

    log::debug!("checksum {checksum:#06X} inverse {inverse:#06X}");
    Ok((inverse, checksum))
}

/// True when the stored pair matches a fresh sum of the image.
pub fn verify_checksum(rom: &Rom) -> Result<bool> {
    rom.ensure_standard_size()?;
    let stored_inverse = rom.read_u16_le(CHECKSUM_OFFSET)?;
    let stored_checksum = rom.read_u16_le(CHECKSUM_OFFSET + 2)?;
    let (inverse, checksum) = compute_checksum(rom.bytes());
    Ok(stored_inverse == inverse && stored_checksum == checksum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::SIZE;
    use crate::PatcherError;

    #[test]
    fn blank_image_checksum_is_seed() {
        let mut rom = Rom::blank();
        let (inverse, checksum) = update_checksum(&mut rom).unwrap();
        assert_eq!(checksum, 0x01FE);
        assert_eq!(inverse, 0xFE01);
        assert_eq!(rom.read(CHECKSUM_OFFSET, 4).unwrap(), &[0x01, 0xFE, 0xFE, 0x01]);
        assert!(verify_checksum(&rom).unwrap());
    }

    #[test]
    fn checksum_pair_always_complements() {
        let mut rom = Rom::blank();
        rom.write(0, &[0xFF; 300]).unwrap();
        rom.write(SIZE - 5, &[0x12, 0x34, 0x56, 0x78, 0x9A]).unwrap();
        let (inverse, checksum) = update_checksum(&mut rom).unwrap();
        assert_eq!(inverse ^ checksum, 0xFFFF);

        let expected: u32 = 0x1FE + 300 * 0xFF + 0x12 + 0x34 + 0x56 + 0x78 + 0x9A;
        assert_eq!(checksum as u32, expected & 0xFFFF);
    }

    #[test]
    fn window_contents_do_not_affect_sum() {
        let mut a = Rom::blank();
        let mut b = Rom::blank();
        b.write(CHECKSUM_OFFSET, &[0xAA, 0xBB, 0xCC, 0xDD]).unwrap();
        assert_eq!(
            update_checksum(&mut a).unwrap(),
            update_checksum(&mut b).unwrap()
        );
        // Bytes right next to the window still count.
        b.write_u8(CHECKSUM_END, 1).unwrap();
        b.write_u8(CHECKSUM_OFFSET - 1, 1).unwrap();
        assert_eq!(update_checksum(&mut b).unwrap().1, 0x0200);
    }

    #[test]
    fn later_write_invalidates_checksum() {
        let mut rom = Rom::blank();
        update_checksum(&mut rom).unwrap();
        rom.write_u8(0x1234, 7).unwrap();
        assert!(!verify_checksum(&rom).unwrap());
    }

    #[test]
    fn wrong_size_is_rejected() {
        let mut rom = Rom::blank();
        rom.resize(SIZE / 2);
        assert!(matches!(
            update_checksum(&mut rom),
            Err(PatcherError::SizeMismatch { expected: SIZE, .. })
        ));
        assert!(rom.write_log().is_empty());
    }

    #[test]
    fn checksum_write_is_logged() {
        let mut rom = Rom::blank();
        update_checksum(&mut rom).unwrap();
        let last = rom.write_log().last().unwrap();
        assert_eq!(last.offset, CHECKSUM_OFFSET);
        assert_eq!(last.bytes.len(), 4);
    }
}
