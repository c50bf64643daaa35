//! Encoders for the fixed-offset data tables. Every table is either bounded by a slot
//! budget or closed with an explicit sentinel, so nothing spills into the next region.

pub mod prizes;
pub mod shops;
pub mod substitutions;
pub mod text;

use crate::{PatcherError, Result};

pub(crate) fn ensure_capacity(table: &'static str, capacity: usize, requested: usize) -> Result<()> {
    if requested > capacity {
        return Err(PatcherError::CapacityExceeded {
            table,
            capacity,
            requested,
        });
    }
    Ok(())
}
