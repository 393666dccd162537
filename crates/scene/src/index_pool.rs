//! Recycling pool of small integer identifiers.

use tracing::warn;

/// Reasons a release is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IndexPoolError {
    #[error("Index {index} was never acquired (high-water mark is {high_water_mark})")]
    OutOfRange { index: u32, high_water_mark: u32 },

    #[error("Index {0} released twice")]
    DoubleRelease(u32),
}

/// Hands out integer identifiers and reuses released ones first.
///
/// Released indices go onto a stack, so they come back in reverse release
/// order. Fresh indices count up from 0.
#[derive(Debug, Clone, Default)]
pub struct IndexPool {
    /// One past the largest index ever handed out
    high_water_mark: u32,
    /// Released indices, most recent last
    free: Vec<u32>,
}

impl IndexPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an index that is not currently in use
    pub fn acquire(&mut self) -> u32 {
        if let Some(index) = self.free.pop() {
            return index;
        }
        let index = self.high_water_mark;
        self.high_water_mark += 1;
        index
    }

    /// Return an index to the pool.
    ///
    /// Invalid releases are rejected in every build and leave the pool
    /// untouched; debug builds additionally assert.
    pub fn release(&mut self, index: u32) -> Result<(), IndexPoolError> {
        let checked = self.check_release(index);
        if let Err(err) = &checked {
            warn!("IndexPool: rejected release: {}", err);
        }
        debug_assert!(checked.is_ok(), "invalid IndexPool release: {checked:?}");
        checked?;
        self.free.push(index);
        Ok(())
    }

    /// Whether `index` could be released right now
    pub fn check_release(&self, index: u32) -> Result<(), IndexPoolError> {
        if index >= self.high_water_mark {
            return Err(IndexPoolError::OutOfRange {
                index,
                high_water_mark: self.high_water_mark,
            });
        }
        if self.free.contains(&index) {
            return Err(IndexPoolError::DoubleRelease(index));
        }
        Ok(())
    }

    pub fn is_in_use(&self, index: u32) -> bool {
        index < self.high_water_mark && !self.free.contains(&index)
    }

    /// Number of indices currently handed out
    pub fn in_use(&self) -> usize {
        self.high_water_mark as usize - self.free.len()
    }
}
