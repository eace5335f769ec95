//! The ordered set of selectable zoom percentages

use crate::types::{Result, ViewerError, ZoomSpec};

/// Distinct numeric zoom levels, sorted ascending. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomCatalog {
    levels: Vec<u32>,
}

impl ZoomCatalog {
    /// Build a catalog from raw percentages. Zero entries are ignored.
    pub fn new(levels: impl IntoIterator<Item = u32>) -> Result<Self> {
        let mut levels: Vec<u32> = levels.into_iter().filter(|level| *level > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        if levels.is_empty() {
            return Err(ViewerError::Config(
                "Zoom catalog needs at least one numeric level".to_string(),
            ));
        }

        Ok(Self { levels })
    }

    /// Derive the catalog from a zoom menu, keeping its numeric entries
    pub fn from_menu(entries: &[ZoomSpec]) -> Result<Self> {
        Self::new(entries.iter().filter_map(|spec| spec.percent()))
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    pub fn min(&self) -> u32 {
        self.levels[0]
    }

    pub fn max(&self) -> u32 {
        self.levels[self.levels.len() - 1]
    }

    pub fn contains(&self, percent: u32) -> bool {
        self.levels.binary_search(&percent).is_ok()
    }

    /// Clamp an arbitrary integer into `[min, max]`
    pub fn clamp(&self, percent: i64) -> u32 {
        percent.clamp(i64::from(self.min()), i64::from(self.max())) as u32
    }

    /// Nearest level strictly above `current`, or the maximum at the top end
    pub fn next_above(&self, current: u32) -> u32 {
        self.levels
            .iter()
            .copied()
            .find(|level| *level > current)
            .unwrap_or_else(|| self.max())
    }

    /// Nearest level strictly below `current`, or the minimum at the bottom end
    pub fn next_below(&self, current: u32) -> u32 {
        self.levels
            .iter()
            .rev()
            .copied()
            .find(|level| *level < current)
            .unwrap_or_else(|| self.min())
    }
}
