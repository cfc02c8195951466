use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Tiles that only ever score coral
pub const CORAL_TILES: [&str; 17] = [
    "A1", "A2", "A5", "B1", "B3", "B5", "B7", "C1", "C2", "C3", "D1", "D2", "E1", "E2", "E9",
    "F1", "F2",
];

/// Tiles that only ever score fish
pub const FISH_TILES: [&str; 16] = [
    "A3", "A4", "B2", "B4", "B6", "B8", "C4", "C5", "C6", "D3", "D4", "E3", "E4", "E10", "F3",
    "F4",
];

static CORAL_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| CORAL_TILES.into_iter().collect());
static FISH_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| FISH_TILES.into_iter().collect());

/// Which resource a tile type favors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Coral,
    Fish,
    Both,
}

/// Maps a tile-type identifier to its resource category. Must be total.
pub trait Classifier {
    fn classify(&self, tile: &str) -> Category;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> Category,
{
    fn classify(&self, tile: &str) -> Category {
        self(tile)
    }
}

/// The Shallow Sea resource table, shared by the base and expansion catalogs
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceTable;

impl Classifier for ResourceTable {
    fn classify(&self, tile: &str) -> Category {
        classify_tile(tile)
    }
}

/// Anything outside the coral and fish sets counts as both
pub fn classify_tile(tile: &str) -> Category {
    if CORAL_SET.contains(tile) {
        Category::Coral
    } else if FISH_SET.contains(tile) {
        Category::Fish
    } else {
        Category::Both
    }
}

/// Per-category tallies over a list of tiles or tile types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub coral: usize,
    pub fish: usize,
    pub both: usize,
}

impl CategoryCounts {
    pub fn tally<'a, C, I>(tiles: I, classifier: &C) -> Self
    where
        C: Classifier + ?Sized,
        I: IntoIterator<Item = &'a String>,
    {
        let mut counts = CategoryCounts::default();
        for tile in tiles {
            match classifier.classify(tile) {
                Category::Coral => counts.coral += 1,
                Category::Fish => counts.fish += 1,
                Category::Both => counts.both += 1,
            }
        }
        counts
    }

    /// Coral/fish difference; neutral tiles do not count
    pub fn imbalance(&self) -> usize {
        self.coral.abs_diff(self.fish)
    }

    pub fn total(&self) -> usize {
        self.coral + self.fish + self.both
    }
}
