use serde::{Deserialize, Serialize};

use crate::services::catalog::{GroupQuotas, TileGroup};
use crate::services::localization::{Labels, Language};
use crate::services::selector::{SelectionStatus, DEFAULT_MAX_TRIES};
use crate::services::tile_classifier::{Category, CategoryCounts};

pub const DEFAULT_TOLERANCE: usize = 1;
pub const DEFAULT_MAX_TOLERANCE: usize = 5;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub quotas: GroupQuotas,
    pub max_tries: usize,
    pub max_tolerance: usize,
    /// Unseeded requests draw from the shared thread-local generator
    /// instead of getting a fresh, echoed seed
    pub shared_rng: bool,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            quotas: GroupQuotas::standard(),
            max_tries: DEFAULT_MAX_TRIES,
            max_tolerance: DEFAULT_MAX_TOLERANCE,
            shared_rng: false,
        }
    }
}

#[derive(Serialize)]
pub struct LangInfo {
    pub name: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct SelectQuery {
    pub players: u8,
    pub expansion: Option<String>,
    /// Game mode as the selection form posts it: `1` base, `2` with expansion
    pub mode: Option<String>,
    pub tolerance: Option<usize>,
    /// Kept as text: anything that is not a number means "no seed"
    pub seed: Option<String>,
    pub lang: Option<String>,
}

#[derive(Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionEntry {
    pub coral: usize,
    pub fish: usize,
    pub both: usize,
    pub total: usize,
    pub imbalance: usize,
}

impl From<CategoryCounts> for DistributionEntry {
    fn from(counts: CategoryCounts) -> Self {
        DistributionEntry {
            coral: counts.coral,
            fish: counts.fish,
            both: counts.both,
            total: counts.total(),
            imbalance: counts.imbalance(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Distribution {
    pub types: DistributionEntry,
    pub tiles: DistributionEntry,
}

#[derive(Serialize)]
pub struct SelectionResponse {
    pub players: u8,
    pub copies: usize,
    pub expansion: bool,
    pub tolerance: usize,
    /// Replaying the request with this seed reproduces the selection
    pub seed: Option<u64>,
    pub status: SelectionStatus,
    /// Coral/fish difference of `types` is within `tolerance`
    pub balanced: bool,
    pub tries: usize,
    pub types: Vec<String>,
    pub tiles: Vec<String>,
    pub distribution: Distribution,
    pub language: Language,
    pub labels: &'static Labels,
    pub heading: String,
    pub generated_at: String,
}

#[derive(Serialize)]
pub struct TileInfo {
    pub id: String,
    pub category: Category,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct GroupInfo {
    pub group: TileGroup,
    pub quota: usize,
    pub tiles: Vec<TileInfo>,
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub variant: String,
    pub anchor: TileGroup,
    pub total: usize,
    pub groups: Vec<GroupInfo>,
}
