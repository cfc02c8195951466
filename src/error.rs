use thiserror::Error;

use crate::services::catalog::TileGroup;

/// Rejected selection requests
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("player count must be between 1 and 4, got {0}")]
    InvalidPlayerCount(u8),

    #[error("max_tries must be at least 1")]
    InvalidRetryBound,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Malformed catalogs or quota tables
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("anchor group {0} has no tiles")]
    EmptyAnchorGroup(TileGroup),

    #[error("tile {0} appears more than once in the catalog")]
    DuplicateTile(String),

    #[error("anchor group {0} cannot carry a quota")]
    QuotaOnAnchor(TileGroup),

    #[error("quota for group {0} must be at least 1")]
    ZeroQuota(TileGroup),
}
