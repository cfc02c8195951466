use std::collections::{BTreeMap, HashSet};
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::CatalogError;

/// The six tile groups printed on the back of Shallow Sea tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TileGroup {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl TileGroup {
    pub const ALL: [TileGroup; 6] = [
        TileGroup::A,
        TileGroup::B,
        TileGroup::C,
        TileGroup::D,
        TileGroup::E,
        TileGroup::F,
    ];

    pub fn letter(self) -> char {
        match self {
            TileGroup::A => 'A',
            TileGroup::B => 'B',
            TileGroup::C => 'C',
            TileGroup::D => 'D',
            TileGroup::E => 'E',
            TileGroup::F => 'F',
        }
    }
}

impl fmt::Display for TileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Tile groups of the base game: A1-A4 ... E1-E4, F1-F2
pub const BASE_GROUP_SIZES: [usize; 6] = [4, 4, 4, 4, 4, 2];

/// Tile groups with the expansion mixed in
pub const EXPANSION_GROUP_SIZES: [usize; 6] = [6, 8, 8, 6, 10, 4];

static BASE_CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog::numbered(BASE_GROUP_SIZES));
static EXPANSION_CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog::numbered(EXPANSION_GROUP_SIZES));

/// Tile-type identifiers partitioned by group.
///
/// Identifiers are unique across the whole catalog. Groups the catalog was
/// built without are simply empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    groups: BTreeMap<TileGroup, Vec<String>>,
}

impl Catalog {
    pub fn new<I>(groups: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (TileGroup, Vec<String>)>,
    {
        let mut seen = HashSet::new();
        let mut map: BTreeMap<TileGroup, Vec<String>> = BTreeMap::new();

        for (group, tiles) in groups {
            for tile in tiles {
                if !seen.insert(tile.clone()) {
                    return Err(CatalogError::DuplicateTile(tile));
                }
                map.entry(group).or_default().push(tile);
            }
        }

        Ok(Catalog { groups: map })
    }

    /// Builds `A1..An`, `B1..Bm`, ... from per-group sizes in label order
    pub fn numbered(sizes: [usize; 6]) -> Self {
        let groups: BTreeMap<TileGroup, Vec<String>> = TileGroup::ALL
            .iter()
            .zip(sizes)
            .map(|(&group, size)| {
                let tiles: Vec<String> = (1..=size).map(|i| format!("{}{}", group, i)).collect();
                (group, tiles)
            })
            .collect();

        Catalog { groups }
    }

    pub fn base() -> &'static Catalog {
        &BASE_CATALOG
    }

    pub fn expansion() -> &'static Catalog {
        &EXPANSION_CATALOG
    }

    /// The catalog variant picked by the expansion flag
    pub fn for_variant(use_expansion: bool) -> &'static Catalog {
        if use_expansion {
            Catalog::expansion()
        } else {
            Catalog::base()
        }
    }

    pub fn group(&self, group: TileGroup) -> &[String] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All six groups in label order, empty ones included
    pub fn groups(&self) -> impl Iterator<Item = (TileGroup, &[String])> + '_ {
        TileGroup::ALL.into_iter().map(move |g| (g, self.group(g)))
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn contains(&self, tile: &str) -> bool {
        self.groups.values().any(|tiles| tiles.iter().any(|t| t == tile))
    }

    /// Checks that the catalog can serve the quota table's anchor draw
    pub fn check_quotas(&self, quotas: &GroupQuotas) -> Result<(), CatalogError> {
        if self.group(quotas.anchor()).is_empty() {
            return Err(CatalogError::EmptyAnchorGroup(quotas.anchor()));
        }
        Ok(())
    }
}

/// Per-group draw counts. The anchor group always yields exactly one tile
/// and never appears in the quota map itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupQuotas {
    anchor: TileGroup,
    quotas: BTreeMap<TileGroup, usize>,
}

impl GroupQuotas {
    /// Relaxed constructor for custom catalogs. Quotas of 1 and tables that
    /// leave groups out are allowed; an omitted group contributes nothing
    /// except through the top-up. [`GroupQuotas::standard`] is the game's
    /// own table.
    pub fn new<I>(anchor: TileGroup, quotas: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (TileGroup, usize)>,
    {
        let mut map = BTreeMap::new();
        for (group, quota) in quotas {
            if group == anchor {
                return Err(CatalogError::QuotaOnAnchor(anchor));
            }
            if quota == 0 {
                return Err(CatalogError::ZeroQuota(group));
            }
            map.insert(group, quota);
        }

        Ok(GroupQuotas { anchor, quotas: map })
    }

    /// A=2, B=2, C=3, D=2, E=3 plus one anchor tile from F
    pub fn standard() -> Self {
        GroupQuotas {
            anchor: TileGroup::F,
            quotas: BTreeMap::from([
                (TileGroup::A, 2),
                (TileGroup::B, 2),
                (TileGroup::C, 3),
                (TileGroup::D, 2),
                (TileGroup::E, 3),
            ]),
        }
    }

    pub fn anchor(&self) -> TileGroup {
        self.anchor
    }

    pub fn quota(&self, group: TileGroup) -> usize {
        if group == self.anchor {
            1
        } else {
            self.quotas.get(&group).copied().unwrap_or(0)
        }
    }

    /// Non-anchor quotas in label order
    pub fn iter(&self) -> impl Iterator<Item = (TileGroup, usize)> + '_ {
        self.quotas.iter().map(|(&g, &q)| (g, q))
    }

    /// Sum of all quotas, anchor included
    pub fn total(&self) -> usize {
        self.quotas.values().sum::<usize>() + 1
    }
}

impl Default for GroupQuotas {
    fn default() -> Self {
        GroupQuotas::standard()
    }
}
