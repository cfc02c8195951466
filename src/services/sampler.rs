use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::CatalogError;
use crate::services::catalog::{Catalog, GroupQuotas};

/// Tile types laid out for one game
pub const TYPES_PER_SELECTION: usize = 10;

/// One pass of the group sampler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    /// Sorted, distinct tile types
    pub types: Vec<String>,
    /// The anchor group's single tile, always present in `types`
    pub anchor: String,
}

impl Draw {
    /// True when the catalog ran out before reaching ten types
    pub fn is_short(&self) -> bool {
        self.types.len() < TYPES_PER_SELECTION
    }
}

/// Draw up to ten distinct tile types under the group quotas.
///
/// One tile comes from the anchor group and is never trimmed. The other
/// groups each contribute `min(quota, size)` tiles; any surplus over ten is
/// removed at random from the non-anchor picks, and any shortfall is topped up
/// from the non-anchor groups in label order. A catalog too small to reach
/// ten yields a short draw rather than an error.
pub fn sample_types<R>(
    catalog: &Catalog,
    quotas: &GroupQuotas,
    rng: &mut R,
) -> Result<Draw, CatalogError>
where
    R: Rng + ?Sized,
{
    let anchor_group = quotas.anchor();
    let anchor = catalog
        .group(anchor_group)
        .choose(rng)
        .cloned()
        .ok_or(CatalogError::EmptyAnchorGroup(anchor_group))?;

    let mut others: Vec<String> = Vec::with_capacity(quotas.total());
    for (group, quota) in quotas.iter() {
        let tiles = catalog.group(group);
        let take = quota.min(tiles.len());
        others.extend(tiles.choose_multiple(rng, take).cloned());
    }

    let wanted = TYPES_PER_SELECTION - 1;
    while others.len() > wanted {
        let evict = rng.gen_range(0..others.len());
        others.swap_remove(evict);
    }

    if others.len() < wanted {
        top_up(catalog, quotas, &mut others, wanted, rng);
    }

    let mut types = others;
    types.push(anchor.clone());
    types.sort();

    if types.len() < TYPES_PER_SELECTION {
        debug!(
            "Catalog exhausted after {} of {} tile types",
            types.len(),
            TYPES_PER_SELECTION
        );
    }

    Ok(Draw { types, anchor })
}

/// Fill `picked` up to `wanted` from unpicked non-anchor tiles, group by group
fn top_up<R>(
    catalog: &Catalog,
    quotas: &GroupQuotas,
    picked: &mut Vec<String>,
    wanted: usize,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    for (group, tiles) in catalog.groups() {
        if group == quotas.anchor() {
            continue;
        }
        let missing = wanted - picked.len();
        if missing == 0 {
            break;
        }

        let mut spare: Vec<&String> = tiles.iter().filter(|t| !picked.contains(t)).collect();
        spare.shuffle(rng);
        let extra: Vec<String> = spare.into_iter().take(missing).cloned().collect();
        picked.extend(extra);
    }
}
