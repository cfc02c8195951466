use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::SelectionError;
use crate::services::catalog::{Catalog, GroupQuotas};
use crate::services::random::RandomSource;
use crate::services::sampler::{sample_types, Draw};
use crate::services::tile_classifier::{CategoryCounts, Classifier, ResourceTable};

pub const DEFAULT_MAX_TRIES: usize = 5000;

/// Physical copies of each selected type, by player count
pub fn copies_for_players(player_count: u8) -> Result<usize, SelectionError> {
    match player_count {
        1 | 2 => Ok(2),
        3 => Ok(3),
        4 => Ok(4),
        other => Err(SelectionError::InvalidPlayerCount(other)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionParams {
    pub player_count: u8,
    /// Largest coral/fish type difference a draw may have
    pub tolerance: usize,
    pub max_tries: usize,
}

impl SelectionParams {
    pub fn new(player_count: u8, tolerance: usize) -> Self {
        SelectionParams {
            player_count,
            tolerance,
            max_tries: DEFAULT_MAX_TRIES,
        }
    }

    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }
}

/// How a selection ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStatus {
    /// Ten types within tolerance
    Accepted,
    /// Every try missed the tolerance; the last draw was kept
    Unbalanced,
    /// The catalog could not supply ten types; see `Selection::balanced`
    Incomplete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Sorted tile types
    pub types: Vec<String>,
    /// Every type repeated `copies` times, shuffled
    pub tiles: Vec<String>,
    pub copies: usize,
    pub anchor: String,
    /// Draws made, the returned one included
    pub tries: usize,
    /// Whether the returned types are within tolerance, independent of status
    pub balanced: bool,
    pub status: SelectionStatus,
}

impl Selection {
    pub fn is_accepted(&self) -> bool {
        self.status == SelectionStatus::Accepted
    }
}

/// Draw tile types until their coral/fish difference fits the tolerance.
///
/// Gives up after `max_tries` draws and returns the last one tagged
/// [`SelectionStatus::Unbalanced`]. The accepted types are expanded into
/// `copies` physical tiles each and shuffled with the same generator, so a
/// seeded `rng` reproduces both lists exactly.
pub fn select_balanced<C, R>(
    params: &SelectionParams,
    catalog: &Catalog,
    quotas: &GroupQuotas,
    classifier: &C,
    rng: &mut R,
) -> Result<Selection, SelectionError>
where
    C: Classifier + ?Sized,
    R: Rng + ?Sized,
{
    let copies = copies_for_players(params.player_count)?;
    if params.max_tries == 0 {
        return Err(SelectionError::InvalidRetryBound);
    }
    catalog.check_quotas(quotas)?;

    let mut tries = 0;
    let (draw, balanced) = loop {
        tries += 1;
        let draw = sample_types(catalog, quotas, rng)?;
        let imbalance = CategoryCounts::tally(&draw.types, classifier).imbalance();

        if imbalance <= params.tolerance {
            break (draw, true);
        }
        if tries >= params.max_tries {
            break (draw, false);
        }
        debug!(
            "Rejected draw {} with imbalance {} (tolerance {})",
            tries, imbalance, params.tolerance
        );
    };

    let status = if draw.is_short() {
        warn!(
            "Catalog only supplied {} tile types (balanced: {})",
            draw.types.len(),
            balanced
        );
        SelectionStatus::Incomplete
    } else if balanced {
        info!("Accepted draw after {} tries", tries);
        SelectionStatus::Accepted
    } else {
        warn!(
            "No draw within tolerance {} after {} tries, keeping the last one",
            params.tolerance, tries
        );
        SelectionStatus::Unbalanced
    };

    let Draw { types, anchor } = draw;
    let tiles = build_tile_list(&types, copies, rng);

    Ok(Selection {
        types,
        tiles,
        copies,
        anchor,
        tries,
        balanced,
        status,
    })
}

/// Runs [`select_balanced`] with a generator built from `source`
pub fn select_with_source<C>(
    params: &SelectionParams,
    catalog: &Catalog,
    quotas: &GroupQuotas,
    classifier: &C,
    source: RandomSource,
) -> Result<Selection, SelectionError>
where
    C: Classifier + ?Sized,
{
    let mut rng = source.into_rng();
    select_balanced(params, catalog, quotas, classifier, rng.as_mut())
}

/// Standard quotas and resource table over the base or expansion catalog
pub fn select_tiles(
    params: &SelectionParams,
    use_expansion: bool,
    seed: Option<u64>,
) -> Result<Selection, SelectionError> {
    select_with_source(
        params,
        Catalog::for_variant(use_expansion),
        &GroupQuotas::standard(),
        &ResourceTable,
        RandomSource::from_seed(seed),
    )
}

/// Repeat each type `copies` times and shuffle the result
pub fn build_tile_list<R>(types: &[String], copies: usize, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let mut tiles = Vec::with_capacity(types.len() * copies);
    for tile in types {
        tiles.extend(std::iter::repeat(tile.clone()).take(copies));
    }
    tiles.shuffle(rng);
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::TileGroup;
    use crate::services::sampler::TYPES_PER_SELECTION;
    use crate::services::tile_classifier::Category;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn assert_expansion(selection: &Selection) {
        assert_eq!(selection.tiles.len(), selection.types.len() * selection.copies);
        for tile in &selection.types {
            let count = selection.tiles.iter().filter(|t| *t == tile).count();
            assert_eq!(count, selection.copies, "{} has the wrong number of copies", tile);
        }
        assert!(selection.tiles.iter().all(|t| selection.types.contains(t)));
    }

    #[test]
    fn test_copies_for_players() {
        assert_eq!(copies_for_players(1), Ok(2));
        assert_eq!(copies_for_players(2), Ok(2));
        assert_eq!(copies_for_players(3), Ok(3));
        assert_eq!(copies_for_players(4), Ok(4));
        assert_eq!(copies_for_players(0), Err(SelectionError::InvalidPlayerCount(0)));
        assert_eq!(copies_for_players(5), Err(SelectionError::InvalidPlayerCount(5)));
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert_eq!(
            select_tiles(&SelectionParams::new(0, 1), false, Some(1)),
            Err(SelectionError::InvalidPlayerCount(0))
        );
        assert_eq!(
            select_tiles(&SelectionParams::new(2, 1).with_max_tries(0), false, Some(1)),
            Err(SelectionError::InvalidRetryBound)
        );
    }

    #[test]
    fn test_structure_for_every_player_count() {
        for players in 1..=4 {
            for use_expansion in [false, true] {
                let params = SelectionParams::new(players, 1);
                let selection = select_tiles(&params, use_expansion, Some(players as u64)).unwrap();
                assert_eq!(selection.types.len(), TYPES_PER_SELECTION);
                let unique: HashSet<_> = selection.types.iter().collect();
                assert_eq!(unique.len(), TYPES_PER_SELECTION);
                assert_eq!(selection.copies, copies_for_players(players).unwrap());
                assert_expansion(&selection);
            }
        }
    }

    #[test]
    fn test_four_players_get_four_copies() {
        let selection = select_tiles(&SelectionParams::new(4, 2), true, Some(8)).unwrap();
        assert_eq!(selection.copies, 4);
        assert_eq!(selection.tiles.len(), 40);
        assert_expansion(&selection);
    }

    #[test]
    fn test_accepted_draws_respect_tolerance() {
        for tolerance in 0..=3 {
            for seed in 0..20 {
                let params = SelectionParams::new(3, tolerance);
                let selection = select_tiles(&params, seed % 2 == 0, Some(seed)).unwrap();
                assert!(selection.is_accepted());
                assert!(selection.balanced);
                let counts = CategoryCounts::tally(&selection.types, &ResourceTable);
                assert!(counts.imbalance() <= tolerance);
            }
        }
    }

    #[test]
    fn test_zero_tolerance_terminates_on_default_catalogs() {
        for use_expansion in [false, true] {
            for seed in 0..50 {
                let selection = select_tiles(&SelectionParams::new(2, 0), use_expansion, Some(seed)).unwrap();
                assert_eq!(selection.status, SelectionStatus::Accepted);
                assert!(selection.tries < DEFAULT_MAX_TRIES);
                let counts = CategoryCounts::tally(&selection.types, &ResourceTable);
                assert_eq!(counts.imbalance(), 0);
            }
        }
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let params = SelectionParams::new(2, 5);
        let first = select_tiles(&params, false, Some(42)).unwrap();
        let second = select_tiles(&params, false, Some(42)).unwrap();
        assert_eq!(first.types, second.types);
        assert_eq!(first.tiles, second.tiles);
        assert_eq!(first.tries, second.tries);
    }

    #[test]
    fn test_anchor_survives_selection() {
        for seed in 0..100 {
            let selection = select_tiles(&SelectionParams::new(2, 1), true, Some(seed)).unwrap();
            assert!(selection.anchor.starts_with('F'));
            assert!(selection.types.contains(&selection.anchor));
        }
    }

    #[test]
    fn test_exhausted_tries_return_last_draw() {
        let everything_coral = |_: &str| Category::Coral;
        let params = SelectionParams::new(2, 0).with_max_tries(25);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let selection = select_balanced(
            &params,
            Catalog::base(),
            &GroupQuotas::standard(),
            &everything_coral,
            &mut rng,
        )
        .unwrap();

        assert_eq!(selection.status, SelectionStatus::Unbalanced);
        assert!(!selection.is_accepted());
        assert!(!selection.balanced);
        assert_eq!(selection.tries, 25);
        assert_eq!(selection.types.len(), TYPES_PER_SELECTION);
        assert_expansion(&selection);
    }

    #[test]
    fn test_tiny_catalog_is_incomplete_not_an_error() {
        let owned = |ids: &[&str]| ids.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        let catalog = Catalog::new(vec![
            (TileGroup::A, owned(&["A1"])),
            (TileGroup::B, owned(&["B2"])),
            (TileGroup::C, owned(&["C1"])),
            (TileGroup::D, owned(&["D3"])),
            (TileGroup::E, owned(&["E5"])),
            (TileGroup::F, owned(&["F1"])),
        ])
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let selection = select_balanced(
            &SelectionParams::new(3, 5),
            &catalog,
            &GroupQuotas::standard(),
            &ResourceTable,
            &mut rng,
        )
        .unwrap();

        assert_eq!(selection.status, SelectionStatus::Incomplete);
        assert!(selection.balanced);
        assert_eq!(selection.types.len(), 6);
        assert_eq!(selection.tiles.len(), 18);
        assert_expansion(&selection);
    }

    #[test]
    fn test_short_draw_keeps_balance_outcome() {
        let catalog = Catalog::new(vec![
            (TileGroup::A, vec!["A1".to_string()]),
            (TileGroup::F, vec!["F1".to_string()]),
        ])
        .unwrap();
        let everything_coral = |_: &str| Category::Coral;
        let coral_or_fish = |tile: &str| {
            if tile.starts_with('A') {
                Category::Fish
            } else {
                Category::Coral
            }
        };

        let unbalanced = select_balanced(
            &SelectionParams::new(2, 0).with_max_tries(3),
            &catalog,
            &GroupQuotas::standard(),
            &everything_coral,
            &mut ChaCha8Rng::seed_from_u64(1),
        )
        .unwrap();
        let balanced = select_balanced(
            &SelectionParams::new(2, 0).with_max_tries(1),
            &catalog,
            &GroupQuotas::standard(),
            &coral_or_fish,
            &mut ChaCha8Rng::seed_from_u64(1),
        )
        .unwrap();

        assert_eq!(unbalanced.status, SelectionStatus::Incomplete);
        assert_eq!(unbalanced.tries, 3);
        assert!(!unbalanced.balanced);

        assert_eq!(balanced.status, SelectionStatus::Incomplete);
        assert_eq!(balanced.tries, 1);
        assert!(balanced.balanced);
    }

    #[test]
    fn test_empty_anchor_group_fails() {
        let catalog = Catalog::new(vec![(TileGroup::A, vec!["A1".to_string()])]).unwrap();
        let result = select_with_source(
            &SelectionParams::new(2, 1),
            &catalog,
            &GroupQuotas::standard(),
            &ResourceTable,
            RandomSource::Seeded(1),
        );
        assert!(matches!(result, Err(SelectionError::Catalog(_))));
    }

    #[test]
    fn test_unseeded_sources_still_select() {
        let params = SelectionParams::new(1, 2);
        for source in [RandomSource::Entropy, RandomSource::Shared] {
            let selection =
                select_with_source(&params, Catalog::base(), &GroupQuotas::standard(), &ResourceTable, source)
                    .unwrap();
            assert_eq!(selection.types.len(), TYPES_PER_SELECTION);
            assert_expansion(&selection);
        }
    }

    #[test]
    fn test_build_tile_list() {
        let types = vec!["A1".to_string(), "B2".to_string(), "C3".to_string()];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let tiles = build_tile_list(&types, 3, &mut rng);
        assert_eq!(tiles.len(), 9);
        for tile in &types {
            assert_eq!(tiles.iter().filter(|t| *t == tile).count(), 3);
        }
    }
}
