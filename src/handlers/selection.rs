use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use chrono::{SecondsFormat, Utc};
use log::{info, warn};

use crate::handlers::{accept_language, bad_request};
use crate::models::{
    AppState, Distribution, SelectQuery, SelectionResponse, DEFAULT_TOLERANCE,
};
use crate::services::catalog::Catalog;
use crate::services::localization::Language;
use crate::services::random::RandomSource;
use crate::services::selector::{select_with_source, SelectionParams};
use crate::services::tile_classifier::{CategoryCounts, ResourceTable};
use crate::utils::{parse_flag, parse_seed};

fn select_logic(data: &web::Data<AppState>, query: SelectQuery, req: &HttpRequest) -> HttpResponse {
    let language = Language::resolve(query.lang.as_deref(), accept_language(req));
    let labels = language.labels();

    let tolerance = query.tolerance.unwrap_or(DEFAULT_TOLERANCE);
    if tolerance > data.max_tolerance {
        return bad_request(format!(
            "tolerance must be between 0 and {}, got {}",
            data.max_tolerance, tolerance
        ));
    }

    let use_expansion = query.expansion.as_deref().map(parse_flag).unwrap_or(false)
        || query.mode.as_deref().map(str::trim) == Some("2");

    // Unseeded requests still get a seed so the result can be shared
    let source = match parse_seed(query.seed.as_deref()) {
        Some(seed) => RandomSource::Seeded(seed),
        None if data.shared_rng => RandomSource::Shared,
        None => RandomSource::Seeded(rand::random()),
    };

    let params = SelectionParams::new(query.players, tolerance).with_max_tries(data.max_tries);
    let catalog = Catalog::for_variant(use_expansion);

    let selection = match select_with_source(&params, catalog, &data.quotas, &ResourceTable, source) {
        Ok(selection) => selection,
        Err(e) => {
            warn!("Rejected selection request: {}", e);
            return bad_request(e.to_string());
        }
    };

    info!(
        "Selected {} types / {} tiles for {} players (expansion: {}, tolerance: {}, status: {:?}, tries: {})",
        selection.types.len(),
        selection.tiles.len(),
        query.players,
        use_expansion,
        tolerance,
        selection.status,
        selection.tries
    );

    let distribution = Distribution {
        types: CategoryCounts::tally(&selection.types, &ResourceTable).into(),
        tiles: CategoryCounts::tally(&selection.tiles, &ResourceTable).into(),
    };

    HttpResponse::Ok().json(SelectionResponse {
        players: query.players,
        copies: selection.copies,
        expansion: use_expansion,
        tolerance,
        seed: source.seed(),
        status: selection.status,
        balanced: selection.balanced,
        tries: selection.tries,
        types: selection.types,
        tiles: selection.tiles,
        distribution,
        language,
        labels,
        heading: labels.selected_heading(query.players),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

#[get("/select")]
pub async fn select_get(
    data: web::Data<AppState>,
    query: web::Query<SelectQuery>,
    req: HttpRequest,
) -> impl Responder {
    select_logic(&data, query.into_inner(), &req)
}

#[post("/select")]
pub async fn select_post(
    data: web::Data<AppState>,
    form: web::Form<SelectQuery>,
    req: HttpRequest,
) -> impl Responder {
    select_logic(&data, form.into_inner(), &req)
}
