use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::info;

use crate::handlers::{accept_language, bad_request};
use crate::models::{AppState, CatalogResponse, GroupInfo, LangInfo, LangQuery, TileInfo};
use crate::services::catalog::Catalog;
use crate::services::localization::Language;
use crate::services::tile_classifier::classify_tile;
use crate::utils::parse_variant;

#[get("/langs")]
pub async fn get_langs() -> impl Responder {
    let langs: Vec<LangInfo> = Language::ALL
        .iter()
        .map(|lang| LangInfo {
            name: lang.name().to_string(),
            code: lang.code().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(langs)
}

#[get("/catalog/{variant}")]
pub async fn get_catalog(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LangQuery>,
    req: HttpRequest,
) -> impl Responder {
    let variant = path.into_inner().to_lowercase();
    let use_expansion = match parse_variant(&variant) {
        Some(flag) => flag,
        None => return bad_request(format!("Unknown catalog variant '{}'", variant)),
    };

    let catalog = Catalog::for_variant(use_expansion);
    let labels = Language::resolve(query.lang.as_deref(), accept_language(&req)).labels();

    let groups: Vec<GroupInfo> = catalog
        .groups()
        .map(|(group, tiles)| GroupInfo {
            group,
            quota: data.quotas.quota(group),
            tiles: tiles
                .iter()
                .map(|id| {
                    let category = classify_tile(id);
                    TileInfo {
                        id: id.clone(),
                        category,
                        label: labels.category(category),
                    }
                })
                .collect(),
        })
        .collect();

    info!("Served {} catalog with {} tiles", variant, catalog.len());

    HttpResponse::Ok().json(CatalogResponse {
        variant,
        anchor: data.quotas.anchor(),
        total: catalog.len(),
        groups,
    })
}
