use actix_web::{web, HttpResponse};
use emoji_core::validation::parse_asset_key;

use crate::error::{ApiError, Result};
use crate::server::AppState;

const SVG_MIME: &str = "image/svg+xml";

/// `GET /assets/{category}/{file}.svg`
///
/// Serves the stored source markup so the form can preview the original icon.
pub async fn handler(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (category, file) = path.into_inner();
    let requested = format!("{category}/{file}");

    let key = file
        .strip_suffix(".svg")
        .and_then(|id| parse_asset_key(&format!("{category}/{id}")))
        .ok_or_else(|| ApiError::InvalidAssetPath(requested))?;

    let markup = state.pipeline.assets().read(&key).await?;

    Ok(HttpResponse::Ok()
        .content_type(SVG_MIME)
        .body(markup))
}
