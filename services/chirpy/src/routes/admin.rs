//! Admin and health endpoints

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
};

/// Render the admin metrics page
pub fn metrics_page(hits: u64) -> String {
    format!(
        "<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>",
        hits
    )
}

/// GET /admin/metrics
pub async fn metrics(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        metrics_page(state.file_server_hits.load()),
    )
        .into_response()
}

/// POST /admin/reset, only honoured on the dev platform
pub async fn reset(State(state): State<AppState>) -> ApiResult<Response> {
    if !state.platform.is_dev() {
        warn!("Reset refused on platform {:?}", state.platform);
        return Err(ApiError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    state.file_server_hits.reset();
    state.repository.reset_users().await.map_err(|e| {
        error!("Failed to reset users: {}", e);
        ApiError::Forbidden("Can't reset the db with your permissions".to_string())
    })?;

    info!("Hit counter and database reset");
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Hits reset to 0 and db reset",
    )
        .into_response())
}

/// GET /api/healthz
pub async fn healthz() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "OK",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_page_embeds_count() {
        let page = metrics_page(42);
        assert!(page.contains("<h1>Welcome, Chirpy Admin</h1>"));
        assert!(page.contains("Chirpy has been visited 42 times!"));
    }
}
