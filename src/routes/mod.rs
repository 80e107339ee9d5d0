use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

pub mod auth;
pub mod health;
pub mod history;
pub mod scoreboard;

/// Compose the API route trees plus the Swagger UI into the final router.
pub fn router(state: SharedState) -> Router<()> {
    let swagger: Router<SharedState> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    auth::router()
        .merge(history::router())
        .merge(scoreboard::router())
        .merge(health::router())
        .merge(swagger)
        .with_state(state)
}
