//! Interactive API documentation for the ByteForge endpoints.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Mount point of the Swagger UI.
const UI_PATH: &str = "/docs";
/// Path serving the raw OpenAPI document backing the UI.
const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// Serve the Swagger UI together with the generated OpenAPI document.
pub fn router(state: SharedState) -> Router<SharedState> {
    let ui: Router<SharedState> = SwaggerUi::new(UI_PATH)
        .url(OPENAPI_PATH, ApiDoc::openapi())
        .into();

    ui.with_state(state)
}
