use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the arcade backend.
#[openapi(
    info(
        title = "Arcade backend API",
        description = "Account registration, login, per-user game history and the shared scoreboard for the browser arcade."
    ),
    paths(
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::history::append_game_record,
        crate::routes::history::get_game_history,
        crate::routes::scoreboard::get_scoreboard,
        crate::routes::scoreboard::update_highscore,
        crate::routes::health::healthcheck,
    ),
    components(
        schemas(
            crate::dto::auth::RegisterRequest,
            crate::dto::auth::LoginRequest,
            crate::dto::auth::LoginResponse,
            crate::dto::common::MessageResponse,
            crate::dto::history::GameRecordInput,
            crate::dto::history::GameRecordView,
            crate::dto::scoreboard::ScoreboardEntry,
            crate::dto::scoreboard::HighscoreUpdateRequest,
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "history", description = "Game history writes and reads"),
        (name = "scoreboard", description = "Scoreboard and highscore updates"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
