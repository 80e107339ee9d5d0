/// Registration and login logic, including password hashing.
pub mod auth_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Game history append and read logic.
pub mod history_service;
/// Health check service.
pub mod health_service;
/// Scoreboard listing and highscore update logic.
pub mod scoreboard_service;
/// Primary storage reconnection loop for the strict policy.
pub mod storage_supervisor;
