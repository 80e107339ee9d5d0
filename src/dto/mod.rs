pub mod auth;
pub mod common;
pub mod health;
pub mod history;
pub mod scoreboard;
