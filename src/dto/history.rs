use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::GameRecordEntity;

/// Payload for `POST /game_history`.
///
/// The wire field names (`zaidimas`, `pc`, `laimetojas`) are what the browser
/// client sends and are kept verbatim for compatibility.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GameRecordInput {
    /// Owning user id. Not checked against the users table.
    pub user_id: i64,
    /// Name of the game that was played.
    #[serde(rename = "zaidimas")]
    pub game: String,
    /// Opponent identifier.
    #[serde(rename = "pc")]
    pub opponent: String,
    /// Identifier of the winning side.
    #[serde(rename = "laimetojas")]
    pub winner: String,
}

/// Single entry of the `GET /game_history/{user_id}` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameRecordView {
    /// Record id in storage order.
    pub id: i64,
    /// Name of the game that was played.
    #[serde(rename = "zaidimas")]
    pub game: String,
    /// Opponent identifier.
    #[serde(rename = "pc")]
    pub opponent: String,
    /// Identifier of the winning side.
    #[serde(rename = "laimetojas")]
    pub winner: String,
}

impl From<GameRecordEntity> for GameRecordView {
    fn from(entity: GameRecordEntity) -> Self {
        Self {
            id: entity.id,
            game: entity.game,
            opponent: entity.opponent,
            winner: entity.winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names_match_the_browser_client() {
        let input: GameRecordInput = serde_json::from_str(
            r#"{"user_id": 7, "zaidimas": "snake", "pc": "pc", "laimetojas": "pc"}"#,
        )
        .unwrap();
        assert_eq!(input.game, "snake");

        let view = GameRecordView {
            id: 1,
            game: "snake".to_string(),
            opponent: "pc".to_string(),
            winner: "zaidejas".to_string(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["zaidimas"], "snake");
        assert_eq!(json["pc"], "pc");
        assert_eq!(json["laimetojas"], "zaidejas");
    }
}
