//! Wire types for the game boundary: what a transport receives, and what it
//! sends back. Every outcome of a move, won, lost or ongoing, uses the same
//! [`GameResponse`] shape.

use serde::{Deserialize, Serialize};
use sweeper_core::{CellCount, Coord, GameError, GameId, GameView, Registry};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameRequest {
    pub width: i64,
    pub height: i64,
    pub mine_count: i64,
}

impl NewGameRequest {
    pub fn handle(&self, registry: &Registry) -> Result<GameResponse, ErrorResponse> {
        let width = Coord::try_from(self.width)
            .map_err(|_| GameError::InvalidParameters("width out of range"))?;
        let height = Coord::try_from(self.height)
            .map_err(|_| GameError::InvalidParameters("height out of range"))?;
        let mines = CellCount::try_from(self.mine_count)
            .map_err(|_| GameError::InvalidParameters("mine count out of range"))?;

        let view = registry.new_game(width, height, mines)?;
        Ok(GameResponse::from(&view))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub game_id: String,
    pub row: i64,
    pub col: i64,
}

impl TurnRequest {
    pub fn handle(&self, registry: &Registry) -> Result<GameResponse, ErrorResponse> {
        let id = parse_game_id(&self.game_id)?;
        let view = registry.make_move(id, (clamp_coord(self.row), clamp_coord(self.col)))?;
        Ok(GameResponse::from(&view))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowRequest {
    pub game_id: String,
}

impl ShowRequest {
    pub fn handle(&self, registry: &Registry) -> Result<GameResponse, ErrorResponse> {
        let id = parse_game_id(&self.game_id)?;
        let view = registry.view(id)?;
        Ok(GameResponse::from(&view))
    }
}

/// Unified view of a game, `field` has `height` rows of `width` markers:
/// `' '` hidden, `'0'..='8'` revealed, `'X'` exploded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub game_id: String,
    pub width: Coord,
    pub height: Coord,
    pub mine_count: CellCount,
    pub grid: Vec<Vec<char>>,
    pub completed: bool,
}

impl From<&GameView> for GameResponse {
    fn from(view: &GameView) -> Self {
        Self {
            game_id: view.id.to_string(),
            width: view.width,
            height: view.height,
            mine_count: view.mine_count,
            grid: view.marker_rows(),
            completed: view.completed(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidParameters,
    GameNotFound,
    GameAlreadyCompleted,
    OutOfBounds,
    /// The request itself could not be decoded.
    BadRequest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub detail: String,
}

impl ErrorResponse {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::BadRequest,
            detail: detail.into(),
        }
    }
}

impl From<GameError> for ErrorResponse {
    fn from(err: GameError) -> Self {
        let kind = match err {
            GameError::InvalidParameters(_) => ErrorKind::InvalidParameters,
            GameError::GameNotFound(_) => ErrorKind::GameNotFound,
            GameError::GameAlreadyCompleted => ErrorKind::GameAlreadyCompleted,
            GameError::OutOfBounds => ErrorKind::OutOfBounds,
        };
        Self {
            kind,
            detail: err.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    NewGame(NewGameRequest),
    Turn(TurnRequest),
    Show(ShowRequest),
}

impl Request {
    pub fn handle(&self, registry: &Registry) -> Response {
        let result = match self {
            Self::NewGame(request) => request.handle(registry),
            Self::Turn(request) => request.handle(registry),
            Self::Show(request) => request.handle(registry),
        };
        result.into()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Game(GameResponse),
    Error(ErrorResponse),
}

impl From<Result<GameResponse, ErrorResponse>> for Response {
    fn from(result: Result<GameResponse, ErrorResponse>) -> Self {
        match result {
            Ok(game) => Self::Game(game),
            Err(err) => Self::Error(err),
        }
    }
}

/// Decodes one JSON request, runs it and encodes the response.
pub fn handle_json(registry: &Registry, line: &str) -> serde_json::Result<String> {
    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => request.handle(registry),
        Err(err) => {
            log::debug!("Undecodable request: {}", err);
            Response::Error(ErrorResponse::bad_request(err.to_string()))
        }
    };
    serde_json::to_string(&response)
}

/// Ids that are not UUIDs can never name a game.
fn parse_game_id(raw: &str) -> Result<GameId, ErrorResponse> {
    raw.parse().map_err(|_| ErrorResponse {
        kind: ErrorKind::GameNotFound,
        detail: format!("Game {} not found", raw),
    })
}

/// Boards never reach `Coord::MAX`, so anything unrepresentable stays out of
/// bounds and the completion check still runs first.
fn clamp_coord(value: i64) -> Coord {
    Coord::try_from(value).unwrap_or(Coord::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sweeper_core::RegistryConfig;

    fn registry() -> Registry {
        Registry::new(RegistryConfig { seed: Some(3) })
    }

    fn new_game(registry: &Registry, width: i64, height: i64, mine_count: i64) -> GameResponse {
        NewGameRequest {
            width,
            height,
            mine_count,
        }
        .handle(registry)
        .unwrap()
    }

    fn turn(registry: &Registry, game_id: &str, row: i64, col: i64) -> Result<GameResponse, ErrorResponse> {
        TurnRequest {
            game_id: game_id.to_string(),
            row,
            col,
        }
        .handle(registry)
    }

    #[test]
    fn new_game_response_is_blank() {
        let registry = registry();

        let game = new_game(&registry, 3, 2, 1);

        assert_eq!(game.width, 3);
        assert_eq!(game.height, 2);
        assert_eq!(game.mine_count, 1);
        assert_eq!(game.grid, vec![vec![' '; 3]; 2]);
        assert!(!game.completed);
    }

    #[test]
    fn invalid_dimensions_map_to_invalid_parameters() {
        let registry = registry();

        for (width, height, mine_count) in [(-1, 3, 0), (3, 1000, 0), (31, 3, 0), (3, 3, 9), (3, 3, -2)] {
            let err = NewGameRequest {
                width,
                height,
                mine_count,
            }
            .handle(&registry)
            .unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidParameters);
        }
    }

    #[test]
    fn row_of_three_wins_in_one_move() {
        let registry = registry();
        let game = new_game(&registry, 3, 1, 0);

        let game = turn(&registry, &game.game_id, 0, 0).unwrap();

        assert_eq!(game.grid, vec![vec!['0', '0', '0']]);
        assert!(game.completed);
    }

    #[test]
    fn errors_are_distinguishable() {
        let registry = registry();
        let game = new_game(&registry, 2, 2, 0);

        assert_eq!(
            turn(&registry, &game.game_id, -1, 0).unwrap_err().kind,
            ErrorKind::OutOfBounds
        );
        assert_eq!(
            turn(&registry, &game.game_id, 0, 2).unwrap_err().kind,
            ErrorKind::OutOfBounds
        );
        turn(&registry, &game.game_id, 0, 0).unwrap();
        assert_eq!(
            turn(&registry, &game.game_id, 0, 0).unwrap_err().kind,
            ErrorKind::GameAlreadyCompleted
        );
        assert_eq!(
            turn(&registry, &game.game_id, -5, 0).unwrap_err().kind,
            ErrorKind::GameAlreadyCompleted
        );
        assert_eq!(
            turn(&registry, &GameId::random().to_string(), 0, 0).unwrap_err().kind,
            ErrorKind::GameNotFound
        );
        assert_eq!(
            turn(&registry, "garbage", 0, 0).unwrap_err().kind,
            ErrorKind::GameNotFound
        );
    }

    #[test]
    fn show_returns_current_state() {
        let registry = registry();
        let game = new_game(&registry, 2, 1, 0);
        let played = turn(&registry, &game.game_id, 0, 1).unwrap();

        let shown = ShowRequest {
            game_id: game.game_id.clone(),
        }
        .handle(&registry)
        .unwrap();

        assert_eq!(shown, played);
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let registry = registry();
        let game = new_game(&registry, 2, 1, 0);

        let value = serde_json::to_value(Response::Game(game.clone())).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "game",
                "gameId": game.game_id,
                "width": 2,
                "height": 1,
                "mineCount": 0,
                "grid": [[" ", " "]],
                "completed": false,
            })
        );
    }

    #[test]
    fn handle_json_dispatches_requests() {
        let registry = registry();

        let created = handle_json(
            &registry,
            r#"{"type":"new_game","width":3,"height":1,"mineCount":0}"#,
        )
        .unwrap();
        let Response::Game(game) = serde_json::from_str::<Response>(&created).unwrap() else {
            panic!("expected a game response: {created}");
        };

        let played = handle_json(
            &registry,
            &json!({"type": "turn", "gameId": game.game_id, "row": 0, "col": 2}).to_string(),
        )
        .unwrap();
        let Response::Game(game) = serde_json::from_str::<Response>(&played).unwrap() else {
            panic!("expected a game response: {played}");
        };
        assert!(game.completed);
    }

    #[test]
    fn handle_json_reports_bad_requests() {
        let registry = registry();

        let response = handle_json(&registry, "{not json").unwrap();
        let Response::Error(err) = serde_json::from_str::<Response>(&response).unwrap() else {
            panic!("expected an error response: {response}");
        };

        assert_eq!(err.kind, ErrorKind::BadRequest);
    }

    #[test]
    fn error_json_shape() {
        let err = ErrorResponse::from(GameError::GameAlreadyCompleted);

        assert_eq!(
            serde_json::to_value(Response::Error(err)).unwrap(),
            json!({
                "type": "error",
                "kind": "game_already_completed",
                "detail": "Game already completed, no new moves are accepted",
            })
        );
    }
}
