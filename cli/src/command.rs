use anyhow::{Context, Result, bail};
use sweeper_protocol::{NewGameRequest, Request, ShowRequest, TurnRequest};

pub const HELP: &str = "\
commands:
  new <width> <height> <mines>   start a game
  move <game-id> <row> <col>     reveal a cell
  show <game-id>                 print a game
  help                           print this message
  quit                           exit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Request(Request),
    Help,
    Quit,
}

impl Command {
    /// Parses one text line, `None` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("new", [width, height, mines]) => Self::Request(Request::NewGame(NewGameRequest {
                width: number(width, "width")?,
                height: number(height, "height")?,
                mine_count: number(mines, "mines")?,
            })),
            ("move", [game_id, row, col]) => Self::Request(Request::Turn(TurnRequest {
                game_id: game_id.to_string(),
                row: number(row, "row")?,
                col: number(col, "col")?,
            })),
            ("show", [game_id]) => Self::Request(Request::Show(ShowRequest {
                game_id: game_id.to_string(),
            })),
            ("help", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            ("new" | "move" | "show" | "help" | "quit" | "exit", _) => {
                bail!("wrong number of arguments for `{name}`, try `help`")
            }
            _ => bail!("unknown command `{name}`, try `help`"),
        };
        Ok(Some(command))
    }
}

fn number(raw: &str, what: &str) -> Result<i64> {
    raw.parse()
        .with_context(|| format!("{what} must be an integer, got `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_requests() {
        assert_eq!(
            Command::parse("new 9 9 10").unwrap(),
            Some(Command::Request(Request::NewGame(NewGameRequest {
                width: 9,
                height: 9,
                mine_count: 10,
            })))
        );
        assert_eq!(
            Command::parse("  move abc 1 -2 ").unwrap(),
            Some(Command::Request(Request::Turn(TurnRequest {
                game_id: "abc".to_string(),
                row: 1,
                col: -2,
            })))
        );
        assert_eq!(
            Command::parse("show abc").unwrap(),
            Some(Command::Request(Request::Show(ShowRequest {
                game_id: "abc".to_string(),
            })))
        );
    }

    #[test]
    fn parses_control_commands() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("help").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(Command::parse("new 9 9").is_err());
        assert!(Command::parse("move abc one 2").is_err());
        assert!(Command::parse("flag abc 1 2").is_err());
    }
}
