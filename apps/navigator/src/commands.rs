//! Line commands accepted by the interactive navigator.

pub const HELP: &str = "\
commands:
  route <start> <end>   find a route (quote names with spaces, \"\" for an empty name)
  map                   reload the building map
  show                  print the current route and map
  help                  show this help
  quit | exit           leave the navigator";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Route { start: String, end: String },
    Map,
    Show,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = split_words(line)?.into_iter();
    let Some(name) = words.next() else {
        return Ok(Command::Empty);
    };
    let rest: Vec<String> = words.collect();

    match (name.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("route", [start, end]) => Ok(Command::Route {
            start: start.clone(),
            end: end.clone(),
        }),
        ("route", _) => Err("usage: route <start> <end>".to_string()),
        ("map", []) => Ok(Command::Map),
        ("show", []) => Ok(Command::Show),
        ("help" | "?", _) => Ok(Command::Help),
        ("quit" | "exit", _) => Ok(Command::Quit),
        (other, _) => Err(format!("unknown command '{other}'; type 'help'")),
    }
}

fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                current.get_or_insert_with(String::new);
            }
            c if c.is_whitespace() && !quoted => {
                if let Some(word) = current.take() {
                    words.push(word);
                }
            }
            c => current.get_or_insert_with(String::new).push(c),
        }
    }

    if quoted {
        return Err("unterminated quote".to_string());
    }
    if let Some(word) = current {
        words.push(word);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_with_plain_and_quoted_names() {
        assert_eq!(
            parse_command("route RoomA RoomB"),
            Ok(Command::Route {
                start: "RoomA".into(),
                end: "RoomB".into()
            })
        );
        assert_eq!(
            parse_command("  ROUTE \"Main Hall\" \"\" "),
            Ok(Command::Route {
                start: "Main Hall".into(),
                end: String::new()
            })
        );
    }

    #[test]
    fn rejects_incomplete_route_and_unknown_commands() {
        assert!(parse_command("route RoomA").is_err());
        assert!(parse_command("route \"RoomA").is_err());
        assert!(parse_command("teleport RoomA").is_err());
        assert!(parse_command("map now").is_err());
    }

    #[test]
    fn recognizes_simple_commands() {
        assert_eq!(parse_command(""), Ok(Command::Empty));
        assert_eq!(parse_command("map"), Ok(Command::Map));
        assert_eq!(parse_command("show"), Ok(Command::Show));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }
}
