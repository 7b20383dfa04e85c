#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    /// Source listing, optionally restricted to an inclusive 1-based line range.
    Source(Option<(usize, usize)>),
    SearchPaths,
    File,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Command::Empty;
        };
        let rest: Vec<&str> = words.collect();

        match head {
            "help" | "?" => Command::Help,
            "source" | "list" => match rest.as_slice() {
                [] => Command::Source(None),
                [line] => match line.parse::<usize>() {
                    Ok(n) => Command::Source(Some((n, n))),
                    Err(_) => Command::Unknown(line.to_string()),
                },
                [from, to] => match (from.parse::<usize>(), to.parse::<usize>()) {
                    (Ok(a), Ok(b)) if a <= b => Command::Source(Some((a, b))),
                    _ => Command::Unknown(format!("{from} {to}")),
                },
                _ => Command::Unknown(rest.join(" ")),
            },
            "jpath" => Command::SearchPaths,
            "file" => Command::File,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

pub const HELP: &str = "\
Commands:
  help                 Show this message
  source [from [to]]   List the program source (alias: list)
  jpath                Show library search directories
  file                 Show the program name
  quit                 Leave the debugger (alias: exit)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(Command::parse("  "), Command::Empty);
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("list"), Command::Source(None));
        assert_eq!(Command::parse("source 3"), Command::Source(Some((3, 3))));
        assert_eq!(Command::parse("source 2 5"), Command::Source(Some((2, 5))));
        assert_eq!(Command::parse("jpath"), Command::SearchPaths);
        assert_eq!(Command::parse("file"), Command::File);
        assert_eq!(Command::parse("exit"), Command::Quit);
    }

    #[test]
    fn bad_ranges_are_unknown() {
        assert!(matches!(Command::parse("source 5 2"), Command::Unknown(_)));
        assert!(matches!(Command::parse("source x"), Command::Unknown(_)));
        assert_eq!(Command::parse("step"), Command::Unknown("step".into()));
    }
}
