use std::path::PathBuf;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  generate <job-file>   tailor a cover letter and CV bullets to a job description
  history               list applications generated this session
  show <n>              print application <n> from the history
  clear                 forget the session history
  help                  show this message
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate(PathBuf),
    History,
    Show(usize),
    Clear,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        match (verb, rest) {
            ("generate", "") => Err("usage: generate <job-file>".to_string()),
            ("generate", path) => Ok(Command::Generate(PathBuf::from(path))),
            ("history", "") => Ok(Command::History),
            ("show", n) => n
                .parse::<usize>()
                .map(Command::Show)
                .map_err(|_| "usage: show <n>".to_string()),
            ("clear", "") => Ok(Command::Clear),
            ("help", "") => Ok(Command::Help),
            ("quit" | "exit", "") => Ok(Command::Quit),
            _ => Err(format!("unknown command '{line}', try 'help'")),
        }
    }
}
