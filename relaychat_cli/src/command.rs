/// One line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Clear,
    Reset,
    Dismiss,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') {
            return Command::Submit(line.to_string());
        }

        match trimmed {
            "/clear" => Command::Clear,
            "/reset" => Command::Reset,
            "/dismiss" => Command::Dismiss,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

pub const HELP: &str = "Commands: /clear (new conversation), /reset (forget everything), \
/dismiss (hide the configuration notice), /help, /quit";
