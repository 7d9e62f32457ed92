/// A recognized slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Quiz,
    Hint,
    End,
    Help,
    Ping,
    Global,
    Local,
}

impl Command {
    /// Parses the leading token of a message as a command. Accepts the
    /// `/command@BotName` form used in group chats; anything after the first
    /// whitespace is ignored.
    pub fn parse(text: &str) -> Option<Command> {
        let first = text.trim().split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        match name {
            "start" => Some(Command::Start),
            "quiz" => Some(Command::Quiz),
            "hint" => Some(Command::Hint),
            "end" => Some(Command::End),
            "help" => Some(Command::Help),
            "ping" => Some(Command::Ping),
            "global" => Some(Command::Global),
            "local" => Some(Command::Local),
            _ => None,
        }
    }
}
