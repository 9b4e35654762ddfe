/// One line of player input during a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Reveal one known solution and end the round
    Help,
    /// Reveal every known solution and end the round
    HelpAll,
    Skip,
    /// Show elapsed time; the round continues
    Time,
    Stop,
    /// A formula or a no-solution claim
    Answer(String),
}

impl PlayerCommand {
    /// Classify a line; blank lines yield `None`
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let command = match trimmed.to_lowercase().as_str() {
            "help" => PlayerCommand::Help,
            "help all" => PlayerCommand::HelpAll,
            "skip" => PlayerCommand::Skip,
            "time" => PlayerCommand::Time,
            "stop" => PlayerCommand::Stop,
            _ => PlayerCommand::Answer(trimmed.to_string()),
        };
        Some(command)
    }

    /// Only answers count towards a round's attempts
    pub fn counts_as_attempt(&self) -> bool {
        matches!(self, PlayerCommand::Answer(_))
    }
}
