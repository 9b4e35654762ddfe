use std::fmt;

/// Difficulty tier a player asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    /// Accepts `easy`/`1`, `medium`/`2`, `hard`/`3`, case-insensitively
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "easy" | "1" => Some(Level::Easy),
            "medium" | "2" => Some(Level::Medium),
            "hard" | "3" => Some(Level::Hard),
            _ => None,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Level::Easy => 0,
            Level::Medium => 1,
            Level::Hard => 2,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_digits() {
        assert_eq!(Level::parse("easy"), Some(Level::Easy));
        assert_eq!(Level::parse(" Medium "), Some(Level::Medium));
        assert_eq!(Level::parse("HARD"), Some(Level::Hard));
        assert_eq!(Level::parse("1"), Some(Level::Easy));
        assert_eq!(Level::parse("2"), Some(Level::Medium));
        assert_eq!(Level::parse("3"), Some(Level::Hard));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Level::parse("expert"), None);
        assert_eq!(Level::parse("4"), None);
        assert_eq!(Level::parse(""), None);
    }
}
