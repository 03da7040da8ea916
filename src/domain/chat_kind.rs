use std::fmt;
use std::str::FromStr;

/// Discriminator selecting which generation capability answers a text chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatKind {
    StudyBuddy,
    Advisor,
    General,
}

impl ChatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatKind::StudyBuddy => "study_buddy",
            ChatKind::Advisor => "advisor",
            ChatKind::General => "general",
        }
    }
}

impl FromStr for ChatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "study_buddy" => Ok(ChatKind::StudyBuddy),
            "advisor" => Ok(ChatKind::Advisor),
            "general" => Ok(ChatKind::General),
            _ => Err(format!("Invalid chat_type: {}", s)),
        }
    }
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!("study_buddy".parse::<ChatKind>(), Ok(ChatKind::StudyBuddy));
        assert_eq!("advisor".parse::<ChatKind>(), Ok(ChatKind::Advisor));
        assert_eq!("general".parse::<ChatKind>(), Ok(ChatKind::General));
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!("therapist".parse::<ChatKind>().is_err());
        assert!("".parse::<ChatKind>().is_err());
        assert!("Study_Buddy".parse::<ChatKind>().is_err());
    }
}
