use serde::{Deserialize, Serialize};

/// Which audio cue the presentation layer should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Correct,
    Incorrect,
}

/// Result of every learner action. Produced fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub sound: SoundCue,
}

impl Feedback {
    pub fn correct(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sound: SoundCue::Correct,
        }
    }

    pub fn incorrect(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sound: SoundCue::Incorrect,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.sound == SoundCue::Correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_cue() {
        assert!(Feedback::correct("ok").is_correct());
        let f = Feedback::incorrect("no");
        assert_eq!(f.sound, SoundCue::Incorrect);
        assert_eq!(f.message, "no");
    }
}
