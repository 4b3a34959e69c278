//! Events published by a quiz session.
//!
//! The session never renders anything itself. Every observable change is
//! emitted as an event and the view decides what to draw.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::painting::PaintingId;

/// A single event emitted by a quiz session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Unique identifier for this event
    pub id: Uuid,

    /// When this event occurred (ISO 8601)
    pub timestamp: DateTime<Utc>,

    /// The session this event belongs to
    pub session_id: Uuid,

    /// Session generation at the time of the event
    pub generation: u64,

    /// What happened
    pub kind: EventKind,
}

impl SessionEvent {
    /// Create a new event with the current timestamp
    pub fn new(session_id: Uuid, generation: u64, kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            session_id,
            generation,
            kind,
        }
    }
}

/// Kinds of events a session can emit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum EventKind {
    /// A new painting is on screen and choices are enabled
    QuestionReady {
        painting_id: PaintingId,
        title: String,
        url: String,
        choices: Vec<String>,
    },

    /// An answer was submitted and revealed
    Answered {
        correct: bool,
        correct_artist: String,
        chosen_artist: String,
        streak: u32,
    },

    /// The streak reached its target
    StreakMilestone { streak: u32 },

    /// The streak was cleared by an explicit reset
    StreakReset,

    /// A different category was selected
    CategoryChanged { category: String, label: String },

    /// The selected category has no eligible paintings
    NoValidPaintings { category: String },

    /// Not enough distinct artists to build a question
    InsufficientChoices { category: String, artists: usize },

    /// The paintings document could not be loaded
    LoadFailed { error: String },
}

impl EventKind {
    /// Short snake_case name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::QuestionReady { .. } => "question_ready",
            EventKind::Answered { .. } => "answered",
            EventKind::StreakMilestone { .. } => "streak_milestone",
            EventKind::StreakReset => "streak_reset",
            EventKind::CategoryChanged { .. } => "category_changed",
            EventKind::NoValidPaintings { .. } => "no_valid_paintings",
            EventKind::InsufficientChoices { .. } => "insufficient_choices",
            EventKind::LoadFailed { .. } => "load_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = SessionEvent::new(
            Uuid::new_v4(),
            3,
            EventKind::Answered {
                correct: false,
                correct_artist: "Edvard Munch".to_string(),
                chosen_artist: "Harriet Backer".to_string(),
                streak: 0,
            },
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"answered""#));

        let parsed: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_unit_variant_tag() {
        let json = serde_json::to_string(&EventKind::StreakReset).unwrap();
        assert_eq!(json, r#"{"type":"streak_reset"}"#);
        assert_eq!(EventKind::StreakReset.name(), "streak_reset");
    }
}
