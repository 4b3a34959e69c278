//! Quiz logic.
//!
//! - categories: category table and the classifier that interprets it
//! - filter: category pools and counts over a catalog
//! - sampler: painting draw and multiple-choice construction
//! - session: the quiz state machine
//! - controller: async driver applying commands and scheduled advances

pub mod categories;
pub mod controller;
pub mod filter;
pub mod sampler;
pub mod session;

pub use categories::{CategoryDef, Classifier, Rule, TagField, YearRange, CATEGORIES};
pub use controller::{Command, ControllerHandle, QuizController};
pub use filter::{CategoryCount, CollectionFilter};
pub use sampler::{distinct_artists, QuestionSampler};
pub use session::{AdvanceTicket, Phase, Question, QuizSession, Reveal, SessionError};
