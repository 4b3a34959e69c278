//! Quiz session state machine.
//!
//! ```text
//! Loading ──▶ LoadError
//!    │
//!    ▼
//! AwaitingAnswer ──submit──▶ AnswerRevealed ──advance──▶ AwaitingAnswer
//!    │
//!    └──submit (target)──▶ StreakComplete ──reset──▶ AwaitingAnswer
//!
//! NoData / InsufficientChoices: entered instead of AwaitingAnswer when the
//! selected category cannot produce a question; left via change_category
//! or reset.
//! ```
//!
//! Every explicit change (category, reset, advance) bumps the session
//! generation. A scheduled advance carries the generation it was issued at
//! and is discarded if the session has moved on since.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogError};
use crate::config::QuizSettings;
use crate::domain::{EventKind, Painting, PaintingId, SessionEvent};

use super::categories::{self, CategoryDef};
use super::filter::{CategoryCount, CollectionFilter};
use super::sampler::QuestionSampler;

/// Where the session is in the quiz flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum Phase {
    /// Waiting for the catalog
    Loading,

    /// The paintings document could not be loaded
    LoadError { message: String },

    /// Choices are shown and enabled
    AwaitingAnswer,

    /// Choices are disabled and the answer is shown
    AnswerRevealed { correct: bool },

    /// The streak target was reached
    StreakComplete,

    /// The selected category has no eligible paintings
    NoData,

    /// The selected category has fewer than two distinct artists
    InsufficientChoices,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::LoadError { .. } => "load_error",
            Phase::AwaitingAnswer => "awaiting_answer",
            Phase::AnswerRevealed { .. } => "answer_revealed",
            Phase::StreakComplete => "streak_complete",
            Phase::NoData => "no_data",
            Phase::InsufficientChoices => "insufficient_choices",
        }
    }
}

/// The painting on screen and the names offered for it
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Index into the category pool the painting was drawn from
    pub pool_index: usize,
    pub painting: Painting,
    pub choices: Vec<String>,
}

/// Permission to advance past a revealed answer, valid for one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket {
    generation: u64,
}

impl AdvanceTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of a submitted answer, for highlighting the buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub correct: bool,
    pub correct_artist: String,
    pub chosen_artist: String,
    pub streak: u32,
    pub milestone: bool,
    /// Present unless the milestone was reached; the next painting waits
    /// for an explicit reset then
    pub advance: Option<AdvanceTicket>,
}

/// Transitions that are not valid in the current phase
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No answer is expected while {phase}")]
    NotAwaitingAnswer { phase: &'static str },

    #[error("The catalog is not loaded")]
    NotLoaded,
}

/// One quiz, owning its streak, category and random source
pub struct QuizSession<R = StdRng> {
    id: Uuid,
    settings: QuizSettings,
    sampler: QuestionSampler,
    rng: R,
    catalog: Option<Arc<Catalog>>,
    phase: Phase,
    streak: u32,
    category: &'static CategoryDef,
    /// Identity of the last painting shown, in any category
    last_shown: Option<PaintingId>,
    generation: u64,
    question: Option<Question>,
    events: Vec<SessionEvent>,
}

impl QuizSession<StdRng> {
    /// Create a session seeded from the OS
    pub fn new(settings: QuizSettings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Create a session with a fixed seed
    pub fn seeded(settings: QuizSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSession<R> {
    /// Create a session in the `Loading` phase
    pub fn with_rng(settings: QuizSettings, rng: R) -> Self {
        Self {
            id: Uuid::new_v4(),
            sampler: QuestionSampler::from_settings(&settings),
            settings,
            rng,
            catalog: None,
            phase: Phase::Loading,
            streak: 0,
            category: categories::all(),
            last_shown: None,
            generation: 0,
            question: None,
            events: Vec::new(),
        }
    }

    /// Start from the selected category instead of the full collection
    pub fn with_category(mut self, category_id: &str) -> Self {
        self.category = categories::resolve(category_id);
        self
    }

    /// Finish loading: show the first question or enter `LoadError`
    pub fn catalog_loaded(&mut self, result: Result<Catalog, CatalogError>) {
        match result {
            Ok(catalog) => self.use_catalog(Arc::new(catalog)),
            Err(e) => {
                warn!(error = %e, "Quiz cannot start");
                self.catalog = None;
                self.question = None;
                self.phase = Phase::LoadError {
                    message: e.to_string(),
                };
                self.emit(EventKind::LoadFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    /// Use an already loaded catalog and show the first question
    pub fn use_catalog(&mut self, catalog: Arc<Catalog>) {
        info!(
            session = %self.id,
            category = self.category.id,
            paintings = catalog.len(),
            "Session ready"
        );
        self.catalog = Some(catalog);
        self.generation += 1;
        self.next_question();
    }

    /// Answer the current question with an artist name
    pub fn submit_answer(&mut self, choice: &str) -> Result<Reveal, SessionError> {
        let correct_artist = match (&self.phase, &self.question) {
            (Phase::AwaitingAnswer, Some(question)) => question.painting.artist.clone(),
            _ => {
                return Err(SessionError::NotAwaitingAnswer {
                    phase: self.phase.name(),
                })
            }
        };

        let correct = choice == correct_artist;
        self.streak = if correct { self.streak.saturating_add(1) } else { 0 };

        self.emit(EventKind::Answered {
            correct,
            correct_artist: correct_artist.clone(),
            chosen_artist: choice.to_string(),
            streak: self.streak,
        });

        let milestone = correct && self.streak >= self.settings.streak_target;
        let advance = if milestone {
            info!(streak = self.streak, "Streak complete");
            self.phase = Phase::StreakComplete;
            self.emit(EventKind::StreakMilestone {
                streak: self.streak,
            });
            None
        } else {
            self.phase = Phase::AnswerRevealed { correct };
            Some(AdvanceTicket {
                generation: self.generation,
            })
        };

        Ok(Reveal {
            correct,
            correct_artist,
            chosen_artist: choice.to_string(),
            streak: self.streak,
            milestone,
            advance,
        })
    }

    /// Move past a revealed answer. Returns false for a stale ticket.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> bool {
        let revealed = matches!(self.phase, Phase::AnswerRevealed { .. });
        if ticket.generation != self.generation || !revealed {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                phase = self.phase.name(),
                "Discarding stale advance"
            );
            return false;
        }

        self.generation += 1;
        self.next_question();
        true
    }

    /// Switch category: streak is cleared and a new question drawn.
    ///
    /// Unknown ids select the full collection.
    pub fn change_category(&mut self, category_id: &str) -> Result<(), SessionError> {
        self.require_catalog()?;

        self.category = categories::resolve(category_id);
        self.streak = 0;
        self.generation += 1;

        info!(category = self.category.id, "Category changed");
        self.emit(EventKind::CategoryChanged {
            category: self.category.id.to_string(),
            label: self.category.label.to_string(),
        });

        self.next_question();
        Ok(())
    }

    /// Clear the streak and draw a new question in the same category
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.require_catalog()?;

        self.streak = 0;
        self.generation += 1;
        self.emit(EventKind::StreakReset);

        self.next_question();
        Ok(())
    }

    fn require_catalog(&self) -> Result<(), SessionError> {
        if self.catalog.is_some() {
            Ok(())
        } else {
            Err(SessionError::NotLoaded)
        }
    }

    fn next_question(&mut self) {
        let Some(catalog) = self.catalog.clone() else {
            return;
        };

        let filter = CollectionFilter::new(&catalog, self.settings.popular_top_n);
        let pool = filter.paintings_in(self.category);
        let category = self.category.id.to_string();

        // Pools differ between categories, so exclude by identity
        let exclude = self
            .last_shown
            .as_ref()
            .and_then(|last| pool.iter().position(|p| p.id() == *last));

        let Some((pool_index, painting)) =
            self.sampler.pick_painting(&mut self.rng, &pool, exclude)
        else {
            self.question = None;
            self.phase = Phase::NoData;
            self.emit(EventKind::NoValidPaintings { category });
            return;
        };

        let choices = self
            .sampler
            .build_choices(&mut self.rng, &painting.artist, &pool);
        self.last_shown = Some(painting.id());

        if choices.len() < 2 {
            self.question = None;
            self.phase = Phase::InsufficientChoices;
            self.emit(EventKind::InsufficientChoices {
                category,
                artists: choices.len(),
            });
            return;
        }

        let question = Question {
            pool_index,
            painting: painting.clone(),
            choices,
        };

        self.emit(EventKind::QuestionReady {
            painting_id: question.painting.id(),
            title: question.painting.display_title(),
            url: question.painting.url.clone(),
            choices: question.choices.clone(),
        });
        self.question = Some(question);
        self.phase = Phase::AwaitingAnswer;
    }

    fn emit(&mut self, kind: EventKind) {
        debug!(event = kind.name(), generation = self.generation, "Session event");
        self.events
            .push(SessionEvent::new(self.id, self.generation, kind));
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Streak bar segments to fill, never more than the target
    pub fn filled_segments(&self) -> u32 {
        self.streak.min(self.settings.streak_target)
    }

    pub fn streak_target(&self) -> u32 {
        self.settings.streak_target
    }

    pub fn selected_category(&self) -> &'static CategoryDef {
        self.category
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.catalog.as_ref()
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Info bar figures for the selected category
    pub fn collection_info(&self) -> Option<CategoryCount> {
        let catalog = self.catalog.as_ref()?;
        let filter = CollectionFilter::new(catalog, self.settings.popular_top_n);
        Some(CategoryCount::from_pool(&filter.paintings_in(self.category)))
    }
}
