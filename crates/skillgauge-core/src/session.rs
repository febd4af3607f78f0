//! Session state machine and controller.
//!
//! All mutable state of a running assessment lives in one `SessionState`
//! value; transitions are pure functions returning the next state, and the
//! `Session` controller is the single owner that applies them. Everything
//! downstream (totals, breakdown) is recomputed from the state on demand,
//! never cached.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::breakdown::{build_breakdown, BreakdownEntry};
use crate::model::{AnswerMap, Catalog, ExperienceBracket, Question, ScoreMatrix, SkillLevel};
use crate::scoring::{overall_total, section_totals, GroupScore};

/// Display theme toggle. Not part of the scoring domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The ephemeral per-session state.
///
/// `index` in `0..=N` where `N` is the catalog length; `index == N` means
/// the session is complete. The feedback seed increments whenever results
/// are (re)generated: on answering the last question and on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub index: usize,
    pub answers: AnswerMap,
    pub bracket: ExperienceBracket,
    pub seed: u64,
    pub theme: Theme,
}

impl SessionState {
    /// Fresh state at `Asking(0)` with the given starting seed.
    ///
    /// Only the seed's distinctness across sessions matters, not its value.
    pub fn new(seed: u64) -> Self {
        Self {
            index: 0,
            answers: AnswerMap::new(),
            bracket: ExperienceBracket::default(),
            seed,
            theme: Theme::Light,
        }
    }

    /// Record an answer for the current question and advance.
    ///
    /// Valid only while asking; at `Complete` this is a no-op. Answering the
    /// last question increments the feedback seed exactly once, because new
    /// results are about to be shown.
    pub fn select(&self, questions: &[Question], level: SkillLevel) -> SessionState {
        let Some(question) = questions.get(self.index) else {
            return self.clone();
        };

        let mut next = self.clone();
        next.answers.insert(question.id.clone(), level);
        if self.index == questions.len() - 1 {
            next.seed += 1;
        }
        next.index = (self.index + 1).min(questions.len());
        next
    }

    /// Step back one question, floored at 0. Keeps the answer being left.
    ///
    /// Valid only while asking; at `Complete` this is a no-op, because the
    /// only exit from the results view is `restart`.
    pub fn back(&self, questions: &[Question]) -> SessionState {
        let mut next = self.clone();
        if self.index < questions.len() {
            next.index = self.index.saturating_sub(1);
        }
        next
    }

    /// Clear all answers, reset the bracket, refresh the seed, return to
    /// the first question. The only exit from `Complete`.
    pub fn restart(&self) -> SessionState {
        let mut next = SessionState::new(self.seed + 1);
        next.theme = self.theme;
        next
    }

    /// Change the experience bracket. The seed is untouched: for a fixed
    /// category and entry the message must not change, only the category
    /// may.
    pub fn with_bracket(&self, bracket: ExperienceBracket) -> SessionState {
        let mut next = self.clone();
        next.bracket = bracket;
        next
    }

    /// Flip the display theme.
    pub fn with_theme_toggled(&self) -> SessionState {
        let mut next = self.clone();
        next.theme = self.theme.toggled();
        next
    }
}

/// Current view of a session, recomputed per state change.
#[derive(Debug)]
pub enum SessionView<'a> {
    /// Asking the question at `index` of `total`.
    Asking {
        question: &'a Question,
        index: usize,
        total: usize,
        /// The previously chosen level, when stepping back over an answer.
        selected: Option<SkillLevel>,
    },
    /// All questions answered; the results view.
    Complete {
        overall: GroupScore,
        breakdown: Vec<BreakdownEntry>,
    },
}

/// Owns the static data and the session state, and applies transitions.
pub struct Session {
    catalog: Catalog,
    matrix: ScoreMatrix,
    state: SessionState,
}

impl Session {
    /// Start a session with a clock-derived distinguishing seed.
    pub fn new(catalog: Catalog, matrix: ScoreMatrix) -> Self {
        Self::with_seed(catalog, matrix, starting_seed())
    }

    /// Start a session with an explicit seed (deterministic tests).
    pub fn with_seed(catalog: Catalog, matrix: ScoreMatrix, seed: u64) -> Self {
        Self {
            catalog,
            matrix,
            state: SessionState::new(seed),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.index >= self.catalog.questions.len()
    }

    pub fn select(&mut self, level: SkillLevel) {
        self.state = self.state.select(&self.catalog.questions, level);
    }

    pub fn back(&mut self) {
        self.state = self.state.back(&self.catalog.questions);
    }

    pub fn restart(&mut self) {
        self.state = self.state.restart();
    }

    pub fn set_bracket(&mut self, bracket: ExperienceBracket) {
        self.state = self.state.with_bracket(bracket);
    }

    pub fn toggle_theme(&mut self) {
        self.state = self.state.with_theme_toggled();
    }

    /// Recompute the current view from the state.
    pub fn view(&self) -> SessionView<'_> {
        match self.catalog.questions.get(self.state.index) {
            Some(question) => SessionView::Asking {
                question,
                index: self.state.index,
                total: self.catalog.questions.len(),
                selected: self.state.answers.get(&question.id).copied(),
            },
            None => SessionView::Complete {
                overall: overall_total(&self.catalog.questions, &self.state.answers),
                breakdown: self.breakdown(),
            },
        }
    }

    /// Breakdown rows for the current answers, bracket, and seed.
    pub fn breakdown(&self) -> Vec<BreakdownEntry> {
        let totals = section_totals(&self.catalog.questions, &self.state.answers);
        build_breakdown(
            &self.matrix.entries,
            &totals,
            self.state.bracket,
            self.state.seed,
        )
    }
}

fn starting_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
