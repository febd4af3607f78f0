//! Coaching feedback pools and deterministic seeded selection.
//!
//! Message choice must be reproducible: the same session seed, matrix entry,
//! and category always yield the same message, across runs and platforms.
//! No random-number generator is involved; a string-derived rolling hash
//! indexes a fixed pool instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which coaching pool a breakdown entry draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    OnTrack,
    Foundational,
    Refinement,
    Mastery,
}

impl FeedbackCategory {
    /// Stable identifier, also used as the seed-string suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackCategory::OnTrack => "on_track",
            FeedbackCategory::Foundational => "foundational",
            FeedbackCategory::Refinement => "refinement",
            FeedbackCategory::Mastery => "mastery",
        }
    }

    /// The fixed message pool for this category.
    pub fn messages(self) -> &'static [&'static str] {
        match self {
            FeedbackCategory::OnTrack => ON_TRACK_MESSAGES,
            FeedbackCategory::Foundational => FOUNDATIONAL_MESSAGES,
            FeedbackCategory::Refinement => REFINEMENT_MESSAGES,
            FeedbackCategory::Mastery => MASTERY_MESSAGES,
        }
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ON_TRACK_MESSAGES: &[&str] = &[
    "You are meeting expectations for this area. Keep applying these skills in real projects.",
    "Solid footing here. Consider mentoring a colleague to consolidate what you know.",
    "Right where you should be. Look for a stretch assignment to keep momentum.",
    "This area is on track. Revisit it after your next project to confirm it stays that way.",
    "Expectations met. Deepen your edge by exploring the advanced corners of this topic.",
    "You are keeping pace with your experience level here. Document what works for your team.",
    "On track. A periodic self-check every few months will keep this area sharp.",
    "Good standing in this area. Trade notes with a peer to pick up new techniques.",
];

const FOUNDATIONAL_MESSAGES: &[&str] = &[
    "Start with the fundamentals: a structured beginner course will pay off quickly here.",
    "This area needs ground-up attention. Block regular practice time before taking on more.",
    "Focus on the basics first; hands-on exercises beat reading for this kind of gap.",
    "A significant gap for your experience level. Pair with someone strong in this area.",
    "Build a small practice project that exercises this skill end to end.",
    "Revisit the core concepts. A sandbox environment is the fastest way to learn safely.",
    "Treat this as your top development priority and set a concrete 30-day goal.",
    "The foundation needs work. Short daily reps will move this faster than a single push.",
];

const REFINEMENT_MESSAGES: &[&str] = &[
    "You have the basics; now close the gap with deliberate practice on harder cases.",
    "Close, but not there yet. Take on one real task in this area each week.",
    "Push past the comfortable parts: the remaining gap lives in the edge cases.",
    "A focused workshop or deep-dive tutorial would move the needle here.",
    "Review others' work in this area; critique sharpens partly-formed skills fast.",
    "Almost at expectations. Write up what you know to expose the gaps that remain.",
    "You are mid-journey here. Seek feedback on your recent work to find blind spots.",
    "Target the specific sub-skills still below par instead of re-covering the basics.",
];

const MASTERY_MESSAGES: &[&str] = &[
    "Very close to target. One or two polishing sessions should tip this over.",
    "Nearly there; refine the details and this area reaches expectations.",
    "A near-miss, not a weak spot. A single focused review will close it out.",
    "Strong showing just shy of target. Teach this topic once and it will stick.",
    "The hard part is done. Tidy the remaining rough edges at your own pace.",
    "Within touching distance. Pick the weakest question here and drill just that.",
    "Almost at mastery for your bracket. Calibrate with a colleague's assessment.",
    "So close the difference may be confidence. Re-test after your next project.",
];

/// Deterministically pick one element of `pool` from a seed string.
///
/// Rolling 31-based hash over the seed bytes, wrapping at 32 bits, then
/// index modulo the pool length. Not cryptographic; only determinism and a
/// rough spread over a small pool matter. `pool` must be non-empty.
pub fn select_seeded<'a, T>(pool: &'a [T], seed: &str) -> &'a T {
    debug_assert!(!pool.is_empty(), "select_seeded requires a non-empty pool");
    let hash = seed
        .bytes()
        .fold(0u32, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as u32));
    &pool[hash as usize % pool.len()]
}
