//! Content-based event recommendations.
//!
//! A user's recent bookings become three frequency tables (category,
//! organizer, location). Each upcoming candidate is scored against them:
//!
//! ```text
//! score = 3 * category_count + 2 * organizer_count + 1 * location_count
//!       + 1 if the event starts within the next 7 days
//! ```
//!
//! Candidates scoring 0 are dropped. When the user has no usable history, or
//! nothing scores above 0, the soonest candidates are returned instead with a
//! uniform score of 0.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Duration;
use serde::Serialize;

use crate::catalog::EventCategory;
use crate::types::{DbId, Timestamp};

/// How many of the user's most recent bookings feed the profile.
pub const HISTORY_LIMIT: i64 = 10;

/// How many candidates (newest-created first) are scored.
pub const CANDIDATE_LIMIT: i64 = 50;

/// Maximum number of recommendations returned.
pub const MAX_RESULTS: usize = 10;

pub const CATEGORY_WEIGHT: i64 = 3;
pub const ORGANIZER_WEIGHT: i64 = 2;
pub const LOCATION_WEIGHT: i64 = 1;
pub const PROXIMITY_BONUS: i64 = 1;
pub const PROXIMITY_WINDOW_DAYS: i64 = 7;

/// Score assigned to every cold-start result.
pub const COLD_START_SCORE: i64 = 0;

/// Event attributes of one past booking. Any of them may be missing when the
/// booked event row is gone or incomplete.
#[derive(Debug, Clone, Default)]
pub struct BookingSignal {
    pub category: Option<EventCategory>,
    pub organizer_id: Option<DbId>,
    pub location: Option<String>,
}

/// Frequency tables built from a user's booking history.
#[derive(Debug, Clone, Default)]
pub struct PreferenceProfile {
    categories: HashMap<EventCategory, i64>,
    organizers: HashMap<DbId, i64>,
    locations: HashMap<String, i64>,
}

/// Locations are compared trimmed and case-insensitively.
fn location_key(location: &str) -> String {
    location.trim().to_lowercase()
}

impl PreferenceProfile {
    /// Count each non-null dimension once per booking.
    pub fn from_history(history: &[BookingSignal]) -> Self {
        let mut profile = Self::default();
        for signal in history {
            if let Some(category) = signal.category {
                *profile.categories.entry(category).or_default() += 1;
            }
            if let Some(organizer_id) = signal.organizer_id {
                *profile.organizers.entry(organizer_id).or_default() += 1;
            }
            if let Some(location) = signal.location.as_deref() {
                let key = location_key(location);
                if !key.is_empty() {
                    *profile.locations.entry(key).or_default() += 1;
                }
            }
        }
        profile
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.organizers.is_empty() && self.locations.is_empty()
    }

    pub fn category_count(&self, category: EventCategory) -> i64 {
        self.categories.get(&category).copied().unwrap_or(0)
    }

    pub fn organizer_count(&self, organizer_id: DbId) -> i64 {
        self.organizers.get(&organizer_id).copied().unwrap_or(0)
    }

    pub fn location_count(&self, location: &str) -> i64 {
        self.locations
            .get(&location_key(location))
            .copied()
            .unwrap_or(0)
    }
}

/// The attributes of a candidate event that take part in scoring.
#[derive(Debug, Clone)]
pub struct CandidateFeatures {
    pub id: DbId,
    pub category: EventCategory,
    pub organizer_id: DbId,
    pub location: String,
    pub date: Timestamp,
}

/// A recommended item with its score.
#[derive(Debug, Clone, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub item: T,
    pub score: i64,
}

/// Score one candidate against a profile.
pub fn score(profile: &PreferenceProfile, candidate: &CandidateFeatures, now: Timestamp) -> i64 {
    let mut score = CATEGORY_WEIGHT * profile.category_count(candidate.category)
        + ORGANIZER_WEIGHT * profile.organizer_count(candidate.organizer_id)
        + LOCATION_WEIGHT * profile.location_count(&candidate.location);
    if candidate.date <= now + Duration::days(PROXIMITY_WINDOW_DAYS) {
        score += PROXIMITY_BONUS;
    }
    score
}

/// Soonest first, then lowest id.
fn by_date_then_id(a: &CandidateFeatures, b: &CandidateFeatures) -> Ordering {
    a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id))
}

/// Rank candidates for a profile, at most [`MAX_RESULTS`].
///
/// Ties on score are broken by soonest date, then lowest id. An empty
/// profile skips scoring and goes straight to the cold-start ordering.
pub fn rank<T>(
    profile: &PreferenceProfile,
    candidates: Vec<(CandidateFeatures, T)>,
    now: Timestamp,
) -> Vec<Ranked<T>> {
    if !profile.is_empty() {
        let mut scored: Vec<(i64, CandidateFeatures, T)> = candidates
            .into_iter()
            .map(|(features, item)| (score(profile, &features, now), features, item))
            .collect();

        if scored.iter().any(|(s, _, _)| *s > 0) {
            scored.retain(|(s, _, _)| *s > 0);
            scored.sort_by(|(sa, fa, _), (sb, fb, _)| {
                sb.cmp(sa).then_with(|| by_date_then_id(fa, fb))
            });
            return scored
                .into_iter()
                .take(MAX_RESULTS)
                .map(|(score, _, item)| Ranked { item, score })
                .collect();
        }

        return cold_start(scored.into_iter().map(|(_, f, item)| (f, item)).collect());
    }

    cold_start(candidates)
}

/// Soonest-first fallback with a uniform score.
fn cold_start<T>(mut candidates: Vec<(CandidateFeatures, T)>) -> Vec<Ranked<T>> {
    candidates.sort_by(|(a, _), (b, _)| by_date_then_id(a, b));
    candidates
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(_, item)| Ranked {
            item,
            score: COLD_START_SCORE,
        })
        .collect()
}
