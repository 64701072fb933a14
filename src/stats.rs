//! stats.rs
//!
//! The statistics record handed to the renderers, plus the pure derivation
//! rules used to fill it in. Network access lives in `collect`; everything
//! here is deterministic except [`line_estimate`].

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use rand::Rng;
use std::collections::HashSet;

use crate::github::Event;

pub const COMMIT_FALLBACK: u64 = 1247;
pub const COMMIT_FLOOR: u64 = 500;
/// The activity feed only covers a short window, so raw counts are scaled up.
pub const COMMIT_SCALE: u64 = 10;

pub const PULL_REQUEST_CEILING: u64 = 200;
pub const PULL_REQUEST_FALLBACK: u64 = 89;

pub const ISSUE_CEILING: u64 = 300;
pub const ISSUE_FALLBACK: u64 = 156;

pub const STREAK_FALLBACK: u64 = 47;
pub const STREAK_WINDOW_DAYS: i64 = 365;

pub const LINES_PER_REPOSITORY: u64 = 500;
pub const LINE_JITTER: u64 = 5000;

pub const DEFAULT_HANDLE: &str = "Dineshs737";

/// Immutable result of one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRecord {
    pub name: String,
    pub handle: String,
    pub location: String,
    pub bio: String,
    pub organization: String,
    pub link: String,
    pub repository_count: u64,
    pub followers: u64,
    pub following: u64,
    pub commit_estimate: u64,
    pub pull_request_count: u64,
    pub issue_count: u64,
    pub star_total: u64,
    pub streak_days: u64,
    pub estimated_line_count: u64,
}

/// Text substituted for profile fields the source leaves blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub location: String,
    pub bio: String,
    pub organization: String,
    /// `None` means `github.com/<handle>`.
    pub link: Option<String>,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            location: "Srilanka, Mannar".to_string(),
            bio: "Undergraduate Student".to_string(),
            organization: "@Learning".to_string(),
            link: None,
        }
    }
}

impl ProfileDefaults {
    pub fn link_for(&self, handle: &str) -> String {
        self.link
            .clone()
            .unwrap_or_else(|| format!("github.com/{handle}"))
    }
}

/// A derived value together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric<T> {
    Fetched(T),
    Fallback(T),
}

impl<T: Copy> Metric<T> {
    pub fn value(&self) -> T {
        match *self {
            Metric::Fetched(v) | Metric::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Metric::Fallback(_))
    }
}

/// Returns `value` as given unless it is missing or empty, in which case
/// `fallback`. GitHub reports an unset blog as `""`.
pub fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Scaled commit count of push events inside `now`'s calendar year (UTC).
pub fn commit_estimate(events: &[Event], now: DateTime<Utc>) -> u64 {
    let year = now.year();
    let year_start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let next_year_start = Utc
        .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let raw: u64 = events
        .iter()
        .filter(|e| e.is_push() && e.created_at >= year_start && e.created_at < next_year_start)
        .map(Event::commit_count)
        .fold(0u64, u64::saturating_add);

    raw.saturating_mul(COMMIT_SCALE).max(COMMIT_FLOOR)
}

/// Consecutive active days ending today, walking back at most a year.
///
/// Today itself may be empty without breaking the run, since the day is not
/// over yet. Returns the raw count; the zero-to-fallback substitution happens
/// in the aggregator.
pub fn streak_days(events: &[Event], today: NaiveDate) -> u64 {
    let active: HashSet<NaiveDate> = events.iter().map(|e| e.created_at.date_naive()).collect();

    let mut streak = 0;
    for offset in 0..STREAK_WINDOW_DAYS {
        let day = today - Duration::days(offset);
        if active.contains(&day) {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }
    streak
}

pub fn clamp_count(total: u64, ceiling: u64) -> u64 {
    total.min(ceiling)
}

pub fn star_total(stars: impl IntoIterator<Item = u64>) -> u64 {
    stars.into_iter().fold(0u64, u64::saturating_add)
}

/// Rough lines-of-code figure. Intentionally random: it is decoration on the
/// card, not a measurement.
pub fn line_estimate<R: Rng>(repository_count: u64, rng: &mut R) -> u64 {
    repository_count
        .saturating_mul(LINES_PER_REPOSITORY)
        .saturating_add(rng.gen_range(0..LINE_JITTER))
}
