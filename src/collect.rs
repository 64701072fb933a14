use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::GithubError;
use crate::github::ProfileSource;
use crate::stats::{
    COMMIT_FALLBACK, ISSUE_CEILING, ISSUE_FALLBACK, Metric, PULL_REQUEST_CEILING,
    PULL_REQUEST_FALLBACK, ProfileDefaults, STREAK_FALLBACK, StatsRecord, clamp_count,
    commit_estimate, line_estimate, star_total, streak_days, text_or,
};

/// Gather every statistic for `handle` into one record.
///
/// Only the profile and repository-list fetches are fatal. The activity feed
/// and both searches degrade to fixed fallback values when they fail.
pub async fn collect<S>(
    source: &S,
    handle: &str,
    defaults: &ProfileDefaults,
    now: DateTime<Utc>,
) -> Result<StatsRecord, GithubError>
where
    S: ProfileSource + ?Sized,
{
    info!(handle, "Fetching GitHub data");

    let (user, repos) = tokio::try_join!(source.user(handle), source.repositories(handle))?;
    debug!(login = %user.login, repositories = repos.len(), "profile and repositories fetched");

    let pr_query = format!("author:{handle} type:pr is:merged");
    let issue_query = format!("author:{handle} type:issue");

    let (events, pr_total, issue_total) = tokio::join!(
        source.public_events(handle),
        source.search_total(&pr_query),
        source.search_total(&issue_query),
    );

    let (commits, streak) = match events {
        Ok(events) => {
            let commits = Metric::Fetched(commit_estimate(&events, now));
            let streak = match streak_days(&events, now.date_naive()) {
                0 => {
                    debug!("no recent activity streak; reporting fallback");
                    Metric::Fallback(STREAK_FALLBACK)
                }
                days => Metric::Fetched(days),
            };
            (commits, streak)
        }
        Err(error) => {
            warn!(
                %error,
                status = ?error.status(),
                "activity feed unavailable; using commit and streak fallbacks"
            );
            (
                Metric::Fallback(COMMIT_FALLBACK),
                Metric::Fallback(STREAK_FALLBACK),
            )
        }
    };

    let pull_requests = searched(
        "pull request",
        pr_total,
        PULL_REQUEST_CEILING,
        PULL_REQUEST_FALLBACK,
    );
    let issues = searched("issue", issue_total, ISSUE_CEILING, ISSUE_FALLBACK);

    let fallbacks = [commits, streak, pull_requests, issues]
        .iter()
        .filter(|m| m.is_fallback())
        .count();
    if fallbacks > 0 {
        info!(fallbacks, "some metrics are estimates");
    }

    let repository_count = repos.len() as u64;
    let stars = star_total(repos.iter().map(|r| r.stargazers_count));
    let lines = line_estimate(repository_count, &mut rand::thread_rng());

    Ok(StatsRecord {
        name: text_or(user.name.as_deref(), handle),
        handle: handle.to_string(),
        location: text_or(user.location.as_deref(), &defaults.location),
        bio: text_or(user.bio.as_deref(), &defaults.bio),
        organization: text_or(user.company.as_deref(), &defaults.organization),
        link: text_or(user.blog.as_deref(), &defaults.link_for(handle)),
        repository_count,
        followers: user.followers,
        following: user.following,
        commit_estimate: commits.value(),
        pull_request_count: pull_requests.value(),
        issue_count: issues.value(),
        star_total: stars,
        streak_days: streak.value(),
        estimated_line_count: lines,
    })
}

fn searched(
    what: &str,
    total: Result<u64, GithubError>,
    ceiling: u64,
    fallback: u64,
) -> Metric<u64> {
    match total {
        Ok(total) => Metric::Fetched(clamp_count(total, ceiling)),
        Err(error) => {
            warn!(%error, status = ?error.status(), fallback, "{what} search failed; using fallback");
            Metric::Fallback(fallback)
        }
    }
}
