//! Profile README generation.
//!
//! The document embeds the rendered card, links the public stats widgets for
//! the handle, and repeats the headline numbers in a small table so the page
//! stays readable where SVGs are not rendered.

use chrono::NaiveDate;

use crate::format::format_number;
use crate::stats::StatsRecord;

const WIDGET_THEME: &str =
    "theme=github_dark&hide_border=true&bg_color=0d1117&title_color=58a6ff&text_color=c9d1d9";

fn stats_table(stats: &StatsRecord) -> String {
    let rows = [
        ("Repositories", stats.repository_count.to_string()),
        ("Followers", format_number(stats.followers)),
        ("Stars", format_number(stats.star_total)),
        ("Commits (est.)", format_number(stats.commit_estimate)),
        ("Merged pull requests", stats.pull_request_count.to_string()),
        ("Issues opened", stats.issue_count.to_string()),
        ("Current streak", format!("{} days", stats.streak_days)),
    ];

    let mut out = String::from("| Metric | Value |\n|---|---|\n");
    for (label, value) in rows {
        out.push_str(&format!("| {label} | {value} |\n"));
    }
    out
}

/// Render the README for `stats`, pointing the banner at `image_path`.
pub fn generate_readme(stats: &StatsRecord, image_path: &str, today: NaiveDate) -> String {
    let handle = &stats.handle;
    let updated = today.format("%B %-d, %Y");
    let table = stats_table(stats);

    format!(
        r#"<div align="center">

![Profile Banner](./{image_path})

</div>

---

<div align="center">

### 👋 Welcome to my GitHub Profile!

**{name}** · {bio} · {location}

</div>

## 🚀 About Me

- 🔭 I'm currently working on exciting projects at {organization}
- 🌱 Learning new technologies every day
- 👯 Looking to collaborate on open source projects
- 🔗 Find me at {link}

## 📈 GitHub Stats

<div align="center">

![GitHub Stats](https://github-readme-stats.vercel.app/api?username={handle}&show_icons=true&{WIDGET_THEME}&icon_color=58a6ff)

![Top Languages](https://github-readme-stats.vercel.app/api/top-langs/?username={handle}&layout=compact&{WIDGET_THEME})

</div>

{table}
## 📫 Connect With Me

<div align="center">

[![GitHub](https://img.shields.io/badge/GitHub-{badge}-181717?style=for-the-badge&logo=github)](https://github.com/{handle})

</div>

---

<div align="center">

**Last Updated:** {updated}

*This README is automatically updated using GitHub Actions* ⚡

</div>
"#,
        name = stats.name,
        bio = stats.bio,
        location = stats.location,
        organization = stats.organization,
        link = stats.link,
        badge = shields_escape(handle),
    )
}

/// shields.io treats `-` and `_` as separators inside badge text.
fn shields_escape(s: &str) -> String {
    s.replace('-', "--").replace('_', "__")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatsRecord {
        StatsRecord {
            name: "Dinesh".to_string(),
            handle: "Dineshs737".to_string(),
            location: "Srilanka, Mannar".to_string(),
            bio: "Undergraduate Student".to_string(),
            organization: "@Learning".to_string(),
            link: "github.com/Dineshs737".to_string(),
            repository_count: 21,
            followers: 14,
            following: 30,
            commit_estimate: 1247,
            pull_request_count: 89,
            issue_count: 156,
            star_total: 10,
            streak_days: 47,
            estimated_line_count: 13_200,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 8).unwrap()
    }

    #[test]
    fn banner_points_at_image() {
        let readme = generate_readme(&sample(), "profile.svg", today());
        assert!(readme.contains("![Profile Banner](./profile.svg)"));
    }

    #[test]
    fn widgets_use_handle() {
        let readme = generate_readme(&sample(), "profile.svg", today());
        assert!(readme.contains("api?username=Dineshs737&"));
        assert!(readme.contains("https://github.com/Dineshs737"));
    }

    #[test]
    fn footer_has_long_date_without_padding() {
        let readme = generate_readme(&sample(), "profile.svg", today());
        assert!(readme.contains("**Last Updated:** October 8, 2026"));
    }

    #[test]
    fn summary_table_lists_metrics() {
        let readme = generate_readme(&sample(), "profile.svg", today());
        assert!(readme.contains("| Commits (est.) | 1.2k |"));
        assert!(readme.contains("| Current streak | 47 days |"));
        assert!(readme.contains("| Stars | 10 |"));
    }

    #[test]
    fn badge_text_escapes_separators() {
        assert_eq!(shields_escape("my-name_x"), "my--name__x");
    }
}
