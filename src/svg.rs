use crate::format::{format_number, initials};
use crate::stats::StatsRecord;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;
const CARD_X: u32 = 50;
const CARD_Y: u32 = 50;
const CARD_WIDTH: u32 = 1100;
const CARD_HEIGHT: u32 = 600;
const DIVIDER_X: u32 = 600;
const CARD_BOTTOM: u32 = CARD_Y + CARD_HEIGHT;
const AVATAR_Y: u32 = 485;
const AVATAR_RING: u32 = 45;
const INFO_LINE_GAP: u32 = 40;
const ACTIVITY_ROW_GAP: u32 = 60;
const TILE_WIDTH: u32 = 100;
const TILE_GAP: u32 = 10;
const FONT: &str = "'Segoe UI', -apple-system, system-ui, sans-serif";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

pub struct ThemeColors {
    pub page: &'static str,
    pub card: &'static str,
    pub border: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                page: "#0d1117",
                card: "#161b22",
                border: "#30363d",
                title: "#58a6ff",
                text: "#c9d1d9",
                muted: "#8b949e",
                accent: "#1f6feb",
            },
            Theme::Light => ThemeColors {
                page: "#ffffff",
                card: "#f6f8fa",
                border: "#d0d7de",
                title: "#0969da",
                text: "#24292f",
                muted: "#57606a",
                accent: "#218bff",
            },
        }
    }
}

// Utilities for building SVG content

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn build_profile_info(stats: &StatsRecord, c: &ThemeColors) -> String {
    let lines = [
        ("📍", &stats.location),
        ("💼", &stats.bio),
        ("🏢", &stats.organization),
        ("🔗", &stats.link),
    ];

    let mut out = format!(
        r#"<text x="0" y="0" fill="{muted}" font-family="{FONT}" font-size="18">
"#,
        muted = c.muted
    );
    for (i, (icon, value)) in lines.iter().enumerate() {
        let dy = if i == 0 { 0 } else { INFO_LINE_GAP };
        out.push_str(&format!(
            "  <tspan x=\"0\" dy=\"{dy}\">{icon} {}</tspan>\n",
            escape_xml(value)
        ));
    }
    out.push_str("</text>\n");
    out
}

fn build_tiles(stats: &StatsRecord, c: &ThemeColors) -> String {
    let tiles = [
        ("Repositories", stats.repository_count.to_string()),
        ("Followers", format_number(stats.followers)),
        ("Following", stats.following.to_string()),
    ];

    let mut out = String::new();
    for (i, (label, value)) in tiles.iter().enumerate() {
        let x = i as u32 * (TILE_WIDTH + TILE_GAP);
        out.push_str(&format!(
            r#"<g transform="translate({x}, 0)">
  <rect width="{TILE_WIDTH}" height="65" rx="10" fill="{page}" stroke="{border}" stroke-width="2"/>
  <text x="50" y="30" fill="{title}" font-family="{FONT}" font-size="24" font-weight="700" text-anchor="middle">{value}</text>
  <text x="50" y="50" fill="{muted}" font-family="{FONT}" font-size="12" text-anchor="middle">{label}</text>
</g>
"#,
            page = c.page,
            border = c.border,
            title = c.title,
            muted = c.muted,
        ));
    }
    out
}

// Right column: one row per activity metric

fn build_activity_rows(stats: &StatsRecord, c: &ThemeColors) -> String {
    let rows = [
        ("#238636", format_number(stats.commit_estimate), "commits this year"),
        ("#8957e5", stats.pull_request_count.to_string(), "pull requests merged"),
        ("#f85149", stats.issue_count.to_string(), "issues opened"),
        ("#ffd700", format_number(stats.star_total), "stars earned"),
        ("#39d353", format!("{} days", stats.streak_days), "current streak"),
        ("#58a6ff", format_number(stats.estimated_line_count), "lines of code"),
    ];

    let mut out = String::new();
    for (i, (dot, value, label)) in rows.iter().enumerate() {
        let y = i as u32 * ACTIVITY_ROW_GAP;
        // Labels start after the value, which can be wider for "N days".
        let label_x = 35 + 15 * value.chars().count() as u32 + 20;
        out.push_str(&format!(
            r#"<g transform="translate(0, {y})">
  <circle cx="15" cy="15" r="7" fill="{dot}"/>
  <text x="35" y="22" fill="{text}" font-family="{FONT}" font-size="20" font-weight="700">{value}</text>
  <text x="{label_x}" y="22" fill="{muted}" font-family="{FONT}" font-size="18">{label}</text>
</g>
"#,
            text = c.text,
            muted = c.muted,
        ));
    }
    out
}

/// Main SVG generation function
pub fn generate_svg(stats: &StatsRecord, theme: Theme) -> String {
    let c = theme.colors();

    let info = build_profile_info(stats, &c);
    let tiles = build_tiles(stats, &c);
    let activity = build_activity_rows(stats, &c);
    let name = escape_xml(&stats.name);
    let handle = escape_xml(&stats.handle);
    let avatar = escape_xml(&initials(&stats.name));

    format!(
        r##"<svg viewBox="0 0 {WIDTH} {HEIGHT}" xmlns="http://www.w3.org/2000/svg">
<rect width="{WIDTH}" height="{HEIGHT}" fill="{page}"/>
<rect x="{CARD_X}" y="{CARD_Y}" width="{CARD_WIDTH}" height="{CARD_HEIGHT}" rx="20" fill="{card}" stroke="{border}" stroke-width="3"/>
<line x1="{DIVIDER_X}" y1="{CARD_Y}" x2="{DIVIDER_X}" y2="{CARD_BOTTOM}" stroke="{border}" stroke-width="3"/>

<g transform="translate(50, 0)">
<text x="250" y="120" fill="{title}" font-family="{FONT}" font-size="32" font-weight="700" text-anchor="middle">{name}</text>
<text x="250" y="155" fill="{muted}" font-family="{FONT}" font-size="20" text-anchor="middle">@{handle}</text>
<g transform="translate(80, 200)">
{info}</g>
<g transform="translate(60, 400)">
{tiles}</g>
</g>

<g transform="translate({DIVIDER_X}, 0)">
<text x="300" y="120" fill="{text}" font-family="{FONT}" font-size="32" font-weight="700" text-anchor="middle">GitHub Activity</text>
<g transform="translate(80, 180)">
{activity}</g>
</g>

<g transform="translate({DIVIDER_X}, {AVATAR_Y})">
<circle cx="0" cy="0" r="{AVATAR_RING}" fill="{page}" stroke="{title}" stroke-width="3">
  <animate attributeName="stroke-width" values="3;5;3" dur="2s" repeatCount="indefinite"/>
</circle>
<circle cx="0" cy="0" r="40" fill="url(#avatarGradient)"/>
<text x="0" y="10" fill="#ffffff" font-family="{FONT}" font-size="32" font-weight="700" text-anchor="middle">{avatar}</text>
</g>

<defs>
<radialGradient id="avatarGradient">
  <stop offset="0%" stop-color="{title}"/>
  <stop offset="100%" stop-color="{accent}"/>
</radialGradient>
</defs>
</svg>
"##,
        page = c.page,
        card = c.card,
        border = c.border,
        title = c.title,
        text = c.text,
        muted = c.muted,
        accent = c.accent,
    )
}
