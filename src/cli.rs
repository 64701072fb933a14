//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use crate::github::DEFAULT_API_URL;
use crate::stats::{DEFAULT_HANDLE, ProfileDefaults};
use crate::svg::Theme;

/// Render a GitHub profile card (SVG) and profile README from live stats.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub token used for every API call
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Profile handle to render
    #[arg(short, long, env = "GITHUB_USERNAME", default_value = DEFAULT_HANDLE)]
    pub username: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, value_name = "URL")]
    pub api_url: String,

    /// Where to write the profile card
    #[arg(long, default_value = "profile.svg", value_name = "FILE")]
    pub svg_out: PathBuf,

    /// Where to write the README
    #[arg(long, default_value = "README.md", value_name = "FILE")]
    pub readme_out: PathBuf,

    /// Color theme of the card
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    pub theme: Theme,

    /// Shown when the profile has no location
    #[arg(long, value_name = "TEXT")]
    pub default_location: Option<String>,

    /// Shown when the profile has no bio
    #[arg(long, value_name = "TEXT")]
    pub default_bio: Option<String>,

    /// Shown when the profile has no company
    #[arg(long, value_name = "TEXT")]
    pub default_organization: Option<String>,

    /// Shown when the profile has no blog (defaults to github.com/<handle>)
    #[arg(long, value_name = "TEXT")]
    pub default_link: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }

    /// Built-in defaults with any command-line overrides applied.
    pub fn profile_defaults(&self) -> ProfileDefaults {
        let mut defaults = ProfileDefaults::default();
        if let Some(location) = &self.default_location {
            defaults.location = location.clone();
        }
        if let Some(bio) = &self.default_bio {
            defaults.bio = bio.clone();
        }
        if let Some(organization) = &self.default_organization {
            defaults.organization = organization.clone();
        }
        if self.default_link.is_some() {
            defaults.link = self.default_link.clone();
        }
        defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("profilecard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn explicit_flags_are_parsed() {
        let args = parse(&[
            "--token",
            "t0k",
            "--username",
            "octocat",
            "--api-url",
            "http://localhost:9999",
            "--theme",
            "light",
        ]);
        assert_eq!(args.token, "t0k");
        assert_eq!(args.username, "octocat");
        assert_eq!(args.api_url, "http://localhost:9999");
        assert_eq!(args.theme, Theme::Light);
        assert_eq!(args.svg_out, PathBuf::from("profile.svg"));
        assert_eq!(args.readme_out, PathBuf::from("README.md"));
    }

    #[test]
    fn log_level_follows_flags() {
        assert_eq!(parse(&["--token", "t"]).log_level(), Level::INFO);
        assert_eq!(parse(&["--token", "t", "-v"]).log_level(), Level::DEBUG);
        assert_eq!(parse(&["--token", "t", "-q"]).log_level(), Level::WARN);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Args::try_parse_from(["profilecard", "--token", "t", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn default_overrides_replace_builtins() {
        let args = parse(&["--token", "t", "--default-bio", "Rustacean"]);
        let defaults = args.profile_defaults();
        assert_eq!(defaults.bio, "Rustacean");
        assert_eq!(defaults.location, ProfileDefaults::default().location);
    }
}
