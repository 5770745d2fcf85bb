//! Everything one load produced, shaped for display.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use portfolio_core::normalize::ROOM_DISPLAY_LIMIT;
use portfolio_core::radar::DEFAULT_AXIS_COUNT;
use portfolio_core::{
    featured_projects, format_date, merge_projects, normalize, NormalizedStats, Profile, Project,
    RadarLayout, SkillPoint,
};
use serde::Serialize;

use crate::api::LoadOutcome;

pub const FALLBACK_NAME: &str = "Portfolio";
pub const FALLBACK_HEADLINE: &str = "Security-minded software engineer";

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub profile: Result<Profile, String>,
    /// Curated projects merged with fetched repositories. Never empty.
    pub projects: Vec<Project>,
    pub repos_error: Option<String>,
    pub intel: Result<NormalizedStats, String>,
    pub radar: RadarLayout,
    pub fetched_at: DateTime<Local>,
}

impl Dashboard {
    pub fn from_outcome(outcome: LoadOutcome) -> Self {
        Self::from_parts(outcome, Local::now())
    }

    pub fn from_parts(outcome: LoadOutcome, fetched_at: DateTime<Local>) -> Self {
        let (repos, repos_error) = match outcome.repos {
            Ok(repos) => (repos, None),
            Err(error) => (Vec::new(), Some(error.to_string())),
        };

        let intel = outcome
            .tracker
            .map(|raw| normalize(&raw))
            .map_err(|error| error.to_string());

        let radar = RadarLayout::new(
            intel
                .as_ref()
                .map_or(&[][..], |stats| stats.top_skills(DEFAULT_AXIS_COUNT)),
        );

        Self {
            profile: outcome.profile.map_err(|error| error.to_string()),
            projects: merge_projects(featured_projects(), &repos),
            repos_error,
            intel,
            radar,
            fetched_at,
        }
    }

    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map_or(FALLBACK_NAME, |profile| profile.display_name_or(FALLBACK_NAME))
    }

    pub fn headline(&self) -> &str {
        self.profile
            .as_ref()
            .map_or(FALLBACK_HEADLINE, |profile| {
                profile.headline_or(FALLBACK_HEADLINE)
            })
    }

    pub fn report(&self) -> HeadlessReport<'_> {
        HeadlessReport {
            display_name: self.display_name(),
            headline: self.headline(),
            profile_error: self.profile.as_ref().err().map(String::as_str),
            projects: &self.projects,
            repos_error: self.repos_error.as_deref(),
            tracker: self.intel.as_ref().ok(),
            tracker_error: self.intel.as_ref().err().map(String::as_str),
            radar: &self.radar.points,
            fetched_at: self.fetched_at.to_rfc3339(),
        }
    }

    /// Plain-text summary for headless runs.
    pub fn text_report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} - {}", self.display_name(), self.headline());
        let _ = writeln!(out, "Fetched: {}", self.fetched_at.format("%Y-%m-%d %H:%M:%S"));
        if let Err(error) = &self.profile {
            let _ = writeln!(out, "Profile unavailable: {error}");
        }

        let _ = writeln!(out, "\nMissions ({}):", self.projects.len());
        if let Some(error) = &self.repos_error {
            let _ = writeln!(out, "  (repositories unavailable: {error})");
        }
        for project in &self.projects {
            let _ = writeln!(
                out,
                "  {:<28} {:<12} {:<14} {}",
                project.name,
                project.language,
                format_date(project.pushed_at.as_deref()),
                project.url
            );
        }

        let _ = writeln!(out, "\nIntel:");
        match &self.intel {
            Err(error) => {
                let _ = writeln!(out, "  Tracker unavailable: {error}");
            }
            Ok(stats) if stats.disabled => {
                let _ = writeln!(out, "  {}", stats.message.as_deref().unwrap_or_default());
            }
            Ok(stats) => write_intel(&mut out, stats, &self.radar.points),
        }

        out
    }
}

fn write_intel(out: &mut String, stats: &NormalizedStats, radar: &[SkillPoint]) {
    let _ = writeln!(out, "  Global rank:     {}", stats.rank);
    let _ = writeln!(out, "  Rooms completed: {}", stats.rooms_completed_display());
    let _ = writeln!(out, "  Skills tracked:  {}", stats.skills.len());

    let _ = writeln!(out, "  Radar:");
    for point in radar {
        let _ = writeln!(
            out,
            "    {:<16} {:>6.1}  ({:.0}% of radius)",
            point.name,
            point.value,
            point.fraction * 100.0
        );
    }

    if let Some(note) = &stats.sync_note {
        let _ = writeln!(out, "  Note: {note}");
    }

    let (rooms, hidden) = stats.visible_rooms(ROOM_DISPLAY_LIMIT);
    if !rooms.is_empty() {
        let _ = writeln!(out, "  Rooms: {}", rooms.join(", "));
        if hidden > 0 {
            let _ = writeln!(out, "  +{hidden} more rooms");
        }
    }
}

/// JSON shape printed by `--headless --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlessReport<'a> {
    pub display_name: &'a str,
    pub headline: &'a str,
    pub profile_error: Option<&'a str>,
    pub projects: &'a [Project],
    pub repos_error: Option<&'a str>,
    pub tracker: Option<&'a NormalizedStats>,
    pub tracker_error: Option<&'a str>,
    pub radar: &'a [SkillPoint],
    pub fetched_at: String,
}
