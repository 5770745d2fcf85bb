//! Typed documents served by the portfolio API and their display helpers.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::log::warn;

pub const PROFILE_PATH: &str = "/api/profile";
pub const REPOS_PATH: &str = "/api/repos";
pub const TRACKER_PATH: &str = "/api/tryhackme";

pub const PROJECT_IMAGE: &str = "/assets/project-fallback.jpeg";
const MISSING_DESCRIPTION: &str = "No description available yet.";

/// The backend serializes empty slices as `null`; read those as empty lists.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub date_range: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: Vec<String>,
}

/// `/api/profile` document. Missing fields fall back to empty values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    pub headline: String,
    pub bio: String,
    pub cv_url: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub certifications: Vec<Certification>,
    #[serde(deserialize_with = "null_as_empty")]
    pub experience: Vec<Experience>,
}

impl Profile {
    pub fn display_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty_or(&self.display_name, fallback)
    }

    pub fn headline_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty_or(&self.headline, fallback)
    }

    pub fn bio_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty_or(&self.bio, fallback)
    }
}

/// One entry of `/api/repos`, with admin overrides already applied upstream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Repo {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub url: String,
    pub description: String,
    pub language: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub topics: Vec<String>,
    pub readme: String,
    pub pushed_at: String,
    pub stars: u64,
    pub forks: u64,
    pub pinned: bool,
    pub pin_order: i64,
}

/// Admin mutation body for `PUT /api/admin/repo/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepoOverride {
    pub description: String,
    pub readme: String,
    pub pinned: bool,
    pub pin_order: i64,
}

/// A carousel entry: either curated or derived from a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub url: String,
    pub language: String,
    pub pushed_at: Option<String>,
    pub image: String,
}

impl Project {
    fn from_repo(repo: &Repo) -> Self {
        Self {
            name: repo.name.clone(),
            description: non_empty_or(&repo.description, MISSING_DESCRIPTION).to_string(),
            url: repo.url.clone(),
            language: non_empty_or(&repo.language, "Unknown").to_string(),
            pushed_at: Some(repo.pushed_at.clone()).filter(|pushed| !pushed.is_empty()),
            image: PROJECT_IMAGE.to_string(),
        }
    }

    fn placeholder() -> Self {
        Self {
            name: "Mission Slot".to_string(),
            description: "Projects will appear here once repository data loads from GitHub."
                .to_string(),
            url: "#".to_string(),
            language: "N/A".to_string(),
            pushed_at: None,
            image: PROJECT_IMAGE.to_string(),
        }
    }
}

pub fn featured_projects() -> Vec<Project> {
    vec![Project {
        name: "Green-Cart".to_string(),
        description: "Main capstone project for COS301-SE-2025. Featured mission.".to_string(),
        url: "https://github.com/COS301-SE-2025/Green-Cart".to_string(),
        language: "Capstone".to_string(),
        pushed_at: None,
        image: PROJECT_IMAGE.to_string(),
    }]
}

/// Curated projects first, then repositories not already shown.
///
/// A repository is a duplicate when its URL (if any) or its name matches an
/// earlier entry, ignoring case. An empty result becomes a single placeholder.
pub fn merge_projects(featured: Vec<Project>, repos: &[Repo]) -> Vec<Project> {
    let mut seen_urls: HashSet<String> = featured
        .iter()
        .map(|project| project.url.to_lowercase())
        .filter(|url| !url.is_empty())
        .collect();
    let mut seen_names: HashSet<String> = featured
        .iter()
        .map(|project| project.name.to_lowercase())
        .collect();

    let mut merged = featured;
    for repo in repos {
        let url_key = repo.url.to_lowercase();
        let name_key = repo.name.to_lowercase();
        if (!url_key.is_empty() && seen_urls.contains(&url_key)) || seen_names.contains(&name_key)
        {
            continue;
        }
        if !url_key.is_empty() {
            seen_urls.insert(url_key);
        }
        seen_names.insert(name_key);
        merged.push(Project::from_repo(repo));
    }

    if merged.is_empty() {
        merged.push(Project::placeholder());
    }
    merged
}

/// Decodes `/api/repos`. A non-array body is an empty list and entries that
/// do not fit the repository shape are skipped individually.
pub fn repos_from_value(value: &Value) -> Vec<Repo> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    let repos: Vec<Repo> = items
        .iter()
        .filter_map(|item| Repo::deserialize(item).ok())
        .collect();

    let skipped = items.len() - repos.len();
    if skipped > 0 {
        warn!(skipped, "skipping malformed repository entries");
    }
    repos
}

/// `"Mar 4, 2025"` for RFC 3339 timestamps or plain dates, `"N/A"` otherwise.
pub fn format_date(iso: Option<&str>) -> String {
    let Some(iso) = iso.map(str::trim).filter(|iso| !iso.is_empty()) else {
        return "N/A".to_string();
    };

    let date = DateTime::parse_from_rfc3339(iso)
        .map(|stamp| stamp.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(iso, "%Y-%m-%d"));

    date.map_or_else(|_| "N/A".to_string(), |date| date.format("%b %-d, %Y").to_string())
}

/// Thousands-grouped number with at most three fractional digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format!("{:.3}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Width of a skill bar as a percentage of the track, never thinner than 6%.
pub fn skill_bar_percent(value: f64, max_value: f64) -> f64 {
    (value / max_value.max(1.0) * 100.0).max(6.0)
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
