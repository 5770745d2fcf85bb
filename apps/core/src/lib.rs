//! Data layer of the portfolio dashboard.
//!
//! [`normalize`] turns whatever the skills tracker returned into a stable
//! [`NormalizedStats`] record, [`RadarLayout`] places the top skills on a
//! five-axis star chart, and [`domain`] holds the typed profile and
//! repository documents served by the portfolio API.

mod log;

pub mod coerce;
pub mod domain;
pub mod normalize;
pub mod radar;
pub mod traverse;

pub use domain::{
    featured_projects, format_date, format_number, merge_projects, repos_from_value,
    skill_bar_percent, Certification, Experience, Profile, Project, Repo, RepoOverride,
};
pub use normalize::{normalize, normalize_value, NormalizedStats, Rank, Skill};
pub use radar::{polygon_points, Point, RadarLayout, SkillPoint};
pub use traverse::{pick_deep, Traversable};
