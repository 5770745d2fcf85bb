use color_eyre::Result;
use portfolio_core::Project;
use throbber_widgets_tui::ThrobberState;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{ApiClient, LoadOutcome};
use crate::dashboard::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Missions,
    Intel,
    Profile,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Missions, Self::Intel, Self::Profile];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Missions => "Missions",
            Self::Intel => "Intel",
            Self::Profile => "Profile",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Missions => 0,
            Self::Intel => 1,
            Self::Profile => 2,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Missions),
            1 => Some(Self::Intel),
            2 => Some(Self::Profile),
            _ => None,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Missions => Self::Intel,
            Self::Intel => Self::Profile,
            Self::Profile => Self::Missions,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Self::Missions => Self::Profile,
            Self::Intel => Self::Missions,
            Self::Profile => Self::Intel,
        }
    }
}

/// Where the background load stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
}

pub struct App {
    pub running: bool,
    pub tab: Tab,
    pub selected_project: usize,
    pub dashboard: Option<Dashboard>,
    pub load_state: LoadState,
    pub status_message: String,
    pub throbber: ThrobberState,
    client: ApiClient,
    pending: Option<JoinHandle<LoadOutcome>>,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self {
            running: true,
            tab: Tab::Missions,
            selected_project: 0,
            dashboard: None,
            load_state: LoadState::Idle,
            status_message: String::new(),
            throbber: ThrobberState::default(),
            client,
            pending: None,
        }
    }

    /// Spawns `load_all` unless a load is already in flight.
    pub fn start_loading(&mut self) {
        if self.pending.is_some() {
            return;
        }

        let client = self.client.clone();
        self.pending = Some(tokio::spawn(async move { client.load_all().await }));
        self.load_state = LoadState::Loading;
        self.status_message = format!("Loading from {}...", self.client.bases().join(", "));
        debug!("dashboard load started");
    }

    pub fn update(&mut self) {
        if self.load_state == LoadState::Loading {
            self.throbber.calc_next();
        }
    }

    /// Collects a finished load without blocking the event loop.
    pub async fn poll_loading(&mut self) -> Result<()> {
        if !self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            return Ok(());
        }

        if let Some(handle) = self.pending.take() {
            let outcome = handle.await?;
            self.apply_outcome(outcome);
        }
        Ok(())
    }

    pub fn apply_outcome(&mut self, outcome: LoadOutcome) {
        let dashboard = Dashboard::from_outcome(outcome);

        let failed = [
            dashboard.profile.is_err(),
            dashboard.repos_error.is_some(),
            dashboard.intel.is_err(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count();

        self.status_message = if failed == 0 {
            format!("Updated {}", dashboard.fetched_at.format("%H:%M:%S"))
        } else {
            format!(
                "Updated {} with {failed} section(s) unavailable",
                dashboard.fetched_at.format("%H:%M:%S")
            )
        };
        info!(failed, projects = dashboard.projects.len(), "dashboard loaded");

        self.selected_project = self
            .selected_project
            .min(dashboard.projects.len().saturating_sub(1));
        self.dashboard = Some(dashboard);
        self.load_state = LoadState::Ready;
    }

    pub fn projects(&self) -> &[Project] {
        self.dashboard
            .as_ref()
            .map_or(&[][..], |dashboard| dashboard.projects.as_slice())
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects().get(self.selected_project)
    }

    pub fn select_next_project(&mut self) {
        let len = self.projects().len();
        if len > 0 {
            self.selected_project = (self.selected_project + 1) % len;
        }
    }

    pub fn select_previous_project(&mut self) {
        let len = self.projects().len();
        if len > 0 {
            self.selected_project = (self.selected_project + len - 1) % len;
        }
    }
}
