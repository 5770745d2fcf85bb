//! Terminal dashboard for the portfolio API.

pub mod admin;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod event;
pub mod terminal;
pub mod ui;
