pub mod popup;
pub mod radar;
pub mod skill_bars;
pub mod tables;
