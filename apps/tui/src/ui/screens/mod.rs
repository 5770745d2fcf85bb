pub mod intel;
pub mod missions;
pub mod profile;
