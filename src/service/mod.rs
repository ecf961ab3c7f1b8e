pub mod config;
pub mod departments;
pub mod event_levels;
pub mod images;
pub mod roles;
pub mod users;
