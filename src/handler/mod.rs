pub mod admin;
pub mod departments;
pub mod event_levels;
pub mod health;
pub mod images;
pub mod roles;
pub mod users;
