// API module - HTTP endpoints

pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod middleware;
pub mod schedule;
