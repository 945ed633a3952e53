// Workout log core: exercise data model, derived metrics and session state

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod storage;
