// Library exports for the workout log CLI
// This allows testing of internal modules

pub mod commands;
pub mod ui;
