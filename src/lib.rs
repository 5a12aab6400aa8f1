// Site library - exposes all core modules for testing

pub mod app;
pub mod command_line;
pub mod commands;
pub mod config;
pub mod gallery;
pub mod resume;
pub mod tracing_setup;
pub mod view;
