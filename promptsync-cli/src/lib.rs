// Re-export modules for use in tests
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod context;
pub mod display;
pub mod editor;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod prompter;
