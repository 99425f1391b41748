pub mod catalog;
pub mod config;
pub mod lookup;
pub mod lookup_ui;
pub mod prompts;
