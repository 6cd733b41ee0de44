//! CLI module graph.

pub mod add;
pub mod command;
pub mod config;
pub mod delete;
pub mod diagnostic;
pub mod edit;
pub mod form;
pub mod list;
pub mod output;
pub mod paths;
pub mod preview;
pub mod prompt;
pub mod run;
pub mod session;
pub mod show;
pub mod summary;
pub mod table;
pub mod view;
