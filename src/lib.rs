//! Browse and change settings described by a JSON-Schema-like document
//!
//! - `schema`: schema document model and the flat settings catalog
//! - `settings`: the live configuration store with global and workspace scopes
//! - `controller`: menus, typed edits and the default-collapsing write path
//! - `config`: the tool's own configuration and persistent state
//! - `ui`: picker and prompt abstraction with a terminal implementation

pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod schema;
pub mod settings;
pub mod ui;
