//! CLI command handlers

pub mod add;
pub mod cleanup;
pub mod get;
pub mod index;
pub mod invoke;
pub mod open;
pub mod search;
pub mod status;
