//! # Notes Common Library
//!
//! Shared code for the note import crates including:
//! - Common error type
//! - Event types (NoteEvent enum) and the broadcast EventBus
//! - TOML configuration loading
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod events;
pub mod time;

pub use error::{Error, Result};
