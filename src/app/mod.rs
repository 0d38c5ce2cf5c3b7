//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (blocks, page, messages, settings)
//! - `services/` - Business operations (HTML generation, export, suggestions)
//! - `error.rs` - Shared error type
//! - `state.rs` - Main application coordinator

pub mod domain;
pub mod error;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use domain::{
    BlockContent, BlockId, BlockKind, BuilderSettings, ContentBlock, Message, MoveDirection, Page,
    PagePlan, SuggestionOutcome,
};
pub use error::{AppError, Result};
pub use services::{SuggestClient, generate_document, render_block};
pub use state::{BuilderState, SuggestionKind};
