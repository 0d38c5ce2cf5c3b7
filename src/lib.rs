//! Pagesmith - a form-driven static website builder.
//!
//! A page is an ordered sequence of typed content blocks (heading, paragraph,
//! image, link, embed, separator) plus a title. The generator maps that
//! sequence deterministically to one self-contained HTML5 document. An
//! optional suggestion service proposes heading levels and image alt text;
//! its failures never reach the page model.

pub mod app;

pub use app::{
    AppError, BlockContent, BlockId, BlockKind, BuilderSettings, BuilderState, ContentBlock,
    Message, MoveDirection, Page, PagePlan, Result, SuggestClient, SuggestionKind,
    SuggestionOutcome, generate_document, render_block,
};
