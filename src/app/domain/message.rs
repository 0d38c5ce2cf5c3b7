use super::block::{BlockContent, BlockId, BlockKind};
use super::page::MoveDirection;

/// All messages the editing surface can send.
/// Each edit action maps to one of these; the application coordinator
/// dispatches them to the block store.
#[derive(Debug, Clone)]
pub enum Message {
    // Block edits
    AddBlock(BlockKind),
    UpdateBlock(BlockId, BlockContent),
    DeleteBlock(BlockId),
    MoveBlock(BlockId, MoveDirection),

    // Page
    SetTitle(String),
    GenerateHtml,

    // Background suggestion results
    SuggestionReady(BlockId, SuggestionOutcome),
}

/// Result of a completed suggestion request, delivered back through the
/// normal message path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    HeadingLevel(u8),
    ImageAltText(String),
}
