pub mod block;
pub mod message;
pub mod page;
pub mod settings;

pub use block::{BlockContent, BlockId, BlockKind, ContentBlock};
pub use message::{Message, SuggestionOutcome};
pub use page::{MoveDirection, Page, PagePlan};
pub use settings::BuilderSettings;
