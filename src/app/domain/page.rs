use serde::{Deserialize, Serialize};

use super::block::{BlockContent, BlockId, BlockKind, ContentBlock};

/// Direction for swapping a block with its immediate neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The page being authored: a title plus the ordered block sequence.
///
/// Sequence order is presentation order; the Nth block renders as the Nth
/// element of the generated document body. Ids come from a per-page monotonic
/// counter, so they are unique for the lifetime of the page and deterministic
/// for tests.
///
/// Operations that reference an absent id are silent no-ops throughout; the
/// store never signals not-found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    title: String,
    blocks: Vec<ContentBlock>,
    next_id: u64,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a page from a deserialized plan. Ids are assigned here, never
    /// taken from the plan. Falls back to `fallback_title` when the plan has
    /// no title.
    pub fn from_plan(plan: PagePlan, fallback_title: &str) -> Self {
        let title = plan
            .title
            .unwrap_or_else(|| fallback_title.to_string());
        let mut page = Self::new(title);
        for content in plan.blocks {
            let id = page.add_block(content.kind());
            page.update_block_content(id, content);
        }
        page
    }

    fn next_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new block of the given kind with default content.
    pub fn add_block(&mut self, kind: BlockKind) -> BlockId {
        let id = self.next_block_id();
        self.blocks
            .push(ContentBlock::new(id, BlockContent::default_for(kind)));
        id
    }

    /// Replace a block's content wholesale. No-op if the id is absent, or if
    /// the new content's kind differs from the block's kind (a block's kind
    /// is fixed for its lifetime).
    pub fn update_block_content(&mut self, id: BlockId, content: BlockContent) {
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return;
        };
        if block.kind() != content.kind() {
            return;
        }
        block.set_content(content);
    }

    /// Remove a block by id, preserving the relative order of the rest.
    pub fn delete_block(&mut self, id: BlockId) {
        if let Some(idx) = self.blocks.iter().position(|b| b.id == id) {
            self.blocks.remove(idx);
        }
    }

    /// Swap a block with its neighbor in the given direction. No-op at the
    /// boundary.
    pub fn move_block(&mut self, id: BlockId, direction: MoveDirection) {
        let Some(idx) = self.blocks.iter().position(|b| b.id == id) else {
            return;
        };
        let target = match direction {
            MoveDirection::Up => {
                if idx == 0 {
                    return;
                }
                idx - 1
            }
            MoveDirection::Down => {
                if idx + 1 >= self.blocks.len() {
                    return;
                }
                idx + 1
            }
        };
        self.blocks.swap(idx, target);
    }

    /// Replace the title verbatim, no trimming or validation.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Page description as read from a JSON plan file. Blocks carry no ids; the
/// store assigns them on import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagePlan {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub blocks: Vec<BlockContent>,
}
