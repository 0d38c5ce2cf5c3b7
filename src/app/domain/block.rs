use serde::{Deserialize, Serialize};

pub const MIN_HEADING_LEVEL: u8 = 1;
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Opaque block identifier, unique within a [`Page`](super::page::Page).
/// Assigned when the block is created and never reused or rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u64);

/// The closed set of block kinds a page can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
    Image,
    Link,
    Embed,
    Separator,
}

impl BlockKind {
    /// Get all available kinds, in the order they appear in the add menu.
    pub fn all() -> &'static [BlockKind] {
        &[
            Self::Heading,
            Self::Paragraph,
            Self::Link,
            Self::Image,
            Self::Embed,
            Self::Separator,
        ]
    }

    /// Get the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Heading => "Heading",
            Self::Paragraph => "Paragraph",
            Self::Image => "Image",
            Self::Link => "Link",
            Self::Embed => "Embed HTML",
            Self::Separator => "Separator Line",
        }
    }
}

/// Kind-specific content record. One variant per [`BlockKind`], so a block's
/// content shape always matches its kind by construction.
///
/// The serde tags use the page-plan wire vocabulary (`heading`, `paragraph`,
/// `image`, `link`, `embed`, `hr`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum BlockContent {
    Heading { text: String, level: u8 },
    Paragraph { text: String },
    Image { src: String, alt: String },
    Link { text: String, href: String },
    Embed { code: String },
    #[serde(rename = "hr")]
    Separator {},
}

impl BlockContent {
    /// Default content a freshly added block of the given kind starts with.
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Heading => Self::Heading {
                text: String::new(),
                level: MIN_HEADING_LEVEL,
            },
            BlockKind::Paragraph => Self::Paragraph {
                text: String::new(),
            },
            BlockKind::Image => Self::Image {
                src: String::new(),
                alt: String::new(),
            },
            BlockKind::Link => Self::Link {
                text: String::new(),
                href: String::new(),
            },
            BlockKind::Embed => Self::Embed {
                code: String::new(),
            },
            BlockKind::Separator => Self::Separator {},
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Heading { .. } => BlockKind::Heading,
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::Image { .. } => BlockKind::Image,
            Self::Link { .. } => BlockKind::Link,
            Self::Embed { .. } => BlockKind::Embed,
            Self::Separator {} => BlockKind::Separator,
        }
    }

    /// Clamp a heading level into the valid 1-6 range. Other variants pass
    /// through unchanged. Applied on every write path so an out-of-range
    /// level is never stored.
    pub fn clamped(self) -> Self {
        match self {
            Self::Heading { text, level } => Self::Heading {
                text,
                level: level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL),
            },
            other => other,
        }
    }
}

/// One unit of page content: an identity plus its kind-specific record.
///
/// The content field is private so mutation always goes through
/// [`Page`](super::page::Page) operations, which keep the heading-level and
/// kind invariants intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub id: BlockId,
    content: BlockContent,
}

impl ContentBlock {
    pub fn new(id: BlockId, content: BlockContent) -> Self {
        Self {
            id,
            content: content.clamped(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    pub(crate) fn set_content(&mut self, content: BlockContent) {
        self.content = content.clamped();
    }
}
