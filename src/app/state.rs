use crate::app::domain::block::{BlockContent, BlockId, BlockKind};
use crate::app::domain::message::{Message, SuggestionOutcome};
use crate::app::domain::page::Page;
use crate::app::domain::settings::BuilderSettings;
use crate::app::services::generator::generate_document;

/// What a pending suggestion request is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    HeadingLevel,
    ImageAltText,
}

impl SuggestionKind {
    fn matches(&self, outcome: &SuggestionOutcome) -> bool {
        matches!(
            (self, outcome),
            (Self::HeadingLevel, SuggestionOutcome::HeadingLevel(_))
                | (Self::ImageAltText, SuggestionOutcome::ImageAltText(_))
        )
    }
}

/// An in-flight suggestion request. The content snapshot taken at request
/// time decides whether the eventual result is still applicable.
#[derive(Debug, Clone)]
struct PendingSuggestion {
    block_id: BlockId,
    kind: SuggestionKind,
    snapshot: BlockContent,
}

/// Main application coordinator: owns the page, the settings, and the set of
/// in-flight suggestion requests. Edit operations arrive as [`Message`]s and
/// are dispatched to the store; suggestion results re-enter through the same
/// path and are committed only if still fresh.
pub struct BuilderState {
    pub page: Page,
    pub settings: BuilderSettings,
    pending: Vec<PendingSuggestion>,
    last_generated: Option<String>,
}

impl BuilderState {
    pub fn new(settings: BuilderSettings) -> Self {
        let page = Page::new(settings.default_title.clone());
        Self::with_page(page, settings)
    }

    pub fn with_page(page: Page, settings: BuilderSettings) -> Self {
        Self {
            page,
            settings,
            pending: Vec::new(),
            last_generated: None,
        }
    }

    /// Dispatch one editor message.
    pub fn apply(&mut self, message: Message) {
        match message {
            Message::AddBlock(kind) => {
                self.page.add_block(kind);
            }
            Message::UpdateBlock(id, content) => {
                self.page.update_block_content(id, content);
            }
            Message::DeleteBlock(id) => {
                self.page.delete_block(id);
            }
            Message::MoveBlock(id, direction) => {
                self.page.move_block(id, direction);
            }
            Message::SetTitle(title) => {
                self.page.set_title(title);
            }
            Message::GenerateHtml => {
                let html = generate_document(&self.page);
                self.last_generated = Some(html);
            }
            Message::SuggestionReady(id, outcome) => {
                self.complete_suggestion(id, outcome);
            }
        }
    }

    /// Start a suggestion request for a block. Returns the payload to send
    /// to the service (heading text or image data URL), or None if the block
    /// is missing or its kind doesn't take this suggestion.
    ///
    /// A new request for the same block and kind supersedes the previous one.
    pub fn begin_suggestion(&mut self, id: BlockId, kind: SuggestionKind) -> Option<String> {
        let block = self.page.block(id)?;
        let payload = match (kind, block.content()) {
            (SuggestionKind::HeadingLevel, BlockContent::Heading { text, .. }) => text.clone(),
            (SuggestionKind::ImageAltText, BlockContent::Image { src, .. }) => src.clone(),
            _ => return None,
        };
        let snapshot = block.content().clone();

        self.pending
            .retain(|p| !(p.block_id == id && p.kind == kind));
        self.pending.push(PendingSuggestion {
            block_id: id,
            kind,
            snapshot,
        });
        Some(payload)
    }

    /// Commit a suggestion result if it is still fresh: the request must be
    /// pending, the block must still exist, and its content must be unchanged
    /// since the request was made. A stale or unmatched result is discarded.
    fn complete_suggestion(&mut self, id: BlockId, outcome: SuggestionOutcome) {
        let Some(idx) = self
            .pending
            .iter()
            .position(|p| p.block_id == id && p.kind.matches(&outcome))
        else {
            return;
        };
        let request = self.pending.remove(idx);

        let Some(block) = self.page.block(id) else {
            // Block was deleted while the request was in flight.
            return;
        };
        if block.content() != &request.snapshot {
            // Edited since the request; the result no longer applies.
            return;
        }

        let updated = match (outcome, block.content()) {
            (SuggestionOutcome::HeadingLevel(level), BlockContent::Heading { text, .. }) => {
                BlockContent::Heading {
                    text: text.clone(),
                    level,
                }
            }
            (SuggestionOutcome::ImageAltText(alt), BlockContent::Image { src, .. }) => {
                BlockContent::Image {
                    src: src.clone(),
                    alt,
                }
            }
            _ => return,
        };
        self.page.update_block_content(id, updated);
    }

    pub fn pending_suggestions(&self) -> usize {
        self.pending.len()
    }

    /// Generate the document for the current page and remember it.
    pub fn generate(&mut self) -> &str {
        let html = generate_document(&self.page);
        self.last_generated.insert(html)
    }

    pub fn last_generated(&self) -> Option<&str> {
        self.last_generated.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::page::MoveDirection;

    fn state() -> BuilderState {
        BuilderState::new(BuilderSettings::default())
    }

    fn heading_id(state: &mut BuilderState, text: &str) -> BlockId {
        let id = state.page.add_block(BlockKind::Heading);
        state.page.update_block_content(
            id,
            BlockContent::Heading {
                text: text.to_string(),
                level: 1,
            },
        );
        id
    }

    #[test]
    fn test_new_uses_default_title() {
        let s = state();
        assert_eq!(s.page.title(), "My Generated Website");
        assert!(s.page.is_empty());
    }

    #[test]
    fn test_apply_edit_messages() {
        let mut s = state();
        s.apply(Message::AddBlock(BlockKind::Heading));
        s.apply(Message::AddBlock(BlockKind::Paragraph));
        assert_eq!(s.page.count(), 2);

        let first = s.page.blocks()[0].id;
        let second = s.page.blocks()[1].id;
        s.apply(Message::MoveBlock(second, MoveDirection::Up));
        assert_eq!(s.page.blocks()[0].id, second);

        s.apply(Message::DeleteBlock(first));
        assert_eq!(s.page.count(), 1);

        s.apply(Message::SetTitle("Renamed".to_string()));
        assert_eq!(s.page.title(), "Renamed");
    }

    #[test]
    fn test_generate_message_caches_output() {
        let mut s = state();
        assert!(s.last_generated().is_none());
        s.apply(Message::GenerateHtml);
        assert!(s.last_generated().unwrap().starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_fresh_suggestion_is_applied() {
        let mut s = state();
        let id = heading_id(&mut s, "Welcome");

        let payload = s.begin_suggestion(id, SuggestionKind::HeadingLevel).unwrap();
        assert_eq!(payload, "Welcome");
        assert_eq!(s.pending_suggestions(), 1);

        s.apply(Message::SuggestionReady(
            id,
            SuggestionOutcome::HeadingLevel(2),
        ));
        assert_eq!(
            s.page.block(id).unwrap().content(),
            &BlockContent::Heading {
                text: "Welcome".to_string(),
                level: 2
            }
        );
        assert_eq!(s.pending_suggestions(), 0);
    }

    #[test]
    fn test_stale_result_after_edit_is_discarded() {
        let mut s = state();
        let id = heading_id(&mut s, "Welcome");
        s.begin_suggestion(id, SuggestionKind::HeadingLevel).unwrap();

        // User keeps typing while the request is in flight.
        s.apply(Message::UpdateBlock(
            id,
            BlockContent::Heading {
                text: "Welcome home".to_string(),
                level: 1,
            },
        ));
        s.apply(Message::SuggestionReady(
            id,
            SuggestionOutcome::HeadingLevel(4),
        ));

        assert_eq!(
            s.page.block(id).unwrap().content(),
            &BlockContent::Heading {
                text: "Welcome home".to_string(),
                level: 1
            }
        );
        assert_eq!(s.pending_suggestions(), 0);
    }

    #[test]
    fn test_result_for_deleted_block_is_noop() {
        let mut s = state();
        let id = heading_id(&mut s, "Welcome");
        s.begin_suggestion(id, SuggestionKind::HeadingLevel).unwrap();
        s.apply(Message::DeleteBlock(id));

        // Must not panic, must not resurrect anything.
        s.apply(Message::SuggestionReady(
            id,
            SuggestionOutcome::HeadingLevel(3),
        ));
        assert!(s.page.is_empty());
        assert_eq!(s.pending_suggestions(), 0);
    }

    #[test]
    fn test_result_without_request_is_discarded() {
        let mut s = state();
        let id = heading_id(&mut s, "Welcome");
        s.apply(Message::SuggestionReady(
            id,
            SuggestionOutcome::HeadingLevel(5),
        ));
        assert_eq!(
            s.page.block(id).unwrap().content(),
            &BlockContent::Heading {
                text: "Welcome".to_string(),
                level: 1
            }
        );
    }

    #[test]
    fn test_mismatched_outcome_kind_is_discarded() {
        let mut s = state();
        let id = heading_id(&mut s, "Welcome");
        s.begin_suggestion(id, SuggestionKind::HeadingLevel).unwrap();
        s.apply(Message::SuggestionReady(
            id,
            SuggestionOutcome::ImageAltText("a dog".to_string()),
        ));
        // The pending heading request survives an alt-text result.
        assert_eq!(s.pending_suggestions(), 1);
        assert_eq!(
            s.page.block(id).unwrap().content(),
            &BlockContent::Heading {
                text: "Welcome".to_string(),
                level: 1
            }
        );
    }

    #[test]
    fn test_alt_text_suggestion_flow() {
        let mut s = state();
        let id = s.page.add_block(BlockKind::Image);
        s.page.update_block_content(
            id,
            BlockContent::Image {
                src: "data:image/png;base64,AAAA".to_string(),
                alt: String::new(),
            },
        );

        let payload = s.begin_suggestion(id, SuggestionKind::ImageAltText).unwrap();
        assert_eq!(payload, "data:image/png;base64,AAAA");

        s.apply(Message::SuggestionReady(
            id,
            SuggestionOutcome::ImageAltText("A single pixel".to_string()),
        ));
        assert_eq!(
            s.page.block(id).unwrap().content(),
            &BlockContent::Image {
                src: "data:image/png;base64,AAAA".to_string(),
                alt: "A single pixel".to_string()
            }
        );
    }

    #[test]
    fn test_begin_suggestion_wrong_kind_returns_none() {
        let mut s = state();
        let id = s.page.add_block(BlockKind::Paragraph);
        assert!(s.begin_suggestion(id, SuggestionKind::HeadingLevel).is_none());
        assert_eq!(s.pending_suggestions(), 0);
    }

    #[test]
    fn test_new_request_supersedes_previous() {
        let mut s = state();
        let id = heading_id(&mut s, "Welcome");
        s.begin_suggestion(id, SuggestionKind::HeadingLevel).unwrap();
        s.begin_suggestion(id, SuggestionKind::HeadingLevel).unwrap();
        assert_eq!(s.pending_suggestions(), 1);
    }

    #[test]
    fn test_applied_level_is_clamped() {
        let mut s = state();
        let id = heading_id(&mut s, "Welcome");
        s.begin_suggestion(id, SuggestionKind::HeadingLevel).unwrap();
        s.apply(Message::SuggestionReady(
            id,
            SuggestionOutcome::HeadingLevel(9),
        ));
        assert_eq!(
            s.page.block(id).unwrap().content(),
            &BlockContent::Heading {
                text: "Welcome".to_string(),
                level: 6
            }
        );
    }
}
