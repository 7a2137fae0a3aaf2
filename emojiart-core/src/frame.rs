//! Render-ready description of the canvas.
//!
//! A [`Frame`] is everything a host view needs to draw one snapshot: where
//! the background goes, where every emoji goes and at what scale, and which
//! overlays to show.

use serde::Serialize;

use crate::{CanvasState, DocPoint, EmojiArtDocument, EmojiId, FetchStatus, Point};

/// Placement of the background image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundPlacement {
    /// Screen position of the image center.
    pub center: Point,
    /// Scale applied to the image's natural size.
    pub scale: f64,
}

/// One emoji as it should be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEmoji {
    /// Identity of the document emoji.
    pub id: EmojiId,
    /// The glyph.
    pub text: String,
    /// Screen position of the glyph center.
    pub position: Point,
    /// Font size before scaling.
    pub font_size: f64,
    /// Scale applied on top of the font size.
    pub scale: f64,
    /// Whether to draw the selection border.
    pub selected: bool,
}

impl RenderedEmoji {
    /// Side of the square box the glyph occupies on screen.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.font_size * self.scale
    }

    fn contains(&self, point: Point) -> bool {
        let half = self.extent().abs() / 2.0;
        (point.x - self.position.x).abs() <= half && (point.y - self.position.y).abs() <= half
    }
}

/// Everything needed to draw one canvas snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Background placement, when an image is available.
    pub background: Option<BackgroundPlacement>,
    /// Show a progress indicator instead of the emoji.
    pub show_progress: bool,
    /// Offer the "delete selected" action.
    pub show_delete_action: bool,
    /// Emoji in drawing order.
    pub items: Vec<RenderedEmoji>,
}

impl Frame {
    /// Build the frame for a snapshot of the canvas and its document.
    #[must_use]
    pub fn build<D>(state: &CanvasState, document: &D) -> Self
    where
        D: EmojiArtDocument + ?Sized,
    {
        let zoom = state.effective_zoom();
        let background = document
            .background_image_size()
            .map(|_| BackgroundPlacement {
                center: state.to_screen(DocPoint::ORIGIN),
                scale: zoom,
            });

        let show_progress = *document.fetch_status() == FetchStatus::Fetching;
        let items = if show_progress {
            Vec::new()
        } else {
            let gesture = state.gesture();
            document
                .emojis()
                .iter()
                .map(|emoji| {
                    let selected = state.selection.contains(emoji.id);
                    let position = state.to_screen(emoji.position());
                    RenderedEmoji {
                        id: emoji.id,
                        text: emoji.text.clone(),
                        position: if selected {
                            position + gesture.emoji_pan
                        } else {
                            position
                        },
                        font_size: f64::from(emoji.size),
                        scale: if selected {
                            zoom * gesture.emoji_zoom
                        } else {
                            zoom
                        },
                        selected,
                    }
                })
                .collect()
        };

        Self {
            background,
            show_progress,
            show_delete_action: !state.selection.is_empty(),
            items,
        }
    }

    /// The topmost emoji drawn under a screen point.
    #[must_use]
    pub fn emoji_at(&self, point: Point) -> Option<EmojiId> {
        self.items
            .iter()
            .rev()
            .find(|item| item.contains(point))
            .map(|item| item.id)
    }
}

impl CanvasState {
    /// Describe how to draw this snapshot of `document`.
    #[must_use]
    pub fn frame<D>(&self, document: &D) -> Frame
    where
        D: EmojiArtDocument + ?Sized,
    {
        Frame::build(self, document)
    }
}
