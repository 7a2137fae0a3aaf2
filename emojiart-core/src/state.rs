//! Canvas state: committed transform, selection and in-flight gestures.
//!
//! [`CanvasState`] is an immutable snapshot. [`CanvasState::apply`] reduces an
//! [`Intent`] into the next snapshot, writing any committed document change
//! through the [`EmojiArtDocument`] it is given.
//!
//! ```text
//! effective zoom = steady zoom * gesture zoom
//! effective pan  = (steady pan + gesture pan) * effective zoom
//! ```

use serde::Serialize;

use crate::drop::{self, DropAction};
use crate::geometry::{self, truncate};
use crate::{
    CanvasConfig, DocPoint, DropPayload, EmojiArtDocument, GestureTable, Intent,
    InteractionMode, Offset, Outcome, Point, Recognizer, Selection, Size, TouchTarget,
};

/// Committed pan and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    /// Committed zoom scale.
    pub steady_zoom: f64,
    /// Committed pan, in document units.
    pub steady_pan: Offset,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            steady_zoom: 1.0,
            steady_pan: Offset::ZERO,
        }
    }
}

/// Deltas of the gestures currently in progress.
///
/// Nothing here is committed; dropping it loses only presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// Canvas zoom factor of the active pinch.
    pub zoom: f64,
    /// Selection zoom factor of the active pinch.
    pub emoji_zoom: f64,
    /// Canvas pan of the active drag, in document units.
    pub pan: Offset,
    /// Selection offset of the active drag, in screen points.
    pub emoji_pan: Offset,
    drag: Option<InteractionMode>,
    magnify: Option<InteractionMode>,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            emoji_zoom: 1.0,
            pan: Offset::ZERO,
            emoji_pan: Offset::ZERO,
            drag: None,
            magnify: None,
        }
    }
}

impl GestureState {
    /// Mode the active drag latched, if a drag is in progress.
    #[must_use]
    pub const fn drag_mode(&self) -> Option<InteractionMode> {
        self.drag
    }

    /// Mode the active pinch latched, if a pinch is in progress.
    #[must_use]
    pub const fn magnify_mode(&self) -> Option<InteractionMode> {
        self.magnify
    }

    /// Whether any gesture is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.drag.is_some() || self.magnify.is_some()
    }
}

/// A snapshot of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasState {
    /// Size of the canvas on screen.
    pub viewport: Size,
    /// Committed pan and zoom.
    pub transform: Transform,
    /// Selected emoji.
    pub selection: Selection,
    #[serde(skip)]
    gesture: GestureState,
    #[serde(skip)]
    config: CanvasConfig,
    #[serde(skip)]
    gestures: GestureTable,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0), CanvasConfig::default())
    }
}

impl CanvasState {
    /// Create a canvas state for the given viewport.
    #[must_use]
    pub fn new(viewport: Size, config: CanvasConfig) -> Self {
        Self {
            viewport,
            transform: Transform::default(),
            selection: Selection::new(),
            gesture: GestureState::default(),
            config,
            gestures: GestureTable::default(),
        }
    }

    /// Replace the tap recognizer table.
    #[must_use]
    pub fn with_gesture_table(mut self, gestures: GestureTable) -> Self {
        self.gestures = gestures;
        self
    }

    /// The in-flight gesture deltas.
    #[must_use]
    pub const fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// The configuration this state was created with.
    #[must_use]
    pub const fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Committed zoom combined with the active pinch.
    #[must_use]
    pub fn effective_zoom(&self) -> f64 {
        self.transform.steady_zoom * self.gesture.zoom
    }

    /// Committed pan combined with the active drag, in screen points.
    #[must_use]
    pub fn effective_pan(&self) -> Offset {
        geometry::delta_to_screen(
            self.transform.steady_pan + self.gesture.pan,
            self.effective_zoom(),
        )
    }

    /// Map a screen point to document space using the effective transform.
    #[must_use]
    pub fn to_document(&self, screen: Point) -> DocPoint {
        geometry::to_document(
            screen,
            self.viewport.center(),
            self.effective_pan(),
            self.effective_zoom(),
        )
    }

    /// Map a document point to the screen using the effective transform.
    #[must_use]
    pub fn to_screen(&self, doc: DocPoint) -> Point {
        geometry::to_screen(
            doc,
            self.viewport.center(),
            self.effective_pan(),
            self.effective_zoom(),
        )
    }

    /// Reduce an intent into the next snapshot.
    ///
    /// Document writes that fail (for example a selected emoji that was
    /// removed elsewhere) are logged and skipped; they never abort the
    /// intent.
    pub fn apply<D>(&self, intent: &Intent, document: &mut D) -> (Self, Outcome)
    where
        D: EmojiArtDocument + ?Sized,
    {
        tracing::debug!("Applying intent: {:?}", intent);
        let mut next = self.clone();
        let outcome = match intent {
            Intent::ResizeViewport { size } => {
                next.viewport = *size;
                Outcome::Handled
            }
            Intent::Tap { target, count } => next.tap(*target, *count, &*document),
            Intent::DragChanged {
                target,
                translation,
            } => next.drag_changed(*target, *translation),
            Intent::DragEnded {
                target,
                translation,
            } => next.drag_ended(*target, *translation, document),
            Intent::MagnifyChanged { scale } => next.magnify_changed(*scale),
            Intent::MagnifyEnded { scale } => next.magnify_ended(*scale, document),
            Intent::GestureCancelled => {
                if next.gesture.is_active() {
                    tracing::debug!("Discarding in-flight gesture state");
                }
                next.gesture = GestureState::default();
                Outcome::Handled
            }
            Intent::DeleteSelection => next.delete_selection(document),
            Intent::ZoomToFit => next.zoom_to_fit(&*document),
            Intent::Drop { payloads, location } => {
                next.drop_payloads(payloads, *location, document)
            }
        };
        (next, outcome)
    }

    fn tap<D>(&mut self, target: TouchTarget, count: u8, document: &D) -> Outcome
    where
        D: EmojiArtDocument + ?Sized,
    {
        match (self.gestures.resolve_tap(target, count), target) {
            (Some(Recognizer::DoubleTapToZoom), _) => self.zoom_to_fit(document),
            (Some(Recognizer::ToggleSelection), TouchTarget::Emoji(id)) => {
                if document.emoji(id).is_none() {
                    tracing::debug!("Tap on unknown emoji {id}");
                    return Outcome::Ignored;
                }
                let selected = self.selection.toggle(id);
                tracing::debug!("Emoji {id} selected: {selected}");
                Outcome::Handled
            }
            (Some(Recognizer::DeselectAll), _) => {
                self.selection.clear();
                Outcome::Handled
            }
            _ => Outcome::Ignored,
        }
    }

    fn drag_changed(&mut self, target: TouchTarget, translation: Offset) -> Outcome {
        let mode = match self.gesture.drag {
            Some(mode) => mode,
            None => {
                let mode = InteractionMode::for_drag(target, &self.selection);
                tracing::debug!("Drag started in {mode:?} mode");
                self.gesture.drag = Some(mode);
                mode
            }
        };
        match mode {
            InteractionMode::Canvas => {
                self.gesture.pan =
                    geometry::delta_to_document(translation, self.effective_zoom());
            }
            InteractionMode::Selection => self.gesture.emoji_pan = translation,
        }
        Outcome::Handled
    }

    fn drag_ended<D>(
        &mut self,
        target: TouchTarget,
        translation: Offset,
        document: &mut D,
    ) -> Outcome
    where
        D: EmojiArtDocument + ?Sized,
    {
        let mode = self
            .gesture
            .drag
            .take()
            .unwrap_or_else(|| InteractionMode::for_drag(target, &self.selection));
        let delta = geometry::delta_to_document(translation, self.effective_zoom());
        match mode {
            InteractionMode::Canvas => {
                self.gesture.pan = Offset::ZERO;
                self.transform.steady_pan += delta;
            }
            InteractionMode::Selection => {
                self.gesture.emoji_pan = Offset::ZERO;
                for id in self.selection.iter() {
                    if let Err(e) = document.move_emoji(id, delta) {
                        tracing::warn!("Skipping move of {id}: {e}");
                    }
                }
            }
        }
        Outcome::Handled
    }

    fn magnify_changed(&mut self, scale: f64) -> Outcome {
        if !is_valid_scale(scale) {
            return Outcome::Ignored;
        }
        let mode = match self.gesture.magnify {
            Some(mode) => mode,
            None => {
                let mode = InteractionMode::for_magnify(&self.selection);
                tracing::debug!("Pinch started in {mode:?} mode");
                self.gesture.magnify = Some(mode);
                mode
            }
        };
        match mode {
            InteractionMode::Canvas => self.gesture.zoom = scale,
            InteractionMode::Selection => self.gesture.emoji_zoom = scale,
        }
        Outcome::Handled
    }

    fn magnify_ended<D>(&mut self, scale: f64, document: &mut D) -> Outcome
    where
        D: EmojiArtDocument + ?Sized,
    {
        let mode = self
            .gesture
            .magnify
            .take()
            .unwrap_or_else(|| InteractionMode::for_magnify(&self.selection));
        self.gesture.zoom = 1.0;
        self.gesture.emoji_zoom = 1.0;
        if !is_valid_scale(scale) {
            return Outcome::Ignored;
        }
        match mode {
            InteractionMode::Canvas => {
                self.transform.steady_zoom =
                    (self.transform.steady_zoom * scale).max(self.config.min_zoom);
            }
            InteractionMode::Selection => {
                for id in self.selection.iter() {
                    if let Err(e) = document.scale_emoji(id, scale) {
                        tracing::warn!("Skipping scale of {id}: {e}");
                    }
                }
            }
        }
        Outcome::Handled
    }

    fn delete_selection<D>(&mut self, document: &mut D) -> Outcome
    where
        D: EmojiArtDocument + ?Sized,
    {
        if self.selection.is_empty() {
            return Outcome::Ignored;
        }
        for id in self.selection.iter() {
            if let Err(e) = document.remove_emoji(id) {
                tracing::warn!("Skipping removal of {id}: {e}");
            }
        }
        tracing::info!("Deleted {} selected emoji", self.selection.len());
        self.selection.clear();
        Outcome::Handled
    }

    fn zoom_to_fit<D>(&mut self, document: &D) -> Outcome
    where
        D: EmojiArtDocument + ?Sized,
    {
        let Some(image) = document.background_image_size() else {
            return Outcome::Ignored;
        };
        if !image.is_positive() || !self.viewport.is_positive() {
            return Outcome::Ignored;
        }
        let h_zoom = self.viewport.width / image.width;
        let v_zoom = self.viewport.height / image.height;
        self.transform.steady_pan = Offset::ZERO;
        self.transform.steady_zoom = h_zoom.min(v_zoom).max(self.config.min_zoom);
        tracing::info!("Zoomed to fit: {}", self.transform.steady_zoom);
        Outcome::Handled
    }

    fn drop_payloads<D>(
        &mut self,
        payloads: &[DropPayload],
        location: Point,
        document: &mut D,
    ) -> Outcome
    where
        D: EmojiArtDocument + ?Sized,
    {
        match drop::resolve(payloads) {
            Some(DropAction::SetBackground(background)) => {
                document.set_background(background);
                Outcome::Handled
            }
            Some(DropAction::AddEmoji { text }) => {
                let at = self.to_document(location);
                let size =
                    truncate(self.config.default_emoji_font_size / self.effective_zoom()).max(1);
                let id = document.add_emoji(&text, at, size);
                tracing::debug!("Dropped {text} as {id} at ({}, {})", at.x, at.y);
                Outcome::Handled
            }
            None => Outcome::Ignored,
        }
    }
}

fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::png_bytes;
    use crate::{Background, EmojiArtModel, EmojiId, TapCount, TapRule, TargetKind};

    fn state() -> CanvasState {
        CanvasState::new(Size::new(800.0, 600.0), CanvasConfig::default())
    }

    fn tap_emoji(id: EmojiId) -> Intent {
        Intent::Tap {
            target: TouchTarget::Emoji(id),
            count: 1,
        }
    }

    fn double_tap_emoji(id: EmojiId) -> Intent {
        Intent::Tap {
            target: TouchTarget::Emoji(id),
            count: 2,
        }
    }

    fn tap_canvas(count: u8) -> Intent {
        Intent::Tap {
            target: TouchTarget::Canvas,
            count,
        }
    }

    fn apply(state: &CanvasState, intent: Intent, doc: &mut EmojiArtModel) -> CanvasState {
        state.apply(&intent, doc).0
    }

    #[test]
    fn test_default_transform_is_identity() {
        let state = state();
        assert!((state.effective_zoom() - 1.0).abs() < f64::EPSILON);
        assert_eq!(state.effective_pan(), Offset::ZERO);
        assert_eq!(state.to_screen(DocPoint::ORIGIN), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_apply_leaves_previous_snapshot_untouched() {
        let mut doc = EmojiArtModel::new();
        let before = state();
        let after = apply(
            &before,
            Intent::DragEnded {
                target: TouchTarget::Canvas,
                translation: Offset::new(10.0, 0.0),
            },
            &mut doc,
        );
        assert_eq!(before.transform.steady_pan, Offset::ZERO);
        assert_eq!(after.transform.steady_pan, Offset::new(10.0, 0.0));
    }

    #[test]
    fn test_canvas_drag_tracks_then_commits() {
        let mut doc = EmojiArtModel::new();
        let mut s = state();
        s.transform.steady_zoom = 2.0;

        s = apply(
            &s,
            Intent::DragChanged {
                target: TouchTarget::Canvas,
                translation: Offset::new(40.0, 20.0),
            },
            &mut doc,
        );
        assert_eq!(s.gesture().pan, Offset::new(20.0, 10.0));
        assert_eq!(s.effective_pan(), Offset::new(40.0, 20.0));
        assert_eq!(s.transform.steady_pan, Offset::ZERO);

        s = apply(
            &s,
            Intent::DragEnded {
                target: TouchTarget::Canvas,
                translation: Offset::new(60.0, 20.0),
            },
            &mut doc,
        );
        assert_eq!(s.transform.steady_pan, Offset::new(30.0, 10.0));
        assert_eq!(s.gesture().pan, Offset::ZERO);
        assert!(s.gesture().drag_mode().is_none());
    }

    #[test]
    fn test_drag_on_unselected_emoji_pans_canvas() {
        let mut doc = EmojiArtModel::new();
        let id = doc.add_emoji("🐶", DocPoint::new(0, 0), 40);
        let s = apply(
            &state(),
            Intent::DragEnded {
                target: TouchTarget::Emoji(id),
                translation: Offset::new(10.0, 10.0),
            },
            &mut doc,
        );
        assert_eq!(s.transform.steady_pan, Offset::new(10.0, 10.0));
        assert_eq!(doc.emoji(id).map(|e| e.position()), Some(DocPoint::new(0, 0)));
    }

    #[test]
    fn test_selected_drag_offsets_then_moves_group() {
        let mut doc = EmojiArtModel::new();
        let a = doc.add_emoji("🐶", DocPoint::new(0, 0), 40);
        let b = doc.add_emoji("🌲", DocPoint::new(10, 10), 40);
        let mut s = state();
        s.transform.steady_zoom = 2.0;
        s = apply(&s, tap_emoji(a), &mut doc);
        s = apply(&s, tap_emoji(b), &mut doc);

        s = apply(
            &s,
            Intent::DragChanged {
                target: TouchTarget::Emoji(a),
                translation: Offset::new(20.0, -8.0),
            },
            &mut doc,
        );
        assert_eq!(s.gesture().emoji_pan, Offset::new(20.0, -8.0));
        assert_eq!(s.gesture().drag_mode(), Some(InteractionMode::Selection));
        assert_eq!(s.effective_pan(), Offset::ZERO);

        s = apply(
            &s,
            Intent::DragEnded {
                target: TouchTarget::Emoji(a),
                translation: Offset::new(20.0, -8.0),
            },
            &mut doc,
        );
        assert_eq!(s.gesture().emoji_pan, Offset::ZERO);
        assert_eq!(doc.emoji(a).map(|e| e.position()), Some(DocPoint::new(10, -4)));
        assert_eq!(doc.emoji(b).map(|e| e.position()), Some(DocPoint::new(20, 6)));
    }

    #[test]
    fn test_drag_mode_latches_at_start() {
        let mut doc = EmojiArtModel::new();
        let id = doc.add_emoji("🐶", DocPoint::new(0, 0), 40);
        let mut s = apply(
            &state(),
            Intent::DragChanged {
                target: TouchTarget::Emoji(id),
                translation: Offset::new(5.0, 0.0),
            },
            &mut doc,
        );
        assert_eq!(s.gesture().drag_mode(), Some(InteractionMode::Canvas));

        s = apply(&s, Intent::Tap { target: TouchTarget::Emoji(id), count: 1 }, &mut doc);
        s = apply(
            &s,
            Intent::DragEnded {
                target: TouchTarget::Emoji(id),
                translation: Offset::new(5.0, 0.0),
            },
            &mut doc,
        );
        assert_eq!(s.transform.steady_pan, Offset::new(5.0, 0.0));
        assert_eq!(doc.emoji(id).map(|e| e.position()), Some(DocPoint::new(0, 0)));
    }

    #[test]
    fn test_canvas_pinch_tracks_then_commits() {
        let mut doc = EmojiArtModel::new();
        let mut s = apply(&state(), Intent::MagnifyChanged { scale: 1.5 }, &mut doc);
        assert!((s.effective_zoom() - 1.5).abs() < f64::EPSILON);
        assert!((s.transform.steady_zoom - 1.0).abs() < f64::EPSILON);

        s = apply(&s, Intent::MagnifyEnded { scale: 2.0 }, &mut doc);
        assert!((s.transform.steady_zoom - 2.0).abs() < f64::EPSILON);
        assert!((s.gesture().zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selection_pinch_scales_only_selected() {
        let mut doc = EmojiArtModel::new();
        let a = doc.add_emoji("🐶", DocPoint::new(0, 0), 40);
        let b = doc.add_emoji("🌲", DocPoint::new(0, 0), 40);
        let mut s = apply(&state(), tap_emoji(a), &mut doc);

        s = apply(&s, Intent::MagnifyChanged { scale: 2.0 }, &mut doc);
        assert!((s.gesture().emoji_zoom - 2.0).abs() < f64::EPSILON);
        assert!((s.gesture().zoom - 1.0).abs() < f64::EPSILON);

        s = apply(&s, Intent::MagnifyEnded { scale: 2.0 }, &mut doc);
        assert!((s.transform.steady_zoom - 1.0).abs() < f64::EPSILON);
        assert!((s.gesture().emoji_zoom - 1.0).abs() < f64::EPSILON);
        assert_eq!(doc.emoji(a).map(|e| e.size), Some(80));
        assert_eq!(doc.emoji(b).map(|e| e.size), Some(40));
    }

    #[test]
    fn test_pinch_clamps_to_min_zoom_and_rejects_bad_scale() {
        let mut doc = EmojiArtModel::new();
        let s = apply(&state(), Intent::MagnifyEnded { scale: 1e-9 }, &mut doc);
        assert!((s.transform.steady_zoom - CanvasConfig::default().min_zoom).abs() < f64::EPSILON);

        let (s, outcome) = state().apply(&Intent::MagnifyChanged { scale: -1.0 }, &mut doc);
        assert_eq!(outcome, Outcome::Ignored);
        assert!(s.gesture().magnify_mode().is_none());
    }

    #[test]
    fn test_cancel_discards_in_flight_state() {
        let mut doc = EmojiArtModel::new();
        let mut s = apply(&state(), Intent::MagnifyChanged { scale: 3.0 }, &mut doc);
        s = apply(
            &s,
            Intent::DragChanged {
                target: TouchTarget::Canvas,
                translation: Offset::new(50.0, 50.0),
            },
            &mut doc,
        );
        s = apply(&s, Intent::GestureCancelled, &mut doc);
        assert_eq!(s.gesture(), &GestureState::default());
        assert_eq!(s.transform, Transform::default());
    }

    #[test]
    fn test_taps_toggle_and_clear_selection() {
        let mut doc = EmojiArtModel::new();
        let a = doc.add_emoji("🐶", DocPoint::new(0, 0), 40);
        let b = doc.add_emoji("🌲", DocPoint::new(0, 0), 40);
        let mut s = apply(&state(), tap_emoji(a), &mut doc);
        s = apply(&s, tap_emoji(b), &mut doc);
        assert_eq!(s.selection.len(), 2);

        s = apply(&s, tap_emoji(a), &mut doc);
        assert!(!s.selection.contains(a));
        assert!(s.selection.contains(b));

        s = apply(&s, tap_canvas(1), &mut doc);
        assert!(s.selection.is_empty());
    }

    #[test]
    fn test_double_tap_never_toggles_selection() {
        let mut doc = EmojiArtModel::new();
        let a = doc.add_emoji("🐶", DocPoint::new(0, 0), 40);
        let s = apply(&state(), tap_emoji(a), &mut doc);

        let (s, outcome) = s.apply(&double_tap_emoji(a), &mut doc);
        assert_eq!(outcome, Outcome::Ignored);
        assert!(s.selection.contains(a));

        let (s, _) = s.apply(&tap_canvas(2), &mut doc);
        assert!(s.selection.contains(a));
    }

    #[test]
    fn test_tap_on_unknown_emoji_is_ignored() {
        let mut doc = EmojiArtModel::new();
        let (s, outcome) = state().apply(
            &Intent::Tap {
                target: TouchTarget::Emoji(EmojiId::new()),
                count: 1,
            },
            &mut doc,
        );
        assert_eq!(outcome, Outcome::Ignored);
        assert!(s.selection.is_empty());
    }

    #[test]
    fn test_delete_selection_removes_and_clears() {
        let mut doc = EmojiArtModel::new();
        let a = doc.add_emoji("🐶", DocPoint::new(0, 0), 40);
        let b = doc.add_emoji("🌲", DocPoint::new(0, 0), 40);
        let mut s = apply(&state(), tap_emoji(a), &mut doc);

        let (next, outcome) = s.apply(&Intent::DeleteSelection, &mut doc);
        s = next;
        assert_eq!(outcome, Outcome::Handled);
        assert!(s.selection.is_empty());
        assert!(doc.emoji(a).is_none());
        assert!(doc.emoji(b).is_some());

        let (_, outcome) = s.apply(&Intent::DeleteSelection, &mut doc);
        assert_eq!(outcome, Outcome::Ignored);
    }

    #[test]
    fn test_zoom_to_fit_uses_smaller_ratio() {
        let mut doc = EmojiArtModel::new();
        doc.set_background(Background::ImageData(png_bytes(200, 100)));
        let mut s = CanvasState::new(Size::new(100.0, 100.0), CanvasConfig::default());
        s.transform.steady_pan = Offset::new(30.0, -30.0);

        let (s, outcome) = s.apply(&tap_canvas(2), &mut doc);
        assert_eq!(outcome, Outcome::Handled);
        assert!((s.transform.steady_zoom - 0.5).abs() < f64::EPSILON);
        assert_eq!(s.transform.steady_pan, Offset::ZERO);
    }

    #[test]
    fn test_zoom_to_fit_without_image_or_viewport_is_noop() {
        let mut doc = EmojiArtModel::new();
        let (s, outcome) = state().apply(&Intent::ZoomToFit, &mut doc);
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(s.transform, Transform::default());

        doc.set_background(Background::ImageData(png_bytes(10, 10)));
        let empty = CanvasState::new(Size::new(0.0, 100.0), CanvasConfig::default());
        let (s, outcome) = empty.apply(&Intent::ZoomToFit, &mut doc);
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(s.transform, Transform::default());
    }

    #[test]
    fn test_drop_emoji_compensates_for_zoom() {
        let mut doc = EmojiArtModel::new();
        let mut s = state();
        s.transform.steady_zoom = 2.0;
        let (_, outcome) = s.apply(
            &Intent::Drop {
                payloads: vec![DropPayload::Text("🍎".to_string())],
                location: Point::new(500.0, 250.0),
            },
            &mut doc,
        );
        assert_eq!(outcome, Outcome::Handled);
        let emoji = &doc.emojis()[0];
        assert_eq!(emoji.text, "🍎");
        assert_eq!(emoji.position(), DocPoint::new(50, -25));
        assert_eq!(emoji.size, 20);
    }

    #[test]
    fn test_drop_without_usable_payload_is_ignored() {
        let mut doc = EmojiArtModel::new();
        let (_, outcome) = state().apply(
            &Intent::Drop {
                payloads: vec![DropPayload::Text("abc".to_string())],
                location: Point::ZERO,
            },
            &mut doc,
        );
        assert_eq!(outcome, Outcome::Ignored);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_resize_viewport_moves_document_origin() {
        let mut doc = EmojiArtModel::new();
        let s = apply(
            &state(),
            Intent::ResizeViewport {
                size: Size::new(200.0, 100.0),
            },
            &mut doc,
        );
        assert_eq!(s.to_screen(DocPoint::ORIGIN), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_pinch_mode_latches_at_start() {
        let mut doc = EmojiArtModel::new();
        let id = doc.add_emoji("🐶", DocPoint::new(0, 0), 40);
        let mut s = apply(&state(), Intent::MagnifyChanged { scale: 1.5 }, &mut doc);
        assert_eq!(s.gesture().magnify_mode(), Some(InteractionMode::Canvas));

        s = apply(&s, tap_emoji(id), &mut doc);
        assert!(s.selection.contains(id));
        s = apply(&s, Intent::MagnifyChanged { scale: 2.0 }, &mut doc);
        assert!((s.gesture().zoom - 2.0).abs() < f64::EPSILON);
        assert!((s.gesture().emoji_zoom - 1.0).abs() < f64::EPSILON);

        s = apply(&s, Intent::MagnifyEnded { scale: 2.0 }, &mut doc);
        assert!((s.transform.steady_zoom - 2.0).abs() < f64::EPSILON);
        assert_eq!(doc.emoji(id).map(|e| e.size), Some(40));
        assert!(s.gesture().magnify_mode().is_none());
    }

    #[test]
    fn test_drop_far_from_origin_truncates() {
        let mut doc = EmojiArtModel::new();
        let s = CanvasState::new(Size::new(0.0, 0.0), CanvasConfig::default());
        let (_, outcome) = s.apply(
            &Intent::Drop {
                payloads: vec![DropPayload::Text("🐶".to_string())],
                location: Point::new(2000.999, -1500.9995),
            },
            &mut doc,
        );
        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(doc.emojis()[0].position(), DocPoint::new(2000, -1500));
    }

    #[test]
    fn test_custom_gesture_table_replaces_defaults() {
        let mut doc = EmojiArtModel::new();
        let id = doc.add_emoji("🐶", DocPoint::new(0, 0), 40);
        let table = GestureTable::new(vec![TapRule::new(
            Recognizer::ToggleSelection,
            TargetKind::Emoji,
            TapCount::Double,
        )]);
        let s = state().with_gesture_table(table);

        let (s, outcome) = s.apply(&tap_emoji(id), &mut doc);
        assert_eq!(outcome, Outcome::Ignored);
        assert!(s.selection.is_empty());

        let (s, outcome) = s.apply(&double_tap_emoji(id), &mut doc);
        assert_eq!(outcome, Outcome::Handled);
        assert!(s.selection.contains(id));

        let (_, outcome) = s.apply(&tap_canvas(1), &mut doc);
        assert_eq!(outcome, Outcome::Ignored);
    }
}
