//! Script replay.

use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use emojiart_core::{
    CanvasState, CanvasStore, EmojiArtModel, Frame, Intent, Outcome, Selection, Transform,
};
use serde::Serialize;

use crate::{resolve_pending_background, CliConfig};

/// Everything a replay produced.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    /// The document after the last intent.
    pub document: EmojiArtModel,
    /// Committed pan and zoom.
    pub transform: Transform,
    /// Emoji left selected.
    pub selection: Selection,
    /// Frame for the final snapshot.
    pub frame: Frame,
    /// Outcome of each intent, in script order.
    pub outcomes: Vec<Outcome>,
    /// Number of snapshots published to subscribers.
    pub notifications: usize,
}

/// Open a document, or start an empty one when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid document.
pub fn load_document(path: Option<&Path>) -> anyhow::Result<EmojiArtModel> {
    let Some(path) = path else {
        return Ok(EmojiArtModel::new());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let document = EmojiArtModel::from_json(&json)
        .with_context(|| format!("failed to parse document {}", path.display()))?;
    tracing::info!(
        "Opened {} with {} emoji",
        path.display(),
        document.emoji_count()
    );
    Ok(document)
}

/// Read a script: a JSON array of intents.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<Intent>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("failed to parse script {}", path.display()))
}

/// Replay `intents` against `document` on a canvas built from `config`.
///
/// Background fetches started by the document or by a dropped URL are
/// completed before the next intent is applied.
#[must_use]
pub fn replay(
    mut document: EmojiArtModel,
    config: &CliConfig,
    intents: &[Intent],
) -> ReplayReport {
    resolve_pending_background(&mut document);

    let mut store = CanvasStore::new(document, CanvasState::new(config.viewport, config.canvas));
    let notifications = Rc::new(Cell::new(0));
    let counter = Rc::clone(&notifications);
    store.subscribe(move |_| counter.set(counter.get() + 1));

    let mut outcomes = Vec::with_capacity(intents.len());
    for (step, intent) in intents.iter().enumerate() {
        let outcome = store.dispatch(intent);
        if outcome == Outcome::Ignored {
            tracing::debug!("Step {step} ignored: {intent:?}");
        }
        resolve_pending_background(store.document_mut());
        outcomes.push(outcome);
    }

    let handled = outcomes.iter().filter(|o| o.is_handled()).count();
    tracing::info!("Replayed {} intents, {handled} handled", outcomes.len());

    let frame = store.frame();
    let transform = store.state().transform;
    let selection = store.state().selection.clone();
    ReplayReport {
        document: store.into_document(),
        transform,
        selection,
        frame,
        outcomes,
        notifications: notifications.get(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use emojiart_core::{
        Background, DocPoint, DropPayload, EmojiArtDocument, FetchStatus, Point, Size,
        TouchTarget,
    };
    use url::Url;

    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            viewport: Size::new(800.0, 600.0),
            ..CliConfig::default()
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbImage::new(width, height)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn test_replay_reports_outcomes_and_final_state() {
        let intents = vec![
            Intent::Drop {
                payloads: vec![DropPayload::Text("🐶".to_string())],
                location: Point::new(450.0, 300.0),
            },
            Intent::DeleteSelection,
            Intent::MagnifyEnded { scale: 2.0 },
        ];

        let report = replay(EmojiArtModel::new(), &config(), &intents);

        assert_eq!(
            report.outcomes,
            vec![Outcome::Handled, Outcome::Ignored, Outcome::Handled]
        );
        assert_eq!(report.notifications, 2);
        assert_eq!(report.document.emojis()[0].position(), DocPoint::new(50, 0));
        assert!((report.transform.steady_zoom - 2.0).abs() < f64::EPSILON);
        assert!(report.selection.is_empty());
        assert_eq!(report.frame.items[0].position, Point::new(500.0, 300.0));
    }

    #[test]
    fn test_replay_selection_survives_into_report() {
        let mut document = EmojiArtModel::new();
        let id = document.add_emoji("🌲", DocPoint::ORIGIN, 40);
        let intents = vec![Intent::Tap {
            target: TouchTarget::Emoji(id),
            count: 1,
        }];

        let report = replay(document, &config(), &intents);
        assert!(report.selection.contains(id));
        assert!(report.frame.show_delete_action);
    }

    #[test]
    fn test_dropped_file_url_is_loaded_before_next_intent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bg.png");
        fs::write(&path, png(1600, 600)).expect("write png");
        let url = Url::from_file_path(&path).expect("file url");

        let intents = vec![
            Intent::Drop {
                payloads: vec![DropPayload::Url(url.to_string())],
                location: Point::ZERO,
            },
            Intent::ZoomToFit,
        ];
        let report = replay(EmojiArtModel::new(), &config(), &intents);

        assert_eq!(report.outcomes, vec![Outcome::Handled, Outcome::Handled]);
        assert_eq!(report.document.background(), &Background::Url(url));
        assert_eq!(report.document.fetch_status(), &FetchStatus::Loaded);
        assert!((report.transform.steady_zoom - 0.5).abs() < f64::EPSILON);
        assert!(!report.frame.show_progress);
    }

    #[test]
    fn test_load_document_and_script_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut original = EmojiArtModel::new();
        original.add_emoji("🔥", DocPoint::new(3, 4), 25);
        let doc_path = dir.path().join("art.json");
        fs::write(&doc_path, original.to_json().expect("json")).expect("write doc");

        let script_path = dir.path().join("script.json");
        fs::write(
            &script_path,
            r#"[{"intent": "zoom_to_fit"}, {"intent": "gesture_cancelled"}]"#,
        )
        .expect("write script");

        let document = load_document(Some(&doc_path)).expect("load document");
        assert_eq!(document.emojis()[0].position(), DocPoint::new(3, 4));
        assert_eq!(document.emojis()[0].size, 25);

        let script = load_script(&script_path).expect("load script");
        assert_eq!(script, vec![Intent::ZoomToFit, Intent::GestureCancelled]);
    }

    #[test]
    fn test_missing_files_report_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.json");

        let err = load_script(&missing).expect_err("missing script");
        assert!(err.to_string().contains("failed to read script"));
        assert!(load_document(None).expect("empty").is_empty());
        assert!(load_document(Some(&missing)).is_err());
    }
}
