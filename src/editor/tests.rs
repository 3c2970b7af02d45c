// SPDX-License-Identifier: MPL-2.0
use super::*;
use crate::test_utils::{assert_abs_diff_eq, solid_image};
use std::path::Path;
use tiny_skia::{Pixmap, Point};

const TOLERANCE: f32 = 1e-3;

/// Records draw calls instead of rasterizing.
#[derive(Debug, Default)]
struct StubSurface {
    draws: Vec<Placement>,
    clears: usize,
    rendered: bool,
}

impl Surface for StubSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(300).expect("non-zero")
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn draw_image(&mut self, _image: &SourceImage, placement: Placement) {
        self.draws.push(placement);
        self.rendered = true;
    }

    fn snapshot(&self) -> Option<Pixmap> {
        self.rendered.then(|| Pixmap::new(300, 300).expect("pixmap"))
    }

    fn reset(&mut self) {
        self.rendered = false;
    }
}

fn editor() -> AvatarEditor<StubSurface> {
    AvatarEditor::with_surface(StubSurface::default(), &Config::default()).expect("editor")
}

fn editing(width: u32, height: u32) -> AvatarEditor<StubSurface> {
    let mut editor = editor();
    editor.initialize(solid_image(width, height)).expect("initialize");
    editor
}

fn load(editor: &mut AvatarEditor<StubSurface>, path: &str, width: u32, height: u32) -> Event {
    let path = PathBuf::from(path);
    assert_eq!(
        editor.update(Message::FileSelected(Some(path.clone()))),
        Event::LoadRequested(path.clone())
    );
    editor.update(Message::ImageLoaded {
        path,
        result: Ok(solid_image(width, height)),
    })
}

#[test]
fn new_editor_is_idle() {
    let editor = editor();
    assert!(!editor.is_editing());
    assert!(!editor.show_editor_panel());
    assert!(editor.last_error().is_none());
    assert_eq!(editor.slider().label(), "100%");
}

#[test]
fn initialize_renders_once_and_syncs_slider() {
    let editor = editing(400, 200);

    assert_eq!(
        editor.surface().draws,
        vec![Placement {
            x: -150.0,
            y: 0.0,
            width: 600.0,
            height: 300.0
        }]
    );
    assert_eq!(editor.slider().value().value(), 150.0);
    assert_eq!(editor.slider().label(), "150%");
    assert!(editor.show_editor_panel());
}

#[test]
fn render_repeats_the_same_draw_without_touching_state() {
    let mut editor = editing(400, 200);
    editor.set_zoom(220.0).expect("zoom");
    editor.begin_drag(10.0, 10.0).expect("press");
    editor.drag_to(25.0, 5.0).expect("move");
    let before = editor.session().expect("session").clone();
    let draws = editor.surface().draws.len();

    editor.render();
    editor.render();

    let session = editor.session().expect("session");
    assert_eq!(session.scale(), before.scale());
    assert_eq!(session.offset(), before.offset());
    assert_eq!(session.is_dragging(), before.is_dragging());
    assert_eq!(editor.slider().label(), "220%");

    let surface = editor.surface();
    assert_eq!(surface.draws.len(), draws + 2);
    assert_eq!(surface.draws[draws], before.placement());
    assert_eq!(surface.draws[draws + 1], before.placement());
}

#[test]
fn render_while_idle_draws_nothing() {
    let mut editor = editor();
    editor.render();
    assert!(editor.surface().draws.is_empty());
    assert_eq!(editor.surface().clears, 0);
}

#[test]
fn slider_sync_is_clamped_to_range() {
    // A 1px tall strip fits at scale 300, far above the 500% maximum
    let editor = editing(4_000, 1);
    assert_eq!(editor.slider().value().value(), 500.0);
    // Syncing the slider does not zoom
    assert_abs_diff_eq!(editor.session().expect("session").scale(), 300.0, epsilon = TOLERANCE);
}

#[test]
fn set_zoom_zooms_around_center() {
    let mut editor = editing(400, 200);

    let applied = editor.set_zoom(200.0).expect("zoom");

    assert_eq!(applied.value(), 200.0);
    assert_eq!(editor.slider().label(), "200%");
    let session = editor.session().expect("session");
    assert_abs_diff_eq!(session.scale(), 2.0, epsilon = TOLERANCE);
    assert_abs_diff_eq!(session.offset().0, -250.0, epsilon = TOLERANCE);
    assert_abs_diff_eq!(session.offset().1, -50.0, epsilon = TOLERANCE);
    assert_eq!(editor.surface().draws.len(), 2);
    assert_eq!(editor.surface().clears, 2);
}

#[test]
fn set_zoom_clamps_to_slider_range() {
    let mut editor = editing(300, 300);
    assert_eq!(editor.set_zoom(10_000.0).expect("zoom").value(), 500.0);
    assert_abs_diff_eq!(editor.session().expect("session").scale(), 5.0, epsilon = TOLERANCE);
}

#[test]
fn set_zoom_while_idle_is_rejected() {
    let mut editor = editor();
    assert_eq!(editor.set_zoom(200.0), Err(Error::NotEditing));
    assert_eq!(editor.slider().value().value(), 100.0);
    assert!(editor.surface().draws.is_empty());
}

#[test]
fn pointer_drag_pans_and_renders() {
    let mut editor = editing(400, 200);

    editor.update(PointerEvent::Down(Point::from_xy(100.0, 100.0)).into());
    editor.update(PointerEvent::Move(Point::from_xy(110.0, 95.0)).into());
    editor.update(PointerEvent::Move(Point::from_xy(130.0, 90.0)).into());
    editor.update(PointerEvent::Leave.into());
    editor.update(PointerEvent::Move(Point::from_xy(300.0, 300.0)).into());

    let session = editor.session().expect("session");
    assert_abs_diff_eq!(session.offset().0, -120.0, epsilon = TOLERANCE);
    assert_abs_diff_eq!(session.offset().1, -10.0, epsilon = TOLERANCE);
    assert!(!session.is_dragging());
    // Initial render plus one per effective move
    assert_eq!(editor.surface().draws.len(), 3);
}

#[test]
fn drag_without_press_does_not_render() {
    let mut editor = editing(400, 200);
    assert_eq!(editor.drag_to(20.0, 20.0), Ok(false));
    assert_eq!(editor.surface().draws.len(), 1);
}

#[test]
fn pointer_input_while_idle_is_ignored() {
    let mut editor = editor();
    assert_eq!(editor.begin_drag(1.0, 1.0), Err(Error::NotEditing));
    assert_eq!(
        editor.update(PointerEvent::Down(Point::from_xy(1.0, 1.0)).into()),
        Event::None
    );
    assert_eq!(editor.pointer(PointerEvent::Up), Ok(()));
    assert!(editor.surface().draws.is_empty());
}

#[test]
fn file_selection_requests_load_and_starts_session() {
    let mut editor = editor();
    assert_eq!(load(&mut editor, "me.png", 100, 400), Event::None);

    let session = editor.session().expect("session");
    assert_abs_diff_eq!(session.scale(), 3.0, epsilon = TOLERANCE);
    assert_abs_diff_eq!(session.offset().1, -450.0, epsilon = TOLERANCE);
    assert_eq!(editor.file_input().value(), Some(Path::new("me.png")));
}

#[test]
fn dismissed_picker_changes_nothing() {
    let mut editor = editing(400, 200);
    assert_eq!(editor.update(Message::FileSelected(None)), Event::None);
    assert!(editor.is_editing());
}

#[test]
fn reselecting_same_file_fires_no_load() {
    let mut editor = editor();
    load(&mut editor, "me.png", 400, 200);
    assert_eq!(
        editor.update(Message::FileSelected(Some(PathBuf::from("me.png")))),
        Event::None
    );
    assert!(editor.is_editing());
}

#[test]
fn new_selection_discards_session_immediately() {
    let mut editor = editor();
    load(&mut editor, "first.png", 400, 200);

    let event = editor.update(Message::FileSelected(Some(PathBuf::from("second.png"))));

    assert_eq!(event, Event::LoadRequested(PathBuf::from("second.png")));
    assert!(!editor.is_editing());
    assert!(editor.export_crop().is_err());
}

#[test]
fn stale_load_is_ignored() {
    let mut editor = editor();
    editor.update(Message::FileSelected(Some(PathBuf::from("first.png"))));
    editor.update(Message::FileSelected(Some(PathBuf::from("second.png"))));

    let event = editor.update(Message::ImageLoaded {
        path: PathBuf::from("first.png"),
        result: Ok(solid_image(10, 10)),
    });

    assert_eq!(event, Event::None);
    assert!(!editor.is_editing());
}

#[test]
fn decode_failure_notifies_and_stays_idle() {
    let mut editor = editor();
    editor.update(Message::FileSelected(Some(PathBuf::from("notes.txt"))));

    let event = editor.update(Message::ImageLoaded {
        path: PathBuf::from("notes.txt"),
        result: Err(Error::Decode("not an image".into())),
    });

    assert_eq!(event, Event::Notify("Decode Error: not an image".into()));
    assert!(!editor.show_editor_panel());
    assert_eq!(editor.last_error(), Some("Decode Error: not an image"));
    // The input was cleared, so picking the same file again retries
    assert_eq!(
        editor.update(Message::FileSelected(Some(PathBuf::from("notes.txt")))),
        Event::LoadRequested(PathBuf::from("notes.txt"))
    );
}

#[test]
fn empty_image_never_renders() {
    let mut editor = editor();
    editor.update(Message::FileSelected(Some(PathBuf::from("empty.png"))));

    let event = editor.update(Message::ImageLoaded {
        path: PathBuf::from("empty.png"),
        result: SourceImage::from_rgba(1, 0, Vec::new()),
    });

    assert!(matches!(event, Event::Notify(_)));
    assert!(!editor.is_editing());
    assert!(editor.surface().draws.is_empty());
    assert!(editor.last_error().is_some());
}

#[test]
fn successful_load_clears_previous_error() {
    let mut editor = editor();
    editor.update(Message::FileSelected(Some(PathBuf::from("bad.png"))));
    editor.update(Message::ImageLoaded {
        path: PathBuf::from("bad.png"),
        result: Err(Error::Decode("truncated".into())),
    });
    load(&mut editor, "good.png", 20, 20);
    assert!(editor.last_error().is_none());
}

#[test]
fn cancel_resets_everything() {
    let mut editor = editor();
    load(&mut editor, "me.png", 400, 200);
    editor.set_zoom(250.0).expect("zoom");
    editor.begin_drag(0.0, 0.0).expect("drag");

    editor.update(Message::Cancel);

    assert!(!editor.is_editing());
    assert!(editor.file_input().value().is_none());
    assert_eq!(editor.slider().value().value(), 100.0);
    assert_eq!(
        editor.export_crop(),
        Err(Error::Export(ExportError::NothingRendered))
    );
}

#[test]
fn reset_allows_identical_file_to_load_again() {
    let mut editor = editor();
    load(&mut editor, "me.png", 400, 200);
    editor.reset();

    assert_eq!(load(&mut editor, "me.png", 400, 200), Event::None);
    let session = editor.session().expect("session");
    assert_abs_diff_eq!(session.scale(), 1.5, epsilon = TOLERANCE);
    assert_abs_diff_eq!(session.offset().0, -150.0, epsilon = TOLERANCE);
}

#[test]
fn export_requires_a_render() {
    let editor = editor();
    assert_eq!(
        editor.export_crop(),
        Err(Error::Export(ExportError::NothingRendered))
    );
}

#[test]
fn export_has_fixed_size() {
    let editor = editing(400, 200);
    let avatar = editor.export_crop().expect("export");
    assert_eq!(avatar.side(), 200);
    assert_eq!(&avatar.bytes()[..2], &[0xFF, 0xD8]);
}

#[tokio::test]
async fn async_export_matches_sync_export() {
    let editor = editing(400, 200);
    let sync = editor.export_crop().expect("export");
    let async_result = editor.export_crop_async().await.expect("export");
    assert_eq!(sync, async_result);
}

#[test]
fn pixmap_editor_exports_rendered_preview() {
    let mut editor = AvatarEditor::new(&Config::default()).expect("editor");
    editor.initialize(solid_image(64, 32)).expect("initialize");

    let preview = editor.surface().pixmap();
    assert_eq!(preview.width(), 300);
    assert_eq!(preview.pixel(150, 150).expect("in bounds").alpha(), 255);

    let avatar = editor.export_crop().expect("export");
    let decoded = image_rs::load_from_memory(avatar.bytes()).expect("jpeg");
    assert_eq!((decoded.width(), decoded.height()), (200, 200));
}

#[test]
fn config_drives_slider_range_and_quality() {
    let config = Config {
        min_zoom_percent: Some(50.0),
        max_zoom_percent: Some(150.0),
        jpeg_quality: Some(70),
        ..Config::default()
    };
    let mut editor = AvatarEditor::with_surface(StubSurface::default(), &config).expect("editor");
    editor.initialize(solid_image(300, 300)).expect("initialize");

    assert_eq!(editor.set_zoom(400.0).expect("zoom").value(), 150.0);
    assert_eq!(editor.quality().value(), 70);
}
