// SPDX-License-Identifier: MPL-2.0
use avatar_crop::config::{self, Config, CSRF_FIELD, EXPORT_SIZE};
use avatar_crop::editor::{AvatarEditor, MouseEvent, PointerEvent, TouchAdapter, TouchEvent};
use avatar_crop::error::{Error, UploadError};
use avatar_crop::upload::{AvatarUploader, CsrfToken, UploadOutcome};
use image_rs::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use tiny_skia::Point;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Writes a two-colour PNG: left half red, right half blue.
fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join(name);
    let image = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    image.save(&path).expect("failed to write png");
    path
}

async fn editing(path: &Path) -> AvatarEditor {
    let mut editor = AvatarEditor::new(&Config::default()).expect("editor");
    editor.open(path.to_path_buf()).await.expect("open");
    editor
}

#[tokio::test]
async fn load_zoom_drag_and_export() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = write_png(&dir, "portrait.png", 100, 400);
    let mut editor = editing(&path).await;

    let session = editor.session().expect("session");
    assert_eq!(session.scale(), 3.0);
    assert_eq!(session.offset(), (0.0, -450.0));
    assert_eq!(editor.slider().label(), "300%");

    editor.set_zoom(150.0).expect("zoom");
    editor
        .pointer(MouseEvent::ButtonPressed { x: 150.0, y: 150.0 }.into())
        .expect("press");
    editor
        .pointer(MouseEvent::CursorMoved { x: 170.0, y: 140.0 }.into())
        .expect("move");
    editor.pointer(MouseEvent::ButtonReleased.into()).expect("release");

    let (x, y) = editor.session().expect("session").offset();
    assert!((x - 95.0).abs() < 1e-3, "x offset was {x}");
    assert!((y - -160.0).abs() < 1e-3, "y offset was {y}");

    let avatar = editor.export_crop_async().await.expect("export");
    let decoded = image_rs::load_from_memory(avatar.bytes()).expect("exported jpeg decodes");
    assert_eq!(decoded.width(), EXPORT_SIZE);
    assert_eq!(decoded.height(), EXPORT_SIZE);

    // The zoomed-out image leaves uncovered bands on both sides, exported as black
    let rgb = decoded.to_rgb8();
    let edge = rgb.get_pixel(2, 100);
    assert!(edge.0.iter().all(|&c| c < 40), "edge pixel was {edge:?}");
}

#[tokio::test]
async fn touch_input_pans_like_mouse_input() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = write_png(&dir, "wide.png", 400, 200);
    let mut editor = editing(&path).await;

    let adapter = TouchAdapter::new(Point::from_xy(20.0, 300.0));
    let events = [
        TouchEvent::Start {
            touches: vec![Point::from_xy(120.0, 400.0)],
        },
        TouchEvent::Move {
            touches: vec![Point::from_xy(150.0, 400.0)],
        },
        TouchEvent::End,
    ];
    for event in &events {
        let pointer: PointerEvent = adapter.translate(event).expect("touch point");
        editor.pointer(pointer).expect("pointer");
    }

    let session = editor.session().expect("session");
    assert_eq!(session.offset(), (-120.0, 0.0));
    assert!(!session.is_dragging());
}

#[tokio::test]
async fn reopening_same_file_after_reset_reinitializes() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = write_png(&dir, "me.png", 400, 200);
    let mut editor = editing(&path).await;
    editor.set_zoom(400.0).expect("zoom");

    editor.reset();
    editor.open(path).await.expect("reopen");

    let session = editor.session().expect("session");
    assert_eq!(session.scale(), 1.5);
    assert_eq!(session.offset(), (-150.0, 0.0));
}

#[tokio::test]
async fn non_image_file_reports_decode_error() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("notes.png");
    std::fs::write(&path, b"definitely not a png").expect("failed to write file");

    let mut editor = AvatarEditor::new(&Config::default()).expect("editor");
    let result = editor.open(path).await;

    assert!(matches!(result, Err(Error::Decode(_))));
    assert!(!editor.show_editor_panel());
    assert!(editor.last_error().is_some());
    assert!(editor.file_input().value().is_none());
}

#[test]
fn config_file_controls_editor_settings() {
    let dir = tempdir().expect("failed to create temp dir");
    let config_path = dir.path().join("settings.toml");
    let saved = Config {
        server_url: Some("http://localhost:8080".into()),
        jpeg_quality: Some(60),
        min_zoom_percent: Some(25.0),
        max_zoom_percent: Some(250.0),
        request_timeout_secs: Some(3),
    };
    config::save_to_path(&saved, &config_path).expect("save");

    let loaded = config::load_from_path(&config_path).expect("load");
    assert_eq!(loaded, saved);

    let editor = AvatarEditor::new(&loaded).expect("editor");
    assert_eq!(editor.quality().value(), 60);
    assert_eq!(editor.slider().range().max(), 250.0);
    assert_eq!(loaded.request_timeout(), Duration::from_secs(3));
}

// =============================================================================
// Upload against a mock profile server
// =============================================================================

const UPLOAD_ROUTE: &str = "/profile/upload-avatar";

async fn profile_server(upload_response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_ROUTE))
        .respond_with(upload_response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

async fn recorded(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
}

fn uploader(server: &MockServer) -> AvatarUploader {
    AvatarUploader::new(&server.uri(), Duration::from_secs(10)).expect("uploader")
}

#[tokio::test]
async fn upload_sends_multipart_form_and_resets_editor() {
    let server = profile_server(ResponseTemplate::new(200).set_body_string("saved")).await;
    let dir = tempdir().expect("failed to create temp dir");
    let mut editor = editing(&write_png(&dir, "me.png", 400, 200)).await;

    let outcome = editor
        .submit(
            &uploader(&server),
            &CsrfToken::new("tok+123=="),
            Some("session=abc"),
        )
        .await
        .expect("upload");

    assert_eq!(outcome, UploadOutcome::Completed { status: 200 });
    assert!(!editor.is_editing());
    assert!(editor.file_input().value().is_none());

    let requests = recorded(&server).await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.url.path(), UPLOAD_ROUTE);

    let header = |name: &str| {
        request
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    assert_eq!(header("cookie"), "session=abc");
    assert!(header("content-type").starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains(r#"name="avatar"; filename="avatar.jpg""#));
    assert!(body.contains("Content-Type: image/jpeg"));
    assert!(body.contains(&format!(r#"name="{CSRF_FIELD}""#)));
    assert!(body.contains("tok+123=="));
}

#[tokio::test]
async fn redirect_after_upload_is_reported() {
    let server = profile_server(
        ResponseTemplate::new(303)
            .insert_header("Location", "/profile?flash=Avatar+updated+successfully"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>profile</html>"))
        .mount(&server)
        .await;
    let dir = tempdir().expect("failed to create temp dir");
    let mut editor = editing(&write_png(&dir, "me.png", 200, 200)).await;

    let outcome = editor
        .submit(&uploader(&server), &CsrfToken::new("tok"), None)
        .await
        .expect("upload");

    let UploadOutcome::Redirected(url) = &outcome else {
        panic!("expected a redirect, got {outcome:?}");
    };
    assert_eq!(url.path(), "/profile");
    assert_eq!(url.query(), Some("flash=Avatar+updated+successfully"));
    assert!(!editor.is_editing());

    let requests = recorded(&server).await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method.as_str(), "GET");
    assert_eq!(requests[1].url.path(), "/profile");
}

#[tokio::test]
async fn error_status_keeps_session_for_retry() {
    let server = profile_server(ResponseTemplate::new(500).set_body_string("oops")).await;
    let dir = tempdir().expect("failed to create temp dir");
    let mut editor = editing(&write_png(&dir, "me.png", 200, 200)).await;

    let outcome = editor
        .submit(&uploader(&server), &CsrfToken::new("tok"), None)
        .await
        .expect("upload");

    assert_eq!(outcome, UploadOutcome::Completed { status: 500 });
    assert!(!outcome.is_success());
    assert!(editor.is_editing());
    assert_eq!(editor.last_error(), Some("Upload failed with HTTP 500"));
    assert!(editor.export_crop().is_ok());
}

#[tokio::test]
async fn unreachable_server_keeps_session_for_retry() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr")
    };
    let uploader =
        AvatarUploader::new(&format!("http://{addr}"), Duration::from_secs(5)).expect("uploader");
    let dir = tempdir().expect("failed to create temp dir");
    let mut editor = editing(&write_png(&dir, "me.png", 400, 200)).await;

    let err = editor
        .submit(&uploader, &CsrfToken::new("tok"), None)
        .await
        .expect_err("connection refused");

    assert!(matches!(err, Error::Upload(UploadError::Unreachable(_))), "got {err:?}");
    assert!(editor.is_editing());
    assert!(editor.last_error().is_some());
    assert!(editor.export_crop().is_ok());
}
