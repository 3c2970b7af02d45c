// SPDX-License-Identifier: MPL-2.0
//! Avatar editor.
//!
//! This module follows a "state down, messages up" pattern: the host feeds
//! [`Message`]s into [`AvatarEditor::update`] and performs the side effects
//! described by the returned [`Event`]. Direct methods are available for
//! hosts that drive the editor imperatively (the command-line front end).
//!
//! The editor owns at most one [`Session`]. Selecting a new file discards it
//! immediately; the next session starts once the file has been decoded.

pub mod drag;
pub mod file_input;
pub mod gesture;
mod messages;
pub mod session;
pub mod surface;
pub mod zoom;

#[cfg(test)]
mod tests;

pub use file_input::FileInput;
pub use gesture::{MouseAdapter, MouseEvent, PointerEvent, TouchAdapter, TouchEvent};
pub use messages::{Event, Message};
pub use session::{Placement, Session};
pub use surface::{PixmapSurface, Surface};
pub use zoom::ZoomSlider;

use crate::config::{Config, EXPORT_SIZE, PREVIEW_SIZE};
use crate::domain::editing::{JpegQuality, SurfaceSize, ZoomPercent};
use crate::error::{Error, ExportError, Result};
use crate::media::{self, EncodedAvatar, SourceImage};
use crate::upload::{AvatarUploader, CsrfToken, UploadForm, UploadOutcome};
use std::path::PathBuf;

/// Lifecycle of the editor.
#[derive(Debug, Clone, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Editing(Session),
}

/// Pan/zoom controller for one preview surface.
#[derive(Debug)]
pub struct AvatarEditor<S: Surface = PixmapSurface> {
    state: EditorState,
    surface: S,
    slider: ZoomSlider,
    file_input: FileInput,
    export_size: SurfaceSize,
    quality: JpegQuality,
    last_error: Option<String>,
}

fn side(value: u32, what: &str) -> Result<SurfaceSize> {
    SurfaceSize::new(value).ok_or_else(|| Error::Config(format!("{what} size must be non-zero")))
}

impl AvatarEditor<PixmapSurface> {
    /// Creates an editor with a software preview surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the preview surface cannot be allocated.
    pub fn new(config: &Config) -> Result<Self> {
        let surface = PixmapSurface::new(side(PREVIEW_SIZE, "preview")?)?;
        Self::with_surface(surface, config)
    }
}

impl<S: Surface> AvatarEditor<S> {
    /// Creates an editor drawing into `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the export size is invalid.
    pub fn with_surface(surface: S, config: &Config) -> Result<Self> {
        Ok(Self {
            state: EditorState::Idle,
            surface,
            slider: ZoomSlider::new(config.zoom_range()),
            file_input: FileInput::default(),
            export_size: side(EXPORT_SIZE, "export")?,
            quality: config.quality(),
            last_error: None,
        })
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::FileSelected(None) => {
                log::debug!("{}", Error::NoFileSelected);
                Event::None
            }
            Message::FileSelected(Some(path)) => self.select_file(path),
            Message::ImageLoaded { path, result } => match self.finish_load(path, result) {
                Ok(()) => Event::None,
                Err(err) => Event::Notify(err.to_string()),
            },
            Message::ZoomChanged(percent) => {
                if let Err(err) = self.set_zoom(percent) {
                    log::trace!("Zoom ignored: {err}");
                }
                Event::None
            }
            Message::Pointer(event) => {
                if let Err(err) = self.pointer(event) {
                    log::trace!("Pointer event ignored: {err}");
                }
                Event::None
            }
            Message::Cancel => {
                self.reset();
                Event::None
            }
        }
    }

    fn select_file(&mut self, path: PathBuf) -> Event {
        if !self.file_input.select(path.clone()) {
            return Event::None;
        }
        if matches!(self.state, EditorState::Editing(_)) {
            log::debug!("Discarding current session for {}", path.display());
        }
        self.state = EditorState::Idle;
        self.surface.reset();
        Event::LoadRequested(path)
    }

    fn finish_load(&mut self, path: PathBuf, result: Result<SourceImage>) -> Result<()> {
        if !self.file_input.holds(&path) {
            log::debug!("Ignoring stale load of {}", path.display());
            return Ok(());
        }
        match result {
            Ok(image) => self.initialize(image),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Records a failed load: the error is shown, the editor stays idle and
    /// the file input is cleared so the same file can be picked again.
    fn fail(&mut self, err: Error) -> Error {
        log::warn!("Could not load avatar image: {err}");
        self.last_error = Some(err.to_string());
        self.state = EditorState::Idle;
        self.surface.reset();
        self.file_input.clear();
        err
    }

    /// Starts a session for a decoded image, fitted to the preview surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the image has an empty dimension; the
    /// editor then stays idle with the error recorded.
    pub fn initialize(&mut self, image: SourceImage) -> Result<()> {
        let session = match Session::new(image, self.surface.size()) {
            Ok(session) => session,
            Err(err) => return Err(self.fail(err)),
        };

        let scale = session.scale();
        self.state = EditorState::Editing(session);
        self.last_error = None;
        self.render();
        let synced = self.slider.sync_to_scale(scale);
        log::debug!("Editing started, slider at {}", synced.value());
        Ok(())
    }

    /// Redraws the preview from the current session. Does nothing while idle.
    pub fn render(&mut self) {
        if let EditorState::Editing(session) = &self.state {
            self.surface.clear();
            self.surface.draw_image(session.image(), session.placement());
        }
    }

    /// Zooms around the preview center to `percent`, clamped to the slider
    /// range, and returns the value actually applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEditing`] when no image is loaded.
    pub fn set_zoom(&mut self, percent: f32) -> Result<ZoomPercent> {
        let EditorState::Editing(session) = &mut self.state else {
            return Err(Error::NotEditing);
        };
        let value = self.slider.set(percent);
        session.zoom_to(value.as_scale());
        self.render();
        Ok(value)
    }

    /// # Errors
    ///
    /// Returns [`Error::NotEditing`] when no image is loaded.
    pub fn begin_drag(&mut self, x: f32, y: f32) -> Result<()> {
        self.session_mut()?.begin_drag(x, y);
        Ok(())
    }

    /// Pans by the pointer movement since the last position. Returns whether
    /// a drag was active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEditing`] when no image is loaded.
    pub fn drag_to(&mut self, x: f32, y: f32) -> Result<bool> {
        let moved = self.session_mut()?.drag_to(x, y);
        if moved {
            self.render();
        }
        Ok(moved)
    }

    pub fn end_drag(&mut self) {
        if let EditorState::Editing(session) = &mut self.state {
            session.end_drag();
        }
    }

    /// Dispatches unified pointer input. Release events never fail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEditing`] for press and move events while idle.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Down(point) => self.begin_drag(point.x, point.y),
            PointerEvent::Move(point) => self.drag_to(point.x, point.y).map(|_| ()),
            PointerEvent::Up | PointerEvent::Leave => {
                self.end_drag();
                Ok(())
            }
        }
    }

    fn session_mut(&mut self) -> Result<&mut Session> {
        match &mut self.state {
            EditorState::Editing(session) => Ok(session),
            EditorState::Idle => Err(Error::NotEditing),
        }
    }

    /// Encodes the whole preview, resampled to the export size.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NothingRendered`] if the preview has not been
    /// drawn, or [`ExportError::Encode`] if encoding fails.
    pub fn export_crop(&self) -> Result<EncodedAvatar> {
        let pixmap = self.surface.snapshot().ok_or(ExportError::NothingRendered)?;
        media::export_crop(&pixmap, self.export_size, self.quality)
    }

    /// Like [`Self::export_crop`], with the encode on the blocking pool.
    ///
    /// # Errors
    ///
    /// Same as [`Self::export_crop`], plus [`ExportError::TaskAborted`].
    pub async fn export_crop_async(&self) -> Result<EncodedAvatar> {
        let pixmap = self.surface.snapshot().ok_or(ExportError::NothingRendered)?;
        media::export_crop_async(pixmap, self.export_size, self.quality).await
    }

    /// Discards the session and returns to the initial state.
    pub fn reset(&mut self) {
        self.state = EditorState::Idle;
        self.surface.reset();
        self.slider.reset();
        self.file_input.clear();
        self.last_error = None;
    }

    /// Selects `path` and loads it. Selecting the file already held by the
    /// file input does nothing, as with a browser file input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Decode`] if the file cannot be used;
    /// the error is also recorded in [`Self::last_error`].
    pub async fn open(&mut self, path: PathBuf) -> Result<()> {
        if let Event::LoadRequested(path) = self.select_file(path) {
            let result = media::load_image_async(path.clone()).await;
            self.finish_load(path, result)?;
        }
        Ok(())
    }

    /// Exports the crop and uploads it. When the server accepts the avatar
    /// the editor resets. An error status is returned as the outcome with the
    /// session kept and [`Self::last_error`] set, so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns the export or upload error; the session is kept as well.
    pub async fn submit(
        &mut self,
        uploader: &AvatarUploader,
        csrf_token: &CsrfToken,
        session_cookie: Option<&str>,
    ) -> Result<UploadOutcome> {
        let result = match self.export_crop_async().await {
            Ok(avatar) => {
                uploader
                    .upload(UploadForm {
                        avatar,
                        csrf_token: csrf_token.clone(),
                        session_cookie: session_cookie.map(str::to_string),
                    })
                    .await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(outcome) if outcome.is_success() => {
                self.reset();
                Ok(outcome)
            }
            Ok(outcome) => {
                if let UploadOutcome::Completed { status } = outcome {
                    self.last_error = Some(format!("Upload failed with HTTP {status}"));
                }
                Ok(outcome)
            }
            Err(err) => {
                log::warn!("Avatar submission failed: {err}");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            EditorState::Editing(session) => Some(session),
            EditorState::Idle => None,
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    /// The editor panel is shown while a session is live; otherwise the
    /// current avatar is displayed instead.
    #[must_use]
    pub fn show_editor_panel(&self) -> bool {
        self.is_editing()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn slider(&self) -> &ZoomSlider {
        &self.slider
    }

    #[must_use]
    pub fn file_input(&self) -> &FileInput {
        &self.file_input
    }

    #[must_use]
    pub fn export_size(&self) -> SurfaceSize {
        self.export_size
    }

    #[must_use]
    pub fn quality(&self) -> JpegQuality {
        self.quality
    }

    /// Message for the error banner, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
