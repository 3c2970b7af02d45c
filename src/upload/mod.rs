// SPDX-License-Identifier: MPL-2.0
//! Avatar upload.
//!
//! Sends the encoded crop to the profile server as a multipart form, the same
//! request a browser makes from the profile page: the JPEG in the `avatar`
//! field plus the anti-forgery token. The server answers with a redirect back
//! to the profile page, which the caller should navigate to.

mod csrf;

pub use csrf::CsrfToken;

use crate::config::{
    AVATAR_FIELD, AVATAR_FILENAME, AVATAR_MIME, CSRF_FIELD, MAX_REDIRECTS, MAX_UPLOAD_BYTES,
    UPLOAD_PATH,
};
use crate::error::{Result, UploadError};
use crate::media::EncodedAvatar;
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::time::Duration;

const USER_AGENT: &str = concat!("AvatarCrop/", env!("CARGO_PKG_VERSION"));

/// How the server answered an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The response came from a different URL than the upload endpoint;
    /// the caller should navigate there.
    Redirected(Url),
    /// The server answered the endpoint directly. The body was discarded.
    Completed { status: u16 },
}

impl UploadOutcome {
    /// Whether the server accepted the avatar: it redirected, or answered
    /// with a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Redirected(_) => true,
            Self::Completed { status } => (200..300).contains(status),
        }
    }
}

/// Everything sent in one upload request.
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub avatar: EncodedAvatar,
    pub csrf_token: CsrfToken,
    /// Raw `Cookie` header carrying the user's session, if the client does
    /// not already hold one.
    pub session_cookie: Option<String>,
}

/// HTTP client bound to one profile server.
#[derive(Debug, Clone)]
pub struct AvatarUploader {
    client: reqwest::Client,
    endpoint: Url,
}

impl AvatarUploader {
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidEndpoint`] if `server_url` is not an
    /// absolute URL, or if the HTTP client cannot be built.
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(server_url)
            .map_err(|e| UploadError::InvalidEndpoint(format!("{server_url}: {e}")))?;
        let endpoint = base
            .join(UPLOAD_PATH)
            .map_err(|e| UploadError::InvalidEndpoint(format!("{server_url}: {e}")))?;

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UploadError::InvalidEndpoint(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// Absolute URL the form is posted to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts the form and reports where the exchange ended.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::TooLarge`] before sending anything if the
    /// avatar exceeds the server's multipart limit, and a transport
    /// [`UploadError`] if the request fails.
    pub async fn upload(&self, form: UploadForm) -> Result<UploadOutcome> {
        let size = form.avatar.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size,
                limit: MAX_UPLOAD_BYTES,
            }
            .into());
        }

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .multipart(build_multipart(form.avatar, &form.csrf_token)?);
        if let Some(cookie) = form.session_cookie.as_deref() {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| UploadError::Other(format!("invalid session cookie: {e}")))?;
            request = request.header(COOKIE, value);
        }

        log::debug!("Uploading {size} byte avatar to {}", self.endpoint);
        let response = request.send().await?;

        if response.url() != &self.endpoint {
            let target = response.url().clone();
            log::info!("Avatar upload redirected to {target}");
            return Ok(UploadOutcome::Redirected(target));
        }

        let status = response.status();
        if !status.is_success() {
            log::warn!("Avatar upload answered with HTTP {status}");
        }
        // Drain the body so the connection finishes cleanly.
        let _ = response.bytes().await?;
        Ok(UploadOutcome::Completed {
            status: status.as_u16(),
        })
    }
}

fn build_multipart(avatar: EncodedAvatar, token: &CsrfToken) -> Result<Form> {
    let part = Part::bytes(avatar.into_bytes())
        .file_name(AVATAR_FILENAME)
        .mime_str(AVATAR_MIME)?;
    Ok(Form::new()
        .part(AVATAR_FIELD, part)
        .text(CSRF_FIELD, token.value().to_string()))
}
