// SPDX-License-Identifier: MPL-2.0
//! Anti-forgery token forwarded with the upload.

use crate::config::CSRF_FIELD;
use scraper::{Html, Selector};
use std::fmt;

/// Opaque anti-forgery token, sent verbatim in the `gorilla.csrf.Token` field.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Reads the token from the page's hidden `<input name="gorilla.csrf.Token">`.
    ///
    /// The page is parsed as an HTML document, so commented-out markup is
    /// skipped and character references in the value come back decoded.
    #[must_use]
    pub fn from_hidden_input(html: &str) -> Option<Self> {
        let query = format!(r#"input[name="{CSRF_FIELD}"]"#);
        let selector = Selector::parse(&query).ok()?;
        let document = Html::parse_document(html);

        let value = document
            .select(&selector)
            .find_map(|input| input.value().attr("value"))?;
        Some(Self(value.to_string()))
    }
}

// The token is a credential; keep it out of logs.
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CsrfToken").field(&"<redacted>").finish()
    }
}
