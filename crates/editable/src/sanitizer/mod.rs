// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Paste sanitization: untrusted clipboard markup in, attribute-free
//! fragment out.
//!
//! Clipboard content from other applications carries inline styles, event
//! handler attributes, and tracking metadata that must never leak into the
//! document. Structural formatting (lists, headings, emphasis) is the useful
//! part of a rich paste and is preserved. The pipeline is
//! parse → attribute-strip → insert, entirely on a detached tree.

mod fragment;
mod parser;

pub use fragment::{Fragment, FragmentNode};
pub use parser::ParseError;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::host::ClipboardPayload;

// Google Docs and Word leave <meta> tags on the clipboard which caused
// errors in html5ever.
static META_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<meta[^>]*>").unwrap());

/// Clean a clipboard payload into a fragment safe for insertion.
///
/// The markup flavor is preferred when present; otherwise the plain-text
/// flavor is used as a single literal text node. Every element attribute is
/// removed; tag names, nesting, and text content are preserved verbatim.
///
/// This never fails: markup that cannot be parsed degrades to a plain-text
/// paste of the raw payload.
pub fn sanitize(payload: &ClipboardPayload) -> Fragment {
    match payload.html.as_deref().filter(|html| !html.is_empty()) {
        Some(html) => sanitize_html(html),
        None => {
            Fragment::from_text(payload.plain_text.as_deref().unwrap_or(""))
        }
    }
}

fn sanitize_html(html: &str) -> Fragment {
    let cleaned = META_TAG.replace_all(html, "");
    match parser::parse(&cleaned) {
        Ok(fragment) => fragment.strip_attributes(),
        Err(_) => Fragment::from_text(html),
    }
}
