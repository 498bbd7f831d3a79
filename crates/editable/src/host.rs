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

//! Capability traits for the host environment.
//!
//! The editor core does not own a rendering surface, a selection API, a
//! clipboard, or a command executor — the embedding layer does. These traits
//! are the narrow seam between the two: a browser binding implements them on
//! top of the native `contenteditable` APIs, while tests implement them on a
//! plain string with byte offsets.

use crate::sanitizer::Fragment;

/// A clipboard payload in the flavors the host can extract.
///
/// The sanitizer prefers `html` when present and falls back to `plain_text`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub html: Option<String>,
    pub plain_text: Option<String>,
}

impl ClipboardPayload {
    pub fn html(markup: impl Into<String>) -> Self {
        Self {
            html: Some(markup.into()),
            plain_text: None,
        }
    }

    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            html: None,
            plain_text: Some(text.into()),
        }
    }
}

/// The mutable content root: owns the actual document markup.
pub trait EditSurface {
    /// Full serialized markup of the editable surface.
    fn content(&self) -> String;

    /// Overwrite the surface's markup wholesale.
    fn set_content(&mut self, markup: &str);

    /// Give the surface input focus.
    ///
    /// The resulting focus-in event is delivered back to the widget through
    /// [`Editor::focus_in`](crate::Editor::focus_in) like any other focus
    /// change; this call only requests it.
    fn focus(&mut self);
}

/// The host's native formatting-command executor, keyed by command name and
/// an optional string argument.
pub trait CommandExecutor {
    /// Apply a named formatting command to the live content.
    ///
    /// Returns `false` when the command was rejected or ignored (unknown
    /// name, inapplicable state). That is never an error: callers treat it
    /// as a no-op, matching native editing semantics.
    fn exec_command(&mut self, command: &str, argument: Option<&str>)
        -> bool;
}

/// Wraps the host's active text-selection and cursor APIs.
pub trait SelectionHost {
    /// An opaque handle to a cursor/selection position.
    ///
    /// Valid only until the next document mutation; callers must re-capture
    /// one per operation and never persist it.
    type Range;

    /// Capture the current insertion point, if any selection context exists.
    fn capture_insertion_point(&mut self) -> Option<Self::Range>;

    /// Delete the ranged content (possibly empty), insert the fragment's
    /// children in order at that position, and leave the cursor collapsed
    /// immediately after the last inserted node.
    ///
    /// Returns `false` if nothing was inserted.
    fn replace_range(
        &mut self,
        range: Self::Range,
        fragment: &Fragment,
    ) -> bool;
}

/// A blocking single-line text prompt shown to the user.
pub trait UserPrompt {
    /// `None` means the user cancelled the prompt.
    fn prompt(&mut self, message: &str) -> Option<String>;
}

/// Everything the widget needs from its host environment.
pub trait Host:
    EditSurface + CommandExecutor + SelectionHost + UserPrompt
{
}

impl<T> Host for T where
    T: EditSurface + CommandExecutor + SelectionHost + UserPrompt
{
}
