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

//! Core logic for an embeddable rich text editing widget with a
//! controlled-value interface.
//!
//! External state flows in through [`Editor::set_value`], which is gated by
//! focus state and last-emitted-value comparison so that a typing user never
//! has their cursor reset by an external re-render. User edits and formatting
//! commands flow out through a change callback carrying the full serialized
//! markup. Pasted markup goes through [`sanitize`], which strips every
//! attribute while preserving tag structure and text.
//!
//! The crate never touches a real rendering surface. Everything the host
//! environment provides (content storage, focus, native formatting commands,
//! selection, clipboard, prompts) is consumed through the traits in [`host`],
//! so the widget runs unchanged against a browser binding or an in-memory
//! fake.

pub mod host;
pub mod sanitizer;
mod widget;

#[cfg(test)]
mod tests;

pub use host::{
    ClipboardPayload, CommandExecutor, EditSurface, Host, SelectionHost,
    UserPrompt,
};
pub use sanitizer::{sanitize, Fragment, FragmentNode, ParseError};
pub use widget::{BlockTag, Editor, EditorCommand, EditorConfig, FocusState};
