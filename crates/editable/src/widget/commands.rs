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

//! Formatting-command dispatch.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::host::Host;
use crate::Editor;

/// A named formatting operation, serialized as the host's native command
/// name.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    PartialEq,
    Eq,
)]
pub enum EditorCommand {
    #[strum(serialize = "bold")]
    Bold,
    #[strum(serialize = "italic")]
    Italic,
    #[strum(serialize = "insertUnorderedList")]
    UnorderedList,
    #[strum(serialize = "insertOrderedList")]
    OrderedList,
    /// Takes a [`BlockTag`] name as its argument.
    #[strum(serialize = "formatBlock")]
    FormatBlock,
    /// Takes the link URL as its argument.
    #[strum(serialize = "createLink")]
    CreateLink,
    #[strum(serialize = "undo")]
    Undo,
    #[strum(serialize = "redo")]
    Redo,
}

/// Block-level formats supported by [`Editor::format_block`], serialized as
/// the tag name the native command expects.
#[derive(
    AsRefStr, Clone, Copy, Debug, Display, EnumIter, EnumString, PartialEq, Eq,
)]
pub enum BlockTag {
    #[strum(serialize = "p")]
    Paragraph,
    #[strum(serialize = "h1")]
    Heading1,
    #[strum(serialize = "h2")]
    Heading2,
    #[strum(serialize = "h3")]
    Heading3,
}

impl<H: Host> Editor<H> {
    /// Execute a formatting command against the live content, passing the
    /// argument through verbatim.
    ///
    /// The surface is focused first, deterministically, so the command
    /// applies to the last known selection instead of failing silently.
    /// A rejected or unrecognized command is a no-op; the full resulting
    /// content is re-emitted either way and nothing is raised past this
    /// boundary.
    pub fn execute(&mut self, command: EditorCommand, argument: Option<&str>) {
        self.host.focus();
        let _applied = self.host.exec_command(command.as_ref(), argument);
        self.emit_current();
    }

    pub fn bold(&mut self) {
        self.execute(EditorCommand::Bold, None);
    }

    pub fn italic(&mut self) {
        self.execute(EditorCommand::Italic, None);
    }

    pub fn unordered_list(&mut self) {
        self.execute(EditorCommand::UnorderedList, None);
    }

    pub fn ordered_list(&mut self) {
        self.execute(EditorCommand::OrderedList, None);
    }

    pub fn undo(&mut self) {
        self.execute(EditorCommand::Undo, None);
    }

    pub fn redo(&mut self) {
        self.execute(EditorCommand::Redo, None);
    }

    /// Convert the current block to a paragraph or heading.
    pub fn format_block(&mut self, tag: BlockTag) {
        self.execute(EditorCommand::FormatBlock, Some(tag.as_ref()));
    }

    /// Prompt the user for a URL and wrap the selection in a link.
    ///
    /// A cancelled or empty prompt is a user-initiated abort: no mutation,
    /// no callback.
    pub fn create_link(&mut self) {
        let Some(url) = self.host.prompt("Enter URL") else {
            return;
        };
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        let url = url.to_owned();
        self.execute(EditorCommand::CreateLink, Some(&url));
    }
}
