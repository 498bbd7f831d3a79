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

//! The paste pipeline: clipboard → sanitizer → selection → surface.

use crate::host::{ClipboardPayload, Host};
use crate::sanitizer::sanitize;
use crate::Editor;

impl<H: Host> Editor<H> {
    /// Handle a paste event.
    ///
    /// The payload is sanitized into an attribute-free fragment and inserted
    /// at the current insertion point, replacing any selected content; the
    /// cursor ends collapsed after the last inserted node. With no valid
    /// selection context the insertion is skipped — it must not raise or
    /// insert at an undefined location.
    ///
    /// This is a user-originated mutation, so the result is re-emitted like
    /// any other input event (even when the insertion was skipped, the
    /// unchanged content is re-emitted).
    pub fn paste(&mut self, payload: &ClipboardPayload) {
        let fragment = sanitize(payload);
        if let Some(range) = self.host.capture_insertion_point() {
            self.host.replace_range(range, &fragment);
        }
        self.emit_current();
    }
}

#[cfg(test)]
mod test {
    use crate::tests::testutils::{record_changes, MockHost};
    use crate::{ClipboardPayload, Editor, EditorConfig};

    fn editor_with_content(markup: &str) -> Editor<MockHost> {
        Editor::render(
            MockHost::new(),
            EditorConfig {
                value: Some(markup.to_owned()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn paste_inserts_sanitized_markup_at_the_cursor() {
        let mut editor = editor_with_content("<p>ab</p>");
        // Cursor between 'a' and 'b'.
        editor.host_mut().place_cursor(4);
        editor.paste(&ClipboardPayload::html(
            r#"<div style="color:red" onclick="x()"><b class="x">hi</b></div>"#,
        ));
        assert_eq!(editor.host().content, "<p>a<div><b>hi</b></div>b</p>");
    }

    #[test]
    fn paste_replaces_exactly_the_selected_range() {
        let mut editor = editor_with_content("<p>hello world</p>");
        // "world" selected.
        editor.host_mut().select(9, 14);
        editor.paste(&ClipboardPayload::plain_text("there"));
        assert_eq!(editor.host().content, "<p>hello there</p>");
    }

    #[test]
    fn paste_leaves_the_cursor_collapsed_after_the_inserted_content() {
        let mut editor = editor_with_content("<p>ab</p>");
        editor.host_mut().place_cursor(4);
        editor.paste(&ClipboardPayload::plain_text("XY"));
        assert_eq!(editor.host().selection, Some((6, 6)));
    }

    #[test]
    fn paste_without_a_selection_leaves_content_unchanged() {
        let mut editor = editor_with_content("<p>ab</p>");
        assert_eq!(editor.host().selection, None);
        editor.paste(&ClipboardPayload::html("<b>dropped</b>"));
        assert_eq!(editor.host().content, "<p>ab</p>");
    }

    #[test]
    fn paste_without_a_selection_still_reemits_unchanged_content() {
        let mut editor = editor_with_content("<p>ab</p>");
        let emitted = record_changes(&mut editor);
        editor.paste(&ClipboardPayload::plain_text("dropped"));
        assert_eq!(*emitted.borrow(), vec!["<p>ab</p>".to_owned()]);
    }

    #[test]
    fn paste_counts_as_a_local_mutation_for_echo_detection() {
        let mut editor = editor_with_content("<p>ab</p>");
        editor.host_mut().place_cursor(4);
        editor.paste(&ClipboardPayload::plain_text("X"));
        let pasted = editor.host().content.clone();

        let writes_before = editor.host().content_writes;
        editor.set_value(Some(&pasted));
        assert_eq!(editor.host().content_writes, writes_before);
    }

    #[test]
    fn paste_emits_exactly_once() {
        let mut editor = editor_with_content("<p>ab</p>");
        editor.host_mut().place_cursor(4);
        let emitted = record_changes(&mut editor);
        editor.paste(&ClipboardPayload::plain_text("X"));
        assert_eq!(emitted.borrow().len(), 1);
    }
}
