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

//! Surface event glue: focus transitions and local-edit emission.

use super::base::FocusState;
use crate::host::Host;
use crate::Editor;

impl<H: Host> Editor<H> {
    /// The host surface gained input focus.
    pub fn focus_in(&mut self) {
        self.focus = FocusState::Focused;
    }

    /// The host surface lost input focus.
    pub fn focus_out(&mut self) {
        self.focus = FocusState::Blurred;
    }

    /// A raw user input event occurred (typing, IME composition, delete).
    ///
    /// The full current markup is read back and emitted exactly once — no
    /// debouncing, no diffing. The full snapshot is always the unit of
    /// state.
    pub fn handle_input(&mut self) {
        self.emit_current();
    }

    /// Read back the surface content, record it as our own emission, and
    /// invoke the change callback.
    ///
    /// `last_emitted` is updated before the callback runs, so a caller that
    /// synchronously echoes the value back into [`set_value`] sees it as an
    /// echo, not a new external value.
    ///
    /// [`set_value`]: Editor::set_value
    pub(crate) fn emit_current(&mut self) {
        let markup = self.host.content();
        self.last_emitted = Some(markup.clone());
        if let Some(handler) = self.on_change.as_mut() {
            handler(&markup);
        }
    }

    /// Full serialized markup of the surface.
    pub fn content(&self) -> String {
        self.host.content()
    }

    /// Whether the embedding layer should show the placeholder hint.
    pub fn placeholder_visible(&self) -> bool {
        self.host.content().is_empty()
    }
}

#[cfg(test)]
mod test {
    use crate::tests::testutils::{record_changes, MockHost};
    use crate::{Editor, EditorConfig, FocusState};

    fn empty_editor() -> Editor<MockHost> {
        Editor::render(MockHost::new(), EditorConfig::default())
    }

    #[test]
    fn focus_events_drive_the_state_machine() {
        let mut editor = empty_editor();
        assert_eq!(editor.focus_state(), FocusState::Blurred);
        editor.focus_in();
        assert_eq!(editor.focus_state(), FocusState::Focused);
        editor.focus_out();
        assert_eq!(editor.focus_state(), FocusState::Blurred);
    }

    #[test]
    fn input_emits_the_full_snapshot_once() {
        let mut editor = empty_editor();
        let emitted = record_changes(&mut editor);

        editor.focus_in();
        editor.host_mut().content = "hello".to_owned();
        editor.handle_input();

        assert_eq!(*emitted.borrow(), vec!["hello".to_owned()]);
    }

    #[test]
    fn typing_into_an_empty_editor_emits_the_typed_text() {
        let mut editor = empty_editor();
        let emitted = record_changes(&mut editor);

        editor.focus_in();
        for (i, _) in "hello".char_indices() {
            editor.host_mut().content = "hello"[..=i].to_owned();
            editor.handle_input();
        }

        assert_eq!(emitted.borrow().last().unwrap(), "hello");
        assert_eq!(emitted.borrow().len(), 5);
    }

    #[test]
    fn input_records_the_emission_for_echo_detection() {
        let mut editor = empty_editor();
        editor.focus_in();
        editor.host_mut().content = "<p>x</p>".to_owned();
        editor.handle_input();
        editor.focus_out();

        let writes_before = editor.host().content_writes;
        editor.set_value(Some("<p>x</p>"));
        assert_eq!(editor.host().content_writes, writes_before);
    }

    #[test]
    fn placeholder_is_visible_only_while_empty() {
        let mut editor = empty_editor();
        assert!(editor.placeholder_visible());
        editor.host_mut().content = "<p>x</p>".to_owned();
        assert!(!editor.placeholder_visible());
    }
}
