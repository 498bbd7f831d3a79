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

use crate::host::Host;

/// Whether the user is actively interacting with the surface.
///
/// Transitions on the host's focus events only. External value overwrites
/// are permitted in `Blurred` alone; while `Focused`, the live surface is
/// the sole source of truth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    Blurred,
    Focused,
}

/// Configuration recognized by [`Editor::render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Initial controlled content. `None` is treated as empty.
    pub value: Option<String>,
    /// Hint text the embedding layer shows while the content is empty.
    pub placeholder: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            value: None,
            placeholder: "Start typing...".to_owned(),
        }
    }
}

pub(crate) type ChangeHandler = Box<dyn FnMut(&str)>;

/// A controlled-value rich text editor over a host-provided surface.
///
/// Two authorities compete over the same content: the external caller, who
/// may push a new value at any time via [`set_value`], and the user, who
/// mutates the surface directly. The widget arbitrates with an explicit
/// focus state machine plus a comparison against the last value it emitted
/// itself, so an external re-render can never clobber in-progress edits or
/// reset the cursor.
///
/// [`set_value`]: Editor::set_value
pub struct Editor<H: Host> {
    pub(crate) host: H,

    /// The most recent content this widget itself produced.
    /// `None` means no value has ever been synced, which is distinct from
    /// every legal string so the first external value always applies.
    pub(crate) last_emitted: Option<String>,

    pub(crate) focus: FocusState,

    pub(crate) on_change: Option<ChangeHandler>,

    placeholder: String,
}

impl<H: Host> Editor<H> {
    /// Create a widget over `host` and apply the configured initial value
    /// through the normal sync path.
    pub fn render(host: H, config: EditorConfig) -> Self {
        let mut editor = Self {
            host,
            last_emitted: None,
            focus: FocusState::Blurred,
            on_change: None,
            placeholder: config.placeholder,
        };
        editor.set_value(config.value.as_deref());
        editor
    }

    /// Register the change callback, invoked with the full serialized
    /// markup after every local mutation.
    pub fn on_change(&mut self, handler: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::testutils::MockHost;

    #[test]
    fn render_applies_the_initial_value_before_any_focus_event() {
        let editor = Editor::render(
            MockHost::new(),
            EditorConfig {
                value: Some("<p>A</p>".to_owned()),
                ..Default::default()
            },
        );
        assert_eq!(editor.host().content, "<p>A</p>");
        assert_eq!(editor.focus_state(), FocusState::Blurred);
    }

    #[test]
    fn render_without_a_value_leaves_the_surface_empty() {
        let editor = Editor::render(MockHost::new(), EditorConfig::default());
        assert_eq!(editor.host().content, "");
        assert_eq!(editor.placeholder(), "Start typing...");
    }
}
