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

//! External value synchronization.
//!
//! The single mechanism protecting a typing user from having their cursor
//! reset by an external re-render. Getting this gate wrong is the primary
//! correctness risk of the whole widget.

use super::base::FocusState;
use crate::host::Host;
use crate::Editor;

impl<H: Host> Editor<H> {
    /// Push a new external value into the surface.
    ///
    /// No-op while the surface is focused (the user owns the content), and
    /// no-op when the incoming value equals the last value this widget
    /// emitted itself — callers echoing `on_change` output back as the
    /// controlled value must not trigger a redundant rewrite, regardless of
    /// focus state.
    ///
    /// Otherwise the surface content is overwritten wholesale (`None` writes
    /// the empty string). The change callback is not invoked: this is an
    /// external write, not a local mutation.
    pub fn set_value(&mut self, value: Option<&str>) {
        if self.focus == FocusState::Focused {
            return;
        }
        let incoming = value.unwrap_or("");
        if self.last_emitted.as_deref() == Some(incoming) {
            return;
        }
        self.host.set_content(incoming);
        self.last_emitted = Some(incoming.to_owned());
    }
}
