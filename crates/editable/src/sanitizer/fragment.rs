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

//! The owned, detached markup tree produced by parsing a paste payload.
//!
//! A [`Fragment`] is transient: it is created by [`sanitize`], stripped of
//! attributes, handed to the host's selection API for insertion, and
//! dropped. It never references a live rendering context.
//!
//! [`sanitize`]: crate::sanitize

/// A single node in a [`Fragment`] tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentNode {
    Element {
        /// Lowercase tag name, e.g. `"div"`.
        name: String,
        /// `(name, value)` pairs in document order. Empty after
        /// [`Fragment::strip_attributes`].
        attrs: Vec<(String, String)>,
        children: Vec<FragmentNode>,
    },
    /// Unescaped text content.
    Text(String),
}

impl FragmentNode {
    pub fn element(name: &str, children: Vec<FragmentNode>) -> Self {
        Self::Element {
            name: name.to_owned(),
            attrs: Vec::new(),
            children,
        }
    }

    pub fn text(content: &str) -> Self {
        Self::Text(content.to_owned())
    }
}

/// A detached sequence of sibling nodes, ready for insertion at a cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    pub children: Vec<FragmentNode>,
}

impl Fragment {
    pub fn new(children: Vec<FragmentNode>) -> Self {
        Self { children }
    }

    /// A fragment holding the given payload as a single literal text node.
    /// Empty text produces an empty fragment.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            Self::default()
        } else {
            Self {
                children: vec![FragmentNode::Text(text.to_owned())],
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Remove every attribute from every element, recursively.
    ///
    /// Tag names, nesting order, and text content are preserved verbatim.
    /// This is a pure structural map over the tree; nothing outside the
    /// fragment is touched.
    pub fn strip_attributes(self) -> Self {
        Self {
            children: self.children.into_iter().map(strip_node).collect(),
        }
    }

    /// Serialize back to markup, escaping text content.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            write_node(&mut out, child);
        }
        out
    }
}

fn strip_node(node: FragmentNode) -> FragmentNode {
    match node {
        FragmentNode::Element { name, children, .. } => {
            FragmentNode::Element {
                name,
                attrs: Vec::new(),
                children: children.into_iter().map(strip_node).collect(),
            }
        }
        text @ FragmentNode::Text(_) => text,
    }
}

fn write_node(out: &mut String, node: &FragmentNode) {
    match node {
        FragmentNode::Text(content) => {
            out.push_str(&html_escape::encode_text(content));
        }
        FragmentNode::Element {
            name,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(name);
            for (attr_name, attr_value) in attrs {
                out.push(' ');
                out.push_str(attr_name);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(
                    attr_value,
                ));
                out.push('"');
            }
            if children.is_empty() && is_void_element(name) {
                out.push_str(" />");
            } else {
                out.push('>');
                for child in children {
                    write_node(out, child);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn el_attr(
        name: &str,
        attrs: &[(&str, &str)],
        children: Vec<FragmentNode>,
    ) -> FragmentNode {
        FragmentNode::Element {
            name: name.to_owned(),
            attrs: attrs
                .iter()
                .map(|&(n, v)| (n.to_owned(), v.to_owned()))
                .collect(),
            children,
        }
    }

    fn assert_no_attrs(node: &FragmentNode) {
        if let FragmentNode::Element { attrs, children, .. } = node {
            assert!(attrs.is_empty(), "element still has attributes");
            for child in children {
                assert_no_attrs(child);
            }
        }
    }

    #[test]
    fn stripping_removes_attributes_at_every_depth() {
        let fragment = Fragment::new(vec![el_attr(
            "div",
            &[("style", "color:red"), ("onclick", "x()")],
            vec![el_attr(
                "b",
                &[("class", "x")],
                vec![FragmentNode::text("hi")],
            )],
        )]);

        let stripped = fragment.strip_attributes();
        for child in &stripped.children {
            assert_no_attrs(child);
        }
        assert_eq!(stripped.to_html(), "<div><b>hi</b></div>");
    }

    #[test]
    fn stripping_preserves_tag_names_nesting_and_text() {
        let fragment = Fragment::new(vec![
            el_attr(
                "ul",
                &[("style", "margin:0")],
                vec![
                    el_attr("li", &[], vec![FragmentNode::text("one")]),
                    el_attr("li", &[], vec![FragmentNode::text("two")]),
                ],
            ),
            FragmentNode::text("tail"),
        ]);

        let stripped = fragment.strip_attributes();
        assert_eq!(
            stripped.to_html(),
            "<ul><li>one</li><li>two</li></ul>tail"
        );
    }

    #[test]
    fn serializing_escapes_text_content() {
        let fragment = Fragment::from_text("a < b & c > d");
        assert_eq!(fragment.to_html(), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn serializing_renders_void_elements_self_closed() {
        let fragment = Fragment::new(vec![FragmentNode::element(
            "p",
            vec![
                FragmentNode::text("a"),
                FragmentNode::element("br", Vec::new()),
                FragmentNode::text("b"),
            ],
        )]);
        assert_eq!(fragment.to_html(), "<p>a<br />b</p>");
    }

    #[test]
    fn serializing_keeps_attributes_when_present() {
        // Pre-strip fragments still round-trip their attributes; the strip
        // step is what removes them.
        let fragment = Fragment::new(vec![el_attr(
            "a",
            &[("href", "http://example.com/?a=\"b\"")],
            vec![FragmentNode::text("link")],
        )]);
        assert_eq!(
            fragment.to_html(),
            "<a href=\"http://example.com/?a=&quot;b&quot;\">link</a>"
        );
    }

    #[test]
    fn from_text_on_empty_payload_is_empty() {
        assert!(Fragment::from_text("").is_empty());
    }
}
