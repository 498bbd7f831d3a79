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

//! Side-effect-free HTML fragment parsing.
//!
//! html5ever drives a [`TreeSink`] that collects nodes into an arena held by
//! [`SinkDom`] — parents refer to children by handle, and all nodes are owned
//! in one flat list. Comments, processing instructions, and doctypes become
//! garbage nodes that are never attached, so clipboard markup full of
//! `<!--StartFragment-->` markers and `<!DOCTYPE>` headers parses cleanly.
//! Nothing is executed or rendered at any point.
//!
//! Parse errors reported by html5ever are collected; any error fails the
//! whole parse, and the sanitizer falls back to a plain-text paste.

use std::cell::{Ref, RefCell};
use std::fmt;

use html5ever::interface::NextParserState;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{
    namespace_url, ns, parse_fragment, Attribute, LocalName, QualName,
};

use super::fragment::{Fragment, FragmentNode};

/// Parsing failed; the markup should be treated as plain text instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub parse_errors: Vec<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse markup: {}", self.parse_errors.join(", "))
    }
}

impl std::error::Error for ParseError {}

/// Parse markup into a detached [`Fragment`], attributes intact.
pub(crate) fn parse(html: &str) -> Result<Fragment, ParseError> {
    let dom = parse_fragment(
        FragmentSink::default(),
        Default::default(),
        qual_name("div"),
        vec![],
    )
    .from_utf8()
    .one(html.as_bytes())?;
    Ok(dom.into_fragment())
}

fn qual_name(name: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(name))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SinkHandle(usize);

#[derive(Clone, Debug)]
enum SinkNode {
    Document {
        children: Vec<SinkHandle>,
    },
    Element {
        name: QualName,
        attrs: Vec<(String, String)>,
        children: Vec<SinkHandle>,
    },
    Text {
        content: String,
    },
    /// A node the sanitizer discards (comment, PI, template contents).
    /// Never attached to the document.
    Garbage,
}

#[derive(Clone, Debug)]
pub(crate) struct SinkDom {
    nodes: Vec<SinkNode>,
    document: SinkHandle,
}

impl SinkDom {
    fn new() -> Self {
        Self {
            nodes: vec![SinkNode::Document {
                children: Vec::new(),
            }],
            document: SinkHandle(0),
        }
    }

    fn add_node(&mut self, node: SinkNode) -> SinkHandle {
        self.nodes.push(node);
        SinkHandle(self.nodes.len() - 1)
    }

    fn get_node(&self, handle: &SinkHandle) -> &SinkNode {
        &self.nodes[handle.0]
    }

    fn get_mut_node(&mut self, handle: &SinkHandle) -> &mut SinkNode {
        &mut self.nodes[handle.0]
    }

    /// Convert the arena into an owned [`Fragment`].
    ///
    /// html5ever wraps fragment content in a synthetic `<html>` element; its
    /// children become the fragment's top-level nodes. Garbage nodes left in
    /// the arena are simply never reached.
    fn into_fragment(self) -> Fragment {
        let mut children = Vec::new();
        if let SinkNode::Document { children: roots } =
            self.get_node(&self.document).clone()
        {
            for handle in &roots {
                match self.get_node(handle) {
                    SinkNode::Element { name, children: inner, .. }
                        if name.local.as_ref() == "html" =>
                    {
                        for child in inner.clone() {
                            if let Some(node) = self.convert(&child) {
                                children.push(node);
                            }
                        }
                    }
                    _ => {
                        if let Some(node) = self.convert(handle) {
                            children.push(node);
                        }
                    }
                }
            }
        }
        Fragment::new(children)
    }

    fn convert(&self, handle: &SinkHandle) -> Option<FragmentNode> {
        match self.get_node(handle) {
            SinkNode::Element {
                name,
                attrs,
                children,
            } => Some(FragmentNode::Element {
                name: name.local.as_ref().to_owned(),
                attrs: attrs.clone(),
                children: children
                    .iter()
                    .filter_map(|child| self.convert(child))
                    .collect(),
            }),
            SinkNode::Text { content } => {
                Some(FragmentNode::Text(content.clone()))
            }
            SinkNode::Document { .. } | SinkNode::Garbage => None,
        }
    }
}

#[derive(Debug)]
struct SinkState {
    dom: SinkDom,
    parse_errors: Vec<String>,
}

/// The [`TreeSink`] html5ever drives while parsing a fragment.
struct FragmentSink {
    state: RefCell<SinkState>,
}

impl Default for FragmentSink {
    fn default() -> Self {
        Self {
            state: RefCell::new(SinkState {
                dom: SinkDom::new(),
                parse_errors: Vec::new(),
            }),
        }
    }
}

impl FragmentSink {
    fn garbage_node(&self) -> SinkHandle {
        self.state.borrow_mut().dom.add_node(SinkNode::Garbage)
    }

    fn unsupported(&self, what: &str) {
        self.state
            .borrow_mut()
            .parse_errors
            .push(format!("unsupported construct: {what}"));
    }
}

impl TreeSink for FragmentSink {
    type Handle = SinkHandle;
    type Output = Result<SinkDom, ParseError>;
    type ElemName<'a> = Ref<'a, QualName>;

    fn finish(self) -> Self::Output {
        let state = self.state.into_inner();
        if state.parse_errors.is_empty() {
            Ok(state.dom)
        } else {
            Err(ParseError {
                parse_errors: state.parse_errors,
            })
        }
    }

    fn parse_error(&self, msg: std::borrow::Cow<'static, str>) {
        self.state.borrow_mut().parse_errors.push(String::from(msg));
    }

    fn get_document(&self) -> Self::Handle {
        self.state.borrow().dom.document.clone()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.state.borrow(), |state| {
            match state.dom.get_node(target) {
                SinkNode::Element { name, .. } => name,
                _ => panic!("elem_name called on a non-element node"),
            }
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        self.state.borrow_mut().dom.add_node(SinkNode::Element {
            name,
            attrs: attrs
                .iter()
                .map(|attr| {
                    (
                        attr.name.local.as_ref().to_owned(),
                        attr.value.as_ref().to_owned(),
                    )
                })
                .collect(),
            children: Vec::new(),
        })
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        // Word clipboard HTML is full of <!--StartFragment--> markers.
        // They parse into garbage nodes and never reach the fragment.
        self.garbage_node()
    }

    fn create_pi(
        &self,
        _target: StrTendril,
        _data: StrTendril,
    ) -> Self::Handle {
        self.garbage_node()
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let dom = &mut self.state.borrow_mut().dom;
        match child {
            NodeOrText::AppendNode(child) => {
                if matches!(dom.get_node(&child), SinkNode::Garbage) {
                    return;
                }
                match dom.get_mut_node(parent) {
                    SinkNode::Document { children }
                    | SinkNode::Element { children, .. } => {
                        children.push(child)
                    }
                    SinkNode::Text { .. } | SinkNode::Garbage => {}
                }
            }
            NodeOrText::AppendText(tendril) => {
                // Coalesce with a trailing text sibling when there is one.
                let text_handle = match dom.get_node(parent) {
                    SinkNode::Text { .. } => Some(parent.clone()),
                    SinkNode::Document { children }
                    | SinkNode::Element { children, .. } => children
                        .last()
                        .filter(|last| {
                            matches!(
                                dom.get_node(last),
                                SinkNode::Text { .. }
                            )
                        })
                        .cloned(),
                    SinkNode::Garbage => None,
                };

                if let Some(text_handle) = text_handle {
                    if let SinkNode::Text { content } =
                        dom.get_mut_node(&text_handle)
                    {
                        content.push_str(tendril.as_ref());
                    }
                } else {
                    let new_handle = dom.add_node(SinkNode::Text {
                        content: tendril.as_ref().to_owned(),
                    });
                    match dom.get_mut_node(parent) {
                        SinkNode::Document { children }
                        | SinkNode::Element { children, .. } => {
                            children.push(new_handle)
                        }
                        SinkNode::Text { .. } | SinkNode::Garbage => {}
                    }
                }
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        _element: &Self::Handle,
        _prev_element: &Self::Handle,
        _child: NodeOrText<Self::Handle>,
    ) {
        // Foster parenting (misnested tables). Fail the parse rather than
        // guess at a structure; the sanitizer falls back to plain text.
        self.unsupported("foster-parented content");
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Full-document clipboard payloads carry a doctype. Nothing to keep.
    }

    fn mark_script_already_started(&self, _node: &Self::Handle) {}

    fn pop(&self, _node: &Self::Handle) {}

    fn get_template_contents(&self, _target: &Self::Handle) -> Self::Handle {
        self.garbage_node()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(
        &self,
        _sibling: &Self::Handle,
        _new_node: NodeOrText<Self::Handle>,
    ) {
        self.unsupported("append before sibling");
    }

    fn add_attrs_if_missing(
        &self,
        target: &Self::Handle,
        attrs: Vec<Attribute>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        if let SinkNode::Element { attrs: existing, .. } =
            dom.get_mut_node(target)
        {
            for attr in attrs {
                let attr_name = attr.name.local.as_ref();
                if !existing.iter().any(|(name, _)| name == attr_name) {
                    existing.push((
                        attr_name.to_owned(),
                        attr.value.as_ref().to_owned(),
                    ));
                }
            }
        }
    }

    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
    }

    fn remove_from_parent(&self, _target: &Self::Handle) {
        self.unsupported("remove from parent");
    }

    fn reparent_children(
        &self,
        _node: &Self::Handle,
        _new_parent: &Self::Handle,
    ) {
        self.unsupported("reparent children");
    }

    fn is_mathml_annotation_xml_integration_point(
        &self,
        _handle: &Self::Handle,
    ) -> bool {
        false
    }

    fn set_current_line(&self, _line_number: u64) {}

    fn complete_script(&self, _node: &Self::Handle) -> NextParserState {
        NextParserState::Continue
    }

    fn allow_declarative_shadow_roots(
        &self,
        _intended_parent: &Self::Handle,
    ) -> bool {
        false
    }

    fn attach_declarative_shadow(
        &self,
        _location: &Self::Handle,
        _template: &Self::Handle,
        _attrs: Vec<Attribute>,
    ) -> Result<(), String> {
        Err("declarative shadow roots not supported".into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_html(input: &str) -> String {
        parse(input).expect("parse failed").to_html()
    }

    #[test]
    fn parsing_an_empty_string_creates_an_empty_fragment() {
        assert_eq!(parse_html(""), "");
    }

    #[test]
    fn parsing_a_text_snippet_creates_one_text_node() {
        assert_eq!(parse_html("foo"), "foo");
    }

    #[test]
    fn parsing_a_tag_creates_a_tag() {
        assert_eq!(parse_html("<i></i>"), "<i></i>");
    }

    #[test]
    fn parsing_two_tags_creates_two_tags() {
        assert_eq!(parse_html("<i></i><b></b>"), "<i></i><b></b>");
    }

    #[test]
    fn parsing_nested_structures_produces_them() {
        assert_eq!(
            parse_html("A<i>B<b>C</b>D</i>E"),
            "A<i>B<b>C</b>D</i>E"
        );
    }

    #[test]
    fn parsing_tags_with_attributes_preserves_them() {
        // Attributes survive the parse; stripping them is a separate step.
        assert_eq!(
            parse_html("<span class=\"foo\">txt</span>"),
            "<span class=\"foo\">txt</span>"
        );
    }

    #[test]
    fn parsing_escaped_entities_round_trips_them() {
        assert_eq!(
            parse_html("aaa&lt;strong&gt;bbb&lt;/strong&gt;ccc"),
            "aaa&lt;strong&gt;bbb&lt;/strong&gt;ccc"
        );
    }

    #[test]
    fn parsing_drops_comments() {
        assert_eq!(
            parse_html("<p>before<!--StartFragment-->after</p>"),
            "<p>beforeafter</p>"
        );
    }

    #[test]
    fn parsed_text_is_unescaped_in_the_tree() {
        let fragment = parse("a &amp; b").expect("parse failed");
        assert_eq!(
            fragment.children,
            vec![crate::FragmentNode::text("a & b")]
        );
    }
}
