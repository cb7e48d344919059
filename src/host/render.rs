//! HTML serialization for the retained DOM
//!
//! Renders DOM subtrees to HTML strings, mainly for inspection and tests.

use crate::props::{PropValue, Props};

use super::dom::{Dom, DomKind, NodeId};

// =============================================================================
// Rendering
// =============================================================================

/// Render `id` and its subtree to HTML.
pub fn outer_html(dom: &Dom, id: NodeId) -> String {
    let mut output = String::new();
    render_node(dom, id, &mut output);
    output
}

/// Render the children of `id` to HTML.
pub fn inner_html(dom: &Dom, id: NodeId) -> String {
    let mut output = String::new();
    for child in dom.children(id) {
        render_node(dom, *child, &mut output);
    }
    output
}

/// Render a node to HTML.
fn render_node(dom: &Dom, id: NodeId, output: &mut String) {
    match dom.kind(id) {
        Some(DomKind::Element { tag, attrs }) => {
            output.push('<');
            output.push_str(tag);
            render_attrs(attrs, output);

            // Void elements
            if is_void_element(tag) {
                output.push_str(" />");
                return;
            }

            output.push('>');
            for child in dom.children(id) {
                render_node(dom, *child, output);
            }
            output.push_str("</");
            output.push_str(tag);
            output.push('>');
        }
        Some(DomKind::Text(text)) => output.push_str(&escape_html(text)),
        None => {}
    }
}

/// Render attributes to HTML.
///
/// `Null` and `false` are omitted; `true` renders as a bare attribute.
fn render_attrs(attrs: &Props, output: &mut String) {
    for (name, value) in attrs.iter() {
        match value {
            PropValue::Null | PropValue::Bool(false) => continue,
            PropValue::Bool(true) => {
                output.push(' ');
                output.push_str(name);
            }
            _ => {
                output.push(' ');
                output.push_str(name);
                output.push_str("=\"");
                output.push_str(&escape_attr(&value.to_string()));
                output.push('"');
            }
        }
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Check if element is a void element (self-closing).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
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
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

// =============================================================================
// Tests
// =============================================================================
