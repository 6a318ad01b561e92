//! Static renderer for rewritten trees.
//!
//! Serializes a tree the way a DOM engine would mount it, so rewritten output
//! can be inspected as HTML or as its text content.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::options::RewriteOptions;
use crate::tree::{Element, Tree};
use crate::value::to_display_string;

lazy_static! {
    static ref CAMEL_BOUNDARY: Regex = Regex::new(r"([a-z0-9])([A-Z])").unwrap();
    static ref MARKUP_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();

    static ref VOID_TAGS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert("area");
        s.insert("base");
        s.insert("br");
        s.insert("col");
        s.insert("embed");
        s.insert("hr");
        s.insert("img");
        s.insert("input");
        s.insert("link");
        s.insert("meta");
        s.insert("source");
        s.insert("track");
        s.insert("wbr");
        s
    };
}

pub fn render_html(tree: &Tree) -> String {
    render_html_with(tree, &RewriteOptions::default())
}

pub fn render_html_with(tree: &Tree, options: &RewriteOptions) -> String {
    let mut out = String::new();
    write_html(tree, options, &mut out);
    out
}

/// Concatenated text of the tree, including the text of injected markup.
pub fn text_content(tree: &Tree) -> String {
    text_content_with(tree, &RewriteOptions::default())
}

pub fn text_content_with(tree: &Tree, options: &RewriteOptions) -> String {
    let mut out = String::new();
    write_text(tree, options, &mut out);
    out
}

fn write_html(tree: &Tree, options: &RewriteOptions, out: &mut String) {
    match tree {
        Tree::List(items) => {
            for item in items {
                write_html(item, options, out);
            }
        }
        Tree::Primitive(value) => {
            if let Some(text) = primitive_text(value) {
                out.push_str(&escape_html(&text));
            }
        }
        Tree::Element(element) => write_element(element, options, out),
    }
}

fn write_element(element: &Element, options: &RewriteOptions, out: &mut String) {
    out.push('<');
    out.push_str(&element.kind);
    for (name, value) in &element.props {
        if name == &options.raw_markup_prop || name == "children" {
            continue;
        }
        write_attribute(name, value, options, out);
    }

    if VOID_TAGS.contains(element.kind.as_str()) {
        out.push_str(" />");
        return;
    }
    out.push('>');

    match raw_markup(element, options) {
        Some(markup) => out.push_str(&markup),
        None => {
            if let Some(children) = &element.children {
                write_html(children, options, out);
            }
        }
    }

    out.push_str("</");
    out.push_str(&element.kind);
    out.push('>');
}

fn write_attribute(name: &str, value: &Value, options: &RewriteOptions, out: &mut String) {
    let attr_name = if name == options.class_prop {
        "class"
    } else if name == "htmlFor" {
        "for"
    } else {
        name
    };

    let rendered = match value {
        Value::Null | Value::Bool(false) => return,
        Value::Bool(true) => {
            out.push(' ');
            out.push_str(attr_name);
            return;
        }
        Value::Object(map) if name == options.style_prop => style_to_css(map),
        other => to_display_string(other),
    };

    out.push(' ');
    out.push_str(attr_name);
    out.push_str("=\"");
    out.push_str(&escape_html(&rendered));
    out.push('"');
}

fn write_text(tree: &Tree, options: &RewriteOptions, out: &mut String) {
    match tree {
        Tree::List(items) => {
            for item in items {
                write_text(item, options, out);
            }
        }
        Tree::Primitive(value) => {
            if let Some(text) = primitive_text(value) {
                out.push_str(&text);
            }
        }
        Tree::Element(element) => match raw_markup(element, options) {
            Some(markup) => out.push_str(&MARKUP_TAG.replace_all(&markup, "")),
            None => {
                if let Some(children) = &element.children {
                    write_text(children, options, out);
                }
            }
        },
    }
}

/// Booleans and null render nothing.
fn primitive_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(_) => None,
        other => Some(to_display_string(other)),
    }
}

fn raw_markup(element: &Element, options: &RewriteOptions) -> Option<String> {
    element
        .props
        .get(&options.raw_markup_prop)
        .and_then(|raw| raw.get("__html"))
        .map(to_display_string)
}

/// `{backgroundColor: "red", display: "none"}` -> `background-color:red;display:none`
pub fn style_to_css(style: &Map<String, Value>) -> String {
    style
        .iter()
        .filter(|(_, value)| !matches!(value, Value::Null | Value::Bool(_)))
        .map(|(property, value)| {
            format!(
                "{}:{}",
                CAMEL_BOUNDARY.replace_all(property, "$1-$2").to_lowercase(),
                to_display_string(value)
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_render_element_with_attributes() {
        let tree: Tree = Element::new("div")
            .prop("className", "a b")
            .prop("style", json!({ "backgroundColor": "red", "display": "none" }))
            .prop("hidden", true)
            .prop("title", json!(null))
            .prop("data-count", 3)
            .child("x < y")
            .into();

        assert_eq!(
            render_html(&tree),
            r#"<div class="a b" style="background-color:red;display:none" hidden data-count="3">x &lt; y</div>"#
        );
    }

    #[test]
    fn test_booleans_and_null_render_nothing() {
        let tree = Tree::list(vec![
            Tree::omitted(),
            Tree::Primitive(json!(null)),
            Tree::Primitive(json!(0)),
            Tree::text("a"),
        ]);
        assert_eq!(render_html(&tree), "0a");
        assert_eq!(text_content(&tree), "0a");
    }

    #[test]
    fn test_raw_markup_is_injected_unescaped() {
        let tree: Tree = Element::new("div")
            .prop("dangerouslySetInnerHTML", json!({ "__html": "<p>Test</p>" }))
            .into();
        assert_eq!(render_html(&tree), "<div><p>Test</p></div>");
        assert_eq!(text_content(&tree), "Test");
    }

    #[test]
    fn test_void_tags() {
        let tree: Tree = Element::new("img").prop("src", "a.png").into();
        assert_eq!(render_html(&tree), r#"<img src="a.png" />"#);
    }
}
