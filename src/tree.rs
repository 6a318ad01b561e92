//! Tree IR handed to and returned from the rewriter.
//!
//! A `Tree` is either an ordered list of siblings, a recognized element, or a
//! primitive value (text, number, boolean, null, or any opaque JSON value the
//! rewriter does not interpret).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::RewriteError;
use crate::value::is_truthy;

// ═══════════════════════════════════════════════════════════════════════════════
// IR TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Tree {
    Element(Element),
    List(Vec<Tree>),
    Primitive(Value),
}

/// Opaque reference handle. Passed through to the engine untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefHandle(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Opaque tag, never interpreted by the rewriter.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Box<Tree>>,
    /// Identity key used by the engine for list reconciliation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<RefHandle>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONSTRUCTION
// ═══════════════════════════════════════════════════════════════════════════════

impl Element {
    pub fn new(kind: impl Into<String>) -> Self {
        Element {
            kind: kind.into(),
            props: Map::new(),
            children: None,
            key: None,
            reference: None,
        }
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Append one child. A single existing child is promoted to a list.
    pub fn child(mut self, child: impl Into<Tree>) -> Self {
        let child = child.into();
        self.children = Some(Box::new(match self.children.take().map(|c| *c) {
            None => child,
            Some(Tree::List(mut items)) => {
                items.push(child);
                Tree::List(items)
            }
            Some(existing) => Tree::List(vec![existing, child]),
        }));
        self
    }

    /// Replace the children wholesale.
    pub fn children(mut self, children: impl Into<Tree>) -> Self {
        self.children = Some(Box::new(children.into()));
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn reference(mut self, handle: impl Into<String>) -> Self {
        self.reference = Some(RefHandle(handle.into()));
        self
    }

    pub fn has_prop(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }
}

impl Tree {
    pub fn text(text: impl Into<String>) -> Self {
        Tree::Primitive(Value::String(text.into()))
    }

    pub fn list(items: impl IntoIterator<Item = Tree>) -> Self {
        Tree::List(items.into_iter().collect())
    }

    /// Sentinel returned for a node whose inclusion condition is falsy.
    /// Renders as nothing.
    pub fn omitted() -> Self {
        Tree::Primitive(Value::Bool(false))
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, Tree::Primitive(Value::Bool(false)))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Tree::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Elements and lists are always truthy; primitives follow value truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Tree::Element(_) | Tree::List(_) => true,
            Tree::Primitive(value) => is_truthy(value),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // JSON BOUNDARY
    // ═══════════════════════════════════════════════════════════════════════════

    /// Decode a JSON tree. Objects carrying a string `type` are elements,
    /// arrays are sibling lists, everything else is a primitive.
    pub fn from_value(value: Value) -> Result<Tree, RewriteError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(Tree::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Tree::List),
            Value::Object(map) if matches!(map.get("type"), Some(Value::String(_))) => {
                serde_json::from_value::<Element>(Value::Object(map))
                    .map(Tree::Element)
                    .map_err(|e| RewriteError::InvalidTree(e.to_string()))
            }
            other => Ok(Tree::Primitive(other)),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Tree::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<Element> for Tree {
    fn from(element: Element) -> Self {
        Tree::Element(element)
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(items: Vec<Tree>) -> Self {
        Tree::List(items)
    }
}

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        Tree::Primitive(value)
    }
}

impl From<&str> for Tree {
    fn from(text: &str) -> Self {
        Tree::text(text)
    }
}

impl From<String> for Tree {
    fn from(text: String) -> Self {
        Tree::text(text)
    }
}

impl From<i64> for Tree {
    fn from(n: i64) -> Self {
        Tree::Primitive(Value::from(n))
    }
}

impl From<bool> for Tree {
    fn from(b: bool) -> Self {
        Tree::Primitive(Value::Bool(b))
    }
}
