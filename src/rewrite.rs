//! The tree rewriter.
//!
//! Lists are first filtered by chain resolution, then each survivor is
//! rewritten. For an element, directives are stripped and resolved before its
//! children are touched: a falsy `vIf` drops the whole subtree unvisited.

use rayon::prelude::*;
use serde_json::{Map, Value};

use crate::attrs::{flatten_class_names, hide_style, normalize_style};
use crate::chain::resolve_siblings;
use crate::directive::DirectiveSet;
use crate::options::RewriteOptions;
use crate::tree::{Element, Tree};
use crate::value::{is_truthy, to_display_string};

/// Props that the element itself carries as identity and reference; never
/// forwarded from the props map.
const RESERVED_PROPS: [&str; 2] = ["key", "ref"];

#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    options: RewriteOptions,
}

impl Rewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Rewriter { options }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    pub fn rewrite(&self, tree: Tree) -> Tree {
        match tree {
            Tree::List(siblings) => Tree::List(self.rewrite_list(siblings)),
            Tree::Element(element) => self
                .rewrite_element(element)
                .map(Tree::Element)
                .unwrap_or_else(Tree::omitted),
            primitive @ Tree::Primitive(_) => primitive,
        }
    }

    /// Rewrite independent trees in parallel. Output order matches input order.
    pub fn rewrite_batch(&self, trees: Vec<Tree>) -> Vec<Tree> {
        trees.into_par_iter().map(|tree| self.rewrite(tree)).collect()
    }

    fn rewrite_list(&self, siblings: Vec<Tree>) -> Vec<Tree> {
        resolve_siblings(siblings, &self.options.directives)
            .into_iter()
            .map(|sibling| self.rewrite(sibling))
            .collect()
    }

    /// Returns `None` when the element's inclusion condition is falsy.
    fn rewrite_element(&self, element: Element) -> Option<Element> {
        let Element {
            kind,
            mut props,
            children,
            key,
            reference,
        } = element;

        let directives = DirectiveSet::extract(&mut props, &self.options.directives);
        for reserved in RESERVED_PROPS {
            props.shift_remove(reserved);
        }

        if let Some(condition) = &directives.conditional_include {
            if !is_truthy(condition) {
                tracing::trace!(kind = %kind, "omitting element with falsy inclusion");
                return None;
            }
        }

        self.normalize_class(&mut props);
        self.normalize_style(&mut props);

        if let Some(show) = &directives.conditional_show {
            if !is_truthy(show) {
                let style = props.shift_remove(&self.options.style_prop);
                props.insert(
                    self.options.style_prop.clone(),
                    hide_style(style, self.options.hidden_style),
                );
            }
        }

        let children = self.resolve_children(&kind, children, &directives, &mut props);

        Some(Element {
            kind,
            props,
            children,
            key,
            reference,
        })
    }

    /// Existing truthy children always win over text and markup overrides.
    fn resolve_children(
        &self,
        kind: &str,
        children: Option<Box<Tree>>,
        directives: &DirectiveSet,
        props: &mut Map<String, Value>,
    ) -> Option<Box<Tree>> {
        let children = match children {
            Some(children) if children.is_truthy() => {
                if directives.text_override.is_some() || directives.html_override.is_some() {
                    tracing::debug!(kind = %kind, "ignoring content override on element with children");
                }
                return Some(Box::new(self.rewrite(*children)));
            }
            other => other,
        };

        if let Some(text) = overriding(&directives.text_override) {
            return Some(Box::new(Tree::text(to_display_string(text))));
        }

        if let Some(markup) = overriding(&directives.html_override) {
            let mut raw = Map::new();
            raw.insert(
                "__html".to_string(),
                Value::String(to_display_string(markup)),
            );
            props.insert(self.options.raw_markup_prop.clone(), Value::Object(raw));
        }

        // Falsy children (absent, "", 0, ...) are forwarded as they were
        children
    }

    fn normalize_class(&self, props: &mut Map<String, Value>) {
        if let Some(class) = props.get_mut(&self.options.class_prop) {
            if is_truthy(class) && !class.is_string() {
                *class = Value::String(flatten_class_names(class));
            }
        }
    }

    fn normalize_style(&self, props: &mut Map<String, Value>) {
        if let Some(style) = props.get_mut(&self.options.style_prop) {
            if style.is_array() {
                *style = normalize_style(style.take());
            }
        }
    }
}

/// An override applies when present and not explicitly `false`.
fn overriding(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !matches!(v, Value::Bool(false)))
}

/// Rewrite a tree with the default options.
pub fn rewrite(tree: Tree) -> Tree {
    Rewriter::default().rewrite(tree)
}
