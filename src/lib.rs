//! # Directive rewriter for JSX element trees
//!
//! Walks a snapshot of an element tree before it is handed to the rendering
//! engine and rewrites it according to a fixed set of directive props.
//!
//! ## Directives
//!
//! | Prop       | Effect                                                         |
//! |------------|----------------------------------------------------------------|
//! | `vIf`      | Starts a conditional chain; a falsy value omits the element    |
//! | `vElseIf`  | Next branch of the chain, kept only if no earlier branch won   |
//! | `vElse`    | Terminal branch, kept only if no earlier branch won            |
//! | `vShow`    | A falsy value adds `display: none` to the style                |
//! | `vText`    | Replaces missing children with the value as text               |
//! | `vHtml`    | Injects the value as raw markup when there are no children     |
//! | `vOnce`    | Accepted and stripped                                          |
//!
//! ## Invariants
//!
//! 1. **Directives never leak**: every directive prop is removed from the output.
//! 2. **Chain exclusivity**: of one `vIf`/`vElseIf`/`vElse` chain at most one
//!    member survives, the first truthy one scanning left to right.
//! 3. **Identity passthrough**: an element's key and ref handle on output are
//!    exactly those on input, never taken from the props map.
//! 4. **Existing children win**: `vText`/`vHtml` only apply to elements whose
//!    children are absent or falsy.
//! 5. **Purity**: a rewrite touches nothing but its own input tree.

mod attrs;
mod chain;
mod directive;
mod error;
mod jsx;
mod options;
mod render;
mod rewrite;
mod tree;
mod value;
mod wrap;

#[cfg(test)]
mod rewrite_tests;

pub use attrs::{flatten_class_names, merge_style_list};
pub use chain::{resolve_siblings, ChainState};
pub use directive::{Directive, DirectiveSet};
pub use error::RewriteError;
pub use jsx::parse_jsx;
pub use options::{DirectiveNames, HiddenStylePolicy, RewriteOptions};
pub use render::{render_html, render_html_with, style_to_css, text_content, text_content_with};
pub use rewrite::{rewrite, Rewriter};
pub use tree::{Element, RefHandle, Tree};
pub use value::{is_truthy, to_display_string};
pub use wrap::{with_directives, with_directives_using, DirectiveRoot};

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
use napi_derive::napi;

#[cfg(feature = "napi")]
fn options_from_json(options_json: Option<String>) -> Result<RewriteOptions, RewriteError> {
    match options_json {
        Some(json) => RewriteOptions::from_json(&json),
        None => Ok(RewriteOptions::default()),
    }
}

#[cfg(feature = "napi")]
#[napi]
pub fn rewrite_tree_native(
    tree: serde_json::Value,
    options_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let rewriter = Rewriter::new(options_from_json(options_json)?);
    let tree = Tree::from_value(tree)?;
    Ok(rewriter.rewrite(tree).to_value())
}

#[cfg(feature = "napi")]
#[napi]
pub fn parse_jsx_native(source: String) -> napi::Result<serde_json::Value> {
    Ok(parse_jsx(&source)?.to_value())
}

#[cfg(feature = "napi")]
#[napi]
pub fn render_html_native(
    tree: serde_json::Value,
    options_json: Option<String>,
) -> napi::Result<String> {
    let options = options_from_json(options_json)?;
    let tree = Tree::from_value(tree)?;
    Ok(render_html_with(&tree, &options))
}
