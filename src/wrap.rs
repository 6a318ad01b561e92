//! The two invocation shapes offered to component code.
//!
//! `with_directives` wraps a component function so that every tree it returns
//! is rewritten; `DirectiveRoot` wraps a literal children tree. For the same
//! tree content both produce the same output.

use crate::options::RewriteOptions;
use crate::rewrite::Rewriter;
use crate::tree::Tree;

/// Wrap a component function with the default options.
pub fn with_directives<P, F>(component: F) -> impl Fn(P) -> Tree
where
    F: Fn(P) -> Tree,
{
    with_directives_using(RewriteOptions::default(), component)
}

pub fn with_directives_using<P, F>(options: RewriteOptions, component: F) -> impl Fn(P) -> Tree
where
    F: Fn(P) -> Tree,
{
    let rewriter = Rewriter::new(options);
    move |props| rewriter.rewrite(component(props))
}

/// Pass-through container: holds a children tree and renders its rewritten
/// form.
#[derive(Debug, Clone)]
pub struct DirectiveRoot {
    children: Tree,
    rewriter: Rewriter,
}

impl DirectiveRoot {
    pub fn new(children: impl Into<Tree>) -> Self {
        Self::with_options(children, RewriteOptions::default())
    }

    pub fn with_options(children: impl Into<Tree>, options: RewriteOptions) -> Self {
        DirectiveRoot {
            children: children.into(),
            rewriter: Rewriter::new(options),
        }
    }

    pub fn render(&self) -> Tree {
        self.rewriter.rewrite(self.children.clone())
    }

    pub fn into_rendered(self) -> Tree {
        self.rewriter.rewrite(self.children)
    }
}
