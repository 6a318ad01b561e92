//! Sibling-group resolution for `vIf` / `vElseIf` / `vElse` chains.
//!
//! A single left-to-right pass over an ordered sibling list. The only state is
//! whether a chain is active and, if so, whether one of its branches already
//! won. Of every chain at most one member survives: the first whose condition
//! is truthy, with `vElse` acting as an always-true terminal branch.

use crate::directive::Directive;
use crate::options::DirectiveNames;
use crate::tree::{Element, Tree};
use crate::value::is_truthy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainState {
    #[default]
    Inactive,
    /// A chain is open; the flag records whether its current condition held.
    Active(bool),
}

/// What the resolver decided for one sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub keep: bool,
    pub next: ChainState,
}

impl Step {
    fn keep(next: ChainState) -> Self {
        Step { keep: true, next }
    }

    fn discard(next: ChainState) -> Self {
        Step { keep: false, next }
    }

    fn when(keep: bool, next: ChainState) -> Self {
        Step { keep, next }
    }
}

impl ChainState {
    /// Transition for one sibling.
    pub fn step(self, sibling: &Tree, names: &DirectiveNames) -> Step {
        match sibling {
            Tree::Element(element) => self.step_element(element, names),
            // Anything without props passes through and closes the chain
            Tree::List(_) | Tree::Primitive(_) => Step::keep(ChainState::Inactive),
        }
    }

    fn step_element(self, element: &Element, names: &DirectiveNames) -> Step {
        if let Some(condition) = Directive::ConditionalInclude.peek(&element.props, names) {
            let truthy = is_truthy(condition);
            return Step::when(truthy, ChainState::Active(truthy));
        }

        let is_else = Directive::ConditionalElse.peek(&element.props, names).is_some();
        let else_if = Directive::ConditionalElseIf.peek(&element.props, names);

        match self {
            ChainState::Active(true) if is_else || else_if.is_some() => {
                // A previous branch already won
                Step::discard(self)
            }
            ChainState::Active(true) => Step::keep(ChainState::Inactive),
            // `vElse` outranks a `vElseIf` on the same node
            ChainState::Active(false) | ChainState::Inactive if is_else => {
                Step::keep(ChainState::Inactive)
            }
            ChainState::Active(false) | ChainState::Inactive => {
                if let Some(condition) = else_if {
                    let truthy = is_truthy(condition);
                    Step::when(truthy, ChainState::Active(truthy))
                } else {
                    Step::keep(ChainState::Inactive)
                }
            }
        }
    }
}

/// Filter a sibling list down to the members that survive chain evaluation,
/// preserving relative order.
pub fn resolve_siblings(siblings: Vec<Tree>, names: &DirectiveNames) -> Vec<Tree> {
    let (kept, _) = siblings.into_iter().fold(
        (Vec::new(), ChainState::Inactive),
        |(mut kept, state), sibling| {
            let step = state.step(&sibling, names);
            if step.keep {
                kept.push(sibling);
            } else {
                tracing::trace!(?state, "dropping sibling from conditional chain");
            }
            (kept, step.next)
        },
    );
    kept
}
