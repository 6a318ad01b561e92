//! Rewrite configuration.
//!
//! Every field has a default matching the conventional JSX dialect (`vIf`,
//! `className`, `style`, `dangerouslySetInnerHTML`), so `RewriteOptions::default()`
//! is what most callers want.

use serde::{Deserialize, Serialize};

use crate::error::RewriteError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DirectiveNames {
    pub conditional_include: String,
    pub conditional_else: String,
    pub conditional_else_if: String,
    pub conditional_show: String,
    pub text_override: String,
    pub html_override: String,
    /// Accepted and stripped, never acted on.
    pub once: String,
}

impl Default for DirectiveNames {
    fn default() -> Self {
        DirectiveNames {
            conditional_include: "vIf".to_string(),
            conditional_else: "vElse".to_string(),
            conditional_else_if: "vElseIf".to_string(),
            conditional_show: "vShow".to_string(),
            text_override: "vText".to_string(),
            html_override: "vHtml".to_string(),
            once: "vOnce".to_string(),
        }
    }
}

/// How `display: none` from a falsy show directive combines with the node's
/// own style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HiddenStylePolicy {
    /// `display: none` is written last and always wins.
    #[default]
    ForceHidden,
    /// `display: none` is written first; an explicit `display` in the node's
    /// style is kept.
    PreferExplicit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RewriteOptions {
    pub directives: DirectiveNames,
    pub class_prop: String,
    pub style_prop: String,
    /// Output field receiving `{"__html": ...}` for markup overrides.
    pub raw_markup_prop: String,
    pub hidden_style: HiddenStylePolicy,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            directives: DirectiveNames::default(),
            class_prop: "className".to_string(),
            style_prop: "style".to_string(),
            raw_markup_prop: "dangerouslySetInnerHTML".to_string(),
            hidden_style: HiddenStylePolicy::default(),
        }
    }
}

impl RewriteOptions {
    pub fn from_json(json: &str) -> Result<Self, RewriteError> {
        serde_json::from_str(json).map_err(RewriteError::InvalidOptions)
    }

    pub fn with_hidden_style(mut self, policy: HiddenStylePolicy) -> Self {
        self.hidden_style = policy;
        self
    }
}
