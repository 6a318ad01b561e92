//! The fixed directive set and its extraction from a props map.
//!
//! Presence is distinguished from value: a directive is "set" when its key is
//! present in the props map, whatever the value (including `null`). `vElse`
//! only ever looks at presence.

use serde_json::{Map, Value};

use crate::options::DirectiveNames;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    ConditionalInclude,
    ConditionalElse,
    ConditionalElseIf,
    ConditionalShow,
    TextOverride,
    HtmlOverride,
    Once,
}

impl Directive {
    pub const ALL: [Directive; 7] = [
        Directive::ConditionalInclude,
        Directive::ConditionalElse,
        Directive::ConditionalElseIf,
        Directive::ConditionalShow,
        Directive::TextOverride,
        Directive::HtmlOverride,
        Directive::Once,
    ];

    pub fn prop_name(self, names: &DirectiveNames) -> &str {
        match self {
            Directive::ConditionalInclude => &names.conditional_include,
            Directive::ConditionalElse => &names.conditional_else,
            Directive::ConditionalElseIf => &names.conditional_else_if,
            Directive::ConditionalShow => &names.conditional_show,
            Directive::TextOverride => &names.text_override,
            Directive::HtmlOverride => &names.html_override,
            Directive::Once => &names.once,
        }
    }

    /// Look a directive up without consuming it.
    pub fn peek<'p>(
        self,
        props: &'p Map<String, Value>,
        names: &DirectiveNames,
    ) -> Option<&'p Value> {
        props.get(self.prop_name(names))
    }
}

/// Directive values pulled off one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveSet {
    pub conditional_include: Option<Value>,
    pub conditional_else: bool,
    pub conditional_else_if: Option<Value>,
    pub conditional_show: Option<Value>,
    pub text_override: Option<Value>,
    pub html_override: Option<Value>,
    pub once: bool,
}

impl DirectiveSet {
    /// Remove every directive prop from `props` and return their values.
    pub fn extract(props: &mut Map<String, Value>, names: &DirectiveNames) -> Self {
        let mut set = DirectiveSet::default();
        for directive in Directive::ALL {
            let Some(value) = props.shift_remove(directive.prop_name(names)) else {
                continue;
            };
            match directive {
                Directive::ConditionalInclude => set.conditional_include = Some(value),
                Directive::ConditionalElse => set.conditional_else = true,
                Directive::ConditionalElseIf => set.conditional_else_if = Some(value),
                Directive::ConditionalShow => set.conditional_show = Some(value),
                Directive::TextOverride => set.text_override = Some(value),
                Directive::HtmlOverride => set.html_override = Some(value),
                Directive::Once => set.once = true,
            }
        }
        set
    }
}
