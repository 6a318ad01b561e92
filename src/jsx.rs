//! Literal JSX front-end.
//!
//! Parses a single JSX expression with oxc and lowers it to a [`Tree`].
//! Only statically known expressions are accepted: literals, `undefined`,
//! array/object literals, `!`, unary `-` and the logical operators. That is
//! enough to write directive trees as JSX in fixtures and tooling without a JS
//! runtime.

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};
use oxc_syntax::operator::{LogicalOperator, UnaryOperator};
use serde_json::{Map, Value};

use crate::error::RewriteError;
use crate::tree::{Element, RefHandle, Tree};
use crate::value::{is_truthy, to_display_string};

/// Parse `source` (one JSX element, fragment or literal expression) into a tree.
pub fn parse_jsx(source: &str) -> Result<Tree, RewriteError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(true).with_jsx(true);
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return Err(RewriteError::JsxSyntax {
            messages: ret.errors.iter().map(|e| e.to_string()).collect(),
        });
    }

    let lowering = JsxLowering { source };
    for stmt in &ret.program.body {
        if let Statement::ExpressionStatement(expr_stmt) = stmt {
            return lowering
                .lower_child_expression(&expr_stmt.expression)?
                .ok_or(RewriteError::EmptyJsx);
        }
    }
    Err(RewriteError::EmptyJsx)
}

// ═══════════════════════════════════════════════════════════════════════════════
// JSX LOWERING
// ═══════════════════════════════════════════════════════════════════════════════

struct JsxLowering<'s> {
    source: &'s str,
}

impl<'s> JsxLowering<'s> {
    fn lower_element<'a>(&self, element: &JSXElement<'a>) -> Result<Tree, RewriteError> {
        let mut node = Element::new(self.get_tag_name(&element.opening_element.name));

        for item in &element.opening_element.attributes {
            let attr = match item {
                JSXAttributeItem::Attribute(attr) => attr,
                JSXAttributeItem::SpreadAttribute(spread) => {
                    return Err(self.unsupported(spread.span()));
                }
            };
            let name = match &attr.name {
                JSXAttributeName::Identifier(id) => id.name.to_string(),
                JSXAttributeName::NamespacedName(ns) => {
                    format!("{}:{}", ns.namespace.name, ns.name.name)
                }
            };

            if name == "ref" {
                node.reference = self.lower_reference(attr)?;
                continue;
            }

            let value = match &attr.value {
                // Bare attribute, e.g. `<div vElse>`
                None => Some(Value::Bool(true)),
                Some(value) => self.lower_attribute_value(value)?,
            };
            // `attr={undefined}` is the same as leaving the attribute out
            let Some(value) = value else {
                continue;
            };

            if name == "key" {
                node.key = Some(to_display_string(&value));
            } else {
                node.props.insert(name, value);
            }
        }

        node.children = self.lower_children(&element.children)?.map(Box::new);
        Ok(Tree::Element(node))
    }

    fn lower_fragment<'a>(&self, fragment: &JSXFragment<'a>) -> Result<Tree, RewriteError> {
        let children = self.lower_children(&fragment.children)?;
        Ok(match children {
            Some(Tree::List(items)) => Tree::List(items),
            Some(single) => Tree::List(vec![single]),
            None => Tree::List(Vec::new()),
        })
    }

    /// One child stays a single tree; several become a sibling list.
    fn lower_children<'a>(
        &self,
        children: &oxc_allocator::Vec<'a, JSXChild<'a>>,
    ) -> Result<Option<Tree>, RewriteError> {
        let mut items = Vec::new();
        for child in children {
            match child {
                JSXChild::Text(t) => {
                    if let Some(text) = clean_jsx_text(t.value.as_str()) {
                        items.push(Tree::text(text));
                    }
                }
                JSXChild::Element(el) => items.push(self.lower_element(el)?),
                JSXChild::Fragment(frag) => items.push(self.lower_fragment(frag)?),
                JSXChild::ExpressionContainer(container) => {
                    // `{/* comment */}` has no expression
                    if let Some(expr) = container.expression.as_expression() {
                        if let Some(tree) = self.lower_child_expression(expr)? {
                            items.push(tree);
                        }
                    }
                }
                JSXChild::Spread(spread) => return Err(self.unsupported(spread.span())),
            }
        }

        Ok(match items.len() {
            0 => None,
            1 => items.pop(),
            _ => Some(Tree::List(items)),
        })
    }

    fn lower_child_expression<'a>(
        &self,
        expr: &Expression<'a>,
    ) -> Result<Option<Tree>, RewriteError> {
        match expr {
            Expression::JSXElement(el) => self.lower_element(el).map(Some),
            Expression::JSXFragment(frag) => self.lower_fragment(frag).map(Some),
            Expression::ParenthesizedExpression(paren) => {
                self.lower_child_expression(&paren.expression)
            }
            Expression::ArrayExpression(arr) => {
                let mut items = Vec::new();
                for element in &arr.elements {
                    let Some(e) = element.as_expression() else {
                        return Err(self.unsupported(arr.span));
                    };
                    items.push(
                        self.lower_child_expression(e)?
                            .unwrap_or(Tree::Primitive(Value::Null)),
                    );
                }
                Ok(Some(Tree::List(items)))
            }
            other => self
                .lower_value(other)?
                .map(Tree::from_value)
                .transpose(),
        }
    }

    fn lower_attribute_value<'a>(
        &self,
        value: &JSXAttributeValue<'a>,
    ) -> Result<Option<Value>, RewriteError> {
        match value {
            JSXAttributeValue::StringLiteral(s) => Ok(Some(Value::String(s.value.to_string()))),
            JSXAttributeValue::ExpressionContainer(container) => {
                match container.expression.as_expression() {
                    Some(expr) => self.lower_value(expr),
                    None => Err(self.unsupported(container.span)),
                }
            }
            JSXAttributeValue::Element(el) => Ok(Some(self.lower_element(el)?.to_value())),
            JSXAttributeValue::Fragment(frag) => Ok(Some(self.lower_fragment(frag)?.to_value())),
        }
    }

    /// `ref="name"` or `ref={name}`; the handle is the referenced name.
    fn lower_reference<'a>(&self, attr: &JSXAttribute<'a>) -> Result<Option<RefHandle>, RewriteError> {
        match &attr.value {
            Some(JSXAttributeValue::StringLiteral(s)) => Ok(Some(RefHandle(s.value.to_string()))),
            Some(JSXAttributeValue::ExpressionContainer(container)) => {
                match container.expression.as_expression() {
                    Some(Expression::Identifier(id)) if id.name.as_str() == "undefined" => Ok(None),
                    Some(Expression::Identifier(id)) => Ok(Some(RefHandle(id.name.to_string()))),
                    _ => Err(self.unsupported(container.span)),
                }
            }
            _ => Err(self.unsupported(attr.span)),
        }
    }

    /// Statically evaluate an expression. `Ok(None)` stands for `undefined`.
    fn lower_value<'a>(&self, expr: &Expression<'a>) -> Result<Option<Value>, RewriteError> {
        let value = match expr {
            Expression::BooleanLiteral(b) => Value::Bool(b.value),
            Expression::NullLiteral(_) => Value::Null,
            Expression::NumericLiteral(n) => number_value(n.value),
            Expression::StringLiteral(s) => Value::String(s.value.to_string()),
            Expression::TemplateLiteral(t) => {
                if !t.expressions.is_empty() {
                    return Err(self.unsupported(t.span));
                }
                Value::String(
                    t.quasis
                        .iter()
                        .filter_map(|q| q.value.cooked.as_ref())
                        .map(|cooked| cooked.as_str())
                        .collect(),
                )
            }
            Expression::Identifier(id) if id.name.as_str() == "undefined" => return Ok(None),
            Expression::ParenthesizedExpression(paren) => return self.lower_value(&paren.expression),
            Expression::ArrayExpression(arr) => {
                let mut items = Vec::new();
                for element in &arr.elements {
                    let Some(e) = element.as_expression() else {
                        return Err(self.unsupported(arr.span));
                    };
                    items.push(self.lower_value(e)?.unwrap_or(Value::Null));
                }
                Value::Array(items)
            }
            Expression::ObjectExpression(obj) => Value::Object(self.lower_object(obj)?),
            Expression::UnaryExpression(unary) => {
                let argument = self.lower_value(&unary.argument)?;
                match unary.operator {
                    UnaryOperator::LogicalNot => {
                        Value::Bool(!argument.as_ref().is_some_and(is_truthy))
                    }
                    UnaryOperator::UnaryNegation => match argument.as_ref().and_then(Value::as_f64) {
                        Some(n) => number_value(-n),
                        None => return Err(self.unsupported(unary.span)),
                    },
                    _ => return Err(self.unsupported(unary.span)),
                }
            }
            Expression::LogicalExpression(logical) => {
                let left = self.lower_value(&logical.left)?;
                return match logical.operator {
                    LogicalOperator::And if left.as_ref().is_some_and(is_truthy) => {
                        self.lower_value(&logical.right)
                    }
                    LogicalOperator::And => Ok(left),
                    LogicalOperator::Or if left.as_ref().is_some_and(is_truthy) => Ok(left),
                    LogicalOperator::Or => self.lower_value(&logical.right),
                    LogicalOperator::Coalesce => match left {
                        None | Some(Value::Null) => self.lower_value(&logical.right),
                        defined => Ok(defined),
                    },
                };
            }
            Expression::JSXElement(el) => self.lower_element(el)?.to_value(),
            Expression::JSXFragment(frag) => self.lower_fragment(frag)?.to_value(),
            other => return Err(self.unsupported(other.span())),
        };
        Ok(Some(value))
    }

    fn lower_object<'a>(&self, obj: &ObjectExpression<'a>) -> Result<Map<String, Value>, RewriteError> {
        let mut map = Map::new();
        for prop in &obj.properties {
            let ObjectPropertyKind::ObjectProperty(p) = prop else {
                return Err(self.unsupported(obj.span));
            };
            if p.computed || p.shorthand || p.method {
                return Err(self.unsupported(p.span));
            }
            let key = match &p.key {
                PropertyKey::StaticIdentifier(id) => id.name.to_string(),
                PropertyKey::StringLiteral(s) => s.value.to_string(),
                PropertyKey::NumericLiteral(n) => to_display_string(&number_value(n.value)),
                _ => return Err(self.unsupported(p.span)),
            };
            // Properties set to `undefined` are left out
            if let Some(value) = self.lower_value(&p.value)? {
                map.insert(key, value);
            }
        }
        Ok(map)
    }

    /// Element name as written: `div`, `svg:path` or `Foo.Bar`.
    fn get_tag_name<'a>(&self, name: &JSXElementName<'a>) -> String {
        match name {
            JSXElementName::Identifier(id) => id.name.to_string(),
            JSXElementName::IdentifierReference(id) => id.name.to_string(),
            JSXElementName::NamespacedName(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
            JSXElementName::MemberExpression(me) => self.get_member_name(me),
            JSXElementName::ThisExpression(_) => "this".to_string(),
        }
    }

    fn get_member_name<'a>(&self, me: &JSXMemberExpression<'a>) -> String {
        let object = match &me.object {
            JSXMemberExpressionObject::IdentifierReference(id) => id.name.to_string(),
            JSXMemberExpressionObject::MemberExpression(inner) => self.get_member_name(inner),
            _ => "unknown".to_string(),
        };
        format!("{}.{}", object, me.property.name)
    }

    fn unsupported(&self, span: oxc_span::Span) -> RewriteError {
        let snippet = self
            .source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("<unknown>");
        RewriteError::unsupported(snippet)
    }
}

/// Integral values become integers so they print without a fraction.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// JSX text rules: lines are trimmed where they meet a line break, blank lines
/// vanish, and the remaining lines are joined with single spaces.
fn clean_jsx_text(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw.split('\n').collect();
    let last = lines.len() - 1;
    let mut cleaned = String::new();
    for (index, line) in lines.iter().enumerate() {
        let mut trimmed = *line;
        if index != 0 {
            trimmed = trimmed.trim_start();
        }
        if index != last {
            trimmed = trimmed.trim_end();
        }
        if trimmed.is_empty() {
            continue;
        }
        if !cleaned.is_empty() {
            cleaned.push(' ');
        }
        cleaned.push_str(trimmed);
    }
    (!cleaned.is_empty()).then_some(cleaned)
}
