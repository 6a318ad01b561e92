//! Rewriter behavior over hand-built trees.

#[cfg(test)]
mod tests {
    use crate::options::{HiddenStylePolicy, RewriteOptions};
    use crate::render::text_content;
    use crate::rewrite::{rewrite, Rewriter};
    use crate::tree::{Element, RefHandle, Tree};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn div(text: &str) -> Element {
        Element::new("div").child(text)
    }

    fn only_element(tree: &Tree) -> &Element {
        tree.as_element().expect("expected an element")
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // IDENTITY
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_tree_without_directives_is_unchanged() {
        let tree = Tree::list(vec![
            Element::new("p").child("1").into(),
            Element::new("div")
                .prop("id", "wrapper")
                .child(Element::new("p").child("2a"))
                .child(Element::new("p").child("2b"))
                .child(Element::new("p").child("2c"))
                .into(),
            Element::new("p").child("3").into(),
            Tree::Primitive(json!(4)),
        ]);

        let out = rewrite(tree.clone());

        assert_eq!(out, tree);
        assert_eq!(text_content(&out), "12a2b2c34");
    }

    #[test]
    fn test_primitives_pass_through() {
        for value in [json!("text"), json!(3), json!(true), json!(null), json!({ "a": 1 })] {
            assert_eq!(rewrite(Tree::Primitive(value.clone())), Tree::Primitive(value));
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONDITIONAL INCLUSION
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_nested_if() {
        let tree = Tree::list(vec![
            div("1").prop("vIf", false).into(),
            Element::new("div")
                .prop("vIf", true)
                .child(div("2a").prop("vIf", true))
                .child(div("2b").prop("vIf", false))
                .child(div("2c").prop("vIf", true))
                .into(),
            Element::new("div")
                .prop("vIf", false)
                .child(div("3a").prop("vIf", true))
                .into(),
        ]);

        assert_eq!(text_content(&rewrite(tree)), "2a2c");
    }

    #[test]
    fn test_truthiness_boundary() {
        let tree = Tree::list(vec![
            div("1").prop("vIf", 0).into(),
            Element::new("div")
                .prop("vIf", 1)
                .child(div("2a").prop("vIf", "true"))
                .child(div("2b").prop("vIf", ""))
                .child(div("2c").prop("vIf", json!({})))
                .child(div("2d").prop("vIf", json!([])))
                .child(div("2e").prop("vIf", "false"))
                .into(),
            Element::new("div")
                .prop("vIf", Value::Null)
                .child(div("3a").prop("vIf", true))
                .into(),
            div("4").prop("vIf", false).into(),
        ]);

        assert_eq!(text_content(&rewrite(tree)), "2a2c2d2e");
    }

    #[test]
    fn test_root_element_with_falsy_if_is_omitted() {
        let out = rewrite(div("1").prop("vIf", false).into());
        assert!(out.is_omitted());
        assert_eq!(text_content(&out), "");
    }

    #[test]
    fn test_else_if_scenario() {
        let tree = Tree::list(vec![
            div("1").prop("vIf", false).into(),
            div("2").prop("vElseIf", false).into(),
            div("3").prop("vElseIf", true).into(),
            div("4").prop("vElseIf", true).into(),
            div("5").prop("vIf", true).into(),
        ]);

        assert_eq!(text_content(&rewrite(tree)), "35");
    }

    #[test]
    fn test_else_scenario() {
        let tree = Tree::list(vec![
            div("1").prop("vIf", false).into(),
            div("2").prop("vElseIf", false).into(),
            div("3").prop("vElse", true).into(),
            div("4").prop("vIf", true).into(),
            div("5").prop("vElse", true).into(),
        ]);

        assert_eq!(text_content(&rewrite(tree)), "34");
    }

    #[test]
    fn test_else_on_node_with_falsy_else_if() {
        let tree = Tree::list(vec![
            div("1").prop("vIf", false).into(),
            div("2").prop("vElse", true).prop("vElseIf", false).into(),
            div("3").prop("vIf", true).into(),
            Tree::text("t"),
            div("4").prop("vElseIf", false).into(),
            div("5").prop("vElse", true).into(),
        ]);

        let out = rewrite(tree);
        assert_eq!(text_content(&out), "23t5");
        let Tree::List(items) = &out else {
            panic!("expected a list");
        };
        assert!(!only_element(&items[0]).has_prop("vElseIf"));
    }

    #[test]
    fn test_chains_inside_children_are_resolved() {
        let tree: Tree = Element::new("section")
            .child(div("a").prop("vIf", false))
            .child(div("b").prop("vElse", true))
            .into();

        let out = rewrite(tree);
        let section = only_element(&out);
        let Some(Tree::List(children)) = section.children.as_deref() else {
            panic!("expected a child list");
        };
        assert_eq!(children.len(), 1);
        assert_eq!(text_content(&out), "b");
    }

    #[test]
    fn test_directives_are_stripped() {
        let out = rewrite(
            div("x")
                .prop("vIf", true)
                .prop("vShow", true)
                .prop("vOnce", true)
                .prop("vText", "ignored")
                .prop("id", "kept")
                .into(),
        );
        assert_eq!(only_element(&out).props, json!({ "id": "kept" }).as_object().cloned().unwrap());
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // VISIBILITY
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_show_only_adds_display_none() {
        let tree = Tree::list(vec![
            div("1").prop("vShow", true).into(),
            div("2").prop("vShow", false).into(),
        ]);

        let out = rewrite(tree);
        let Tree::List(items) = &out else {
            panic!("expected a list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(only_element(&items[0]).props.get("style"), None);
        assert_eq!(
            only_element(&items[1]).props.get("style"),
            Some(&json!({ "display": "none" }))
        );
        assert_eq!(text_content(&out), "12");
    }

    #[test]
    fn test_show_is_independent_per_node() {
        let tree: Tree = Element::new("div")
            .prop("vShow", false)
            .child(div("2a").prop("vShow", true))
            .child(div("2b").prop("vShow", false))
            .into();

        let out = rewrite(tree);
        let parent = only_element(&out);
        let Some(Tree::List(children)) = parent.children.as_deref() else {
            panic!("expected a child list");
        };
        assert_eq!(parent.props.get("style"), Some(&json!({ "display": "none" })));
        assert_eq!(only_element(&children[0]).props.get("style"), None);
        assert_eq!(
            only_element(&children[1]).props.get("style"),
            Some(&json!({ "display": "none" }))
        );
        assert_eq!(text_content(&out), "2a2b");
    }

    #[test]
    fn test_hidden_style_merges_into_existing_style() {
        let out = rewrite(
            div("x")
                .prop("vShow", 0)
                .prop("style", json!([{ "color": "red", "display": "flex" }, { "width": 1 }]))
                .into(),
        );
        assert_eq!(
            only_element(&out).props.get("style"),
            Some(&json!({ "color": "red", "display": "none", "width": 1 }))
        );
    }

    #[test]
    fn test_prefer_explicit_display_policy() {
        let rewriter = Rewriter::new(
            RewriteOptions::default().with_hidden_style(HiddenStylePolicy::PreferExplicit),
        );
        let out = rewriter.rewrite(
            div("x")
                .prop("vShow", false)
                .prop("style", json!({ "display": "inline" }))
                .into(),
        );
        assert_eq!(
            only_element(&out).props.get("style"),
            Some(&json!({ "display": "inline" }))
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TEXT / MARKUP OVERRIDES
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_text_override() {
        let tree = Tree::list(vec![
            Element::new("div").prop("vText", "1").into(),
            Element::new("div").prop("vText", 2).into(),
            Element::new("div").prop("vText", json!({ "key": "value" })).into(),
        ]);

        assert_eq!(text_content(&rewrite(tree)), "12[object Object]");
    }

    #[test]
    fn test_text_override_false_is_ignored() {
        let out = rewrite(Element::new("div").prop("vText", false).into());
        assert_eq!(only_element(&out).children, None);
    }

    #[test]
    fn test_existing_children_win_over_text() {
        let out = rewrite(div("Content").prop("vText", "123").into());
        assert_eq!(text_content(&out), "Content");
    }

    #[test]
    fn test_falsy_children_yield_to_text() {
        let out = rewrite(Element::new("div").children("").prop("vText", "t").into());
        assert_eq!(text_content(&out), "t");
    }

    #[test]
    fn test_html_override() {
        let out = rewrite(
            Element::new("div")
                .prop("data-testid", "div")
                .prop("vHtml", "<p>Test</p>")
                .into(),
        );
        let el = only_element(&out);
        assert_eq!(
            el.props.get("dangerouslySetInnerHTML"),
            Some(&json!({ "__html": "<p>Test</p>" }))
        );
        assert_eq!(el.children, None);
        assert!(!el.has_prop("vHtml"));
    }

    #[test]
    fn test_existing_children_win_over_html() {
        let out = rewrite(div("Content").prop("vHtml", "<p>Test</p>").into());
        let el = only_element(&out);
        assert!(!el.has_prop("dangerouslySetInnerHTML"));
        assert_eq!(text_content(&out), "Content");
    }

    #[test]
    fn test_text_takes_priority_over_html() {
        let out = rewrite(
            Element::new("div")
                .prop("vText", "plain")
                .prop("vHtml", "<b>bold</b>")
                .into(),
        );
        let el = only_element(&out);
        assert_eq!(el.children.as_deref(), Some(&Tree::text("plain")));
        assert!(!el.has_prop("dangerouslySetInnerHTML"));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CLASS / STYLE NORMALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_class_flattening() {
        let tree: Tree = Element::new("div")
            .prop(
                "className",
                json!(["c1", false, { "c3": true, "c4": false }, ["c5", "c6"]]),
            )
            .child(Element::new("div").prop("className", "c7"))
            .into();

        let out = rewrite(tree);
        let outer = only_element(&out);
        assert_eq!(outer.props.get("className"), Some(&json!("c1 c3 c5 c6")));
        let inner = only_element(outer.children.as_deref().unwrap());
        assert_eq!(inner.props.get("className"), Some(&json!("c7")));
    }

    #[test]
    fn test_style_list_merging() {
        let tree: Tree = Element::new("div")
            .prop(
                "style",
                json!([
                    { "color": "pink", "display": "flex" },
                    { "width": "50%", "border": "2px dotted red" },
                    { "border": "1px solid black" },
                    { "color": "white" }
                ]),
            )
            .child(Element::new("div").prop("style", json!({ "display": "inline" })))
            .into();

        let out = rewrite(tree);
        let outer = only_element(&out);
        assert_eq!(
            outer.props.get("style"),
            Some(&json!({
                "color": "white",
                "display": "flex",
                "width": "50%",
                "border": "1px solid black"
            }))
        );
        let inner = only_element(outer.children.as_deref().unwrap());
        assert_eq!(inner.props.get("style"), Some(&json!({ "display": "inline" })));
    }

    #[test]
    fn test_custom_prop_names() {
        let options = RewriteOptions::from_json(
            r#"{ "classProp": "class", "directives": { "conditionalShow": "show" } }"#,
        )
        .unwrap();
        let out = Rewriter::new(options).rewrite(
            div("x")
                .prop("class", json!({ "on": true }))
                .prop("show", false)
                .into(),
        );
        let el = only_element(&out);
        assert_eq!(el.props.get("class"), Some(&json!("on")));
        assert_eq!(el.props.get("style"), Some(&json!({ "display": "none" })));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // IDENTITY KEY / REFERENCE
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_key_and_ref_pass_through() {
        let users = [("key1", "a"), ("key2", "b"), ("key3", "c")];
        let tree = Tree::list(
            users
                .iter()
                .map(|(id, name)| -> Tree {
                    Element::new("div")
                        .prop("data-testid", *id)
                        .key(*id)
                        .reference(format!("ref-{}", id))
                        .child(*name)
                        .into()
                })
                .collect::<Vec<Tree>>(),
        );

        let Tree::List(items) = rewrite(tree) else {
            panic!("expected a list");
        };
        for (item, (id, _)) in items.iter().zip(users.iter()) {
            let el = only_element(item);
            assert_eq!(el.key.as_deref(), Some(*id));
            assert_eq!(el.reference, Some(RefHandle(format!("ref-{}", id))));
            assert!(!el.has_prop("key"));
            assert!(!el.has_prop("ref"));
        }
    }

    #[test]
    fn test_props_key_never_becomes_identity() {
        let out = rewrite(
            div("x")
                .prop("key", "from-props")
                .prop("ref", "from-props")
                .key("own")
                .into(),
        );
        let el = only_element(&out);
        assert_eq!(el.key.as_deref(), Some("own"));
        assert_eq!(el.reference, None);
        assert!(el.props.is_empty());
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // BATCH
    // ═══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_batch_matches_sequential() {
        let trees: Vec<Tree> = (0..16)
            .map(|i| {
                Tree::list(vec![
                    div("a").prop("vIf", i % 2 == 0).into(),
                    div("b").prop("vElse", true).into(),
                ])
            })
            .collect();

        let rewriter = Rewriter::default();
        let sequential: Vec<Tree> = trees.iter().cloned().map(|t| rewriter.rewrite(t)).collect();
        let batched = rewriter.rewrite_batch(trees);

        assert_eq!(batched, sequential);
        assert_eq!(text_content(&batched[0]), "a");
        assert_eq!(text_content(&batched[1]), "b");
    }
}
