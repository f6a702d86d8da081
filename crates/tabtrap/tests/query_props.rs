//! Property tests for the focusable-element query.

use proptest::prelude::*;
use tabtrap::dom::{Document, Element, ElementId, Visibility};
use tabtrap::{focus_first_element, focusable_elements, is_tabbable};

#[derive(Debug, Clone)]
enum Kind {
    Button,
    Input,
    Link,
    PlainAnchor,
    Div,
    Span,
}

#[derive(Debug, Clone)]
struct Spec {
    kind: Kind,
    hidden: bool,
    disabled: bool,
    unrendered: bool,
    visibility: Visibility,
    tab_index: Option<i8>,
    nest_under_previous: bool,
}

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Button),
        Just(Kind::Input),
        Just(Kind::Link),
        Just(Kind::PlainAnchor),
        Just(Kind::Div),
        Just(Kind::Span),
    ]
}

fn visibility_strategy() -> impl Strategy<Value = Visibility> {
    prop_oneof![
        5 => Just(Visibility::Inherit),
        1 => Just(Visibility::Visible),
        1 => Just(Visibility::Hidden),
    ]
}

fn spec_strategy() -> impl Strategy<Value = Spec> {
    (
        kind_strategy(),
        prop::bool::weighted(0.15),
        prop::bool::weighted(0.15),
        prop::bool::weighted(0.1),
        visibility_strategy(),
        prop::option::of(-2i8..4),
        any::<bool>(),
    )
        .prop_map(
            |(kind, hidden, disabled, unrendered, visibility, tab_index, nest_under_previous)| {
                Spec {
                    kind,
                    hidden,
                    disabled,
                    unrendered,
                    visibility,
                    tab_index,
                    nest_under_previous,
                }
            },
        )
}

/// Build a document where insertion order equals document order: each
/// element attaches either to the container or to the previously inserted
/// element.
fn build(specs: &[Spec]) -> (Document, ElementId, Vec<ElementId>) {
    let mut doc = Document::new();
    let container = doc.append(doc.root(), Element::new("div"));
    let mut ids = Vec::with_capacity(specs.len());
    let mut previous = container;

    for spec in specs {
        let mut element = match spec.kind {
            Kind::Button => Element::new("button"),
            Kind::Input => Element::new("input"),
            Kind::Link => Element::new("a").attr("href", "#"),
            Kind::PlainAnchor => Element::new("a"),
            Kind::Div => Element::new("div"),
            Kind::Span => Element::new("span"),
        };
        element = element
            .hidden(spec.hidden)
            .disabled(spec.disabled)
            .visibility(spec.visibility);
        if spec.unrendered {
            element = element.unrendered();
        }
        if let Some(index) = spec.tab_index {
            element = element.tab_index(i32::from(index));
        }

        let parent = if spec.nest_under_previous {
            previous
        } else {
            container
        };
        let id = doc.append(parent, element);
        ids.push(id);
        previous = id;
    }

    (doc, container, ids)
}

proptest! {
    #[test]
    fn query_returns_tabbable_descendants_in_document_order(
        specs in prop::collection::vec(spec_strategy(), 0..24),
    ) {
        let (doc, container, ids) = build(&specs);
        let result = focusable_elements(&doc, container);

        // Every result is a tabbable descendant.
        for &id in &result {
            prop_assert!(doc.contains(container, id));
            prop_assert_ne!(id, container);
            prop_assert!(is_tabbable(&doc, id));
        }

        // Order matches document order (insertion order by construction).
        let positions: Vec<_> = result
            .iter()
            .map(|id| ids.iter().position(|candidate| candidate == id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        // Nothing tabbable was missed.
        for &id in &ids {
            if is_tabbable(&doc, id) {
                prop_assert!(result.contains(&id));
            }
        }
    }

    #[test]
    fn first_element_focus_agrees_with_query(
        specs in prop::collection::vec(spec_strategy(), 0..24),
    ) {
        let (mut doc, container, _) = build(&specs);
        let expected = focusable_elements(&doc, container).first().copied();
        let focused = focus_first_element(&mut doc, container, false);

        match expected {
            Some(first) => {
                prop_assert!(focused);
                prop_assert_eq!(doc.active_element(), Some(first));
            }
            None => {
                prop_assert!(!focused);
                prop_assert_eq!(doc.active_element(), Some(doc.root()));
            }
        }
    }

    #[test]
    fn query_never_panics_on_arbitrary_trees(
        specs in prop::collection::vec(spec_strategy(), 0..64),
    ) {
        let (doc, container, _) = build(&specs);
        let _ = focusable_elements(&doc, container);
    }
}
