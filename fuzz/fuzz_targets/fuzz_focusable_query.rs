#![no_main]

//! Fuzz the focusable-element query over arbitrary trees: must never panic,
//! and every result must be a tabbable descendant in document order.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabtrap::{focusable_elements, is_tabbable};
use tabtrap_dom::{Document, Element, Rect, Visibility};

#[derive(Arbitrary, Debug)]
struct NodeSpec {
    tag: u8,
    parent: u8,
    hidden: bool,
    disabled: bool,
    checked: bool,
    unrendered: bool,
    visibility: u8,
    tab_index: Option<i16>,
    name: Option<u8>,
}

const TAGS: &[&str] = &[
    "input", "select", "textarea", "button", "summary", "a", "area", "embed", "iframe", "object",
    "audio", "video", "div", "span", "form", "label",
];

fuzz_target!(|specs: Vec<NodeSpec>| {
    let mut doc = Document::new();
    let container = doc.append(doc.root(), Element::new("div"));
    let mut ids = vec![container];

    for spec in specs.iter().take(256) {
        let tag = TAGS[spec.tag as usize % TAGS.len()];
        let mut element = Element::new(tag)
            .hidden(spec.hidden)
            .disabled(spec.disabled)
            .checked(spec.checked)
            .visibility(match spec.visibility % 3 {
                0 => Visibility::Inherit,
                1 => Visibility::Visible,
                _ => Visibility::Hidden,
            });
        if spec.unrendered {
            element = element.unrendered();
        } else {
            element = element.boxes(vec![Rect::new(0, 0, u16::from(spec.tag), 1)]);
        }
        if let Some(index) = spec.tab_index {
            element = element.tab_index(i32::from(index));
        }
        if let Some(name) = spec.name {
            element = element.attr("name", format!("n{}", name % 4));
        }
        if tag == "input" && spec.checked {
            element = element.attr("type", "radio");
        }
        if tag == "a" && spec.tag % 2 == 0 {
            element = element.attr("href", "#");
        }

        let parent = ids[spec.parent as usize % ids.len()];
        let id = doc.append(parent, element);
        ids.push(id);
    }

    let result = focusable_elements(&doc, container);

    let mut last_position = None;
    for id in result {
        assert!(doc.contains(container, id));
        assert_ne!(id, container);
        assert!(is_tabbable(&doc, id));

        // Document order: positions in a full pre-order walk increase.
        let position = doc
            .descendants(container)
            .position(|candidate| candidate == id)
            .expect("result must be a descendant");
        if let Some(last) = last_position {
            assert!(position > last);
        }
        last_position = Some(position);
    }
});
