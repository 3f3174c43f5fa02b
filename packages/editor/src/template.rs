//! # Node Templates
//!
//! Default node produced when an element is dropped onto the canvas: default
//! styles, placeholder content and, for some kinds, a small pre-built subtree.
//! Every node and slot in the result gets a fresh id from the caller's
//! generator.

use crate::id_generator::IdGenerator;
use crate::kind::NodeKind;
use crate::node::{Content, ContentNode, Slot};
use crate::style::Styles;
use chrono::Datelike;
use serde_json::json;

/// Result of instantiating a template
#[derive(Debug, Clone, PartialEq)]
pub enum Created {
    Single(ContentNode),
    Group(Vec<ContentNode>),
}

impl Created {
    pub fn into_vec(self) -> Vec<ContentNode> {
        match self {
            Created::Single(node) => vec![node],
            Created::Group(nodes) => nodes,
        }
    }
}

const CONTAINER_STYLES: [(&str, &str); 7] = [
    ("minHeight", "100px"),
    ("width", "100%"),
    ("padding", "20px"),
    ("display", "flex"),
    ("flexDirection", "column"),
    ("alignItems", "center"),
    ("gap", "16px"),
];

const STEP_COUNT: usize = 3;

/// Instantiate the default node(s) for `kind`
pub fn create_node(kind: NodeKind, ids: &mut IdGenerator) -> Created {
    match kind {
        NodeKind::Steps => Created::Group(steps(ids)),
        _ => Created::Single(single(kind, ids)),
    }
}

fn single(kind: NodeKind, ids: &mut IdGenerator) -> ContentNode {
    let node = ContentNode::new(ids.new_id(kind.as_str()), kind);

    match kind {
        NodeKind::Section | NodeKind::Box => node.with_styles(Styles::base(CONTAINER_STYLES)),
        NodeKind::Card => node.with_styles(card_styles()),
        NodeKind::RightImageSection => node
            .with_content(Content::Data(json!({ "imageSrc": "https://placehold.co/600x600" })))
            .with_styles(Styles::base([
                ("width", "100%"),
                ("padding", "20px"),
                ("display", "flex"),
                ("alignItems", "center"),
                ("gap", "20px"),
            ])),
        NodeKind::Columns => {
            let slots = (0..2).map(|_| Slot::new(ids.new_slot_id())).collect();
            node.with_slots(slots).with_styles(row_styles())
        }
        NodeKind::Heading => node
            .with_content(Content::text("<h1>Enter Heading Text...</h1>"))
            .with_styles(Styles::base([
                ("fontSize", "2.25rem"),
                ("fontWeight", "bold"),
                ("color", "#111827"),
                ("width", "100%"),
                ("textAlign", "center"),
            ])),
        NodeKind::Paragraph => node
            .with_content(Content::text(
                "<p>Enter your paragraph text here. You can make it <strong>bold</strong>, <em>italic</em>, or <u>underline</u> it.</p>",
            ))
            .with_styles(paragraph_styles()),
        NodeKind::Hero => node
            .with_content(Content::Data(json!({
                "heading": "Your Big Idea",
                "subheading": "Explain your idea in a few words.",
                "cta": "Get Started",
                "layout": "text-center",
                "image": ""
            })))
            .with_styles(Styles::base([
                ("width", "100%"),
                ("minHeight", "400px"),
                ("padding", "60px 20px"),
                ("display", "flex"),
                ("flexDirection", "column"),
                ("justifyContent", "center"),
                ("alignItems", "center"),
                ("textAlign", "center"),
                ("backgroundColor", "#4f46e5"),
                ("color", "#ffffff"),
            ])),
        NodeKind::Gallery => node
            .with_content(Content::Data(json!({
                "images": [
                    "https://placehold.co/600x400/4f46e5/ffffff",
                    "https://placehold.co/600x400/1e3a8a/ffffff",
                    "https://placehold.co/600x400/3730a3/ffffff"
                ]
            })))
            .with_styles(Styles::base([
                ("width", "100%"),
                ("padding", "20px"),
                ("display", "grid"),
                ("gridTemplateColumns", "repeat(auto-fit, minmax(200px, 1fr))"),
                ("gap", "16px"),
            ])),
        NodeKind::Footer => {
            let year = chrono::Utc::now().year();
            node.with_content(Content::Data(json!({
                "text": format!("© {} Your Company. All rights reserved.", year)
            })))
            .with_styles(Styles::base([
                ("width", "100%"),
                ("padding", "40px 20px"),
                ("backgroundColor", "#111827"),
                ("color", "#9ca3af"),
                ("textAlign", "center"),
            ]))
        }
        NodeKind::Navbar => node
            .with_content(Content::Data(json!({
                "logo": { "src": "https://placehold.co/100x40/FFFFFF/1a202c?text=Logo", "alt": "Logo" },
                "links": [
                    { "label": "Home", "href": "#" },
                    { "label": "About", "href": "#" }
                ],
                "cta": { "label": "Sign Up", "href": "#" }
            })))
            .with_styles(Styles::base([
                ("width", "100%"),
                ("backgroundColor", "#fff"),
                ("color", "#111827"),
                ("padding", "1rem 2rem"),
                ("boxShadow", "0 2px 4px rgba(0,0,0,0.05)"),
            ])),
        NodeKind::Blocks => {
            let cards = (1..=3)
                .map(|n| {
                    let card = ContentNode::new(ids.new_id(NodeKind::Card.as_str()), NodeKind::Card)
                        .with_styles(card_styles());
                    let heading = small_heading(ids, &format!("Feature {}", n));
                    let body = paragraph(ids, "Describe this feature in a sentence or two.");
                    card.with_children(vec![heading, body])
                })
                .collect();
            node.with_children(cards).with_styles(Styles::base([
                ("width", "100%"),
                ("padding", "20px"),
                ("display", "grid"),
                ("gridTemplateColumns", "repeat(auto-fit, minmax(220px, 1fr))"),
                ("gap", "20px"),
            ]))
        }
        NodeKind::StepBlock => step_block(node, ids, 1),
        NodeKind::StepConnector => node.with_styles(Styles::base([
            ("width", "100%"),
            ("height", "2px"),
            ("backgroundColor", "#e5e7eb"),
        ])),
        NodeKind::Image => node
            .with_content(Content::text("https://placehold.co/600x400"))
            .with_styles(Styles::base([
                ("width", "50%"),
                ("height", "auto"),
                ("borderRadius", "8px"),
            ])),
        NodeKind::Video => node
            .with_content(Content::text("https://www.youtube.com/embed/dQw4w9WgXcQ"))
            .with_styles(Styles::base([("width", "100%"), ("aspectRatio", "16 / 9")])),
        NodeKind::Button => node.with_content(Content::text("Click Me")).with_styles(Styles::base([
            ("backgroundColor", "#4f46e5"),
            ("color", "#fff"),
            ("padding", "10px 20px"),
            ("borderRadius", "8px"),
            ("border", "none"),
            ("cursor", "pointer"),
        ])),
        NodeKind::TextField => node.with_content(Content::text("Enter text...")).with_styles(Styles::base([
            ("width", "100%"),
            ("padding", "10px"),
            ("border", "1px solid #d1d5db"),
            ("borderRadius", "6px"),
        ])),
        NodeKind::OrderedList => node
            .with_content(Content::text("<ol><li>List Item 1</li><li>List Item 2</li></ol>"))
            .with_styles(list_styles()),
        NodeKind::UnorderedList => node
            .with_content(Content::text("<ul><li>List Item 1</li><li>List Item 2</li></ul>"))
            .with_styles(list_styles()),
        // Expanded by `create_node`; a lone `steps` node is an empty stack
        NodeKind::Steps => node,
    }
}

fn steps(ids: &mut IdGenerator) -> Vec<ContentNode> {
    let heading = ContentNode::new(ids.new_id(NodeKind::Heading.as_str()), NodeKind::Heading)
        .with_content(Content::text("<h2>How It Works</h2>"))
        .with_styles(Styles::base([
            ("fontSize", "1.875rem"),
            ("fontWeight", "bold"),
            ("color", "#111827"),
            ("width", "100%"),
            ("textAlign", "center"),
        ]));

    let columns_id = ids.new_id(NodeKind::Columns.as_str());
    let slots = (1..=STEP_COUNT)
        .map(|n| {
            let mut slot = Slot::new(ids.new_slot_id());
            let block = ContentNode::new(ids.new_id(NodeKind::StepBlock.as_str()), NodeKind::StepBlock);
            slot.children.push(step_block(block, ids, n));
            slot
        })
        .collect();
    let columns = ContentNode::new(columns_id, NodeKind::Columns)
        .with_slots(slots)
        .with_styles(row_styles());

    vec![heading, columns]
}

fn step_block(node: ContentNode, ids: &mut IdGenerator, n: usize) -> ContentNode {
    let title = small_heading(ids, &format!("Step {}", n));
    let body = paragraph(ids, "Describe what happens in this step.");
    node.with_children(vec![title, body]).with_styles(Styles::base([
        ("display", "flex"),
        ("flexDirection", "column"),
        ("alignItems", "center"),
        ("gap", "8px"),
        ("padding", "16px"),
        ("textAlign", "center"),
    ]))
}

fn small_heading(ids: &mut IdGenerator, text: &str) -> ContentNode {
    ContentNode::new(ids.new_id(NodeKind::Heading.as_str()), NodeKind::Heading)
        .with_content(Content::text(format!("<h3>{}</h3>", text)))
        .with_styles(Styles::base([
            ("fontSize", "1.25rem"),
            ("fontWeight", "600"),
            ("color", "#111827"),
        ]))
}

fn paragraph(ids: &mut IdGenerator, text: &str) -> ContentNode {
    ContentNode::new(ids.new_id(NodeKind::Paragraph.as_str()), NodeKind::Paragraph)
        .with_content(Content::text(format!("<p>{}</p>", text)))
        .with_styles(paragraph_styles())
}

fn card_styles() -> Styles {
    let mut styles = Styles::base(CONTAINER_STYLES);
    styles.desktop.default.extend(
        [
            ("backgroundColor", "#ffffff"),
            (
                "boxShadow",
                "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
            ),
            ("borderRadius", "12px"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string())),
    );
    styles
}

fn row_styles() -> Styles {
    Styles::base([
        ("width", "100%"),
        ("padding", "20px"),
        ("display", "flex"),
        ("gap", "20px"),
    ])
}

fn paragraph_styles() -> Styles {
    Styles::base([
        ("fontSize", "1rem"),
        ("color", "#4b5563"),
        ("lineHeight", "1.6"),
        ("width", "100%"),
        ("textAlign", "center"),
    ])
}

fn list_styles() -> Styles {
    Styles::base([("paddingLeft", "40px"), ("color", "#4b5563"), ("width", "100%")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator;

    #[test]
    fn test_columns_template_has_two_slots() {
        let mut ids = IdGenerator::from_seed("t");
        let node = match create_node(NodeKind::Columns, &mut ids) {
            Created::Single(node) => node,
            other => panic!("expected single node, got {:?}", other),
        };

        assert_eq!(node.slots().len(), 2);
        assert_ne!(node.slots()[0].id, node.slots()[1].id);
        assert!(node.slots()[0].id.starts_with("col-"));
    }

    #[test]
    fn test_steps_expand_to_heading_and_columns() {
        let mut ids = IdGenerator::from_seed("t");
        let nodes = create_node(NodeKind::Steps, &mut ids).into_vec();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, NodeKind::Heading);
        assert_eq!(nodes[1].kind, NodeKind::Columns);

        let slots = nodes[1].slots();
        assert_eq!(slots.len(), STEP_COUNT);
        for slot in slots {
            assert_eq!(slot.children.len(), 1);
            assert_eq!(slot.children[0].kind, NodeKind::StepBlock);
            assert_eq!(slot.children[0].children().len(), 2);
        }
    }

    #[test]
    fn test_every_template_has_unique_ids() {
        let mut ids = IdGenerator::new();
        let mut all = Vec::new();
        for kind in NodeKind::ALL {
            all.extend(create_node(kind, &mut ids).into_vec());
        }

        assert!(locator::duplicate_ids(&all).is_empty());
    }

    #[test]
    fn test_heading_defaults() {
        let mut ids = IdGenerator::from_seed("t");
        let nodes = create_node(NodeKind::Heading, &mut ids).into_vec();
        let heading = &nodes[0];

        assert_eq!(heading.id, "heading-t-1");
        assert_eq!(heading.content.as_text(), Some("<h1>Enter Heading Text...</h1>"));
        assert_eq!(heading.styles.desktop.default["fontSize"], "2.25rem");
    }
}
