//! HTML serialization
//!
//! Pipeline: IR → RcDom → HTML string. Text only ever enters the DOM as text nodes, so
//! html5ever escapes it on the way out.

use crate::error::RenderError;
use crate::ir::nodes::{Block, Document, Inline};
use crate::RenderOptions;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub(super) fn serialize_to_html(
    doc: &Document,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    if doc.is_empty() {
        return Ok(String::new());
    }
    let dom = build_html_dom(doc, options);
    serialize_dom(&dom)
}

fn build_html_dom(doc: &Document, options: &RenderOptions) -> RcDom {
    let dom = RcDom::default();
    let container = create_element("div", vec![]);

    for block in &doc.blocks {
        let element = match block {
            Block::Heading { level, content } => {
                let tag = format!("h{}", heading_level(options.base_heading_level, *level));
                let heading = create_element(&tag, vec![]);
                append_inlines(&heading, content);
                heading
            }
            Block::Paragraph(content) => {
                let para = create_element("p", vec![]);
                append_inlines(&para, content);
                para
            }
            Block::List(items) => {
                let list = create_element("ul", vec![]);
                for item in items {
                    let li = create_element("li", vec![]);
                    append_inlines(&li, item);
                    append(&list, li);
                }
                list
            }
        };
        append(&container, element);
    }

    dom.document.children.borrow_mut().push(container);
    dom
}

/// `#` maps to the base level, deeper markers step down from there.
fn heading_level(base: u8, level: u8) -> u8 {
    base.max(1).saturating_add(level.saturating_sub(1)).min(6)
}

fn append_inlines(parent: &Handle, inlines: &[Inline]) {
    for inline in inlines {
        let node = match inline {
            Inline::Text(text) => create_text(text),
            Inline::Strong(text) => {
                let strong = create_element("strong", vec![]);
                append(&strong, create_text(text));
                strong
            }
            Inline::Link { label, href } => {
                let anchor = create_element(
                    "a",
                    vec![("href", href.as_str()), ("target", "_blank"), ("rel", "noopener")],
                );
                append(&anchor, create_text(label));
                anchor
            }
        };
        append(parent, node);
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the container's children, not the container itself.
fn serialize_dom(dom: &RcDom) -> Result<String, RenderError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for container in dom.document.children.borrow().iter() {
        for child in container.children.borrow().iter() {
            let serializable = SerializableHandle::from(child.clone());
            serialize(&mut output, &serializable, opts.clone())?;
        }
    }

    Ok(String::from_utf8(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn paragraph(inlines: Vec<Inline>) -> Document {
        Document {
            blocks: vec![Block::Paragraph(inlines)],
        }
    }

    #[rstest]
    #[case(2, 1, 2)]
    #[case(2, 3, 4)]
    #[case(1, 1, 1)]
    #[case(5, 3, 6)]
    #[case(0, 1, 1)]
    #[case(255, 3, 6)]
    #[case(6, 0, 6)]
    fn test_heading_level(#[case] base: u8, #[case] level: u8, #[case] expected: u8) {
        assert_eq!(heading_level(base, level), expected);
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = paragraph(vec![Inline::Text("<script>alert('x')</script> & co".into())]);
        let html = serialize_to_html(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(html, "<p>&lt;script&gt;alert('x')&lt;/script&gt; &amp; co</p>");
    }

    #[test]
    fn test_href_attribute_is_escaped() {
        let doc = paragraph(vec![Inline::Link {
            label: "q".into(),
            href: "https://x.com/?a=1&b=\"2\"".into(),
        }]);
        let html = serialize_to_html(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(
            html,
            "<p><a href=\"https://x.com/?a=1&amp;b=&quot;2&quot;\" target=\"_blank\" rel=\"noopener\">q</a></p>"
        );
    }

    #[test]
    fn test_empty_document() {
        let html = serialize_to_html(&Document::default(), &RenderOptions::default()).unwrap();
        assert_eq!(html, "");
    }
}
