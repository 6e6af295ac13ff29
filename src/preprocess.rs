use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{Html, Selector};

/// Elements dropped together with everything below them.
const DROPPED: &[&str] = &[
    "script", "style", "head", "noscript", "template",
    "input", "button", "select", "textarea",
    "embed", "object", "applet", "iframe", "layer", "param",
    "svg", "canvas",
];

/// Elements whose own tag is dropped while their children are kept.
const UNWRAPPED: &[&str] = &["form"];

/// A parsed article page with boilerplate-only markup removed.
pub(crate) struct Cleaned {
    pub doc: Html,
    /// Text of the page `<title>`, captured before `<head>` is dropped.
    pub title: Option<String>,
}

pub(crate) fn clean(html: &str) -> Cleaned {
    let raw = Html::parse_document(html);
    let title = page_title(&raw);

    let mut markup = String::with_capacity(html.len());
    write_node(raw.tree.root(), &mut markup);

    Cleaned {
        doc: Html::parse_document(&markup),
        title,
    }
}

fn page_title(doc: &Html) -> Option<String> {
    let selector = Selector::parse("head > title").ok()?;
    let element = doc.select(&selector).next()?;
    let text = element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

fn write_node(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Document | Node::Fragment => write_children(node, out),
        Node::Element(element) => {
            let name = element.name();
            if DROPPED.contains(&name) {
                return;
            }
            if UNWRAPPED.contains(&name) {
                write_children(node, out);
                return;
            }

            out.push('<');
            out.push_str(name);
            for (key, value) in element.attrs() {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                push_escaped(value, true, out);
                out.push('"');
            }
            out.push('>');
            if !is_void(name) {
                write_children(node, out);
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
        // Re-escape so decoded entities stay text on the second parse.
        Node::Text(text) => push_escaped(&text.text, false, out),
        Node::Comment(_) | Node::Doctype(_) | Node::ProcessingInstruction(_) => {}
    }
}

fn write_children(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        write_node(child, out);
    }
}

fn push_escaped(value: &str, in_attribute: bool, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

fn is_void(name: &str) -> bool {
    matches!(
        name,
        "area" | "base" | "br" | "col" | "hr" | "img" | "link" | "meta" | "source" | "track"
            | "wbr"
    )
}
