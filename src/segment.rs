use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

use crate::paragraph::Paragraph;

/// Elements that close the current block on entry and on exit.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "center", "col", "colgroup",
    "dd", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "legend", "li", "main", "nav", "ol", "optgroup",
    "option", "p", "pre", "section", "table", "td", "textarea", "tfoot", "th", "thead", "tr",
    "ul",
];

/// Collapse whitespace runs: a run holding a line break becomes `\n`, any other run a space.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run: Option<bool> = None;

    for ch in text.chars() {
        if ch.is_whitespace() {
            let newline = ch == '\n' || ch == '\r';
            run = Some(run.unwrap_or(false) || newline);
            continue;
        }
        if let Some(newline) = run.take() {
            out.push(if newline { '\n' } else { ' ' });
        }
        out.push(ch);
    }
    if let Some(newline) = run {
        out.push(if newline { '\n' } else { ' ' });
    }
    out
}

/// Text collected for the block currently being built.
struct Pending {
    dom_path: String,
    text: String,
    link_chars: usize,
    inline_tags: usize,
}

impl Pending {
    fn at(path: &[String]) -> Self {
        Self {
            dom_path: path.join("."),
            text: String::new(),
            link_chars: 0,
            inline_tags: 0,
        }
    }

    fn finish(self) -> Option<Paragraph> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = normalize_whitespace(trimmed);
        Some(Paragraph::new(self.dom_path, text, self.link_chars, self.inline_tags))
    }
}

struct Segmenter {
    path: Vec<String>,
    pending: Pending,
    blocks: Vec<Paragraph>,
    link_depth: usize,
    after_br: bool,
}

impl Segmenter {
    fn new() -> Self {
        Self {
            path: Vec::new(),
            pending: Pending::at(&[]),
            blocks: Vec::new(),
            link_depth: 0,
            after_br: false,
        }
    }

    fn cut(&mut self) {
        let done = std::mem::replace(&mut self.pending, Pending::at(&self.path));
        self.blocks.extend(done.finish());
        self.after_br = false;
    }

    fn visit(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Document | Node::Fragment => self.visit_children(node),
            Node::Element(element) => {
                let name = element.name();
                self.path.push(name.to_string());

                if BLOCK_TAGS.contains(&name) {
                    self.cut();
                    self.visit_children(node);
                    self.path.pop();
                    self.cut();
                } else if name == "br" {
                    self.path.pop();
                    if self.after_br {
                        // Two line breaks in a row end the block.
                        self.pending.inline_tags = self.pending.inline_tags.saturating_sub(1);
                        self.cut();
                    } else {
                        self.pending.text.push(' ');
                        self.pending.inline_tags += 1;
                        self.after_br = true;
                    }
                } else {
                    let link = name == "a";
                    self.pending.inline_tags += 1;
                    self.after_br = false;
                    self.link_depth += usize::from(link);
                    self.visit_children(node);
                    self.link_depth -= usize::from(link);
                    self.path.pop();
                }
            }
            Node::Text(text) => {
                if text.trim().is_empty() {
                    return;
                }
                let normalized = normalize_whitespace(text);
                if self.link_depth > 0 {
                    self.pending.link_chars += normalized.chars().count();
                }
                self.pending.text.push_str(&normalized);
                self.after_br = false;
            }
            Node::Comment(_) | Node::Doctype(_) | Node::ProcessingInstruction(_) => {}
        }
    }

    fn visit_children(&mut self, node: NodeRef<'_, Node>) {
        for child in node.children() {
            self.visit(child);
        }
    }
}

/// Split a cleaned document into text blocks in document order.
pub(crate) fn segment(doc: &Html) -> Vec<Paragraph> {
    let mut segmenter = Segmenter::new();
    segmenter.visit(doc.tree.root());
    segmenter.cut();
    segmenter.blocks
}
