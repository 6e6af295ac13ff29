use std::collections::HashSet;

/// Content class of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassType {
    Good,
    NearGood,
    Short,
    Bad,
}

/// A block of text between two block-level boundaries of the page.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Paragraph {
    /// Dot-separated element path, e.g. "html.body.article.p".
    pub dom_path: String,
    /// Whitespace-normalized text.
    pub text: String,
    /// Whitespace-separated words in `text`.
    pub word_count: usize,
    /// Characters of `text` that sit inside `<a>` elements.
    pub link_chars: usize,
    /// Inline elements opened inside the block.
    pub inline_tags: usize,
    /// Class assigned from the block alone.
    pub initial_class: ClassType,
    /// Class after looking at neighbouring blocks.
    pub class_type: ClassType,
    /// Block sits inside `h1`..`h6` and heading handling is on.
    pub heading: bool,
}

impl Paragraph {
    /// Unclassified block; both classes start as `Short`.
    pub(crate) fn new(
        dom_path: String,
        text: String,
        link_chars: usize,
        inline_tags: usize,
    ) -> Self {
        Self {
            word_count: text.split_whitespace().count(),
            dom_path,
            text,
            link_chars,
            inline_tags,
            initial_class: ClassType::Short,
            class_type: ClassType::Short,
            heading: false,
        }
    }

    /// Anything short of `Good` after revision.
    pub fn is_boilerplate(&self) -> bool {
        self.class_type != ClassType::Good
    }

    /// True if any element on the path is `h1`..`h6`.
    pub(crate) fn in_heading(&self) -> bool {
        self.dom_path
            .split('.')
            .any(|tag| matches!(tag.as_bytes(), [b'h', b'1'..=b'6']))
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Share of characters inside links, 0.0 for an empty block.
    pub fn link_density(&self) -> f64 {
        match self.char_len() {
            0 => 0.0,
            len => self.link_chars as f64 / len as f64,
        }
    }

    /// Share of words found in `stoplist`, compared lowercased.
    pub fn stopword_density(&self, stoplist: &HashSet<String>) -> f64 {
        if self.word_count == 0 {
            return 0.0;
        }
        let hits = self
            .text
            .split_whitespace()
            .filter(|word| stoplist.contains(&word.to_lowercase()))
            .count();
        hits as f64 / self.word_count as f64
    }
}
