//! Batch conversion of raw HTML article dumps into clean JSON records.
//!
//! A crawler leaves one directory per article under a raw root, holding
//! `<name>.html` and a `<name>.json` metadata sidecar. [`batch::Converter`]
//! walks that root, builds an [`Article`] for every entry and saves it as
//! `<name>.json` in the output directory.
//!
//! Article text is found by paragraph-level boilerplate removal: the page is
//! split into blocks, each block is classified from its length, link density
//! and stopword density, and the classes are then revised by looking at
//! neighbouring blocks.
//!
//! # Quick start
//!
//! ```rust
//! use article_cleaner::{Article, Extractor};
//! use serde_json::{json, Map};
//!
//! let html = "<html><head><title>Hello</title></head><body><p>Body text.</p></body></html>";
//! let meta: Map<_, _> = json!({"url": "https://example.com/hello"})
//!     .as_object()
//!     .cloned()
//!     .unwrap_or_default();
//! let article = Article::new("hello", html, meta, &Extractor::english());
//! assert_eq!(article.title(), Some("Hello"));
//! ```

mod article;
pub mod batch;
mod classify;
mod error;
mod paragraph;
mod preprocess;
mod segment;
mod stoplist;

pub use article::{Article, CleanArticle};
pub use error::CleanerError;
pub use paragraph::{ClassType, Paragraph};
pub use stoplist::{available_languages, get_stoplist};

use std::collections::HashSet;

/// Thresholds for block classification.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Blocks shorter than this (in characters) are `Short`.
    pub length_low: usize,
    /// Blocks longer than this with enough stopwords are `Good` outright.
    pub length_high: usize,
    /// Stopword density below this makes a non-short block `Bad`.
    pub stopwords_low: f64,
    /// Stopword density at or above this makes a long block `Good`, a medium one `NearGood`.
    pub stopwords_high: f64,
    /// Blocks with a larger share of link characters are `Bad`.
    pub max_link_density: f64,
    /// How far (in characters) a heading may sit from good content.
    pub max_heading_distance: usize,
    /// Treat headings like any other block.
    pub no_headings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length_low: 70,
            length_high: 200,
            stopwords_low: 0.30,
            stopwords_high: 0.32,
            max_link_density: 0.2,
            max_heading_distance: 200,
            no_headings: false,
        }
    }
}

impl Config {
    /// Sets [`Config::length_low`].
    pub fn with_length_low(mut self, n: usize) -> Self {
        self.length_low = n;
        self
    }
    /// Sets [`Config::length_high`].
    pub fn with_length_high(mut self, n: usize) -> Self {
        self.length_high = n;
        self
    }
    /// Sets [`Config::stopwords_low`].
    pub fn with_stopwords_low(mut self, v: f64) -> Self {
        self.stopwords_low = v;
        self
    }
    /// Sets [`Config::stopwords_high`].
    pub fn with_stopwords_high(mut self, v: f64) -> Self {
        self.stopwords_high = v;
        self
    }
    /// Sets [`Config::max_link_density`], a fraction in `0.0..=1.0`.
    pub fn with_max_link_density(mut self, v: f64) -> Self {
        self.max_link_density = v;
        self
    }
    /// Sets [`Config::max_heading_distance`].
    pub fn with_max_heading_distance(mut self, n: usize) -> Self {
        self.max_heading_distance = n;
        self
    }
    /// Turns heading rescue off.
    pub fn with_no_headings(mut self, v: bool) -> Self {
        self.no_headings = v;
        self
    }
}

/// Stoplist plus thresholds: everything needed to pull text out of a page.
#[derive(Debug, Clone)]
pub struct Extractor {
    stoplist: HashSet<String>,
    config: Config,
}

impl Extractor {
    pub fn new(stoplist: HashSet<String>, config: Config) -> Self {
        Self { stoplist, config }
    }

    /// Extractor for a named stoplist language with default thresholds.
    pub fn for_language(language: &str) -> Result<Self, CleanerError> {
        Ok(Self::new(get_stoplist(language)?, Config::default()))
    }

    /// English stoplist, default thresholds.
    pub fn english() -> Self {
        Self::for_language("English").unwrap_or_else(|_| Self::language_independent())
    }

    /// Empty stoplist with zero stopword thresholds: blocks are judged by
    /// length and links alone.
    pub fn language_independent() -> Self {
        Self::new(
            HashSet::new(),
            Config::default()
                .with_stopwords_low(0.0)
                .with_stopwords_high(0.0),
        )
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Classify every block of `html`.
    pub fn paragraphs(&self, html: &str) -> Vec<Paragraph> {
        self.run(html).1
    }

    /// Good blocks only, joined by newlines.
    pub fn extract_text(&self, html: &str) -> String {
        join_good(&self.paragraphs(html))
    }

    /// Page `<title>` and classified blocks.
    pub(crate) fn run(&self, html: &str) -> (Option<String>, Vec<Paragraph>) {
        let cleaned = preprocess::clean(html);
        let mut paragraphs = segment::segment(&cleaned.doc);
        classify::classify(&mut paragraphs, &self.stoplist, &self.config);
        classify::revise(&mut paragraphs, self.config.max_heading_distance);
        (cleaned.title, paragraphs)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::english()
    }
}

pub(crate) fn join_good(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .filter(|p| !p.is_boilerplate())
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
