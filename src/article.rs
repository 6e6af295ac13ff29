use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CleanerError;
use crate::paragraph::Paragraph;
use crate::{join_good, Extractor};

/// An article page with its extracted blocks and crawler metadata.
#[derive(Debug, Clone)]
pub struct Article {
    id: String,
    title: Option<String>,
    paragraphs: Vec<Paragraph>,
    meta: Map<String, Value>,
}

/// On-disk form of an [`Article`]: extracted text plus the metadata sidecar
/// passed through untouched under `meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanArticle {
    pub id: String,
    pub title: Option<String>,
    pub text: String,
    pub word_count: usize,
    pub paragraph_count: usize,
    pub meta: Map<String, Value>,
}

impl Article {
    /// Parse `html` and classify its blocks. `id` names the saved file.
    pub fn new(
        id: impl Into<String>,
        html: &str,
        meta: Map<String, Value>,
        extractor: &Extractor,
    ) -> Self {
        let (page_title, paragraphs) = extractor.run(html);
        let title = meta_title(&meta)
            .or(page_title)
            .or_else(|| first_h1(&paragraphs));
        Self {
            id: id.into(),
            title,
            paragraphs,
            meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sidecar `title`, else the page `<title>`, else the first `<h1>`.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Every block of the page, boilerplate included.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn text(&self) -> String {
        join_good(&self.paragraphs)
    }

    pub fn to_clean(&self) -> CleanArticle {
        let good: Vec<&Paragraph> = self
            .paragraphs
            .iter()
            .filter(|p| !p.is_boilerplate())
            .collect();
        CleanArticle {
            id: self.id.clone(),
            title: self.title.clone(),
            text: self.text(),
            word_count: good.iter().map(|p| p.word_count).sum(),
            paragraph_count: good.len(),
            meta: self.meta.clone(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.id)
    }

    /// Write the clean record to `dir/<id>.json`, replacing any earlier file.
    ///
    /// `dir` must already exist.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, CleanerError> {
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(&self.to_clean()).map_err(|source| {
            CleanerError::Serialize {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(|e| CleanerError::io(&path, e))?;
        Ok(path)
    }
}

fn meta_title(meta: &Map<String, Value>) -> Option<String> {
    let title = meta.get("title")?.as_str()?.trim();
    (!title.is_empty()).then(|| title.to_string())
}

fn first_h1(paragraphs: &[Paragraph]) -> Option<String> {
    paragraphs
        .iter()
        .find(|p| p.dom_path.split('.').any(|tag| tag == "h1"))
        .map(|p| p.text.clone())
}
