pub mod config;
pub mod document;
pub mod error;
pub mod html;
pub mod index;
pub mod persist;
pub mod scanner;
pub mod tokenizer;

pub use config::IndexerConfig;
pub use error::{IndexError, Result};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One indexed article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// File name without extension; unique within one run.
    #[serde(rename = "archivo")]
    pub file_id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Ranked keywords, most relevant first.
    #[serde(rename = "palabrasClave")]
    pub keywords: Vec<String>,
    #[serde(rename = "fechaActualizacion")]
    pub update_date: Option<String>,
    /// Link target relative to the site root, e.g. `pildoras/ssh.html`.
    #[serde(rename = "ruta")]
    pub path: String,
}

/// Entry of an inverted-index bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRef {
    #[serde(rename = "archivo")]
    pub file_id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    /// 1-based position of the keyword in the document's keyword list.
    #[serde(rename = "relevancia")]
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// RFC 3339 build timestamp.
    pub created: String,
    pub description: String,
    pub version: String,
    #[serde(rename = "totalFiles")]
    pub total_files: usize,
}

/// The persisted artifact consumed by the site widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub files: Vec<DocumentRecord>,
    #[serde(rename = "keywords")]
    pub keyword_index: BTreeMap<String, Vec<KeywordRef>>,
    pub metadata: IndexMetadata,
}
