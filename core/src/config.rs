use std::path::{Path, PathBuf};

pub const DEFAULT_CORPUS_DIR: &str = "pildoras";
pub const DEFAULT_OUTPUT: &str = "index_pildoras.json";
pub const ARTICLE_EXTENSION: &str = "html";
pub const BACKUP_SUFFIX: &str = ".backup";
pub const MAX_DESCRIPTION_CHARS: usize = 300;
pub const MIN_TOKEN_CHARS: usize = 3;
pub const MAX_KEYWORDS: usize = 20;
pub const INDEX_DESCRIPTION: &str = "Índice de píldoras de ciberseguridad";
pub const INDEX_VERSION: &str = "1.0";

/// Settings for one scan-and-rebuild run.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub corpus_dir: PathBuf,
    pub output: PathBuf,
    /// Prefix joined with the file name to form each record's `ruta`.
    pub link_prefix: String,
    pub extension: String,
    pub backup_suffix: String,
    pub max_description_chars: usize,
    /// Sort `files` by display title after indexing.
    pub sort_by_title: bool,
    pub description: String,
    pub version: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            link_prefix: DEFAULT_CORPUS_DIR.to_string(),
            extension: ARTICLE_EXTENSION.to_string(),
            backup_suffix: BACKUP_SUFFIX.to_string(),
            max_description_chars: MAX_DESCRIPTION_CHARS,
            sort_by_title: true,
            description: INDEX_DESCRIPTION.to_string(),
            version: INDEX_VERSION.to_string(),
        }
    }
}

impl IndexerConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(corpus_dir: P, output: Q) -> Self {
        let corpus_dir = corpus_dir.into();
        let link_prefix = Self::link_prefix_for(&corpus_dir);
        Self { corpus_dir, output: output.into(), link_prefix, ..Self::default() }
    }

    /// Link prefix derived from the corpus directory: its last component only,
    /// so an absolute `--input` never leaks into `ruta`.
    pub fn link_prefix_for(corpus_dir: &Path) -> String {
        corpus_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_CORPUS_DIR.to_string())
    }

    /// `ruta` value for a scanned file name.
    pub fn link_for(&self, file_name: &str) -> String {
        let prefix = self.link_prefix.trim_end_matches('/');
        if prefix.is_empty() { file_name.to_string() } else { format!("{prefix}/{file_name}") }
    }
}
