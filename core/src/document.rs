use crate::config::IndexerConfig;
use crate::error::{IndexError, Result};
use crate::html::{extract_description, extract_update_date, find_title};
use crate::tokenizer::extract_keywords;
use crate::DocumentRecord;
use std::fs;
use std::path::Path;

/// Build the record for one article from its raw HTML. Never fails: every
/// field falls back to its default.
pub fn record_from_html(html: &str, file_name: &str, cfg: &IndexerConfig) -> DocumentRecord {
    let file_id = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string();
    // a fileId fallback is not document text and must not become a keyword
    let found_title = find_title(html);
    let keywords = extract_keywords(html, found_title.as_deref().unwrap_or(""));
    let title = found_title.unwrap_or_else(|| file_id.clone());
    let description = extract_description(html, cfg.max_description_chars);
    let update_date = extract_update_date(html);

    DocumentRecord { path: cfg.link_for(file_name), file_id, title, description, keywords, update_date }
}

/// Read and index `cfg.corpus_dir/file_name`. Read or UTF-8 failures surface as
/// `IndexError::FileRead` for the caller to skip.
pub fn index_document(file_name: &str, cfg: &IndexerConfig) -> Result<DocumentRecord> {
    let path = cfg.corpus_dir.join(file_name);
    let bytes = fs::read(&path).map_err(|e| IndexError::FileRead { path: path.clone(), reason: e.to_string() })?;
    let html = String::from_utf8(bytes)
        .map_err(|e| IndexError::FileRead { path: path.clone(), reason: format!("invalid UTF-8: {e}") })?;
    let record = record_from_html(&html, file_name, cfg);
    tracing::debug!(file = %record.file_id, keywords = record.keywords.len(), "indexed document");
    Ok(record)
}
