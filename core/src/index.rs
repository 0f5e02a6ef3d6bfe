use crate::config::{IndexerConfig, MAX_KEYWORDS};
use crate::document::index_document;
use crate::error::Result;
use crate::scanner::scan_corpus;
use crate::tokenizer::{normalize_term, tokenize};
use crate::{DocumentRecord, IndexDocument, IndexMetadata, KeywordRef};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use time::format_description::well_known::Rfc3339;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Scan the corpus, index every article and assemble the index document.
/// Unreadable articles are logged and left out.
pub fn build_index(cfg: &IndexerConfig) -> Result<IndexDocument> {
    let mut names = scan_corpus(&cfg.corpus_dir, &cfg.extension, &cfg.backup_suffix)?;
    // listing order is platform dependent; keyword buckets follow file name order
    names.sort();
    tracing::info!(dir = %cfg.corpus_dir.display(), candidates = names.len(), "scanning corpus");

    let mut records = Vec::with_capacity(names.len());
    let mut skipped = 0usize;
    for name in &names {
        match index_document(name, cfg) {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                tracing::warn!(error = %err, "skipping document");
            }
        }
    }

    let created = time::OffsetDateTime::now_utc().format(&Rfc3339)?;
    let doc = assemble_index(records, cfg, created);
    tracing::info!(files = doc.files.len(), skipped, keywords = doc.keyword_index.len(), "index assembled");
    Ok(doc)
}

/// Aggregate records (in processing order) into the final document.
pub fn assemble_index(mut records: Vec<DocumentRecord>, cfg: &IndexerConfig, created: String) -> IndexDocument {
    let keyword_index = build_keyword_index(&records);
    if cfg.sort_by_title {
        sort_by_display_title(&mut records);
    }
    let metadata = IndexMetadata {
        created,
        description: cfg.description.clone(),
        version: cfg.version.clone(),
        total_files: records.len(),
    };
    IndexDocument { files: records, keyword_index, metadata }
}

/// Inverted keyword -> documents mapping; rank is the 1-based list position.
pub fn build_keyword_index(records: &[DocumentRecord]) -> BTreeMap<String, Vec<KeywordRef>> {
    let mut index: BTreeMap<String, Vec<KeywordRef>> = BTreeMap::new();
    for record in records {
        for (pos, keyword) in record.keywords.iter().enumerate() {
            index.entry(keyword.clone()).or_default().push(KeywordRef {
                file_id: record.file_id.clone(),
                title: record.title.clone(),
                rank: pos as u32 + 1,
            });
        }
    }
    index
}

pub fn display_title(record: &DocumentRecord) -> &str {
    if record.title.trim().is_empty() { &record.file_id } else { &record.title }
}

/// Accent- and case-insensitive sort key, so "Ética" sorts next to "etica".
pub fn collation_key(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn compare_titles(a: &DocumentRecord, b: &DocumentRecord) -> Ordering {
    let (ta, tb) = (display_title(a), display_title(b));
    collation_key(ta)
        .cmp(&collation_key(tb))
        .then_with(|| ta.cmp(tb))
        .then_with(|| a.file_id.cmp(&b.file_id))
}

pub fn sort_by_display_title(records: &mut [DocumentRecord]) {
    records.sort_by(compare_titles);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub file_id: String,
    pub title: String,
    pub path: String,
    pub score: u32,
}

impl IndexDocument {
    pub fn file(&self, file_id: &str) -> Option<&DocumentRecord> {
        self.files.iter().find(|f| f.file_id == file_id)
    }

    /// Bucket for one keyword; empty when the keyword is not indexed.
    pub fn lookup(&self, keyword: &str) -> &[KeywordRef] {
        self.keyword_index.get(&normalize_term(keyword)).map_or(&[][..], Vec::as_slice)
    }

    /// Position-only scoring: each matched query term adds `MAX_KEYWORDS + 1 - rank`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let mut seen = HashSet::new();
        let mut scores: HashMap<&str, u32> = HashMap::new();
        for (term, _) in tokenize(query) {
            if !seen.insert(term.clone()) { continue; }
            for entry in self.keyword_index.get(&term).map_or(&[][..], Vec::as_slice) {
                let weight = (MAX_KEYWORDS as u32 + 1).saturating_sub(entry.rank);
                *scores.entry(entry.file_id.as_str()).or_insert(0) += weight;
            }
        }

        let mut hits: Vec<SearchHit> = scores
            .into_iter()
            .filter_map(|(id, score)| {
                self.file(id).map(|f| SearchHit {
                    file_id: f.file_id.clone(),
                    title: f.title.clone(),
                    path: f.path.clone(),
                    score,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.file_id.cmp(&b.file_id)));
        hits.truncate(limit);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, keywords: &[&str]) -> DocumentRecord {
        DocumentRecord {
            file_id: id.into(),
            title: title.into(),
            description: String::new(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            update_date: None,
            path: format!("pildoras/{id}.html"),
        }
    }

    #[test]
    fn keyword_ranks_are_one_based() {
        let idx = build_keyword_index(&[record("ssh", "SSH", &["ssh", "tunnel"]), record("vpn", "VPN", &["tunnel"])]);
        assert_eq!(idx["ssh"], vec![KeywordRef { file_id: "ssh".into(), title: "SSH".into(), rank: 1 }]);
        let tunnel: Vec<(&str, u32)> = idx["tunnel"].iter().map(|r| (r.file_id.as_str(), r.rank)).collect();
        assert_eq!(tunnel, vec![("ssh", 2), ("vpn", 1)]);
    }

    #[test]
    fn sorts_ignoring_accents_and_case() {
        let mut recs = vec![record("z", "Zeta", &[]), record("e", "Ética", &[]), record("b", "bastionado", &[]), record("x", "", &[])];
        sort_by_display_title(&mut recs);
        let ids: Vec<&str> = recs.iter().map(|r| r.file_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "e", "x", "z"]);
    }

    #[test]
    fn assemble_counts_files_and_keeps_bucket_order() {
        let cfg = IndexerConfig::default();
        let doc = assemble_index(
            vec![record("b", "Zulu", &["red"]), record("a", "Alpha", &["red"])],
            &cfg,
            "2026-01-01T00:00:00Z".into(),
        );
        assert_eq!(doc.metadata.total_files, 2);
        assert_eq!(doc.files[0].file_id, "a");
        let bucket: Vec<&str> = doc.keyword_index["red"].iter().map(|r| r.file_id.as_str()).collect();
        assert_eq!(bucket, vec!["b", "a"]);
    }

    #[test]
    fn search_scores_by_position() {
        let cfg = IndexerConfig::default();
        let doc = assemble_index(
            vec![record("ssh", "SSH", &["ssh", "tunnel"]), record("vpn", "VPN", &["tunnel", "ssh"])],
            &cfg,
            String::new(),
        );
        let hits = doc.search("SSH", 10);
        assert_eq!(hits[0].file_id, "ssh");
        assert_eq!(hits[0].score, 20);
        assert_eq!(hits[1].score, 19);
        assert_eq!(doc.search("ssh tunnel", 1).len(), 1);
        assert!(doc.search("inexistente", 10).is_empty());
        assert_eq!(doc.lookup(" Tunnel ").len(), 2);
    }
}
