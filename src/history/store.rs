use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::history::HistoryError;
use crate::models::SearchRecord;

/// Append-only store of past searches.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Persist a new record. The store assigns `id` and `created_at`.
    async fn save(&self, query: &str, results: &str) -> Result<SearchRecord, HistoryError>;

    /// Up to `limit` records, most recent first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<SearchRecord>, HistoryError>;
}

#[derive(Default)]
struct RecordLog {
    records: Vec<SearchRecord>,
}

impl RecordLog {
    fn next_record(&self, query: &str, results: &str) -> SearchRecord {
        let id = self.records.last().map_or(1, |r| r.id + 1);
        SearchRecord {
            id,
            query: query.to_string(),
            results: results.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Only the returned records are cloned.
    fn recent(&self, limit: usize) -> Vec<SearchRecord> {
        let mut newest: Vec<&SearchRecord> = self.records.iter().collect();
        newest.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        newest.into_iter().take(limit).cloned().collect()
    }
}

/// Volatile store, for tests and throwaway instances.
#[derive(Default)]
pub struct MemoryStore {
    log: RwLock<RecordLog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchStore for MemoryStore {
    async fn save(&self, query: &str, results: &str) -> Result<SearchRecord, HistoryError> {
        let mut log = self.log.write();
        let record = log.next_record(query, results);
        log.records.push(record.clone());
        Ok(record)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<SearchRecord>, HistoryError> {
        Ok(self.log.read().recent(limit))
    }
}

/// Store backed by a JSON Lines file: one record per line, each save
/// appends a single line.
pub struct JsonLinesStore {
    log: Arc<RwLock<RecordLog>>,
    persist_path: PathBuf,
}

impl JsonLinesStore {
    pub fn open_or_create(path: &Path) -> Result<Self, HistoryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut records = Vec::new();
        if path.exists() {
            let data = std::fs::read_to_string(path)?;
            for line in data.lines().filter(|l| !l.trim().is_empty()) {
                records.push(serde_json::from_str::<SearchRecord>(line)?);
            }
        }

        Ok(Self {
            log: Arc::new(RwLock::new(RecordLog { records })),
            persist_path: path.to_path_buf(),
        })
    }

    pub fn len(&self) -> usize {
        self.log.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn append_line(path: &Path, record: &SearchRecord) -> Result<(), HistoryError> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

#[async_trait]
impl SearchStore for JsonLinesStore {
    async fn save(&self, query: &str, results: &str) -> Result<SearchRecord, HistoryError> {
        let log = Arc::clone(&self.log);
        let path = self.persist_path.clone();
        let query = query.to_string();
        let results = results.to_string();

        // The lock keeps ids and file order in step; the write is one line
        tokio::task::spawn_blocking(move || {
            let mut log = log.write();
            let record = log.next_record(&query, &results);
            append_line(&path, &record)?;
            log.records.push(record.clone());
            Ok(record)
        })
        .await?
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<SearchRecord>, HistoryError> {
        Ok(self.log.read().recent(limit))
    }
}
