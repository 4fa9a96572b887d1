//! Session-scoped, append-only log of completed analyses.
//!
//! Insertion order is chronological order. Positions are the only identity:
//! removing an entry shifts every later entry down by one, so callers must
//! re-read indices after a removal.

use thiserror::Error;

use crate::models::analysis::AnalysisRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("History entry {index} does not exist (history has {len} entries)")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Default, Clone)]
pub struct HistoryCache {
    entries: Vec<AnalysisRecord>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its index.
    pub fn append(&mut self, record: AnalysisRecord) -> usize {
        self.entries.push(record);
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&AnalysisRecord, IndexError> {
        let len = self.entries.len();
        self.entries.get(index).ok_or(IndexError { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut AnalysisRecord, IndexError> {
        let len = self.entries.len();
        self.entries.get_mut(index).ok_or(IndexError { index, len })
    }

    /// Removes and returns the record at `index`. Out-of-range leaves the cache untouched.
    pub fn remove(&mut self, index: usize) -> Result<AnalysisRecord, IndexError> {
        if index >= self.entries.len() {
            return Err(IndexError {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.entries.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;

    pub(crate) fn record(job_title: &str) -> AnalysisRecord {
        AnalysisRecord {
            job_title: Some(job_title.to_string()),
            timestamp: Utc::now(),
            job_description: format!("{job_title} description"),
            resume_text: "resume".to_string(),
            key_skills: vec![],
            result_markdown: String::new(),
            elapsed_seconds: 1.0,
            skill_table: None,
            rewritten_resume: None,
        }
    }

    #[test]
    fn test_append_returns_positional_index() {
        let mut cache = HistoryCache::new();
        assert_eq!(cache.append(record("R1")), 0);
        assert_eq!(cache.append(record("R2")), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_remove_middle_keeps_order() {
        let mut cache = HistoryCache::new();
        let (r1, r2, r3) = (record("R1"), record("R2"), record("R3"));
        cache.append(r1.clone());
        cache.append(r2.clone());
        cache.append(r3.clone());

        let removed = cache.remove(1).unwrap();
        assert_eq!(removed, r2);

        let remaining: Vec<_> = cache.iter().cloned().collect();
        assert_eq!(remaining, vec![r1, r3]);
    }

    #[test]
    fn test_get_out_of_range_is_index_error() {
        let mut cache = HistoryCache::new();
        cache.append(record("R1"));
        cache.append(record("R2"));
        assert_eq!(cache.get(5).unwrap_err(), IndexError { index: 5, len: 2 });
    }

    #[test]
    fn test_remove_out_of_range_leaves_entries() {
        let mut cache = HistoryCache::new();
        cache.append(record("R1"));
        assert!(cache.remove(3).is_err());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(0).unwrap().job_title.as_deref(), Some("R1"));
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = HistoryCache::new();
        assert!(cache.is_empty());
        assert!(cache.get(0).is_err());
    }
}
