//! In-memory session history. Lives for one CLI session, never written to disk.

use chrono::{Local, Utc};

use crate::api::Application;

const JOB_TITLE_SNIPPET_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Creation time in milliseconds since the Unix epoch.
    pub id: i64,
    pub timestamp: String,
    pub job_title: String,
    pub cover_letter: String,
    pub cv_bullets: Vec<String>,
}

/// Newest entry first.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn record(&mut self, job_description: &str, application: &Application) -> &HistoryEntry {
        let entry = HistoryEntry {
            id: Utc::now().timestamp_millis(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            job_title: job_title_snippet(job_description),
            cover_letter: application.cover_letter.clone(),
            cv_bullets: application.cv_bullets.clone(),
        };
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// 1-based lookup, matching the numbering shown by `history`.
    pub fn get(&self, position: usize) -> Option<&HistoryEntry> {
        position.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First 50 characters of the job description followed by `...`.
pub fn job_title_snippet(job_description: &str) -> String {
    let head: String = job_description.chars().take(JOB_TITLE_SNIPPET_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application(letter: &str) -> Application {
        Application {
            cover_letter: letter.to_string(),
            cv_bullets: vec!["Built things that mattered".to_string(); 7],
        }
    }

    #[test]
    fn test_snippet_takes_first_50_chars() {
        let job = "Senior Rust Engineer - Core Infrastructure - Remote, Europe only";
        assert_eq!(
            job_title_snippet(job),
            "Senior Rust Engineer - Core Infrastructure - Remot..."
        );
    }

    #[test]
    fn test_snippet_of_short_text_still_gets_ellipsis() {
        assert_eq!(job_title_snippet("Rust dev"), "Rust dev...");
    }

    #[test]
    fn test_newest_entry_comes_first() {
        let mut history = SessionHistory::default();
        history.record("First job", &application("letter one"));
        history.record("Second job", &application("letter two"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].job_title, "Second job...");
        assert_eq!(history.get(1).unwrap().cover_letter, "letter two");
        assert_eq!(history.get(2).unwrap().cover_letter, "letter one");
    }

    #[test]
    fn test_get_is_one_based() {
        let mut history = SessionHistory::default();
        history.record("Job", &application("letter"));

        assert!(history.get(0).is_none());
        assert!(history.get(2).is_none());
        assert!(history.get(1).is_some());
    }

    #[test]
    fn test_clear_empties_history() {
        let mut history = SessionHistory::default();
        history.record("Job", &application("letter"));
        history.clear();

        assert!(history.is_empty());
    }
}
