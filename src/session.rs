// File: src/session.rs
use crate::core::engine::CandidatePool;
use crate::core::types::Record;
use crate::fuzzy::forms::CanonicalForms;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
    /// Focus was lost; resolution waits until `deadline` so that a click on a
    /// dropdown option can still land as a selection.
    Blurring { deadline: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// The user picked a record from the list.
    Selected,
    /// Blur found a record whose forms equal the query's and took its value.
    Snapped,
    /// Blur found no exact record; the typed text stays as the value.
    FreeText,
}

/// A value handed back to the owning form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub kind: CommitKind,
    pub value: String,
    /// Pool index of the committed record, if any.
    pub record: Option<usize>,
}

/// Autocomplete state for one input field.
///
/// Owned by exactly one field and driven from one thread; the pool is shared
/// read-only.
pub struct SearchSession<'p, R> {
    pool: &'p CandidatePool<R>,
    display_field: String,
    grace: Duration,
    query: String,
    state: SessionState,
    filtered: Vec<usize>,
}

impl<'p, R: Record> SearchSession<'p, R> {
    pub fn new(pool: &'p CandidatePool<R>, display_field: &str) -> Self {
        Self {
            pool,
            display_field: display_field.to_string(),
            grace: DEFAULT_BLUR_GRACE,
            query: String::new(),
            state: SessionState::Closed,
            filtered: Vec::new(),
        }
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn on_focus(&mut self) {
        trace!(from = ?self.state, "focus");
        self.query.clear();
        self.filtered = (0..self.pool.len()).collect();
        self.state = SessionState::Open;
    }

    pub fn on_type(&mut self, text: &str) {
        self.query = text.to_string();
        self.filtered = self.pool.filter_forms(&CanonicalForms::for_query(text));
        self.state = SessionState::Open;
        trace!(query = %self.query, hits = self.filtered.len(), "type");
    }

    /// Commits the record's display field. Returns `None` for an index
    /// outside the pool.
    pub fn on_select(&mut self, record: usize) -> Option<Commit> {
        let value = self.display_value(record)?;
        trace!(record, value = %value, "select");
        Some(self.close(CommitKind::Selected, value, Some(record)))
    }

    /// Starts the grace period. A selection or focus before it ends wins.
    pub fn on_blur(&mut self, now: Instant) {
        if self.state == SessionState::Open {
            self.state = SessionState::Blurring {
                deadline: now + self.grace,
            };
            trace!(query = %self.query, "blur pending");
        }
    }

    /// Resolves a pending blur once its grace period has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Commit> {
        match self.state {
            SessionState::Blurring { deadline } if now >= deadline => self.resolve_blur(),
            _ => None,
        }
    }

    /// Resolves a pending blur immediately: snap to the first record, in pool
    /// order, with an exact form match, or keep the typed text.
    pub fn resolve_blur(&mut self) -> Option<Commit> {
        if !matches!(self.state, SessionState::Blurring { .. }) {
            return None;
        }
        let query = CanonicalForms::for_query(&self.query);
        let snapped = self
            .pool
            .find_exact(&query)
            .and_then(|index| self.display_value(index).map(|value| (index, value)));
        Some(match snapped {
            Some((index, value)) => {
                debug!(query = %self.query, value = %value, record = index, "snapped to record");
                self.close(CommitKind::Snapped, value, Some(index))
            }
            None => {
                let value = self.query.clone();
                self.close(CommitKind::FreeText, value, None)
            }
        })
    }

    fn display_value(&self, record: usize) -> Option<String> {
        self.pool
            .get(record)
            .map(|r| r.field(&self.display_field).unwrap_or_default().to_string())
    }

    fn close(&mut self, kind: CommitKind, value: String, record: Option<usize>) -> Commit {
        self.query = value.clone();
        self.filtered.clear();
        self.state = SessionState::Closed;
        Commit { kind, value, record }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != SessionState::Closed
    }

    /// Pool indices of the current candidates, in pool order.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered(&self) -> impl Iterator<Item = &'p R> + '_ {
        let pool = self.pool;
        self.filtered.iter().filter_map(move |&i| pool.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{FieldRecord, FormStage};
    use crate::fuzzy::matcher::exact_match_stages;

    fn pool() -> CandidatePool<FieldRecord> {
        CandidatePool::new(
            vec![
                FieldRecord::new().with("name", "Saravanan"),
                FieldRecord::new().with("name", "முருகன்"),
                FieldRecord::new().with("name", "murukan"),
            ],
            &["name"],
        )
    }

    #[test]
    fn focus_opens_with_whole_pool() {
        let pool = pool();
        let mut session = SearchSession::new(&pool, "name");
        assert_eq!(session.state(), SessionState::Closed);
        session.on_focus();
        assert!(session.is_open());
        assert_eq!(session.filtered_indices(), &[0, 1, 2]);
    }

    #[test]
    fn typing_filters_in_pool_order() {
        let pool = pool();
        let mut session = SearchSession::new(&pool, "name");
        session.on_focus();
        session.on_type("muru");
        assert_eq!(session.filtered_indices(), &[1, 2]);
        assert_eq!(session.query(), "muru");
    }

    #[test]
    fn select_commits_display_field_and_closes() {
        let pool = pool();
        let mut session = SearchSession::new(&pool, "name");
        session.on_focus();
        session.on_type("sara");
        let commit = session.on_select(0).unwrap();
        assert_eq!(commit.kind, CommitKind::Selected);
        assert_eq!(commit.value, "Saravanan");
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.on_select(99).is_none());
    }

    #[test]
    fn selection_during_grace_period_beats_blur() {
        let pool = pool();
        let mut session = SearchSession::new(&pool, "name");
        let t0 = Instant::now();
        session.on_focus();
        session.on_type("sara");
        session.on_blur(t0);
        let commit = session.on_select(0).unwrap();
        assert_eq!(commit.kind, CommitKind::Selected);
        assert_eq!(session.poll(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn blur_waits_for_grace_then_keeps_free_text() {
        let pool = pool();
        let mut session = SearchSession::new(&pool, "name").with_grace(Duration::from_millis(100));
        let t0 = Instant::now();
        session.on_focus();
        session.on_type("Kumar");
        session.on_blur(t0);
        assert_eq!(session.poll(t0 + Duration::from_millis(50)), None);
        let commit = session.poll(t0 + Duration::from_millis(100)).unwrap();
        assert_eq!(commit.kind, CommitKind::FreeText);
        assert_eq!(commit.value, "Kumar");
        assert!(!session.is_open());
    }

    #[test]
    fn focus_supersedes_pending_blur() {
        let pool = pool();
        let mut session = SearchSession::new(&pool, "name");
        let t0 = Instant::now();
        session.on_focus();
        session.on_type("Kumar");
        session.on_blur(t0);
        session.on_focus();
        assert_eq!(session.poll(t0 + Duration::from_secs(5)), None);
        assert_eq!(session.state(), SessionState::Open);
    }

    #[test]
    fn blur_snaps_to_first_exact_record() {
        let pool = pool();
        let mut session = SearchSession::new(&pool, "name");
        session.on_focus();
        session.on_type("Murugan");
        session.on_blur(Instant::now());
        let commit = session.resolve_blur().unwrap();
        assert_eq!(commit.kind, CommitKind::Snapped);
        // முருகன் latinizes to "murukan" and comes first in the pool.
        assert_eq!(commit.record, Some(1));
        assert_eq!(commit.value, "முருகன்");
    }

    #[test]
    fn blur_snaps_on_consonant_skeleton() {
        let pool = pool();
        let mut session = SearchSession::new(&pool, "name");
        session.on_focus();
        session.on_type("mrgn");
        session.on_blur(Instant::now());
        let commit = session.resolve_blur().unwrap();
        assert_eq!(commit.kind, CommitKind::Snapped);
        assert_eq!(commit.record, Some(1));
        let (_, stored_stage) = exact_match_stages(
            &CanonicalForms::for_query("mrgn"),
            &CanonicalForms::for_record("முருகன்"),
        )
        .unwrap();
        assert_eq!(stored_stage, FormStage::Skeleton);
    }
}
