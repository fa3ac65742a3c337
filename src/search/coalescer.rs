//! Single-flight similarity search with one trailing rerun
//!
//! At most one search is outstanding. Triggers that arrive while a search is
//! in flight collapse into a single rerun, started as soon as the in-flight
//! search completes and using whatever the input is at that moment.
//!
//! ```text
//! Idle --trigger--> InFlight
//! InFlight --trigger--> InFlightRerunQueued
//! InFlightRerunQueued --trigger--> InFlightRerunQueued
//! InFlight --complete--> Idle
//! InFlightRerunQueued --complete--> Idle --trigger--> InFlight
//! ```
//!
//! The coalescer does no I/O. Callers issue the search for every
//! [`SearchRequest`] it hands back and report each completion exactly once,
//! whether the search succeeded or failed.

/// Where the coalescer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    InFlight,
    InFlightRerunQueued,
}

impl SearchState {
    pub fn label(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::InFlight => "searching",
            SearchState::InFlightRerunQueued => "searching (+1 queued)",
        }
    }
}

/// A search the caller must start now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Sequence number, 1 for the first search issued.
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Default)]
pub struct SimilarityCoalescer {
    state: SearchState,
    issued: u64,
}

impl SimilarityCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a search of `query`.
    ///
    /// Returns the request to issue when the coalescer was idle. Otherwise a
    /// rerun is owed and `None` is returned; any number of triggers while busy
    /// owe exactly one rerun.
    pub fn trigger(&mut self, query: &str) -> Option<SearchRequest> {
        match self.state {
            SearchState::Idle => {
                self.state = SearchState::InFlight;
                self.issued += 1;
                tracing::debug!(seq = self.issued, query, "similarity search started");
                Some(SearchRequest {
                    seq: self.issued,
                    query: query.to_string(),
                })
            }
            SearchState::InFlight | SearchState::InFlightRerunQueued => {
                if self.state == SearchState::InFlight {
                    tracing::trace!(seq = self.issued, "rerun queued behind in-flight search");
                }
                self.state = SearchState::InFlightRerunQueued;
                None
            }
        }
    }

    /// Record that the in-flight search finished (successfully or not).
    ///
    /// `live_query` is the input as it is now. If a rerun was owed it is
    /// started immediately with that query and returned.
    pub fn complete(&mut self, live_query: &str) -> Option<SearchRequest> {
        match self.state {
            SearchState::Idle => {
                tracing::warn!("search completion reported while no search was in flight");
                None
            }
            SearchState::InFlight => {
                self.state = SearchState::Idle;
                None
            }
            SearchState::InFlightRerunQueued => {
                self.state = SearchState::Idle;
                self.trigger(live_query)
            }
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state != SearchState::Idle
    }

    /// Total number of searches handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Sequence number of the search currently in flight.
    pub fn in_flight_seq(&self) -> Option<u64> {
        self.is_busy().then_some(self.issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives a coalescer against a fake transport where every issued search
    /// stays outstanding until the test completes it.
    #[derive(Default)]
    struct Harness {
        coalescer: SimilarityCoalescer,
        input: String,
        outstanding: Vec<SearchRequest>,
        started: Vec<SearchRequest>,
        max_outstanding: usize,
    }

    impl Harness {
        fn issue(&mut self, request: Option<SearchRequest>) {
            if let Some(request) = request {
                self.started.push(request.clone());
                self.outstanding.push(request);
                self.max_outstanding = self.max_outstanding.max(self.outstanding.len());
            }
        }

        fn type_text(&mut self, text: &str) {
            self.input = text.to_string();
            let request = self.coalescer.trigger(&self.input);
            self.issue(request);
        }

        fn finish_oldest(&mut self) -> SearchRequest {
            let done = self.outstanding.remove(0);
            let rerun = self.coalescer.complete(&self.input);
            self.issue(rerun);
            done
        }
    }

    #[test]
    fn test_idle_trigger_starts_search() {
        let mut c = SimilarityCoalescer::new();
        assert_eq!(c.state(), SearchState::Idle);
        let req = c.trigger("ab").unwrap();
        assert_eq!(req, SearchRequest { seq: 1, query: "ab".into() });
        assert_eq!(c.state(), SearchState::InFlight);
        assert_eq!(c.in_flight_seq(), Some(1));
    }

    #[test]
    fn test_trigger_while_busy_queues_rerun() {
        let mut c = SimilarityCoalescer::new();
        c.trigger("a");
        assert!(c.trigger("ab").is_none());
        assert_eq!(c.state(), SearchState::InFlightRerunQueued);
        assert!(c.trigger("abc").is_none());
        assert_eq!(c.state(), SearchState::InFlightRerunQueued);
        assert_eq!(c.issued(), 1);
    }

    #[test]
    fn test_completion_without_triggers_goes_idle() {
        let mut c = SimilarityCoalescer::new();
        c.trigger("a");
        assert!(c.complete("a").is_none());
        assert_eq!(c.state(), SearchState::Idle);
        assert_eq!(c.issued(), 1);
        assert_eq!(c.in_flight_seq(), None);
    }

    #[test]
    fn test_completion_with_queued_rerun_uses_live_query() {
        let mut c = SimilarityCoalescer::new();
        c.trigger("a");
        c.trigger("ab");
        let rerun = c.complete("abcd").unwrap();
        assert_eq!(rerun, SearchRequest { seq: 2, query: "abcd".into() });
        assert_eq!(c.state(), SearchState::InFlight);
    }

    #[test]
    fn test_completion_while_idle_is_ignored() {
        let mut c = SimilarityCoalescer::new();
        assert!(c.complete("x").is_none());
        assert_eq!(c.state(), SearchState::Idle);
        assert_eq!(c.issued(), 0);
    }

    #[test]
    fn test_no_overlap_under_keystroke_bursts() {
        let mut h = Harness::default();
        let text = "how do i reverse a linked list";
        for (i, _) in text.char_indices() {
            h.type_text(&text[..=i]);
            if i % 7 == 6 {
                h.finish_oldest();
            }
        }
        while !h.outstanding.is_empty() {
            h.finish_oldest();
        }
        assert_eq!(h.max_outstanding, 1);
        assert_eq!(h.coalescer.state(), SearchState::Idle);
        // The last search always reflects the final input.
        assert_eq!(h.started.last().unwrap().query, text);
    }

    #[test]
    fn test_exactly_one_rerun_for_many_triggers() {
        for n in [1usize, 2, 50] {
            let mut h = Harness::default();
            h.type_text("q");
            for i in 0..n {
                h.type_text(&format!("q{}", i));
            }
            h.finish_oldest();
            assert_eq!(h.started.len(), 2, "n = {}", n);
            assert_eq!(h.started[1].query, format!("q{}", n - 1));
            h.finish_oldest();
            assert_eq!(h.started.len(), 2);
            assert_eq!(h.coalescer.state(), SearchState::Idle);
        }
    }

    #[test]
    fn test_fifty_triggers_behave_like_one() {
        let mut once = Harness::default();
        once.type_text("x");
        once.type_text("xy");
        once.finish_oldest();

        let mut many = Harness::default();
        many.type_text("x");
        for _ in 0..50 {
            many.type_text("xy");
        }
        many.finish_oldest();

        assert_eq!(once.started, many.started);
        assert_eq!(once.coalescer.state(), many.coalescer.state());
    }

    #[test]
    fn test_no_spurious_rerun() {
        let mut h = Harness::default();
        h.type_text("x");
        h.finish_oldest();
        assert_eq!(h.started.len(), 1);
        assert!(h.outstanding.is_empty());
    }

    #[test]
    fn test_rerun_survives_a_failing_search() {
        // Completion does not care about the outcome, so a failed search
        // releases the coalescer and still runs the owed rerun.
        let mut c = SimilarityCoalescer::new();
        c.trigger("x");
        c.trigger("xy");
        let rerun = c.complete("xy");
        assert!(rerun.is_some());
        assert!(c.complete("xy").is_none());
        let fresh = c.trigger("x").unwrap();
        assert_eq!(fresh.seq, 3);
    }

    #[test]
    fn test_triggers_during_rerun_queue_another() {
        let mut h = Harness::default();
        h.type_text("a");
        h.type_text("ab");
        h.finish_oldest();
        h.type_text("abc");
        assert_eq!(h.coalescer.state(), SearchState::InFlightRerunQueued);
        h.finish_oldest();
        h.finish_oldest();
        let queries: Vec<&str> = h.started.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["a", "ab", "abc"]);
        assert_eq!(h.max_outstanding, 1);
    }
}
