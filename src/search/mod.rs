//! Similarity search coordination: when searches run, and how their
//! candidates get their display text.

pub mod coalescer;
pub mod fanout;

pub use coalescer::{SearchRequest, SearchState, SimilarityCoalescer};
pub use fanout::{Resolution, ResolvedCandidate, SimilarResults};
