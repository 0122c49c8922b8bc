//! Data pipeline services
//!
//! Leaf to root: the normalizer turns raw feed rows into canonical
//! records, the merge engine reconciles them with the base dataset,
//! and the cache controller decides when any of that happens.

pub mod base_store;
pub mod merge;
pub mod normalizer;
pub mod queries;
pub mod question_cache;
pub mod sheet_feed;
pub mod visit_log;

pub use base_store::JsonBaseStore;
pub use question_cache::{BaseStore, Clock, QuestionCache, QuestionFeed, SystemClock};
pub use sheet_feed::SheetFeed;
pub use visit_log::{VisitCounters, VisitLog};
