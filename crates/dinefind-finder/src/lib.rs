//! Restaurant discovery pipeline.
//!
//! Rewrites the user's query through an optional completion endpoint, runs a
//! places text search, fetches details for every candidate with a bounded
//! worker limit, ranks and annotates the survivors, and folds everything into
//! one [`SearchOutcome`]. "No results" is a valid outcome; only provider or
//! transport faults escape as [`FinderError`].

pub mod analysis;
pub mod completion;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod recommend;
pub mod retry;
pub mod types;

pub use analysis::{analyze, score_for};
pub use completion::CompletionClient;
pub use error::{CompletionError, FinderError};
pub use normalizer::QueryNormalizer;
pub use pipeline::RestaurantFinder;
pub use recommend::Recommender;
pub use retry::retry_with_backoff;
pub use types::{AnalysisResult, FinderSettings, SearchOutcome, SearchQuery, SearchStrategy};
