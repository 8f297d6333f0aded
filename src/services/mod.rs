pub mod providers;

pub use providers::{RecommendationProvider, RecommendationRequest};
