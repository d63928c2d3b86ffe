mod clock;
mod orchestrator;
mod retry;

pub use orchestrator::{Recommendation, Recommender};
