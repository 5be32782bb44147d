pub mod advisor;
pub mod calculations;
pub mod costs;
pub mod factors;
pub mod pests;
pub mod scorer;

pub use advisor::{Advice, Advisor};
pub use scorer::{evaluate, ScoringEngine};
