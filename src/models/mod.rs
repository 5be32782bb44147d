pub mod climate;
pub mod cost;
pub mod crop;
pub mod farm;
pub mod pest;
pub mod score;

pub use climate::*;
pub use cost::*;
pub use crop::*;
pub use farm::*;
pub use pest::*;
pub use score::*;
