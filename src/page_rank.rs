mod traits;
pub use self::traits::*;
mod transition;
pub use self::transition::*;

pub mod iterated;
pub use self::iterated::{solve, IteratedPageRank};
pub mod sampled;
pub use self::sampled::{estimate, estimate_with, SampledPageRank};
