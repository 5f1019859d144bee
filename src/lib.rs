//! PageRank of a small hyperlink corpus, computed twice: by simulating a
//! random surfer and by iterating the PageRank recurrence to a fixed point.

mod error;
pub use self::error::{Error, Result};
mod common;
pub use self::common::*;
mod link_graph;
pub use self::link_graph::LinkGraph;

pub mod crawl;
pub use self::crawl::crawl;
pub mod page_rank;

#[cfg(test)]
mod testing;
