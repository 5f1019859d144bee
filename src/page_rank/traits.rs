use crate::{Distribution, Result};
use algograph::graph::*;

pub trait PageRank {
    type Output: PageRankResult;

    /// Runs the algorithm from `start`, the initial distribution over pages.
    fn calc(&self, start: &Distribution) -> Result<Self::Output>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &Distribution;
    fn into_page_rank(self) -> Distribution;
    fn debug<'a, G: QueryableGraph>(&'a self, graph: &'a G) -> impl std::fmt::Debug + 'a;
}
