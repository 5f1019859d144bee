use crate::{error::*, *};
use algograph::graph::{QueryableGraph, VertexId};

/// Where the random surfer goes next.
///
/// With probability `damping` the surfer follows one of the links of the
/// current page, chosen uniformly; otherwise it jumps to any page of the
/// corpus. A page without links sends the surfer to a uniformly chosen page,
/// without any damping weighting.
pub struct TransitionModel<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
}

impl<'a, G: QueryableGraph> TransitionModel<'a, G> {
    pub fn new(graph: &'a G, damping: f64) -> Result<Self> {
        check_damping(damping)?;
        check_non_empty(graph.vertex_size())?;
        Ok(Self { graph, damping })
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Distribution of the page visited right after `page`.
    pub fn next(&self, page: VertexId) -> Result<Distribution> {
        if !self.graph.contains_vertex(&page) {
            return Err(Error::InvalidArgument(format!(
                "{page:?} is not a page of the graph"
            )));
        }
        let links = self.graph.out_edges(&page).count();
        if links == 0 {
            return Ok(uniform(self.graph));
        }
        let n = self.graph.vertex_size() as f64;
        let jump = (1.0 - self.damping) / n;
        let unit = self.damping / (links as f64);
        let mut res: Distribution = self.graph.iter_vertices().map(|v| (v, jump)).collect();
        for e in self.graph.out_edges(&page) {
            if let Some(w) = res.get_mut(&e.sink) {
                *w += unit;
            }
        }
        Ok(res)
    }
}

pub fn transition<G: QueryableGraph>(
    graph: &G,
    page: VertexId,
    damping: f64,
) -> Result<Distribution> {
    TransitionModel::new(graph, damping)?.next(page)
}
