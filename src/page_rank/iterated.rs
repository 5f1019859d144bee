use super::*;
use crate::{error::*, *};
use algograph::graph::{QueryableGraph, VertexId};
use std::collections::HashMap;

/// PageRank by fixed-point iteration.
///
/// Each step recomputes the rank of every page from its incoming links:
///
/// ```text
/// rank'(p) = (1 - damping) / N + damping * sum(rank(q) / out_degree(q)) for q -> p
/// ```
///
/// Pages without links pass their rank on to nobody, so on a corpus with
/// dangling pages the ranks sum to less than 1. The lost mass is not
/// redistributed.
///
/// Iteration stops once no page moved by `tolerance` or more. There is no
/// bound on the number of steps unless `Config::max_iterations` is set.
pub struct IteratedPageRank<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
    tolerance: f64,
    max_iterations: Option<usize>,
    out_degrees: HashMap<VertexId, usize, ahash::RandomState>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub tolerance: f64,
    pub max_iterations: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ranking {
    pub page_rank: Distribution,
    /// Change of every page in the last step.
    pub delta: Distribution,
    pub iterations: usize,
    pub converged: bool,
}

impl<'a, G: QueryableGraph> IteratedPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> Result<Self> {
        check_damping(config.damping)?;
        let tolerance = config.tolerance;
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "tolerance={tolerance}, expected a positive number"
            )));
        }
        check_non_empty(g.vertex_size())?;
        let out_degrees = g
            .iter_vertices()
            .map(|u| (u, g.out_edges(&u).count()))
            .collect();
        Ok(Self {
            graph: g,
            damping: config.damping,
            tolerance,
            max_iterations: config.max_iterations,
            out_degrees,
        })
    }

    /// One application of the update rule to `rank`.
    pub fn step(&self, rank: &Distribution) -> Distribution {
        let n = self.graph.vertex_size() as f64;
        let jump = (1.0 - self.damping) / n;
        self.graph
            .iter_vertices()
            .map(|p| {
                let incoming: f64 = self
                    .graph
                    .in_edges(&p)
                    .map(|e| {
                        let r_q = rank.get(&e.source).copied().unwrap_or(0.0);
                        let l_q = self.out_degrees.get(&e.source).copied().unwrap_or(1);
                        r_q / (l_q as f64)
                    })
                    .sum();
                (p, jump + self.damping * incoming)
            })
            .collect()
    }

    fn single_page(&self) -> Option<Ranking> {
        if self.graph.vertex_size() != 1 {
            return None;
        }
        let v = self.graph.iter_vertices().next()?;
        Some(Ranking {
            page_rank: [(v, 1.0)].into_iter().collect(),
            delta: [(v, 0.0)].into_iter().collect(),
            iterations: 0,
            converged: true,
        })
    }
}

impl<G: QueryableGraph> PageRank for IteratedPageRank<'_, G> {
    type Output = Ranking;

    fn calc(&self, start: &Distribution) -> Result<Self::Output> {
        if let Some(bad) = start.values().find(|w| !w.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "start distribution holds {bad}"
            )));
        }
        // A lone page holds all the rank there is.
        if let Some(res) = self.single_page() {
            return Ok(res);
        }
        let mut p: Distribution = self
            .graph
            .iter_vertices()
            .map(|v| (v, start.get(&v).copied().unwrap_or(0.0)))
            .collect();
        let mut iterations = 0;
        loop {
            let r = self.step(&p);
            iterations += 1;

            let delta: Distribution = r
                .iter()
                .map(|(v, b)| (*v, b - p.get(v).copied().unwrap_or(0.0)))
                .collect();
            let converged = delta.values().all(|d| d.abs() < self.tolerance);
            tracing::trace!(iterations, max_delta = max_abs_diff(&r, &p), "page rank step");

            let exhausted = self.max_iterations.is_some_and(|m| iterations >= m);
            if converged || exhausted {
                tracing::debug!(
                    pages = self.graph.vertex_size(),
                    iterations,
                    converged,
                    mass = norm_1(&r),
                    "iterated page rank"
                );
                return Ok(Ranking {
                    page_rank: r,
                    delta,
                    iterations,
                    converged,
                });
            }
            p = r;
        }
    }
}

impl PageRankResult for Ranking {
    fn page_rank(&self) -> &Distribution {
        &self.page_rank
    }

    fn into_page_rank(self) -> Distribution {
        self.page_rank
    }

    fn debug<'a, G: QueryableGraph>(&'a self, graph: &'a G) -> impl std::fmt::Debug + 'a {
        RankingDebug {
            graph,
            ranking: self,
        }
    }
}

pub struct RankingDebug<'a, G: QueryableGraph> {
    graph: &'a G,
    ranking: &'a Ranking,
}

impl<G: QueryableGraph> std::fmt::Debug for RankingDebug<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.iter_vertices() {
            let p = self.ranking.page_rank.get(&v).copied().unwrap_or(0.0);
            let d = self.ranking.delta.get(&v).copied().unwrap_or(0.0);
            writeln!(f, "{v:?}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}

/// Fixed-point PageRank from a uniform start, without an iteration bound.
pub fn solve<G: QueryableGraph>(graph: &G, damping: f64, tolerance: f64) -> Result<Distribution> {
    let config = Config {
        damping,
        tolerance,
        max_iterations: None,
    };
    let ipr = IteratedPageRank::new(graph, &config)?;
    Ok(ipr.calc(&uniform(graph))?.into_page_rank())
}
