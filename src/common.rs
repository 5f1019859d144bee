use algograph::graph::*;
use std::collections::HashMap;

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_SAMPLES: usize = 10_000;
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Probability mass per page.
pub type Distribution = HashMap<VertexId, f64, ahash::RandomState>;

pub fn uniform<G: QueryableGraph>(graph: &G) -> Distribution {
    let n = graph.vertex_size() as f64;
    graph.iter_vertices().map(|v| (v, 1.0 / n)).collect()
}

pub fn norm_1(v: &Distribution) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

/// Largest per-page difference between two distributions over the same pages.
pub fn max_abs_diff(a: &Distribution, b: &Distribution) -> f64 {
    a.iter()
        .map(|(v, x)| (x - b.get(v).copied().unwrap_or(0.0)).abs())
        .fold(0.0, f64::max)
}
