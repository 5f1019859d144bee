use super::*;
use crate::{error::*, *};
use algograph::graph::{QueryableGraph, VertexId};
use rand::{
    distr::{weighted::WeightedIndex, Distribution as _},
    Rng,
};
use std::{cell::RefCell, collections::HashMap};

/// Estimates PageRank by simulating a random surfer.
///
/// The surfer starts on a page drawn from the start distribution and takes
/// exactly `samples` steps. Every step counts a visit to the current page and
/// then draws the next page from the [`TransitionModel`] of the current one.
/// The estimate of a page is its share of all visits.
pub struct SampledPageRank<'a, G, R>
where
    G: QueryableGraph,
    R: Rng,
{
    graph: &'a G,
    samples: usize,
    vertices: Vec<VertexId>,
    transitions: Vec<WeightedIndex<f64>>,
    rng: RefCell<R>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ranking {
    pub page_rank: Distribution,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
    pub samples: usize,
}

impl<'a, G: QueryableGraph, R: Rng> SampledPageRank<'a, G, R> {
    pub fn new(g: &'a G, config: &Config, rng: R) -> Result<Self> {
        if config.samples == 0 {
            return Err(Error::InvalidArgument(
                "samples=0, expected a positive sample count".into(),
            ));
        }
        let model = TransitionModel::new(g, config.damping)?;
        // Candidates are laid out in vertex order, so a seeded generator
        // replays the same walk.
        let vertices: Vec<VertexId> = g.iter_vertices().collect();
        let transitions = vertices
            .iter()
            .map(|u| {
                let next = model.next(*u)?;
                let weights = vertices.iter().map(|v| next.get(v).copied().unwrap_or(0.0));
                Ok(WeightedIndex::new(weights)?)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            graph: g,
            samples: config.samples,
            vertices,
            transitions,
            rng: RefCell::new(rng),
        })
    }
}

impl<G: QueryableGraph, R: Rng> PageRank for SampledPageRank<'_, G, R> {
    type Output = Ranking;

    fn calc(&self, start: &Distribution) -> Result<Self::Output> {
        let first = {
            let weights = self
                .vertices
                .iter()
                .map(|v| start.get(v).copied().unwrap_or(0.0));
            WeightedIndex::new(weights).map_err(|e| {
                Error::InvalidArgument(format!("start distribution cannot be drawn from: {e}"))
            })?
        };
        let mut rng = self.rng.borrow_mut();
        let mut visits = vec![0usize; self.vertices.len()];
        let mut cur = first.sample(&mut *rng);
        for _ in 0..self.samples {
            visits[cur] += 1;
            cur = self.transitions[cur].sample(&mut *rng);
        }

        let n = self.samples as f64;
        let page_rank = self
            .vertices
            .iter()
            .zip(visits.iter())
            .map(|(v, k)| (*v, (*k as f64) / n))
            .collect();
        let visits = self.vertices.iter().copied().zip(visits).collect();
        tracing::debug!(
            pages = self.graph.vertex_size(),
            samples = self.samples,
            "sampled page rank"
        );
        Ok(Ranking {
            page_rank,
            visits,
            samples: self.samples,
        })
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
            let k = self.ranking.visits.get(&v).copied().unwrap_or(0);
            writeln!(f, "{v:?}: {p:?}, {k}/{}", self.ranking.samples)?;
        }
        Ok(())
    }
}

/// Random-surfer estimate with a uniformly chosen first page, drawing from
/// the thread-local generator.
pub fn estimate<G: QueryableGraph>(
    graph: &G,
    damping: f64,
    sample_count: usize,
) -> Result<Distribution> {
    estimate_with(graph, damping, sample_count, rand::rng())
}

pub fn estimate_with<G: QueryableGraph, R: Rng>(
    graph: &G,
    damping: f64,
    sample_count: usize,
    rng: R,
) -> Result<Distribution> {
    let config = Config {
        damping,
        samples: sample_count,
    };
    let spr = SampledPageRank::new(graph, &config, rng)?;
    Ok(spr.calc(&uniform(graph))?.into_page_rank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RandomGraph;
    use quickcheck_macros::quickcheck;
    use rand::{rngs::SmallRng, SeedableRng};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(3407)
    }

    #[test]
    fn single_page_gets_everything() {
        let g = LinkGraph::new([("A", vec![])]).unwrap();
        let a = g.vertex(&"A").unwrap();
        let dist = estimate_with(&g, DEFAULT_DAMPING, 17, rng()).unwrap();
        assert_eq!(dist.len(), 1);
        assert_eq!(dist[&a], 1.0);
    }

    #[test]
    fn close_to_iteration_on_two_cycle() {
        let g = LinkGraph::new([("A", vec!["B"]), ("B", vec!["A"])]).unwrap();
        let sampled = estimate_with(&g, 0.85, 10_000, rng()).unwrap();
        let iterated = iterated::solve(&g, 0.85, DEFAULT_TOLERANCE).unwrap();
        for v in g.iter_vertices() {
            assert!((sampled[&v] - iterated[&v]).abs() < 0.02, "{sampled:?} {iterated:?}");
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let g = LinkGraph::new([("A", vec!["B", "C"]), ("B", vec!["C"]), ("C", vec![])]).unwrap();
        let x = estimate_with(&g, 0.85, 1000, rng()).unwrap();
        let y = estimate_with(&g, 0.85, 1000, rng()).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn dangling_sink_attracts_most_visits() {
        let g = LinkGraph::new([("A", vec!["B", "C"]), ("B", vec!["C"]), ("C", vec![])]).unwrap();
        let ranked = g.ranked(&estimate_with(&g, 0.85, 10_000, rng()).unwrap());
        assert!(ranked[&"C"] > ranked[&"B"], "{ranked:?}");
        assert!(ranked[&"B"] > ranked[&"A"], "{ranked:?}");
    }

    #[test]
    fn first_page_follows_start() {
        let g = LinkGraph::new([("A", vec!["B"]), ("B", vec!["A"]), ("C", vec![])]).unwrap();
        let c = g.vertex(&"C").unwrap();
        let start: Distribution = [(c, 1.0)].into_iter().collect();
        let config = Config {
            damping: 0.85,
            samples: 1,
        };
        let spr = SampledPageRank::new(&g, &config, rng()).unwrap();
        let ranking = spr.calc(&start).unwrap();
        assert_eq!(ranking.visits[&c], 1);
        assert_eq!(ranking.page_rank[&c], 1.0);
    }

    #[test]
    fn start_without_mass() {
        let g = LinkGraph::new([("A", vec!["B"]), ("B", vec![])]).unwrap();
        let spr = SampledPageRank::new(&g, &Config::default(), rng()).unwrap();
        let res = spr.calc(&Distribution::default());
        assert!(matches!(res, Err(Error::InvalidArgument(_))), "{res:?}");
    }

    #[test]
    fn zero_samples() {
        let g = LinkGraph::new([("A", vec![])]).unwrap();
        let res = estimate_with(&g, 0.85, 0, rng());
        assert!(matches!(res, Err(Error::InvalidArgument(_))), "{res:?}");
    }

    #[test]
    fn empty_graph() {
        let g = LinkGraph::<&str>::new(Vec::<(&str, Vec<&str>)>::new()).unwrap();
        let res = estimate_with(&g, 0.85, 10, rng());
        assert!(matches!(res, Err(Error::InvalidArgument(_))), "{res:?}");
    }

    #[test]
    fn bad_damping() {
        let g = LinkGraph::new([("A", vec![])]).unwrap();
        let res = estimate_with(&g, 1.0, 10, rng());
        assert!(matches!(res, Err(Error::InvalidArgument(_))), "{res:?}");
    }

    #[quickcheck]
    fn visits_are_whole_samples(g: RandomGraph, samples: u8, seed: u64) {
        let g = &g.graph;
        let samples = usize::from(samples) + 1;
        let config = Config {
            damping: DEFAULT_DAMPING,
            samples,
        };
        let spr = SampledPageRank::new(g, &config, SmallRng::seed_from_u64(seed)).unwrap();
        let ranking = spr.calc(&uniform(g)).unwrap();
        assert_eq!(ranking.page_rank.len(), g.vertex_size());
        assert_eq!(ranking.visits.values().sum::<usize>(), samples);
        for (v, p) in ranking.page_rank.iter() {
            let k = ranking.visits[v];
            assert_eq!(*p, (k as f64) / (samples as f64));
        }
        assert!((norm_1(&ranking.page_rank) - 1.0).abs() < 1e-9);
    }
}
