use crate::LinkGraph;
use quickcheck::{Arbitrary, Gen};

/// A small non-empty corpus with random links, dangling pages included.
#[derive(Debug, Clone)]
pub struct RandomGraph {
    pub graph: LinkGraph<u8>,
}

impl Arbitrary for RandomGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        const N: usize = 10;

        let n = usize::arbitrary(g) % N + 1;
        let links: Vec<(u8, Vec<u8>)> = (0..n)
            .map(|u| {
                let degree = usize::arbitrary(g) % n;
                let targets = (0..degree).map(|_| (usize::arbitrary(g) % n) as u8).collect();
                (u as u8, targets)
            })
            .collect();
        Self {
            graph: LinkGraph::pruned(links),
        }
    }
}
