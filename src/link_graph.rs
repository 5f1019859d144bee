use crate::{Distribution, Error, Result};
use algograph::graph::*;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt::Debug,
};

/// A closed corpus of pages and the links between them.
///
/// Every link target is a page of the same corpus and no page links to
/// itself. Pages without links ("dangling" pages) are allowed. Vertices are
/// assigned in ascending page order, so iterating the vertices of the graph
/// visits the pages sorted.
///
/// The graph is immutable once built. It implements [`QueryableGraph`], so it
/// can be handed to every ranking algorithm of this crate directly.
#[derive(Debug, Clone)]
pub struct LinkGraph<P> {
    graph: directed::TreeBackedGraph,
    vertices: BTreeMap<P, VertexId>,
    pages: HashMap<VertexId, P, ahash::RandomState>,
}

impl<P: Ord + Clone + Debug> LinkGraph<P> {
    /// Builds a graph from `(page, links)` pairs, rejecting anything that
    /// breaks the corpus invariants.
    pub fn new<I, L>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        L: IntoIterator<Item = P>,
    {
        let mut checked: BTreeMap<P, BTreeSet<P>> = BTreeMap::new();
        for (page, targets) in links {
            if checked.contains_key(&page) {
                return Err(Error::MalformedGraph(format!("duplicate page {page:?}")));
            }
            let targets: BTreeSet<P> = targets.into_iter().collect();
            checked.insert(page, targets);
        }
        for (page, targets) in checked.iter() {
            if targets.contains(page) {
                return Err(Error::MalformedGraph(format!("{page:?} links to itself")));
            }
            if let Some(unknown) = targets.iter().find(|t| !checked.contains_key(*t)) {
                return Err(Error::MalformedGraph(format!(
                    "{page:?} links to {unknown:?}, which is not in the corpus"
                )));
            }
        }
        Ok(Self::build(checked))
    }

    /// Builds a graph from `(page, links)` pairs, dropping self-links and links
    /// to pages outside the corpus. Repeated pages have their links merged.
    pub fn pruned<I, L>(links: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        L: IntoIterator<Item = P>,
    {
        let mut raw: BTreeMap<P, BTreeSet<P>> = BTreeMap::new();
        for (page, targets) in links {
            raw.entry(page).or_default().extend(targets);
        }
        let kept: BTreeMap<P, BTreeSet<P>> = raw
            .iter()
            .map(|(page, targets)| {
                let targets = targets
                    .iter()
                    .filter(|t| *t != page && raw.contains_key(*t))
                    .cloned()
                    .collect();
                (page.clone(), targets)
            })
            .collect();
        Self::build(kept)
    }

    fn build(links: BTreeMap<P, BTreeSet<P>>) -> Self {
        let mut graph = directed::TreeBackedGraph::new();
        let vertices: BTreeMap<P, VertexId> = links
            .keys()
            .map(|page| (page.clone(), graph.add_vertex()))
            .collect();
        for (page, targets) in links.iter() {
            let u = vertices[page];
            for t in targets.iter() {
                graph.add_edge(u, vertices[t]);
            }
        }
        let pages = vertices.iter().map(|(p, v)| (*v, p.clone())).collect();
        Self {
            graph,
            vertices,
            pages,
        }
    }
}

impl<P: Ord> LinkGraph<P> {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, page: &P) -> Option<VertexId> {
        self.vertices.get(page).copied()
    }

    pub fn page(&self, vertex: VertexId) -> Option<&P> {
        self.pages.get(&vertex)
    }

    /// All pages, sorted.
    pub fn pages(&self) -> impl Iterator<Item = &P> + '_ {
        self.vertices.keys()
    }

    /// Pages linked to by `page`, sorted. `None` if `page` is not in the corpus.
    pub fn links(&self, page: &P) -> Option<Vec<&P>> {
        let u = self.vertex(page)?;
        let mut res: Vec<&P> = self
            .graph
            .out_edges(&u)
            .filter_map(|e| self.pages.get(&e.sink))
            .collect();
        res.sort();
        Some(res)
    }

    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.graph.out_edges(&vertex).count()
    }

    /// Maps a distribution back to page names, sorted by page.
    ///
    /// Pages missing from `dist` are reported with `0.0`.
    pub fn ranked(&self, dist: &Distribution) -> BTreeMap<&P, f64> {
        self.vertices
            .iter()
            .map(|(p, v)| (p, dist.get(v).copied().unwrap_or(0.0)))
            .collect()
    }
}

impl<P> QueryableGraph for LinkGraph<P> {
    fn vertex_size(&self) -> usize {
        self.graph.vertex_size()
    }

    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        self.graph.iter_vertices()
    }

    fn contains_vertex(&self, v: &VertexId) -> bool {
        self.graph.contains_vertex(v)
    }

    fn edge_size(&self) -> usize {
        self.graph.edge_size()
    }

    fn iter_edges(&self) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.iter_edges()
    }

    fn contains_edge(&self, e: &EdgeId) -> bool {
        self.graph.contains_edge(e)
    }

    fn find_edge(&self, e: &EdgeId) -> Option<Edge> {
        self.graph.find_edge(e)
    }

    fn edges_connecting(
        &self,
        source: &VertexId,
        sink: &VertexId,
    ) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.edges_connecting(source, sink)
    }

    fn in_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.in_edges(v)
    }

    fn out_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.out_edges(v)
    }
}
