//! Turns a directory of HTML pages into a [`LinkGraph`].

use crate::{LinkGraph, Result};
use algograph::graph::QueryableGraph;
use regex::Regex;
use std::{collections::BTreeSet, fs, path::Path};
use walkdir::WalkDir;

const LINK_PATTERN: &str = r#"<a\s+(?:[^>]*?)href="([^"]*)""#;

/// Reads every `*.html` file directly inside `dir`.
///
/// A page is named by its file name. Its links are the `href` targets of its
/// `<a>` tags that name another page of the same directory.
pub fn crawl(dir: impl AsRef<Path>) -> Result<LinkGraph<String>> {
    let dir = dir.as_ref();
    let link_re = Regex::new(LINK_PATTERN)?;
    let mut pages = vec![];
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }
        let contents = fs::read_to_string(entry.path())?;
        pages.push((name.to_string(), extract_links(&link_re, &contents)));
    }
    let graph = LinkGraph::pruned(pages);
    tracing::debug!(
        dir = %dir.display(),
        pages = graph.len(),
        links = graph.edge_size(),
        "crawled corpus"
    );
    Ok(graph)
}

fn extract_links(re: &Regex, contents: &str) -> BTreeSet<String> {
    re.captures_iter(contents)
        .map(|caps| caps[1].to_string())
        .collect()
}
