use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed link graph: {0}")]
    MalformedGraph(String),

    #[error("weighted draw: {0}")]
    Weighted(#[from] rand::distr::weighted::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "damping={damping}, expected a value in (0, 1)"
        )))
    }
}

pub(crate) fn check_non_empty(vertex_size: usize) -> Result<()> {
    if vertex_size > 0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument("the link graph has no pages".into()))
    }
}
