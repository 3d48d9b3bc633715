use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("resource {index} did not become ready within {waited_ms}ms")]
    ResourceUnavailable { index: usize, waited_ms: u64 },
    #[error("resource index {index} out of range (resource count: {count})")]
    InvalidIndex { index: usize, count: usize },
    #[error("{frames} frames per resource does not fit a {columns}x{rows} grid")]
    InvalidGrid {
        frames: usize,
        columns: usize,
        rows: usize,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
