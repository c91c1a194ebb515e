use thiserror::Error;
/// Crate-wide error taxonomy. Every failure stays local to the single child
/// or value being computed; nothing here aborts a whole tree.
#[derive(Debug, Error)]
pub enum PeekError {
    #[error("audio block is uninitialized (channel count unreadable or above 16)")]
    Uninitialized,
    #[error("cannot resolve the sample type behind the channel pointer table")]
    TypeResolution,
    #[error("sample read failed at byte offset {offset}")]
    SampleRead { offset: u64 },
    #[error("sparkline requested for a block with zero samples")]
    EmptyInput,
    #[error("no child at index {index}")]
    NoSuchChild { index: usize },
    #[error("invalid layout description: {0}")]
    Layout(#[from] serde_json::Error),
}
