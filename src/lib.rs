//! Debug-host inspector for pointer-to-pointer audio sample blocks.
//!
//! Reconstructs typed per-channel views from a block's three header fields
//! and its channel pointer table, then renders each channel as a one-line
//! sparkline next to the raw sample arrays and metadata, for display inside
//! a debugger's variable tree.
pub mod cache;
pub mod error;
pub mod extract;
pub mod host;
pub mod layout;
pub mod sparkline;
pub mod tree;
pub mod view;
pub use cache::{CachedLayout, LayoutCache};
pub use error::PeekError;
pub use host::{BlockHost, ElementType, ScalarField, VecHost};
pub use layout::{channel_offsets, derive_channels, BlockLayout, ChannelSpec};
pub use sparkline::{consecutive_zero_samples, encode, percent_filled, CLIP_TOLERANCE, LEVELS};
pub use tree::{
    parse_child_name, summarize, BlockTree, Child, ChildKind, MetaField, MAX_CHANNELS,
    UNINITIALIZED_MARKER, UNREADABLE_MARKER,
};
pub use view::MemoryView;
