/// Wipe engine - fill patterns, chunked overwrite and pass sequences
pub mod algorithm;
pub mod overwrite;
pub mod pattern;

pub use algorithm::{PassSpec, WipeAlgorithm};
pub use overwrite::{ChunkedOverwriter, DurableWrite, PassReport, DEFAULT_CHUNK_SIZE};
pub use pattern::{PatternKind, PatternSource};
