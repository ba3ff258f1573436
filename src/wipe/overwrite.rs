/// Chunked, durable in-place overwrite of an open file
use super::pattern::{PatternKind, PatternSource};
use crate::error::{Result, WipeError};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

/// 64 MB chunks keep memory flat regardless of file size
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// A write target that can force its contents to stable storage.
pub trait DurableWrite: Write + Seek {
    /// Flush to the device, not just the OS cache.
    fn sync_durable(&mut self) -> io::Result<()>;
}

impl DurableWrite for File {
    fn sync_durable(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// Result of one completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Hex SHA-256 of every byte written during the pass
    pub digest: String,
    pub bytes_written: u64,
    pub chunks: u64,
}

/// Streams pattern bytes over a file in bounded chunks.
#[derive(Debug, Clone)]
pub struct ChunkedOverwriter {
    chunk_size: usize,
}

impl ChunkedOverwriter {
    /// `chunk_size` of zero is bumped to one byte.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Overwrite `[0, total_len)` of `file` with `pattern`.
    ///
    /// Each chunk is written and synced before the next one is generated, so
    /// at most one chunk of unsynced data exists at any time. The file is
    /// never resized.
    pub fn overwrite_pass<W: DurableWrite>(
        &self,
        file: &mut W,
        total_len: u64,
        pattern: PatternKind,
    ) -> Result<PassReport> {
        file.seek(SeekFrom::Start(0))
            .map_err(|source| WipeError::Seek { offset: 0, source })?;

        let mut patterns = PatternSource::new();
        let mut hasher = Sha256::new();
        // Single buffer reused for every chunk of the pass
        let capacity = usize::try_from(total_len)
            .unwrap_or(usize::MAX)
            .min(self.chunk_size);
        let mut buffer = vec![0u8; capacity];

        let mut offset = 0u64;
        let mut chunks = 0u64;

        while offset < total_len {
            let remaining = total_len - offset;
            let len = usize::try_from(remaining)
                .unwrap_or(usize::MAX)
                .min(self.chunk_size);
            let chunk = &mut buffer[..len];

            patterns.fill(pattern, chunk);
            file.write_all(chunk)
                .map_err(|source| WipeError::Write { offset, source })?;
            file.flush()
                .map_err(|source| WipeError::Sync { offset, source })?;
            file.sync_durable()
                .map_err(|source| WipeError::Sync { offset, source })?;

            hasher.update(&*chunk);
            offset += len as u64;
            chunks += 1;
        }

        Ok(PassReport {
            digest: hex::encode(hasher.finalize()),
            bytes_written: offset,
            chunks,
        })
    }
}

impl Default for ChunkedOverwriter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}
