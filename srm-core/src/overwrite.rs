//! Multi-pass overwrite engine.
//!
//! Each pass writes one pattern from offset 0 to the original end of file
//! in bounded chunks, then forces a durability barrier before the next pass
//! starts. Pass `n` uses `DEFAULT_SEQUENCE[n % 5]`.

use std::fs::{File, OpenOptions};
use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::path::Path;

use crate::errors::{SrmError, SrmResult};
use crate::patterns::{kind_for_pass, OverwritePatternKind, PatternGenerator};

/// Upper bound on the buffer held in memory while streaming a pass.
pub const OVERWRITE_CHUNK_SIZE: usize = 1024 * 1024;

/// A sink that can force written data to stable storage.
pub trait DurableSink: Write + Seek {
    fn barrier(&mut self) -> io::Result<()>;
}

impl DurableSink for File {
    fn barrier(&mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_all()
    }
}

impl DurableSink for Cursor<Vec<u8>> {
    fn barrier(&mut self) -> io::Result<()> {
        self.flush()
    }
}

/// Writes `passes` full-length pattern passes over a sink.
#[derive(Debug, Clone)]
pub struct OverwriteEngine {
    passes: u32,
    chunk_size: usize,
}

impl OverwriteEngine {
    pub fn new(passes: u32) -> Self {
        Self {
            passes,
            chunk_size: OVERWRITE_CHUNK_SIZE,
        }
    }

    /// Overrides the chunk size (clamped to at least one byte).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Opens `path` for writing (no truncation) and overwrites its full
    /// current length. Returns the number of bytes written across all passes.
    pub fn overwrite_file(&self, path: &Path) -> SrmResult<u64> {
        let mut file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| SrmError::io(path, e))?;
        let len = file.metadata().map_err(|e| SrmError::io(path, e))?.len();
        self.overwrite(&mut file, len).map_err(|e| SrmError::io(path, e))
    }

    /// Overwrites the first `len` bytes of `sink` once per pass.
    pub fn overwrite<S: DurableSink + ?Sized>(&self, sink: &mut S, len: u64) -> io::Result<u64> {
        let mut generator = PatternGenerator::new();
        let buf_len = usize::try_from(len).map_or(self.chunk_size, |l| l.min(self.chunk_size));
        let mut buf = vec![0u8; buf_len];
        let mut written = 0u64;

        for pass in 0..self.passes as usize {
            let kind = kind_for_pass(pass);
            written += write_pass(sink, &mut generator, &mut buf, kind, len)?;
            sink.barrier()?;
            log::trace!("Pass {}/{} ({}) complete.", pass + 1, self.passes, kind);
        }
        Ok(written)
    }
}

fn write_pass<S: DurableSink + ?Sized>(
    sink: &mut S,
    generator: &mut PatternGenerator,
    buf: &mut [u8],
    kind: OverwritePatternKind,
    len: u64,
) -> io::Result<u64> {
    sink.seek(SeekFrom::Start(0))?;
    let mut offset = 0u64;
    while offset < len {
        let n = usize::try_from(len - offset).map_or(buf.len(), |rem| rem.min(buf.len()));
        let chunk = &mut buf[..n];
        generator.fill(chunk, kind, offset);
        sink.write_all(chunk)?;
        offset += n as u64;
    }
    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the sink contents at every barrier.
    struct RecordingSink {
        inner: Cursor<Vec<u8>>,
        snapshots: Vec<Vec<u8>>,
    }

    impl Write for RecordingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.inner.write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    impl Seek for RecordingSink {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    impl DurableSink for RecordingSink {
        fn barrier(&mut self) -> io::Result<()> {
            self.snapshots.push(self.inner.get_ref().clone());
            Ok(())
        }
    }

    #[test]
    fn test_each_pass_follows_sequence_and_covers_length() {
        let original = vec![0x42u8; 37];
        let mut sink = RecordingSink {
            inner: Cursor::new(original.clone()),
            snapshots: Vec::new(),
        };
        let engine = OverwriteEngine::new(7).with_chunk_size(5);
        let written = engine.overwrite(&mut sink, 37).unwrap();

        assert_eq!(written, 37 * 7);
        assert_eq!(sink.snapshots.len(), 7);
        for (pass, snap) in sink.snapshots.iter().enumerate() {
            assert_eq!(snap.len(), 37, "pass {} must not grow the file", pass);
            match kind_for_pass(pass) {
                OverwritePatternKind::Zeros => assert!(snap.iter().all(|&b| b == 0)),
                OverwritePatternKind::Ones => assert!(snap.iter().all(|&b| b == 0xFF)),
                OverwritePatternKind::Alternating => {
                    for (i, b) in snap.iter().enumerate() {
                        assert_eq!(*b, if i % 2 == 0 { 0xAA } else { 0x55 });
                    }
                }
                OverwritePatternKind::Random => assert_ne!(snap, &original),
            }
        }
    }

    #[test]
    fn test_empty_file_still_hits_barriers() {
        let mut sink = RecordingSink {
            inner: Cursor::new(Vec::new()),
            snapshots: Vec::new(),
        };
        let written = OverwriteEngine::new(3).overwrite(&mut sink, 0).unwrap();
        assert_eq!(written, 0);
        assert_eq!(sink.snapshots.len(), 3);
        assert!(sink.snapshots.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_overwrite_file_keeps_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"plaintext that must vanish").unwrap();

        let engine = OverwriteEngine::new(2);
        engine.overwrite_file(&path).unwrap();

        let after = std::fs::read(&path).unwrap();
        assert_eq!(after.len(), b"plaintext that must vanish".len());
        // Pass index 1 is zeros.
        assert!(after.iter().all(|&b| b == 0));
    }
}
