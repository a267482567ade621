use std::fs::File;
use std::io::{self, Read};
use std::ops::Range;
use std::path::Path;

/// One top-level byte partition of the input file, owned in memory.
/// The trailing chunk may be shorter than its siblings.
pub struct FileChunk {
    index: usize,
    bytes: Vec<u8>,
}

impl FileChunk {
    pub fn new(index: usize, bytes: Vec<u8>) -> FileChunk {
        FileChunk { index, bytes }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Tiles `[0, len)` into `workers + 1` contiguous sub-ranges of equal
    /// nominal width; the last one runs to the end of the chunk and
    /// absorbs the division remainder.
    pub fn subranges(&self, workers: usize) -> Vec<Range<usize>> {
        let workers = workers.max(1);
        let width = self.bytes.len() / workers;
        (0..=workers)
            .map(|i| {
                let start = i * width;
                let end = if i == workers {
                    self.bytes.len()
                } else {
                    (i + 1) * width
                };
                start..end
            })
            .collect()
    }
}

/// Reads a file as `chunks + 1` sequential chunks: `chunks` of
/// `file_len / chunks` bytes each, then one chunk holding the exact
/// remainder so no byte is dropped.
pub struct ChunkReader {
    file: File,
    chunk_size: usize,
    remainder: usize,
    chunks: usize,
    next: usize,
}

impl ChunkReader {
    pub fn open(path: &Path, chunks: usize) -> io::Result<ChunkReader> {
        let chunks = chunks.max(1);
        let file = File::open(path)?;
        let file_len = file.metadata()?.len() as usize;
        let chunk_size = file_len / chunks;
        Ok(ChunkReader {
            file,
            chunk_size,
            remainder: file_len - chunk_size * chunks,
            chunks,
            next: 0,
        })
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn next_chunk(&mut self) -> io::Result<Option<FileChunk>> {
        if self.next > self.chunks {
            return Ok(None);
        }
        let capacity = if self.next == self.chunks {
            self.remainder
        } else {
            self.chunk_size
        };
        let mut bytes = vec![0u8; capacity];
        // The io layer may return short reads; accumulate until the
        // buffer is full or the file ends.
        let mut filled = 0;
        while filled < capacity {
            let read = self.file.read(&mut bytes[filled..])?;
            if read == 0 {
                break;
            }
            filled += read;
        }
        bytes.truncate(filled);
        let chunk = FileChunk::new(self.next, bytes);
        self.next += 1;
        Ok(Some(chunk))
    }
}
