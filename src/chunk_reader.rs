use std::io::{ErrorKind, Read};

// ── ScanWindow ───────────────────────────────────────────────────────────────

/// One search surface: the tail retained from the previous chunk followed by
/// the chunk just read.
#[derive(Debug, Clone)]
pub struct ScanWindow {
    bytes: Vec<u8>,
    offset: u64,
    tail_len: usize,
}

impl ScanWindow {
    /// The window contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Position of the first window byte within the source.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// How many leading bytes were carried over from the previous chunk.
    pub fn tail_len(&self) -> usize {
        self.tail_len
    }

    /// Length of the freshly read part of the window.
    pub fn chunk_len(&self) -> usize {
        self.bytes.len() - self.tail_len
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ── ChunkReader ──────────────────────────────────────────────────────────────

/// Lazily turns a byte source into a finite sequence of [`ScanWindow`]s.
///
/// Each step reads up to `chunk_size` bytes and prepends the last `tail_size`
/// bytes of the previous chunk. The final, possibly empty, chunk is yielded
/// once; after that, or after the first read error, the iterator is exhausted.
///
/// ```
/// use pdfmetascan::ChunkReader;
///
/// let windows: Vec<_> = ChunkReader::new(&b"abcdefgh"[..], 4, 2)
///     .collect::<std::io::Result<_>>()
///     .unwrap();
///
/// assert_eq!(windows[0].bytes(), b"abcd");
/// assert_eq!(windows[1].bytes(), b"cdefgh");
/// assert_eq!(windows[2].bytes(), b"gh");
/// ```
pub struct ChunkReader<R> {
    reader: R,
    buf: Vec<u8>,
    tail: Vec<u8>,
    tail_size: usize,
    position: u64,
    finished: bool,
}

impl<R: Read> ChunkReader<R> {
    /// `chunk_size` must be non-zero; [`crate::ScanConfig::validate`] checks
    /// this before a scanner builds a reader.
    pub fn new(reader: R, chunk_size: usize, tail_size: usize) -> Self {
        Self {
            reader,
            buf: vec![0; chunk_size.max(1)],
            tail: Vec::with_capacity(tail_size),
            tail_size,
            position: 0,
            finished: false,
        }
    }

    /// Bytes consumed from the source so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Fill the chunk buffer until it is full or the source is exhausted.
    fn fill_chunk(&mut self) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.reader.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    /// Keep the last `tail_size` bytes of the chunk just read.
    fn retain_tail(&mut self, chunk_len: usize) {
        let keep = chunk_len.min(self.tail_size);
        self.tail.clear();
        self.tail.extend_from_slice(&self.buf[chunk_len - keep..chunk_len]);
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = std::io::Result<ScanWindow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let n = match self.fill_chunk() {
            Ok(n) => n,
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };

        // A short fill only happens at end of input.
        if n < self.buf.len() {
            self.finished = true;
        }

        let tail_len = self.tail.len();
        let mut bytes = Vec::with_capacity(tail_len + n);
        bytes.extend_from_slice(&self.tail);
        bytes.extend_from_slice(&self.buf[..n]);

        let window = ScanWindow {
            bytes,
            offset: self.position - tail_len as u64,
            tail_len,
        };

        self.position += n as u64;
        self.retain_tail(n);

        Some(Ok(window))
    }
}
