//! Byte-oriented file handles consumed by detectors and parsers.
//!
//! A handle is a seekable, sized, random-access byte source that can be
//! duplicated into an independent cursor over the same bytes. The core
//! never writes through a handle.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::RomError;

/// A duplicable, seekable, sized byte source.
///
/// Use [`Seek::rewind`] to return to offset 0.
pub trait RomHandle: Read + Seek + Send {
    /// Open a new handle over the same bytes with its own cursor.
    fn duplicate(&self) -> Result<Box<dyn RomHandle>, RomError>;

    /// Total byte length of the underlying data.
    fn size(&self) -> Result<u64, RomError>;

    /// Seek to `offset` and read up to `buf.len()` bytes.
    ///
    /// Returns the number of bytes read, which is short only at end of file.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, RomError> {
        self.seek(SeekFrom::Start(offset))?;
        let mut total = 0;
        while total < buf.len() {
            match self.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(total)
    }
}

// ---------------------------------------------------------------------------
// Filesystem handle
// ---------------------------------------------------------------------------

/// Handle over a file on disk.
///
/// Duplicates reopen the path so each copy seeks independently.
#[derive(Debug)]
pub struct FileHandle {
    file: File,
    path: PathBuf,
}

impl FileHandle {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RomError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for FileHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl RomHandle for FileHandle {
    fn duplicate(&self) -> Result<Box<dyn RomHandle>, RomError> {
        let file = File::open(&self.path).map_err(|e| {
            RomError::bad_handle(format!("cannot reopen {}: {}", self.path.display(), e))
        })?;
        Ok(Box::new(Self {
            file,
            path: self.path.clone(),
        }))
    }

    fn size(&self) -> Result<u64, RomError> {
        Ok(self.file.metadata()?.len())
    }
}

// ---------------------------------------------------------------------------
// In-memory handle
// ---------------------------------------------------------------------------

/// Handle over shared in-memory bytes.
///
/// Duplicates share the bytes and a read counter, so callers can observe
/// how many `read` calls all copies performed in total.
#[derive(Debug, Clone)]
pub struct MemHandle {
    data: Arc<[u8]>,
    pos: u64,
    reads: Arc<AtomicUsize>,
    duplicable: bool,
}

impl MemHandle {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            reads: Arc::new(AtomicUsize::new(0)),
            duplicable: true,
        }
    }

    /// A handle whose `duplicate` always fails.
    pub fn non_duplicable(data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            duplicable: false,
            ..Self::new(data)
        }
    }

    /// Number of `read` calls made through this handle and its duplicates.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl Read for MemHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let len = self.data.len() as u64;
        if self.pos >= len {
            return Ok(0);
        }
        let start = self.pos as usize;
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for MemHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = self.data.len() as i128;
        let target = match pos {
            SeekFrom::Start(off) => off as i128,
            SeekFrom::End(off) => len + off as i128,
            SeekFrom::Current(off) => self.pos as i128 + off as i128,
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of data",
            ));
        }
        self.pos = target as u64;
        Ok(self.pos)
    }
}

impl RomHandle for MemHandle {
    fn duplicate(&self) -> Result<Box<dyn RomHandle>, RomError> {
        if !self.duplicable {
            return Err(RomError::bad_handle("handle cannot be duplicated"));
        }
        Ok(Box::new(Self {
            pos: 0,
            ..self.clone()
        }))
    }

    fn size(&self) -> Result<u64, RomError> {
        Ok(self.data.len() as u64)
    }
}
