//! Byte sources: where shader text comes from.
//!
//! The loader never touches the filesystem directly. It asks a [`ByteSource`] for the bytes behind a
//! resolved path, so shaders can come from disk, from an archive, or from strings compiled into the binary.

use std::collections::HashMap;
use std::fs;
use std::io;

/// Produce the full contents of a resolved path.
pub trait ByteSource {
    fn read(&mut self, path: &str) -> io::Result<Vec<u8>>;
}

/// Any `FnMut(&str) -> io::Result<Vec<u8>>` closure is a byte source.
impl<F> ByteSource for F
where
    F: FnMut(&str) -> io::Result<Vec<u8>>,
{
    fn read(&mut self, path: &str) -> io::Result<Vec<u8>> {
        self(path)
    }
}

/// Reads paths from the local filesystem, relative to the process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ByteSource for FsSource {
    fn read(&mut self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// In-memory path -> text table, for embedded shaders and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl<K, V> FromIterator<(K, V)> for MemorySource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = MemorySource::new();
        for (path, text) in iter {
            source.insert(path, text);
        }
        source
    }
}

impl ByteSource for MemorySource {
    fn read(&mut self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .map(|text| text.as_bytes().to_vec())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no in-memory source for '{path}'")))
    }
}
