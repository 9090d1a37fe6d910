//! On-disk layout of per-program state. Everything is keyed by the content
//! hash of the program image so two programs never share a file.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use md5::{Digest, Md5};

use crate::error::SessionError;

/// Lowercase hex digest identifying a program image. Only hex digits, so it
/// is always a single path component.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// MD5 of the program image.
    pub fn of(image: &[u8]) -> Self {
        let digest = Md5::digest(image);
        Self(digest.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// A digest computed elsewhere. Must be non-empty hex.
    pub fn new(hex: impl Into<String>) -> Result<Self, SessionError> {
        let hex = hex.into();
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SessionError::InvalidHash(hex));
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug)]
pub struct SaveStore {
    root: PathBuf,
}

impl SaveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, kind: &str, hash: &ContentHash) -> PathBuf {
        let mut path = self.root.clone();
        path.push(kind);
        path.push(format!("{}.dat", hash));
        path
    }

    /// Full emulator snapshot, written and read by the core.
    pub fn state_path(&self, hash: &ContentHash) -> PathBuf {
        self.path("save", hash)
    }

    pub fn sram_path(&self, hash: &ContentHash) -> PathBuf {
        self.path("sram", hash)
    }

    pub fn read_sram(&self, hash: &ContentHash) -> io::Result<Vec<u8>> {
        std::fs::read(self.sram_path(hash))
    }

    pub fn write_sram(&self, hash: &ContentHash, sram: &[u8]) -> io::Result<()> {
        let path = self.sram_path(hash);
        create_parent(&path)?;
        std::fs::write(path, sram)
    }

    /// Makes sure the core can create the state file.
    pub fn prepare_state_path(&self, hash: &ContentHash) -> io::Result<PathBuf> {
        let path = self.state_path(hash);
        create_parent(&path)?;
        Ok(path)
    }
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) => std::fs::create_dir_all(dir),
        None => Ok(()),
    }
}
