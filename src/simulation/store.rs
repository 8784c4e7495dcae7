use crate::simulation::deck::{parse_decks, Deck, DeckError, DECK_SIZE};
use crate::simulation::results::SimulationResults;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Aggregate results file inside the data directory
pub const RESULTS_FILE: &str = "results.json";

const BATCH_PREFIX: &str = "decks_";
const BATCH_EXTENSION: &str = "txt";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Deck file {}: {}", .path.display(), .source)]
    Deck {
        path: PathBuf,
        #[source]
        source: DeckError,
    },
    #[error("Data directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
}

/// Directory of deck batches plus the results file
///
/// Batches are text files named `decks_<k>.txt`, one deck per line.
#[derive(Debug, Clone)]
pub struct DeckStore {
    dir: PathBuf,
}

impl DeckStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DeckStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn results_path(&self) -> PathBuf {
        self.dir.join(RESULTS_FILE)
    }

    pub fn has_results(&self) -> bool {
        self.results_path().is_file()
    }

    fn batch_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("{}{}.{}", BATCH_PREFIX, index, BATCH_EXTENSION))
    }

    /// Create the first unused `decks_<k>.txt`
    /// An existing batch is never opened, even if another writer takes the index first
    fn create_batch_file(&self) -> Result<(PathBuf, fs::File), StoreError> {
        let mut index = 0u64;
        loop {
            let path = self.batch_path(index);
            match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => index += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Write a new batch file and return its path
    pub fn save_batch(&self, decks: &[Deck]) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let (path, file) = self.create_batch_file()?;

        let mut writer = BufWriter::new(file);
        for deck in decks {
            writeln!(writer, "{}", deck)?;
        }
        writer.flush()?;

        debug!(path = %path.display(), decks = decks.len(), "Saved deck batch");
        Ok(path)
    }

    /// Batch files in the directory, sorted by name
    /// Other files are skipped with a warning
    pub fn batch_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        if !self.dir.is_dir() {
            return Err(StoreError::MissingDirectory(self.dir.clone()));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

            if file_name == RESULTS_FILE {
                continue;
            }
            let is_batch = file_name.starts_with(BATCH_PREFIX)
                && path.extension().and_then(|e| e.to_str()) == Some(BATCH_EXTENSION);
            if !is_batch {
                warn!(file = %path.display(), "Not a deck batch, skipping");
                continue;
            }
            paths.push(path);
        }

        paths.sort();
        Ok(paths)
    }

    /// Decks of one batch file; every line must hold a full deck
    pub fn load_batch(path: &Path) -> Result<Vec<Deck>, StoreError> {
        let content = fs::read_to_string(path)?;
        parse_decks(&content, DECK_SIZE).map_err(|source| StoreError::Deck {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Every deck from every batch
    pub fn load_all(&self) -> Result<Vec<Deck>, StoreError> {
        let mut decks = Vec::new();
        for path in self.batch_paths()? {
            decks.extend(Self::load_batch(&path)?);
        }
        Ok(decks)
    }

    pub fn save_results(&self, results: &SimulationResults) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.results_path();
        let mut writer = BufWriter::new(fs::File::create(&path)?);
        serde_json::to_writer(&mut writer, results)?;
        writer.flush()?;
        Ok(path)
    }

    pub fn load_results(&self) -> Result<SimulationResults, StoreError> {
        let content = fs::read_to_string(self.results_path())?;
        Ok(serde_json::from_str(&content)?)
    }
}
