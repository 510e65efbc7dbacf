//! Seed loader: A5. Reads the UTF-8 seed file and draws a random sample of
//! `num_seeds` lines, clamped to however many are actually available.
//! Grounded in the same `rand` dependency the stract example pulls in for
//! sampling (`examples/StractOrg-stract/Cargo.toml`).

use rand::seq::SliceRandom;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedLoadError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reads `path`, ignoring blank lines, and returns a random sample of
/// `num_seeds` of them (or all of them, if fewer are available).
pub fn load_seeds(path: &Path, num_seeds: usize) -> Result<Vec<String>, SeedLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let sample_size = num_seeds.min(lines.len());
    let mut rng = rand::thread_rng();
    lines.shuffle(&mut rng);
    lines.truncate(sample_size);
    Ok(lines)
}
