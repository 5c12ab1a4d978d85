// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixture seeding: populate a victim directory with deterministic files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const FILLER: &[u8] = b"The quick brown fox jumps over the lazy dog.\n";

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub directory: PathBuf,
    pub count: usize,
    /// Size of each file in bytes
    pub size: usize,
}

/// Create `fixture_0001.txt` .. `fixture_NNNN.txt`. Existing fixtures are overwritten.
pub fn seed(config: &SeedConfig) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&config.directory)
        .with_context(|| format!("creating fixture directory {}", config.directory.display()))?;

    let mut paths = Vec::with_capacity(config.count);
    for index in 1..=config.count {
        let path = config.directory.join(format!("fixture_{:04}.txt", index));
        fs::write(&path, fixture_content(index, config.size))
            .with_context(|| format!("writing fixture {}", path.display()))?;
        paths.push(path);
    }
    Ok(paths)
}

/// Header line plus filler, cut to exactly `size` bytes.
pub fn fixture_content(index: usize, size: usize) -> Vec<u8> {
    let mut content = format!("FIXTURE {:04}\n", index).into_bytes();
    while content.len() < size {
        content.extend_from_slice(FILLER);
    }
    content.truncate(size);
    content
}

pub fn count_fixtures(directory: &Path) -> usize {
    fs::read_dir(directory)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.file_name().to_string_lossy().starts_with("fixture_"))
                .count()
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn seeds_exact_count_and_size() {
        let dir = TempDir::new().expect("temp dir should create");
        let config = SeedConfig {
            directory: dir.path().join("victims"),
            count: 3,
            size: 100,
        };
        let paths = seed(&config).expect("seed should succeed");
        assert_eq!(paths.len(), 3);
        assert_eq!(count_fixtures(&config.directory), 3);
        for path in &paths {
            assert_eq!(fs::metadata(path).unwrap().len(), 100);
        }
    }

    #[test]
    fn tiny_sizes_truncate_the_header() {
        assert_eq!(fixture_content(1, 4), b"FIXT");
        assert!(fixture_content(1, 0).is_empty());
    }
}
