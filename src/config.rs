use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub const DEFAULT_WIDTH: usize = 26;
pub const DEFAULT_HEIGHT: usize = 20;
pub const DEFAULT_FPS: u64 = 30;

/// Front-end settings. The core takes any positive size; these are only
/// what the terminal game asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub fps: u64,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            fps: DEFAULT_FPS,
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Reads `MAZE_WIDTH`, `MAZE_HEIGHT`, `MAZE_SEED`, `MAZE_FPS` and
    /// `MAZE_LOG_DIR`. Missing, unparsable or zero values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            width: positive(lookup("MAZE_WIDTH")).unwrap_or(defaults.width),
            height: positive(lookup("MAZE_HEIGHT")).unwrap_or(defaults.height),
            seed: lookup("MAZE_SEED").and_then(|v| v.trim().parse().ok()),
            fps: positive(lookup("MAZE_FPS")).unwrap_or(defaults.fps),
            log_dir: lookup("MAZE_LOG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        }
    }

    pub fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }
}

fn positive<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v > T::default())
}

fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("maze-game")
}
