//! Parallelism configuration for the matching pass.

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_min_interfaces() -> usize {
    crate::matcher::DEFAULT_MIN_PARALLEL_INTERFACES
}

/// Configuration for parallel matching.
///
/// The interfaces x types product is partitioned by interface. Partitions
/// run on rayon's global pool once the program declares at least
/// `min_interfaces` interfaces; smaller programs are matched sequentially.
///
/// # Example
///
/// ```rust
/// use implens::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     max_concurrency: Some(4),
///     min_interfaces: 16,
/// };
/// assert_eq!(config.effective_concurrency(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ParallelConfig {
    /// Enable parallel matching (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Worker threads for the rayon pool (default: available cores)
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Interface count below which matching stays sequential
    #[serde(default = "default_min_interfaces")]
    pub min_interfaces: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
            min_interfaces: default_min_interfaces(),
        }
    }
}

impl ParallelConfig {
    /// Configured `max_concurrency`, or the number of available cores.
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(num_cpus)
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}
