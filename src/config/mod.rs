//! Configuration loaded from `.implens.toml`.
//!
//! ```toml
//! [parallel]
//! enabled = true
//! max_concurrency = 8
//! min_interfaces = 32
//!
//! [matching]
//! receiver_policy = "value-only"
//!
//! [lens]
//! show_on_methods = false
//! ```
//!
//! Every section and key is optional. Command-line flags override values
//! read from the file.

mod loader;
mod parallel;

pub use loader::{directory_ancestors, load_config, load_config_from, load_config_in, CONFIG_FILE_NAME};
pub use parallel::ParallelConfig;

use crate::matcher::{MatchOptions, ReceiverPolicy};
use serde::{Deserialize, Serialize};

/// Root configuration structure for implens
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ImplensConfig {
    #[serde(default)]
    pub parallel: ParallelConfig,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub lens: LensConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    /// Which receiver forms count toward a type's method set
    #[serde(default)]
    pub receiver_policy: ReceiverPolicy,
}

fn default_true() -> bool {
    true
}

/// Which lens labels are produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LensConfig {
    /// Master switch; no labels at all when false
    #[serde(default = "default_true")]
    pub enable: bool,

    #[serde(default = "default_true")]
    pub show_on_interfaces: bool,

    /// Per interface method implementation counts
    #[serde(default = "default_true")]
    pub show_on_methods: bool,

    /// `Implements: ...` labels on concrete types
    #[serde(default = "default_true")]
    pub show_on_types: bool,

    /// `Implements: I.Method` labels on concrete methods
    #[serde(default = "default_true")]
    pub per_method_attribution: bool,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            enable: true,
            show_on_interfaces: true,
            show_on_methods: true,
            show_on_types: true,
            per_method_attribution: true,
        }
    }
}

impl ImplensConfig {
    /// Matcher options described by this configuration.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            receiver_policy: self.matching.receiver_policy,
            parallel: self.parallel.enabled,
            min_parallel_interfaces: self.parallel.min_interfaces,
        }
    }
}
