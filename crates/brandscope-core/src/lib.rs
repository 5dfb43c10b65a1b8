//! Core data model for brandscope: metric families, the parsed dataset,
//! brand identity resolution, archetype derivation, snapshots and
//! configuration.

pub mod app_config;
pub mod archetype;
pub mod brands;
pub mod config;
pub mod dataset;
pub mod labels;
pub mod metrics;
pub mod snapshot;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use archetype::{derive_profile, Archetype, ArchetypeProfile};
pub use brands::{find_match, same_brand, BrandResolver};
pub use config::{build_brand_resolver, load_app_config, load_app_config_from_env};
pub use dataset::{BrandImageMap, BrandRecord, Dataset, DatasetBuilder, Provenance, Segment};
pub use labels::{is_blocklisted_item, item_label, segment_display_name, ItemFamily};
pub use metrics::{MetricBag, MetricFamily, MetricKey};
pub use snapshot::{snapshot_name_from_file, Snapshot, SnapshotCollection, SnapshotError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read alias file {path}: {source}")]
    AliasesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse alias file: {0}")]
    AliasesFileParse(#[source] serde_yaml::Error),

    #[error("alias validation failed: {0}")]
    Validation(String),
}
