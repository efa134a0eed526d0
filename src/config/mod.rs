//! Optional `selectree.yaml` settings.

mod selection_config;

pub use selection_config::{SelectionConfig, SelectionConfigError};
