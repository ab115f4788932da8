/// CLI Indexes: Dataset sources
pub mod datasets;

/// CLI Indexes: Compute devices
pub mod devices;

/// CLI Indexes: Models
pub mod models;

/// CLI Indexes: Pipelines
pub mod pipelines;
