//! Stillify Core - live-photo and HEIF conversion library.
//!
//! Converts Apple `.livp` live-photo bundles and standalone HEIF/HEIC
//! images into upright baseline JPEGs, carrying the capture metadata
//! across and normalizing orientation so no viewer rotation is needed.
//!
//! # Architecture
//!
//! ```text
//! Directory → Discover → Dispatch → {Unwrap container} → Decode → Encode → Transplant EXIF
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use stillify_core::{discover, BatchScheduler};
//!
//! #[tokio::main]
//! async fn main() {
//!     let items = discover("./photos".as_ref());
//!     let scheduler = BatchScheduler::new(4, 90);
//!     let stats = scheduler
//!         .run(items, "./out".as_ref(), |p| {
//!             println!("{}/{} ({}%)", p.completed, p.total, p.percent());
//!         })
//!         .await;
//!     println!("{} converted, {} failed", stats.succeeded, stats.failed);
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, StillifyError};
pub use pipeline::{discover, BatchScheduler, Converter, HeifDecoder};
pub use types::{
    BatchProgress, BatchStats, ConvertedImage, DecodedPixels, InputKind, SourceItem,
    TransplantOutcome,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
