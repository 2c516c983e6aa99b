//! Conversion pipeline components.
//!
//! The stages of the live-photo conversion pipeline:
//! - **classify**: extension-based input and entry classification
//! - **discovery**: find qualifying files in the input directory
//! - **container**: unwrap the `.livp` zip bundle
//! - **decode**: HEIF bitstream decoding via libheif
//! - **encode**: baseline JPEG encoding
//! - **exif**: metadata transplant with orientation normalization
//! - **convert**: per-item orchestration and dispatch
//! - **batch**: group-barrier concurrent scheduling

pub mod batch;
pub mod classify;
pub mod container;
pub mod convert;
pub mod decode;
pub mod discovery;
pub mod encode;
pub mod exif;

// Re-exports for convenient access
pub use batch::BatchScheduler;
pub use classify::{classify, is_file_type};
pub use container::{PayloadKind, SelectedPayload};
pub use convert::Converter;
pub use decode::{HeifDecoder, HeifPayload};
pub use discovery::discover;
pub use exif::transplant;
