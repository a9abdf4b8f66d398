//! SPIR-V Header Generator
//!
//! Embeds a compiled SPIR-V module into a C++ header as an
//! `alignas(4) static const uint32_t` array, so the consuming program can
//! create its shader module without reading a file at runtime.
//!
//! ## Example
//!
//! ```ignore
//! use spv_header::{Transcoder, TranscodeConfig};
//!
//! let report = Transcoder::new(TranscodeConfig::for_shader("vector_multiply")).run()?;
//! println!("{}", report.confirmation());
//! ```

mod config;
mod decode;
mod error;
mod printer;
mod render;
mod transcode;

pub use config::{IndentStyle, RenderOptions, ShaderManifest, TranscodeConfig};
pub use decode::{SpirvWords, decode_words};
pub use error::{TranscodeError, TranscodeResult};
pub use render::{render_header, render_header_with};
pub use transcode::{TranscodeReport, Transcoder, transcode, transcode_bytes, transcode_manifest};
