//! # usenet-nzb
//!
//! Reading, inspecting and editing NZB files.
//!
//! ## Design Philosophy
//!
//! usenet-nzb is designed to be:
//! - **Lossless** - Decoding then encoding reproduces every field in order
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Synchronous** - Plain function calls, no runtime required
//!
//! ## Quick Start
//!
//! ```no_run
//! use usenet_nzb::{MetaEditor, FileCollisionAction, parser};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let nzb = parser::from_file("release.nzb")?;
//!
//!     let main = nzb.main_file()?;
//!     println!("main file: {:?}", main.filename());
//!     println!("repair data: {:.1}%", nzb.par2_percentage()? * 100.0);
//!
//!     let mut editor = MetaEditor::new(nzb);
//!     editor.append("password", "secret");
//!     editor.sort(None);
//!     editor.to_file("release.nzb", FileCollisionAction::Overwrite)?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Sizes, groups, repair files and main-file selection
pub mod aggregate;
/// Configuration types
pub mod config;
/// Obfuscated name detection
pub mod deobfuscation;
/// Metadata editing
pub mod editor;
/// Error types
pub mod error;
/// Filename recovery from subject lines
pub mod filename;
/// XML, JSON and gzip codecs
pub mod parser;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, FileCollisionAction, SortPriority};
pub use deobfuscation::{determine_final_name, is_obfuscated};
pub use editor::MetaEditor;
pub use error::{Error, PreconditionError, Result};
pub use filename::{FilenameMatcher, extract_filename, split_filename};
pub use parser::NzbFormat;
pub use types::{File, Meta, MetaKind, Nzb, Segment};
