//! templatepatcher - embed a script file into a JSON template variable
//!
//! Reads a script body verbatim, stores it as a string under a nested key of a
//! JSON template (by default `variables["$fxv#2"]`) and writes the template back
//! out with every other value untouched.
//!
//! # Layout
//!
//! ```text
//! <tool dir>/
//! ├── tpatch
//! └── uploadSettings-enhanced.ps1   # script body
//! <tool dir>/../template.json       # patched in place
//! ```
//!
//! # Example
//!
//! ```ignore
//! use templatepatcher::{ConsoleReporter, PatchJob, TargetKey};
//!
//! let job = PatchJob::new("upload.ps1", "template.json", TargetKey::default());
//! job.run(&mut ConsoleReporter::default())?;
//! ```

pub mod cli;
pub mod config;
mod error;
pub mod patcher;
pub mod report;
pub mod script;
pub mod template;

pub use error::PatchError;
pub use patcher::{PatchJob, PatchOutcome};
pub use report::{ConsoleReporter, Reporter};
pub use template::{TargetKey, Template};

/// Top-level object holding the target key
pub const DEFAULT_SECTION: &str = "variables";

/// Key inside the section that receives the script body
pub const DEFAULT_KEY: &str = "$fxv#2";

/// Script file name, relative to the tool directory
pub const DEFAULT_SCRIPT_NAME: &str = "uploadSettings-enhanced.ps1";

/// Template file name, relative to the parent of the tool directory
pub const DEFAULT_TEMPLATE_NAME: &str = "template.json";

/// Spaces per indentation level in the written template
pub const DEFAULT_INDENT: usize = 2;
