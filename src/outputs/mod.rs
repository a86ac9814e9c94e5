//! Output generation for rendered pages.
//!
//! # Submodules
//!
//! - [`markdown`]: renders a page as Markdown for the terminal
//! - [`json`]: writes a page as a JSON file for other tools
//!
//! # Output Structure
//!
//! Pages always go to stdout in the format chosen with `--format`. With
//! `--json-output-dir`, each page is also saved by date and route:
//!
//! ```text
//! json_output_dir/
//! └── 2025-06-08/
//!     ├── home.json
//!     ├── science.json
//!     ├── search.json
//!     └── weather.json
//! ```

pub mod json;
pub mod markdown;
