//! Command handlers for CLI subcommands
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

mod completions;
mod config;
mod render;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use render::handle_render;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use std::path::Path;

/// Fail early with a clear message when an input does not exist
fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        tracing::error!(path = %path.display(), "Input not found");
        Err(Error::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
