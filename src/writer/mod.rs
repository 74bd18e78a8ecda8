//! Generated configuration files
//!
//! Two files are produced for each launch:
//! - the user file, named per game and arguments, holding the rewritten
//!   autoexec and commented templates the user may edit
//! - the auto file, recreated on every run from host settings and a few
//!   merged options
//!
//! Both are rendered fully in memory and persisted with a single
//! write-then-rename, so a failure never leaves half a file behind.

mod auto_conf;
mod templates;
mod user_conf;

pub use auto_conf::{render_auto_conf, write_auto_conf, AutoConf};
pub use user_conf::{render_user_conf, write_user_conf};

use std::fs;
use std::io;
use std::path::Path;

use crate::config::Encoding;

/// Errors writing a generated file
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration text cannot be encoded as {0}")]
    Unencodable(Encoding),
}

/// Encode `text` and write it atomically (write-then-rename).
fn persist(path: &Path, text: &str, encoding: Encoding) -> Result<(), WriteError> {
    let bytes = encoding
        .encode(text)
        .ok_or(WriteError::Unencodable(encoding))?;

    let temp_path = path.with_extension("tmp");
    let written = fs::write(&temp_path, &bytes).and_then(|()| fs::rename(&temp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}
