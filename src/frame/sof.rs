//! Set-of-frames files
//!
//! Plain text listing of the input files of a recipe run, one frame per
//! line: `filename tag [group]`. Blank lines and lines starting with `#`
//! are skipped.

use crate::error::CoreError;
use crate::frame::{Frame, FrameGroup, Frameset};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Options applied while reading a set-of-frames file
#[derive(Debug, Clone)]
pub struct SofOptions {
    /// Fail with `FileNotFound` when a listed file does not exist.
    pub check_exists: bool,
    /// Group given to lines without a group column.
    pub default_group: FrameGroup,
}

impl Default for SofOptions {
    fn default() -> Self {
        Self {
            check_exists: false,
            default_group: FrameGroup::None,
        }
    }
}

/// Read and parse a set-of-frames file.
pub fn load_sof(path: &Path, options: &SofOptions) -> Result<Frameset, CoreError> {
    if !path.exists() {
        return Err(CoreError::FileNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let set = parse_sof(&text, path, options)?;
    info!(sof = %path.display(), frames = set.len(), "Loaded set of frames");
    Ok(set)
}

/// Parse set-of-frames text; `origin` is only used in error messages.
pub fn parse_sof(text: &str, origin: &Path, options: &SofOptions) -> Result<Frameset, CoreError> {
    let mut set = Frameset::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        let (filename, tag, group) = match columns.as_slice() {
            [filename, tag] => (*filename, *tag, options.default_group),
            [filename, tag, group] => {
                let group = group.parse::<FrameGroup>().map_err(|e| CoreError::BadFileFormat {
                    path: origin.to_path_buf(),
                    message: format!("line {}: {}", index + 1, e),
                })?;
                (*filename, *tag, group)
            }
            _ => {
                return Err(CoreError::BadFileFormat {
                    path: origin.to_path_buf(),
                    message: format!(
                        "line {}: expected `filename tag [group]`, found {} column(s)",
                        index + 1,
                        columns.len()
                    ),
                })
            }
        };

        if options.check_exists && !Path::new(filename).exists() {
            return Err(CoreError::FileNotFound(filename.into()));
        }

        debug!(filename, tag, group = group.as_str(), "SOF entry");
        set.insert(Frame::tagged(filename, tag).with_group(group))?;
    }

    Ok(set)
}

/// Write `set` in set-of-frames format, history order.
pub fn write_sof<W: Write>(set: &Frameset, out: &mut W) -> Result<(), CoreError> {
    for frame in set.iter() {
        let filename = frame.filename().unwrap_or("-");
        let tag = frame.tag().unwrap_or("-");
        match frame.group() {
            FrameGroup::None => writeln!(out, "{} {}", filename, tag)?,
            group => writeln!(out, "{} {} {}", filename, tag, group.as_str())?,
        }
    }
    Ok(())
}
