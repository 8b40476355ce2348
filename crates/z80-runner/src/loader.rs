//! Program image loading.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use cpu_z80::{MEMSIZE, Memory};

/// Why a program image could not be loaded.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    /// The image has more bytes than the address space has cells.
    TooLarge {
        len: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read image: {err}"),
            Self::TooLarge { len } => {
                write!(f, "image is {len} bytes, larger than the {MEMSIZE} byte address space")
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::TooLarge { .. } => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Copy a raw program image into memory starting at address zero.
/// Returns the number of bytes loaded.
pub fn load_image(mem: &mut Memory, path: &Path) -> Result<usize, LoadError> {
    let image = fs::read(path)?;
    if image.len() > MEMSIZE {
        return Err(LoadError::TooLarge { len: image.len() });
    }
    for (i, &byte) in image.iter().enumerate() {
        mem.write(i as u16, byte);
    }
    Ok(image.len())
}
