use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;

/// Splits a program image into platters.
///
/// Every four bytes form one big-endian platter, in file order. Nothing is
/// validated beyond the length; bad operators only trap once fetched.
pub fn load_program(bytes: &[u8]) -> Result<Vec<u32>, LoadError> {
    if bytes.len() % 4 != 0 {
        return Err(LoadError::TruncatedPlatter { len: bytes.len() });
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Reads an image from disk and splits it into platters.
pub fn load_program_file(path: impl AsRef<Path>) -> Result<Vec<u32>, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let program = load_program(&bytes)?;
    debug!(path = %path.display(), platters = program.len(), "loaded program image");
    Ok(program)
}

/// Serializes platters back into image form.
pub fn to_image(program: &[u32]) -> Vec<u8> {
    program.iter().flat_map(|p| p.to_be_bytes()).collect()
}
