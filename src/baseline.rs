//! DEFLATE reference point for compression metrics

use std::io::Write;

use crate::error::CompressError;

/// Compressed length of `data` through raw DEFLATE at `level` (0..=9).
pub fn deflate_size(data: &[u8], level: u32) -> Result<usize, CompressError> {
    let mut encoder =
        flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::new(level.min(9)));
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;
    Ok(compressed.len())
}

/// `original / deflate` ratio, or `None` for empty input.
pub fn deflate_ratio(data: &[u8], level: u32) -> Result<Option<f64>, CompressError> {
    if data.is_empty() {
        return Ok(None);
    }
    let size = deflate_size(data, level)?;
    Ok(Some(data.len() as f64 / size.max(1) as f64))
}
