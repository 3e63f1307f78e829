//! Gzip compression helpers. The codec itself is synchronous, so both
//! directions run on tokio's blocking pool and the caller just awaits.

use std::io::{Read, Write};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;
use tokio::task;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("gzip encoding failed: {0}")]
    Encode(#[source] std::io::Error),
    #[error("corrupt or truncated gzip stream: {0}")]
    Corrupt(#[source] std::io::Error),
    #[error("empty input is not a gzip stream")]
    Empty,
    #[error("decompressed data is not valid UTF-8: {0}")]
    NotText(#[from] std::string::FromUtf8Error),
    #[error("codec worker did not complete: {0}")]
    Worker(#[from] task::JoinError),
}

/// Compresses `data` into a gzip stream.
pub async fn compress(data: impl Into<Vec<u8>>) -> Result<Vec<u8>, CodecError> {
    let data = data.into();
    task::spawn_blocking(move || gzip(&data)).await?
}

/// Decompresses a gzip stream and decodes the result as UTF-8 text.
/// Concatenated members are all decoded, in order.
pub async fn decompress(data: impl Into<Vec<u8>>) -> Result<String, CodecError> {
    let data = data.into();
    let bytes = task::spawn_blocking(move || gunzip(&data)).await??;
    Ok(String::from_utf8(bytes)?)
}

fn gzip(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(CodecError::Encode)?;
    let compressed = encoder.finish().map_err(CodecError::Encode)?;
    debug!(input = data.len(), output = compressed.len(), "gzip compressed");
    Ok(compressed)
}

fn gunzip(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    if data.is_empty() {
        return Err(CodecError::Empty);
    }
    let mut decoder = MultiGzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(CodecError::Corrupt)?;
    debug!(input = data.len(), output = out.len(), "gzip decompressed");
    Ok(out)
}
