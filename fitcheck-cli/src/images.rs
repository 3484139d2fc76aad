//! Image argument handling
//!
//! Image arguments are either remote references (http(s) or data URLs),
//! passed through untouched, or local files, inlined as base64 data URLs.

use anyhow::{Context, Result, bail};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;

/// Maximum local image size (10MB)
const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Turn an image argument into something the remote APIs accept
pub fn resolve_image(arg: &str) -> Result<String> {
    if is_remote(arg) {
        return Ok(arg.to_string());
    }

    let path = Path::new(arg);
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read image {}", arg))?;

    if bytes.is_empty() {
        bail!("Image {} is empty", arg);
    }
    if bytes.len() > MAX_IMAGE_SIZE {
        bail!(
            "Image {} is too large: {} bytes (max: {} bytes)",
            arg,
            bytes.len(),
            MAX_IMAGE_SIZE
        );
    }

    let mime = detect_mime(&bytes)
        .or_else(|| mime_from_extension(path))
        .with_context(|| format!("Unsupported image format: {}", arg))?;

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)))
}

fn is_remote(arg: &str) -> bool {
    arg.starts_with("http://") || arg.starts_with("https://") || arg.starts_with("data:")
}

/// Detect the format from magic bytes
fn detect_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
