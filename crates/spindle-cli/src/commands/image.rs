//! Turning `--image` arguments into image references.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;

/// Pass URLs and data URIs through; embed local files as data URIs.
pub fn resolve_image(arg: &str) -> Result<String> {
    if is_reference(arg) {
        return Ok(arg.to_string());
    }

    let path = Path::new(arg);
    let mime = mime_type(path)?;
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    Ok(to_data_uri(&bytes, &mime))
}

fn is_reference(arg: &str) -> bool {
    arg.starts_with("http://") || arg.starts_with("https://") || arg.starts_with("data:")
}

/// Image type guessed from the extension; JPEG when there is no guess.
fn mime_type(path: &Path) -> Result<String> {
    match mime_guess::from_path(path).first() {
        Some(mime) if mime.type_() == mime_guess::mime::IMAGE => {
            Ok(mime.essence_str().to_string())
        }
        Some(mime) => bail!("{} is not an image ({})", path.display(), mime),
        None => Ok("image/jpeg".to_string()),
    }
}

fn to_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
