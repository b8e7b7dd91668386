//! Label text extraction.
//!
//! There is no recognizer behind this yet: extraction waits [`OCR_DELAY`]
//! and reports that nothing was found, leaving the user to fill the
//! fields in by hand.

use std::time::Duration;

use crate::model::VinylData;

/// How long a (stubbed) extraction takes.
pub const OCR_DELAY: Duration = Duration::from_secs(2);

/// Try to read record details off a photographed label.
///
/// `image` is a `data:` URI or an image URL. Always returns `None`.
pub async fn extract_label_data(image: &str) -> Option<VinylData> {
    extract_label_data_after(image, OCR_DELAY).await
}

pub(crate) async fn extract_label_data_after(image: &str, delay: Duration) -> Option<VinylData> {
    log::debug!("Running label extraction on {} bytes of image data", image.len());
    tokio::time::sleep(delay).await;
    log::info!("Label extraction complete - no text detected");
    None
}
