//! Payment Proof Image Processing
//!
//! Validates uploaded proof images and re-encodes them to JPEG before
//! storage. Re-encoding strips any non-image payload hiding behind a
//! spoofed content type.

use image::ImageFormat;
use image::codecs::jpeg::JpegEncoder;
use shared::{AppError, ErrorCode};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// JPEG quality for stored proofs
const JPEG_QUALITY: u8 = 85;

/// Validate, re-encode and persist a payment proof image.
///
/// Returns the path relative to `upload_dir` (stored on the proof row).
pub fn store_proof_image(upload_dir: &Path, data: &[u8]) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::PaymentImageRequired));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::new(ErrorCode::PaymentImageTooLarge));
    }

    let format = image::guess_format(data)
        .map_err(|_| AppError::new(ErrorCode::PaymentImageInvalid))?;
    if !matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP
    ) {
        return Err(AppError::new(ErrorCode::PaymentImageInvalid));
    }

    let img = image::load_from_memory(data)
        .map_err(|_| AppError::new(ErrorCode::PaymentImageInvalid))?;

    let proofs_dir = upload_dir.join("proofs");
    fs::create_dir_all(&proofs_dir)
        .map_err(|e| AppError::internal(format!("Failed to create upload dir: {e}")))?;

    let filename = format!("{}.jpg", Uuid::new_v4());
    let path = proofs_dir.join(&filename);

    let file = fs::File::create(&path)
        .map_err(|e| AppError::internal(format!("Failed to create proof file: {e}")))?;
    let mut encoder = JpegEncoder::new_with_quality(file, JPEG_QUALITY);
    // JPEG has no alpha channel; flatten before encoding
    encoder
        .encode_image(&img.to_rgb8())
        .map_err(|e| AppError::internal(format!("Failed to encode proof image: {e}")))?;

    Ok(format!("proofs/{filename}"))
}
