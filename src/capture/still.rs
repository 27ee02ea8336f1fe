/// Turning a camera frame into the captured still
///
/// Encoding and live-preview conversion run on a blocking worker so the
/// capture page stays responsive.

use iced::widget::image::Handle;
use image::{imageops, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;

use super::camera::CameraFrame;
use crate::error::{BoothError, Result};
use crate::state::data::CapturedImage;

/// Encode a frame off the UI thread
pub async fn encode_still(
    frame: Arc<CameraFrame>,
    mirror: bool,
) -> std::result::Result<CapturedImage, String> {
    tokio::task::spawn_blocking(move || encode_still_blocking(&frame, mirror))
        .await
        .map_err(|e| BoothError::Task(e.to_string()).to_string())?
        .map_err(|e| e.to_string())
}

/// Blocking version of still encoding
pub fn encode_still_blocking(frame: &CameraFrame, mirror: bool) -> Result<CapturedImage> {
    let image = frame_to_image(frame, mirror)?;

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(CapturedImage::from_png(png, image.width(), image.height()))
}

/// Convert a live frame into a displayable handle off the UI thread
pub async fn preview_frame(
    frame: Arc<CameraFrame>,
    mirror: bool,
) -> std::result::Result<Handle, String> {
    tokio::task::spawn_blocking(move || {
        let pixels = preview_pixels(&frame, mirror)?;
        Ok::<_, BoothError>(Handle::from_rgba(frame.width, frame.height, pixels))
    })
    .await
    .map_err(|e| BoothError::Task(e.to_string()).to_string())?
    .map_err(|e| e.to_string())
}

/// Raw RGBA for the live preview, mirrored when configured
pub fn preview_pixels(frame: &CameraFrame, mirror: bool) -> Result<Vec<u8>> {
    Ok(frame_to_image(frame, mirror)?.into_raw())
}

fn frame_to_image(frame: &CameraFrame, mirror: bool) -> Result<RgbaImage> {
    let mut image = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or_else(|| {
            BoothError::Camera(format!(
                "frame {} has {} bytes, expected {}x{} RGBA",
                frame.frame_number,
                frame.data.len(),
                frame.width,
                frame.height
            ))
        })?;

    if mirror {
        imageops::flip_horizontal_in_place(&mut image);
    }
    Ok(image)
}
