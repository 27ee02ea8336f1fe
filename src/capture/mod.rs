/// Photo capture module
///
/// This module handles:
/// - Opening the webcam and keeping its latest frame (camera.rs)
/// - Encoding the frame taken at the end of the countdown (still.rs)

pub mod camera;
pub mod still;
