//! Webcam access
//!
//! The device is opened on a background thread so acquisition never blocks
//! the UI. The thread keeps the most recent frame in a shared slot. Dropping
//! `CameraCapture` tells the thread to stop; it releases the device on its way
//! out, without the UI waiting for it.
//!
//! Acquisition failure is logged and leaves the slot empty: the booth shows
//! no live feed and the countdown still runs.

use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::error::{BoothError, Result};

/// One RGBA frame from the camera
#[derive(Clone)]
pub struct CameraFrame {
    /// RGBA pixel data, row-major
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Increases by one per delivered frame
    pub frame_number: u64,
}

/// Shared between the UI and the capture thread
struct Shared {
    latest: Mutex<Option<Arc<CameraFrame>>>,
    running: AtomicBool,
    frame_count: AtomicU64,
}

/// An open (or opening) camera
pub struct CameraCapture {
    shared: Arc<Shared>,
    thread_handle: Option<JoinHandle<()>>,
}

impl CameraCapture {
    /// Start acquiring camera `camera_index` at roughly `width`x`height`
    pub fn open(camera_index: u32, width: u32, height: u32) -> Result<Self> {
        let shared = Arc::new(Shared {
            latest: Mutex::new(None),
            running: AtomicBool::new(true),
            frame_count: AtomicU64::new(0),
        });

        let thread_shared = shared.clone();
        let thread_handle = std::thread::Builder::new()
            .name("camera-capture".to_string())
            .spawn(move || capture_thread(camera_index, width, height, thread_shared))
            .map_err(|e| BoothError::Camera(format!("failed to spawn capture thread: {}", e)))?;

        Ok(Self {
            shared,
            thread_handle: Some(thread_handle),
        })
    }

    /// The most recent frame, if the camera has delivered any
    pub fn latest_frame(&self) -> Option<Arc<CameraFrame>> {
        self.shared.latest.lock().clone()
    }

    pub fn frame_count(&self) -> u64 {
        self.shared.frame_count.load(Ordering::Relaxed)
    }

    /// Ask the capture thread to stop, without waiting for it
    ///
    /// The thread may still be inside device acquisition. It releases the
    /// device and exits once that returns; a reaper thread joins it.
    pub fn stop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        if let Some(handle) = self.thread_handle.take() {
            let reaper = std::thread::Builder::new()
                .name("camera-reaper".to_string())
                .spawn(move || join_capture_thread(handle));
            if let Err(e) = reaper {
                log::warn!("⚠️  Capture thread left detached: {}", e);
            }
        }
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.stop();
    }
}

fn join_capture_thread(handle: JoinHandle<()>) {
    if let Err(payload) = handle.join() {
        log::warn!("⚠️  Camera capture thread panicked: {}", panic_message(payload.as_ref()));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(feature = "camera")]
fn capture_thread(camera_index: u32, width: u32, height: u32, shared: Arc<Shared>) {
    use nokhwa::pixel_format::RgbAFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType, Resolution};
    use nokhwa::Camera;

    log::info!("🎥 Opening camera {}", camera_index);

    let index = CameraIndex::Index(camera_index);
    let attempts = [
        (
            "requested resolution",
            RequestedFormatType::HighestResolution(Resolution::new(width, height)),
        ),
        ("highest resolution", RequestedFormatType::AbsoluteHighestResolution),
        ("any format", RequestedFormatType::None),
    ];

    let mut camera = None;
    for (label, attempt) in attempts {
        match Camera::new(index.clone(), RequestedFormat::new::<RgbAFormat>(attempt)) {
            Ok(c) => {
                camera = Some(c);
                break;
            }
            Err(e) => log::warn!("Camera rejected {}: {:?}", label, e),
        }
    }

    let Some(mut camera) = camera else {
        log::error!("❌ Could not open camera {}; no live feed", camera_index);
        return;
    };

    // Closed while the device was still being acquired
    if !shared.running.load(Ordering::Acquire) {
        log::info!("🎥 Camera no longer needed; released");
        return;
    }

    if let Err(e) = camera.open_stream() {
        log::error!("❌ Failed to open camera stream: {:?}", e);
        return;
    }

    log::info!(
        "🎥 Camera opened: {} ({}x{})",
        camera.info().human_name(),
        camera.resolution().width(),
        camera.resolution().height()
    );

    while shared.running.load(Ordering::Acquire) {
        match camera.frame() {
            Ok(frame) => match frame.decode_image::<RgbAFormat>() {
                Ok(image) => {
                    let frame_number = shared.frame_count.fetch_add(1, Ordering::Relaxed);
                    let camera_frame = CameraFrame {
                        width: image.width(),
                        height: image.height(),
                        data: image.into_raw(),
                        frame_number,
                    };
                    *shared.latest.lock() = Some(Arc::new(camera_frame));
                }
                Err(e) => log::warn!("Failed to decode frame: {:?}", e),
            },
            Err(e) => {
                log::warn!("Failed to capture frame: {:?}", e);
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
        }
    }

    if let Err(e) = camera.stop_stream() {
        log::warn!("Failed to stop camera stream: {:?}", e);
    }
    log::info!("🎥 Camera released");
}

#[cfg(not(feature = "camera"))]
fn capture_thread(camera_index: u32, _width: u32, _height: u32, _shared: Arc<Shared>) {
    log::error!(
        "❌ Camera {} unavailable: built without the `camera` feature; no live feed",
        camera_index
    );
}

#[cfg(test)]
impl CameraCapture {
    /// A capture with no thread behind it, as if the device never answered
    pub fn idle() -> Self {
        Self::with_thread(None)
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    fn with_thread(thread_handle: Option<JoinHandle<()>>) -> Self {
        Self {
            shared: Arc::new(Shared {
                latest: Mutex::new(None),
                running: AtomicBool::new(true),
                frame_count: AtomicU64::new(0),
            }),
            thread_handle,
        }
    }
}
