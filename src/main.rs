use iced::widget::image;
use iced::{event, mouse, time, touch, window, Element, Event, Size, Subscription, Task, Theme};
use std::time::Duration;

mod capture;
mod config;
mod error;
mod generation;
mod i18n;
mod state;
mod ui;

use capture::camera::CameraCapture;
use capture::still;
use config::KioskConfig;
use generation::{GenerationRequest, Generator, SimulatedGenerator};
use i18n::Language;
use state::data::{CapturedImage, DecorationTab, Page, StyleId};
use state::placement::{Placement, PlacementTarget};
use state::session::{CountdownTick, GenerationPhase, Session};
use ui::assets::Assets;
use ui::pages::PageContext;

/// Main application state
struct PhotoBooth {
    config: KioskConfig,
    /// Background, logo and style thumbnails
    assets: Assets,
    /// Page, choices, captured still and stickers
    session: Session,
    /// Open only while the capture page waits for the shutter
    camera: Option<CameraCapture>,
    /// Latest live frame (frame number, pixels) shown on the capture page
    live_frame: Option<(u64, image::Handle)>,
    /// A live frame is being converted on a worker
    preview_pending: bool,
    /// Produces the final photo from the captured still
    generator: Box<dyn Generator>,
    /// Palette item pressed and not yet released
    palette_drag: Option<&'static str>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Global home button
    Home,
    LanguageSelected(Language),
    StyleSelected(StyleId),
    StartCapture,
    /// One second of countdown elapsed
    CountdownTick,
    /// Time to pull a new live camera frame
    FrameTick,
    /// Live frame `frame_number` converted for display
    PreviewReady {
        frame_number: u64,
        result: Result<image::Handle, String>,
    },
    /// Background still encoding finished for shot `shot`
    StillEncoded {
        shot: u32,
        result: Result<CapturedImage, String>,
    },
    Retake,
    Done,
    /// Time to poll the generator
    GenerationTick,
    /// Completion delay elapsed
    GenerationSettled,
    TabSelected(DecorationTab),
    /// Palette item pressed: it follows the pointer until release
    PaletteGrab(&'static str),
    /// Pointer released over a palette item
    PaletteTap(&'static str),
    /// Pointer released anywhere in the window
    PointerReleased,
    /// Sticker dropped from the palette or dragged on the photo
    Place(Placement),
    ClearStickers,
}

impl PhotoBooth {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = KioskConfig::load().unwrap_or_else(|e| {
            log::warn!("⚠️  {}; using default config", e);
            KioskConfig::default()
        });

        let assets = Assets::load(&config.assets_dir);
        let session = Session::new(
            config.default_language,
            config.countdown_secs,
            config.sticker_size,
        );
        let generator = Box::new(SimulatedGenerator::new(
            config.progress_step_min,
            config.progress_step_max,
        ));

        let task = if config.fullscreen {
            window::get_latest()
                .and_then(|id| window::change_mode(id, window::Mode::Fullscreen))
        } else {
            Task::none()
        };

        log::info!("📷 Photo booth ready");

        (
            PhotoBooth {
                config,
                assets,
                session,
                camera: None,
                live_frame: None,
                preview_pending: false,
                generator,
                palette_drag: None,
            },
            task,
        )
    }

    /// Handle application messages, then bring resources in line with the new state
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.handle(message);
        self.reconcile_resources();
        task
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Home => {
                self.session.go_home();
            }
            Message::LanguageSelected(language) => {
                if self.session.select_language(language) {
                    log::info!("🌐 Language {}", language.code());
                }
            }
            Message::StyleSelected(style) => {
                self.session.select_style(style);
            }
            Message::StartCapture => {
                self.session.start_capture();
            }
            Message::CountdownTick => {
                if let CountdownTick::Shoot(shot) = self.session.tick_countdown() {
                    return self.shoot(shot);
                }
            }
            Message::FrameTick => {
                return self.refresh_live_frame();
            }
            Message::PreviewReady {
                frame_number,
                result,
            } => {
                self.preview_pending = false;
                match result {
                    // Ignore conversions that finish after the camera closed
                    Ok(handle) if self.camera.is_some() => {
                        self.live_frame = Some((frame_number, handle));
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("Skipping live frame: {}", e),
                }
            }
            Message::StillEncoded { shot, result } => match result {
                Ok(image) => {
                    self.session.store_capture(shot, image);
                }
                Err(e) => {
                    log::error!("❌ Capture failed: {}", e);
                }
            },
            Message::Retake => {
                self.session.retake();
            }
            Message::Done => {
                if self.session.finish_capture() {
                    let style = self.session.selected_style();
                    let image = self.session.captured().cloned();
                    if let (Some(style), Some(image)) = (style, image) {
                        self.generator.start(GenerationRequest { style, image });
                    }
                }
            }
            Message::GenerationTick => {
                let status = self.generator.poll();
                self.session.apply_generation(status);
            }
            Message::GenerationSettled => {
                self.session.settle_generation();
            }
            Message::TabSelected(tab) => {
                self.session.select_tab(tab);
            }
            Message::PaletteGrab(emoji) => {
                self.palette_drag = Some(emoji);
            }
            Message::PaletteTap(emoji) => {
                // Releasing over a different item abandons the held one
                if self.palette_drag.take() == Some(emoji) {
                    let container = Size::new(self.config.photo_width, self.config.photo_height);
                    let placement =
                        Placement::centered(emoji, container, self.session.sticker_size());
                    self.session.apply_placement(placement);
                }
            }
            Message::PointerReleased => {
                self.palette_drag = None;
            }
            Message::Place(placement) => {
                if let PlacementTarget::New(_) = placement.target {
                    self.palette_drag = None;
                }
                self.session.apply_placement(placement);
            }
            Message::ClearStickers => {
                self.session.clear_stickers();
            }
        }

        Task::none()
    }

    /// Open or release the camera, cancel stray generation jobs and drop a
    /// held palette item, according to the current page
    fn reconcile_resources(&mut self) {
        if self.session.wants_camera() {
            if self.camera.is_none() {
                match CameraCapture::open(
                    self.config.camera_index,
                    self.config.camera_width,
                    self.config.camera_height,
                ) {
                    Ok(camera) => self.camera = Some(camera),
                    Err(e) => log::error!("❌ {}", e),
                }
            }
        } else if let Some(mut camera) = self.camera.take() {
            camera.stop();
            log::info!("🎥 Camera closed after {} frames", camera.frame_count());
            self.live_frame = None;
        }

        if self.session.page() != Page::Generating && self.generator.is_active() {
            self.generator.cancel();
        }

        if self.session.page() != Page::Decoration {
            self.palette_drag = None;
        }
    }

    /// Encode the latest camera frame as the still for `shot`
    fn shoot(&mut self, shot: u32) -> Task<Message> {
        let Some(frame) = self.camera.as_ref().and_then(CameraCapture::latest_frame) else {
            log::warn!("⚠️  Shutter fired with no camera frame; nothing captured");
            return Task::none();
        };

        Task::perform(
            still::encode_still(frame, self.config.mirror_preview),
            move |result| Message::StillEncoded { shot, result },
        )
    }

    /// Convert the newest camera frame for display, one conversion at a time
    fn refresh_live_frame(&mut self) -> Task<Message> {
        if self.preview_pending {
            return Task::none();
        }
        let Some(frame) = self.camera.as_ref().and_then(CameraCapture::latest_frame) else {
            return Task::none();
        };
        if let Some((shown, _)) = &self.live_frame {
            if *shown == frame.frame_number {
                return Task::none();
            }
        }

        self.preview_pending = true;
        let frame_number = frame.frame_number;
        Task::perform(
            still::preview_frame(frame, self.config.mirror_preview),
            move |result| Message::PreviewReady {
                frame_number,
                result,
            },
        )
    }

    /// Timers and listeners exist only while the session needs them
    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = Vec::new();

        if self.session.countdown_running() {
            subscriptions.push(time::every(Duration::from_secs(1)).map(|_| Message::CountdownTick));
        }

        if self.camera.is_some() {
            subscriptions.push(time::every(self.config.preview_interval()).map(|_| Message::FrameTick));
        }

        match self.session.generation_phase() {
            Some(GenerationPhase::Running) => subscriptions.push(
                time::every(self.config.progress_interval()).map(|_| Message::GenerationTick),
            ),
            Some(GenerationPhase::Settling) => subscriptions.push(
                time::every(self.config.completion_delay()).map(|_| Message::GenerationSettled),
            ),
            None => {}
        }

        if self.palette_drag.is_some() {
            subscriptions.push(event::listen_with(pointer_released));
        }

        Subscription::batch(subscriptions)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::pages::view(PageContext {
            session: &self.session,
            assets: &self.assets,
            config: &self.config,
            live_frame: self.live_frame.as_ref().map(|(_, handle)| handle),
            held: self.palette_drag,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Window-level release listener, active only while a palette item is held
fn pointer_released(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
        | Event::Touch(touch::Event::FingerLifted { .. })
        | Event::Touch(touch::Event::FingerLost { .. }) => Some(Message::PointerReleased),
        _ => None,
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("📷 Photo Booth v{}", env!("CARGO_PKG_VERSION"));

    iced::application("Photo Booth", PhotoBooth::update, PhotoBooth::view)
        .subscription(PhotoBooth::subscription)
        .theme(PhotoBooth::theme)
        .window_size((1080.0, 1600.0))
        .centered()
        .run_with(PhotoBooth::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booth() -> PhotoBooth {
        let config = KioskConfig::default();
        let session = Session::new(
            config.default_language,
            config.countdown_secs,
            config.sticker_size,
        );
        let generator = Box::new(SimulatedGenerator::seeded(
            11,
            config.progress_step_min,
            config.progress_step_max,
        ));

        PhotoBooth {
            config,
            assets: Assets::default(),
            session,
            camera: None,
            live_frame: None,
            preview_pending: false,
            generator,
            palette_drag: None,
        }
    }

    fn still() -> CapturedImage {
        CapturedImage::from_png(vec![0x89, b'P', b'N', b'G'], 4, 3)
    }

    /// On the capture page with a camera that never delivers a frame
    fn at_capture() -> PhotoBooth {
        let mut booth = booth();
        let _ = booth.handle(Message::LanguageSelected(Language::English));
        let _ = booth.handle(Message::StyleSelected(StyleId("anime")));
        let _ = booth.handle(Message::StartCapture);
        booth.camera = Some(CameraCapture::idle());
        assert_eq!(booth.session.page(), Page::Capture);
        booth
    }

    fn at_generating() -> PhotoBooth {
        let mut booth = at_capture();
        let shot = loop {
            if let CountdownTick::Shoot(shot) = booth.session.tick_countdown() {
                break shot;
            }
        };
        let _ = booth.update(Message::StillEncoded {
            shot,
            result: Ok(still()),
        });
        let _ = booth.update(Message::Done);
        assert_eq!(booth.session.page(), Page::Generating);
        booth
    }

    fn at_decoration() -> PhotoBooth {
        let mut booth = at_generating();
        for _ in 0..1000 {
            if booth.session.generation_phase() == Some(GenerationPhase::Settling) {
                break;
            }
            let _ = booth.update(Message::GenerationTick);
        }
        let _ = booth.update(Message::GenerationSettled);
        assert_eq!(booth.session.page(), Page::Decoration);
        booth
    }

    #[test]
    fn test_shutter_without_frame_captures_nothing() {
        let mut booth = at_capture();

        for _ in 0..booth.config.countdown_secs {
            let _ = booth.update(Message::CountdownTick);
        }

        assert!(booth.session.awaiting_still());
        assert!(booth.session.captured().is_none());
        assert!(booth.camera.is_some());

        let _ = booth.update(Message::Retake);
        assert!(booth.session.countdown_running());
        assert_eq!(booth.session.countdown(), booth.config.countdown_secs);
    }

    #[test]
    fn test_failed_encoding_keeps_waiting() {
        let mut booth = at_capture();
        let _ = booth.update(Message::StillEncoded {
            shot: 1,
            result: Err("encoder gave up".to_string()),
        });

        assert!(booth.session.captured().is_none());
        assert_eq!(booth.session.page(), Page::Capture);
    }

    #[test]
    fn test_leaving_capture_releases_camera() {
        let mut booth = at_capture();
        let _ = booth.update(Message::Home);

        assert_eq!(booth.session.page(), Page::Home);
        assert!(booth.camera.is_none());
        assert!(booth.live_frame.is_none());
    }

    #[test]
    fn test_captured_still_releases_camera() {
        let booth = at_generating();
        assert!(booth.camera.is_none());
    }

    #[test]
    fn test_leaving_generation_cancels_job() {
        let mut booth = at_generating();
        let _ = booth.update(Message::GenerationTick);
        assert!(booth.generator.is_active());

        let _ = booth.update(Message::Home);

        assert!(!booth.generator.is_active());
        assert_eq!(booth.session.progress(), 0);
    }

    #[test]
    fn test_palette_tap_places_held_item() {
        let mut booth = at_decoration();
        let _ = booth.update(Message::PaletteGrab("😀"));
        let _ = booth.update(Message::PaletteTap("😀"));

        let stickers = booth.session.stickers();
        assert_eq!(stickers.len(), 1);
        assert_eq!(stickers[0].emoji, "😀");
        assert!(booth.palette_drag.is_none());
    }

    #[test]
    fn test_release_over_other_item_places_nothing() {
        let mut booth = at_decoration();
        let _ = booth.update(Message::PaletteGrab("😀"));
        let _ = booth.update(Message::PaletteTap("😎"));

        assert!(booth.session.stickers().is_empty());
        assert!(booth.palette_drag.is_none());
    }

    #[test]
    fn test_late_preview_after_close_is_ignored() {
        let mut booth = at_capture();
        let _ = booth.update(Message::Home);

        let _ = booth.update(Message::PreviewReady {
            frame_number: 4,
            result: Ok(image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255])),
        });

        assert!(booth.live_frame.is_none());
        assert!(!booth.preview_pending);
    }

    #[test]
    fn test_release_listener_filters_events() {
        let release = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        assert!(matches!(
            pointer_released(release, event::Status::Ignored, window::Id::unique()),
            Some(Message::PointerReleased)
        ));

        let moved = Event::Mouse(mouse::Event::CursorMoved {
            position: iced::Point::ORIGIN,
        });
        assert!(pointer_released(moved, event::Status::Ignored, window::Id::unique()).is_none());
    }
}
