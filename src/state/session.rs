/// The booth session: one owned state struct driven by sequential updates
///
/// Every user click, timer tick and finished background job becomes one
/// method call here. Each method checks that the event makes sense on the
/// current page and returns whether anything changed; out-of-place events
/// are ignored. Side effects (camera, timers, encoding) are the caller's
/// job, steered by the query methods at the bottom.

use chrono::Utc;

use super::data::{CapturedImage, DecorationTab, Page, Sticker, StickerId, StyleId};
use super::placement::{clamp_origin, Placement, PlacementTarget};
use crate::generation::GenerationStatus;
use crate::i18n::Language;

/// Generation progress is held here until the job is forced to finish
pub const PROGRESS_CAP: u8 = 99;
pub const PROGRESS_DONE: u8 = 100;

/// What a countdown tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Nothing to count down
    Idle,
    /// One second elapsed; the new remaining value
    Counted(u8),
    /// Countdown reached zero: take shot number `n`
    Shoot(u32),
}

/// Which generation timer should be running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Polling the generator for progress
    Running,
    /// Finished; waiting out the delay before decoration opens
    Settling,
}

#[derive(Debug)]
pub struct Session {
    page: Page,
    language: Language,
    selected_style: Option<StyleId>,
    captured: Option<CapturedImage>,
    countdown: u8,
    countdown_start: u8,
    /// Bumped every time the shutter fires so late stills can be recognised
    shot: u32,
    progress: u8,
    decoration_tab: DecorationTab,
    stickers: Vec<Sticker>,
    sticker_size: f32,
    last_sticker_id: i64,
}

impl Session {
    pub fn new(language: Language, countdown_start: u8, sticker_size: f32) -> Self {
        Self {
            page: Page::Home,
            language,
            selected_style: None,
            captured: None,
            countdown: countdown_start,
            countdown_start,
            shot: 0,
            progress: 0,
            decoration_tab: DecorationTab::default(),
            stickers: Vec::new(),
            sticker_size,
            last_sticker_id: 0,
        }
    }

    // ========== Navigation ==========

    /// Home page: record the language and move on to style selection
    pub fn select_language(&mut self, language: Language) -> bool {
        if self.page != Page::Home {
            return false;
        }
        self.language = language;
        self.set_page(Page::Style);
        true
    }

    pub fn select_style(&mut self, style: StyleId) -> bool {
        if self.page != Page::Style {
            return false;
        }
        self.selected_style = Some(style);
        true
    }

    /// Style page "start": only once a style has been chosen
    pub fn start_capture(&mut self) -> bool {
        if self.page != Page::Style || self.selected_style.is_none() {
            return false;
        }
        self.reset_countdown();
        self.set_page(Page::Capture);
        true
    }

    /// Retake from the review state stays on the capture page; retake from
    /// decoration goes back to style selection.
    pub fn retake(&mut self) -> bool {
        match self.page {
            Page::Capture => {
                self.reset_countdown();
                true
            }
            Page::Decoration => {
                self.captured = None;
                self.progress = 0;
                self.stickers.clear();
                self.decoration_tab = DecorationTab::default();
                self.set_page(Page::Style);
                true
            }
            _ => false,
        }
    }

    /// Capture page "done": hand the still over to generation
    pub fn finish_capture(&mut self) -> bool {
        if self.page != Page::Capture || self.captured.is_none() {
            return false;
        }
        self.progress = 0;
        self.set_page(Page::Generating);
        true
    }

    /// Global reset, reachable from every page. The language is kept.
    pub fn go_home(&mut self) {
        self.selected_style = None;
        self.captured = None;
        self.countdown = self.countdown_start;
        self.progress = 0;
        self.decoration_tab = DecorationTab::default();
        self.stickers.clear();
        self.set_page(Page::Home);
    }

    // ========== Countdown & capture ==========

    pub fn tick_countdown(&mut self) -> CountdownTick {
        if !self.countdown_running() {
            return CountdownTick::Idle;
        }
        self.countdown -= 1;
        if self.countdown == 0 {
            self.shot = self.shot.wrapping_add(1);
            log::info!("📸 Shutter (shot {})", self.shot);
            CountdownTick::Shoot(self.shot)
        } else {
            CountdownTick::Counted(self.countdown)
        }
    }

    /// Accept the still for `shot`. Stills from an earlier shot, or arriving
    /// after the user left the page, are dropped.
    pub fn store_capture(&mut self, shot: u32, image: CapturedImage) -> bool {
        if self.page != Page::Capture
            || self.countdown != 0
            || self.captured.is_some()
            || shot != self.shot
        {
            log::debug!("Dropping stale still for shot {}", shot);
            return false;
        }
        log::info!("🖼️  Captured {}x{} still", image.width, image.height);
        self.captured = Some(image);
        true
    }

    fn reset_countdown(&mut self) {
        self.captured = None;
        self.countdown = self.countdown_start;
    }

    // ========== Generation ==========

    pub fn apply_generation(&mut self, status: GenerationStatus) -> bool {
        if self.page != Page::Generating || self.progress >= PROGRESS_DONE {
            return false;
        }
        match status {
            GenerationStatus::Idle => false,
            GenerationStatus::Running(progress) => {
                let next = self.progress.max(progress.min(PROGRESS_CAP));
                let changed = next != self.progress;
                self.progress = next;
                changed
            }
            GenerationStatus::Finished(output) => {
                if let Some(image) = output {
                    self.captured = Some(image);
                }
                self.progress = PROGRESS_DONE;
                log::info!("✨ Generation finished");
                true
            }
        }
    }

    /// Completion delay elapsed: open the decoration page
    pub fn settle_generation(&mut self) -> bool {
        if self.page != Page::Generating || self.progress < PROGRESS_DONE {
            return false;
        }
        self.set_page(Page::Decoration);
        true
    }

    // ========== Decoration ==========

    pub fn select_tab(&mut self, tab: DecorationTab) -> bool {
        if self.page != Page::Decoration {
            return false;
        }
        self.decoration_tab = tab;
        true
    }

    /// Append a new sticker or reposition an existing one, clamped to the
    /// container. Returns the id of the sticker that was touched.
    pub fn apply_placement(&mut self, placement: Placement) -> Option<StickerId> {
        if self.page != Page::Decoration {
            return None;
        }
        let origin = clamp_origin(placement.origin, placement.container, self.sticker_size);

        match placement.target {
            PlacementTarget::New(emoji) => {
                let id = self.next_sticker_id();
                self.stickers.push(Sticker {
                    id,
                    emoji,
                    x: origin.x,
                    y: origin.y,
                });
                log::debug!("Placed {} as sticker {}", emoji, id.0);
                Some(id)
            }
            PlacementTarget::Existing(id) => {
                let sticker = self.stickers.iter_mut().find(|sticker| sticker.id == id)?;
                sticker.x = origin.x;
                sticker.y = origin.y;
                Some(id)
            }
        }
    }

    pub fn clear_stickers(&mut self) -> bool {
        if self.page != Page::Decoration || self.stickers.is_empty() {
            return false;
        }
        self.stickers.clear();
        true
    }

    fn next_sticker_id(&mut self) -> StickerId {
        let now = Utc::now().timestamp_millis();
        self.last_sticker_id = now.max(self.last_sticker_id + 1);
        StickerId(self.last_sticker_id)
    }

    fn set_page(&mut self, page: Page) {
        if self.page != page {
            log::info!("📄 {:?} → {:?}", self.page, page);
            self.page = page;
        }
    }

    // ========== Queries ==========

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn selected_style(&self) -> Option<StyleId> {
        self.selected_style
    }

    pub fn captured(&self) -> Option<&CapturedImage> {
        self.captured.as_ref()
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn decoration_tab(&self) -> DecorationTab {
        self.decoration_tab
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn sticker_size(&self) -> f32 {
        self.sticker_size
    }

    /// The camera is held open only while waiting for the shutter
    pub fn wants_camera(&self) -> bool {
        self.page == Page::Capture && self.captured.is_none()
    }

    pub fn countdown_running(&self) -> bool {
        self.wants_camera() && self.countdown > 0
    }

    /// True between the shutter firing and the still arriving (or failing)
    pub fn awaiting_still(&self) -> bool {
        self.wants_camera() && self.countdown == 0
    }

    pub fn generation_phase(&self) -> Option<GenerationPhase> {
        if self.page != Page::Generating {
            return None;
        }
        if self.progress >= PROGRESS_DONE {
            Some(GenerationPhase::Settling)
        } else {
            Some(GenerationPhase::Running)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{Point, Size};

    const CONTAINER: Size = Size::new(400.0, 300.0);
    const STICKER: f32 = 40.0;

    fn still() -> CapturedImage {
        CapturedImage::from_png(vec![0x89, b'P', b'N', b'G'], 4, 3)
    }

    fn session() -> Session {
        Session::new(Language::English, 3, STICKER)
    }

    fn at_capture() -> Session {
        let mut session = session();
        session.select_language(Language::English);
        session.select_style(StyleId("anime"));
        assert!(session.start_capture());
        session
    }

    fn shoot(session: &mut Session) -> u32 {
        loop {
            match session.tick_countdown() {
                CountdownTick::Shoot(shot) => return shot,
                CountdownTick::Counted(_) => {}
                CountdownTick::Idle => panic!("countdown stalled"),
            }
        }
    }

    fn at_decoration() -> Session {
        let mut session = at_capture();
        let shot = shoot(&mut session);
        session.store_capture(shot, still());
        session.finish_capture();
        session.apply_generation(GenerationStatus::Finished(None));
        assert!(session.settle_generation());
        session
    }

    #[test]
    fn test_language_selection_moves_to_style() {
        for language in Language::ALL {
            let mut session = session();
            assert!(session.select_language(language));
            assert_eq!(session.page(), Page::Style);
            assert_eq!(session.language(), language);
        }
    }

    #[test]
    fn test_language_ignored_off_home() {
        let mut session = at_capture();
        assert!(!session.select_language(Language::SimplifiedChinese));
        assert_eq!(session.page(), Page::Capture);
        assert_eq!(session.language(), Language::English);
    }

    #[test]
    fn test_start_requires_style() {
        let mut session = session();
        session.select_language(Language::TraditionalChinese);

        assert!(!session.start_capture());
        assert_eq!(session.page(), Page::Style);

        session.select_style(StyleId("watercolor"));
        assert!(session.start_capture());
        assert_eq!(session.page(), Page::Capture);
        assert_eq!(session.countdown(), 3);
        assert!(session.captured().is_none());
        assert!(session.wants_camera());
    }

    #[test]
    fn test_countdown_decrements_to_single_shot() {
        let mut session = at_capture();

        assert_eq!(session.tick_countdown(), CountdownTick::Counted(2));
        assert_eq!(session.tick_countdown(), CountdownTick::Counted(1));
        assert!(matches!(session.tick_countdown(), CountdownTick::Shoot(_)));

        // Further ticks never fire a second shot
        assert_eq!(session.tick_countdown(), CountdownTick::Idle);
        assert_eq!(session.countdown(), 0);
        assert!(session.awaiting_still());
    }

    #[test]
    fn test_capture_releases_camera() {
        let mut session = at_capture();
        let shot = shoot(&mut session);

        assert!(session.store_capture(shot, still()));
        assert!(!session.wants_camera());
        assert!(!session.countdown_running());
    }

    #[test]
    fn test_retake_from_review() {
        let mut session = at_capture();
        let shot = shoot(&mut session);
        session.store_capture(shot, still());

        assert!(session.retake());
        assert_eq!(session.page(), Page::Capture);
        assert_eq!(session.countdown(), 3);
        assert!(session.captured().is_none());
        assert!(session.countdown_running());
    }

    #[test]
    fn test_stale_still_is_dropped() {
        let mut session = at_capture();
        let first = shoot(&mut session);
        session.retake();
        let second = shoot(&mut session);

        assert!(!session.store_capture(first, still()));
        assert!(session.captured().is_none());
        assert!(session.store_capture(second, still()));
    }

    #[test]
    fn test_still_after_leaving_is_dropped() {
        let mut session = at_capture();
        let shot = shoot(&mut session);
        session.go_home();

        assert!(!session.store_capture(shot, still()));
        assert!(session.captured().is_none());
    }

    #[test]
    fn test_done_requires_capture() {
        let mut session = at_capture();
        assert!(!session.finish_capture());

        let shot = shoot(&mut session);
        session.store_capture(shot, still());
        assert!(session.finish_capture());
        assert_eq!(session.page(), Page::Generating);
        assert_eq!(session.progress(), 0);
        assert_eq!(session.generation_phase(), Some(GenerationPhase::Running));
    }

    #[test]
    fn test_progress_is_monotonic_and_capped() {
        let mut session = at_capture();
        let shot = shoot(&mut session);
        session.store_capture(shot, still());
        session.finish_capture();

        session.apply_generation(GenerationStatus::Running(40));
        assert_eq!(session.progress(), 40);

        // Going backwards is ignored
        assert!(!session.apply_generation(GenerationStatus::Running(10)));
        assert_eq!(session.progress(), 40);

        session.apply_generation(GenerationStatus::Running(250));
        assert_eq!(session.progress(), PROGRESS_CAP);

        // Decoration does not open before completion is forced
        assert!(!session.settle_generation());

        session.apply_generation(GenerationStatus::Finished(None));
        assert_eq!(session.progress(), PROGRESS_DONE);
        assert_eq!(session.generation_phase(), Some(GenerationPhase::Settling));
        assert!(session.settle_generation());
        assert_eq!(session.page(), Page::Decoration);
    }

    #[test]
    fn test_generator_output_replaces_still() {
        let mut session = at_capture();
        let shot = shoot(&mut session);
        session.store_capture(shot, still());
        session.finish_capture();

        let output = CapturedImage::from_png(vec![1, 2, 3], 8, 6);
        session.apply_generation(GenerationStatus::Finished(Some(output)));

        assert_eq!(session.captured().map(|image| image.width), Some(8));
    }

    #[test]
    fn test_captured_image_only_on_photo_pages() {
        let mut session = at_decoration();
        assert!(session.captured().is_some());

        assert!(session.retake());
        assert_eq!(session.page(), Page::Style);
        assert!(session.captured().is_none());
        assert!(session.stickers().is_empty());
        assert_eq!(session.selected_style(), Some(StyleId("anime")));
    }

    #[test]
    fn test_home_resets_everything_but_language() {
        let mut session = session();
        session.select_language(Language::SimplifiedChinese);
        session.select_style(StyleId("anime"));
        session.start_capture();
        session.go_home();

        assert_eq!(session.page(), Page::Home);
        assert_eq!(session.language(), Language::SimplifiedChinese);
        assert!(session.selected_style().is_none());
        assert!(!session.wants_camera());
    }

    #[test]
    fn test_palette_drop_inserts_one_sticker_in_bounds() {
        let mut session = at_decoration();

        let placement = Placement::drop_at("🐼", Point::new(395.0, -20.0), CONTAINER, STICKER);
        let id = session.apply_placement(placement).unwrap();

        assert_eq!(session.stickers().len(), 1);
        let sticker = &session.stickers()[0];
        assert_eq!(sticker.id, id);
        assert_eq!(sticker.emoji, "🐼");
        assert!(sticker.x >= 0.0 && sticker.x + STICKER <= CONTAINER.width);
        assert!(sticker.y >= 0.0 && sticker.y + STICKER <= CONTAINER.height);
    }

    #[test]
    fn test_drag_moves_without_changing_identity() {
        let mut session = at_decoration();
        let id = session
            .apply_placement(Placement::centered("👑", CONTAINER, STICKER))
            .unwrap();

        let moved = session.apply_placement(Placement::moved(id, Point::new(10.0, 20.0), CONTAINER));

        assert_eq!(moved, Some(id));
        assert_eq!(session.stickers().len(), 1);
        assert_eq!(
            session.stickers()[0],
            Sticker { id, emoji: "👑", x: 10.0, y: 20.0 }
        );

        // Dragged past the edge: clamped
        session.apply_placement(Placement::moved(id, Point::new(1000.0, 1000.0), CONTAINER));
        assert_eq!(session.stickers()[0].x, 360.0);
        assert_eq!(session.stickers()[0].y, 260.0);
    }

    #[test]
    fn test_unknown_sticker_is_ignored() {
        let mut session = at_decoration();
        let moved = session.apply_placement(Placement::moved(StickerId(7), Point::ORIGIN, CONTAINER));
        assert!(moved.is_none());
        assert!(session.stickers().is_empty());
    }

    #[test]
    fn test_sticker_ids_are_unique() {
        let mut session = at_decoration();
        let a = session.apply_placement(Placement::centered("⭐", CONTAINER, STICKER)).unwrap();
        let b = session.apply_placement(Placement::centered("⭐", CONTAINER, STICKER)).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_placement_ignored_off_decoration() {
        let mut session = at_capture();
        assert!(session
            .apply_placement(Placement::centered("⭐", CONTAINER, STICKER))
            .is_none());
    }

    #[test]
    fn test_tabs_and_clear() {
        let mut session = at_decoration();
        assert!(session.select_tab(DecorationTab::Party));
        assert_eq!(session.decoration_tab(), DecorationTab::Party);

        assert!(!session.clear_stickers());
        session.apply_placement(Placement::centered("🎈", CONTAINER, STICKER));
        assert!(session.clear_stickers());
        assert!(session.stickers().is_empty());
    }
}
