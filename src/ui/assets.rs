/// Bundled static images
///
/// Everything is resolved once at startup from the configured assets
/// directory. A missing file is logged and simply not drawn.

use iced::widget::image::Handle;
use std::collections::HashMap;
use std::path::Path;

use crate::state::data::{StyleId, STYLES};

#[derive(Debug, Default)]
pub struct Assets {
    pub background: Option<Handle>,
    pub logo: Option<Handle>,
    /// Pose pictures in the home page corners: top-left, top-right, bottom-left, bottom-right
    pub corners: [Option<Handle>; 4],
    pub style_thumbnails: HashMap<StyleId, Handle>,
}

impl Assets {
    pub fn load(dir: &Path) -> Self {
        let mut missing = 0;
        let mut load = |relative: &str| {
            let path = dir.join(relative);
            if path.is_file() {
                Some(Handle::from_path(path))
            } else {
                log::debug!("Asset not found: {}", path.display());
                missing += 1;
                None
            }
        };

        let background = load("bg.png");
        let logo = load("ai-photo-booth-text-logo.png");
        let corners = [
            load("homepage-top-left.png"),
            load("homepage-top-right.png"),
            load("homepage-bottom-left.png"),
            load("homepage-bottom-right.png"),
        ];

        let mut style_thumbnails = HashMap::new();
        for style in STYLES.iter() {
            if let Some(handle) = load(&format!("styles/{}", style.thumbnail)) {
                style_thumbnails.insert(style.id, handle);
            }
        }

        if missing > 0 {
            log::warn!("⚠️  {} assets missing from {}", missing, dir.display());
        } else {
            log::info!("🖼️  Loaded assets from {}", dir.display());
        }

        Self {
            background,
            logo,
            corners,
            style_thumbnails,
        }
    }

    pub fn style_thumbnail(&self, id: StyleId) -> Option<&Handle> {
        self.style_thumbnails.get(&id)
    }
}
