/// Shared data structures for the booth session
///
/// These types flow between the session state machine, the capture
/// pipeline and the UI layer.

use iced::widget::image::Handle;
use std::fmt;
use std::sync::Arc;

use crate::i18n::Language;

/// The five mutually exclusive pages of the booth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Style,
    Capture,
    Generating,
    Decoration,
}

/// Identifier of an entry in the style catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleId(pub &'static str);

/// A visual template the user picks before capture (cosmetic only)
#[derive(Debug)]
pub struct Style {
    pub id: StyleId,
    /// Display names: English, Traditional Chinese, Simplified Chinese
    names: [&'static str; 3],
    /// Thumbnail filename inside `<assets>/styles/`
    pub thumbnail: &'static str,
    /// Accent colour used when the thumbnail is missing
    pub accent: [u8; 3],
}

impl Style {
    pub fn name(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.names[0],
            Language::TraditionalChinese => self.names[1],
            Language::SimplifiedChinese => self.names[2],
        }
    }

    /// Look up a style by id
    pub fn find(id: StyleId) -> Option<&'static Style> {
        STYLES.iter().find(|style| style.id == id)
    }
}

pub static STYLES: [Style; 4] = [
    Style {
        id: StyleId("anime"),
        names: ["Anime", "動漫", "动漫"],
        thumbnail: "anime.png",
        accent: [236, 112, 160],
    },
    Style {
        id: StyleId("oil-painting"),
        names: ["Oil Painting", "油畫", "油画"],
        thumbnail: "oil-painting.png",
        accent: [196, 142, 64],
    },
    Style {
        id: StyleId("cyberpunk"),
        names: ["Cyberpunk", "賽博朋克", "赛博朋克"],
        thumbnail: "cyberpunk.png",
        accent: [64, 220, 240],
    },
    Style {
        id: StyleId("watercolor"),
        names: ["Watercolor", "水彩", "水彩"],
        thumbnail: "watercolor.png",
        accent: [120, 180, 120],
    },
];

/// Tabs of the sticker palette on the decoration page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecorationTab {
    #[default]
    Faces,
    Animals,
    Party,
}

impl DecorationTab {
    pub const ALL: [DecorationTab; 3] = [
        DecorationTab::Faces,
        DecorationTab::Animals,
        DecorationTab::Party,
    ];

    /// Emoji offered under this tab
    pub fn palette(self) -> &'static [&'static str] {
        match self {
            DecorationTab::Faces => &["😀", "😎", "😍", "🤪", "😜", "🥳", "😇", "🤩"],
            DecorationTab::Animals => &["🐶", "🐱", "🐼", "🦊", "🐰", "🐸", "🦄", "🐧"],
            DecorationTab::Party => &["🎉", "🎈", "🎂", "👑", "⭐", "💖", "🌈", "✨"],
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        let labels = language.labels();
        match self {
            DecorationTab::Faces => labels.tab_faces,
            DecorationTab::Animals => labels.tab_animals,
            DecorationTab::Party => labels.tab_party,
        }
    }
}

/// Time-based sticker identifier (milliseconds since the Unix epoch,
/// bumped when two stickers land in the same millisecond)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StickerId(pub i64);

/// A sticker placed over the captured photo
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    pub id: StickerId,
    pub emoji: &'static str,
    /// Offset of the sticker's top-left corner within the photo container
    pub x: f32,
    pub y: f32,
}

/// The still taken at the end of the countdown
#[derive(Clone)]
pub struct CapturedImage {
    /// PNG-encoded bytes
    pub png: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Ready-to-render handle over the same bytes
    pub handle: Handle,
}

impl CapturedImage {
    pub fn from_png(png: Vec<u8>, width: u32, height: u32) -> Self {
        let png = Arc::new(png);
        let handle = Handle::from_bytes(png.as_ref().clone());
        Self {
            png,
            width,
            height,
            handle,
        }
    }
}

// The PNG bytes are not worth printing
impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_len", &self.png.len())
            .finish()
    }
}
