/// User interface module
///
/// - Page views (pages.rs)
/// - Sticker drag-and-drop canvas (canvas.rs)
/// - Generation progress ring (progress.rs)
/// - Bundled images (assets.rs)

pub mod assets;
pub mod canvas;
pub mod pages;
pub mod progress;
