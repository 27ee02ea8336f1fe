/// State management module
///
/// This module holds the whole booth session, including:
/// - Shared data structures (data.rs)
/// - The page state machine and sticker list (session.rs)
/// - The placement interface both sticker drag paths share (placement.rs)

pub mod data;
pub mod placement;
pub mod session;
