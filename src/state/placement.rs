/// Sticker placement updates
///
/// Dropping a palette item and dragging a placed sticker both end up as a
/// `Placement`. The session applies it with `Session::apply_placement`, so
/// clamping to the photo container lives in exactly one place.

use iced::{Point, Size};

use super::data::StickerId;

/// Which sticker a placement refers to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementTarget {
    /// A palette item dropped or tapped onto the photo
    New(&'static str),
    /// A sticker already on the photo being dragged
    Existing(StickerId),
}

/// Request to put a sticker's top-left corner at `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub target: PlacementTarget,
    /// Top-left corner relative to the photo container
    pub origin: Point,
    /// Size of the photo container when the placement was made
    pub container: Size,
}

impl Placement {
    /// Palette item dropped with the pointer at `pointer` (container coordinates)
    pub fn drop_at(emoji: &'static str, pointer: Point, container: Size, sticker_size: f32) -> Self {
        let half = sticker_size / 2.0;
        Self {
            target: PlacementTarget::New(emoji),
            origin: Point::new(pointer.x - half, pointer.y - half),
            container,
        }
    }

    /// Palette item tapped: centre it on the photo
    pub fn centered(emoji: &'static str, container: Size, sticker_size: f32) -> Self {
        let centre = Point::new(container.width / 2.0, container.height / 2.0);
        Self::drop_at(emoji, centre, container, sticker_size)
    }

    /// Placed sticker dragged so that its top-left corner sits at `origin`
    pub fn moved(id: StickerId, origin: Point, container: Size) -> Self {
        Self {
            target: PlacementTarget::Existing(id),
            origin,
            container,
        }
    }
}

/// Clamp a sticker origin so the whole sticker stays inside the container.
/// A container smaller than the sticker pins it to the top-left corner.
pub fn clamp_origin(origin: Point, container: Size, sticker_size: f32) -> Point {
    let max_x = (container.width - sticker_size).max(0.0);
    let max_y = (container.height - sticker_size).max(0.0);
    Point::new(origin.x.clamp(0.0, max_x), origin.y.clamp(0.0, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size::new(400.0, 300.0);

    #[test]
    fn test_clamp_inside_is_untouched() {
        let origin = clamp_origin(Point::new(100.0, 50.0), CONTAINER, 40.0);
        assert_eq!(origin, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_clamp_past_edges() {
        assert_eq!(
            clamp_origin(Point::new(-30.0, -5.0), CONTAINER, 40.0),
            Point::new(0.0, 0.0)
        );
        assert_eq!(
            clamp_origin(Point::new(390.0, 299.0), CONTAINER, 40.0),
            Point::new(360.0, 260.0)
        );
    }

    #[test]
    fn test_clamp_in_tiny_container() {
        let origin = clamp_origin(Point::new(12.0, 12.0), Size::new(20.0, 20.0), 40.0);
        assert_eq!(origin, Point::ORIGIN);
    }

    #[test]
    fn test_drop_centres_on_pointer() {
        let placement = Placement::drop_at("🎉", Point::new(200.0, 150.0), CONTAINER, 40.0);
        assert_eq!(placement.origin, Point::new(180.0, 130.0));
        assert_eq!(placement.target, PlacementTarget::New("🎉"));
    }

    #[test]
    fn test_centered_placement() {
        let placement = Placement::centered("⭐", CONTAINER, 40.0);
        assert_eq!(placement.origin, Point::new(180.0, 130.0));
    }
}
