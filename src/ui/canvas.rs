use iced::alignment;
use iced::mouse::{self, Cursor};
use iced::touch;
use iced::widget::canvas::{self, Frame, Path, Program, Stroke};
use iced::widget::text::Shaping;
use iced::{Color, Pixels, Point, Rectangle, Renderer, Size, Theme, Vector};

use crate::state::data::{Sticker, StickerId};
use crate::state::placement::Placement;
use crate::Message;

/// Sticker layer drawn over the captured photo
///
/// Two ways in, one way out: a palette item released over the canvas and a
/// placed sticker dragged around both emit `Message::Place`.
pub struct StickerCanvas<'a> {
    pub stickers: &'a [Sticker],
    pub sticker_size: f32,
    /// Palette item currently held by the pointer, if any
    pub held: Option<&'static str>,
}

impl Program<Message> for StickerCanvas<'_> {
    type State = DragState;

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        for sticker in self.stickers {
            let lifted = state.dragging.map(|drag| drag.id) == Some(sticker.id);
            self.draw_sticker(&mut frame, sticker.emoji, Point::new(sticker.x, sticker.y), lifted);
        }

        // Ghost of the held palette item under the pointer
        if state.dragging.is_none() {
            if let (Some(emoji), Some(pointer)) = (self.held, cursor.position_in(bounds)) {
                let half = self.sticker_size / 2.0;
                let origin = Point::new(pointer.x - half, pointer.y - half);
                self.draw_sticker(&mut frame, emoji, origin, true);
            }
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Press on a placed sticker - start dragging it
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    if self.begin_drag(state, position, Pointer::Mouse) {
                        return (canvas::event::Status::Captured, None);
                    }
                }
            }
            canvas::Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if bounds.contains(position) {
                    let position = to_local(bounds, position);
                    if self.begin_drag(state, position, Pointer::Finger(id)) {
                        return (canvas::event::Status::Captured, None);
                    }
                }
            }

            // Pointer moves anywhere in the window while dragging
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if let Some(message) = self.drag_to(state, Pointer::Mouse, position, bounds) {
                    return (canvas::event::Status::Captured, Some(message));
                }
            }
            canvas::Event::Touch(touch::Event::FingerMoved { id, position }) => {
                if let Some(message) = self.drag_to(state, Pointer::Finger(id), position, bounds) {
                    return (canvas::event::Status::Captured, Some(message));
                }
            }

            // Release - end a drag, or drop a held palette item
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if end_drag(state, Pointer::Mouse) {
                    return (canvas::event::Status::Captured, None);
                }
                if let Some(position) = cursor.position_in(bounds) {
                    if let Some(message) = self.drop_held(position, bounds) {
                        return (canvas::event::Status::Captured, Some(message));
                    }
                }
            }
            canvas::Event::Touch(touch::Event::FingerLifted { id, position }) => {
                if end_drag(state, Pointer::Finger(id)) {
                    return (canvas::event::Status::Captured, None);
                }
                if bounds.contains(position) {
                    if let Some(message) = self.drop_held(to_local(bounds, position), bounds) {
                        return (canvas::event::Status::Captured, Some(message));
                    }
                }
            }
            canvas::Event::Touch(touch::Event::FingerLost { id, .. }) => {
                end_drag(state, Pointer::Finger(id));
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.dragging.is_some() {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(position) if self.hit_test(position).is_some() => mouse::Interaction::Grab,
            Some(_) if self.held.is_some() => mouse::Interaction::Crosshair,
            _ => mouse::Interaction::default(),
        }
    }
}

impl StickerCanvas<'_> {
    /// Topmost sticker under `position` (canvas coordinates)
    fn hit_test(&self, position: Point) -> Option<&Sticker> {
        let size = Size::new(self.sticker_size, self.sticker_size);
        self.stickers
            .iter()
            .rev()
            .find(|sticker| Rectangle::new(Point::new(sticker.x, sticker.y), size).contains(position))
    }

    fn begin_drag(&self, state: &mut DragState, position: Point, pointer: Pointer) -> bool {
        if state.dragging.is_some() {
            return false;
        }
        let Some(sticker) = self.hit_test(position) else {
            return false;
        };
        state.dragging = Some(ActiveDrag {
            id: sticker.id,
            grab: position - Point::new(sticker.x, sticker.y),
            pointer,
        });
        true
    }

    fn drag_to(
        &self,
        state: &DragState,
        pointer: Pointer,
        position: Point,
        bounds: Rectangle,
    ) -> Option<Message> {
        let drag = state.dragging.filter(|drag| drag.pointer == pointer)?;
        let origin = to_local(bounds, position) - drag.grab;
        Some(Message::Place(Placement::moved(drag.id, origin, bounds.size())))
    }

    fn drop_held(&self, position: Point, bounds: Rectangle) -> Option<Message> {
        let emoji = self.held?;
        Some(Message::Place(Placement::drop_at(
            emoji,
            position,
            bounds.size(),
            self.sticker_size,
        )))
    }

    fn draw_sticker(&self, frame: &mut Frame, emoji: &str, origin: Point, highlighted: bool) {
        let size = Size::new(self.sticker_size, self.sticker_size);

        if highlighted {
            frame.stroke(
                &Path::rectangle(origin, size),
                Stroke::default()
                    .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.8))
                    .with_width(2.0),
            );
        }

        frame.fill_text(canvas::Text {
            content: emoji.to_string(),
            position: Point::new(origin.x + size.width / 2.0, origin.y + size.height / 2.0),
            size: Pixels(self.sticker_size * 0.8),
            color: Color::WHITE,
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Center,
            shaping: Shaping::Advanced,
            ..canvas::Text::default()
        });
    }
}

fn to_local(bounds: Rectangle, position: Point) -> Point {
    Point::new(position.x - bounds.x, position.y - bounds.y)
}

/// Returns whether a drag owned by `pointer` was in progress
fn end_drag(state: &mut DragState, pointer: Pointer) -> bool {
    match state.dragging {
        Some(drag) if drag.pointer == pointer => {
            state.dragging = None;
            true
        }
        _ => false,
    }
}

/// Which input device owns a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Mouse,
    Finger(touch::Finger),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub id: StickerId,
    /// Pointer offset from the sticker's top-left corner
    pub grab: Vector,
    pub pointer: Pointer,
}

/// State for drag interactions
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub dragging: Option<ActiveDrag>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::placement::PlacementTarget;

    const BOUNDS: Rectangle = Rectangle {
        x: 100.0,
        y: 50.0,
        width: 400.0,
        height: 300.0,
    };

    fn stickers() -> Vec<Sticker> {
        vec![
            Sticker { id: StickerId(1), emoji: "🐶", x: 10.0, y: 10.0 },
            Sticker { id: StickerId(2), emoji: "🐱", x: 30.0, y: 30.0 },
        ]
    }

    fn cursor_at(x: f32, y: f32) -> Cursor {
        Cursor::Available(Point::new(x, y))
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let stickers = stickers();
        let layer = StickerCanvas { stickers: &stickers, sticker_size: 40.0, held: None };

        assert_eq!(layer.hit_test(Point::new(35.0, 35.0)).map(|s| s.id), Some(StickerId(2)));
        assert_eq!(layer.hit_test(Point::new(15.0, 15.0)).map(|s| s.id), Some(StickerId(1)));
        assert!(layer.hit_test(Point::new(300.0, 200.0)).is_none());
    }

    #[test]
    fn test_drag_emits_moves_until_release() {
        let stickers = stickers();
        let layer = StickerCanvas { stickers: &stickers, sticker_size: 40.0, held: None };
        let mut state = DragState::default();

        // Press 5px into sticker 1 (window coordinates)
        let press = canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        let (status, message) = layer.update(&mut state, press, BOUNDS, cursor_at(115.0, 65.0));
        assert_eq!(status, canvas::event::Status::Captured);
        assert!(message.is_none());

        // Move outside the canvas: still tracked, container-relative, not yet clamped
        let moved = canvas::Event::Mouse(mouse::Event::CursorMoved { position: Point::new(60.0, 95.0) });
        let (_, message) = layer.update(&mut state, moved.clone(), BOUNDS, cursor_at(60.0, 95.0));
        match message {
            Some(Message::Place(placement)) => {
                assert_eq!(placement.target, PlacementTarget::Existing(StickerId(1)));
                assert_eq!(placement.origin, Point::new(-45.0, 40.0));
                assert_eq!(placement.container, BOUNDS.size());
            }
            other => panic!("expected a placement, got {:?}", other),
        }

        // Release ends the drag; later moves are ignored
        let release = canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        layer.update(&mut state, release, BOUNDS, cursor_at(60.0, 95.0));
        assert!(state.dragging.is_none());

        let (status, message) = layer.update(&mut state, moved, BOUNDS, cursor_at(60.0, 95.0));
        assert_eq!(status, canvas::event::Status::Ignored);
        assert!(message.is_none());
    }

    #[test]
    fn test_release_with_held_item_drops_it() {
        let layer = StickerCanvas { stickers: &[], sticker_size: 40.0, held: Some("🎉") };
        let mut state = DragState::default();

        let release = canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        let (_, message) = layer.update(&mut state, release, BOUNDS, cursor_at(300.0, 200.0));

        match message {
            Some(Message::Place(placement)) => {
                assert_eq!(placement.target, PlacementTarget::New("🎉"));
                assert_eq!(placement.origin, Point::new(180.0, 130.0));
            }
            other => panic!("expected a drop, got {:?}", other),
        }
    }

    #[test]
    fn test_release_outside_does_not_drop() {
        let layer = StickerCanvas { stickers: &[], sticker_size: 40.0, held: Some("🎉") };
        let mut state = DragState::default();

        let release = canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        let (_, message) = layer.update(&mut state, release, BOUNDS, cursor_at(20.0, 20.0));
        assert!(message.is_none());
    }

    #[test]
    fn test_touch_drag_ignores_other_fingers() {
        let stickers = stickers();
        let layer = StickerCanvas { stickers: &stickers, sticker_size: 40.0, held: None };
        let mut state = DragState::default();

        let press = canvas::Event::Touch(touch::Event::FingerPressed {
            id: touch::Finger(1),
            position: Point::new(115.0, 65.0),
        });
        layer.update(&mut state, press, BOUNDS, Cursor::Unavailable);
        assert!(state.dragging.is_some());

        let other = canvas::Event::Touch(touch::Event::FingerMoved {
            id: touch::Finger(2),
            position: Point::new(200.0, 200.0),
        });
        let (_, message) = layer.update(&mut state, other, BOUNDS, Cursor::Unavailable);
        assert!(message.is_none());

        let lifted = canvas::Event::Touch(touch::Event::FingerLifted {
            id: touch::Finger(1),
            position: Point::new(115.0, 65.0),
        });
        layer.update(&mut state, lifted, BOUNDS, Cursor::Unavailable);
        assert!(state.dragging.is_none());
    }
}
