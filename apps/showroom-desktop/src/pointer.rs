use winit::dpi::PhysicalPosition;
use winit::event::MouseButton;

/// What a held button does while the cursor moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Orbit,
    Pan,
}

/// Button and cursor tracking for orbit and pan drags.
#[derive(Debug, Default)]
pub struct PointerState {
    drag: Option<DragMode>,
    cursor: Option<PhysicalPosition<f64>>,
}

impl PointerState {
    pub fn drag(&self) -> Option<DragMode> {
        self.drag
    }

    /// Left starts an orbit, right a pan. Releasing the button that started
    /// the current drag ends it.
    pub fn on_button(&mut self, button: MouseButton, pressed: bool) {
        let mode = match button {
            MouseButton::Left => DragMode::Orbit,
            MouseButton::Right => DragMode::Pan,
            _ => return,
        };
        if pressed {
            self.drag = Some(mode);
        } else if self.drag == Some(mode) {
            self.drag = None;
        }
    }

    /// Record a cursor position. Returns the drag mode and pixel delta when a
    /// drag is active and a previous position is known.
    pub fn on_move(&mut self, position: PhysicalPosition<f64>) -> Option<(DragMode, f32, f32)> {
        let prev = self.cursor.replace(position)?;
        let mode = self.drag?;
        Some((
            mode,
            (position.x - prev.x) as f32,
            (position.y - prev.y) as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_ends_the_drag() {
        let mut pointer = PointerState::default();
        pointer.on_button(MouseButton::Left, true);
        assert_eq!(pointer.drag(), Some(DragMode::Orbit));
        pointer.on_button(MouseButton::Left, false);
        assert_eq!(pointer.drag(), None);
    }

    #[test]
    fn release_without_press_is_harmless() {
        let mut pointer = PointerState::default();
        pointer.on_button(MouseButton::Left, false);
        pointer.on_button(MouseButton::Right, false);
        assert_eq!(pointer.drag(), None);
    }

    #[test]
    fn other_button_release_keeps_the_drag() {
        let mut pointer = PointerState::default();
        pointer.on_button(MouseButton::Right, true);
        pointer.on_button(MouseButton::Left, false);
        pointer.on_button(MouseButton::Middle, false);
        assert_eq!(pointer.drag(), Some(DragMode::Pan));
    }

    #[test]
    fn moves_report_deltas_only_while_dragging() {
        let mut pointer = PointerState::default();
        assert_eq!(pointer.on_move(PhysicalPosition::new(10.0, 10.0)), None);
        assert_eq!(pointer.on_move(PhysicalPosition::new(15.0, 10.0)), None);

        pointer.on_button(MouseButton::Right, true);
        assert_eq!(
            pointer.on_move(PhysicalPosition::new(20.0, 4.0)),
            Some((DragMode::Pan, 5.0, -6.0))
        );

        pointer.on_button(MouseButton::Right, false);
        assert_eq!(pointer.on_move(PhysicalPosition::new(30.0, 4.0)), None);
    }
}
