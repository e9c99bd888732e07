use super::geom::Vec2;
use super::input::{ActionStates, InputAction};
use super::rendering::Surface;

/// Immutable view of the input state for one simulation tick. Movement
/// actions report held state; `fire_pressed` is edge-triggered and true for
/// exactly one tick per click.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    cursor_position_px: Option<Vec2>,
    fire_pressed: bool,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        cursor_position_px: Option<Vec2>,
        fire_pressed: bool,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            cursor_position_px,
            fire_pressed,
            window_width,
            window_height,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn cursor_position_px(&self) -> Option<Vec2> {
        self.cursor_position_px
    }

    pub fn fire_pressed(&self) -> bool {
        self.fire_pressed
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_cursor_position_px(mut self, cursor_position_px: Option<Vec2>) -> Self {
        self.cursor_position_px = cursor_position_px;
        self
    }

    pub fn with_fire_pressed(mut self, fire_pressed: bool) -> Self {
        self.fire_pressed = fire_pressed;
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }
}

/// A simulation driven by the fixed-timestep loop: one `update` per tick,
/// one `render` per presented frame.
pub trait Scene {
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot);
    fn render(&mut self, surface: &mut Surface<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_action_and_fire_state() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::MoveRight, true)
            .with_fire_pressed(true)
            .with_cursor_position_px(Some(Vec2::new(10.0, 20.0)))
            .with_window_size((640, 480));

        assert!(snapshot.is_down(InputAction::MoveRight));
        assert!(!snapshot.is_down(InputAction::MoveLeft));
        assert!(snapshot.fire_pressed());
        assert_eq!(snapshot.window_size(), (640, 480));
        let cursor = snapshot.cursor_position_px().expect("cursor");
        assert!((cursor.x - 10.0).abs() < 0.0001);
    }

    #[test]
    fn empty_snapshot_reports_nothing() {
        let snapshot = InputSnapshot::empty();
        assert!(!snapshot.quit_requested());
        assert!(!snapshot.fire_pressed());
        assert!(snapshot.cursor_position_px().is_none());
    }
}
