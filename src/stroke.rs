use crate::model::{LogicalPoint, ToolState};
use crate::surface::Surface;

/// Two-state stroke machine: idle until a pointer goes down, drawing until it
/// comes back up (or leaves, or the platform cancels). While drawing it only
/// remembers the last point; rendered pixels are the stroke's persistent
/// form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrokeEngine {
    last_point: Option<LogicalPoint>,
}

impl StrokeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.last_point.is_some()
    }

    /// Pointer down: render the zero-length stroke as a dot so a tap leaves a
    /// mark, and arm the engine for subsequent moves.
    pub fn begin(&mut self, surface: &mut Surface, tool: &ToolState, point: LogicalPoint) {
        surface.stamp_dot(point, tool);
        self.last_point = Some(point);
    }

    /// Pointer move: extend the stroke from the previous point. Moves without
    /// a preceding down (drag-without-press) are ignored.
    pub fn extend(&mut self, surface: &mut Surface, tool: &ToolState, point: LogicalPoint) {
        let Some(last) = self.last_point else {
            return;
        };
        surface.stroke_segment(last, point, tool);
        self.last_point = Some(point);
    }

    /// Pointer up, leave, or cancel: back to idle. No pixels change.
    pub fn finish(&mut self) {
        self.last_point = None;
    }
}

#[cfg(test)]
mod tests {
    use super::StrokeEngine;
    use crate::model::{Color, LogicalPoint, ToolState};
    use crate::surface::Surface;

    const PAPER: Color = Color::rgba(17, 17, 17, 255);
    const INK: Color = Color::rgba(255, 255, 255, 255);

    fn surface() -> Surface {
        Surface::new(32.0, 32.0, 1.0, PAPER)
    }

    #[test]
    fn move_in_idle_changes_no_pixels() {
        let mut surface = surface();
        let before = surface.buffer().pixels.clone();
        let mut engine = StrokeEngine::new();

        engine.extend(&mut surface, &ToolState::default(), LogicalPoint::new(10.0, 10.0));

        assert_eq!(surface.buffer().pixels, before);
        assert!(!engine.is_active());
        assert!(!surface.has_content());
    }

    #[test]
    fn down_renders_a_dot_and_arms_the_engine() {
        let mut surface = surface();
        let mut engine = StrokeEngine::new();
        let tool = ToolState::new(4.0, INK);

        engine.begin(&mut surface, &tool, LogicalPoint::new(16.0, 16.0));

        assert!(engine.is_active());
        assert!(surface.has_content());
        assert_eq!(surface.buffer().pixel(16, 16), INK);
        assert_eq!(surface.buffer().pixel(18, 16), INK);
        assert_eq!(surface.buffer().pixel(19, 16), PAPER);
    }

    #[test]
    fn moves_chain_segments_through_the_delivered_points() {
        let mut surface = surface();
        let mut engine = StrokeEngine::new();
        let tool = ToolState::new(2.0, INK);

        engine.begin(&mut surface, &tool, LogicalPoint::new(4.0, 4.0));
        engine.extend(&mut surface, &tool, LogicalPoint::new(20.0, 4.0));
        engine.extend(&mut surface, &tool, LogicalPoint::new(20.0, 24.0));

        // midpoints of both segments
        assert_eq!(surface.buffer().pixel(12, 4), INK);
        assert_eq!(surface.buffer().pixel(20, 14), INK);
        // the corner is shared by both segments
        assert_eq!(surface.buffer().pixel(20, 4), INK);
        // nowhere near the path
        assert_eq!(surface.buffer().pixel(4, 24), PAPER);
    }

    #[test]
    fn finish_disarms_so_later_moves_are_ignored() {
        let mut surface = surface();
        let mut engine = StrokeEngine::new();
        let tool = ToolState::new(2.0, INK);

        engine.begin(&mut surface, &tool, LogicalPoint::new(8.0, 8.0));
        engine.finish();
        assert!(!engine.is_active());

        let before = surface.buffer().pixels.clone();
        engine.extend(&mut surface, &tool, LogicalPoint::new(28.0, 28.0));
        assert_eq!(surface.buffer().pixels, before);
    }

    #[test]
    fn tool_changes_between_moves_affect_only_the_next_segment() {
        let mut surface = surface();
        let mut engine = StrokeEngine::new();
        let mut tool = ToolState::new(2.0, INK);

        engine.begin(&mut surface, &tool, LogicalPoint::new(4.0, 8.0));
        engine.extend(&mut surface, &tool, LogicalPoint::new(16.0, 8.0));

        tool.set_color(Color::rgba(255, 0, 0, 255));
        engine.extend(&mut surface, &tool, LogicalPoint::new(16.0, 24.0));

        // first segment keeps its original ink
        assert_eq!(surface.buffer().pixel(10, 8), INK);
        // second segment picks up the new color
        assert_eq!(surface.buffer().pixel(16, 20), Color::rgba(255, 0, 0, 255));
    }

    #[test]
    fn begin_while_active_starts_fresh_from_the_new_point() {
        let mut surface = surface();
        let mut engine = StrokeEngine::new();
        let tool = ToolState::new(2.0, INK);

        engine.begin(&mut surface, &tool, LogicalPoint::new(4.0, 4.0));
        engine.begin(&mut surface, &tool, LogicalPoint::new(24.0, 24.0));
        engine.extend(&mut surface, &tool, LogicalPoint::new(24.0, 28.0));

        // no segment bridges the two down points
        assert_eq!(surface.buffer().pixel(14, 14), PAPER);
        assert_eq!(surface.buffer().pixel(24, 26), INK);
    }
}
