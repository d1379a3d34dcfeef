use std::sync::Mutex;

use snaptext_core::Overlay;
use snaptext_types::Point;

/// Overlay that reports the selection rectangle through tracing.
///
/// Stands in for a drawing surface on platforms where none is wired up.
#[derive(Default)]
pub struct LogOverlay {
    current: Mutex<Option<(Point, Point)>>,
}

impl LogOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Overlay for LogOverlay {
    fn draw_rect(&self, from: Point, to: Point) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        if *current != Some((from, to)) {
            tracing::debug!(
                "[OVERLAY] ({}, {}) -> ({}, {})",
                from.x,
                from.y,
                to.x,
                to.y
            );
            *current = Some((from, to));
        }
    }

    fn clear_rect(&self) {
        if let Ok(mut current) = self.current.lock() {
            if current.take().is_some() {
                tracing::debug!("[OVERLAY] Cleared");
            }
        }
    }

    fn refresh(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_then_clear() {
        let overlay = LogOverlay::new();
        overlay.draw_rect(Point::new(1, 2), Point::new(30, 40));
        overlay.draw_rect(Point::new(1, 2), Point::new(35, 45));
        assert_eq!(
            *overlay.current.lock().unwrap(),
            Some((Point::new(1, 2), Point::new(35, 45)))
        );

        overlay.clear_rect();
        assert_eq!(*overlay.current.lock().unwrap(), None);

        // Clearing twice is harmless
        overlay.clear_rect();
        assert_eq!(*overlay.current.lock().unwrap(), None);
    }
}
