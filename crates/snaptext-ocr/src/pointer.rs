use std::any::Any;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use device_query::{DeviceEvents, DeviceEventsHandler, DeviceQuery, DeviceState};
use kanal::Sender;
use snaptext_core::Pointer;
use snaptext_types::{Point, PointerEvent};

/// device_query numbers the left button 1
const LEFT_BUTTON: usize = 1;

/// Cursor position from the OS
pub struct DevicePointer;

impl Pointer for DevicePointer {
    fn position(&self) -> Point {
        DeviceState::new().get_mouse().coords.into()
    }
}

/// Last known cursor position, shared by the device callbacks
struct Tracker {
    last: Mutex<Point>,
}

impl Tracker {
    fn new(seed: Point) -> Self {
        Self {
            last: Mutex::new(seed),
        }
    }

    fn remember(&self, position: Point) {
        if let Ok(mut last) = self.last.lock() {
            *last = position;
        }
    }

    fn last(&self) -> Option<Point> {
        self.last.lock().ok().map(|last| *last)
    }

    fn moved(&self, position: Point) -> PointerEvent {
        self.remember(position);
        PointerEvent::Moved(position)
    }

    /// `at` is where the cursor is when the press is reported
    fn pressed(&self, button: usize, at: Point) -> PointerEvent {
        self.remember(at);
        if button == LEFT_BUTTON {
            PointerEvent::PrimaryDown(at)
        } else {
            PointerEvent::Abort
        }
    }

    fn released(&self, button: usize) -> Option<PointerEvent> {
        if button != LEFT_BUTTON {
            return None;
        }
        let at = self.last().unwrap_or_else(|| DevicePointer.position());
        Some(PointerEvent::PrimaryUp(at))
    }
}

/// Keeps the OS pointer callbacks alive; events stop when dropped
pub struct PointerListener {
    _handler: DeviceEventsHandler,
    _guards: Vec<Box<dyn Any>>,
}

/// Forward pointer input to `tx`.
///
/// Left button press/release become primary events; any other button
/// aborts the selection. Events are dropped when the channel is full.
pub fn listen(tx: Sender<PointerEvent>, poll_every: Duration) -> Result<PointerListener> {
    let handler =
        DeviceEventsHandler::new(poll_every).context("Pointer event handler already running")?;

    let tracker = Arc::new(Tracker::new(DevicePointer.position()));

    let move_guard = {
        let tx = tx.clone();
        let tracker = tracker.clone();
        handler.on_mouse_move(move |&(x, y): &(i32, i32)| {
            forward(&tx, tracker.moved(Point::new(x, y)));
        })
    };

    let down_guard = {
        let tx = tx.clone();
        let tracker = tracker.clone();
        handler.on_mouse_down(move |button: &usize| {
            forward(&tx, tracker.pressed(*button, DevicePointer.position()));
        })
    };

    let up_guard = handler.on_mouse_up(move |button: &usize| {
        if let Some(event) = tracker.released(*button) {
            forward(&tx, event);
        }
    });

    tracing::debug!("Pointer listener started");

    Ok(PointerListener {
        _handler: handler,
        _guards: vec![Box::new(move_guard), Box::new(down_guard), Box::new(up_guard)],
    })
}

fn forward(tx: &Sender<PointerEvent>, event: PointerEvent) {
    match tx.try_send(event) {
        Ok(true) => {}
        Ok(false) => tracing::trace!("Pointer queue full, dropped {:?}", event),
        Err(e) => tracing::trace!("Pointer queue closed: {}", e),
    }
}
