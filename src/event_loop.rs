use std::io;
use std::time::Duration;

use crossterm::event::{Event, MouseEventKind};

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The desktop's message pump.
///
/// Polls the input driver, hands every event to the handler and calls the
/// handler with `None` between bursts so the host can redraw.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    /// Run until the handler returns `ControlFlow::Quit`.
    ///
    /// Pending events are drained in one go. Runs of mouse drag events are
    /// collapsed to the last one so a fast drag does not leave the window
    /// trailing behind the pointer.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                let mut burst = Vec::new();
                loop {
                    burst.push(self.driver.read()?);
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
                for event in coalesce_drags(burst) {
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }
}

fn is_drag(event: &Event) -> bool {
    matches!(event, Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Drag(_)))
}

/// Drop every drag event that is immediately followed by another drag.
pub fn coalesce_drags(events: Vec<Event>) -> Vec<Event> {
    let mut out: Vec<Event> = Vec::with_capacity(events.len());
    for event in events {
        if is_drag(&event) && out.last().is_some_and(is_drag) {
            out.pop();
        }
        out.push(event);
    }
    out
}
