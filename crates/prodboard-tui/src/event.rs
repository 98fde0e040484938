//! Terminal input pump.
//!
//! A background task turns crossterm input into [`Event`]s and interleaves
//! two timers: a slow tick for housekeeping and a fast one for redraws.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// New terminal size as (cols, rows).
    Resize(u16, u16),
    /// Housekeeping tick (toast expiry).
    Tick,
    Render,
}

/// Receiving end of the input pump. The task stops when this is dropped
/// or when the parent token is cancelled.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    stop: CancellationToken,
}

impl EventReader {
    pub fn spawn(parent: &CancellationToken, tick_every: Duration, render_every: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = parent.child_token();
        tokio::spawn(pump(tx, stop.clone(), tick_every, render_every));
        Self { rx, stop }
    }

    /// `None` once the pump has exited.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

fn timer(every: Duration) -> Interval {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn pump(
    tx: mpsc::UnboundedSender<Event>,
    stop: CancellationToken,
    tick_every: Duration,
    render_every: Duration,
) {
    let mut input = EventStream::new();
    let mut tick = timer(tick_every);
    let mut render = timer(render_every);

    loop {
        let event = tokio::select! {
            () = stop.cancelled() => return,
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            Some(Ok(raw)) = input.next() => match translate(raw) {
                Some(event) => event,
                None => continue,
            },
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

/// Key presses and resizes pass through; releases, repeats, mouse and
/// focus events are dropped.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        _ => None,
    }
}
