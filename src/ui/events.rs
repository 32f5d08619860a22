use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

use crate::directory::RenderedPage;
use crate::shutdown::ShutdownHandle;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    /// A page finished on the render worker. Tagged with the store
    /// generation it was requested for, so stale pages can be dropped.
    PageRendered(RenderedPage),
    /// OS signal received (SIGTERM, SIGINT)
    Shutdown,
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, shutdown: ShutdownHandle) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        let spawned = thread::Builder::new()
            .name("terminal-input".to_string())
            .spawn(move || {
                let mut last_tick = Instant::now();
                loop {
                    if shutdown.is_shutting_down() {
                        let _ = event_tx.send(AppEvent::Shutdown);
                        break;
                    }

                    // Short poll so the shutdown flag is seen promptly
                    let timeout = tick_rate
                        .saturating_sub(last_tick.elapsed())
                        .min(Duration::from_millis(50));

                    match event::poll(timeout) {
                        Ok(true) => match event::read() {
                            Ok(Event::Key(key)) => {
                                if event_tx.send(AppEvent::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Ok(Event::Resize(cols, rows)) => {
                                let _ = event_tx.send(AppEvent::Resize(cols, rows));
                            }
                            Ok(_) => {}
                            Err(err) => {
                                tracing::error!(error = %err, "Failed to read terminal event");
                                break;
                            }
                        },
                        Ok(false) => {}
                        Err(err) => {
                            tracing::error!(error = %err, "Failed to poll terminal events");
                            break;
                        }
                    }

                    if last_tick.elapsed() >= tick_rate {
                        if event_tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                        last_tick = Instant::now();
                    }
                }
            });

        if let Err(err) = spawned {
            tracing::error!(error = %err, "Failed to spawn input thread");
        }

        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }
}
