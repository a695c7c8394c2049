use crossterm::event::{self, Event, KeyEvent};
use signal_hook::consts::{SIGHUP, SIGTERM};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub enum AppEvent {
    Input(KeyEvent),
    Tick,
    Resize(u16, u16),
    /// SIGTERM or SIGHUP received.
    Shutdown,
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        let terminate = Arc::new(AtomicBool::new(false));
        for signal in [SIGTERM, SIGHUP] {
            if let Err(err) = signal_hook::flag::register(signal, Arc::clone(&terminate)) {
                tracing::warn!(signal, error = %err, "Failed to register signal handler");
            }
        }

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                if terminate.load(Ordering::Relaxed) {
                    let _ = event_tx.send(AppEvent::Shutdown);
                    break;
                }

                // Short poll so the signal flag is checked frequently
                let timeout = tick_rate
                    .saturating_sub(last_tick.elapsed())
                    .min(Duration::from_millis(50));

                match event::poll(timeout) {
                    Ok(true) => {
                        let sent = match event::read() {
                            Ok(Event::Key(key)) => event_tx.send(AppEvent::Input(key)),
                            Ok(Event::Resize(cols, rows)) => {
                                event_tx.send(AppEvent::Resize(cols, rows))
                            }
                            Ok(_) => Ok(()),
                            Err(err) => {
                                tracing::error!(error = %err, "Terminal read failed");
                                break;
                            }
                        };
                        if sent.is_err() {
                            break;
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal poll failed");
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

        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Throw away key presses queued while a blocking action ran.
    ///
    /// Non-input events are put back in order.
    pub fn discard_input(&self) {
        let kept: Vec<AppEvent> = self
            .rx
            .try_iter()
            .filter(|event| !matches!(event, AppEvent::Input(_)))
            .collect();
        for event in kept {
            let _ = self.tx.send(event);
        }
    }
}
