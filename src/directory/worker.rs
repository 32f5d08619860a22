//! Background page renderer running on its own thread.

use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use thiserror::Error;

use crate::directory::render::{render_page, Fragment};
use crate::retailer::Retailer;

/// Work item for the render thread. Owns its items; nothing is shared.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Store generation the page number refers to.
    pub generation: u64,
    pub page: usize,
    pub start_index: usize,
    pub items: Vec<Retailer>,
}

/// Completed page, delivered back to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub generation: u64,
    pub page: usize,
    pub fragment: Fragment,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to spawn render worker: {0}")]
    Spawn(#[source] io::Error),

    #[error("Render worker is no longer running")]
    Disconnected,
}

/// Handle to the render thread.
///
/// Dropping the handle closes the request channel and joins the thread.
pub struct RenderWorker {
    requests: Option<Sender<RenderRequest>>,
    handle: Option<JoinHandle<()>>,
}

impl RenderWorker {
    /// Starts the worker. `deliver` is called on the worker thread with each
    /// finished page and is expected to forward it to the UI thread.
    pub fn spawn<F>(deliver: F) -> Result<Self, RenderError>
    where
        F: Fn(RenderedPage) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<RenderRequest>();
        let handle = thread::Builder::new()
            .name("page-renderer".to_string())
            .spawn(move || {
                for request in rx {
                    let fragment = render_page(&request.items, request.start_index);
                    tracing::trace!(
                        page = request.page,
                        generation = request.generation,
                        cards = fragment.len(),
                        "Rendered page in background"
                    );
                    deliver(RenderedPage {
                        generation: request.generation,
                        page: request.page,
                        fragment,
                    });
                }
            })
            .map_err(RenderError::Spawn)?;

        Ok(Self {
            requests: Some(tx),
            handle: Some(handle),
        })
    }

    pub fn submit(&self, request: RenderRequest) -> Result<(), RenderError> {
        let Some(requests) = &self.requests else {
            return Err(RenderError::Disconnected);
        };
        requests.send(request).map_err(|_| RenderError::Disconnected)
    }

    /// False once the render thread has exited, e.g. after a panic while
    /// rendering or delivering a page.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn renders_requests_off_thread_in_order() {
        let (tx, rx) = mpsc::channel();
        let worker = RenderWorker::spawn(move |page| {
            let _ = tx.send((thread::current().name().map(str::to_string), page));
        })
        .unwrap();

        for page in [2, 3] {
            let items = vec![Retailer::new(format!("Shop {page}"), "ADYAR")];
            worker
                .submit(RenderRequest {
                    generation: 4,
                    page,
                    start_index: (page - 1) * 20,
                    items,
                })
                .unwrap();
        }

        let (thread_name, first) = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let (_, second) = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(thread_name.as_deref(), Some("page-renderer"));
        assert_eq!((first.page, first.generation), (2, 4));
        assert_eq!(first.fragment.cards()[0].number, 21);
        assert_eq!(second.page, 3);
    }

    #[test]
    fn panicking_sink_stops_the_worker() {
        let worker = RenderWorker::spawn(|_| panic!("sink failed")).unwrap();
        assert!(worker.is_running());
        worker
            .submit(RenderRequest {
                generation: 1,
                page: 2,
                start_index: 20,
                items: vec![Retailer::new("Shop", "ADYAR")],
            })
            .unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while worker.is_running() && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert!(!worker.is_running());
    }

    #[test]
    fn drop_joins_the_thread() {
        let worker = RenderWorker::spawn(|_| {}).unwrap();
        drop(worker);
    }
}
