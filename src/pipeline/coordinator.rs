/// Filter pipeline coordinator
///
/// Ties the three pipeline roles together around a screen's
/// collaborators: the dispatcher accepts a request on the UI context
/// and marks the screen busy, the executor runs the chain on the
/// worker pool, and the completion router posts the result back onto
/// the UI context where the display surface and busy indicator live.
///
/// The collaborators are ports, not widgets: the coordinator never owns
/// or lays out the view, it only reads and writes the current image
/// value and drives the indicator through them.
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use super::busy::BusyState;
use super::error::PipelineError;
use super::executor;
use super::{Bitmap, SourceImage};
use crate::filter::FilterChain;

/// The surface showing the current image.
///
/// The coordinator reads the source image from here at submit time and
/// writes the rendered bitmap back on success.
pub trait DisplaySurface: Send + Sync {
    fn current_image(&self) -> Option<SourceImage>;
    fn set_current_image(&self, bitmap: Bitmap);
}

/// The visual busy indicator.
///
/// Both methods are only ever called from the UI-owning context:
/// `start` synchronously inside `submit`, `stop` from the completion
/// router.
pub trait BusyIndicator: Send + Sync {
    fn start(&self);
    fn stop(&self);
}

/// The UI-owning execution context as a serialized task queue.
///
/// All display-surface mutation and indicator control is submitted
/// here. In the iced shell the framework's update loop plays this
/// role; headless, `UiThread` provides it.
pub trait UiExecutor: Send + Sync {
    fn submit(&self, job: Box<dyn FnOnce() + Send>);
}

/// Coordinates one filter request at a time for a screen.
pub struct Coordinator {
    surface: Arc<dyn DisplaySurface>,
    indicator: Arc<dyn BusyIndicator>,
    ui: Arc<dyn UiExecutor>,
    busy: Arc<BusyState>,
    runtime: tokio::runtime::Handle,
}

impl Coordinator {
    pub fn new(
        surface: Arc<dyn DisplaySurface>,
        indicator: Arc<dyn BusyIndicator>,
        ui: Arc<dyn UiExecutor>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            surface,
            indicator,
            ui,
            busy: Arc::new(BusyState::new()),
            runtime,
        }
    }

    /// Dispatch a filter request. Call from the UI-owning context.
    ///
    /// Pulls the source image from the display surface, marks the
    /// screen busy and starts the indicator before any asynchronous
    /// work begins, then schedules the chain on the worker pool and
    /// returns immediately.
    ///
    /// A request with no image loaded fails fast with
    /// `PipelineError::MissingInput` and changes no state. A request
    /// while a run is already in flight is ignored.
    pub fn submit(&self, chain: FilterChain) -> Result<(), PipelineError> {
        let Some(source) = self.surface.current_image() else {
            eprintln!("⚠️  Filter request rejected: {}", PipelineError::MissingInput);
            return Err(PipelineError::MissingInput);
        };

        if !self.busy.begin() {
            println!("Filter already running, ignoring request");
            return Ok(());
        }

        // Indicator goes on before the worker can possibly finish, so
        // it is visible for the entire run.
        self.indicator.start();
        println!(
            "Filter request accepted ({}x{}, {} stages)",
            source.width(),
            source.height(),
            chain.len()
        );

        let surface = Arc::clone(&self.surface);
        let indicator = Arc::clone(&self.indicator);
        let ui = Arc::clone(&self.ui);
        let busy = Arc::clone(&self.busy);

        self.runtime.spawn(async move {
            let result = executor::run_async(source, chain).await;

            // Exactly one completion per request, always on the UI
            // context, after the worker is done.
            ui.submit(Box::new(move || {
                match result {
                    Ok(bitmap) => {
                        println!("Setting filtered image");
                        surface.set_current_image(bitmap);
                    }
                    Err(error) => {
                        eprintln!("⚠️  Filter pipeline failed: {}", error);
                    }
                }
                busy.end();
                indicator.stop();
            }));
        });

        Ok(())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }
}

type Job = Box<dyn FnOnce() + Send>;

/// A single-threaded task queue standing in for a UI thread.
///
/// Jobs run serialized, in submission order, on one dedicated thread.
/// The thread exits when the queue's last sender is dropped.
pub struct UiThread {
    sender: mpsc::Sender<Job>,
    thread_id: ThreadId,
}

impl UiThread {
    pub fn spawn() -> Self {
        let (sender, receiver) = mpsc::channel::<Job>();
        let (id_sender, id_receiver) = mpsc::channel();

        thread::Builder::new()
            .name("ui".to_string())
            .spawn(move || {
                let _ = id_sender.send(thread::current().id());
                while let Ok(job) = receiver.recv() {
                    job();
                }
            })
            .expect("Failed to spawn UI thread");

        let thread_id = id_receiver.recv().expect("UI thread did not start");

        Self { sender, thread_id }
    }

    /// The queue thread's id, for asserting context affinity.
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Block until every job submitted so far has run.
    pub fn flush(&self) {
        let (done_sender, done_receiver) = mpsc::channel();
        self.submit(Box::new(move || {
            let _ = done_sender.send(());
        }));
        let _ = done_receiver.recv();
    }
}

impl UiExecutor for UiThread {
    fn submit(&self, job: Job) {
        let _ = self.sender.send(job);
    }
}
