/// Filter pipeline coordination module
///
/// One filter request flows through three pieces:
/// - the dispatcher accepts the request on the UI context and marks the
///   screen busy (coordinator.rs)
/// - the executor runs the filter chain on the worker context
///   (executor.rs)
/// - the completion router carries the result back onto the UI context
///   and resolves the busy state (coordinator.rs)
///
/// Errors are values end to end (error.rs); the busy flag is an atomic
/// state machine owned by the screen (busy.rs).
pub mod busy;
pub mod coordinator;
pub mod error;
pub mod executor;

pub use busy::BusyState;
pub use coordinator::{BusyIndicator, Coordinator, DisplaySurface, UiExecutor, UiThread};
pub use error::PipelineError;

/// Immutable raster input, pulled from the display surface at submit
/// time.
pub type SourceImage = image::RgbaImage;

/// The rendered bitmap handed back to the display surface.
pub type Bitmap = image::RgbaImage;

/// Outcome of a single filter run: the rendered bitmap or the reason
/// the chain failed.
pub type PipelineResult = Result<Bitmap, PipelineError>;
