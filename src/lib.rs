/// Antique Viewer core library
///
/// The application displays a zoomable image and applies a two-stage
/// "antique" filter (sepia tone, then exposure) on a background worker.
/// This library holds everything below the window glue:
/// - Filter stages, chains and the working-space image (filter/)
/// - The pipeline coordinator: dispatch, execution and completion
///   routing between the UI context and the worker context (pipeline/)
///
/// The iced shell in main.rs binds these pieces to the actual window.
pub mod filter;
pub mod pipeline;

pub use filter::{FilterChain, FilterStage};
pub use pipeline::{BusyState, Coordinator, PipelineError};
