/// Image filtering module
///
/// This module implements the filter chain that produces the "antique"
/// look:
/// - `stage.rs` - named filter stages and their pixel transforms
/// - `chain.rs` - ordered stage sequences
/// - `working.rs` - the float working-space image stages operate on
/// - `render.rs` - the render context that produces the final bitmap
///
/// Stages are pure functions over the working image; the only state
/// shared between two stages is the explicit image handoff.
pub mod chain;
pub mod render;
pub mod stage;
pub mod working;

pub use chain::FilterChain;
pub use render::RenderContext;
pub use stage::FilterStage;
pub use working::WorkingImage;
