/// Filter chain executor
///
/// Runs one filter chain to completion on the worker context: acquire a
/// render context, fold the stages in order, render the final bitmap.
/// Every failure comes back as a `PipelineError` value; the async
/// wrapper also contains panics from stage code, so the caller is
/// always resumed exactly once.
use tokio::task;

use super::error::PipelineError;
use super::{PipelineResult, SourceImage};
use crate::filter::{FilterChain, RenderContext, WorkingImage};

/// Run a filter chain over a source image.
///
/// Stage i's output is stage i+1's input; a stage that produces no
/// output aborts the chain at that point. The render context acquired
/// here is scoped to this run and released on every exit path.
pub fn run(source: &SourceImage, chain: &FilterChain) -> PipelineResult {
    let context = RenderContext::acquire(source.width(), source.height())?;

    let mut working = WorkingImage::from_rgba8(source);
    for stage in chain.stages() {
        println!("Applying {}", stage.name);
        working = stage
            .apply(&working)
            .ok_or_else(|| PipelineError::StageProducedNoOutput {
                stage: stage.name.clone(),
            })?;
    }

    println!("Rendering image");
    Ok(context.render(&working))
}

/// Run a filter chain on the blocking worker pool.
///
/// Spawn-blocking because the chain is CPU-intensive and must not
/// stall the UI runtime while the user keeps panning and zooming.
pub async fn run_async(source: SourceImage, chain: FilterChain) -> PipelineResult {
    task::spawn_blocking(move || run(&source, &chain))
        .await
        .unwrap_or_else(|e| {
            Err(PipelineError::WorkerFailed {
                reason: e.to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::render::MAX_RENDER_DIM;
    use crate::filter::stage::SEPIA_TONE;
    use crate::filter::FilterStage;
    use image::{Rgba, RgbaImage};

    fn test_image() -> SourceImage {
        RgbaImage::from_pixel(2, 2, Rgba([60, 120, 180, 255]))
    }

    #[test]
    fn test_antique_chain_golden_output() {
        let bitmap = run(&test_image(), &FilterChain::antique()).unwrap();

        // Sepia(1.0) then Exposure(1.0) over solid (60, 120, 180).
        for pixel in bitmap.pixels() {
            assert_eq!(pixel.0, [255, 255, 208, 255]);
        }
        assert_eq!(bitmap.width(), 2);
        assert_eq!(bitmap.height(), 2);
    }

    #[test]
    fn test_chain_order_matters() {
        let reversed = FilterChain::new(vec![
            FilterStage::exposure(1.0),
            FilterStage::sepia(1.0),
        ]);

        let bitmap = run(&test_image(), &reversed).unwrap();

        // Exposing first saturates the channels before toning.
        for pixel in bitmap.pixels() {
            assert_eq!(pixel.0, [255, 249, 194, 255]);
        }

        let antique = run(&test_image(), &FilterChain::antique()).unwrap();
        assert_ne!(bitmap, antique);
    }

    #[test]
    fn test_failed_first_stage_aborts_chain() {
        // An empty source makes the first stage produce no output; the
        // reported stage proves the second one never ran.
        let result = run(&RgbaImage::new(0, 0), &FilterChain::antique());

        assert_eq!(
            result,
            Err(PipelineError::StageProducedNoOutput {
                stage: SEPIA_TONE.to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_stage_reports_its_name() {
        let chain = FilterChain::new(vec![FilterStage::new("Vignette")]);
        let result = run(&test_image(), &chain);

        assert_eq!(
            result,
            Err(PipelineError::StageProducedNoOutput {
                stage: "Vignette".to_string(),
            })
        );
    }

    #[test]
    fn test_oversized_source_fails_context_acquisition() {
        let source = RgbaImage::new(MAX_RENDER_DIM + 1, 1);
        let result = run(&source, &FilterChain::antique());

        assert!(matches!(
            result,
            Err(PipelineError::RenderContextUnavailable { .. })
        ));
    }

    #[test]
    fn test_empty_chain_renders_source_unchanged() {
        let bitmap = run(&test_image(), &FilterChain::new(Vec::new())).unwrap();
        assert_eq!(bitmap, test_image());
    }

    #[tokio::test]
    async fn test_run_async_resumes_with_result() {
        let result = run_async(test_image(), FilterChain::antique()).await;
        assert!(result.is_ok());

        let failure = run_async(RgbaImage::new(0, 0), FilterChain::antique()).await;
        assert!(failure.is_err());
    }
}
