/// Pipeline error taxonomy
///
/// Everything that can go wrong inside a filter run is converted into
/// one of these variants; nothing escapes the pipeline as a panic. The
/// completion router resolves the busy state on failure exactly as it
/// does on success.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No source image was present at submit time. Surfaced as a no-op
    /// with a log line, never as a crash.
    #[error("no source image is loaded")]
    MissingInput,

    /// A filter stage's transform yielded nothing; the chain aborts at
    /// that stage without retry or partial fallback.
    #[error("filter stage `{stage}` produced no output")]
    StageProducedNoOutput { stage: String },

    /// The drawing context could not be acquired for this run.
    #[error("render context unavailable: {reason}")]
    RenderContextUnavailable { reason: String },

    /// The worker task died before producing a result (e.g. a panic in
    /// stage code). Contained so the caller is still resumed once.
    #[error("filter worker failed: {reason}")]
    WorkerFailed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_stage() {
        let error = PipelineError::StageProducedNoOutput {
            stage: "SepiaTone".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "filter stage `SepiaTone` produced no output"
        );
    }
}
