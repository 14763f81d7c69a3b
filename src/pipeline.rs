//! Sequential execution of piped commands.
//!
//! Stages run one after another. The text a stage emits becomes the input of the
//! next stage. A stage that fails or emits nothing clears the carried text and
//! the remaining stages still run.

use log::debug;

/// What one pipeline stage produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// The stage emitted text.
    Emitted(String),
    /// The stage was silent, failed, or was empty.
    Nothing,
    /// The stage asked the console to stop.
    Exit,
}

/// Carried text between stages. Only one exists per pipeline run.
#[derive(Debug, Default)]
pub struct PipelineContext {
    input: String,
    output: Option<String>,
}

impl PipelineContext {
    /// Text carried in from the previous stage; empty for the first stage.
    pub fn input(&self) -> &str {
        &self.input
    }

    fn begin_stage(&mut self) {
        self.input = self.output.take().unwrap_or_default();
    }

    fn record(&mut self, outcome: StageOutcome) {
        self.output = match outcome {
            StageOutcome::Emitted(text) if !text.is_empty() => Some(text),
            _ => None,
        };
    }
}

/// Final state of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    /// Text emitted by the last stage, if any.
    pub output: Option<String>,
    /// Set when a stage ran `exit`; later stages were skipped.
    pub exit: bool,
}

/// Run `segments` in order through `dispatch`.
///
/// `dispatch` receives each raw segment and the context holding the carried
/// input. It reports command failures itself; an `Err` from `dispatch` aborts
/// the run.
pub fn run<F, E>(segments: &[String], mut dispatch: F) -> Result<PipelineRun, E>
where
    F: FnMut(&str, &PipelineContext) -> Result<StageOutcome, E>,
{
    let mut context = PipelineContext::default();
    for (index, segment) in segments.iter().enumerate() {
        context.begin_stage();
        let outcome = dispatch(segment.as_str(), &context)?;
        debug!("pipeline stage {index} `{segment}` -> {outcome:?}");
        if outcome == StageOutcome::Exit {
            return Ok(PipelineRun {
                output: None,
                exit: true,
            });
        }
        context.record(outcome);
    }
    Ok(PipelineRun {
        output: context.output,
        exit: false,
    })
}
