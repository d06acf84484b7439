use std::fmt;

/// One step of the audio pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Fetch,
    Stage,
    Upload,
    Transcribe,
    Complete,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Fetch => "fetch",
            PipelineStage::Stage => "stage",
            PipelineStage::Upload => "upload",
            PipelineStage::Transcribe => "transcribe",
            PipelineStage::Complete => "complete",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Ok,
    Error,
}

#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub stage: PipelineStage,
    pub outcome: StageOutcome,
    pub detail: String,
}

/// Ordered, append-only record of one invocation's stage outcomes. Retained
/// for diagnostics; only surfaced to the end user behind a policy flag.
#[derive(Debug, Clone, Default)]
pub struct PipelineTrace {
    entries: Vec<TraceEntry>,
}

impl PipelineTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        stage: PipelineStage,
        outcome: StageOutcome,
        detail: impl Into<String>,
    ) {
        self.entries.push(TraceEntry {
            stage,
            outcome,
            detail: detail.into(),
        });
    }

    pub fn ok(&mut self, stage: PipelineStage, detail: impl Into<String>) {
        self.record(stage, StageOutcome::Ok, detail);
    }

    pub fn error(&mut self, stage: PipelineStage, detail: impl Into<String>) {
        self.record(stage, StageOutcome::Error, detail);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the whole trace as a single diagnostic line.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                let marker = match e.outcome {
                    StageOutcome::Ok => "ok",
                    StageOutcome::Error => "error",
                };
                format!("{} {}: {}", e.stage, marker, e.detail)
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}
