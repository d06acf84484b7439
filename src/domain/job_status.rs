use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptionJobStatus {
    Submitted,
    InProgress,
    Completed,
    Failed,
    TimedOut,
}

impl TranscriptionJobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionJobStatus::Submitted => "SUBMITTED",
            TranscriptionJobStatus::InProgress => "IN_PROGRESS",
            TranscriptionJobStatus::Completed => "COMPLETED",
            TranscriptionJobStatus::Failed => "FAILED",
            TranscriptionJobStatus::TimedOut => "TIMED_OUT",
        }
    }

    /// A terminal status admits no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TranscriptionJobStatus::Completed
                | TranscriptionJobStatus::Failed
                | TranscriptionJobStatus::TimedOut
        )
    }
}

impl FromStr for TranscriptionJobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUBMITTED" => Ok(TranscriptionJobStatus::Submitted),
            "IN_PROGRESS" => Ok(TranscriptionJobStatus::InProgress),
            "COMPLETED" => Ok(TranscriptionJobStatus::Completed),
            "FAILED" => Ok(TranscriptionJobStatus::Failed),
            "TIMED_OUT" => Ok(TranscriptionJobStatus::TimedOut),
            _ => Err(format!("Invalid transcription job status: {}", s)),
        }
    }
}

impl fmt::Display for TranscriptionJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
