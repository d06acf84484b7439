mod incoming_message;
mod job;
mod job_status;
mod remote_object;
mod trace;

pub use incoming_message::IncomingMessage;
pub use job::TranscriptionJob;
pub use job_status::TranscriptionJobStatus;
pub use remote_object::RemoteObjectHandle;
pub use trace::{PipelineStage, PipelineTrace, StageOutcome, TraceEntry};
