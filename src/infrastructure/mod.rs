pub mod clock;
pub mod llm;
pub mod media;
pub mod observability;
pub mod secrets;
pub mod staging;
pub mod storage;
pub mod transcription;
