mod manual_clock;
mod tokio_clock;

pub use manual_clock::ManualClock;
pub use tokio_clock::TokioClock;
