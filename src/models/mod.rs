pub mod message;
pub mod session;
pub mod usage;

pub use message::{MessageUsage, OpenCodeMessage, TranscriptLine};
pub use session::{SessionInfo, Source, SourceCounts};
pub use usage::{EnergyResult, TokenUsage, UNKNOWN_LABEL};
