pub mod analytics;
pub mod password;
pub mod pipeline;
pub mod prompts;
pub mod session_actor;
pub mod tutor;

pub use analytics::PerformanceSummary;
pub use pipeline::{SolveOutcome, SolvePipeline, VideoArtifacts, VideoPipeline};
pub use session_actor::{SessionHandle, SessionId, SessionState, SessionUpdate};
pub use tutor::TutorService;
