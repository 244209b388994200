pub mod chat;
pub mod document_ctx;
pub mod document_flow;
pub mod extraction_tracker;

pub use chat::{ChatMessage, ChatTranscript, Speaker};
pub use document_ctx::DocumentCtx;
pub use document_flow::{DocumentFlow, ProcessResult};
pub use extraction_tracker::{ExtractionTracker, PendingExtraction, Ticket};
