pub mod document_writer;
pub mod extractor;
pub mod renderer;
pub mod session;

pub use document_writer::DocumentWriter;
pub use extractor::{CaseExtractor, MockExtractor, StructuredTextExtractor};
pub use renderer::TemplateRenderer;
pub use session::{Session, SessionManager};
