pub mod artifact;
pub mod assistant;
pub mod case_record;
pub mod file_handle;
pub mod job;
pub mod loaders;
pub mod template;
pub mod user;

pub use artifact::{suggested_filename, DownloadArtifact};
pub use assistant::{Assistant, Sector};
pub use case_record::{CaseRecord, Parties};
pub use file_handle::{FileHandle, MediaType};
pub use job::{DocumentJob, DocumentRequest};
pub use loaders::{load_all_jobs, load_job};
pub use template::{AdditionalFields, FieldKind, FieldSpec, TemplateDescriptor};
pub use user::{Role, User};
