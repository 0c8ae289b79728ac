pub mod lenient;
pub mod resume;
pub mod section;

pub use resume::{ResumeDocument, ResumeSummary, ResumeVersion, SectionData};
pub use section::SectionId;
