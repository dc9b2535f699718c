pub mod resume;

pub use resume::{NewResume, ResumeRecord, StringOrStructured, StructuredResumeInfo};
