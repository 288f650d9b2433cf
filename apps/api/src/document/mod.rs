//! ResumeDocument model, normalization of raw records, and the editor's
//! whole-field replacement operations.

pub mod edit;
pub mod format;
pub mod handlers;
pub mod model;
pub mod normalize;
pub mod sample;
pub mod section;

pub use model::{
    Certification, Contact, Education, Profile, Project, RatedItem, ResumeDocument,
    TemplateSelection, WorkExperience,
};
pub use normalize::{load_or_default, normalize, DocumentError, Normalized};
pub use section::SectionKind;
