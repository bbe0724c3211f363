//! Collaborator boundaries: assessment data, service templates, billing
//! rates, and the profile cache.
//!
//! The engine consumes these through traits so an embedding application
//! can bring its own persistence. The in-memory implementations here are
//! complete and thread-safe; they back the tests and small deployments.

pub mod assessment;
pub mod cache;
pub mod memory;
pub mod template;

pub use assessment::AssessmentStore;
pub use cache::{MemoryProfileCache, ProfileCache};
pub use memory::{MemoryAssessmentStore, MemoryRateStore, MemoryTemplateStore};
pub use template::{RateStore, ServiceTemplate, TemplateService, TemplateStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store lock poisoned")]
    LockFailed,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store backend failure: {0}")]
    Backend(String),
}
