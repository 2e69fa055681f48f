// Request/Response models
pub mod ai;
pub mod assessments;
pub mod common;
pub mod credits;
pub mod insights;
pub mod letters;
pub mod resume;
