// Request and response models exposed through the OpenAPI surface
pub mod approval;
pub mod claim;
pub mod common;
pub mod dashboard;
pub mod document;
pub mod report;
pub mod tracking;
pub mod user;
