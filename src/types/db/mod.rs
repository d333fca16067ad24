// Database entities - SeaORM models
pub mod approval;
pub mod claim;
pub mod claim_decision;
pub mod role;
pub mod seeded_collection;
pub mod supporting_document;
pub mod user;
