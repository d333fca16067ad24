pub mod context;
pub mod entity_kind;

pub use context::RequestContext;
pub use entity_kind::EntityKind;
