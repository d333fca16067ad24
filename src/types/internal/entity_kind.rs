use std::fmt;

/// The persisted record families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Role,
    Claim,
    Approval,
    Document,
    Decision,
}

impl EntityKind {
    /// Human-readable name used in flash messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Role => "Role",
            EntityKind::Claim => "Claim",
            EntityKind::Approval => "Approval",
            EntityKind::Document => "Document",
            EntityKind::Decision => "Decision",
        }
    }

    /// Listing a client is sent back to when a record is missing
    pub fn index_path(&self) -> &'static str {
        match self {
            EntityKind::User => "/api/User",
            EntityKind::Role => "/api/Role",
            EntityKind::Claim => "/api/Claim",
            EntityKind::Approval | EntityKind::Decision => "/api/Approval",
            EntityKind::Document => "/api/SupportingDocument",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
