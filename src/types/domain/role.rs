use serde::{Deserialize, Serialize};

pub const LECTURER_ROLE: &str = "Lecturer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i32,
    pub name: String,
}

impl Role {
    pub fn is_lecturer(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(LECTURER_ROLE)
    }
}
