use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    User,
    UserAdmin,
    SystemAdmin,
}

impl Role {
    /// The value stored in the `role` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::UserAdmin => "user-admin",
            Role::SystemAdmin => "system-admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub role: Role,
    /// System administrators are not tied to an organization.
    #[serde(default)]
    pub organization_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_the_stored_spelling() {
        for role in [Role::User, Role::UserAdmin, Role::SystemAdmin] {
            let json = serde_json::to_value(role).unwrap();
            assert_eq!(json, serde_json::Value::String(role.as_str().to_string()));
        }
    }
}
