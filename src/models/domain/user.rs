use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Identity claims handed over by the OAuth exchange. Only `email` is
/// guaranteed; the provider may omit the display name and photo.
#[derive(Clone, Debug, Deserialize)]
pub struct IdentityProfile {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Admin,
    // Reserved for a future non-admin tier; nothing assigns it yet.
    User,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    pub role: UserRole,
    pub created_at: bson::DateTime,
}

impl User {
    /// Builds the record persisted on first sign-in. Every first-time signer
    /// is granted the admin role; the display name falls back to the local
    /// part of the email when the provider sends none.
    pub fn from_identity(profile: IdentityProfile) -> Self {
        let name = match profile.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => profile
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        User {
            id: Some(ObjectId::new()),
            email: profile.email,
            name,
            profile_photo: profile.picture,
            role: UserRole::Admin,
            created_at: bson::DateTime::now(),
        }
    }

    /// Claim subject: the ObjectId hex when present, the email otherwise.
    pub fn subject(&self) -> String {
        self.id
            .as_ref()
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| self.email.clone())
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(email: &str) -> Self {
        User::from_identity(IdentityProfile {
            email: email.to_string(),
            name: Some("Test User".to_string()),
            picture: None,
        })
    }
}
