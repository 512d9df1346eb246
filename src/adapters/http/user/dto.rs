//! Data Transfer Objects for member account endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::membership::{Profile, PublicUser};

/// Optional fitness profile as posted by the sign-up form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default)]
    pub age: Option<u16>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, alias = "height", alias = "height_cm")]
    pub height_cm: Option<u16>,
    #[serde(default, alias = "weight", alias = "weight_kg")]
    pub weight_kg: Option<u16>,
    #[serde(default)]
    pub goal: Option<String>,
}

impl From<ProfileRequest> for Profile {
    fn from(req: ProfileRequest) -> Self {
        Profile {
            age: req.age,
            gender: non_blank(req.gender),
            height_cm: req.height_cm,
            weight_kg: req.weight_kg,
            goal: non_blank(req.goal),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Request to create a member account after payment.
///
/// No `Debug` derive: the body carries a plaintext password.
#[derive(Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub plan: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub profile: ProfileRequest,
}

/// Member sign-in request.
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying the member's public fields.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_accepts_short_field_names() {
        let json = r#"{"age":30,"height":172,"weight":68,"goal":"  "}"#;
        let req: ProfileRequest = serde_json::from_str(json).unwrap();
        let profile = Profile::from(req);

        assert_eq!(profile.age, Some(30));
        assert_eq!(profile.height_cm, Some(172));
        assert_eq!(profile.weight_kg, Some(68));
        assert_eq!(profile.goal, None);
    }

    #[test]
    fn create_request_profile_defaults_to_empty() {
        let json = r#"{"email":"a@b.co","password":"hunter2hunter2","plan":"STANDARD"}"#;
        let req: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(Profile::from(req.profile), Profile::default());
        assert!(req.name.is_none());
    }
}
