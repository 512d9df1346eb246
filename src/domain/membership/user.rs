//! User aggregate - a member account created from a paid order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Email, Timestamp, UserId, ValidationError};
use crate::domain::payment::Plan;

/// Salted one-way password hash in PHC string format.
///
/// `Debug` never prints the hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}

/// Optional fitness profile supplied at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub age: Option<u16>,
    pub gender: Option<String>,
    pub height_cm: Option<u16>,
    pub weight_kg: Option<u16>,
    pub goal: Option<String>,
}

impl Profile {
    /// Checks that every supplied measurement is plausible.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("age", self.age, 10, 120)?;
        check_range("height_cm", self.height_cm, 50, 300)?;
        check_range("weight_kg", self.weight_kg, 20, 500)?;
        check_text("gender", self.gender.as_deref(), 32)?;
        check_text("goal", self.goal.as_deref(), 500)?;
        Ok(())
    }
}

fn check_range(field: &str, value: Option<u16>, min: u16, max: u16) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(ValidationError::invalid_format(
            field,
            format!("must be between {} and {}", min, max),
        )),
        _ => Ok(()),
    }
}

fn check_text(field: &str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::length_out_of_range(
            field,
            0,
            max,
            v.chars().count(),
        )),
        _ => Ok(()),
    }
}

/// Membership granted by a paid order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub plan: Plan,
    pub start_date: Timestamp,

    /// Gates authenticated access.
    pub active: bool,
}

/// Member account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub phone: Option<String>,
    pub profile: Profile,
    pub membership: Membership,
    pub password_hash: PasswordHash,
    pub created_at: Timestamp,
}

impl User {
    /// Creates an account with an active membership starting now.
    pub fn provision(
        id: UserId,
        email: Email,
        name: String,
        phone: Option<String>,
        profile: Profile,
        plan: Plan,
        password_hash: PasswordHash,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            email,
            name,
            phone,
            profile,
            membership: Membership {
                plan,
                start_date: now,
                active: true,
            },
            password_hash,
            created_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.membership.active
    }

    /// Projection without credential material.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            profile: self.profile.clone(),
            membership: self.membership.clone(),
            created_at: self.created_at,
        }
    }
}

/// User fields safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub phone: Option<String>,
    pub profile: Profile,
    pub membership: Membership,
    pub created_at: Timestamp,
}
