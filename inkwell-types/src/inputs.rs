use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::Role;

/// Data for inserting a user. The id is generated on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i64,
    #[serde(default)]
    pub role: Role,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
            role: Role::default(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Data for inserting a post connected to an existing author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub average_rating: f64,
    pub author_id: Uuid,
}

/// Change applied to an integer column by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntChange {
    Set(i64),
    Increment(i64),
    Decrement(i64),
    Multiply(i64),
    /// Integer division, truncating toward zero.
    Divide(i64),
}

/// Column changes for a user update. `None` leaves the column untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<IntChange>,
    pub role: Option<Role>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none() && self.role.is_none()
    }
}
