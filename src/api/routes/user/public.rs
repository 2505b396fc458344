//! Public types for the user API
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::public::ApiError;
use crate::api::utils::ParamReader;

/// A row of the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse<T> {
    pub user: T,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProfile {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: String,
}

impl From<User> for UpdatedProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar_url: user.avatar_url,
            updated_at: user.updated_at,
        }
    }
}

pub struct NewUser {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Fields a user may change on their own profile. `None` leaves the
/// stored value alone.
#[derive(Debug, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub fn parse_profile_update(values: &Map<String, Value>) -> Result<ProfileUpdate, ApiError> {
    let mut reader = ParamReader::new(values);
    let first_name = reader.non_empty_string("firstName");
    let last_name = reader.non_empty_string("lastName");
    reader.finish()?;

    Ok(ProfileUpdate {
        first_name,
        last_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn it_parses_partial_profile_updates() {
        let update = parse_profile_update(&object(json!({ "lastName": "Lovelace" }))).unwrap();
        assert_eq!(
            update,
            ProfileUpdate {
                first_name: None,
                last_name: Some(String::from("Lovelace")),
            }
        );
    }

    #[test]
    fn it_rejects_empty_names() {
        let err = parse_profile_update(&object(json!({ "firstName": "", "lastName": 7 })));
        let Err(ApiError::InvalidParams(details)) = err else {
            panic!("expected invalid params");
        };
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].field, "firstName");
        assert_eq!(details[1].message, "Expected string");
    }
}
