//! User domain entity and related types.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, immutable once set
    pub id: i64,
    pub name: String,
    pub second_name: String,
    pub surname: String,
}

impl User {
    /// Create a user record with only the fields the HTTP layer carries
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            second_name: String::new(),
            surname: String::new(),
        }
    }
}

/// User payload exchanged over HTTP and stored in the cache.
///
/// Serialized as `{"Id": <int>, "Name": <string>}`. Decoding matches keys
/// case-insensitively, ignores unknown keys, and leaves missing or `null`
/// fields at their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserPayload {
    /// User identifier (ignored on create)
    #[serde(rename = "Id")]
    pub id: i64,
    /// User display name
    #[serde(rename = "Name")]
    pub name: String,
}

impl UserPayload {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl<'de> Deserialize<'de> for UserPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UserPayloadVisitor)
    }
}

struct UserPayloadVisitor;

impl<'de> Visitor<'de> for UserPayloadVisitor {
    type Value = UserPayload;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a user object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut payload = UserPayload::default();

        // A repeated key overwrites the earlier value
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("id") {
                if let Some(id) = map.next_value::<Option<i64>>()? {
                    payload.id = id;
                }
            } else if key.eq_ignore_ascii_case("name") {
                if let Some(name) = map.next_value::<Option<String>>()? {
                    payload.name = name;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(payload)
    }
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        User::new(payload.id, payload.name)
    }
}
