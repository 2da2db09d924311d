mod interests;
mod postgres;
mod repository;
mod service;
mod sqlite;

pub use interests::*;
pub use postgres::PgUserRepository;
pub use repository::*;
pub use service::*;
pub use sqlite::SqliteUserRepository;

use serde::{Deserialize, Serialize};

/// User as exposed by the API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: Interests,
}

/// User which has not been stored yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: Interests,
}

/// Partial update of a [`User`]. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub interests: Option<Interests>,
}

impl UserPatch {
    /// Merge supplied fields into `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(gender) = self.gender {
            user.gender = gender;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(city) = self.city {
            user.city = city;
        }
        if let Some(interests) = self.interests {
            user.interests = interests;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_touches_supplied_fields() {
        let mut user = User {
            id: 7,
            name: "Ada".into(),
            age: 36,
            gender: "F".into(),
            email: "ada@example.com".into(),
            city: "London".into(),
            interests: Interests::parse("math,poetry"),
        };

        UserPatch {
            city: Some("Paris".into()),
            interests: Some(Interests::parse("chess")),
            ..Default::default()
        }
        .apply(&mut user);

        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.age, 36);
        assert_eq!(user.city, "Paris");
        assert_eq!(user.interests.encode(), "chess");
    }

    #[test]
    fn test_user_wire_format() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Ada",
            "age": 36,
            "gender": "F",
            "email": "ada@example.com",
            "city": "London",
            "interests": "math,poetry",
        }))
        .unwrap();

        assert!(user.interests.contains("poetry"));
        assert_eq!(serde_json::to_value(&user).unwrap()["interests"], "math,poetry");
    }
}
