use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User entity - a document in the "users" collection.
///
/// Every credential field is optional at input time; the store enforces
/// uniqueness of non-empty `userName` and `email` via sparse unique indexes,
/// so absent fields must be omitted from the document rather than stored
/// as nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, assigned by the store on insert
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    /// Username (unique among stored users)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Email (unique among stored users)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// DTO for creating a new user
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// User response DTO - the stored user with its id rendered as a hex string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

impl From<CreateUser> for User {
    fn from(input: CreateUser) -> Self {
        Self {
            id: None,
            user_name: input.user_name,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            phone_number: input.phone_number,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()),
            user_name: user.user_name,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_user_document_field_names() {
        let user = User {
            id: Some(ObjectId::new()),
            user_name: Some("dummyUser".to_string()),
            email: Some("dummy@dummy.com".to_string()),
            first_name: Some("Dummy".to_string()),
            last_name: None,
            phone_number: None,
        };

        let doc = bson::to_document(&user).unwrap();
        assert!(doc.contains_key("_id"));
        assert!(doc.contains_key("userName"));
        assert!(doc.contains_key("email"));
        assert!(doc.contains_key("firstName"));
        // Absent optionals are omitted so the sparse unique indexes skip them
        assert!(!doc.contains_key("lastName"));
        assert!(!doc.contains_key("phoneNumber"));
    }

    #[test]
    fn test_create_user_accepts_camel_case_json() {
        let input: CreateUser = serde_json::from_str(
            r#"{"userName":"Dummy","email":"Dummy@gmail.com","firstName":"Dummy","phoneNumber":"0587963587"}"#,
        )
        .unwrap();

        assert_eq!(input.user_name.as_deref(), Some("Dummy"));
        assert_eq!(input.email.as_deref(), Some("Dummy@gmail.com"));
        assert_eq!(input.first_name.as_deref(), Some("Dummy"));
        assert_eq!(input.last_name, None);
        assert_eq!(input.phone_number.as_deref(), Some("0587963587"));
    }

    #[test]
    fn test_user_response_copies_all_fields() {
        let id = ObjectId::new();
        let user = User {
            id: Some(id),
            user_name: Some("dummyUser".to_string()),
            email: Some("dummy@dummy.com".to_string()),
            first_name: Some("Dummy".to_string()),
            last_name: Some("Dummy".to_string()),
            phone_number: Some("054328712".to_string()),
        };

        let response = UserResponse::from(user.clone());
        assert_eq!(response.id.as_deref(), Some(id.to_hex().as_str()));
        assert_eq!(response.user_name, user.user_name);
        assert_eq!(response.email, user.email);
        assert_eq!(response.first_name, user.first_name);
        assert_eq!(response.last_name, user.last_name);
        assert_eq!(response.phone_number, user.phone_number);
    }
}
