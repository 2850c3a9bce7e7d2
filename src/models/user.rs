use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Bearer token plus display name for the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(rename = "auth_token")]
    pub token: String,
    pub username: String,
}

impl AuthSession {
    /// The backend greets with `"Welcome, <name>!"`; the name is all the
    /// client gets.
    pub fn username_from_greeting(message: &str) -> String {
        message.replace("Welcome, ", "").replace('!', "")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
    pub preferences: [String; 4],
}

impl SignupForm {
    pub fn new(username: &str, email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
            role: "player".to_string(),
            preferences: Default::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.password != self.confirm_password {
            return Err(ApiError::Validation("Passwords do not match".into()));
        }
        Ok(())
    }

    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("username".to_string(), self.username.clone()),
            ("email".to_string(), self.email.clone()),
            ("password".to_string(), self.password.clone()),
            ("confirm_password".to_string(), self.confirm_password.clone()),
            ("role".to_string(), self.role.clone()),
        ];
        for (index, preference) in self.preferences.iter().enumerate() {
            fields.push((format!("preference_{}", index + 1), preference.clone()));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    /// Not part of the profile response; taken from the auth session.
    pub username: String,
    pub gender: String,
    pub role: String,
    pub organisation: String,
    pub industry: String,
    pub bio: String,
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub organisation: String,
    pub industry: String,
    pub bio: String,
}

impl ProfileUpdate {
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("first_name".to_string(), self.first_name.clone()),
            ("last_name".to_string(), self.last_name.clone()),
            ("organisation".to_string(), self.organisation.clone()),
            ("industry".to_string(), self.industry.clone()),
            ("bio".to_string(), self.bio.clone()),
        ]
    }
}
