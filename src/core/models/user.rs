use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::validation::{FieldValue, Fields, Rule, Validate};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A user row before the store has assigned an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl Fields for NewUser {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Present(&self.name),
            "email" => FieldValue::Present(&self.email),
            _ => FieldValue::Unknown,
        }
    }
}

impl Validate for NewUser {
    const RULES: &'static [Rule] = &[
        Rule::required("name", "Name is required"),
        Rule::required("email", "Email is required"),
    ];
}

impl From<CreateUserAttrs> for NewUser {
    fn from(attrs: CreateUserAttrs) -> Self {
        NewUser {
            name: attrs.name.unwrap_or_default(),
            email: attrs.email.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserAttrs {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl Fields for CreateUserAttrs {
    fn field(&self, name: &str) -> FieldValue<'_> {
        let value = match name {
            "name" => &self.name,
            "email" => &self.email,
            "password" => &self.password,
            "passwordConfirmation" => &self.password_confirmation,
            _ => return FieldValue::Unknown,
        };
        FieldValue::from_option(value.as_deref())
    }
}

impl Validate for CreateUserAttrs {
    const RULES: &'static [Rule] = &[
        Rule::required("name", "Name cannot be blank"),
        Rule::required("email", "Email cannot be blank"),
        Rule::email("email"),
        Rule::required("password", "Password is required"),
        Rule::fields_must_match("password", "passwordConfirmation").with_message("Passwords must match"),
    ];
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct UpdateUserAttrs {
    pub name: Option<String>,
}

impl UpdateUserAttrs {
    /// An update with nothing to apply.
    pub fn is_blank(&self) -> bool {
        self.name.as_deref().is_none_or(|name| name.trim().is_empty())
    }
}

impl Fields for UpdateUserAttrs {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::from_option(self.name.as_deref()),
            _ => FieldValue::Unknown,
        }
    }
}

impl Validate for UpdateUserAttrs {
    const RULES: &'static [Rule] = &[Rule::required("name", "Name cannot be blank")];
}
