//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::{
    validate_city, validate_zip_code, ADDRESS_RE, EMAIL_RE, NAME_RE, PHONE_RE,
};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    /// Dutch "tussenvoegsel" such as "van" or "de"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub address: String,
    pub zip_code: String,
    pub city: String,
    /// Alias of a [`super::UserCategory`]
    pub account_type: String,
    pub activated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name including the optional prefix.
    pub fn full_name(&self) -> String {
        match &self.name_prefix {
            Some(prefix) => format!("{} {} {}", self.first_name, prefix, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Submitted user fields, shared by the create and update operations.
///
/// Structural validation mirrors the institutional form rules: names and
/// address follow Dutch locale patterns and the email address is
/// restricted to the hz.nl domain. Email uniqueness is checked separately
/// on create only.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserForm {
    /// First name
    #[validate(
        regex(path = *NAME_RE, message = "voer een geldige voornaam in."),
        length(max = 255, message = "voornaam mag maximaal 255 tekens zijn.")
    )]
    #[schema(example = "Jan")]
    pub first_name: String,

    /// Optional name prefix ("tussenvoegsel")
    #[validate(
        regex(path = *NAME_RE, message = "voer een geldig tussenvoegsel in."),
        length(max = 16, message = "tussenvoegsel mag maximaal 16 tekens zijn.")
    )]
    #[schema(example = "van")]
    pub name_prefix: Option<String>,

    /// Last name
    #[validate(
        regex(path = *NAME_RE, message = "voer een geldige achternaam in."),
        length(max = 255, message = "achternaam mag maximaal 255 tekens zijn.")
    )]
    #[schema(example = "Jansen")]
    pub last_name: String,

    /// Institutional email address (hz.nl only)
    #[validate(
        regex(path = *EMAIL_RE, message = "voer een geldig hz.nl e-mailadres in."),
        length(max = 255, message = "e-mailadres mag maximaal 255 tekens zijn.")
    )]
    #[schema(example = "j.jansen@hz.nl")]
    pub email: String,

    /// Optional phone number (Dutch or international notation)
    #[validate(regex(path = *PHONE_RE, message = "voer een geldig telefoonnummer in."))]
    #[schema(example = "+31612345678")]
    pub phone_number: Option<String>,

    /// Street address
    #[validate(
        regex(path = *ADDRESS_RE, message = "voer een geldig adres in."),
        length(max = 255, message = "adres mag maximaal 255 tekens zijn.")
    )]
    #[schema(example = "Edisonweg 4")]
    pub address: String,

    /// Dutch postcode ("1234 AB")
    #[validate(
        custom(function = validate_zip_code),
        length(max = 7, message = "postcode mag maximaal 7 tekens zijn.")
    )]
    #[schema(example = "4382 NW")]
    pub zip_code: String,

    /// City name
    #[validate(
        custom(function = validate_city),
        length(max = 255, message = "plaatsnaam mag maximaal 255 tekens zijn.")
    )]
    #[schema(example = "Vlissingen")]
    pub city: String,

    /// Account type: alias of a user category
    #[validate(length(min = 1, message = "kies een account type."))]
    #[schema(example = "student")]
    pub account_type: String,

    /// Whether the account is active
    #[schema(example = true)]
    pub activated: bool,
}

/// Activation request body for the activate operation
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActivateForm {
    /// New activation state
    #[schema(example = false)]
    pub activated: bool,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Jan")]
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "van")]
    pub name_prefix: Option<String>,
    #[schema(example = "Jansen")]
    pub last_name: String,
    #[schema(example = "j.jansen@hz.nl")]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "+31612345678")]
    pub phone_number: Option<String>,
    #[schema(example = "Edisonweg 4")]
    pub address: String,
    #[schema(example = "4382 NW")]
    pub zip_code: String,
    #[schema(example = "Vlissingen")]
    pub city: String,
    #[schema(example = "student")]
    pub account_type: String,
    #[schema(example = true)]
    pub activated: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            name_prefix: user.name_prefix,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            address: user.address,
            zip_code: user.zip_code,
            city: user.city,
            account_type: user.account_type,
            activated: user.activated,
            created_at: user.created_at,
        }
    }
}
