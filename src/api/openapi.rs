//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::user_handler;
use crate::domain::{ActivateForm, UserForm, UserResponse};

/// OpenAPI documentation for the user administration API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User administration API",
        version = "0.1.0",
        description = "User management with validation, mail dispatch and queued mailing-list unsubscription",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::list_users,
        user_handler::create_form,
        user_handler::create_user,
        user_handler::show_user,
        user_handler::edit_form,
        user_handler::update_user,
        user_handler::activate_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            UserForm,
            ActivateForm,
            UserResponse,
            user_handler::CategoryOption,
            user_handler::CreateFormResponse,
            user_handler::EditFormResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
