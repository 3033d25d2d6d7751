//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FlowX API",
        version = "0.1.0",
        description = "Account sign-in, sign-up and profile update backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/user", api = domain_accounts::ApiDoc)
    ),
    tags(
        (name = "Accounts", description = "Sign-in, sign-up and profile update")
    )
)]
pub struct ApiDoc;
