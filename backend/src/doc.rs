//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every complaint route, the health probes, the domain
//! schema wrappers and the `X-Secret-Code` header scheme. Swagger UI serves
//! it in debug builds and `openapi-dump` prints it for external tooling.

use crate::inbound::http::complaints::{
    ComplaintEnvelope, ComplaintsEnvelope, MessageResponse, ResolveComplaintRequest,
    SubmitComplaintRequest,
};
use crate::inbound::http::schemas::{ComplaintSchema, ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, UserEnvelope};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme for the secret code header.
pub const SECRET_CODE_SCHEME: &str = "SecretCode";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            SECRET_CODE_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Secret-Code",
                "User secret issued by POST /register, or the administrator secret.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Complaint desk API",
        description = "Register, submit and track rated complaints; administrators resolve them.",
        license(name = "ISC", url = "https://opensource.org/licenses/ISC")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SecretCode" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::register,
        crate::inbound::http::complaints::submit_complaint,
        crate::inbound::http::complaints::user_complaints,
        crate::inbound::http::complaints::admin_complaints,
        crate::inbound::http::complaints::view_complaint,
        crate::inbound::http::complaints::resolve_complaint,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ComplaintSchema,
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        RegisterRequest,
        SubmitComplaintRequest,
        ResolveComplaintRequest,
        UserEnvelope,
        ComplaintEnvelope,
        ComplaintsEnvelope,
        MessageResponse,
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "complaints", description = "Complaint submission and review"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => false,
        }
    }

    #[rstest]
    #[case("crate.domain.Error", "code")]
    #[case("crate.domain.Error", "message")]
    #[case("crate.domain.User", "secret_code")]
    #[case("crate.domain.User", "complaints")]
    #[case("crate.domain.Complaint", "user_id")]
    #[case("crate.domain.Complaint", "resolved")]
    fn domain_schemas_expose_wire_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        assert!(object_has_field(schema, field), "{name} lacks {field}");
    }

    #[rstest]
    #[case("/login")]
    #[case("/register")]
    #[case("/submitComplaint")]
    #[case("/getAllComplaintsForUser")]
    #[case("/getAllComplaintsForAdmin")]
    #[case("/viewComplaint")]
    #[case("/resolveComplaint")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }

    #[rstest]
    fn secret_code_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(SECRET_CODE_SCHEME));
    }
}
