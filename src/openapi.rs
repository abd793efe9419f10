//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::http::envelope::{Envelope, ErrorBody};
use crate::http::handlers;
use crate::http::handlers::{
    DeedDetails, GatewayStatus, LandDetails, LandOwner, OwnerBalance, RegisterLandRequest,
    RegistrationOutcome, SupplyInfo,
};

/// Main OpenAPI documentation structure.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Land Registry Gateway API",
        description = "HTTP gateway over the land registry smart contract. Every route \
forwards one request to exactly one contract call and returns a uniform \
success/error envelope. Numeric values wider than native integers are \
rendered as decimal strings, never as JSON numbers. The deed endpoint \
forwards an optional `caller` address to the contract's permission check; \
the gateway performs no signature verification of that identity."
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Local gateway")
    ),
    tags(
        (name = "lands", description = "Parcel queries and registration"),
        (name = "owners", description = "Owner queries"),
        (name = "gateway", description = "Gateway and chain status")
    ),
    paths(
        handlers::get_land,
        handlers::get_land_owner,
        handlers::get_deed,
        handlers::get_owner_balance,
        handlers::get_supply,
        handlers::register_land,
        handlers::get_status,
    ),
    components(
        schemas(
            ErrorBody,
            LandDetails,
            LandOwner,
            DeedDetails,
            OwnerBalance,
            SupplyInfo,
            RegistrationOutcome,
            GatewayStatus,
            RegisterLandRequest,
            Envelope<LandDetails>,
            Envelope<LandOwner>,
            Envelope<DeedDetails>,
            Envelope<OwnerBalance>,
            Envelope<SupplyInfo>,
            Envelope<RegistrationOutcome>,
            Envelope<GatewayStatus>,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_includes_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/api/v1/lands/{id}",
            "/api/v1/lands/{id}/owner",
            "/api/v1/lands/{id}/deed",
            "/api/v1/owners/{address}/balance",
            "/api/v1/supply",
            "/api/v1/lands",
            "/api/v1/status",
        ] {
            assert!(paths.contains(&expected), "missing path {}", expected);
        }
    }

    #[test]
    fn test_document_serializes() {
        let json = ApiDoc::openapi().to_pretty_json().unwrap();
        assert!(json.contains("Land Registry Gateway API"));
    }
}
