use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Events API",
        version = "0.1.0",
        description = "Draft, publish and browse events authored by users"
    ),
    nest(
        (path = "/events", api = domain_events::ApiDoc),
        (path = "/users", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_nested_under_resources() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in ["/events", "/events/{id}", "/events/{id}/publish", "/users"] {
            assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
        }
    }
}
