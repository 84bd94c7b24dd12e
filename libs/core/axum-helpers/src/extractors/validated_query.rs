use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::Query;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query string that has passed `validator` checks.
///
/// Built on `axum_extra`'s `Query`, so repeated keys (`?categories=a&categories=b`)
/// deserialize into a `Vec`.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        params.validate()?;
        Ok(ValidatedQuery(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::{Request, StatusCode}, routing::get};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Search {
        #[serde(default)]
        tags: Vec<String>,
        #[validate(range(min = 1, max = 100))]
        size: Option<u64>,
    }

    fn app() -> Router {
        Router::new().route(
            "/search",
            get(|ValidatedQuery(q): ValidatedQuery<Search>| async move { q.tags.join(",") }),
        )
    }

    async fn call(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_repeated_keys_collect_into_vec() {
        let (status, body) = call("/search?tags=food&tags=toys").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "food,toys");
    }

    #[tokio::test]
    async fn test_out_of_range_is_rejected() {
        let (status, body) = call("/search?size=500").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn test_unparseable_value_is_rejected() {
        let (status, body) = call("/search?size=many").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("INVALID_QUERY"));
    }
}
