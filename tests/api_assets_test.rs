//! Integration tests for the assets API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::json;
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_bytes, body_to_json, body_to_string, test_app};

    /// Tests searching icons with a query string
    #[tokio::test]
    async fn it_searches_with_query_string() {
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/search?query=cat&type=icon")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["total"], json!(1));
        assert_eq!(body["data"]["totalPages"], json!(1));
        assert_eq!(body["data"]["currentPage"], json!(1));
        assert_eq!(body["data"]["hasMore"], json!(false));
        assert_eq!(body["data"]["assets"][0]["type"], json!("icon"));
        assert_eq!(body["data"]["assets"][0]["id"], json!("icon-location-0"));
    }

    /// Tests searching images with a JSON body and string encoded numbers
    #[tokio::test]
    async fn it_searches_with_json_body() {
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/search")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "query": "nature",
                            "type": "image",
                            "per_page": "4",
                            "safe_search": false,
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_json(response.into_body()).await;
        let data = &body["data"];
        // Four from each of curated, themed and unsplash source
        assert_eq!(data["assets"].as_array().unwrap().len(), 12);
        assert_eq!(data["total"], json!(6 + 800 + 500));
        assert_eq!(data["totalPages"], json!(327));
        assert_eq!(data["hasMore"], json!(true));
        assert_eq!(data["assets"][0]["id"], json!("curated-forest-1"));
        assert_eq!(data["assets"][0]["source"], json!("curated-demo"));
        assert!(
            data["assets"]
                .as_array()
                .unwrap()
                .iter()
                .all(|a| a["type"] == json!("image"))
        );
    }

    /// Tests a missing query is reported as a field error
    #[tokio::test]
    async fn it_returns_400_for_missing_query() {
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/search?type=image")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Invalid parameters"));
        assert_eq!(body["details"][0]["field"], json!("query"));
    }

    /// Tests per_page above the maximum is rejected
    #[tokio::test]
    async fn it_returns_400_for_per_page_over_max() {
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/search?query=cat&per_page=51")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(
            body["details"],
            json!([{
                "field": "per_page",
                "message": "Number must be less than or equal to 50",
            }])
        );
    }

    /// Tests a body that isn't a JSON object
    #[tokio::test]
    async fn it_returns_400_for_malformed_json() {
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/search")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from("{\"query\": "))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["details"][0]["field"], json!("body"));
    }

    /// Tests serving a built-in icon as SVG
    #[tokio::test]
    async fn it_serves_icon_svg() {
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/icon/simple/check")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "image/svg+xml"
        );
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=86400"
        );

        let body = body_to_string(response.into_body()).await;
        assert!(body.starts_with("<svg"));
        assert!(body.contains("M20 6L9 17l-5-5"));
    }

    /// Tests unknown prefixes render the default glyph
    #[tokio::test]
    async fn it_serves_default_icon_for_unknown_prefix() {
        let (app, _dir) = test_app().await;

        let simple = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/assets/icon/simple/default")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let other = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/icon/material/check")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(other.status(), StatusCode::OK);
        assert_eq!(
            body_to_string(other.into_body()).await,
            body_to_string(simple.into_body()).await
        );
    }

    /// Tests downloading an asset with a requested filename
    #[tokio::test]
    async fn it_downloads_assets() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/photos/cat.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(vec![0x89, 0x50, 0x4e, 0x47])
            .create_async()
            .await;
        let (app, _dir) = test_app().await;

        let asset_url = format!("{}/photos/cat.png", server.url());
        let uri = format!(
            "/api/assets/download?url={}&filename=my-cat.png&size=original",
            urlencoding::encode(&asset_url)
        );
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"my-cat.png\""
        );
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "4");
        assert_eq!(
            body_to_bytes(response.into_body()).await,
            vec![0x89, 0x50, 0x4e, 0x47]
        );
    }

    /// Tests the default filename uses the URL's extension
    #[tokio::test]
    async fn it_names_downloads_without_filename() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/photos/forest.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .with_body("jpeg bytes")
            .create_async()
            .await;
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/download")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "url": format!("{}/photos/forest.jpg", server.url()) })
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"asset-"));
        assert!(disposition.ends_with(".jpg\""));
    }

    /// Tests non-web URLs are rejected before anything is fetched
    #[tokio::test]
    async fn it_returns_400_for_invalid_download_url() {
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/download?url=file%3A%2F%2F%2Fetc%2Fpasswd")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["details"][0]["field"], json!("url"));
        assert_eq!(body["details"][0]["message"], json!("Valid URL is required"));
    }

    /// Tests upstream failures don't leak details to the client
    #[tokio::test]
    async fn it_returns_500_when_upstream_fails() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing.png")
            .with_status(404)
            .create_async()
            .await;
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets/download")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "url": format!("{}/missing.png", server.url()) }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(
            body,
            json!({ "success": false, "error": "Internal server error" })
        );
    }
}
