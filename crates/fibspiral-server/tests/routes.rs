use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use fibspiral_server::{ServerConfig, app};
use tower::ServiceExt;

const MAX_BODY: usize = 64 * 1024 * 1024;

fn router_with_index(index: &std::path::Path) -> Router {
    let config = ServerConfig {
        index_path: index.to_path_buf(),
        ..ServerConfig::default()
    };
    app(&config)
}

fn router() -> Router {
    router_with_index(std::path::Path::new("/nonexistent/index.html"))
}

async fn send(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.unwrap()
}

async fn get(router: Router, uri: &str) -> Response {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(router: Router, uri: &str, form: &str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(router, request).await
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), MAX_BODY).await.unwrap().to_vec()
}

async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

fn content_type(response: &Response) -> &str {
    response.headers()[header::CONTENT_TYPE].to_str().unwrap()
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
}

#[tokio::test]
async fn options_short_circuits_everywhere() {
    for uri in ["/", "/api/calculate", "/api/fibonacci-image", "/anything/else"] {
        let request = Request::options(uri).body(Body::empty()).unwrap();
        let response = send(router(), request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{uri}");
        assert_cors(&response);
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn image_with_defaults() {
    let response = get(router(), "/api/fibonacci-image").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "image/png");
    assert_cors(&response);

    let png = body_bytes(response).await;
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (600, 600));
}

#[tokio::test]
async fn image_honours_size_and_clamps_terms() {
    let response = get(router(), "/api/fibonacci-image?terms=0&size=128").await;
    assert_eq!(response.status(), StatusCode::OK);
    let clamped = body_bytes(response).await;

    let response = get(router(), "/api/fibonacci-image?terms=1&size=128").await;
    let single = body_bytes(response).await;
    assert_eq!(clamped, single);

    let img = image::load_from_memory(&clamped).unwrap();
    assert_eq!((img.width(), img.height()), (128, 128));
}

#[tokio::test]
async fn unparsable_parameters_use_defaults() {
    let response = get(router(), "/api/fibonacci-image?terms=lots&size=big").await;
    assert_eq!(response.status(), StatusCode::OK);
    let img = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!(img.width(), 600);
}

#[tokio::test]
async fn out_of_range_size_is_rejected() {
    for size in ["0", "-20", "5000"] {
        let response = get(router(), &format!("/api/fibonacci-image?size={size}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "size={size}");
        assert_cors(&response);
        assert!(body_text(response).await.contains("out of range"));
    }
}

#[tokio::test]
async fn image_is_get_only() {
    let response = post_form(router(), "/api/fibonacci-image", "terms=3").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&response);
    assert_eq!(body_text(response).await, "GET only");
}

#[tokio::test]
async fn calculator_operations() {
    let cases = [
        ("a=2&b=3&op=add", r#"{"result":5.0}"#),
        ("a=2&b=3&op=sub", r#"{"result":-1.0}"#),
        ("a=2&b=3&op=mul", r#"{"result":6.0}"#),
        ("a=3&b=2&op=div", r#"{"result":1.5}"#),
        ("a=2&b=3", r#"{"result":5.0}"#),
        ("", r#"{"result":0.0}"#),
        ("a=oops&b=4", r#"{"result":4.0}"#),
        ("a=1&b=0&op=div", r#"{"result":null}"#),
        ("a=1&b=1&op=mod", r#"{"result":null}"#),
    ];
    for (form, expected) in cases {
        let response = post_form(router(), "/api/calculate", form).await;
        assert_eq!(response.status(), StatusCode::OK, "{form}");
        assert_eq!(content_type(&response), "application/json; charset=utf-8");
        assert_cors(&response);
        assert_eq!(body_text(response).await, expected, "{form}");
    }
}

#[tokio::test]
async fn calculator_is_post_only() {
    let response = get(router(), "/api/calculate?a=1&b=2").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(response).await, "POST only");
}

#[tokio::test]
async fn landing_page_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.html");
    std::fs::write(&index, "<h1>spiral</h1>").unwrap();

    for uri in ["/", "/some/deep/link"] {
        let response = get(router_with_index(&index), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(content_type(&response), "text/html; charset=utf-8");
        assert_cors(&response);
        assert_eq!(body_text(response).await, "<h1>spiral</h1>");
    }
}

#[tokio::test]
async fn missing_landing_page_is_404() {
    let response = get(router(), "/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
    assert_eq!(body_text(response).await, "index.html not found");
}

#[tokio::test]
async fn landing_page_is_get_only() {
    let response = post_form(router(), "/", "x=1").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(response).await, "Method Not Allowed");
}

#[tokio::test]
async fn unreadable_landing_page_is_500() {
    // A directory exists but cannot be read as a file.
    let dir = tempfile::tempdir().unwrap();
    let response = get(router_with_index(dir.path()), "/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Server error");
}
