use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use slugbin::commands::serve::router;
use slugbin::config::Config;
use slugbin::controllers::paste;
use slugbin::App;
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup_app() -> (App, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.database.url = format!(
        "sqlite://{}?mode=rwc",
        temp_dir.path().join("test.sqlite3").display()
    );
    config.server.max_upload_size = 4096;
    let app = App::new(config).await.unwrap();
    app.database.init_schema().await.unwrap();
    (app, temp_dir)
}

async fn send(app: &App, request: Request<Body>) -> Response {
    router(app.clone()).oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::post("/create")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn index_serves_form() {
    let (app, _temp) = setup_app().await;

    for uri in ["/", "/index.html"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"action="/create""#));
    }
}

#[tokio::test]
async fn create_redirects_to_slug() {
    let (app, _temp) = setup_app().await;

    let response = send(&app, post_form("title=Hello&content=%3Cb%3Ehi%3C%2Fb%3E")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response.headers()[header::LOCATION].to_str().unwrap();
    let slug = location.strip_prefix('/').unwrap();
    assert_eq!(slug.len(), 6);

    let stored = paste::get(&app, slug).await.unwrap();
    assert_eq!(stored.title.as_deref(), Some("Hello"));
    assert_eq!(stored.content, "<b>hi</b>");
}

#[tokio::test]
async fn create_without_content_is_bad_request() {
    let (app, _temp) = setup_app().await;

    for body in ["title=only", "title=x&content=+++", ""] {
        let response = send(&app, post_form(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    assert_eq!(app.database.count_pastes().await.unwrap(), 0);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let (app, _temp) = setup_app().await;

    let body = format!("content={}", "a".repeat(8192));
    let response = send(&app, post_form(&body)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn paste_page_escapes_content() {
    let (app, _temp) = setup_app().await;
    let slug = paste::create(&app, "<i>t</i>", "<script>alert(1)</script>")
        .await
        .unwrap();

    let response = send(&app, get(&format!("/{slug}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("&lt;i&gt;t&lt;/i&gt;"));
    assert!(!html.contains("<script>"));
    assert!(html.contains(&slug));
}

#[tokio::test]
async fn raw_returns_unescaped_plain_text() {
    let (app, _temp) = setup_app().await;
    let slug = paste::create(&app, "", "<b>a & b</b>").await.unwrap();

    let response = send(&app, get(&format!("/raw/{slug}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(body_text(response).await, "<b>a & b</b>");
}

#[tokio::test]
async fn unknown_slugs_are_not_found() {
    let (app, _temp) = setup_app().await;

    for uri in ["/nope42", "/raw/nope42", "/raw/nope42/extra"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}
