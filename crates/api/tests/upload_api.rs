//! Integration tests for `POST /api/upload-system`.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::body_json;
use tower::ServiceExt;

const BOUNDARY: &str = "fence-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/upload-system")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

#[tokio::test]
async fn upload_writes_files_and_returns_system() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let request = upload_request(&[
        Part::Text("name", "Nowy System Premium"),
        Part::Text("basePrice", "320"),
        Part::File("objFile", "fence.obj", b"v 0 0 0"),
        Part::File("mtlFile", "fence.mtl", b"newmtl a"),
        Part::File("textureFile", "fence.tif", b"II*\0"),
    ]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "System uploaded successfully");
    assert_eq!(json["system"]["id"], "nowy-system-premium");
    assert_eq!(json["system"]["objFile"], "/Ogrodzenie/fence.obj");
    assert_eq!(json["system"]["textureFile"], "/Ogrodzenie/fence.tif");
    assert_eq!(json["system"]["basePrice"], 320.0);

    let assets = dir.path().join("Ogrodzenie");
    assert_eq!(std::fs::read(assets.join("fence.obj")).unwrap(), b"v 0 0 0");
    assert_eq!(std::fs::read(assets.join("fence.mtl")).unwrap(), b"newmtl a");
    assert!(assets.join("fence.tif").is_file());
}

#[tokio::test]
async fn upload_without_texture_or_price_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let request = upload_request(&[
        Part::Text("name", "Prosty"),
        Part::File("objFile", "p.obj", b"o"),
        Part::File("mtlFile", "p.mtl", b"m"),
    ]);
    let json = body_json(app.oneshot(request).await.unwrap()).await;

    assert!(json["system"]["textureFile"].is_null());
    assert_eq!(json["system"]["basePrice"], 150.0);
}

#[tokio::test]
async fn upload_with_blank_texture_input_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let request = upload_request(&[
        Part::Text("name", "Bez Tekstury"),
        Part::File("objFile", "p.obj", b"o"),
        Part::File("mtlFile", "p.mtl", b"m"),
        Part::File("textureFile", "", b""),
    ]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["system"]["id"], "bez-tekstury");
    assert!(json["system"]["textureFile"].is_null());
    assert!(dir.path().join("Ogrodzenie/p.obj").is_file());
}

#[tokio::test]
async fn upload_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());
    std::fs::write(dir.path().join("Ogrodzenie/same.obj"), b"old").unwrap();

    let request = upload_request(&[
        Part::Text("name", "Same"),
        Part::File("objFile", "same.obj", b"new"),
        Part::File("mtlFile", "same.mtl", b"m"),
    ]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        std::fs::read(dir.path().join("Ogrodzenie/same.obj")).unwrap(),
        b"new"
    );
}

#[tokio::test]
async fn upload_strips_directories_from_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let request = upload_request(&[
        Part::Text("name", "Sneaky"),
        Part::File("objFile", "../../escape.obj", b"o"),
        Part::File("mtlFile", "x.mtl", b"m"),
    ]);
    let json = body_json(app.oneshot(request).await.unwrap()).await;

    assert_eq!(json["system"]["objFile"], "/Ogrodzenie/escape.obj");
    assert!(dir.path().join("Ogrodzenie/escape.obj").is_file());
    assert!(!dir.path().join("escape.obj").exists());
}

#[tokio::test]
async fn upload_missing_mtl_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let request = upload_request(&[
        Part::Text("name", "Half"),
        Part::File("objFile", "half.obj", b"o"),
    ]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "OBJ and MTL files are required");
    assert!(!dir.path().join("Ogrodzenie/half.obj").exists());
}

#[tokio::test]
async fn upload_missing_name_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let request = upload_request(&[
        Part::File("objFile", "a.obj", b"o"),
        Part::File("mtlFile", "a.mtl", b"m"),
    ]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
