//! End-to-end pipeline tests against a mock remote endpoint.
//!
//! These exercise the public crate surface only: raw archive bytes in,
//! outcomes and progress out.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use roster_photo_upload::{BatchUploader, Config, OutcomeStatus, Progress};
use std::io::{Cursor, Write};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(name.trim_end_matches('/'), options)
                .unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

#[tokio::test]
async fn nested_archive_uploads_with_basic_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/4521/profile-picture"))
        .and(header("Authorization", "Basic aHI6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/users/4522/profile-picture"))
        .and(header("Authorization", "Basic aHI6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uploader = BatchUploader::new(Config {
        base_url: mock_server.uri(),
        credential: "aHI6c2VjcmV0".to_string(),
        ..Default::default()
    })
    .unwrap();

    let archive = build_zip(&[
        ("staff/", b""),
        ("staff/4521.png", b"first photo"),
        ("staff/sub/4522.JPG", b"second photo"),
        ("staff/.DS_Store", b"finder metadata"),
        ("staff/roster.csv", b"not a photo"),
    ]);

    let outcomes = uploader.run(archive).await.unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.status == OutcomeStatus::Success));
    assert_eq!(outcomes[0].display_name, "4521.png");
    assert_eq!(outcomes[1].display_name, "4522.JPG");
    assert_eq!(
        uploader.snapshot().0,
        Progress {
            completed: 2,
            total: 2
        }
    );
}

#[tokio::test]
async fn multipart_body_carries_the_file_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/9001/profile-picture"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let uploader = BatchUploader::new(Config {
        base_url: mock_server.uri(),
        credential: "aHI6c2VjcmV0".to_string(),
        ..Default::default()
    })
    .unwrap();

    uploader
        .run(build_zip(&[("9001.webp", b"webp payload")]))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    let content_type = request
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"9001.webp\""));
    assert!(body.to_ascii_lowercase().contains("content-type: image/webp"));
    assert!(body.contains("webp payload"));
}
