//! Tests for the request and response values.

use super::{HttpRequest, HttpResponse};

fn answer(status: http::StatusCode, body: &[u8]) -> HttpResponse {
    HttpResponse::new(status, body.to_vec())
}

#[test]
fn get_targets_the_given_url() {
    let url = url::Url::parse("https://example.com/update?domains=a&token=T").unwrap();
    let req = HttpRequest::get(url.clone());

    assert_eq!(req.method, http::Method::GET);
    assert_eq!(req.url, url);
}

#[test]
fn is_success_only_for_2xx() {
    assert!(answer(http::StatusCode::OK, b"").is_success());
    assert!(!answer(http::StatusCode::BAD_REQUEST, b"").is_success());
}

#[test]
fn body_text_is_trimmed() {
    let resp = answer(http::StatusCode::OK, b"OK\n");

    assert_eq!(resp.body_text(), Some("OK"));
}

#[test]
fn body_text_none_for_invalid_utf8() {
    let resp = answer(http::StatusCode::OK, &[0xff, 0xfe]);

    assert_eq!(resp.body_text(), None);
    assert_eq!(resp.rejection(), None);
}

#[test]
fn ko_answer_is_a_rejection() {
    let resp = answer(http::StatusCode::OK, b"KO\r\n");

    assert_eq!(resp.rejection(), Some("KO"));
}

#[test]
fn ok_answer_is_not_a_rejection() {
    assert_eq!(answer(http::StatusCode::OK, b"OK").rejection(), None);
    assert_eq!(answer(http::StatusCode::OK, b"").rejection(), None);
}
