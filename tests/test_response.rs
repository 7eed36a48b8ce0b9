use quickserve::http::request::RequestBuilder;
use quickserve::http::response::{Response, ResponseBuilder, StatusCode};
use quickserve::http::writer::{ResponseWriter, serialize_response};

fn split(wire: &[u8]) -> (String, Vec<u8>) {
    let end = wire.windows(4).position(|w| w == b"\r\n\r\n").unwrap() + 4;
    (String::from_utf8(wire[..end].to_vec()).unwrap(), wire[end..].to_vec())
}

#[test]
fn test_status_code() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
}

#[test]
fn test_response_builder_auto_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"This is the body".to_vec())
        .build();

    assert_eq!(response.header("Content-Length"), Some("16"));
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.header("Content-Length"), Some("999"));
    assert_eq!(response.headers.len(), 1);
}

#[test]
fn test_response_builder_replaces_header_in_place() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("A", "1")
        .header("B", "2")
        .header("A", "3")
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["A", "B", "Content-Length"]);
    assert_eq!(response.header("A"), Some("3"));
}

#[test]
fn test_serialize_response() {
    let wire = serialize_response(&Response::json_text("{}"));

    assert_eq!(
        &wire[..],
        b"HTTP/1.1 200 OK\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: 2\r\n\r\n{}"
    );
}

#[test]
fn test_send_text_round_trip() {
    let text = "{\"ok\":true,\"name\":\"zoë\"}";
    let mut req = RequestBuilder::new().build().unwrap();

    req.send_text(text).unwrap();

    let (head, body) = split(req.outbound());
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains(&format!("Content-Length: {}\r\n", text.len())));
    assert_eq!(String::from_utf8(body).unwrap(), text);
    assert!(req.has_response());
}

#[test]
fn test_send_image() {
    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let mut req = RequestBuilder::new().build().unwrap();

    req.send_image(&png).unwrap();

    let (head, body) = split(req.outbound());
    assert_eq!(
        head,
        "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 8\r\n\r\n"
    );
    assert_eq!(body, png);
}

#[test]
fn test_send_file() {
    let mut req = RequestBuilder::new().build().unwrap();

    req.send_file("report.csv", b"a,b\n1,2\n").unwrap();

    let (head, body) = split(req.outbound());
    assert_eq!(
        head,
        "HTTP/1.1 200 OK\r\n\
         Content-Type: application/octet-stream\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Content-Disposition: attachment; filename=\"report.csv\"\r\n\
         Content-Length: 8\r\n\r\n"
    );
    assert_eq!(body, b"a,b\n1,2\n");
}

#[test]
fn test_send_file_name_cannot_split_headers() {
    let response = Response::attachment("evil\r\nSet-Cookie: x.txt", b"");

    assert_eq!(
        response.header("Content-Disposition"),
        Some("attachment; filename=\"evilSet-Cookie: x.txt\"")
    );
}

#[test]
fn test_send_preflight() {
    let mut req = RequestBuilder::new().build().unwrap();

    req.send_preflight().unwrap();

    let (head, body) = split(req.outbound());
    assert_eq!(
        head,
        "HTTP/1.1 200 OK\r\n\
         Allow: GET, POST, PUT, DELETE\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Access-Control-Allow-Methods: GET, POST, PUT, DELETE\r\n\
         Access-Control-Allow-Headers: *\r\n\
         Access-Control-Max-Age: 86400\r\n\
         Content-Length: 0\r\n\r\n"
    );
    assert!(body.is_empty());
}

#[test]
fn test_two_sends_are_written_in_order() {
    let mut req = RequestBuilder::new().build().unwrap();

    req.send_text("1").unwrap();
    req.send_text("2").unwrap();

    let wire = req.outbound();
    let first = serialize_response(&Response::json_text("1"));
    assert!(wire.starts_with(&first));
    assert!(wire.ends_with(b"\r\n\r\n2"));
}

#[tokio::test]
async fn test_response_writer_writes_everything() {
    let response = Response::attachment("a.bin", &[7u8; 3000]);
    let mut out: Vec<u8> = Vec::new();

    let mut writer = ResponseWriter::new(&response);
    writer.write_to_stream(&mut out).await.unwrap();

    assert_eq!(out, serialize_response(&response));
    assert!(out.ends_with(&[7u8; 16]));
}
