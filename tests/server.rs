use bison_request::server::{self, ServerParams};
use bison_request::{Map, ShapeError, Value};

use std::time::{Duration, UNIX_EPOCH};

#[test]
fn builder_records_connection_facts() {
    let head = http::Request::post("/upload?x=1")
        .body(())
        .unwrap()
        .into_parts()
        .0;

    let params = ServerParams::builder()
        .remote_addr("[2001:db8::1]:443".parse().unwrap())
        .server_addr("127.0.0.1:8080".parse().unwrap())
        .request_time(UNIX_EPOCH + Duration::from_millis(1_500))
        .request(&head)
        .build()
        .unwrap();

    assert_eq!(params.get_str(server::REMOTE_ADDR), Some("2001:db8::1"));
    assert_eq!(params.get(server::REMOTE_PORT), Some(&Value::Int(443)));
    assert_eq!(params.get_str(server::SERVER_ADDR), Some("127.0.0.1"));
    assert_eq!(params.get(server::SERVER_PORT), Some(&Value::Int(8080)));
    assert_eq!(params.get(server::REQUEST_TIME), Some(&Value::Int(1)));
    assert_eq!(params.get(server::REQUEST_TIME_FLOAT), Some(&Value::Float(1.5)));
    assert_eq!(params.get_str(server::REQUEST_METHOD), Some("POST"));
    assert_eq!(params.get_str(server::REQUEST_URI), Some("/upload?x=1"));
    assert_eq!(params.get_str(server::QUERY_STRING), Some("x=1"));
    assert_eq!(params.get_str(server::SERVER_PROTOCOL), Some("HTTP/1.1"));
}

#[test]
fn absent_keys_are_not_an_error() {
    let params = ServerParams::default();

    assert!(params.is_empty());
    assert_eq!(params.get(server::REMOTE_ADDR), None);
}

#[test]
fn keeps_insertion_order() {
    let params = ServerParams::builder()
        .param("B", "2")
        .param("A", "1")
        .param("C", Value::Null)
        .build()
        .unwrap();

    assert!(params.iter().map(|(name, _)| name).eq(["B", "A", "C"]));
    assert_eq!(params.len(), 3);
}

#[test]
fn rejects_non_scalars() {
    let err = ServerParams::builder()
        .param("argv", vec!["a", "b"])
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        ShapeError::NotScalar {
            key: "argv".into(),
            found: "list",
        }
    );

    let mut map = Map::new();
    map.insert("env".into(), Value::Map(Map::new()));
    assert!(ServerParams::try_from(map).is_err());
}
