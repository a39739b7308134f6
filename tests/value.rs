use bison_request::{Map, ServerRequest, Value};

use serde::{Deserialize, Serialize};

#[test]
#[cfg(feature = "json")]
fn json_round_trip_keeps_order_and_kinds() {
    let json = r#"{"z":1,"a":[true,null,1.5],"m":{"s":"x"}}"#;

    let value: Value = serde_json::from_str(json).unwrap();
    let map = value.as_map().unwrap();

    assert!(map.keys().eq(["z", "a", "m"]));
    assert_eq!(map["z"], Value::Int(1));
    assert_eq!(
        map["a"],
        Value::List(vec![Value::Bool(true), Value::Null, Value::Float(1.5)])
    );
    assert_eq!(value.get("m").and_then(|m| m.get("s")), Some(&Value::from("x")));

    assert_eq!(serde_json::to_string(&value).unwrap(), json);
}

#[test]
#[cfg(feature = "json")]
fn typed_attributes() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Claims {
        sub: String,
        admin: bool,
        exp: u64,
    }

    let claims = Claims {
        sub: "ada".into(),
        admin: false,
        exp: 1_700_000_000,
    };

    let mut req = ServerRequest::builder().body("").unwrap();
    req.set_attribute("claims", Value::from_serialize(&claims).unwrap());

    let stored = req.attribute("claims", Value::Null);
    assert_eq!(stored.get("sub"), Some(&Value::from("ada")));
    assert_eq!(stored.deserialize_into::<Claims>().unwrap(), claims);
}

#[test]
fn accessors() {
    let value = Value::from(Map::from([("k".to_owned(), Value::from("v"))]));

    assert_eq!(value.kind(), "map");
    assert!(!value.is_scalar());
    assert_eq!(value.get("k").and_then(Value::as_str), Some("v"));
    assert_eq!(value.get("missing"), None);

    assert_eq!(Value::from(None::<&str>), Value::Null);
    assert_eq!(Value::from(7u16).as_i64(), Some(7));
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from("x").to_string(), "x");
}
