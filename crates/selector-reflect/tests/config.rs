//! Accessor conventions and member references loaded from host configuration.

mod common;

use common::registry;
use selector_reflect::{AccessorConvention, MethodDescriptor, Reflector, Type};

#[test]
fn convention_defaults_fill_missing_keys() {
    let c: AccessorConvention = serde_json::from_str(r#"{ "getter_prefix": "read_" }"#).unwrap();
    assert_eq!(c.getter_prefix, "read_");
    assert_eq!(c.setter_prefix, "set_");
    assert_eq!(serde_json::from_str::<AccessorConvention>("{}").unwrap(), AccessorConvention::default());
}

#[test]
fn convention_survives_json() {
    let c = AccessorConvention { getter_prefix: "Get".into(), setter_prefix: "Set".into() };
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(serde_json::from_str::<AccessorConvention>(&json).unwrap(), c);
}

#[test]
fn persisted_accessor_still_resolves() {
    let r = registry();
    let set_text = r.find_method("IFoo", "set_Text", &[Type::string()]).unwrap();

    let json = serde_json::to_string(set_text).unwrap();
    let restored: MethodDescriptor = serde_json::from_str(&json).unwrap();

    assert_eq!(&restored, set_text);
    let p = Reflector::new(&r).property_from_accessor(&restored).unwrap();
    assert_eq!(p.name, "Text");
}
