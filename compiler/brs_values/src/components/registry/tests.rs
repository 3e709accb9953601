use std::collections::BTreeMap;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::call_method;

fn section(name: &str, context: &Rc<RuntimeContext>) -> ObjectRef {
    ObjectRef::new(RoRegistrySection::new(name, Rc::clone(context)))
}

#[test]
fn write_read_delete() {
    let context = Rc::new(RuntimeContext::builder().build());
    let prefs = section("prefs", &context);

    let written = call_method(&prefs, "write", vec!["lang".into(), "en".into()]).unwrap();
    assert_eq!(written.as_bool(), Some(true));
    assert_eq!(call_method(&prefs, "read", vec!["lang".into()]).unwrap().as_str(), Some("en"));
    assert_eq!(call_method(&prefs, "exists", vec!["lang".into()]).unwrap().as_bool(), Some(true));
    assert_eq!(call_method(&prefs, "delete", vec!["lang".into()]).unwrap().as_bool(), Some(true));
    assert_eq!(call_method(&prefs, "exists", vec!["lang".into()]).unwrap().as_bool(), Some(false));
    assert_eq!(call_method(&prefs, "read", vec!["lang".into()]).unwrap().as_str(), Some(""));
    assert_eq!(call_method(&prefs, "flush", vec![]).unwrap().as_bool(), Some(true));
}

#[test]
fn sections_share_the_context_store() {
    let seed = BTreeMap::from([(
        "auth".to_string(),
        BTreeMap::from([("token".to_string(), "abc".to_string())]),
    )]);
    let context = Rc::new(RuntimeContext::builder().registry(seed).build());
    let first = section("auth", &context);
    let second = section("auth", &context);

    call_method(&first, "write", vec!["user".into(), "ann".into()]).unwrap();
    let keys = call_method(&second, "getKeyList", vec![]).unwrap();
    let keys = keys
        .as_object()
        .unwrap()
        .elements()
        .unwrap()
        .iter()
        .map(|k| k.as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["token", "user"]);
    assert_eq!(context.registry_read("auth", "user").as_deref(), Some("ann"));
}
