//! Descriptor behavior: getters, static values, setup hooks, dynamic
//! segments.

use std::cell::Cell;
use std::rc::Rc;

use ceibo::{Attr, Blueprint, Descriptor, NodeFn, Value, blueprint, create};

#[test]
fn evaluates_a_descriptor() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "key" => Descriptor::new().with_get(|_node, _key| Ok(Value::from("value"))),
    })
    .unwrap();

    assert_eq!(tree.get("key").unwrap(), Value::from("value"));
}

#[test]
fn processes_descriptors_recursively() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "key" => blueprint! {
            "another_key" => Descriptor::new().with_get(|_node, _key| Ok(Value::from("value"))),
        },
    })
    .unwrap();

    let key = tree.get("key").unwrap().into_node().unwrap();
    assert_eq!(key.get("another_key").unwrap(), Value::from("value"));
}

#[test]
fn get_receives_the_key_as_argument() {
    ceibo_testhelpers::setup();

    let descriptor = Descriptor::new().with_get(|_node, key| Ok(Value::from(key)));

    let tree = create(&blueprint! {
        "foo" => descriptor.clone(),
        "bar" => descriptor,
    })
    .unwrap();

    assert_eq!(tree.get("foo").unwrap(), Value::from("foo"));
    assert_eq!(tree.get("bar").unwrap(), Value::from("bar"));
}

#[test]
fn get_is_reevaluated_on_every_access() {
    ceibo_testhelpers::setup();

    let counter = Rc::new(Cell::new(0_i64));
    let c = Rc::clone(&counter);

    let tree = create(&blueprint! {
        "key" => Descriptor::new().with_get(move |_node, _key| {
            c.set(c.get() + 1);
            Ok(Value::from(c.get()))
        }),
    })
    .unwrap();

    assert_eq!(tree.get("key").unwrap(), Value::from(1));
    assert_eq!(tree.get("key").unwrap(), Value::from(2));
    assert_eq!(counter.get(), 2);
}

#[test]
fn value_installs_a_static_field() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "key" => Descriptor::new().with_value(42),
    })
    .unwrap();

    assert_eq!(tree.get("key").unwrap(), Value::from(42));
    assert_eq!(tree.get("key").unwrap(), Value::from(42));
}

#[test]
fn value_takes_precedence_over_get() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "key" => Descriptor::new()
            .with_value("static")
            .with_get(|_node, _key| Ok(Value::from("computed"))),
    })
    .unwrap();

    assert_eq!(tree.get("key").unwrap(), Value::from("static"));
}

#[test]
fn falsy_values_are_still_static() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "zero" => Descriptor::new()
            .with_value(0)
            .with_get(|_node, _key| Ok(Value::from("computed"))),
        "empty" => Descriptor::new()
            .with_value("")
            .with_get(|_node, _key| Ok(Value::from("computed"))),
        "no" => Descriptor::new()
            .with_value(false)
            .with_get(|_node, _key| Ok(Value::from("computed"))),
    })
    .unwrap();

    assert_eq!(tree.get("zero").unwrap(), Value::from(0));
    assert_eq!(tree.get("empty").unwrap(), Value::from(""));
    assert_eq!(tree.get("no").unwrap(), Value::from(false));
}

#[test]
fn empty_descriptor_installs_null() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "key" => Descriptor::new(),
    })
    .unwrap();

    assert!(tree.get("key").unwrap().is_null());
}

#[test]
fn descriptors_can_access_the_current_tree() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "foo" => Descriptor::new().with_get(|node, _key| {
            let bar = node.get("bar")?;
            Ok(Value::from(format!(
                "The answer to life, the universe and everything is {}",
                bar.as_i64().unwrap_or_default()
            )))
        }),
        "bar" => Descriptor::new().with_value(42),
    })
    .unwrap();

    assert_eq!(
        tree.get("foo").unwrap(),
        Value::from("The answer to life, the universe and everything is 42")
    );
}

#[test]
fn setup_can_mutate_the_tree_on_build() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "foo" => Descriptor::new()
            .with_get(|_node, _key| Ok(Value::from("bar")))
            .with_setup(|node, key| {
                node.define(key.to_uppercase(), "generated property");
                Ok(())
            }),
    })
    .unwrap();

    assert_eq!(tree.get("FOO").unwrap(), Value::from("generated property"));
    assert_eq!(tree.get("foo").unwrap(), Value::from("bar"));
}

fn dynamic(definition: Blueprint) -> Descriptor {
    Descriptor::new().with_value(NodeFn::new(move |args| {
        let index = args.first().and_then(Value::as_i64).unwrap_or_default();
        let copy: Blueprint = definition
            .iter()
            .map(|(key, attr)| {
                let text = match attr {
                    Attr::Value(Value::String(s)) => s.clone(),
                    _ => String::new(),
                };
                (key.to_owned(), format!("{index} {text}"))
            })
            .collect();
        Ok(Value::Node(create(&copy)?))
    }))
}

#[test]
fn value_descriptors_support_dynamic_segments() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "key" => dynamic(blueprint! { "another_key" => "value" }),
    })
    .unwrap();

    let one = tree.get("key").unwrap().call(&[Value::from(1)]).unwrap();
    let two = tree.get("key").unwrap().call(&[Value::from(2)]).unwrap();
    assert_eq!(
        one.as_node().unwrap().get("another_key").unwrap(),
        Value::from("1 value")
    );
    assert_eq!(
        two.as_node().unwrap().get("another_key").unwrap(),
        Value::from("2 value")
    );
}

#[test]
fn dynamic_segments_process_descriptors() {
    ceibo_testhelpers::setup();

    let definition = blueprint! {
        "another_key" => Descriptor::new().with_get(|_node, _key| Ok(Value::from("value"))),
    };
    let segment = Descriptor::new()
        .with_value(NodeFn::new(move |_args| Ok(Value::Node(create(&definition)?))));

    let tree = create(&blueprint! { "key" => segment }).unwrap();

    let variant = tree.get("key").unwrap().call(&[Value::from(1)]).unwrap();
    assert_eq!(
        variant.as_node().unwrap().get("another_key").unwrap(),
        Value::from("value")
    );
}
