//! Parent-chain navigation, metadata records, hidden-field invariants,
//! and cross-tree linking.

use ceibo::{CreateOptions, Descriptor, Value, blueprint, create, create_with, meta, parent};

#[test]
fn parent_node_is_accessible() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "key" => blueprint! {
            "another_key" => "value",
        },
    })
    .unwrap();

    let key = tree.get("key").unwrap();
    let up = parent(&key).unwrap();
    assert_eq!(up, tree);

    let round_trip = up
        .get("key")
        .unwrap()
        .into_node()
        .unwrap()
        .get("another_key")
        .unwrap();
    assert_eq!(round_trip, Value::from("value"));
}

#[test]
fn the_root_has_no_parent() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! { "foo" => "a value" }).unwrap();

    assert!(tree.parent().is_none());
}

#[test]
fn parent_and_meta_are_total_queries() {
    ceibo_testhelpers::setup();

    assert!(parent(&Value::Null).is_none());
    assert!(meta(&Value::Null).is_none());
    assert!(parent(&Value::from("scalar")).is_none());
    assert!(meta(&Value::from(1)).is_none());
}

#[test]
fn hidden_fields_never_enumerate() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "foo" => blueprint! {
            "bar" => "a value",
        },
    })
    .unwrap();

    let foo = tree.get("foo").unwrap().into_node().unwrap();
    assert_eq!(foo.len(), 1);
    assert_eq!(foo.keys(), ["bar"]);
    // the node has both a parent reference and a meta record anyway
    assert!(foo.parent().is_some());
    assert!(foo.meta().is_some());
}

#[test]
fn meta_identifies_the_attachment_key() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "foo" => blueprint! {},
    })
    .unwrap();

    assert_eq!(tree.meta().map(|m| m.key), Some("root".to_owned()));
    let foo = tree.get("foo").unwrap();
    assert_eq!(meta(&foo).map(|m| m.key), Some("foo".to_owned()));
}

#[test]
fn descriptors_can_collect_the_root_to_leaf_path() {
    ceibo_testhelpers::setup();

    let descriptor = Descriptor::new().with_get(|node, key| {
        let mut keys = vec![key.to_owned()];
        let mut cursor = Some(node.clone());
        while let Some(n) = cursor {
            if let Some(m) = n.meta() {
                keys.insert(0, m.key);
            }
            cursor = n.parent();
        }
        Ok(Value::Array(keys.into_iter().map(Value::from).collect()))
    });

    let tree = create(&blueprint! {
        "foo" => blueprint! {
            "bar" => blueprint! {
                "baz" => descriptor,
            },
        },
    })
    .unwrap();

    let collected = tree
        .get("foo")
        .unwrap()
        .into_node()
        .unwrap()
        .get("bar")
        .unwrap()
        .into_node()
        .unwrap()
        .get("baz")
        .unwrap();

    let expected: Vec<Value> = ["root", "foo", "bar", "baz"]
        .into_iter()
        .map(Value::from)
        .collect();
    assert_eq!(collected, Value::Array(expected));
}

#[test]
fn node_path_mirrors_the_meta_chain() {
    ceibo_testhelpers::setup();

    let tree = create(&blueprint! {
        "foo" => blueprint! {
            "bar" => blueprint! {},
        },
    })
    .unwrap();

    let bar = tree
        .get("foo")
        .unwrap()
        .into_node()
        .unwrap()
        .get("bar")
        .unwrap()
        .into_node()
        .unwrap();
    assert_eq!(bar.path(), ["root", "foo", "bar"]);
}

#[test]
fn create_assigns_a_parent_tree() {
    ceibo_testhelpers::setup();

    let parent_tree = create(&blueprint! {
        "foo" => blueprint! { "qux" => "another value" },
        "bar" => "a value",
    })
    .unwrap();

    let tree1 = create_with(
        &blueprint! { "baz" => blueprint! {} },
        CreateOptions::new().with_parent(parent_tree.clone()),
    )
    .unwrap();

    let baz = tree1.get("baz").unwrap().into_node().unwrap();
    let grandparent = baz.parent().unwrap().parent().unwrap();
    assert_eq!(grandparent, parent_tree);
    assert_eq!(grandparent.get("bar").unwrap(), Value::from("a value"));

    let foo = parent_tree.get("foo").unwrap().into_node().unwrap();
    let tree2 = create_with(
        &blueprint! { "baz" => blueprint! {} },
        CreateOptions::new().with_parent(foo.clone()),
    )
    .unwrap();

    assert_eq!(tree2.parent().unwrap(), foo);
    assert_eq!(
        tree2.parent().unwrap().get("qux").unwrap(),
        Value::from("another value")
    );
}

#[test]
fn linking_trees_copies_nothing() {
    ceibo_testhelpers::setup();

    let parent_tree = create(&blueprint! { "shared" => "data" }).unwrap();
    let tree = create_with(
        &blueprint! { "own" => 1 },
        CreateOptions::new().with_parent(parent_tree.clone()),
    )
    .unwrap();

    assert!(!tree.contains_key("shared"));
    assert_eq!(tree.keys(), ["own"]);
    assert_eq!(parent_tree.keys(), ["shared"]);
}
