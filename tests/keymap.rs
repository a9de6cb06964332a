//! Public API tests for the keymap builder

use serde_json::json;
use sublime_keymap::keymap::{
    bind, context, to_json, Binding, BindingSource, Condition, Context, JsonOptions, Keymap,
    KeymapError, KeymapOptions, MatchScope, Operator,
};

// ========================================================================
// Contexts
// ========================================================================

#[test]
fn test_standalone_context_returns_itself() {
    let ctx: Context = context("preceding_text").regex_match("^[*_-]+");
    assert_eq!(ctx.operator(), Some(Operator::RegexMatch));
    assert_eq!(
        ctx.to_string(),
        r#"{"key": "preceding_text", "operator": "regex_match", "operand": "^[*_-]+"}"#
    );
}

#[test]
fn test_attached_context_returns_binding() {
    for operator in Operator::ALL {
        let binding: Binding = bind(["x"])
            .unwrap()
            .when("foo")
            .compare(operator.as_str(), 42)
            .unwrap();
        assert_eq!(binding.context()[0].operator(), Some(operator));
        assert_eq!(binding.context()[0].operand(), Some(&json!(42)));
    }
}

#[test]
fn test_unsupported_operator_name() {
    let err = context("foo").compare("equals", 1).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported operator: equals");
}

// ========================================================================
// Bindings
// ========================================================================

#[test]
fn test_binding_requires_keys() {
    let err = bind(Vec::<&str>::new()).unwrap_err();
    assert!(matches!(err, KeymapError::InvalidBinding));
}

#[test]
fn test_binding_display_is_indented_json() {
    let binding = bind(["ctrl+s"]).unwrap().to("save");
    assert_eq!(
        binding.to_string(),
        "{\n  \"keys\": [\n    \"ctrl+s\"\n  ],\n  \"command\": \"save\"\n}"
    );
}

#[test]
fn test_args_sorted_regardless_of_insertion_order() {
    let binding = bind(["x"])
        .unwrap()
        .to_with("foo", [("z", 1), ("o", 2), ("a", 3), ("c", 4)]);
    let json = to_json(binding.args(), &JsonOptions::compact()).unwrap();
    assert_eq!(json, r#"{"a": 3, "c": 4, "o": 2, "z": 1}"#);
}

// ========================================================================
// Keymap
// ========================================================================

#[test]
fn test_common_context_follows_own_context() {
    let common = [context("selector").equal("source.rust"), context("b").is_true()];
    let keymap = Keymap::with_options(
        KeymapOptions::new().common_context(common.clone()),
        bind(["x"]).unwrap().when("a").is_false(),
    );

    let keys: Vec<&str> = keymap.bindings()[0]
        .context()
        .iter()
        .map(|c| c.key())
        .collect();
    assert_eq!(keys, ["a", "selector", "b"]);
}

#[test]
fn test_length_tracks_appends() {
    let mut keymap = Keymap::default();
    assert_eq!(keymap.len(), 0);

    keymap
        .extend([bind(["a"]).unwrap(), bind(["b"]).unwrap()])
        .push(bind(["c"]).unwrap());
    assert_eq!(keymap.len(), 3);

    keymap <<= bind(["d"]).unwrap();
    assert_eq!(keymap.len(), 4);
}

#[test]
fn test_nested_sources_match_flat_sources() {
    let options = KeymapOptions::new().default_match_all(MatchScope::All);
    let flat = Keymap::with_options(
        options.clone(),
        vec![
            bind(["a"]).unwrap().when("x").is_true(),
            bind(["b"]).unwrap(),
            bind(["c"]).unwrap(),
        ],
    );
    let nested = Keymap::with_options(
        options,
        (
            bind(["a"]).unwrap().when("x").is_true(),
            BindingSource::from(vec![Keymap::new(bind(["b"]).unwrap())]),
            [bind(["c"]).unwrap()],
        ),
    );
    assert_eq!(flat.bindings(), nested.bindings());
}

#[test]
fn test_serializing_keymap_equals_serializing_bindings() {
    let keymap = Keymap::new([bind(["a"]).unwrap().to("first"), bind(["b"]).unwrap()]);
    assert_eq!(
        to_json(&keymap, &JsonOptions::default()).unwrap(),
        to_json(keymap.bindings(), &JsonOptions::default()).unwrap()
    );
}
