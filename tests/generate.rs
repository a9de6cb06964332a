//! End-to-end tests for the generator: definition file in, keymap file out

use std::fs;
use std::path::PathBuf;

use sublime_keymap::cli::{generate, Destination, GenerateConfig, Layout};
use sublime_keymap::keymap::{Keymap, FILE_HEADER};

const DEFINITION: &str = r#"
name: AsciiDoc
default_match_all: true
common_context:
  - { key: selector, operator: equal, operand: text.asciidoc }
output:
  indent: 4
bindings:
  - keys: ["*"]
    command: insert_snippet
    args: { contents: "*$0*" }
    context:
      - { key: selection_empty, operator: equal, operand: true }
  - keys: ["super+k", "super+shift+up"]
    command: new_pane
    args: { move: false }
"#;

fn config(definition: PathBuf, destination: Destination, layout: Layout) -> GenerateConfig {
    GenerateConfig {
        definition,
        destination,
        layout,
        ensure_ascii: None,
    }
}

fn write_definition(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("asciidoc.yaml");
    fs::write(&path, DEFINITION).unwrap();
    path
}

#[test]
fn test_generate_beside_definition() {
    let dir = tempfile::tempdir().unwrap();
    let definition = write_definition(&dir);

    let written = generate(&config(
        definition,
        Destination::BesideDefinition,
        Layout::FromDefinition,
    ))
    .unwrap()
    .unwrap();

    assert_eq!(written, dir.path().join("AsciiDoc.sublime-keymap"));

    let text = fs::read_to_string(&written).unwrap();
    assert!(text.starts_with(FILE_HEADER));
    assert!(text.ends_with("]\n"));
    // indent from the definition's output section
    assert!(text.contains("\n    {\n        \"keys\": [\n"));

    let keymap = Keymap::from_json(&text).unwrap();
    assert_eq!(keymap.len(), 2);
    assert_eq!(keymap.bindings()[0].context().len(), 2);
    assert_eq!(keymap.bindings()[1].context()[0].key(), "selector");
}

#[test]
fn test_generate_to_explicit_file_with_cli_layout() {
    let dir = tempfile::tempdir().unwrap();
    let definition = write_definition(&dir);
    let output = dir.path().join("out.sublime-keymap");

    generate(&config(
        definition,
        Destination::File(output.clone()),
        Layout::Compact,
    ))
    .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let body = text.strip_prefix(FILE_HEADER).unwrap();
    assert_eq!(body.lines().count(), 1);
    assert!(body.starts_with(r#"[{"keys": ["*"], "command": "insert_snippet", "args": {"contents": "*$0*"}"#));
}

#[test]
fn test_generate_output_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let definition = write_definition(&dir);
    let first = dir.path().join("first.sublime-keymap");
    let second = dir.path().join("second.sublime-keymap");

    for output in [&first, &second] {
        generate(&config(
            definition.clone(),
            Destination::File(output.clone()),
            Layout::Indent(2),
        ))
        .unwrap();
    }

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn test_generate_reports_missing_definition() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate(&config(
        dir.path().join("missing.yaml"),
        Destination::Stdout,
        Layout::FromDefinition,
    ))
    .unwrap_err();

    assert!(format!("{:#}", err).contains("missing.yaml"));
}

#[test]
fn test_generate_reports_invalid_definition() {
    let dir = tempfile::tempdir().unwrap();
    let definition = dir.path().join("broken.yaml");
    fs::write(
        &definition,
        "bindings:\n  - keys: [x]\n    context:\n      - { key: a, operator: like, operand: 1 }\n",
    )
    .unwrap();

    let err = generate(&config(
        definition,
        Destination::BesideDefinition,
        Layout::FromDefinition,
    ))
    .unwrap_err();

    assert!(format!("{:#}", err).contains("like"));
    assert!(!dir.path().join("broken.sublime-keymap").exists());
}
