//! Harness integration tests: YAML descriptions, configuration files,
//! ground-truth validation and the built-in scenarios

mod common;

use escape_classifier::config::{ClassifierConfig, ConfigError};
use escape_classifier::features::verdict_report::{JsonRenderer, MarkdownRenderer, TextRenderer};
use escape_classifier::harness::{scenarios, validate, ProgramSpec, ValidationStatus};
use escape_classifier::{classify, classify_with, EscapeError, Outcome};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_demo_files_match_expectations() {
    let demos = concat!(env!("CARGO_MANIFEST_DIR"), "/demos");
    for entry in std::fs::read_dir(demos).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }

        let spec = ProgramSpec::from_yaml(&path).unwrap();
        let built = spec.build().unwrap();
        let verdict = classify(&built.catalog, &built.program).unwrap();
        let report = validate(&verdict, &spec.expect);
        assert!(report.all_passed(), "{}: {}", path.display(), report.summary());
    }
}

#[test]
fn test_ptr_iface_multi_impl_renders_in_every_format() {
    let spec = scenarios::PTR_IFACE_MULTI_IMPL.spec().unwrap();
    let built = spec.build().unwrap();
    let verdict = classify(&built.catalog, &built.program).unwrap();

    assert!(TextRenderer::render(&verdict).contains("2 sites: 0 stack, 2 heap"));
    assert!(MarkdownRenderer::render(&verdict).contains("| `s1` | heap | `New` |"));
    let json: serde_json::Value = serde_json::from_str(&JsonRenderer::render(&verdict).unwrap()).unwrap();
    assert_eq!(json["heap"], 2);
    assert_eq!(json["sites"][0]["site"], "s0");
}

#[test]
fn test_rebuilt_description_gives_identical_verdict() {
    let spec = scenarios::RETURN_VALUE_STACK.spec().unwrap();
    let first = spec.build().unwrap();
    let second = spec.build().unwrap();

    let a = classify(&first.catalog, &first.program).unwrap();
    let b = classify(&second.catalog, &second.program).unwrap();
    assert_eq!(a, b);
    assert_eq!(JsonRenderer::render(&a).unwrap(), JsonRenderer::render(&b).unwrap());
    assert_eq!(a.get(&"s0".into()).unwrap().ty, "result");
}

#[test]
fn test_expectation_mismatch_is_reported() {
    let file = write_temp(
        r#"
name: wrong-expectation
types: [reader]
interfaces:
  - { name: io.Reader, implementors: [reader] }
functions:
  - name: New
    returns: { kind: interface, interface: io.Reader }
    body:
      - { op: construct, site: s0, type: reader, mode: by_pointer }
      - { op: return_via_interface, site: s0, interface: io.Reader }
expect:
  s0: stack
"#,
    );

    let spec = ProgramSpec::from_yaml(file.path()).unwrap();
    let built = spec.build().unwrap();
    let verdict = classify(&built.catalog, &built.program).unwrap();
    let report = validate(&verdict, &spec.expect);

    assert!(!report.all_passed());
    assert_eq!(report.checks[0].status, ValidationStatus::Fail);
    assert_eq!(report.checks[0].actual, Some(Outcome::Heap));
}

#[test]
fn test_malformed_function_in_description() {
    let file = write_temp(
        r#"
types: [result]
functions:
  - name: returnResult
    returns: { kind: value, type: result }
    body:
      - { op: construct, site: s0, type: result, mode: by_pointer }
      - { op: return_value, site: s0 }
"#,
    );

    let spec = ProgramSpec::from_yaml(file.path()).unwrap();
    match spec.build() {
        Err(EscapeError::MalformedFunction { function, reason }) => {
            assert_eq!(function, "returnResult");
            assert!(reason.contains("by-value"), "{reason}");
        }
        other => panic!("expected MalformedFunction, got {other:?}"),
    }
}

#[test]
fn test_missing_description_file() {
    assert!(matches!(
        ProgramSpec::from_yaml("/nonexistent/program.yaml"),
        Err(EscapeError::Io(_))
    ));
}

#[test]
fn test_config_file_drives_classification() {
    let file = write_temp(
        r#"
version: 1
preset: fast
overrides:
  record_traces: true
"#,
    );

    let config = ClassifierConfig::from_yaml(file.path()).unwrap();
    assert!(config.record_traces);
    assert_eq!(config.parallel_threshold, 2);

    let spec = scenarios::RETURN_VALUE_STACK.spec().unwrap();
    let built = spec.build().unwrap();
    let verdict = classify_with(config, &built.catalog, &built.program).unwrap();
    assert_eq!(
        verdict.get(&"s0".into()).unwrap().trace,
        vec!["value-return:copied"]
    );
}

#[test]
fn test_config_file_out_of_range() {
    let file = write_temp(
        r#"
version: 1
preset: balanced
overrides:
  parallel_threshold: 0
"#,
    );
    assert!(matches!(
        ClassifierConfig::from_yaml(file.path()),
        Err(ConfigError::Range { .. })
    ));
}
