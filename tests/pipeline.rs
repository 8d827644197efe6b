//! End-to-end conversion tests: lab dataset + mapping query → AAS environment.
//!
//! Each case runs the full read path with a deployment namespace and compares
//! the JSON serialisation against a stored expected document.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use kg2aas::error::{PipelineError, QueryError, ValidateError};
use kg2aas::graph::{TripleGraph, rdf};
use kg2aas::model::Environment;
use kg2aas::pipeline::{Pipeline, PipelineConfig};
use kg2aas::query::{OxigraphExecutor, QueryTemplate};

struct Case {
    dataset: &'static str,
    query: &'static str,
    expected: &'static str,
    namespace: &'static str,
}

const CASES: &[Case] = &[
    Case {
        dataset: "tensile_test.ttl",
        query: "tensile_mapping.sparql",
        expected: "tensile_expected.json",
        namespace: "https://materials-data.space/uid123",
    },
    Case {
        dataset: "hardness_test.ttl",
        query: "hardness_mapping.sparql",
        expected: "hardness_expected.json",
        namespace: "https://materials-data.space/uid456",
    },
];

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(case: &Case) -> (TripleGraph, QueryTemplate, Value) {
    let source = rdf::read_file(&fixture(case.dataset)).unwrap();
    let template = QueryTemplate::load(&fixture(case.query)).unwrap();
    let expected = std::fs::read_to_string(fixture(case.expected)).unwrap();
    (source, template, serde_json::from_str(&expected).unwrap())
}

fn run(case: &Case, config: PipelineConfig) -> Environment {
    let (source, template, _) = load(case);
    Pipeline::new(config)
        .run(&source, &template, &OxigraphExecutor::new(), None)
        .unwrap()
}

#[test]
fn conversions_match_expected_documents() {
    for case in CASES {
        let (_, _, expected) = load(case);
        let env = run(case, PipelineConfig::with_namespace(case.namespace));
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            expected,
            "conversion of {} differs from {}",
            case.dataset,
            case.expected
        );
    }
}

#[test]
fn sequential_runs_match_parallel_runs() {
    for case in CASES {
        let parallel = run(case, PipelineConfig::with_namespace(case.namespace));
        let sequential = run(
            case,
            PipelineConfig {
                parallel: false,
                ..PipelineConfig::with_namespace(case.namespace)
            },
        );
        assert_eq!(parallel, sequential, "{}", case.dataset);
    }
}

#[test]
fn expected_documents_deserialize_to_the_mapped_environment() {
    for case in CASES {
        let (_, _, expected) = load(case);
        let parsed: Environment = serde_json::from_value(expected).unwrap();
        let env = run(case, PipelineConfig::with_namespace(case.namespace));
        assert_eq!(parsed, env, "{}", case.expected);
    }
}

#[test]
fn unbound_namespace_keeps_the_placeholder() {
    let env = run(&CASES[0], PipelineConfig::default());
    assert_eq!(env.submodels[0].id, "https://example.org/sm/TT-42");
    assert_eq!(
        env.asset_administration_shells[0].id,
        "https://example.org/aas/TT-42"
    );
}

#[test]
fn namespaces_do_not_leak_between_pipelines() {
    let case = &CASES[1];
    let first = run(case, PipelineConfig::with_namespace("https://a.example.net"));
    let second = run(case, PipelineConfig::with_namespace("https://b.example.net"));
    assert_eq!(first.submodels[0].id, "https://a.example.net/sm/HT-9");
    assert_eq!(second.submodels[0].id, "https://b.example.net/sm/HT-9");
    assert_eq!(
        first.submodels[0].submodel_elements,
        second.submodels[0].submodel_elements
    );
}

#[test]
fn dataset_without_matches_gives_an_empty_environment() {
    let (_, template, _) = load(&CASES[0]);
    let source = rdf::parse_turtle(
        "@prefix lab: <http://lab.example.net/ns#> . lab:other lab:label \"X\" .",
    )
    .unwrap();
    let env = Pipeline::new(PipelineConfig::with_namespace(CASES[0].namespace))
        .run(&source, &template, &OxigraphExecutor::new(), None)
        .unwrap();
    assert!(env.is_empty());
    assert_eq!(
        serde_json::to_value(&env).unwrap(),
        json!({
            "assetAdministrationShells": [],
            "submodels": [],
            "conceptDescriptions": []
        })
    );
}

#[test]
fn malformed_query_fails_the_query_stage() {
    let (source, _, _) = load(&CASES[0]);
    let template = QueryTemplate::new("CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ");
    let err = Pipeline::new(PipelineConfig::default())
        .run(&source, &template, &OxigraphExecutor::new(), None)
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Query(QueryError::Execution { .. })
    ));
}

#[cfg(unix)]
mod external_validator {
    use super::*;
    use kg2aas::validate::{CommandValidator, SchemaSource};

    fn pipeline(case: &Case) -> Pipeline {
        Pipeline::new(PipelineConfig::with_namespace(case.namespace))
            .with_schema(SchemaSource::Inline(json!({ "type": "object" })))
    }

    #[test]
    fn accepting_validator_passes_the_environment_through() {
        let case = &CASES[1];
        let (source, template, expected) = load(case);
        let validator = CommandValidator::new("sh")
            .arg("-c")
            .arg(r#"cat > /dev/null; echo '{"valid": true}'"#);
        let env = pipeline(case)
            .run(
                &source,
                &template,
                &OxigraphExecutor::new(),
                Some(&validator),
            )
            .unwrap();
        assert_eq!(serde_json::to_value(&env).unwrap(), expected);
    }

    #[test]
    fn rejecting_validator_fails_the_run_with_all_violations() {
        let case = &CASES[0];
        let (source, template, _) = load(case);
        let validator = CommandValidator::new("sh").arg("-c").arg(
            r#"cat > /dev/null; echo '{"valid": false, "violations": [
                {"path": "/submodels/0/idShort", "message": "too short"},
                {"path": "/conceptDescriptions/0", "message": "missing definition"}
            ]}'"#,
        );
        let err = pipeline(case)
            .run(
                &source,
                &template,
                &OxigraphExecutor::new(),
                Some(&validator),
            )
            .unwrap_err();
        match err {
            PipelineError::Validate(ValidateError::SchemaValidation { violations }) => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].path, "/submodels/0/idShort");
                assert_eq!(violations[1].message, "missing definition");
            }
            other => panic!("expected schema violations, got {other:?}"),
        }
    }

    #[test]
    fn validator_receives_the_mapped_document() {
        let case = &CASES[1];
        let (source, template, _) = load(case);
        // Answers valid only when the request carries the mapped concept description.
        let validator = CommandValidator::new("sh").arg("-c").arg(
            r#"if grep -q VickersHardness; then echo '{"valid": true}'; else exit 3; fi"#,
        );
        pipeline(case)
            .run(
                &source,
                &template,
                &OxigraphExecutor::new(),
                Some(&validator),
            )
            .unwrap();
    }
}
