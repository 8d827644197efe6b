//! Pipeline orchestration: query → classify → map → validate.
//!
//! A [`Pipeline`] owns its configuration, so runs with different namespaces
//! or schemas can proceed side by side. Root subjects are independent and
//! are mapped on the rayon pool when `parallel` is set; the results are
//! merged back in classifier order, so the output never depends on thread
//! scheduling.

pub mod config;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use serde_json::Value;

use crate::classify::{self, Classification};
use crate::error::{PipelineError, ValidateError};
use crate::graph::{Subject, TripleGraph};
use crate::mapper::Mapper;
use crate::model::{Document, Environment};
use crate::query::{QueryExecutor, QueryTemplate};
use crate::serializer::Serializer;
use crate::validate::{SchemaSource, SchemaValidator, ValidationResult};

pub use config::{PipelineConfig, ValidationConfig};

/// Result type for pipeline runs.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Cooperative cancellation shared between a pipeline and its caller.
///
/// Checked around the query and validator calls and between root mapping
/// tasks; a root that has started mapping always finishes.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self, stage: &'static str) -> PipelineResult<()> {
        if self.is_cancelled() {
            tracing::warn!(stage, "pipeline cancelled");
            Err(PipelineError::Cancelled { stage })
        } else {
            Ok(())
        }
    }
}

/// A configured mapping pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    schema: Option<SchemaSource>,
    cancel: CancelFlag,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let schema = config
            .validation
            .as_ref()
            .and_then(ValidationConfig::schema_source);
        Self {
            config,
            schema,
            cancel: CancelFlag::new(),
        }
    }

    /// Validate against this schema instead of the configured one.
    pub fn with_schema(mut self, schema: SchemaSource) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Placeholder bindings for the query templates.
    pub fn bindings(&self) -> Vec<(&str, &str)> {
        match &self.config.namespace {
            Some(namespace) => vec![(self.config.placeholder.as_str(), namespace.as_str())],
            None => Vec::new(),
        }
    }

    /// Run the full read path over `source`.
    ///
    /// The first failing stage aborts the run with its error; no partial
    /// environment is returned.
    pub fn run(
        &self,
        source: &TripleGraph,
        template: &QueryTemplate,
        executor: &dyn QueryExecutor,
        validator: Option<&dyn SchemaValidator>,
    ) -> PipelineResult<Environment> {
        let query = template.bind(&self.bindings())?;

        self.cancel.check("query")?;
        let selected = executor.execute(&query, source)?;
        self.cancel.check("classify")?;
        tracing::info!(
            source_triples = source.len(),
            selected_triples = selected.len(),
            "query stage done"
        );

        let env = self.map_graph(&selected)?;
        if let Some(validator) = validator {
            self.validate(&env, validator)?;
        }
        Ok(env)
    }

    /// Classify and map every root subject of an already selected graph.
    pub fn map_graph(&self, graph: &TripleGraph) -> PipelineResult<Environment> {
        let classification = classify::classify(graph)?;
        self.map_classified(graph, &classification)
    }

    fn map_classified(
        &self,
        graph: &TripleGraph,
        classification: &Classification,
    ) -> PipelineResult<Environment> {
        let mapper = Mapper::new(graph).with_max_depth(self.config.max_depth);
        let roots: Vec<_> = classification.iter().map(|(_, subject)| subject).collect();

        let map_root = |subject: &Subject| -> PipelineResult<Document> {
            self.cancel.check("map")?;
            Ok(mapper.from_graph(subject)?)
        };
        let documents: Vec<PipelineResult<Document>> = if self.config.parallel {
            roots.par_iter().map(|s| map_root(*s)).collect()
        } else {
            // Sequential runs stop at the first failure.
            let mut out = Vec::with_capacity(roots.len());
            for subject in &roots {
                let result = map_root(*subject);
                let failed = result.is_err();
                out.push(result);
                if failed {
                    break;
                }
            }
            out
        };

        let mut env = Environment::default();
        for document in documents {
            env.push(document?);
        }
        tracing::info!(
            shells = env.asset_administration_shells.len(),
            submodels = env.submodels.len(),
            concept_descriptions = env.concept_descriptions.len(),
            parallel = self.config.parallel,
            "mapping stage done"
        );
        Ok(env)
    }

    /// Check the assembled environment against the pipeline's schema.
    ///
    /// Violations come back together as [`ValidateError::SchemaValidation`].
    pub fn validate(
        &self,
        env: &Environment,
        validator: &dyn SchemaValidator,
    ) -> PipelineResult<ValidationResult> {
        let source = self.schema.as_ref().ok_or_else(|| ValidateError::SchemaFetch {
            location: "<unset>".into(),
            message: "no schema configured; set validation.schema".into(),
        })?;
        let timeout = self
            .config
            .validation
            .as_ref()
            .map(ValidationConfig::timeout)
            .unwrap_or_else(|| ValidationConfig::default().timeout());

        self.cancel.check("validate")?;
        let schema = source.fetch(timeout)?;
        let document = to_value(env)?;
        let result = validator.validate(&document, &schema)?;
        self.cancel.check("output")?;

        tracing::info!(
            valid = result.valid,
            violations = result.violations.len(),
            "validation stage done"
        );
        result.clone().into_result()?;
        Ok(result)
    }

    /// The write path: serialize an environment back to triples.
    pub fn roundtrip(&self, env: &Environment) -> PipelineResult<TripleGraph> {
        Ok(Serializer::new().environment_to_graph(env)?)
    }
}

fn to_value(env: &Environment) -> PipelineResult<Value> {
    serde_json::to_value(env).map_err(|e| {
        PipelineError::Validate(ValidateError::Validator {
            message: format!("cannot encode environment as JSON: {e}"),
        })
    })
}

/// Pretty-printed AAS JSON for an environment.
pub fn to_json(env: &Environment) -> serde_json::Result<String> {
    serde_json::to_string_pretty(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClassifyError, MapError, QueryError};
    use crate::graph::rdf;
    use crate::query::OxigraphExecutor;
    use crate::validate::Violation;
    use serde_json::json;

    /// Already in AAS vocabulary; the identity CONSTRUCT passes it through.
    const AAS_GRAPH: &str = r#"
        @base <https://admin-shell.io/aas/3/0/> .
        @prefix ex: <https://example.org/> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        ex:sm1 a <Submodel> ;
            <Identifiable/id> "https://example.org/sm1" ;
            <Referable/idShort> "First" .
        ex:sm2 a <Submodel> ;
            <Identifiable/id> "https://example.org/sm2" ;
            <Referable/idShort> "Second" ;
            <Submodel/submodelElements> ex:sm2_p .
        ex:sm2_p a <Property> ;
            <Referable/idShort> "p" ;
            <Property/valueType> xsd:string ;
            <Property/value> "v" .
        ex:cd1 a <ConceptDescription> ;
            <Identifiable/id> "https://example.org/cd1" .
    "#;

    const IDENTITY: &str = "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }";

    struct Fixed(ValidationResult);

    impl SchemaValidator for Fixed {
        fn validate(&self, _: &Value, _: &Value) -> crate::validate::ValidateResult<ValidationResult> {
            Ok(self.0.clone())
        }
    }

    fn run(config: PipelineConfig) -> PipelineResult<Environment> {
        let source = rdf::parse_turtle(AAS_GRAPH).unwrap();
        Pipeline::new(config).run(
            &source,
            &QueryTemplate::new(IDENTITY),
            &OxigraphExecutor::new(),
            None,
        )
    }

    /// Classify and map the fixture directly, keeping its triple order.
    fn mapped(parallel: bool) -> Environment {
        let graph = rdf::parse_turtle(AAS_GRAPH).unwrap();
        let config = PipelineConfig {
            parallel,
            ..Default::default()
        };
        Pipeline::new(config).map_graph(&graph).unwrap()
    }

    #[test]
    fn runs_all_stages() {
        let env = run(PipelineConfig::default()).unwrap();
        assert_eq!(env.submodels.len(), 2);
        assert_eq!(env.concept_descriptions.len(), 1);
        let second = env
            .submodels
            .iter()
            .find(|sm| sm.id == "https://example.org/sm2")
            .unwrap();
        assert_eq!(second.submodel_elements.len(), 1);
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let parallel = mapped(true);
        assert_eq!(parallel, mapped(false));
        assert_eq!(parallel.submodels[0].id, "https://example.org/sm1");
        assert_eq!(parallel.submodels[1].id, "https://example.org/sm2");
    }

    #[test]
    fn namespace_binding_rewrites_the_query() {
        let pipeline = Pipeline::new(PipelineConfig::with_namespace("https://lab.example.net"));
        assert_eq!(
            pipeline.bindings(),
            vec![("https://example.org", "https://lab.example.net")]
        );
        assert!(Pipeline::new(PipelineConfig::default()).bindings().is_empty());
    }

    #[test]
    fn select_query_fails_the_query_stage() {
        let source = rdf::parse_turtle(AAS_GRAPH).unwrap();
        let err = Pipeline::new(PipelineConfig::default())
            .run(
                &source,
                &QueryTemplate::new("SELECT * WHERE { ?s ?p ?o }"),
                &OxigraphExecutor::new(),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, PipelineError::Query(QueryError::Execution { .. })));
    }

    #[test]
    fn ambiguous_subject_fails_the_classify_stage() {
        let graph = rdf::parse_turtle(
            r#"
            @base <https://admin-shell.io/aas/3/0/> .
            <https://example.org/x> a <Submodel>, <ConceptDescription> .
            "#,
        )
        .unwrap();
        let err = Pipeline::new(PipelineConfig::default())
            .map_graph(&graph)
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Classify(ClassifyError::AmbiguousType { .. })
        ));
    }

    #[test]
    fn mapping_failure_aborts_without_partial_output() {
        let graph = rdf::parse_turtle(
            r#"
            @base <https://admin-shell.io/aas/3/0/> .
            <https://example.org/ok> a <Submodel> ; <Identifiable/id> "ok" .
            <https://example.org/broken> a <Submodel> .
            "#,
        )
        .unwrap();
        for parallel in [true, false] {
            let config = PipelineConfig {
                parallel,
                ..Default::default()
            };
            let err = Pipeline::new(config).map_graph(&graph).unwrap_err();
            assert!(matches!(
                err,
                PipelineError::Map(MapError::MissingProperty { .. })
            ));
        }
    }

    #[test]
    fn unknown_element_type_aborts_without_partial_output() {
        let graph = rdf::parse_turtle(
            r#"
            @base <https://admin-shell.io/aas/3/0/> .
            <https://example.org/ok> a <Submodel> ; <Identifiable/id> "ok" .
            <https://example.org/odd> a <Submodel> ;
                <Identifiable/id> "odd" ;
                <Submodel/submodelElements> <https://example.org/odd/gadget> .
            <https://example.org/odd/gadget> a <Gadget> ;
                <Referable/idShort> "gadget" .
            "#,
        )
        .unwrap();
        for parallel in [true, false] {
            let config = PipelineConfig {
                parallel,
                ..Default::default()
            };
            let err = Pipeline::new(config).map_graph(&graph).unwrap_err();
            match err {
                PipelineError::Map(MapError::UnknownType { subject, .. }) => {
                    assert!(subject.contains("odd/gadget"), "{subject}");
                }
                other => panic!("expected an unknown type, got {other:?}"),
            }
        }
    }

    #[test]
    fn cancelled_pipeline_stops_before_the_query() {
        let source = rdf::parse_turtle(AAS_GRAPH).unwrap();
        let pipeline = Pipeline::new(PipelineConfig::default());
        pipeline.cancel_flag().cancel();
        let err = pipeline
            .run(
                &source,
                &QueryTemplate::new(IDENTITY),
                &OxigraphExecutor::new(),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled { stage: "query" }));
    }

    #[test]
    fn validation_surfaces_every_violation() {
        let env = run(PipelineConfig::default()).unwrap();
        let pipeline = Pipeline::new(PipelineConfig::default())
            .with_schema(SchemaSource::Inline(json!({"type": "object"})));
        let validator = Fixed(ValidationResult {
            valid: false,
            violations: vec![
                Violation::new("$.submodels[0]", "a"),
                Violation::new("$.submodels[1]", "b"),
            ],
        });
        match pipeline.validate(&env, &validator) {
            Err(PipelineError::Validate(ValidateError::SchemaValidation { violations })) => {
                assert_eq!(violations.len(), 2)
            }
            other => panic!("expected schema violations, got {other:?}"),
        }

        let ok = Fixed(ValidationResult::valid());
        assert!(pipeline.validate(&env, &ok).unwrap().valid);
    }

    #[test]
    fn validation_without_schema_is_a_fetch_error() {
        let env = Environment::default();
        let err = Pipeline::new(PipelineConfig::default())
            .validate(&env, &Fixed(ValidationResult::valid()))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validate(ValidateError::SchemaFetch { .. })
        ));
    }

    #[test]
    fn roundtrip_maps_back_to_the_same_environment() {
        let env = mapped(true);
        let pipeline = Pipeline::new(PipelineConfig::default());
        let graph = pipeline.roundtrip(&env).unwrap();
        assert_eq!(pipeline.map_graph(&graph).unwrap(), env);
    }

    #[test]
    fn json_output_uses_aas_keys() {
        let env = mapped(true);
        let json: Value = serde_json::from_str(&to_json(&env).unwrap()).unwrap();
        assert_eq!(json["submodels"][0]["modelType"], "Submodel");
        assert_eq!(json["submodels"][1]["submodelElements"][0]["idShort"], "p");
        assert!(json["assetAdministrationShells"].as_array().unwrap().is_empty());
    }
}
