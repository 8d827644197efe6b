//! Query execution: placeholder binding on query templates and the executor
//! boundary to a SPARQL engine.
//!
//! Binding is plain text replacement. Every occurrence of a placeholder is
//! rewritten, including occurrences inside string literals of the query, so a
//! template written against `https://example.org` ends up entirely in the
//! deployment namespace.

use std::path::Path;

use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::GraphName;
use oxigraph::sparql::{QueryResults, SparqlEvaluator};
use oxigraph::store::Store;

use crate::error::QueryError;
use crate::graph::{rdf, TripleGraph};

/// Result type for query operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Namespace token that mapping templates are written against.
pub const DEFAULT_PLACEHOLDER: &str = "https://example.org";

/// A query text with substitution placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    text: String,
}

impl QueryTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a template from a file.
    pub fn load(path: &Path) -> QueryResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| QueryError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitute every occurrence of each placeholder, in binding order.
    pub fn bind(&self, bindings: &[(&str, &str)]) -> QueryResult<String> {
        let mut query = self.text.clone();
        for (placeholder, value) in bindings {
            if placeholder.is_empty() {
                return Err(QueryError::InvalidBinding {
                    message: format!("empty placeholder bound to {value:?}"),
                });
            }
            let occurrences = query.matches(placeholder).count();
            tracing::debug!(placeholder, value, occurrences, "binding query placeholder");
            query = query.replace(placeholder, value);
        }
        Ok(query)
    }
}

/// A graph query engine: takes a query and a source graph, answers with a
/// result graph.
pub trait QueryExecutor: Send + Sync {
    fn execute(&self, query: &str, source: &TripleGraph) -> QueryResult<TripleGraph>;
}

/// Executor backed by an in-memory oxigraph store.
///
/// The source graph is loaded into a fresh store per call; the CONSTRUCT or
/// DESCRIBE result is serialized to N-Triples and re-parsed into a
/// [`TripleGraph`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OxigraphExecutor;

impl OxigraphExecutor {
    pub fn new() -> Self {
        Self
    }
}

fn execution(message: String) -> QueryError {
    QueryError::Execution { message }
}

impl QueryExecutor for OxigraphExecutor {
    fn execute(&self, query: &str, source: &TripleGraph) -> QueryResult<TripleGraph> {
        let store =
            Store::new().map_err(|e| execution(format!("failed to create oxigraph store: {e}")))?;
        for triple in source.triples() {
            let quad = rdf::to_ox_triple(triple)?.in_graph(GraphName::DefaultGraph);
            store
                .insert(&quad)
                .map_err(|e| execution(format!("insert failed: {e}")))?;
        }

        let results = SparqlEvaluator::new()
            .parse_query(query)
            .map_err(|e| execution(format!("SPARQL syntax error: {e}")))?
            .on_store(&store)
            .execute()
            .map_err(|e| execution(format!("SPARQL query failed: {e}")))?;

        let triples = match results {
            QueryResults::Graph(triples) => triples,
            QueryResults::Solutions(_) => {
                return Err(execution(
                    "SELECT queries are not supported; use CONSTRUCT or DESCRIBE".into(),
                ));
            }
            QueryResults::Boolean(_) => {
                return Err(execution(
                    "ASK queries are not supported; use CONSTRUCT or DESCRIBE".into(),
                ));
            }
        };

        let mut writer = RdfSerializer::from_format(RdfFormat::NTriples).for_writer(Vec::new());
        let mut count = 0usize;
        for triple in triples {
            let triple = triple.map_err(|e| execution(format!("evaluation failed: {e}")))?;
            writer
                .serialize_triple(&triple)
                .map_err(|e| execution(format!("result serialization failed: {e}")))?;
            count += 1;
        }
        let bytes = writer
            .finish()
            .map_err(|e| execution(format!("result serialization failed: {e}")))?;

        tracing::info!(
            source_triples = source.len(),
            result_triples = count,
            "query executed"
        );
        Ok(rdf::parse(&bytes, RdfFormat::NTriples, None)?)
    }
}

/// Bind `template` and run it against `source`.
pub fn execute_template(
    executor: &dyn QueryExecutor,
    template: &QueryTemplate,
    bindings: &[(&str, &str)],
    source: &TripleGraph,
) -> QueryResult<TripleGraph> {
    let query = template.bind(bindings)?;
    executor.execute(&query, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Iri, Subject, Term};

    const SOURCE: &str = r#"
        @prefix ex: <http://lab.example.net/ns#> .
        ex:specimen1 ex:label "S1" .
        ex:specimen2 ex:label "S2" .
    "#;

    #[test]
    fn bind_replaces_every_occurrence_including_literals() {
        let template = QueryTemplate::new(
            r#"CONSTRUCT { ?s <https://example.org/p> "https://example.org/x" } WHERE { ?s ?p ?o }"#,
        );
        let query = template
            .bind(&[(DEFAULT_PLACEHOLDER, "https://materials-data.space/uid123")])
            .unwrap();
        assert!(!query.contains("example.org"));
        assert_eq!(query.matches("https://materials-data.space/uid123").count(), 2);
    }

    #[test]
    fn bind_rejects_empty_placeholder() {
        let template = QueryTemplate::new("ASK {}");
        assert!(matches!(
            template.bind(&[("", "x")]),
            Err(QueryError::InvalidBinding { .. })
        ));
    }

    #[test]
    fn construct_query_builds_result_graph() {
        let source = rdf::parse_turtle(SOURCE).unwrap();
        let template = QueryTemplate::new(
            r#"PREFIX ex: <http://lab.example.net/ns#>
               CONSTRUCT { ?n <https://example.org/name> ?l }
               WHERE {
                 ?s ex:label ?l .
                 BIND(IRI(CONCAT("https://example.org/", ?l)) AS ?n)
               }"#,
        );
        let result = execute_template(
            &OxigraphExecutor::new(),
            &template,
            &[(DEFAULT_PLACEHOLDER, "https://materials-data.space/uid123")],
            &source,
        )
        .unwrap();

        assert_eq!(result.len(), 2);
        let s1 = Subject::Iri(Iri::new("https://materials-data.space/uid123/S1").unwrap());
        let name = result
            .object_for(&s1, "https://materials-data.space/uid123/name")
            .and_then(Term::as_literal)
            .unwrap();
        assert_eq!(name.lexical(), "S1");
    }

    #[test]
    fn select_query_is_an_execution_error() {
        let source = rdf::parse_turtle(SOURCE).unwrap();
        let err = OxigraphExecutor::new()
            .execute("SELECT * WHERE { ?s ?p ?o }", &source)
            .unwrap_err();
        assert!(matches!(err, QueryError::Execution { .. }));
    }

    #[test]
    fn malformed_query_is_an_execution_error() {
        let err = OxigraphExecutor::new()
            .execute("CONSTRUCT { ?s ?p }", &TripleGraph::new())
            .unwrap_err();
        assert!(matches!(err, QueryError::Execution { .. }));
    }
}
