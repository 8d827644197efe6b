//! Graph→object mapping: materialize typed AAS documents from the outgoing
//! triples of a subject.
//!
//! Dispatch is driven by `rdf:type`. Every class has one constructor that
//! reads a fixed set of predicates; mandatory predicates that are absent fail
//! with [`MapError::MissingProperty`]. Nested nodes are mapped recursively
//! under a [`Scope`] that tracks the ancestor path, so a node that links back
//! to one of its ancestors, or nesting deeper than the configured limit, fails
//! with [`MapError::CyclicReference`] instead of recursing without bound.

mod element;
mod identifiable;

use crate::classify::Classification;
use crate::error::MapError;
use crate::graph::literal::{self, ConversionError, LiteralValue};
use crate::graph::{Literal, Subject, Term, TripleGraph};
use crate::model::{
    AasEnum, AssetAdministrationShell, ConceptDescription, Document, Environment, Submodel,
};
use crate::vocab::{self, class};

/// Result type for mapping in either direction.
pub type MapResult<T> = std::result::Result<T, MapError>;

/// Default nesting limit below a root subject.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Maps subjects of one graph to document nodes.
///
/// The mapper only reads the graph, so one instance can be shared across
/// worker threads.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'g> {
    graph: &'g TripleGraph,
    max_depth: usize,
}

/// Position of the node being mapped: its subject, its ancestors, its depth.
#[derive(Debug)]
pub(crate) struct Scope<'a> {
    subject: &'a Subject,
    parent: Option<&'a Scope<'a>>,
    depth: usize,
}

impl<'a> Scope<'a> {
    fn root(subject: &'a Subject) -> Self {
        Self {
            subject,
            parent: None,
            depth: 0,
        }
    }

    fn child<'b>(&'b self, subject: &'b Subject, max_depth: usize) -> MapResult<Scope<'b>> {
        let depth = self.depth + 1;
        if depth > max_depth || self.ancestors().any(|s| s == subject) {
            return Err(MapError::CyclicReference {
                subject: subject.to_string(),
                depth,
                max_depth,
            });
        }
        Ok(Scope {
            subject,
            parent: Some(self),
            depth,
        })
    }

    /// This scope's subject and those of all its ancestors.
    fn ancestors(&self) -> impl Iterator<Item = &Subject> {
        std::iter::successors(Some(self), |s| s.parent).map(|s| s.subject)
    }
}

impl<'g> Mapper<'g> {
    pub fn new(graph: &'g TripleGraph) -> Self {
        Self {
            graph,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Map a root subject (shell, submodel or concept description).
    pub fn from_graph(&self, subject: &Subject) -> MapResult<Document> {
        let scope = Scope::root(subject);
        let class_iri = self.dispatch_type(&scope, ROOT_CLASSES)?;
        tracing::debug!(subject = %subject, class = class_iri, "mapping root subject");
        Ok(match class_iri {
            class::ASSET_ADMINISTRATION_SHELL => Document::Shell(self.map_shell(&scope)?),
            class::SUBMODEL => Document::Submodel(self.map_submodel(&scope)?),
            _ => Document::ConceptDescription(self.map_concept_description(&scope)?),
        })
    }

    pub fn shell(&self, subject: &Subject) -> MapResult<AssetAdministrationShell> {
        let scope = Scope::root(subject);
        self.dispatch_type(&scope, &[class::ASSET_ADMINISTRATION_SHELL])?;
        self.map_shell(&scope)
    }

    pub fn submodel(&self, subject: &Subject) -> MapResult<Submodel> {
        let scope = Scope::root(subject);
        self.dispatch_type(&scope, &[class::SUBMODEL])?;
        self.map_submodel(&scope)
    }

    pub fn concept_description(&self, subject: &Subject) -> MapResult<ConceptDescription> {
        let scope = Scope::root(subject);
        self.dispatch_type(&scope, &[class::CONCEPT_DESCRIPTION])?;
        self.map_concept_description(&scope)
    }

    /// Map every classified subject, in classifier order.
    pub fn map_classified(&self, classification: &Classification) -> MapResult<Environment> {
        let mut env = Environment::default();
        for (_, subject) in classification.iter() {
            env.push(self.from_graph(subject)?);
        }
        tracing::info!(documents = env.len(), "mapped classified subjects");
        Ok(env)
    }

    // -----------------------------------------------------------------------
    // Type dispatch
    // -----------------------------------------------------------------------

    /// The first `rdf:type` of the subject that is one of `known`.
    ///
    /// No type at all is a missing property; types that are all unknown are
    /// reported with the first one.
    fn dispatch_type(&self, scope: &Scope<'_>, known: &[&'static str]) -> MapResult<&'static str> {
        let mut first_unknown = None;
        for term in self.graph.objects_for(scope.subject, vocab::RDF_TYPE) {
            let Term::Iri(iri) = term else {
                return Err(unexpected(scope.subject, vocab::RDF_TYPE, "a class IRI", term));
            };
            if let Some(class_iri) = known.iter().find(|k| **k == iri.as_str()) {
                return Ok(*class_iri);
            }
            first_unknown.get_or_insert_with(|| iri.as_str().to_string());
        }
        Err(match first_unknown {
            Some(type_iri) => MapError::UnknownType {
                subject: scope.subject.to_string(),
                type_iri,
            },
            None => missing(scope.subject, vocab::RDF_TYPE),
        })
    }

    // -----------------------------------------------------------------------
    // Scalars
    // -----------------------------------------------------------------------

    /// Lexical form of the first literal of `predicate`, checked against its
    /// datatype.
    fn text(&self, scope: &Scope<'_>, predicate: &str) -> MapResult<Option<String>> {
        let Some(term) = self.graph.object_for(scope.subject, predicate) else {
            return Ok(None);
        };
        let Term::Literal(lit) = term else {
            return Err(unexpected(scope.subject, predicate, "a literal", term));
        };
        self.convert(scope, predicate, lit)?;
        Ok(Some(lit.lexical().to_string()))
    }

    fn required_text(&self, scope: &Scope<'_>, predicate: &str) -> MapResult<String> {
        self.text(scope, predicate)?
            .ok_or_else(|| missing(scope.subject, predicate))
    }

    fn boolean(&self, scope: &Scope<'_>, predicate: &str) -> MapResult<Option<bool>> {
        let Some(term) = self.graph.object_for(scope.subject, predicate) else {
            return Ok(None);
        };
        let Term::Literal(lit) = term else {
            return Err(unexpected(scope.subject, predicate, "a literal", term));
        };
        match self.convert(scope, predicate, lit)? {
            LiteralValue::Boolean(b) => Ok(Some(b)),
            LiteralValue::Text(s) if s == "true" || s == "false" => Ok(Some(s == "true")),
            _ => Err(MapError::InvalidValue {
                subject: scope.subject.to_string(),
                predicate: predicate.to_string(),
                message: format!("expected a boolean, found {lit}"),
            }),
        }
    }

    fn convert(
        &self,
        scope: &Scope<'_>,
        predicate: &str,
        lit: &Literal,
    ) -> MapResult<LiteralValue> {
        literal::convert(lit).map_err(|e| match e {
            ConversionError::UnsupportedDatatype(datatype) => MapError::UnsupportedLiteralType {
                subject: scope.subject.to_string(),
                predicate: predicate.to_string(),
                datatype,
            },
            ConversionError::InvalidLexical(message) => MapError::InvalidValue {
                subject: scope.subject.to_string(),
                predicate: predicate.to_string(),
                message,
            },
        })
    }

    /// Enumeration value of `predicate`, given as the value's IRI.
    fn enumeration<E: AasEnum>(&self, scope: &Scope<'_>, predicate: &str) -> MapResult<Option<E>> {
        let Some(term) = self.graph.object_for(scope.subject, predicate) else {
            return Ok(None);
        };
        let Term::Iri(iri) = term else {
            return Err(unexpected(scope.subject, predicate, "an enumeration IRI", term));
        };
        E::from_iri(iri.as_str()).map(Some).ok_or_else(|| MapError::InvalidValue {
            subject: scope.subject.to_string(),
            predicate: predicate.to_string(),
            message: format!("{iri} is not a {} value", E::NAME),
        })
    }

    fn required_enumeration<E: AasEnum>(&self, scope: &Scope<'_>, predicate: &str) -> MapResult<E> {
        self.enumeration(scope, predicate)?
            .ok_or_else(|| missing(scope.subject, predicate))
    }

    // -----------------------------------------------------------------------
    // Nested nodes
    // -----------------------------------------------------------------------

    /// Objects of `predicate` in child order.
    ///
    /// Graph order, unless every object is a node carrying an `aas:index`, in
    /// which case the objects are sorted by it (stable, duplicates kept).
    fn ordered_objects(&self, subject: &Subject, predicate: &str) -> MapResult<Vec<&'g Term>> {
        let objects: Vec<&'g Term> = self.graph.objects_for(subject, predicate).collect();
        if objects.len() < 2 {
            return Ok(objects);
        }
        let mut indexed = Vec::with_capacity(objects.len());
        for &term in &objects {
            let Some(node) = term.as_subject() else {
                return Ok(objects);
            };
            match self.index_of(&node)? {
                Some(index) => indexed.push((index, term)),
                None => return Ok(objects),
            }
        }
        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, term)| term).collect())
    }

    fn index_of(&self, node: &Subject) -> MapResult<Option<i128>> {
        let Some(term) = self.graph.object_for(node, vocab::INDEX) else {
            return Ok(None);
        };
        match term.as_literal().map(literal::convert) {
            Some(Ok(LiteralValue::Integer(index))) => Ok(Some(index)),
            _ => Err(MapError::InvalidValue {
                subject: node.to_string(),
                predicate: vocab::INDEX.to_string(),
                message: format!("expected an integer position, found {term}"),
            }),
        }
    }

    /// Map the node `term` (an object of `predicate`) under `scope`.
    fn descend<T>(
        &self,
        scope: &Scope<'_>,
        predicate: &str,
        term: &Term,
        build: impl FnOnce(&Self, &Scope<'_>) -> MapResult<T>,
    ) -> MapResult<T> {
        let node = term
            .as_subject()
            .ok_or_else(|| unexpected(scope.subject, predicate, "a node", term))?;
        let child = scope.child(&node, self.max_depth)?;
        build(self, &child)
    }

    /// Map the first object of `predicate`, if any.
    fn nested<T>(
        &self,
        scope: &Scope<'_>,
        predicate: &str,
        build: impl FnOnce(&Self, &Scope<'_>) -> MapResult<T>,
    ) -> MapResult<Option<T>> {
        match self.graph.object_for(scope.subject, predicate) {
            Some(term) => self.descend(scope, predicate, term, build).map(Some),
            None => Ok(None),
        }
    }

    fn required<T>(
        &self,
        scope: &Scope<'_>,
        predicate: &str,
        build: impl FnOnce(&Self, &Scope<'_>) -> MapResult<T>,
    ) -> MapResult<T> {
        self.nested(scope, predicate, build)?
            .ok_or_else(|| missing(scope.subject, predicate))
    }

    /// Map every object of `predicate`, in child order.
    fn nested_list<T>(
        &self,
        scope: &Scope<'_>,
        predicate: &str,
        build: impl Fn(&Self, &Scope<'_>) -> MapResult<T>,
    ) -> MapResult<Vec<T>> {
        self.ordered_objects(scope.subject, predicate)?
            .into_iter()
            .map(|term| self.descend(scope, predicate, term, &build))
            .collect()
    }
}

const ROOT_CLASSES: &[&str] = &[
    class::ASSET_ADMINISTRATION_SHELL,
    class::SUBMODEL,
    class::CONCEPT_DESCRIPTION,
];

fn missing(subject: &Subject, predicate: &str) -> MapError {
    MapError::MissingProperty {
        subject: subject.to_string(),
        predicate: predicate.to_string(),
    }
}

fn unexpected(subject: &Subject, predicate: &str, expected: &'static str, found: &Term) -> MapError {
    MapError::UnexpectedTerm {
        subject: subject.to_string(),
        predicate: predicate.to_string(),
        expected,
        found: found.to_string(),
    }
}
