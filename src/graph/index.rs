//! Immutable in-memory triple graph with order-preserving indices.
//!
//! Triples live in a single arena (`Vec<Triple>`); the indices store arena
//! positions, so every lookup returns triples in load order.

use std::collections::{HashMap, HashSet};

use crate::error::GraphError;

use super::literal::check_lexical;
use super::{Iri, Subject, Term, Triple};

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Read-only triple graph indexed by subject and by (subject, predicate).
///
/// Built once by [`TripleGraph::load`]; write-back flows use
/// [`TripleGraph::merge`], which returns a new graph.
#[derive(Clone, Default)]
pub struct TripleGraph {
    /// Triple arena, in load order, without duplicates.
    triples: Vec<Triple>,
    /// Subject → arena positions of its outgoing triples.
    by_subject: HashMap<Subject, Vec<usize>>,
    /// Subject → predicate → arena positions.
    by_subject_predicate: HashMap<Subject, HashMap<Iri, Vec<usize>>>,
    /// Predicate → arena positions.
    by_predicate: HashMap<Iri, Vec<usize>>,
}

impl TripleGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a triple sequence.
    ///
    /// Literals are checked against their declared datatype; the first
    /// malformed one aborts the load. Exact duplicates are indexed once.
    pub fn load(triples: impl IntoIterator<Item = Triple>) -> GraphResult<Self> {
        let mut graph = Self::new();
        let mut seen: HashSet<Triple> = HashSet::new();
        for triple in triples {
            if let Term::Literal(lit) = &triple.object {
                check_lexical(lit).map_err(|reason| GraphError::MalformedTriple {
                    triple: triple.to_string(),
                    reason,
                })?;
            }
            if seen.contains(&triple) {
                continue;
            }
            seen.insert(triple.clone());
            graph.index(triple);
        }
        tracing::debug!(triples = graph.len(), "triple graph loaded");
        Ok(graph)
    }

    fn index(&mut self, triple: Triple) {
        let pos = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(pos);
        self.by_subject_predicate
            .entry(triple.subject.clone())
            .or_default()
            .entry(triple.predicate.clone())
            .or_default()
            .push(pos);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(pos);
        self.triples.push(triple);
    }

    /// All `(predicate, object)` pairs of a subject, in load order.
    pub fn subject_triples<'g>(
        &'g self,
        subject: &Subject,
    ) -> impl Iterator<Item = (&'g Iri, &'g Term)> + use<'g> {
        self.by_subject
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&pos| {
                let t = &self.triples[pos];
                (&t.predicate, &t.object)
            })
    }

    /// Objects of `(subject, predicate)`, in load order. Empty if absent.
    pub fn objects_for<'g>(
        &'g self,
        subject: &Subject,
        predicate: &str,
    ) -> impl Iterator<Item = &'g Term> + use<'g> {
        self.by_subject_predicate
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&pos| &self.triples[pos].object)
    }

    /// First object of `(subject, predicate)`.
    pub fn object_for(&self, subject: &Subject, predicate: &str) -> Option<&Term> {
        self.objects_for(subject, predicate).next()
    }

    /// Triples with the given predicate, in load order.
    pub fn triples_with_predicate<'g>(
        &'g self,
        predicate: &str,
    ) -> impl Iterator<Item = &'g Triple> + use<'g> {
        self.by_predicate
            .get(predicate)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&pos| &self.triples[pos])
    }

    /// Subjects that have `(predicate, object)`, in load order.
    pub fn subjects_with<'g>(
        &'g self,
        predicate: &str,
        object: &'g Term,
    ) -> impl Iterator<Item = &'g Subject> + use<'g> {
        self.triples_with_predicate(predicate)
            .filter(move |t| &t.object == object)
            .map(|t| &t.subject)
    }

    /// Whether the graph has any triple about `subject`.
    pub fn contains_subject(&self, subject: &Subject) -> bool {
        self.by_subject.contains_key(subject)
    }

    /// Whether the exact triple is in the graph.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.by_subject_predicate
            .get(&triple.subject)
            .and_then(|preds| preds.get(&triple.predicate))
            .is_some_and(|positions| positions.iter().any(|&p| self.triples[p] == *triple))
    }

    /// All triples, in load order.
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Number of distinct subjects.
    pub fn subject_count(&self) -> usize {
        self.by_subject.len()
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// A new graph holding this graph's triples followed by `other`'s.
    ///
    /// Neither input is modified. Triples present in both appear once, at
    /// their position in `self`.
    pub fn merge(&self, other: &TripleGraph) -> TripleGraph {
        let mut merged = self.clone();
        for triple in &other.triples {
            if !merged.contains(triple) {
                merged.index(triple.clone());
            }
        }
        merged
    }
}

impl std::fmt::Debug for TripleGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripleGraph")
            .field("subjects", &self.subject_count())
            .field("triples", &self.len())
            .finish()
    }
}

impl PartialEq for TripleGraph {
    /// Graphs are equal when they hold the same triples in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.triples == other.triples
    }
}
