//! Entity classification: partition the subjects of a result graph into the
//! three root roles (shells, submodels, concept descriptions).

use std::collections::HashMap;

use crate::error::ClassifyError;
use crate::graph::{Subject, Term, TripleGraph};
use crate::vocab::{self, class};

/// Result type for classification.
pub type ClassifyResult<T> = std::result::Result<T, ClassifyError>;

/// Root role of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Shell,
    Submodel,
    ConceptDescription,
}

impl Role {
    pub fn from_class(iri: &str) -> Option<Self> {
        match iri {
            class::ASSET_ADMINISTRATION_SHELL => Some(Role::Shell),
            class::SUBMODEL => Some(Role::Submodel),
            class::CONCEPT_DESCRIPTION => Some(Role::ConceptDescription),
            _ => None,
        }
    }

    pub fn class_iri(self) -> &'static str {
        match self {
            Role::Shell => class::ASSET_ADMINISTRATION_SHELL,
            Role::Submodel => class::SUBMODEL,
            Role::ConceptDescription => class::CONCEPT_DESCRIPTION,
        }
    }
}

/// Root subjects by role, each list in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub shells: Vec<Subject>,
    pub submodels: Vec<Subject>,
    pub concept_descriptions: Vec<Subject>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.shells.len() + self.submodels.len() + self.concept_descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All classified subjects with their role, shells first.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &Subject)> {
        self.shells
            .iter()
            .map(|s| (Role::Shell, s))
            .chain(self.submodels.iter().map(|s| (Role::Submodel, s)))
            .chain(
                self.concept_descriptions
                    .iter()
                    .map(|s| (Role::ConceptDescription, s)),
            )
    }
}

/// Classify the root subjects of `graph`.
///
/// A subject qualifies for a role through an `rdf:type` triple naming the
/// role class. Subjects typed with more than one role class are rejected;
/// other types are ignored. The order of each list is the order in which the
/// qualifying type triples appear in the graph.
pub fn classify(graph: &TripleGraph) -> ClassifyResult<Classification> {
    let mut roles: HashMap<&Subject, Role> = HashMap::new();
    let mut classification = Classification::default();

    for triple in graph.triples_with_predicate(vocab::RDF_TYPE) {
        let Term::Iri(class_iri) = &triple.object else {
            continue;
        };
        let Some(role) = Role::from_class(class_iri.as_str()) else {
            continue;
        };

        match roles.get(&triple.subject) {
            Some(&existing) if existing == role => {}
            Some(&existing) => {
                return Err(ClassifyError::AmbiguousType {
                    subject: triple.subject.to_string(),
                    types: vec![
                        existing.class_iri().to_string(),
                        role.class_iri().to_string(),
                    ],
                });
            }
            None => {
                roles.insert(&triple.subject, role);
                let list = match role {
                    Role::Shell => &mut classification.shells,
                    Role::Submodel => &mut classification.submodels,
                    Role::ConceptDescription => &mut classification.concept_descriptions,
                };
                list.push(triple.subject.clone());
            }
        }
    }

    tracing::info!(
        shells = classification.shells.len(),
        submodels = classification.submodels.len(),
        concept_descriptions = classification.concept_descriptions.len(),
        "classified root subjects"
    );
    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Iri, Triple};

    fn node(s: &str) -> Iri {
        Iri::new(format!("https://example.org/{s}")).unwrap()
    }

    fn typed(s: &str, class_iri: &str) -> Triple {
        Triple::new(
            node(s),
            Iri::new(vocab::RDF_TYPE).unwrap(),
            Iri::new(class_iri).unwrap(),
        )
    }

    #[test]
    fn roles_follow_first_appearance() {
        let g = TripleGraph::load(vec![
            typed("sm2", class::SUBMODEL),
            typed("aas", class::ASSET_ADMINISTRATION_SHELL),
            typed("sm1", class::SUBMODEL),
            typed("cd", class::CONCEPT_DESCRIPTION),
        ])
        .unwrap();

        let c = classify(&g).unwrap();
        assert_eq!(c.shells, vec![Subject::Iri(node("aas"))]);
        assert_eq!(
            c.submodels,
            vec![Subject::Iri(node("sm2")), Subject::Iri(node("sm1"))]
        );
        assert_eq!(c.concept_descriptions, vec![Subject::Iri(node("cd"))]);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn unrelated_types_are_ignored() {
        let g = TripleGraph::load(vec![
            typed("p", class::PROPERTY),
            typed("x", "https://example.org/Thing"),
            typed("sm", class::SUBMODEL),
            typed("sm", "https://example.org/Thing"),
        ])
        .unwrap();
        let c = classify(&g).unwrap();
        assert_eq!(c.submodels, vec![Subject::Iri(node("sm"))]);
        assert!(c.shells.is_empty());
    }

    #[test]
    fn conflicting_roles_are_ambiguous() {
        let g = TripleGraph::load(vec![
            typed("x", class::SUBMODEL),
            typed("x", class::CONCEPT_DESCRIPTION),
        ])
        .unwrap();
        match classify(&g) {
            Err(ClassifyError::AmbiguousType { subject, types }) => {
                assert_eq!(subject, "<https://example.org/x>");
                assert_eq!(types.len(), 2);
            }
            other => panic!("expected AmbiguousType, got {other:?}"),
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let g = TripleGraph::load(vec![
            typed("b", class::SUBMODEL),
            typed("a", class::SUBMODEL),
            typed("c", class::ASSET_ADMINISTRATION_SHELL),
        ])
        .unwrap();
        assert_eq!(classify(&g).unwrap(), classify(&g).unwrap());
    }
}
