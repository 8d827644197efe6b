//! Object→graph serialization: the structural inverse of [`crate::mapper`].
//!
//! Every node becomes an IRI subject with an `rdf:type` triple, one triple
//! per present scalar and one link triple per child. Children of list-valued
//! attributes also get an `aas:index` position, which the mapper uses to
//! restore their order.
//!
//! Identifiers are deterministic. Identifiables use their `id` (wrapped in a
//! `urn:aas:id:` IRI when it is not an absolute IRI); every other node gets
//! `<parent>/<attribute>` or `<parent>/<attribute>/<position>`. Serializing
//! the same tree twice yields the same triples in the same order.

mod element;
mod identifiable;

use std::collections::HashSet;

use crate::error::MapError;
use crate::graph::{Iri, Literal, Subject, Term, Triple, TripleGraph};
use crate::mapper::MapResult;
use crate::model::{AasEnum, Document, Environment, LangString};
use crate::vocab::{self, lang_string};

/// Prefix for identifiers that are not absolute IRIs.
pub const ID_URN_PREFIX: &str = "urn:aas:id:";

/// Subject IRI for an identifiable's `id`.
pub fn identifier_iri(id: &str) -> Iri {
    match Iri::new(id) {
        Ok(iri) => iri,
        Err(_) => Iri::new_unchecked(format!("{ID_URN_PREFIX}{}", percent_encode(id))),
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Serializes documents to triples.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer<'a> {
    avoid: Option<&'a TripleGraph>,
    overwrite: bool,
}

impl<'a> Serializer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep clear of the subjects of `graph`: minted identifiers that are
    /// taken get a `~n` suffix, explicit identifiers that are taken fail with
    /// [`MapError::IdentifierCollision`].
    pub fn avoid(mut self, graph: &'a TripleGraph) -> Self {
        self.avoid = Some(graph);
        self
    }

    /// Reuse identifiers present in the avoided graph instead of failing or
    /// suffixing.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Triples of one root document.
    pub fn to_graph(&self, document: &Document) -> MapResult<Vec<Triple>> {
        let mut emitter = self.emitter();
        let subject = emitter.explicit(document.id())?;
        emitter.document(&subject, document)?;
        Ok(emitter.triples)
    }

    /// Triples of every document of an environment, loaded into a graph.
    pub fn environment_to_graph(&self, env: &Environment) -> MapResult<TripleGraph> {
        let mut emitter = self.emitter();
        let documents = env.documents();
        // Root ids are claimed up front so minted children never take one.
        let subjects = documents
            .iter()
            .map(|document| emitter.explicit(document.id()))
            .collect::<MapResult<Vec<_>>>()?;
        for (subject, document) in subjects.iter().zip(&documents) {
            emitter.document(subject, document)?;
        }
        tracing::info!(
            documents = env.len(),
            triples = emitter.triples.len(),
            "serialized environment"
        );
        Ok(TripleGraph::load(emitter.triples)?)
    }

    fn emitter(&self) -> Emitter<'a> {
        Emitter {
            avoid: if self.overwrite { None } else { self.avoid },
            used: HashSet::new(),
            triples: Vec::new(),
        }
    }
}

/// Triple sink for one serialization run.
struct Emitter<'a> {
    /// Graph whose subjects must not be reused.
    avoid: Option<&'a TripleGraph>,
    /// Subjects assigned so far.
    used: HashSet<Iri>,
    triples: Vec<Triple>,
}

impl Emitter<'_> {
    fn taken(&self, iri: &Iri) -> bool {
        self.used.contains(iri)
            || self
                .avoid
                .is_some_and(|g| g.contains_subject(&Subject::Iri(iri.clone())))
    }

    /// Emit a root document under its already claimed subject.
    fn document(&mut self, subject: &Iri, document: &Document) -> MapResult<()> {
        tracing::debug!(subject = %subject, "serializing root document");
        match document {
            Document::Shell(shell) => self.shell(subject, shell),
            Document::Submodel(submodel) => self.submodel(subject, submodel),
            Document::ConceptDescription(cd) => self.concept_description(subject, cd),
        }
    }

    /// Claim the subject of an explicit identifier.
    fn explicit(&mut self, id: &str) -> MapResult<Iri> {
        let iri = identifier_iri(id);
        if self.taken(&iri) {
            return Err(MapError::IdentifierCollision {
                identifier: iri.as_str().to_string(),
            });
        }
        self.used.insert(iri.clone());
        Ok(iri)
    }

    /// Mint `<parent>/<attribute>[/<position>]`, suffixed with `~n` while taken.
    fn mint(&mut self, parent: &Iri, predicate: &str, position: Option<usize>) -> MapResult<Iri> {
        let attribute = predicate.rsplit('/').next().unwrap_or(predicate);
        let base = match position {
            Some(pos) => format!("{}/{attribute}/{pos}", parent.as_str()),
            None => format!("{}/{attribute}", parent.as_str()),
        };
        let mut iri = Iri::new(base.as_str())?;
        let mut suffix = 0;
        while self.taken(&iri) {
            suffix += 1;
            iri = Iri::new(format!("{base}~{suffix}"))?;
        }
        self.used.insert(iri.clone());
        Ok(iri)
    }

    fn emit(&mut self, subject: &Iri, predicate: &str, object: impl Into<Term>) {
        self.triples.push(Triple::new(
            subject.clone(),
            Iri::new_unchecked(predicate),
            object,
        ));
    }

    fn class(&mut self, subject: &Iri, class_iri: &str) {
        self.emit(subject, vocab::RDF_TYPE, Iri::new_unchecked(class_iri));
    }

    /// Start a child node: link triple, type triple, position triple.
    fn node(
        &mut self,
        parent: &Iri,
        predicate: &str,
        position: Option<usize>,
        class_iri: &str,
    ) -> MapResult<Iri> {
        let child = self.mint(parent, predicate, position)?;
        self.emit(parent, predicate, child.clone());
        self.class(&child, class_iri);
        if let Some(pos) = position {
            self.emit(&child, vocab::INDEX, Literal::integer(pos as i64));
        }
        Ok(child)
    }

    fn text(&mut self, subject: &Iri, predicate: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.emit(subject, predicate, Literal::string(value));
        }
    }

    fn enumeration<E: AasEnum>(&mut self, subject: &Iri, predicate: &str, value: Option<E>) {
        if let Some(value) = value {
            self.emit(subject, predicate, Iri::new_unchecked(value.iri()));
        }
    }

    fn lang_strings(
        &mut self,
        subject: &Iri,
        predicate: &str,
        class_iri: &str,
        values: &[LangString],
    ) -> MapResult<()> {
        for (pos, value) in values.iter().enumerate() {
            let node = self.node(subject, predicate, Some(pos), class_iri)?;
            self.text(&node, lang_string::LANGUAGE, Some(&value.language));
            self.text(&node, lang_string::TEXT, Some(&value.text));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Mapper;
    use crate::model::{
        DataTypeDefXsd, ElementHeader, KeyTypes, ModellingKind, Property, Reference, Submodel,
        SubmodelElement, SubmodelElementCollection,
    };

    fn property(id_short: &str, value: &str) -> SubmodelElement {
        SubmodelElement::Property(Property {
            header: ElementHeader::with_id_short(id_short),
            value_type: DataTypeDefXsd::String,
            value: Some(value.into()),
            value_id: None,
        })
    }

    fn submodel() -> Submodel {
        Submodel {
            header: ElementHeader {
                semantic_id: Some(Reference::global("https://example.org/semantics/tensile")),
                ..ElementHeader::with_id_short("TensileTest")
            },
            id: "https://example.org/sm/1".into(),
            administration: None,
            kind: Some(ModellingKind::Instance),
            submodel_elements: vec![
                property("c", "3"),
                property("a", "1"),
                SubmodelElement::SubmodelElementCollection(SubmodelElementCollection {
                    header: ElementHeader::with_id_short("b"),
                    value: vec![property("x", "x"), property("y", "y")],
                }),
            ],
        }
    }

    #[test]
    fn identifier_iri_keeps_absolute_iris() {
        assert_eq!(identifier_iri("https://example.org/a").as_str(), "https://example.org/a");
        assert_eq!(identifier_iri("urn:x:1").as_str(), "urn:x:1");
        assert_eq!(
            identifier_iri("Tensile Test#1").as_str(),
            "urn:aas:id:Tensile%20Test%231"
        );
    }

    #[test]
    fn serialization_is_idempotent() {
        let doc = Document::Submodel(submodel());
        let first = Serializer::new().to_graph(&doc).unwrap();
        let second = Serializer::new().to_graph(&doc).unwrap();
        assert_eq!(first, second);
        let text = |ts: &[Triple]| ts.iter().map(Triple::to_string).collect::<Vec<_>>();
        assert_eq!(text(&first), text(&second));
    }

    #[test]
    fn roundtrip_preserves_structure_and_order() {
        let sm = submodel();
        let triples = Serializer::new()
            .to_graph(&Document::Submodel(sm.clone()))
            .unwrap();
        let graph = TripleGraph::load(triples).unwrap();
        let subject = Subject::Iri(identifier_iri(&sm.id));
        let back = Mapper::new(&graph).submodel(&subject).unwrap();
        assert_eq!(back, sm);
    }

    #[test]
    fn list_children_get_positions() {
        let triples = Serializer::new()
            .to_graph(&Document::Submodel(submodel()))
            .unwrap();
        let child = Subject::Iri(Iri::new("https://example.org/sm/1/submodelElements/1").unwrap());
        let graph = TripleGraph::load(triples).unwrap();
        let index = graph.object_for(&child, vocab::INDEX).unwrap();
        assert_eq!(index.as_literal().unwrap().lexical(), "1");
    }

    #[test]
    fn minted_collisions_get_a_suffix() {
        let taken = Iri::new("https://example.org/sm/1/semanticId").unwrap();
        let existing = TripleGraph::load(vec![Triple::new(
            taken.clone(),
            Iri::new(vocab::RDF_TYPE).unwrap(),
            Iri::new(vocab::class::REFERENCE).unwrap(),
        )])
        .unwrap();

        let triples = Serializer::new()
            .avoid(&existing)
            .to_graph(&Document::Submodel(submodel()))
            .unwrap();
        let graph = TripleGraph::load(triples).unwrap();
        let root = Subject::Iri(identifier_iri("https://example.org/sm/1"));
        let semantic = graph
            .object_for(&root, vocab::has_semantics::SEMANTIC_ID)
            .and_then(Term::as_iri)
            .unwrap();
        assert_eq!(semantic.as_str(), "https://example.org/sm/1/semanticId~1");
        assert!(!graph.contains_subject(&Subject::Iri(taken)));
    }

    #[test]
    fn explicit_collision_fails_unless_overwriting() {
        let existing = TripleGraph::load(vec![Triple::new(
            Iri::new("https://example.org/sm/1").unwrap(),
            Iri::new(vocab::RDF_TYPE).unwrap(),
            Iri::new(vocab::class::SUBMODEL).unwrap(),
        )])
        .unwrap();
        let doc = Document::Submodel(submodel());

        assert!(matches!(
            Serializer::new().avoid(&existing).to_graph(&doc),
            Err(MapError::IdentifierCollision { .. })
        ));
        let overwritten = Serializer::new()
            .avoid(&existing)
            .overwrite(true)
            .to_graph(&doc)
            .unwrap();
        assert_eq!(overwritten, Serializer::new().to_graph(&doc).unwrap());
    }

    #[test]
    fn duplicate_root_ids_in_one_environment_collide() {
        let mut env = Environment::default();
        env.submodels.push(submodel());
        env.submodels.push(submodel());
        assert!(matches!(
            Serializer::new().environment_to_graph(&env),
            Err(MapError::IdentifierCollision { .. })
        ));
    }

    #[test]
    fn root_ids_win_over_minted_children_in_any_order() {
        let outer = Submodel {
            id: "https://ex.org/sm".into(),
            ..submodel()
        };
        let inner = Submodel {
            id: "https://ex.org/sm/semanticId".into(),
            header: ElementHeader::with_id_short("Inner"),
            submodel_elements: Vec::new(),
            ..submodel()
        };
        for submodels in [
            vec![outer.clone(), inner.clone()],
            vec![inner.clone(), outer.clone()],
        ] {
            let env = Environment {
                submodels,
                ..Default::default()
            };
            let graph = Serializer::new().environment_to_graph(&env).unwrap();
            let root = Subject::Iri(identifier_iri("https://ex.org/sm"));
            let semantic = graph
                .object_for(&root, vocab::has_semantics::SEMANTIC_ID)
                .and_then(Term::as_iri)
                .unwrap();
            assert_eq!(semantic.as_str(), "https://ex.org/sm/semanticId~1");

            let mapper = Mapper::new(&graph);
            assert_eq!(mapper.submodel(&root).unwrap(), outer);
            let inner_root = Subject::Iri(identifier_iri("https://ex.org/sm/semanticId"));
            assert_eq!(mapper.submodel(&inner_root).unwrap(), inner);
        }
    }

    #[test]
    fn model_reference_keys_use_enumeration_iris() {
        let mut sm = submodel();
        sm.header.semantic_id = Some(Reference::model(KeyTypes::ConceptDescription, "urn:cd"));
        let triples = Serializer::new().to_graph(&Document::Submodel(sm)).unwrap();
        assert!(triples.iter().any(|t| t.object
            == Term::Iri(Iri::new(KeyTypes::ConceptDescription.iri()).unwrap())));
    }
}
