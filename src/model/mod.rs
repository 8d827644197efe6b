//! Typed AAS 3.0 document model.
//!
//! - **Roots** (`identifiable`): [`AssetAdministrationShell`], [`Submodel`], [`ConceptDescription`]
//! - **Elements** (`element`): [`SubmodelElement`] and its fourteen variants
//! - **Shared** (`common`): references, keys, qualifiers, language strings, data specifications
//! - **Enumerations** (`enums`): JSON literal and RDF IRI per value
//!
//! Serde derives produce the AAS JSON serialisation: camelCase keys, a
//! `modelType` discriminator, absent values omitted rather than `null`.

pub mod common;
pub mod element;
pub mod enums;
pub mod identifiable;

use serde::{Deserialize, Serialize};

pub use common::{
    AdministrativeInformation, DataSpecificationContent, DataSpecificationIec61360,
    EmbeddedDataSpecification, Key, LangString, Qualifier, Reference, Referable, Resource,
    SpecificAssetId,
};
pub use element::{
    AnnotatedRelationshipElement, BasicEventElement, Blob, Capability, ElementHeader, Entity,
    File, MultiLanguageProperty, Operation, OperationVariable, Property, Range, ReferenceElement,
    RelationshipElement, SubmodelElement, SubmodelElementCollection, SubmodelElementList,
};
pub use enums::{
    AasEnum, AasSubmodelElements, AssetKind, DataTypeDefXsd, DataTypeIec61360, Direction,
    EntityType, KeyTypes, ModellingKind, QualifierKind, ReferenceTypes, StateOfEvent,
};
pub use identifiable::{AssetAdministrationShell, AssetInformation, ConceptDescription, Submodel};

use crate::vocab::class;

/// A root document: what the mapper produces for one classified subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Shell(AssetAdministrationShell),
    Submodel(Submodel),
    ConceptDescription(ConceptDescription),
}

impl Document {
    pub fn id(&self) -> &str {
        match self {
            Document::Shell(s) => &s.id,
            Document::Submodel(s) => &s.id,
            Document::ConceptDescription(c) => &c.id,
        }
    }

    pub fn class_iri(&self) -> &'static str {
        match self {
            Document::Shell(_) => class::ASSET_ADMINISTRATION_SHELL,
            Document::Submodel(_) => class::SUBMODEL,
            Document::ConceptDescription(_) => class::CONCEPT_DESCRIPTION,
        }
    }
}

impl From<AssetAdministrationShell> for Document {
    fn from(s: AssetAdministrationShell) -> Self {
        Document::Shell(s)
    }
}

impl From<Submodel> for Document {
    fn from(s: Submodel) -> Self {
        Document::Submodel(s)
    }
}

impl From<ConceptDescription> for Document {
    fn from(c: ConceptDescription) -> Self {
        Document::ConceptDescription(c)
    }
}

/// The assembled output document. All three lists are always serialized,
/// empty or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(default)]
    pub asset_administration_shells: Vec<AssetAdministrationShell>,
    #[serde(default)]
    pub submodels: Vec<Submodel>,
    #[serde(default)]
    pub concept_descriptions: Vec<ConceptDescription>,
}

impl Environment {
    /// Append a root document to the list of its kind.
    pub fn push(&mut self, document: Document) {
        match document {
            Document::Shell(s) => self.asset_administration_shells.push(s),
            Document::Submodel(s) => self.submodels.push(s),
            Document::ConceptDescription(c) => self.concept_descriptions.push(c),
        }
    }

    /// All root documents: shells, then submodels, then concept descriptions.
    pub fn documents(&self) -> Vec<Document> {
        self.asset_administration_shells
            .iter()
            .cloned()
            .map(Document::Shell)
            .chain(self.submodels.iter().cloned().map(Document::Submodel))
            .chain(
                self.concept_descriptions
                    .iter()
                    .cloned()
                    .map(Document::ConceptDescription),
            )
            .collect()
    }

    pub fn len(&self) -> usize {
        self.asset_administration_shells.len()
            + self.submodels.len()
            + self.concept_descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_environment_keeps_all_keys() {
        assert_eq!(
            serde_json::to_value(Environment::default()).unwrap(),
            json!({
                "assetAdministrationShells": [],
                "submodels": [],
                "conceptDescriptions": []
            })
        );
    }

    #[test]
    fn push_sorts_documents_by_kind() {
        let mut env = Environment::default();
        env.push(
            ConceptDescription {
                referable: Referable::default(),
                id: "urn:cd:1".into(),
                administration: None,
                embedded_data_specifications: vec![],
                is_case_of: vec![],
            }
            .into(),
        );
        assert_eq!(env.concept_descriptions.len(), 1);
        assert_eq!(env.documents()[0].id(), "urn:cd:1");
        assert_eq!(env.len(), 1);
    }
}
