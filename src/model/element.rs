//! Submodel elements: the closed set of AAS 3.0 element variants.

use serde::{Deserialize, Serialize};

use super::common::{
    EmbeddedDataSpecification, LangString, Qualifier, Reference, Referable, SpecificAssetId,
};
use super::enums::{AasSubmodelElements, DataTypeDefXsd, Direction, EntityType, StateOfEvent};
use crate::vocab::class;

/// Attributes shared by every submodel element (and by submodels).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementHeader {
    #[serde(flatten)]
    pub referable: Referable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supplemental_semantic_ids: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<Qualifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded_data_specifications: Vec<EmbeddedDataSpecification>,
}

impl ElementHeader {
    pub fn with_id_short(id_short: impl Into<String>) -> Self {
        Self {
            referable: Referable::with_id_short(id_short),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub value_type: DataTypeDefXsd,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiLanguageProperty {
    #[serde(flatten)]
    pub header: ElementHeader,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<LangString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub value_type: DataTypeDefXsd,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(flatten)]
    pub header: ElementHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Binary content, base64 encoded in both serialisations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    #[serde(flatten)]
    pub header: ElementHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceElement {
    #[serde(flatten)]
    pub header: ElementHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelElementCollection {
    #[serde(flatten)]
    pub header: ElementHeader,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<SubmodelElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelElementList {
    #[serde(flatten)]
    pub header: ElementHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_relevant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id_list_element: Option<Reference>,
    pub type_value_list_element: AasSubmodelElements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type_list_element: Option<DataTypeDefXsd>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<SubmodelElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipElement {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub first: Reference,
    pub second: Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedRelationshipElement {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub first: Reference,
    pub second: Reference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<SubmodelElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_asset_ids: Vec<SpecificAssetId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<SubmodelElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    #[serde(flatten)]
    pub header: ElementHeader,
}

/// Wrapper around an operation argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationVariable {
    pub value: Box<SubmodelElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(flatten)]
    pub header: ElementHeader,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_variables: Vec<OperationVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_variables: Vec<OperationVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inoutput_variables: Vec<OperationVariable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicEventElement {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub observed: Reference,
    pub direction: Direction,
    pub state: StateOfEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_broker: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_interval: Option<String>,
}

/// A submodel element, discriminated by `modelType` in JSON and by
/// `rdf:type` in RDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modelType")]
pub enum SubmodelElement {
    Property(Property),
    MultiLanguageProperty(MultiLanguageProperty),
    Range(Range),
    File(File),
    Blob(Blob),
    ReferenceElement(ReferenceElement),
    SubmodelElementCollection(SubmodelElementCollection),
    SubmodelElementList(SubmodelElementList),
    RelationshipElement(RelationshipElement),
    AnnotatedRelationshipElement(AnnotatedRelationshipElement),
    Entity(Entity),
    Capability(Capability),
    Operation(Operation),
    BasicEventElement(BasicEventElement),
}

impl SubmodelElement {
    pub fn header(&self) -> &ElementHeader {
        match self {
            SubmodelElement::Property(e) => &e.header,
            SubmodelElement::MultiLanguageProperty(e) => &e.header,
            SubmodelElement::Range(e) => &e.header,
            SubmodelElement::File(e) => &e.header,
            SubmodelElement::Blob(e) => &e.header,
            SubmodelElement::ReferenceElement(e) => &e.header,
            SubmodelElement::SubmodelElementCollection(e) => &e.header,
            SubmodelElement::SubmodelElementList(e) => &e.header,
            SubmodelElement::RelationshipElement(e) => &e.header,
            SubmodelElement::AnnotatedRelationshipElement(e) => &e.header,
            SubmodelElement::Entity(e) => &e.header,
            SubmodelElement::Capability(e) => &e.header,
            SubmodelElement::Operation(e) => &e.header,
            SubmodelElement::BasicEventElement(e) => &e.header,
        }
    }

    pub fn id_short(&self) -> Option<&str> {
        self.header().referable.id_short.as_deref()
    }

    /// RDF class IRI of the variant.
    pub fn class_iri(&self) -> &'static str {
        match self {
            SubmodelElement::Property(_) => class::PROPERTY,
            SubmodelElement::MultiLanguageProperty(_) => class::MULTI_LANGUAGE_PROPERTY,
            SubmodelElement::Range(_) => class::RANGE,
            SubmodelElement::File(_) => class::FILE,
            SubmodelElement::Blob(_) => class::BLOB,
            SubmodelElement::ReferenceElement(_) => class::REFERENCE_ELEMENT,
            SubmodelElement::SubmodelElementCollection(_) => class::SUBMODEL_ELEMENT_COLLECTION,
            SubmodelElement::SubmodelElementList(_) => class::SUBMODEL_ELEMENT_LIST,
            SubmodelElement::RelationshipElement(_) => class::RELATIONSHIP_ELEMENT,
            SubmodelElement::AnnotatedRelationshipElement(_) => {
                class::ANNOTATED_RELATIONSHIP_ELEMENT
            }
            SubmodelElement::Entity(_) => class::ENTITY,
            SubmodelElement::Capability(_) => class::CAPABILITY,
            SubmodelElement::Operation(_) => class::OPERATION,
            SubmodelElement::BasicEventElement(_) => class::BASIC_EVENT_ELEMENT,
        }
    }

    /// Nested elements owned by this element, in order.
    pub fn children(&self) -> &[SubmodelElement] {
        match self {
            SubmodelElement::SubmodelElementCollection(e) => &e.value,
            SubmodelElement::SubmodelElementList(e) => &e.value,
            SubmodelElement::AnnotatedRelationshipElement(e) => &e.annotations,
            SubmodelElement::Entity(e) => &e.statements,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temperature() -> SubmodelElement {
        SubmodelElement::Property(Property {
            header: ElementHeader::with_id_short("Temperature"),
            value_type: DataTypeDefXsd::Double,
            value: Some("21.5".into()),
            value_id: None,
        })
    }

    #[test]
    fn property_json_is_flat_and_tagged() {
        assert_eq!(
            serde_json::to_value(temperature()).unwrap(),
            json!({
                "modelType": "Property",
                "idShort": "Temperature",
                "valueType": "xs:double",
                "value": "21.5"
            })
        );
    }

    #[test]
    fn collection_json_roundtrip() {
        let smc = SubmodelElement::SubmodelElementCollection(SubmodelElementCollection {
            header: ElementHeader::with_id_short("Conditions"),
            value: vec![temperature()],
        });
        let value = serde_json::to_value(&smc).unwrap();
        assert_eq!(value["value"][0]["modelType"], "Property");
        let back: SubmodelElement = serde_json::from_value(value).unwrap();
        assert_eq!(back, smc);
        assert_eq!(back.children().len(), 1);
    }

    #[test]
    fn class_iri_matches_model_type() {
        let e = temperature();
        let model_type = serde_json::to_value(&e).unwrap()["modelType"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(e.class_iri().ends_with(&model_type));
        assert_eq!(e.id_short(), Some("Temperature"));
    }
}
