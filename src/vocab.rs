//! IRIs of the AAS 3.0 RDF serialisation and the W3C vocabularies it builds on.
//!
//! Class IRIs are `aas:<Class>`, attribute IRIs `aas:<Class>/<attribute>`, and
//! enumeration literals `aas:<Enumeration>/<Literal>`.

/// Expands to the `&'static str` IRI of a term in the AAS 3.0 namespace.
macro_rules! aas {
    ($local:literal) => {
        concat!("https://admin-shell.io/aas/3/0/", $local)
    };
}

pub const AAS_NS: &str = aas!("");
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// Position of a node within an ordered list-valued attribute.
pub const INDEX: &str = aas!("index");

/// XSD datatype IRIs.
pub mod xsd {
    macro_rules! xsd {
        ($local:literal) => {
            concat!("http://www.w3.org/2001/XMLSchema#", $local)
        };
    }

    pub const STRING: &str = xsd!("string");
    pub const BOOLEAN: &str = xsd!("boolean");
    pub const INTEGER: &str = xsd!("integer");
}

/// Class IRIs, used as `rdf:type` objects.
pub mod class {
    pub const ASSET_ADMINISTRATION_SHELL: &str = aas!("AssetAdministrationShell");
    pub const SUBMODEL: &str = aas!("Submodel");
    pub const CONCEPT_DESCRIPTION: &str = aas!("ConceptDescription");

    pub const ASSET_INFORMATION: &str = aas!("AssetInformation");
    pub const ADMINISTRATIVE_INFORMATION: &str = aas!("AdministrativeInformation");
    pub const REFERENCE: &str = aas!("Reference");
    pub const KEY: &str = aas!("Key");
    pub const QUALIFIER: &str = aas!("Qualifier");
    pub const SPECIFIC_ASSET_ID: &str = aas!("SpecificAssetId");
    pub const RESOURCE: &str = aas!("Resource");
    pub const EMBEDDED_DATA_SPECIFICATION: &str = aas!("EmbeddedDataSpecification");
    pub const DATA_SPECIFICATION_IEC61360: &str = aas!("DataSpecificationIec61360");
    pub const OPERATION_VARIABLE: &str = aas!("OperationVariable");

    pub const LANG_STRING_TEXT_TYPE: &str = aas!("LangStringTextType");
    pub const LANG_STRING_NAME_TYPE: &str = aas!("LangStringNameType");
    pub const LANG_STRING_PREFERRED_NAME_IEC61360: &str =
        aas!("LangStringPreferredNameTypeIec61360");
    pub const LANG_STRING_SHORT_NAME_IEC61360: &str = aas!("LangStringShortNameTypeIec61360");
    pub const LANG_STRING_DEFINITION_IEC61360: &str = aas!("LangStringDefinitionTypeIec61360");

    pub const PROPERTY: &str = aas!("Property");
    pub const MULTI_LANGUAGE_PROPERTY: &str = aas!("MultiLanguageProperty");
    pub const RANGE: &str = aas!("Range");
    pub const FILE: &str = aas!("File");
    pub const BLOB: &str = aas!("Blob");
    pub const REFERENCE_ELEMENT: &str = aas!("ReferenceElement");
    pub const SUBMODEL_ELEMENT_COLLECTION: &str = aas!("SubmodelElementCollection");
    pub const SUBMODEL_ELEMENT_LIST: &str = aas!("SubmodelElementList");
    pub const RELATIONSHIP_ELEMENT: &str = aas!("RelationshipElement");
    pub const ANNOTATED_RELATIONSHIP_ELEMENT: &str = aas!("AnnotatedRelationshipElement");
    pub const ENTITY: &str = aas!("Entity");
    pub const CAPABILITY: &str = aas!("Capability");
    pub const OPERATION: &str = aas!("Operation");
    pub const BASIC_EVENT_ELEMENT: &str = aas!("BasicEventElement");
}

pub mod referable {
    pub const CATEGORY: &str = aas!("Referable/category");
    pub const ID_SHORT: &str = aas!("Referable/idShort");
    pub const DISPLAY_NAME: &str = aas!("Referable/displayName");
    pub const DESCRIPTION: &str = aas!("Referable/description");
}

pub mod identifiable {
    pub const ID: &str = aas!("Identifiable/id");
    pub const ADMINISTRATION: &str = aas!("Identifiable/administration");
}

pub mod administrative_information {
    pub const VERSION: &str = aas!("AdministrativeInformation/version");
    pub const REVISION: &str = aas!("AdministrativeInformation/revision");
    pub const CREATOR: &str = aas!("AdministrativeInformation/creator");
    pub const TEMPLATE_ID: &str = aas!("AdministrativeInformation/templateId");
}

pub mod has_semantics {
    pub const SEMANTIC_ID: &str = aas!("HasSemantics/semanticId");
    pub const SUPPLEMENTAL_SEMANTIC_IDS: &str = aas!("HasSemantics/supplementalSemanticIds");
}

pub const HAS_KIND_KIND: &str = aas!("HasKind/kind");
pub const QUALIFIABLE_QUALIFIERS: &str = aas!("Qualifiable/qualifiers");
pub const HAS_DATA_SPECIFICATION: &str = aas!("HasDataSpecification/embeddedDataSpecifications");

pub mod qualifier {
    pub const KIND: &str = aas!("Qualifier/kind");
    pub const TYPE: &str = aas!("Qualifier/type");
    pub const VALUE_TYPE: &str = aas!("Qualifier/valueType");
    pub const VALUE: &str = aas!("Qualifier/value");
    pub const VALUE_ID: &str = aas!("Qualifier/valueId");
}

pub mod reference {
    pub const TYPE: &str = aas!("Reference/type");
    pub const REFERRED_SEMANTIC_ID: &str = aas!("Reference/referredSemanticId");
    pub const KEYS: &str = aas!("Reference/keys");
}

pub mod key {
    pub const TYPE: &str = aas!("Key/type");
    pub const VALUE: &str = aas!("Key/value");
}

pub mod lang_string {
    pub const LANGUAGE: &str = aas!("AbstractLangString/language");
    pub const TEXT: &str = aas!("AbstractLangString/text");
}

pub mod embedded_data_specification {
    pub const DATA_SPECIFICATION: &str = aas!("EmbeddedDataSpecification/dataSpecification");
    pub const CONTENT: &str = aas!("EmbeddedDataSpecification/dataSpecificationContent");
}

pub mod iec61360 {
    pub const PREFERRED_NAME: &str = aas!("DataSpecificationIec61360/preferredName");
    pub const SHORT_NAME: &str = aas!("DataSpecificationIec61360/shortName");
    pub const UNIT: &str = aas!("DataSpecificationIec61360/unit");
    pub const UNIT_ID: &str = aas!("DataSpecificationIec61360/unitId");
    pub const SOURCE_OF_DEFINITION: &str = aas!("DataSpecificationIec61360/sourceOfDefinition");
    pub const SYMBOL: &str = aas!("DataSpecificationIec61360/symbol");
    pub const DATA_TYPE: &str = aas!("DataSpecificationIec61360/dataType");
    pub const DEFINITION: &str = aas!("DataSpecificationIec61360/definition");
    pub const VALUE_FORMAT: &str = aas!("DataSpecificationIec61360/valueFormat");
    pub const VALUE: &str = aas!("DataSpecificationIec61360/value");
}

pub mod shell {
    pub const ASSET_INFORMATION: &str = aas!("AssetAdministrationShell/assetInformation");
    pub const DERIVED_FROM: &str = aas!("AssetAdministrationShell/derivedFrom");
    pub const SUBMODELS: &str = aas!("AssetAdministrationShell/submodels");
}

pub mod asset_information {
    pub const ASSET_KIND: &str = aas!("AssetInformation/assetKind");
    pub const GLOBAL_ASSET_ID: &str = aas!("AssetInformation/globalAssetId");
    pub const SPECIFIC_ASSET_IDS: &str = aas!("AssetInformation/specificAssetIds");
    pub const ASSET_TYPE: &str = aas!("AssetInformation/assetType");
    pub const DEFAULT_THUMBNAIL: &str = aas!("AssetInformation/defaultThumbnail");
}

pub mod resource {
    pub const PATH: &str = aas!("Resource/path");
    pub const CONTENT_TYPE: &str = aas!("Resource/contentType");
}

pub mod specific_asset_id {
    pub const NAME: &str = aas!("SpecificAssetId/name");
    pub const VALUE: &str = aas!("SpecificAssetId/value");
    pub const EXTERNAL_SUBJECT_ID: &str = aas!("SpecificAssetId/externalSubjectId");
}

pub const SUBMODEL_ELEMENTS: &str = aas!("Submodel/submodelElements");
pub const CONCEPT_DESCRIPTION_IS_CASE_OF: &str = aas!("ConceptDescription/isCaseOf");

pub mod property {
    pub const VALUE_TYPE: &str = aas!("Property/valueType");
    pub const VALUE: &str = aas!("Property/value");
    pub const VALUE_ID: &str = aas!("Property/valueId");
}

pub mod multi_language_property {
    pub const VALUE: &str = aas!("MultiLanguageProperty/value");
    pub const VALUE_ID: &str = aas!("MultiLanguageProperty/valueId");
}

pub mod range {
    pub const VALUE_TYPE: &str = aas!("Range/valueType");
    pub const MIN: &str = aas!("Range/min");
    pub const MAX: &str = aas!("Range/max");
}

pub mod file {
    pub const CONTENT_TYPE: &str = aas!("File/contentType");
    pub const VALUE: &str = aas!("File/value");
}

pub mod blob {
    pub const CONTENT_TYPE: &str = aas!("Blob/contentType");
    pub const VALUE: &str = aas!("Blob/value");
}

pub const REFERENCE_ELEMENT_VALUE: &str = aas!("ReferenceElement/value");
pub const COLLECTION_VALUE: &str = aas!("SubmodelElementCollection/value");

pub mod list {
    pub const ORDER_RELEVANT: &str = aas!("SubmodelElementList/orderRelevant");
    pub const SEMANTIC_ID_LIST_ELEMENT: &str = aas!("SubmodelElementList/semanticIdListElement");
    pub const TYPE_VALUE_LIST_ELEMENT: &str = aas!("SubmodelElementList/typeValueListElement");
    pub const VALUE_TYPE_LIST_ELEMENT: &str = aas!("SubmodelElementList/valueTypeListElement");
    pub const VALUE: &str = aas!("SubmodelElementList/value");
}

pub mod relationship {
    pub const FIRST: &str = aas!("RelationshipElement/first");
    pub const SECOND: &str = aas!("RelationshipElement/second");
    pub const ANNOTATIONS: &str = aas!("AnnotatedRelationshipElement/annotations");
}

pub mod entity {
    pub const ENTITY_TYPE: &str = aas!("Entity/entityType");
    pub const GLOBAL_ASSET_ID: &str = aas!("Entity/globalAssetId");
    pub const SPECIFIC_ASSET_IDS: &str = aas!("Entity/specificAssetIds");
    pub const STATEMENTS: &str = aas!("Entity/statements");
}

pub mod operation {
    pub const INPUT_VARIABLES: &str = aas!("Operation/inputVariables");
    pub const OUTPUT_VARIABLES: &str = aas!("Operation/outputVariables");
    pub const INOUTPUT_VARIABLES: &str = aas!("Operation/inoutputVariables");
    pub const VARIABLE_VALUE: &str = aas!("OperationVariable/value");
}

pub mod event {
    pub const OBSERVED: &str = aas!("BasicEventElement/observed");
    pub const DIRECTION: &str = aas!("BasicEventElement/direction");
    pub const STATE: &str = aas!("BasicEventElement/state");
    pub const MESSAGE_TOPIC: &str = aas!("BasicEventElement/messageTopic");
    pub const MESSAGE_BROKER: &str = aas!("BasicEventElement/messageBroker");
    pub const LAST_UPDATE: &str = aas!("BasicEventElement/lastUpdate");
    pub const MIN_INTERVAL: &str = aas!("BasicEventElement/minInterval");
    pub const MAX_INTERVAL: &str = aas!("BasicEventElement/maxInterval");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_iris_live_in_aas_namespace() {
        assert_eq!(referable::ID_SHORT, "https://admin-shell.io/aas/3/0/Referable/idShort");
        assert!(class::SUBMODEL.starts_with(AAS_NS));
        assert_eq!(INDEX, "https://admin-shell.io/aas/3/0/index");
    }
}
