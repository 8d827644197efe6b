//! Constructors for root entities and the shared structures they contain.

use crate::graph::Term;
use crate::model::{
    AdministrativeInformation, AssetAdministrationShell, AssetInformation, ConceptDescription,
    DataSpecificationContent, DataSpecificationIec61360, ElementHeader, EmbeddedDataSpecification,
    Key, LangString, Qualifier, Reference, Referable, Resource, SpecificAssetId, Submodel,
};
use crate::vocab::{
    self, administrative_information as admin, asset_information, class,
    embedded_data_specification as eds, has_semantics, iec61360, identifiable, key, lang_string,
    qualifier, reference, referable, resource, shell, specific_asset_id,
};

use super::{MapResult, Mapper, Scope, missing, unexpected};

const DATA_SPECIFICATION_CONTENT_CLASSES: &[&str] = &[class::DATA_SPECIFICATION_IEC61360];

impl Mapper<'_> {
    pub(super) fn map_shell(&self, scope: &Scope<'_>) -> MapResult<AssetAdministrationShell> {
        Ok(AssetAdministrationShell {
            referable: self.referable(scope)?,
            id: self.required_text(scope, identifiable::ID)?,
            administration: self.nested(scope, identifiable::ADMINISTRATION, Self::administration)?,
            embedded_data_specifications: self.embedded_data_specifications(scope)?,
            derived_from: self.nested(scope, shell::DERIVED_FROM, Self::reference)?,
            asset_information: self.required(
                scope,
                shell::ASSET_INFORMATION,
                Self::asset_information,
            )?,
            submodels: self.nested_list(scope, shell::SUBMODELS, Self::reference)?,
        })
    }

    pub(super) fn map_submodel(&self, scope: &Scope<'_>) -> MapResult<Submodel> {
        Ok(Submodel {
            header: self.header(scope)?,
            id: self.required_text(scope, identifiable::ID)?,
            administration: self.nested(scope, identifiable::ADMINISTRATION, Self::administration)?,
            kind: self.enumeration(scope, vocab::HAS_KIND_KIND)?,
            submodel_elements: self.nested_list(
                scope,
                vocab::SUBMODEL_ELEMENTS,
                Self::map_element,
            )?,
        })
    }

    pub(super) fn map_concept_description(
        &self,
        scope: &Scope<'_>,
    ) -> MapResult<ConceptDescription> {
        Ok(ConceptDescription {
            referable: self.referable(scope)?,
            id: self.required_text(scope, identifiable::ID)?,
            administration: self.nested(scope, identifiable::ADMINISTRATION, Self::administration)?,
            embedded_data_specifications: self.embedded_data_specifications(scope)?,
            is_case_of: self.nested_list(
                scope,
                vocab::CONCEPT_DESCRIPTION_IS_CASE_OF,
                Self::reference,
            )?,
        })
    }

    // -----------------------------------------------------------------------
    // Shared structures
    // -----------------------------------------------------------------------

    pub(super) fn referable(&self, scope: &Scope<'_>) -> MapResult<Referable> {
        Ok(Referable {
            category: self.text(scope, referable::CATEGORY)?,
            id_short: self.text(scope, referable::ID_SHORT)?,
            display_name: self.lang_strings(scope, referable::DISPLAY_NAME)?,
            description: self.lang_strings(scope, referable::DESCRIPTION)?,
        })
    }

    /// Referable, semantics, qualifiers and data specifications of an element.
    pub(super) fn header(&self, scope: &Scope<'_>) -> MapResult<ElementHeader> {
        Ok(ElementHeader {
            referable: self.referable(scope)?,
            semantic_id: self.nested(scope, has_semantics::SEMANTIC_ID, Self::reference)?,
            supplemental_semantic_ids: self.nested_list(
                scope,
                has_semantics::SUPPLEMENTAL_SEMANTIC_IDS,
                Self::reference,
            )?,
            qualifiers: self.nested_list(scope, vocab::QUALIFIABLE_QUALIFIERS, Self::qualifier)?,
            embedded_data_specifications: self.embedded_data_specifications(scope)?,
        })
    }

    /// Language strings of `predicate`.
    ///
    /// Each object is either a lang-string node or, as a shorthand, a
    /// language-tagged literal.
    pub(super) fn lang_strings(
        &self,
        scope: &Scope<'_>,
        predicate: &str,
    ) -> MapResult<Vec<LangString>> {
        self.ordered_objects(scope.subject, predicate)?
            .into_iter()
            .map(|term| match term {
                Term::Literal(lit) => match lit.language() {
                    Some(language) => Ok(LangString::new(language, lit.lexical())),
                    None => Err(unexpected(
                        scope.subject,
                        predicate,
                        "a language string",
                        term,
                    )),
                },
                _ => self.descend(scope, predicate, term, Self::lang_string),
            })
            .collect()
    }

    fn lang_string(&self, scope: &Scope<'_>) -> MapResult<LangString> {
        Ok(LangString {
            language: self.required_text(scope, lang_string::LANGUAGE)?,
            text: self.required_text(scope, lang_string::TEXT)?,
        })
    }

    pub(super) fn reference(&self, scope: &Scope<'_>) -> MapResult<Reference> {
        Ok(Reference {
            reference_type: self.required_enumeration(scope, reference::TYPE)?,
            referred_semantic_id: self
                .nested(scope, reference::REFERRED_SEMANTIC_ID, Self::reference)?
                .map(Box::new),
            keys: self.nested_list(scope, reference::KEYS, Self::key)?,
        })
    }

    fn key(&self, scope: &Scope<'_>) -> MapResult<Key> {
        Ok(Key {
            key_type: self.required_enumeration(scope, key::TYPE)?,
            value: self.required_text(scope, key::VALUE)?,
        })
    }

    fn qualifier(&self, scope: &Scope<'_>) -> MapResult<Qualifier> {
        Ok(Qualifier {
            semantic_id: self.nested(scope, has_semantics::SEMANTIC_ID, Self::reference)?,
            supplemental_semantic_ids: self.nested_list(
                scope,
                has_semantics::SUPPLEMENTAL_SEMANTIC_IDS,
                Self::reference,
            )?,
            kind: self.enumeration(scope, qualifier::KIND)?,
            qualifier_type: self.required_text(scope, qualifier::TYPE)?,
            value_type: self.required_enumeration(scope, qualifier::VALUE_TYPE)?,
            value: self.text(scope, qualifier::VALUE)?,
            value_id: self.nested(scope, qualifier::VALUE_ID, Self::reference)?,
        })
    }

    fn administration(&self, scope: &Scope<'_>) -> MapResult<AdministrativeInformation> {
        Ok(AdministrativeInformation {
            embedded_data_specifications: self.embedded_data_specifications(scope)?,
            version: self.text(scope, admin::VERSION)?,
            revision: self.text(scope, admin::REVISION)?,
            creator: self.nested(scope, admin::CREATOR, Self::reference)?,
            template_id: self.text(scope, admin::TEMPLATE_ID)?,
        })
    }

    pub(super) fn embedded_data_specifications(
        &self,
        scope: &Scope<'_>,
    ) -> MapResult<Vec<EmbeddedDataSpecification>> {
        self.nested_list(
            scope,
            vocab::HAS_DATA_SPECIFICATION,
            Self::embedded_data_specification,
        )
    }

    fn embedded_data_specification(
        &self,
        scope: &Scope<'_>,
    ) -> MapResult<EmbeddedDataSpecification> {
        Ok(EmbeddedDataSpecification {
            data_specification: self.required(scope, eds::DATA_SPECIFICATION, Self::reference)?,
            data_specification_content: self.required(
                scope,
                eds::CONTENT,
                Self::data_specification_content,
            )?,
        })
    }

    fn data_specification_content(
        &self,
        scope: &Scope<'_>,
    ) -> MapResult<DataSpecificationContent> {
        self.dispatch_type(scope, DATA_SPECIFICATION_CONTENT_CLASSES)?;
        let spec = DataSpecificationIec61360 {
            preferred_name: self.lang_strings(scope, iec61360::PREFERRED_NAME)?,
            short_name: self.lang_strings(scope, iec61360::SHORT_NAME)?,
            unit: self.text(scope, iec61360::UNIT)?,
            unit_id: self.nested(scope, iec61360::UNIT_ID, Self::reference)?,
            source_of_definition: self.text(scope, iec61360::SOURCE_OF_DEFINITION)?,
            symbol: self.text(scope, iec61360::SYMBOL)?,
            data_type: self.enumeration(scope, iec61360::DATA_TYPE)?,
            definition: self.lang_strings(scope, iec61360::DEFINITION)?,
            value_format: self.text(scope, iec61360::VALUE_FORMAT)?,
            value: self.text(scope, iec61360::VALUE)?,
        };
        if spec.preferred_name.is_empty() {
            return Err(missing(scope.subject, iec61360::PREFERRED_NAME));
        }
        Ok(DataSpecificationContent::DataSpecificationIec61360(spec))
    }

    fn asset_information(&self, scope: &Scope<'_>) -> MapResult<AssetInformation> {
        Ok(AssetInformation {
            asset_kind: self.required_enumeration(scope, asset_information::ASSET_KIND)?,
            global_asset_id: self.text(scope, asset_information::GLOBAL_ASSET_ID)?,
            specific_asset_ids: self.nested_list(
                scope,
                asset_information::SPECIFIC_ASSET_IDS,
                Self::specific_asset_id,
            )?,
            asset_type: self.text(scope, asset_information::ASSET_TYPE)?,
            default_thumbnail: self.nested(
                scope,
                asset_information::DEFAULT_THUMBNAIL,
                Self::resource,
            )?,
        })
    }

    pub(super) fn specific_asset_id(&self, scope: &Scope<'_>) -> MapResult<SpecificAssetId> {
        Ok(SpecificAssetId {
            semantic_id: self.nested(scope, has_semantics::SEMANTIC_ID, Self::reference)?,
            supplemental_semantic_ids: self.nested_list(
                scope,
                has_semantics::SUPPLEMENTAL_SEMANTIC_IDS,
                Self::reference,
            )?,
            name: self.required_text(scope, specific_asset_id::NAME)?,
            value: self.required_text(scope, specific_asset_id::VALUE)?,
            external_subject_id: self.nested(
                scope,
                specific_asset_id::EXTERNAL_SUBJECT_ID,
                Self::reference,
            )?,
        })
    }

    fn resource(&self, scope: &Scope<'_>) -> MapResult<Resource> {
        Ok(Resource {
            path: self.required_text(scope, resource::PATH)?,
            content_type: self.text(scope, resource::CONTENT_TYPE)?,
        })
    }
}
