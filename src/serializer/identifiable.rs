//! Emitters for root entities and the shared structures they contain.

use crate::graph::Iri;
use crate::mapper::MapResult;
use crate::model::{
    AdministrativeInformation, AssetAdministrationShell, AssetInformation, ConceptDescription,
    DataSpecificationContent, ElementHeader, EmbeddedDataSpecification, Qualifier, Reference,
    Referable, SpecificAssetId, Submodel,
};
use crate::vocab::{
    self, administrative_information as admin, asset_information, class,
    embedded_data_specification as eds, has_semantics, iec61360, identifiable, key, qualifier,
    reference, referable, resource, shell, specific_asset_id,
};

use super::Emitter;

impl Emitter<'_> {
    pub(super) fn shell(&mut self, s: &Iri, shell: &AssetAdministrationShell) -> MapResult<()> {
        self.class(s, class::ASSET_ADMINISTRATION_SHELL);
        self.referable(s, &shell.referable)?;
        self.text(s, identifiable::ID, Some(&shell.id));
        if let Some(administration) = &shell.administration {
            self.administration(s, administration)?;
        }
        self.embedded_data_specifications(s, &shell.embedded_data_specifications)?;
        if let Some(derived_from) = &shell.derived_from {
            self.reference(s, shell::DERIVED_FROM, None, derived_from)?;
        }
        self.asset_information(s, &shell.asset_information)?;
        self.references(s, shell::SUBMODELS, &shell.submodels)
    }

    pub(super) fn submodel(&mut self, s: &Iri, submodel: &Submodel) -> MapResult<()> {
        self.class(s, class::SUBMODEL);
        self.header(s, &submodel.header)?;
        self.text(s, identifiable::ID, Some(&submodel.id));
        if let Some(administration) = &submodel.administration {
            self.administration(s, administration)?;
        }
        self.enumeration(s, vocab::HAS_KIND_KIND, submodel.kind);
        self.elements(s, vocab::SUBMODEL_ELEMENTS, &submodel.submodel_elements)
    }

    pub(super) fn concept_description(
        &mut self,
        s: &Iri,
        cd: &ConceptDescription,
    ) -> MapResult<()> {
        self.class(s, class::CONCEPT_DESCRIPTION);
        self.referable(s, &cd.referable)?;
        self.text(s, identifiable::ID, Some(&cd.id));
        if let Some(administration) = &cd.administration {
            self.administration(s, administration)?;
        }
        self.embedded_data_specifications(s, &cd.embedded_data_specifications)?;
        self.references(s, vocab::CONCEPT_DESCRIPTION_IS_CASE_OF, &cd.is_case_of)
    }

    // -----------------------------------------------------------------------
    // Shared structures
    // -----------------------------------------------------------------------

    pub(super) fn referable(&mut self, s: &Iri, r: &Referable) -> MapResult<()> {
        self.text(s, referable::CATEGORY, r.category.as_deref());
        self.text(s, referable::ID_SHORT, r.id_short.as_deref());
        self.lang_strings(
            s,
            referable::DISPLAY_NAME,
            class::LANG_STRING_NAME_TYPE,
            &r.display_name,
        )?;
        self.lang_strings(
            s,
            referable::DESCRIPTION,
            class::LANG_STRING_TEXT_TYPE,
            &r.description,
        )
    }

    pub(super) fn header(&mut self, s: &Iri, header: &ElementHeader) -> MapResult<()> {
        self.referable(s, &header.referable)?;
        self.semantics(s, header.semantic_id.as_ref(), &header.supplemental_semantic_ids)?;
        for (pos, q) in header.qualifiers.iter().enumerate() {
            self.qualifier(s, pos, q)?;
        }
        self.embedded_data_specifications(s, &header.embedded_data_specifications)
    }

    fn semantics(
        &mut self,
        s: &Iri,
        semantic_id: Option<&Reference>,
        supplemental: &[Reference],
    ) -> MapResult<()> {
        if let Some(semantic_id) = semantic_id {
            self.reference(s, has_semantics::SEMANTIC_ID, None, semantic_id)?;
        }
        self.references(s, has_semantics::SUPPLEMENTAL_SEMANTIC_IDS, supplemental)
    }

    pub(super) fn reference(
        &mut self,
        parent: &Iri,
        predicate: &str,
        position: Option<usize>,
        r: &Reference,
    ) -> MapResult<()> {
        let node = self.node(parent, predicate, position, class::REFERENCE)?;
        self.enumeration(&node, reference::TYPE, Some(r.reference_type));
        if let Some(referred) = &r.referred_semantic_id {
            self.reference(&node, reference::REFERRED_SEMANTIC_ID, None, referred)?;
        }
        for (pos, k) in r.keys.iter().enumerate() {
            let key_node = self.node(&node, reference::KEYS, Some(pos), class::KEY)?;
            self.enumeration(&key_node, key::TYPE, Some(k.key_type));
            self.text(&key_node, key::VALUE, Some(&k.value));
        }
        Ok(())
    }

    pub(super) fn references(
        &mut self,
        parent: &Iri,
        predicate: &str,
        references: &[Reference],
    ) -> MapResult<()> {
        for (pos, r) in references.iter().enumerate() {
            self.reference(parent, predicate, Some(pos), r)?;
        }
        Ok(())
    }

    fn qualifier(&mut self, parent: &Iri, pos: usize, q: &Qualifier) -> MapResult<()> {
        let node = self.node(parent, vocab::QUALIFIABLE_QUALIFIERS, Some(pos), class::QUALIFIER)?;
        self.semantics(&node, q.semantic_id.as_ref(), &q.supplemental_semantic_ids)?;
        self.enumeration(&node, qualifier::KIND, q.kind);
        self.text(&node, qualifier::TYPE, Some(&q.qualifier_type));
        self.enumeration(&node, qualifier::VALUE_TYPE, Some(q.value_type));
        self.text(&node, qualifier::VALUE, q.value.as_deref());
        if let Some(value_id) = &q.value_id {
            self.reference(&node, qualifier::VALUE_ID, None, value_id)?;
        }
        Ok(())
    }

    fn administration(&mut self, parent: &Iri, a: &AdministrativeInformation) -> MapResult<()> {
        let node = self.node(
            parent,
            identifiable::ADMINISTRATION,
            None,
            class::ADMINISTRATIVE_INFORMATION,
        )?;
        self.embedded_data_specifications(&node, &a.embedded_data_specifications)?;
        self.text(&node, admin::VERSION, a.version.as_deref());
        self.text(&node, admin::REVISION, a.revision.as_deref());
        if let Some(creator) = &a.creator {
            self.reference(&node, admin::CREATOR, None, creator)?;
        }
        self.text(&node, admin::TEMPLATE_ID, a.template_id.as_deref());
        Ok(())
    }

    pub(super) fn embedded_data_specifications(
        &mut self,
        parent: &Iri,
        specs: &[EmbeddedDataSpecification],
    ) -> MapResult<()> {
        for (pos, spec) in specs.iter().enumerate() {
            let node = self.node(
                parent,
                vocab::HAS_DATA_SPECIFICATION,
                Some(pos),
                class::EMBEDDED_DATA_SPECIFICATION,
            )?;
            self.reference(&node, eds::DATA_SPECIFICATION, None, &spec.data_specification)?;

            let DataSpecificationContent::DataSpecificationIec61360(content) =
                &spec.data_specification_content;
            let c = self.node(&node, eds::CONTENT, None, class::DATA_SPECIFICATION_IEC61360)?;
            self.lang_strings(
                &c,
                iec61360::PREFERRED_NAME,
                class::LANG_STRING_PREFERRED_NAME_IEC61360,
                &content.preferred_name,
            )?;
            self.lang_strings(
                &c,
                iec61360::SHORT_NAME,
                class::LANG_STRING_SHORT_NAME_IEC61360,
                &content.short_name,
            )?;
            self.text(&c, iec61360::UNIT, content.unit.as_deref());
            if let Some(unit_id) = &content.unit_id {
                self.reference(&c, iec61360::UNIT_ID, None, unit_id)?;
            }
            self.text(&c, iec61360::SOURCE_OF_DEFINITION, content.source_of_definition.as_deref());
            self.text(&c, iec61360::SYMBOL, content.symbol.as_deref());
            self.enumeration(&c, iec61360::DATA_TYPE, content.data_type);
            self.lang_strings(
                &c,
                iec61360::DEFINITION,
                class::LANG_STRING_DEFINITION_IEC61360,
                &content.definition,
            )?;
            self.text(&c, iec61360::VALUE_FORMAT, content.value_format.as_deref());
            self.text(&c, iec61360::VALUE, content.value.as_deref());
        }
        Ok(())
    }

    fn asset_information(&mut self, parent: &Iri, info: &AssetInformation) -> MapResult<()> {
        let node = self.node(
            parent,
            shell::ASSET_INFORMATION,
            None,
            class::ASSET_INFORMATION,
        )?;
        self.enumeration(&node, asset_information::ASSET_KIND, Some(info.asset_kind));
        self.text(
            &node,
            asset_information::GLOBAL_ASSET_ID,
            info.global_asset_id.as_deref(),
        );
        self.specific_asset_ids(
            &node,
            asset_information::SPECIFIC_ASSET_IDS,
            &info.specific_asset_ids,
        )?;
        self.text(&node, asset_information::ASSET_TYPE, info.asset_type.as_deref());
        if let Some(thumbnail) = &info.default_thumbnail {
            let t = self.node(
                &node,
                asset_information::DEFAULT_THUMBNAIL,
                None,
                class::RESOURCE,
            )?;
            self.text(&t, resource::PATH, Some(&thumbnail.path));
            self.text(&t, resource::CONTENT_TYPE, thumbnail.content_type.as_deref());
        }
        Ok(())
    }

    pub(super) fn specific_asset_ids(
        &mut self,
        parent: &Iri,
        predicate: &str,
        ids: &[SpecificAssetId],
    ) -> MapResult<()> {
        for (pos, id) in ids.iter().enumerate() {
            let node = self.node(parent, predicate, Some(pos), class::SPECIFIC_ASSET_ID)?;
            self.semantics(&node, id.semantic_id.as_ref(), &id.supplemental_semantic_ids)?;
            self.text(&node, specific_asset_id::NAME, Some(&id.name));
            self.text(&node, specific_asset_id::VALUE, Some(&id.value));
            if let Some(external) = &id.external_subject_id {
                self.reference(&node, specific_asset_id::EXTERNAL_SUBJECT_ID, None, external)?;
            }
        }
        Ok(())
    }
}
