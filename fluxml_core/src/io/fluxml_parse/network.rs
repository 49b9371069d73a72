//! Parsing of the `reactionnetwork` element and everything below it
use roxmltree::Node;

use crate::document::network::{
    Annotation, MetabolitePools, Pool, PoolBuilder, RProduct, RProductBuilder, Reaction,
    ReactionBuilder, ReactionNetwork, Reduct, ReductBuilder, Variant, VariantBuilder,
};
use crate::document::types::Atoms;
use crate::io::fluxml_parse::attributes::{bool_attribute, children, element_text, InElement};
use crate::io::fluxml_parse::{required_child, FluxmlParseError, FluxmlParser};

impl FluxmlParser<'_> {
    pub(super) fn reaction_network(
        &mut self,
        node: Node,
    ) -> Result<ReactionNetwork, FluxmlParseError> {
        let pools_node = required_child(node, "metabolitepools")?;
        let metabolite_pools = self.metabolite_pools(pools_node)?;
        let mut reactions = Vec::new();
        for reaction_node in children(node, "reaction") {
            reactions.push(self.reaction(reaction_node)?);
        }
        ReactionNetwork::new(metabolite_pools, reactions).in_element(node)
    }

    fn metabolite_pools(&mut self, node: Node) -> Result<MetabolitePools, FluxmlParseError> {
        let mut pools = Vec::new();
        for pool_node in children(node, "pool") {
            pools.push(self.pool(pool_node)?);
        }
        MetabolitePools::new(pools).in_element(node)
    }

    fn pool(&mut self, node: Node) -> Result<Pool, FluxmlParseError> {
        let id = self.required_attribute(node, "id")?;
        log::trace!("Parsing pool {}", id);
        let atoms = match self.attribute::<i64>(node, "atoms")? {
            Some(atoms) => Atoms::checked("atoms", atoms).in_element(node)?,
            None => Atoms::default(),
        };
        let size = self.attribute_or(node, "size", 1.0)?;
        let cfg = self.attribute_or(node, "cfg", String::from("0"))?;
        PoolBuilder::default()
            .id(id)
            .atoms(atoms)
            .size(size)
            .cfg(cfg)
            .annotations(self.annotations(node)?)
            .build()
            .in_element(node)
    }

    fn annotations(&mut self, node: Node) -> Result<Vec<Annotation>, FluxmlParseError> {
        let mut annotations = Vec::new();
        for annotation in children(node, "annotation") {
            annotations.push(Annotation {
                name: self.required_attribute(annotation, "name")?,
                value: element_text(annotation).unwrap_or_default(),
            });
        }
        Ok(annotations)
    }

    fn reaction(&mut self, node: Node) -> Result<Reaction, FluxmlParseError> {
        let id = self.required_attribute(node, "id")?;
        log::trace!("Parsing reaction {}", id);
        let mut reducts = Vec::new();
        for reduct_node in children(node, "reduct") {
            reducts.push(self.reduct(reduct_node)?);
        }
        let mut rproducts = Vec::new();
        for rproduct_node in children(node, "rproduct") {
            rproducts.push(self.rproduct(rproduct_node)?);
        }
        ReactionBuilder::default()
            .id(id)
            .bidirectional(bool_attribute(node, "bidirectional", true))
            .annotations(self.annotations(node)?)
            .reducts(reducts)
            .rproducts(rproducts)
            .build()
            .in_element(node)
    }

    fn reduct(&mut self, node: Node) -> Result<Reduct, FluxmlParseError> {
        ReductBuilder::default()
            .pool_id(self.required_attribute(node, "id")?)
            .cfg(self.attribute::<String>(node, "cfg")?)
            .variants(self.variants(node)?)
            .build()
            .in_element(node)
    }

    fn rproduct(&mut self, node: Node) -> Result<RProduct, FluxmlParseError> {
        RProductBuilder::default()
            .pool_id(self.required_attribute(node, "id")?)
            .cfg(self.attribute::<String>(node, "cfg")?)
            .variants(self.variants(node)?)
            .build()
            .in_element(node)
    }

    fn variants(&mut self, node: Node) -> Result<Vec<Variant>, FluxmlParseError> {
        let mut variants = Vec::new();
        for variant_node in children(node, "variant") {
            let variant = VariantBuilder::default()
                .cfg(self.required_attribute(variant_node, "cfg")?)
                .ratio(self.attribute::<f64>(variant_node, "ratio")?)
                .build()
                .in_element(variant_node)?;
            variants.push(variant);
        }
        Ok(variants)
    }
}

#[cfg(test)]
mod tests {
    use crate::document::network::{annotation_value, PoolReference};
    use crate::parse_fluxml;
    use crate::FluxmlParseError;

    #[test]
    fn network_details() {
        let xml = r#"<fluxml><reactionnetwork>
            <metabolitepools>
              <pool id="Glc" atoms="6" size="2.5" cfg="C6">
                <annotation name="KEGGID">C00031</annotation>
              </pool>
              <pool id="G6P" atoms="6"/>
            </metabolitepools>
            <reaction id="upt" bidirectional="false">
              <annotation name="comment">uptake</annotation>
              <reduct id="Glc" cfg="abcdef"/>
              <rproduct id="G6P">
                <variant cfg="abcdef" ratio="0.7"/>
                <variant cfg="fedcba" ratio="0.3"/>
              </rproduct>
            </reaction>
            <reaction id="out"><reduct id="G6P" cfg="abcdef"/></reaction>
        </reactionnetwork></fluxml>"#;
        let doc = parse_fluxml(xml).unwrap().document;
        let network = &doc.reaction_network;

        let glc = network.pool("Glc").unwrap();
        assert_eq!(glc.size, 2.5);
        assert_eq!(glc.cfg, "C6");
        assert_eq!(annotation_value(&glc.annotations, "KEGGID"), Some("C00031"));

        let ids: Vec<&str> = network.reactions.keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["upt", "out"]);

        let upt = network.reaction("upt").unwrap();
        assert!(!upt.bidirectional);
        assert_eq!(annotation_value(&upt.annotations, "comment"), Some("uptake"));
        assert_eq!(upt.reducts[0].cfg.as_deref(), Some("abcdef"));
        let product = &upt.rproducts[0];
        assert!(product.cfg.is_none());
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.variants[1].ratio, Some(0.3));
        assert_eq!(product.effective_cfg(), Some("abcdef"));

        // A sink without products is fine
        assert!(network.reaction("out").unwrap().rproducts.is_empty());
    }

    #[test]
    fn variant_without_cfg() {
        let xml = r#"<fluxml><reactionnetwork>
            <metabolitepools><pool id="A"/><pool id="B"/></metabolitepools>
            <reaction id="v1"><reduct id="A"><variant ratio="1"/></reduct></reaction>
        </reactionnetwork></fluxml>"#;
        assert!(matches!(
            parse_fluxml(xml).unwrap_err(),
            FluxmlParseError::MissingAttribute {
                attribute: "cfg",
                ..
            }
        ));
    }

    #[test]
    fn duplicate_pool_ids() {
        let xml = r#"<fluxml><reactionnetwork>
            <metabolitepools><pool id="A"/><pool id="A"/></metabolitepools>
            <reaction id="v1"/>
        </reactionnetwork></fluxml>"#;
        match parse_fluxml(xml).unwrap_err() {
            FluxmlParseError::InvalidModel { element, .. } => {
                assert_eq!(element, "metabolitepools")
            }
            err => panic!("Incorrect error {:?}", err),
        }
    }

    #[test]
    fn network_needs_reactions_and_pools() {
        let no_reactions = r#"<fluxml><reactionnetwork>
            <metabolitepools><pool id="A"/><pool id="B"/></metabolitepools>
        </reactionnetwork></fluxml>"#;
        assert!(matches!(
            parse_fluxml(no_reactions).unwrap_err(),
            FluxmlParseError::InvalidModel { .. }
        ));
        let no_pools = r#"<fluxml><reactionnetwork><reaction id="v1"/></reactionnetwork></fluxml>"#;
        assert!(matches!(
            parse_fluxml(no_pools).unwrap_err(),
            FluxmlParseError::MissingElement {
                element: "metabolitepools",
                ..
            }
        ));
    }

    #[test]
    fn negative_pool_size() {
        let xml = r#"<fluxml><reactionnetwork>
            <metabolitepools><pool id="A" size="-2"/><pool id="B"/></metabolitepools>
            <reaction id="v1"/>
        </reactionnetwork></fluxml>"#;
        assert!(matches!(
            parse_fluxml(xml).unwrap_err(),
            FluxmlParseError::InvalidModel { .. }
        ));
    }
}
