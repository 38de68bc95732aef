//! Class constant renderer.

use crate::docblock;
use crate::model::ConstantDescriptor;
use crate::render::{directive_block, field, Element};

pub struct ConstantElement<'a> {
    constant: &'a ConstantDescriptor,
}

impl<'a> ConstantElement<'a> {
    pub fn new(constant: &'a ConstantDescriptor) -> Self {
        Self { constant }
    }
}

impl Element for ConstantElement<'_> {
    fn render(&self) -> String {
        let doc = docblock::parse_opt(self.constant.doc_comment.as_deref());

        let mut fields = Vec::new();
        if let Some(ref value) = self.constant.value {
            fields.push(field("value", value));
        }
        if let Some(deprecated) = doc.first("deprecated") {
            fields.push(field("deprecated", deprecated));
        }

        directive_block(
            format!(".. php:const:: {}", self.constant.name),
            &[doc.description, fields.join("\n")],
        )
    }
}
