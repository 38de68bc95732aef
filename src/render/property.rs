//! Property renderer.

use crate::docblock;
use crate::model::PropertyDescriptor;
use crate::render::{directive_block, field, Element};

pub struct PropertyElement<'a> {
    property: &'a PropertyDescriptor,
}

impl<'a> PropertyElement<'a> {
    pub fn new(property: &'a PropertyDescriptor) -> Self {
        Self { property }
    }
}

impl Element for PropertyElement<'_> {
    fn render(&self) -> String {
        let p = self.property;
        let doc = docblock::parse_opt(p.doc_comment.as_deref());

        // `@var Type [$name] [description]`
        let declared = doc
            .first("var")
            .map(|body| docblock::split_type(body).0)
            .filter(|ty| !ty.is_empty());
        let ty = declared.or(p.type_hint.as_deref());

        let mut fields = Vec::new();
        if let Some(ty) = ty {
            fields.push(field("type", ty));
        }
        if let Some(ref default) = p.default {
            fields.push(field("default", default));
        }
        if p.is_static {
            fields.push(field("static", ""));
        }
        if let Some(deprecated) = doc.first("deprecated") {
            fields.push(field("deprecated", deprecated));
        }

        directive_block(
            format!(".. php:attr:: {}", p.name.trim_start_matches('$')),
            &[doc.description, fields.join("\n")],
        )
    }
}
