//! Method renderer — directive with signature plus a field list built from
//! `@param`, `@return` and `@throws`, falling back to native type hints.

use crate::docblock::{self, ParsedDoc};
use crate::model::{MethodDescriptor, ParameterDescriptor};
use crate::render::{directive_block, field, Element};
use regex::Regex;
use std::sync::LazyLock;

// `[&][...]$name [description]`, after the type has been split off
static RE_PARAM_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&?(?:\.\.\.)?\$([A-Za-z_][A-Za-z0-9_]*)(?:\s+(.*))?$").unwrap()
});

pub struct MethodElement<'a> {
    method: &'a MethodDescriptor,
}

impl<'a> MethodElement<'a> {
    pub fn new(method: &'a MethodDescriptor) -> Self {
        Self { method }
    }

    fn directive(&self) -> String {
        let kind = if self.method.is_static {
            "staticmethod"
        } else {
            "method"
        };
        let params: Vec<String> = self.method.parameters.iter().map(signature_param).collect();
        format!(".. php:{}:: {}({})", kind, self.method.name, params.join(", "))
    }

    fn fields(&self, doc: &ParsedDoc) -> Vec<String> {
        let m = self.method;
        let mut fields = Vec::new();

        let tags: Vec<ParamTag> = doc.tag("param").iter().filter_map(|b| ParamTag::parse(b)).collect();
        for param in &m.parameters {
            let pname = param.name.trim_start_matches('$');
            let tag = tags.iter().find(|t| t.name == pname);
            let ty = tag.and_then(|t| t.ty).or(param.type_hint.as_deref());
            let name = match ty {
                Some(ty) => format!("param {} ${}", ty, pname),
                None => format!("param ${}", pname),
            };
            fields.push(field(&name, tag.map_or("", |t| t.description)));
        }

        if let Some(ret) = doc.first("return").filter(|r| !r.is_empty()) {
            fields.push(field("returns", ret));
        } else if let Some(ref ret) = m.return_type {
            fields.push(field("returns", ret));
        }

        for throws in doc.tag("throws") {
            fields.push(field("throws", throws));
        }
        if m.is_abstract {
            fields.push(field("abstract", ""));
        }
        if m.is_final {
            fields.push(field("final", ""));
        }
        if let Some(deprecated) = doc.first("deprecated") {
            fields.push(field("deprecated", deprecated));
        }
        fields
    }
}

impl Element for MethodElement<'_> {
    fn render(&self) -> String {
        let doc = docblock::parse_opt(self.method.doc_comment.as_deref());
        let fields = self.fields(&doc).join("\n");
        directive_block(self.directive(), &[doc.description, fields])
    }
}

/// A parsed `@param` body.
struct ParamTag<'a> {
    ty: Option<&'a str>,
    name: &'a str,
    description: &'a str,
}

impl<'a> ParamTag<'a> {
    fn parse(body: &'a str) -> Option<Self> {
        let (ty, rest) = docblock::split_type(body);
        let caps = RE_PARAM_VAR.captures(rest)?;
        Some(Self {
            ty: Some(ty).filter(|ty| !ty.is_empty()),
            name: caps.get(1)?.as_str(),
            description: caps.get(2).map_or("", |m| m.as_str().trim()),
        })
    }
}

/// `[type ][&][...]$name[ = default]`
fn signature_param(param: &ParameterDescriptor) -> String {
    let mut out = String::new();
    if let Some(ref ty) = param.type_hint {
        out.push_str(ty);
        out.push(' ');
    }
    if param.by_reference {
        out.push('&');
    }
    if param.variadic {
        out.push_str("...");
    }
    out.push('$');
    out.push_str(param.name.trim_start_matches('$'));
    if let Some(ref default) = param.default {
        out.push_str(" = ");
        out.push_str(default);
    }
    out
}
