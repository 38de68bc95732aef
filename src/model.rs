//! Reflection data model — what the provider hands to the renderers.
//!
//! Descriptors are deserialized from a reflection dump, normalized once on
//! load and read-only from then on. Member lists keep the dump's order.

use serde::Deserialize;

/// Namespace separator used in fully-qualified class names.
pub const NS_SEPARATOR: char = '\\';

/// Kind of class-like declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Trait,
}

impl ClassKind {
    /// Directive keyword in the php domain.
    pub fn directive(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Trait => "trait",
        }
    }
}

/// Member visibility, ordered from most to least visible.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// A reflected class, interface or trait.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassDescriptor {
    /// Fully-qualified name, e.g. `App\Models\User`. Identity of the class.
    pub name: String,
    pub short_name: String,
    pub namespace: String,
    /// Ancestor FQNs, nearest first.
    pub parents: Vec<String>,
    pub kind: ClassKind,
    pub doc_comment: Option<String>,
    pub constants: Vec<ConstantDescriptor>,
    pub properties: Vec<PropertyDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    /// Fill `short_name` and `namespace` from `name` when the dump left them out.
    ///
    /// A leading separator on any name (`\App\User`) is dropped.
    pub fn normalize(&mut self) {
        self.name = strip_leading_separator(&self.name).to_string();
        for parent in &mut self.parents {
            *parent = strip_leading_separator(parent).to_string();
        }
        let (namespace, short) = split_name(&self.name);
        if self.short_name.is_empty() {
            self.short_name = short.to_string();
        }
        if self.namespace.is_empty() {
            self.namespace = namespace.to_string();
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConstantDescriptor {
    pub name: String,
    /// Literal value as written in source, e.g. `'admin'` or `42`.
    pub value: Option<String>,
    pub doc_comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropertyDescriptor {
    pub name: String,
    pub visibility: Visibility,
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Native type declaration, if any.
    #[serde(rename = "type")]
    pub type_hint: Option<String>,
    pub default: Option<String>,
    pub doc_comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MethodDescriptor {
    pub name: String,
    pub visibility: Visibility,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: Option<String>,
    pub doc_comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParameterDescriptor {
    /// Name without the leading `$`.
    pub name: String,
    #[serde(rename = "type")]
    pub type_hint: Option<String>,
    pub default: Option<String>,
    pub by_reference: bool,
    pub variadic: bool,
}

/// Split `A\B\C` into (`A\B`, `C`). Global names get an empty namespace.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind(NS_SEPARATOR) {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => ("", name),
    }
}

pub fn strip_leading_separator(name: &str) -> &str {
    name.strip_prefix(NS_SEPARATOR).unwrap_or(name)
}
