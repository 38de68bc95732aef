//! Class document — the page for one class, interface or trait.
//!
//! Layout:
//!
//! ```text
//! .. _App-User:
//!
//! ---------
//! App\\User
//! ---------
//!
//! .. php:namespace:: App
//!
//! **Inheritance Hierarchy:**
//! :ref:`App-Model` => :ref:`App-Base`
//!
//! .. php:class:: User
//!
//!     <description>
//!
//!     <constants, properties, methods>
//! ```

use crate::docblock;
use crate::model::ClassDescriptor;
use crate::render::{
    escape_name, indent, label, normalize_whitespace, reference, ConstantElement, Element,
    MethodElement, PropertyElement, FILE_EXTENSION, INDENT,
};
use std::path::PathBuf;

pub struct ClassDocument<'a> {
    class: &'a ClassDescriptor,
}

impl<'a> ClassDocument<'a> {
    pub fn new(class: &'a ClassDescriptor) -> Self {
        Self { class }
    }

    /// File name of the document, relative to the output directory.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.class.short_name, FILE_EXTENSION))
    }

    fn header(&self) -> String {
        let title = escape_name(&self.class.name);
        let rule = "-".repeat(title.chars().count());
        format!(
            ".. _{}:\n\n{}\n{}\n{}\n\n",
            label(&self.class.name),
            rule,
            title,
            rule
        )
    }

    /// Empty for classes in the global namespace: the php domain rejects a
    /// `.. php:namespace::` directive without an argument.
    fn namespace_line(&self) -> String {
        if self.class.namespace.is_empty() {
            return String::new();
        }
        format!(".. php:namespace:: {}\n\n", escape_name(&self.class.namespace))
    }

    /// Ancestors as one arrow-joined chain of references, nearest first.
    fn inheritance_tree(&self) -> String {
        if self.class.parents.is_empty() {
            return String::new();
        }
        let refs: Vec<String> = self.class.parents.iter().map(|p| reference(p)).collect();
        format!("**Inheritance Hierarchy:**\n{}\n\n", refs.join(" => "))
    }

    /// Constants, then properties, then methods, each in provider order.
    fn sub_elements(&self) -> Vec<Box<dyn Element + 'a>> {
        let c = self.class;
        let mut elements: Vec<Box<dyn Element + 'a>> = Vec::new();
        for constant in &c.constants {
            elements.push(Box::new(ConstantElement::new(constant)));
        }
        for property in &c.properties {
            elements.push(Box::new(PropertyElement::new(property)));
        }
        for method in &c.methods {
            elements.push(Box::new(MethodElement::new(method)));
        }
        elements
    }
}

impl Element for ClassDocument<'_> {
    fn render(&self) -> String {
        let doc = docblock::parse_opt(self.class.doc_comment.as_deref());

        let mut parts: Vec<String> = vec![
            self.header(),
            self.namespace_line(),
            self.inheritance_tree(),
            format!(
                ".. php:{}:: {}",
                self.class.kind.directive(),
                self.class.short_name
            ),
        ];

        if !doc.description.is_empty() {
            parts.push("\n\n".to_string());
            parts.push(indent(&doc.description, INDENT));
        }

        for element in self.sub_elements() {
            let fragment = element.render();
            if !fragment.is_empty() {
                parts.push("\n\n".to_string());
                parts.push(indent(&fragment, INDENT));
            }
        }

        parts.push("\n\n".to_string());

        normalize_whitespace(&parts.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassKind, ConstantDescriptor, MethodDescriptor, PropertyDescriptor};

    fn class(name: &str) -> ClassDescriptor {
        let mut c = ClassDescriptor {
            name: name.to_string(),
            ..Default::default()
        };
        c.normalize();
        c
    }

    fn constant(name: &str) -> ConstantDescriptor {
        ConstantDescriptor {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn method(name: &str, doc: Option<&str>) -> MethodDescriptor {
        MethodDescriptor {
            name: name.to_string(),
            doc_comment: doc.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn user_class_document() {
        let mut c = class("App\\User");
        c.constants.push(constant("ROLE_ADMIN"));
        c.methods
            .push(method("getName", Some("/**\n * Gets the name.\n */")));

        let expected = "\
.. _App-User:

---------
App\\\\User
---------

.. php:namespace:: App

.. php:class:: User

    .. php:const:: ROLE_ADMIN

    .. php:method:: getName()

        Gets the name.

";
        assert_eq!(ClassDocument::new(&c).render(), expected);
    }

    #[test]
    fn title_rule_matches_escaped_length() {
        let c = class("Foo\\Bar");
        let out = ClassDocument::new(&c).render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2], "--------");
        assert_eq!(lines[3], "Foo\\\\Bar");
        assert_eq!(lines[4], "--------");
        assert_eq!(lines[2].len(), lines[3].chars().count());
    }

    #[test]
    fn interface_with_ancestor() {
        let mut c = class("Shape");
        c.kind = ClassKind::Interface;
        c.parents = vec!["Drawable".to_string()];
        let out = ClassDocument::new(&c).render();
        assert!(out.contains("**Inheritance Hierarchy:**\n:ref:`Drawable`\n\n"));
        assert!(out.contains("\n.. php:interface:: Shape\n"));
        assert!(!out.contains("php:namespace"));
    }

    #[test]
    fn hierarchy_chain_uses_labels() {
        let mut c = class("App\\Admin");
        c.parents = vec!["App\\User".to_string(), "App\\Model".to_string()];
        let out = ClassDocument::new(&c).render();
        assert!(out.contains("\n:ref:`App-User` => :ref:`App-Model`\n"));
    }

    #[test]
    fn no_hierarchy_without_parents() {
        let c = class("App\\User");
        assert!(!ClassDocument::new(&c).render().contains("Inheritance Hierarchy"));
    }

    #[test]
    fn trait_directive() {
        let mut c = class("App\\Concerns\\HasName");
        c.kind = ClassKind::Trait;
        let out = ClassDocument::new(&c).render();
        assert!(out.contains(".. php:namespace:: App\\\\Concerns\n"));
        assert!(out.contains(".. php:trait:: HasName"));
    }

    #[test]
    fn empty_class_still_has_directive() {
        let c = class("Empty");
        assert_eq!(
            ClassDocument::new(&c).render(),
            ".. _Empty:\n\n-----\nEmpty\n-----\n\n.. php:class:: Empty\n\n"
        );
    }

    #[test]
    fn members_in_group_order() {
        let mut c = class("App\\Order");
        c.methods.push(method("zeta", None));
        c.methods.push(method("alpha", None));
        c.properties.push(PropertyDescriptor {
            name: "total".to_string(),
            ..Default::default()
        });
        c.constants.push(constant("B"));
        c.constants.push(constant("A"));
        let out = ClassDocument::new(&c).render();
        let pos = |needle: &str| out.find(needle).unwrap();
        assert!(pos("php:const:: B") < pos("php:const:: A"));
        assert!(pos("php:const:: A") < pos("php:attr:: total"));
        assert!(pos("php:attr:: total") < pos("php:method:: zeta()"));
        assert!(pos("php:method:: zeta()") < pos("php:method:: alpha()"));
    }

    #[test]
    fn no_whitespace_only_or_trailing_space_lines() {
        let mut c = class("App\\User");
        c.doc_comment = Some("/**\n * First paragraph.\n *\n * Second paragraph.   \n */".to_string());
        c.methods.push(method(
            "run",
            Some("/**\n * Runs.\n *\n * Twice.\n *\n * @return void\n */"),
        ));
        let out = ClassDocument::new(&c).render();
        for line in out.lines() {
            assert!(!line.ends_with(' ') && !line.ends_with('\t'), "{:?}", line);
        }
        assert!(out.contains("    First paragraph.\n\n    Second paragraph.\n"));
        assert!(out.contains("        Runs.\n\n        Twice.\n\n        :returns: void\n"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut c = class("App\\User");
        c.constants.push(constant("X"));
        let doc = ClassDocument::new(&c);
        assert_eq!(doc.render(), doc.render());
    }

    #[test]
    fn path_uses_short_name() {
        let c = class("App\\Models\\User");
        assert_eq!(ClassDocument::new(&c).path(), PathBuf::from("User.rst"));
    }
}
