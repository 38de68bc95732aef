//! Reflection provider backed by JSON dumps from an external PHP exporter.
//!
//! A dump is either an array of class objects or `{ "classes": [...] }`.

use crate::model::{strip_leading_separator, ClassDescriptor};
use crate::reflection::{ReflectionError, ReflectionProvider};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum Dump {
    List(Vec<ClassDescriptor>),
    Wrapped { classes: Vec<ClassDescriptor> },
}

impl Dump {
    fn into_classes(self) -> Vec<ClassDescriptor> {
        match self {
            Dump::List(classes) | Dump::Wrapped { classes } => classes,
        }
    }
}

/// Classes keyed by fully-qualified name, in load order.
#[derive(Debug, Default)]
pub struct JsonReflection {
    classes: IndexMap<String, ClassDescriptor>,
}

impl JsonReflection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dump file and add its classes.
    pub fn load(&mut self, path: &Path) -> Result<usize, ReflectionError> {
        let content = fs::read_to_string(path).map_err(|source| ReflectionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_dump(&content, path)
    }

    /// Parse dump text; `origin` names the source in errors and logs.
    pub fn add_dump(&mut self, content: &str, origin: &Path) -> Result<usize, ReflectionError> {
        let dump: Dump = serde_json::from_str(content).map_err(|source| ReflectionError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        let classes = dump.into_classes();
        let count = classes.len();
        for mut class in classes {
            class.normalize();
            if class.name.is_empty() {
                return Err(ReflectionError::MissingName(origin.to_path_buf()));
            }
            if self.classes.contains_key(&class.name) {
                warn!(class = %class.name, dump = %origin.display(), "class redefined, later definition wins");
            }
            self.classes.insert(class.name.clone(), class);
        }
        debug!(dump = %origin.display(), count, "loaded reflection dump");
        Ok(count)
    }

    pub fn from_json(content: &str) -> Result<Self, ReflectionError> {
        let mut reflection = Self::new();
        reflection.add_dump(content, Path::new("<stdin>"))?;
        Ok(reflection)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ReflectionProvider for JsonReflection {
    fn class_names(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    fn get_class(&self, name: &str) -> Result<&ClassDescriptor, ReflectionError> {
        let name = strip_leading_separator(name);
        self.classes
            .get(name)
            .ok_or_else(|| ReflectionError::NotFound(name.to_string()))
    }
}
