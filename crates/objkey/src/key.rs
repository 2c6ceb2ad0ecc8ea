use crate::{Error, Result};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Separates namespace from name in rendered key, can't occur in either field
pub const SEPARATOR: char = '/';

/// Identifies object in cluster by its namespace and name
///
/// Rendered as `namespace/name`, or just `name` for objects without namespace.
/// Every valid pair renders to a distinct string, and rendered string parses back
/// to the same pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    namespace: Option<String>,
    name: String,
}

fn check_field(field: &'static str, value: &str) -> Result<()> {
    if value.contains(SEPARATOR) {
        return Err(Error::ContainsSeparator {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

impl ObjectKey {
    /// Build key from object metadata fields
    pub fn new(namespace: Option<&str>, name: Option<&str>) -> Result<Self> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(Error::MissingName),
        };
        check_field("name", name)?;
        let namespace = namespace.filter(|ns| !ns.is_empty());
        if let Some(namespace) = namespace {
            check_field("namespace", namespace)?;
        }
        Ok(Self {
            namespace: namespace.map(ToOwned::to_owned),
            name: name.to_owned(),
        })
    }

    /// Build key for lookup by (namespace, name) pair
    pub fn namespaced(namespace: &str, name: &str) -> Result<Self> {
        Self::new(Some(namespace), Some(name))
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            write!(f, "{}{}", ns, SEPARATOR)?;
        }
        write!(f, "{}", self.name)
    }
}

impl FromStr for ObjectKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_string() {
        assert_eq!(
            ObjectKey::namespaced("ns1", "topicA").unwrap().to_string(),
            "ns1/topicA"
        );
        assert_eq!(
            ObjectKey::new(None, Some("topicA")).unwrap().to_string(),
            "topicA"
        );
        // empty namespace means no namespace
        assert_eq!(
            ObjectKey::namespaced("", "topicA").unwrap().to_string(),
            "topicA"
        );
    }

    #[test]
    fn roundtrip() {
        let key = ObjectKey::namespaced("riff-system", "replies").unwrap();
        assert_eq!(key.to_string().parse::<ObjectKey>().unwrap(), key);
    }

    #[test]
    fn no_collisions() {
        // "a/b" + "c" and "a" + "b/c" would render the same, so neither is a valid key
        assert_eq!(
            ObjectKey::namespaced("a/b", "c"),
            Err(Error::ContainsSeparator {
                field: "namespace",
                value: "a/b".to_owned()
            })
        );
        assert_eq!(
            ObjectKey::namespaced("a", "b/c"),
            Err(Error::ContainsSeparator {
                field: "name",
                value: "b/c".to_owned()
            })
        );
    }

    #[test]
    fn missing_name() {
        assert_eq!(ObjectKey::new(Some("ns1"), None), Err(Error::MissingName));
        assert_eq!(ObjectKey::namespaced("ns1", ""), Err(Error::MissingName));
    }
}
