use std::fmt::{self, Display};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::{
    core::{ApiResource, GroupVersionKind},
    Resource,
};
use objkey::ObjectKey;

use crate::handler::Deleted;

/// Identifies watched object type in cluster
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceKind {
    /// Empty for core group
    pub group: String,
    pub version: String,
    pub kind: String,
    /// Used in API paths
    pub plural: String,
}

impl ResourceKind {
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk(&self.group, &self.version, &self.kind),
            &self.plural,
        )
    }
}

impl Default for ResourceKind {
    /// riff topic
    fn default() -> Self {
        Self {
            group: "projectriff.io".to_owned(),
            version: "v1alpha1".to_owned(),
            kind: "Topic".to_owned(),
            plural: "topics".to_owned(),
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.api_version(), self.kind)
    }
}

pub fn key_from_meta(meta: &ObjectMeta) -> objkey::Result<ObjectKey> {
    ObjectKey::new(meta.namespace.as_deref(), meta.name.as_deref())
}

/// Key of object, `namespace/name` or `name` for cluster-scoped objects
pub fn meta_namespace_key<K: Resource>(obj: &K) -> objkey::Result<ObjectKey> {
    key_from_meta(obj.meta())
}

/// Same as [`meta_namespace_key`], but also accepts tombstones
pub fn deletion_handling_key<K: Resource>(obj: &Deleted<K>) -> objkey::Result<ObjectKey> {
    match obj {
        Deleted::Object(obj) => meta_namespace_key(obj),
        Deleted::FinalStateUnknown { key } => key.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::DynamicObject;

    fn topic(ns: &str, name: &str) -> DynamicObject {
        DynamicObject::new(name, &ResourceKind::default().api_resource()).within(ns)
    }

    #[test]
    fn display() {
        assert_eq!(
            ResourceKind::default().to_string(),
            "projectriff.io/v1alpha1 Topic"
        );
        let cm = ResourceKind {
            group: String::new(),
            version: "v1".to_owned(),
            kind: "ConfigMap".to_owned(),
            plural: "configmaps".to_owned(),
        };
        assert_eq!(cm.to_string(), "v1 ConfigMap");
    }

    #[test]
    fn api_resource() {
        let ar = ResourceKind::default().api_resource();
        assert_eq!(ar.api_version, "projectriff.io/v1alpha1");
        assert_eq!(ar.plural, "topics");
        assert_eq!(ar.kind, "Topic");
    }

    #[test]
    fn keys() {
        let obj = topic("ns1", "topicA");
        assert_eq!(meta_namespace_key(&obj).unwrap().to_string(), "ns1/topicA");
        assert_eq!(
            deletion_handling_key(&Deleted::Object(obj)).unwrap().to_string(),
            "ns1/topicA"
        );
        let tombstone = Deleted::<DynamicObject>::FinalStateUnknown {
            key: "ns1/topicA".to_owned(),
        };
        assert_eq!(
            deletion_handling_key(&tombstone).unwrap().to_string(),
            "ns1/topicA"
        );
    }

    #[test]
    fn malformed() {
        let mut obj = topic("ns1", "topicA");
        obj.metadata.name = None;
        assert_eq!(
            meta_namespace_key(&obj),
            Err(objkey::Error::MissingName)
        );
        let tombstone = Deleted::<DynamicObject>::FinalStateUnknown {
            key: "a/b/c".to_owned(),
        };
        assert!(deletion_handling_key(&tombstone).is_err());
    }
}
