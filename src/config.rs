use clap::Args;
use objkey::ObjectKey;

use crate::{kubemodel::ResourceKind, Error, Result};

/// Which object kind to watch
#[derive(Args, Debug, Clone)]
pub struct ResourceOpts {
    /// API group of watched kind, empty for core group
    #[arg(long, env = "TOPICWATCH_GROUP", default_value = "projectriff.io")]
    pub group: String,
    #[arg(long = "api-version", env = "TOPICWATCH_VERSION", default_value = "v1alpha1")]
    pub version: String,
    #[arg(long, env = "TOPICWATCH_KIND", default_value = "Topic")]
    pub kind: String,
    /// Resource name used in API paths
    #[arg(long, env = "TOPICWATCH_PLURAL", default_value = "topics")]
    pub plural: String,
}

impl ResourceOpts {
    pub fn resource_kind(&self) -> Result<ResourceKind> {
        for (field, value) in [
            ("version", &self.version),
            ("kind", &self.kind),
            ("plural", &self.plural),
        ] {
            if value.is_empty() {
                return Err(Error::Config(format!("{} should not be empty", field)));
            }
        }
        Ok(ResourceKind {
            group: self.group.clone(),
            version: self.version.clone(),
            kind: self.kind.clone(),
            plural: self.plural.clone(),
        })
    }
}

/// How callers address objects
#[derive(Args, Debug, Clone)]
pub struct LookupOpts {
    /// Namespace used for objects referenced without one
    #[arg(long, env = "TOPICWATCH_DEFAULT_NAMESPACE", default_value = "default")]
    pub default_namespace: String,
    /// Treat every object as existing, without watching cluster
    #[arg(long)]
    pub disable_existence_check: bool,
}

impl LookupOpts {
    /// Split `namespace/name` or bare `name` reference into (namespace, name)
    pub fn resolve(&self, reference: &str) -> Result<(String, String)> {
        let key: ObjectKey = reference.parse()?;
        let namespace = key.namespace().unwrap_or(&self.default_namespace);
        Ok((namespace.to_owned(), key.name().to_owned()))
    }
}
