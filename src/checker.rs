use std::sync::Arc;

/// Checks for presence of named object in namespace
///
/// Answer is a routing hint, not a guarantee: implementations never fail and
/// never block on network, degrading to best current knowledge instead.
pub trait ExistenceChecker: Send + Sync {
    fn exists(&self, namespace: &str, name: &str) -> bool;
}

impl<T: ExistenceChecker + ?Sized> ExistenceChecker for Arc<T> {
    fn exists(&self, namespace: &str, name: &str) -> bool {
        (**self).exists(namespace, name)
    }
}

impl<T: ExistenceChecker + ?Sized> ExistenceChecker for Box<T> {
    fn exists(&self, namespace: &str, name: &str) -> bool {
        (**self).exists(namespace, name)
    }
}

/// Used when existence checking is disabled
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysExists;

impl ExistenceChecker for AlwaysExists {
    fn exists(&self, _namespace: &str, _name: &str) -> bool {
        true
    }
}
