use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    },
};

use kube::{core::DynamicObject, Api, Client, Resource};
use objkey::ObjectKey;
use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;
use tokio::sync::Notify;

use crate::{
    checker::ExistenceChecker,
    handler::{Deleted, EventHandler},
    kubemodel::{deletion_handling_key, meta_namespace_key, ResourceKind},
    watch::Informer,
    Result,
};

/// Set of objects currently known to exist, kept up to date by watch
///
/// Lookups are answered from memory only. Right after object is created or
/// deleted in cluster, answer may lag until corresponding event arrives.
#[derive(Debug, Default)]
pub struct ExistenceCache {
    /// Rendered [`ObjectKey`]s
    known: RwLock<FxHashSet<String>>,
    synced: AtomicBool,
    sync_notify: Notify,
}

impl ExistenceCache {
    /// Empty cache, not attached to any watch
    pub fn new() -> Self {
        Self::default()
    }

    /// Start mirroring objects of `api` cluster-wide
    ///
    /// Returns immediately, cache is filled in background until `shutdown` resolves.
    /// Must be called within tokio runtime.
    pub fn spawn<K, S>(api: Api<K>, shutdown: S) -> Arc<Self>
    where
        K: Resource + Clone + DeserializeOwned + std::fmt::Debug + Send + Sync + 'static,
        S: Future<Output = ()> + Send + 'static,
    {
        let cache = Arc::new(Self::new());
        let informer = Informer::new(api);
        tokio::spawn(informer.run(cache.clone(), shutdown));
        cache
    }

    /// Start mirroring all objects of given kind
    pub fn for_kind<S>(client: Client, kind: &ResourceKind, shutdown: S) -> Arc<Self>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        log::info!("Watching {} in all namespaces", kind);
        let api = Api::<DynamicObject>::all_with(client, &kind.api_resource());
        Self::spawn(api, shutdown)
    }

    /// Same as [`ExistenceCache::for_kind`], using client inferred from environment
    pub async fn try_default<S>(kind: &ResourceKind, shutdown: S) -> Result<Arc<Self>>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let client = Client::try_default().await?;
        Ok(Self::for_kind(client, kind, shutdown))
    }

    fn known(&self) -> RwLockReadGuard<'_, FxHashSet<String>> {
        self.known.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn known_mut(&self) -> RwLockWriteGuard<'_, FxHashSet<String>> {
        self.known.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn contains(&self, key: &ObjectKey) -> bool {
        let key = key.to_string();
        self.known().contains(&key)
    }

    /// Whether initial listing was delivered at least once
    pub fn has_synced(&self) -> bool {
        self.synced.load(Ordering::Acquire)
    }

    /// Wait until initial listing is delivered
    pub async fn wait_synced(&self) {
        loop {
            let notified = self.sync_notify.notified();
            if self.has_synced() {
                return;
            }
            notified.await;
        }
    }

    /// Number of known objects
    pub fn len(&self) -> usize {
        self.known().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Resource> EventHandler<K> for ExistenceCache {
    fn on_observed(&self, obj: &K) {
        let key = match meta_namespace_key(obj) {
            Ok(key) => key,
            Err(e) => {
                // Nothing to report the error to, and retrying won't fix the object
                log::warn!("Failed to get key of observed object: {}", e);
                return;
            }
        };
        let rendered = key.to_string();
        if self.known_mut().insert(rendered) {
            log::info!("New object has been added: {}", key);
        }
    }

    fn on_removed(&self, obj: &Deleted<K>) {
        let key = match deletion_handling_key(obj) {
            Ok(key) => key,
            Err(e) => {
                log::warn!("Failed to get key of removed object: {}", e);
                return;
            }
        };
        let rendered = key.to_string();
        if self.known_mut().remove(&rendered) {
            log::info!("Object was removed: {}", key);
        }
    }

    fn on_synced(&self) {
        if !self.synced.swap(true, Ordering::AcqRel) {
            log::info!("Initial listing done, {} objects known", self.len());
        }
        self.sync_notify.notify_waiters();
    }
}

impl ExistenceChecker for ExistenceCache {
    fn exists(&self, namespace: &str, name: &str) -> bool {
        match ObjectKey::namespaced(namespace, name) {
            Ok(key) => self.contains(&key),
            Err(e) => {
                log::debug!("Can't look up {:?} in {:?}: {}", name, namespace, e);
                false
            }
        }
    }
}
