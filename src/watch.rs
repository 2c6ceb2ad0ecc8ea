use std::{fmt::Debug, future::Future, marker::PhantomData, sync::Arc};

use futures::StreamExt;
use kube::{
    runtime::{watcher, WatchStreamExt},
    Api, Resource,
};
use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;

use crate::{
    handler::{Deleted, EventHandler},
    kubemodel::meta_namespace_key,
};

/// Feeds watch events for one kind into [`EventHandler`]
pub struct Informer<K> {
    api: Api<K>,
    config: watcher::Config,
}

impl<K> Informer<K>
where
    K: Resource + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
{
    pub fn new(api: Api<K>) -> Self {
        Self::with_config(api, watcher::Config::default())
    }

    pub fn with_config(api: Api<K>, config: watcher::Config) -> Self {
        Self { api, config }
    }

    /// Deliver events until `shutdown` resolves
    ///
    /// Watch failures are logged and retried with backoff, they never reach handler.
    pub async fn run<H, S>(self, handler: Arc<H>, shutdown: S)
    where
        H: EventHandler<K> + ?Sized,
        S: Future<Output = ()> + Send,
    {
        let mut stream = watcher(self.api, self.config).default_backoff().boxed();
        let mut delivery = Delivery::new(handler);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Shutdown requested, stopping watch");
                    break;
                }
                event = stream.next() => match event {
                    Some(Ok(event)) => delivery.dispatch(event),
                    Some(Err(e)) => log::warn!("Watch failed, retrying: {}", e),
                    None => {
                        log::warn!("Watch stream ended");
                        break;
                    }
                },
            }
        }
    }
}

/// Translates watcher events into handler calls
///
/// Remembers keys of delivered objects, so objects which vanished between watch
/// restarts can be reported as [`Deleted::FinalStateUnknown`]. Object bodies are
/// not kept, handlers only need the key.
pub(crate) struct Delivery<K, H: ?Sized> {
    handler: Arc<H>,
    store: FxHashSet<String>,
    /// Keys seen since last relist started
    relist: Option<FxHashSet<String>>,
    _kind: PhantomData<fn(K)>,
}

impl<K, H> Delivery<K, H>
where
    K: Resource,
    H: EventHandler<K> + ?Sized,
{
    pub(crate) fn new(handler: Arc<H>) -> Self {
        Self {
            handler,
            store: FxHashSet::default(),
            relist: None,
            _kind: PhantomData,
        }
    }

    fn key(obj: &K) -> Option<String> {
        meta_namespace_key(obj).ok().map(|key| key.to_string())
    }

    pub(crate) fn dispatch(&mut self, event: watcher::Event<K>) {
        match event {
            watcher::Event::Apply(obj) => {
                self.handler.on_observed(&obj);
                if let Some(key) = Self::key(&obj) {
                    self.store.insert(key);
                }
            }
            watcher::Event::Delete(obj) => {
                if let Some(key) = Self::key(&obj) {
                    self.store.remove(&key);
                }
                self.handler.on_removed(&Deleted::Object(obj));
            }
            watcher::Event::Init => {
                log::debug!("Relisting");
                self.relist = Some(FxHashSet::default());
            }
            watcher::Event::InitApply(obj) => {
                self.handler.on_observed(&obj);
                if let Some(key) = Self::key(&obj) {
                    if let Some(relist) = &mut self.relist {
                        relist.insert(key.clone());
                    }
                    self.store.insert(key);
                }
            }
            watcher::Event::InitDone => {
                if let Some(relist) = self.relist.take() {
                    let gone: Vec<String> = self.store.difference(&relist).cloned().collect();
                    for key in gone {
                        self.store.remove(&key);
                        self.handler.on_removed(&Deleted::FinalStateUnknown { key });
                    }
                }
                self.handler.on_synced();
            }
        }
    }
}
