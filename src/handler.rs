/// Object passed to [`EventHandler::on_removed`]
#[derive(Clone, Debug)]
pub enum Deleted<K> {
    /// Deletion was observed directly
    Object(K),
    /// Object disappeared while watch was not looking, e.g. during relist
    ///
    /// Only its key is known.
    FinalStateUnknown { key: String },
}

/// Receives object lifecycle events from watch
///
/// Called serially from single background task. There is no way to report
/// failure back, so implementations deal with bad objects themselves.
pub trait EventHandler<K>: Send + Sync {
    /// Object was added or updated
    fn on_observed(&self, obj: &K);
    /// Object was deleted
    fn on_removed(&self, obj: &Deleted<K>);
    /// Initial listing was fully delivered
    fn on_synced(&self) {}
}
