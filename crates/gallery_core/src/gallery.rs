//! Gallery widget instance

use crate::{
    FeedFetcher, GalleryConfig, GalleryError, GalleryState, GalleryStore, ImageSource, Intent,
    Result, SubscriptionId,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One embedded gallery.
///
/// Wires the image source to the view-state store and owns every resource
/// that must stop when the widget goes away: the in-flight fetch task and
/// all listener subscriptions. Listeners run with the store locked and must
/// not call back into the gallery.
pub struct Gallery {
    source: ImageSource,
    store: Arc<Mutex<GalleryStore>>,
    load_task: Option<JoinHandle<()>>,
    destroyed: bool,
}

impl Gallery {
    pub fn new(config: GalleryConfig, fetcher: Arc<dyn FeedFetcher>) -> Self {
        let store = Arc::new(Mutex::new(GalleryStore::new(&config)));
        let source = ImageSource::new(config.feed, fetcher);

        Self {
            source,
            store,
            load_task: None,
            destroyed: false,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> GalleryState {
        self.store.lock().state().clone()
    }

    pub fn subscribe<F>(&self, listener: F) -> Result<SubscriptionId>
    where
        F: FnMut(&GalleryState) + Send + 'static,
    {
        self.store.lock().subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.lock().unsubscribe(id)
    }

    pub fn dispatch(&self, intent: Intent) -> Result<()> {
        self.store.lock().dispatch(intent)
    }

    /// Start loading images.
    ///
    /// Inline feeds are applied before this returns. Remote feeds are fetched
    /// on a task of the current tokio runtime.
    pub fn activate(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(GalleryError::Destroyed);
        }

        self.abort_load();
        let ticket = self.store.lock().begin_load()?;

        if let Some(images) = self.source.immediate() {
            self.store.lock().complete_load(ticket, Ok(images))?;
            return Ok(());
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| GalleryError::Runtime(e.to_string()))?;
        let source = self.source.clone();
        let store = Arc::clone(&self.store);

        // An aborted task can still be past its last await; the ticket keeps
        // its result from overwriting a newer load.
        self.load_task = Some(runtime.spawn(async move {
            let outcome = source.load().await;
            if let Err(e) = store.lock().complete_load(ticket, outcome) {
                tracing::debug!("Load result discarded: {}", e);
            }
        }));

        Ok(())
    }

    /// Fetch the feed again, replacing the source images
    pub fn reload(&mut self) -> Result<()> {
        tracing::info!("Reloading gallery feed");
        self.activate()
    }

    pub fn is_loading(&self) -> bool {
        self.load_task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Wait for the current load, if any, to finish
    pub async fn wait_for_load(&mut self) -> Result<()> {
        match self.load_task.take() {
            Some(task) => task.await.map_err(|e| GalleryError::Runtime(e.to_string())),
            None => Ok(()),
        }
    }

    /// Stop the fetch and cancel every subscription. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.abort_load();
        let cancelled = self.store.lock().teardown();
        tracing::info!("Gallery destroyed ({} subscriptions cancelled)", cancelled);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn abort_load(&mut self) {
        if let Some(task) = self.load_task.take() {
            if !task.is_finished() {
                tracing::debug!("Aborting in-flight feed fetch");
            }
            task.abort();
        }
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::ScriptedFetcher;
    use crate::{Feed, Image, LoadState};

    fn numbered(n: usize) -> Vec<Image> {
        (1..=n)
            .map(|i| Image::new(format!("img{}", i), format!("u{}", i), "2020-01-01"))
            .collect()
    }

    fn remote_config() -> GalleryConfig {
        GalleryConfig {
            feed: Feed::Url("https://example.com/feed.json".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_inline_feed_loads_synchronously() {
        let config = GalleryConfig {
            feed: Feed::Inline(numbered(12)),
            ..Default::default()
        };
        let mut gallery = Gallery::new(config, ScriptedFetcher::new());
        gallery.activate().unwrap();

        let state = gallery.state();
        assert_eq!(state.load, LoadState::Loaded);
        let view = state.view.unwrap();
        assert_eq!(view.available_count, 12);
        assert_eq!(view.visible.len(), 10);
    }

    #[test]
    fn test_remote_feed_needs_runtime() {
        let mut gallery = Gallery::new(remote_config(), ScriptedFetcher::new());
        assert!(matches!(gallery.activate(), Err(GalleryError::Runtime(_))));
    }

    #[tokio::test]
    async fn test_remote_feed_loads() {
        let fetcher = ScriptedFetcher::new();
        fetcher.push_ok(numbered(7));
        let mut gallery = Gallery::new(remote_config(), fetcher.clone());

        gallery.activate().unwrap();
        assert!(gallery.state().view.is_none());
        gallery.wait_for_load().await.unwrap();

        let state = gallery.state();
        assert_eq!(state.load, LoadState::Loaded);
        assert_eq!(state.view.unwrap().available_count, 7);
        assert_eq!(fetcher.calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_is_published() {
        let fetcher = ScriptedFetcher::new();
        fetcher.push_err("HTTP status: 503 Service Unavailable");
        let mut gallery = Gallery::new(remote_config(), fetcher.clone());

        let failures = Arc::new(Mutex::new(Vec::new()));
        let sink = failures.clone();
        gallery
            .subscribe(move |state| {
                if let LoadState::Failed(msg) = &state.load {
                    sink.lock().push(msg.clone());
                }
            })
            .unwrap();

        gallery.activate().unwrap();
        gallery.wait_for_load().await.unwrap();

        assert_eq!(failures.lock().len(), 1);
        assert!(gallery.state().view.is_none());
        // No retry
        assert_eq!(fetcher.calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_reload_keeps_deletions() {
        let fetcher = ScriptedFetcher::new();
        fetcher.push_ok(numbered(5));
        fetcher.push_ok(numbered(6));
        let mut gallery = Gallery::new(remote_config(), fetcher.clone());

        gallery.activate().unwrap();
        gallery.wait_for_load().await.unwrap();
        gallery.dispatch(Intent::ImageDeleted(numbered(1).remove(0))).unwrap();

        gallery.reload().unwrap();
        gallery.wait_for_load().await.unwrap();

        let view = gallery.state().view.unwrap();
        assert_eq!(view.available_count, 5);
        assert!(view.sorted.iter().all(|i| i.url != "u1"));
    }

    #[tokio::test]
    async fn test_reload_supersedes_pending_fetch() {
        let fetcher = ScriptedFetcher::new();
        fetcher.push_ok(numbered(4));
        fetcher.push_ok(numbered(9));
        let mut gallery = Gallery::new(remote_config(), fetcher.clone());

        gallery.activate().unwrap();
        gallery.reload().unwrap();
        gallery.wait_for_load().await.unwrap();

        let state = gallery.state();
        assert_eq!(state.load, LoadState::Loaded);
        assert_eq!(state.view.unwrap().available_count, 4);
        assert_eq!(fetcher.calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_destroy_stops_everything() {
        let fetcher = ScriptedFetcher::new();
        fetcher.push_ok(numbered(3));
        let mut gallery = Gallery::new(remote_config(), fetcher);

        let calls = Arc::new(Mutex::new(0usize));
        let counter = calls.clone();
        gallery.subscribe(move |_| *counter.lock() += 1).unwrap();

        gallery.activate().unwrap();
        gallery.destroy();
        tokio::task::yield_now().await;

        assert_eq!(*calls.lock(), 0);
        assert!(gallery.is_destroyed());
        assert!(!gallery.is_loading());
        assert!(matches!(
            gallery.dispatch(Intent::FilterChanged("img".into())),
            Err(GalleryError::Destroyed)
        ));
        assert!(matches!(gallery.activate(), Err(GalleryError::Destroyed)));
    }
}
