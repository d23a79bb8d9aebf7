//! Per-user reply language preferences
//!
//! Commands only see the `LanguageStore` trait. The in-memory store is the
//! only backend today; preferences are lost on restart.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use banwatch_types::Language;
use tokio::sync::RwLock;

pub trait LanguageStore: Send + Sync + 'static {
    /// The user's language, `Language::default()` if never set.
    fn get(&self, user_id: u64) -> impl Future<Output = Language> + Send;

    fn set(&self, user_id: u64, lang: Language) -> impl Future<Output = ()> + Send;
}

#[derive(Clone, Default)]
pub struct InMemoryLanguageStore {
    languages: Arc<RwLock<HashMap<u64, Language>>>,
}

impl InMemoryLanguageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LanguageStore for InMemoryLanguageStore {
    async fn get(&self, user_id: u64) -> Language {
        self.languages
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    async fn set(&self, user_id: u64, lang: Language) {
        self.languages.write().await.insert(user_id, lang);
    }
}
