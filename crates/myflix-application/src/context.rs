//! The application context.
//!
//! One `AppContext` is created at startup and handed to whatever needs the
//! session, the personalization state or the catalog. Nothing here is global,
//! so tests and multiple instances can each hold their own.

use myflix_core::cache::{Clock, SystemClock};
use myflix_core::catalog::MetadataTransport;
use myflix_core::config::MyflixConfig;
use myflix_core::credential::Account;
use myflix_core::error::Result;
use myflix_core::session::{Session, SessionState, StoredApiKey};
use myflix_core::storage::SharedStore;
use myflix_infrastructure::{ConfigService, JsonFileStore, MyflixPaths};
use myflix_interaction::TmdbClient;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::catalog_service::CatalogService;
use crate::listing::{InfiniteFeed, SearchListing};
use crate::personalization::Personalization;

pub struct AppContext {
    config: MyflixConfig,
    store: SharedStore,
    session: SessionState,
    personalization: Personalization,
    catalog: CatalogService,
}

impl AppContext {
    /// Wires the context from explicit collaborators and restores any
    /// persisted session.
    ///
    /// # Arguments
    /// * `config` - Cache TTL, language, history limit and feed page limit
    /// * `store` - Backing key-value storage shared by every component
    /// * `transport` - Metadata source the catalog fetches through
    /// * `clock` - Time source for cache freshness
    ///
    /// # Returns
    /// A context whose personalization is loaded for the restored account.
    /// Fails only if loading that account's profiles fails.
    pub fn new(
        config: MyflixConfig,
        store: SharedStore,
        transport: Arc<dyn MetadataTransport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let session = SessionState::hydrate(store.clone());

        let mut personalization = Personalization::new(store.clone(), config.search_history_limit);
        personalization.load_account(session.session().active_account())?;

        let credentials = Arc::new(StoredApiKey::new(store.clone()));
        let catalog = CatalogService::new(transport, credentials, clock, &config);

        Ok(Self {
            config,
            store,
            session,
            personalization,
            catalog,
        })
    }

    /// Uses the HTTP transport and the system clock.
    pub fn with_http(config: MyflixConfig, store: SharedStore) -> Result<Self> {
        let transport = Arc::new(TmdbClient::from_config(&config));
        Self::new(config, store, transport, Arc::new(SystemClock))
    }

    /// Loads `config.toml` and opens the storage file from the platform
    /// directories.
    pub fn bootstrap() -> Result<Self> {
        tracing::info!("[Bootstrap] Loading configuration");
        let config = ConfigService::new()?.load()?;

        let storage_path = MyflixPaths::storage_file()?;
        tracing::info!("[Bootstrap] Opening storage at {}", storage_path.display());
        let store: SharedStore = Arc::new(JsonFileStore::open(storage_path));

        let context = Self::with_http(config, store)?;
        tracing::info!(
            authenticated = context.session.is_authenticated(),
            "[Bootstrap] Context ready"
        );
        Ok(context)
    }

    pub fn config(&self) -> &MyflixConfig {
        &self.config
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        self.session.session()
    }

    pub fn session_state(&self) -> &SessionState {
        &self.session
    }

    pub fn register(&self, account_id: &str, secret: &str) -> Result<Account> {
        self.session.register(account_id, secret)
    }

    /// Signs in and loads the account's profiles and collections.
    pub fn login(&mut self, account_id: &str, secret: &str, keep_login: bool) -> Result<Session> {
        let session = self.session.authenticate(account_id, secret, keep_login)?;
        self.personalization.load_account(session.active_account())?;
        Ok(session)
    }

    /// Signs out and drops every account-scoped value held in memory.
    pub fn logout(&mut self) {
        self.session.logout();
        if let Err(e) = self.personalization.load_account(None) {
            tracing::warn!("Failed to reset personalization on logout: {}", e);
        }
    }

    pub fn personalization(&self) -> &Personalization {
        &self.personalization
    }

    pub fn personalization_mut(&mut self) -> &mut Personalization {
        &mut self.personalization
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    /// A fresh feed bounded by `max_feed_pages`.
    pub fn infinite_feed(&self) -> InfiniteFeed {
        InfiniteFeed::new(self.config.max_feed_pages)
    }

    /// Runs a search: records `keyword` in the active profile's history and
    /// loads page 1 of `listing`'s discovery filters.
    pub async fn search(
        &mut self,
        listing: &mut SearchListing,
        keyword: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        listing.execute(keyword, self.personalization.search_history_mut())?;
        listing.refresh(&self.catalog, cancel).await
    }
}
