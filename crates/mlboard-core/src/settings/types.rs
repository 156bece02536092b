use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::settings::errors::SettingsError;
use crate::settings::store::KeyValueStore;

const PAGE_ID_KEY: &str = "pageId";
const PAGE_SIZE_KEY: &str = "pageSize";
const QUERY_STRING_KEY: &str = "queryString";

/// Values used when the store has nothing (usable) for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardDefaults {
    pub page_id: u64,
    pub page_size: u64,
    pub query_string: String,
}

impl Default for DashboardDefaults {
    fn default() -> Self {
        Self {
            page_id: 1,
            page_size: 10,
            query_string: String::new(),
        }
    }
}

/// Dashboard paging and query preferences.
pub struct DashboardSettings<S> {
    store: S,
    defaults: DashboardDefaults,
}

impl<S: KeyValueStore> DashboardSettings<S> {
    pub fn new(store: S) -> Self {
        Self::with_defaults(store, DashboardDefaults::default())
    }

    pub fn with_defaults(store: S, defaults: DashboardDefaults) -> Self {
        Self { store, defaults }
    }

    pub fn page_id(&self) -> u64 {
        self.read(PAGE_ID_KEY, self.defaults.page_id)
    }

    pub fn set_page_id(&mut self, page_id: u64) -> Result<(), SettingsError> {
        self.write(PAGE_ID_KEY, &page_id)
    }

    pub fn page_size(&self) -> u64 {
        self.read(PAGE_SIZE_KEY, self.defaults.page_size)
    }

    pub fn set_page_size(&mut self, page_size: u64) -> Result<(), SettingsError> {
        self.write(PAGE_SIZE_KEY, &page_size)
    }

    pub fn query_string(&self) -> String {
        self.read(QUERY_STRING_KEY, self.defaults.query_string.clone())
    }

    pub fn set_query_string(&mut self, query: &str) -> Result<(), SettingsError> {
        self.write(QUERY_STRING_KEY, query)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(value) = self.store.get(key) else {
            return default;
        };
        match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(
                    event = "core.settings.value_invalid",
                    key = key,
                    error = %e,
                    "Stored setting has the wrong type - using default"
                );
                default
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), SettingsError> {
        let value = serde_json::to_value(value).map_err(|e| SettingsError::EncodeFailed {
            key: key.to_string(),
            source: e,
        })?;
        self.store.set(key, value);
        Ok(())
    }
}
