use super::super::domain::Locale;
use super::content::ContentBank;
use crate::config::ContentConfig;
use lru::LruCache;
use std::fs::File;
use std::io::{self, BufReader};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

const EMBEDDED_BANKS: [(&str, &str); 2] = [
    ("en", include_str!("../../../content/en.json")),
    ("de", include_str!("../../../content/de.json")),
];

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("content bank for locale '{locale}' is malformed: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads content banks per locale and keeps the most recently used ones.
///
/// Banks are immutable once loaded and handed out as `Arc`s, so concurrent
/// readers never contend on anything but the cache bookkeeping.
pub struct ContentStore {
    directory: Option<PathBuf>,
    cache: Mutex<LruCache<Locale, Arc<ContentBank>>>,
}

impl ContentStore {
    pub fn new(directory: Option<PathBuf>, capacity: NonZeroUsize) -> Self {
        Self {
            directory,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.directory.clone(), config.cache_capacity)
    }

    /// Bank for `locale`, or `None` when none exists or it failed to load.
    pub fn bank(&self, locale: &Locale) -> Option<Arc<ContentBank>> {
        if let Some(bank) = self.lock().get(locale) {
            debug!(%locale, "content bank cache hit");
            return Some(Arc::clone(bank));
        }

        match self.load(locale) {
            Ok(Some(bank)) => {
                let bank = Arc::new(bank);
                self.lock().put(locale.clone(), Arc::clone(&bank));
                Some(bank)
            }
            Ok(None) => {
                debug!(%locale, "no content bank for locale");
                None
            }
            Err(err) => {
                warn!(%locale, error = %err, "content bank unavailable");
                None
            }
        }
    }

    /// Locales currently cached, most recently used first.
    pub fn cached_locales(&self) -> Vec<Locale> {
        self.lock().iter().map(|(locale, _)| locale.clone()).collect()
    }

    fn load(&self, locale: &Locale) -> Result<Option<ContentBank>, ContentError> {
        if let Some(directory) = &self.directory {
            let path = directory.join(format!("{}.json", locale.as_str()));
            if path.is_file() {
                return read_bank(&path, locale).map(Some);
            }
        }

        EMBEDDED_BANKS
            .iter()
            .find(|(tag, _)| *tag == locale.as_str())
            .map(|(_, raw)| {
                ContentBank::from_json_str(raw).map_err(|source| ContentError::Parse {
                    locale: locale.clone(),
                    source,
                })
            })
            .transpose()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<Locale, Arc<ContentBank>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_bank(path: &Path, locale: &Locale) -> Result<ContentBank, ContentError> {
    let file = File::open(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ContentBank::from_reader(BufReader::new(file)).map_err(|source| ContentError::Parse {
        locale: locale.clone(),
        source,
    })
}
