//images.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use tracing::{debug, info, warn};

use crate::error::{Error, FetchError, Result};

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Cache file names are the URL-safe encoding of the URL cut to this many
/// characters. Two long URLs sharing an 80 character encoded prefix collide.
pub const CACHE_KEY_LEN: usize = 80;

pub trait Fetch {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Anything that can turn an image reference into zero or one encoded images.
pub trait ImageSource {
    fn images(&mut self, reference: &str) -> Result<Vec<String>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub local: usize,
    pub cache_hits: usize,
    pub downloads: usize,
    pub failures: usize,
}

pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

pub fn cache_key(url: &str) -> String {
    let mut key = URL_SAFE.encode(url.as_bytes());
    key.truncate(CACHE_KEY_LEN);
    key
}

fn encode(bytes: &[u8]) -> Vec<String> {
    if bytes.is_empty() {
        Vec::new()
    } else {
        vec![STANDARD.encode(bytes)]
    }
}

fn preview(url: &str) -> String {
    url.chars().take(CACHE_KEY_LEN).collect()
}

/// Resolves bare file names against `local_dir` and remote URLs through a
/// write-once cache in `cache_dir`.
pub struct ImageResolver<F> {
    local_dir: PathBuf,
    cache_dir: PathBuf,
    fetcher: F,
    stats: ResolverStats,
}

impl<F: Fetch> ImageResolver<F> {
    pub fn new(local_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>, fetcher: F) -> Self {
        ImageResolver {
            local_dir: local_dir.into(),
            cache_dir: cache_dir.into(),
            fetcher,
            stats: ResolverStats::default(),
        }
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(cache_key(url))
    }

    pub fn resolve(&mut self, reference: &str) -> Result<Vec<String>> {
        if is_remote(reference) {
            self.resolve_remote(reference)
        } else {
            self.resolve_local(reference)
        }
    }

    fn resolve_local(&mut self, filename: &str) -> Result<Vec<String>> {
        let path = self.local_dir.join(filename);
        let bytes = fs::read(&path).map_err(|source| Error::LocalImage { path, source })?;
        self.stats.local += 1;
        Ok(encode(&bytes))
    }

    fn resolve_remote(&mut self, url: &str) -> Result<Vec<String>> {
        ensure_dir(&self.cache_dir)?;
        let cache_path = self.cache_path(url);

        if cache_path.exists() {
            let bytes = fs::read(&cache_path).map_err(|source| Error::Cache {
                path: cache_path.clone(),
                source,
            })?;
            debug!(path = ?cache_path, "image cache hit");
            self.stats.cache_hits += 1;
            return Ok(encode(&bytes));
        }

        info!(url = %preview(url), "downloading image");
        let fetched = self.fetcher.fetch(url).and_then(|bytes| {
            fs::write(&cache_path, &bytes)?;
            Ok(bytes)
        });

        match fetched {
            Ok(bytes) => {
                self.stats.downloads += 1;
                Ok(encode(&bytes))
            }
            Err(e) => {
                self.stats.failures += 1;
                warn!(url, error = %e, "failed to download image");
                Ok(Vec::new())
            }
        }
    }
}

impl<F: Fetch> ImageSource for ImageResolver<F> {
    fn images(&mut self, reference: &str) -> Result<Vec<String>> {
        self.resolve(reference)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Cache {
        path: dir.to_path_buf(),
        source,
    })
}
