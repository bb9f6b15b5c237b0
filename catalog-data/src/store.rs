use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::entries::{parse_catalog, CatalogEntry};
use crate::error::Result;

/// Parses each catalog dump once per process and hands out shared copies.
#[derive(Debug)]
pub struct CatalogStore {
    data_dir: PathBuf,
    cache: RwLock<HashMap<u32, Arc<Vec<CatalogEntry>>>>,
}

impl CatalogStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn path_for(&self, catalog_id: u32) -> PathBuf {
        self.data_dir.join(format!("catalog_{}.tsv", catalog_id))
    }

    /// Entries of a catalog. The first call for each id parses the dump on
    /// the blocking pool.
    pub async fn entries(&self, catalog_id: u32) -> Result<Arc<Vec<CatalogEntry>>> {
        if let Some(cached) = self
            .cache
            .read()
            .ok()
            .and_then(|cache| cache.get(&catalog_id).cloned())
        {
            return Ok(cached);
        }

        let path = self.path_for(catalog_id);
        tracing::info!("Loading catalog {} from {}", catalog_id, path.display());
        let parsed = tokio::task::spawn_blocking(move || -> Result<Vec<CatalogEntry>> {
            parse_catalog(BufReader::new(File::open(&path)?))
        })
        .await??;
        let entries = Arc::new(parsed);

        if let Ok(mut cache) = self.cache.write() {
            cache
                .entry(catalog_id)
                .or_insert_with(|| Arc::clone(&entries));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn caches_parsed_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog_12.tsv");
        fs::write(&path, "#entry_id\texternal_id\texternal_url\tname\tlat\tlon\n1\ta\tu\tPond\t1.0\t2.0\n").unwrap();

        let store = CatalogStore::new(dir.path());
        let first = store.entries(12).await.unwrap();
        assert_eq!(first.len(), 1);

        // Served from cache even after the file is gone.
        fs::remove_file(&path).unwrap();
        let second = store.entries(12).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn missing_dump_is_io_error() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path());
        assert!(matches!(
            store.entries(1).await,
            Err(crate::error::CatalogError::Io(_))
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn loads_large_dump_on_single_threaded_runtime() {
        let dir = tempdir().unwrap();
        let mut dump = String::from("#entry_id\texternal_id\texternal_url\tname\tlat\tlon\n");
        for i in 0..20_000 {
            dump.push_str(&format!("{i}\t{i}\tu\tPlace {i}\t1.0\t2.0\n"));
        }
        fs::write(dir.path().join("catalog_5.tsv"), dump).unwrap();

        let store = Arc::new(CatalogStore::new(dir.path()));
        let loader = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.entries(5).await })
        };

        let entries = loader.await.unwrap().unwrap();
        assert_eq!(entries.len(), 20_000);
        assert_eq!(entries[19_999].name, "Place 19999");
    }
}
