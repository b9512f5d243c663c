use rocksdb::{IteratorMode, Options, WriteBatch, DB};
use std::path::Path;
use thiserror::Error;

use jam_types::{StateEntries, StateKey};

#[derive(Error, Debug)]
pub enum KvError {
    #[error(transparent)]
    Db(#[from] rocksdb::Error),
    #[error("stored key 0x{0} is not a 32-byte state key")]
    BadKey(String),
}

/// Flat key/value store for serialized state entries.
pub struct Kv {
    db: DB,
}

impl Kv {

    pub fn open(path: impl AsRef<Path>) -> Result<Self, KvError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }

    pub fn destroy(path: impl AsRef<Path>) -> Result<(), KvError> {
        let opts = Options::default();
        DB::destroy(&opts, path)?;
        Ok(())
    }

    pub fn put(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<(), KvError> {
        self.db.put(key, value)?;
        Ok(())
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Option<Vec<u8>>, KvError> {
        Ok(self.db.get(key)?)
    }

    pub fn delete(&self, key: impl AsRef<[u8]>) -> Result<(), KvError> {
        self.db.delete(key)?;
        Ok(())
    }

    pub fn flush(&self) -> Result<(), KvError> {
        self.db.flush()?;
        Ok(())
    }

    /// Replaces the stored state with `entries` in a single write batch.
    pub fn write_entries(&self, entries: &StateEntries) -> Result<(), KvError> {

        let mut batch = WriteBatch::default();

        for item in self.db.iterator(IteratorMode::Start) {
            let (key, _) = item?;
            if !entries.map.contains_key(key.as_ref()) {
                batch.delete(key);
            }
        }

        for (key, value) in entries.map.iter() {
            batch.put(key, value);
        }

        log::debug!("Writing {} state entries", entries.map.len());
        self.db.write(batch)?;
        Ok(())
    }

    /// Reads every stored pair back as state entries.
    pub fn read_entries(&self) -> Result<StateEntries, KvError> {

        let mut entries = StateEntries::default();

        for item in self.db.iterator(IteratorMode::Start) {
            let (key, value) = item?;
            let state_key: StateKey = key.as_ref().try_into().map_err(|_| KvError::BadKey(hex::encode(&key)))?;
            entries.map.insert(state_key, value.to_vec());
        }

        Ok(entries)
    }
}
