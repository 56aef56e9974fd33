//! Store en memoria. Sirve a tests y a etapas que ya tienen los datos cargados.

use std::sync::Mutex;

use indexmap::IndexMap;

use crate::error::StoreError;
use crate::keys::compare_keys;
use crate::traits::{KeyedRecord, StoreReader, StoreWriter};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    records: IndexMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construye el store conservando el orden de `records` como orden físico.
    /// Una clave repetida reemplaza el payload anterior.
    pub fn from_records<K, V, I>(records: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<String>,
              V: Into<Vec<u8>>
    {
        Self { records: records.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    pub fn insert(&mut self, key: impl Into<String>, payload: impl Into<Vec<u8>>) {
        self.records.insert(key.into(), payload.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyedRecord<'_>> {
        self.records.iter().map(|(k, v)| KeyedRecord { key: k, payload: v })
    }
}

impl StoreReader for MemoryStore {
    fn size(&self) -> usize {
        self.records.len()
    }

    fn record(&self, index: usize) -> Option<KeyedRecord<'_>> {
        self.records.get_index(index).map(|(k, v)| KeyedRecord { key: k, payload: v })
    }

    fn get_by_key(&self, key: &str) -> Option<&[u8]> {
        self.records.get(key).map(Vec::as_slice)
    }
}

/// Writer en memoria: un buffer por slot, fusionados y ordenados por clave al cerrar.
#[derive(Debug)]
pub struct MemoryWriter {
    slots: Vec<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MemoryWriter {
    pub fn new(slots: usize) -> Self {
        Self { slots: (0..slots.max(1)).map(|_| Mutex::new(Vec::new())).collect() }
    }
}

impl StoreWriter for MemoryWriter {
    type Closed = MemoryStore;

    fn slots(&self) -> usize {
        self.slots.len()
    }

    fn write(&self, payload: &[u8], key: &str, slot: usize) -> Result<(), StoreError> {
        let sink = self.slots.get(slot).ok_or(StoreError::InvalidSlot { slot, slots: self.slots.len() })?;
        let mut buf = sink.lock().map_err(|_| StoreError::Poisoned(slot))?;
        buf.push((key.to_string(), payload.to_vec()));
        Ok(())
    }

    fn close(self) -> Result<MemoryStore, StoreError> {
        let mut all: Vec<(String, Vec<u8>)> = Vec::new();
        for (slot, sink) in self.slots.into_iter().enumerate() {
            all.extend(sink.into_inner().map_err(|_| StoreError::Poisoned(slot))?);
        }
        all.sort_by(|a, b| compare_keys(&a.0, &b.0));
        if let Some(w) = all.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(StoreError::DuplicateKey(w[0].0.clone()));
        }
        Ok(MemoryStore::from_records(all))
    }
}
