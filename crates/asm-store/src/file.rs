//! Store en disco: fichero de datos con entradas terminadas en NUL y un
//! índice `<datos>.index` con líneas `clave\toffset\tlongitud`.
//!
//! El writer mantiene un par de ficheros temporales por slot, cada uno tras
//! su propio lock, y los concatena al cerrar. La longitud del índice incluye
//! el NUL final; los payloads se entregan sin él.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use indexmap::IndexMap;
use log::debug;

use crate::error::StoreError;
use crate::keys::compare_keys;
use crate::traits::{KeyedRecord, StoreReader, StoreWriter};

/// Ruta del índice asociado a un fichero de datos.
pub fn index_path(data: &Path) -> PathBuf {
    with_suffix(data, ".index")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

#[derive(Debug)]
pub struct FileStoreReader {
    path: PathBuf,
    data: Vec<u8>,
    /// clave -> (offset, longitud sin NUL), en orden del índice.
    entries: IndexMap<String, (usize, usize)>,
}

impl FileStoreReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = fs::read(&path).map_err(|source| StoreError::Open { path: path.clone(), source })?;
        let idx = index_path(&path);
        let raw_index = fs::read_to_string(&idx).map_err(|source| StoreError::Open { path: idx.clone(), source })?;

        let mut entries = IndexMap::new();
        for (n, line) in raw_index.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let corrupt = |reason: String| StoreError::Corrupt { path: idx.clone(), reason: format!("line {}: {reason}", n + 1) };
            let mut cols = line.split('\t');
            let (Some(key), Some(off), Some(len)) = (cols.next(), cols.next(), cols.next()) else {
                return Err(corrupt("expected key, offset and length".into()));
            };
            let off: usize = off.parse().map_err(|_| corrupt(format!("bad offset {off}")))?;
            let len: usize = len.parse().map_err(|_| corrupt(format!("bad length {len}")))?;
            match off.checked_add(len) {
                Some(end) if end <= data.len() => {}
                _ => return Err(corrupt(format!("entry {key} exceeds data file"))),
            }
            // la longitud incluye el NUL terminador
            let payload_len = if len > 0 && data[off + len - 1] == 0 { len - 1 } else { len };
            if entries.insert(key.to_string(), (off, payload_len)).is_some() {
                return Err(corrupt(format!("duplicate key {key}")));
            }
        }
        debug!("opened store {} ({} entries)", path.display(), entries.len());
        Ok(Self { path, data, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn slice(&self, (off, len): (usize, usize)) -> &[u8] {
        &self.data[off..off + len]
    }
}

impl StoreReader for FileStoreReader {
    fn size(&self) -> usize {
        self.entries.len()
    }

    fn record(&self, index: usize) -> Option<KeyedRecord<'_>> {
        self.entries
            .get_index(index)
            .map(|(k, span)| KeyedRecord { key: k, payload: self.slice(*span) })
    }

    fn get_by_key(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(|span| self.slice(*span))
    }
}

#[derive(Debug)]
struct SlotSink {
    data_path: PathBuf,
    data: BufWriter<File>,
    offset: u64,
    index: Vec<(String, u64, u64)>,
}

#[derive(Debug)]
pub struct FileStoreWriter {
    path: PathBuf,
    slots: Vec<Mutex<SlotSink>>,
}

impl FileStoreWriter {
    /// Crea un writer con `slots` sinks independientes (uno por worker).
    pub fn create(path: impl AsRef<Path>, slots: usize) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut sinks = Vec::with_capacity(slots.max(1));
        for slot in 0..slots.max(1) {
            let data_path = with_suffix(&path, &format!(".{slot}"));
            let file = File::create(&data_path).map_err(|source| StoreError::Open { path: data_path.clone(), source })?;
            sinks.push(Mutex::new(SlotSink { data_path,
                                             data: BufWriter::new(file),
                                             offset: 0,
                                             index: Vec::new() }));
        }
        Ok(Self { path, slots: sinks })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreWriter for FileStoreWriter {
    type Closed = ();

    fn slots(&self) -> usize {
        self.slots.len()
    }

    fn write(&self, payload: &[u8], key: &str, slot: usize) -> Result<(), StoreError> {
        let sink = self.slots.get(slot).ok_or(StoreError::InvalidSlot { slot, slots: self.slots.len() })?;
        let mut sink = sink.lock().map_err(|_| StoreError::Poisoned(slot))?;
        sink.data.write_all(payload)?;
        sink.data.write_all(&[0])?;
        let len = payload.len() as u64 + 1;
        let offset = sink.offset;
        sink.index.push((key.to_string(), offset, len));
        sink.offset += len;
        Ok(())
    }

    fn abort(self) {
        for sink in self.slots {
            let data_path = match sink.into_inner() {
                Ok(s) => s.data_path,
                Err(poisoned) => poisoned.into_inner().data_path,
            };
            remove_quietly(&data_path);
        }
    }

    /// Concatena los slots en orden, reescribe los offsets y escribe el
    /// índice ordenado por clave. Los ficheros temporales se eliminan
    /// siempre; si algo falla tampoco quedan datos ni índice de salida.
    fn close(self) -> Result<(), StoreError> {
        let mut sinks = Vec::with_capacity(self.slots.len());
        let mut poisoned = None;
        for (slot, sink) in self.slots.into_iter().enumerate() {
            match sink.into_inner() {
                Ok(s) => sinks.push(s),
                Err(p) => {
                    poisoned.get_or_insert(slot);
                    sinks.push(p.into_inner());
                }
            }
        }
        let temps: Vec<PathBuf> = sinks.iter().map(|s| s.data_path.clone()).collect();

        let merged = match poisoned {
            Some(slot) => Err(StoreError::Poisoned(slot)),
            None => merge_slots(&self.path, sinks),
        };
        for path in &temps {
            remove_quietly(path);
        }
        match merged {
            Ok(entries) => {
                debug!("closed store {} ({entries} entries)", self.path.display());
                Ok(())
            }
            Err(e) => {
                remove_quietly(&self.path);
                remove_quietly(&index_path(&self.path));
                Err(e)
            }
        }
    }
}

/// Valida el índice completo antes de crear nada en `path`; después copia
/// los datos de cada slot y escribe el índice. Devuelve el nº de entradas.
fn merge_slots(path: &Path, sinks: Vec<SlotSink>) -> Result<usize, StoreError> {
    let mut index: Vec<(String, u64, u64)> = Vec::new();
    let mut parts = Vec::with_capacity(sinks.len());
    let mut base = 0u64;
    for SlotSink { data_path, data, offset, index: slot_index } in sinks {
        index.extend(slot_index.into_iter().map(|(k, off, len)| (k, off + base, len)));
        base += offset;
        parts.push((data_path, data));
    }
    index.sort_by(|a, b| compare_keys(&a.0, &b.0));
    if let Some(w) = index.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(StoreError::DuplicateKey(w[0].0.clone()));
    }

    let mut out = BufWriter::new(File::create(path).map_err(|source| StoreError::Open { path: path.to_path_buf(), source })?);
    for (data_path, data) in parts {
        data.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        let mut part = File::open(&data_path)?;
        io::copy(&mut part, &mut out)?;
    }
    out.flush()?;

    let mut idx = BufWriter::new(File::create(index_path(path))?);
    for (key, off, len) in &index {
        writeln!(idx, "{key}\t{off}\t{len}")?;
    }
    idx.flush()?;
    Ok(index.len())
}

fn remove_quietly(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => debug!("could not remove {}: {e}", path.display()),
    }
}
