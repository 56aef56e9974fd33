//! Contrato de los stores clave-valor.
//!
//! Un store se lee por índice físico (orden del fichero, no de clave) o por
//! clave. Los registros devueltos toman prestado el buffer del store: no
//! pueden retenerse más allá de la iteración que los obtuvo.

use crate::error::StoreError;

/// Registro prestado de un store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyedRecord<'a> {
    pub key: &'a str,
    pub payload: &'a [u8],
}

/// Store de sólo lectura; seguro para lecturas concurrentes sin sincronizar.
pub trait StoreReader: Sync {
    /// Número de registros.
    fn size(&self) -> usize;

    /// Registro en la posición física `index`.
    fn record(&self, index: usize) -> Option<KeyedRecord<'_>>;

    /// Payload asociado a `key`.
    fn get_by_key(&self, key: &str) -> Option<&[u8]>;

    fn close(self) -> Result<(), StoreError>
        where Self: Sized
    {
        Ok(())
    }
}

/// Store de escritura con un slot exclusivo por worker.
///
/// Las escrituras de un slot quedan totalmente ordenadas dentro del slot; el
/// store intercala los slots al cerrar.
pub trait StoreWriter: Sync {
    /// Resultado de cerrar el store (p. ej. el store en memoria resultante).
    type Closed;

    fn slots(&self) -> usize;

    fn write(&self, payload: &[u8], key: &str, slot: usize) -> Result<(), StoreError>;

    fn close(self) -> Result<Self::Closed, StoreError>;

    /// Descarta lo escrito sin fusionar (el job falló).
    fn abort(self)
        where Self: Sized
    {
    }
}
