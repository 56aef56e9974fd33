//! asm-reduce: reducción paralela de un store de resultados a un store de
//! resúmenes, con búsquedas cruzadas en dos stores de cabeceras.

pub mod error;
pub mod job;
pub mod summarizer;

pub use error::ReduceError;
pub use job::{Phase, SummarizeJob, SummarizeOptions, SummarizeReport};
pub use summarizer::{HeaderSummarizer, UniprotHeaderSummarizer};
