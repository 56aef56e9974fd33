//! Job `summarize`: por cada registro del store de resultados busca la
//! cabecera de la query y de cada target, y escribe un resumen con la
//! misma clave en el store de salida.
//!
//! Fases: Open → Process → Close → Done. Cualquier fallo aborta el job
//! completo; no hay éxito parcial.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use asm_core::constants::DEFAULT_BATCH_SIZE;
use asm_core::{ids, ParameterRegistry};
use asm_store::{FileStoreReader, FileStoreWriter, StoreReader, StoreWriter};
use log::{debug, error, info};

use crate::error::ReduceError;
use crate::summarizer::HeaderSummarizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Open,
    Process,
    Close,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Open => "open",
            Phase::Process => "process",
            Phase::Close => "close",
            Phase::Done => "done",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeOptions {
    pub threads: usize,
    /// Registros reclamados por worker en cada vuelta.
    pub batch_size: usize,
    pub prefix: String,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self { threads: 1,
               batch_size: DEFAULT_BATCH_SIZE,
               prefix: String::new() }
    }
}

impl SummarizeOptions {
    /// Lee `--threads` y `--summary-prefix` del registro ya parseado.
    pub fn from_registry(registry: &ParameterRegistry, batch_size: usize) -> Result<Self, ReduceError> {
        let threads = usize::try_from(registry.int_value(ids::THREADS)?).unwrap_or(1).max(1);
        Ok(Self { threads,
                  batch_size: batch_size.max(1),
                  prefix: registry.str_value(ids::SUMMARY_PREFIX)?.to_string() })
    }
}

/// Resultado de un job completado.
#[derive(Debug)]
pub struct SummarizeReport<C> {
    pub records: usize,
    pub output: C,
}

pub struct SummarizeJob<H> {
    options: SummarizeOptions,
    summarizer: H,
}

impl<H: HeaderSummarizer> SummarizeJob<H> {
    pub fn new(options: SummarizeOptions, summarizer: H) -> Self {
        Self { options, summarizer }
    }

    pub fn options(&self) -> &SummarizeOptions {
        &self.options
    }

    /// Ejecuta el job sobre stores ya abiertos (query, target, resultados,
    /// salida). Los stores se cierran en orden inverso al de apertura.
    pub fn run<Q, T, R, W>(&self, query: Q, target: T, result: R, writer: W) -> Result<SummarizeReport<W::Closed>, ReduceError>
        where Q: StoreReader,
              T: StoreReader,
              R: StoreReader,
              W: StoreWriter
    {
        info!("summarize: {} ({} records, {} threads)", Phase::Process, result.size(), self.options.threads);
        let records = match self.process(&query, &target, &result, &writer) {
            Ok(n) => n,
            Err(e) => {
                error!("summarize failed: {e}");
                writer.abort();
                return Err(e);
            }
        };

        info!("summarize: {}", Phase::Close);
        let output = writer.close()?;
        result.close()?;
        target.close()?;
        query.close()?;
        info!("summarize: {} ({records} records written)", Phase::Done);
        Ok(SummarizeReport { records, output })
    }

    fn process<Q, T, R, W>(&self, query: &Q, target: &T, result: &R, writer: &W) -> Result<usize, ReduceError>
        where Q: StoreReader,
              T: StoreReader,
              R: StoreReader,
              W: StoreWriter
    {
        // un worker por slot de escritura, nunca más
        let workers = self.options.threads.min(writer.slots()).max(1);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers)
                                                  .thread_name(|i| format!("summarize-{i}"))
                                                  .build()?;
        let size = result.size();
        let batch = self.options.batch_size.max(1);
        let cursor = AtomicUsize::new(0);
        let failed = AtomicBool::new(false);

        let outcomes: Vec<Result<usize, ReduceError>> = pool.broadcast(|ctx| {
            let slot = ctx.index();
            let mut written = 0usize;
            while !failed.load(Ordering::Relaxed) {
                // el cursor nunca pasa de `size`: un lote enorme no desborda
                let claim = cursor.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |start| {
                    (start < size).then(|| start.saturating_add(batch).min(size))
                });
                let Ok(start) = claim else {
                    break;
                };
                for index in start..start.saturating_add(batch).min(size) {
                    if let Err(e) = self.reduce_record(index, query, target, result, writer, slot) {
                        failed.store(true, Ordering::Relaxed);
                        return Err(e);
                    }
                    written += 1;
                }
            }
            debug!("worker {slot} wrote {written} records");
            Ok(written)
        });

        let mut total = 0;
        for outcome in outcomes {
            total += outcome?;
        }
        Ok(total)
    }

    fn reduce_record<Q, T, R, W>(&self, index: usize, query: &Q, target: &T, result: &R, writer: &W, slot: usize) -> Result<(), ReduceError>
        where Q: StoreReader,
              T: StoreReader,
              R: StoreReader,
              W: StoreWriter
    {
        let record = result.record(index).ok_or(ReduceError::MissingRecord(index))?;
        let text = String::from_utf8_lossy(record.payload);

        let mut headers: Vec<Cow<'_, str>> = Vec::new();
        for (n, line) in text.lines().filter(|l| !l.is_empty()).enumerate() {
            // la clave es la primera columna; el resto (alineamiento) se ignora
            let key = line.split_once('\t').map_or(line, |(k, _)| k);
            let (found, store) = if n == 0 {
                (query.get_by_key(key), "query")
            } else {
                (target.get_by_key(key), "target")
            };
            let header = found.ok_or_else(|| ReduceError::Lookup { key: key.to_string(), store })?;
            headers.push(String::from_utf8_lossy(header));
        }

        let lines: Vec<&str> = headers.iter().map(|h| h.trim_end_matches('\n')).collect();
        let summary = self.summarizer.summarize(&lines, &self.options.prefix);
        writer.write(summary.as_bytes(), record.key, slot)?;
        Ok(())
    }

    /// Abre los cuatro stores en disco (query, target, resultados, salida)
    /// y ejecuta el job.
    pub fn run_on_paths(&self, query: &Path, target: &Path, result: &Path, out: &Path) -> Result<SummarizeReport<()>, ReduceError> {
        info!("summarize: {}", Phase::Open);
        let query = FileStoreReader::open(query)?;
        let target = FileStoreReader::open(target)?;
        let result = FileStoreReader::open(result)?;
        let writer = FileStoreWriter::create(out, self.options.threads)?;
        info!("start writing to file {}", out.display());
        self.run(query, target, result, writer)
    }
}
