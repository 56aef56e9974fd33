//! Catálogo de opciones reconocidas y listas por etapa.

use super::descriptor::{ParamId, ParameterDescriptor};
use super::registry::ParameterRegistry;
use super::value::{MultiParam, ParamValue};
use crate::errors::ConfigError;

/// Identificadores de todos los parámetros del catálogo.
pub mod ids {
    use super::ParamId;

    pub const THREADS: ParamId = ParamId("threads");
    pub const VERBOSITY: ParamId = ParamId("verbosity");
    pub const COMPRESSED: ParamId = ParamId("compressed");
    pub const REMOVE_TMP_FILES: ParamId = ParamId("remove_tmp_files");
    pub const REUSE_LATEST: ParamId = ParamId("reuse_latest");
    pub const RUNNER: ParamId = ParamId("runner");
    pub const MULTI_NUM_ITERATIONS: ParamId = ParamId("multi_num_iterations");
    pub const MULTI_K: ParamId = ParamId("multi_k");
    pub const MULTI_MIN_SEQ_ID: ParamId = ParamId("multi_min_seq_id");
    pub const ALPH_SIZE: ParamId = ParamId("alph_size");
    pub const ORF_MIN_LENGTH: ParamId = ParamId("orf_min_length");
    pub const ORF_MAX_GAP: ParamId = ParamId("orf_max_gap");
    pub const COVERAGE: ParamId = ParamId("coverage");
    pub const COV_MODE: ParamId = ParamId("cov_mode");
    pub const E_VALUE: ParamId = ParamId("e_value");
    pub const MASK_RESIDUES: ParamId = ParamId("mask_residues");
    pub const KMER_PER_SEQ: ParamId = ParamId("kmer_per_seq");
    pub const KMER_PER_SEQ_SCALE: ParamId = ParamId("kmer_per_seq_scale");
    pub const SPACED_KMER_MODE: ParamId = ParamId("spaced_kmer_mode");
    pub const IGNORE_MULTI_KMER: ParamId = ParamId("ignore_multi_kmer");
    pub const INCLUDE_ONLY_EXTENDABLE: ParamId = ParamId("include_only_extendable");
    pub const RESCORE_MODE: ParamId = ParamId("rescore_mode");
    pub const ALIGNMENT_MODE: ParamId = ParamId("alignment_mode");
    pub const MAX_SEQ_LEN: ParamId = ParamId("max_seq_len");
    pub const CYCLE_CHECK: ParamId = ParamId("cycle_check");
    pub const CHOP_CYCLE: ParamId = ParamId("chop_cycle");
    pub const CLUSTER_MODE: ParamId = ParamId("cluster_mode");
    pub const GAP_OPEN: ParamId = ParamId("gap_open");
    pub const GAP_EXTEND: ParamId = ParamId("gap_extend");
    pub const ZDROP: ParamId = ParamId("zdrop");
    pub const SEQ_ID_MODE: ParamId = ParamId("seq_id_mode");
    pub const TRANSLATION_TABLE: ParamId = ParamId("translation_table");
    pub const USE_ALL_TABLE_STARTS: ParamId = ParamId("use_all_table_starts");
    pub const CONTIG_START_MODE: ParamId = ParamId("contig_start_mode");
    pub const CONTIG_END_MODE: ParamId = ParamId("contig_end_mode");
    pub const ORF_START_MODE: ParamId = ParamId("orf_start_mode");
    pub const ORF_FORWARD_FRAMES: ParamId = ParamId("orf_forward_frames");
    pub const ORF_REVERSE_FRAMES: ParamId = ParamId("orf_reverse_frames");
    pub const ID_OFFSET: ParamId = ParamId("id_offset");
    pub const FILTER_PROTEINS: ParamId = ParamId("filter_proteins");
    pub const CREATEDB_MODE: ParamId = ParamId("createdb_mode");
    pub const SORT_RESULTS: ParamId = ParamId("sort_results");
    pub const SUMMARY_PREFIX: ParamId = ParamId("summary_prefix");
}

/// Nombres de las listas de parámetros por etapa.
pub mod lists {
    pub const ONLY_VERBOSITY: &str = "onlyverbosity";
    pub const CREATEDB: &str = "createdb";
    pub const KMERMATCHER: &str = "kmermatcher";
    pub const RESCOREDIAGONAL: &str = "rescorediagonal";
    pub const EXTRACTORFS: &str = "extractorfs";
    pub const EXTRACTORFS_SUBSET: &str = "extractorfssubset";
    pub const ASSEMBLERESULTS: &str = "assembleresults";
    pub const CLUSTER: &str = "cluster";
    pub const HYBRIDASSEMBLERESULTS: &str = "hybridassembleresults";
    pub const ASSEMBLERWORKFLOW: &str = "assemblerworkflow";
    pub const NUCLASSEMBLERWORKFLOW: &str = "nuclassemblerworkflow";
    pub const HYBRIDASSEMBLEWORKFLOW: &str = "hybridassembleworkflow";
    pub const EASY_HYBRID_ASSEMBLER: &str = "easyhybridassembler";
    pub const SUMMARIZE: &str = "summarize";
}

pub const RESCORE_MODE_GLOBAL_ALIGNMENT: i64 = 3;
pub const ALIGNMENT_MODE_SCORE_COV: i64 = 2;

const POSITIVE_INT: &str = "^[1-9]{1}[0-9]*$";
const NON_NEGATIVE_INT: &str = "^[0-9]+$";
const BOOL: &str = "^(0|1|true|false)$";
const ZERO_ONE: &str = "^[0-1]{1}$";
const FRACTION: &str = r"^(0(\.[0-9]+)?|1(\.0+)?)$";
const FLOAT: &str = r"^([-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?|inf)$";
const ANY: &str = "^.*$";
const MULTI_INT: &str = "^((aa|nucl):)?[0-9]+(,(aa|nucl):[0-9]+)?$";
const MULTI_FRACTION: &str = r"^((aa|nucl):)?(0(\.[0-9]+)?|1(\.0+)?)(,(aa|nucl):(0(\.[0-9]+)?|1(\.0+)?))?$";
const FRAMES: &str = "^[1-3](,[1-3]){0,2}$";

fn default_threads() -> i64 {
    std::thread::available_parallelism().map(|n| n.get() as i64).unwrap_or(1)
}

fn descriptors() -> Result<Vec<ParameterDescriptor>, ConfigError> {
    use ids::*;
    use ParamValue::{Bool, Float, Int, MultiFloat, MultiInt, Str};

    let d = ParameterDescriptor::new;
    Ok(vec![
        d(THREADS, "--threads", "Threads", "Number of CPU-cores used (all by default)", Int(default_threads()), POSITIVE_INT)?,
        d(VERBOSITY, "-v", "Verbosity", "Verbosity level: 0: quiet, 1: +errors, 2: +warnings, 3: +info", Int(3), "^[0-3]{1}$")?,
        d(COMPRESSED, "--compressed", "Compressed", "Write compressed output", Int(0), ZERO_ONE)?,
        d(REMOVE_TMP_FILES, "--remove-tmp-files", "Remove temporary files", "Delete temporary files", Bool(false), BOOL)?,
        d(REUSE_LATEST, "--reuse-latest", "Reuse latest", "Reuse the latest temporary directory instead of hashing the arguments", Bool(false), BOOL)?,
        d(RUNNER, "--mpi-runner", "MPI runner", "Use MPI on compute cluster with this MPI command (e.g. \"mpirun -np 42\")", Str(String::new()), ANY)?,
        d(MULTI_NUM_ITERATIONS, "--num-iterations", "Number of assembly iterations", "Number of assembly iterations [1, inf]", MultiInt(MultiParam::both(12)), MULTI_INT)?,
        d(MULTI_K, "-k", "k-mer length", "k-mer length", MultiInt(MultiParam::both(14)), MULTI_INT)?,
        d(MULTI_MIN_SEQ_ID, "--min-seq-id", "Seq. id. threshold", "List matches above this sequence identity [0.0, 1.0]", MultiFloat(MultiParam::both(0.9)), MULTI_FRACTION)?,
        d(ALPH_SIZE, "--alph-size", "Alphabet size", "Alphabet size [2, 21]", MultiInt(MultiParam::new(13, 5)), MULTI_INT)?,
        d(ORF_MIN_LENGTH, "--min-length", "Min codons in orf", "Minimum codon number in open reading frames", Int(30), POSITIVE_INT)?,
        d(ORF_MAX_GAP, "--max-gaps", "Max orf gaps", "Maximum number of codons with gaps or unknown residues before an open reading frame is rejected", Int(i64::from(i32::MAX)), NON_NEGATIVE_INT)?,
        d(COVERAGE, "-c", "Coverage threshold", "List matches above this fraction of aligned (covered) residues", Float(0.0), FRACTION)?,
        d(COV_MODE, "--cov-mode", "Coverage mode", "0: coverage of query and target, 1: target, 2: query", Int(0), "^[0-5]{1}$")?,
        d(E_VALUE, "-e", "E-value threshold", "List matches below this E-value [0.0, inf]", Float(0.001), FLOAT)?,
        d(MASK_RESIDUES, "--mask", "Mask residues", "Mask sequences in k-mer stage: 0: w/o low complexity masking, 1: with low complexity masking", Int(1), ZERO_ONE)?,
        d(KMER_PER_SEQ, "--kmer-per-seq", "k-mers per sequence", "k-mers per sequence", Int(21), POSITIVE_INT)?,
        d(KMER_PER_SEQ_SCALE, "--kmer-per-seq-scale", "Scale k-mers per sequence", "Scale k-mer per sequence based on sequence length as kmer-per-seq val + scale x seqlen", Float(0.0), r"^[0-9]*(\.[0-9]+)?$")?,
        d(SPACED_KMER_MODE, "--spaced-kmer-mode", "Spaced k-mers", "0: use consecutive positions in k-mers; 1: use spaced k-mers", Int(1), ZERO_ONE)?,
        d(IGNORE_MULTI_KMER, "--ignore-multi-kmer", "Skip repeating k-mers", "Skip k-mers occurring multiple times (>=2)", Bool(false), BOOL)?,
        d(INCLUDE_ONLY_EXTENDABLE, "--include-only-extendable", "Include only extendable", "Include only extendable", Bool(false), BOOL)?,
        d(RESCORE_MODE, "--rescore-mode", "Rescore mode", "Rescore diagonals with: 0: Hamming distance, 1: local alignment (score only), 2: local alignment, 3: global alignment, 4: longest alignment fullfilling window quality criterion", Int(0), "^[0-4]{1}$")?,
        d(ALIGNMENT_MODE, "--alignment-mode", "Alignment mode", "How to compute the alignment: 0: automatic, 1: only score and end_pos, 2: also start_pos and cov, 3: also seq.id, 4: only ungapped alignment", Int(0), "^[0-4]{1}$")?,
        d(MAX_SEQ_LEN, "--max-seq-len", "Max sequence length", "Maximum sequence length", Int(65535), NON_NEGATIVE_INT)?,
        d(CYCLE_CHECK, "--cycle-check", "Check for circular sequences", "Check for circular sequences (avoid over extension of circular or long repeated regions)", Bool(false), BOOL)?,
        d(CHOP_CYCLE, "--chop-cycle", "Chop cycle", "Remove superfluous part of circular fragments (see --cycle-check)", Bool(false), BOOL)?,
        d(CLUSTER_MODE, "--cluster-mode", "Cluster mode", "0: Set-Cover (greedy), 1: Connected component (BLASTclust), 2,3: Greedy clustering by sequence length (CDHIT)", Int(0), "^[0-3]{1}$")?,
        d(GAP_OPEN, "--gap-open", "Gap open cost", "Gap open cost", Int(11), NON_NEGATIVE_INT)?,
        d(GAP_EXTEND, "--gap-extend", "Gap extension cost", "Gap extension cost", Int(1), NON_NEGATIVE_INT)?,
        d(ZDROP, "--zdrop", "Zdrop", "Maximal allowed difference between score values before alignment is truncated (nucleotide alignment only)", Int(40), NON_NEGATIVE_INT)?,
        d(SEQ_ID_MODE, "--seq-id-mode", "Seq. id. mode", "0: alignment length 1: shorter, 2: longer sequence", Int(0), "^[0-2]{1}$")?,
        d(TRANSLATION_TABLE, "--translation-table", "Translation table", "Translation table (1 = canonical, see NCBI genetic codes)", Int(1), POSITIVE_INT)?,
        d(USE_ALL_TABLE_STARTS, "--use-all-table-starts", "Use all table starts", "Use all alternatives for a start codon in the genetic table", Bool(false), BOOL)?,
        d(CONTIG_START_MODE, "--contig-start-mode", "Contig start mode", "Contig start can be 0: incomplete, 1: complete, 2: both", Int(2), "^[0-2]{1}$")?,
        d(CONTIG_END_MODE, "--contig-end-mode", "Contig end mode", "Contig end can be 0: incomplete, 1: complete, 2: both", Int(2), "^[0-2]{1}$")?,
        d(ORF_START_MODE, "--orf-start-mode", "Orf start mode", "Orf fragment can be 0: from start to stop, 1: from any to stop, 2: from last encountered start to stop", Int(1), "^[0-2]{1}$")?,
        d(ORF_FORWARD_FRAMES, "--forward-frames", "Forward frames", "Comma-separated list of frames on the forward strand to be extracted", Str("1,2,3".into()), FRAMES)?,
        d(ORF_REVERSE_FRAMES, "--reverse-frames", "Reverse frames", "Comma-separated list of frames on the reverse strand to be extracted", Str("1,2,3".into()), FRAMES)?,
        d(ID_OFFSET, "--id-offset", "Offset of numeric ids", "Numeric ids in index file are offset by this value", Int(0), NON_NEGATIVE_INT)?,
        d(FILTER_PROTEINS, "--filter-proteins", "Filter Proteins", "Filter proteins by a neural network [0,1]", Int(1), ZERO_ONE)?,
        d(CREATEDB_MODE, "--createdb-mode", "Createdb mode", "Createdb mode 0: copy data, 1: soft link data and write new index", Int(0), ZERO_ONE)?,
        d(SORT_RESULTS, "--sort-results", "Sort results", "Sort results: 0: no sorting, 1: sort by E-value", Int(0), ZERO_ONE)?,
        d(SUMMARY_PREFIX, "--summary-prefix", "Summary prefix", "Sequence identifier prefix of each summary", Str("-".into()), ANY)?,
    ])
}

/// Registra el catálogo completo y construye las listas por etapa.
pub(crate) fn install(registry: &mut ParameterRegistry) -> Result<(), ConfigError> {
    use ids::*;
    use lists::*;

    for d in descriptors()? {
        registry.register(d)?;
    }

    registry.build_list(ONLY_VERBOSITY, &[VERBOSITY])?;
    registry.build_list(CREATEDB, &[CREATEDB_MODE, ID_OFFSET, COMPRESSED, VERBOSITY])?;
    registry.build_list(KMERMATCHER,
                        &[ALPH_SIZE,
                          KMER_PER_SEQ,
                          KMER_PER_SEQ_SCALE,
                          SPACED_KMER_MODE,
                          MASK_RESIDUES,
                          MULTI_K,
                          IGNORE_MULTI_KMER,
                          INCLUDE_ONLY_EXTENDABLE,
                          MAX_SEQ_LEN,
                          THREADS,
                          COMPRESSED,
                          VERBOSITY])?;
    registry.build_list(RESCOREDIAGONAL,
                        &[RESCORE_MODE,
                          MULTI_MIN_SEQ_ID,
                          COVERAGE,
                          COV_MODE,
                          E_VALUE,
                          SEQ_ID_MODE,
                          INCLUDE_ONLY_EXTENDABLE,
                          SORT_RESULTS,
                          THREADS,
                          COMPRESSED,
                          VERBOSITY])?;
    registry.build_list(EXTRACTORFS,
                        &[ORF_MIN_LENGTH,
                          ORF_MAX_GAP,
                          CONTIG_START_MODE,
                          CONTIG_END_MODE,
                          ORF_START_MODE,
                          ORF_FORWARD_FRAMES,
                          ORF_REVERSE_FRAMES,
                          TRANSLATION_TABLE,
                          USE_ALL_TABLE_STARTS,
                          ID_OFFSET,
                          THREADS,
                          COMPRESSED,
                          VERBOSITY])?;
    registry.build_list(EXTRACTORFS_SUBSET, &[TRANSLATION_TABLE, USE_ALL_TABLE_STARTS, THREADS, VERBOSITY])?;
    registry.build_list(ASSEMBLERESULTS, &[MULTI_MIN_SEQ_ID, THREADS, VERBOSITY])?;
    registry.build_list(CLUSTER, &[CLUSTER_MODE, ALIGNMENT_MODE, GAP_OPEN, GAP_EXTEND, ZDROP, THREADS, VERBOSITY])?;

    registry.combine_lists(HYBRIDASSEMBLERESULTS,
                           &[RESCOREDIAGONAL, KMERMATCHER],
                           &[MULTI_NUM_ITERATIONS, CYCLE_CHECK, CHOP_CYCLE, REMOVE_TMP_FILES, RUNNER])?;
    registry.combine_lists(ASSEMBLERWORKFLOW,
                           &[RESCOREDIAGONAL, KMERMATCHER, EXTRACTORFS, ASSEMBLERESULTS],
                           &[FILTER_PROTEINS, MULTI_NUM_ITERATIONS, REMOVE_TMP_FILES, RUNNER])?;
    registry.combine_lists(NUCLASSEMBLERWORKFLOW,
                           &[RESCOREDIAGONAL, KMERMATCHER, ASSEMBLERESULTS],
                           &[MULTI_NUM_ITERATIONS, REMOVE_TMP_FILES, RUNNER])?;
    registry.combine_lists(HYBRIDASSEMBLEWORKFLOW, &[HYBRIDASSEMBLERESULTS, EXTRACTORFS, CLUSTER], &[])?;
    registry.combine_lists(EASY_HYBRID_ASSEMBLER, &[HYBRIDASSEMBLEWORKFLOW, CREATEDB], &[REUSE_LATEST])?;

    registry.build_list(SUMMARIZE, &[SUMMARY_PREFIX, THREADS, COMPRESSED, VERBOSITY])?;
    Ok(())
}
