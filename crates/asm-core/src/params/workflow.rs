//! Configuración por workflow: defaults propios, opciones que deben pasarse
//! siempre a las etapas y ajustes de ayuda.
//!
//! Las etapas externas tienen sus propios defaults. Si el workflow cambia un
//! default y no lo fuerza como explícito, la etapa volvería silenciosamente
//! al suyo; por eso cada default del workflow aparece también en `pass_along`.

use super::catalogue::{ids::*, ALIGNMENT_MODE_SCORE_COV, RESCORE_MODE_GLOBAL_ALIGNMENT};
use super::descriptor::ParamId;
use super::value::{MultiParam, ParamValue};

#[derive(Debug, Clone, Default)]
pub struct WorkflowConfiguration {
    pub name: String,
    pub defaults: Vec<(ParamId, ParamValue)>,
    pub pass_along: Vec<ParamId>,
    pub descriptions: Vec<(ParamId, String)>,
    pub expert: Vec<ParamId>,
}

impl WorkflowConfiguration {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    /// Agrega un default y lo marca para pasarse a las etapas.
    pub fn default_value(mut self, id: ParamId, value: ParamValue) -> Self {
        self.defaults.push((id, value));
        if !self.pass_along.contains(&id) {
            self.pass_along.push(id);
        }
        self
    }

    pub fn describe(mut self, id: ParamId, help: &str) -> Self {
        self.descriptions.push((id, help.to_string()));
        self
    }

    pub fn expert(mut self, ids: &[ParamId]) -> Self {
        self.expert.extend_from_slice(ids);
        self
    }

    /// Workflow `easy-hybrid-assemble`.
    pub fn easy_hybrid_assembler() -> Self {
        use ParamValue::{Bool, Float, Int, MultiFloat, MultiInt};

        Self::new("easy-hybrid-assemble")
            .describe(MULTI_MIN_SEQ_ID, "Overlap sequence identity threshold [0.0, 1.0]")
            .describe(E_VALUE, "Extend sequences if the E-value is below [0.0, inf]")
            .expert(&[COV_MODE,
                      COVERAGE,
                      ID_OFFSET,
                      CONTIG_END_MODE,
                      CONTIG_START_MODE,
                      ORF_MAX_GAP,
                      ORF_START_MODE,
                      ORF_FORWARD_FRAMES,
                      ORF_REVERSE_FRAMES,
                      SEQ_ID_MODE,
                      RESCORE_MODE,
                      INCLUDE_ONLY_EXTENDABLE,
                      KMER_PER_SEQ,
                      SORT_RESULTS,
                      TRANSLATION_TABLE,
                      USE_ALL_TABLE_STARTS])
            .default_value(MULTI_NUM_ITERATIONS, MultiInt(MultiParam::new(12, 20)))
            .default_value(MULTI_K, MultiInt(MultiParam::new(14, 22)))
            .default_value(MULTI_MIN_SEQ_ID, MultiFloat(MultiParam::new(0.97, 0.97)))
            .default_value(ALPH_SIZE, MultiInt(MultiParam::new(13, 5)))
            .default_value(ORF_MIN_LENGTH, Int(45))
            .default_value(COVERAGE, Float(0.0))
            .default_value(E_VALUE, Float(0.00001))
            .default_value(MASK_RESIDUES, Int(0))
            .default_value(KMER_PER_SEQ, Int(60))
            .default_value(KMER_PER_SEQ_SCALE, Float(0.1))
            .default_value(SPACED_KMER_MODE, Int(0))
            .default_value(IGNORE_MULTI_KMER, Bool(true))
            .default_value(INCLUDE_ONLY_EXTENDABLE, Bool(true))
            .default_value(RESCORE_MODE, Int(RESCORE_MODE_GLOBAL_ALIGNMENT))
            .default_value(ALIGNMENT_MODE, Int(ALIGNMENT_MODE_SCORE_COV))
            .default_value(MAX_SEQ_LEN, Int(200_000))
            .default_value(CYCLE_CHECK, Bool(true))
            .default_value(CHOP_CYCLE, Bool(true))
            .default_value(CLUSTER_MODE, Int(2))
            .default_value(GAP_OPEN, Int(5))
            .default_value(GAP_EXTEND, Int(2))
            .default_value(ZDROP, Int(200))
    }
}
