//! Registro de parámetros: descriptores, listas por etapa, parseo y
//! compilación a cadenas de argumentos.
//!
//! El registro es un objeto explícito que el llamador construye y pasa por
//! referencia; no existe una instancia global.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use super::catalogue;
use super::descriptor::{ParamCategory, ParamId, ParameterDescriptor};
use super::value::{ParamKind, ParamValue, Setting};
use super::workflow::WorkflowConfiguration;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct ParameterRegistry {
    descriptors: IndexMap<ParamId, ParameterDescriptor>,
    lists: IndexMap<String, Vec<ParamId>>,
}

impl ParameterRegistry {
    /// Registro con el catálogo completo de opciones y listas.
    pub fn new() -> Result<Self, ConfigError> {
        let mut registry = Self::empty();
        catalogue::install(&mut registry)?;
        Ok(registry)
    }

    /// Registro sin descriptores (útil para tests o catálogos propios).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ParameterDescriptor) -> Result<(), ConfigError> {
        if self.descriptors.contains_key(&descriptor.id) {
            return Err(ConfigError::DuplicateParameter(descriptor.id.to_string()));
        }
        descriptor.check(descriptor.value())?;
        self.descriptors.insert(descriptor.id, descriptor);
        Ok(())
    }

    /// Define una lista con nombre. Un identificador repetido se descarta
    /// (gana la primera aparición); dos identificadores con el mismo flag son
    /// un error porque el parseo no podría distinguirlos.
    pub fn build_list(&mut self, name: &str, ids: &[ParamId]) -> Result<(), ConfigError> {
        let mut list: Vec<ParamId> = Vec::with_capacity(ids.len());
        let mut flags: HashMap<&'static str, ParamId> = HashMap::new();
        for id in ids {
            let d = self.descriptor(*id)?;
            if list.contains(id) {
                continue;
            }
            if let Some(other) = flags.insert(d.name, *id) {
                if other != *id {
                    return Err(ConfigError::AmbiguousOption { list: name.to_string(), option: d.name.to_string() });
                }
            }
            list.push(*id);
        }
        trace!("parameter list {name}: {} options", list.len());
        self.lists.insert(name.to_string(), list);
        Ok(())
    }

    /// Concatena listas existentes (en orden) y agrega `extra` al final.
    pub fn combine_lists(&mut self, name: &str, parts: &[&str], extra: &[ParamId]) -> Result<(), ConfigError> {
        let mut ids: Vec<ParamId> = Vec::new();
        for part in parts {
            ids.extend_from_slice(self.list(part)?);
        }
        ids.extend_from_slice(extra);
        self.build_list(name, &ids)
    }

    pub fn list(&self, name: &str) -> Result<&[ParamId], ConfigError> {
        self.lists
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ConfigError::UnknownList(name.to_string()))
    }

    pub fn descriptor(&self, id: ParamId) -> Result<&ParameterDescriptor, ConfigError> {
        self.descriptors.get(&id).ok_or_else(|| ConfigError::UnknownParameter(id.to_string()))
    }

    fn descriptor_mut(&mut self, id: ParamId) -> Result<&mut ParameterDescriptor, ConfigError> {
        self.descriptors.get_mut(&id).ok_or_else(|| ConfigError::UnknownParameter(id.to_string()))
    }

    pub fn value(&self, id: ParamId) -> Result<&ParamValue, ConfigError> {
        Ok(self.descriptor(id)?.value())
    }

    pub fn setting(&self, id: ParamId) -> Result<&Setting, ConfigError> {
        Ok(self.descriptor(id)?.setting())
    }

    pub fn bool_value(&self, id: ParamId) -> Result<bool, ConfigError> {
        let d = self.descriptor(id)?;
        d.value().as_bool().ok_or_else(|| kind_mismatch(d, ParamKind::Bool))
    }

    pub fn int_value(&self, id: ParamId) -> Result<i64, ConfigError> {
        let d = self.descriptor(id)?;
        d.value().as_int().ok_or_else(|| kind_mismatch(d, ParamKind::Int))
    }

    pub fn str_value(&self, id: ParamId) -> Result<&str, ConfigError> {
        let d = self.descriptor(id)?;
        d.value().as_str().ok_or_else(|| kind_mismatch(d, ParamKind::Str))
    }

    /// Fija un valor como si lo hubiera dado el usuario.
    pub fn set(&mut self, id: ParamId, value: ParamValue) -> Result<(), ConfigError> {
        self.descriptor_mut(id)?.set_explicit(value)
    }

    /// Aplica los defaults, descripciones y categorías de un workflow. Los
    /// valores siguen siendo `Default`: no cuentan como fijados por el usuario.
    pub fn apply_defaults(&mut self, workflow: &WorkflowConfiguration) -> Result<(), ConfigError> {
        for (id, value) in &workflow.defaults {
            self.descriptor_mut(*id)?.set_default(value.clone())?;
        }
        for (id, help) in &workflow.descriptions {
            self.descriptor_mut(*id)?.help = help.clone();
        }
        for id in &workflow.expert {
            self.descriptor_mut(*id)?.category = ParamCategory::Expert;
        }
        debug!("workflow {}: {} defaults applied", workflow.name, workflow.defaults.len());
        Ok(())
    }

    /// Marca los parámetros como explícitos para que una compilación
    /// `explicit_only` los incluya aunque el usuario no los haya dado.
    pub fn force_pass_along(&mut self, ids: &[ParamId]) -> Result<(), ConfigError> {
        for id in ids {
            self.descriptor_mut(*id)?.force_explicit();
        }
        Ok(())
    }

    /// Serializa una lista a `--flag valor ...` en el orden de la lista.
    ///
    /// Con `explicit_only` sólo entran los valores explícitos. Los strings
    /// vacíos se omiten (no hay token que los represente); el resto va con
    /// comillas de shell si hace falta, y `parse_argument_string` las
    /// deshace.
    pub fn compile(&self, list: &str, explicit_only: bool) -> Result<String, ConfigError> {
        let mut tokens: Vec<String> = Vec::new();
        for id in self.list(list)? {
            let d = self.descriptor(*id)?;
            if explicit_only && !d.is_explicit() {
                continue;
            }
            let raw = d.value().to_string();
            if raw.is_empty() {
                continue;
            }
            tokens.push(d.name.to_string());
            // las cadenas pueden llevar espacios ("mpirun -np 42")
            match d.kind {
                ParamKind::Str => tokens.push(shell_words::quote(&raw).into_owned()),
                _ => tokens.push(raw),
            }
        }
        Ok(tokens.join(" "))
    }

    /// Opción booleana pasada como marcador de entorno: `TRUE` o ausente.
    pub fn env_flag(&self, id: ParamId) -> Result<Option<&'static str>, ConfigError> {
        Ok(self.bool_value(id)?.then_some("TRUE"))
    }

    /// Consume las opciones de `list` presentes en `args` y devuelve los
    /// argumentos posicionales en su orden original.
    pub fn parse<S: AsRef<str>>(&mut self, list: &str, args: &[S]) -> Result<Vec<String>, ConfigError> {
        let by_flag: HashMap<&'static str, ParamId> = self.list(list)?
                                                          .iter()
                                                          .filter_map(|id| self.descriptors.get(id).map(|d| (d.name, *id)))
                                                          .collect();
        let mut positional = Vec::new();
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();
            if !looks_like_option(arg) {
                positional.push(arg.to_string());
                i += 1;
                continue;
            }
            let id = *by_flag.get(arg).ok_or_else(|| ConfigError::UnknownOption(arg.to_string()))?;
            let d = self.descriptor(id)?;
            let next = args.get(i + 1).map(|s| s.as_ref());
            let (value, consumed) = match (d.kind, next) {
                (ParamKind::Bool, Some(raw)) if ParamValue::parse(ParamKind::Bool, raw).is_some() => {
                    (d.parse_value(raw)?, 2)
                }
                (ParamKind::Bool, _) => (ParamValue::Bool(true), 1),
                (_, Some(raw)) => (d.parse_value(raw)?, 2),
                (_, None) => return Err(ConfigError::MissingValue(arg.to_string())),
            };
            self.descriptor_mut(id)?.set_explicit(value)?;
            i += consumed;
        }
        Ok(positional)
    }

    /// Re-parsea una cadena producida por `compile`.
    pub fn parse_argument_string(&mut self, list: &str, compiled: &str) -> Result<Vec<String>, ConfigError> {
        let args = shell_words::split(compiled).map_err(|e| ConfigError::MalformedArguments(e.to_string()))?;
        self.parse(list, &args)
    }

    /// Opciones de una lista para el listado de ayuda.
    pub fn options(&self, list: &str, include_expert: bool) -> Result<Vec<&ParameterDescriptor>, ConfigError> {
        let mut out = Vec::new();
        for id in self.list(list)? {
            let d = self.descriptor(*id)?;
            if include_expert || d.category == ParamCategory::Common {
                out.push(d);
            }
        }
        Ok(out)
    }
}

fn looks_like_option(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && arg.parse::<f64>().is_err()
}

fn kind_mismatch(d: &ParameterDescriptor, expected: ParamKind) -> ConfigError {
    ConfigError::KindMismatch { option: d.name.to_string(),
                                expected: expected.as_str(),
                                found: d.kind.as_str() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ids, lists};

    fn small() -> ParameterRegistry {
        let mut r = ParameterRegistry::empty();
        r.register(ParameterDescriptor::new(ParamId("a"), "--alpha", "A", "", ParamValue::Int(1), "^[0-9]+$").unwrap())
         .unwrap();
        r.register(ParameterDescriptor::new(ParamId("b"), "--beta", "B", "", ParamValue::Bool(false), "^(0|1|true|false)$").unwrap())
         .unwrap();
        r.register(ParameterDescriptor::new(ParamId("c"), "--alpha", "C", "", ParamValue::Int(2), "^[0-9]+$").unwrap())
         .unwrap();
        r
    }

    #[test]
    fn register_rejects_duplicate_id() {
        let mut r = small();
        let dup = ParameterDescriptor::new(ParamId("a"), "--other", "A", "", ParamValue::Int(1), "^[0-9]+$").unwrap();
        assert_eq!(r.register(dup), Err(ConfigError::DuplicateParameter("a".into())));
    }

    #[test]
    fn register_rejects_default_outside_pattern() {
        let mut r = ParameterRegistry::empty();
        let d = ParameterDescriptor::new(ParamId("x"), "--x", "X", "", ParamValue::Int(9), "^[0-3]$").unwrap();
        assert!(matches!(r.register(d), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn combine_keeps_order_and_drops_repeats() {
        let mut r = small();
        r.build_list("one", &[ParamId("a"), ParamId("b")]).unwrap();
        r.build_list("two", &[ParamId("b")]).unwrap();
        r.combine_lists("both", &["two", "one"], &[ParamId("a")]).unwrap();
        assert_eq!(r.list("both").unwrap(), &[ParamId("b"), ParamId("a")]);
    }

    #[test]
    fn same_flag_twice_in_a_list_is_rejected() {
        let mut r = small();
        let err = r.build_list("bad", &[ParamId("a"), ParamId("c")]).unwrap_err();
        assert!(matches!(err, ConfigError::AmbiguousOption { .. }));
    }

    #[test]
    fn parse_handles_bare_and_valued_bools() {
        let mut r = small();
        r.build_list("l", &[ParamId("a"), ParamId("b")]).unwrap();
        let pos = r.parse("l", &["in.fq", "--beta", "--alpha", "7", "out"]).unwrap();
        assert_eq!(pos, vec!["in.fq".to_string(), "out".to_string()]);
        assert_eq!(r.value(ParamId("b")).unwrap(), &ParamValue::Bool(true));
        r.parse("l", &["--beta", "0"]).unwrap();
        assert_eq!(r.value(ParamId("b")).unwrap(), &ParamValue::Bool(false));
    }

    #[test]
    fn unknown_option_and_missing_value() {
        let mut r = small();
        r.build_list("l", &[ParamId("a")]).unwrap();
        assert_eq!(r.parse("l", &["--gamma"]), Err(ConfigError::UnknownOption("--gamma".into())));
        assert_eq!(r.parse("l", &["--alpha"]), Err(ConfigError::MissingValue("--alpha".into())));
    }

    #[test]
    fn compile_explicit_only_skips_defaults() {
        let mut r = small();
        r.build_list("l", &[ParamId("a"), ParamId("b")]).unwrap();
        assert_eq!(r.compile("l", false).unwrap(), "--alpha 1 --beta 0");
        assert_eq!(r.compile("l", true).unwrap(), "");
        r.force_pass_along(&[ParamId("b")]).unwrap();
        assert_eq!(r.compile("l", true).unwrap(), "--beta 0");
    }

    #[test]
    fn catalogue_installs_every_list() {
        let r = ParameterRegistry::new().unwrap();
        for name in [lists::CREATEDB, lists::HYBRIDASSEMBLEWORKFLOW, lists::EASY_HYBRID_ASSEMBLER, lists::SUMMARIZE] {
            assert!(!r.list(name).unwrap().is_empty(), "{name}");
        }
        assert_eq!(r.env_flag(ids::REMOVE_TMP_FILES).unwrap(), None);
        assert_eq!(r.str_value(ids::SUMMARY_PREFIX).unwrap(), "-");
    }
}
