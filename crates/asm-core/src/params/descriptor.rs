//! Descriptor de una opción reconocida.

use std::fmt;

use regex::Regex;

use super::value::{ParamKind, ParamValue, Setting};
use crate::errors::ConfigError;

/// Identificador estable de un parámetro (identidad del descriptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub &'static str);

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Categoría para listados de ayuda.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamCategory {
    Common,
    Expert,
}

#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub id: ParamId,
    /// Flag tal como aparece en la línea de comandos (`--threads`, `-k`).
    pub name: &'static str,
    pub display: &'static str,
    pub help: String,
    pub kind: ParamKind,
    pub pattern: Regex,
    pub category: ParamCategory,
    setting: Setting,
}

impl ParameterDescriptor {
    /// Construye un descriptor. El patrón se compila aquí; el default se
    /// valida al registrarlo.
    pub fn new(id: ParamId,
               name: &'static str,
               display: &'static str,
               help: &str,
               default: ParamValue,
               pattern: &str)
               -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern { option: name.to_string(),
                                                                                     reason: e.to_string() })?;
        Ok(Self { id,
                  name,
                  display,
                  help: help.to_string(),
                  kind: default.kind(),
                  pattern,
                  category: ParamCategory::Common,
                  setting: Setting::Default(default) })
    }

    pub fn setting(&self) -> &Setting {
        &self.setting
    }

    pub fn value(&self) -> &ParamValue {
        self.setting.value()
    }

    pub fn is_explicit(&self) -> bool {
        self.setting.is_explicit()
    }

    /// Comprueba tipo y patrón de un valor sin asignarlo.
    pub fn check(&self, value: &ParamValue) -> Result<(), ConfigError> {
        if value.kind() != self.kind {
            return Err(ConfigError::KindMismatch { option: self.name.to_string(),
                                                   expected: self.kind.as_str(),
                                                   found: value.kind().as_str() });
        }
        let raw = value.to_string();
        if !self.pattern.is_match(&raw) {
            return Err(ConfigError::InvalidValue { option: self.name.to_string(), value: raw });
        }
        Ok(())
    }

    /// Convierte el texto del usuario y lo valida contra el patrón.
    pub fn parse_value(&self, raw: &str) -> Result<ParamValue, ConfigError> {
        let invalid = || ConfigError::InvalidValue { option: self.name.to_string(), value: raw.to_string() };
        let value = ParamValue::parse(self.kind, raw).ok_or_else(invalid)?;
        if !self.pattern.is_match(raw) && !self.pattern.is_match(&value.to_string()) {
            return Err(invalid());
        }
        Ok(value)
    }

    pub(crate) fn set_default(&mut self, value: ParamValue) -> Result<(), ConfigError> {
        self.check(&value)?;
        self.setting = match &self.setting {
            // un default de workflow nunca pisa un valor explícito
            Setting::Explicit(v) => Setting::Explicit(v.clone()),
            Setting::Default(_) => Setting::Default(value),
        };
        Ok(())
    }

    pub(crate) fn set_explicit(&mut self, value: ParamValue) -> Result<(), ConfigError> {
        self.check(&value)?;
        self.setting = Setting::Explicit(value);
        Ok(())
    }

    pub(crate) fn force_explicit(&mut self) {
        self.setting = self.setting.clone().into_explicit();
    }
}
