//! Valores de parámetros y su etiqueta de origen.
//!
//! `Setting` sustituye al flag `wasSet`: un valor es `Default` hasta que el
//! usuario lo fija o el workflow lo fuerza con `force_pass_along`, y sólo los
//! `Explicit` sobreviven a una compilación `explicit_only`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tipo semántico de un parámetro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    Str,
    MultiInt,
    MultiFloat,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Str => "string",
            ParamKind::MultiInt => "multi-int",
            ParamKind::MultiFloat => "multi-float",
        }
    }
}

/// Par de valores (aminoácidos, nucleótidos) para parámetros que dependen del alfabeto.
///
/// Se escribe `aa:X,nucl:Y`. Un valor simple `X` fija ambos.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiParam<T> {
    pub aminoacids: T,
    pub nucleotides: T,
}

impl<T: Copy> MultiParam<T> {
    pub fn new(aminoacids: T, nucleotides: T) -> Self {
        Self { aminoacids, nucleotides }
    }

    pub fn both(value: T) -> Self {
        Self { aminoacids: value, nucleotides: value }
    }
}

impl<T: fmt::Display> fmt::Display for MultiParam<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aa:{},nucl:{}", self.aminoacids, self.nucleotides)
    }
}

impl<T: FromStr + Copy> FromStr for MultiParam<T> {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains(':') {
            return s.parse::<T>().map(Self::both).map_err(|_| ());
        }
        let mut aa = None;
        let mut nucl = None;
        for part in s.split(',') {
            let (tag, raw) = part.split_once(':').ok_or(())?;
            let v = raw.parse::<T>().map_err(|_| ())?;
            match tag {
                "aa" => aa = Some(v),
                "nucl" => nucl = Some(v),
                _ => return Err(()),
            }
        }
        match (aa, nucl) {
            (Some(a), Some(n)) => Ok(Self::new(a, n)),
            (Some(v), None) | (None, Some(v)) => Ok(Self::both(v)),
            (None, None) => Err(()),
        }
    }
}

/// Valor tipado de un parámetro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    MultiInt(MultiParam<i64>),
    MultiFloat(MultiParam<f64>),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Str(_) => ParamKind::Str,
            ParamValue::MultiInt(_) => ParamKind::MultiInt,
            ParamValue::MultiFloat(_) => ParamKind::MultiFloat,
        }
    }

    /// Interpreta `raw` según `kind`. Devuelve `None` si no es convertible;
    /// el llamador decide qué error reportar.
    pub fn parse(kind: ParamKind, raw: &str) -> Option<Self> {
        match kind {
            ParamKind::Bool => match raw {
                "1" | "true" => Some(ParamValue::Bool(true)),
                "0" | "false" => Some(ParamValue::Bool(false)),
                _ => None,
            },
            ParamKind::Int => raw.parse().ok().map(ParamValue::Int),
            ParamKind::Float => raw.parse().ok().map(ParamValue::Float),
            ParamKind::Str => Some(ParamValue::Str(raw.to_string())),
            ParamKind::MultiInt => raw.parse().ok().map(ParamValue::MultiInt),
            ParamKind::MultiFloat => raw.parse().ok().map(ParamValue::MultiFloat),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Forma textual usada en la línea de argumentos (bools como `1`/`0`).
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::MultiInt(m) => write!(f, "{m}"),
            ParamValue::MultiFloat(m) => write!(f, "{m}"),
        }
    }
}

/// Origen de un valor: default del registro/workflow o fijado explícitamente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Setting {
    Default(ParamValue),
    Explicit(ParamValue),
}

impl Setting {
    pub fn value(&self) -> &ParamValue {
        match self {
            Setting::Default(v) | Setting::Explicit(v) => v,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Setting::Explicit(_))
    }

    /// Marca el valor actual como explícito sin cambiarlo.
    pub fn into_explicit(self) -> Setting {
        match self {
            Setting::Default(v) | Setting::Explicit(v) => Setting::Explicit(v),
        }
    }
}
