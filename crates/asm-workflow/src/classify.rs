//! Modo de entrada según el número de argumentos posicionales.
//!
//! Los dos últimos posicionales son la salida y el directorio de trabajo;
//! el resto son lecturas. Sólo cuenta argumentos, nunca mira contenidos.

use asm_core::UsageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Lecturas en pares `_1`/`_2`.
    Paired,
    Single,
}

impl InputMode {
    /// Valor de `PAIRED_END` en el entorno del pipeline (`None` = sin definir).
    pub fn env_value(self) -> Option<&'static str> {
        match self {
            InputMode::Paired => Some("1"),
            InputMode::Single => None,
        }
    }
}

/// Clasifica por número total de posicionales `n`:
///
/// - `n < 3`: `TooFewInputs`.
/// - `n - 2` par (4, 6, 8, ...): `Paired`; cualquier nº par de lecturas
///   cuenta como pares, no sólo dos.
/// - `n == 3`: `Single`.
/// - resto (5, 7, ...): `TooManyInputs`.
pub fn classify_inputs<S: AsRef<str>>(files: &[S]) -> Result<InputMode, UsageError> {
    let n = files.len();
    if n < 3 {
        Err(UsageError::TooFewInputs(n))
    } else if (n - 2) % 2 == 0 {
        Ok(InputMode::Paired)
    } else if n == 3 {
        Ok(InputMode::Single)
    } else {
        Err(UsageError::TooManyInputs(n))
    }
}
