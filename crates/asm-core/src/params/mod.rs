//! Parámetros: registro, compilación a cadenas por etapa y configuración
//! de workflows.

pub mod catalogue;
pub mod descriptor;
pub mod registry;
pub mod value;
pub mod workflow;

pub use catalogue::{ids, lists};
pub use descriptor::{ParamCategory, ParamId, ParameterDescriptor};
pub use registry::ParameterRegistry;
pub use value::{MultiParam, ParamKind, ParamValue, Setting};
pub use workflow::WorkflowConfiguration;
