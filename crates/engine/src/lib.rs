pub use descriptor::{EntityDescriptor, EqualityRule, FieldDescriptor, FieldType};
pub use entities::EntityKind;
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use record::{FieldState, FieldValue, PartialRecord, Record};
pub use repository::{RepositoryPort, SeaRepository};

pub mod codec;
mod descriptor;
mod entities;
mod error;
pub mod merge;
mod ops;
pub mod pipeline;
mod record;
mod repository;
pub mod validator;

type ResultEngine<T> = Result<T, EngineError>;
