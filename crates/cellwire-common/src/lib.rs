pub mod env;
pub mod error;
pub mod id;
pub mod value;

pub use env::Environment;
pub use error::{CanvasError, CanvasErrorKind};
pub use id::NodeId;
pub use value::Value;
