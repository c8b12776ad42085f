pub mod error;
pub mod execute;
pub mod model;
pub mod store;

pub use error::StoreError;
pub use execute::{execute_box, output_to_json, record_result};
pub use model::{CanvasArrow, CanvasBox, CanvasWorkspace, StoredResult};
pub use store::{JsonStore, from_json_str, to_json_string};

// Re-export for convenience
pub use cellwire_eval::{Evaluator, Resolution};
