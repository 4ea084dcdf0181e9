//! Receipt extraction
//!
//! Sends a receipt image with a fixed prompt to a structured-output model and
//! validates the `{ items: [{ name, price }] }` response.

pub mod data_uri;
pub mod extractor;
pub mod model;
pub mod schema;

pub use data_uri::DataUri;
pub use extractor::ReceiptExtractor;
pub use model::{GeminiModel, GenerationRequest, StructuredModel};
pub use schema::{ExtractedItem, ExtractionOutput};
