//! Receipt image in, grocery items out

use std::path::Path;

use serde_json::Value;

use crate::error::{FiscalError, FiscalResult};
use crate::models::{GroceryItem, ItemId, Money};

use super::data_uri::DataUri;
use super::model::{GenerationRequest, StructuredModel};
use super::schema::{input_schema, output_schema, ExtractionOutput};

const RECEIPT_PROMPT: &str = "You are an assistant specialized in extracting data from grocery receipts. \
Given an image of a grocery receipt, extract the names of the items purchased and their \
corresponding prices. Return the data in a structured JSON format as described in the output schema.";

/// Runs the extraction flow against a [`StructuredModel`]
pub struct ReceiptExtractor<M> {
    model: M,
    input_schema: Value,
    output_schema: Value,
}

impl<M: StructuredModel> ReceiptExtractor<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            input_schema: input_schema(),
            output_schema: output_schema(),
        }
    }

    /// Extract items from a `data:` URI
    ///
    /// A malformed URI is rejected before any call is made. Every other failure
    /// is an extraction error; nothing is retried and no partial list is returned.
    pub fn extract(&self, receipt_data_uri: &str) -> FiscalResult<Vec<GroceryItem>> {
        let image = DataUri::parse(receipt_data_uri)?;
        self.extract_image(&image)
    }

    /// Extract items from an image file on disk
    pub fn extract_file(&self, path: &Path) -> FiscalResult<Vec<GroceryItem>> {
        let image = DataUri::from_file(path)?;
        self.extract_image(&image)
    }

    pub fn extract_image(&self, image: &DataUri) -> FiscalResult<Vec<GroceryItem>> {
        let request = GenerationRequest {
            prompt: RECEIPT_PROMPT,
            image,
            input_schema: &self.input_schema,
            output_schema: &self.output_schema,
        };

        let raw = self.model.generate(&request).map_err(|e| match e {
            FiscalError::Extraction(_) => e,
            other => FiscalError::Extraction(other.to_string()),
        })?;
        let output = ExtractionOutput::from_value(raw)?;

        let items = output
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let price = Money::from_decimal(item.price).ok_or_else(|| {
                    FiscalError::Extraction(format!("item '{}' has an invalid price", item.name))
                })?;
                Ok(GroceryItem {
                    id: ItemId::for_extracted(index),
                    name: item.name.trim().to_string(),
                    price,
                })
            })
            .collect::<FiscalResult<Vec<_>>>()?;

        tracing::info!(count = items.len(), "extracted receipt items");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    /// Returns a canned response and counts calls
    struct FakeModel {
        response: FiscalResult<Value>,
        calls: Cell<usize>,
    }

    impl FakeModel {
        fn returning(response: FiscalResult<Value>) -> Self {
            Self {
                response,
                calls: Cell::new(0),
            }
        }
    }

    impl StructuredModel for FakeModel {
        fn generate(&self, request: &GenerationRequest<'_>) -> FiscalResult<Value> {
            self.calls.set(self.calls.get() + 1);
            assert!(request.prompt.contains("grocery receipts"));
            assert_eq!(request.output_schema["required"], json!(["items"]));
            self.response.clone()
        }
    }

    const RECEIPT: &str = "data:image/jpeg;base64,/9j/";

    #[test]
    fn test_extracts_exact_items() {
        let model = FakeModel::returning(Ok(json!({
            "items": [{"name": "Milk", "price": 2.50}, {"name": "Bread", "price": 3.20}]
        })));
        let items = ReceiptExtractor::new(&model).extract(RECEIPT).unwrap();

        let pairs: Vec<_> = items.iter().map(|i| (i.name.as_str(), i.price.cents())).collect();
        assert_eq!(pairs, [("Milk", 250), ("Bread", 320)]);
        assert!(items[0].id.as_str().starts_with("ocr_item_0_"));
        assert_ne!(items[0].id, items[1].id);
        assert_eq!(model.calls.get(), 1);
    }

    #[test]
    fn test_missing_items_fails() {
        let model = FakeModel::returning(Ok(json!({"total": 5.7})));
        let err = ReceiptExtractor::new(&model).extract(RECEIPT).unwrap_err();
        assert!(err.is_extraction());
    }

    #[test]
    fn test_invalid_uri_makes_no_call() {
        let model = FakeModel::returning(Ok(json!({"items": []})));
        let err = ReceiptExtractor::new(&model).extract("not-a-uri").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn test_service_failure_is_extraction_error() {
        let model = FakeModel::returning(Err(FiscalError::Io("connection reset".into())));
        let err = ReceiptExtractor::new(&model).extract(RECEIPT).unwrap_err();
        assert!(err.is_extraction());
        assert!(err.to_string().contains("connection reset"));
    }
}
