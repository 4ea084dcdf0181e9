//! Input and output shapes of the receipt extraction call

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{FiscalError, FiscalResult};

/// `{ receiptDataUri: string }`
pub fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "receiptDataUri": {
                "type": "string",
                "description": "A photo of a grocery receipt, as a data URI that must include a MIME type and use Base64 encoding. Expected format: 'data:<mimetype>;base64,<encoded_data>'."
            }
        },
        "required": ["receiptDataUri"]
    })
}

/// `{ items: [{ name: string, price: number }] }`
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "items": {
                "type": "array",
                "description": "A list of grocery items and their prices extracted from the receipt.",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "The name of the grocery item." },
                        "price": { "type": "number", "description": "The price of the grocery item." }
                    },
                    "required": ["name", "price"]
                }
            }
        },
        "required": ["items"]
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtractedItem {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtractionOutput {
    pub items: Vec<ExtractedItem>,
}

impl ExtractionOutput {
    /// Parse a raw model response and check it against the output schema
    pub fn from_value(value: Value) -> FiscalResult<Self> {
        let output: Self = serde_json::from_value(value)
            .map_err(|e| FiscalError::Extraction(format!("response does not match schema: {}", e)))?;
        output.validate()?;
        Ok(output)
    }

    pub fn validate(&self) -> FiscalResult<()> {
        if self.items.is_empty() {
            return Err(FiscalError::Extraction("no items found on the receipt".into()));
        }
        for (index, item) in self.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(FiscalError::Extraction(format!(
                    "item {} has an empty name",
                    index + 1
                )));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(FiscalError::Extraction(format!(
                    "item '{}' has an invalid price {}",
                    item.name, item.price
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_output() {
        let output = ExtractionOutput::from_value(json!({
            "items": [{"name": "Milk", "price": 2.5}, {"name": "Bag", "price": 0}]
        }))
        .unwrap();
        assert_eq!(output.items.len(), 2);
        assert_eq!(output.items[1].price, 0.0);
    }

    #[test]
    fn test_missing_items_fails() {
        let err = ExtractionOutput::from_value(json!({"lines": []})).unwrap_err();
        assert!(err.is_extraction());
    }

    #[test]
    fn test_wrong_types_and_empty_values_fail() {
        for value in [
            json!({"items": []}),
            json!({"items": [{"name": "Milk", "price": "2.50"}]}),
            json!({"items": [{"name": " ", "price": 1.0}]}),
            json!({"items": [{"name": "Refund", "price": -1.0}]}),
            json!("items"),
        ] {
            assert!(ExtractionOutput::from_value(value).unwrap_err().is_extraction());
        }
    }

    #[test]
    fn test_output_schema_requires_items() {
        assert_eq!(output_schema()["required"], json!(["items"]));
        assert_eq!(input_schema()["required"], json!(["receiptDataUri"]));
    }
}
