//! Schema.org product data embedded as JSON-LD.

use serde_json::{Map, Value};

use crate::extraction::ExtractionResult;
use crate::price::clean_price;

const PRODUCT_TYPES: &[&str] = &["Product", "IndividualProduct", "ProductModel"];

/// Nested `@graph` documents deeper than this are ignored.
pub const MAX_GRAPH_DEPTH: usize = 16;

/// Lenient typed view over one JSON-LD object. Fields with an unexpected
/// shape read as absent.
#[derive(Debug, Clone, Copy)]
pub struct JsonLdNode<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> JsonLdNode<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    /// `@type` as a string or as a list of strings.
    pub fn type_tags(&self) -> Vec<&'a str> {
        match self.fields.get("@type") {
            Some(Value::String(tag)) => vec![tag.as_str()],
            Some(Value::Array(tags)) => tags.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_product(&self) -> bool {
        self.type_tags().iter().any(|tag| PRODUCT_TYPES.contains(tag))
    }

    pub fn name(&self) -> Option<&'a str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// A single URL, the first entry of a list, or an `ImageObject`'s `url`.
    pub fn image(&self) -> Option<&'a str> {
        fn image_url(value: &Value) -> Option<&str> {
            match value {
                Value::String(url) => Some(url.as_str()),
                Value::Object(object) => object.get("url").and_then(Value::as_str),
                _ => None,
            }
        }

        match self.fields.get("image")? {
            Value::Array(images) => images.first().and_then(image_url),
            other => image_url(other),
        }
    }

    /// The offer object, or the first one when `offers` is a list.
    pub fn offer(&self) -> Option<JsonLdNode<'a>> {
        match self.fields.get("offers")? {
            Value::Array(offers) => offers.first().and_then(JsonLdNode::from_value),
            other => JsonLdNode::from_value(other),
        }
    }

    /// Raw price text from `offers.price`, `offers.lowPrice` or `price`, in
    /// that order. Empty and zero values fall through to the next source.
    pub fn price_text(&self) -> Option<String> {
        let offer = self.offer();
        let candidates = [
            offer.and_then(|offer| offer.fields.get("price")),
            offer.and_then(|offer| offer.fields.get("lowPrice")),
            self.fields.get("price"),
        ];

        candidates.into_iter().flatten().find_map(price_literal)
    }

    pub fn graph(&self) -> &'a [Value] {
        match self.fields.get("@graph") {
            Some(Value::Array(members)) => members,
            _ => &[],
        }
    }
}

fn price_literal(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}

/// Fill unset fields of `result` from a JSON-LD value, walking `@graph`
/// members regardless of the node's own type.
pub fn extract_from_json_ld(value: &Value, result: &mut ExtractionResult) {
    walk(value, result, 0);
}

fn walk(value: &Value, result: &mut ExtractionResult, depth: usize) {
    if depth > MAX_GRAPH_DEPTH {
        tracing::debug!(depth, "JSON-LD nesting too deep, skipping");
        return;
    }

    let Some(node) = JsonLdNode::from_value(value) else {
        return;
    };

    if node.is_product() {
        if let Some(name) = node.name() {
            result.offer_name(name);
        }
        if let Some(image) = node.image() {
            result.offer_image(image);
        }
        if !result.price.is_set() {
            if let Some(text) = node.price_text() {
                result.offer_price(clean_price(&text));
            }
        }
    }

    for member in node.graph() {
        walk(member, result, depth + 1);
    }
}

/// Parse each script body as JSON and feed it to [`extract_from_json_ld`].
/// Top-level arrays contribute every element.
pub fn extract_blocks<'t>(blocks: impl IntoIterator<Item = &'t str>, result: &mut ExtractionResult) {
    for block in blocks {
        match serde_json::from_str::<Value>(block) {
            Ok(Value::Array(items)) => {
                for item in &items {
                    extract_from_json_ld(item, result);
                }
            }
            Ok(value) => extract_from_json_ld(&value, result),
            Err(e) => tracing::debug!(error = %e, "Skipping malformed JSON-LD block"),
        }
    }
}
