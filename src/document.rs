//! Untyped record documents and the id rules shared by the store.

use serde_json::{Map, Value};

/// Numeric record identifier, unique within one collection.
pub type RecordId = u64;

/// A record as stored: a flat JSON object carrying at least a numeric `id`.
pub type Document = Map<String, Value>;

/// Field name holding the record identifier.
pub const ID_FIELD: &str = "id";

/// Read the `id` of a document, if it has a numeric one.
pub fn document_id(doc: &Document) -> Option<RecordId> {
    doc.get(ID_FIELD).and_then(Value::as_u64)
}

/// Next id for a collection: `max(existing ids, 0) + 1`.
///
/// Ids freed by deletion are only reused once every higher id is gone too.
pub fn next_id(docs: &[Document]) -> RecordId {
    docs.iter().filter_map(document_id).max().unwrap_or(0) + 1
}

/// Build a full record from caller fields and an assigned id.
///
/// The assigned id wins over any `id` the caller passed.
pub fn with_id(mut fields: Document, id: RecordId) -> Document {
    fields.insert(ID_FIELD.to_string(), Value::from(id));
    fields
}

/// Shallow-merge `partial` over `target`. The `id` field is never overwritten.
pub fn merge_fields(target: &mut Document, partial: Document) {
    for (key, value) in partial {
        if key == ID_FIELD {
            continue;
        }
        target.insert(key, value);
    }
}

/// Convert any JSON value into a document, rejecting non-objects.
pub fn into_document(value: Value) -> Option<Document> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
