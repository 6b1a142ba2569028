mod record;

use proc_macro::TokenStream;

/// Derive macro for the `Record` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(collection = Tenders)]
/// struct Tender {
///     id: RecordId,
///     title: String,
/// }
/// ```
///
/// - `collection = Variant` names the `Collection` variant the type lives in.
///   When omitted, the struct name plus `s` is used (`Vendor` -> `Vendors`).
/// - `#[record(id)]` on a field marks the identifier. Defaults to a field named `id`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
