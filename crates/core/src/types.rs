use std::collections::BTreeMap;

/// Identifier of a domain entity, as reported in `NotFound` errors.
pub type DbId = i64;

/// Field name to the list of violation messages reported for it.
///
/// Ordered so that serialized error payloads are deterministic.
pub type FieldErrors = BTreeMap<String, Vec<String>>;
