use crate::{Error, ObjectKey, Result, SEPARATOR};

/// Split rendered key back into its parts
///
/// Accepts `name` and `namespace/name`, empty namespace is treated as absent
pub fn parse(input: &str) -> Result<ObjectKey> {
    let mut parts = input.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => ObjectKey::new(None, Some(name)),
        (Some(namespace), Some(name), None) => ObjectKey::new(Some(namespace), Some(name)),
        _ => Err(Error::Malformed(input.to_owned())),
    }
}
