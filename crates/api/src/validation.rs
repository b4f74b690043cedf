use tablegate_core::{DispatchFailure, DispatchResult};

use crate::payload::Body;

/// Check that every expected key is present, in order.
///
/// Fails on the first missing key with a model failure naming it.
pub fn validate_params<I, K>(body: &Body, expected: I) -> DispatchResult<()>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    for key in expected {
        let key = key.as_ref();
        if !body.contains_key(key) {
            return Err(DispatchFailure::model(format!(
                "Parameter {key} not found. Invalid payload."
            )));
        }
    }
    Ok(())
}
