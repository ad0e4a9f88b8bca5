pub mod core;
pub mod criteria;
pub mod districts;
pub mod prompts;
pub mod store;
pub mod users;

use crate::ipc::types::Request;

/// Integer param lookup; `None` when absent or not an integer.
pub(crate) fn param_i64(req: &Request, key: &str) -> Option<i64> {
    req.params.get(key).and_then(|v| v.as_i64())
}
