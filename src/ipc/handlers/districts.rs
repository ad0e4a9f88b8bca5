use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::source::{self, ReloadError};
use crate::store::Action;
use serde_json::json;
use tracing::{info, warn};

pub(crate) fn reload(state: &mut AppState) -> Result<usize, ReloadError> {
    let Some(cfg) = state.source.as_ref() else {
        return Err(ReloadError::NoDataSource);
    };
    match source::load_districts(cfg) {
        Ok(districts) => {
            let count = districts.len();
            state.store.dispatch(Action::DistrictsSet(districts));
            info!(count, "districts reloaded");
            Ok(count)
        }
        Err(e) => {
            warn!(error = %format!("{e:#}"), "districts reload failed; keeping previous collection");
            Err(ReloadError::Load(e))
        }
    }
}

fn handle_districts_reload(state: &mut AppState, req: &Request) -> serde_json::Value {
    match reload(state) {
        Ok(count) => ok(&req.id, json!({ "count": count })),
        Err(e) => err(&req.id, e.code(), e.to_string(), None),
    }
}

fn handle_districts_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({ "districts": state.store.districts().districts }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "districts.reload" => Some(handle_districts_reload(state, req)),
        "districts.list" => Some(handle_districts_list(state, req)),
        _ => None,
    }
}
