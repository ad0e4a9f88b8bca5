use crate::ipc::error::{err, ok};
use crate::ipc::handlers::param_i64;
use crate::ipc::types::{AppState, Request};
use crate::model::{SortColumn, SortDirection};
use crate::store::{Action, ActiveOnlyFilter, DistrictFilter, SortPatch};
use serde::de::DeserializeOwned;
use serde_json::json;

/// The "All" entry of the district picker.
const ALL_DISTRICTS: i64 = -1;

fn filter_result(state: &AppState, req: &Request) -> serde_json::Value {
    let filter = state.store.filter();
    ok(
        &req.id,
        json!({ "filter": filter, "anyEnabled": filter.is_active() }),
    )
}

fn sort_result(state: &AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "sort": state.store.sort() }))
}

/// Optional enum param; `Err` when present but not a known value.
fn optional_param<T: DeserializeOwned>(req: &Request, key: &str) -> Result<Option<T>, String> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| format!("invalid {key}: {e}")),
    }
}

fn handle_filter_district(state: &mut AppState, req: &Request) -> serde_json::Value {
    let district_id = match req.params.get("districtId") {
        None | Some(serde_json::Value::Null) => ALL_DISTRICTS,
        Some(_) => match param_i64(req, "districtId") {
            Some(v) => v,
            None => return err(&req.id, "bad_params", "districtId must be an integer", None),
        },
    };
    let district = if district_id == ALL_DISTRICTS {
        DistrictFilter {
            enabled: false,
            value: 0,
        }
    } else {
        DistrictFilter {
            enabled: true,
            value: district_id,
        }
    };
    state.store.dispatch(Action::FilterDistrict(district));
    filter_result(state, req)
}

fn handle_filter_active_only(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(enabled) = req.params.get("enabled").and_then(|v| v.as_bool()) else {
        return err(&req.id, "bad_params", "missing enabled", None);
    };
    state
        .store
        .dispatch(Action::FilterActiveOnly(ActiveOnlyFilter { enabled }));
    filter_result(state, req)
}

fn handle_filter_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.store.dispatch(Action::FilterReset);
    filter_result(state, req)
}

fn handle_sort_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let column = match optional_param::<SortColumn>(req, "column") {
        Ok(v) => v,
        Err(msg) => return err(&req.id, "bad_params", msg, None),
    };
    let direction = match optional_param::<SortDirection>(req, "direction") {
        Ok(v) => v,
        Err(msg) => return err(&req.id, "bad_params", msg, None),
    };
    // Picking a column or a direction turns sorting on.
    state.store.dispatch(Action::Sort(SortPatch {
        enabled: Some(true),
        column,
        direction,
    }));
    sort_result(state, req)
}

fn handle_sort_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.store.dispatch(Action::SortReset);
    sort_result(state, req)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "filter.get" => Some(filter_result(state, req)),
        "filter.district" => Some(handle_filter_district(state, req)),
        "filter.activeOnly" => Some(handle_filter_active_only(state, req)),
        "filter.reset" => Some(handle_filter_reset(state, req)),
        "sort.get" => Some(sort_result(state, req)),
        "sort.set" => Some(handle_sort_set(state, req)),
        "sort.reset" => Some(handle_sort_reset(state, req)),
        _ => None,
    }
}
