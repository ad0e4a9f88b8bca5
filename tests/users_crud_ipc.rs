use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_adminpaneld");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn adminpaneld");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

/// Returns the error object; panics if the request succeeded.
fn request_err(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(false),
        "{} unexpectedly succeeded: {}",
        method,
        value
    );
    value.get("error").cloned().unwrap_or_else(|| json!({}))
}

fn write_data(dir: &Path) {
    std::fs::write(
        dir.join("users.json"),
        json!([
            {
                "id": 1, "first_name": "Ada", "last_name": "Lovelace",
                "email": "ada@example.com", "verified": true, "middle_initial": "B",
                "created_at": "2020-06-18T10:00:00.000Z", "district": 5, "active": true
            },
            {
                "id": 2, "first_name": "alan", "last_name": "turing",
                "email": "alan@example.co.uk", "verified": false, "middle_initial": null,
                "created_at": "2019-02-01T08:30:00.000Z", "district": 7, "active": false
            },
            {
                "id": 3, "first_name": "Grace", "last_name": "Hopper",
                "email": "grace@example.com", "verified": true, "middle_initial": "M",
                "created_at": "2021-11-05T12:00:00.000Z", "district": 5, "active": false
            },
            {
                "id": 4, "first_name": "Edsger", "last_name": "Dijkstra",
                "email": "edsger@example.nl", "verified": false, "middle_initial": "W",
                "created_at": "2018-07-21T09:15:00.000Z", "district": 7, "active": true
            }
        ])
        .to_string(),
    )
    .expect("write users");
    std::fs::write(
        dir.join("districts.json"),
        json!([
            { "id": 5, "name": "North", "city": "Springfield" },
            { "id": 7, "name": "South", "city": "Shelbyville" }
        ])
        .to_string(),
    )
    .expect("write districts");
}

fn item_ids(view: &serde_json::Value) -> Vec<i64> {
    view["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|u| u["id"].as_i64().expect("item id"))
        .collect()
}

#[test]
fn create_update_delete_through_the_form_boundary() {
    let data = temp_dir("adminpanel-users-crud");
    write_data(&data);
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "data.select",
        json!({ "path": data.to_string_lossy() }),
    );

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "users.create",
        json!({
            "firstName": "Barbara",
            "middleInitial": "J",
            "lastName": "Liskov",
            "email": "barbara@mit.edu",
            "active": true,
            "district": 5
        }),
    );
    assert_eq!(created["user"]["id"], 5);
    assert_eq!(created["user"]["verified"], false);
    assert_eq!(created["user"]["middle_initial"], "J");

    let error = request_err(
        &mut stdin,
        &mut reader,
        "3",
        "users.create",
        json!({
            "firstName": "John2",
            "middleInitial": "AB",
            "lastName": "",
            "email": "a@b",
            "district": 5
        }),
    );
    assert_eq!(error["code"], "validation_failed");
    let fields = &error["details"]["fieldErrors"];
    assert_eq!(fields["firstName"], "Can only contain letters.");
    assert_eq!(fields["middleInitial"], "Should only be one character long.");
    assert_eq!(fields["lastName"], "This field is required.");
    assert_eq!(fields["email"], "Expected format \"someone@example.com\"");
    assert!(fields.get("district").is_none());

    let error = request_err(
        &mut stdin,
        &mut reader,
        "4",
        "users.create",
        json!({
            "firstName": "Ken",
            "lastName": "Thompson",
            "email": "ken@bell.com",
            "district": 99
        }),
    );
    assert_eq!(error["details"]["fieldErrors"]["district"], "Unknown district.");

    let view = request_ok(&mut stdin, &mut reader, "5", "users.view", json!({}));
    assert_eq!(item_ids(&view), vec![1, 2, 3, 4, 5]);

    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "users.update",
        json!({
            "userId": 2,
            "firstName": "Alan",
            "lastName": "Turing",
            "email": "alan@example.co.uk",
            "active": true,
            "district": 7
        }),
    );
    assert_eq!(updated["user"]["id"], 2);
    assert_eq!(updated["user"]["first_name"], "Alan");
    let view = request_ok(&mut stdin, &mut reader, "7", "users.view", json!({}));
    assert_eq!(item_ids(&view), vec![1, 2, 3, 4, 5]);
    assert_eq!(view["items"][1]["active"], true);

    let error = request_err(
        &mut stdin,
        &mut reader,
        "8",
        "users.update",
        json!({
            "userId": 42,
            "firstName": "Nobody",
            "lastName": "Here",
            "email": "nobody@example.com",
            "district": 5
        }),
    );
    assert_eq!(error["code"], "not_found");

    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "9",
        "users.delete",
        json!({ "userId": 3 }),
    );
    assert_eq!(deleted["removed"], true);
    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "10",
        "users.delete",
        json!({ "userId": 3 }),
    );
    assert_eq!(deleted["removed"], false);

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "11",
        "users.create",
        json!({
            "firstName": "Donald",
            "lastName": "Knuth",
            "email": "knuth@stanford.edu",
            "district": 7
        }),
    );
    assert_eq!(created["user"]["id"], 6);
    assert!(created["user"]["middle_initial"].is_null());

    let view = request_ok(&mut stdin, &mut reader, "12", "users.view", json!({}));
    assert_eq!(item_ids(&view), vec![1, 2, 4, 5, 6]);
    assert_eq!(view["total"], 5);

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(data);
}

#[test]
fn failed_reload_keeps_the_previous_collection() {
    let data = temp_dir("adminpanel-users-reload");
    write_data(&data);
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let error = request_err(&mut stdin, &mut reader, "1", "users.reload", json!({}));
    assert_eq!(error["code"], "no_data_source");

    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "data.select",
        json!({ "path": data.to_string_lossy() }),
    );
    std::fs::write(data.join("users.json"), "[{\"id\": ").expect("truncate users");

    let error = request_err(&mut stdin, &mut reader, "3", "users.reload", json!({}));
    assert_eq!(error["code"], "reload_failed");
    let view = request_ok(&mut stdin, &mut reader, "4", "users.view", json!({}));
    assert_eq!(view["total"], 4);

    // Districts reload on their own.
    let reloaded = request_ok(&mut stdin, &mut reader, "5", "districts.reload", json!({}));
    assert_eq!(reloaded["count"], 2);

    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "data.select",
        json!({ "path": data.to_string_lossy() }),
    );
    assert!(selected["usersLoaded"].is_null());
    assert_eq!(selected["districtsLoaded"], 2);
    let view = request_ok(&mut stdin, &mut reader, "7", "users.view", json!({}));
    assert_eq!(view["total"], 4);

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(data);
}

#[test]
fn data_select_honours_custom_file_names() {
    let data = temp_dir("adminpanel-users-files");
    write_data(&data);
    std::fs::rename(data.join("users.json"), data.join("people.json")).expect("rename users");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "data.select",
        json!({ "path": data.to_string_lossy(), "usersFile": "people.json" }),
    );
    assert_eq!(selected["usersLoaded"], 4);

    let error = request_err(&mut stdin, &mut reader, "2", "data.select", json!({}));
    assert_eq!(error["code"], "bad_params");

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(data);
}

#[test]
fn exhausted_ids_are_reported_and_the_sidecar_keeps_serving() {
    let data = temp_dir("adminpanel-users-id-max");
    write_data(&data);
    std::fs::write(
        data.join("users.json"),
        json!([
            {
                "id": i64::MAX, "first_name": "Max", "last_name": "Planck",
                "email": "max@example.de", "verified": false, "middle_initial": null,
                "created_at": "2020-01-01T00:00:00Z", "district": 5, "active": true
            }
        ])
        .to_string(),
    )
    .expect("write users");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "data.select",
        json!({ "path": data.to_string_lossy() }),
    );
    let error = request_err(
        &mut stdin,
        &mut reader,
        "2",
        "users.create",
        json!({ "firstName": "Lise", "lastName": "Meitner", "email": "lise@example.at", "district": 5 }),
    );
    assert_eq!(error["code"], "id_exhausted");

    let error = request_err(
        &mut stdin,
        &mut reader,
        "3",
        "store.dispatch",
        json!({ "action": { "type": "users/add", "payload": {
            "id": -1, "first_name": "Lise", "last_name": "Meitner",
            "email": "lise@example.at", "verified": false, "middle_initial": null,
            "created_at": "2020-01-01T00:00:00Z", "district": 5, "active": true
        } } }),
    );
    assert_eq!(error["code"], "id_exhausted");

    // Existing records can still be edited.
    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "users.update",
        json!({ "userId": i64::MAX, "firstName": "Max", "lastName": "Born", "email": "max@example.de", "district": 5 }),
    );
    assert_eq!(updated["user"]["last_name"], "Born");

    let view = request_ok(&mut stdin, &mut reader, "5", "users.view", json!({}));
    assert_eq!(view["total"], 1);

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(data);
}
