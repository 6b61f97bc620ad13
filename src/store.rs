//! Generic record-store operations over named slots.
//!
//! Each slot holds one JSON document (usually an array of records keyed by a
//! string `id`). Reads degrade to an empty/default value when the slot is
//! missing or holds malformed JSON; writes overwrite the slot wholesale and
//! failures are swallowed, so callers never have to handle storage errors.

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

// Slot keys. One feature module owns each slot's shape; everything else goes
// through that module rather than touching the key directly.
pub const MEALS: &str = "td_meals";
pub const ORDERS: &str = "td_orders";
pub const SUBSCRIPTIONS: &str = "td_subscriptions";
pub const PAYMENT_METHODS: &str = "td_payment_methods";
pub const PAYMENTS: &str = "td_payments";
pub const ADMIN_USERS: &str = "td_admin_users";
pub const ADMIN_CURRENT: &str = "td_admin_current";
pub const PLAN_CATALOG: &str = "td_plan_catalog";
pub const SETTINGS: &str = "td_settings";
pub const SUPPORT_TICKETS: &str = "td_support_tickets";
pub const PLAN_CHECKOUT: &str = "td_plan_checkout";
pub const USER_NAME: &str = "td_user_name";
pub const USER_EMAIL: &str = "td_user_email";
pub const USER_PHONE: &str = "td_user_phone";
pub const USER_PAY_METHOD: &str = "td_user_pay_method";
pub const USER_WALLET: &str = "td_user_wallet";
pub const USER_REF_CODE: &str = "td_user_ref_code";

pub fn read_slot(conn: &Connection, key: &str) -> Option<String> {
    conn.query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
        row.get(0)
    })
    .ok()
}

pub fn write_slot(conn: &Connection, key: &str, value: &str) {
    let result = conn.execute(
        "INSERT INTO slots (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        rusqlite::params![key, value],
    );
    if let Err(e) = result {
        log::warn!("failed to write slot {key}: {e}");
    }
}

pub fn clear_slot(conn: &Connection, key: &str) {
    if let Err(e) = conn.execute("DELETE FROM slots WHERE key = ?1", [key]) {
        log::warn!("failed to clear slot {key}: {e}");
    }
}

/// Load the record list in a slot, or `[]` when the slot is missing or corrupt.
pub fn load<T: DeserializeOwned>(conn: &Connection, slot: &str) -> Vec<T> {
    match read_slot(conn, slot) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("slot {slot} holds malformed JSON, treating as empty: {e}");
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}

/// Overwrite a slot with the given record list. Last writer wins.
pub fn save<T: Serialize>(conn: &Connection, slot: &str, list: &[T]) {
    match serde_json::to_string(list) {
        Ok(raw) => write_slot(conn, slot, &raw),
        Err(e) => log::warn!("failed to serialize slot {slot}: {e}"),
    }
}

/// Prepend a record, newest first (matches how every list screen sorts).
pub fn add_front<T: Serialize + DeserializeOwned>(conn: &Connection, slot: &str, record: T) {
    let mut list: Vec<T> = load(conn, slot);
    list.insert(0, record);
    save(conn, slot, &list);
}

/// Shallow-merge a JSON object patch into the record with the given id.
/// The merged record must still deserialize as `T`; a patch that breaks a
/// field's type is rejected and the slot is left untouched, since one
/// ill-typed record would make `load` degrade the whole slot to empty.
/// `Ok(false)` when the id is absent.
pub fn patch_by_id<T: DeserializeOwned>(
    conn: &Connection,
    slot: &str,
    id: &str,
    patch: &Value,
) -> Result<bool, String> {
    let Some(fields) = patch.as_object() else {
        return Err("Patch must be a JSON object".to_string());
    };

    let mut list: Vec<Value> = load(conn, slot);
    let mut hit = false;

    for record in list.iter_mut() {
        if record.get("id").and_then(Value::as_str) != Some(id) {
            continue;
        }
        if let Some(obj) = record.as_object_mut() {
            let mut merged = obj.clone();
            for (k, v) in fields {
                merged.insert(k.clone(), v.clone());
            }
            serde_json::from_value::<T>(Value::Object(merged.clone()))
                .map_err(|e| format!("Invalid patch: {e}"))?;
            *obj = merged;
            hit = true;
        }
    }

    if hit {
        save(conn, slot, &list);
    }
    Ok(hit)
}

/// Remove the record with the given id. No-op when the id is absent.
pub fn remove_by_id(conn: &Connection, slot: &str, id: &str) -> bool {
    let mut list: Vec<Value> = load(conn, slot);
    let before = list.len();
    list.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));

    if list.len() == before {
        return false;
    }
    save(conn, slot, &list);
    true
}

/// Load a singleton slot, falling back to the given value on missing/corrupt data.
pub fn load_or<T: DeserializeOwned>(conn: &Connection, slot: &str, fallback: T) -> T {
    match read_slot(conn, slot) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or(fallback),
        None => fallback,
    }
}

pub fn save_value<T: Serialize>(conn: &Connection, slot: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => write_slot(conn, slot, &raw),
        Err(e) => log::warn!("failed to serialize slot {slot}: {e}"),
    }
}

// Scalar profile slots hold plain strings, not JSON.
pub fn read_string(conn: &Connection, key: &str) -> Option<String> {
    read_slot(conn, key)
}

pub fn write_string(conn: &Connection, key: &str, value: &str) {
    write_slot(conn, key, value);
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Human-enterable unique id, e.g. `ORD-1724400000000-x3k9q`.
pub fn uid(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(char::from)
        .collect();
    format!("{}-{}-{}", prefix, now_millis(), suffix.to_lowercase())
}
