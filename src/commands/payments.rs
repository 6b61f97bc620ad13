use rusqlite::Connection;
use serde_json::Value;
use tauri::AppHandle;

use crate::db::DatabaseExt;
use crate::models::{MethodKind, Payment, PaymentMethod, PaymentStatus, RefType};
use crate::store;

// ---- payment methods catalog ----

pub fn methods(conn: &Connection) -> Vec<PaymentMethod> {
    store::load(conn, store::PAYMENT_METHODS)
}

pub fn enabled_online_methods(conn: &Connection) -> Vec<PaymentMethod> {
    methods(conn)
        .into_iter()
        .filter(|m| m.kind == MethodKind::Online && m.enabled)
        .collect()
}

pub fn cod_enabled(conn: &Connection) -> bool {
    methods(conn)
        .iter()
        .any(|m| m.kind == MethodKind::Cod && m.enabled)
}

pub fn add_method(conn: &Connection, name: &str, kind: MethodKind) -> Result<PaymentMethod, String> {
    if name.trim().is_empty() {
        return Err("Method name is required".to_string());
    }
    let now = store::now_millis();
    let method = PaymentMethod {
        id: store::uid("PM"),
        name: name.trim().to_string(),
        kind,
        enabled: true,
        created_at: now,
        updated_at: now,
    };
    store::add_front(conn, store::PAYMENT_METHODS, method.clone());
    Ok(method)
}

/// Toggling or renaming a method never rewrites past payments; they keep the
/// method name they were logged with.
pub fn update_method(conn: &Connection, id: &str, patch: Value) -> Result<bool, String> {
    let Value::Object(mut fields) = patch else {
        return Err("Patch must be a JSON object".to_string());
    };
    fields.insert("updatedAt".to_string(), store::now_millis().into());
    store::patch_by_id::<PaymentMethod>(conn, store::PAYMENT_METHODS, id, &Value::Object(fields))
}

pub fn remove_method(conn: &Connection, id: &str) -> bool {
    store::remove_by_id(conn, store::PAYMENT_METHODS, id)
}

pub fn seed_methods_if_empty(conn: &Connection) {
    if !methods(conn).is_empty() {
        return;
    }

    let now = store::now_millis();
    let seed = [
        ("Card (Demo)", MethodKind::Online, true),
        ("JazzCash", MethodKind::Online, true),
        ("EasyPaisa", MethodKind::Online, false),
        ("Cash on Delivery", MethodKind::Cod, true),
    ];
    let list: Vec<PaymentMethod> = seed
        .into_iter()
        .map(|(name, kind, enabled)| PaymentMethod {
            id: store::uid("PM"),
            name: name.to_string(),
            kind,
            enabled,
            created_at: now,
            updated_at: now,
        })
        .collect();
    store::save(conn, store::PAYMENT_METHODS, &list);
}

// ---- ledger ----

pub fn all(conn: &Connection) -> Vec<Payment> {
    store::load(conn, store::PAYMENTS)
}

/// The ledger is append-only: records are prepended and never edited in place.
#[allow(clippy::too_many_arguments)]
pub fn append(
    conn: &Connection,
    ref_type: RefType,
    ref_id: &str,
    amount: i64,
    method_name: &str,
    method_kind: MethodKind,
    status: PaymentStatus,
    phone: Option<String>,
    email: Option<String>,
) -> Payment {
    let payment = Payment {
        id: store::uid("PAY"),
        ref_type,
        ref_id: ref_id.to_string(),
        amount,
        method_name: method_name.to_string(),
        method_kind,
        status,
        phone,
        email,
        refund_of: None,
        created_at: store::now_millis(),
    };
    store::add_front(conn, store::PAYMENTS, payment.clone());
    payment
}

/// Reverse a payment by appending a negated ledger entry linked through
/// `refundOf`. The original record is untouched; a payment can be refunded
/// once and a refund entry cannot itself be refunded.
pub fn refund(conn: &Connection, payment_id: &str) -> Result<Payment, String> {
    let ledger = all(conn);

    let original = ledger
        .iter()
        .find(|p| p.id == payment_id)
        .ok_or_else(|| "Payment not found".to_string())?;

    if original.refund_of.is_some() || original.status == PaymentStatus::Refunded {
        return Err("Cannot refund a refund entry".to_string());
    }
    if ledger.iter().any(|p| p.refund_of.as_deref() == Some(payment_id)) {
        return Err("Payment has already been refunded".to_string());
    }

    let reversal = Payment {
        id: store::uid("PAY"),
        ref_type: original.ref_type,
        ref_id: original.ref_id.clone(),
        amount: -original.amount,
        method_name: original.method_name.clone(),
        method_kind: original.method_kind,
        status: PaymentStatus::Refunded,
        phone: original.phone.clone(),
        email: original.email.clone(),
        refund_of: Some(original.id.clone()),
        created_at: store::now_millis(),
    };
    store::add_front(conn, store::PAYMENTS, reversal.clone());
    Ok(reversal)
}

// ---- tauri commands ----

#[tauri::command]
pub fn get_payment_methods(app: AppHandle) -> Result<Vec<PaymentMethod>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(methods(&conn))
}

#[tauri::command]
pub fn add_payment_method(
    app: AppHandle,
    name: String,
    kind: MethodKind,
) -> Result<PaymentMethod, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    add_method(&conn, &name, kind)
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn update_payment_method(
    app: AppHandle,
    methodId: String,
    patch: Value,
) -> Result<bool, String> {
    let method_id = methodId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    update_method(&conn, &method_id, patch)
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn delete_payment_method(app: AppHandle, methodId: String) -> Result<bool, String> {
    let method_id = methodId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(remove_method(&conn, &method_id))
}

#[tauri::command]
pub fn seed_payment_methods(app: AppHandle) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    seed_methods_if_empty(&conn);
    Ok(())
}

/// Checkout view of the methods catalog: online methods the buyer may pick.
#[tauri::command]
pub fn get_online_payment_methods(app: AppHandle) -> Result<Vec<PaymentMethod>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(enabled_online_methods(&conn))
}

#[tauri::command]
pub fn is_cod_enabled(app: AppHandle) -> Result<bool, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(cod_enabled(&conn))
}

#[tauri::command]
pub fn get_payments(app: AppHandle) -> Result<Vec<Payment>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(all(&conn))
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn refund_payment(app: AppHandle, paymentId: String) -> Result<Payment, String> {
    let payment_id = paymentId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    refund(&conn, &payment_id)
}
