use rusqlite::Connection;
use tauri::AppHandle;

use crate::db::DatabaseExt;
use crate::models::{BizSettings, Catalog, ProfileUpdate, UserProfile};
use crate::store;

// ---- plan catalog ----

pub fn catalog(conn: &Connection) -> Catalog {
    store::load_or(conn, store::PLAN_CATALOG, Catalog::default())
}

/// Negative values are clamped to zero here, at write time, so the pricing
/// calculator never has to defend against them.
pub fn update_catalog(conn: &Connection, mut next: Catalog) -> Catalog {
    for price in next.prices.values_mut() {
        *price = (*price).max(0);
    }
    next.included_non_veg_base = next.included_non_veg_base.max(0);
    next.surcharge_per_extra_non_veg = next.surcharge_per_extra_non_veg.max(0);

    store::save_value(conn, store::PLAN_CATALOG, &next);
    next
}

pub fn reset_catalog(conn: &Connection) -> Catalog {
    update_catalog(conn, Catalog::default())
}

// ---- business settings ----

pub fn settings(conn: &Connection) -> BizSettings {
    store::load_or(conn, store::SETTINGS, BizSettings::default())
}

pub fn save_settings(conn: &Connection, next: &BizSettings) {
    store::save_value(conn, store::SETTINGS, next);
}

// ---- user profile (individual scalar slots) ----

pub fn profile(conn: &Connection) -> UserProfile {
    let read = |key| store::read_string(conn, key).unwrap_or_default();
    let wallet = store::read_string(conn, store::USER_WALLET)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);

    UserProfile {
        name: read(store::USER_NAME),
        email: read(store::USER_EMAIL),
        phone: read(store::USER_PHONE),
        pay_method: read(store::USER_PAY_METHOD),
        wallet,
        ref_code: read(store::USER_REF_CODE),
    }
}

/// Field-wise update: only the provided fields are written.
pub fn save_profile(conn: &Connection, update: ProfileUpdate) -> UserProfile {
    if let Some(name) = update.name {
        store::write_string(conn, store::USER_NAME, &name);
    }
    if let Some(email) = update.email {
        store::write_string(conn, store::USER_EMAIL, &email);
    }
    if let Some(phone) = update.phone {
        store::write_string(conn, store::USER_PHONE, &phone);
    }
    if let Some(pay_method) = update.pay_method {
        store::write_string(conn, store::USER_PAY_METHOD, &pay_method);
    }
    if let Some(wallet) = update.wallet {
        store::write_string(conn, store::USER_WALLET, &wallet.to_string());
    }
    if let Some(ref_code) = update.ref_code {
        store::write_string(conn, store::USER_REF_CODE, &ref_code);
    }
    profile(conn)
}

// ---- tauri commands ----

#[tauri::command]
pub fn get_settings(app: AppHandle) -> Result<BizSettings, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(settings(&conn))
}

#[tauri::command]
pub fn update_settings(app: AppHandle, settings: BizSettings) -> Result<BizSettings, String> {
    if settings.name.trim().is_empty() {
        return Err("Business name is required".to_string());
    }
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    save_settings(&conn, &settings);
    Ok(settings)
}

#[tauri::command]
pub fn get_plan_catalog(app: AppHandle) -> Result<Catalog, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(catalog(&conn))
}

#[tauri::command]
pub fn update_plan_catalog(app: AppHandle, catalog: Catalog) -> Result<Catalog, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(update_catalog(&conn, catalog))
}

#[tauri::command]
pub fn reset_plan_catalog(app: AppHandle) -> Result<Catalog, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(reset_catalog(&conn))
}

#[tauri::command]
pub fn get_profile(app: AppHandle) -> Result<UserProfile, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(profile(&conn))
}

#[tauri::command]
pub fn update_profile(app: AppHandle, update: ProfileUpdate) -> Result<UserProfile, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(save_profile(&conn, update))
}
