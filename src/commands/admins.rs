use rusqlite::Connection;
use serde_json::Value;
use tauri::AppHandle;

use crate::db::DatabaseExt;
use crate::models::{default_owner, AdminUser, CreateAdminUser, Role};
use crate::perm::{self, Action, Area, Permissions};
use crate::store;

/// Load admin accounts. Exactly one owner must always exist, so a missing
/// owner is repaired by reinserting the default one at the front.
pub fn all(conn: &Connection) -> Vec<AdminUser> {
    let mut users: Vec<AdminUser> = store::load(conn, store::ADMIN_USERS);
    if !users.iter().any(|u| u.role == Role::Owner) {
        users.insert(0, default_owner());
        store::save(conn, store::ADMIN_USERS, &users);
    }
    users
}

pub fn by_id(conn: &Connection, id: &str) -> Option<AdminUser> {
    all(conn).into_iter().find(|u| u.id == id)
}

pub fn add(conn: &Connection, input: CreateAdminUser) -> Result<AdminUser, String> {
    if input.name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    let user = AdminUser {
        id: store::uid("adm"),
        name: input.name.trim().to_string(),
        email: input.email,
        phone: input.phone,
        role: input.role,
        enabled: true,
        permissions: input.permissions,
    };

    // Repair pass first so the owner invariant holds before we prepend.
    let mut users = all(conn);
    users.insert(0, user.clone());
    store::save(conn, store::ADMIN_USERS, &users);
    Ok(user)
}

pub fn update(conn: &Connection, id: &str, patch: &Value) -> Result<bool, String> {
    store::patch_by_id::<AdminUser>(conn, store::ADMIN_USERS, id, patch)
}

/// Removing the owner is a guarded no-op: the store is left untouched.
pub fn remove(conn: &Connection, id: &str) -> bool {
    let users = all(conn);
    if users.iter().any(|u| u.id == id && u.role == Role::Owner) {
        return false;
    }
    store::remove_by_id(conn, store::ADMIN_USERS, id)
}

pub fn set_enabled(conn: &Connection, id: &str, enabled: bool) -> Result<bool, String> {
    update(conn, id, &serde_json::json!({ "enabled": enabled }))
}

/// The simulated current admin: whoever the current-admin slot points at,
/// falling back to the owner (and remembering that choice).
pub fn current(conn: &Connection) -> Option<AdminUser> {
    if let Some(id) = store::read_string(conn, store::ADMIN_CURRENT) {
        if let Some(user) = by_id(conn, &id) {
            return Some(user);
        }
    }
    let owner = all(conn).into_iter().find(|u| u.role == Role::Owner);
    if let Some(owner) = &owner {
        store::write_string(conn, store::ADMIN_CURRENT, &owner.id);
    }
    owner
}

pub fn set_current(conn: &Connection, id: &str) -> Result<AdminUser, String> {
    let user = by_id(conn, id).ok_or_else(|| "Admin user not found".to_string())?;
    store::write_string(conn, store::ADMIN_CURRENT, id);
    Ok(user)
}

/// Demo manager child-account with a partial grant.
pub fn seed_manager(conn: &Connection) -> Result<AdminUser, String> {
    let mut permissions = Permissions::new();
    perm::grant(&mut permissions, Area::Meals, &[Action::View, Action::Edit]);
    perm::grant(
        &mut permissions,
        Area::Orders,
        &[Action::View, Action::Edit, Action::Print],
    );
    perm::grant(&mut permissions, Area::Deliveries, &[Action::View, Action::Edit]);
    perm::grant(&mut permissions, Area::Subscriptions, &[Action::View]);
    perm::grant(&mut permissions, Area::Payments, &[Action::View]);
    perm::grant(&mut permissions, Area::Support, &[Action::View, Action::Edit]);

    add(
        conn,
        CreateAdminUser {
            name: "Floor Manager".to_string(),
            email: Some("manager@example.com".to_string()),
            phone: Some("+92-300-0000000".to_string()),
            role: Role::Manager,
            permissions,
        },
    )
}

// ---- tauri commands ----

#[tauri::command]
pub fn get_admin_users(app: AppHandle) -> Result<Vec<AdminUser>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(all(&conn))
}

#[tauri::command]
pub fn create_admin_user(app: AppHandle, user: CreateAdminUser) -> Result<AdminUser, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    add(&conn, user)
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn update_admin_user(app: AppHandle, userId: String, patch: Value) -> Result<bool, String> {
    let user_id = userId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    update(&conn, &user_id, &patch)
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn delete_admin_user(app: AppHandle, userId: String) -> Result<bool, String> {
    let user_id = userId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(remove(&conn, &user_id))
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn set_admin_enabled(app: AppHandle, userId: String, enabled: bool) -> Result<bool, String> {
    let user_id = userId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    set_enabled(&conn, &user_id, enabled)
}

#[tauri::command]
pub fn get_current_admin(app: AppHandle) -> Result<Option<AdminUser>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(current(&conn))
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn set_current_admin(app: AppHandle, userId: String) -> Result<AdminUser, String> {
    let user_id = userId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    set_current(&conn, &user_id)
}

/// Advisory gate for UI elements: checks the current admin.
#[tauri::command]
pub fn check_permission(app: AppHandle, area: Area, action: Action) -> Result<bool, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    let user = current(&conn);
    Ok(perm::has_perm(user.as_ref(), area, action))
}

#[tauri::command]
pub fn seed_demo_manager(app: AppHandle) -> Result<AdminUser, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    seed_manager(&conn)
}
