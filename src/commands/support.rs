use rusqlite::Connection;
use serde_json::Value;
use tauri::AppHandle;

use crate::db::DatabaseExt;
use crate::models::{CreateTicket, Ticket, TicketStatus};
use crate::store;

pub fn all(conn: &Connection) -> Vec<Ticket> {
    store::load(conn, store::SUPPORT_TICKETS)
}

pub fn create(conn: &Connection, input: CreateTicket) -> Result<Ticket, String> {
    if input.subject.trim().is_empty() || input.message.trim().is_empty() {
        return Err("Subject and message are required".to_string());
    }

    let ticket = Ticket {
        id: store::uid("SUP"),
        created_at: store::now_millis(),
        status: TicketStatus::Open,
        subject: input.subject,
        message: input.message,
        name: input.name,
        phone: input.phone,
        email: input.email,
        order_id: input.order_id,
    };

    store::add_front(conn, store::SUPPORT_TICKETS, ticket.clone());
    Ok(ticket)
}

pub fn update(conn: &Connection, id: &str, patch: &Value) -> Result<bool, String> {
    store::patch_by_id::<Ticket>(conn, store::SUPPORT_TICKETS, id, patch)
}

pub fn remove(conn: &Connection, id: &str) -> bool {
    store::remove_by_id(conn, store::SUPPORT_TICKETS, id)
}

// ---- tauri commands ----

#[tauri::command]
pub fn get_tickets(app: AppHandle) -> Result<Vec<Ticket>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(all(&conn))
}

#[tauri::command]
pub fn create_ticket(app: AppHandle, ticket: CreateTicket) -> Result<Ticket, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    create(&conn, ticket)
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn update_ticket(app: AppHandle, ticketId: String, patch: Value) -> Result<bool, String> {
    let ticket_id = ticketId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    update(&conn, &ticket_id, &patch)
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn delete_ticket(app: AppHandle, ticketId: String) -> Result<bool, String> {
    let ticket_id = ticketId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(remove(&conn, &ticket_id))
}
