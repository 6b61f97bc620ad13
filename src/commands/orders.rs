use rusqlite::Connection;
use serde_json::Value;
use tauri::{AppHandle, State};

use crate::cart::CartState;
use crate::commands::payments;
use crate::db::DatabaseExt;
use crate::models::{
    CartItem, Customer, MethodKind, Order, OrderLine, OrderSource, OrderStatus, PaymentStatus,
    RefType,
};
use crate::store;

pub fn all(conn: &Connection) -> Vec<Order> {
    store::load(conn, store::ORDERS)
}

/// The orders slot is shared by the meal and plan flows; consumers filter by
/// source through here instead of re-reading the slot themselves.
pub fn by_source(conn: &Connection, source: OrderSource) -> Vec<Order> {
    all(conn).into_iter().filter(|o| o.source == source).collect()
}

pub fn place_meal_order(
    conn: &Connection,
    items: &[CartItem],
    phone: &str,
    address: &str,
    method: MethodKind,
) -> Result<Order, String> {
    if phone.trim().is_empty() || address.trim().is_empty() {
        return Err("Please enter phone and address.".to_string());
    }
    if items.is_empty() {
        return Err("Your cart is empty.".to_string());
    }

    let total: i64 = items.iter().map(|i| i.price * i.qty).sum();

    let order = Order {
        id: store::uid("ORD"),
        created_at: store::now_millis(),
        status: OrderStatus::Placed,
        customer: Some(Customer {
            phone: Some(phone.trim().to_string()),
        }),
        address: Some(address.trim().to_string()),
        items: items
            .iter()
            .map(|i| OrderLine {
                name: i.name.clone(),
                qty: i.qty,
                price: i.price,
            })
            .collect(),
        total,
        source: OrderSource::Meal,
        note: None,
    };

    store::add_front(conn, store::ORDERS, order.clone());

    // Subscriptions must be paid online; one-off meals may also go COD.
    let (method_name, status) = match method {
        MethodKind::Cod => ("Cash on Delivery", PaymentStatus::CodPending),
        MethodKind::Online => ("Card (demo)", PaymentStatus::Paid),
    };
    payments::append(
        conn,
        RefType::Meal,
        &order.id,
        total,
        method_name,
        method,
        status,
        Some(phone.trim().to_string()),
        None,
    );

    store::write_string(conn, store::USER_PHONE, phone.trim());

    Ok(order)
}

/// Any status is reachable from any other. Cancelling appends the operator's
/// reason to the order note.
pub fn set_status(
    conn: &Connection,
    id: &str,
    status: OrderStatus,
    reason: Option<String>,
) -> Result<Order, String> {
    let mut orders = all(conn);
    let order = orders
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or_else(|| "Order not found".to_string())?;

    order.status = status;

    if status == OrderStatus::Cancelled {
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| "Cancelled by admin".to_string());
        order.note = match order.note.take() {
            Some(existing) => Some(format!("{} | {}", existing, reason)),
            None => Some(reason),
        };
    }

    let updated = order.clone();
    store::save(conn, store::ORDERS, &orders);
    Ok(updated)
}

pub fn update(conn: &Connection, id: &str, patch: &Value) -> Result<bool, String> {
    store::patch_by_id::<Order>(conn, store::ORDERS, id, patch)
}

/// Hard delete, no audit trail beyond the note field.
pub fn remove(conn: &Connection, id: &str) -> bool {
    store::remove_by_id(conn, store::ORDERS, id)
}

/// Demo data: a couple of meal-sourced orders (plan orders are never seeded).
pub fn seed_if_empty(conn: &Connection) {
    if !all(conn).is_empty() {
        return;
    }

    let phone = store::read_string(conn, store::USER_PHONE)
        .unwrap_or_else(|| "03XXXXXXXXX".to_string());
    let now = store::now_millis();

    let samples = vec![
        Order {
            id: store::uid("ORD"),
            created_at: now - 3_600_000,
            status: OrderStatus::Placed,
            customer: Some(Customer {
                phone: Some(phone.clone()),
            }),
            address: Some("Demo Address, Lahore".to_string()),
            items: vec![OrderLine {
                name: "Chicken Biryani".to_string(),
                qty: 1,
                price: 400,
            }],
            total: 400,
            source: OrderSource::Meal,
            note: None,
        },
        Order {
            id: store::uid("ORD"),
            created_at: now - 7_200_000,
            status: OrderStatus::Preparing,
            customer: Some(Customer {
                phone: Some(phone),
            }),
            address: Some("Demo Address, Karachi".to_string()),
            items: vec![OrderLine {
                name: "Kofta Curry + Roti".to_string(),
                qty: 1,
                price: 370,
            }],
            total: 370,
            source: OrderSource::Meal,
            note: None,
        },
    ];

    store::save(conn, store::ORDERS, &samples);
}

// ---- tauri commands ----

#[tauri::command]
pub fn get_orders(app: AppHandle, source: Option<OrderSource>) -> Result<Vec<Order>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(match source {
        Some(source) => by_source(&conn, source),
        None => all(&conn),
    })
}

#[tauri::command]
pub fn checkout_meal_order(
    app: AppHandle,
    state: State<CartState>,
    phone: String,
    address: String,
    method: MethodKind,
) -> Result<Order, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let mut items = state.0.lock().map_err(|e| e.to_string())?;
    let order = place_meal_order(&conn, &items, &phone, &address, method)?;

    // Only empty the cart once the order is saved.
    items.clear();
    Ok(order)
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn set_order_status(
    app: AppHandle,
    orderId: String,
    status: OrderStatus,
    reason: Option<String>,
) -> Result<Order, String> {
    let order_id = orderId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    set_status(&conn, &order_id, status, reason)
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn update_order(app: AppHandle, orderId: String, patch: Value) -> Result<bool, String> {
    let order_id = orderId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    update(&conn, &order_id, &patch)
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn delete_order(app: AppHandle, orderId: String) -> Result<bool, String> {
    let order_id = orderId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(remove(&conn, &order_id))
}

#[tauri::command]
pub fn seed_orders(app: AppHandle) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    seed_if_empty(&conn);
    Ok(())
}
