use chrono::{Duration, Local, NaiveDate};
use rand::Rng;
use rusqlite::Connection;
use serde::Serialize;
use tauri::AppHandle;

use crate::commands::{payments, settings};
use crate::db::DatabaseExt;
use crate::models::{
    DeliveryEntry, DeliveryStatus, MethodKind, PaymentStatus, PlanDraft, PlanPayload, RefType,
    Subscription, Window,
};
use crate::pricing;
use crate::store;

fn window_minutes(hour: &str, minute: &str, meridiem: crate::models::Meridiem) -> Option<i64> {
    let h: i64 = hour.parse().ok()?;
    let m: i64 = minute.parse().ok()?;
    if !(1..=12).contains(&h) || !(0..=59).contains(&m) {
        return None;
    }
    let mut hh = h % 12;
    if meridiem == crate::models::Meridiem::PM {
        hh += 12;
    }
    Some(hh * 60 + m)
}

fn window_is_valid(w: &Window) -> bool {
    match (
        window_minutes(&w.sh, &w.sm, w.sap),
        window_minutes(&w.eh, &w.em, w.eap),
    ) {
        (Some(start), Some(end)) => start < end,
        _ => false,
    }
}

/// Validate a plan configuration, price it against the live catalog, and
/// stash it in the transient checkout slot.
pub fn begin_checkout(conn: &Connection, draft: PlanDraft) -> Result<PlanPayload, String> {
    let catalog = settings::catalog(conn);
    let plan = draft.plan_id;

    if !catalog.availability.get(&plan).copied().unwrap_or(true) {
        return Err("This plan is currently unavailable.".to_string());
    }
    if draft.address.trim().is_empty() {
        return Err("Please provide a delivery address.".to_string());
    }
    if draft.week_menu.len() != 6 {
        return Err("Week menu must cover Mon-Sat.".to_string());
    }

    let (win1, win2) = draft.windows;
    if !window_is_valid(&win1) {
        return Err("Please provide a valid delivery window.".to_string());
    }

    let two_meals = plan.is_two_meals();
    let win2 = if two_meals {
        let w = win2.ok_or_else(|| "Second delivery window is required.".to_string())?;
        if !window_is_valid(&w) {
            return Err("Please provide a valid delivery window.".to_string());
        }
        Some(w)
    } else {
        None
    };

    let mut week_menu = draft.week_menu;
    for (first, second) in week_menu.iter_mut() {
        if first.dish.trim().is_empty() {
            return Err("Every day needs a meal choice.".to_string());
        }
        if two_meals {
            if second.as_ref().map_or(true, |c| c.dish.trim().is_empty()) {
                return Err("Two-meal plans need a second choice per day.".to_string());
            }
        } else {
            *second = None;
        }
    }

    let quote = pricing::quote(&catalog, plan, &week_menu);

    let payload = PlanPayload {
        plan_id: plan,
        is_two_meals: two_meals,
        is_monthly: plan.is_monthly(),
        windows: (win1, win2),
        address: draft.address.trim().to_string(),
        included_non_veg: quote.included_non_veg,
        chosen_non_veg: quote.chosen_non_veg,
        extra_non_veg: quote.extra_non_veg,
        total: quote.total,
        week_menu,
    };

    store::save_value(conn, store::PLAN_CHECKOUT, &payload);
    Ok(payload)
}

pub fn pending_checkout(conn: &Connection) -> Option<PlanPayload> {
    let raw = store::read_slot(conn, store::PLAN_CHECKOUT)?;
    serde_json::from_str(&raw).ok()
}

/// One entry per (calendar day, meal slot). Each week contributes 6
/// consecutive days: week `w`, day `i` lands at `start + w*7 + i + 1` days.
pub fn build_deliveries(
    sub_id: &str,
    start: NaiveDate,
    weeks: i64,
    slots_per_day: u8,
) -> Vec<DeliveryEntry> {
    let mut rng = rand::thread_rng();
    let mut deliveries = Vec::new();

    for week in 0..weeks {
        for day in 0..6 {
            let date = (start + Duration::days(week * 7 + day + 1))
                .format("%Y-%m-%d")
                .to_string();
            for slot in 1..=slots_per_day {
                let code = format!("{}-{}-{}-{:04}", sub_id, date, slot, rng.gen_range(1000..10000));
                deliveries.push(DeliveryEntry {
                    date: date.clone(),
                    slot,
                    code,
                    status: DeliveryStatus::Pending,
                });
            }
        }
    }

    deliveries
}

/// Consume the pending checkout payload into a live subscription, log the
/// (always online, immediately paid) payment against the subscription id, and
/// delete the payload.
pub fn activate(
    conn: &Connection,
    phone: &str,
    email: Option<String>,
    start_from: Option<String>,
) -> Result<Subscription, String> {
    let payload = pending_checkout(conn).ok_or_else(|| "No plan is awaiting checkout.".to_string())?;

    if phone.trim().is_empty() {
        return Err("Please enter phone.".to_string());
    }

    let start = match start_from {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| "Invalid start date.".to_string())?,
        None => Local::now().date_naive(),
    };

    let plan = payload.plan_id;
    let sub_id = store::uid("SUB");
    let deliveries = build_deliveries(&sub_id, start, plan.weeks(), plan.slots_per_day());

    let sub = Subscription {
        id: sub_id,
        created_at: store::now_millis(),
        plan_id: plan,
        is_two_meals: payload.is_two_meals,
        is_monthly: payload.is_monthly,
        start_from: start.format("%Y-%m-%d").to_string(),
        address: payload.address,
        windows: payload.windows,
        user_phone: phone.trim().to_string(),
        user_email: email.clone(),
        total: payload.total,
        deliveries,
        week_menu: payload.week_menu,
    };

    store::add_front(conn, store::SUBSCRIPTIONS, sub.clone());

    payments::append(
        conn,
        RefType::Plan,
        &sub.id,
        sub.total,
        "Card (demo)",
        MethodKind::Online,
        PaymentStatus::Paid,
        Some(phone.trim().to_string()),
        email,
    );

    store::write_string(conn, store::USER_PHONE, phone.trim());
    store::clear_slot(conn, store::PLAN_CHECKOUT);

    Ok(sub)
}

pub fn all(conn: &Connection) -> Vec<Subscription> {
    store::load(conn, store::SUBSCRIPTIONS)
}

/// Buyer-facing view of the same store, scoped by phone.
pub fn for_phone(conn: &Connection, phone: &str) -> Vec<Subscription> {
    all(conn)
        .into_iter()
        .filter(|s| s.user_phone == phone)
        .collect()
}

/// Update the unique (date, slot) entry within one subscription. Silent no-op
/// when the pair is absent.
pub fn set_delivery_status(
    conn: &Connection,
    id: &str,
    date: &str,
    slot: u8,
    status: DeliveryStatus,
) -> bool {
    let mut subs = all(conn);
    let mut hit = false;

    for sub in subs.iter_mut().filter(|s| s.id == id) {
        for entry in sub
            .deliveries
            .iter_mut()
            .filter(|d| d.date == date && d.slot == slot)
        {
            entry.status = status;
            hit = true;
        }
    }

    if hit {
        store::save(conn, store::SUBSCRIPTIONS, &subs);
    }
    hit
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedDelivery {
    pub sub_id: String,
    pub date: String,
    pub slot: u8,
    pub code: String,
    pub status: DeliveryStatus,
}

/// Delivery-scan entry point: free-text code, matched case-insensitively
/// across every subscription. A miss mutates nothing.
pub fn mark_by_code(
    conn: &Connection,
    code: &str,
    status: DeliveryStatus,
) -> Result<MarkedDelivery, String> {
    let needle = code.trim();

    let hit = all(conn).into_iter().find_map(|sub| {
        sub.deliveries
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(needle))
            .map(|d| MarkedDelivery {
                sub_id: sub.id.clone(),
                date: d.date.clone(),
                slot: d.slot,
                code: d.code.clone(),
                status,
            })
    });

    let marked = hit.ok_or_else(|| "Code not found".to_string())?;
    set_delivery_status(conn, &marked.sub_id, &marked.date, marked.slot, status);
    Ok(marked)
}

pub fn remove(conn: &Connection, id: &str) -> bool {
    store::remove_by_id(conn, store::SUBSCRIPTIONS, id)
}

// ---- tauri commands ----

#[tauri::command]
#[allow(non_snake_case)]
pub fn get_plan_quote(
    app: AppHandle,
    plan: crate::models::PlanKey,
    weekMenu: Vec<crate::models::DayMenu>,
) -> Result<pricing::Quote, String> {
    let week_menu = weekMenu;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(pricing::quote(&settings::catalog(&conn), plan, &week_menu))
}

#[tauri::command]
pub fn begin_plan_checkout(app: AppHandle, draft: PlanDraft) -> Result<PlanPayload, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    begin_checkout(&conn, draft)
}

#[tauri::command]
pub fn get_pending_checkout(app: AppHandle) -> Result<Option<PlanPayload>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(pending_checkout(&conn))
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn activate_plan(
    app: AppHandle,
    phone: String,
    email: Option<String>,
    startFrom: Option<String>,
) -> Result<Subscription, String> {
    let start_from = startFrom;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    activate(&conn, &phone, email, start_from)
}

#[tauri::command]
pub fn get_subscriptions(app: AppHandle) -> Result<Vec<Subscription>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(all(&conn))
}

#[tauri::command]
pub fn get_my_subscriptions(app: AppHandle, phone: String) -> Result<Vec<Subscription>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(for_phone(&conn, &phone))
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn set_delivery_state(
    app: AppHandle,
    subId: String,
    date: String,
    slot: u8,
    status: DeliveryStatus,
) -> Result<bool, String> {
    let sub_id = subId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(set_delivery_status(&conn, &sub_id, &date, slot, status))
}

#[tauri::command]
pub fn mark_delivery_by_code(
    app: AppHandle,
    code: String,
    status: Option<DeliveryStatus>,
) -> Result<MarkedDelivery, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    mark_by_code(&conn, &code, status.unwrap_or(DeliveryStatus::Delivered))
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn delete_subscription(app: AppHandle, subId: String) -> Result<bool, String> {
    let sub_id = subId;
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(remove(&conn, &sub_id))
}
