use rusqlite::Connection;
use serde_json::Value;
use tauri::AppHandle;

use crate::db::DatabaseExt;
use crate::models::{CreateMeal, Meal, MealType};
use crate::store;

pub fn all(conn: &Connection) -> Vec<Meal> {
    store::load(conn, store::MEALS)
}

/// Storefront listing: active meals only.
pub fn active(conn: &Connection) -> Vec<Meal> {
    all(conn).into_iter().filter(|m| m.active).collect()
}

pub fn create(conn: &Connection, input: CreateMeal) -> Result<Meal, String> {
    if input.name.trim().is_empty() {
        return Err("Meal name is required".to_string());
    }
    if input.price < 0 {
        return Err("Price cannot be negative".to_string());
    }

    let now = store::now_millis();
    let meal = Meal {
        id: store::uid("M"),
        name: input.name,
        meal_type: input.meal_type,
        price: input.price,
        active: input.active,
        featured: input.featured,
        image: input.image,
        description: input.description,
        labels: input.labels,
        created_at: now,
        updated_at: now,
    };

    store::add_front(conn, store::MEALS, meal.clone());
    Ok(meal)
}

/// Shallow-merge patch; restamps `updatedAt`. No-op when the id is unknown.
pub fn update(conn: &Connection, id: &str, patch: Value) -> Result<bool, String> {
    let Value::Object(mut fields) = patch else {
        return Err("Patch must be a JSON object".to_string());
    };
    fields.insert("updatedAt".to_string(), store::now_millis().into());
    store::patch_by_id::<Meal>(conn, store::MEALS, id, &Value::Object(fields))
}

pub fn remove(conn: &Connection, id: &str) -> bool {
    store::remove_by_id(conn, store::MEALS, id)
}

/// Insert demo meals, but only into an empty catalog.
pub fn seed_if_empty(conn: &Connection) {
    if !all(conn).is_empty() {
        return;
    }

    let samples: [(&str, MealType, i64, bool, &str, &[&str]); 6] = [
        ("Daal Chawal", MealType::Veg, 240, true, "Slow-cooked daal over rice.", &["Comfort"]),
        ("Chicken Karahi + Naan", MealType::NonVeg, 410, true, "Wok-fried chicken karahi.", &["Spicy"]),
        ("Mix Sabzi + Roti", MealType::Veg, 230, true, "Seasonal vegetables with 2 rotis.", &["Light"]),
        ("Chicken Biryani", MealType::NonVeg, 400, true, "Aromatic rice with chicken.", &["Best seller"]),
        ("Palak Paneer + Roti", MealType::Veg, 290, false, "Spinach and paneer combo.", &["Veg only"]),
        ("Kofta Curry + Roti", MealType::NonVeg, 370, true, "Meatballs in curry with roti.", &["High protein"]),
    ];

    let now = store::now_millis();
    let meals: Vec<Meal> = samples
        .into_iter()
        .map(|(name, meal_type, price, active, description, labels)| Meal {
            id: store::uid("M"),
            name: name.to_string(),
            meal_type,
            price,
            active,
            featured: false,
            image: Some("/meal-placeholder.svg".to_string()),
            description: Some(description.to_string()),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            created_at: now,
            updated_at: now,
        })
        .collect();

    store::save(conn, store::MEALS, &meals);
}

// ---- tauri commands ----

#[tauri::command]
pub fn get_meals(app: AppHandle) -> Result<Vec<Meal>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(all(&conn))
}

#[tauri::command]
pub fn get_active_meals(app: AppHandle) -> Result<Vec<Meal>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(active(&conn))
}

#[tauri::command]
pub fn create_meal(app: AppHandle, meal: CreateMeal) -> Result<Meal, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    create(&conn, meal)
}

#[tauri::command]
pub fn update_meal(app: AppHandle, id: String, patch: Value) -> Result<bool, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    update(&conn, &id, patch)
}

#[tauri::command]
pub fn delete_meal(app: AppHandle, id: String) -> Result<bool, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    Ok(remove(&conn, &id))
}

#[tauri::command]
pub fn seed_meals(app: AppHandle) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    seed_if_empty(&conn);
    Ok(())
}
