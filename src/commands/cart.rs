use serde::Serialize;
use tauri::State;

use crate::cart::{self, CartState};
use crate::models::{CartAdd, CartItem};

#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub count: i64,
    pub total: i64,
}

fn view(items: &[CartItem]) -> CartView {
    CartView {
        items: items.to_vec(),
        count: cart::count(items),
        total: cart::total(items),
    }
}

#[tauri::command]
pub fn cart_items(state: State<CartState>) -> Result<CartView, String> {
    let items = state.0.lock().map_err(|e| e.to_string())?;
    Ok(view(&items))
}

#[tauri::command]
pub fn add_to_cart(state: State<CartState>, item: CartAdd) -> Result<CartView, String> {
    let mut items = state.0.lock().map_err(|e| e.to_string())?;
    cart::add(&mut items, item);
    Ok(view(&items))
}

#[tauri::command]
pub fn remove_from_cart(state: State<CartState>, id: String) -> Result<CartView, String> {
    let mut items = state.0.lock().map_err(|e| e.to_string())?;
    cart::remove(&mut items, &id);
    Ok(view(&items))
}

#[tauri::command]
pub fn increment_cart_item(state: State<CartState>, id: String) -> Result<CartView, String> {
    let mut items = state.0.lock().map_err(|e| e.to_string())?;
    cart::increment(&mut items, &id);
    Ok(view(&items))
}

#[tauri::command]
pub fn decrement_cart_item(state: State<CartState>, id: String) -> Result<CartView, String> {
    let mut items = state.0.lock().map_err(|e| e.to_string())?;
    cart::decrement(&mut items, &id);
    Ok(view(&items))
}

#[tauri::command]
pub fn set_cart_qty(state: State<CartState>, id: String, qty: i64) -> Result<CartView, String> {
    let mut items = state.0.lock().map_err(|e| e.to_string())?;
    cart::set_qty(&mut items, &id, qty);
    Ok(view(&items))
}

#[tauri::command]
pub fn clear_cart(state: State<CartState>) -> Result<(), String> {
    let mut items = state.0.lock().map_err(|e| e.to_string())?;
    items.clear();
    Ok(())
}
