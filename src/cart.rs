//! Session-scoped cart. Lives in managed app state and is never persisted;
//! closing the app empties it.

use std::sync::Mutex;

use crate::models::{CartAdd, CartItem};

#[derive(Default)]
pub struct CartState(pub Mutex<Vec<CartItem>>);

fn slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Add an item; duplicate ids merge by summing qty.
pub fn add(items: &mut Vec<CartItem>, input: CartAdd) {
    let id = input.id.unwrap_or_else(|| slug(&input.name));
    let qty = input.qty.unwrap_or(1).max(1);

    if let Some(existing) = items.iter_mut().find(|i| i.id == id) {
        existing.qty += qty;
        return;
    }

    items.push(CartItem {
        id,
        name: input.name,
        price: input.price,
        qty,
    });
}

pub fn remove(items: &mut Vec<CartItem>, id: &str) {
    items.retain(|i| i.id != id);
}

pub fn increment(items: &mut Vec<CartItem>, id: &str) {
    if let Some(item) = items.iter_mut().find(|i| i.id == id) {
        item.qty += 1;
    }
}

/// Decrement by one, dropping the item when it hits zero.
pub fn decrement(items: &mut Vec<CartItem>, id: &str) {
    if let Some(item) = items.iter_mut().find(|i| i.id == id) {
        item.qty -= 1;
    }
    items.retain(|i| i.qty > 0);
}

pub fn set_qty(items: &mut Vec<CartItem>, id: &str, qty: i64) {
    if qty <= 0 {
        remove(items, id);
        return;
    }
    if let Some(item) = items.iter_mut().find(|i| i.id == id) {
        item.qty = qty;
    }
}

pub fn count(items: &[CartItem]) -> i64 {
    items.iter().map(|i| i.qty).sum()
}

pub fn total(items: &[CartItem]) -> i64 {
    items.iter().map(|i| i.price * i.qty).sum()
}
