//! Advisory permission lookup for admin child accounts.
//!
//! Capabilities form a closed (area × action) set so an unknown capability is
//! unrepresentable rather than silently false. Owners hold every capability;
//! managers hold exactly what their sparse grant map says.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AdminUser, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Meals,
    Orders,
    Subscriptions,
    Deliveries,
    Payments,
    Settings,
    Menu,
    Customers,
    Support,
    Reports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Print,
    Refund,
}

/// Sparse grant map: absent areas and actions mean "not granted".
pub type Permissions = BTreeMap<Area, BTreeMap<Action, bool>>;

/// Total over every (user, area, action) combination. Gates UI visibility
/// only; there is no server to enforce anything.
pub fn has_perm(user: Option<&AdminUser>, area: Area, action: Action) -> bool {
    let Some(user) = user else { return false };
    if !user.enabled {
        return false;
    }
    if user.role == Role::Owner {
        return true;
    }
    user.permissions
        .get(&area)
        .and_then(|node| node.get(&action))
        .copied()
        .unwrap_or(false)
}

pub fn grant(perms: &mut Permissions, area: Area, actions: &[Action]) {
    let node = perms.entry(area).or_default();
    for action in actions {
        node.insert(*action, true);
    }
}
