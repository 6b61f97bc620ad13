//! Subscription plan pricing.
//!
//! A plan's base price covers `includedNonVegBase` non-veg meals per meal-slot
//! per week; every non-veg choice beyond that is surcharged. The Mon-Sat menu
//! repeats identically across all weeks of a monthly plan, so weekly counts
//! scale by the week factor.

use serde::{Deserialize, Serialize};

use crate::models::{Catalog, DayMenu, MealType, PlanKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub included_non_veg: i64,
    pub chosen_non_veg: i64,
    pub extra_non_veg: i64,
    pub total: i64,
}

/// Count non-veg choices across one week's menu (both slots where present).
pub fn non_veg_per_week(week_menu: &[DayMenu]) -> i64 {
    week_menu
        .iter()
        .flat_map(|(first, second)| [Some(first), second.as_ref()])
        .flatten()
        .filter(|choice| choice.cat == MealType::NonVeg)
        .count() as i64
}

/// Deterministic, and monotonically non-decreasing in the chosen non-veg
/// count. Catalog values are clamped to zero where the catalog is written,
/// not here.
pub fn quote(catalog: &Catalog, plan: PlanKey, week_menu: &[DayMenu]) -> Quote {
    let week_factor = plan.weeks();
    let meals_per_day = if plan.is_two_meals() { 2 } else { 1 };

    let included_non_veg = catalog.included_non_veg_base * meals_per_day * week_factor;
    let chosen_non_veg = non_veg_per_week(week_menu) * week_factor;
    let extra_non_veg = (chosen_non_veg - included_non_veg).max(0);

    let base = catalog.prices.get(&plan).copied().unwrap_or(0);

    Quote {
        included_non_veg,
        chosen_non_veg,
        extra_non_veg,
        total: base + extra_non_veg * catalog.surcharge_per_extra_non_veg,
    }
}
