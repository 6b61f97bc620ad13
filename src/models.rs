use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::perm::{Action, Area, Permissions};

// ---- meals catalog ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Veg,
    #[serde(rename = "Non-veg")]
    NonVeg,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub price: i64,
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeal {
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub price: i64,
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

// ---- cart ----

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub qty: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartAdd {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub qty: Option<i64>,
}

// ---- orders ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    Meal,
    Plan,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Customer {
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderLine {
    pub name: String,
    pub qty: i64,
    pub price: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub created_at: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub address: Option<String>,
    pub items: Vec<OrderLine>,
    pub total: i64,
    pub source: OrderSource,
    #[serde(default)]
    pub note: Option<String>,
}

// ---- subscriptions ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    AM,
    PM,
}

/// A delivery time range on a 12-hour clock, e.g. 11:00 AM to 12:00 PM.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Window {
    pub sh: String,
    pub sm: String,
    pub sap: Meridiem,
    pub eh: String,
    pub em: String,
    pub eap: Meridiem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Delivered,
    Skipped,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeliveryEntry {
    pub date: String,
    pub slot: u8,
    pub code: String,
    pub status: DeliveryStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Choice {
    pub cat: MealType,
    pub dish: String,
}

/// One day's menu: meal 1, and meal 2 on two-meal plans.
pub type DayMenu = (Choice, Option<Choice>);

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub created_at: i64,
    pub plan_id: PlanKey,
    pub is_two_meals: bool,
    pub is_monthly: bool,
    pub start_from: String,
    pub address: String,
    pub windows: (Window, Option<Window>),
    pub user_phone: String,
    #[serde(default)]
    pub user_email: Option<String>,
    pub total: i64,
    pub deliveries: Vec<DeliveryEntry>,
    pub week_menu: Vec<DayMenu>,
}

/// Transient checkout payload: written when a buyer finishes configuring a
/// plan, consumed and deleted when the subscription is activated.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    pub plan_id: PlanKey,
    pub is_two_meals: bool,
    pub is_monthly: bool,
    pub windows: (Window, Option<Window>),
    pub address: String,
    pub included_non_veg: i64,
    pub chosen_non_veg: i64,
    pub extra_non_veg: i64,
    pub total: i64,
    pub week_menu: Vec<DayMenu>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub plan_id: PlanKey,
    pub windows: (Window, Option<Window>),
    pub address: String,
    pub week_menu: Vec<DayMenu>,
}

// ---- plan catalog ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlanKey {
    #[serde(rename = "weekly-1")]
    Weekly1,
    #[serde(rename = "weekly-2")]
    Weekly2,
    #[serde(rename = "monthly-1")]
    Monthly1,
    #[serde(rename = "monthly-2")]
    Monthly2,
}

impl PlanKey {
    pub const ALL: [PlanKey; 4] = [
        PlanKey::Weekly1,
        PlanKey::Weekly2,
        PlanKey::Monthly1,
        PlanKey::Monthly2,
    ];

    pub fn is_monthly(self) -> bool {
        matches!(self, PlanKey::Monthly1 | PlanKey::Monthly2)
    }

    pub fn is_two_meals(self) -> bool {
        matches!(self, PlanKey::Weekly2 | PlanKey::Monthly2)
    }

    pub fn weeks(self) -> i64 {
        if self.is_monthly() {
            4
        } else {
            1
        }
    }

    pub fn slots_per_day(self) -> u8 {
        if self.is_two_meals() {
            2
        } else {
            1
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub prices: BTreeMap<PlanKey, i64>,
    pub included_non_veg_base: i64,
    pub surcharge_per_extra_non_veg: i64,
    pub availability: BTreeMap<PlanKey, bool>,
}

impl Default for Catalog {
    fn default() -> Self {
        let mut prices = BTreeMap::new();
        prices.insert(PlanKey::Weekly1, 4000);
        prices.insert(PlanKey::Weekly2, 7600);
        prices.insert(PlanKey::Monthly1, 15500);
        prices.insert(PlanKey::Monthly2, 29500);

        let mut availability = BTreeMap::new();
        for key in PlanKey::ALL {
            availability.insert(key, true);
        }

        Catalog {
            prices,
            included_non_veg_base: 3,
            surcharge_per_extra_non_veg: 50,
            availability,
        }
    }
}

// ---- payments ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Online,
    Cod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    CodPending,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefType {
    Plan,
    Meal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub kind: MethodKind,
    pub enabled: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub ref_type: RefType,
    pub ref_id: String,
    pub amount: i64,
    pub method_name: String,
    pub method_kind: MethodKind,
    pub status: PaymentStatus,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Set on reversing entries only; links back to the refunded payment.
    #[serde(default)]
    pub refund_of: Option<String>,
    pub created_at: i64,
}

// ---- admin accounts ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Manager,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    pub enabled: bool,
    pub permissions: Permissions,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    pub permissions: Permissions,
}

pub fn default_owner() -> AdminUser {
    use crate::perm::grant;
    let mut permissions = Permissions::new();
    grant(
        &mut permissions,
        Area::Meals,
        &[Action::View, Action::Create, Action::Edit, Action::Delete],
    );
    grant(
        &mut permissions,
        Area::Orders,
        &[Action::View, Action::Edit, Action::Print],
    );
    grant(
        &mut permissions,
        Area::Subscriptions,
        &[Action::View, Action::Edit, Action::Print],
    );
    grant(&mut permissions, Area::Deliveries, &[Action::View, Action::Edit]);
    grant(&mut permissions, Area::Payments, &[Action::View, Action::Refund]);
    grant(&mut permissions, Area::Settings, &[Action::View, Action::Edit]);
    grant(&mut permissions, Area::Menu, &[Action::View, Action::Edit]);
    grant(&mut permissions, Area::Customers, &[Action::View]);
    grant(&mut permissions, Area::Support, &[Action::View, Action::Edit]);
    grant(&mut permissions, Area::Reports, &[Action::View]);

    AdminUser {
        id: "owner-1".to_string(),
        name: "Owner".to_string(),
        email: Some("owner@example.com".to_string()),
        phone: None,
        role: Role::Owner,
        enabled: true,
        permissions,
    }
}

// ---- settings, profile, support ----

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BizSettings {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl Default for BizSettings {
    fn default() -> Self {
        BizSettings {
            name: "Tiffin Desk Kitchen".to_string(),
            phone: "+92-300-1112233".to_string(),
            address: "Lahore, Pakistan".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub pay_method: String,
    pub wallet: i64,
    pub ref_code: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub pay_method: Option<String>,
    #[serde(default)]
    pub wallet: Option<i64>,
    #[serde(default)]
    pub ref_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub created_at: i64,
    pub status: TicketStatus,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
}
