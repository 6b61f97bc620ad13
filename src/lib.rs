mod cart;
mod commands;
mod db;
mod models;
mod perm;
mod pricing;
mod store;


use cart::CartState;
use commands::{admins, cart as cart_cmds, meals, orders, payments, plans, settings, support};
use db::Database;
use tauri::{
    menu::{Menu, MenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    Manager,
};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .setup(|app| {
            // Initialize database
            let db = Database::new(&app.handle()).expect("Failed to create database");
            db.initialize().expect("Failed to initialize database");
            app.manage(db);
            app.manage(CartState::default());

            // Create tray menu
            let quit = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;
            let menu = Menu::with_items(app, &[&quit])?;

            // Build tray icon
            let _tray = TrayIconBuilder::new()
                .icon(app.default_window_icon().unwrap().clone())
                .menu(&menu)
                .show_menu_on_left_click(false)
                .on_tray_icon_event(|tray, event| {
                    if let TrayIconEvent::Click {
                        button: MouseButton::Left,
                        button_state: MouseButtonState::Up,
                        ..
                    } = event
                    {
                        let app = tray.app_handle();
                        if let Some(window) = app.get_webview_window("main") {
                            if window.is_visible().unwrap_or(false) {
                                let _ = window.hide();
                            } else {
                                let _ = window.show();
                                let _ = window.set_focus();
                            }
                        }
                    }
                })
                .on_menu_event(|app, event| {
                    if event.id == "quit" {
                        app.exit(0);
                    }
                })
                .build(app)?;

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Meals catalog
            meals::get_meals,
            meals::get_active_meals,
            meals::create_meal,
            meals::update_meal,
            meals::delete_meal,
            meals::seed_meals,
            // Cart
            cart_cmds::cart_items,
            cart_cmds::add_to_cart,
            cart_cmds::remove_from_cart,
            cart_cmds::increment_cart_item,
            cart_cmds::decrement_cart_item,
            cart_cmds::set_cart_qty,
            cart_cmds::clear_cart,
            // Orders
            orders::get_orders,
            orders::checkout_meal_order,
            orders::set_order_status,
            orders::update_order,
            orders::delete_order,
            orders::seed_orders,
            // Plans & deliveries
            plans::get_plan_quote,
            plans::begin_plan_checkout,
            plans::get_pending_checkout,
            plans::activate_plan,
            plans::get_subscriptions,
            plans::get_my_subscriptions,
            plans::set_delivery_state,
            plans::mark_delivery_by_code,
            plans::delete_subscription,
            // Payments
            payments::get_payment_methods,
            payments::add_payment_method,
            payments::update_payment_method,
            payments::delete_payment_method,
            payments::seed_payment_methods,
            payments::get_online_payment_methods,
            payments::is_cod_enabled,
            payments::get_payments,
            payments::refund_payment,
            // Admin accounts & permissions
            admins::get_admin_users,
            admins::create_admin_user,
            admins::update_admin_user,
            admins::delete_admin_user,
            admins::set_admin_enabled,
            admins::get_current_admin,
            admins::set_current_admin,
            admins::check_permission,
            admins::seed_demo_manager,
            // Settings, catalog & profile
            settings::get_settings,
            settings::update_settings,
            settings::get_plan_catalog,
            settings::update_plan_catalog,
            settings::reset_plan_catalog,
            settings::get_profile,
            settings::update_profile,
            // Support
            support::get_tickets,
            support::create_ticket,
            support::update_ticket,
            support::delete_ticket,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
