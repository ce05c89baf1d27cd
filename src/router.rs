use crate::handlers::{
    accounts::{create_account, delete_account, get_account, get_accounts, update_account},
    health::health_check,
    inventory::{
        create_inventory_item, delete_inventory_item, get_inventory_items, update_inventory_item,
    },
    kitchen_tickets::{
        create_kitchen_ticket, delete_kitchen_ticket, get_kitchen_tickets, update_kitchen_ticket,
    },
    locations::{create_location, delete_location, get_location, get_locations, update_location},
    menu_items::{
        create_menu_item, create_menu_variant, delete_menu_item, delete_menu_variant,
        get_menu_item, get_menu_items, get_menu_variants, update_menu_item, update_menu_variant,
    },
    orders::{
        create_order, create_order_item, delete_order, delete_order_item, get_order, get_orders,
        update_order, update_order_item,
    },
    payments::{create_payment, get_order_payments, get_payment, update_payment},
    profiles::{create_profile, get_profile, get_profiles, update_profile},
    qr_tokens::{create_qr_token, delete_qr_token, get_qr_token, get_qr_tokens},
    restaurants::{
        create_restaurant, delete_restaurant, get_restaurant, get_restaurant_menu_items,
        get_restaurant_tables, get_restaurants, update_restaurant,
    },
    sales::{
        create_sales_record, delete_sales_record, get_sales_records, get_sales_summary,
        update_sales_record,
    },
    screen_displays::{
        create_screen_display, delete_screen_display, get_screen_display, get_screen_displays,
        update_screen_display,
    },
    tables::{create_table, delete_table, get_table, get_tables, update_table},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Staff account CRUD routes
        .route("/api/v1/accounts", post(create_account))
        .route("/api/v1/accounts", get(get_accounts))
        .route("/api/v1/accounts/:account_id", get(get_account))
        .route("/api/v1/accounts/:account_id", put(update_account))
        .route("/api/v1/accounts/:account_id", delete(delete_account))
        // Profile routes (one per account)
        .route("/api/v1/profiles", get(get_profiles))
        .route("/api/v1/accounts/:account_id/profile", post(create_profile))
        .route("/api/v1/accounts/:account_id/profile", get(get_profile))
        .route("/api/v1/accounts/:account_id/profile", put(update_profile))
        // Location CRUD routes
        .route("/api/v1/locations", post(create_location))
        .route("/api/v1/locations", get(get_locations))
        .route("/api/v1/locations/:location_id", get(get_location))
        .route("/api/v1/locations/:location_id", put(update_location))
        .route("/api/v1/locations/:location_id", delete(delete_location))
        // Restaurant CRUD routes
        .route("/api/v1/restaurants", post(create_restaurant))
        .route("/api/v1/restaurants", get(get_restaurants))
        .route("/api/v1/restaurants/:restaurant_id", get(get_restaurant))
        .route("/api/v1/restaurants/:restaurant_id", put(update_restaurant))
        .route(
            "/api/v1/restaurants/:restaurant_id",
            delete(delete_restaurant),
        )
        .route(
            "/api/v1/restaurants/:restaurant_id/tables",
            get(get_restaurant_tables),
        )
        .route(
            "/api/v1/restaurants/:restaurant_id/menu-items",
            get(get_restaurant_menu_items),
        )
        // Table CRUD routes
        .route("/api/v1/tables", post(create_table))
        .route("/api/v1/tables", get(get_tables))
        .route("/api/v1/tables/:table_id", get(get_table))
        .route("/api/v1/tables/:table_id", put(update_table))
        .route("/api/v1/tables/:table_id", delete(delete_table))
        // QR token routes
        .route("/api/v1/qr-tokens", post(create_qr_token))
        .route("/api/v1/qr-tokens", get(get_qr_tokens))
        .route("/api/v1/qr-tokens/:token", get(get_qr_token))
        .route("/api/v1/qr-tokens/:token", delete(delete_qr_token))
        // Menu item and variant routes
        .route("/api/v1/menu-items", post(create_menu_item))
        .route("/api/v1/menu-items", get(get_menu_items))
        .route("/api/v1/menu-items/:menu_item_id", get(get_menu_item))
        .route("/api/v1/menu-items/:menu_item_id", put(update_menu_item))
        .route("/api/v1/menu-items/:menu_item_id", delete(delete_menu_item))
        .route(
            "/api/v1/menu-items/:menu_item_id/variants",
            post(create_menu_variant),
        )
        .route(
            "/api/v1/menu-items/:menu_item_id/variants",
            get(get_menu_variants),
        )
        .route("/api/v1/menu-variants/:variant_id", put(update_menu_variant))
        .route(
            "/api/v1/menu-variants/:variant_id",
            delete(delete_menu_variant),
        )
        // Order and order item routes
        .route("/api/v1/orders", post(create_order))
        .route("/api/v1/orders", get(get_orders))
        .route("/api/v1/orders/:order_id", get(get_order))
        .route("/api/v1/orders/:order_id", put(update_order))
        .route("/api/v1/orders/:order_id", delete(delete_order))
        .route("/api/v1/orders/:order_id/items", post(create_order_item))
        .route("/api/v1/order-items/:order_item_id", put(update_order_item))
        .route(
            "/api/v1/order-items/:order_item_id",
            delete(delete_order_item),
        )
        // Kitchen ticket routes
        .route(
            "/api/v1/order-items/:order_item_id/ticket",
            post(create_kitchen_ticket),
        )
        .route("/api/v1/kitchen-tickets", get(get_kitchen_tickets))
        .route("/api/v1/kitchen-tickets/:ticket_id", put(update_kitchen_ticket))
        .route(
            "/api/v1/kitchen-tickets/:ticket_id",
            delete(delete_kitchen_ticket),
        )
        // Payment routes
        .route("/api/v1/orders/:order_id/payments", post(create_payment))
        .route("/api/v1/orders/:order_id/payments", get(get_order_payments))
        .route("/api/v1/payments/:payment_id", get(get_payment))
        .route("/api/v1/payments/:payment_id", put(update_payment))
        // Screen display routes
        .route("/api/v1/screen-displays", post(create_screen_display))
        .route("/api/v1/screen-displays", get(get_screen_displays))
        .route("/api/v1/screen-displays/:display_id", get(get_screen_display))
        .route(
            "/api/v1/screen-displays/:display_id",
            put(update_screen_display),
        )
        .route(
            "/api/v1/screen-displays/:display_id",
            delete(delete_screen_display),
        )
        // Inventory routes
        .route(
            "/api/v1/restaurants/:restaurant_id/inventory",
            post(create_inventory_item),
        )
        .route(
            "/api/v1/restaurants/:restaurant_id/inventory",
            get(get_inventory_items),
        )
        .route(
            "/api/v1/inventory-items/:inventory_item_id",
            put(update_inventory_item),
        )
        .route(
            "/api/v1/inventory-items/:inventory_item_id",
            delete(delete_inventory_item),
        )
        // Sales routes
        .route("/api/v1/sales/summary", get(get_sales_summary))
        .route(
            "/api/v1/restaurants/:restaurant_id/sales",
            post(create_sales_record),
        )
        .route(
            "/api/v1/restaurants/:restaurant_id/sales",
            get(get_sales_records),
        )
        .route("/api/v1/sales/:sales_record_id", put(update_sales_record))
        .route("/api/v1/sales/:sales_record_id", delete(delete_sales_record))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
