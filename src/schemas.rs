use moka::future::Cache;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive read endpoints
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    SalesSummary(SalesSummaryResponse),
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Sales totals for one month label.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlySales {
    /// Month label, e.g. "July 2026"
    pub month: String,
    /// Sum of sales record amounts for the month
    pub total: Decimal,
    /// Number of daily records contributing to the total
    pub record_count: u64,
}

/// Aggregated sales summary, optionally scoped to one restaurant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SalesSummaryResponse {
    /// Restaurant scope, if any
    pub restaurant_id: Option<i32>,
    /// Per-month totals, most recent month last
    pub months: Vec<MonthlySales>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::accounts::create_account,
        crate::handlers::accounts::get_accounts,
        crate::handlers::accounts::get_account,
        crate::handlers::accounts::update_account,
        crate::handlers::accounts::delete_account,
        crate::handlers::profiles::create_profile,
        crate::handlers::profiles::get_profiles,
        crate::handlers::profiles::get_profile,
        crate::handlers::profiles::update_profile,
        crate::handlers::locations::create_location,
        crate::handlers::locations::get_locations,
        crate::handlers::locations::get_location,
        crate::handlers::locations::update_location,
        crate::handlers::locations::delete_location,
        crate::handlers::restaurants::create_restaurant,
        crate::handlers::restaurants::get_restaurants,
        crate::handlers::restaurants::get_restaurant,
        crate::handlers::restaurants::update_restaurant,
        crate::handlers::restaurants::delete_restaurant,
        crate::handlers::restaurants::get_restaurant_tables,
        crate::handlers::restaurants::get_restaurant_menu_items,
        crate::handlers::tables::create_table,
        crate::handlers::tables::get_tables,
        crate::handlers::tables::get_table,
        crate::handlers::tables::update_table,
        crate::handlers::tables::delete_table,
        crate::handlers::qr_tokens::create_qr_token,
        crate::handlers::qr_tokens::get_qr_tokens,
        crate::handlers::qr_tokens::get_qr_token,
        crate::handlers::qr_tokens::delete_qr_token,
        crate::handlers::menu_items::create_menu_item,
        crate::handlers::menu_items::get_menu_items,
        crate::handlers::menu_items::get_menu_item,
        crate::handlers::menu_items::update_menu_item,
        crate::handlers::menu_items::delete_menu_item,
        crate::handlers::menu_items::create_menu_variant,
        crate::handlers::menu_items::get_menu_variants,
        crate::handlers::menu_items::update_menu_variant,
        crate::handlers::menu_items::delete_menu_variant,
        crate::handlers::orders::create_order,
        crate::handlers::orders::get_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::update_order,
        crate::handlers::orders::delete_order,
        crate::handlers::orders::create_order_item,
        crate::handlers::orders::update_order_item,
        crate::handlers::orders::delete_order_item,
        crate::handlers::kitchen_tickets::create_kitchen_ticket,
        crate::handlers::kitchen_tickets::get_kitchen_tickets,
        crate::handlers::kitchen_tickets::update_kitchen_ticket,
        crate::handlers::kitchen_tickets::delete_kitchen_ticket,
        crate::handlers::payments::create_payment,
        crate::handlers::payments::get_order_payments,
        crate::handlers::payments::get_payment,
        crate::handlers::payments::update_payment,
        crate::handlers::screen_displays::create_screen_display,
        crate::handlers::screen_displays::get_screen_displays,
        crate::handlers::screen_displays::get_screen_display,
        crate::handlers::screen_displays::update_screen_display,
        crate::handlers::screen_displays::delete_screen_display,
        crate::handlers::inventory::create_inventory_item,
        crate::handlers::inventory::get_inventory_items,
        crate::handlers::inventory::update_inventory_item,
        crate::handlers::inventory::delete_inventory_item,
        crate::handlers::sales::create_sales_record,
        crate::handlers::sales::get_sales_records,
        crate::handlers::sales::update_sales_record,
        crate::handlers::sales::delete_sales_record,
        crate::handlers::sales::get_sales_summary,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            MonthlySales,
            SalesSummaryResponse,
            crate::handlers::accounts::CreateAccountRequest,
            crate::handlers::accounts::UpdateAccountRequest,
            crate::handlers::accounts::AccountResponse,
            crate::handlers::profiles::CreateProfileRequest,
            crate::handlers::profiles::UpdateProfileRequest,
            crate::handlers::profiles::ProfileResponse,
            crate::handlers::locations::CreateLocationRequest,
            crate::handlers::locations::UpdateLocationRequest,
            crate::handlers::locations::LocationResponse,
            crate::handlers::restaurants::CreateRestaurantRequest,
            crate::handlers::restaurants::UpdateRestaurantRequest,
            crate::handlers::restaurants::RestaurantResponse,
            crate::handlers::tables::CreateTableRequest,
            crate::handlers::tables::UpdateTableRequest,
            crate::handlers::tables::TableResponse,
            crate::handlers::qr_tokens::CreateQrTokenRequest,
            crate::handlers::qr_tokens::QrTokenResponse,
            crate::handlers::menu_items::CreateMenuItemRequest,
            crate::handlers::menu_items::UpdateMenuItemRequest,
            crate::handlers::menu_items::MenuItemResponse,
            crate::handlers::menu_items::CreateMenuVariantRequest,
            crate::handlers::menu_items::UpdateMenuVariantRequest,
            crate::handlers::menu_items::MenuVariantResponse,
            crate::handlers::orders::CreateOrderRequest,
            crate::handlers::orders::CreateOrderItemRequest,
            crate::handlers::orders::UpdateOrderRequest,
            crate::handlers::orders::UpdateOrderItemRequest,
            crate::handlers::orders::OrderResponse,
            crate::handlers::orders::OrderDetailResponse,
            crate::handlers::orders::OrderItemResponse,
            crate::handlers::kitchen_tickets::CreateKitchenTicketRequest,
            crate::handlers::kitchen_tickets::UpdateKitchenTicketRequest,
            crate::handlers::kitchen_tickets::KitchenTicketResponse,
            crate::handlers::payments::CreatePaymentRequest,
            crate::handlers::payments::UpdatePaymentRequest,
            crate::handlers::payments::PaymentResponse,
            crate::handlers::screen_displays::CreateScreenDisplayRequest,
            crate::handlers::screen_displays::UpdateScreenDisplayRequest,
            crate::handlers::screen_displays::ScreenDisplayResponse,
            crate::handlers::inventory::CreateInventoryItemRequest,
            crate::handlers::inventory::UpdateInventoryItemRequest,
            crate::handlers::inventory::InventoryItemResponse,
            crate::handlers::sales::CreateSalesRecordRequest,
            crate::handlers::sales::UpdateSalesRecordRequest,
            crate::handlers::sales::SalesRecordResponse,
            model::entities::account::Role,
            model::entities::profile::AttendanceStatus,
            model::entities::table::TableStatus,
            model::entities::menu_item::Category,
            model::entities::order::OrderStatus,
            model::entities::order_item::OrderItemStatus,
            model::entities::kitchen_ticket::TicketStatus,
            model::entities::payment::PaymentMethod,
            model::entities::payment::PaymentStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Staff account management"),
        (name = "profiles", description = "Staff profiles and attendance"),
        (name = "restaurants", description = "Restaurants and locations"),
        (name = "tables", description = "Tables and QR tokens"),
        (name = "menu", description = "Menu items and variants"),
        (name = "orders", description = "Orders and order items"),
        (name = "kitchen", description = "Kitchen display tickets"),
        (name = "payments", description = "Order payments"),
        (name = "displays", description = "Screen displays"),
        (name = "inventory", description = "Inventory stock levels"),
        (name = "sales", description = "Daily sales records and summaries"),
    ),
    info(
        title = "Brigade API",
        description = "Restaurant back-office API - staff, tables, menus, orders, kitchen tickets and sales",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
