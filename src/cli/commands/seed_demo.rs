use anyhow::Result;
use chrono::{Duration, Utc};
use model::access::derive_elevated_access;
use model::entities::{
    account::{self, Role},
    kitchen_ticket::{self, TicketStatus},
    location, menu_item,
    menu_item::Category,
    menu_variant,
    order::{self, OrderStatus},
    order_item::{self, OrderItemStatus},
    payment::{self, PaymentMethod, PaymentStatus},
    profile::{self, AttendanceStatus},
    restaurant, table,
    table::TableStatus,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, Database, EntityTrait, QueryFilter, Set};
use tracing::{info, warn};

const DEMO_RESTAURANT: &str = "Sample Restaurant";

/// Seed a small demo dataset: one restaurant with tables, staff, a menu
/// with variants, an open order with kitchen tickets and a payment.
/// Running it twice is a no-op.
pub async fn seed_demo(database_url: &str) -> Result<()> {
    info!("Seeding demo data");
    let db = Database::connect(database_url).await?;

    if restaurant::Entity::find()
        .filter(restaurant::Column::Name.eq(DEMO_RESTAURANT))
        .one(&db)
        .await?
        .is_some()
    {
        warn!("Demo restaurant already present, nothing to do");
        return Ok(());
    }

    let location = location::ActiveModel {
        address: Set("MONG KOK, Kowloon".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let restaurant = restaurant::ActiveModel {
        name: Set(DEMO_RESTAURANT.to_string()),
        location_id: Set(Some(location.id)),
        address: Set(Some("MONG KOK, Kowloon".to_string())),
        phone_number: Set(Some("+852 5555 0100".to_string())),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    info!("Created restaurant '{}' with ID {}", DEMO_RESTAURANT, restaurant.id);

    let mut table_ids = Vec::new();
    for number in 1..=5 {
        let table = table::ActiveModel {
            restaurant_id: Set(restaurant.id),
            table_number: Set(number),
            capacity: Set(4),
            status: Set(TableStatus::Free),
            coordinates: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        table_ids.push(table.id);
    }
    info!("Created {} tables", table_ids.len());

    // One manager and two servers, each with a profile.
    let staff = [
        ("demo_manager", "manager@example.com", Role::Manager),
        ("demo_server1", "server1@example.com", Role::Server),
        ("demo_server2", "server2@example.com", Role::Server),
    ];
    for (username, email, role) in staff {
        let account = account::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            first_name: Set(None),
            last_name: Set(None),
            role: Set(role),
            is_elevated: Set(derive_elevated_access(role, false, false)),
            is_superuser: Set(false),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        profile::ActiveModel {
            account_id: Set(account.id),
            display_name: Set(username.to_string()),
            email: Set(Some(email.to_string())),
            role: Set(role),
            shift_start: Set(None),
            shift_end: Set(None),
            attendance_date: Set(None),
            attendance_status: Set(AttendanceStatus::Present),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }
    info!("Created {} staff accounts with profiles", staff.len());

    let menu = [
        ("Burger", Category::Main, Decimal::new(999, 2), 12),
        ("Pizza", Category::Main, Decimal::new(1299, 2), 18),
        ("Fries", Category::Side, Decimal::new(399, 2), 6),
    ];
    let mut menu_ids = Vec::new();
    for (name, category, price, prep_minutes) in menu {
        let item = menu_item::ActiveModel {
            restaurant_id: Set(restaurant.id),
            name: Set(name.to_string()),
            description: Set(None),
            category: Set(category),
            base_price: Set(price),
            is_active: Set(true),
            prep_minutes: Set(prep_minutes),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        menu_ids.push(item.id);
    }

    // Variants on the burger.
    for (name, modifier, stock) in [
        ("Large", Decimal::new(150, 2), 100),
        ("Extra Cheese", Decimal::new(200, 2), 50),
    ] {
        menu_variant::ActiveModel {
            menu_item_id: Set(menu_ids[0]),
            name: Set(name.to_string()),
            price_modifier: Set(modifier),
            stock: Set(stock),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }
    info!("Created {} menu items with variants", menu_ids.len());

    // One open order on table 1: two burgers and fries, tickets opened
    // for both lines, cash payment pending.
    let now = Utc::now();
    let order = order::ActiveModel {
        table_id: Set(table_ids[0]),
        status: Set(OrderStatus::Open),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    for (menu_item_id, quantity, prep_minutes) in [(menu_ids[0], 2, 12), (menu_ids[2], 1, 6)] {
        let line = order_item::ActiveModel {
            order_id: Set(order.id),
            menu_item_id: Set(menu_item_id),
            variant_id: Set(None),
            quantity: Set(quantity),
            notes: Set(None),
            status: Set(OrderItemStatus::Pending),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        kitchen_ticket::ActiveModel {
            order_item_id: Set(line.id),
            station: Set("Kitchen".to_string()),
            status: Set(TicketStatus::Pending),
            priority: Set(0),
            created_at: Set(now),
            due_at: Set(now + Duration::minutes(prep_minutes)),
            completed_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    payment::ActiveModel {
        order_id: Set(order.id),
        amount: Set(Decimal::new(2397, 2)),
        method: Set(PaymentMethod::Cash),
        status: Set(PaymentStatus::Pending),
        gateway_ref: Set(None),
        created_at: Set(now),
        paid_at: Set(None),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    info!("Demo data seeded successfully");
    Ok(())
}
