#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ApiResponse, HealthResponse};
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};

    async fn create_restaurant(server: &TestServer, name: &str) -> i64 {
        let response = server
            .post("/api/v1/restaurants")
            .json(&json!({ "name": name }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_table(server: &TestServer, restaurant_id: i64, number: i64) -> i64 {
        let response = server
            .post("/api/v1/tables")
            .json(&json!({
                "restaurant_id": restaurant_id,
                "table_number": number,
                "capacity": 4
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_menu_item(
        server: &TestServer,
        restaurant_id: i64,
        name: &str,
        base_price: &str,
        prep_minutes: i64,
    ) -> i64 {
        let response = server
            .post("/api/v1/menu-items")
            .json(&json!({
                "restaurant_id": restaurant_id,
                "name": name,
                "category": "Main",
                "base_price": base_price,
                "prep_minutes": prep_minutes
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_order(server: &TestServer, table_id: i64) -> i64 {
        let response = server
            .post("/api/v1/orders")
            .json(&json!({ "table_id": table_id }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn add_order_item(
        server: &TestServer,
        order_id: i64,
        menu_item_id: i64,
        quantity: i64,
    ) -> i64 {
        let response = server
            .post(&format!("/api/v1/orders/{}/items", order_id))
            .json(&json!({ "menu_item_id": menu_item_id, "quantity": quantity }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);

        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "connected");
    }

    #[tokio::test]
    async fn test_create_manager_is_elevated_and_cook_is_not() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "role": "Manager"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        assert!(body.success);
        assert_eq!(body.data["is_elevated"], true);
        assert_eq!(body.data["admin_access"], true);

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "username": "bob",
                "email": "bob@example.com",
                "role": "Cook"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["is_elevated"], false);
        assert_eq!(body.data["admin_access"], false);
    }

    #[tokio::test]
    async fn test_role_change_recomputes_elevated_flag() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "username": "carol",
                "email": "carol@example.com",
                "role": "Manager"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let account_id = body.data["id"].as_i64().unwrap();
        assert_eq!(body.data["is_elevated"], true);

        // Manager to Cook drops the flag.
        let response = server
            .put(&format!("/api/v1/accounts/{}", account_id))
            .json(&json!({ "role": "Cook" }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["is_elevated"], false);

        // Cook to Cashier restores it.
        let response = server
            .put(&format!("/api/v1/accounts/{}", account_id))
            .json(&json!({ "role": "Cashier" }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["is_elevated"], true);
    }

    #[tokio::test]
    async fn test_superuser_keeps_elevated_through_role_changes() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "username": "root",
                "email": "root@example.com",
                "role": "Cook",
                "is_superuser": true
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let account_id = body.data["id"].as_i64().unwrap();
        assert_eq!(body.data["is_elevated"], true);
        assert_eq!(body.data["admin_access"], true);

        for role in ["Staff", "Cook", "Manager", "Staff"] {
            let response = server
                .put(&format!("/api/v1/accounts/{}", account_id))
                .json(&json!({ "role": role }))
                .await;
            response.assert_status(StatusCode::OK);
            let body: ApiResponse<Value> = response.json();
            assert_eq!(body.data["is_elevated"], true, "role {} demoted a superuser", role);
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_conflict() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let request = json!({
            "username": "dave",
            "email": "dave@example.com"
        });
        server
            .post("/api/v1/accounts")
            .json(&request)
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.post("/api/v1/accounts").json(&request).await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["code"], "ACCOUNT_ALREADY_EXISTS");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_profile_embeds_the_full_account() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({
                "username": "erin",
                "email": "erin@example.com",
                "first_name": "Erin",
                "last_name": "Moss",
                "role": "Server"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let account_id = body.data["id"].as_i64().unwrap();

        let response = server
            .post(&format!("/api/v1/accounts/{}/profile", account_id))
            .json(&json!({ "display_name": "Erin M." }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let response = server
            .get(&format!("/api/v1/accounts/{}/profile", account_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["display_name"], "Erin M.");
        // The denormalized role defaults to the account's role.
        assert_eq!(body.data["role"], "Server");
        assert_eq!(body.data["account"]["username"], "erin");
        assert_eq!(body.data["account"]["full_name"], "Erin Moss");
        assert_eq!(body.data["account"]["is_elevated"], true);
    }

    #[tokio::test]
    async fn test_second_profile_for_account_is_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({ "username": "frank", "email": "frank@example.com" }))
            .await;
        let body: ApiResponse<Value> = response.json();
        let account_id = body.data["id"].as_i64().unwrap();

        server
            .post(&format!("/api/v1/accounts/{}/profile", account_id))
            .json(&json!({ "display_name": "Frank" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(&format!("/api/v1/accounts/{}/profile", account_id))
            .json(&json!({ "display_name": "Frank again" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["code"], "PROFILE_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_restaurant_delete_cascades_to_tables_and_menu() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Cascade Cafe").await;
        let table_id = create_table(&server, restaurant_id, 1).await;
        let menu_item_id = create_menu_item(&server, restaurant_id, "Soup", "4.50", 5).await;

        server
            .delete(&format!("/api/v1/restaurants/{}", restaurant_id))
            .await
            .assert_status(StatusCode::OK);

        server
            .get(&format!("/api/v1/tables/{}", table_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get(&format!("/api/v1/menu-items/{}", menu_item_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_order_for_unknown_table_is_a_referential_error() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/orders")
            .json(&json!({ "table_id": 4242 }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_TABLE_ID");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_table_with_orders_cannot_be_deleted() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Busy Bistro").await;
        let table_id = create_table(&server, restaurant_id, 7).await;
        create_order(&server, table_id).await;

        let response = server.delete(&format!("/api/v1/tables/{}", table_id)).await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["code"], "DATABASE_CONSTRAINT_ERROR");
    }

    #[tokio::test]
    async fn test_order_detail_resolves_prices_and_total() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Totals").await;
        let table_id = create_table(&server, restaurant_id, 1).await;
        let burger_id = create_menu_item(&server, restaurant_id, "Burger", "9.99", 12).await;

        let response = server
            .post(&format!("/api/v1/menu-items/{}/variants", burger_id))
            .json(&json!({ "name": "Large", "price_modifier": "1.50", "stock": 100 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let variant_id = body.data["id"].as_i64().unwrap();

        let response = server
            .post("/api/v1/orders")
            .json(&json!({
                "table_id": table_id,
                "items": [
                    { "menu_item_id": burger_id, "variant_id": variant_id, "quantity": 2 }
                ]
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let order_id = body.data["id"].as_i64().unwrap();

        let response = server.get(&format!("/api/v1/orders/{}", order_id)).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        let items = body.data["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["menu_item_name"], "Burger");
        assert_eq!(items[0]["variant_name"], "Large");
        assert_eq!(items[0]["unit_price"], "11.49");
        assert_eq!(items[0]["line_total"], "22.98");
        assert_eq!(body.data["total"], "22.98");
    }

    #[tokio::test]
    async fn test_order_with_unknown_menu_item_creates_nothing() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Atomic").await;
        let table_id = create_table(&server, restaurant_id, 1).await;

        let response = server
            .post("/api/v1/orders")
            .json(&json!({
                "table_id": table_id,
                "items": [{ "menu_item_id": 9999, "quantity": 1 }]
            }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_MENU_ITEM_ID");

        // The transaction rolled back, no half-created order remains.
        let response = server.get("/api/v1/orders").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_kitchen_ticket_due_time_and_uniqueness() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Ticketed").await;
        let table_id = create_table(&server, restaurant_id, 1).await;
        let menu_item_id = create_menu_item(&server, restaurant_id, "Pizza", "12.99", 18).await;
        let order_id = create_order(&server, table_id).await;
        let order_item_id = add_order_item(&server, order_id, menu_item_id, 1).await;

        let response = server
            .post(&format!("/api/v1/order-items/{}/ticket", order_item_id))
            .json(&json!({ "station": "Oven" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["station"], "Oven");
        assert_eq!(body.data["status"], "Pending");

        let created_at: DateTime<Utc> =
            body.data["created_at"].as_str().unwrap().parse().unwrap();
        let due_at: DateTime<Utc> = body.data["due_at"].as_str().unwrap().parse().unwrap();
        assert_eq!((due_at - created_at).num_minutes(), 18);

        // One ticket per order item.
        let response = server
            .post(&format!("/api/v1/order-items/{}/ticket", order_item_id))
            .json(&json!({}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["code"], "TICKET_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_completing_a_ticket_stamps_completed_at() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Done").await;
        let table_id = create_table(&server, restaurant_id, 1).await;
        let menu_item_id = create_menu_item(&server, restaurant_id, "Fries", "3.99", 6).await;
        let order_id = create_order(&server, table_id).await;
        let order_item_id = add_order_item(&server, order_id, menu_item_id, 1).await;

        let response = server
            .post(&format!("/api/v1/order-items/{}/ticket", order_item_id))
            .json(&json!({}))
            .await;
        let body: ApiResponse<Value> = response.json();
        let ticket_id = body.data["id"].as_i64().unwrap();
        assert!(body.data["completed_at"].is_null());

        let response = server
            .put(&format!("/api/v1/kitchen-tickets/{}", ticket_id))
            .json(&json!({ "status": "Completed" }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["status"], "Completed");
        assert!(body.data["completed_at"].is_string());
    }

    #[tokio::test]
    async fn test_payment_validation_and_paid_at() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Till").await;
        let table_id = create_table(&server, restaurant_id, 1).await;
        let order_id = create_order(&server, table_id).await;

        // Non-positive amounts are rejected.
        let response = server
            .post(&format!("/api/v1/orders/{}/payments", order_id))
            .json(&json!({ "amount": "0", "method": "Cash" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let response = server
            .post(&format!("/api/v1/orders/{}/payments", order_id))
            .json(&json!({ "amount": "23.97", "method": "Card" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let payment_id = body.data["id"].as_i64().unwrap();
        assert_eq!(body.data["status"], "Pending");
        assert!(body.data["paid_at"].is_null());

        let response = server
            .put(&format!("/api/v1/payments/{}", payment_id))
            .json(&json!({ "status": "Completed" }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["status"], "Completed");
        assert!(body.data["paid_at"].is_string());
    }

    #[tokio::test]
    async fn test_qr_token_roundtrip_by_value() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Scan Me").await;
        let table_id = create_table(&server, restaurant_id, 1).await;

        let response = server
            .post("/api/v1/qr-tokens")
            .json(&json!({ "table_id": table_id }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let token = body.data["token"].as_str().unwrap().to_string();

        let response = server.get(&format!("/api/v1/qr-tokens/{}", token)).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["table_id"].as_i64().unwrap(), table_id);

        server
            .delete(&format!("/api/v1/qr-tokens/{}", token))
            .await
            .assert_status(StatusCode::OK);
        server
            .get(&format!("/api/v1/qr-tokens/{}", token))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sales_month_label_is_derived_and_client_input_ignored() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Ledger").await;

        // A client-supplied month field is dropped; the label comes
        // from the date.
        let response = server
            .post(&format!("/api/v1/restaurants/{}/sales", restaurant_id))
            .json(&json!({
                "date": "2026-07-14",
                "amount": "812.40",
                "month": "Hackuary 1999"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["month"], "July 2026");

        // One record per restaurant per day.
        let response = server
            .post(&format!("/api/v1/restaurants/{}/sales", restaurant_id))
            .json(&json!({ "date": "2026-07-14", "amount": "1.00" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_sales_summary_groups_by_month_and_refreshes_after_writes() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Summaries").await;
        for (date, amount) in [
            ("2026-06-29", "100.00"),
            ("2026-06-30", "150.00"),
            ("2026-07-01", "200.00"),
        ] {
            server
                .post(&format!("/api/v1/restaurants/{}/sales", restaurant_id))
                .json(&json!({ "date": date, "amount": amount }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get(&format!("/api/v1/sales/summary?restaurant_id={}", restaurant_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        let months = body.data["months"].as_array().unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0]["month"], "June 2026");
        assert_eq!(months[0]["total"], "250.00");
        assert_eq!(months[0]["record_count"], 2);
        assert_eq!(months[1]["month"], "July 2026");
        assert_eq!(months[1]["total"], "200.00");

        // A later write invalidates the cached summary.
        server
            .post(&format!("/api/v1/restaurants/{}/sales", restaurant_id))
            .json(&json!({ "date": "2026-07-02", "amount": "50.00" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get(&format!("/api/v1/sales/summary?restaurant_id={}", restaurant_id))
            .await;
        let body: ApiResponse<Value> = response.json();
        let months = body.data["months"].as_array().unwrap();
        assert_eq!(months[1]["total"], "250.00");
        assert_eq!(months[1]["record_count"], 2);
    }

    #[tokio::test]
    async fn test_inventory_low_stock_flag() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Pantry").await;

        let response = server
            .post(&format!("/api/v1/restaurants/{}/inventory", restaurant_id))
            .json(&json!({
                "name": "Flour",
                "quantity": "10.0",
                "unit": "kg",
                "low_stock_threshold": "5.0"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let item_id = body.data["id"].as_i64().unwrap();
        assert_eq!(body.data["is_low_stock"], false);

        let response = server
            .put(&format!("/api/v1/inventory-items/{}", item_id))
            .json(&json!({ "quantity": "4.5" }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["is_low_stock"], true);
    }

    #[tokio::test]
    async fn test_orders_paginate_and_filter_by_status() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Queue").await;
        let table_id = create_table(&server, restaurant_id, 1).await;
        for _ in 0..3 {
            create_order(&server, table_id).await;
        }
        let cancelled_id = create_order(&server, table_id).await;
        server
            .put(&format!("/api/v1/orders/{}", cancelled_id))
            .json(&json!({ "status": "Cancelled" }))
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/api/v1/orders?status=Open").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        assert_eq!(body.data.len(), 3);

        let response = server.get("/api/v1/orders?page=1&per_page=2").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        assert_eq!(body.data.len(), 2);

        // Out-of-range pagination parameters are rejected up front.
        let response = server.get("/api/v1/orders?page=0").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_screen_display_crud() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/screen-displays")
            .json(&json!({
                "name": "Front of house",
                "content": { "headline": "Specials" },
                "config": { "rotation_seconds": 15 }
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let display_id = body.data["id"].as_i64().unwrap();
        assert_eq!(body.data["content"]["headline"], "Specials");

        let response = server
            .put(&format!("/api/v1/screen-displays/{}", display_id))
            .json(&json!({ "content": { "headline": "Sold out" } }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["content"]["headline"], "Sold out");

        server
            .delete(&format!("/api/v1/screen-displays/{}", display_id))
            .await
            .assert_status(StatusCode::OK);
        server
            .get(&format!("/api/v1/screen-displays/{}", display_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_variant_must_belong_to_the_ordered_item() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Mismatch").await;
        let table_id = create_table(&server, restaurant_id, 1).await;
        let burger_id = create_menu_item(&server, restaurant_id, "Burger", "9.99", 12).await;
        let pizza_id = create_menu_item(&server, restaurant_id, "Pizza", "12.99", 18).await;

        let response = server
            .post(&format!("/api/v1/menu-items/{}/variants", pizza_id))
            .json(&json!({ "name": "Thin crust" }))
            .await;
        let body: ApiResponse<Value> = response.json();
        let pizza_variant_id = body.data["id"].as_i64().unwrap();

        let order_id = create_order(&server, table_id).await;
        let response = server
            .post(&format!("/api/v1/orders/{}/items", order_id))
            .json(&json!({
                "menu_item_id": burger_id,
                "variant_id": pizza_variant_id,
                "quantity": 1
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_order_item_variant_can_be_set_and_cleared() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let restaurant_id = create_restaurant(&server, "Variants").await;
        let table_id = create_table(&server, restaurant_id, 1).await;
        let burger_id = create_menu_item(&server, restaurant_id, "Burger", "9.99", 12).await;

        let response = server
            .post(&format!("/api/v1/menu-items/{}/variants", burger_id))
            .json(&json!({ "name": "Large", "price_modifier": "1.50" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let large_id = body.data["id"].as_i64().unwrap();

        let order_id = create_order(&server, table_id).await;
        let item_id = add_order_item(&server, order_id, burger_id, 1).await;

        let response = server
            .put(&format!("/api/v1/order-items/{}", item_id))
            .json(&json!({ "variant_id": large_id }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["variant_id"].as_i64(), Some(large_id));
        assert_eq!(body.data["unit_price"], "11.49");

        // An update that leaves the field out must not touch the variant.
        let response = server
            .put(&format!("/api/v1/order-items/{}", item_id))
            .json(&json!({ "quantity": 2 }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["variant_id"].as_i64(), Some(large_id));
        assert_eq!(body.data["line_total"], "22.98");

        // An explicit null drops the line back to the base item.
        let response = server
            .put(&format!("/api/v1/order-items/{}", item_id))
            .json(&json!({ "variant_id": null }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert!(body.data["variant_id"].is_null());
        assert_eq!(body.data["unit_price"], "9.99");
    }
}
