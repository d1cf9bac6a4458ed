#[cfg(test)]
mod integration_tests {
    use crate::test_utils::test_utils::{
        setup_test_app, DISTRIBUTOR_PASSWORD, OWNER_PASSWORD,
    };
    use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_login_and_me() {
        let (app, _seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({"username": "maria", "password": OWNER_PASSWORD}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["role"], "SHOP_OWNER");
        assert_eq!(body["data"]["user"]["shop_name"], "Downtown Optics");

        let token = body["data"]["token"].as_str().unwrap().to_string();
        let me = server
            .get("/api/v1/auth/me")
            .add_header(AUTHORIZATION, bearer(&token))
            .await;
        me.assert_status(StatusCode::OK);
        let me_body: Value = me.json();
        assert_eq!(me_body["data"]["username"], "maria");
        assert_eq!(me_body["data"]["role"], "SHOP_OWNER");

        // The distributor logs in without a shop binding
        let admin = server
            .post("/api/v1/auth/login")
            .json(&json!({"username": "admin", "password": DISTRIBUTOR_PASSWORD}))
            .await;
        admin.assert_status(StatusCode::OK);
        let admin_body: Value = admin.json();
        assert_eq!(admin_body["data"]["user"]["role"], "DISTRIBUTOR");
        assert_eq!(admin_body["data"]["user"]["shop_name"], Value::Null);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (app, _seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({"username": "maria", "password": "wrong"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({"username": "nobody", "password": OWNER_PASSWORD}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_endpoints_require_authentication() {
        let (app, _seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/frames").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = server.get("/api/v1/inventory/shop-inventory").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_distributor_endpoints_reject_shop_owners() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/shops")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .json(&json!({
                "name": "New Shop",
                "address": "1 Side Street",
                "email": "new@example.com",
                "username": "newowner",
                "password": "longenough",
                "confirm_password": "longenough"
            }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let response = server
            .get("/api/v1/dashboard/sales-trends")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_shop_creates_owner_account() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/shops")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "name": "Eastside Vision",
                "address": "4 Market Lane",
                "owner_name": "Ben Okafor",
                "phone": "555-0102",
                "email": "eastside@example.com",
                "username": "ben",
                "password": "benspassword",
                "confirm_password": "benspassword"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["name"], "Eastside Vision");
        assert_eq!(body["data"]["user_count"], 1);

        // The owner account can log straight in and is bound to the shop
        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({"username": "ben", "password": "benspassword"}))
            .await;
        login.assert_status(StatusCode::OK);
        let login_body: Value = login.json();
        assert_eq!(login_body["data"]["user"]["role"], "SHOP_OWNER");
        assert_eq!(login_body["data"]["user"]["shop_name"], "Eastside Vision");
    }

    #[tokio::test]
    async fn test_create_shop_rejects_duplicate_username_and_short_password() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // "maria" is already taken by the seeded owner
        let response = server
            .post("/api/v1/shops")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "name": "Clone Shop",
                "address": "9 Copy Road",
                "email": "clone@example.com",
                "username": "maria",
                "password": "longenough",
                "confirm_password": "longenough"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "USERNAME_ALREADY_EXISTS");

        // Validation rejects a five-character password
        let response = server
            .post("/api/v1/shops")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "name": "Short Shop",
                "address": "9 Short Road",
                "email": "short@example.com",
                "username": "short",
                "password": "tiny5",
                "confirm_password": "tiny5"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_frame_crud_and_search() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/frames")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "product_id": "SQ-020",
                "name": "Square Steel",
                "frame_type": "square",
                "color": "silver",
                "material": "steel",
                "price": "95.00",
                "brand": "Verve"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        let frame_id = created["data"]["id"].as_i64().unwrap();

        // Duplicate product IDs are rejected
        let duplicate = server
            .post("/api/v1/frames")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "product_id": "SQ-020",
                "name": "Other",
                "frame_type": "square",
                "color": "black",
                "material": "steel",
                "price": "90.00",
                "brand": "Verve"
            }))
            .await;
        duplicate.assert_status(StatusCode::BAD_REQUEST);

        // Update the price
        let update = server
            .put(&format!("/api/v1/frames/{}", frame_id))
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({"price": "99.50"}))
            .await;
        update.assert_status(StatusCode::OK);
        let updated: Value = update.json();
        assert_eq!(updated["data"]["price"], "99.50");

        // Search by brand substring (visible to shop owners too)
        let search = server
            .get("/api/v1/frames/search?q=Verve")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        search.assert_status(StatusCode::OK);
        let results: Value = search.json();
        let names: Vec<&str> = results["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"Square Steel"));
        assert!(names.contains(&"Round Tortoise"));
        assert!(!names.contains(&"Classic Aviator"));

        // Delete
        let delete = server
            .delete(&format!("/api/v1/frames/{}", frame_id))
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .await;
        delete.assert_status(StatusCode::OK);
        let gone = server
            .get(&format!("/api/v1/frames/{}", frame_id))
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .await;
        gone.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_frame_choices_merge_predefined_and_observed() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Seeded catalog has an off-list material "acetate" (predefined) and
        // the brands Skyline/Verve
        let response = server
            .get("/api/v1/frames/choices")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();

        let frame_types: Vec<&str> = body["data"]["frame_types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["value"].as_str().unwrap())
            .collect();
        assert!(frame_types.contains(&"aviator"));
        assert!(frame_types.contains(&"cat_eye"));

        let brands: Vec<&str> = body["data"]["brands"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b.as_str().unwrap())
            .collect();
        assert_eq!(brands, vec!["Skyline", "Verve"]);
    }

    #[tokio::test]
    async fn test_frames_csv_upload() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // AV-001 exists (update), CE-030 is new (create)
        let csv = "product_id,name,frame_type,price,color,material,brand\n\
                   AV-001,Classic Aviator II,aviator,130.00,gold,metal,Skyline\n\
                   CE-030,Cat Eye Rose,cat_eye,110.00,red,acetate,Verve\n";
        let response = server
            .post("/api/v1/frames/upload-csv")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .text(csv)
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["created"], 1);
        assert_eq!(body["data"]["updated"], 1);

        // A bad price aborts the whole upload
        let bad_csv = "product_id,name,frame_type,price,color,material,brand\n\
                       XX-001,Broken,round,notaprice,blue,metal,Verve\n";
        let bad = server
            .post("/api/v1/frames/upload-csv")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .text(bad_csv)
            .await;
        bad.assert_status(StatusCode::BAD_REQUEST);
    }

    async fn stock_default_inventory(server: &TestServer, seed: &crate::test_utils::test_utils::TestSeed) {
        let response = server
            .post("/api/v1/inventory/stock-in")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "shop_id": seed.shop_id,
                "items": [
                    {"frame_id": seed.frame_a_id, "quantity": 10, "cost_per_unit": "60.00"},
                    {"frame_id": seed.frame_b_id, "quantity": 5, "cost_per_unit": "40.00"}
                ]
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_stock_in_and_inventory_listing() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        stock_default_inventory(&server, &seed).await;

        // Unknown shop is a 404
        let missing = server
            .post("/api/v1/inventory/stock-in")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "shop_id": 9999,
                "items": [{"frame_id": seed.frame_a_id, "quantity": 1, "cost_per_unit": "60.00"}]
            }))
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);

        // The shop owner sees their positions with derived quantities
        let listing = server
            .get("/api/v1/inventory/shop-inventory")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        listing.assert_status(StatusCode::OK);
        let body: Value = listing.json();
        let positions = body["data"].as_array().unwrap();
        assert_eq!(positions.len(), 2);
        let aviator = positions
            .iter()
            .find(|p| p["frame_product_id"] == "AV-001")
            .unwrap();
        assert_eq!(aviator["quantity_received"], 10);
        assert_eq!(aviator["quantity_remaining"], 10);
        assert_eq!(aviator["total_cost"], "600.00");

        // frame_name filter narrows to the matching position
        let filtered = server
            .get("/api/v1/inventory/shop-inventory?frame_name=round")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        let filtered_body: Value = filtered.json();
        assert_eq!(filtered_body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_process_sale_flow() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        stock_default_inventory(&server, &seed).await;

        // Find the aviator position ID from the owner's listing
        let listing = server
            .get("/api/v1/inventory/shop-inventory")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        let body: Value = listing.json();
        let position_id = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["frame_product_id"] == "AV-001")
            .unwrap()["id"]
            .as_i64()
            .unwrap();

        // Distributors cannot record sales
        let forbidden = server
            .post("/api/v1/inventory/process-sale")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "shop_inventory_id": position_id,
                "quantity": 1,
                "sale_price": "120.50"
            }))
            .await;
        forbidden.assert_status(StatusCode::FORBIDDEN);

        // The shop owner records a two-unit sale
        let sale = server
            .post("/api/v1/inventory/process-sale")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .json(&json!({
                "shop_inventory_id": position_id,
                "quantity": 2,
                "sale_price": "120.50"
            }))
            .await;
        sale.assert_status(StatusCode::OK);
        let sale_body: Value = sale.json();
        assert_eq!(sale_body["data"]["quantity_sold"], 2);
        assert_eq!(sale_body["data"]["total_amount"], "241.00");
        assert_eq!(sale_body["data"]["remaining_stock"], 8);

        // Selling more than remains is rejected
        let oversell = server
            .post("/api/v1/inventory/process-sale")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .json(&json!({
                "shop_inventory_id": position_id,
                "quantity": 9,
                "sale_price": "120.50"
            }))
            .await;
        oversell.assert_status(StatusCode::BAD_REQUEST);
        let oversell_body: Value = oversell.json();
        assert_eq!(oversell_body["code"], "INSUFFICIENT_STOCK");

        // The SALE row shows up in the ledger with a negative quantity
        let transactions = server
            .get("/api/v1/inventory/transactions?transaction_type=SALE")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        transactions.assert_status(StatusCode::OK);
        let tx_body: Value = transactions.json();
        let rows = tx_body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["quantity"], -2);
        assert_eq!(rows[0]["created_by_username"], "maria");

        // The month's financial summary accumulated the sale
        let summaries = server
            .get("/api/v1/inventory/financial-summary")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        summaries.assert_status(StatusCode::OK);
        let summary_body: Value = summaries.json();
        let summary = &summary_body["data"].as_array().unwrap()[0];
        assert_eq!(summary["total_revenue"], "241.00");
        assert_eq!(summary["total_cost"], "120.00");
        assert_eq!(summary["total_profit"], "121.00");
        assert_eq!(summary["units_sold"], 2);
    }

    #[tokio::test]
    async fn test_bulk_distribution() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Create a second shop to distribute into
        let created = server
            .post("/api/v1/shops")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "name": "Eastside Vision",
                "address": "4 Market Lane",
                "email": "eastside@example.com",
                "username": "ben",
                "password": "benspassword",
                "confirm_password": "benspassword"
            }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let second_shop = created.json::<Value>()["data"]["id"].as_i64().unwrap();

        let response = server
            .post("/api/v1/inventory/distribution/bulk")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .json(&json!({
                "distributions": [
                    {
                        "shop_id": seed.shop_id,
                        "items": [
                            {"frame_id": seed.frame_a_id, "quantity": 10, "cost_per_unit": "60.00"},
                            {"frame_id": seed.frame_b_id, "quantity": 5, "cost_per_unit": "40.00"}
                        ]
                    },
                    {
                        "shop_id": second_shop,
                        "items": [
                            {"frame_id": seed.frame_a_id, "quantity": 3, "cost_per_unit": "60.00"}
                        ]
                    }
                ]
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["total_items_distributed"], 18);
        assert_eq!(body["data"]["shops_updated"], 2);

        // The distribution overview reflects both shops
        let overview = server
            .get("/api/v1/inventory/distribution")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .await;
        overview.assert_status(StatusCode::OK);
        let overview_body: Value = overview.json();
        assert_eq!(
            overview_body["data"]["recent_distributions"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_shop_inventory_detail_and_billing() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        stock_default_inventory(&server, &seed).await;

        let listing = server
            .get("/api/v1/inventory/shop-inventory")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        let position_id = listing.json::<Value>()["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["frame_product_id"] == "AV-001")
            .unwrap()["id"]
            .as_i64()
            .unwrap();

        server
            .post("/api/v1/inventory/process-sale")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .json(&json!({
                "shop_inventory_id": position_id,
                "quantity": 2,
                "sale_price": "120.50"
            }))
            .await
            .assert_status(StatusCode::OK);

        let detail = server
            .get(&format!("/api/v1/inventory/shops/{}/inventory", seed.shop_id))
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .await;
        detail.assert_status(StatusCode::OK);
        let detail_body: Value = detail.json();
        assert_eq!(detail_body["data"]["shop"]["name"], "Downtown Optics");
        assert_eq!(detail_body["data"]["total_items"], 2);
        assert_eq!(
            detail_body["data"]["financial_summary"]["total_revenue"],
            "241.00"
        );

        // Billing for the current month carries the cost of the sold units
        let billing = server
            .get(&format!(
                "/api/v1/inventory/shops/{}/billing-report",
                seed.shop_id
            ))
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .await;
        billing.assert_status(StatusCode::OK);
        let billing_body: Value = billing.json();
        assert_eq!(billing_body["data"]["total_amount_due"], "120.00");
        assert_eq!(
            billing_body["data"]["items"].as_array().unwrap()[0]["quantity_sold"],
            2
        );

        let missing = server
            .get("/api/v1/inventory/shops/9999/billing-report")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_inventory_csv_upload() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let csv = "product_id,quantity\nAV-001,4\nRN-010,2\n";
        let response = server
            .post(&format!("/api/v1/inventory/upload-csv?shop_id={}", seed.shop_id))
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .text(csv)
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["shop_name"], "Downtown Optics");
        assert_eq!(body["data"]["processed_items"].as_array().unwrap().len(), 2);

        // Unknown product IDs abort the upload
        let bad = server
            .post(&format!("/api/v1/inventory/upload-csv?shop_id={}", seed.shop_id))
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .text("product_id,quantity\nZZ-999,4\n")
            .await;
        bad.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_endpoints() {
        let (app, seed) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        stock_default_inventory(&server, &seed).await;

        let listing = server
            .get("/api/v1/inventory/shop-inventory")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        let position_id = listing.json::<Value>()["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["frame_product_id"] == "AV-001")
            .unwrap()["id"]
            .as_i64()
            .unwrap();
        server
            .post("/api/v1/inventory/process-sale")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .json(&json!({
                "shop_inventory_id": position_id,
                "quantity": 3,
                "sale_price": "120.50"
            }))
            .await
            .assert_status(StatusCode::OK);

        // Distributor: monthly trends carry the sale
        let trends = server
            .get("/api/v1/dashboard/sales-trends?period=month")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .await;
        trends.assert_status(StatusCode::OK);
        let trends_body: Value = trends.json();
        let points = trends_body["data"].as_array().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0]["sales_count"], 3);
        assert_eq!(points[0]["total_revenue"], "361.50");

        // Distributor: top products rank the aviator first
        let top = server
            .get("/api/v1/dashboard/top-products?limit=5")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .await;
        let top_body: Value = top.json();
        assert_eq!(top_body["data"][0]["product_id"], "AV-001");
        assert_eq!(top_body["data"][0]["sales_count"], 3);

        // Distributor: low stock alerts with a threshold above the round
        // frame's remaining five units
        let alerts = server
            .get("/api/v1/dashboard/low-stock-alerts?threshold=6")
            .add_header(AUTHORIZATION, bearer(&seed.distributor_token))
            .await;
        let alerts_body: Value = alerts.json();
        assert_eq!(alerts_body["data"]["total_low_stock_items"], 1);

        // Shop owner: month-to-date summary
        let summary = server
            .get("/api/v1/dashboard/shop/summary")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        summary.assert_status(StatusCode::OK);
        let summary_body: Value = summary.json();
        assert_eq!(summary_body["data"]["total_sales_current_month"], 3);
        assert_eq!(summary_body["data"]["total_revenue_current_month"], "361.50");
        assert_eq!(summary_body["data"]["items_in_stock"], 12);

        // Shop owner: daily series
        let daily = server
            .get("/api/v1/dashboard/shop/sales-by-day")
            .add_header(AUTHORIZATION, bearer(&seed.owner_token))
            .await;
        daily.assert_status(StatusCode::OK);
        let daily_body: Value = daily.json();
        assert_eq!(daily_body["data"].as_array().unwrap().len(), 1);
        assert_eq!(daily_body["data"][0]["sales_count"], 3);
    }
}
