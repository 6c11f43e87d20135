mod common;

use axum::http::StatusCode;
use common::{TestApp, delete, get, patch, post, put, test_app};
use serde_json::{Value, json};

async fn create(app: &TestApp, token: &str, uri: &str, body: Value) -> Value {
    let (status, created) = app.send(post(uri, Some(token), body)).await;
    assert_eq!(status, StatusCode::OK, "create {uri} failed: {created}");
    created
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

// --- Portfolio ---

#[tokio::test]
async fn test_portfolio_lifecycle() {
    let app = test_app();
    let token = app.admin_token().await;

    let created = create(
        &app,
        &token,
        "/api/portfolio",
        json!({
            "title": "Harbour Coffee",
            "description": "Brand refresh and storefront",
            "category": "Branding",
            "technologies": ["Figma", "Next.js"],
            "year": 2024
        }),
    )
    .await;
    assert_eq!(created["title"], "Harbour Coffee");
    assert_eq!(created["technologies"], json!(["Figma", "Next.js"]));
    assert_eq!(created["featured"], false);
    assert_eq!(created["active"], true);
    let uri = format!("/api/portfolio/{}", id_of(&created));

    // Public read
    let (status, fetched) = app.send(get(&uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // Partial update keeps the other fields
    let (status, updated) = app
        .send(put(&uri, Some(&token), json!({ "featured": true })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["featured"], true);
    assert_eq!(updated["title"], "Harbour Coffee");
    assert_eq!(updated["year"], 2024);
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, body) = app.send(delete(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Portfolio item removed");

    let (status, body) = app.send(get(&uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Portfolio item not found");
}

#[tokio::test]
async fn test_portfolio_filters_and_newest_first() {
    let app = test_app();
    let token = app.admin_token().await;

    for (title, category, featured) in [
        ("Alpha", "Web", false),
        ("Beta", "Branding", true),
        ("Gamma", "web", true),
    ] {
        create(
            &app,
            &token,
            "/api/portfolio",
            json!({ "title": title, "description": "d", "category": category, "featured": featured }),
        )
        .await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (_, all) = app.send(get("/api/portfolio", None)).await;
    let titles: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Gamma", "Beta", "Alpha"]);

    let (_, web) = app.send(get("/api/portfolio?category=WEB", None)).await;
    assert_eq!(web.as_array().unwrap().len(), 2);

    let (_, featured_web) = app
        .send(get("/api/portfolio?category=web&featured=true", None))
        .await;
    let featured_web = featured_web.as_array().unwrap();
    assert_eq!(featured_web.len(), 1);
    assert_eq!(featured_web[0]["title"], "Gamma");
}

#[tokio::test]
async fn test_portfolio_validation() {
    let app = test_app();
    let token = app.admin_token().await;

    let (status, body) = app
        .send(post(
            "/api/portfolio",
            Some(&token),
            json!({ "title": " ", "description": "d", "category": "" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "title is required; category is required");
}

#[tokio::test]
async fn test_unknown_ids_are_404() {
    let app = test_app();
    let token = app.admin_token().await;
    let missing = uuid::Uuid::new_v4();

    for (uri, msg) in [
        (format!("/api/portfolio/{missing}"), "Portfolio item not found"),
        (format!("/api/team/{missing}"), "Team member not found"),
        (format!("/api/subscriptions/{missing}"), "Subscription plan not found"),
        (format!("/api/testimonials/{missing}"), "Testimonial not found"),
        (format!("/api/consultations/{missing}"), "Consultation not found"),
        (format!("/api/contact/{missing}"), "Contact message not found"),
        (format!("/api/transactions/{missing}"), "Transaction not found"),
    ] {
        let (status, body) = app.send(get(&uri, Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["msg"], msg);

        let (status, _) = app.send(delete(&uri, Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "delete {uri}");
    }
}

#[tokio::test]
async fn test_malformed_requests_are_400_with_msg() {
    let app = test_app();
    let token = app.admin_token().await;

    // Required field missing from the body.
    let (status, body) = app
        .send(post(
            "/api/portfolio",
            Some(&token),
            json!({ "description": "d", "category": "web" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().contains("title"), "{body}");

    let (status, body) = app
        .send(post("/api/consultations", None, json!({ "name": "x" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());

    // Id that is not a UUID.
    let (status, body) = app.send(get("/api/portfolio/not-a-uuid", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());

    let (status, body) = app
        .send(delete("/api/transactions/42", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());

    // Query value outside the accepted set.
    let (status, body) = app
        .send(get("/api/transactions?type=refund", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());
}

// --- Team ---

#[tokio::test]
async fn test_team_ordering_and_active_filter() {
    let app = test_app();
    let token = app.admin_token().await;

    create(
        &app,
        &token,
        "/api/team",
        json!({ "name": "Lena", "role": "Designer", "order": 2 }),
    )
    .await;
    create(
        &app,
        &token,
        "/api/team",
        json!({
            "name": "Omar",
            "role": "Founder",
            "order": 1,
            "social_links": { "linkedin": "https://linkedin.com/in/omar" }
        }),
    )
    .await;
    create(
        &app,
        &token,
        "/api/team",
        json!({ "name": "Pia", "role": "Intern", "order": 0, "active": false }),
    )
    .await;

    let (_, all) = app.send(get("/api/team", None)).await;
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Pia", "Omar", "Lena"]);
    assert_eq!(
        all[1]["social_links"]["linkedin"],
        "https://linkedin.com/in/omar"
    );

    let (_, active) = app.send(get("/api/team?active=true", None)).await;
    assert_eq!(active.as_array().unwrap().len(), 2);
}

// --- Subscription plans ---

#[tokio::test]
async fn test_plans_sorted_by_price_and_names_unique() {
    let app = test_app();
    let token = app.admin_token().await;

    create(
        &app,
        &token,
        "/api/subscriptions",
        json!({ "name": "Growth", "price": 499, "features": ["SEO", "Ads"] }),
    )
    .await;
    let starter = create(
        &app,
        &token,
        "/api/subscriptions",
        json!({ "name": "Starter", "price": 99 }),
    )
    .await;
    assert_eq!(starter["duration"], "monthly");

    let (_, plans) = app.send(get("/api/subscriptions", None)).await;
    assert_eq!(plans[0]["name"], "Starter");
    assert_eq!(plans[1]["name"], "Growth");

    let (status, body) = app
        .send(post(
            "/api/subscriptions",
            Some(&token),
            json!({ "name": "Growth", "price": 10 }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Subscription plan with this name already exists");

    // Renaming onto an existing name is rejected too.
    let (status, _) = app
        .send(put(
            &format!("/api/subscriptions/{}", id_of(&starter)),
            Some(&token),
            json!({ "name": "Growth" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(post(
            "/api/subscriptions",
            Some(&token),
            json!({ "name": "Broken", "price": -1 }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "price must be a non-negative number");
}

// --- Testimonials ---

#[tokio::test]
async fn test_testimonial_rating_bounds() {
    let app = test_app();
    let token = app.admin_token().await;

    let (status, body) = app
        .send(post(
            "/api/testimonials",
            Some(&token),
            json!({ "client_name": "Maya", "content": "Great", "rating": 6 }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "rating must be between 1 and 5");

    let created = create(
        &app,
        &token,
        "/api/testimonials",
        json!({ "client_name": "Maya", "content": "Great", "featured": true }),
    )
    .await;
    assert_eq!(created["rating"], 5);

    let (status, _) = app
        .send(put(
            &format!("/api/testimonials/{}", id_of(&created)),
            Some(&token),
            json!({ "rating": 0 }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, featured) = app.send(get("/api/testimonials?featured=true", None)).await;
    assert_eq!(featured.as_array().unwrap().len(), 1);
}

// --- Consultations ---

#[tokio::test]
async fn test_consultation_workflow() {
    let app = test_app();
    let token = app.admin_token().await;

    // Public submission
    let (status, submitted) = app
        .send(post(
            "/api/consultations",
            None,
            json!({
                "name": "Rosa",
                "email": "Rosa@Example.com",
                "service": "Branding",
                "budget": "5k-10k",
                "message": "We need a new identity"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["status"], "pending");
    assert_eq!(submitted["email"], "rosa@example.com");
    assert_eq!(submitted["notes"], json!([]));
    let uri = format!("/api/consultations/{}", id_of(&submitted));

    // Listing is admin-only
    let (status, _) = app.send(get("/api/consultations", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, moved) = app
        .send(patch(
            &format!("{uri}/status"),
            Some(&token),
            Some(json!({ "status": "in-progress" })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["status"], "in-progress");

    // Backwards moves are allowed.
    let (status, moved) = app
        .send(patch(
            &format!("{uri}/status"),
            Some(&token),
            Some(json!({ "status": "pending" })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["status"], "pending");

    let (status, body) = app
        .send(patch(
            &format!("{uri}/status"),
            Some(&token),
            Some(json!({ "status": "archived" })),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());

    let (status, noted) = app
        .send(post(
            &format!("{uri}/notes"),
            Some(&token),
            json!({ "content": "  Called, left voicemail  " }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(noted["notes"][0]["content"], "Called, left voicemail");
    assert_eq!(noted["notes"][0]["author"], "Admin");

    let (status, body) = app
        .send(post(&format!("{uri}/notes"), Some(&token), json!({ "content": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "content is required");

    let (_, pending) = app
        .send(get("/api/consultations?status=pending", Some(&token)))
        .await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
    let (_, completed) = app
        .send(get("/api/consultations?status=completed", Some(&token)))
        .await;
    assert!(completed.as_array().unwrap().is_empty());

    let (status, body) = app.send(delete(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Consultation removed");
}

#[tokio::test]
async fn test_consultation_submission_validation() {
    let app = test_app();
    let (status, body) = app
        .send(post(
            "/api/consultations",
            None,
            json!({ "name": "Rosa", "email": "nope", "service": "Web", "message": "Hi" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "email must be a valid email address");
}

// --- Contact messages ---

#[tokio::test]
async fn test_contact_messages_read_flag() {
    let app = test_app();
    let token = app.admin_token().await;

    let (status, message) = app
        .send(post(
            "/api/contact",
            None,
            json!({ "name": "Tom", "email": "tom@example.com", "subject": "Hello", "message": "Are you hiring?" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["read"], false);
    let uri = format!("/api/contact/{}", id_of(&message));

    let (_, unread) = app.send(get("/api/contact?read=false", Some(&token))).await;
    assert_eq!(unread.as_array().unwrap().len(), 1);

    let (status, marked) = app
        .send(patch(&format!("{uri}/read"), Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["read"], true);
    assert_eq!(marked["subject"], "Hello");

    let (_, unread) = app.send(get("/api/contact?read=false", Some(&token))).await;
    assert!(unread.as_array().unwrap().is_empty());

    let (status, body) = app.send(delete(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Contact message removed");
}

// --- Transactions ---

async fn seed_ledger(app: &TestApp, token: &str) {
    for body in [
        json!({ "type": "income", "amount": 1200.0, "category": "Retainer", "date": "2025-01-10" }),
        json!({ "type": "expense", "amount": 200.0, "category": "Hosting", "date": "2025-01-20" }),
        json!({ "type": "income", "amount": 800.0, "category": "Retainer", "date": "2025-02-03" }),
        json!({ "type": "expense", "amount": 50.0, "category": "Software", "date": "2025-02-15" }),
    ] {
        create(app, token, "/api/transactions", body).await;
    }
}

#[tokio::test]
async fn test_transactions_filters_and_ordering() {
    let app = test_app();
    let token = app.admin_token().await;
    seed_ledger(&app, &token).await;

    let (status, all) = app.send(get("/api/transactions", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-02-15", "2025-02-03", "2025-01-20", "2025-01-10"]);

    let (_, income) = app
        .send(get("/api/transactions?type=income", Some(&token)))
        .await;
    assert_eq!(income.as_array().unwrap().len(), 2);

    let (_, january) = app
        .send(get(
            "/api/transactions?from=2025-01-01&to=2025-01-31",
            Some(&token),
        ))
        .await;
    assert_eq!(january.as_array().unwrap().len(), 2);

    let (status, body) = app
        .send(get(
            "/api/transactions?from=2025-03-01&to=2025-01-01",
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "from must not be later than to");
}

#[tokio::test]
async fn test_transaction_summary() {
    let app = test_app();
    let token = app.admin_token().await;
    seed_ledger(&app, &token).await;

    let (status, summary) = app
        .send(get("/api/transactions/summary", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_income"], 2000.0);
    assert_eq!(summary["total_expense"], 250.0);
    assert_eq!(summary["balance"], 1750.0);
    assert_eq!(summary["count"], 4);
    assert_eq!(summary["by_category"][0]["category"], "Retainer");
    assert_eq!(summary["by_category"][0]["total"], 2000.0);
    assert_eq!(summary["by_category"][0]["count"], 2);
    assert_eq!(summary["by_month"][0]["month"], "2025-01");
    assert_eq!(summary["by_month"][0]["net"], 1000.0);
    assert_eq!(summary["by_month"][1]["month"], "2025-02");
    assert_eq!(summary["by_month"][1]["net"], 750.0);

    let (_, february) = app
        .send(get("/api/transactions/summary?from=2025-02-01", Some(&token)))
        .await;
    assert_eq!(february["count"], 2);
    assert_eq!(february["balance"], 750.0);
}

#[tokio::test]
async fn test_transaction_summary_merges_category_casing() {
    let app = test_app();
    let token = app.admin_token().await;
    seed_ledger(&app, &token).await;
    create(
        &app,
        &token,
        "/api/transactions",
        json!({ "type": "expense", "amount": 30.0, "category": "software", "date": "2025-03-01" }),
    )
    .await;

    let (_, listed) = app
        .send(get("/api/transactions?category=SOFTWARE", Some(&token)))
        .await;
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let (status, summary) = app
        .send(get("/api/transactions/summary?category=software", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let buckets = summary["by_category"].as_array().unwrap();
    assert_eq!(buckets.len(), 1);
    assert!(
        buckets[0]["category"]
            .as_str()
            .unwrap()
            .eq_ignore_ascii_case("software")
    );
    assert_eq!(buckets[0]["total"], 80.0);
    assert_eq!(buckets[0]["count"], 2);
}

#[tokio::test]
async fn test_transaction_records_creator_and_validates_amount() {
    let app = test_app();
    let (admin, token) = app
        .seed_user("Admin", "admin@agency.test", agency_site_api::models::Role::Admin)
        .await;

    let created = create(
        &app,
        &token,
        "/api/transactions",
        json!({ "type": "expense", "amount": 19.99, "category": "Software" }),
    )
    .await;
    assert_eq!(created["created_by"], admin.id.to_string());
    assert!(created["date"].is_string());

    let (status, body) = app
        .send(post(
            "/api/transactions",
            Some(&token),
            json!({ "type": "income", "amount": 0, "category": "Retainer" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "amount must be greater than zero");

    let (status, updated) = app
        .send(put(
            &format!("/api/transactions/{}", id_of(&created)),
            Some(&token),
            json!({ "type": "income" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["type"], "income");
    assert_eq!(updated["amount"], 19.99);
}

// --- Dashboard ---

#[tokio::test]
async fn test_dashboard_stats() {
    let app = test_app();
    let token = app.admin_token().await;

    create(
        &app,
        &token,
        "/api/portfolio",
        json!({ "title": "A", "description": "d", "category": "Web" }),
    )
    .await;
    for name in ["Rosa", "Sam"] {
        app.send(post(
            "/api/consultations",
            None,
            json!({ "name": name, "email": "x@example.com", "service": "Web", "message": "Hi" }),
        ))
        .await;
    }
    app.send(post(
        "/api/contact",
        None,
        json!({ "name": "Tom", "email": "tom@example.com", "message": "Hello" }),
    ))
    .await;
    seed_ledger(&app, &token).await;

    let (status, stats) = app.send(get("/api/dashboard/stats", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["portfolio_items"], 1);
    assert_eq!(stats["consultations"], 2);
    assert_eq!(stats["pending_consultations"], 2);
    assert_eq!(stats["contact_messages"], 1);
    assert_eq!(stats["unread_messages"], 1);
    assert_eq!(stats["users"], 1);
    assert_eq!(stats["total_income"], 2000.0);
    assert_eq!(stats["total_expense"], 250.0);

    let breakdown = stats["consultations_by_status"].as_array().unwrap();
    assert_eq!(breakdown.len(), 5);
    assert_eq!(breakdown[0], json!({ "status": "pending", "count": 2 }));
    assert_eq!(breakdown[2], json!({ "status": "in-progress", "count": 0 }));
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = app.send(get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
