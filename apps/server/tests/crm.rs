mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;
use support::spawn_app;

#[tokio::test]
async fn clients_are_scoped_to_their_owner() {
    let app = spawn_app(None).await;
    let alice = app.register("alice@example.com").await;
    let bob = app.register("bob@example.com").await;

    let client_id = app.create_client(&alice, "Acme").await;
    let uri = format!("/api/clients/{client_id}");

    let (status, body) = app.request(Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Client not found");

    let (_, listed) = app.request(Method::GET, "/api/clients", Some(&bob), None).await;
    assert_eq!(listed, json!([]));

    let (status, updated) = app
        .request(
            Method::PUT,
            &uri,
            Some(&alice),
            Some(json!({"businessName": "Acme Ltd"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["businessName"], "Acme Ltd");
    assert_eq!(updated["name"], "Acme");
    assert_eq!(updated["location"]["country"], "Nigeria");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/clients",
            Some(&alice),
            Some(json!({"name": "NoPhone", "email": "np@example.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "phoneNumber is required");

    let (status, body) = app.request(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Client deleted successfully");

    let (status, _) = app.request(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contacts_require_an_owned_client() {
    let app = spawn_app(None).await;
    let token = app.register("owner@example.com").await;
    let client_id = app.create_client(&token, "Shop").await;

    let (status, body) = app
        .request(Method::GET, "/api/customer-contacts", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "clientId is required");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/customer-contacts/bulk",
            Some(&token),
            Some(json!({
                "clientId": client_id,
                "contacts": [
                    {"name": "Ann", "email": "ann@example.com", "phoneNumber": "+2348011111111"},
                    {"name": "Ben", "email": "ben@example.com", "phoneNumber": "+2348022222222"}
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Created 2 customer contacts");

    let (status, contacts) = app
        .request(
            Method::GET,
            &format!("/api/customer-contacts?clientId={client_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contacts.as_array().unwrap().len(), 2);
    assert_eq!(contacts[0]["clientId"], client_id.as_str());

    let (status, body) = app
        .request(
            Method::POST,
            "/api/customer-contacts",
            Some(&token),
            Some(json!({
                "name": "Eve",
                "email": "eve@example.com",
                "phoneNumber": "1",
                "clientId": "9999"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Client not found");
}

#[tokio::test]
async fn notes_expand_their_client_and_rank_for_ai() {
    let app = spawn_app(None).await;
    let token = app.register("owner@example.com").await;
    let client_id = app.create_client(&token, "Bakery").await;

    for (title, priority) in [("Low", "low"), ("High", "high"), ("Mid", "medium")] {
        let (status, note) = app
            .request(
                Method::POST,
                "/api/notes",
                Some(&token),
                Some(json!({
                    "title": title,
                    "content": format!("{title} detail"),
                    "clientId": client_id,
                    "priority": priority
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{note}");
        assert_eq!(note["clientId"]["_id"], client_id.as_str());
        assert_eq!(note["clientId"]["name"], "Bakery");
        assert_eq!(note["category"], "general");
    }

    let (status, ranked) = app
        .request(
            Method::GET,
            &format!("/api/notes/ai/{client_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = ranked
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["High", "Mid", "Low"]);

    let (status, body) = app
        .request(Method::GET, "/api/notes/abc", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Note not found");
}

#[tokio::test]
async fn templates_render_placeholders() {
    let app = spawn_app(None).await;
    let token = app.register("owner@example.com").await;

    let (status, template) = app
        .request(
            Method::POST,
            "/api/templates",
            Some(&token),
            Some(json!({
                "name": "Promo",
                "type": "sms",
                "content": "Hi {{name}}, {{offer}} today only"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{template}");
    assert_eq!(template["type"], "sms");

    let (status, rendered) = app
        .request(
            Method::POST,
            &format!("/api/templates/{}/render", template["id"].as_str().unwrap()),
            Some(&token),
            Some(json!({"values": {"name": "Ada"}})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rendered["content"], "Hi Ada, {{offer}} today only");
    assert_eq!(rendered["missing"], json!(["offer"]));

    let (_, listed) = app
        .request(Method::GET, "/api/templates?type=email", Some(&token), None)
        .await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn outreach_without_providers_reports_configuration() {
    let app = spawn_app(None).await;
    let token = app.register("owner@example.com").await;
    let client_id = app.create_client(&token, "Salon").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/sms/send",
            Some(&token),
            Some(json!({"clientId": client_id, "message": "Hello"})),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "SMSProvider credentials not configured");

    let (_, dashboard) = app
        .request(Method::GET, "/api/insights/dashboard", Some(&token), None)
        .await;
    assert_eq!(dashboard["totalClients"], 1);
    assert_eq!(dashboard["locationData"]["Nigeria"], 1);
}
