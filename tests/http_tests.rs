//! HTTP behaviour of the order site through the full router

mod support;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use honeybee::core::{ClubForm, OrderForm, OrderStore};
use honeybee::server::{ServerBuilder, build_routes};
use honeybee::storage::InMemoryOrderStore;
use serde_json::Value;
use support::{FailingStore, RecordingTransport, SHOP_INBOX, ada_form, config, state};

fn create_test_server() -> (TestServer, InMemoryOrderStore, RecordingTransport) {
    let store = InMemoryOrderStore::new();
    let transport = RecordingTransport::new();
    let app = build_routes(state(store.clone(), transport.clone()));
    let server = TestServer::try_new(app).expect("Failed to create test server");
    (server, store, transport)
}

mod page_tests {
    use super::*;

    #[tokio::test]
    async fn test_order_form_is_served_on_both_paths() {
        let (server, _, _) = create_test_server();

        for path in ["/", "/order/"] {
            let response = server.get(path).await;
            response.assert_status_ok();
            let html = response.text();
            assert!(html.contains("name=\"date_needed\""), "{} has no form", path);
            assert!(html.contains("Pick-up"));
        }
    }

    #[tokio::test]
    async fn test_thanks_pages() {
        let (server, _, _) = create_test_server();

        let response = server.get("/thanks/").await;
        response.assert_status_ok();
        assert!(response.text().contains("Thank you!"));

        let response = server.get("/club/thanks/").await;
        response.assert_status_ok();
        assert!(response.text().contains("Southern Sweets Club"));
    }
}

mod order_submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_valid_order_redirects_to_thanks() {
        let (server, store, transport) = create_test_server();

        let response = server.post("/order/").form(&ada_form()).await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header("location"), "/thanks/");
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_root_path_accepts_orders_too() {
        let (server, store, _) = create_test_server();

        let response = server.post("/").form(&ada_form()).await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_order_rerenders_form_with_input() {
        let (server, store, transport) = create_test_server();
        let form = OrderForm {
            email: "not-an-email".to_string(),
            ..ada_form()
        };

        let response = server.post("/order/").form(&form).await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Enter a valid email address."));
        assert!(html.contains("value=\"not-an-email\""));
        assert!(html.contains("value=\"Ada\""));
        assert!(html.contains("<option value=\"D\" selected>Delivery</option>"));
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_field_keeps_the_last_value() {
        let (server, store, _) = create_test_server();

        let response = server
            .post("/order/")
            .bytes(Bytes::from_static(
                b"name=Ada&name=Bob&email=ada%40example.com&phone=555\
                  &choice=D&date_needed=2025-12-24&details=x",
            ))
            .content_type("application/x-www-form-urlencoded")
            .await;

        response.assert_status(StatusCode::FOUND);
        let orders = store.list().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].name, "Bob");
    }

    #[tokio::test]
    async fn test_repeated_field_with_bad_input_rerenders_form() {
        let (server, store, _) = create_test_server();

        let response = server
            .post("/order/")
            .bytes(Bytes::from_static(b"name=Ada&name=Bob&email=nope&email=still-nope"))
            .content_type("application/x-www-form-urlencoded")
            .await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("value=\"Bob\""));
        assert!(html.contains("value=\"still-nope\""));
        assert!(html.contains("Enter a valid email address."));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_post_reports_every_required_field() {
        let (server, _, _) = create_test_server();

        let response = server.post("/order/").form(&OrderForm::default()).await;

        response.assert_status_ok();
        let html = response.text();
        assert_eq!(html.matches("This field is required.").count(), 6);
    }

    #[tokio::test]
    async fn test_mail_failure_still_redirects() {
        let store = InMemoryOrderStore::new();
        let transport = RecordingTransport::failing_for(SHOP_INBOX);
        let app = build_routes(state(store.clone(), transport.clone()));
        let server = TestServer::try_new(app).expect("Failed to create test server");

        let response = server.post("/order/").form(&ada_form()).await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(transport.sent_to("ada@example.com").len(), 1);
    }

    #[tokio::test]
    async fn test_persistence_failure_is_an_opaque_500() {
        let transport = RecordingTransport::new();
        let app = ServerBuilder::new()
            .with_config(config())
            .with_order_store(FailingStore)
            .with_transport(transport.clone())
            .build()
            .expect("Failed to build app");
        let server = TestServer::try_new(app).expect("Failed to create test server");

        let response = server.post("/order/").form(&ada_form()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["code"], "STORAGE_OPERATION_FAILED");
        assert!(!body["message"].as_str().unwrap().contains("database is locked"));
        assert!(transport.sent().is_empty());
    }
}

mod club_submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_club_form_page() {
        let (server, _, _) = create_test_server();

        let response = server.get("/club/").await;
        response.assert_status_ok();
        assert!(response.text().contains("action=\"/club/\""));
    }

    #[tokio::test]
    async fn test_valid_signup_redirects_and_stores_nothing() {
        let (server, store, transport) = create_test_server();

        let response = server
            .post("/club/")
            .form(&ClubForm {
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
            })
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header("location"), "/club/thanks/");
        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_club_field_is_not_rejected() {
        let (server, _, transport) = create_test_server();

        let response = server
            .post("/club/")
            .bytes(Bytes::from_static(
                b"name=Grace&name=Grace+H&email=grace%40example.com",
            ))
            .content_type("application/x-www-form-urlencoded")
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(transport.sent_to("grace@example.com").len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_signup_rerenders_form() {
        let (server, _, transport) = create_test_server();

        let response = server
            .post("/club/")
            .form(&ClubForm {
                name: String::new(),
                email: "grace@example.com".to_string(),
            })
            .await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("This field is required."));
        assert!(html.contains("value=\"grace@example.com\""));
        assert!(transport.sent().is_empty());
    }
}
