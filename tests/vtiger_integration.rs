//! End-to-end tests against a mocked vTiger web service endpoint.
//!
//! These exercise the full path from operation call to HTTP exchange to
//! decoded result, including the login handshake and the fault-marker
//! classification that a unit test on the decoder alone cannot cover.

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vtix::core::config::split_host;
use vtix::core::App;
use vtix::state::StateStore;
use vtix::ui::output::Verbosity;
use vtix::vtiger::helpdesk::{
    assigned_tickets, lookup_ticket, ticket_statuses, HelpdeskError,
};
use vtix::vtiger::timesheet::create_time_entry;
use vtix::vtiger::{AuthError, Method, VtigerClient, VtigerError};

const TOKEN: &str = "4b09fa9b7406e";
// md5(TOKEN + "secret")
const DERIVED_KEY: &str = "f91c6f4d4d4fe063c8ee333b93b22c43";
const USER_ID: &str = "19x8261";

fn client_for(server: &MockServer) -> VtigerClient {
    let (scheme, host) = split_host(&server.uri());
    VtigerClient::new(&host, scheme, None, false, Verbosity::Quiet).unwrap()
}

async fn mount_challenge(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "getchallenge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "token": TOKEN,
                "serverTime": 1258945379,
                // Far enough out that the expiry watchdog stays silent.
                "expireTime": 4102444800i64,
            }
        })))
        .mount(server)
        .await;
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/webservice.php"))
        .and(body_string_contains("operation=login"))
        .and(body_string_contains(format!("accessKey={}", DERIVED_KEY)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "sessionName": "5d6cf4ee1c73a",
                "userId": USER_ID,
                "version": "0.22",
                "vtigerVersion": "6.5.0",
            }
        })))
        .mount(server)
        .await;
}

async fn logged_in_app(server: &MockServer) -> App {
    mount_challenge(server).await;
    mount_login(server).await;

    let mut client = client_for(server);
    client.login("me", "secret").await.unwrap();
    assert!(client.has_session());

    let state = StateStore::open_in_memory().unwrap();
    App::new(client, Some(state), None, Verbosity::Quiet)
}

fn ticket_row(number: &str, priority: &str) -> serde_json::Value {
    json!({
        "id": "9x13099",
        "parent_id": "3x151",
        "ticket_no": number,
        "ticket_title": "Widget exploded",
        "ticketstatus": "In Progress",
        "assigned_user_id": USER_ID,
        "cf_539": "Hourly",
        "cf_551": priority,
        "cf_555": "2024-04-01",
        "cf_565": "Problem Submission",
        "ticketseverities": "Default Request",
        "hours": "4",
    })
}

async fn mount_ticket_query(server: &MockServer, rows: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "query"))
        .and(query_param_contains("query", "FROM HelpDesk"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "result": rows})),
        )
        .mount(server)
        .await;
}

async fn mount_account_query(server: &MockServer, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "query"))
        .and(query_param_contains("query", "FROM Accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": [{
                "id": "3x151",
                "accountname": "Acme Corp",
                "account_no": "ACC151",
            }]
        })))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn rejected_login_leaves_no_session() {
    let server = MockServer::start().await;
    mount_challenge(&server).await;
    Mock::given(method("POST"))
        .and(path("/webservice.php"))
        .and(body_string_contains("operation=login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": {"code": "INVALID_USER_CREDENTIALS", "message": "Invalid username or password"}
        })))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let err = client.login("me", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::LoginRejected { .. }));
    // Half of the handshake succeeded; none of the session stuck.
    assert!(!client.has_session());
    assert!(client.user_id().is_none());
}

#[tokio::test]
async fn fault_dump_under_http_200_is_a_remote_fault() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server).await;

    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "query"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "PHP Fatal error: Uncaught exception 'WebServiceException' in webservice.php:42",
        ))
        .mount(&server)
        .await;

    let err = lookup_ticket(&mut app, "TT9886", false).await.unwrap_err();
    assert!(matches!(
        err,
        HelpdeskError::Request(VtigerError::RemoteFault { .. })
    ));
}

#[tokio::test]
async fn lookup_of_unknown_ticket_is_not_found() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server).await;
    mount_ticket_query(&server, json!([])).await;

    let err = lookup_ticket(&mut app, "9886", false).await.unwrap_err();
    match err {
        HelpdeskError::TicketNotFound { number } => assert_eq!(number, "TT9886"),
        other => panic!("expected TicketNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn lookup_enriches_account_and_watched_flag() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server).await;
    mount_ticket_query(&server, json!([ticket_row("TT9886", "101")])).await;
    mount_account_query(&server, 1).await;

    app.state.as_ref().unwrap().watch("TT9886").unwrap();

    let ticket = lookup_ticket(&mut app, "t9886", false).await.unwrap();
    assert_eq!(ticket.number(), "TT9886");
    assert_eq!(ticket.account_name(), "Acme Corp");
    assert!(ticket.is_watched());
}

#[tokio::test]
async fn account_lookups_are_cached_per_process() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server).await;
    mount_ticket_query(&server, json!([ticket_row("TT9886", "101")])).await;
    // One account fetch for two ticket lookups; verified on server drop.
    mount_account_query(&server, 1).await;

    lookup_ticket(&mut app, "TT9886", false).await.unwrap();
    let second = lookup_ticket(&mut app, "TT9886", false).await.unwrap();
    assert_eq!(second.account_name(), "Acme Corp");
}

#[tokio::test]
async fn assigned_listing_preserves_server_order() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server).await;
    mount_ticket_query(
        &server,
        json!([ticket_row("TT9886", "101"), ticket_row("TT9900", "205")]),
    )
    .await;
    mount_account_query(&server, 1).await;

    let tickets = assigned_tickets(&mut app, &[]).await.unwrap();
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].number(), "TT9886");
    assert_eq!(tickets[0].priority(), "101");
    assert_eq!(tickets[1].number(), "TT9900");
    assert_eq!(tickets[1].priority(), "205");
}

#[tokio::test]
async fn status_picklist_comes_from_describe() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server).await;

    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "describe"))
        .and(query_param("elementType", "HelpDesk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "fields": [
                    {"name": "ticket_title", "type": {"name": "string"}},
                    {"name": "ticketstatus", "type": {
                        "name": "picklist",
                        "picklistValues": [
                            {"label": "Open", "value": "Open"},
                            {"label": "In Progress", "value": "In Progress"},
                            {"label": "Closed", "value": "Closed"},
                        ]
                    }},
                ]
            }
        })))
        .mount(&server)
        .await;

    let statuses = ticket_statuses(&mut app).await.unwrap();
    assert_eq!(statuses, vec!["Open", "In Progress", "Closed"]);
}

#[tokio::test]
async fn near_expiry_warning_snoozes_instead_of_repeating() {
    let server = MockServer::start().await;

    // A session already inside the 30-second warning margin.
    let declared = chrono::Utc::now().timestamp() + 10;
    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "getchallenge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "token": TOKEN,
                "serverTime": declared - 300,
                "expireTime": declared,
            }
        })))
        .mount(&server)
        .await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/webservice.php"))
        .and(query_param("operation", "listtypes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "result": {"types": []}})),
        )
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.login("me", "secret").await.unwrap();
    assert_eq!(client.session_expires_at(), Some(declared));

    // First request warns and pushes the window forward once.
    client
        .execute(&[("operation", "listtypes")], Method::Get)
        .await
        .unwrap();
    assert_eq!(client.session_expires_at(), Some(declared + 300));

    // The next request is outside the new window; no second bump.
    client
        .execute(&[("operation", "listtypes")], Method::Get)
        .await
        .unwrap();
    assert_eq!(client.session_expires_at(), Some(declared + 300));
}

#[tokio::test]
async fn time_entry_brackets_the_workday_start() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server).await;
    mount_ticket_query(&server, json!([ticket_row("TT9886", "101")])).await;
    mount_account_query(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/webservice.php"))
        .and(body_string_contains("operation=create"))
        .and(body_string_contains("Timesheet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {"id": "30x555"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let receipt = create_time_entry(&mut app, "TT9886", 90, date).await.unwrap();

    assert_eq!(receipt.ticket_number, "TT9886");
    assert_eq!(receipt.duration, "01:30:00");
    assert_eq!(
        receipt.start.format("%Y-%m-%d %H:%M:%S").to_string(),
        "2024-03-01 09:00:00"
    );
    assert_eq!(
        receipt.end.format("%Y-%m-%d %H:%M:%S").to_string(),
        "2024-03-01 10:30:00"
    );
}
