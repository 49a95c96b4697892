//! Dashboard lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `UsersView` over real
//! HTTP through `ReqwestTransport`. Validates that request building, response
//! parsing and list reconciliation work end-to-end with the actual server.

use tokio::net::TcpListener;
use users_core::{
    ApiClient, ApiError, ClientConfig, Gender, GenderFilter, Modal, ReqwestTransport, SubmitError,
    SubmitOutcome, Transport, UserId, UsersClient, UsersView,
};

async fn start_server() -> ClientConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    ClientConfig::new(format!("http://{addr}"))
}

fn view(config: &ClientConfig) -> UsersView<ReqwestTransport> {
    let transport = ReqwestTransport::new(config).unwrap();
    UsersView::new(ApiClient::new(config, transport))
}

async fn add(view: &mut UsersView<ReqwestTransport>, name: &str, email: &str, gender: Gender) -> UserId {
    view.open_add().unwrap();
    let form = view.form_mut();
    form.name = name.to_string();
    form.email = email.to_string();
    form.gender = Some(gender);
    match view.submit().await.unwrap() {
        SubmitOutcome::Created(user) => user.id,
        other => panic!("expected a created user, got {other:?}"),
    }
}

#[tokio::test]
async fn dashboard_lifecycle() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let config = start_server().await;
    let mut view = view(&config);

    // Step 1: load — empty server.
    view.load().await;
    assert!(view.users().is_empty());
    assert!(view.notifications().is_empty());

    // Step 2: create two users; newest first.
    let ann = add(&mut view, "Ann", "ann@x.com", Gender::Female).await;
    let bob = add(&mut view, "Bob", "bob@x.com", Gender::Male).await;
    let ids: Vec<&UserId> = view.users().iter().map(|u| &u.id).collect();
    assert_eq!(ids, [&bob, &ann]);
    assert_eq!(view.modal(), &Modal::Closed);

    // Step 3: filter.
    view.set_gender_filter(GenderFilter::Female);
    let rows = view.visible_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, ann);
    view.set_gender_filter(GenderFilter::All);

    // Step 4: edit Ann.
    let record = view.users()[1].clone();
    view.open_edit(&record).unwrap();
    view.form_mut().email = "ann@y.org".to_string();
    let outcome = view.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Updated(ref u) if u.email == "ann@y.org"));
    assert_eq!(view.users()[1].email, "ann@y.org");
    assert_eq!(view.users()[0].id, bob);

    // Step 5: soft delete Bob; gone locally and after a reload.
    view.delete(&bob).await;
    assert_eq!(view.users().len(), 1);
    view.load().await;
    assert_eq!(view.users().len(), 1);
    assert_eq!(view.users()[0].id, ann);
    assert_eq!(view.users()[0].name, "Ann");

    // Step 6: deleting an unknown id fails and the reload keeps the list intact.
    view.take_notifications();
    view.delete(&UserId::new("does-not-exist")).await;
    let messages: Vec<String> = view.take_notifications().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, ["Delete failed"]);
    assert_eq!(view.users().len(), 1);
}

#[tokio::test]
async fn editing_a_missing_user_keeps_modal_open() {
    let config = start_server().await;
    let mut view = view(&config);
    view.load().await;

    let ghost = users_core::User {
        id: UserId::new("ghost"),
        name: "Ghost".to_string(),
        email: "ghost@x.com".to_string(),
        gender: Gender::Male,
        deleted: false,
    };
    view.open_edit(&ghost).unwrap();
    let err = view.submit().await.unwrap_err();
    assert!(matches!(err, SubmitError::Network(ApiError::NotFound)));
    assert!(matches!(view.modal(), Modal::Edit(_)));
    assert!(!view.is_saving());
}

#[tokio::test]
async fn unreachable_server_is_a_notification() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut view = view(&ClientConfig::new(format!("http://{addr}")));
    view.load().await;

    assert!(view.users().is_empty());
    assert!(!view.is_loading());
    assert_eq!(view.notifications().len(), 1);
    assert!(view.notifications()[0].is_error());
}

#[tokio::test]
async fn transport_hands_back_response_headers() {
    let config = start_server().await;
    let transport = ReqwestTransport::new(&config).unwrap();
    let request = UsersClient::new(&config.base_url).build_list_users();

    let response = transport.execute(request).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.body, "[]");
}
