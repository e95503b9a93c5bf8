//! Integration tests for `GraphqlClient` using wiremock HTTP mocks.

use guia_core::{Category, PageSource, PAGE_SIZE};
use guia_graphql::{ClientOptions, GraphqlClient, GraphqlError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> GraphqlClient {
    GraphqlClient::new(&format!("{}/graphql", server.uri()), &ClientOptions::default())
        .expect("client construction should not fail")
}

fn uncached_client(server: &MockServer) -> GraphqlClient {
    let options = ClientOptions {
        cache_ttl_secs: 0,
        ..ClientOptions::default()
    };
    GraphqlClient::new(&format!("{}/graphql", server.uri()), &options)
        .expect("client construction should not fail")
}

fn comercios_body(slugs: &[&str], has_next_page: bool, end_cursor: &str) -> serde_json::Value {
    let edges: Vec<_> = slugs
        .iter()
        .map(|slug| {
            json!({
                "node": {
                    "title": format!("Comercio {slug}"),
                    "slug": slug,
                    "camposComercio": {
                        "categoria": ["Food: Bakery"],
                        "direccion": "Calle 1",
                        "telefono": "123",
                        "sitioWeb": "https://example.com",
                        "descripcionextendida": "<p>hola</p>",
                        "imagenExtra": { "node": { "sourceUrl": format!("https://cdn.example.com/{slug}.jpg") } },
                        "imagenExtra1": null,
                        "imagenExtra2": null,
                        "imagenExtra3": null,
                        "imagenExtra4": null
                    }
                }
            })
        })
        .collect();

    json!({
        "data": {
            "comercios": {
                "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor },
                "edges": edges
            }
        }
    })
}

#[tokio::test]
async fn get_comercios_sends_operation_and_variables() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "GetComercios",
            "variables": { "first": 6, "after": null }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(comercios_body(
            &["a", "b"],
            true,
            "cursor-1",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .get_comercios(PAGE_SIZE, None)
        .await
        .expect("request should succeed")
        .expect("page should be present");

    assert_eq!(page.listings.len(), 2);
    assert_eq!(page.listings[0].slug, "a");
    assert_eq!(
        page.listings[0].category,
        Some(Category::List(vec!["Food: Bakery".to_owned()]))
    );
    assert!(page.page_info.has_next_page);
    assert_eq!(page.page_info.end_cursor.as_deref(), Some("cursor-1"));
}

#[tokio::test]
async fn cursor_is_passed_back_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "first": 6, "after": "YXJyYXljb25uZWN0aW9uOjQy" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(comercios_body(
            &["c"],
            false,
            "YXJyYXljb25uZWN0aW9uOjQz",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .fetch_page(PAGE_SIZE, Some("YXJyYXljb25uZWN0aW9uOjQy"))
        .await
        .expect("request should succeed")
        .expect("page should be present");

    assert_eq!(page.listings.len(), 1);
    assert!(!page.page_info.has_next_page);
}

#[tokio::test]
async fn null_connection_is_reported_as_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "comercios": null } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client.get_comercios(6, None).await.expect("no error");
    assert!(page.is_none());
}

#[tokio::test]
async fn graphql_errors_surface_first_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "Internal server error" },
                { "message": "second" }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get_comercios(6, None).await.unwrap_err();
    assert!(matches!(err, GraphqlError::Graphql { ref operation, .. } if operation == "GetComercios"));
    assert_eq!(err.to_string(), "Internal server error");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get_comercios(6, None).await.unwrap_err();
    assert!(
        matches!(err, GraphqlError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get_comercios(6, None).await.unwrap_err();
    assert!(matches!(err, GraphqlError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn repeated_query_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comercios_body(
            &["a"],
            false,
            "cursor-1",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let first = client.get_comercios(6, None).await.unwrap();
    let second = client.get_comercios(6, None).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn zero_ttl_client_always_hits_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comercios_body(
            &["a"],
            false,
            "cursor-1",
        )))
        .expect(2)
        .mount(&server)
        .await;

    let client = uncached_client(&server);
    client.get_comercios(6, None).await.unwrap();
    client.get_comercios(6, None).await.unwrap();
}

#[tokio::test]
async fn failures_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comercios_body(
            &["a"],
            false,
            "cursor-1",
        )))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.get_comercios(6, None).await.is_err());
    let page = client.get_comercios(6, None).await.expect("second attempt");
    assert_eq!(page.expect("page").listings.len(), 1);
}

#[tokio::test]
async fn get_comercio_returns_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "GetComercio",
            "variables": { "slug": "cafe-central" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "comercioBy": {
                    "title": "Café Central",
                    "camposComercio": {
                        "categoria": "Food: Cafe",
                        "direccion": "Av. Siempre Viva 742",
                        "telefono": "+56 9 1234 5678",
                        "sitioWeb": "https://cafecentral.cl",
                        "descripcionextendida": "<p>Desde <strong>1990</strong></p>",
                        "imagenExtra": { "node": { "sourceUrl": "https://cdn.example.com/1.jpg" } },
                        "imagenExtra1": { "node": { "sourceUrl": "https://cdn.example.com/2.jpg" } },
                        "imagenExtra2": null,
                        "imagenExtra3": null,
                        "lunes": "8:00 - 20:00",
                        "martes": "8:00 - 20:00",
                        "miercoles": null,
                        "jueves": "",
                        "viernes": "8:00 - 22:00",
                        "sabado": "10:00 - 14:00",
                        "domingo": null
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let detail = client
        .get_comercio("cafe-central")
        .await
        .expect("request should succeed")
        .expect("record should exist");

    assert_eq!(detail.title, "Café Central");
    assert_eq!(detail.category, Some(Category::Scalar("Food: Cafe".into())));
    assert_eq!(detail.image_urls().len(), 2);
    assert_eq!(detail.schedule.friday.as_deref(), Some("8:00 - 22:00"));
    assert!(detail.schedule.sunday.is_none());
}

#[tokio::test]
async fn get_comercio_unknown_slug_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "comercioBy": null } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let detail = client.get_comercio("no-existe").await.expect("no error");
    assert!(detail.is_none());
}

#[tokio::test]
async fn ping_succeeds_against_live_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "Ping" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "__typename": "RootQuery" } })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.ping().await.expect("ping");
    client.ping().await.expect("ping is never cached");
}
