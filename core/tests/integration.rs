//! Full CRUD lifecycle tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port. `crud_lifecycle_sans_io`
//! drives the sans-IO client by hand through ureq; the async tests go through
//! `CatalogApi` and its reqwest transport. Both validate request building and
//! response parsing end-to-end with the actual server.

use std::net::SocketAddr;

use catalog_core::{ApiError, CatalogApi, CatalogClient, ClientConfig, HttpMethod, HttpResponse, NewProduct};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: catalog_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the mock server on its own thread and runtime.
fn spawn_blocking_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

/// Start the mock server on the current tokio runtime.
async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    addr
}

fn product(name: &str, category: &str, price: f64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: category.to_string(),
        price,
    }
}

#[test]
fn crud_lifecycle_sans_io() {
    let addr = spawn_blocking_server();
    let client = CatalogClient::new(&format!("http://{addr}"));

    // Step 1: list: should be empty.
    let products = client.parse_list_products(execute(client.build_list_products())).unwrap();
    assert!(products.is_empty(), "expected empty list");

    // Step 2: create.
    let req = client.build_create_product(&product("Caneca", "Casa", 25.0)).unwrap();
    let created = client.parse_create_product(execute(req)).unwrap();
    assert_eq!(created.message, "Produto cadastrado com sucesso");
    assert_eq!(created.product.name, "Caneca");
    let id = created.product.id;

    // Step 3: get the created product.
    let fetched = client.parse_get_product(execute(client.build_get_product(id))).unwrap();
    assert_eq!(fetched, created.product);

    // Step 4: update every field.
    let req = client
        .build_update_product(id, &product("Caneca Grande", "Cozinha", 32.0))
        .unwrap();
    let updated = client.parse_update_product(execute(req)).unwrap();
    assert_eq!(updated.message, format!("Produto {id} atualizado com sucesso!"));
    assert_eq!(updated.product.category, "Cozinha");

    // Step 5: delete.
    let deleted = client.parse_delete_product(execute(client.build_delete_product(id))).unwrap();
    assert_eq!(deleted.message, format!("Produto com {id} apagado com sucesso!"));

    // Step 6: get after delete: NotFound with the server detail.
    let err = client.parse_get_product(execute(client.build_get_product(id))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.message(), format!("Produto id:{id}, não encontrado"));

    // Step 7: delete again: NotFound.
    let err = client.parse_delete_product(execute(client.build_delete_product(id))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));

    // Step 8: list: empty again.
    let products = client.parse_list_products(execute(client.build_list_products())).unwrap();
    assert!(products.is_empty(), "expected empty list after delete");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_then_list_contains_exactly_one_new_entry() {
    let addr = spawn_server().await;
    let api = CatalogApi::from_config(&ClientConfig::new(format!("http://{addr}"))).unwrap();

    api.create_product(&product("Lápis", "Escritório", 1.5)).await.unwrap();
    let before = api.list_products().await.unwrap();
    let saved = api.create_product(&product("Caderno", "Escritório", 12.0)).await.unwrap();
    let after = api.list_products().await.unwrap();

    assert_eq!(after.len(), before.len() + 1);
    let new_entries: Vec<_> = after.iter().filter(|p| !before.contains(p)).collect();
    assert_eq!(new_entries, [&saved.product]);
    assert_eq!(saved.product.name, "Caderno");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_the_target() {
    let addr = spawn_server().await;
    let api = CatalogApi::from_config(&ClientConfig::new(format!("http://{addr}"))).unwrap();

    let a = api.create_product(&product("A", "X", 1.0)).await.unwrap().product;
    let b = api.create_product(&product("B", "X", 2.0)).await.unwrap().product;
    api.update_product(b.id, &product("B2", "Y", 3.0)).await.unwrap();

    let products = api.list_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0], a);
    assert_eq!(products[1].id, b.id);
    assert_eq!(products[1].name, "B2");
    assert_eq!(products[1].price, 3.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_exactly_that_entry() {
    let addr = spawn_server().await;
    let api = CatalogApi::from_config(&ClientConfig::new(format!("http://{addr}"))).unwrap();

    let mut ids = Vec::new();
    for (name, price) in [("A", 1.0), ("B", 2.0), ("C", 3.0)] {
        ids.push(api.create_product(&product(name, "X", price)).await.unwrap().product.id);
    }
    api.delete_product(ids[1]).await.unwrap();

    let remaining: Vec<_> = api.list_products().await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(remaining, [ids[0], ids[2]]);
}

#[tokio::test(flavor = "multi_thread")]
async fn aggregates_match_the_catalog() {
    let addr = spawn_server().await;
    let api = CatalogApi::from_config(&ClientConfig::new(format!("http://{addr}"))).unwrap();

    let prices = [10.0, 30.0, 12.5, 47.25, 3.0];
    for (i, price) in prices.iter().enumerate() {
        api.create_product(&product(&format!("p{i}"), "X", *price)).await.unwrap();
    }

    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    let average = api.average_price().await.unwrap().average;
    assert!((average - mean).abs() < 0.01, "average {average} vs mean {mean}");

    assert_eq!(api.most_expensive().await.unwrap().price, 47.25);
    assert_eq!(api.cheapest().await.unwrap().price, 3.0);

    let above = api.above_average().await.unwrap();
    let below = api.below_average().await.unwrap();
    assert!(above.iter().all(|p| p.price >= mean));
    assert!(below.iter().all(|p| p.price < mean));
    assert!(above.iter().all(|p| !below.contains(p)));

    let mut union: Vec<_> = above.iter().chain(&below).map(|p| p.id).collect();
    union.sort_unstable();
    let mut all: Vec<_> = api.list_products().await.unwrap().into_iter().map(|p| p.id).collect();
    all.sort_unstable();
    assert_eq!(union, all);
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_backend_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = CatalogApi::from_config(&ClientConfig::new(format!("http://{addr}"))).unwrap();
    let err = api.list_products().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}
