//! Shared utilities for integration tests.

use std::collections::VecDeque;
use std::net::{Ipv4Addr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mock_requests::observability::init_logging;

/// HTTP client that never goes through a proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    init_logging();
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}

/// Send a GET and return the status code and body.
#[allow(dead_code)]
pub async fn get(client: &reqwest::Client, url: &str) -> (u16, String) {
    let res = client.get(url).send().await.expect("mock server unreachable");
    let status = res.status().as_u16();
    (status, res.text().await.unwrap())
}

/// Send a form-encoded POST and return the status code and body.
#[allow(dead_code)]
pub async fn post_form(client: &reqwest::Client, url: &str, form: &[(&str, &str)]) -> (u16, String) {
    let res = client
        .post(url)
        .form(form)
        .send()
        .await
        .expect("mock server unreachable");
    let status = res.status().as_u16();
    (status, res.text().await.unwrap())
}

/// A port held open by the returned listener.
#[allow(dead_code)]
pub fn busy_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// A port that was free a moment ago.
#[allow(dead_code)]
pub fn free_port() -> u16 {
    let (listener, port) = busy_port();
    drop(listener);
    port
}

/// A port source replaying `ports` in order, counting draws.
#[allow(dead_code)]
pub fn scripted(ports: Vec<u16>) -> (impl FnMut(u16, u16) -> u16 + Send, Arc<AtomicUsize>) {
    let draws = Arc::new(AtomicUsize::new(0));
    let counter = draws.clone();
    let mut ports: VecDeque<u16> = ports.into();

    let random = move |_: u16, _: u16| {
        counter.fetch_add(1, Ordering::SeqCst);
        ports.pop_front().expect("ran out of scripted ports")
    };
    (random, draws)
}
