//! Test utilities: mock-server backed contexts for command tests.
//!
//! Helpers to exercise the load command against a `wiremock` server instead
//! of real endpoints. The command/network tests themselves live in this
//! file's test module.

#![cfg(all(test, not(target_arch = "wasm32")))]

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::BusinessConfig;
use crate::record::{Address, Company, UserRecord};
use crate::setup::build_directory_ctx;
use roster_states::StateCtx;

/// Mock-server backed context for exercising directory commands.
pub struct TestContext {
    /// Must be retained to keep the HTTP endpoint alive during the test.
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri());
        let ctx = build_directory_ctx(config);
        Self { mock_server, ctx }
    }

    /// Mount `GET /users` returning the given records.
    pub async fn mock_users(&self, users: &[UserRecord]) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users))
            .mount(&self.mock_server)
            .await;
    }

    /// Mount `GET /users` answering with a bare status code.
    pub async fn mock_users_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.mock_server)
            .await;
    }

    /// Flush queued commands and wait for every spawned task, syncing
    /// computes as results land.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();
        while self.ctx.task_count() > 0 {
            if start.elapsed() > timeout {
                panic!(
                    "timed out waiting for {} pending command tasks",
                    self.ctx.task_count()
                );
            }
            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }
        self.ctx.sync_computes();
    }

    pub async fn shutdown(&mut self) {
        self.ctx.shutdown().await;
    }
}

/// A record with the given name/city/company; remaining fields derived.
pub fn sample_user(id: u64, name: &str, city: Option<&str>, company: &str) -> UserRecord {
    let username = name.to_lowercase().replace(' ', ".");
    UserRecord {
        id,
        name: name.to_owned(),
        email: format!("{username}@example.com"),
        username,
        phone: format!("555-010{id}"),
        website: "example.com".to_owned(),
        company: (!company.is_empty()).then(|| Company {
            name: company.to_owned(),
            catch_phrase: "Synergize scalable paradigms".to_owned(),
        }),
        address: Address {
            street: "1 Main St".to_owned(),
            suite: format!("Apt. {id}"),
            city: city.map(str::to_owned),
            zipcode: "00000".to_owned(),
        },
    }
}
