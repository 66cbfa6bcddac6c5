//! Typed Rust client for the cluster-management API (`clusters_mgmt/v1`).
//!
//! Covers the subset needed by the machine pool editor:
//! classic machine pools and hosted node pools (create, update).

mod types;

pub use types::*;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://api.openshift.com";

const API_PREFIX: &str = "/api/clusters_mgmt/v1";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("clusters_mgmt request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("clusters_mgmt {endpoint} returned {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Client for the cluster-management REST API.
#[derive(Clone)]
pub struct ClustersMgmtClient {
    token: String,
    base_url: String,
    http: reqwest::Client,
}

impl ClustersMgmtClient {
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            token: token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api { endpoint, status, body });
        }
        Ok(resp)
    }

    async fn send<B, T>(
        &self,
        method: reqwest::Method,
        path: String,
        body: &B,
        endpoint: &'static str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .request(method, self.url(&path))
            .header("Authorization", self.auth())
            .json(body)
            .send()
            .await?;

        Self::check(resp, endpoint)
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    // ── Machine pools ────────────────────────────────────────────────

    pub async fn create_machine_pool(
        &self,
        cluster_id: &str,
        pool: &MachinePool,
    ) -> Result<MachinePool> {
        self.send(
            reqwest::Method::POST,
            format!("/clusters/{cluster_id}/machine_pools"),
            pool,
            "create machine pool",
        )
        .await
    }

    pub async fn update_machine_pool(
        &self,
        cluster_id: &str,
        pool_id: &str,
        pool: &MachinePool,
    ) -> Result<MachinePool> {
        self.send(
            reqwest::Method::PATCH,
            format!("/clusters/{cluster_id}/machine_pools/{pool_id}"),
            pool,
            "update machine pool",
        )
        .await
    }

    // ── Node pools ───────────────────────────────────────────────────

    pub async fn create_node_pool(&self, cluster_id: &str, pool: &NodePool) -> Result<NodePool> {
        self.send(
            reqwest::Method::POST,
            format!("/clusters/{cluster_id}/node_pools"),
            pool,
            "create node pool",
        )
        .await
    }

    pub async fn update_node_pool(
        &self,
        cluster_id: &str,
        pool_id: &str,
        pool: &NodePool,
    ) -> Result<NodePool> {
        self.send(
            reqwest::Method::PATCH,
            format!("/clusters/{cluster_id}/node_pools/{pool_id}"),
            pool,
            "update node pool",
        )
        .await
    }
}
