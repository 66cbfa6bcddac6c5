use async_trait::async_trait;
use tracing::info;

use crate::request::RequestPayload;
use crate::{Error, Result};

/// Hands built payloads to the cluster-management back end.
///
/// The returned payload is the resource as the back end stored it.
#[async_trait]
pub trait PoolSubmitter: Send + Sync + 'static {
    /// Create a machine pool or node pool on the cluster.
    async fn create_pool(&self, cluster_id: &str, payload: &RequestPayload)
    -> Result<RequestPayload>;

    /// Update an existing pool in place.
    async fn update_pool(
        &self,
        cluster_id: &str,
        pool_id: &str,
        payload: &RequestPayload,
    ) -> Result<RequestPayload>;

    /// Back end identifier, for logs.
    fn name(&self) -> &'static str;
}

/// Submits through `ocm_api::ClustersMgmtClient`.
pub struct OcmSubmitter {
    client: ocm_api::ClustersMgmtClient,
}

impl OcmSubmitter {
    pub fn new(client: ocm_api::ClustersMgmtClient) -> Self {
        Self { client }
    }

    /// Create from env vars: `OCM_API_TOKEN` (required), `OCM_API_URL`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let token = std::env::var("OCM_API_TOKEN")
            .map_err(|_| Error::MissingEnv("OCM_API_TOKEN".into()))?;
        let base_url =
            std::env::var("OCM_API_URL").unwrap_or_else(|_| ocm_api::DEFAULT_BASE_URL.into());

        Ok(Self::new(ocm_api::ClustersMgmtClient::new(token, base_url)))
    }
}

#[async_trait]
impl PoolSubmitter for OcmSubmitter {
    async fn create_pool(
        &self,
        cluster_id: &str,
        payload: &RequestPayload,
    ) -> Result<RequestPayload> {
        let created = match payload {
            RequestPayload::Classic(pool) => RequestPayload::Classic(
                self.client.create_machine_pool(cluster_id, pool).await?,
            ),
            RequestPayload::Hosted(pool) => {
                RequestPayload::Hosted(self.client.create_node_pool(cluster_id, pool).await?)
            }
        };

        info!(
            cluster_id,
            pool_id = %created.id(),
            topology = %created.topology(),
            "ocm: pool created"
        );
        Ok(created)
    }

    async fn update_pool(
        &self,
        cluster_id: &str,
        pool_id: &str,
        payload: &RequestPayload,
    ) -> Result<RequestPayload> {
        let updated = match payload {
            RequestPayload::Classic(pool) => RequestPayload::Classic(
                self.client
                    .update_machine_pool(cluster_id, pool_id, pool)
                    .await?,
            ),
            RequestPayload::Hosted(pool) => RequestPayload::Hosted(
                self.client.update_node_pool(cluster_id, pool_id, pool).await?,
            ),
        };

        info!(cluster_id, pool_id, topology = %updated.topology(), "ocm: pool updated");
        Ok(updated)
    }

    fn name(&self) -> &'static str {
        "ocm"
    }
}
