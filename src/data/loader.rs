//! Loads both datasets concurrently, all-or-nothing.

use anyhow::Result;
use bytes::Bytes;
use tracing::{debug, info};

use crate::data::records::{AttainmentRecord, parse_records};
use crate::data::topology::{Topology, parse_topology};
use crate::error::MapError;
use crate::fetch::{HttpClient, fetch_bytes};

/// Everything fetched for one render.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub records: Vec<AttainmentRecord>,
    pub topology: Topology,
}

/// Fetches the education records and the county topology.
///
/// Sources starting with `http` are requested through the client; anything
/// else is read as a local file path.
pub struct DatasetLoader<C> {
    client: C,
    education_source: String,
    topology_source: String,
}

impl<C: HttpClient> DatasetLoader<C> {
    pub fn new(client: C, education_source: impl Into<String>, topology_source: impl Into<String>) -> Self {
        Self {
            client,
            education_source: education_source.into(),
            topology_source: topology_source.into(),
        }
    }

    /// Fetches and parses both sources. The first failure wins: the other
    /// request is dropped and its outcome never observed.
    #[tracing::instrument(skip(self), fields(education = %self.education_source, topology = %self.topology_source))]
    pub async fn load(&self) -> Result<Datasets> {
        let (records, topology) = tokio::try_join!(
            self.load_records(),
            self.load_topology(),
        )?;

        info!(
            records = records.len(),
            arcs = topology.arcs.len(),
            "Datasets loaded"
        );
        Ok(Datasets { records, topology })
    }

    async fn load_records(&self) -> Result<Vec<AttainmentRecord>> {
        let bytes = self.fetch("education data", &self.education_source).await?;
        Ok(parse_records(&bytes)?)
    }

    async fn load_topology(&self) -> Result<Topology> {
        let bytes = self.fetch("topology", &self.topology_source).await?;
        Ok(parse_topology(&bytes)?)
    }

    async fn fetch(&self, source_name: &'static str, source: &str) -> Result<Bytes> {
        let bytes = if is_remote(source) {
            fetch_bytes(&self.client, source)
                .await
                .map_err(|e| MapError::Fetch {
                    source_name,
                    message: format!("{e:#}"),
                })?
        } else {
            tokio::fs::read(source)
                .await
                .map(Bytes::from)
                .map_err(|e| MapError::Fetch {
                    source_name,
                    message: format!("failed to read {source}: {e}"),
                })?
        };
        debug!(source_name, bytes = bytes.len(), "Source fetched");
        Ok(bytes)
    }
}

/// Whether `source` names an HTTP(S) resource rather than a local path.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
