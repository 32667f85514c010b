//! Reading and changing the scale of workloads.

use crate::k8s::{ResourceKind, ScaleStrategy, Scaler};
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;

/// The desired and actual number of replicas of a workload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaCounts {
    pub desired_replicas: i32,
    pub actual_replicas: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum ScaleError {
    #[error(transparent)]
    Kube(#[from] kube::Error),
    #[error("Cannot parse scale by value: {value}")]
    InvalidCount {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Scale by value must not be negative: {0}")]
    NegativeCount(i32),
    #[error("Unsupported resource kind: {0}")]
    UnsupportedKind(String),
    #[error("Failed to encode scale: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Parse a replica count, as it is received from the outside.
pub fn parse_replica_count(count: &str) -> Result<i32, ScaleError> {
    let replicas: i32 = count.parse().map_err(|source| ScaleError::InvalidCount {
        value: count.to_string(),
        source,
    })?;

    if replicas < 0 {
        return Err(ScaleError::NegativeCount(replicas));
    }

    Ok(replicas)
}

/// Get the desired and actual replicas of a workload.
pub async fn get_scale_spec(
    client: kube::Client,
    kind: ResourceKind,
    namespace: &str,
    name: &str,
) -> Result<ReplicaCounts, ScaleError> {
    log::debug!("Reading scale of {kind} {namespace}/{name}");

    Scaler::new(client, kind, namespace).current(name).await
}

/// Set the desired replicas of a workload, or the parallelism in case of a job.
///
/// Every call is a plain "set to N": there is no version check or retry, so of two
/// concurrent requests the last one wins, unless the API server reports a conflict.
pub async fn scale_resource(
    client: kube::Client,
    kind: ResourceKind,
    namespace: &str,
    name: &str,
    count: &str,
) -> Result<ReplicaCounts, ScaleError> {
    log::debug!("Scaling {kind} {namespace}/{name} to {count:?}");

    Scaler::new(client, kind, namespace)
        .apply(name, count)
        .await
}

/// Same as [`scale_resource`], taking the kind as a string (case-insensitive).
pub async fn scale_resource_by_name(
    client: kube::Client,
    kind: &str,
    namespace: &str,
    name: &str,
    count: &str,
) -> Result<ReplicaCounts, ScaleError> {
    let kind: ResourceKind = kind.parse()?;
    scale_resource(client, kind, namespace, name, count).await
}
