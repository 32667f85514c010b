use crate::k8s::ResourceKind;
use crate::scaling::{parse_replica_count, ReplicaCounts, ScaleError};
use k8s_openapi::api::{
    apps::v1::{Deployment, ReplicaSet},
    autoscaling::v1::Scale,
    batch::v1::Job,
    core::v1::ReplicationController,
};
use k8s_openapi::NamespaceResourceScope;
use kube::{api::PostParams, Api, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Resources exposing the `scale` sub-resource.
pub trait Scalable {}

impl Scalable for Deployment {}
impl Scalable for ReplicaSet {}
impl Scalable for ReplicationController {}

/// A way of reading and changing the scale of a single workload.
#[allow(async_fn_in_trait)]
pub trait ScaleStrategy {
    async fn current(&self, name: &str) -> Result<ReplicaCounts, ScaleError>;

    /// Set the desired count. The count is only parsed once the object has been fetched.
    async fn apply(&self, name: &str, count: &str) -> Result<ReplicaCounts, ScaleError>;
}

/// Scales through the generic `scale` sub-resource.
pub struct ScaleSubresource<K> {
    api: Api<K>,
}

impl<K> ScaleSubresource<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    <K as Resource>::DynamicType: Default,
{
    pub fn namespaced(client: kube::Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
        }
    }
}

impl<K> ScaleStrategy for ScaleSubresource<K>
where
    K: Scalable + Clone + DeserializeOwned + Debug,
{
    async fn current(&self, name: &str) -> Result<ReplicaCounts, ScaleError> {
        let scale = self.api.get_scale(name).await?;
        Ok(ReplicaCounts::from(&scale))
    }

    async fn apply(&self, name: &str, count: &str) -> Result<ReplicaCounts, ScaleError> {
        let mut scale = self.api.get_scale(name).await?;
        let replicas = parse_replica_count(count)?;

        scale.spec.get_or_insert_with(Default::default).replicas = Some(replicas);
        let data = serde_json::to_vec(&scale)?;

        log::info!("Scaling {name} to {replicas} replicas");
        let scale = self
            .api
            .replace_scale(name, &PostParams::default(), data)
            .await?;

        Ok(ReplicaCounts {
            desired_replicas: replicas,
            actual_replicas: status_replicas(&scale),
        })
    }
}

impl From<&Scale> for ReplicaCounts {
    fn from(scale: &Scale) -> Self {
        Self {
            desired_replicas: scale
                .spec
                .as_ref()
                .and_then(|spec| spec.replicas)
                .unwrap_or_default(),
            actual_replicas: status_replicas(scale),
        }
    }
}

fn status_replicas(scale: &Scale) -> i32 {
    scale
        .status
        .as_ref()
        .map(|status| status.replicas)
        .unwrap_or_default()
}

/// Scales a job by changing its parallelism.
///
/// There is no observed parallelism, so both counts report the spec value.
pub struct JobParallelism {
    api: Api<Job>,
}

/// Parallelism the cluster assumes when a job doesn't set one.
const DEFAULT_PARALLELISM: i32 = 1;

impl JobParallelism {
    pub fn namespaced(client: kube::Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
        }
    }

    fn parallelism(job: &Job) -> Option<i32> {
        job.spec.as_ref().and_then(|spec| spec.parallelism)
    }
}

impl ScaleStrategy for JobParallelism {
    async fn current(&self, name: &str) -> Result<ReplicaCounts, ScaleError> {
        let job = self.api.get(name).await?;
        let parallelism = Self::parallelism(&job).unwrap_or(DEFAULT_PARALLELISM);

        Ok(ReplicaCounts {
            desired_replicas: parallelism,
            actual_replicas: parallelism,
        })
    }

    async fn apply(&self, name: &str, count: &str) -> Result<ReplicaCounts, ScaleError> {
        let mut job = self.api.get(name).await?;
        let parallelism = parse_replica_count(count)?;

        job.spec.get_or_insert_with(Default::default).parallelism = Some(parallelism);

        log::info!("Setting parallelism of job {name} to {parallelism}");
        let job = self.api.replace(name, &PostParams::default(), &job).await?;
        let parallelism = Self::parallelism(&job).unwrap_or(parallelism);

        Ok(ReplicaCounts {
            desired_replicas: parallelism,
            actual_replicas: parallelism,
        })
    }
}

/// The strategy handling a [`ResourceKind`].
pub enum Scaler {
    Deployment(ScaleSubresource<Deployment>),
    ReplicaSet(ScaleSubresource<ReplicaSet>),
    ReplicationController(ScaleSubresource<ReplicationController>),
    Job(JobParallelism),
}

impl Scaler {
    pub fn new(client: kube::Client, kind: ResourceKind, namespace: &str) -> Self {
        match kind {
            ResourceKind::Deployment => {
                Self::Deployment(ScaleSubresource::namespaced(client, namespace))
            }
            ResourceKind::ReplicaSet => {
                Self::ReplicaSet(ScaleSubresource::namespaced(client, namespace))
            }
            ResourceKind::ReplicationController => {
                Self::ReplicationController(ScaleSubresource::namespaced(client, namespace))
            }
            ResourceKind::Job => Self::Job(JobParallelism::namespaced(client, namespace)),
        }
    }
}

impl ScaleStrategy for Scaler {
    async fn current(&self, name: &str) -> Result<ReplicaCounts, ScaleError> {
        match self {
            Self::Deployment(s) => s.current(name).await,
            Self::ReplicaSet(s) => s.current(name).await,
            Self::ReplicationController(s) => s.current(name).await,
            Self::Job(s) => s.current(name).await,
        }
    }

    async fn apply(&self, name: &str, count: &str) -> Result<ReplicaCounts, ScaleError> {
        match self {
            Self::Deployment(s) => s.apply(name, count).await,
            Self::ReplicaSet(s) => s.apply(name, count).await,
            Self::ReplicationController(s) => s.apply(name, count).await,
            Self::Job(s) => s.apply(name, count).await,
        }
    }
}
