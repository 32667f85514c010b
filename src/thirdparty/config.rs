use super::{ClientError, KnownType, TypeRegistry};
use kube::core::GroupVersion;

/// Root path of the core API.
pub const API_PATH: &str = "/api";
/// Root path of the group APIs, where custom resources live.
pub const APIS_PATH: &str = "/apis";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Connection settings of a client talking to one group/version.
#[derive(Clone, Debug)]
pub struct RestConfig {
    /// Connection settings, as provided by the caller.
    pub base: kube::Config,
    pub group_version: Option<GroupVersion>,
    pub api_path: String,
    pub content_type: String,
    pub registry: TypeRegistry,
}

impl RestConfig {
    pub fn new(base: kube::Config) -> Self {
        Self {
            base,
            group_version: None,
            api_path: API_PATH.to_string(),
            content_type: CONTENT_TYPE_JSON.to_string(),
            registry: TypeRegistry::default(),
        }
    }

    /// The path of a collection of objects, `None` for cluster scoped ones.
    pub fn url_path(&self, namespace: Option<&str>, plural: &str) -> String {
        let mut path = self.api_path.trim_end_matches('/').to_string();

        if let Some(gv) = &self.group_version {
            path.push('/');
            path.push_str(&gv.api_version());
        }

        if let Some(namespace) = namespace {
            path.push_str("/namespaces/");
            path.push_str(namespace);
        }

        path.push('/');
        path.push_str(plural);
        path
    }
}

/// Configure `config` for working with custom resource objects of a group/version.
///
/// The object types get registered with `registry`, which the config keeps using.
pub fn new_rest_config(
    mut config: RestConfig,
    group_version: GroupVersion,
    registry: &TypeRegistry,
) -> RestConfig {
    registry.add_known_types(&group_version, &KnownType::ALL);

    config.group_version = Some(group_version);
    config.api_path = APIS_PATH.to_string();
    config.content_type = CONTENT_TYPE_JSON.to_string();
    config.registry = registry.clone();
    config
}

/// Parse a `group/version` string of an API group. The core group is not served
/// below [`APIS_PATH`], so a bare version is rejected.
pub fn parse_group_version(value: &str) -> Result<GroupVersion, ClientError> {
    let invalid = || ClientError::InvalidGroupVersion(value.to_string());

    let group_version = value.parse::<GroupVersion>().map_err(|_| invalid())?;
    if group_version.group.is_empty()
        || group_version.version.is_empty()
        || group_version.version.contains('/')
    {
        return Err(invalid());
    }

    Ok(group_version)
}
