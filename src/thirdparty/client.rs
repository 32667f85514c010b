use super::{ClientError, KnownType, RestConfig};
use http::header::{HeaderValue, CONTENT_TYPE};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::{
    api::{DeleteParams, GetParams, ListParams, PostParams},
    core::{DynamicObject, Request},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A custom resource object, with whatever fields its type has.
pub type ThirdPartyResourceObject = DynamicObject;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyResourceObjectList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<ThirdPartyResourceObject>,
}

/// Build a client from the configuration.
pub fn new_rest_client(config: &RestConfig) -> Result<ResourceClient, ClientError> {
    check_config(config)?;
    let client = kube::Client::try_from(config.base.clone())?;
    ResourceClient::with_client(client, config)
}

fn check_config(config: &RestConfig) -> Result<(), ClientError> {
    let group_version = config
        .group_version
        .as_ref()
        .ok_or(ClientError::MissingGroupVersion)?;

    let registered = [
        KnownType::ThirdPartyResourceObject,
        KnownType::ThirdPartyResourceObjectList,
    ]
    .into_iter()
    .all(|ty| config.registry.is_registered(group_version, ty));

    if !registered {
        return Err(ClientError::NotRegistered(group_version.api_version()));
    }

    Ok(())
}

/// Generic CRUD operations on custom resource objects of a single group/version.
#[derive(Clone)]
pub struct ResourceClient {
    client: kube::Client,
    config: RestConfig,
}

impl ResourceClient {
    /// Use an existing client, with the group/version settings of `config`.
    pub fn with_client(client: kube::Client, config: &RestConfig) -> Result<Self, ClientError> {
        check_config(config)?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    fn request(&self, namespace: Option<&str>, plural: &str) -> Request {
        Request::new(self.config.url_path(namespace, plural))
    }

    fn with_content_type(
        &self,
        mut req: http::Request<Vec<u8>>,
    ) -> Result<http::Request<Vec<u8>>, ClientError> {
        let value = HeaderValue::from_str(&self.config.content_type)?;
        req.headers_mut().insert(CONTENT_TYPE, value);
        Ok(req)
    }

    async fn send<T: DeserializeOwned>(&self, req: http::Request<Vec<u8>>) -> Result<T, ClientError> {
        log::debug!("{} {}", req.method(), req.uri());
        Ok(self.client.request(req).await?)
    }

    fn check_type(&self, api_version: Option<&str>) -> Result<(), ClientError> {
        match api_version {
            Some(api_version) if !self.config.registry.recognizes(api_version) => {
                Err(ClientError::UnknownType(api_version.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn check_object(&self, object: &ThirdPartyResourceObject) -> Result<(), ClientError> {
        self.check_type(object.types.as_ref().map(|t| t.api_version.as_str()))
    }

    pub async fn list(
        &self,
        namespace: Option<&str>,
        plural: &str,
        lp: &ListParams,
    ) -> Result<ThirdPartyResourceObjectList, ClientError> {
        let req = self
            .request(namespace, plural)
            .list(lp)
            .map_err(kube::Error::BuildRequest)?;

        let list: ThirdPartyResourceObjectList = self.send(req).await?;
        self.check_type(list.api_version.as_deref())?;
        Ok(list)
    }

    pub async fn get(
        &self,
        namespace: Option<&str>,
        plural: &str,
        name: &str,
    ) -> Result<ThirdPartyResourceObject, ClientError> {
        let req = self
            .request(namespace, plural)
            .get(name, &GetParams::default())
            .map_err(kube::Error::BuildRequest)?;

        let object: ThirdPartyResourceObject = self.send(req).await?;
        self.check_object(&object)?;
        Ok(object)
    }

    pub async fn create(
        &self,
        namespace: Option<&str>,
        plural: &str,
        object: &ThirdPartyResourceObject,
    ) -> Result<ThirdPartyResourceObject, ClientError> {
        let data = serde_json::to_vec(object)?;
        let req = self
            .request(namespace, plural)
            .create(&PostParams::default(), data)
            .map_err(kube::Error::BuildRequest)?;

        let object: ThirdPartyResourceObject = self.send(self.with_content_type(req)?).await?;
        self.check_object(&object)?;
        Ok(object)
    }

    pub async fn replace(
        &self,
        namespace: Option<&str>,
        plural: &str,
        name: &str,
        object: &ThirdPartyResourceObject,
    ) -> Result<ThirdPartyResourceObject, ClientError> {
        let data = serde_json::to_vec(object)?;
        let req = self
            .request(namespace, plural)
            .replace(name, &PostParams::default(), data)
            .map_err(kube::Error::BuildRequest)?;

        let object: ThirdPartyResourceObject = self.send(self.with_content_type(req)?).await?;
        self.check_object(&object)?;
        Ok(object)
    }

    /// Delete an object. Returns `None` when the server only answered with a status.
    pub async fn delete(
        &self,
        namespace: Option<&str>,
        plural: &str,
        name: &str,
        dp: &DeleteParams,
    ) -> Result<Option<ThirdPartyResourceObject>, ClientError> {
        let req = self
            .request(namespace, plural)
            .delete(name, dp)
            .map_err(kube::Error::BuildRequest)?;

        let value: serde_json::Value = self.send(self.with_content_type(req)?).await?;
        if value.get("kind").and_then(|kind| kind.as_str()) == Some("Status") {
            return Ok(None);
        }

        let object: ThirdPartyResourceObject = serde_json::from_value(value)?;
        self.check_object(&object)?;
        Ok(Some(object))
    }
}
