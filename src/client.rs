use crate::Args;
use kube::config::{KubeConfigOptions, KubeconfigError};
use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum RunError<E> {
    #[error("Failed to evaluate configuration: {0}")]
    Config(#[from] KubeconfigError),
    #[error("Failed to create client: {0}")]
    Kube(#[from] kube::Error),
    #[error(transparent)]
    Operation(E),
}

#[derive(Clone)]
pub struct Client {
    args: Args,
}

impl Client {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Evaluate the kubeconfig, honoring the selected context.
    pub async fn config(&self) -> Result<kube::Config, KubeconfigError> {
        let mut config = kube::Config::from_kubeconfig(&KubeConfigOptions {
            context: self.args.context.clone(),
            ..Default::default()
        })
        .await?;

        if let Some(namespace) = &self.args.namespace {
            config.default_namespace = namespace.clone();
        }

        Ok(config)
    }

    pub async fn run<F, Fut, R, E>(&self, f: F) -> Result<R, RunError<E>>
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        // a new client per operation, commands only run one
        let config = self.config().await?;
        let client = kube::Client::try_from(config)?;

        let context = Context {
            client,
            args: &self.args,
        };

        f(context).await.map_err(RunError::Operation)
    }
}

#[derive(Clone)]
pub struct Context<'c> {
    pub args: &'c Args,
    pub client: kube::Client,
}

impl Context<'_> {
    /// The namespace to work in. The `--namespace` argument is already applied to the config.
    pub fn namespace(&self) -> String {
        self.client.default_namespace().to_string()
    }
}
