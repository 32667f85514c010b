pub mod k8s;
pub mod scaling;
pub mod thirdparty;

mod client;

pub use client::{Client, Context, RunError};

use crate::k8s::ResourceKind;
use crate::thirdparty::{
    new_rest_client, new_rest_config, parse_group_version, RestConfig, TypeRegistry,
};
use clap::{Parser, Subcommand};
use kube::api::{DeleteParams, ListParams};
use serde::Serialize;
use std::io::{stdout, Write};

/// Scale workloads and access custom resources
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Namespace
    #[clap(short, long, global = true)]
    pub namespace: Option<String>,
    /// Kubeconfig context to use
    #[clap(long, global = true)]
    pub context: Option<String>,
    /// Verbose
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show desired and actual replicas of a workload
    Get {
        /// Deployment, ReplicaSet, ReplicationController or Job
        kind: String,
        name: String,
    },
    /// Set the desired replicas of a workload (parallelism for jobs)
    Scale {
        /// Deployment, ReplicaSet, ReplicationController or Job
        kind: String,
        name: String,
        count: String,
    },
    /// Work with objects of a custom resource type
    Custom {
        /// The API group and version, like `example.com/v1`
        #[clap(short, long)]
        group_version: String,
        #[clap(subcommand)]
        action: CustomAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CustomAction {
    List {
        /// Plural name of the resource
        plural: String,
    },
    Get {
        plural: String,
        name: String,
    },
    Delete {
        plural: String,
        name: String,
    },
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    let client = Client::new(args.clone());

    match &args.command {
        Command::Get { kind, name } => {
            let kind: ResourceKind = kind.parse()?;
            let counts = client
                .run(|ctx| {
                    let namespace = ctx.namespace();
                    let client = ctx.client;
                    async move { scaling::get_scale_spec(client, kind, &namespace, name).await }
                })
                .await?;
            print_json(&counts)
        }
        Command::Scale { kind, name, count } => {
            let kind: ResourceKind = kind.parse()?;
            let counts = client
                .run(|ctx| {
                    let namespace = ctx.namespace();
                    let client = ctx.client;
                    async move {
                        scaling::scale_resource(client, kind, &namespace, name, count).await
                    }
                })
                .await?;
            print_json(&counts)
        }
        Command::Custom {
            group_version,
            action,
        } => {
            let group_version = parse_group_version(group_version)?;
            let registry = TypeRegistry::new();
            let config = new_rest_config(
                RestConfig::new(client.config().await?),
                group_version,
                &registry,
            );
            let namespace = config.base.default_namespace.clone();
            let resources = new_rest_client(&config)?;

            match action {
                CustomAction::List { plural } => {
                    let list = resources
                        .list(Some(&namespace), plural, &ListParams::default())
                        .await?;
                    print_json(&list)
                }
                CustomAction::Get { plural, name } => {
                    let object = resources.get(Some(&namespace), plural, name).await?;
                    print_json(&object)
                }
                CustomAction::Delete { plural, name } => {
                    match resources
                        .delete(Some(&namespace), plural, name, &DeleteParams::default())
                        .await?
                    {
                        Some(object) => print_json(&object),
                        None => {
                            log::info!("Deleted {plural}/{name}");
                            Ok(())
                        }
                    }
                }
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
