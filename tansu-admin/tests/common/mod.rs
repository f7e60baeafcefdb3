// Copyright ⓒ 2024-2025 Peter Morgan <peter.james.morgan@gmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![allow(dead_code)]

use std::collections::BTreeMap;

use async_trait::async_trait;
use tansu_acl::{Acl, Operation, Permission, Resource};
use tansu_admin::Admin;
use tansu_cluster_admin::{
    AclFilter, BrokerMetadata, ClusterAdmin, MatchingAcl, Memory, ResourceAcls, TopicDetail,
};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use url::Url;

pub(crate) type Error = Box<dyn std::error::Error + Send + Sync>;
pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn init_tracing() -> Result<DefaultGuard> {
    Ok(tracing::subscriber::set_default(
        tracing_subscriber::fmt()
            .with_level(true)
            .with_line_number(true)
            .with_thread_names(false)
            .with_target(true)
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive(format!("{}=debug", env!("CARGO_CRATE_NAME")).parse()?)
                    .add_directive("tansu_admin=debug".parse()?)
                    .add_directive("tansu_cluster_admin=debug".parse()?),
            )
            .with_test_writer()
            .finish(),
    ))
}

pub(crate) fn memory() -> Result<Memory> {
    Ok(Memory::builder()
        .cluster("tansu")
        .node(111)
        .advertised_listener(Url::parse("tcp://localhost:9092")?)
        .group("payments-consumer", "consumer")
        .build())
}

pub(crate) fn admin() -> Result<Admin<Memory>> {
    memory().map(Admin::new)
}

pub(crate) fn allow(principal: &str, operation: Operation, resource: Resource) -> Acl {
    Acl::default()
        .principal(principal)
        .permission_type(Permission::Allow)
        .operation(operation)
        .host("*")
        .resource(resource)
}

/// A client that fails every request.
#[derive(Clone, Debug, Default)]
pub(crate) struct Unavailable;

impl Unavailable {
    fn error<T>() -> tansu_cluster_admin::Result<T> {
        Err(tansu_cluster_admin::Error::Message("unavailable".into()))
    }
}

#[async_trait]
impl ClusterAdmin for Unavailable {
    async fn list_acls(&self, _filter: AclFilter) -> tansu_cluster_admin::Result<Vec<ResourceAcls>> {
        Self::error()
    }

    async fn create_acls(&self, _acls: Vec<ResourceAcls>) -> tansu_cluster_admin::Result<()> {
        Self::error()
    }

    async fn delete_acls(
        &self,
        _filter: AclFilter,
        _validate_only: bool,
    ) -> tansu_cluster_admin::Result<Vec<MatchingAcl>> {
        Self::error()
    }

    async fn list_topics(&self) -> tansu_cluster_admin::Result<BTreeMap<String, TopicDetail>> {
        Self::error()
    }

    async fn create_topic(
        &self,
        _name: &str,
        _detail: TopicDetail,
        _validate_only: bool,
    ) -> tansu_cluster_admin::Result<()> {
        Self::error()
    }

    async fn delete_topic(&self, _name: &str) -> tansu_cluster_admin::Result<()> {
        Self::error()
    }

    async fn brokers(&self) -> tansu_cluster_admin::Result<Vec<BrokerMetadata>> {
        Self::error()
    }

    async fn list_consumer_groups(
        &self,
    ) -> tansu_cluster_admin::Result<BTreeMap<String, String>> {
        Self::error()
    }
}
