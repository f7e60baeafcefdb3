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

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tansu_acl::{Acl, AclsByResource, IntoResourceAcls, Operation, Permission, Resource};
use tansu_cluster_admin::{ClusterAdmin, ResourceAcls, TopicDetail};
use tracing::{debug, instrument};

use crate::{Admin, Error, Result};

pub type Acls = Vec<Acl>;

const RETENTION_MS: &str = "retention.ms";

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Topic {
    pub name: String,
    pub partitions: i32,
    pub replication_factor: i16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_ms: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acls: Vec<Acls>,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn partitions(self, partitions: i32) -> Self {
        Self { partitions, ..self }
    }

    pub fn replication_factor(self, replication_factor: i16) -> Self {
        Self {
            replication_factor,
            ..self
        }
    }

    pub fn retention_ms(self, retention_ms: Option<i64>) -> Self {
        Self {
            retention_ms,
            ..self
        }
    }

    pub fn acls(self, acls: Vec<Acls>) -> Self {
        Self { acls, ..self }
    }

    pub fn from_detail(name: &str, detail: &TopicDetail) -> Result<Self> {
        let retention_ms = detail
            .configs
            .get(RETENTION_MS)
            .and_then(Option::as_deref)
            .map(str::parse::<i64>)
            .transpose()?;

        Ok(Self::new(name)
            .partitions(detail.num_partitions)
            .replication_factor(detail.replication_factor)
            .retention_ms(retention_ms))
    }

    pub fn detail(&self) -> TopicDetail {
        let detail = TopicDetail::default()
            .num_partitions(self.partitions)
            .replication_factor(self.replication_factor);

        if let Some(retention_ms) = self.retention_ms {
            detail.config(RETENTION_MS, Some(retention_ms.to_string()))
        } else {
            detail
        }
    }

    /// Attach the ACLs of this topic.
    pub fn with_acls(self, acls: &AclsByResource) -> Self {
        let acls = acls
            .get(&Resource::topic(self.name.as_str()))
            .filter(|acls| !acls.is_empty())
            .map(|acls| vec![acls.to_vec()])
            .unwrap_or_default();

        Self { acls, ..self }
    }

    fn acl_batches(&self) -> Result<Vec<ResourceAcls>> {
        let resource = Resource::topic(self.name.as_str());

        self.acls
            .iter()
            .flatten()
            .map(|acl| {
                if acl.resource == resource {
                    Ok(acl.clone())
                } else {
                    Err(tansu_acl::Error::ResourceMismatch {
                        expected: resource.clone(),
                        found: acl.resource.clone(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .and_then(IntoResourceAcls::into_resource_acls)
            .map_err(Into::into)
    }

    /// Principals allowed to produce to or consume from this topic.
    ///
    /// A consumer is allowed [`Read`](Operation::Read) and
    /// [`Describe`](Operation::Describe), a producer is allowed
    /// [`Write`](Operation::Write), [`Describe`](Operation::Describe)
    /// and [`Create`](Operation::Create).
    pub fn roles(&self) -> TopicRoles {
        let mut operations = BTreeMap::<&str, BTreeSet<Operation>>::new();

        for acl in self
            .acls
            .iter()
            .flatten()
            .filter(|acl| acl.permission_type == Permission::Allow)
        {
            _ = operations
                .entry(acl.principal.as_str())
                .or_default()
                .insert(acl.operation);
        }

        fn holds(held: &BTreeSet<Operation>, required: &[Operation]) -> bool {
            required.iter().all(|operation| held.contains(operation))
        }

        TopicRoles {
            producers: operations
                .iter()
                .filter(|(_, held)| {
                    holds(
                        held,
                        &[Operation::Write, Operation::Describe, Operation::Create],
                    )
                })
                .map(|(principal, _)| String::from(*principal))
                .collect(),

            consumers: operations
                .iter()
                .filter(|(_, held)| holds(held, &[Operation::Read, Operation::Describe]))
                .map(|(principal, _)| String::from(*principal))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TopicRoles {
    pub producers: Vec<String>,
    pub consumers: Vec<String>,
}

impl<C> Admin<C>
where
    C: ClusterAdmin,
{
    /// All topics, by name.
    #[instrument(skip_all)]
    pub async fn list_topics(&self) -> Result<Vec<Topic>> {
        self.client
            .list_topics()
            .await
            .map_err(Error::client("list topics"))?
            .iter()
            .map(|(name, detail)| Topic::from_detail(name, detail))
            .collect::<Result<Vec<_>>>()
            .inspect(|topics| debug!(topics = topics.len()))
    }

    /// Topics with a name matching a regular expression.
    #[instrument(skip_all)]
    pub async fn get_topics(&self, pattern: &str) -> Result<Vec<Topic>> {
        debug!(pattern);

        let re = Regex::new(pattern)?;

        self.list_topics().await.and_then(|topics| {
            let topics = topics
                .into_iter()
                .filter(|topic| re.is_match(&topic.name))
                .collect::<Vec<_>>();

            if topics.is_empty() {
                Err(Error::TopicNotFound(pattern.into()))
            } else {
                Ok(topics)
            }
        })
    }

    /// Create a topic together with any ACLs it carries.
    ///
    /// Every ACL must be on this topic, nothing is created otherwise.
    #[instrument(skip_all)]
    pub async fn create_topic(&self, topic: &Topic) -> Result<()> {
        debug!(?topic);

        let batches = topic.acl_batches()?;

        self.client
            .create_topic(&topic.name, topic.detail(), false)
            .await
            .map_err(Error::client("create topic"))?;

        if batches.is_empty() {
            return Ok(());
        }

        self.client
            .create_acls(batches)
            .await
            .map_err(Error::client("create topic acls"))
    }

    pub async fn create_topics(&self, topics: &[Topic]) -> Result<()> {
        for topic in topics {
            self.create_topic(topic).await?;
        }

        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn delete_topic(&self, name: &str) -> Result<()> {
        debug!(name);

        self.client
            .delete_topic(name)
            .await
            .map_err(Error::client("delete topic"))
    }
}
