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

use std::{
    collections::BTreeMap,
    marker::PhantomData,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use tracing::{debug, instrument};
use url::{Host, Url};

use crate::{
    AclDescription, AclFilter, BrokerMetadata, ClusterAdmin, Error, MatchingAcl, ResourceAcls,
    ResourcePattern, Result, TopicDetail,
};

#[derive(Clone, Debug, Default)]
pub struct Builder<C, N, L> {
    cluster: C,
    node: N,
    advertised_listener: L,
    rack: Option<String>,
    groups: BTreeMap<String, String>,
}

impl<C, N, L> Builder<C, N, L> {
    pub fn cluster(self, cluster: impl Into<String>) -> Builder<String, N, L> {
        Builder {
            cluster: cluster.into(),
            node: self.node,
            advertised_listener: self.advertised_listener,
            rack: self.rack,
            groups: self.groups,
        }
    }

    pub fn node(self, node: i32) -> Builder<C, i32, L> {
        Builder {
            cluster: self.cluster,
            node,
            advertised_listener: self.advertised_listener,
            rack: self.rack,
            groups: self.groups,
        }
    }

    pub fn advertised_listener(self, advertised_listener: Url) -> Builder<C, N, Url> {
        Builder {
            cluster: self.cluster,
            node: self.node,
            advertised_listener,
            rack: self.rack,
            groups: self.groups,
        }
    }

    pub fn rack(self, rack: Option<String>) -> Self {
        Self { rack, ..self }
    }

    /// Consumer groups only come into being when consumers join them,
    /// they are seeded here.
    pub fn group(mut self, name: impl Into<String>, protocol_type: impl Into<String>) -> Self {
        _ = self.groups.insert(name.into(), protocol_type.into());
        self
    }
}

impl Builder<String, i32, Url> {
    pub fn build(self) -> Memory {
        Memory {
            cluster: self.cluster,
            node: self.node,
            advertised_listener: self.advertised_listener,
            rack: self.rack,
            acls: Arc::new(Mutex::new(BTreeMap::new())),
            topics: Arc::new(Mutex::new(BTreeMap::new())),
            groups: Arc::new(Mutex::new(self.groups)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// An in-memory single broker cluster.
///
/// Clones share state, [`Memory::close`] on any clone fails every
/// subsequent operation with [`Error::Closed`].
#[derive(Clone, Debug)]
pub struct Memory {
    cluster: String,
    node: i32,
    advertised_listener: Url,
    rack: Option<String>,

    acls: Arc<Mutex<BTreeMap<ResourcePattern, Vec<AclDescription>>>>,
    topics: Arc<Mutex<BTreeMap<String, TopicDetail>>>,
    groups: Arc<Mutex<BTreeMap<String, String>>>,
    closed: Arc<AtomicBool>,
}

impl Memory {
    pub fn builder() -> Builder<PhantomData<String>, PhantomData<i32>, PhantomData<Url>> {
        Builder::default()
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            Err(Error::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ClusterAdmin for Memory {
    #[instrument(skip_all)]
    async fn list_acls(&self, filter: AclFilter) -> Result<Vec<ResourceAcls>> {
        debug!(?filter);
        self.open()?;

        self.acls.lock().map_err(Into::into).map(|acls| {
            acls.iter()
                .filter_map(|(resource, descriptions)| {
                    let selected = descriptions
                        .iter()
                        .filter(|description| filter.matches(resource, description))
                        .cloned()
                        .collect::<Vec<_>>();

                    (!selected.is_empty()).then(|| ResourceAcls::new(resource.clone(), selected))
                })
                .collect()
        })
    }

    #[instrument(skip_all)]
    async fn create_acls(&self, batches: Vec<ResourceAcls>) -> Result<()> {
        debug!(?batches);
        self.open()?;

        self.acls.lock().map_err(Into::into).map(|mut acls| {
            for ResourceAcls { resource, acls: descriptions } in batches {
                let existing = acls.entry(resource).or_default();

                for description in descriptions {
                    if !existing.contains(&description) {
                        existing.push(description);
                    }
                }
            }
        })
    }

    #[instrument(skip_all)]
    async fn delete_acls(&self, filter: AclFilter, validate_only: bool) -> Result<Vec<MatchingAcl>> {
        debug!(?filter, validate_only);
        self.open()?;

        self.acls.lock().map_err(Into::into).map(|mut acls| {
            let mut matching = Vec::new();

            for (resource, descriptions) in acls.iter_mut() {
                matching.extend(
                    descriptions
                        .iter()
                        .filter(|description| filter.matches(resource, description))
                        .cloned()
                        .map(|acl| MatchingAcl {
                            resource: resource.clone(),
                            acl,
                        }),
                );

                if !validate_only {
                    descriptions.retain(|description| !filter.matches(resource, description));
                }
            }

            acls.retain(|_, descriptions| !descriptions.is_empty());
            matching
        })
    }

    #[instrument(skip_all)]
    async fn list_topics(&self) -> Result<BTreeMap<String, TopicDetail>> {
        self.open()?;
        self.topics
            .lock()
            .map_err(Into::into)
            .map(|topics| topics.clone())
    }

    #[instrument(skip_all)]
    async fn create_topic(
        &self,
        name: &str,
        detail: TopicDetail,
        validate_only: bool,
    ) -> Result<()> {
        debug!(name, ?detail, validate_only);
        self.open()?;

        // -1 uses the broker default
        if detail.num_partitions < 1 && detail.num_partitions != -1 {
            return Err(Error::InvalidPartitions(detail.num_partitions));
        }

        if detail.replication_factor < 1 && detail.replication_factor != -1 {
            return Err(Error::InvalidReplicationFactor(detail.replication_factor));
        }

        self.topics
            .lock()
            .map_err(Into::into)
            .and_then(|mut topics| {
                if topics.contains_key(name) {
                    Err(Error::TopicAlreadyExists(name.into()))
                } else {
                    if !validate_only {
                        _ = topics.insert(name.into(), detail);
                    }

                    Ok(())
                }
            })
    }

    #[instrument(skip_all)]
    async fn delete_topic(&self, name: &str) -> Result<()> {
        debug!(name);
        self.open()?;

        self.topics
            .lock()
            .map_err(Into::into)
            .and_then(|mut topics| {
                topics
                    .remove(name)
                    .ok_or_else(|| Error::UnknownTopicOrPartition(name.into()))
                    .map(|_| ())
            })
    }

    #[instrument(skip_all)]
    async fn brokers(&self) -> Result<Vec<BrokerMetadata>> {
        self.open()?;

        let host = match self.advertised_listener.host() {
            Some(Host::Domain(domain)) => domain.to_owned(),
            Some(Host::Ipv4(address)) => address.to_string(),
            Some(Host::Ipv6(address)) => address.to_string(),
            None => String::from("0.0.0.0"),
        };
        let port = self.advertised_listener.port().unwrap_or(9092).into();

        Ok(vec![BrokerMetadata {
            node_id: self.node,
            host,
            port,
            rack: self.rack.clone(),
        }])
    }

    #[instrument(skip_all)]
    async fn list_consumer_groups(&self) -> Result<BTreeMap<String, String>> {
        self.open()?;
        self.groups
            .lock()
            .map_err(Into::into)
            .map(|groups| groups.clone())
    }
}
