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
//
//! Tansu Cluster Admin
//!
//! The admin client abstraction. [`ClusterAdmin`] is implemented by any client
//! that can talk to a Kafka cluster on behalf of an administrator: listing,
//! creating and deleting ACLs and topics, describing brokers and listing
//! consumer groups.
//!
//! The types in this crate follow the shape of the Kafka protocol messages,
//! enumerations are carried as raw `i8` codes exactly as they appear on the
//! wire. Mapping those codes onto something readable is the job of the
//! layers above.
//!
//! ## Memory
//!
//! [`Memory`] is an in-process cluster useful for tests:
//!
//! ```
//! # use tansu_cluster_admin::{ClusterAdmin, Error, Memory, TopicDetail};
//! # use url::Url;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let admin = Memory::builder()
//!     .cluster("tansu")
//!     .node(111)
//!     .advertised_listener(Url::parse("tcp://localhost:9092")?)
//!     .build();
//!
//! admin
//!     .create_topic(
//!         "abc",
//!         TopicDetail::default()
//!             .num_partitions(3)
//!             .replication_factor(1),
//!         false,
//!     )
//!     .await?;
//!
//! assert!(admin.list_topics().await?.contains_key("abc"));
//! # Ok(())
//! # }
//! ```

use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Display, Formatter},
    result,
    sync::PoisonError,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod memory;

pub use memory::{Builder, Memory};

/// Filter code matching any resource type, pattern type, operation or permission.
pub const ANY: i8 = 1;

/// Pattern type code that in a filter matches literal, wildcard and prefixed resources.
pub const MATCH: i8 = 2;

/// Pattern type code of a literal resource name.
pub const LITERAL: i8 = 3;

/// Pattern type code of a prefixed resource name.
pub const PREFIXED: i8 = 4;

/// Resource name matching every resource of a type.
pub const WILDCARD: &str = "*";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    Closed,
    InvalidPartitions(i32),
    InvalidReplicationFactor(i16),
    Message(String),
    Poison,
    TopicAlreadyExists(String),
    UnknownTopicOrPartition(String),
    Url(#[from] url::ParseError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.write_str(msg),
            error => write!(f, "{error:?}"),
        }
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(_value: PoisonError<T>) -> Self {
        Self::Poison
    }
}

pub type Result<T, E = Error> = result::Result<T, E>;

/// A resource with its pattern type, as it appears in ACL messages.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ResourcePattern {
    pub resource_type: i8,
    pub resource_name: String,
    pub pattern_type: i8,
}

impl ResourcePattern {
    pub fn resource_type(self, resource_type: i8) -> Self {
        Self {
            resource_type,
            ..self
        }
    }

    pub fn resource_name(self, resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            ..self
        }
    }

    pub fn pattern_type(self, pattern_type: i8) -> Self {
        Self {
            pattern_type,
            ..self
        }
    }
}

/// A single grant or deny statement, without its resource.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct AclDescription {
    pub principal: String,
    pub host: String,
    pub operation: i8,
    pub permission_type: i8,
}

impl AclDescription {
    pub fn principal(self, principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            ..self
        }
    }

    pub fn host(self, host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..self
        }
    }

    pub fn operation(self, operation: i8) -> Self {
        Self { operation, ..self }
    }

    pub fn permission_type(self, permission_type: i8) -> Self {
        Self {
            permission_type,
            ..self
        }
    }
}

/// All the ACLs of one resource.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ResourceAcls {
    pub resource: ResourcePattern,
    pub acls: Vec<AclDescription>,
}

impl ResourceAcls {
    pub fn new(resource: ResourcePattern, acls: Vec<AclDescription>) -> Self {
        Self { resource, acls }
    }
}

/// An ACL deleted (or that would be deleted) by a filter.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MatchingAcl {
    pub resource: ResourcePattern,
    pub acl: AclDescription,
}

/// Selects ACLs when listing or deleting.
///
/// Codes of [`ANY`] match everything, a missing name, principal or
/// host matches everything.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct AclFilter {
    pub resource_type: i8,
    pub resource_name: Option<String>,
    pub pattern_type: i8,
    pub principal: Option<String>,
    pub host: Option<String>,
    pub operation: i8,
    pub permission_type: i8,
}

impl Default for AclFilter {
    fn default() -> Self {
        Self {
            resource_type: ANY,
            resource_name: None,
            pattern_type: ANY,
            principal: None,
            host: None,
            operation: ANY,
            permission_type: ANY,
        }
    }
}

impl AclFilter {
    pub fn resource_type(self, resource_type: i8) -> Self {
        Self {
            resource_type,
            ..self
        }
    }

    pub fn resource_name(self, resource_name: Option<String>) -> Self {
        Self {
            resource_name,
            ..self
        }
    }

    pub fn pattern_type(self, pattern_type: i8) -> Self {
        Self {
            pattern_type,
            ..self
        }
    }

    pub fn principal(self, principal: Option<String>) -> Self {
        Self { principal, ..self }
    }

    pub fn host(self, host: Option<String>) -> Self {
        Self { host, ..self }
    }

    pub fn operation(self, operation: i8) -> Self {
        Self { operation, ..self }
    }

    pub fn permission_type(self, permission_type: i8) -> Self {
        Self {
            permission_type,
            ..self
        }
    }

    /// Whether an ACL on a resource is selected by this filter.
    pub fn matches(&self, resource: &ResourcePattern, acl: &AclDescription) -> bool {
        self.matches_resource(resource)
            && self
                .principal
                .as_ref()
                .is_none_or(|principal| *principal == acl.principal)
            && self.host.as_ref().is_none_or(|host| *host == acl.host)
            && (self.operation == ANY || self.operation == acl.operation)
            && (self.permission_type == ANY || self.permission_type == acl.permission_type)
    }

    fn matches_resource(&self, resource: &ResourcePattern) -> bool {
        if self.resource_type != ANY && self.resource_type != resource.resource_type {
            return false;
        }

        match (self.pattern_type, self.resource_name.as_deref()) {
            (_, None) => self.pattern_type == ANY
                || self.pattern_type == MATCH
                || self.pattern_type == resource.pattern_type,

            (MATCH, Some(name)) => match resource.pattern_type {
                LITERAL => resource.resource_name == name || resource.resource_name == WILDCARD,
                PREFIXED => name.starts_with(resource.resource_name.as_str()),
                _ => false,
            },

            (ANY, Some(name)) => resource.resource_name == name,

            (pattern_type, Some(name)) => {
                pattern_type == resource.pattern_type && resource.resource_name == name
            }
        }
    }
}

/// Partitions, replication and configuration of a topic.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TopicDetail {
    pub num_partitions: i32,
    pub replication_factor: i16,
    pub configs: BTreeMap<String, Option<String>>,
}

impl TopicDetail {
    pub fn num_partitions(self, num_partitions: i32) -> Self {
        Self {
            num_partitions,
            ..self
        }
    }

    pub fn replication_factor(self, replication_factor: i16) -> Self {
        Self {
            replication_factor,
            ..self
        }
    }

    pub fn config(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        _ = self.configs.insert(name.into(), value);
        self
    }
}

/// A broker of the cluster.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct BrokerMetadata {
    pub node_id: i32,
    pub host: String,
    pub port: i32,
    pub rack: Option<String>,
}

/// Cluster Admin
///
/// The administrative operations used by this workspace. Every admin
/// client implements this trait.
#[async_trait]
pub trait ClusterAdmin: Clone + Debug + Send + Sync + 'static {
    /// ACLs matching the filter, one entry per resource.
    async fn list_acls(&self, filter: AclFilter) -> Result<Vec<ResourceAcls>>;

    /// Create the ACLs of one or more resources.
    async fn create_acls(&self, acls: Vec<ResourceAcls>) -> Result<()>;

    /// Delete the ACLs matching the filter, returning the ACLs deleted.
    async fn delete_acls(&self, filter: AclFilter, validate_only: bool) -> Result<Vec<MatchingAcl>>;

    /// All topics by name.
    async fn list_topics(&self) -> Result<BTreeMap<String, TopicDetail>>;

    async fn create_topic(&self, name: &str, detail: TopicDetail, validate_only: bool)
    -> Result<()>;

    async fn delete_topic(&self, name: &str) -> Result<()>;

    /// Brokers currently known to the client.
    async fn brokers(&self) -> Result<Vec<BrokerMetadata>>;

    /// Consumer groups with their protocol type.
    async fn list_consumer_groups(&self) -> Result<BTreeMap<String, String>>;
}
