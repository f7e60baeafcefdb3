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
//! Tansu Admin
//!
//! ACLs, topics, brokers and consumer groups of a Kafka cluster as
//! serializable values. [`Admin`] delegates to a
//! [`ClusterAdmin`] and converts what comes back:
//!
//! ```
//! # use tansu_admin::{Admin, Topic};
//! # use tansu_acl::{AclsByResource, Filter};
//! # use tansu_cluster_admin::Memory;
//! # use url::Url;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let admin = Admin::new(
//!     Memory::builder()
//!         .cluster("tansu")
//!         .node(111)
//!         .advertised_listener(Url::parse("tcp://localhost:9092")?)
//!         .build(),
//! );
//!
//! admin
//!     .create_topic(&Topic::new("payments").partitions(3).replication_factor(1))
//!     .await?;
//!
//! assert_eq!(1, admin.get_topics("^pay").await?.len());
//!
//! let acls: AclsByResource = admin.list_acls(&Filter::any()).await?;
//! assert!(acls.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! Output is written as text or JSON by [`format()`], configured by a [`Config`].

use std::{
    fmt::{self, Display},
    io,
    num::ParseIntError,
    result,
    sync::Arc,
};

use tansu_cluster_admin::ClusterAdmin;

mod acl;
mod broker;
mod consumer_group;
mod format;
mod topic;

pub use broker::Broker;
pub use consumer_group::ConsumerGroup;
pub use format::{AclOrder, Config, Format, Formatter, format};
pub use topic::{Acls, Topic, TopicRoles};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    Acl(#[from] tansu_acl::Error),

    Client {
        context: &'static str,
        source: tansu_cluster_admin::Error,
    },

    Io(Arc<io::Error>),
    NotSupported(&'static str),
    ParseInt(#[from] ParseIntError),
    Regex(#[from] regex::Error),
    SerdeJson(Arc<serde_json::Error>),
    TopicNotFound(String),
    UnknownAclOrder(String),
    UnknownFormat(String),
}

impl Error {
    fn client(context: &'static str) -> impl FnOnce(tansu_cluster_admin::Error) -> Self {
        move |source| Self::Client { context, source }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client { context, source } => write!(f, "{context}: {source}"),
            error => write!(f, "{error:?}"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::Io(Arc::new(value))
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::SerdeJson(Arc::new(value))
    }
}

pub type Result<T, E = Error> = result::Result<T, E>;

/// ACLs, topics, brokers and consumer groups of a cluster.
#[derive(Clone, Debug)]
pub struct Admin<C> {
    client: C,
}

impl<C> Admin<C>
where
    C: ClusterAdmin,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}
