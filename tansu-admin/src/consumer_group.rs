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

use serde::{Deserialize, Serialize};
use tansu_acl::{Acl, AclsByResource, Resource};
use tansu_cluster_admin::ClusterAdmin;
use tracing::{debug, instrument};

use crate::{Admin, Error, Result};

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ConsumerGroup {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol_type: String,

    #[serde(default)]
    pub acls: Vec<Acl>,
}

impl ConsumerGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn protocol_type(self, protocol_type: impl Into<String>) -> Self {
        Self {
            protocol_type: protocol_type.into(),
            ..self
        }
    }

    pub fn acls(self, acls: Vec<Acl>) -> Self {
        Self { acls, ..self }
    }

    /// Attach the ACLs of this group.
    pub fn with_acls(self, acls: &AclsByResource) -> Self {
        let acls = acls
            .get(&Resource::group(self.name.as_str()))
            .map(<[Acl]>::to_vec)
            .unwrap_or_default();

        Self { acls, ..self }
    }
}

impl<C> Admin<C>
where
    C: ClusterAdmin,
{
    #[instrument(skip_all)]
    pub async fn list_consumer_groups(&self) -> Result<Vec<ConsumerGroup>> {
        self.client
            .list_consumer_groups()
            .await
            .map(|groups| {
                groups
                    .into_iter()
                    .map(|(name, protocol_type)| {
                        ConsumerGroup::new(name).protocol_type(protocol_type)
                    })
                    .collect::<Vec<_>>()
            })
            .map_err(Error::client("list consumer groups"))
            .inspect(|groups| debug!(groups = groups.len()))
    }

    pub async fn describe_consumer_group(&self, name: &str) -> Result<ConsumerGroup> {
        debug!(name);
        Err(Error::NotSupported("describe consumer group"))
    }

    pub async fn create_consumer_group(&self, group: &ConsumerGroup) -> Result<()> {
        debug!(?group);
        Err(Error::NotSupported("create consumer group"))
    }

    pub async fn delete_consumer_group(&self, name: &str) -> Result<()> {
        debug!(name);
        Err(Error::NotSupported("delete consumer group"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tansu_acl::{Operation, Permission};

    use super::*;

    #[test]
    fn with_acls() {
        let read = Acl::default()
            .principal("User:a")
            .permission_type(Permission::Allow)
            .operation(Operation::Read)
            .host("*")
            .resource(Resource::group("abc"));

        let acls = [
            read.clone(),
            read.clone().resource(Resource::topic("abc")),
        ]
        .into_iter()
        .collect::<AclsByResource>();

        assert_eq!(
            vec![read],
            ConsumerGroup::new("abc").with_acls(&acls).acls
        );

        assert!(ConsumerGroup::new("xyz").with_acls(&acls).acls.is_empty());
    }
}
