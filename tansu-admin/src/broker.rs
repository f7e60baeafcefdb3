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
use tansu_cluster_admin::{BrokerMetadata, ClusterAdmin};
use tracing::{debug, instrument};

use crate::{Admin, Error, Result};

/// A broker of the cluster, as last seen by the client.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Broker {
    pub id: String,
    pub address: String,
    pub rack: String,
}

impl From<&BrokerMetadata> for Broker {
    fn from(value: &BrokerMetadata) -> Self {
        Self {
            id: value.node_id.to_string(),
            address: if value.host.contains(':') {
                format!("[{}]:{}", value.host, value.port)
            } else {
                format!("{}:{}", value.host, value.port)
            },
            rack: value.rack.clone().unwrap_or_default(),
        }
    }
}

impl<C> Admin<C>
where
    C: ClusterAdmin,
{
    #[instrument(skip_all)]
    pub async fn list_brokers(&self) -> Result<Vec<Broker>> {
        self.client
            .brokers()
            .await
            .map(|brokers| brokers.iter().map(Broker::from).collect::<Vec<_>>())
            .map_err(Error::client("list brokers"))
            .inspect(|brokers| debug!(?brokers))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_metadata() {
        assert_eq!(
            Broker {
                id: "111".into(),
                address: "localhost:9092".into(),
                rack: "".into(),
            },
            Broker::from(&BrokerMetadata {
                node_id: 111,
                host: "localhost".into(),
                port: 9092,
                rack: None,
            })
        );

        assert_eq!(
            "[::1]:9092",
            Broker::from(&BrokerMetadata {
                node_id: 111,
                host: "::1".into(),
                port: 9092,
                rack: None,
            })
            .address
        );

        assert_eq!(
            "eu-west-2a",
            Broker::from(&BrokerMetadata {
                rack: Some("eu-west-2a".into()),
                ..Default::default()
            })
            .rack
        );
    }
}
