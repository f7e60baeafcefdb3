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

use std::slice;

use tansu_acl::{Acl, Filter, FromResourceAcls, IntoResourceAcls, resource_batch};
use tansu_cluster_admin::{ClusterAdmin, MatchingAcl, ResourceAcls};
use tracing::{debug, instrument};

use crate::{Admin, Error, Result};

impl<C> Admin<C>
where
    C: ClusterAdmin,
{
    /// ACLs selected by the filter, in any grouping.
    #[instrument(skip_all)]
    pub async fn list_acls<G>(&self, filter: &Filter) -> Result<G>
    where
        G: FromResourceAcls,
    {
        debug!(?filter);

        let batches = self
            .client
            .list_acls(filter.into())
            .await
            .map_err(Error::client("list acls"))?;

        G::from_resource_acls(&batches)
            .map_err(Into::into)
            .inspect_err(|err| debug!(?err))
    }

    #[instrument(skip_all)]
    pub async fn create_acl(&self, acl: &Acl) -> Result<()> {
        debug!(?acl);

        let batch = resource_batch(slice::from_ref(acl))?;

        self.client
            .create_acls(vec![batch])
            .await
            .map_err(Error::client("create acl"))
    }

    /// Create ACLs from any grouping, one batch per resource.
    #[instrument(skip_all)]
    pub async fn create_acls<G>(&self, acls: G) -> Result<()>
    where
        G: IntoResourceAcls,
    {
        let batches = acls.into_resource_acls()?;
        debug!(batches = batches.len());

        if batches.is_empty() {
            return Ok(());
        }

        self.client
            .create_acls(batches)
            .await
            .map_err(Error::client("create acls"))
    }

    /// Delete the ACLs selected by the filter, returning those deleted.
    #[instrument(skip_all)]
    pub async fn delete_acls<G>(&self, filter: &Filter) -> Result<G>
    where
        G: FromResourceAcls,
    {
        debug!(?filter);

        let batches = self
            .client
            .delete_acls(filter.into(), false)
            .await
            .map_err(Error::client("delete acls"))?
            .into_iter()
            .map(|MatchingAcl { resource, acl }| ResourceAcls::new(resource, vec![acl]))
            .collect::<Vec<_>>();

        G::from_resource_acls(&batches).map_err(Into::into)
    }
}
