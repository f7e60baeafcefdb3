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

use tansu_cluster_admin::ResourceAcls;
use tracing::{debug, instrument};

use crate::{
    Acl, AclsByPrincipal, AclsByPrincipalAndResource, AclsByResource, AclsByResourceAndPrincipal,
    Error, Resource, Result,
};

/// A batch of ACLs that share one resource, the first ACL defining that resource.
pub fn resource_batch(acls: &[Acl]) -> Result<ResourceAcls> {
    let resource = acls.first().map(|acl| &acl.resource).ok_or(Error::EmptyBatch)?;
    batch(resource, acls)
}

fn batch(resource: &Resource, acls: &[Acl]) -> Result<ResourceAcls> {
    acls.iter()
        .map(|acl| {
            if acl.resource == *resource {
                Ok(acl.description())
            } else {
                Err(Error::ResourceMismatch {
                    expected: resource.clone(),
                    found: acl.resource.clone(),
                })
            }
        })
        .collect::<Result<Vec<_>>>()
        .map(|descriptions| ResourceAcls::new(resource.pattern(), descriptions))
}

/// Per resource batches, as used by the cluster.
pub trait IntoResourceAcls {
    fn into_resource_acls(self) -> Result<Vec<ResourceAcls>>;
}

impl IntoResourceAcls for AclsByResource {
    #[instrument(skip_all)]
    fn into_resource_acls(self) -> Result<Vec<ResourceAcls>> {
        self.0
            .iter()
            .filter(|(_, acls)| !acls.is_empty())
            .map(|(resource, acls)| batch(resource, acls))
            .collect::<Result<Vec<_>>>()
            .inspect(|batches| debug!(batches = batches.len()))
    }
}

impl IntoResourceAcls for AclsByPrincipal {
    fn into_resource_acls(self) -> Result<Vec<ResourceAcls>> {
        AclsByResource::from(self).into_resource_acls()
    }
}

impl IntoResourceAcls for AclsByPrincipalAndResource {
    fn into_resource_acls(self) -> Result<Vec<ResourceAcls>> {
        AclsByResource::from(self).into_resource_acls()
    }
}

impl IntoResourceAcls for AclsByResourceAndPrincipal {
    fn into_resource_acls(self) -> Result<Vec<ResourceAcls>> {
        AclsByResource::from(self).into_resource_acls()
    }
}

impl IntoResourceAcls for Vec<Acl> {
    fn into_resource_acls(self) -> Result<Vec<ResourceAcls>> {
        AclsByResource::from(self).into_resource_acls()
    }
}

/// Any collection of ACLs from per resource batches.
///
/// Fails on the first resource type, pattern type, operation or permission
/// that has no mapping, returning nothing.
pub trait FromResourceAcls: Sized {
    fn from_resource_acls(batches: &[ResourceAcls]) -> Result<Self>;
}

impl<G> FromResourceAcls for G
where
    G: FromIterator<Acl>,
{
    fn from_resource_acls(batches: &[ResourceAcls]) -> Result<Self> {
        let mut acls = Vec::with_capacity(batches.iter().map(|batch| batch.acls.len()).sum());

        for batch in batches {
            let resource = Resource::try_from(&batch.resource)?;

            for description in &batch.acls {
                acls.push(Acl::try_from_description(resource.clone(), description)?);
            }
        }

        Ok(acls.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use tansu_cluster_admin::{AclDescription, ResourcePattern};

    use super::*;
    use crate::{Lookup, Operation, Permission};

    fn acl(principal: &str, resource: Resource) -> Acl {
        Acl::default()
            .principal(principal)
            .permission_type(Permission::Allow)
            .operation(Operation::Alter)
            .host("*")
            .resource(resource)
    }

    #[test]
    fn empty_batch() {
        assert_matches!(resource_batch(&[]), Err(Error::EmptyBatch));
    }

    #[test]
    fn mismatch() {
        assert_matches!(
            resource_batch(&[
                acl("User:a", Resource::topic("test")),
                acl("User:a", Resource::topic("other")),
            ]),
            Err(Error::ResourceMismatch { expected, found })
                if expected == Resource::topic("test") && found == Resource::topic("other")
        );
    }

    #[test]
    fn empty_buckets_are_skipped() -> Result<()> {
        let mut acls = AclsByResource::default();
        _ = acls.0.insert(Resource::topic("test"), vec![]);

        assert_eq!(Vec::<ResourceAcls>::new(), acls.into_resource_acls()?);

        Ok(())
    }

    #[test]
    fn unmapped_code_aborts() {
        let batches = [
            ResourceAcls::new(
                Resource::topic("test").pattern(),
                vec![acl("User:a", Resource::topic("test")).description()],
            ),
            ResourceAcls::new(
                ResourcePattern::default()
                    .resource_type(2)
                    .resource_name("other")
                    .pattern_type(3),
                vec![AclDescription::default().operation(99).permission_type(3)],
            ),
        ];

        assert_matches!(
            Vec::<Acl>::from_resource_acls(&batches),
            Err(Error::OperationNotFound(Lookup::Code(99)))
        );
    }

    #[test]
    fn unmapped_resource_type_in_batch_without_acls() {
        let batches = [ResourceAcls::new(
            ResourcePattern::default()
                .resource_type(42)
                .resource_name("test")
                .pattern_type(3),
            vec![],
        )];

        assert_matches!(
            AclsByResource::from_resource_acls(&batches),
            Err(Error::ResourceTypeNotFound(Lookup::Code(42)))
        );
    }
}
