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

use common::{Error, acl, init_tracing};
use pretty_assertions::assert_eq;
use tansu_acl::{
    Acl, AclsByPrincipal, AclsByPrincipalAndResource, AclsByResource, AclsByResourceAndPrincipal,
    FromResourceAcls, IntoResourceAcls, Operation, Permission, Resource, resource_batch,
};
use tansu_cluster_admin::{AclDescription, ResourceAcls, ResourcePattern};

mod common;

#[test]
fn two_acls_on_one_resource() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let acls = vec![
        acl(
            "User:test",
            Operation::Read,
            Permission::Deny,
            Resource::topic("test"),
        ),
        acl(
            "User:test",
            Operation::Alter,
            Permission::Allow,
            Resource::topic("test"),
        ),
    ];

    let batches = acls.clone().into_resource_acls()?;

    assert_eq!(
        vec![ResourceAcls::new(
            ResourcePattern::default()
                .resource_type(2)
                .resource_name("test")
                .pattern_type(3),
            vec![
                AclDescription::default()
                    .principal("User:test")
                    .host("*")
                    .operation(3)
                    .permission_type(2),
                AclDescription::default()
                    .principal("User:test")
                    .host("*")
                    .operation(7)
                    .permission_type(3),
            ],
        )],
        batches
    );

    assert_eq!(batches[0], resource_batch(&acls)?);

    let mut more = acls.clone();
    more.push(acl(
        "User:test",
        Operation::Read,
        Permission::Allow,
        Resource::topic("other"),
    ));

    assert_eq!(2, more.into_resource_acls()?.len());

    Ok(())
}

#[test]
fn round_trip_by_resource() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let by_resource = [
        acl(
            "User:a",
            Operation::Write,
            Permission::Allow,
            Resource::topic("test"),
        ),
        acl(
            "User:b",
            Operation::Read,
            Permission::Allow,
            Resource::topic("test"),
        ),
    ]
    .into_iter()
    .collect::<AclsByResource>();

    let batches = by_resource.clone().into_resource_acls()?;
    assert_eq!(1, batches.len());

    assert_eq!(by_resource, AclsByResource::from_resource_acls(&batches)?);

    Ok(())
}

#[test]
fn every_shape_from_the_same_batches() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let acls = vec![
        acl(
            "User:a",
            Operation::Write,
            Permission::Allow,
            Resource::topic("test"),
        ),
        acl(
            "User:b",
            Operation::Read,
            Permission::Allow,
            Resource::group("abc"),
        ),
        acl(
            "User:a",
            Operation::Describe,
            Permission::Deny,
            Resource::cluster(),
        ),
    ];

    let batches = acls.clone().into_resource_acls()?;
    assert_eq!(3, batches.len());

    let expected = acls.iter().cloned().collect::<AclsByResource>();

    assert_eq!(
        expected,
        AclsByResource::from(AclsByPrincipal::from_resource_acls(&batches)?)
    );
    assert_eq!(
        expected,
        AclsByResource::from(AclsByPrincipalAndResource::from_resource_acls(&batches)?)
    );
    assert_eq!(
        expected,
        AclsByResource::from(AclsByResourceAndPrincipal::from_resource_acls(&batches)?)
    );

    let mut decoded = Vec::<Acl>::from_resource_acls(&batches)?;
    decoded.sort();

    let mut acls = acls;
    acls.sort();

    assert_eq!(acls, decoded);

    Ok(())
}

#[test]
fn batches_from_each_shape_agree() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let acls = [
        acl(
            "User:a",
            Operation::Write,
            Permission::Allow,
            Resource::topic("test"),
        ),
        acl(
            "User:b",
            Operation::Read,
            Permission::Allow,
            Resource::topic("test"),
        ),
        acl(
            "User:b",
            Operation::Read,
            Permission::Allow,
            Resource::group("abc"),
        ),
    ];

    let expected = acls
        .iter()
        .cloned()
        .collect::<AclsByResource>()
        .into_resource_acls()?;

    assert_eq!(
        expected,
        acls.iter()
            .cloned()
            .collect::<AclsByPrincipal>()
            .into_resource_acls()?
    );

    assert_eq!(
        expected,
        acls.iter()
            .cloned()
            .collect::<AclsByPrincipalAndResource>()
            .into_resource_acls()?
    );

    assert_eq!(
        expected,
        acls.iter()
            .cloned()
            .collect::<AclsByResourceAndPrincipal>()
            .into_resource_acls()?
    );

    Ok(())
}
