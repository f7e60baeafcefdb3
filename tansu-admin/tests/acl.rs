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

use assert_matches::assert_matches;
use common::{Error, Unavailable, admin, allow, init_tracing};
use pretty_assertions::assert_eq;
use tansu_acl::{
    Acl, AclsByPrincipal, AclsByResource, AclsByResourceAndPrincipal, Filter, Operation,
    Permission, Resource,
};
use tansu_admin::Admin;

mod common;

#[tokio::test]
async fn create_then_list() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let admin = admin()?;

    let acls = [
        allow("User:alice", Operation::Read, Resource::topic("payments")),
        allow("User:alice", Operation::Describe, Resource::topic("payments")),
        allow("User:bob", Operation::Write, Resource::topic("payments")),
        allow("User:bob", Operation::Read, Resource::group("abc")),
    ]
    .into_iter()
    .collect::<AclsByPrincipal>();

    admin.create_acls(acls.clone()).await?;

    assert_eq!(
        acls,
        admin
            .list_acls::<AclsByPrincipal>(&Filter::any())
            .await?
    );

    let by_resource = admin
        .list_acls::<AclsByResource>(&"topic/payments".parse()?)
        .await?;

    assert_eq!(1, by_resource.len());
    assert_eq!(
        Some(3),
        by_resource
            .get(&Resource::topic("payments"))
            .map(<[Acl]>::len)
    );

    let bob = admin
        .list_acls::<AclsByResourceAndPrincipal>(&"principal/User:bob".parse()?)
        .await?;

    assert_eq!(2, bob.len());

    Ok(())
}

#[tokio::test]
async fn create_one() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let admin = admin()?;

    let acl = allow("User:alice", Operation::Alter, Resource::cluster())
        .permission_type(Permission::Deny);

    admin.create_acl(&acl).await?;

    assert_eq!(
        vec![acl],
        admin.list_acls::<Vec<Acl>>(&"cluster/".parse()?).await?
    );

    Ok(())
}

#[tokio::test]
async fn delete() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let admin = admin()?;

    let keep = allow("User:alice", Operation::Read, Resource::topic("payments"));
    let remove = allow("User:bob", Operation::Read, Resource::topic("payments"));

    admin
        .create_acls(vec![keep.clone(), remove.clone()])
        .await?;

    assert_eq!(
        vec![remove],
        admin
            .delete_acls::<Vec<Acl>>(&"principal/User:bob".parse()?)
            .await?
    );

    assert_eq!(
        vec![keep],
        admin.list_acls::<Vec<Acl>>(&Filter::any()).await?
    );

    Ok(())
}

#[tokio::test]
async fn nothing_to_create() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let admin = Admin::new(Unavailable);
    admin.create_acls(AclsByResource::default()).await?;

    Ok(())
}

#[tokio::test]
async fn client_failure_is_wrapped() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let admin = Admin::new(Unavailable);

    let error = admin.list_acls::<AclsByResource>(&Filter::any()).await;
    assert_matches!(
        error,
        Err(tansu_admin::Error::Client { context: "list acls", .. })
    );

    let error = admin
        .create_acl(&allow("User:a", Operation::Read, Resource::topic("t")))
        .await;
    assert_matches!(
        &error,
        Err(err) if err.to_string() == "create acl: unavailable"
    );

    Ok(())
}

#[tokio::test]
async fn delimiter_in_name_is_rejected_on_export() -> Result<(), Error> {
    let _guard = init_tracing()?;

    let admin = admin()?;

    admin
        .create_acl(&allow("User:a", Operation::Read, Resource::topic("a/b")))
        .await?;

    let acls = admin.list_acls::<AclsByResource>(&Filter::any()).await?;

    assert_matches!(
        serde_json::to_string(&acls),
        Err(err) if err.to_string().contains("DelimiterInName")
    );

    Ok(())
}
