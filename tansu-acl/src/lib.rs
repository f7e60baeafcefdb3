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
//! Tansu ACL
//!
//! Kafka ACLs as readable values. An [`Acl`] is a principal being allowed
//! or denied an operation from a host on a [`Resource`].
//!
//! ACLs are grouped by principal, by resource or by both:
//!
//! - [`AclsByPrincipal`]
//! - [`AclsByResource`]
//! - [`AclsByPrincipalAndResource`]
//! - [`AclsByResourceAndPrincipal`]
//!
//! Each grouping is built from any iterator of ACLs, converts into every
//! other grouping through [`regroup`], has its own JSON shape and a
//! tab separated text listing.
//!
//! The admin client exchanges ACLs as per resource batches
//! ([`ResourceAcls`](tansu_cluster_admin::ResourceAcls)) using raw protocol
//! codes. [`IntoResourceAcls`] and [`FromResourceAcls`] convert
//! between batches and groupings:
//!
//! ```
//! # use tansu_acl::{Acl, AclsByPrincipal, Error, FromResourceAcls, IntoResourceAcls, Operation, Permission, Resource};
//! # fn main() -> Result<(), Error> {
//! let acls = [
//!     Acl::default()
//!         .principal("User:alice")
//!         .operation(Operation::Read)
//!         .permission_type(Permission::Allow)
//!         .host("*")
//!         .resource(Resource::topic("test")),
//!     Acl::default()
//!         .principal("User:bob")
//!         .operation(Operation::Write)
//!         .permission_type(Permission::Allow)
//!         .host("*")
//!         .resource(Resource::topic("test")),
//! ]
//! .into_iter()
//! .collect::<AclsByPrincipal>();
//!
//! let batches = acls.clone().into_resource_acls()?;
//! assert_eq!(1, batches.len());
//! assert_eq!(2, batches[0].acls.len());
//!
//! assert_eq!(acls, AclsByPrincipal::from_resource_acls(&batches)?);
//! # Ok(())
//! # }
//! ```

use std::{
    fmt::{self, Display, Formatter},
    result,
};

mod acl;
mod batch;
mod filter;
mod grouping;
mod json;
mod resource;
mod text;

pub use acl::{Acl, Operation, Permission};
pub use batch::{FromResourceAcls, IntoResourceAcls, resource_batch};
pub use filter::Filter;
pub use grouping::{
    AclsByPrincipal, AclsByPrincipalAndResource, AclsByResource, AclsByResourceAndPrincipal,
    regroup,
};
pub use resource::{Pattern, Resource, ResourceType};

/// The value that failed an enumeration lookup.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Lookup {
    Code(i8),
    Name(String),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    DelimiterInName(String),
    DuplicateKey(String),
    EmptyBatch,
    InvalidFilter(String),
    InvalidResourceKey(String),
    OperationNotFound(Lookup),
    PatternNotFound(Lookup),
    PermissionNotFound(Lookup),
    PrincipalMismatch { expected: String, found: String },
    Regex(#[from] regex::Error),
    ResourceMismatch { expected: Resource, found: Resource },
    ResourceTypeNotFound(Lookup),
    UnrecognizedFilterType(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

pub type Result<T, E = Error> = result::Result<T, E>;
