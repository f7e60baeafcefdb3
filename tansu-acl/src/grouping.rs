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

//! ACL groupings.
//!
//! Every grouping is keyed by fields of the ACLs it holds, so a grouping
//! can only be built from ACLs (or from a validated representation of
//! them). Within a bucket ACLs are kept in order, making groupings of
//! the same ACLs equal regardless of the order they were added in.

use std::{
    collections::{BTreeMap, btree_map},
    vec,
};

use crate::{Acl, Resource};

fn push(bucket: &mut Vec<Acl>, acl: Acl) {
    let at = bucket.partition_point(|existing| existing <= &acl);
    bucket.insert(at, acl);
}

/// Convert between groupings, via [`AclsByResource`].
pub fn regroup<A, B>(acls: A) -> B
where
    A: Into<AclsByResource>,
    B: From<AclsByResource>,
{
    B::from(acls.into())
}

/// ACLs by principal.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AclsByPrincipal(pub(crate) BTreeMap<String, Vec<Acl>>);

impl AclsByPrincipal {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, principal: &str) -> Option<&[Acl]> {
        self.0.get(principal).map(Vec::as_slice)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<Acl>> {
        self.0.iter()
    }
}

impl Extend<Acl> for AclsByPrincipal {
    fn extend<T: IntoIterator<Item = Acl>>(&mut self, iter: T) {
        for acl in iter {
            push(self.0.entry(acl.principal.clone()).or_default(), acl);
        }
    }
}

impl FromIterator<Acl> for AclsByPrincipal {
    fn from_iter<T: IntoIterator<Item = Acl>>(iter: T) -> Self {
        let mut acls = Self::default();
        acls.extend(iter);
        acls
    }
}

impl IntoIterator for AclsByPrincipal {
    type Item = Acl;
    type IntoIter = vec::IntoIter<Acl>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values().flatten().collect::<Vec<_>>().into_iter()
    }
}

/// ACLs by resource.
///
/// The canonical grouping, it mirrors the per resource batches used by
/// the cluster.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AclsByResource(pub(crate) BTreeMap<Resource, Vec<Acl>>);

impl AclsByResource {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, resource: &Resource) -> Option<&[Acl]> {
        self.0.get(resource).map(Vec::as_slice)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Resource, Vec<Acl>> {
        self.0.iter()
    }
}

impl Extend<Acl> for AclsByResource {
    fn extend<T: IntoIterator<Item = Acl>>(&mut self, iter: T) {
        for acl in iter {
            push(self.0.entry(acl.resource.clone()).or_default(), acl);
        }
    }
}

impl FromIterator<Acl> for AclsByResource {
    fn from_iter<T: IntoIterator<Item = Acl>>(iter: T) -> Self {
        let mut acls = Self::default();
        acls.extend(iter);
        acls
    }
}

impl IntoIterator for AclsByResource {
    type Item = Acl;
    type IntoIter = vec::IntoIter<Acl>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values().flatten().collect::<Vec<_>>().into_iter()
    }
}

/// ACLs by principal, then by resource.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AclsByPrincipalAndResource(pub(crate) BTreeMap<String, BTreeMap<Resource, Vec<Acl>>>);

impl AclsByPrincipalAndResource {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, principal: &str, resource: &Resource) -> Option<&[Acl]> {
        self.0
            .get(principal)
            .and_then(|by_resource| by_resource.get(resource))
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeMap<Resource, Vec<Acl>>> {
        self.0.iter()
    }
}

impl Extend<Acl> for AclsByPrincipalAndResource {
    fn extend<T: IntoIterator<Item = Acl>>(&mut self, iter: T) {
        for acl in iter {
            push(
                self.0
                    .entry(acl.principal.clone())
                    .or_default()
                    .entry(acl.resource.clone())
                    .or_default(),
                acl,
            );
        }
    }
}

impl FromIterator<Acl> for AclsByPrincipalAndResource {
    fn from_iter<T: IntoIterator<Item = Acl>>(iter: T) -> Self {
        let mut acls = Self::default();
        acls.extend(iter);
        acls
    }
}

impl IntoIterator for AclsByPrincipalAndResource {
    type Item = Acl;
    type IntoIter = vec::IntoIter<Acl>;

    fn into_iter(self) -> Self::IntoIter {
        self.0
            .into_values()
            .flat_map(BTreeMap::into_values)
            .flatten()
            .collect::<Vec<_>>()
            .into_iter()
    }
}

/// ACLs by resource, then by principal.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AclsByResourceAndPrincipal(pub(crate) BTreeMap<Resource, BTreeMap<String, Vec<Acl>>>);

impl AclsByResourceAndPrincipal {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, resource: &Resource, principal: &str) -> Option<&[Acl]> {
        self.0
            .get(resource)
            .and_then(|by_principal| by_principal.get(principal))
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Resource, BTreeMap<String, Vec<Acl>>> {
        self.0.iter()
    }
}

impl Extend<Acl> for AclsByResourceAndPrincipal {
    fn extend<T: IntoIterator<Item = Acl>>(&mut self, iter: T) {
        for acl in iter {
            push(
                self.0
                    .entry(acl.resource.clone())
                    .or_default()
                    .entry(acl.principal.clone())
                    .or_default(),
                acl,
            );
        }
    }
}

impl FromIterator<Acl> for AclsByResourceAndPrincipal {
    fn from_iter<T: IntoIterator<Item = Acl>>(iter: T) -> Self {
        let mut acls = Self::default();
        acls.extend(iter);
        acls
    }
}

impl IntoIterator for AclsByResourceAndPrincipal {
    type Item = Acl;
    type IntoIter = vec::IntoIter<Acl>;

    fn into_iter(self) -> Self::IntoIter {
        self.0
            .into_values()
            .flat_map(BTreeMap::into_values)
            .flatten()
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl From<AclsByResource> for AclsByPrincipal {
    fn from(value: AclsByResource) -> Self {
        value.into_iter().collect()
    }
}

impl From<AclsByPrincipal> for AclsByResource {
    fn from(value: AclsByPrincipal) -> Self {
        value.into_iter().collect()
    }
}

impl From<AclsByResource> for AclsByPrincipalAndResource {
    fn from(value: AclsByResource) -> Self {
        value.into_iter().collect()
    }
}

impl From<AclsByPrincipalAndResource> for AclsByResource {
    fn from(value: AclsByPrincipalAndResource) -> Self {
        value.into_iter().collect()
    }
}

impl From<AclsByResource> for AclsByResourceAndPrincipal {
    fn from(value: AclsByResource) -> Self {
        value.into_iter().collect()
    }
}

impl From<AclsByResourceAndPrincipal> for AclsByResource {
    fn from(value: AclsByResourceAndPrincipal) -> Self {
        value.into_iter().collect()
    }
}

impl From<Vec<Acl>> for AclsByResource {
    fn from(value: Vec<Acl>) -> Self {
        value.into_iter().collect()
    }
}

impl From<AclsByResource> for Vec<Acl> {
    fn from(value: AclsByResource) -> Self {
        value.into_iter().collect()
    }
}
