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

//! JSON shapes of the ACL groupings.
//!
//! | Grouping | JSON |
//! |---|---|
//! | [`AclsByPrincipal`] | `{"<principal>":[acl...]}` |
//! | [`AclsByResource`] | `{"<type>/<name>":[acl...]}` |
//! | [`AclsByPrincipalAndResource`] | `{"<principal>":[{"<type>/<name>":[acl...]}...]}` |
//! | [`AclsByResourceAndPrincipal`] | `{"<type>/<name>":[{"<principal>":[acl...]}...]}` |
//!
//! On the way in every ACL must agree with the keys it is filed under,
//! and a key may appear only once in each object.

use std::{
    collections::BTreeSet,
    fmt::{self, Formatter},
    marker::PhantomData,
    str::FromStr,
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error as _, MapAccess, Visitor},
    ser::{Error as _, SerializeMap},
};

use crate::{
    Acl, AclsByPrincipal, AclsByPrincipalAndResource, AclsByResource, AclsByResourceAndPrincipal,
    Error, Resource, Result,
};

/// A map with a single entry.
struct Single<'a> {
    key: &'a str,
    acls: &'a [Acl],
}

impl Serialize for Single<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, self.acls)?;
        map.end()
    }
}

/// The entries of a map in document order, rejecting repeated keys.
struct Entries<V>(Vec<(String, V)>);

impl<V> Entries<V> {
    fn into_values(self) -> impl Iterator<Item = V> {
        self.0.into_iter().map(|(_, value)| value)
    }
}

impl<'de, V> Deserialize<'de> for Entries<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

struct EntriesVisitor<V>(PhantomData<V>);

impl<'de, V> Visitor<'de> for EntriesVisitor<V>
where
    V: Deserialize<'de>,
{
    type Value = Entries<V>;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map with unique keys")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = BTreeSet::new();
        let mut entries = Vec::new();

        while let Some((key, value)) = map.next_entry::<String, V>()? {
            if !seen.insert(key.clone()) {
                return Err(A::Error::custom(Error::DuplicateKey(key)));
            }

            entries.push((key, value));
        }

        Ok(Entries(entries))
    }
}

fn resource_of(key: &str, acls: &[Acl]) -> Result<Resource> {
    let expected = Resource::from_str(key)?;

    match acls.iter().find(|acl| acl.resource != expected) {
        Some(acl) => Err(Error::ResourceMismatch {
            found: acl.resource.clone(),
            expected,
        }),

        None => Ok(expected),
    }
}

fn principal_of(principal: &str, acls: &[Acl]) -> Result<()> {
    match acls.iter().find(|acl| acl.principal != principal) {
        Some(acl) => Err(Error::PrincipalMismatch {
            expected: principal.into(),
            found: acl.principal.clone(),
        }),

        None => Ok(()),
    }
}

impl Serialize for AclsByPrincipal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AclsByPrincipal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decoded = Entries::<Vec<Acl>>::deserialize(deserializer)?;

        for (principal, acls) in &decoded.0 {
            principal_of(principal, acls).map_err(D::Error::custom)?;
        }

        Ok(decoded.into_values().flatten().collect())
    }
}

impl Serialize for AclsByResource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (resource, acls) in &self.0 {
            let key = resource.key().map_err(S::Error::custom)?;
            map.serialize_entry(&key, acls)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for AclsByResource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decoded = Entries::<Vec<Acl>>::deserialize(deserializer)?;

        for (key, acls) in &decoded.0 {
            _ = resource_of(key, acls).map_err(D::Error::custom)?;
        }

        Ok(decoded.into_values().flatten().collect())
    }
}

impl Serialize for AclsByPrincipalAndResource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (principal, by_resource) in &self.0 {
            let keys = by_resource
                .keys()
                .map(Resource::key)
                .collect::<Result<Vec<_>>>()
                .map_err(S::Error::custom)?;

            let entries = keys
                .iter()
                .zip(by_resource.values())
                .map(|(key, acls)| Single { key, acls })
                .collect::<Vec<_>>();

            map.serialize_entry(principal, &entries)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for AclsByPrincipalAndResource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decoded = Entries::<Vec<Entries<Vec<Acl>>>>::deserialize(deserializer)?;

        for (principal, entries) in &decoded.0 {
            for (key, acls) in entries.iter().flat_map(|entry| &entry.0) {
                principal_of(principal, acls).map_err(D::Error::custom)?;
                _ = resource_of(key, acls).map_err(D::Error::custom)?;
            }
        }

        Ok(decoded
            .into_values()
            .flatten()
            .flat_map(Entries::into_values)
            .flatten()
            .collect())
    }
}

impl Serialize for AclsByResourceAndPrincipal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (resource, by_principal) in &self.0 {
            let key = resource.key().map_err(S::Error::custom)?;

            let entries = by_principal
                .iter()
                .map(|(principal, acls)| Single {
                    key: principal,
                    acls,
                })
                .collect::<Vec<_>>();

            map.serialize_entry(&key, &entries)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for AclsByResourceAndPrincipal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decoded = Entries::<Vec<Entries<Vec<Acl>>>>::deserialize(deserializer)?;

        for (key, entries) in &decoded.0 {
            for (principal, acls) in entries.iter().flat_map(|entry| &entry.0) {
                _ = resource_of(key, acls).map_err(D::Error::custom)?;
                principal_of(principal, acls).map_err(D::Error::custom)?;
            }
        }

        Ok(decoded
            .into_values()
            .flatten()
            .flat_map(Entries::into_values)
            .flatten()
            .collect())
    }
}
