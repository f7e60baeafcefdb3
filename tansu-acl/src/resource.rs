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

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tansu_cluster_admin::ResourcePattern;

use crate::{Error, Lookup, Result};

/// Represents a type of resource which an ACL can be applied to.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(try_from = "String", into = "String")]
#[repr(i8)]
pub enum ResourceType {
    /// Represents any resource type which this client cannot understand,
    /// perhaps because this client is too old.
    #[default]
    Unknown = 0,

    /// In a filter, matches any resource type
    Any = 1,

    /// A topic
    Topic = 2,

    /// A consumer group
    Group = 3,

    /// The cluster as a whole
    Cluster = 4,

    /// A transactional ID
    TransactionalId = 5,
}

impl ResourceType {
    pub const VALUES: [Self; 6] = [
        Self::Unknown,
        Self::Any,
        Self::Topic,
        Self::Group,
        Self::Cluster,
        Self::TransactionalId,
    ];

    const ANY: &str = "Any";
    const CLUSTER: &str = "Cluster";
    const GROUP: &str = "Group";
    const TOPIC: &str = "Topic";
    const TRANSACTIONAL_ID: &str = "TransactionalID";
    const UNKNOWN: &str = "Unknown";
}

impl AsRef<str> for ResourceType {
    fn as_ref(&self) -> &str {
        match self {
            Self::Any => Self::ANY,
            Self::Cluster => Self::CLUSTER,
            Self::Group => Self::GROUP,
            Self::Topic => Self::TOPIC,
            Self::TransactionalId => Self::TRANSACTIONAL_ID,
            Self::Unknown => Self::UNKNOWN,
        }
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ANY => Ok(Self::Any),
            Self::CLUSTER => Ok(Self::Cluster),
            Self::GROUP => Ok(Self::Group),
            Self::TOPIC => Ok(Self::Topic),
            Self::TRANSACTIONAL_ID => Ok(Self::TransactionalId),
            Self::UNKNOWN => Ok(Self::Unknown),
            otherwise => Err(Error::ResourceTypeNotFound(Lookup::Name(otherwise.into()))),
        }
    }
}

impl TryFrom<i8> for ResourceType {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            r if r == Self::Any as i8 => Ok(Self::Any),
            r if r == Self::Cluster as i8 => Ok(Self::Cluster),
            r if r == Self::Group as i8 => Ok(Self::Group),
            r if r == Self::Topic as i8 => Ok(Self::Topic),
            r if r == Self::TransactionalId as i8 => Ok(Self::TransactionalId),
            r if r == Self::Unknown as i8 => Ok(Self::Unknown),

            otherwise => Err(Error::ResourceTypeNotFound(Lookup::Code(otherwise))),
        }
    }
}

impl From<ResourceType> for i8 {
    fn from(value: ResourceType) -> Self {
        value as i8
    }
}

impl TryFrom<String> for ResourceType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<ResourceType> for String {
    fn from(value: ResourceType) -> Self {
        value.as_ref().into()
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Resource pattern
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(try_from = "String", into = "String")]
#[repr(i8)]
pub enum Pattern {
    /// Represents any pattern type which this client cannot understand,
    /// perhaps because this client is too old.
    #[default]
    Unknown = 0,

    /// In a filter, matches any resource pattern type.
    Any = 1,

    /// In a filter, matches literal, wildcard and prefixed resources
    /// that apply to a name.
    Match = 2,

    /// A literal resource name, with `*` matching any name.
    Literal = 3,

    /// A prefixed resource name.
    Prefixed = 4,
}

impl Pattern {
    pub const VALUES: [Self; 5] = [
        Self::Unknown,
        Self::Any,
        Self::Match,
        Self::Literal,
        Self::Prefixed,
    ];

    const ANY: &str = "Any";
    const LITERAL: &str = "Literal";
    const MATCH: &str = "Match";
    const PREFIXED: &str = "Prefixed";
    const UNKNOWN: &str = "Unknown";
}

impl AsRef<str> for Pattern {
    fn as_ref(&self) -> &str {
        match self {
            Self::Any => Self::ANY,
            Self::Literal => Self::LITERAL,
            Self::Match => Self::MATCH,
            Self::Prefixed => Self::PREFIXED,
            Self::Unknown => Self::UNKNOWN,
        }
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ANY => Ok(Self::Any),
            Self::LITERAL => Ok(Self::Literal),
            Self::MATCH => Ok(Self::Match),
            Self::PREFIXED => Ok(Self::Prefixed),
            Self::UNKNOWN => Ok(Self::Unknown),
            otherwise => Err(Error::PatternNotFound(Lookup::Name(otherwise.into()))),
        }
    }
}

impl TryFrom<i8> for Pattern {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            p if p == Self::Any as i8 => Ok(Self::Any),
            p if p == Self::Literal as i8 => Ok(Self::Literal),
            p if p == Self::Match as i8 => Ok(Self::Match),
            p if p == Self::Prefixed as i8 => Ok(Self::Prefixed),
            p if p == Self::Unknown as i8 => Ok(Self::Unknown),

            otherwise => Err(Error::PatternNotFound(Lookup::Code(otherwise))),
        }
    }
}

impl From<Pattern> for i8 {
    fn from(value: Pattern) -> Self {
        value as i8
    }
}

impl TryFrom<String> for Pattern {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Pattern> for String {
    fn from(value: Pattern) -> Self {
        value.as_ref().into()
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A named resource of a type, for example the topic `test`.
///
/// As a map key a resource is written as `<type>/<name>`, for example `Topic/test`.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Resource {
    pub resource_name: String,
    pub resource_type: ResourceType,
}

impl Resource {
    const DELIMITER: char = '/';
    const CLUSTER: &str = "kafka-cluster";

    pub fn new(resource_type: ResourceType, resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            resource_type,
        }
    }

    pub fn topic(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Topic, name)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Group, name)
    }

    pub fn cluster() -> Self {
        Self::new(ResourceType::Cluster, Self::CLUSTER)
    }

    /// The map key of this resource, names containing the delimiter are rejected.
    pub fn key(&self) -> Result<String> {
        if self.resource_name.contains(Self::DELIMITER) {
            Err(Error::DelimiterInName(self.resource_name.clone()))
        } else {
            Ok(self.to_string())
        }
    }

    /// This resource as it is sent to the cluster, always a literal name.
    pub fn pattern(&self) -> ResourcePattern {
        ResourcePattern::default()
            .resource_type(self.resource_type.into())
            .resource_name(self.resource_name.as_str())
            .pattern_type(Pattern::Literal.into())
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.resource_type,
            Self::DELIMITER,
            self.resource_name
        )
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(Self::DELIMITER).collect::<Vec<_>>();

        if let [resource_type, resource_name] = parts[..] {
            ResourceType::from_str(resource_type)
                .map(|resource_type| Self::new(resource_type, resource_name))
        } else {
            Err(Error::InvalidResourceKey(s.into()))
        }
    }
}

impl TryFrom<&ResourcePattern> for Resource {
    type Error = Error;

    fn try_from(value: &ResourcePattern) -> Result<Self, Self::Error> {
        _ = Pattern::try_from(value.pattern_type)?;

        ResourceType::try_from(value.resource_type)
            .map(|resource_type| Self::new(resource_type, value.resource_name.as_str()))
    }
}
