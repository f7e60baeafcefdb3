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

use std::str::FromStr;

use regex::Regex;
use tansu_cluster_admin::AclFilter;
use tracing::debug;

use crate::{Acl, Error, Operation, Pattern, Permission, ResourceType, Result};

/// Selects ACLs by resource, principal, host, operation or permission.
///
/// Parsed from `<type>/<name>`, where type is one of `topic`, `cluster`,
/// `group` or `principal` and an empty name matches any:
///
/// ```
/// # use tansu_acl::{Error, Filter, ResourceType};
/// # fn main() -> Result<(), Error> {
/// let filter = "topic/payments".parse::<Filter>()?;
/// assert_eq!(ResourceType::Topic, filter.resource_type);
/// assert_eq!(Some("payments"), filter.resource_name.as_deref());
///
/// let filter = "principal/User:alice".parse::<Filter>()?;
/// assert_eq!(ResourceType::Any, filter.resource_type);
/// assert_eq!(Some("User:alice"), filter.principal.as_deref());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Filter {
    pub resource_type: ResourceType,
    pub resource_name: Option<String>,
    pub pattern: Pattern,
    pub principal: Option<String>,
    pub host: Option<String>,
    pub operation: Operation,
    pub permission_type: Permission,
}

impl Default for Filter {
    fn default() -> Self {
        Self::any()
    }
}

impl Filter {
    const CLUSTER: &str = "cluster";
    const GROUP: &str = "group";
    const PRINCIPAL: &str = "principal";
    const TOPIC: &str = "topic";

    /// Matches every ACL.
    pub fn any() -> Self {
        Self {
            resource_type: ResourceType::Any,
            resource_name: None,
            pattern: Pattern::Any,
            principal: None,
            host: None,
            operation: Operation::Any,
            permission_type: Permission::Any,
        }
    }

    pub fn resource_type(self, resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            ..self
        }
    }

    pub fn resource_name(self, resource_name: Option<String>) -> Self {
        Self {
            resource_name,
            ..self
        }
    }

    pub fn pattern(self, pattern: Pattern) -> Self {
        Self { pattern, ..self }
    }

    pub fn principal(self, principal: Option<String>) -> Self {
        Self { principal, ..self }
    }

    pub fn host(self, host: Option<String>) -> Self {
        Self { host, ..self }
    }

    pub fn operation(self, operation: Operation) -> Self {
        Self { operation, ..self }
    }

    pub fn permission_type(self, permission_type: Permission) -> Self {
        Self {
            permission_type,
            ..self
        }
    }

    /// Whether an ACL is selected by this filter.
    pub fn matches(&self, acl: &Acl) -> bool {
        AclFilter::from(self).matches(&acl.resource.pattern(), &acl.description())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(r"^(?<type>[^/]+)/(?<name>[\w.\-:*]*)$")?;

        let captures = re
            .captures(s)
            .ok_or_else(|| Error::InvalidFilter(s.into()))?;

        let name = captures
            .name("name")
            .map(|name| name.as_str())
            .filter(|name| !name.is_empty())
            .map(String::from);

        let filter = match captures.name("type").map(|r#type| r#type.as_str()) {
            Some(Self::TOPIC) => Self::any()
                .resource_type(ResourceType::Topic)
                .resource_name(name),

            Some(Self::CLUSTER) => Self::any()
                .resource_type(ResourceType::Cluster)
                .resource_name(name),

            Some(Self::GROUP) => Self::any()
                .resource_type(ResourceType::Group)
                .resource_name(name),

            Some(Self::PRINCIPAL) => Self::any().principal(name),

            otherwise => {
                return Err(Error::UnrecognizedFilterType(
                    otherwise.unwrap_or_default().into(),
                ));
            }
        };

        debug!(?filter);
        Ok(filter)
    }
}

impl From<&Filter> for AclFilter {
    fn from(value: &Filter) -> Self {
        AclFilter::default()
            .resource_type(value.resource_type.into())
            .resource_name(value.resource_name.clone())
            .pattern_type(value.pattern.into())
            .principal(value.principal.clone())
            .host(value.host.clone())
            .operation(value.operation.into())
            .permission_type(value.permission_type.into())
    }
}

impl From<Filter> for AclFilter {
    fn from(value: Filter) -> Self {
        Self::from(&value)
    }
}
