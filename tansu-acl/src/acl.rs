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
use tansu_cluster_admin::AclDescription;

use crate::{Error, Lookup, Resource, Result};

/// Represents whether an ACL grants or denies permissions
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(try_from = "String", into = "String")]
#[repr(i8)]
pub enum Permission {
    /// Represents any permission which this client cannot understand,
    /// perhaps because this client is too old.
    #[default]
    Unknown = 0,

    /// In a filter, matches any permission.
    Any = 1,

    /// Disallows access
    Deny = 2,

    /// Grants access
    Allow = 3,
}

impl Permission {
    pub const VALUES: [Self; 4] = [Self::Unknown, Self::Any, Self::Deny, Self::Allow];

    const ALLOW: &str = "Allow";
    const ANY: &str = "Any";
    const DENY: &str = "Deny";
    const UNKNOWN: &str = "Unknown";
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        match self {
            Self::Allow => Self::ALLOW,
            Self::Any => Self::ANY,
            Self::Deny => Self::DENY,
            Self::Unknown => Self::UNKNOWN,
        }
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ALLOW => Ok(Self::Allow),
            Self::ANY => Ok(Self::Any),
            Self::DENY => Ok(Self::Deny),
            Self::UNKNOWN => Ok(Self::Unknown),
            otherwise => Err(Error::PermissionNotFound(Lookup::Name(otherwise.into()))),
        }
    }
}

impl TryFrom<i8> for Permission {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            perm if perm == Self::Allow as i8 => Ok(Self::Allow),
            perm if perm == Self::Any as i8 => Ok(Self::Any),
            perm if perm == Self::Deny as i8 => Ok(Self::Deny),
            perm if perm == Self::Unknown as i8 => Ok(Self::Unknown),

            otherwise => Err(Error::PermissionNotFound(Lookup::Code(otherwise))),
        }
    }
}

impl From<Permission> for i8 {
    fn from(value: Permission) -> Self {
        value as i8
    }
}

impl TryFrom<String> for Permission {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.as_ref().into()
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Represents an operation which an ACL grants or denies permission to perform.
///
/// Some operations imply other operations:
/// <ul>
/// <li>[`Allow`] [`All`] implies [`Allow`] everything
/// <li>[`Deny`] [`All`] implies [`Deny`] everything
///
/// <li>[`Allow`] [`Read`] implies [`Allow`] [`Describe`]
/// <li>[`Allow`] [`Write`] implies [`Allow`] [`Describe`]
/// <li>[`Allow`] [`Delete`] implies [`Allow`] [`Describe`]
///
/// <li>[`Allow`] [`Alter`] implies [`Allow`] [`Describe`]
///
/// <li>[`Allow`] [`AlterConfigs`] implies [`Allow`] [`DescribeConfigs`]
/// </ul>
///
/// [`Allow`]: Permission::Allow
/// [`Deny`]: Permission::Deny
/// [`All`]: Operation::All
/// [`Read`]: Operation::Read
/// [`Write`]: Operation::Write
/// [`Delete`]: Operation::Delete
/// [`Alter`]: Operation::Alter
/// [`Describe`]: Operation::Describe
/// [`AlterConfigs`]: Operation::AlterConfigs
/// [`DescribeConfigs`]: Operation::DescribeConfigs
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(try_from = "String", into = "String")]
#[repr(i8)]
pub enum Operation {
    #[default]
    Unknown = 0,

    Any = 1,
    All = 2,
    Read = 3,
    Write = 4,
    Create = 5,
    Delete = 6,
    Alter = 7,
    Describe = 8,
    ClusterAction = 9,
    DescribeConfigs = 10,
    AlterConfigs = 11,
    IdempotentWrite = 12,
}

impl Operation {
    pub const VALUES: [Self; 13] = [
        Self::Unknown,
        Self::Any,
        Self::All,
        Self::Read,
        Self::Write,
        Self::Create,
        Self::Delete,
        Self::Alter,
        Self::Describe,
        Self::ClusterAction,
        Self::DescribeConfigs,
        Self::AlterConfigs,
        Self::IdempotentWrite,
    ];

    const ALL: &str = "All";
    const ALTER: &str = "Alter";
    const ALTER_CONFIGS: &str = "AlterConfigs";
    const ANY: &str = "Any";
    const CLUSTER_ACTION: &str = "ClusterAction";
    const CREATE: &str = "Create";
    const DELETE: &str = "Delete";
    const DESCRIBE: &str = "Describe";
    const DESCRIBE_CONFIGS: &str = "DescribeConfigs";
    const IDEMPOTENT_WRITE: &str = "IdempotentWrite";
    const READ: &str = "Read";
    const UNKNOWN: &str = "Unknown";
    const WRITE: &str = "Write";
}

impl AsRef<str> for Operation {
    fn as_ref(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Alter => Self::ALTER,
            Self::AlterConfigs => Self::ALTER_CONFIGS,
            Self::Any => Self::ANY,
            Self::ClusterAction => Self::CLUSTER_ACTION,
            Self::Create => Self::CREATE,
            Self::Delete => Self::DELETE,
            Self::Describe => Self::DESCRIBE,
            Self::DescribeConfigs => Self::DESCRIBE_CONFIGS,
            Self::IdempotentWrite => Self::IDEMPOTENT_WRITE,
            Self::Read => Self::READ,
            Self::Unknown => Self::UNKNOWN,
            Self::Write => Self::WRITE,
        }
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ALL => Ok(Self::All),
            Self::ALTER => Ok(Self::Alter),
            Self::ALTER_CONFIGS => Ok(Self::AlterConfigs),
            Self::ANY => Ok(Self::Any),
            Self::CLUSTER_ACTION => Ok(Self::ClusterAction),
            Self::CREATE => Ok(Self::Create),
            Self::DELETE => Ok(Self::Delete),
            Self::DESCRIBE => Ok(Self::Describe),
            Self::DESCRIBE_CONFIGS => Ok(Self::DescribeConfigs),
            Self::IDEMPOTENT_WRITE => Ok(Self::IdempotentWrite),
            Self::READ => Ok(Self::Read),
            Self::UNKNOWN => Ok(Self::Unknown),
            Self::WRITE => Ok(Self::Write),
            otherwise => Err(Error::OperationNotFound(Lookup::Name(otherwise.into()))),
        }
    }
}

impl TryFrom<i8> for Operation {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            op if op == Self::All as i8 => Ok(Self::All),
            op if op == Self::Alter as i8 => Ok(Self::Alter),
            op if op == Self::AlterConfigs as i8 => Ok(Self::AlterConfigs),
            op if op == Self::Any as i8 => Ok(Self::Any),
            op if op == Self::ClusterAction as i8 => Ok(Self::ClusterAction),
            op if op == Self::Create as i8 => Ok(Self::Create),
            op if op == Self::Delete as i8 => Ok(Self::Delete),
            op if op == Self::Describe as i8 => Ok(Self::Describe),
            op if op == Self::DescribeConfigs as i8 => Ok(Self::DescribeConfigs),
            op if op == Self::IdempotentWrite as i8 => Ok(Self::IdempotentWrite),
            op if op == Self::Read as i8 => Ok(Self::Read),
            op if op == Self::Unknown as i8 => Ok(Self::Unknown),
            op if op == Self::Write as i8 => Ok(Self::Write),

            otherwise => Err(Error::OperationNotFound(Lookup::Code(otherwise))),
        }
    }
}

impl From<Operation> for i8 {
    fn from(value: Operation) -> Self {
        value as i8
    }
}

impl TryFrom<String> for Operation {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Operation> for String {
    fn from(value: Operation) -> Self {
        value.as_ref().into()
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Principal P is [`Allow`]ed or [`Deny`]ed operation O from host H on resource R.
///
/// [`Allow`]: Permission::Allow
/// [`Deny`]: Permission::Deny
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Acl {
    pub principal: String,
    pub permission_type: Permission,
    pub operation: Operation,
    pub host: String,

    #[serde(flatten)]
    pub resource: Resource,
}

impl Acl {
    pub fn principal(self, principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            ..self
        }
    }

    pub fn permission_type(self, permission_type: Permission) -> Self {
        Self {
            permission_type,
            ..self
        }
    }

    pub fn operation(self, operation: Operation) -> Self {
        Self { operation, ..self }
    }

    pub fn host(self, host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..self
        }
    }

    pub fn resource(self, resource: Resource) -> Self {
        Self { resource, ..self }
    }

    /// This ACL without its resource, with protocol codes.
    pub fn description(&self) -> AclDescription {
        AclDescription::default()
            .principal(self.principal.as_str())
            .host(self.host.as_str())
            .operation(self.operation.into())
            .permission_type(self.permission_type.into())
    }

    pub fn try_from_description(resource: Resource, description: &AclDescription) -> Result<Self> {
        Ok(Self {
            principal: description.principal.clone(),
            permission_type: Permission::try_from(description.permission_type)?,
            operation: Operation::try_from(description.operation)?,
            host: description.host.clone(),
            resource,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn operation_codes() -> Result<()> {
        for (code, operation) in (0i8..).zip(Operation::VALUES) {
            assert_eq!(code, i8::from(operation));
            assert_eq!(operation, Operation::try_from(code)?);
            assert_eq!(operation, Operation::from_str(operation.as_ref())?);
        }

        assert_matches!(
            Operation::try_from(13),
            Err(Error::OperationNotFound(Lookup::Code(13)))
        );

        assert_matches!(
            Operation::from_str("read"),
            Err(Error::OperationNotFound(Lookup::Name(name))) if name == "read"
        );

        Ok(())
    }

    #[test]
    fn permission_codes() -> Result<()> {
        for permission in Permission::VALUES {
            assert_eq!(permission, Permission::try_from(i8::from(permission))?);
            assert_eq!(permission, Permission::from_str(&permission.to_string())?);
        }

        assert_matches!(
            Permission::try_from(4),
            Err(Error::PermissionNotFound(Lookup::Code(4)))
        );

        Ok(())
    }

    #[test]
    fn description() -> Result<()> {
        let acl = Acl::default()
            .principal("User:test")
            .permission_type(Permission::Deny)
            .operation(Operation::Alter)
            .host("*")
            .resource(Resource::topic("test"));

        let description = acl.description();

        assert_eq!(
            AclDescription::default()
                .principal("User:test")
                .host("*")
                .operation(7)
                .permission_type(2),
            description
        );

        assert_eq!(
            acl,
            Acl::try_from_description(Resource::topic("test"), &description)?
        );

        assert_matches!(
            Acl::try_from_description(
                Resource::topic("test"),
                &description.permission_type(12)
            ),
            Err(Error::PermissionNotFound(Lookup::Code(12)))
        );

        Ok(())
    }
}
