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

//! Tab separated listings of the ACL groupings.
//!
//! Each key has a row of its own with empty trailing cells, the members
//! under it follow indented by leading empty cells.

use std::fmt::{self, Display, Formatter};

use crate::{
    AclsByPrincipal, AclsByPrincipalAndResource, AclsByResource, AclsByResourceAndPrincipal,
};

const BY_RESOURCE: &str = "ResourceType\tResourceName\tPrincipal\tHost\tOperation\tPermission";
const BY_PRINCIPAL: &str = "Principal\tResourceType\tResourceName\tHost\tOperation\tPermission";

impl Display for AclsByResource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BY_RESOURCE}")?;

        for (resource, acls) in &self.0 {
            writeln!(
                f,
                "{}\t{}\t\t\t\t",
                resource.resource_type, resource.resource_name
            )?;

            for acl in acls {
                writeln!(
                    f,
                    "\t\t{}\t{}\t{}\t{}",
                    acl.principal, acl.host, acl.operation, acl.permission_type
                )?;
            }
        }

        Ok(())
    }
}

impl Display for AclsByPrincipal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BY_PRINCIPAL}")?;

        for (principal, acls) in &self.0 {
            writeln!(f, "{principal}\t\t\t\t\t")?;

            for acl in acls {
                writeln!(
                    f,
                    "\t{}\t{}\t{}\t{}\t{}",
                    acl.resource.resource_type,
                    acl.resource.resource_name,
                    acl.host,
                    acl.operation,
                    acl.permission_type
                )?;
            }
        }

        Ok(())
    }
}

impl Display for AclsByResourceAndPrincipal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BY_RESOURCE}")?;

        for (resource, by_principal) in &self.0 {
            writeln!(
                f,
                "{}\t{}\t\t\t\t",
                resource.resource_type, resource.resource_name
            )?;

            for (principal, acls) in by_principal {
                writeln!(f, "\t\t{principal}\t\t\t")?;

                for acl in acls {
                    writeln!(
                        f,
                        "\t\t\t{}\t{}\t{}",
                        acl.host, acl.operation, acl.permission_type
                    )?;
                }
            }
        }

        Ok(())
    }
}

impl Display for AclsByPrincipalAndResource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BY_PRINCIPAL}")?;

        for (principal, by_resource) in &self.0 {
            writeln!(f, "{principal}\t\t\t\t\t")?;

            for (resource, acls) in by_resource {
                writeln!(
                    f,
                    "\t{}\t{}\t\t\t",
                    resource.resource_type, resource.resource_name
                )?;

                for acl in acls {
                    writeln!(
                        f,
                        "\t\t\t{}\t{}\t{}",
                        acl.host, acl.operation, acl.permission_type
                    )?;
                }
            }
        }

        Ok(())
    }
}
