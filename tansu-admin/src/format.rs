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

//! Text and JSON output.
//!
//! Text is tab separated with a header row, JSON is a single document
//! followed by a newline.

use std::{io::Write, str::FromStr};

use serde::Serialize;
use tansu_acl::{Acl, AclsByPrincipal, AclsByResource, regroup};

use crate::{Broker, ConsumerGroup, Error, Result, Topic};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            otherwise => Err(Error::UnknownFormat(otherwise.to_owned())),
        }
    }
}

/// Whether ACLs are listed by resource or by principal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AclOrder {
    #[default]
    Resource,
    Principal,
}

impl FromStr for AclOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resource" => Ok(Self::Resource),
            "principal" => Ok(Self::Principal),
            otherwise => Err(Error::UnknownAclOrder(otherwise.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Config {
    pub format: Format,
    pub acl_order: AclOrder,

    /// Topics listed as text, in this order. Empty lists every topic by name.
    pub topic_sort: Vec<String>,
}

impl Config {
    pub fn format(self, format: Format) -> Self {
        Self { format, ..self }
    }

    pub fn acl_order(self, acl_order: AclOrder) -> Self {
        Self { acl_order, ..self }
    }

    pub fn topic_sort(self, topic_sort: Vec<String>) -> Self {
        Self { topic_sort, ..self }
    }
}

pub trait Formatter {
    fn format_text(&self, config: &Config, w: &mut dyn Write) -> Result<()>;
    fn format_json(&self, config: &Config, w: &mut dyn Write) -> Result<()>;
}

/// Write in the configured format.
pub fn format<F>(formatter: &F, config: &Config, w: &mut dyn Write) -> Result<()>
where
    F: Formatter + ?Sized,
{
    match config.format {
        Format::Text => formatter.format_text(config, w),
        Format::Json => formatter.format_json(config, w),
    }
}

fn json<T>(value: &T, w: &mut dyn Write) -> Result<()>
where
    T: Serialize + ?Sized,
{
    serde_json::to_writer(&mut *w, value)?;
    writeln!(w).map_err(Into::into)
}

fn acl_row(w: &mut dyn Write, indent: usize, acl: &Acl) -> Result<()> {
    writeln!(
        w,
        "{}{}\t{}\t{}\t{}",
        "\t".repeat(indent),
        acl.principal,
        acl.host,
        acl.operation,
        acl.permission_type
    )
    .map_err(Into::into)
}

impl Formatter for AclsByResource {
    fn format_text(&self, config: &Config, w: &mut dyn Write) -> Result<()> {
        match config.acl_order {
            AclOrder::Resource => write!(w, "{self}")?,
            AclOrder::Principal => write!(w, "{}", regroup::<_, AclsByPrincipal>(self.clone()))?,
        }

        Ok(())
    }

    fn format_json(&self, config: &Config, w: &mut dyn Write) -> Result<()> {
        match config.acl_order {
            AclOrder::Resource => json(self, w),
            AclOrder::Principal => json(&regroup::<_, AclsByPrincipal>(self.clone()), w),
        }
    }
}

fn selected<'a>(topics: &'a [Topic], config: &Config) -> Vec<&'a Topic> {
    if config.topic_sort.is_empty() {
        topics.iter().collect()
    } else {
        config
            .topic_sort
            .iter()
            .filter_map(|name| topics.iter().find(|topic| topic.name == *name))
            .collect()
    }
}

impl Formatter for Vec<Topic> {
    fn format_text(&self, config: &Config, w: &mut dyn Write) -> Result<()> {
        writeln!(
            w,
            "Topic\tPartitions\tReplicationFactor\tRetention\tPrincipal\tHost\tOperation\tPermission"
        )?;

        for topic in selected(self, config) {
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t\t\t\t",
                topic.name,
                topic.partitions,
                topic.replication_factor,
                topic
                    .retention_ms
                    .map(|retention_ms| retention_ms.to_string())
                    .unwrap_or_default()
            )?;

            for acl in topic.acls.iter().flatten() {
                acl_row(w, 4, acl)?;
            }
        }

        Ok(())
    }

    fn format_json(&self, config: &Config, w: &mut dyn Write) -> Result<()> {
        json(&selected(self, config), w)
    }
}

impl Formatter for Vec<Broker> {
    fn format_text(&self, _config: &Config, w: &mut dyn Write) -> Result<()> {
        writeln!(w, "Id\tAddress\tRack")?;

        for broker in self {
            writeln!(w, "{}\t{}\t{}", broker.id, broker.address, broker.rack)?;
        }

        Ok(())
    }

    fn format_json(&self, _config: &Config, w: &mut dyn Write) -> Result<()> {
        json(self, w)
    }
}

impl Formatter for Vec<ConsumerGroup> {
    fn format_text(&self, _config: &Config, w: &mut dyn Write) -> Result<()> {
        writeln!(
            w,
            "ConsumerGroup\tProtocolType\tPrincipal\tHost\tOperation\tPermission"
        )?;

        for group in self {
            writeln!(w, "{}\t{}\t\t\t\t", group.name, group.protocol_type)?;

            for acl in &group.acls {
                acl_row(w, 2, acl)?;
            }
        }

        Ok(())
    }

    fn format_json(&self, _config: &Config, w: &mut dyn Write) -> Result<()> {
        json(self, w)
    }
}
