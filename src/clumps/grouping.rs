//! Group organization within a clump
//!
//! With grouping enabled, ungrouped audits come first (each as its own
//! run), followed by one run per group id in order of first appearance.
//! Members of a group are coalesced even when they were interleaved with
//! other groups in the source order.

use super::Clump;
use crate::models::{AuditRef, ResolvedAudit};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Anything that may belong to a category group
pub trait Grouped {
    fn group_id(&self) -> Option<&str>;
}

impl Grouped for AuditRef {
    fn group_id(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

impl Grouped for ResolvedAudit<'_> {
    fn group_id(&self) -> Option<&str> {
        self.audit_ref.group_id()
    }
}

impl<T: Grouped> Grouped for &T {
    fn group_id(&self) -> Option<&str> {
        (**self).group_id()
    }
}

/// A run of clump members sharing one group (or none)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRun<T> {
    pub group: Option<String>,
    pub members: Vec<T>,
}

/// Split clump members into ordered group runs
pub fn organize<T: Grouped + Clone>(members: &[T], grouping_enabled: bool) -> Vec<GroupRun<T>> {
    if members.is_empty() {
        return Vec::new();
    }

    if !grouping_enabled {
        return vec![GroupRun {
            group: None,
            members: members.to_vec(),
        }];
    }

    let mut runs = Vec::new();
    let mut grouped: IndexMap<&str, Vec<T>> = IndexMap::new();

    for member in members {
        match member.group_id() {
            Some(group) => grouped.entry(group).or_default().push(member.clone()),
            None => runs.push(GroupRun {
                group: None,
                members: vec![member.clone()],
            }),
        }
    }

    runs.extend(grouped.into_iter().map(|(group, members)| GroupRun {
        group: Some(group.to_string()),
        members,
    }));
    runs
}

/// Which clumps are rendered flat rather than split into group runs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupingPolicy {
    #[serde(default = "default_flat_clumps")]
    pub flat_clumps: Vec<Clump>,
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        Self {
            flat_clumps: default_flat_clumps(),
        }
    }
}

fn default_flat_clumps() -> Vec<Clump> {
    vec![Clump::Passed]
}

impl GroupingPolicy {
    pub fn is_grouped(&self, clump: Clump) -> bool {
        !self.flat_clumps.contains(&clump)
    }
}
