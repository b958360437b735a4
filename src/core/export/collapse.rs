//! Class-group collapsing
//!
//! edoo.sys models class groups (`10A-1`, `10A-2`) as children of a root
//! class (`10A`). ECF consumers usually want only the root classes, so by
//! default every group is folded onto its root.

use super::context::DedupCache;
use crate::domain::SchoolClassRecord;

/// How class groups are written to ECF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassGroupPolicy {
    /// Every group resolves to its root class; each root is emitted once
    CollapseToRoot,
    /// Every class is emitted with code `{root_code}_{code}`
    KeepGroups,
}

impl ClassGroupPolicy {
    /// Policy from the `no_school_class_groups` setting
    pub fn from_flag(no_school_class_groups: bool) -> Self {
        if no_school_class_groups {
            ClassGroupPolicy::CollapseToRoot
        } else {
            ClassGroupPolicy::KeepGroups
        }
    }

    /// The class id that relation rows should reference
    pub fn effective_class_id<'a>(&self, class_id: &'a str, root_id: &'a str) -> &'a str {
        match self {
            ClassGroupPolicy::CollapseToRoot => root_id,
            ClassGroupPolicy::KeepGroups => class_id,
        }
    }
}

/// A school class ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClass {
    pub id: String,
    pub code: String,
    pub name: Option<String>,
}

/// Applies a [`ClassGroupPolicy`] to the school class stream
#[derive(Debug)]
pub struct ClassGroupCollapser {
    policy: ClassGroupPolicy,
    emitted_roots: DedupCache,
}

impl ClassGroupCollapser {
    pub fn new(policy: ClassGroupPolicy) -> Self {
        Self {
            policy,
            emitted_roots: DedupCache::new(),
        }
    }

    pub fn policy(&self) -> ClassGroupPolicy {
        self.policy
    }

    /// Resolve one class record against the attendance existence filter
    ///
    /// Returns `None` when the class is not referenced by any attendance or,
    /// when collapsing, its root has already been emitted.
    pub fn resolve(
        &mut self,
        class: &SchoolClassRecord,
        referenced: &DedupCache,
    ) -> Option<ResolvedClass> {
        match self.policy {
            ClassGroupPolicy::CollapseToRoot => {
                if self.emitted_roots.contains(&class.root_id)
                    || !referenced.contains(&class.root_id)
                {
                    return None;
                }
                self.emitted_roots.insert(class.root_id.clone());
                Some(ResolvedClass {
                    id: class.root_id.clone(),
                    code: class.root_code.clone(),
                    name: class.root_name.clone(),
                })
            }
            ClassGroupPolicy::KeepGroups => {
                if !referenced.contains(&class.id) {
                    return None;
                }
                let code = format!("{}_{}", class.root_code, class.code);
                Some(ResolvedClass {
                    id: class.id.clone(),
                    code: code.clone(),
                    name: Some(code),
                })
            }
        }
    }
}
