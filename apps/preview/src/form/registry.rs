use tracing::{debug, warn};

use crate::form::document::FieldGroup;
use crate::form::{FormDocument, GroupId, GroupKind};

impl FormDocument {
    /// Appends an `education-entry` group (institution, degree, year).
    pub fn add_education_group(&mut self) -> Option<GroupId> {
        self.append_group(GroupKind::Education)
    }

    /// Appends a `work-entry` group (company, position, duration).
    pub fn add_work_group(&mut self) -> Option<GroupId> {
        self.append_group(GroupKind::Work)
    }

    /// Appends one bare `skill` control.
    pub fn add_skill_control(&mut self) -> Option<GroupId> {
        self.append_group(GroupKind::Skill)
    }

    fn append_group(&mut self, kind: GroupKind) -> Option<GroupId> {
        let Some(container) = self.containers.get_mut(&kind) else {
            warn!(
                container = kind.container_id(),
                "Input container absent; group not added"
            );
            return None;
        };

        let group = FieldGroup::new(kind);
        let id = group.id;
        container.groups.push(group);
        debug!(
            container = kind.container_id(),
            group_id = %id,
            count = container.groups.len(),
            "Appended {}",
            kind.tag()
        );
        Some(id)
    }
}
