// Form document: identity controls plus the repeatable input groups the
// Field Registry appends. Groups carry an explicit per-kind schema and a
// stable id, so collection never depends on presentation tags.
// The registry only ever appends; an absent container makes an add a no-op.

pub mod document;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use document::{FieldGroup, FormDocument, FormError, GroupId};

/// One named input inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
}

const fn required(key: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        placeholder,
        required: true,
    }
}

const EDUCATION_FIELDS: &[FieldSpec] = &[
    required("institution", "Institution"),
    required("degree", "Degree"),
    required("year", "Year"),
];

const WORK_FIELDS: &[FieldSpec] = &[
    required("company", "Company"),
    required("position", "Position"),
    required("duration", "Duration"),
];

const SKILL_FIELDS: &[FieldSpec] = &[required("skill", "Skill")];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Education,
    Work,
    /// A bare skill control, modelled as a one-field group.
    Skill,
}

impl GroupKind {
    pub const ALL: [GroupKind; 3] = [GroupKind::Education, GroupKind::Work, GroupKind::Skill];

    /// Fixed, ordered field schema for this kind.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            GroupKind::Education => EDUCATION_FIELDS,
            GroupKind::Work => WORK_FIELDS,
            GroupKind::Skill => SKILL_FIELDS,
        }
    }

    /// Structural tag the host puts on each group element.
    pub fn tag(self) -> &'static str {
        match self {
            GroupKind::Education => "education-entry",
            GroupKind::Work => "work-entry",
            GroupKind::Skill => "skill",
        }
    }

    /// Host identifier of the container new groups are appended into.
    pub fn container_id(self) -> &'static str {
        match self {
            GroupKind::Education => "educationFields",
            GroupKind::Work => "workFields",
            GroupKind::Skill => "skillFields",
        }
    }

    pub fn field_index(self, key: &str) -> Option<usize> {
        self.fields().iter().position(|f| f.key == key)
    }
}

/// Fixed identity controls of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    Name,
    Email,
    Phone,
}

impl IdentityField {
    pub const ALL: [IdentityField; 3] = [IdentityField::Name, IdentityField::Email, IdentityField::Phone];

    pub fn as_str(self) -> &'static str {
        match self {
            IdentityField::Name => "name",
            IdentityField::Email => "email",
            IdentityField::Phone => "phone",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_schema_order() {
        let keys: Vec<_> = GroupKind::Education.fields().iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["institution", "degree", "year"]);
    }

    #[test]
    fn test_work_schema_order() {
        let keys: Vec<_> = GroupKind::Work.fields().iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["company", "position", "duration"]);
    }

    #[test]
    fn test_every_dynamic_field_is_required() {
        for kind in GroupKind::ALL {
            assert!(kind.fields().iter().all(|f| f.required), "{kind:?}");
        }
    }

    #[test]
    fn test_field_index_lookup() {
        assert_eq!(GroupKind::Work.field_index("duration"), Some(2));
        assert_eq!(GroupKind::Work.field_index("year"), None);
        assert_eq!(GroupKind::Skill.field_index("skill"), Some(0));
    }

    #[test]
    fn test_container_ids() {
        assert_eq!(GroupKind::Education.container_id(), "educationFields");
        assert_eq!(GroupKind::Work.container_id(), "workFields");
        assert_eq!(GroupKind::Skill.container_id(), "skillFields");
    }
}
