use serde::{Deserialize, Serialize};

use crate::form::{FieldGroup, GroupKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub duration: String,
}

/// Snapshot of the whole form taken by one synchronization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub identity: Identity,
    pub education_entries: Vec<Education>,
    pub work_entries: Vec<WorkExperience>,
    pub skills: Vec<String>,
}

/// A record entry built from one dynamic group through its kind's schema.
pub trait GroupEntry: Sized {
    const KIND: GroupKind;

    fn from_group(group: &FieldGroup) -> Self;
}

fn field(group: &FieldGroup, key: &str) -> String {
    group.value(key).unwrap_or_default().to_string()
}

impl GroupEntry for Education {
    const KIND: GroupKind = GroupKind::Education;

    fn from_group(group: &FieldGroup) -> Self {
        Education {
            institution: field(group, "institution"),
            degree: field(group, "degree"),
            year: field(group, "year"),
        }
    }
}

impl GroupEntry for WorkExperience {
    const KIND: GroupKind = GroupKind::Work;

    fn from_group(group: &FieldGroup) -> Self {
        WorkExperience {
            company: field(group, "company"),
            position: field(group, "position"),
            duration: field(group, "duration"),
        }
    }
}
