use crate::form::{FormDocument, GroupKind, IdentityField};
use crate::models::resume::{Education, GroupEntry, Identity, ResumeRecord, WorkExperience};

pub fn collect(form: &FormDocument) -> ResumeRecord {
    ResumeRecord {
        identity: collect_identity(form),
        education_entries: collect_entries::<Education>(form),
        work_entries: collect_entries::<WorkExperience>(form),
        skills: collect_skills(form),
    }
}

fn collect_identity(form: &FormDocument) -> Identity {
    let scalar = |field: IdentityField| form.identity(field).unwrap_or_default().to_string();
    Identity {
        name: scalar(IdentityField::Name),
        email: scalar(IdentityField::Email),
        phone: scalar(IdentityField::Phone),
    }
}

/// One entry per group of `T::KIND`, in document order.
fn collect_entries<T: GroupEntry>(form: &FormDocument) -> Vec<T> {
    form.groups(T::KIND).iter().map(T::from_group).collect()
}

fn collect_skills(form: &FormDocument) -> Vec<String> {
    form.groups(GroupKind::Skill)
        .iter()
        .map(|g| g.value("skill").unwrap_or_default().to_string())
        .collect()
}
