//! Role admin operations on top of `RoleRepository`.
//!
//! Handlers stay thin: validation, index ordering and the destroy guard all
//! live here so they can be exercised without HTTP.

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::roles::{
    ATTENDS_CABINET_TYPES, Lookup, ROLE_PAYMENT_TYPES, WHIP_ORGANISATIONS, find_lookup,
};
use super::DestroyOutcome;
use crate::domain::{DomainError, OrganisationOption, Role, RoleForm, RoleRepository, RoleSummary, RoleType};

pub const DESTROY_REFUSED: &str = "Cannot destroy a role with appointments, organisations, or documents";

#[derive(Debug, Clone, Serialize)]
pub struct RoleTypeOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Option lists shown alongside the role form
#[derive(Debug, Clone, Serialize)]
pub struct RoleFormOptions {
    pub role_types: Vec<RoleTypeOption>,
    pub organisations: Vec<OrganisationOption>,
    pub worldwide_organisations: Vec<OrganisationOption>,
    pub whip_organisations: &'static [Lookup],
    pub role_payment_types: &'static [Lookup],
    pub attends_cabinet_types: &'static [Lookup],
}

/// Index order: first organisation name (roles without one first), then
/// kind and permanent secretary descending, then name.
pub fn compare_roles(a: &RoleSummary, b: &RoleSummary) -> Ordering {
    a.organisations
        .first()
        .cmp(&b.organisations.first())
        .then_with(|| b.kind.cmp(&a.kind))
        .then_with(|| b.permanent_secretary.cmp(&a.permanent_secretary))
        .then_with(|| a.name.cmp(&b.name))
}

pub async fn list_roles(repo: &dyn RoleRepository) -> Result<Vec<RoleSummary>, DomainError> {
    let mut roles = repo.find_all().await?;
    roles.sort_by(compare_roles);
    Ok(roles)
}

pub async fn form_options(repo: &dyn RoleRepository) -> Result<RoleFormOptions, DomainError> {
    let (worldwide, domestic): (Vec<_>, Vec<_>) = repo
        .organisation_options()
        .await?
        .into_iter()
        .partition(|o| o.worldwide);

    Ok(RoleFormOptions {
        role_types: RoleType::ALL
            .into_iter()
            .map(|t| RoleTypeOption {
                value: t.as_str(),
                label: t.label(),
            })
            .collect(),
        organisations: domestic,
        worldwide_organisations: worldwide,
        whip_organisations: WHIP_ORGANISATIONS,
        role_payment_types: ROLE_PAYMENT_TYPES,
        attends_cabinet_types: ATTENDS_CABINET_TYPES,
    })
}

/// Validation messages for a submitted form, empty when it can be saved
pub fn validation_errors(form: &RoleForm, organisations: &[OrganisationOption]) -> Vec<String> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push("Name can't be blank".to_string());
    }

    let role_type = RoleType::parse(&form.role_type);
    if role_type.is_none() {
        errors.push("Role type is not valid".to_string());
    }
    let ministerial = role_type.is_some_and(RoleType::is_ministerial);

    let lookups = [
        ("Whip organisation", form.whip_organisation_id, WHIP_ORGANISATIONS),
        ("Role payment type", form.role_payment_type_id, ROLE_PAYMENT_TYPES),
        ("Attends cabinet type", form.attends_cabinet_type_id, ATTENDS_CABINET_TYPES),
    ];
    for (label, id, list) in lookups {
        let Some(id) = id else { continue };
        if find_lookup(list, id).is_none() {
            errors.push(format!("{label} is not valid"));
        } else if !ministerial {
            errors.push(format!("{label} can only be set on ministerial roles"));
        }
    }

    let worldwide_of = |id: &i32| organisations.iter().find(|o| o.id == *id).map(|o| o.worldwide);
    if form
        .organisation_ids
        .iter()
        .any(|id| worldwide_of(id) != Some(false))
    {
        errors.push("Organisations must be existing domestic organisations".to_string());
    }
    if form
        .worldwide_organisation_ids
        .iter()
        .any(|id| worldwide_of(id) != Some(true))
    {
        errors.push("Worldwide organisations must be existing worldwide organisations".to_string());
    }

    errors
}

async fn validate(repo: &dyn RoleRepository, form: &RoleForm) -> Result<(), DomainError> {
    let organisations = repo.organisation_options().await?;
    let errors = validation_errors(form, &organisations);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

pub async fn get_role(repo: &dyn RoleRepository, id: i32) -> Result<Role, DomainError> {
    repo.find_by_id(id).await?.ok_or(DomainError::NotFound("Role"))
}

pub async fn create_role(repo: &dyn RoleRepository, form: &RoleForm) -> Result<Role, DomainError> {
    validate(repo, form).await?;
    let role = repo.create(form).await?;
    tracing::info!(role_id = role.id, name = %role.name, "Role created");
    Ok(role)
}

pub async fn update_role(
    repo: &dyn RoleRepository,
    id: i32,
    form: &RoleForm,
) -> Result<Role, DomainError> {
    get_role(repo, id).await?;
    validate(repo, form).await?;
    let role = repo.update(id, form).await?;
    tracing::info!(role_id = id, name = %role.name, "Role updated");
    Ok(role)
}

/// Delete a role unless appointments, organisations or documents still use it
pub async fn destroy_role(repo: &dyn RoleRepository, id: i32) -> Result<DestroyOutcome, DomainError> {
    let role = get_role(repo, id).await?;
    let dependants = repo.dependants(id).await?;

    if !dependants.is_empty() {
        tracing::info!(
            role_id = id,
            appointments = dependants.appointments,
            organisations = dependants.organisations,
            documents = dependants.documents,
            "Refusing to destroy role in use"
        );
        return Ok(DestroyOutcome::Refused { name: role.name });
    }

    repo.delete(id).await?;
    tracing::info!(role_id = id, name = %role.name, "Role destroyed");
    Ok(DestroyOutcome::Destroyed { name: role.name })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, kind: &str, permanent_secretary: bool, orgs: &[&str]) -> RoleSummary {
        RoleSummary {
            id: 0,
            name: name.to_string(),
            role_type: String::new(),
            kind: kind.to_string(),
            permanent_secretary,
            cabinet_member: false,
            organisations: orgs.iter().map(|s| s.to_string()).collect(),
            current_people: vec![],
        }
    }

    fn org(id: i32, worldwide: bool) -> OrganisationOption {
        OrganisationOption {
            id,
            name: format!("Org {id}"),
            worldwide,
        }
    }

    #[test]
    fn index_order() {
        let mut roles = vec![
            summary("Treasury board member", "BoardMemberRole", false, &["Treasury"]),
            summary("Chancellor", "MinisterialRole", false, &["Treasury"]),
            summary("Permanent secretary", "BoardMemberRole", true, &["Treasury"]),
            summary("Ambassador", "WorldwideOfficeStaffRole", false, &[]),
            summary("Transport minister", "MinisterialRole", false, &["Department for Transport"]),
            summary("Aardvark board member", "BoardMemberRole", false, &["Treasury"]),
        ];
        roles.sort_by(compare_roles);
        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Ambassador",
                "Transport minister",
                "Chancellor",
                "Permanent secretary",
                "Aardvark board member",
                "Treasury board member",
            ]
        );
    }

    #[test]
    fn blank_name_and_unknown_type_are_rejected() {
        let form = RoleForm {
            role_type: "astronaut".into(),
            ..Default::default()
        };
        assert_eq!(
            validation_errors(&form, &[]),
            vec!["Name can't be blank".to_string(), "Role type is not valid".to_string()]
        );
    }

    #[test]
    fn lookups_only_on_ministerial_roles() {
        let mut form = RoleForm {
            name: "Chief whip".into(),
            role_type: "minister".into(),
            whip_organisation_id: Some(1),
            ..Default::default()
        };
        assert!(validation_errors(&form, &[]).is_empty());

        form.whip_organisation_id = Some(42);
        assert_eq!(validation_errors(&form, &[]), vec!["Whip organisation is not valid".to_string()]);

        form.whip_organisation_id = Some(1);
        form.role_type = "board_member".into();
        assert_eq!(
            validation_errors(&form, &[]),
            vec!["Whip organisation can only be set on ministerial roles".to_string()]
        );
    }

    #[test]
    fn organisations_must_match_their_list() {
        let organisations = [org(1, false), org(2, true)];
        let mut form = RoleForm {
            name: "Ambassador to France".into(),
            role_type: "worldwide_office_staff".into(),
            organisation_ids: vec![1],
            worldwide_organisation_ids: vec![2],
            ..Default::default()
        };
        assert!(validation_errors(&form, &organisations).is_empty());

        form.organisation_ids = vec![2];
        form.worldwide_organisation_ids = vec![99];
        assert_eq!(validation_errors(&form, &organisations).len(), 2);
    }
}
