//! SeaORM implementation of RoleRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{
    DomainError, OrganisationOption, Role, RoleDependants, RoleForm, RoleRepository, RoleSummary,
    RoleType,
};
use crate::models::{
    edition_ministerial_role, organisation, person, role, role_appointment, role_organisation,
};

/// SeaORM-based implementation of RoleRepository
pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn organisations_by_id(&self) -> Result<HashMap<i32, organisation::Model>, DomainError> {
        Ok(organisation::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|o| (o.id, o))
            .collect())
    }
}

fn role_type_of(form: &RoleForm) -> Result<RoleType, DomainError> {
    RoleType::parse(&form.role_type).ok_or_else(|| DomainError::invalid("Role type is not valid"))
}

async fn replace_organisations(
    txn: &DatabaseTransaction,
    role_id: i32,
    form: &RoleForm,
) -> Result<(), DomainError> {
    role_organisation::Entity::delete_many()
        .filter(role_organisation::Column::RoleId.eq(role_id))
        .exec(txn)
        .await?;

    let mut ids: Vec<i32> = form
        .organisation_ids
        .iter()
        .chain(form.worldwide_organisation_ids.iter())
        .copied()
        .collect();
    ids.sort_unstable();
    ids.dedup();

    for organisation_id in ids {
        role_organisation::ActiveModel {
            role_id: Set(role_id),
            organisation_id: Set(organisation_id),
        }
        .insert(txn)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn find_all(&self) -> Result<Vec<RoleSummary>, DomainError> {
        let roles = role::Entity::find().all(&self.db).await?;
        let organisations = self.organisations_by_id().await?;

        let mut names_by_role: HashMap<i32, Vec<String>> = HashMap::new();
        for link in role_organisation::Entity::find().all(&self.db).await? {
            if let Some(org) = organisations.get(&link.organisation_id)
                && !org.worldwide
            {
                names_by_role
                    .entry(link.role_id)
                    .or_default()
                    .push(org.name.clone());
            }
        }

        let mut people_by_role: HashMap<i32, Vec<String>> = HashMap::new();
        let current = role_appointment::Entity::find()
            .filter(role_appointment::Column::EndedAt.is_null())
            .find_also_related(person::Entity)
            .all(&self.db)
            .await?;
        for (appointment, person) in current {
            if let Some(person) = person {
                people_by_role
                    .entry(appointment.role_id)
                    .or_default()
                    .push(person.name);
            }
        }

        Ok(roles
            .into_iter()
            .map(|r| {
                let mut organisation_names = names_by_role.remove(&r.id).unwrap_or_default();
                organisation_names.sort();
                RoleSummary {
                    id: r.id,
                    name: r.name,
                    role_type: r.role_type,
                    kind: r.kind,
                    permanent_secretary: r.permanent_secretary,
                    cabinet_member: r.cabinet_member,
                    organisations: organisation_names,
                    current_people: people_by_role.remove(&r.id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, DomainError> {
        let Some(model) = role::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let organisations = self.organisations_by_id().await?;
        let links = role_organisation::Entity::find()
            .filter(role_organisation::Column::RoleId.eq(id))
            .order_by_asc(role_organisation::Column::OrganisationId)
            .all(&self.db)
            .await?;

        let (worldwide, domestic): (Vec<i32>, Vec<i32>) = links
            .into_iter()
            .map(|l| l.organisation_id)
            .partition(|org_id| organisations.get(org_id).is_some_and(|o| o.worldwide));

        Ok(Some(Role {
            id: model.id,
            name: model.name,
            role_type: model.role_type,
            kind: model.kind,
            permanent_secretary: model.permanent_secretary,
            cabinet_member: model.cabinet_member,
            whip_organisation_id: model.whip_organisation_id,
            role_payment_type_id: model.role_payment_type_id,
            attends_cabinet_type_id: model.attends_cabinet_type_id,
            responsibilities: model.responsibilities,
            organisation_ids: domestic,
            worldwide_organisation_ids: worldwide,
        }))
    }

    async fn create(&self, form: &RoleForm) -> Result<Role, DomainError> {
        let role_type = role_type_of(form)?;
        let now = chrono::Utc::now().to_rfc3339();

        let txn = self.db.begin().await?;

        let model = role::ActiveModel {
            name: Set(form.name.trim().to_string()),
            role_type: Set(role_type.as_str().to_string()),
            kind: Set(role_type.kind().to_string()),
            permanent_secretary: Set(role_type.permanent_secretary()),
            cabinet_member: Set(role_type.cabinet_member()),
            whip_organisation_id: Set(form.whip_organisation_id),
            role_payment_type_id: Set(form.role_payment_type_id),
            attends_cabinet_type_id: Set(form.attends_cabinet_type_id),
            responsibilities: Set(form.responsibilities.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        replace_organisations(&txn, model.id, form).await?;
        txn.commit().await?;

        self.find_by_id(model.id)
            .await?
            .ok_or(DomainError::NotFound("Role"))
    }

    async fn update(&self, id: i32, form: &RoleForm) -> Result<Role, DomainError> {
        let role_type = role_type_of(form)?;

        let txn = self.db.begin().await?;

        let existing = role::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound("Role"))?;

        let mut active: role::ActiveModel = existing.into();
        active.name = Set(form.name.trim().to_string());
        active.role_type = Set(role_type.as_str().to_string());
        active.kind = Set(role_type.kind().to_string());
        active.permanent_secretary = Set(role_type.permanent_secretary());
        active.cabinet_member = Set(role_type.cabinet_member());
        active.whip_organisation_id = Set(form.whip_organisation_id);
        active.role_payment_type_id = Set(form.role_payment_type_id);
        active.attends_cabinet_type_id = Set(form.attends_cabinet_type_id);
        active.responsibilities = Set(form.responsibilities.clone());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&txn).await?;

        replace_organisations(&txn, id, form).await?;
        txn.commit().await?;

        self.find_by_id(id).await?.ok_or(DomainError::NotFound("Role"))
    }

    async fn dependants(&self, id: i32) -> Result<RoleDependants, DomainError> {
        let appointments = role_appointment::Entity::find()
            .filter(role_appointment::Column::RoleId.eq(id))
            .count(&self.db)
            .await?;
        let organisations = role_organisation::Entity::find()
            .filter(role_organisation::Column::RoleId.eq(id))
            .count(&self.db)
            .await?;
        let documents = edition_ministerial_role::Entity::find()
            .filter(edition_ministerial_role::Column::RoleId.eq(id))
            .count(&self.db)
            .await?;

        Ok(RoleDependants {
            appointments,
            organisations,
            documents,
        })
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = role::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound("Role"));
        }
        Ok(())
    }

    async fn organisation_options(&self) -> Result<Vec<OrganisationOption>, DomainError> {
        let organisations = organisation::Entity::find()
            .order_by_asc(organisation::Column::Name)
            .all(&self.db)
            .await?;

        Ok(organisations
            .into_iter()
            .map(|o| OrganisationOption {
                id: o.id,
                name: o.name,
                worldwide: o.worldwide,
            })
            .collect())
    }
}
