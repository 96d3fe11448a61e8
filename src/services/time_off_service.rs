// src/services/time_off_service.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TimeOffRepository,
    models::{
        auth::{Role, User},
        time_off::{TimeOffRequest, TimeOffRequestDetail, TimeOffStatus},
    },
};

#[derive(Clone)]
pub struct TimeOffService {
    repo: TimeOffRepository,
}

impl TimeOffService {
    pub fn new(repo: TimeOffRepository) -> Self {
        Self { repo }
    }

    pub async fn request(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: Option<&str>,
    ) -> Result<TimeOffRequest, AppError> {
        self.repo.create(user_id, start_date, end_date, reason).await
    }

    // Gerente vê todos os pedidos; funcionário só os próprios.
    pub async fn list(&self, viewer: &User) -> Result<Vec<TimeOffRequestDetail>, AppError> {
        let filter = match viewer.role {
            Role::Manager => None,
            Role::Employee => Some(viewer.id),
        };
        self.repo.list_detailed(filter).await
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: TimeOffStatus,
    ) -> Result<TimeOffRequestDetail, AppError> {
        self.repo
            .update_status(id, status)
            .await?
            .ok_or(AppError::TimeOffNotFound)
    }
}
