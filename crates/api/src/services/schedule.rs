//! Scheduling service.
//!
//! Composes the customer and doctor stores (reference checks go straight
//! to the store, not through the cached services, so a genuinely missing
//! reference is never masked by stale cache data), enforces the compound
//! doctor+time uniqueness invariant, and triggers notifications on
//! create and delete.

use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use domain::error::DomainError;
use domain::models::{
    AppointmentNotice, CreateScheduleRequest, Page, Schedule, ScheduleDetails,
};
use domain::store::{CustomerStore, DoctorStore, ScheduleStore};
use shared::pagination::PageParams;

use crate::cache::TieredCache;

use super::{NotificationService, INVALIDATED_LIST_PAGES};

pub struct ScheduleService {
    schedules: Arc<dyn ScheduleStore>,
    customers: Arc<dyn CustomerStore>,
    doctors: Arc<dyn DoctorStore>,
    cache: Arc<TieredCache<Schedule>>,
    notifier: NotificationService,
}

fn cache_key(id: Uuid) -> String {
    format!("schedule:{}", id)
}

fn list_cache_key(page: i64, limit: i64) -> String {
    format!("schedules:page:{}:limit:{}", page, limit)
}

impl ScheduleService {
    pub fn new(
        schedules: Arc<dyn ScheduleStore>,
        customers: Arc<dyn CustomerStore>,
        doctors: Arc<dyn DoctorStore>,
        cache: Arc<TieredCache<Schedule>>,
        notifier: NotificationService,
    ) -> Self {
        Self {
            schedules,
            customers,
            doctors,
            cache,
            notifier,
        }
    }

    /// Books an appointment.
    ///
    /// Reference checks run customer first, then doctor; the compound
    /// uniqueness probe is a single equality match on the pair. The
    /// notification enqueue is best-effort: once the row is durably
    /// written the create succeeds even if enqueuing fails.
    pub async fn create(&self, request: CreateScheduleRequest) -> Result<Schedule, DomainError> {
        let customer = self
            .customers
            .find_by_id(request.customer_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Customer not found".into()))?;

        let doctor = self
            .doctors
            .find_by_id(request.doctor_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Doctor not found".into()))?;

        if self
            .schedules
            .find_by_doctor_and_time(request.doctor_id, request.scheduled_at)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict("Schedule already exists".into()));
        }

        let schedule = self
            .schedules
            .insert(
                &request.objective,
                request.customer_id,
                request.doctor_id,
                request.scheduled_at,
            )
            .await?;

        self.invalidate_list_cache().await;

        let notice = AppointmentNotice {
            customer_email: customer.email,
            customer_name: customer.name,
            doctor_name: doctor.name,
            objective: schedule.objective.clone(),
            scheduled_at: schedule.scheduled_at,
        };
        if let Err(e) = self.notifier.appointment_created(notice).await {
            warn!(
                schedule_id = %schedule.id,
                error = %e,
                "Failed to enqueue created notification; schedule was still created"
            );
        }

        Ok(schedule)
    }

    pub async fn get(&self, id: Uuid) -> Result<Schedule, DomainError> {
        let key = cache_key(id);

        if let Some(schedule) = self.cache.get(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(schedule);
        }

        debug!(key = %key, "Cache miss");
        let schedule = self
            .schedules
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Schedule not found".into()))?;

        self.cache.insert(key, schedule.clone()).await;

        Ok(schedule)
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<Schedule>, DomainError> {
        let key = list_cache_key(params.page, params.limit);

        if let Some(page) = self.cache.get_list(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(page);
        }

        debug!(key = %key, "Cache miss");
        let offset = params.resolve_offset();
        let (data, total) = tokio::try_join!(
            self.schedules.list(offset, params.limit),
            self.schedules.count()
        )?;

        let page = Page::new(data, total, params.page, params.limit);
        self.cache.insert_list(key, page.clone()).await;

        Ok(page)
    }

    /// Cancels an appointment.
    ///
    /// The relation-including read goes straight to the store (the joined
    /// customer/doctor data is not guaranteed to be cached) and happens
    /// before the delete, since the cancellation notice needs names that
    /// are unreachable once the row is gone.
    pub async fn delete(&self, id: Uuid) -> Result<ScheduleDetails, DomainError> {
        let details = self
            .schedules
            .find_with_relations(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Schedule not found".into()))?;

        self.schedules.delete(id).await?;

        self.cache.invalidate(&cache_key(id)).await;
        self.invalidate_list_cache().await;

        let notice = AppointmentNotice {
            customer_email: details.customer.email.clone(),
            customer_name: details.customer.name.clone(),
            doctor_name: details.doctor.name.clone(),
            objective: details.schedule.objective.clone(),
            scheduled_at: details.schedule.scheduled_at,
        };
        if let Err(e) = self.notifier.appointment_cancelled(notice).await {
            warn!(
                schedule_id = %id,
                error = %e,
                "Failed to enqueue cancelled notification; schedule was still deleted"
            );
        }

        Ok(details)
    }

    async fn invalidate_list_cache(&self) {
        for (page, limit) in INVALIDATED_LIST_PAGES {
            self.cache.invalidate_list(&list_cache_key(page, limit)).await;
        }
    }
}
