//! Doctor service: cache-aside CRUD, no uniqueness constraint.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use domain::error::DomainError;
use domain::models::{CreateDoctorRequest, Doctor, Page, UpdateDoctorRequest};
use domain::store::DoctorStore;
use shared::pagination::PageParams;

use crate::cache::TieredCache;

use super::INVALIDATED_LIST_PAGES;

/// Cache-aside orchestration for doctor records.
pub struct DoctorService {
    store: Arc<dyn DoctorStore>,
    cache: Arc<TieredCache<Doctor>>,
}

fn cache_key(id: Uuid) -> String {
    format!("doctor:{}", id)
}

fn list_cache_key(page: i64, limit: i64) -> String {
    format!("doctors:page:{}:limit:{}", page, limit)
}

impl DoctorService {
    pub fn new(store: Arc<dyn DoctorStore>, cache: Arc<TieredCache<Doctor>>) -> Self {
        Self { store, cache }
    }

    pub async fn create(&self, request: CreateDoctorRequest) -> Result<Doctor, DomainError> {
        let doctor = self.store.insert(&request.name).await?;
        self.invalidate_list_cache().await;

        Ok(doctor)
    }

    pub async fn get(&self, id: Uuid) -> Result<Doctor, DomainError> {
        let key = cache_key(id);

        if let Some(doctor) = self.cache.get(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(doctor);
        }

        debug!(key = %key, "Cache miss");
        let doctor = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Doctor not found".into()))?;

        self.cache.insert(key, doctor.clone()).await;

        Ok(doctor)
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<Doctor>, DomainError> {
        let key = list_cache_key(params.page, params.limit);

        if let Some(page) = self.cache.get_list(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(page);
        }

        debug!(key = %key, "Cache miss");
        let offset = params.resolve_offset();
        let (data, total) = tokio::try_join!(
            self.store.list(offset, params.limit),
            self.store.count()
        )?;

        let page = Page::new(data, total, params.page, params.limit);
        self.cache.insert_list(key, page.clone()).await;

        Ok(page)
    }

    pub async fn update(&self, id: Uuid, patch: UpdateDoctorRequest) -> Result<Doctor, DomainError> {
        self.get(id).await?;

        let doctor = self.store.update(id, patch.name.as_deref()).await?;

        self.cache.invalidate(&cache_key(id)).await;
        self.invalidate_list_cache().await;

        Ok(doctor)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Doctor, DomainError> {
        self.get(id).await?;

        let doctor = self.store.delete(id).await?;

        self.cache.invalidate(&cache_key(id)).await;
        self.invalidate_list_cache().await;

        Ok(doctor)
    }

    async fn invalidate_list_cache(&self) {
        for (page, limit) in INVALIDATED_LIST_PAGES {
            self.cache.invalidate_list(&list_cache_key(page, limit)).await;
        }
    }
}
