//! Customer service: cache-aside CRUD with email uniqueness.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use domain::error::DomainError;
use domain::models::{CreateCustomerRequest, Customer, Page, UpdateCustomerRequest};
use domain::store::CustomerStore;
use shared::pagination::PageParams;

use crate::cache::TieredCache;

use super::INVALIDATED_LIST_PAGES;

/// Cache-aside orchestration for customer records.
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    cache: Arc<TieredCache<Customer>>,
}

fn cache_key(id: Uuid) -> String {
    format!("customer:{}", id)
}

fn list_cache_key(page: i64, limit: i64) -> String {
    format!("customers:page:{}:limit:{}", page, limit)
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>, cache: Arc<TieredCache<Customer>>) -> Self {
        Self { store, cache }
    }

    /// Registers a customer. The email uniqueness probe runs before any
    /// write; on conflict nothing is inserted.
    pub async fn create(&self, request: CreateCustomerRequest) -> Result<Customer, DomainError> {
        if self.store.find_by_email(&request.email).await?.is_some() {
            return Err(DomainError::Conflict("Customer already exists".into()));
        }

        let customer = self.store.insert(&request.name, &request.email).await?;
        self.invalidate_list_cache().await;

        Ok(customer)
    }

    /// Fetches a customer by id, cache first. Only the miss path populates
    /// the cache; a hit does not refresh the TTL.
    pub async fn get(&self, id: Uuid) -> Result<Customer, DomainError> {
        let key = cache_key(id);

        if let Some(customer) = self.cache.get(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(customer);
        }

        debug!(key = %key, "Cache miss");
        let customer = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Customer not found".into()))?;

        self.cache.insert(key, customer.clone()).await;

        Ok(customer)
    }

    /// Lists customers, newest first. The cache key incorporates page and
    /// limit only; an explicit offset changes the rows fetched but not the
    /// key, matching the envelope's page/limit identity.
    pub async fn list(&self, params: PageParams) -> Result<Page<Customer>, DomainError> {
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

    /// Applies a partial-field patch. The initial `get` surfaces NotFound
    /// for a missing target and warms the cache as a side effect.
    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateCustomerRequest,
    ) -> Result<Customer, DomainError> {
        self.get(id).await?;

        if let Some(email) = &patch.email {
            if let Some(existing) = self.store.find_by_email(email).await? {
                if existing.id != id {
                    return Err(DomainError::Conflict("Email already used".into()));
                }
            }
        }

        let customer = self
            .store
            .update(id, patch.name.as_deref(), patch.email.as_deref())
            .await?;

        self.cache.invalidate(&cache_key(id)).await;
        self.invalidate_list_cache().await;

        Ok(customer)
    }

    /// Deletes a customer, returning its last known value.
    pub async fn delete(&self, id: Uuid) -> Result<Customer, DomainError> {
        self.get(id).await?;

        let customer = self.store.delete(id).await?;

        self.cache.invalidate(&cache_key(id)).await;
        self.invalidate_list_cache().await;

        Ok(customer)
    }

    async fn invalidate_list_cache(&self) {
        for (page, limit) in INVALIDATED_LIST_PAGES {
            self.cache.invalidate_list(&list_cache_key(page, limit)).await;
        }
    }
}
