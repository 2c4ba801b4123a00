//! Black-box service tests.
//!
//! Drive the services against in-memory store fakes (with read/write
//! counters) and the real moka cache, so cache-aside behavior, uniqueness
//! checks, and notification enqueues are observable without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use clinic_scheduler_api::cache::{CacheConfig, TieredCache};
use clinic_scheduler_api::services::{
    AuthService, CustomerService, DoctorService, NotificationService, ScheduleService,
};
use domain::error::DomainError;
use domain::models::{
    AppointmentNotice, CreateCustomerRequest, CreateDoctorRequest, CreateScheduleRequest,
    Customer, Doctor, LoginRequest, NotificationJob, NotificationKind, RegisterRequest, Schedule,
    ScheduleDetails, User, UpdateCustomerRequest,
};
use domain::store::{
    CustomerStore, DoctorStore, NotificationQueue, ScheduleStore, UserStore,
};
use shared::jwt::JwtConfig;
use shared::pagination::PageParams;

#[derive(Default)]
struct InMemoryCustomerStore {
    rows: Mutex<Vec<Customer>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryCustomerStore {
    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Customer>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        // Insertion order stands in for created_at; newest first.
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn insert(&self, name: &str, email: &str) -> Result<Customer, DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(customer.clone());
        Ok(customer)
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Customer, DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::Internal("update target missing".into()))?;
        if let Some(name) = name {
            row.name = name.to_string();
        }
        if let Some(email) = email {
            row.email = email.to_string();
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<Customer, DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DomainError::Internal("delete target missing".into()))?;
        Ok(rows.remove(index))
    }
}

#[derive(Default)]
struct InMemoryDoctorStore {
    rows: Mutex<Vec<Doctor>>,
    reads: AtomicUsize,
}

#[async_trait]
impl DoctorStore for InMemoryDoctorStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Doctor>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn insert(&self, name: &str) -> Result<Doctor, DomainError> {
        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(doctor.clone());
        Ok(doctor)
    }

    async fn update(&self, id: Uuid, name: Option<&str>) -> Result<Doctor, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DomainError::Internal("update target missing".into()))?;
        if let Some(name) = name {
            row.name = name.to_string();
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<Doctor, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DomainError::Internal("delete target missing".into()))?;
        Ok(rows.remove(index))
    }
}

struct InMemoryScheduleStore {
    rows: Mutex<Vec<Schedule>>,
    customers: Arc<InMemoryCustomerStore>,
    doctors: Arc<InMemoryDoctorStore>,
    reads: AtomicUsize,
}

impl InMemoryScheduleStore {
    fn new(customers: Arc<InMemoryCustomerStore>, doctors: Arc<InMemoryDoctorStore>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            customers,
            doctors,
            reads: AtomicUsize::new(0),
        }
    }

    fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Schedule>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_doctor_and_time(
        &self,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Option<Schedule>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.doctor_id == doctor_id && s.scheduled_at == scheduled_at)
            .cloned())
    }

    async fn find_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<ScheduleDetails>, DomainError> {
        let schedule = match self.rows.lock().unwrap().iter().find(|s| s.id == id) {
            Some(schedule) => schedule.clone(),
            None => return Ok(None),
        };
        let customer = self
            .customers
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == schedule.customer_id)
            .cloned()
            .ok_or_else(|| DomainError::Internal("dangling customer reference".into()))?;
        let doctor = self
            .doctors
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == schedule.doctor_id)
            .cloned()
            .ok_or_else(|| DomainError::Internal("dangling doctor reference".into()))?;
        Ok(Some(ScheduleDetails {
            schedule,
            customer,
            doctor,
        }))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Schedule>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn insert(
        &self,
        objective: &str,
        customer_id: Uuid,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Schedule, DomainError> {
        let now = Utc::now();
        let schedule = Schedule {
            id: Uuid::new_v4(),
            objective: objective.to_string(),
            customer_id,
            doctor_id,
            scheduled_at,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(schedule.clone());
        Ok(schedule)
    }

    async fn delete(&self, id: Uuid) -> Result<Schedule, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| DomainError::Internal("delete target missing".into()))?;
        Ok(rows.remove(index))
    }
}

#[derive(Default)]
struct RecordingQueue {
    jobs: Mutex<Vec<(NotificationKind, AppointmentNotice)>>,
    fail_enqueue: bool,
}

impl RecordingQueue {
    fn failing() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            fail_enqueue: true,
        }
    }

    fn jobs(&self) -> Vec<(NotificationKind, AppointmentNotice)> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationQueue for RecordingQueue {
    async fn enqueue(
        &self,
        kind: NotificationKind,
        notice: &AppointmentNotice,
    ) -> Result<Uuid, DomainError> {
        if self.fail_enqueue {
            return Err(DomainError::Internal("queue unavailable".into()));
        }
        self.jobs.lock().unwrap().push((kind, notice.clone()));
        Ok(Uuid::new_v4())
    }

    async fn claim_due(&self, _limit: i64) -> Result<Vec<NotificationJob>, DomainError> {
        Ok(Vec::new())
    }

    async fn record_attempt(
        &self,
        _job_id: Uuid,
        _success: bool,
        _error: Option<&str>,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete_finished_before(&self, _cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        Ok(0)
    }
}

#[derive(Default)]
struct InMemoryUserStore {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, DomainError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

struct TestEnv {
    customer_store: Arc<InMemoryCustomerStore>,
    doctor_store: Arc<InMemoryDoctorStore>,
    schedule_store: Arc<InMemoryScheduleStore>,
    queue: Arc<RecordingQueue>,
    customers: CustomerService,
    doctors: DoctorService,
    schedules: ScheduleService,
}

fn test_env_with_queue(queue: Arc<RecordingQueue>) -> TestEnv {
    let customer_store = Arc::new(InMemoryCustomerStore::default());
    let doctor_store = Arc::new(InMemoryDoctorStore::default());
    let schedule_store = Arc::new(InMemoryScheduleStore::new(
        customer_store.clone(),
        doctor_store.clone(),
    ));

    let customers = CustomerService::new(
        customer_store.clone(),
        Arc::new(TieredCache::new(&CacheConfig::default())),
    );
    let doctors = DoctorService::new(
        doctor_store.clone(),
        Arc::new(TieredCache::new(&CacheConfig::default())),
    );
    let schedules = ScheduleService::new(
        schedule_store.clone(),
        customer_store.clone(),
        doctor_store.clone(),
        Arc::new(TieredCache::new(&CacheConfig::default())),
        NotificationService::new(queue.clone()),
    );

    TestEnv {
        customer_store,
        doctor_store,
        schedule_store,
        queue,
        customers,
        doctors,
        schedules,
    }
}

fn test_env() -> TestEnv {
    test_env_with_queue(Arc::new(RecordingQueue::default()))
}

fn customer_request(name: &str, email: &str) -> CreateCustomerRequest {
    CreateCustomerRequest {
        name: name.to_string(),
        email: email.to_string(),
    }
}

async fn booked_schedule(env: &TestEnv) -> (Customer, Doctor, Schedule) {
    let customer = env
        .customers
        .create(customer_request("A", "a@x.com"))
        .await
        .unwrap();
    let doctor = env
        .doctors
        .create(CreateDoctorRequest {
            name: "Dr. B".to_string(),
        })
        .await
        .unwrap();
    let schedule = env
        .schedules
        .create(CreateScheduleRequest {
            objective: "Checkup".to_string(),
            customer_id: customer.id,
            doctor_id: doctor.id,
            scheduled_at: "2026-01-15T10:00:00Z".parse().unwrap(),
        })
        .await
        .unwrap();
    (customer, doctor, schedule)
}

#[tokio::test]
async fn test_get_after_create_is_cached() {
    let env = test_env();
    let created = env
        .customers
        .create(customer_request("A", "a@x.com"))
        .await
        .unwrap();

    let first = env.customers.get(created.id).await.unwrap();
    assert_eq!(first, created);
    let reads_after_first = env.customer_store.reads();

    // Within the TTL window, the second get never touches the store.
    let second = env.customers.get(created.id).await.unwrap();
    assert_eq!(second, created);
    assert_eq!(env.customer_store.reads(), reads_after_first);
}

#[tokio::test]
async fn test_duplicate_email_conflicts_without_insert() {
    let env = test_env();
    env.customers
        .create(customer_request("A", "a@x.com"))
        .await
        .unwrap();

    let result = env
        .customers
        .create(customer_request("Other", "a@x.com"))
        .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
    assert_eq!(env.customer_store.len(), 1);
}

#[tokio::test]
async fn test_get_missing_id_fails_not_found() {
    let env = test_env();
    let result = env.customers.get(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_update_missing_id_never_reaches_store_mutation() {
    let env = test_env();
    let result = env
        .customers
        .update(
            Uuid::new_v4(),
            UpdateCustomerRequest {
                name: Some("New".to_string()),
                email: None,
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
    assert_eq!(env.customer_store.writes(), 0);
}

#[tokio::test]
async fn test_delete_missing_id_never_reaches_store_mutation() {
    let env = test_env();
    let result = env.customers.delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
    assert_eq!(env.customer_store.writes(), 0);
}

#[tokio::test]
async fn test_update_conflicts_on_email_held_by_other_customer() {
    let env = test_env();
    env.customers
        .create(customer_request("A", "a@x.com"))
        .await
        .unwrap();
    let b = env
        .customers
        .create(customer_request("B", "b@x.com"))
        .await
        .unwrap();

    let result = env
        .customers
        .update(
            b.id,
            UpdateCustomerRequest {
                name: None,
                email: Some("a@x.com".to_string()),
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn test_update_allows_keeping_own_email() {
    let env = test_env();
    let a = env
        .customers
        .create(customer_request("A", "a@x.com"))
        .await
        .unwrap();

    let updated = env
        .customers
        .update(
            a.id,
            UpdateCustomerRequest {
                name: Some("A2".to_string()),
                email: Some("a@x.com".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "A2");
    assert_eq!(updated.email, "a@x.com");
}

#[tokio::test]
async fn test_list_second_call_served_from_cache() {
    let env = test_env();
    env.customers
        .create(customer_request("A", "a@x.com"))
        .await
        .unwrap();

    let first = env.customers.list(PageParams::new(1, 10)).await.unwrap();
    let reads_after_first = env.customer_store.reads();

    let second = env.customers.list(PageParams::new(1, 10)).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(env.customer_store.reads(), reads_after_first);
}

#[tokio::test]
async fn test_list_after_mutation_is_not_stale() {
    let env = test_env();
    env.customers
        .create(customer_request("A", "a@x.com"))
        .await
        .unwrap();
    env.customers.list(PageParams::default()).await.unwrap();

    let b = env
        .customers
        .create(customer_request("B", "b@x.com"))
        .await
        .unwrap();

    let page = env.customers.list(PageParams::default()).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.data.len(), 2);
    // Newest first.
    assert_eq!(page.data[0].id, b.id);
}

#[tokio::test]
async fn test_list_explicit_offset_overrides_derived() {
    let env = test_env();
    for i in 0..5 {
        env.customers
            .create(customer_request(&format!("C{}", i), &format!("c{}@x.com", i)))
            .await
            .unwrap();
    }

    // page 3 at limit 2 would derive offset 4, but the explicit offset wins.
    let params = PageParams {
        page: 3,
        limit: 2,
        offset: Some(0),
    };
    let page = env.customers.list(params).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].name, "C4");
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn test_doctor_crud_roundtrip() {
    let env = test_env();
    let doctor = env
        .doctors
        .create(CreateDoctorRequest {
            name: "Dr. B".to_string(),
        })
        .await
        .unwrap();

    let fetched = env.doctors.get(doctor.id).await.unwrap();
    assert_eq!(fetched, doctor);
    let reads_after_first = env.doctor_store.reads.load(Ordering::SeqCst);
    env.doctors.get(doctor.id).await.unwrap();
    assert_eq!(env.doctor_store.reads.load(Ordering::SeqCst), reads_after_first);

    let deleted = env.doctors.delete(doctor.id).await.unwrap();
    assert_eq!(deleted.id, doctor.id);
    let result = env.doctors.get(doctor.id).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_schedule_create_checks_customer_before_doctor() {
    let env = test_env();
    // Neither reference exists; the customer check fails first.
    let result = env
        .schedules
        .create(CreateScheduleRequest {
            objective: "Checkup".to_string(),
            customer_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            scheduled_at: Utc::now(),
        })
        .await;
    match result {
        Err(DomainError::NotFound(msg)) => assert_eq!(msg, "Customer not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_schedule_create_missing_doctor_fails_not_found() {
    let env = test_env();
    let customer = env
        .customers
        .create(customer_request("A", "a@x.com"))
        .await
        .unwrap();

    let result = env
        .schedules
        .create(CreateScheduleRequest {
            objective: "Checkup".to_string(),
            customer_id: customer.id,
            doctor_id: Uuid::new_v4(),
            scheduled_at: Utc::now(),
        })
        .await;
    match result {
        Err(DomainError::NotFound(msg)) => assert_eq!(msg, "Doctor not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_schedule_create_enqueues_one_job_with_notice_fields() {
    let env = test_env();
    let (customer, doctor, schedule) = booked_schedule(&env).await;

    let jobs = env.queue.jobs();
    assert_eq!(jobs.len(), 1);
    let (kind, notice) = &jobs[0];
    assert_eq!(*kind, NotificationKind::AppointmentCreated);
    assert_eq!(notice.customer_email, customer.email);
    assert_eq!(notice.customer_name, customer.name);
    assert_eq!(notice.doctor_name, doctor.name);
    assert_eq!(notice.objective, schedule.objective);
    assert_eq!(notice.scheduled_at, schedule.scheduled_at);
}

#[tokio::test]
async fn test_schedule_duplicate_doctor_and_time_conflicts() {
    let env = test_env();
    let (customer, doctor, schedule) = booked_schedule(&env).await;

    let result = env
        .schedules
        .create(CreateScheduleRequest {
            objective: "Follow-up".to_string(),
            customer_id: customer.id,
            doctor_id: doctor.id,
            scheduled_at: schedule.scheduled_at,
        })
        .await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
    assert_eq!(env.schedule_store.len(), 1);
    // Only the first booking produced a job.
    assert_eq!(env.queue.jobs().len(), 1);
}

#[tokio::test]
async fn test_same_doctor_different_time_is_allowed() {
    let env = test_env();
    let (customer, doctor, _) = booked_schedule(&env).await;

    let result = env
        .schedules
        .create(CreateScheduleRequest {
            objective: "Follow-up".to_string(),
            customer_id: customer.id,
            doctor_id: doctor.id,
            scheduled_at: "2026-01-15T11:00:00Z".parse().unwrap(),
        })
        .await;
    assert!(result.is_ok());
    assert_eq!(env.schedule_store.len(), 2);
}

#[tokio::test]
async fn test_schedule_get_is_cached_after_miss() {
    let env = test_env();
    let (_, _, schedule) = booked_schedule(&env).await;

    let first = env.schedules.get(schedule.id).await.unwrap();
    assert_eq!(first, schedule);
    let reads_after_first = env.schedule_store.reads.load(Ordering::SeqCst);

    env.schedules.get(schedule.id).await.unwrap();
    assert_eq!(
        env.schedule_store.reads.load(Ordering::SeqCst),
        reads_after_first
    );
}

#[tokio::test]
async fn test_schedule_delete_returns_details_and_enqueues_cancellation() {
    let env = test_env();
    let (customer, doctor, schedule) = booked_schedule(&env).await;

    let details = env.schedules.delete(schedule.id).await.unwrap();
    assert_eq!(details.schedule, schedule);
    assert_eq!(details.customer.id, customer.id);
    assert_eq!(details.doctor.id, doctor.id);
    assert_eq!(env.schedule_store.len(), 0);

    let jobs = env.queue.jobs();
    assert_eq!(jobs.len(), 2);
    let (kind, notice) = &jobs[1];
    assert_eq!(*kind, NotificationKind::AppointmentCancelled);
    // Sourced from the pre-deletion read.
    assert_eq!(notice.customer_email, customer.email);
    assert_eq!(notice.doctor_name, doctor.name);
    assert_eq!(notice.objective, schedule.objective);
    assert_eq!(notice.scheduled_at, schedule.scheduled_at);
}

#[tokio::test]
async fn test_schedule_delete_missing_id_fails_not_found() {
    let env = test_env();
    let result = env.schedules.delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
    assert!(env.queue.jobs().is_empty());
}

#[tokio::test]
async fn test_enqueue_failure_does_not_fail_schedule_create() {
    let env = test_env_with_queue(Arc::new(RecordingQueue::failing()));
    let (_, _, schedule) = {
        let customer = env
            .customers
            .create(customer_request("A", "a@x.com"))
            .await
            .unwrap();
        let doctor = env
            .doctors
            .create(CreateDoctorRequest {
                name: "Dr. B".to_string(),
            })
            .await
            .unwrap();
        let schedule = env
            .schedules
            .create(CreateScheduleRequest {
                objective: "Checkup".to_string(),
                customer_id: customer.id,
                doctor_id: doctor.id,
                scheduled_at: Utc::now(),
            })
            .await
            .unwrap();
        (customer, doctor, schedule)
    };

    // The row was durably created even though enqueuing failed.
    assert_eq!(env.schedule_store.len(), 1);
    assert_eq!(env.schedules.get(schedule.id).await.unwrap(), schedule);
}

#[tokio::test]
async fn test_auth_register_login_validate_roundtrip() {
    let users = Arc::new(InMemoryUserStore::default());
    let auth = AuthService::new(users, JwtConfig::new("test-secret", 3600));

    let user = auth
        .register(RegisterRequest {
            email: "a@x.com".to_string(),
            password: "longenough".to_string(),
            confirm_password: "longenough".to_string(),
        })
        .await
        .unwrap();

    let login = auth
        .login(LoginRequest {
            email: "a@x.com".to_string(),
            password: "longenough".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(login.user.id, user.id);

    let identity = auth.validate_token(&login.access_token).await.unwrap();
    assert_eq!(identity.id, user.id);
    assert_eq!(identity.email, "a@x.com");
}

#[tokio::test]
async fn test_auth_rejects_wrong_password_and_duplicate_email() {
    use clinic_scheduler_api::error::ApiError;

    let users = Arc::new(InMemoryUserStore::default());
    let auth = AuthService::new(users, JwtConfig::new("test-secret", 3600));

    auth.register(RegisterRequest {
        email: "a@x.com".to_string(),
        password: "longenough".to_string(),
        confirm_password: "longenough".to_string(),
    })
    .await
    .unwrap();

    let duplicate = auth
        .register(RegisterRequest {
            email: "a@x.com".to_string(),
            password: "otherpassword".to_string(),
            confirm_password: "otherpassword".to_string(),
        })
        .await;
    assert!(matches!(duplicate, Err(ApiError::Conflict(_))));

    let wrong_password = auth
        .login(LoginRequest {
            email: "a@x.com".to_string(),
            password: "wrongpassword".to_string(),
        })
        .await;
    assert!(matches!(wrong_password, Err(ApiError::Validation(_))));

    let garbage_token = auth.validate_token("not.a.token").await;
    assert!(matches!(garbage_token, Err(ApiError::Unauthorized(_))));
}
