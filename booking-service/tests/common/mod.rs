use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use booking_service::activity::errors::ActivityLogError;
use booking_service::activity::models::ActivityLog;
use booking_service::activity::ports::ActivityLogRepository;
use booking_service::activity::service::ActivityLogService;
use booking_service::booking::errors::BookingError;
use booking_service::booking::models::Booking;
use booking_service::booking::models::BookingId;
use booking_service::booking::ports::BookingRepository;
use booking_service::booking::service::BookingService;
use booking_service::config::RouteAccess;
use booking_service::inbound::http::router::create_router;
use booking_service::inbound::http::router::serve;
use booking_service::inbound::http::router::AppState;
use booking_service::inbound::http::router::RouterOptions;
use booking_service::payment::errors::PaymentError;
use booking_service::payment::models::Payment;
use booking_service::payment::models::PaymentId;
use booking_service::payment::ports::PaymentRepository;
use booking_service::payment::service::PaymentService;
use booking_service::role::models::RoleId;
use booking_service::space::errors::SpaceError;
use booking_service::space::models::Space;
use booking_service::space::models::SpaceId;
use booking_service::space::ports::SpaceRepository;
use booking_service::space::service::SpaceService;
use booking_service::user::errors::UserError;
use booking_service::user::models::EmailAddress;
use booking_service::user::models::User;
use booking_service::user::models::UserId;
use booking_service::user::ports::UserRepository;
use booking_service::user::service::UserService;
use serde_json::json;
use serde_json::Value;
use tokio::sync::Mutex;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub store: Arc<InMemoryStore>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application with the default (protected) logs routes
    pub async fn spawn() -> Self {
        Self::spawn_with(RouteAccess::Protected).await
    }

    pub async fn spawn_with(logs_access: RouteAccess) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, 24));

        let activity_service = Arc::new(ActivityLogService::new(Arc::clone(&store)));
        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&store),
                Arc::clone(&activity_service),
                Arc::clone(&authenticator),
            )),
            space_service: Arc::new(SpaceService::new(Arc::clone(&store))),
            booking_service: Arc::new(BookingService::new(
                Arc::clone(&store),
                Arc::clone(&activity_service),
            )),
            payment_service: Arc::new(PaymentService::new(
                Arc::clone(&store),
                Arc::clone(&activity_service),
            )),
            activity_service,
            authenticator: Arc::clone(&authenticator),
        };
        let options = RouterOptions {
            logs_access,
            allowed_origins: vec!["http://localhost:5173".to_string()],
        };

        let router = create_router(state, &options);

        // Spawn server in background
        tokio::spawn(async move {
            serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            store,
            authenticator,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return a session token for it
    pub async fn register_and_login(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        self.login(email, password).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Create a space and return its id
    pub async fn create_space(&self, token: &str, name: &str) -> String {
        let response = self
            .post_authenticated("/api/spaces", token)
            .json(&json!({ "name": name, "capacity": 10, "location": "Floor 1" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().expect("Missing id").to_string()
    }
}

#[derive(Default)]
struct Tables {
    roles: Vec<RoleId>,
    users: Vec<User>,
    spaces: Vec<Space>,
    bookings: Vec<Booking>,
    payments: Vec<Payment>,
    logs: Vec<ActivityLog>,
}

/// In-memory stand-in for PostgreSQL honouring the same uniqueness,
/// foreign-key and cascade rules as the migrations.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub async fn add_role(&self) -> RoleId {
        let id = RoleId::new();
        self.tables.lock().await.roles.push(id);
        id
    }

    pub async fn password_hash_of(&self, email: &str) -> Option<String> {
        self.tables
            .lock()
            .await
            .users
            .iter()
            .find(|u| u.email.as_str() == email)
            .map(|u| u.password_hash.clone())
    }

    pub async fn booking_count(&self) -> usize {
        self.tables.lock().await.bookings.len()
    }

    pub async fn payment_count(&self) -> usize {
        self.tables.lock().await.payments.len()
    }
}

fn check_user_write(tables: &Tables, user: &User) -> Result<(), UserError> {
    if tables
        .users
        .iter()
        .any(|u| u.id != user.id && u.email == user.email)
    {
        return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
    }
    if let Some(role_id) = user.role_id {
        if !tables.roles.contains(&role_id) {
            return Err(UserError::UnknownRole(role_id.to_string()));
        }
    }
    Ok(())
}

fn check_booking_write(tables: &Tables, booking: &Booking) -> Result<(), BookingError> {
    if !tables.users.iter().any(|u| u.id == booking.user_id) {
        return Err(BookingError::UnknownUser(booking.user_id.to_string()));
    }
    if !tables.spaces.iter().any(|s| s.id == booking.space_id) {
        return Err(BookingError::UnknownSpace(booking.space_id.to_string()));
    }
    if tables.bookings.iter().any(|b| b.conflicts_with(booking)) {
        return Err(BookingError::SlotUnavailable(booking.space_id.to_string()));
    }
    Ok(())
}

fn remove_bookings(tables: &mut Tables, keep: impl Fn(&Booking) -> bool) {
    let removed: Vec<BookingId> = tables
        .bookings
        .iter()
        .filter(|b| !keep(b))
        .map(|b| b.id)
        .collect();
    tables.bookings.retain(|b| keep(b));
    tables
        .payments
        .retain(|p| !removed.contains(&p.booking_id));
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.lock().await;
        check_user_write(&tables, &user)?;
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.email == *email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let tables = self.tables.lock().await;
        let mut users = tables.users.clone();
        users.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.lock().await;
        check_user_write(&tables, &user)?;
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id.to_string()))?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut tables = self.tables.lock().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != *id);
        if tables.users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        remove_bookings(&mut tables, |b| b.user_id != *id);
        for entry in tables.logs.iter_mut().filter(|l| l.user_id == Some(*id)) {
            entry.user_id = None;
        }
        Ok(())
    }
}

#[async_trait]
impl SpaceRepository for InMemoryStore {
    async fn create(&self, space: Space) -> Result<Space, SpaceError> {
        self.tables.lock().await.spaces.push(space.clone());
        Ok(space)
    }

    async fn find_by_id(&self, id: &SpaceId) -> Result<Option<Space>, SpaceError> {
        let tables = self.tables.lock().await;
        Ok(tables.spaces.iter().find(|s| s.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Space>, SpaceError> {
        let tables = self.tables.lock().await;
        let mut spaces = tables.spaces.clone();
        spaces.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(spaces)
    }

    async fn update(&self, space: Space) -> Result<Space, SpaceError> {
        let mut tables = self.tables.lock().await;
        let slot = tables
            .spaces
            .iter_mut()
            .find(|s| s.id == space.id)
            .ok_or(SpaceError::NotFound(space.id.to_string()))?;
        *slot = space.clone();
        Ok(space)
    }

    async fn delete(&self, id: &SpaceId) -> Result<(), SpaceError> {
        let mut tables = self.tables.lock().await;
        let before = tables.spaces.len();
        tables.spaces.retain(|s| s.id != *id);
        if tables.spaces.len() == before {
            return Err(SpaceError::NotFound(id.to_string()));
        }
        remove_bookings(&mut tables, |b| b.space_id != *id);
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create(&self, booking: Booking) -> Result<Booking, BookingError> {
        let mut tables = self.tables.lock().await;
        check_booking_write(&tables, &booking)?;
        tables.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingError> {
        let tables = self.tables.lock().await;
        Ok(tables.bookings.iter().find(|b| b.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingError> {
        let tables = self.tables.lock().await;
        let mut bookings = tables.bookings.clone();
        bookings.sort_by_key(|b| b.slot.starts_at());
        Ok(bookings)
    }

    async fn update(&self, booking: Booking) -> Result<Booking, BookingError> {
        let mut tables = self.tables.lock().await;
        check_booking_write(&tables, &booking)?;
        let slot = tables
            .bookings
            .iter_mut()
            .find(|b| b.id == booking.id)
            .ok_or(BookingError::NotFound(booking.id.to_string()))?;
        *slot = booking.clone();
        Ok(booking)
    }

    async fn delete(&self, id: &BookingId) -> Result<(), BookingError> {
        let mut tables = self.tables.lock().await;
        if !tables.bookings.iter().any(|b| b.id == *id) {
            return Err(BookingError::NotFound(id.to_string()));
        }
        remove_bookings(&mut tables, |b| b.id != *id);
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn create(&self, payment: Payment) -> Result<Payment, PaymentError> {
        let mut tables = self.tables.lock().await;
        if !tables.bookings.iter().any(|b| b.id == payment.booking_id) {
            return Err(PaymentError::UnknownBooking(payment.booking_id.to_string()));
        }
        if tables
            .payments
            .iter()
            .any(|p| p.booking_id == payment.booking_id)
        {
            return Err(PaymentError::AlreadyExistsForBooking(
                payment.booking_id.to_string(),
            ));
        }
        tables.payments.push(payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, PaymentError> {
        let tables = self.tables.lock().await;
        Ok(tables.payments.iter().find(|p| p.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Payment>, PaymentError> {
        let tables = self.tables.lock().await;
        let mut payments = tables.payments.clone();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payments)
    }

    async fn update(&self, payment: Payment) -> Result<Payment, PaymentError> {
        let mut tables = self.tables.lock().await;
        let slot = tables
            .payments
            .iter_mut()
            .find(|p| p.id == payment.id)
            .ok_or(PaymentError::NotFound(payment.id.to_string()))?;
        *slot = payment.clone();
        Ok(payment)
    }

    async fn delete(&self, id: &PaymentId) -> Result<(), PaymentError> {
        let mut tables = self.tables.lock().await;
        let before = tables.payments.len();
        tables.payments.retain(|p| p.id != *id);
        if tables.payments.len() == before {
            return Err(PaymentError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryStore {
    async fn append(&self, entry: ActivityLog) -> Result<ActivityLog, ActivityLogError> {
        let mut tables = self.tables.lock().await;
        if let Some(user_id) = entry.user_id {
            if !tables.users.iter().any(|u| u.id == user_id) {
                return Err(ActivityLogError::UnknownUser(user_id.to_string()));
            }
        }
        tables.logs.push(entry.clone());
        Ok(entry)
    }

    async fn list_all(&self) -> Result<Vec<ActivityLog>, ActivityLogError> {
        let tables = self.tables.lock().await;
        // Insertion order breaks ties between entries written in the same instant.
        Ok(tables.logs.iter().rev().cloned().collect())
    }
}
