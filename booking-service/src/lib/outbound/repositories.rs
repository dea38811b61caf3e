pub mod activity;
pub mod booking;
pub mod payment;
pub mod space;
pub mod user;

pub use activity::PostgresActivityLogRepository;
pub use booking::PostgresBookingRepository;
pub use payment::PostgresPaymentRepository;
pub use space::PostgresSpaceRepository;
pub use user::PostgresUserRepository;
