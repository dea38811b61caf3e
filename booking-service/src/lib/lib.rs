pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::activity;
pub use domain::booking;
pub use domain::payment;
pub use domain::role;
pub use domain::space;
pub use domain::user;
pub use outbound::repositories;
