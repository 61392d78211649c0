pub mod alert;
pub mod analytics;
pub mod dispatch;
pub mod household;
pub mod init;
pub mod sensor;
pub mod shared;
