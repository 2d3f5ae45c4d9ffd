// Outbound clients for external services.

pub mod booking;
