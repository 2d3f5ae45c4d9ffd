// Interface adapters: outbound clients and system time sources.

pub mod clients;
pub mod time;
