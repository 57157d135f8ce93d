// Adapters layer: concrete implementations for external systems (MxMC over http, dry run, local storage).

pub mod dry_run;
pub mod http;
pub mod storage;
