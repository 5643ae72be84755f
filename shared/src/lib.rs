pub mod models;
pub mod utils;

// Domain records are shared between the report pipeline and the REST shim.
// Number formatting lives in utils so the console and any other presenter agree.
