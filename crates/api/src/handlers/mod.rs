pub mod contact_requests;
pub mod dogs;
pub mod query;
