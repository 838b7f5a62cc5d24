pub mod endpoint;
pub mod query_params;
pub mod resource_id;
pub mod time_row;
