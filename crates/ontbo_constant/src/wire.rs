//! Query parameter names understood by the service.

pub const REQUESTED_ID: &str = "requested_id";
pub const FIELDS: &str = "fields";
pub const SKIP_ITEMS: &str = "skip_items";
pub const MAX_ITEMS: &str = "max_items";
pub const FEEDBACK: &str = "feedback";
pub const SOURCE_ID: &str = "source_id";
pub const QUERY: &str = "query";
pub const QUERY_TYPE: &str = "query_type";
pub const UPDATE_NOW: &str = "update_now";
pub const WAIT_FOR_RESULT: &str = "wait_for_result";
