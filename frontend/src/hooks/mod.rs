pub mod use_app_context;
pub mod use_crud;
pub mod use_request_scope;
pub mod use_view_data;
