pub mod creator_routes;
pub mod page_routes;
