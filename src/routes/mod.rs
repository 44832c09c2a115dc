pub mod savings_routes;
