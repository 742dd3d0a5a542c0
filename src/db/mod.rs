pub mod db;
pub mod harvests;
