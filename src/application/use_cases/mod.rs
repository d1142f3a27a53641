pub mod status_check;
pub mod sync_projects;
