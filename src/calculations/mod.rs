pub mod critical_path;
pub mod date_assignment;
pub mod forward_pass;
