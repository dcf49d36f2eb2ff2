pub mod dev_details;
