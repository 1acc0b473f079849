pub mod demand;
pub mod floors;
pub mod models;
pub mod native;
pub mod observability;
pub mod openrtb;
pub mod schain;
pub mod spec;
pub mod usersync;
pub mod validation;
