pub mod dhcp;
pub mod menus;
pub mod store;
pub mod tftp;
