pub mod use_online;
