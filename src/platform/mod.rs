pub mod play_services;
